//! Example: two soft navigations over one live document
//!
//! Run with `RUST_LOG=debug` to see every merge step and `js=info` for
//! console output from the page scripts.

use anyhow::Result;
use fos_softnav::{JsScriptHost, ResourceStore, SoftNavigator};
use tracing_subscriber::EnvFilter;

const HOME: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Home</title>
  <link rel="stylesheet" href="/site.css">
  <link rel="prefetch" href="/about">
</head>
<body>
  <audio id="radio" flamethrower-preserve data-position="0"></audio>
  <main><h1>Home</h1></main>
</body>
</html>"#;

const ABOUT: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>About</title>
  <link rel="stylesheet" href="/site.css">
  <script data-reload>console.info('analytics: page view')</script>
</head>
<body>
  <audio id="radio" flamethrower-preserve></audio>
  <main><h1>About</h1></main>
  <script src="/widgets.js"></script>
  <script>console.log('widgets ready:', typeof widgets)</script>
</body>
</html>"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("fOS soft navigation v{}", fos_softnav::VERSION);

    let store = ResourceStore::new().with("https://site.test/widgets.js", "var widgets = {}");
    let mut host = JsScriptHost::with_store(store)?;
    let navigator = SoftNavigator::default();

    let mut live = fos_html::parse_with_url(HOME, "https://site.test/");
    let radio = live.get_element_by_id("radio");

    for (markup, url) in [(ABOUT, "https://site.test/about"), (HOME, "https://site.test/")] {
        let done = smol::block_on(async {
            navigator
                .navigate(&mut live, markup, url)?
                .finish_async(&mut live, &mut host)
                .await
        })?;

        println!(
            "{} -> \"{}\": {} metadata edits, {} preserved, {} scripts",
            done.url,
            done.title,
            done.metadata.edits.len(),
            done.content.preserved.len(),
            done.scripts.started()
        );
    }

    assert_eq!(live.get_element_by_id("radio"), radio);
    println!("persistent <audio> kept its identity: {}", radio.is_some());
    Ok(())
}
