//! Navigation driver
//!
//! Parse the next page, merge metadata, swap content, then run scripts.
//! The live document is borrowed mutably for the whole merge, so only one
//! navigation can be in flight.

use crate::body::{replace_content, ContentSwap};
use crate::error::SoftNavError;
use crate::head::{merge_metadata, MetadataMerge};
use crate::host::ScriptHost;
use crate::scripts::{ReanimationReport, ScriptRunner};
use crate::SoftNavConfig;
use fos_dom::Document;

/// Soft navigator
#[derive(Debug, Clone, Default)]
pub struct SoftNavigator {
    config: SoftNavConfig,
}

impl SoftNavigator {
    pub fn new(config: SoftNavConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SoftNavConfig {
        &self.config
    }

    /// Navigate `live` to the page in `markup`, fetched from `url`.
    ///
    /// Metadata and content are merged before this returns. Scripts are
    /// collected but not started; finish the returned [`Navigation`].
    pub fn navigate(
        &self,
        live: &mut Document,
        markup: &str,
        url: &str,
    ) -> Result<Navigation, SoftNavError> {
        tracing::info!(from = live.url(), to = url, "soft navigation");
        let next = fos_html::parse_with_url(markup, url);
        self.apply(live, &next)
    }

    /// Merge an already parsed next document into `live`
    pub fn apply(&self, live: &mut Document, next: &Document) -> Result<Navigation, SoftNavError> {
        let metadata = merge_metadata(live, next, &self.config)?;
        let content = replace_content(live, next, &self.config)?;
        live.set_url(next.url());

        let runner = if self.config.enable_scripts {
            ScriptRunner::new(live, &self.config)
        } else {
            ScriptRunner::empty()
        };

        Ok(Navigation {
            metadata,
            content,
            runner,
        })
    }
}

/// A navigation whose merge is done and whose scripts are still to run
#[derive(Debug)]
pub struct Navigation {
    metadata: MetadataMerge,
    content: ContentSwap,
    runner: ScriptRunner,
}

impl Navigation {
    pub fn metadata(&self) -> &MetadataMerge {
        &self.metadata
    }

    pub fn content(&self) -> &ContentSwap {
        &self.content
    }

    /// The script runner, for callers that drive loads themselves
    pub fn runner_mut(&mut self) -> &mut ScriptRunner {
        &mut self.runner
    }

    /// Run scripts to the end, awaiting remote loads
    pub async fn finish_async<H: ScriptHost + ?Sized>(
        mut self,
        live: &mut Document,
        host: &mut H,
    ) -> Result<NavigationComplete, SoftNavError> {
        self.runner.run(live, host).await?;
        let complete = NavigationComplete {
            url: live.url().to_string(),
            title: live.title(),
            metadata: self.metadata,
            content: self.content,
            scripts: self.runner.into_report(),
        };
        tracing::info!(
            url = %complete.url,
            scripts = complete.scripts.started(),
            "navigation complete"
        );
        Ok(complete)
    }

    /// Blocking form of [`Navigation::finish_async`]
    pub fn finish_blocking<H: ScriptHost + ?Sized>(
        self,
        live: &mut Document,
        host: &mut H,
    ) -> Result<NavigationComplete, SoftNavError> {
        smol::block_on(self.finish_async(live, host))
    }
}

/// Signal that a navigation has fully completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationComplete {
    pub url: String,
    pub title: String,
    pub metadata: MetadataMerge,
    pub content: ContentSwap,
    pub scripts: ReanimationReport,
}
