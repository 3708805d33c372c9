//! fOS Soft Navigation
//!
//! Updates a live document in place from a freshly fetched page so the
//! page appears to navigate without a reload:
//!
//! - [`merge_metadata`]: positional merge of `<head>` children
//! - [`replace_content`]: `<body>` swap that keeps persistent elements alive
//! - [`ScriptRunner`]: exactly-once, in-order re-execution of scripts,
//!   blocking on remote loads
//!
//! [`SoftNavigator`] runs all three for one navigation.
//!
//! # Example
//!
//! ```rust,ignore
//! use fos_softnav::{JsScriptHost, SoftNavigator};
//!
//! let mut live = fos_html::parse_with_url(current_markup, "https://site.test/");
//! let mut host = JsScriptHost::new()?;
//! let done = SoftNavigator::default()
//!     .navigate(&mut live, next_markup, "https://site.test/about")?
//!     .finish_blocking(&mut live, &mut host)?;
//! ```

mod attributes;
mod body;
mod config;
mod error;
mod head;
mod host;
mod navigation;
mod scripts;

pub use attributes::copy_attributes;
pub use body::{replace_content, ContentSwap};
pub use config::{OrphanPolicy, SoftNavConfig, PREFETCH_REL, PRESERVE_ATTR, RELOAD_ATTR};
pub use error::{RunnerError, ScriptError, SoftNavError};
pub use head::{merge_metadata, metadata_nodes, MetadataEdit, MetadataMerge};
pub use host::{JsScriptHost, ResourceStore, ScriptHost};
pub use navigation::{Navigation, NavigationComplete, SoftNavigator};
pub use scripts::{
    Batch, InlineScript, LoadEvent, LoadNotifier, LoadOutcome, LoadRequest, LoadTicket,
    ReanimationReport, RunnerState, ScriptKind, ScriptRunner,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
