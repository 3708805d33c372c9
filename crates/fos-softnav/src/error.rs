//! Soft-navigation errors
//!
//! Degenerate documents never produce these. They surface misuse: node ids
//! from the wrong tree, or load completions the runner is not waiting for.

use crate::scripts::LoadTicket;
use fos_dom::DomError;
use fos_js::JsError;

/// Navigation error
#[derive(Debug, thiserror::Error)]
pub enum SoftNavError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("script runner error: {0}")]
    Runner(#[from] RunnerError),

    #[error("script host error: {0}")]
    Host(#[from] ScriptError),
}

/// Script runner error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    /// A completion arrived for a ticket the runner is not suspended on
    #[error("unexpected completion for {got} (pending: {pending:?})")]
    UnexpectedTicket {
        pending: Option<LoadTicket>,
        got: LoadTicket,
    },

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Error from a script host while running a single script
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScriptError {
    #[error(transparent)]
    Js(#[from] JsError),

    /// No source available for a remote script
    #[error("resource not available: {0}")]
    Unavailable(String),
}
