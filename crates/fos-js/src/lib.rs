//! fOS JavaScript Runtime
//!
//! QuickJS-based script execution with a minimal footprint.
//!
//! Features:
//! - QuickJS runtime via rquickjs
//! - Console API routed to `tracing`
//! - Shared global scope across evaluations, so scripts that run one
//!   after another see each other's globals

mod console;
mod runtime;

pub use runtime::JsContext;

/// Evaluate code in a throwaway context
pub fn eval(code: &str) -> Result<JsValue, JsError> {
    JsContext::new()?.eval(code)
}

/// JavaScript value
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object,
    Array,
    Function,
}

impl JsValue {
    /// The number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            JsValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// JavaScript error
#[derive(Debug, Clone, thiserror::Error)]
pub enum JsError {
    /// Engine setup or an uncaught exception
    #[error("JavaScript error: {0}")]
    Runtime(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Type error: {0}")]
    TypeError(String),
}
