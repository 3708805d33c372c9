//! Console API
//!
//! `console.log` and friends forward to `tracing` under the `js` target.

use rquickjs::function::Rest;
use rquickjs::{Ctx, Function, Object, Value};
use std::fmt::Write;

/// Console method name and the tracing level it maps to
const METHODS: &[(&str, &str)] = &[
    ("log", "INFO"),
    ("info", "INFO"),
    ("warn", "WARN"),
    ("error", "ERROR"),
    ("debug", "DEBUG"),
    ("trace", "TRACE"),
];

/// Install `console` into the global object
pub fn install_console(ctx: &Ctx) -> Result<(), rquickjs::Error> {
    let console = Object::new(ctx.clone())?;

    for &(method, level) in METHODS {
        let func = Function::new(ctx.clone(), move |_ctx: Ctx, args: Rest<Value>| {
            emit(level, &join_values(&args.0));
            Ok::<(), rquickjs::Error>(())
        })?;
        console.set(method, func)?;
    }

    ctx.globals().set("console", console)?;
    Ok(())
}

fn emit(level: &str, message: &str) {
    match level {
        "ERROR" => tracing::error!(target: "js", "{message}"),
        "WARN" => tracing::warn!(target: "js", "{message}"),
        "DEBUG" => tracing::debug!(target: "js", "{message}"),
        "TRACE" => tracing::trace!(target: "js", "{message}"),
        _ => tracing::info!(target: "js", "{message}"),
    }
}

/// Space-separated rendering of console arguments
pub(crate) fn join_values(values: &[Value]) -> String {
    let mut output = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        format_value(&mut output, value);
    }
    output
}

/// Format a JavaScript value for logging
fn format_value(out: &mut String, value: &Value) {
    if value.is_undefined() {
        out.push_str("undefined");
    } else if value.is_null() {
        out.push_str("null");
    } else if let Some(b) = value.as_bool() {
        let _ = write!(out, "{b}");
    } else if let Some(n) = value.as_int() {
        let _ = write!(out, "{n}");
    } else if let Some(n) = value.as_float() {
        let _ = write!(out, "{n}");
    } else if let Some(s) = value.as_string() {
        if let Ok(s) = s.to_string() {
            out.push_str(&s);
        }
    } else if value.is_array() {
        out.push_str("[Array]");
    } else if value.is_function() {
        out.push_str("[Function]");
    } else if value.is_object() {
        out.push_str("[Object]");
    } else {
        out.push_str("[unknown]");
    }
}
