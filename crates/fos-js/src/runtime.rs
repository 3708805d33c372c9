//! JavaScript Runtime
//!
//! One QuickJS runtime and one full context per `JsContext`. Every
//! evaluation shares the same global object.

use crate::{console, JsError, JsValue};
use rquickjs::{Context, Ctx, Module, Runtime, Value};

/// Heap cap for a single context
const MEMORY_LIMIT: usize = 32 * 1024 * 1024;

/// QuickJS context with the console installed
pub struct JsContext {
    // Held so the runtime outlives the context
    _runtime: Runtime,
    context: Context,
}

impl JsContext {
    /// Create a new context
    pub fn new() -> Result<Self, JsError> {
        tracing::debug!("creating JavaScript context");

        let runtime = Runtime::new().map_err(|e| JsError::Runtime(e.to_string()))?;
        runtime.set_memory_limit(MEMORY_LIMIT);
        let context = Context::full(&runtime).map_err(|e| JsError::Runtime(e.to_string()))?;

        context.with(|ctx| {
            console::install_console(&ctx).map_err(|e| JsError::Runtime(e.to_string()))?;
            // Scripts written for pages address the global as `window`
            let globals = ctx.globals();
            globals
                .set("window", globals.clone())
                .map_err(|e| JsError::Runtime(e.to_string()))?;
            Ok::<_, JsError>(())
        })?;

        Ok(Self { _runtime: runtime, context })
    }

    /// Evaluate code and convert the completion value
    pub fn eval(&self, code: &str) -> Result<JsValue, JsError> {
        self.context.with(|ctx| {
            let result: Value = ctx.eval(code).map_err(|e| exception(&ctx, e))?;
            Ok(convert_value(&result))
        })
    }

    /// Execute code, discarding the completion value
    pub fn exec(&self, code: &str) -> Result<(), JsError> {
        self.context.with(|ctx| {
            let _: Value = ctx.eval(code).map_err(|e| exception(&ctx, e))?;
            Ok(())
        })
    }

    /// Evaluate `code` as an ES module named `name`.
    ///
    /// Module bindings stay module-scoped; only writes to the global object
    /// are visible to later scripts. No module loader is installed, so an
    /// `import` of another module fails.
    pub fn exec_module(&self, name: &str, code: &str) -> Result<(), JsError> {
        self.context.with(|ctx| {
            Module::evaluate(ctx.clone(), name, code)
                .and_then(|promise| promise.finish::<()>())
                .map_err(|e| exception(&ctx, e))
        })
    }
}

impl std::fmt::Debug for JsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsContext").finish_non_exhaustive()
    }
}

/// Turn an engine error into a `JsError`, pulling the thrown value out of
/// the context when the error is an uncaught exception.
fn exception(ctx: &Ctx, err: rquickjs::Error) -> JsError {
    if !matches!(err, rquickjs::Error::Exception) {
        return JsError::Runtime(err.to_string());
    }

    let thrown = ctx.catch();
    let Some(object) = thrown.as_object() else {
        return JsError::Runtime(console::join_values(&[thrown.clone()]));
    };
    let name: String = object.get("name").unwrap_or_default();
    let message: String = object.get("message").unwrap_or_default();
    match name.as_str() {
        "SyntaxError" => JsError::Syntax(message),
        "TypeError" => JsError::TypeError(message),
        "" => JsError::Runtime(message),
        _ => JsError::Runtime(format!("{name}: {message}")),
    }
}

/// Convert a QuickJS value into a `JsValue`
fn convert_value(value: &Value) -> JsValue {
    if value.is_undefined() {
        JsValue::Undefined
    } else if value.is_null() {
        JsValue::Null
    } else if let Some(b) = value.as_bool() {
        JsValue::Bool(b)
    } else if let Some(n) = value.as_int() {
        JsValue::Number(n as f64)
    } else if let Some(n) = value.as_float() {
        JsValue::Number(n)
    } else if let Some(s) = value.as_string() {
        JsValue::String(s.to_string().unwrap_or_default())
    } else if value.is_array() {
        JsValue::Array
    } else if value.is_function() {
        JsValue::Function
    } else {
        JsValue::Object
    }
}
