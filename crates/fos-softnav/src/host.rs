//! Script hosts
//!
//! A [`ScriptHost`] actually runs what the reanimator starts. The runner
//! decides *when*; the host decides *how*.

use crate::error::ScriptError;
use crate::scripts::{InlineScript, LoadOutcome, LoadRequest, ScriptKind};
use fos_js::JsContext;
use std::collections::{HashMap, VecDeque};

/// Executes inline scripts and services remote loads
pub trait ScriptHost {
    /// Run an inline script to completion
    fn execute(&mut self, script: &InlineScript<'_>) -> Result<(), ScriptError>;

    /// Start loading (and then running) a remote script.
    ///
    /// The host must eventually fire `request.notifier`, or drop it; the
    /// runner does not advance before either happens.
    fn begin_load(&mut self, request: LoadRequest);
}

/// In-memory map of script URLs to their source
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    sources: HashMap<String, String>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the source served for `url`
    pub fn insert(&mut self, url: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(url.into(), source.into());
    }

    pub fn with(mut self, url: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(url, source);
        self
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.sources.get(url).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// QuickJS-backed host. Remote sources come from a [`ResourceStore`].
///
/// Classic scripts share the global scope. Module scripts are evaluated as
/// ES modules, named after their URL (remote) or node id (inline).
///
/// By default a load completes inside `begin_load`. A deferred host queues
/// loads until [`JsScriptHost::flush_loads`], which lets callers observe
/// the runner while a load is outstanding.
pub struct JsScriptHost {
    js: JsContext,
    store: ResourceStore,
    deferred: bool,
    queued: VecDeque<LoadRequest>,
}

impl JsScriptHost {
    pub fn new() -> Result<Self, ScriptError> {
        Self::with_store(ResourceStore::new())
    }

    pub fn with_store(store: ResourceStore) -> Result<Self, ScriptError> {
        Ok(Self {
            js: JsContext::new()?,
            store,
            deferred: false,
            queued: VecDeque::new(),
        })
    }

    /// Queue loads until `flush_loads`
    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    /// The JavaScript context scripts run in
    pub fn context(&self) -> &JsContext {
        &self.js
    }

    pub fn store_mut(&mut self) -> &mut ResourceStore {
        &mut self.store
    }

    /// Loads waiting for `flush_loads`
    pub fn pending_loads(&self) -> usize {
        self.queued.len()
    }

    /// Complete every queued load in request order. Returns how many ran.
    pub fn flush_loads(&mut self) -> usize {
        let mut count = 0;
        while let Some(request) = self.queued.pop_front() {
            self.finish_load(request);
            count += 1;
        }
        count
    }

    fn run(&self, kind: ScriptKind, name: &str, source: &str) -> Result<(), ScriptError> {
        match kind {
            ScriptKind::Module => self.js.exec_module(name, source)?,
            ScriptKind::Classic => self.js.exec(source)?,
            ScriptKind::Data => tracing::trace!(name, "data block, not executed"),
        }
        Ok(())
    }

    fn finish_load(&mut self, request: LoadRequest) {
        let outcome = match self.fetch(&request) {
            Ok(source) => match self.run(request.kind, request.location(), &source) {
                Ok(()) => LoadOutcome::Loaded,
                Err(err) => LoadOutcome::Failed(err.to_string()),
            },
            Err(err) => LoadOutcome::Failed(err.to_string()),
        };
        tracing::debug!(ticket = %request.ticket, location = request.location(), ?outcome, "remote script done");
        request.notifier.notify(outcome);
    }

    fn fetch(&self, request: &LoadRequest) -> Result<String, ScriptError> {
        self.store
            .get(request.location())
            .or_else(|| self.store.get(&request.src))
            .map(str::to_string)
            .ok_or_else(|| ScriptError::Unavailable(request.location().to_string()))
    }
}

impl ScriptHost for JsScriptHost {
    fn execute(&mut self, script: &InlineScript<'_>) -> Result<(), ScriptError> {
        self.run(script.kind, &script.node.to_string(), script.source)
    }

    fn begin_load(&mut self, request: LoadRequest) {
        if self.deferred {
            self.queued.push_back(request);
        } else {
            self.finish_load(request);
        }
    }
}

impl std::fmt::Debug for JsScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsScriptHost")
            .field("resources", &self.store.len())
            .field("deferred", &self.deferred)
            .field("queued", &self.queued.len())
            .finish()
    }
}
