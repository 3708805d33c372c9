//! Script Reanimator
//!
//! Scripts that arrive through parsing or node moves never run. After a
//! merge, every script that should run is rebuilt as a fresh element,
//! swapped in for the old one, and started exactly once, in document order.
//!
//! Two batches are processed back to back: `<head>` scripts carrying the
//! reload marker, then every `<body>` script. A remote script suspends the
//! runner until its load completion arrives; nothing after it runs before
//! that, whether the load succeeded or failed.
//!
//! The runner is a small state machine:
//!
//! ```text
//! Advancing --remote--> Pending(t) --complete(t)--> Loaded(t) --step--> Advancing
//! Advancing --queue empty--> Finished
//! ```

use crate::error::RunnerError;
use crate::host::ScriptHost;
use crate::SoftNavConfig;
use fos_dom::{Attributes, Document, DomTree, ElementData, NodeId, ScriptMark};
use smol::channel::{self, Receiver, Sender};
use std::collections::VecDeque;
use std::fmt;
use url::Url;

/// Identifies one outstanding remote load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// How a remote load ended. Both count as completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

/// Load-completion signal for one ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub ticket: LoadTicket,
    pub outcome: LoadOutcome,
}

/// One-shot sender of a load completion.
///
/// Dropping it without calling [`LoadNotifier::notify`] reports the load as
/// failed, so an abandoned load cannot stall the batch.
#[derive(Debug)]
pub struct LoadNotifier {
    ticket: LoadTicket,
    sender: Option<Sender<LoadEvent>>,
}

impl LoadNotifier {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Signal completion. Returns `false` if the runner is gone.
    pub fn notify(mut self, outcome: LoadOutcome) -> bool {
        self.send(outcome)
    }

    fn send(&mut self, outcome: LoadOutcome) -> bool {
        match self.sender.take() {
            Some(sender) => sender
                .try_send(LoadEvent {
                    ticket: self.ticket,
                    outcome,
                })
                .is_ok(),
            None => false,
        }
    }
}

impl Drop for LoadNotifier {
    fn drop(&mut self) {
        if self.sender.is_some() {
            tracing::warn!(ticket = %self.ticket, "load notifier dropped without completing");
            self.send(LoadOutcome::Failed("load abandoned".to_string()));
        }
    }
}

/// Request to load and run a remote script
#[derive(Debug)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    /// The fresh script element
    pub node: NodeId,
    /// Raw `src` value
    pub src: String,
    /// `src` resolved against the document URL, when it resolves
    pub url: Option<Url>,
    pub kind: ScriptKind,
    /// Attributes of the script element
    pub attrs: Attributes,
    pub notifier: LoadNotifier,
}

impl LoadRequest {
    /// Resolved URL, or the raw `src` when it did not resolve
    pub fn location(&self) -> &str {
        self.url.as_ref().map_or(self.src.as_str(), Url::as_str)
    }
}

/// Inline script handed to a host for execution
#[derive(Debug, Clone, Copy)]
pub struct InlineScript<'a> {
    pub node: NodeId,
    pub kind: ScriptKind,
    pub source: &'a str,
}

/// Script type, from the `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Classic,
    Module,
    /// Data blocks (`application/json`, templates, ...) never run
    Data,
}

/// JavaScript MIME types that mean a classic script
const JS_MIME_TYPES: &[&str] = &[
    "application/ecmascript",
    "application/javascript",
    "application/x-ecmascript",
    "application/x-javascript",
    "text/ecmascript",
    "text/javascript",
    "text/javascript1.0",
    "text/javascript1.1",
    "text/javascript1.2",
    "text/javascript1.3",
    "text/javascript1.4",
    "text/javascript1.5",
    "text/jscript",
    "text/livescript",
    "text/x-ecmascript",
    "text/x-javascript",
];

impl ScriptKind {
    pub fn from_type(type_attr: Option<&str>) -> Self {
        let Some(value) = type_attr.map(str::trim) else {
            return Self::Classic;
        };
        if value.is_empty() {
            return Self::Classic;
        }
        let lower = value.to_ascii_lowercase();
        if lower == "module" {
            Self::Module
        } else if JS_MIME_TYPES.contains(&lower.as_str()) {
            Self::Classic
        } else {
            Self::Data
        }
    }

    pub fn is_executable(self) -> bool {
        self != Self::Data
    }
}

/// Which batch a script belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batch {
    Metadata,
    Content,
}

/// Runner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Ready to take the next script
    Advancing,
    /// Waiting for the completion of this load
    Pending(LoadTicket),
    /// The load completed; the next `step` advances
    Loaded(LoadTicket),
    /// Both batches are done
    Finished,
}

/// What happened to each script, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReanimationReport {
    /// Inline scripts that ran without error
    pub executed: Vec<NodeId>,
    /// Remote scripts whose load completed successfully
    pub loaded: Vec<NodeId>,
    /// Inline scripts that threw, and remote scripts whose load failed
    pub failed: Vec<NodeId>,
    /// Data blocks installed without running
    pub inert: Vec<NodeId>,
    /// Scripts no longer in the document when reached
    pub skipped: Vec<NodeId>,
}

impl ReanimationReport {
    /// Number of scripts that were started
    pub fn started(&self) -> usize {
        self.executed.len() + self.loaded.len() + self.failed.len()
    }
}

/// Sequential script re-execution for one navigation
#[derive(Debug)]
pub struct ScriptRunner {
    queue: VecDeque<(Batch, NodeId)>,
    state: RunnerState,
    pending: Option<NodeId>,
    next_ticket: u64,
    sender: Sender<LoadEvent>,
    events: Receiver<LoadEvent>,
    base: Option<Url>,
    report: ReanimationReport,
}

impl ScriptRunner {
    /// Collect both batches from `doc`, in document order
    pub fn new(doc: &Document, config: &SoftNavConfig) -> Self {
        let tree = doc.tree();
        let mut queue = VecDeque::new();

        if let Some(head) = doc.head() {
            queue.extend(
                scripts_under(tree, head)
                    .filter(|&id| tree.element(id).is_some_and(|e| e.has_attr(&config.reload_attr)))
                    .map(|id| (Batch::Metadata, id)),
            );
        }
        if let Some(body) = doc.body() {
            queue.extend(scripts_under(tree, body).map(|id| (Batch::Content, id)));
        }

        tracing::debug!(scripts = queue.len(), "collected scripts");

        let (sender, events) = channel::unbounded();
        Self {
            queue,
            state: RunnerState::Advancing,
            pending: None,
            next_ticket: 0,
            sender,
            events,
            base: Url::parse(doc.url()).ok(),
            report: ReanimationReport::default(),
        }
    }

    /// A runner with nothing to do
    pub fn empty() -> Self {
        Self::new(&Document::empty("about:blank"), &SoftNavConfig::default())
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Scripts not yet reached
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn report(&self) -> &ReanimationReport {
        &self.report
    }

    pub fn into_report(self) -> ReanimationReport {
        self.report
    }

    /// Advance until a remote script suspends the runner or both batches
    /// are done.
    pub fn step<H: ScriptHost + ?Sized>(
        &mut self,
        doc: &mut Document,
        host: &mut H,
    ) -> Result<RunnerState, RunnerError> {
        loop {
            match self.state {
                RunnerState::Pending(_) | RunnerState::Finished => return Ok(self.state),
                RunnerState::Loaded(_) => self.state = RunnerState::Advancing,
                RunnerState::Advancing => {
                    let Some((batch, node)) = self.queue.pop_front() else {
                        tracing::debug!(started = self.report.started(), "scripts finished");
                        self.state = RunnerState::Finished;
                        continue;
                    };
                    if let Some(ticket) = self.reanimate(doc, host, batch, node)? {
                        self.state = RunnerState::Pending(ticket);
                    }
                }
            }
        }
    }

    /// Deliver a load completion
    pub fn complete(&mut self, event: LoadEvent) -> Result<RunnerState, RunnerError> {
        let RunnerState::Pending(ticket) = self.state else {
            return Err(RunnerError::UnexpectedTicket {
                pending: None,
                got: event.ticket,
            });
        };
        if ticket != event.ticket {
            return Err(RunnerError::UnexpectedTicket {
                pending: Some(ticket),
                got: event.ticket,
            });
        }

        if let Some(node) = self.pending.take() {
            match &event.outcome {
                LoadOutcome::Loaded => self.report.loaded.push(node),
                LoadOutcome::Failed(reason) => {
                    tracing::warn!(%ticket, %node, reason = %reason, "remote script failed to load");
                    self.report.failed.push(node);
                }
            }
        }
        tracing::trace!(%ticket, "load complete");
        self.state = RunnerState::Loaded(ticket);
        Ok(self.state)
    }

    /// Deliver every completion already queued, without waiting
    pub fn poll(&mut self) -> Result<RunnerState, RunnerError> {
        while matches!(self.state, RunnerState::Pending(_)) {
            let Ok(event) = self.events.try_recv() else {
                break;
            };
            self.complete(event)?;
        }
        Ok(self.state)
    }

    /// Run both batches to the end, awaiting each remote load
    pub async fn run<H: ScriptHost + ?Sized>(
        &mut self,
        doc: &mut Document,
        host: &mut H,
    ) -> Result<&ReanimationReport, RunnerError> {
        loop {
            match self.step(doc, host)? {
                RunnerState::Finished => return Ok(&self.report),
                RunnerState::Pending(ticket) => {
                    // The runner owns a sender, so the channel cannot close
                    // here; if it ever did, the load counts as failed
                    let event = self.events.recv().await.unwrap_or(LoadEvent {
                        ticket,
                        outcome: LoadOutcome::Failed("completion channel closed".to_string()),
                    });
                    self.complete(event)?;
                }
                RunnerState::Advancing | RunnerState::Loaded(_) => {}
            }
        }
    }

    /// Rebuild one script and start it. Returns the ticket when it suspends.
    fn reanimate<H: ScriptHost + ?Sized>(
        &mut self,
        doc: &mut Document,
        host: &mut H,
        batch: Batch,
        old: NodeId,
    ) -> Result<Option<LoadTicket>, RunnerError> {
        let tree = doc.tree_mut();
        if !tree.is_connected(old) {
            tracing::debug!(%old, ?batch, "script left the document, skipping");
            self.report.skipped.push(old);
            return Ok(None);
        }

        let (node, source) = rebuild(tree, old)?;
        tree.replace_with(old, node)?;
        tree.discard_subtree(old)?;

        let Some(elem) = tree.element_mut(node) else {
            return Ok(None);
        };
        if !elem.start_script() {
            return Ok(None);
        }
        let attrs = elem.attrs.clone();
        let kind = ScriptKind::from_type(attrs.get("type"));

        if !kind.is_executable() {
            tracing::trace!(%node, "data block, not executed");
            self.report.inert.push(node);
            return Ok(None);
        }

        if let Some(src) = attrs.get("src").filter(|s| !s.trim().is_empty()) {
            let ticket = LoadTicket::new(self.next_ticket);
            self.next_ticket += 1;
            let src = src.trim().to_string();
            let url = resolve(self.base.as_ref(), &src);
            tracing::debug!(%ticket, %node, src = %src, ?batch, "loading remote script");

            self.pending = Some(node);
            host.begin_load(LoadRequest {
                ticket,
                node,
                src,
                url,
                kind,
                attrs,
                notifier: LoadNotifier {
                    ticket,
                    sender: Some(self.sender.clone()),
                },
            });
            return Ok(Some(ticket));
        }

        let script = InlineScript {
            node,
            kind,
            source: &source,
        };
        match host.execute(&script) {
            Ok(()) => {
                tracing::trace!(%node, ?batch, "executed inline script");
                self.report.executed.push(node);
            }
            Err(err) => {
                tracing::warn!(%node, error = %err, "inline script failed");
                self.report.failed.push(node);
            }
        }
        Ok(None)
    }
}

/// HTML `<script>` elements below `root`, in document order
fn scripts_under(tree: &DomTree, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    tree.descendants(root)
        .filter(move |&id| tree.element(id).is_some_and(|e| e.is("script")))
}

/// Build a fresh `<script>` with the old element's attributes and text.
/// The new element is detached.
fn rebuild(tree: &mut DomTree, old: NodeId) -> Result<(NodeId, String), RunnerError> {
    let elem = tree
        .element(old)
        .ok_or(fos_dom::DomError::NotAnElement(old))?;
    let mut fresh = ElementData::new(elem.name.clone()).with_namespace(elem.namespace);
    fresh.attrs = elem.attrs.clone();
    fresh.script = ScriptMark::Fresh;

    let source = tree.text_content(old);
    let node = tree.create_element_with(fresh)?;
    if !source.is_empty() {
        let text = tree.create_text(&source)?;
        tree.append_child(node, text)?;
    }
    Ok((node, source))
}

/// Resolve `src` against the document URL, falling back to `src` itself
/// when it is absolute
fn resolve(base: Option<&Url>, src: &str) -> Option<Url> {
    base.and_then(|base| base.join(src).ok())
        .or_else(|| Url::parse(src).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptError;
    use fos_html::parse_with_url;

    /// Host that records what it was asked to do
    #[derive(Default)]
    struct Recorder {
        ran: Vec<String>,
        loads: Vec<LoadRequest>,
    }

    impl ScriptHost for Recorder {
        fn execute(&mut self, script: &InlineScript<'_>) -> Result<(), ScriptError> {
            if script.source.contains("throw") {
                return Err(ScriptError::Unavailable("boom".into()));
            }
            self.ran.push(script.source.to_string());
            Ok(())
        }

        fn begin_load(&mut self, request: LoadRequest) {
            self.ran.push(format!("load {}", request.src));
            self.loads.push(request);
        }
    }

    fn doc(html: &str) -> Document {
        parse_with_url(html, "https://example.com/docs/page")
    }

    #[test]
    fn test_script_kind() {
        assert_eq!(ScriptKind::from_type(None), ScriptKind::Classic);
        assert_eq!(ScriptKind::from_type(Some("")), ScriptKind::Classic);
        assert_eq!(ScriptKind::from_type(Some("Text/JavaScript")), ScriptKind::Classic);
        assert_eq!(ScriptKind::from_type(Some("module")), ScriptKind::Module);
        assert_eq!(ScriptKind::from_type(Some("application/json")), ScriptKind::Data);
        assert!(!ScriptKind::Data.is_executable());
    }

    #[test]
    fn test_inline_in_order() {
        let mut d = doc("<body><script>a</script><p></p><script>b</script><script>c</script></body>");
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        assert_eq!(runner.step(&mut d, &mut host).unwrap(), RunnerState::Finished);
        assert_eq!(host.ran, vec!["a", "b", "c"]);
        assert_eq!(runner.report().executed.len(), 3);
    }

    #[test]
    fn test_head_scripts_need_reload_marker() {
        let mut d = doc(
            "<head><script>skip</script><script data-reload>head</script></head><body><script>body</script></body>",
        );
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());
        runner.step(&mut d, &mut host).unwrap();
        assert_eq!(host.ran, vec!["head", "body"]);
    }

    #[test]
    fn test_remote_suspends() {
        let mut d = doc(r#"<body><script src="lib.js"></script><script>after</script></body>"#);
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        let state = runner.step(&mut d, &mut host).unwrap();
        let RunnerState::Pending(ticket) = state else {
            panic!("expected pending, got {state:?}");
        };
        assert_eq!(host.ran, vec!["load lib.js"]);
        assert_eq!(
            host.loads[0].url.as_ref().map(Url::as_str),
            Some("https://example.com/docs/lib.js")
        );

        // Stepping again does not advance
        assert_eq!(runner.step(&mut d, &mut host).unwrap(), state);
        assert_eq!(host.ran.len(), 1);

        let notifier = host.loads.pop().unwrap().notifier;
        assert_eq!(notifier.ticket(), ticket);
        assert!(notifier.notify(LoadOutcome::Loaded));
        assert_eq!(runner.poll().unwrap(), RunnerState::Loaded(ticket));

        assert_eq!(runner.step(&mut d, &mut host).unwrap(), RunnerState::Finished);
        assert_eq!(host.ran, vec!["load lib.js", "after"]);
        assert_eq!(runner.report().loaded.len(), 1);
    }

    #[test]
    fn test_failed_load_still_advances() {
        let mut d = doc(r#"<body><script src="/x.js"></script><script>next</script></body>"#);
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        let RunnerState::Pending(ticket) = runner.step(&mut d, &mut host).unwrap() else {
            panic!("expected pending");
        };
        runner
            .complete(LoadEvent {
                ticket,
                outcome: LoadOutcome::Failed("404".into()),
            })
            .unwrap();
        runner.step(&mut d, &mut host).unwrap();
        assert_eq!(runner.report().failed.len(), 1);
        assert_eq!(host.ran.last().map(String::as_str), Some("next"));
    }

    #[test]
    fn test_dropped_notifier_counts_as_failure() {
        let mut d = doc(r#"<body><script src="/x.js"></script></body>"#);
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        runner.step(&mut d, &mut host).unwrap();
        host.loads.clear();
        assert!(matches!(runner.poll().unwrap(), RunnerState::Loaded(_)));
        assert_eq!(runner.report().failed.len(), 1);
    }

    #[test]
    fn test_unexpected_ticket() {
        let mut d = doc(r#"<body><script src="/x.js"></script></body>"#);
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        let stray = LoadEvent {
            ticket: LoadTicket(99),
            outcome: LoadOutcome::Loaded,
        };
        assert_eq!(
            runner.complete(stray.clone()),
            Err(RunnerError::UnexpectedTicket { pending: None, got: LoadTicket(99) })
        );

        runner.step(&mut d, &mut host).unwrap();
        assert_eq!(
            runner.complete(stray),
            Err(RunnerError::UnexpectedTicket {
                pending: Some(LoadTicket(0)),
                got: LoadTicket(99)
            })
        );
    }

    #[test]
    fn test_blank_src_is_inline() {
        let mut d = doc(r#"<body><script src="  ">inline</script></body>"#);
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());
        assert_eq!(runner.step(&mut d, &mut host).unwrap(), RunnerState::Finished);
        assert_eq!(host.ran, vec!["inline"]);
    }

    #[test]
    fn test_data_blocks_not_run() {
        let mut d = doc(
            r#"<body><script type="application/json" src="/d.json">{}</script><script>x</script></body>"#,
        );
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());
        assert_eq!(runner.step(&mut d, &mut host).unwrap(), RunnerState::Finished);
        assert_eq!(host.ran, vec!["x"]);
        assert_eq!(runner.report().inert.len(), 1);
    }

    #[test]
    fn test_script_replaced_by_started_copy() {
        let mut d = doc(r#"<body><script id="s" defer>go()</script></body>"#);
        let old = d.get_element_by_id("s").unwrap();
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());
        runner.step(&mut d, &mut host).unwrap();

        let new = d.get_element_by_id("s").unwrap();
        assert_ne!(new, old);
        assert!(!d.tree().contains(old));
        let elem = d.tree().element(new).unwrap();
        assert_eq!(elem.script, ScriptMark::Started);
        assert!(elem.has_attr("defer"));
        assert_eq!(d.tree().text_content(new), "go()");
    }

    #[test]
    fn test_throwing_script_does_not_stop_batch() {
        let mut d = doc("<body><script>throw 1</script><script>ok</script></body>");
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());
        runner.step(&mut d, &mut host).unwrap();
        assert_eq!(host.ran, vec!["ok"]);
        assert_eq!(runner.report().failed.len(), 1);
    }

    #[test]
    fn test_detached_script_skipped() {
        let mut d = doc("<body><div id=box><script>gone</script></div><script>here</script></body>");
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());
        let div = d.get_element_by_id("box").unwrap();
        d.tree_mut().detach(div).unwrap();

        let mut host = Recorder::default();
        runner.step(&mut d, &mut host).unwrap();
        assert_eq!(host.ran, vec!["here"]);
        assert_eq!(runner.report().skipped.len(), 1);
    }

    #[test]
    fn test_run_async() {
        let mut d = doc(r#"<body><script src="/a.js"></script><script>b</script></body>"#);
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        struct Immediate(Vec<String>);
        impl ScriptHost for Immediate {
            fn execute(&mut self, script: &InlineScript<'_>) -> Result<(), ScriptError> {
                self.0.push(script.source.to_string());
                Ok(())
            }
            fn begin_load(&mut self, request: LoadRequest) {
                self.0.push(request.location().to_string());
                request.notifier.notify(LoadOutcome::Loaded);
            }
        }

        let mut host = Immediate(Vec::new());
        let report = smol::block_on(runner.run(&mut d, &mut host)).unwrap().clone();
        assert_eq!(host.0, vec!["https://example.com/a.js", "b"]);
        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.executed.len(), 1);
    }

    #[test]
    fn test_run_async_abandoned_load_fails_and_advances() {
        let mut d = doc(r#"<body><script src="/gone.js"></script><script>after</script></body>"#);
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        struct Abandoning(Vec<String>);
        impl ScriptHost for Abandoning {
            fn execute(&mut self, script: &InlineScript<'_>) -> Result<(), ScriptError> {
                self.0.push(script.source.to_string());
                Ok(())
            }
            fn begin_load(&mut self, request: LoadRequest) {
                drop(request);
            }
        }

        let mut host = Abandoning(Vec::new());
        let report = smol::block_on(runner.run(&mut d, &mut host)).unwrap().clone();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(host.0, vec!["after"]);
        assert_eq!(runner.state(), RunnerState::Finished);
    }

    #[test]
    fn test_tickets_numbered_in_request_order() {
        let mut d = doc(r#"<body><script src="/a.js"></script><script src="/b.js"></script></body>"#);
        let mut host = Recorder::default();
        let mut runner = ScriptRunner::new(&d, &SoftNavConfig::default());

        assert_eq!(runner.step(&mut d, &mut host).unwrap(), RunnerState::Pending(LoadTicket::new(0)));
        host.loads.pop().unwrap().notifier.notify(LoadOutcome::Loaded);
        runner.poll().unwrap();
        assert_eq!(runner.step(&mut d, &mut host).unwrap(), RunnerState::Pending(LoadTicket::new(1)));
        assert_eq!(LoadTicket::new(1).to_string(), "load#1");
    }

    #[test]
    fn test_resolve_without_base() {
        assert_eq!(resolve(None, "/a.js"), None);
        assert_eq!(
            resolve(None, "https://cdn.example/a.js").map(String::from),
            Some("https://cdn.example/a.js".to_string())
        );
    }
}
