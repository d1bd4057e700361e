use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;

/// Flags forwarded to the host compiler. The retarget workflow always
/// compiles with the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub is_regenerating_on_load: bool,
    pub skip_garbage_collection: bool,
    pub batch_compile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileMessage {
    pub severity: MessageSeverity,
    pub text: String,
}

/// Structured result log for one compiler pass, tagged with the asset path
/// and grouped into named events. The compiler writes into it; callers
/// retain it but leave interpretation to the host's own reporting.
#[derive(Debug, Default)]
pub struct CompilerResultsLog {
    source_path: Option<String>,
    messages: Vec<CompileMessage>,
    open_events: Vec<String>,
    completed_events: Vec<String>,
}

impl CompilerResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source_path(&mut self, path: impl Into<String>) {
        self.source_path = Some(path.into());
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn begin_event(&mut self, name: &str) {
        self.open_events.push(name.to_string());
    }

    pub fn end_event(&mut self) {
        if let Some(name) = self.open_events.pop() {
            self.completed_events.push(name);
        }
    }

    /// Event names closed so far, in completion order.
    pub fn completed_events(&self) -> &[String] {
        &self.completed_events
    }

    pub fn note(&mut self, text: impl Into<String>) {
        self.push(MessageSeverity::Info, text.into());
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.push(MessageSeverity::Warning, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageSeverity::Error, text.into());
    }

    fn push(&mut self, severity: MessageSeverity, text: String) {
        self.messages.push(CompileMessage { severity, text });
    }

    pub fn messages(&self) -> &[CompileMessage] {
        &self.messages
    }

    pub fn num_errors(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == MessageSeverity::Error)
            .count()
    }
}

/// The host's blueprint compiler. Diagnostics land in the results log and
/// surface through the host's reporting channels, never through this
/// interface's return path.
pub trait BlueprintCompiler: Send + Sync {
    fn compile(
        &self,
        blueprint: &mut Blueprint,
        options: CompileOptions,
        results: &mut CompilerResultsLog,
    );
}
