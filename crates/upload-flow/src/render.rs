//! Where responses and failures end up.

use std::sync::{Arc, Mutex, PoisonError};

use crate::FlowError;

/// The designated page element responses are rendered into
pub trait OutputSink: Send + Sync {
    /// Replace the element's content
    fn render(&self, content: &str);
}

/// Diagnostic channel for failed calls
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, operation: &'static str, error: &FlowError);
}

/// Logs failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn record(&self, operation: &'static str, error: &FlowError) {
        tracing::error!(operation, timeout = error.is_timeout(), error = %error, "Upload API call failed");
    }
}

/// In-memory output element; clones share the same content
#[derive(Debug, Clone, Default)]
pub struct OutputElement {
    content: Arc<Mutex<Option<String>>>,
}

impl OutputElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content, `None` until something has been rendered
    pub fn content(&self) -> Option<String> {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for OutputElement {
    fn render(&self, content: &str) {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = Some(content.to_string());
    }
}

/// Pretty-printed form of a whole response body
pub fn pretty_json(body: &serde_json::Value) -> String {
    format!("{body:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_matches_serde_pretty() {
        let body = json!({"code": 200, "data": {"file_url": "http://x/y"}, "error": null});
        assert_eq!(pretty_json(&body), serde_json::to_string_pretty(&body).unwrap());
    }

    #[test]
    fn test_output_element_last_render_wins() {
        let element = OutputElement::new();
        let view = element.clone();
        assert_eq!(view.content(), None);

        element.render("first");
        element.render("second");
        assert_eq!(view.content().as_deref(), Some("second"));
    }
}
