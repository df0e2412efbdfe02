//! Upload flow controller.
//!
//! Wires the three submission triggers and the cleanup trigger to the
//! upload API. Trigger methods never return an error: failures go to the
//! diagnostic sink and the output element keeps its previous content.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use upload_common::constants::fields;
use upload_common::{CaptchaType, VerificationToken, WidgetConfig};

use crate::render::pretty_json;
use crate::{
    DiagnosticSink, FlowError, FormPayload, FormSource, OutputSink, TracingDiagnostics,
    UploadClient, VerificationSession, VerificationWidget, VerifiedCallback,
};

/// Session-scoped controller for one page.
///
/// Clones share the session, sinks, and HTTP client. Overlapping calls are
/// not tracked; each renders when it completes.
#[derive(Clone)]
pub struct UploadController {
    client: UploadClient,
    session: Arc<VerificationSession>,
    form: Arc<dyn FormSource>,
    output: Arc<dyn OutputSink>,
    diagnostics: Arc<dyn DiagnosticSink>,
    widget_config: Option<WidgetConfig>,
}

impl UploadController {
    pub fn new(
        client: UploadClient,
        form: Arc<dyn FormSource>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            client,
            session: Arc::new(VerificationSession::new()),
            form,
            output,
            diagnostics: Arc::new(TracingDiagnostics),
            widget_config: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_widget_config(mut self, config: WidgetConfig) -> Self {
        self.widget_config = Some(config);
        self
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    /// Render the checkbox widget and route its tokens into the session
    pub fn init(&self, widget: &dyn VerificationWidget) -> Result<(), FlowError> {
        let config = self
            .widget_config
            .as_ref()
            .ok_or_else(|| FlowError::Widget("no widget config (site key) set".to_string()))?;

        let controller = self.clone();
        let on_verified: VerifiedCallback = Arc::new(move |token: String| {
            controller.on_verified(token);
        });

        widget.render(config, on_verified)?;
        info!(slot = %config.slot, "Verification widget rendered");
        Ok(())
    }

    /// Widget callback for the checkbox variant
    pub fn on_verified(&self, token: impl Into<VerificationToken>) {
        if self.session.store(token.into()).is_some() {
            tracing::debug!("Replaced previously stored verification token");
        }
    }

    /// Standard form submission (checkbox mode).
    ///
    /// Appends the stored token and consumes it. Without a token the field
    /// is sent empty and the API is left to reject it.
    pub async fn submit_form(&self, mut payload: FormPayload) -> Option<Value> {
        let token = match self.session.take() {
            Some(token) => token.into_inner(),
            None => {
                warn!("Submitting without a verification token");
                String::new()
            }
        };
        payload.push_text(fields::TOKEN, token);
        self.upload(payload, CaptchaType::Checkbox).await
    }

    /// Invisible widget trigger; reads the form's current values
    pub async fn submit_invisible(&self) -> Option<Value> {
        self.upload(self.form.snapshot(), CaptchaType::Invisible).await
    }

    /// Score-based widget trigger; reads the form's current values
    pub async fn submit_v3(&self) -> Option<Value> {
        self.upload(self.form.snapshot(), CaptchaType::V3).await
    }

    /// Dispatch on mode: checkbox goes through the stored token, the
    /// programmatic variants read the form
    pub async fn submit(&self, mode: CaptchaType) -> Option<Value> {
        match mode {
            CaptchaType::Checkbox => self.submit_form(self.form.snapshot()).await,
            CaptchaType::Invisible => self.submit_invisible().await,
            CaptchaType::V3 => self.submit_v3().await,
        }
    }

    /// Shared upload call: tag the payload with its mode, POST it, render
    pub async fn upload(&self, mut payload: FormPayload, mode: CaptchaType) -> Option<Value> {
        payload.push_text(fields::CAPTCHA_TYPE, mode.as_str());
        info!(captcha_type = %mode, "Uploading form");

        let result = self.client.upload(payload).await;
        self.finish("upload", result)
    }

    /// Ask the API to remove uploaded files; rendered like an upload
    pub async fn cleanup(&self) -> Option<Value> {
        info!("Requesting cleanup");
        let result = self.client.cleanup().await;
        self.finish("cleanup", result)
    }

    fn finish(&self, operation: &'static str, result: Result<Value, FlowError>) -> Option<Value> {
        match result {
            Ok(body) => {
                self.output.render(&pretty_json(&body));
                Some(body)
            }
            Err(e) => {
                self.diagnostics.record(operation, &e);
                None
            }
        }
    }
}
