//! Verification widget capability.

use std::sync::Arc;

use upload_common::WidgetConfig;

use crate::FlowError;

/// Invoked by the widget with each freshly issued token
pub type VerifiedCallback = Arc<dyn Fn(String) + Send + Sync>;

/// A third-party bot-verification widget.
///
/// The controller only asks it to render; the widget calls back with a
/// token once the user satisfies the checkbox. Invisible and score-based
/// widgets drive the controller's trigger methods themselves.
pub trait VerificationWidget: Send + Sync {
    fn render(&self, config: &WidgetConfig, on_verified: VerifiedCallback) -> Result<(), FlowError>;
}
