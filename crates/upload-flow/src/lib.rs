//! # Upload Flow
//!
//! Bridges a form submission to the remote upload API, carrying the
//! bot-verification evidence produced by the widget.
//!
//! ## Flow
//! ```text
//! Widget ──token──→ VerificationSession
//!                          ↓ (checkbox only)
//! Form ──FormPayload──→ UploadController ──POST multipart──→ /api/upload
//!                          ↓
//!                     OutputSink (pretty JSON)
//! ```
//!
//! Every call is a single best-effort attempt. Failures are reported to a
//! [`DiagnosticSink`] and leave the output untouched.

pub mod client;
pub mod controller;
pub mod error;
pub mod payload;
pub mod render;
pub mod session;
pub mod widget;

pub use client::{ClientConfig, UploadClient};
pub use controller::UploadController;
pub use error::FlowError;
pub use payload::{FormField, FormPayload, FormSource, StaticForm};
pub use render::{DiagnosticSink, OutputElement, OutputSink, TracingDiagnostics};
pub use session::VerificationSession;
pub use widget::{VerificationWidget, VerifiedCallback};
