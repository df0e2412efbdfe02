//! # Upload Common
//!
//! Shared types, constants, and errors used by the asset server and the
//! upload flow controller.
//!
//! ## Modules
//! - `types` - Verification mode, token, and API envelope
//! - `error` - Common error type
//! - `constants` - Ports, endpoint paths, and multipart field names

pub mod constants;
pub mod error;
pub mod types;

pub use error::UploadError;
pub use types::*;
