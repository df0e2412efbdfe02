//! Shared constants for the upload front-end components.

/// Default asset server port (overridden by `PORT`)
pub const DEFAULT_PORT: u16 = 4000;

/// Default asset server bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default directory served by the asset server
pub const DEFAULT_ASSET_ROOT: &str = "public";

/// Default base URL of the remote upload API
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Default outbound request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Page slot the verification widget renders into
pub const DEFAULT_WIDGET_SLOT: &str = "load-captcha";

/// Remote API paths, relative to the API base URL
pub mod endpoints {
    /// Health check: GET
    pub const HEALTH: &str = "/api";

    /// File upload: POST multipart
    pub const UPLOAD: &str = "/api/upload";

    /// Uploaded file cleanup: DELETE
    pub const CLEANUP: &str = "/api/cleanup";
}

/// Multipart field names understood by the remote API
pub mod fields {
    /// Verification token issued by the widget
    pub const TOKEN: &str = "g-recaptcha-response";

    /// Verification mode label
    pub const CAPTCHA_TYPE: &str = "captcha_type";

    /// Uploaded file part
    pub const FILE: &str = "file";
}
