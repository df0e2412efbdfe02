//! Static asset routing.
//!
//! `/` maps to the configured index file; every other path is looked up
//! under the asset root. Unknown paths and paths escaping the root get 404.

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Create the asset router
pub fn create_router(config: &AppConfig) -> Router {
    let root = Path::new(&config.asset_root);
    let index = ServeFile::new(root.join(&config.index_file));

    let assets = ServeDir::new(root).append_index_html_on_directories(true);

    Router::new()
        .route_service("/", index)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn asset_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<form id=\"myForm\"></form>").unwrap();
        std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();
        std::fs::create_dir(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js").join("index.js"), "void 0;").unwrap();
        dir
    }

    fn router_for(dir: &tempfile::TempDir) -> Router {
        let config = AppConfig {
            asset_root: dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };
        create_router(&config)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = asset_dir();
        let response = get(router_for(&dir), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<form id=\"myForm\"></form>");
    }

    #[tokio::test]
    async fn test_content_type_follows_extension() {
        let dir = asset_dir();

        let css = get(router_for(&dir), "/style.css").await;
        assert_eq!(css.status(), StatusCode::OK);
        assert!(css.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/css"));

        let js = get(router_for(&dir), "/js/index.js").await;
        assert_eq!(js.status(), StatusCode::OK);
        let js_type = js.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(js_type.contains("javascript"));
    }

    async fn body_text(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_shipped_page_wires_every_widget_variant() {
        let config = AppConfig {
            asset_root: concat!(env!("CARGO_MANIFEST_DIR"), "/../../public").to_string(),
            ..Default::default()
        };

        let page = body_text(get(create_router(&config), "/").await).await;
        assert!(page.contains("id=\"load-captcha\""));
        assert!(page.contains("id=\"submit-invisible\""));
        assert!(page.contains("id=\"submit-v3\""));

        let script = body_text(get(create_router(&config), "/index.js").await).await;
        for hook in [
            "grecaptcha.render('load-captcha'",
            "grecaptcha.render('submit-invisible'",
            "callback: onInvisibleVerified",
            "grecaptcha.execute(V3_SITE_KEY",
            "onSubmitInvisible(token)",
            "onSubmitV3(token)",
            "'captcha_type'",
        ] {
            assert!(script.contains(hook), "index.js is missing {hook}");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let dir = asset_dir();
        let response = get(router_for(&dir), "/api/upload").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_is_not_served() {
        let dir = asset_dir();
        let outside = dir.path().parent().unwrap().join("outside-secret.txt");
        let _ = std::fs::write(&outside, "secret");

        let response = get(router_for(&dir), "/../outside-secret.txt").await;
        assert_ne!(response.status(), StatusCode::OK);

        let _ = std::fs::remove_file(outside);
    }
}
