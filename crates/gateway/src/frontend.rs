//! Embedded stylesheet.
//!
//! The page is rendered server-side; the only static asset is the CSS,
//! compiled into the binary for single-binary deployment.

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

const STYLE_CSS: &str = r#":root {
    color-scheme: dark;
    --bg: #0b1120;
    --panel: #020617;
    --agent: #0f172a;
    --border: #1e293b;
    --text: #e2e8f0;
    --muted: #94a3b8;
    --accent: #93c5fd;
}
* { box-sizing: border-box; }
body {
    margin: 0;
    display: flex;
    min-height: 100vh;
    background: var(--bg);
    color: var(--text);
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    line-height: 1.55;
}
.sidebar {
    width: 18rem;
    flex-shrink: 0;
    padding: 1.5rem;
    background: var(--panel);
    border-right: 1px solid var(--border);
}
.sidebar hr { border: 0; border-top: 1px solid var(--border); margin: 1rem 0; }
.sidebar input { width: 100%; margin-top: 0.4rem; }
main { flex: 1; max-width: 52rem; margin: 0 auto; padding: 2rem 1.5rem; }
.caption { color: var(--muted); margin-top: -0.5rem; }
.tabs { display: flex; gap: 1.5rem; border-bottom: 1px solid var(--border); margin: 1.5rem 0; }
.tab { color: var(--muted); text-decoration: none; padding: 0.5rem 0; }
.tab.active { color: var(--text); border-bottom: 2px solid #f87171; }
input[type="text"], input[type="password"] {
    padding: 0.6rem 0.75rem;
    background: var(--agent);
    border: 1px solid var(--border);
    border-radius: 8px;
    color: var(--text);
}
button {
    padding: 0.6rem 1.1rem;
    background: #1d4ed8;
    border: 0;
    border-radius: 8px;
    color: white;
    cursor: pointer;
}
.chat {
    background-color: #020617;
    padding: 1rem;
    border-radius: 12px;
    margin-bottom: 0.75rem;
    border: 1px solid #1e293b;
}
.agent {
    background-color: #0f172a;
}
.citation {
    font-size: 0.9rem;
    color: #93c5fd;
}
.compare-box {
    background-color: #020617;
    padding: 1rem;
    border-radius: 12px;
    border: 1px solid #1e293b;
    margin-top: 1rem;
}
.ask { display: flex; gap: 0.5rem; margin-top: 1.5rem; }
.ask input { flex: 1; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin-bottom: 1rem; }
.columns input { width: 100%; margin-top: 0.4rem; }
.alert { padding: 0.75rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
.alert.warning { background: #422006; border: 1px solid #a16207; }
.alert.error { background: #450a0a; border: 1px solid #b91c1c; }
.alert.notice { background: #172554; border: 1px solid #1e40af; }
pre, code { background: var(--panel); border-radius: 6px; }
pre { padding: 0.75rem; overflow-x: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid var(--border); padding: 0.35rem 0.6rem; }
"#;

/// Router serving the embedded stylesheet.
pub fn frontend_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/static/style.css", get(css_handler))
}

async fn css_handler() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLE_CSS,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn serves_css() {
        let app: Router = frontend_router();

        let req = Request::builder()
            .uri("/static/style.css")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("text/css"));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let css = String::from_utf8_lossy(&body);
        for class in [".chat", ".agent", ".citation", ".compare-box"] {
            assert!(css.contains(class), "{class}");
        }
    }
}
