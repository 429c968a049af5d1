//! Landing page.
//!
//! The template is compiled into the binary and rendered once at startup;
//! `GET /` serves the rendered bytes.

use axum::{body::Bytes, extract::State, response::Html};

use crate::config::ProxyConfig;
use crate::http::server::AppState;

const TEMPLATE: &str = include_str!("../../templates/index.html");

/// The rendered landing page.
#[derive(Debug, Clone)]
pub struct LandingPage {
    html: Bytes,
}

impl LandingPage {
    pub fn render(config: &ProxyConfig) -> Self {
        let html = TEMPLATE
            .replace("{{proxy_prefix}}", &escape(&config.proxy.route_prefix))
            .replace("{{static_route}}", &escape(&config.assets.static_route))
            .replace("{{version}}", env!("CARGO_PKG_VERSION"));

        Self {
            html: Bytes::from(html),
        }
    }

    pub fn html(&self) -> &[u8] {
        &self.html
    }
}

pub async fn index_handler(State(state): State<AppState>) -> Html<Bytes> {
    Html(state.landing.html.clone())
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let mut config = ProxyConfig::default();
        config.proxy.route_prefix = "/fetch".into();

        let page = LandingPage::render(&config);
        let html = std::str::from_utf8(page.html()).unwrap();

        assert!(html.contains("data-proxy-prefix=\"/fetch\""));
        assert!(html.contains("/static/style.css"));
        assert!(html.contains(env!("CARGO_PKG_VERSION")));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("/a\"<b>"), "/a&quot;&lt;b&gt;");
    }
}
