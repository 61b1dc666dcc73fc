//! Request classification.

use offline_core::{Destination, Request};

/// Resource class driving strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    /// Navigations and HTML pages.
    Document,
    /// Stylesheets, scripts, images and fonts.
    StaticAsset,
    /// Everything else served from this origin (API calls, ...).
    Other,
}

// Suffixes treated as static assets when no destination is declared.
const STATIC_SUFFIXES: &[&str] = &[
    ".css", ".js", ".mjs", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico", ".woff",
    ".woff2", ".ttf", ".json",
];

/// Classify a request by destination kind and path suffix.
///
/// Pure: the same request always yields the same class.
pub fn classify(request: &Request) -> ResourceClass {
    let path = request.path();
    if request.is_navigation() || path == "/" || path.ends_with(".html") {
        return ResourceClass::Document;
    }
    match request.destination {
        Destination::Style | Destination::Script | Destination::Image | Destination::Font => {
            ResourceClass::StaticAsset
        }
        _ if has_static_suffix(path) => ResourceClass::StaticAsset,
        _ => ResourceClass::Other,
    }
}

fn has_static_suffix(path: &str) -> bool {
    STATIC_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use offline_core::RequestMode;
    use url::Url;

    use super::*;

    fn request(url: &str) -> Request {
        Request::get(Url::parse(url).unwrap())
    }

    #[test]
    fn test_documents() {
        assert_eq!(
            classify(&request("https://shop.example/")),
            ResourceClass::Document
        );
        assert_eq!(
            classify(&request("https://shop.example/blog.html")),
            ResourceClass::Document
        );
        assert_eq!(
            classify(&request("https://shop.example/products").with_mode(RequestMode::Navigate)),
            ResourceClass::Document
        );
        assert_eq!(
            classify(&request("https://shop.example/about").with_destination(Destination::Document)),
            ResourceClass::Document
        );
    }

    #[test]
    fn test_static_assets_by_destination() {
        for destination in [
            Destination::Style,
            Destination::Script,
            Destination::Image,
            Destination::Font,
        ] {
            let req = request("https://shop.example/asset").with_destination(destination);
            assert_eq!(classify(&req), ResourceClass::StaticAsset);
        }
    }

    #[test]
    fn test_static_assets_by_suffix() {
        for path in [
            "/css/styles.css",
            "/js/app.js",
            "/images/hero.png",
            "/fonts/body.woff2",
            "/manifest.json",
        ] {
            let req = request(&format!("https://shop.example{path}"));
            assert_eq!(classify(&req), ResourceClass::StaticAsset, "{path}");
        }
    }

    #[test]
    fn test_other() {
        assert_eq!(
            classify(&request("https://shop.example/api/products")),
            ResourceClass::Other
        );
        assert_eq!(
            classify(&request("https://shop.example/health")),
            ResourceClass::Other
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let req = request("https://shop.example/workshops.html");
        assert_eq!(classify(&req), classify(&req));
    }
}
