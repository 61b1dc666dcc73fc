//! Intercepted request model with cache identity.

use http::{HeaderMap, Method};
use url::{Origin, Url};

/// Declared destination of a request (what kind of resource it loads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    /// Top-level or frame document.
    Document,
    /// Stylesheet.
    Style,
    /// Script.
    Script,
    /// Image.
    Image,
    /// Font.
    Font,
    /// No declared destination (API calls, beacons, ...).
    #[default]
    Unknown,
}

/// How a request was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// Top-level navigation.
    Navigate,
    /// Same-origin subresource load.
    #[default]
    SameOrigin,
    /// Cross-origin load with CORS.
    Cors,
    /// Cross-origin load without CORS.
    NoCors,
}

/// An outbound request as seen by the fetch-interception layer.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Declared destination.
    pub destination: Destination,
    /// Initiation mode.
    pub mode: RequestMode,
    /// Request headers.
    pub headers: HeaderMap,
}

impl Request {
    /// Create a request with an explicit method.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            destination: Destination::default(),
            mode: RequestMode::default(),
            headers: HeaderMap::new(),
        }
    }

    /// Create a GET request for the given URL.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Set the declared destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Set the initiation mode.
    pub fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether this is a retrieval request (GET or HEAD).
    ///
    /// Mutating methods are never intercepted or cached.
    pub fn is_retrieval(&self) -> bool {
        matches!(self.method, Method::GET | Method::HEAD)
    }

    /// Whether this is a top-level navigation.
    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate || self.destination == Destination::Document
    }

    /// Whether the request targets the given origin.
    pub fn same_origin(&self, origin: &Origin) -> bool {
        self.url.origin() == *origin
    }

    /// Path component of the request URL.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The method+URL pair identifying this request in a cache namespace.
    pub fn identity(&self) -> RequestIdentity {
        RequestIdentity {
            method: self.method.clone(),
            url: identity_url(&self.url),
        }
    }
}

/// The method+URL pair used as a cache lookup key.
///
/// Fragments are stripped. Query strings are preserved: two queries
/// address two logical resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestIdentity {
    /// HTTP method.
    pub method: Method,
    /// Normalized absolute URL.
    pub url: String,
}

impl RequestIdentity {
    /// Identity of a plain GET for the given URL.
    pub fn for_url(url: &Url) -> Self {
        Self {
            method: Method::GET,
            url: identity_url(url),
        }
    }
}

impl std::fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

fn identity_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}
