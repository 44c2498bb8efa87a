//! Site context: base URI and debug flag
//!
//! Generators do not inherit from a base type. They hold anything that
//! can qualify relative URLs and report whether debug output is wanted.

use crate::error::Result;
use url::Url;

/// Separator whose presence marks a URL as already absolute
pub const SCHEME_SEPARATOR: &str = "://";

/// Capability required by the sitemap and index generators
pub trait SiteContext {
    /// Base URI prepended to relative URLs
    fn base(&self) -> &str;

    /// Whether generated documents should be pretty-printed
    fn is_debug(&self) -> bool;

    /// Qualify `url` against the base unless it already carries a scheme
    ///
    /// This is plain concatenation; no path normalization takes place.
    fn resolve(&self, url: &str) -> String {
        if url.contains(SCHEME_SEPARATOR) {
            url.to_string()
        } else {
            format!("{}{}", self.base(), url)
        }
    }
}

/// Default site context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Base URI, e.g. `http://example.com/`
    pub base: String,
    /// Pretty-print generated documents
    pub debug: bool,
}

impl Site {
    /// Create a site context without validating the base
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            debug: false,
        }
    }

    /// Create a site context from a base that must parse as a URL
    pub fn parse(base: &str) -> Result<Self> {
        let url = Url::parse(base)?;
        Ok(Self::new(url.as_str()))
    }

    /// Enable or disable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl SiteContext for Site {
    fn base(&self) -> &str {
        &self.base
    }

    fn is_debug(&self) -> bool {
        self.debug
    }
}
