//! Output renderers
//!
//! Every output format is a [`Renderer`] over the same registry. Only XML
//! is current; the plain-text and index formats are kept for older callers
//! and log a deprecation warning each time they are used.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::NamespaceTable;
use crate::registry::Registry;
use crate::site::{Site, SiteContext};
use crate::siteindex::Siteindex;
use crate::writer::write_urlset;
use std::fmt;
use std::str::FromStr;

/// Trait for anything that turns a registry into document text
pub trait Renderer {
    /// Render the registry
    fn render(&self, registry: &Registry) -> Result<String>;

    /// Whether the document size bound applies to this renderer's output
    fn is_size_bounded(&self) -> bool {
        true
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Sitemap protocol XML
    #[default]
    Xml,
    /// One URL per line (deprecated)
    Txt,
    /// Sitemap index with one sitemap per page (deprecated)
    IndexXml,
}

impl Format {
    /// Format name as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Txt => "txt",
            Format::IndexXml => "indexXml",
        }
    }

    /// Whether this format is deprecated
    pub fn is_deprecated(&self) -> bool {
        !matches!(self, Format::Xml)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xml" => Ok(Format::Xml),
            "txt" => Ok(Format::Txt),
            "indexXml" => Ok(Format::IndexXml),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Renders the `<urlset>` document
#[derive(Debug, Clone)]
pub struct XmlRenderer {
    /// Namespace definitions
    pub namespaces: NamespaceTable,
    /// Bounds; the per-page image bound is checked while rendering
    pub limits: Limits,
    /// Pretty-print output
    pub pretty: bool,
}

impl Renderer for XmlRenderer {
    fn render(&self, registry: &Registry) -> Result<String> {
        write_urlset(registry, &self.namespaces, &self.limits, self.pretty)
    }
}

/// Renders one page URL per line
///
/// Only the entry count bound applies; output size is not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, registry: &Registry) -> Result<String> {
        let mut result = String::new();
        for page in registry.pages() {
            result.push_str(&page.url);
            result.push('\n');
        }
        Ok(result)
    }

    fn is_size_bounded(&self) -> bool {
        false
    }
}

/// Wraps every page in a sitemap index and delegates to [`Siteindex`]
#[derive(Debug, Clone)]
pub struct IndexRenderer {
    /// Site context handed to the index, debug flag included
    pub site: Site,
    /// Bounds for the index document
    pub limits: Limits,
}

impl Renderer for IndexRenderer {
    fn render(&self, registry: &Registry) -> Result<String> {
        let mut index = Siteindex::new(self.site.clone()).with_limits(self.limits.clone());
        for page in registry.pages() {
            index.add_sitemap(&page.url, None)?;
        }
        index.generate()
    }

    fn is_size_bounded(&self) -> bool {
        // Siteindex::generate enforces its own bounds
        false
    }
}

/// Create a renderer for `format`
///
/// Deprecated formats log a warning; the returned renderer is unaffected.
pub fn create_renderer<C: SiteContext + ?Sized>(
    format: Format,
    ctx: &C,
    limits: &Limits,
    namespaces: &NamespaceTable,
) -> Box<dyn Renderer> {
    if format.is_deprecated() {
        tracing::warn!(
            format = %format,
            "Format `{}` has been deprecated and will be removed soon.",
            format
        );
    }

    match format {
        Format::Xml => Box::new(XmlRenderer {
            namespaces: namespaces.clone(),
            limits: limits.clone(),
            pretty: ctx.is_debug(),
        }),
        Format::Txt => Box::new(TextRenderer),
        Format::IndexXml => Box::new(IndexRenderer {
            site: Site::new(ctx.base()).with_debug(ctx.is_debug()),
            limits: limits.clone(),
        }),
    }
}
