//! Sitemap index generation
//!
//! An index lists other sitemaps. It follows the same rules as a sitemap:
//! unique URLs, relative URLs qualified against the base, and count and
//! size bounds checked at generation.

use crate::dates::format_iso8601;
use crate::error::{EntryKind, Error, Result};
use crate::limits::Limits;
use crate::namespaces::NamespaceTable;
use crate::site::{Site, SiteContext};
use crate::writer::XmlWriter;
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

/// A sitemap referenced from an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapRef {
    /// Absolute sitemap URL
    pub url: String,
    /// Last modification time of the referenced sitemap
    pub modified: Option<DateTime<FixedOffset>>,
}

/// Generator for `<sitemapindex>` documents
#[derive(Debug, Clone)]
pub struct Siteindex<C: SiteContext = Site> {
    site: C,
    sitemaps: IndexMap<String, SitemapRef>,
    limits: Limits,
    namespaces: NamespaceTable,
}

impl<C: SiteContext> Siteindex<C> {
    /// Create an empty index for `site`
    pub fn new(site: C) -> Self {
        Self {
            site,
            sitemaps: IndexMap::new(),
            limits: Limits::default(),
            namespaces: NamespaceTable::default(),
        }
    }

    /// Replace the generation limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Register a sitemap
    pub fn add_sitemap(&mut self, url: &str, modified: Option<DateTime<FixedOffset>>) -> Result<()> {
        let url = self.site.resolve(url);

        if self.sitemaps.contains_key(&url) {
            return Err(Error::DuplicateEntry {
                kind: EntryKind::Sitemap,
                url,
            });
        }

        tracing::debug!(url = %url, "Adding sitemap to index");
        self.sitemaps.insert(url.clone(), SitemapRef { url, modified });
        Ok(())
    }

    /// Iterate over registered sitemaps in insertion order
    pub fn sitemaps(&self) -> impl Iterator<Item = &SitemapRef> {
        self.sitemaps.values()
    }

    /// Number of registered sitemaps
    pub fn len(&self) -> usize {
        self.sitemaps.len()
    }

    /// Whether no sitemaps are registered
    pub fn is_empty(&self) -> bool {
        self.sitemaps.is_empty()
    }

    /// The site context
    pub fn site(&self) -> &C {
        &self.site
    }

    /// Render the index document
    pub fn generate(&self) -> Result<String> {
        self.limits.check_entries(self.sitemaps.len())?;

        let ns = &self.namespaces;
        let declarations = ns.declarations(&ns.index, &[]);

        let mut writer = XmlWriter::new(self.site.is_debug());
        writer.declaration()?;
        writer.start_root("sitemapindex", &declarations)?;

        for sitemap in self.sitemaps.values() {
            writer.start("sitemap")?;
            writer.text_element("loc", &sitemap.url)?;
            let lastmod = sitemap.modified.as_ref().map(format_iso8601);
            writer.optional_element("lastmod", lastmod.as_deref())?;
            writer.end("sitemap")?;
        }

        writer.end("sitemapindex")?;
        let result = writer.finish()?;

        self.limits.check_size(result.len())?;
        Ok(result)
    }
}
