//! Sitemap generator
//!
//! [`Sitemap`] owns a site context and a [`Registry`]. Pages and images are
//! added one at a time; bounds are only checked when generating, in this
//! order:
//!
//! 1. entry count, before any rendering;
//! 2. images per page, while each page is written;
//! 3. document size, once the whole document exists (not for `txt`).
//!
//! A failing generation returns no output and leaves the registry as it was.

use crate::error::Result;
use crate::limits::Limits;
use crate::namespaces::NamespaceTable;
use crate::registry::{ImageOptions, PageOptions, Registry};
use crate::renderers::{create_renderer, Format};
use crate::site::{Site, SiteContext};

/// Sitemap generator with page and image entries
#[derive(Debug, Clone)]
pub struct Sitemap<C: SiteContext = Site> {
    site: C,
    registry: Registry,
    limits: Limits,
    namespaces: NamespaceTable,
}

impl<C: SiteContext> Sitemap<C> {
    /// Create an empty sitemap for `site`
    pub fn new(site: C) -> Self {
        Self {
            site,
            registry: Registry::new(),
            limits: Limits::default(),
            namespaces: NamespaceTable::default(),
        }
    }

    /// Replace the generation limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Add a page; see [`Registry::add_page`]
    pub fn add_page(&mut self, url: &str, options: PageOptions) -> Result<()> {
        self.registry.add_page(&self.site, url, options)
    }

    /// Add an image to a page; see [`Registry::add_image`]
    pub fn add_image(&mut self, url: &str, page_url: &str, options: ImageOptions) -> Result<()> {
        self.registry.add_image(&self.site, url, page_url, options)
    }

    /// The registered entries
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The site context
    pub fn site(&self) -> &C {
        &self.site
    }

    /// The generation limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Generate the document in `format`
    pub fn generate(&self, format: Format) -> Result<String> {
        self.limits.check_entries(self.registry.len())?;
        tracing::debug!(format = %format, pages = self.registry.len(), "Generating sitemap");

        let renderer = create_renderer(format, &self.site, &self.limits, &self.namespaces);
        let result = renderer.render(&self.registry)?;

        if renderer.is_size_bounded() {
            self.limits.check_size(result.len())?;
        }
        Ok(result)
    }

    /// Generate the document in the format named `format`
    ///
    /// Unknown names fail with [`crate::Error::UnsupportedFormat`].
    pub fn generate_named(&self, format: &str) -> Result<String> {
        self.generate(format.parse()?)
    }

    /// Generate the XML document
    pub fn generate_xml(&self) -> Result<String> {
        self.generate(Format::Xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sitemap() -> Sitemap {
        Sitemap::new(Site::new("http://example.com/"))
    }

    #[test]
    fn test_generate_default_xml() {
        let mut sitemap = sitemap();
        sitemap.add_page("about", PageOptions::new()).unwrap();

        let xml = sitemap.generate(Format::default()).unwrap();
        assert!(xml.contains("<loc>http://example.com/about</loc>"));
        assert_eq!(xml, sitemap.generate_xml().unwrap());
    }

    #[test]
    fn test_unsupported_format() {
        let sitemap = sitemap();
        assert!(matches!(
            sitemap.generate_named("json"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(sitemap.generate_named("txt").is_ok());
    }

    #[test]
    fn test_count_checked_before_format() {
        let mut sitemap = sitemap().with_limits(Limits::new().with_max_entries(1));
        sitemap.add_page("a", PageOptions::new()).unwrap();
        sitemap.add_page("b", PageOptions::new()).unwrap();

        for format in [Format::Xml, Format::Txt, Format::IndexXml] {
            assert!(matches!(
                sitemap.generate(format),
                Err(Error::TooManyEntries { count: 2, max: 1 })
            ));
        }
    }

    #[test]
    fn test_text_ignores_size_bound() {
        let mut sitemap = sitemap().with_limits(Limits::new().with_max_size(10));
        sitemap.add_page("abcdefghijklmnop", PageOptions::new()).unwrap();

        assert_eq!(
            sitemap.generate(Format::Txt).unwrap(),
            "http://example.com/abcdefghijklmnop\n"
        );
        assert!(matches!(
            sitemap.generate(Format::Xml),
            Err(Error::DocumentTooLarge { max: 10, .. })
        ));
    }

    #[test]
    fn test_failed_generation_leaves_registry() {
        let mut sitemap = sitemap().with_limits(Limits::new().with_max_images_per_page(1));
        sitemap.add_page("a", PageOptions::new()).unwrap();
        sitemap.add_image("1.png", "a", ImageOptions::new()).unwrap();
        sitemap.add_image("2.png", "a", ImageOptions::new()).unwrap();

        assert!(sitemap.generate_xml().is_err());
        assert_eq!(sitemap.registry().len(), 1);
        assert_eq!(sitemap.registry().get("http://example.com/a").unwrap().image_count(), 2);
    }
}
