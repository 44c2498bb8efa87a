//! XML serialization of the registry
//!
//! Output is UTF-8 with an XML 1.0 declaration. The `pretty` flag only
//! changes whitespace; element structure and escaping are identical.

use crate::dates::format_iso8601;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{resolve_extensions, Declarations, Namespace, NamespaceTable};
use crate::registry::{ImageEntry, PageEntry, Registry};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Indentation used for pretty-printed output
const INDENT_SIZE: usize = 2;

/// Thin wrapper over a quick-xml writer with the few shapes sitemaps need
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Create a writer, indenting output when `pretty` is set
    pub fn new(pretty: bool) -> Self {
        let inner = if pretty {
            Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE)
        } else {
            Writer::new(Vec::new())
        };
        Self { inner }
    }

    /// Write the `<?xml version="1.0" encoding="UTF-8"?>` declaration
    pub fn declaration(&mut self) -> Result<()> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Open the document root, declaring namespaces and schema locations
    pub fn start_root(&mut self, name: &str, declarations: &Declarations) -> Result<()> {
        let mut root = BytesStart::new(name);
        for (attr, uri) in &declarations.xmlns {
            root.push_attribute((attr.as_str(), uri.as_str()));
        }
        root.push_attribute(("xsi:schemaLocation", declarations.schema_location.as_str()));
        self.inner.write_event(Event::Start(root))?;
        Ok(())
    }

    /// Open an element without attributes
    pub fn start(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::Start(BytesStart::new(name)))?;
        Ok(())
    }

    /// Close an element
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write `<name>text</name>` with `text` escaped
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// Write `<name>text</name>` if `text` is present
    pub fn optional_element(&mut self, name: &str, text: Option<&str>) -> Result<()> {
        match text {
            Some(text) => self.text_element(name, text),
            None => Ok(()),
        }
    }

    /// Write a comment; content is never parsed as markup
    pub fn comment(&mut self, text: &str) -> Result<()> {
        let text = comment_safe(text);
        self.inner
            .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
        Ok(())
    }

    /// Consume the writer and return the document text
    pub fn finish(self) -> Result<String> {
        let bytes = self.inner.into_inner();
        String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
    }
}

/// Break up `--` and a trailing `-`, neither of which may appear in a comment
fn comment_safe(text: &str) -> String {
    let mut text = text.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    if text.ends_with('-') {
        text.push(' ');
    }
    text
}

/// Render `registry` as a `<urlset>` document
///
/// Images are bound-checked per page while writing; the first offending
/// page aborts the whole document.
pub fn write_urlset(
    registry: &Registry,
    table: &NamespaceTable,
    limits: &Limits,
    pretty: bool,
) -> Result<String> {
    let extensions = resolve_extensions(registry);
    let declarations = table.declarations(&table.core, &extensions);
    tracing::debug!(
        pages = registry.len(),
        extensions = ?extensions,
        "Writing urlset"
    );

    let mut writer = XmlWriter::new(pretty);
    writer.declaration()?;
    writer.start_root("urlset", &declarations)?;

    for page in registry.pages() {
        write_page(&mut writer, page, table, limits)?;
    }

    writer.end("urlset")?;
    writer.finish()
}

fn write_page(
    writer: &mut XmlWriter,
    page: &PageEntry,
    table: &NamespaceTable,
    limits: &Limits,
) -> Result<()> {
    writer.start("url")?;

    if let Some(title) = &page.title {
        writer.comment(title)?;
    }
    writer.text_element("loc", &page.url)?;

    let lastmod = page.modified.as_ref().map(format_iso8601);
    writer.optional_element("lastmod", lastmod.as_deref())?;
    writer.optional_element("changefreq", page.changes.as_deref())?;
    writer.optional_element("priority", page.priority.as_deref())?;

    if !page.images.is_empty() {
        limits.check_images(&page.url, page.image_count())?;
        for image in page.images() {
            write_image(writer, image, &table.image)?;
        }
    }

    writer.end("url")
}

fn write_image(writer: &mut XmlWriter, image: &ImageEntry, ns: &Namespace) -> Result<()> {
    let container = ns.qualify("image");
    writer.start(&container)?;

    writer.text_element(&ns.qualify("loc"), &image.url)?;
    writer.optional_element(&ns.qualify("caption"), image.caption.as_deref())?;
    writer.optional_element(&ns.qualify("geo_location"), image.location.as_deref())?;
    writer.optional_element(&ns.qualify("title"), image.title.as_deref())?;
    writer.optional_element(&ns.qualify("license"), image.license.as_deref())?;

    writer.end(&container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ImageOptions, PageOptions};
    use crate::site::Site;

    fn site() -> Site {
        Site::new("http://example.com/")
    }

    fn render(registry: &Registry) -> String {
        write_urlset(registry, &NamespaceTable::new(), &Limits::default(), false).unwrap()
    }

    #[test]
    fn test_empty_registry() {
        let xml = render(&Registry::new());
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9""#));
        assert!(xml.ends_with("</urlset>"));
        assert!(!xml.contains("xmlns:image"));
    }

    #[test]
    fn test_page_children_order() {
        let mut registry = Registry::new();
        let options = PageOptions::new()
            .with_title("Home")
            .with_modified_str("2024-01-01T00:00:00Z")
            .unwrap()
            .with_changes("daily")
            .with_priority("0.8");
        registry.add_page(&site(), "", options).unwrap();

        let xml = render(&registry);
        assert!(xml.contains(
            "<url><!--Home--><loc>http://example.com/</loc>\
             <lastmod>2024-01-01T00:00:00+00:00</lastmod>\
             <changefreq>daily</changefreq><priority>0.8</priority></url>"
        ));
    }

    #[test]
    fn test_absent_fields_omitted() {
        let mut registry = Registry::new();
        registry
            .add_page(&site(), "a", PageOptions::new().with_priority("0.3"))
            .unwrap();

        let xml = render(&registry);
        assert!(xml.contains("<url><loc>http://example.com/a</loc><priority>0.3</priority></url>"));
        assert!(!xml.contains("<lastmod>"));
        assert!(!xml.contains("<changefreq>"));
        assert!(!xml.contains("<!--"));
    }

    #[test]
    fn test_image_children_order() {
        let mut registry = Registry::new();
        registry.add_page(&site(), "a", PageOptions::new()).unwrap();
        let options = ImageOptions::new()
            .with_title("T")
            .with_license("http://example.com/license")
            .with_caption("C")
            .with_location("Limerick, Ireland");
        registry.add_image(&site(), "a.png", "a", options).unwrap();

        let xml = render(&registry);
        assert!(xml.contains(
            "<image:image><image:loc>http://example.com/a.png</image:loc>\
             <image:caption>C</image:caption>\
             <image:geo_location>Limerick, Ireland</image:geo_location>\
             <image:title>T</image:title>\
             <image:license>http://example.com/license</image:license></image:image>"
        ));
        assert!(xml.contains(r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1""#));
    }

    #[test]
    fn test_escaping() {
        let mut registry = Registry::new();
        registry
            .add_page(&site(), "search?q=a&b=<c>", PageOptions::new())
            .unwrap();

        let xml = render(&registry);
        assert!(xml.contains("<loc>http://example.com/search?q=a&amp;b=&lt;c&gt;</loc>"));
    }

    #[test]
    fn test_non_ascii_text_kept() {
        let mut registry = Registry::new();
        registry
            .add_page(&site(), "café", PageOptions::new().with_title("Crème brûlée ☕"))
            .unwrap();

        let xml = render(&registry);
        assert!(xml.contains("<!--Crème brûlée ☕-->"));
        assert!(xml.contains("<loc>http://example.com/café</loc>"));
    }

    #[test]
    fn test_comment_title_not_markup() {
        let mut registry = Registry::new();
        registry
            .add_page(&site(), "a", PageOptions::new().with_title("<b>x</b> -- y-"))
            .unwrap();

        let xml = render(&registry);
        assert!(xml.contains("<!--<b>x</b> - - y- -->"));
    }

    #[test]
    fn test_too_many_images() {
        let mut registry = Registry::new();
        registry.add_page(&site(), "a", PageOptions::new()).unwrap();
        for i in 0..3 {
            registry
                .add_image(&site(), &format!("{}.png", i), "a", ImageOptions::new())
                .unwrap();
        }

        let limits = Limits::new().with_max_images_per_page(2);
        let err = write_urlset(&registry, &NamespaceTable::new(), &limits, false).unwrap_err();
        assert!(matches!(err, Error::TooManyImages { count: 3, max: 2, .. }));
    }

    #[test]
    fn test_pretty_only_changes_whitespace() {
        let mut registry = Registry::new();
        registry
            .add_page(&site(), "a", PageOptions::new().with_title("A"))
            .unwrap();
        registry
            .add_image(&site(), "a.png", "a", ImageOptions::new())
            .unwrap();

        let compact = render(&registry);
        let pretty =
            write_urlset(&registry, &NamespaceTable::new(), &Limits::default(), true).unwrap();

        assert!(pretty.contains("\n  <url>"));
        let squeezed: String = pretty
            .lines()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .concat();
        assert_eq!(squeezed, compact);
    }

    #[test]
    fn test_comment_safe() {
        assert_eq!(comment_safe("plain"), "plain");
        assert_eq!(comment_safe("a--b"), "a- -b");
        assert_eq!(comment_safe("a---b"), "a- - -b");
        assert_eq!(comment_safe("end-"), "end- ");
    }
}
