//! XML namespace definitions and extension resolution
//!
//! The core sitemap namespace is always declared. Extension namespaces
//! are declared only when the registry holds data that needs them, so the
//! set is derived from the entries rather than configured by the caller.

use crate::registry::{PageEntry, Registry};

/// XML Schema instance namespace, carrier of `xsi:schemaLocation`
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Placeholder substituted with the namespace version
const VERSION_PLACEHOLDER: &str = "{:version}";

/// Placeholder substituted with the namespace prefix
const PREFIX_PLACEHOLDER: &str = "{:prefix}";

/// A namespace definition with templated URIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix used for element names (None for the default namespace)
    pub prefix: Option<&'static str>,
    /// Version substituted for `{:version}`
    pub version: &'static str,
    /// Namespace URI template
    pub uri_template: &'static str,
    /// Schema URI template
    pub schema_template: &'static str,
}

impl Namespace {
    /// The expanded namespace URI
    pub fn uri(&self) -> String {
        self.expand(self.uri_template)
    }

    /// The expanded schema URI
    pub fn schema(&self) -> String {
        self.expand(self.schema_template)
    }

    /// The `namespace-URI schema-URI` pair for `xsi:schemaLocation`
    pub fn schema_location_pair(&self) -> String {
        format!("{} {}", self.uri(), self.schema())
    }

    /// Qualify a local element name with this namespace's prefix
    pub fn qualify(&self, local_name: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{}:{}", prefix, local_name),
            None => local_name.to_string(),
        }
    }

    /// The attribute name declaring this namespace, `xmlns` or `xmlns:<prefix>`
    pub fn xmlns_attribute(&self) -> String {
        match self.prefix {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        }
    }

    fn expand(&self, template: &str) -> String {
        template
            .replace(VERSION_PLACEHOLDER, self.version)
            .replace(PREFIX_PLACEHOLDER, self.prefix.unwrap_or(""))
    }
}

/// Sitemap core namespace
pub const CORE: Namespace = Namespace {
    prefix: None,
    version: "0.9",
    uri_template: "http://www.sitemaps.org/schemas/sitemap/{:version}",
    schema_template: "http://www.sitemaps.org/schemas/sitemap/{:version}/sitemap.xsd",
};

/// Sitemap index namespace; same URI as the core, different schema
pub const INDEX: Namespace = Namespace {
    prefix: None,
    version: "0.9",
    uri_template: "http://www.sitemaps.org/schemas/sitemap/{:version}",
    schema_template: "http://www.sitemaps.org/schemas/sitemap/{:version}/siteindex.xsd",
};

/// Google image extension namespace
pub const IMAGE: Namespace = Namespace {
    prefix: Some("image"),
    version: "1.1",
    uri_template: "http://www.google.com/schemas/sitemap-{:prefix}/{:version}",
    schema_template: "http://www.google.com/schemas/sitemap-{:prefix}/{:version}/sitemap-{:prefix}.xsd",
};

/// Optional namespace extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Image entries attached to pages
    Image,
}

impl Extension {
    /// All extensions in detection order
    pub const ALL: [Extension; 1] = [Extension::Image];

    /// Whether `page` carries data from this extension
    pub fn is_used_by(self, page: &PageEntry) -> bool {
        match self {
            Extension::Image => !page.images.is_empty(),
        }
    }
}

/// Immutable table of namespace definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    /// Core namespace, declared unprefixed on every document
    pub core: Namespace,
    /// Schema used by sitemap index documents
    pub index: Namespace,
    /// Image extension
    pub image: Namespace,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self {
            core: CORE,
            index: INDEX,
            image: IMAGE,
        }
    }
}

impl NamespaceTable {
    /// Create the standard sitemap namespace table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the definition of an extension
    pub fn extension(&self, ext: Extension) -> &Namespace {
        match ext {
            Extension::Image => &self.image,
        }
    }

    /// Root attributes for a document rooted in `root` using `extensions`
    pub fn declarations(&self, root: &Namespace, extensions: &[Extension]) -> Declarations {
        let mut xmlns = vec![(root.xmlns_attribute(), root.uri())];
        let mut pairs = vec![root.schema_location_pair()];

        for ext in extensions {
            let ns = self.extension(*ext);
            xmlns.push((ns.xmlns_attribute(), ns.uri()));
            pairs.push(ns.schema_location_pair());
        }
        xmlns.push(("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()));

        Declarations {
            xmlns,
            schema_location: pairs.join(" "),
        }
    }
}

/// Namespace attributes to place on a document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarations {
    /// `(attribute name, namespace URI)` pairs in declaration order
    pub xmlns: Vec<(String, String)>,
    /// Value of `xsi:schemaLocation`
    pub schema_location: String,
}

/// Determine which extensions `registry` requires, in detection order
pub fn resolve_extensions(registry: &Registry) -> Vec<Extension> {
    Extension::ALL
        .into_iter()
        .filter(|ext| registry.pages().any(|page| ext.is_used_by(page)))
        .collect()
}
