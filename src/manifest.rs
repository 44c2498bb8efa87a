//! JSON manifests describing sitemap content
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "url": "about",
//!       "modified": "2024-01-01",
//!       "changes": "monthly",
//!       "priority": 0.5,
//!       "title": "About us",
//!       "images": [{ "url": "img/team.jpg", "caption": "The team" }]
//!     }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use crate::registry::{ImageOptions, PageOptions};
use crate::site::SiteContext;
use crate::siteindex::Siteindex;
use crate::sitemap::Sitemap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Manifest for a `<urlset>` document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapManifest {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

/// A page as written in a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    /// Absolute or base-relative URL
    pub url: String,
    /// Modification date-time text
    #[serde(default)]
    pub modified: Option<String>,
    /// Change frequency text
    #[serde(default)]
    pub changes: Option<String>,
    /// Priority as a JSON number or string
    #[serde(default)]
    pub priority: Option<JsonValue>,
    /// Title, written as a comment
    #[serde(default)]
    pub title: Option<String>,
    /// Images on the page
    #[serde(default)]
    pub images: Vec<ImageSpec>,
}

/// An image as written in a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSpec {
    /// Absolute or base-relative URL
    pub url: String,
    /// Image title
    #[serde(default)]
    pub title: Option<String>,
    /// License URL
    #[serde(default)]
    pub license: Option<String>,
    /// Caption
    #[serde(default)]
    pub caption: Option<String>,
    /// Geographic location
    #[serde(default)]
    pub location: Option<String>,
}

/// Manifest for a `<sitemapindex>` document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexManifest {
    /// Sitemaps in document order
    #[serde(default)]
    pub sitemaps: Vec<SitemapSpec>,
}

/// A sitemap reference as written in a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapSpec {
    /// Absolute or base-relative URL
    pub url: String,
    /// Modification date-time text
    #[serde(default)]
    pub modified: Option<String>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

impl PageSpec {
    fn options(&self) -> Result<PageOptions> {
        let mut options = PageOptions::new();
        if let Some(modified) = &self.modified {
            options = options.with_modified_str(modified)?;
        }
        if let Some(changes) = &self.changes {
            options = options.with_changes(changes.as_str());
        }
        if let Some(priority) = &self.priority {
            options = options.with_priority(priority_text(&self.url, priority)?);
        }
        if let Some(title) = &self.title {
            options = options.with_title(title.as_str());
        }
        Ok(options)
    }
}

fn priority_text(url: &str, value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(Error::Manifest(format!(
            "priority of `{}` must be a number or string, got {}",
            url, other
        ))),
    }
}

impl ImageSpec {
    fn options(&self) -> ImageOptions {
        let mut options = ImageOptions::new();
        if let Some(title) = &self.title {
            options = options.with_title(title.as_str());
        }
        if let Some(license) = &self.license {
            options = options.with_license(license.as_str());
        }
        if let Some(caption) = &self.caption {
            options = options.with_caption(caption.as_str());
        }
        if let Some(location) = &self.location {
            options = options.with_location(location.as_str());
        }
        options
    }
}

impl SitemapManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Add every page and image to `sitemap`, stopping at the first error
    pub fn apply<C: SiteContext>(&self, sitemap: &mut Sitemap<C>) -> Result<()> {
        for page in &self.pages {
            sitemap.add_page(&page.url, page.options()?)?;
            for image in &page.images {
                sitemap.add_image(&image.url, &page.url, image.options())?;
            }
        }
        Ok(())
    }
}

impl IndexManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Add every sitemap to `index`, stopping at the first error
    pub fn apply<C: SiteContext>(&self, index: &mut Siteindex<C>) -> Result<()> {
        for sitemap in &self.sitemaps {
            let modified = match &sitemap.modified {
                Some(text) => Some(crate::dates::parse_timestamp(text)?),
                None => None,
            };
            index.add_sitemap(&sitemap.url, modified)?;
        }
        Ok(())
    }
}
