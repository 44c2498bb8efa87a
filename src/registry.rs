//! Page and image registry
//!
//! Entries are kept in insertion order, which is also the order they are
//! serialized in. Nothing is ever overwritten or removed: a repeated URL is
//! an error, and an image needs its page to be registered first.

use crate::dates::parse_timestamp;
use crate::error::{EntryKind, Error, Result};
use crate::site::SiteContext;
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// How often a page is expected to change
///
/// The registry stores change frequency as opaque text; this enum is a
/// convenience for producing the documented values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFrequency {
    /// Changes every time it is accessed
    Always,
    /// Changes hourly
    Hourly,
    /// Changes daily
    Daily,
    /// Changes weekly
    Weekly,
    /// Changes monthly
    Monthly,
    /// Changes yearly
    Yearly,
    /// Archived
    Never,
}

impl ChangeFrequency {
    /// The protocol keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(format!("invalid changefreq value: {}", s)),
        }
    }
}

impl From<ChangeFrequency> for String {
    fn from(freq: ChangeFrequency) -> Self {
        freq.as_str().to_string()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Optional fields of a page; unset fields stay absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOptions {
    /// Last modification time
    pub modified: Option<DateTime<FixedOffset>>,
    /// Change frequency text
    pub changes: Option<String>,
    /// Priority text, nominally `0.0` to `1.0`
    pub priority: Option<String>,
    /// Human readable title, written as a comment
    pub title: Option<String>,
}

impl PageOptions {
    /// Create options with every field absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the modification time
    pub fn with_modified(mut self, modified: DateTime<FixedOffset>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Set the modification time from any supported date-time text
    pub fn with_modified_str(self, modified: &str) -> Result<Self> {
        Ok(self.with_modified(parse_timestamp(modified)?))
    }

    /// Set the change frequency; any text is accepted
    pub fn with_changes(mut self, changes: impl Into<String>) -> Self {
        self.changes = non_empty(changes.into());
        self
    }

    /// Set the priority; written verbatim, not range-checked
    pub fn with_priority(mut self, priority: impl ToString) -> Self {
        self.priority = non_empty(priority.to_string());
        self
    }

    /// Set the title
    ///
    /// The title is written as a comment, where `--` is not allowed, so any
    /// `--` reads back as `- -` once the document is parsed.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }
}

/// Optional fields of an image; unset fields stay absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// Image title
    pub title: Option<String>,
    /// URL of the image license
    pub license: Option<String>,
    /// Image caption
    pub caption: Option<String>,
    /// Geographic location, e.g. `Limerick, Ireland`
    pub location: Option<String>,
}

impl ImageOptions {
    /// Create options with every field absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// Set the license URL
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = non_empty(license.into());
        self
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = non_empty(caption.into());
        self
    }

    /// Set the geographic location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_empty(location.into());
        self
    }
}

/// An image attached to a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Absolute image URL
    pub url: String,
    /// Image title
    pub title: Option<String>,
    /// URL of the image license
    pub license: Option<String>,
    /// Image caption
    pub caption: Option<String>,
    /// Geographic location
    pub location: Option<String>,
}

impl ImageEntry {
    fn new(url: String, options: ImageOptions) -> Self {
        Self {
            url,
            title: options.title,
            license: options.license,
            caption: options.caption,
            location: options.location,
        }
    }
}

/// A page entry
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    /// Absolute page URL
    pub url: String,
    /// Last modification time
    pub modified: Option<DateTime<FixedOffset>>,
    /// Change frequency text
    pub changes: Option<String>,
    /// Priority text
    pub priority: Option<String>,
    /// Title, rendered as a comment
    pub title: Option<String>,
    /// Images keyed by URL, in insertion order
    pub images: IndexMap<String, ImageEntry>,
}

impl PageEntry {
    fn new(url: String, options: PageOptions) -> Self {
        Self {
            url,
            modified: options.modified,
            changes: options.changes,
            priority: options.priority,
            title: options.title,
            images: IndexMap::new(),
        }
    }

    /// Iterate over the page's images in insertion order
    pub fn images(&self) -> impl Iterator<Item = &ImageEntry> {
        self.images.values()
    }

    /// Number of images attached to the page
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

/// Insertion-ordered collection of pages and their images
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pages: IndexMap<String, PageEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page
    ///
    /// `url` is qualified against the site base when it has no scheme.
    /// Fails with [`Error::DuplicateEntry`] if the page already exists.
    pub fn add_page<C: SiteContext + ?Sized>(
        &mut self,
        ctx: &C,
        url: &str,
        options: PageOptions,
    ) -> Result<()> {
        let url = ctx.resolve(url);

        if self.pages.contains_key(&url) {
            return Err(Error::DuplicateEntry {
                kind: EntryKind::Page,
                url,
            });
        }

        tracing::debug!(url = %url, "Adding page");
        self.pages.insert(url.clone(), PageEntry::new(url, options));
        Ok(())
    }

    /// Attach an image to a registered page
    ///
    /// Both URLs are qualified against the site base when they have no
    /// scheme. Fails with [`Error::UnknownParent`] if the page is missing
    /// and [`Error::DuplicateEntry`] if the page already has the image.
    pub fn add_image<C: SiteContext + ?Sized>(
        &mut self,
        ctx: &C,
        url: &str,
        page_url: &str,
        options: ImageOptions,
    ) -> Result<()> {
        let url = ctx.resolve(url);
        let page_url = ctx.resolve(page_url);

        let page = match self.pages.get_mut(&page_url) {
            Some(page) => page,
            None => {
                return Err(Error::UnknownParent {
                    page: page_url,
                    image: url,
                })
            }
        };

        if page.images.contains_key(&url) {
            return Err(Error::DuplicateEntry {
                kind: EntryKind::Image,
                url,
            });
        }

        tracing::debug!(url = %url, page = %page_url, "Adding image");
        page.images.insert(url.clone(), ImageEntry::new(url, options));
        Ok(())
    }

    /// Get a page by its absolute URL
    pub fn get(&self, url: &str) -> Option<&PageEntry> {
        self.pages.get(url)
    }

    /// Check whether a page with this absolute URL exists
    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Iterate over pages in insertion order
    pub fn pages(&self) -> impl Iterator<Item = &PageEntry> {
        self.pages.values()
    }

    /// Number of registered pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no pages are registered
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
