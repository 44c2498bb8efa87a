//! # xmlsitemap
//!
//! Validated, namespace-aware XML sitemap generation.
//!
//! Pages and the images shown on them are collected in an insertion-ordered
//! registry and rendered as a sitemap protocol document. The image extension
//! namespace is declared only when at least one page carries an image.
//!
//! ## Features
//!
//! - Unique page and image URLs, images only on registered pages
//! - Relative URLs qualified against a base URI
//! - Entry count, images per page and document size bounds
//! - Pretty-printed output in debug mode
//! - Sitemap index documents
//! - Deprecated plain-text and index-of-pages formats
//!
//! ## Example
//!
//! ```rust
//! use xmlsitemap::{ImageOptions, PageOptions, Site, Sitemap};
//!
//! let mut sitemap = Sitemap::new(Site::new("http://example.com/"));
//! sitemap.add_page("about", PageOptions::new().with_changes("monthly"))?;
//! sitemap.add_image("img/team.jpg", "about", ImageOptions::new().with_caption("Team"))?;
//!
//! let xml = sitemap.generate_xml()?;
//! assert!(xml.contains("<image:caption>Team</image:caption>"));
//! # Ok::<(), xmlsitemap::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod dates;
pub mod namespaces;
pub mod site;

// Data
pub mod registry;

// Output
pub mod renderers;
pub mod writer;

// Generators
pub mod siteindex;
pub mod sitemap;

// Input
pub mod manifest;

// Re-exports for convenience
pub use error::{EntryKind, Error, Result};
pub use limits::Limits;
pub use registry::{ChangeFrequency, ImageEntry, ImageOptions, PageEntry, PageOptions, Registry};
pub use renderers::{Format, Renderer};
pub use site::{Site, SiteContext};
pub use siteindex::Siteindex;
pub use sitemap::Sitemap;

/// Version of the xmlsitemap library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
