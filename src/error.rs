//! Error types for xmlsitemap
//!
//! This module defines all error types used throughout the library.
//! Every failure is structural: nothing here is transient or worth retrying.

use std::fmt;
use thiserror::Error;

/// Result type alias using xmlsitemap Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sitemap operations
#[derive(Error, Debug)]
pub enum Error {
    /// An entry with the same URL has already been registered
    #[error("will not overwrite {kind} with URL `{url}`; already added")]
    DuplicateEntry {
        /// What kind of entry collided
        kind: EntryKind,
        /// The normalized URL
        url: String,
    },

    /// An image was attached to a page that is not registered
    #[error("no page with URL `{page}` found to add image `{image}` to")]
    UnknownParent {
        /// The normalized page URL
        page: String,
        /// The normalized image URL
        image: String,
    },

    /// The registry holds more entries than a document may carry
    #[error("too many entries: {count} exceeds maximum {max}")]
    TooManyEntries {
        /// Number of registered entries
        count: usize,
        /// Configured ceiling
        max: usize,
    },

    /// A single page carries more images than allowed
    #[error("too many images for page `{page}`: {count} exceeds maximum {max}")]
    TooManyImages {
        /// The offending page URL
        page: String,
        /// Number of images on that page
        count: usize,
        /// Configured ceiling
        max: usize,
    },

    /// The serialized document is larger than allowed
    #[error("result document exceeds allowed size: {size} bytes > {max} bytes")]
    DocumentTooLarge {
        /// Serialized byte length
        size: usize,
        /// Configured ceiling
        max: usize,
    },

    /// The requested output format is not recognized
    #[error("invalid format given: `{0}`")]
    UnsupportedFormat(String),

    /// A modification value is not a recognizable calendar date-time
    #[error("invalid date: `{0}`")]
    InvalidDate(String),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Manifest content error
    #[error("manifest error: {0}")]
    Manifest(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Kind of registry entry, used to describe duplicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A page in a sitemap
    Page,
    /// An image attached to a page
    Image,
    /// A sitemap referenced from an index
    Sitemap,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Page => "page",
            EntryKind::Image => "image",
            EntryKind::Sitemap => "sitemap",
        };
        f.write_str(name)
    }
}
