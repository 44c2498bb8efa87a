//! Limits and constraints for sitemap generation
//!
//! Bounds are enforced only when a document is generated, never when
//! entries are inserted, so a registry that trips one can be inspected,
//! reduced and generated again.

use crate::error::{Error, Result};

/// Maximum number of entries in a single document (sitemaps.org protocol)
pub const MAX_ENTRIES: usize = 50_000;

/// Maximum serialized document size in bytes (10 MB)
pub const MAX_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of images per page
pub const MAX_IMAGES_PER_PAGE: usize = 1_000;

/// Generation limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of entries per document
    pub max_entries: usize,

    /// Maximum serialized document size in bytes
    pub max_size: usize,

    /// Maximum number of images attached to a single page; always
    /// [`MAX_IMAGES_PER_PAGE`] outside of tests
    pub(crate) max_images_per_page: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_entries: MAX_ENTRIES,
            max_size: MAX_SIZE,
            max_images_per_page: MAX_IMAGES_PER_PAGE,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Set the maximum document size in bytes
    pub fn with_max_size(mut self, max: usize) -> Self {
        self.max_size = max;
        self
    }

    /// Maximum number of images attached to a single page
    pub fn max_images_per_page(&self) -> usize {
        self.max_images_per_page
    }

    #[cfg(test)]
    pub(crate) fn with_max_images_per_page(mut self, max: usize) -> Self {
        self.max_images_per_page = max;
        self
    }

    /// Check if the number of entries is within limits
    pub fn check_entries(&self, count: usize) -> Result<()> {
        if count > self.max_entries {
            Err(Error::TooManyEntries {
                count,
                max: self.max_entries,
            })
        } else {
            Ok(())
        }
    }

    /// Check if the number of images on `page` is within limits
    pub fn check_images(&self, page: &str, count: usize) -> Result<()> {
        if count > self.max_images_per_page {
            Err(Error::TooManyImages {
                page: page.to_string(),
                count,
                max: self.max_images_per_page,
            })
        } else {
            Ok(())
        }
    }

    /// Check if the serialized size is within limits
    pub fn check_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            Err(Error::DocumentTooLarge {
                size,
                max: self.max_size,
            })
        } else {
            Ok(())
        }
    }
}
