//! # Tag Configuration
//!
//! Settings that control how tags are opened and written back.
//!
//! The configuration uses a builder with fail-fast validation, so an invalid
//! combination (for example a UTF-8 default encoding for ID3v2.3 tags) is
//! reported before any file is touched.
//!
//! ## Usage
//!
//! ```ignore
//! use core_tag::config::TagConfig;
//! use core_tag::{TextEncoding, Version};
//!
//! let config = TagConfig::builder()
//!     .default_version(Version::V23)
//!     .default_encoding(TextEncoding::Utf16)
//!     .padding(1024)
//!     .build()?;
//! ```
//!
//! Hosts that keep settings on disk can load the same structure from JSON:
//!
//! ```ignore
//! let config = TagConfig::from_json(r#"{ "default_version": "2.3", "padding": 512 }"#)?;
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encoding::TextEncoding;
use crate::error::{Result, TagError};
use crate::header::Version;

/// Upper bound for zero padding written after the frames.
pub const MAX_PADDING: usize = 1024 * 1024;

/// Options used by [`Tag::open_with_config`](crate::Tag::open_with_config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Scan existing frames when opening. When `false` the existing tag is
    /// ignored and the next save replaces it with the frames added since.
    pub parse_on_open: bool,

    /// Version used for files that have no tag yet
    pub default_version: Version,

    /// Encoding of text frames created by the typed setters
    pub default_encoding: TextEncoding,

    /// Directory for the temporary file written during save. Defaults to the
    /// directory of the tagged file; it must be on the same filesystem.
    pub temp_dir: Option<PathBuf>,

    /// Zero bytes appended after the frames on save
    pub padding: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            parse_on_open: true,
            default_version: Version::V24,
            default_encoding: TextEncoding::Utf8,
            temp_dir: None,
            padding: 0,
        }
    }
}

impl TagConfig {
    pub fn builder() -> TagConfigBuilder {
        TagConfigBuilder::default()
    }

    /// Deserialize and validate a JSON configuration. Missing fields take
    /// their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TagConfig = serde_json::from_str(json)
            .map_err(|e| TagError::Config(format!("Invalid configuration JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Config`] if:
    /// - `default_encoding` cannot be written in `default_version`
    /// - `padding` exceeds [`MAX_PADDING`]
    /// - `temp_dir` is set but is not an existing directory
    pub fn validate(&self) -> Result<()> {
        if !self.default_encoding.is_supported_by(self.default_version) {
            return Err(TagError::Config(format!(
                "Encoding {:?} is not available in ID3v2.{}. \
                 Use Iso88591 or Utf16, or switch the default version to 2.4.",
                self.default_encoding,
                self.default_version.major()
            )));
        }

        if self.padding > MAX_PADDING {
            return Err(TagError::Config(format!(
                "Padding of {} bytes exceeds the maximum of {} bytes",
                self.padding, MAX_PADDING
            )));
        }

        if let Some(dir) = &self.temp_dir {
            if !dir.is_dir() {
                return Err(TagError::Config(format!(
                    "Temporary directory {} does not exist or is not a directory",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`TagConfig`].
#[derive(Debug, Default)]
pub struct TagConfigBuilder {
    config: TagConfig,
}

impl TagConfigBuilder {
    pub fn parse_on_open(mut self, parse: bool) -> Self {
        self.config.parse_on_open = parse;
        self
    }

    pub fn default_version(mut self, version: Version) -> Self {
        self.config.default_version = version;
        self
    }

    pub fn default_encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.default_encoding = encoding;
        self
    }

    /// Write temporary files into `dir` instead of next to the tagged file.
    pub fn temp_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    pub fn padding(mut self, bytes: usize) -> Self {
        self.config.padding = bytes;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TagConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
