//! Upload batch staging and validation.
//!
//! All size and count rules are enforced here, before any network call:
//! violating selections are rejected with a specific [`Validation`] reason
//! and the batch is left unchanged.
//!
//! [`Validation`]: crate::error::SkilletError::Validation

use crate::error::{Result, SkilletError};
use serde::{Deserialize, Serialize};

/// Per-file size cap: 10 MiB.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
/// Aggregate batch size cap: 30 MiB.
pub const MAX_BATCH_BYTES: u64 = 30 * 1024 * 1024;
/// A photo post carries at most this many files.
pub const MAX_PHOTO_FILES: usize = 3;

/// The media kind of a post and its upload batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

impl MediaType {
    /// The mime prefix files of this kind must carry.
    fn mime_prefix(self) -> &'static str {
        match self {
            Self::Photo => "image/",
            Self::Video => "video/",
        }
    }
}

/// A file staged for upload: name, mime and raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    /// Stages a file, guessing the mime type from the file name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self { name, mime, bytes }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// An ordered set of files staged for one post.
///
/// Created when the user selects files, destroyed on successful post
/// creation or cancellation. Switching the media type clears prior
/// selections, matching the composer UI.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadBatch {
    media_type: MediaType,
    files: Vec<StagedFile>,
}

impl UploadBatch {
    pub fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            files: Vec::new(),
        }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(StagedFile::size).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Switches the media type, clearing staged files if the kind changes.
    pub fn set_media_type(&mut self, media_type: MediaType) {
        if self.media_type != media_type {
            self.media_type = media_type;
            self.files.clear();
        }
    }

    /// Stages one file, rejecting it (and leaving the batch unchanged) when
    /// it violates the per-file size, kind, or count rules.
    pub fn stage(&mut self, file: StagedFile) -> Result<()> {
        if file.size() == 0 {
            return Err(SkilletError::validation(format!(
                "'{}' is empty",
                file.name
            )));
        }
        if file.size() > MAX_FILE_BYTES {
            return Err(SkilletError::validation(format!(
                "'{}' is too large: maximum size is 10 MiB",
                file.name
            )));
        }
        if !file.mime.starts_with(self.media_type.mime_prefix()) {
            return Err(SkilletError::validation(format!(
                "'{}' ({}) does not match the selected media type",
                file.name, file.mime
            )));
        }
        let limit = match self.media_type {
            MediaType::Photo => MAX_PHOTO_FILES,
            MediaType::Video => 1,
        };
        if self.files.len() >= limit {
            return Err(SkilletError::validation(format!(
                "at most {limit} file(s) may be staged for a {:?} post",
                self.media_type
            )));
        }
        self.files.push(file);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<StagedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Submit-time validation: non-empty, aggregate cap, exact video count.
    ///
    /// Returns the total byte size on success so the caller can derive
    /// progress percentages from it.
    pub fn validate_for_submit(&self) -> Result<u64> {
        if self.files.is_empty() {
            return Err(SkilletError::validation("no files selected"));
        }
        if self.media_type == MediaType::Video && self.files.len() != 1 {
            return Err(SkilletError::validation(
                "a video post requires exactly one file",
            ));
        }
        let total = self.total_bytes();
        if total > MAX_BATCH_BYTES {
            return Err(SkilletError::validation(
                "total file size exceeds the 30 MiB limit",
            ));
        }
        Ok(total)
    }
}
