// ABOUTME: Photo storage for weekly progress uploads
// ABOUTME: Writes uploaded bytes under the uploads directory and removes superseded files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vita Wellness

//! Progress photo storage.
//!
//! Uploads are stored as received under server-generated filenames; any image
//! optimization happens outside this service. Deletion is best-effort: a
//! missing file is logged, never an error, so a half-cleaned entry can always
//! be deleted again.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Extensions accepted from client filenames; anything else falls back to jpg
const KNOWN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Filesystem store for uploaded progress photos
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory photos are stored in
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Persist uploaded bytes under a generated filename and return it.
    /// The extension is taken from the client filename when recognized.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub async fn save(&self, client_filename: Option<&str>, bytes: &[u8]) -> Result<String> {
        let extension = client_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or_else(|| "jpg".into());

        let filename = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(self.root.join(&filename), bytes).await?;

        Ok(filename)
    }

    /// Remove a stored photo by filename, best-effort.
    /// Filenames containing path separators are ignored outright.
    pub async fn delete(&self, filename: &str) {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            warn!(filename, "refusing to delete suspicious photo filename");
            return;
        }

        if let Err(e) = tokio::fs::remove_file(self.root.join(filename)).await {
            warn!(filename, "failed to delete photo: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_generates_unique_names_and_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path());

        let first = store.save(Some("front.PNG"), b"abc").await.unwrap();
        let second = store.save(Some("front.PNG"), b"def").await.unwrap();

        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
        assert_eq!(tokio::fs::read(dir.path().join(&first)).await.unwrap(), b"abc");
    }

    #[tokio::test]
    async fn unknown_extension_falls_back_to_jpg() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path());

        let saved = store.save(Some("photo.exe"), b"abc").await.unwrap();
        assert!(saved.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn delete_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path());

        // Deleting a file that never existed must not panic or error out.
        store.delete("nonexistent.jpg").await;
        store.delete("../outside.jpg").await;
    }
}
