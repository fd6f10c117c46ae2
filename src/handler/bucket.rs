//! Local bucket module
//!
//! A directory on disk standing in for the SPA hosting bucket. Objects are
//! addressed by storage key (the rewritten uri without its leading `/`) and
//! read from beneath the configured origin path.

use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::http::mime;

/// An object read from the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

/// Read-only view of a bucket directory
#[derive(Debug, Clone)]
pub struct Bucket {
    origin_root: PathBuf,
}

impl Bucket {
    pub fn new(root: impl AsRef<Path>, origin_path: &str) -> Self {
        let origin = origin_path.trim_matches('/');
        let origin_root = if origin.is_empty() {
            root.as_ref().to_path_buf()
        } else {
            root.as_ref().join(origin)
        };
        Self { origin_root }
    }

    pub fn origin_root(&self) -> &Path {
        &self.origin_root
    }

    /// Resolve a key to a file path; `None` if it would leave the bucket
    ///
    /// The key arrives percent-encoded, as it appears in the request path.
    /// It is decoded before the component check so `%2e%2e` is refused too.
    pub fn object_path(&self, key: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(key).ok()?;
        let relative = Path::new(decoded.trim_start_matches('/'));
        let mut path = self.origin_root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return None;
                }
            }
        }
        Some(path)
    }

    /// Fetch an object by key
    ///
    /// `Ok(None)` when the key is missing, names a directory, or escapes the
    /// bucket. Other I/O failures are returned as errors.
    pub async fn get_object(&self, key: &str) -> io::Result<Option<StoredObject>> {
        let Some(path) = self.object_path(key) else {
            crate::logger::log_warning(&format!("Refusing key outside the bucket: {key}"));
            return Ok(None);
        };

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        }

        let body = fs::read(&path).await?;
        Ok(Some(StoredObject {
            key: key.trim_start_matches('/').to_string(),
            body,
            content_type: mime::content_type_for(key),
        }))
    }
}
