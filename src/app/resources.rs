use std::future::Future;
use std::path::PathBuf;

use crate::http::error::HttpError;

/// Source of static resources, keyed by request path (e.g. "/index.html").
pub trait ResourceResolver: Send + Sync + 'static {
    /// Returns the resource bytes or `HttpError::ResourceNotFound`.
    fn resolve(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

/// Serves files from a directory on disk.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a request path onto the root directory.
    ///
    /// Returns `None` for paths that would leave the root.
    fn file_path(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|segment| segment == ".." || segment.contains('\\')) {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ResourceResolver for StaticFiles {
    async fn resolve(&self, path: &str) -> Result<Vec<u8>, HttpError> {
        let file_path = self
            .file_path(path)
            .ok_or_else(|| HttpError::ResourceNotFound(path.to_string()))?;

        match tokio::fs::read(&file_path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if matches!(
                e.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory
            ) => Err(HttpError::ResourceNotFound(path.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
