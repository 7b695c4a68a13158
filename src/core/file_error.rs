//! File access with the input document attached to every failure.
//!
//! The CLI touches three files at most: the catalog, the request list and
//! the optional `--output` script. A bare "No such file or directory" says
//! nothing about which of them broke, so every read, write and existence
//! check goes through [`FileOps`] and fails with a [`FileOperationError`]
//! naming the path and the document's role in the run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What was being done to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Reading a whole input document
    Read,
    /// Writing the retrieval script
    Write,
    /// Checking that an input document is a regular file
    Exists,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Write => write!(f, "writing"),
            FileOperation::Exists => write!(f, "checking"),
        }
    }
}

/// An I/O failure on one of the run's documents.
#[derive(Error, Debug)]
#[error("Failed {operation} '{}' ({purpose})", .file_path.display())]
pub struct FileOperationError {
    /// What was being done
    pub operation: FileOperation,
    /// The document's path as given on the command line
    pub file_path: PathBuf,
    /// The document's role, e.g. "loading catalog document"
    pub purpose: String,
    /// Module that touched the file
    pub caller: String,
    /// The underlying I/O error
    #[source]
    pub source: io::Error,
}

impl FileOperationError {
    /// Attach the operation, path, purpose and caller to `source`.
    pub fn new(
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
        source: io::Error,
    ) -> Self {
        Self {
            operation,
            file_path: file_path.into(),
            purpose: purpose.into(),
            caller: caller.into(),
            source,
        }
    }

    /// One line naming the file and its role, then a hint for the common
    /// causes.
    pub fn user_message(&self) -> String {
        let hint = match self.source.kind() {
            io::ErrorKind::NotFound => "No file exists at that path.".to_string(),
            io::ErrorKind::PermissionDenied => {
                format!("Permission denied; check the permissions on {}", self.file_path.display())
            }
            io::ErrorKind::InvalidData => "The document is not UTF-8 text.".to_string(),
            _ => format!("Cause: {}", self.source),
        };
        format!(
            "Failed {} '{}' while {} [{}]\n{hint}",
            self.operation,
            self.file_path.display(),
            self.purpose,
            self.caller
        )
    }
}

/// Attach a [`FileOperationError`] to an `io::Result`.
pub trait FileResultExt<T> {
    /// Wrap the error, if any, with the file and its role.
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Result<T, FileOperationError>;
}

impl<T> FileResultExt<T> for io::Result<T> {
    fn with_file_context(
        self,
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        caller: impl Into<String>,
    ) -> Result<T, FileOperationError> {
        self.map_err(|source| FileOperationError::new(operation, file_path, purpose, caller, source))
    }
}

/// Async document access for the CLI.
pub struct FileOps;

impl FileOps {
    /// Read a whole document as UTF-8 text.
    pub async fn read_with_context(path: &Path, purpose: &str, caller: &str) -> Result<String, FileOperationError> {
        tokio::fs::read_to_string(path).await.with_file_context(FileOperation::Read, path, purpose, caller)
    }

    /// `true` when `path` is a regular file. A missing path is `false`, not
    /// an error; directories are `false` too.
    pub async fn exists_with_context(path: &Path, purpose: &str, caller: &str) -> Result<bool, FileOperationError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FileOperationError::new(FileOperation::Exists, path, purpose, caller, e)),
        }
    }

    /// Write `contents`, replacing any existing file.
    pub async fn write_with_context(
        path: &Path,
        contents: &str,
        purpose: &str,
        caller: &str,
    ) -> Result<(), FileOperationError> {
        tokio::fs::write(path, contents).await.with_file_context(FileOperation::Write, path, purpose, caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_missing_document_message() {
        let error = FileOperationError::new(
            FileOperation::Read,
            "conf/stash.json",
            "loading catalog document",
            "cli",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );

        assert_eq!(error.to_string(), "Failed reading 'conf/stash.json' (loading catalog document)");
        let message = error.user_message();
        assert!(message.starts_with("Failed reading 'conf/stash.json' while loading catalog document [cli]"));
        assert!(message.ends_with("No file exists at that path."));
    }

    #[test]
    fn test_with_file_context_wraps_io_error() {
        let result: io::Result<String> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));

        let error = result
            .with_file_context(FileOperation::Write, "/tmp/get.sh", "writing retrieval script", "cli")
            .unwrap_err();
        assert_eq!(error.operation, FileOperation::Write);
        assert_eq!(error.file_path, PathBuf::from("/tmp/get.sh"));
        assert_eq!(error.purpose, "writing retrieval script");
        assert_eq!(error.caller, "cli");
        assert!(error.user_message().contains("Permission denied"));
    }

    #[test]
    fn test_with_file_context_passes_success_through() {
        let result: io::Result<u8> = Ok(7);
        assert_eq!(result.with_file_context(FileOperation::Read, "x", "y", "z").unwrap(), 7);
    }

    #[test]
    fn test_other_io_errors_show_their_cause() {
        let error = FileOperationError::new(
            FileOperation::Write,
            "get.sh",
            "writing retrieval script",
            "cli",
            io::Error::other("disk full"),
        );
        assert!(error.user_message().ends_with("Cause: disk full"));
    }

    #[tokio::test]
    async fn test_exists_with_context() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let present = temp_dir.path().join("requests.json");
        std::fs::write(&present, "[]")?;

        assert!(FileOps::exists_with_context(&present, "checking input", "test").await?);
        let missing = temp_dir.path().join("missing.json");
        assert!(!FileOps::exists_with_context(&missing, "checking input", "test").await?);
        // a directory is not an input document
        assert!(!FileOps::exists_with_context(temp_dir.path(), "checking input", "test").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_write_then_read_with_context() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("get.sh");

        FileOps::write_with_context(&path, "moo ls\n", "writing retrieval script", "test").await?;
        let content = FileOps::read_with_context(&path, "reading script", "test").await?;
        assert_eq!(content, "moo ls\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_read_with_context_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope.json");

        let error = FileOps::read_with_context(&missing, "loading requests", "test").await.unwrap_err();
        assert_eq!(error.operation, FileOperation::Read);
        assert_eq!(error.source.kind(), io::ErrorKind::NotFound);
    }
}
