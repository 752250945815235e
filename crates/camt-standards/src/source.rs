//! Where the code-set document comes from.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::embedded;
use crate::error::{Result, StandardsError};

/// A readable code-set document.
///
/// Implementations are read once per provider; retrying after a failed read
/// is up to the caller.
pub trait CodeSetSource: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> String;

    /// Read the whole document.
    fn read(&self) -> Result<Cow<'static, str>>;
}

/// The document embedded in the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl CodeSetSource for EmbeddedSource {
    fn name(&self) -> String {
        embedded::EXTERNAL_CODE_SETS_NAME.to_string()
    }

    fn read(&self) -> Result<Cow<'static, str>> {
        Ok(Cow::Borrowed(embedded::EXTERNAL_CODE_SETS))
    }
}

/// A document on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CodeSetSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Cow<'static, str>> {
        if !self.path.exists() {
            return Err(StandardsError::FileNotFound {
                path: self.path.clone(),
            });
        }
        std::fs::read_to_string(&self.path)
            .map(Cow::Owned)
            .map_err(|source| StandardsError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// An in-memory document, for fixtures.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    content: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl CodeSetSource for StaticSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read(&self) -> Result<Cow<'static, str>> {
        Ok(Cow::Owned(self.content.clone()))
    }
}
