//! Code-set document location.

use std::path::PathBuf;

use crate::source::{CodeSetSource, EmbeddedSource, FileSource};

/// Environment variable for overriding the code-set document.
pub const CODE_SETS_ENV_VAR: &str = "CAMT_CODE_SETS";

/// Path of the code-set document named by `CAMT_CODE_SETS`, if set.
pub fn code_sets_path() -> Option<PathBuf> {
    std::env::var_os(CODE_SETS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Source to load code sets from.
///
/// Resolution order:
/// 1. `CAMT_CODE_SETS` environment variable
/// 2. `configured` path (e.g. from a configuration file)
/// 3. the embedded document
pub fn default_source(configured: Option<PathBuf>) -> Box<dyn CodeSetSource> {
    match code_sets_path().or(configured) {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(EmbeddedSource),
    }
}
