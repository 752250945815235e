//! Lazily loaded, cached lookup of external code sets by field-type name.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, OnceLock, PoisonError, RwLock};

use camt_model::CodeRule;

use crate::error::{Result, StandardsError};
use crate::paths;
use crate::source::{CodeSetSource, EmbeddedSource};
use crate::types::{CodeSetDefinition, CodeSetDocument, RawDefinition};

static GLOBAL: LazyLock<CodeSetProvider> =
    LazyLock::new(|| CodeSetProvider::new(paths::default_source(None)));

/// Maps field-type names to external code sets.
///
/// The document is read on first use and kept for the provider's lifetime.
/// Resolved definitions are cached per name and shared as `Arc`s. A failed
/// read is not cached, so a later call reads the source again.
pub struct CodeSetProvider {
    source: Box<dyn CodeSetSource>,
    document: OnceLock<Arc<CodeSetDocument>>,
    resolved: RwLock<HashMap<String, Arc<CodeSetDefinition>>>,
}

impl CodeSetProvider {
    pub fn new(source: Box<dyn CodeSetSource>) -> Self {
        Self {
            source,
            document: OnceLock::new(),
            resolved: RwLock::new(HashMap::new()),
        }
    }

    /// Provider over the embedded document.
    pub fn embedded() -> Self {
        Self::new(Box::new(EmbeddedSource))
    }

    /// Process-wide provider: `CAMT_CODE_SETS` if set, else the embedded document.
    pub fn global() -> &'static CodeSetProvider {
        &GLOBAL
    }

    /// Name of the underlying source.
    pub fn source_name(&self) -> String {
        self.source.name()
    }

    fn document(&self) -> Result<Arc<CodeSetDocument>> {
        if let Some(document) = self.document.get() {
            return Ok(Arc::clone(document));
        }

        let file = self.source.name();
        let content = self.source.read().inspect_err(|e| {
            tracing::error!(file = %file, error = %e, "failed to read code-set document");
        })?;
        let document: CodeSetDocument =
            serde_json::from_str(&content).map_err(|source| StandardsError::JsonParse {
                file: file.clone(),
                source,
            })?;
        tracing::info!(
            file = %file,
            version = document.version.as_deref().unwrap_or("unknown"),
            definitions = document.definitions.len(),
            "loaded external code sets"
        );

        Ok(Arc::clone(self.document.get_or_init(|| Arc::new(document))))
    }

    /// Definition for a field type.
    ///
    /// # Errors
    ///
    /// Fails if the document cannot be loaded, the name is not defined, or
    /// the entry is not a string code set with an enumeration or length range.
    /// A broken entry fails only its own lookup.
    pub fn lookup(&self, name: &str) -> Result<Arc<CodeSetDefinition>> {
        if let Some(found) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(found));
        }

        let document = self.document()?;
        let raw = document
            .definitions
            .get(name)
            .ok_or_else(|| StandardsError::UnknownFieldType {
                name: name.to_string(),
                file: self.source.name(),
            })?;
        let definition = Arc::new(
            RawDefinition::from_value(name, raw)
                .and_then(|raw| raw.resolve(name))
                .inspect_err(|e| {
                    tracing::error!(name, error = %e, "unusable external code set");
                })?,
        );
        if let CodeSetDefinition::Enumeration(codes) = definition.as_ref()
            && codes.is_empty()
        {
            tracing::warn!(name, "external code set lists no codes");
        }
        tracing::debug!(name, codes = definition.code_count(), "resolved external code set");

        let mut resolved = self
            .resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            resolved.entry(name.to_string()).or_insert(definition),
        ))
    }

    /// Build the code rule for an external field type.
    pub fn code_rule(&self, name: &str) -> camt_model::Result<CodeRule> {
        let definition = self.lookup(name)?;
        match definition.as_ref() {
            CodeSetDefinition::Enumeration(codes) => {
                Ok(CodeRule::external_codes(name, codes.iter().cloned()))
            }
            CodeSetDefinition::LengthRange { min, max } => {
                CodeRule::external_length(name, *min, *max)
            }
        }
    }

    /// All field-type names in the document, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.document()?.definitions.keys().cloned().collect())
    }
}

impl std::fmt::Debug for CodeSetProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeSetProvider")
            .field("source", &self.source.name())
            .field("loaded", &self.document.get().is_some())
            .finish_non_exhaustive()
    }
}
