//! Settings store: persistence for code generation settings and the
//! issuance history.
//!
//! All I/O goes through the `FileSystem` port. Directory layout:
//!
//! ```text
//! <root>/
//!   ├── .lock
//!   ├── settings.yaml
//!   └── history/
//!        ├── isrc.yaml
//!        └── upc.yaml
//! ```
//!
//! History files are YAML streams with one document per issued code, so
//! recording a code appends instead of rewriting the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::codes::{CodeGenerationSettings, CodeKind, IssuedCode};
use crate::context::ServiceContext;
use crate::ports::LockGuard;

/// Persistence layer for settings and issued codes.
pub struct SettingsStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> SettingsStore<'a> {
    /// Creates a new store rooted at the given path.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self {
            ctx,
            root: root.to_path_buf(),
        }
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Takes the store-wide exclusive lock, waiting for other holders in
    /// this or any other process. Hold it across any load-modify-save.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be created or locked.
    pub fn lock(&self) -> Result<LockGuard, String> {
        self.ctx
            .fs
            .lock(&self.root.join(".lock"))
            .map_err(|e| format!("Failed to lock store {}: {e}", self.root.display()))
    }

    /// Loads the settings, falling back to factory defaults (dated by the
    /// context clock) when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing settings file cannot be read or parsed.
    pub fn load_settings(&self) -> Result<CodeGenerationSettings, String> {
        let path = self.settings_path();
        if !self.ctx.fs.exists(&path) {
            return Ok(CodeGenerationSettings::defaults_at(self.ctx.clock.now()));
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))
    }

    /// Validates and saves the settings to `<root>/settings.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization or writing fails.
    pub fn save_settings(&self, settings: &CodeGenerationSettings) -> Result<(), String> {
        settings.validate().map_err(|e| e.to_string())?;
        let yaml = serde_yaml::to_string(settings)
            .map_err(|e| format!("Failed to serialize settings: {e}"))?;
        self.ctx
            .fs
            .write(&self.settings_path(), &yaml)
            .map_err(|e| format!("Failed to write settings: {e}"))
    }

    /// Loads every issued code of `kind`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing history file cannot be read or parsed.
    pub fn load_history(&self, kind: CodeKind) -> Result<Vec<IssuedCode>, String> {
        let path = self.history_path(kind);
        if !self.ctx.fs.exists(&path) {
            return Ok(Vec::new());
        }
        let contents = self
            .ctx
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {kind} history: {e}"))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_yaml::Deserializer::from_str(&contents)
            .map(|document| {
                IssuedCode::deserialize(document)
                    .map_err(|e| format!("Failed to parse {kind} history: {e}"))
            })
            .collect()
    }

    /// Appends one issued code to its kind's history.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be serialized or appended.
    pub fn append_history(&self, issued: &IssuedCode) -> Result<(), String> {
        let entry = serde_yaml::to_string(issued)
            .map_err(|e| format!("Failed to serialize {} history: {e}", issued.kind))?;
        self.ctx
            .fs
            .append(&self.history_path(issued.kind), &format!("---\n{entry}"))
            .map_err(|e| format!("Failed to write {} history: {e}", issued.kind))
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join("settings.yaml")
    }

    fn history_path(&self, kind: CodeKind) -> PathBuf {
        self.root.join("history").join(format!("{}.yaml", kind.as_str()))
    }
}
