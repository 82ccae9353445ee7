//! Durable code issuance.
//!
//! Every issued code follows the same sequence while holding the issuer
//! mutex and the store-wide file lock: load settings, advance the counter,
//! save settings, append the history entry, return. The file lock keeps
//! separate issuers and separate processes on one store apart. The counter
//! is persisted before the caller ever sees the code, and a failure after
//! the save leaves the serial consumed rather than risk reusing it.

use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::codes::{self, CodeError, CodeKind, IssuedCode};
use crate::context::ServiceContext;
use crate::store::SettingsStore;

/// Issues ISRC and UPC codes against a settings store.
pub struct CodeIssuer<'a> {
    ctx: &'a ServiceContext,
    store: SettingsStore<'a>,
    lock: Mutex<()>,
}

impl<'a> CodeIssuer<'a> {
    /// Creates an issuer over the store rooted at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self {
            ctx,
            store: SettingsStore::new(ctx, root),
            lock: Mutex::new(()),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &SettingsStore<'a> {
        &self.store
    }

    /// Issues the next ISRC, or `None` when ISRC auto-generation is off.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, serial exhaustion or store
    /// failures.
    pub fn issue_isrc(&self) -> Result<Option<IssuedCode>, CodeError> {
        self.issue(CodeKind::Isrc)
    }

    /// Issues the next UPC, or `None` when UPC auto-generation is off.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, serial exhaustion or store
    /// failures.
    pub fn issue_upc(&self) -> Result<Option<IssuedCode>, CodeError> {
        self.issue(CodeKind::Upc)
    }

    /// Issues the next code of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, serial exhaustion or store
    /// failures.
    pub fn issue(&self, kind: CodeKind) -> Result<Option<IssuedCode>, CodeError> {
        let _guard =
            self.lock.lock().map_err(|_| CodeError::Store("issuer lock poisoned".into()))?;
        let _store_lock = self.store.lock().map_err(CodeError::Store)?;

        let mut settings = self.store.load_settings().map_err(CodeError::Store)?;
        let generated = match kind {
            CodeKind::Isrc => codes::next_isrc(&mut settings.isrc)?,
            CodeKind::Upc => codes::next_upc(&mut settings.upc, self.ctx.digits.as_ref())?,
        };
        let Some((code, serial)) = generated else {
            debug!(%kind, "auto-generation disabled; no code issued");
            return Ok(None);
        };

        self.store.save_settings(&settings).map_err(CodeError::Store)?;

        let issued = IssuedCode {
            kind,
            code,
            serial,
            issued_at: self.ctx.clock.now(),
        };
        if let Err(e) = self.store.append_history(&issued) {
            // The serial is already persisted as consumed; the code is still valid.
            warn!(%kind, code = %issued.code, error = %e, "issued code missing from history");
        }
        info!(%kind, code = %issued.code, serial, "issued code");
        Ok(Some(issued))
    }

    /// Issues `count` codes of `kind` one at a time.
    ///
    /// Stops early with an empty or shorter list if auto-generation is off.
    /// Codes issued before a failure remain issued.
    ///
    /// # Errors
    ///
    /// Returns the failure wrapped in `CodeError::BatchInterrupted`, carrying
    /// the codes issued so far.
    pub fn bulk_issue(&self, kind: CodeKind, count: usize) -> Result<Vec<IssuedCode>, CodeError> {
        let mut issued = Vec::new();
        for _ in 0..count {
            match self.issue(kind) {
                Ok(Some(code)) => issued.push(code),
                Ok(None) => break,
                Err(source) => {
                    warn!(
                        %kind,
                        issued = issued.len(),
                        requested = count,
                        "bulk issuance interrupted"
                    );
                    return Err(CodeError::BatchInterrupted {
                        issued,
                        source: Box::new(source),
                    });
                }
            }
        }
        Ok(issued)
    }
}
