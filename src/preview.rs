//! Preview handles for selected images
//!
//! A preview handle stands for a display resource derived from a selected
//! file. Handles live in a process-wide registry until they are revoked,
//! so every superseded or reset image must have its handle revoked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;
use uuid::Uuid;

/// Opaque reference to a live preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(Uuid);

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// Shared table of live previews
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashMap<PreviewHandle, PathBuf>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self) -> MutexGuard<'_, HashMap<PreviewHandle, PathBuf>> {
        // the table holds no invariants a panicking holder could break
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a preview for `path`
    pub fn create(&self, path: &Path) -> PreviewHandle {
        let handle = PreviewHandle(Uuid::new_v4());
        self.live().insert(handle, path.to_path_buf());
        debug!("Created {} for {}", handle, path.display());
        handle
    }

    /// Release a preview. Returns false if it was already released.
    pub fn revoke(&self, handle: PreviewHandle) -> bool {
        let released = self.live().remove(&handle).is_some();
        if released {
            debug!("Revoked {}", handle);
        }
        released
    }

    /// The file a live preview points at
    pub fn resolve(&self, handle: PreviewHandle) -> Option<PathBuf> {
        self.live().get(&handle).cloned()
    }

    pub fn len(&self) -> usize {
        self.live().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
