use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

use crate::model::SessionSnapshot;
use crate::store::SessionStore;

/// Session kept in memory only; nothing survives the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<SessionSnapshot>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: SessionSnapshot) -> Self {
        Self {
            inner: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<SessionSnapshot> {
        Ok(self.inner.read().clone())
    }

    fn save(&self, session: &SessionSnapshot) -> Result<()> {
        *self.inner.write() = session.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write() = SessionSnapshot::anonymous();
        Ok(())
    }
}

/// Session persisted as a JSON file so it survives a restart
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<SessionSnapshot> {
        if !self.path.exists() {
            return Ok(SessionSnapshot::anonymous());
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading session file {}", self.path.display()))?;
        if raw.trim().is_empty() {
            return Ok(SessionSnapshot::anonymous());
        }
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing session file {}", self.path.display()))
    }

    fn save(&self, session: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("writing session file {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}
