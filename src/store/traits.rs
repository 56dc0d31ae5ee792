use crate::model::SessionSnapshot;
use anyhow::Result;

/// Persisted client state: the host's "local storage"
pub trait SessionStore: Send + Sync {
    /// The persisted snapshot; an empty store yields an anonymous session
    fn load(&self) -> Result<SessionSnapshot>;
    fn save(&self, session: &SessionSnapshot) -> Result<()>;
    fn clear(&self) -> Result<()>;

    /// Forget the token but keep the profile snapshot
    fn clear_token(&self) -> Result<()> {
        let mut session = self.load()?;
        if session.token.is_none() {
            return Ok(());
        }
        session.token = None;
        self.save(&session)
    }
}
