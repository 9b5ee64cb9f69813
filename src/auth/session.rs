//! Session lifecycle built on the credential store.
//!
//! Authentication state is derived: the session is authenticated exactly
//! when a credential is held. There is no second source of truth.

use tracing::info;

use super::CredentialStore;

pub struct Session {
    store: CredentialStore,
    credential: Option<String>,
}

impl Session {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            credential: None,
        }
    }

    /// Runs once per process start.
    ///
    /// A token on the sign-in redirect link wins and is persisted; the
    /// launch argument is consumed here and never re-read, so a later start
    /// without it falls back to the stored credential.
    pub fn initialize(&mut self, startup_location: Option<&str>) {
        if let Some(location) = startup_location {
            if let Some(token) = CredentialStore::capture_from_location(location) {
                self.store.save(&token);
                self.credential = Some(token);
                info!("Captured credential from sign-in redirect");
                return;
            }
        }

        self.credential = self.store.load();
    }

    /// The bearer token, if signed in.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Drop the credential here and in the store. Idempotent.
    pub fn sign_out(&mut self) {
        if self.credential.is_none() {
            return;
        }
        self.store.clear();
        self.credential = None;
        info!("Signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> CredentialStore {
        let dir = std::env::temp_dir().join(format!(
            "mailbrief-session-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        CredentialStore::new(dir)
    }

    fn store_at(name: &str) -> CredentialStore {
        // Same directory as temp_store without wiping it, for re-opens
        let dir = std::env::temp_dir().join(format!(
            "mailbrief-session-{}-{}",
            name,
            std::process::id()
        ));
        CredentialStore::new(dir)
    }

    #[test]
    fn test_initialize_captures_redirect_token() {
        let mut session = Session::new(temp_store("capture"));
        session.initialize(Some("?token=abc123"));

        assert!(session.is_authenticated());
        assert_eq!(session.credential(), Some("abc123"));
        // The token was persisted as a side effect
        assert_eq!(store_at("capture").load(), Some("abc123".to_string()));
    }

    #[test]
    fn test_second_initialize_loads_saved_credential() {
        let mut first = Session::new(temp_store("reload"));
        first.initialize(Some("token=abc123"));
        assert!(first.is_authenticated());

        // Fresh process start, no redirect link this time
        let mut second = Session::new(store_at("reload"));
        second.initialize(None);
        assert!(second.is_authenticated());
        assert_eq!(second.credential(), Some("abc123"));
    }

    #[test]
    fn test_redirect_token_overwrites_stored_credential() {
        let mut first = Session::new(temp_store("overwrite"));
        first.initialize(Some("token=old"));

        let mut second = Session::new(store_at("overwrite"));
        second.initialize(Some("token=new"));
        assert_eq!(second.credential(), Some("new"));
        assert_eq!(store_at("overwrite").load(), Some("new".to_string()));
    }

    #[test]
    fn test_location_without_token_falls_back_to_store() {
        let mut first = Session::new(temp_store("fallback"));
        first.initialize(Some("token=abc123"));

        let mut second = Session::new(store_at("fallback"));
        second.initialize(Some("state=only"));
        assert!(second.is_authenticated());
        assert_eq!(second.credential(), Some("abc123"));
    }

    #[test]
    fn test_initialize_with_nothing_stays_unauthenticated() {
        let mut session = Session::new(temp_store("empty"));
        session.initialize(None);
        assert!(!session.is_authenticated());
        assert_eq!(session.credential(), None);
    }

    #[test]
    fn test_sign_out_clears_store_and_is_idempotent() {
        let mut session = Session::new(temp_store("signout"));
        session.initialize(Some("token=abc123"));
        assert!(session.is_authenticated());

        session.sign_out();
        assert!(!session.is_authenticated());
        assert_eq!(store_at("signout").load(), None);

        // Signing out again must not panic or change anything
        session.sign_out();
        assert!(!session.is_authenticated());
    }
}
