//! Persistent storage for the bearer credential.
//!
//! One value under one fixed key: the raw token string lives in a single
//! file inside the application data directory. Storage failures are never
//! surfaced to callers — a store that cannot be read simply means "no
//! credential", and the session falls back to unauthenticated.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Fixed storage key; the credential is the only value mailbrief persists.
const TOKEN_KEY: &str = "access_token";

/// Query parameter the identity provider puts on the redirect link.
const TOKEN_PARAM: &str = "token";

pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Extract the bearer token from a sign-in redirect location.
    ///
    /// Accepts a full URL, a `?`-prefixed query, or a bare query string.
    /// An empty `token` value counts as absent.
    pub fn capture_from_location(location: &str) -> Option<String> {
        let query = match location.split_once('?') {
            Some((_, q)) => q,
            None => location.trim_start_matches('?'),
        };

        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == TOKEN_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|token| !token.is_empty())
    }

    /// Read the persisted credential, if any. Fails open: an unreadable
    /// store is reported as no credential.
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(self.token_path()) {
            Ok(token) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "No stored credential");
                None
            }
        }
    }

    /// Persist the credential, overwriting any prior value. Best effort.
    pub fn save(&self, credential: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!(error = %e, "Failed to create credential directory");
            return;
        }
        if let Err(e) = std::fs::write(self.token_path(), credential) {
            warn!(error = %e, "Failed to persist credential");
        }
    }

    /// Remove the persisted credential. Best effort; removing an absent
    /// credential is not an error.
    pub fn clear(&self) {
        let path = self.token_path();
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(error = %e, "Failed to remove credential");
            }
        }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> CredentialStore {
        let dir = std::env::temp_dir().join(format!(
            "mailbrief-credentials-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        CredentialStore::new(dir)
    }

    #[test]
    fn test_capture_from_bare_query() {
        assert_eq!(
            CredentialStore::capture_from_location("token=abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            CredentialStore::capture_from_location("?token=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_capture_from_full_url() {
        assert_eq!(
            CredentialStore::capture_from_location("http://localhost:3000/?token=abc123&state=x"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_capture_decodes_percent_encoding() {
        assert_eq!(
            CredentialStore::capture_from_location("token=a%2Bb"),
            Some("a+b".to_string())
        );
    }

    #[test]
    fn test_capture_absent_or_empty_token() {
        assert_eq!(CredentialStore::capture_from_location(""), None);
        assert_eq!(CredentialStore::capture_from_location("state=x"), None);
        assert_eq!(CredentialStore::capture_from_location("token="), None);
        assert_eq!(
            CredentialStore::capture_from_location("http://localhost:3000/"),
            None
        );
    }

    #[test]
    fn test_save_load_clear_round_trip() {
        let store = temp_store("round-trip");
        assert_eq!(store.load(), None);

        store.save("tok-1");
        assert_eq!(store.load(), Some("tok-1".to_string()));

        // Overwrites the prior value
        store.save("tok-2");
        assert_eq!(store.load(), Some("tok-2".to_string()));

        store.clear();
        assert_eq!(store.load(), None);

        // Clearing again is a no-op
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_unusable_storage_fails_open() {
        // Point the store below a plain file so directory creation fails
        let blocker = std::env::temp_dir().join(format!(
            "mailbrief-credentials-blocker-{}",
            std::process::id()
        ));
        std::fs::write(&blocker, b"x").expect("failed to create blocker file");

        let store = CredentialStore::new(blocker.join("nested"));
        store.save("tok");
        assert_eq!(store.load(), None);
        store.clear();
    }
}
