//! Application state management for mailbrief.
//!
//! The `App` struct owns the session, the fetched summary list, and the
//! background-fetch plumbing. All state mutation happens on the UI loop;
//! the in-flight request reports back through an MPSC channel.

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::ApiClient;
use crate::auth::{CredentialStore, Session};
use crate::config::Config;
use crate::models::EmailSummary;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the fetch result channel.
/// One fetch is outstanding at a time in practice; 8 leaves headroom for
/// rapid re-triggering.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Fallback storage directory when the platform data dir is unavailable
const FALLBACK_DATA_DIR: &str = ".mailbrief";

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
}

// ============================================================================
// Background Fetch Results
// ============================================================================

/// Result of a background summaries fetch, tagged with the epoch of the
/// request that produced it. Only current-epoch results are applied; a
/// sign-out or a newer fetch bumps the epoch and strands older responses.
enum FetchResult {
    /// The summaries request succeeded
    Summaries { epoch: u64, emails: Vec<EmailSummary> },
    /// The summaries request failed; the user-facing message
    Failed { epoch: u64, message: String },
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub session: Session,
    pub api: ApiClient,

    // UI state
    pub state: AppState,
    pub emails: Vec<EmailSummary>,
    pub loading: bool,
    pub selection: usize,
    pub status_message: Option<String>,
    pub last_error: Option<String>,

    // Background fetch plumbing
    fetch_epoch: u64,
    fetch_tx: mpsc::Sender<FetchResult>,
    fetch_rx: mpsc::Receiver<FetchResult>,
}

impl App {
    /// Create the app and initialize the session from an optional sign-in
    /// redirect location (the launch argument).
    pub fn new(startup_location: Option<&str>) -> Result<Self> {
        let config = Config::load()?;

        let data_dir = config
            .data_dir()
            .unwrap_or_else(|_| PathBuf::from(FALLBACK_DATA_DIR));
        let store = CredentialStore::new(data_dir);

        let mut session = Session::new(store);
        session.initialize(startup_location);

        let api = ApiClient::new(config.api_origin())?;

        Ok(Self::from_parts(session, api))
    }

    /// Assemble an app from already-built services.
    pub(crate) fn from_parts(session: Session, mut api: ApiClient) -> Self {
        if let Some(token) = session.credential() {
            api.set_token(token.to_string());
        }

        let (fetch_tx, fetch_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            session,
            api,

            state: AppState::Normal,
            emails: Vec::new(),
            loading: false,
            selection: 0,
            status_message: None,
            last_error: None,

            fetch_epoch: 0,
            fetch_tx,
            fetch_rx,
        }
    }

    // =========================================================================
    // Session Actions
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Send the user to the identity provider.
    ///
    /// No local state changes here: the credential arrives via the redirect
    /// link on the next start. Calling while signed in is a no-op.
    pub fn login(&mut self) {
        if self.is_authenticated() {
            self.status_message = Some("Already signed in".to_string());
            return;
        }

        let url = self.api.auth_url();
        info!(url = %url, "Opening browser for sign-in");

        match open::that(&url) {
            Ok(()) => {
                self.status_message = Some(
                    "Finish sign-in in your browser, then restart mailbrief with the redirect link"
                        .to_string(),
                );
            }
            Err(e) => {
                warn!(error = %e, "Failed to open browser");
                self.status_message = Some(format!("Could not open a browser - visit {}", url));
            }
        }
    }

    /// Drop the credential and everything derived from it. Idempotent.
    ///
    /// Bumping the fetch epoch strands any in-flight response so a late
    /// arrival cannot repopulate the list after sign-out.
    pub fn sign_out(&mut self) {
        if !self.is_authenticated() {
            return;
        }

        self.session.sign_out();
        self.api.clear_token();
        self.emails.clear();
        self.selection = 0;
        self.fetch_epoch += 1;
        self.loading = false;
        self.last_error = None;
        self.status_message = Some("Signed out".to_string());
    }

    // =========================================================================
    // Summaries Fetch
    // =========================================================================

    /// Start an authenticated summaries fetch in the background.
    ///
    /// A second call while one is in flight is allowed; the epoch tag makes
    /// the newest request the only one whose result applies.
    pub fn fetch_summaries(&mut self) {
        if !self.is_authenticated() {
            self.status_message = Some("Sign in to fetch summaries".to_string());
            return;
        }

        let epoch = self.begin_fetch();
        let api = self.api.clone();
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            let result = match api.fetch_summaries().await {
                Ok(emails) => FetchResult::Summaries { epoch, emails },
                Err(e) => {
                    error!(error = %e, "Summaries fetch failed");
                    FetchResult::Failed {
                        epoch,
                        message: format!("Failed to fetch summaries: {}", e),
                    }
                }
            };

            if tx.send(result).await.is_err() {
                error!("Failed to send fetch result - channel closed");
            }
        });
    }

    /// Mark a new fetch as the current one and raise the loading flag.
    /// Returns the epoch the spawned request must tag its result with.
    fn begin_fetch(&mut self) -> u64 {
        self.fetch_epoch += 1;
        self.loading = true;
        self.status_message = Some("Loading summaries...".to_string());
        self.fetch_epoch
    }

    /// Drain and apply completed background fetches
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.fetch_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.apply_fetch_result(result);
        }
    }

    /// Apply one fetch result, guarding against responses that arrive after
    /// sign-out or after a newer fetch superseded them.
    fn apply_fetch_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Summaries { epoch, emails } => {
                if epoch != self.fetch_epoch {
                    debug!("Discarding superseded fetch result");
                    return;
                }
                self.loading = false;

                if !self.is_authenticated() {
                    debug!("Discarding fetch result that arrived after sign-out");
                    return;
                }

                self.status_message = Some(format!("{} summaries", emails.len()));
                self.last_error = None;
                self.emails = emails;
                self.selection = self.selection.min(self.emails.len().saturating_sub(1));
            }
            FetchResult::Failed { epoch, message } => {
                if epoch != self.fetch_epoch {
                    debug!("Discarding superseded fetch failure");
                    return;
                }
                self.loading = false;
                // The current list stays as it was
                self.status_message = None;
                self.last_error = Some(message);
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_next(&mut self) {
        if !self.emails.is_empty() {
            self.selection = (self.selection + 1).min(self.emails.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    pub fn selected_email(&self) -> Option<&EmailSummary> {
        self.emails.get(self.selection)
    }
}
