//! App state - the UI-side state machine wrapped around a `Session`

use chrono::Local;

use crate::classify::RenderableViews;
use crate::config::Config;
use crate::environment::{DirEnvironmentSource, EnvironmentSource};
use crate::history::HistoryLog;
use crate::messages::ui_events::{Panel, ResponseTab};
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, Status};
use crate::models::{Environment, RequestDraft, RequestSnapshot, ResponseOutcome};
use crate::session::{PreparedSend, Session};
use crate::storage::CollectionStore;

/// Main application state - pure data apart from the environment and
/// collection collaborators it was handed
pub struct AppState {
    // Request draft
    pub draft: RequestDraft,

    // UI state
    pub active_panel: Panel,
    pub response_tab: ResponseTab,
    pub response_scroll: u16,
    pub selected_history: usize,

    // Response
    pub views: Option<RenderableViews>,
    pub failure: Option<String>,
    pub status: Status,
    pub next_request_id: u64,
    pending: Option<(u64, PreparedSend)>,

    // Engine
    pub session: Session,
    environments: Box<dyn EnvironmentSource + Send>,
    collections: CollectionStore,
}

impl AppState {
    pub fn new(
        environments: Box<dyn EnvironmentSource + Send>,
        collections: CollectionStore,
        history: HistoryLog,
    ) -> Self {
        let mut state = AppState {
            draft: RequestDraft::default(),
            active_panel: Panel::Url,
            response_tab: ResponseTab::Raw,
            response_scroll: 0,
            selected_history: 0,
            views: None,
            failure: None,
            status: Status::Idle,
            next_request_id: 1,
            pending: None,
            session: Session::new(Environment::default(), history),
            environments,
            collections,
        };

        // First listed environment is active at start
        if let Some(first) = state.environments.list_available().into_iter().next() {
            state.session.switch_environment(state.environments.as_ref(), &first);
        }
        state
    }

    /// Build the state from on-disk configuration, seeding a default
    /// environment when none exist yet
    pub fn from_config(config: &Config) -> Self {
        let source = DirEnvironmentSource::new(config.environments_dir());
        if let Err(e) = source.seed_default() {
            tracing::warn!(error = %e, "Could not seed default environment");
        }
        AppState::new(
            Box::new(source),
            CollectionStore::new(config.collections_dir()),
            HistoryLog::with_capacity(config.history_capacity),
        )
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.draft.url),
            Panel::Headers => Some(&mut self.draft.headers),
            Panel::Body => Some(&mut self.draft.body),
            Panel::Response | Panel::History => None,
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(input) = self.current_input_mut() {
            input.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.pop();
        }
    }

    pub fn newline(&mut self) {
        if matches!(self.active_panel, Panel::Headers | Panel::Body) {
            self.enter_char('\n');
        }
    }

    pub fn clear_input(&mut self) {
        if let Some(input) = self.current_input_mut() {
            input.clear();
        }
    }

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn cycle_method(&mut self) {
        self.draft.method = self.draft.method.next();
    }

    // ------------------------------------------------------------------
    // Environments
    // ------------------------------------------------------------------

    /// Activate the environment after the current one, wrapping around
    pub fn next_environment(&mut self) {
        let names = self.environments.list_available();
        if names.is_empty() {
            return;
        }
        let current = &self.session.environment().name;
        let next = names
            .iter()
            .position(|n| n == current)
            .map(|i| (i + 1) % names.len())
            .unwrap_or(0);
        self.session
            .switch_environment(self.environments.as_ref(), &names[next]);
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    /// Validate the draft and produce the network command.
    /// Refuses while a request is already in flight.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading() {
            tracing::debug!("Send ignored, request already in flight");
            return None;
        }

        match self.session.prepare(&self.draft) {
            Ok(prepared) => {
                let id = self.next_id();
                let request = prepared.descriptor.clone();
                self.pending = Some((id, prepared));
                self.status = Status::Sending;
                Some(NetworkCommand::Execute { id, request })
            }
            Err(e) => {
                self.status = Status::Rejected(e.to_string());
                None
            }
        }
    }

    /// Apply a network response; stale ids are ignored
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let NetworkResponse::Completed { id, outcome } = response;
        let prepared = match self.pending.take() {
            Some((pending_id, prepared)) if pending_id == id => prepared,
            other => {
                tracing::debug!(id, "Ignoring response for unknown request");
                self.pending = other;
                return;
            }
        };

        self.status = match &outcome {
            ResponseOutcome::Success(s) => Status::Completed {
                status: s.status,
                elapsed_ms: s.elapsed_ms,
            },
            ResponseOutcome::Failure { .. } => Status::Failed,
        };

        let report = self.session.complete(&prepared, outcome);
        self.failure = match report.outcome {
            ResponseOutcome::Failure { message } => Some(message),
            ResponseOutcome::Success(_) => None,
        };
        self.views = report.views;
        self.response_scroll = 0;
        self.selected_history = 0;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn history_up(&mut self) {
        self.selected_history = self.selected_history.saturating_sub(1);
    }

    pub fn history_down(&mut self) {
        let len = self.session.history().len();
        if self.selected_history + 1 < len {
            self.selected_history += 1;
        }
    }

    /// Load the selected history entry into the draft and send it
    pub fn replay_selected(&mut self) -> Option<NetworkCommand> {
        if self.is_loading() {
            return None;
        }
        let draft = self.session.replay_draft(self.selected_history, &self.draft)?;
        self.draft = draft;
        self.prepare_request()
    }

    // ------------------------------------------------------------------
    // Response views
    // ------------------------------------------------------------------

    pub fn select_response_tab(&mut self, tab: ResponseTab) {
        self.response_tab = tab;
        self.response_scroll = 0;
    }

    pub fn next_response_tab(&mut self) {
        self.select_response_tab(self.response_tab.next());
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    pub fn save_to_collection(&mut self) {
        let snapshot = RequestSnapshot::from_draft(&self.draft, Local::now());
        self.status = match self.collections.save(&snapshot, None) {
            Ok(path) => Status::Saved(path),
            Err(e) => {
                tracing::warn!(error = %e, "Saving request failed");
                Status::Error(format!("Save failed: {:#}", e))
            }
        };
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            method: self.draft.method,
            url: self.draft.url.clone(),
            headers: self.draft.headers.clone(),
            body: self.draft.body.clone(),
            active_panel: self.active_panel,
            response_tab: self.response_tab,
            response_scroll: self.response_scroll,
            views: self.views.clone(),
            failure: self.failure.clone(),
            is_loading: self.is_loading(),
            status: self.status.clone(),
            environment: self.session.environment().name.clone(),
            history: self.session.history().list().cloned().collect(),
            selected_history: self.selected_history,
        }
    }
}
