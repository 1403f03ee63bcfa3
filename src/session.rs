//! Engine session - active environment plus history, and the send turn
//!
//! A send is one logical turn: compose, execute, record. `prepare` and
//! `complete` expose the two halves so an actor can run the network call
//! elsewhere; `send` does the whole turn in place.

use crate::classify::{classify, RenderableViews};
use crate::composer::compose;
use crate::environment::{EnvironmentSource, EnvironmentStore};
use crate::error::ValidationError;
use crate::history::HistoryLog;
use crate::models::{Environment, RequestDescriptor, RequestDraft, ResponseOutcome};
use crate::network::Transport;

/// A validated request waiting for its network call
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedSend {
    pub descriptor: RequestDescriptor,
    /// URL as typed, which is what history keeps
    pub original_url: String,
}

/// Everything the UI needs after a send finished
#[derive(Clone, Debug, PartialEq)]
pub struct SendReport {
    pub outcome: ResponseOutcome,
    /// Present for a `Success` outcome only
    pub views: Option<RenderableViews>,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    environment: EnvironmentStore,
    history: HistoryLog,
}

impl Session {
    pub fn new(environment: Environment, history: HistoryLog) -> Self {
        Session {
            environment: EnvironmentStore::new(environment),
            history,
        }
    }

    pub fn environment(&self) -> &Environment {
        self.environment.active()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Replace the active environment with the named one
    pub fn switch_environment(&mut self, source: &dyn EnvironmentSource, name: &str) -> &Environment {
        self.environment.switch(source, name)
    }

    /// Validate and resolve a draft. Nothing is recorded on failure.
    pub fn prepare(&self, draft: &RequestDraft) -> Result<PreparedSend, ValidationError> {
        let descriptor = compose(draft, self.environment.active()).map_err(|e| {
            tracing::info!(error = %e, "Request rejected before sending");
            e
        })?;

        Ok(PreparedSend {
            descriptor,
            original_url: draft.url.trim().to_string(),
        })
    }

    /// Record the attempt and build the response views
    pub fn complete(&mut self, prepared: &PreparedSend, outcome: ResponseOutcome) -> SendReport {
        self.history
            .record(prepared.descriptor.method, prepared.original_url.clone());

        let views = match &outcome {
            ResponseOutcome::Success(success) => Some(classify(success)),
            ResponseOutcome::Failure { .. } => None,
        };
        SendReport { outcome, views }
    }

    /// Compose, execute and record in one turn
    pub async fn send<T: Transport>(
        &mut self,
        transport: &T,
        draft: &RequestDraft,
    ) -> Result<SendReport, ValidationError> {
        let prepared = self.prepare(draft)?;
        let outcome = transport.execute(&prepared.descriptor).await;
        Ok(self.complete(&prepared, outcome))
    }

    /// Draft for re-sending a history entry; `None` when out of range.
    /// Header and body text are taken from `current`.
    pub fn replay_draft(&self, index: usize, current: &RequestDraft) -> Option<RequestDraft> {
        self.history.get(index).map(|entry| RequestDraft {
            method: entry.method,
            url: entry.original_url.clone(),
            headers: current.headers.clone(),
            body: current.body.clone(),
        })
    }

    /// Look up a history entry and send it again
    pub async fn replay<T: Transport>(
        &mut self,
        transport: &T,
        index: usize,
        current: &RequestDraft,
    ) -> Option<Result<SendReport, ValidationError>> {
        let draft = self.replay_draft(index, current)?;
        Some(self.send(transport, &draft).await)
    }
}
