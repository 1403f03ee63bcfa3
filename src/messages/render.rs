//! Render state - data structure sent from App layer to UI for rendering

use std::path::PathBuf;

use crate::classify::RenderableViews;
use crate::messages::ui_events::{Panel, ResponseTab};
use crate::models::{HistoryEntry, HttpMethod};

/// What the status bar should say
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    Sending,
    Completed { status: u16, elapsed_ms: f64 },
    Failed,
    Rejected(String),
    Saved(PathBuf),
    Error(String),
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Request draft
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,

    // UI state
    pub active_panel: Panel,
    pub response_tab: ResponseTab,
    pub response_scroll: u16,

    // Response
    pub views: Option<RenderableViews>,
    pub failure: Option<String>,
    pub is_loading: bool,
    pub status: Status,

    // Environment
    pub environment: String,

    // History
    pub history: Vec<HistoryEntry>,
    pub selected_history: usize,
}

impl RenderState {
    /// Text of the selected response tab
    pub fn response_text(&self) -> &str {
        if let Some(message) = &self.failure {
            return match self.response_tab {
                ResponseTab::Raw => message.as_str(),
                _ => "",
            };
        }
        match &self.views {
            Some(views) => match self.response_tab {
                ResponseTab::Raw => views.raw.as_str(),
                ResponseTab::Json => views.structured.as_str(),
                ResponseTab::Headers => views.headers.as_str(),
            },
            None => "",
        }
    }
}
