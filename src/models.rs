use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::GET,
        HttpMethod::POST,
        HttpMethod::PUT,
        HttpMethod::DELETE,
        HttpMethod::PATCH,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::GET,
        }
    }

    /// Methods that carry a JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown HTTP method: {}", s))
    }
}

/// HTTP Header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered header list; duplicate keys are kept as separate entries
pub type HeaderSet = Vec<Header>;

/// Named set of variables used for `{{key}}` templating
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub variables: HashMap<String, String>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Environment {
            name: name.into(),
            variables: HashMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and seeding
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Substitutes `{{variable}}` patterns in text.
    ///
    /// The template is scanned once from left to right, so a value that itself
    /// contains `{{...}}` is copied through untouched. At each `{{` the closing
    /// `}}` candidates are tried nearest first and the first one naming a known
    /// variable wins, which lets keys contain `}`. Tokens naming unknown
    /// variables stay in the output verbatim.
    pub fn substitute(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let inner = &rest[open + 2..];

            let hit = inner
                .char_indices()
                .filter(|(i, _)| inner[*i..].starts_with("}}"))
                .find_map(|(close, _)| {
                    self.variables
                        .get(&inner[..close])
                        .map(|value| (close, value))
                });

            match hit {
                Some((close, value)) => {
                    result.push_str(value);
                    rest = &inner[close + 2..];
                }
                None => {
                    // Step over a single brace so `{{{{key}}` still finds `{{key}}`
                    result.push('{');
                    rest = &rest[open + 1..];
                }
            }
        }

        result.push_str(rest);
        result
    }
}

/// Raw, user-typed request fields before any processing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDraft {
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,
}

impl RequestDraft {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        RequestDraft {
            method,
            url: url.into(),
            headers: String::new(),
            body: String::new(),
        }
    }

    pub fn headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A fully resolved request, ready to go on the wire
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderSet,
    pub body: Option<serde_json::Value>,
}

/// A response that made it back from the server, whatever its status
#[derive(Clone, Debug, PartialEq)]
pub struct HttpSuccess {
    pub status: u16,
    pub elapsed_ms: f64,
    pub raw_body: String,
    pub headers: HeaderSet,
    /// Parsed body, present only when `raw_body` is valid JSON
    pub structured: Option<serde_json::Value>,
}

/// Result of one network call
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseOutcome {
    Success(HttpSuccess),
    Failure { message: String },
}

impl ResponseOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        ResponseOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success(_))
    }
}

/// History entry
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub method: HttpMethod,
    /// URL as typed, before environment substitution
    pub original_url: String,
    pub timestamp: DateTime<Local>,
}

/// What gets written when a request is saved to a collection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,
    pub timestamp: String,
}

impl RequestSnapshot {
    /// Snapshot a draft as typed (trimmed, not substituted)
    pub fn from_draft(draft: &RequestDraft, now: DateTime<Local>) -> Self {
        RequestSnapshot {
            method: draft.method,
            url: draft.url.clone(),
            headers: draft.headers.trim().to_string(),
            body: draft.body.trim().to_string(),
            timestamp: now.format("%H:%M:%S").to_string(),
        }
    }
}
