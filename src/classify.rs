//! Response classification into raw, structured and header views

use serde_json::Value;

use crate::constants::NOT_JSON_PLACEHOLDER;
use crate::headers::format_headers;
use crate::models::HttpSuccess;
use crate::storage::to_pretty_json;

/// The three renderings of a response body
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderableViews {
    pub raw: String,
    pub structured: String,
    pub headers: String,
}

/// Parse a body as JSON, `None` when it is not
pub fn parse_structured(raw_body: &str) -> Option<Value> {
    serde_json::from_str(raw_body).ok()
}

/// Build every view of a response. Never fails: a body that is not JSON
/// gets the `(Not JSON)` placeholder in the structured view.
pub fn classify(success: &HttpSuccess) -> RenderableViews {
    let structured = success
        .structured
        .clone()
        .or_else(|| parse_structured(&success.raw_body));

    let structured = structured
        .and_then(|value| to_pretty_json(&value).ok())
        .unwrap_or_else(|| NOT_JSON_PLACEHOLDER.to_string());

    RenderableViews {
        raw: success.raw_body.clone(),
        structured,
        headers: format_headers(&success.headers),
    }
}
