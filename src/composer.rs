//! Turns a raw draft into a wire-ready request descriptor

use crate::error::ValidationError;
use crate::headers::parse_headers;
use crate::models::{Environment, RequestDescriptor, RequestDraft};

/// Validate a draft and resolve it against `env`.
///
/// The URL is trimmed and substituted, header text is parsed, and for
/// body-bearing methods a non-empty body must be valid JSON. GET and DELETE
/// never carry a body.
pub fn compose(draft: &RequestDraft, env: &Environment) -> Result<RequestDescriptor, ValidationError> {
    let raw_url = draft.url.trim();
    if raw_url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let url = env.substitute(raw_url);
    let headers = parse_headers(&draft.headers);

    let raw_body = draft.body.trim();
    let body = if draft.method.has_body() && !raw_body.is_empty() {
        let value = serde_json::from_str(raw_body)
            .map_err(|e| ValidationError::InvalidJsonBody(e.to_string()))?;
        Some(value)
    } else {
        None
    };

    Ok(RequestDescriptor {
        method: draft.method,
        url,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Header, HttpMethod};
    use serde_json::json;

    #[test]
    fn test_invalid_json_body() {
        let draft = RequestDraft::new(HttpMethod::POST, "http://x").body("not json");
        let err = compose(&draft, &Environment::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidJsonBody(_)));
    }

    #[test]
    fn test_empty_url() {
        let env = Environment::default();
        assert_eq!(
            compose(&RequestDraft::new(HttpMethod::GET, ""), &env),
            Err(ValidationError::EmptyUrl)
        );
        assert_eq!(
            compose(&RequestDraft::new(HttpMethod::POST, "  \t "), &env),
            Err(ValidationError::EmptyUrl)
        );
    }

    #[test]
    fn test_url_substitution() {
        let env = Environment::new("dev").with_var("id", "7");
        let req = compose(&RequestDraft::new(HttpMethod::GET, "http://x/{{id}}"), &env).unwrap();
        assert_eq!(req.url, "http://x/7");
        assert_eq!(req.body, None);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_url_is_trimmed() {
        let req = compose(
            &RequestDraft::new(HttpMethod::GET, "  http://x/a \n"),
            &Environment::default(),
        )
        .unwrap();
        assert_eq!(req.url, "http://x/a");
    }

    #[test]
    fn test_body_parsed_for_body_methods() {
        for method in [HttpMethod::POST, HttpMethod::PUT, HttpMethod::PATCH] {
            let draft = RequestDraft::new(method, "http://x")
                .headers("Accept: application/json\nX-Trace: 1")
                .body(" {\"b\": 1, \"a\": [true, null]} ");
            let req = compose(&draft, &Environment::default()).unwrap();
            assert_eq!(req.body, Some(json!({"b": 1, "a": [true, null]})));
            assert_eq!(
                req.headers,
                vec![Header::new("Accept", "application/json"), Header::new("X-Trace", "1")]
            );
        }
    }

    #[test]
    fn test_body_ignored_for_get_and_delete() {
        for method in [HttpMethod::GET, HttpMethod::DELETE] {
            let draft = RequestDraft::new(method, "http://x").body("not json at all");
            let req = compose(&draft, &Environment::default()).unwrap();
            assert_eq!(req.body, None);
        }
    }

    #[test]
    fn test_blank_body_is_absent() {
        let draft = RequestDraft::new(HttpMethod::POST, "http://x").body("  \n ");
        let req = compose(&draft, &Environment::default()).unwrap();
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_body_is_not_substituted() {
        let env = Environment::new("dev").with_var("id", "7");
        let draft = RequestDraft::new(HttpMethod::POST, "http://x").body(r#"{"id": "{{id}}"}"#);
        let req = compose(&draft, &env).unwrap();
        assert_eq!(req.body, Some(json!({"id": "{{id}}"})));
    }
}
