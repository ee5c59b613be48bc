use serde::de::DeserializeOwned;

use crate::models::ErrorBody;

pub const STATUS_OK: u16 = 200;
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Shown when a rejected response carries no usable message
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Normalized result of one call against the talent API
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// HTTP 200 with a decodable body
    Ok(T),
    /// Any status other than 200 and 401
    Rejected { status: u16, message: String },
    /// HTTP 401, the session has expired
    Unauthorized,
    /// The call never produced a usable response
    TransportFailure(String),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Rejected { status, message } => Outcome::Rejected { status, message },
            Outcome::Unauthorized => Outcome::Unauthorized,
            Outcome::TransportFailure(reason) => Outcome::TransportFailure(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }
}

/// Turn a raw status and body into an [`Outcome`]
pub fn classify<T: DeserializeOwned>(status: u16, body: &[u8]) -> Outcome<T> {
    match status {
        STATUS_OK => match serde_json::from_slice(body) {
            Ok(value) => Outcome::Ok(value),
            Err(e) => Outcome::TransportFailure(format!("Malformed response body: {}", e)),
        },
        STATUS_UNAUTHORIZED => Outcome::Unauthorized,
        _ => Outcome::Rejected {
            status,
            message: rejection_message(body),
        },
    }
}

fn rejection_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::models::SearchResponse;

    #[test]
    fn test_ok_decodes_body() {
        let body = br#"{"results": [], "remainingFreeSearches": 7}"#;

        let outcome: Outcome<SearchResponse> = classify(200, body);

        match outcome {
            Outcome::Ok(response) => assert_eq!(response.remaining_free_searches, 7),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_malformed_success_is_transport_failure() {
        let outcome: Outcome<SearchResponse> = classify(200, b"<html>");

        assert!(matches!(outcome, Outcome::TransportFailure(_)));
    }

    #[test]
    fn test_unauthorized_ignores_body() {
        let outcome: Outcome<SearchResponse> = classify(401, br#"{"error": "expired"}"#);

        assert_eq!(outcome, Outcome::Unauthorized);
    }

    #[test]
    fn test_rejected_prefers_error_field() {
        let outcome: Outcome<SearchResponse> = classify(
            403,
            br#"{"error": "Daily limit reached", "message": "ignored"}"#,
        );

        assert_eq!(
            outcome,
            Outcome::Rejected {
                status: 403,
                message: "Daily limit reached".to_string()
            }
        );
    }

    #[test]
    fn test_rejected_falls_back_to_message_field() {
        let outcome: Outcome<SearchResponse> = classify(500, br#"{"message": "db down"}"#);

        assert_eq!(
            outcome,
            Outcome::Rejected {
                status: 500,
                message: "db down".to_string()
            }
        );
    }

    #[test]
    fn test_rejected_without_message_uses_generic_text() {
        let outcome: Outcome<SearchResponse> = classify(502, b"Bad Gateway");

        assert_eq!(
            outcome,
            Outcome::Rejected {
                status: 502,
                message: GENERIC_FAILURE.to_string()
            }
        );
    }

    #[test]
    fn test_other_success_codes_are_rejected() {
        let outcome: Outcome<SearchResponse> = classify(204, b"");

        assert!(matches!(outcome, Outcome::Rejected { status: 204, .. }));
    }
}
