//! Request IDs.
//!
//! A caller-supplied `x-request-id` is echoed back when it is a short,
//! printable token. Anything else is replaced with a fresh UUID so the id
//! can always be written to the response header and the logs.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is accepted.
const MAX_REQUEST_ID_LEN: usize = 128;

pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_owned())
        .filter(|value| is_acceptable(value))
        .unwrap_or_else(generate_request_id)
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );
        }
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

fn generate_request_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_generated(id: &str) -> bool {
        Uuid::parse_str(id).is_ok_and(|uuid| uuid.get_version_num() == 7)
    }

    #[test]
    fn caller_id_is_trimmed_and_kept() {
        assert_eq!(
            resolve_request_id(Some("  checkout-42 ".to_string())),
            "checkout-42"
        );
    }

    #[test]
    fn missing_or_blank_id_is_generated() {
        assert!(is_generated(&resolve_request_id(None)));
        assert!(is_generated(&resolve_request_id(Some("   ".to_string()))));
    }

    #[test]
    fn unprintable_or_oversized_id_is_replaced() {
        let spaced = resolve_request_id(Some("two words".to_string()));
        let oversized = resolve_request_id(Some("x".repeat(MAX_REQUEST_ID_LEN + 1)));

        assert!(is_generated(&spaced), "got {spaced}");
        assert!(is_generated(&oversized), "got {oversized}");
    }

    #[test]
    fn header_is_written_to_response() {
        let mut res = Response::new();

        set_request_id_header(&mut res, "checkout-42");

        assert_eq!(
            res.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("checkout-42")
        );
    }

    #[test]
    fn unset_status_reads_as_ok() {
        assert_eq!(response_status_or_ok(None), StatusCode::OK);
        assert_eq!(
            response_status_or_ok(Some(StatusCode::NOT_FOUND)),
            StatusCode::NOT_FOUND
        );
    }
}
