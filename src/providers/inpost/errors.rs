//! ShipX error normalization
//!
//! Turns transport failures into the single `CourierError` attached to an
//! operation result.

use serde_json::Value;

use crate::domain::CourierError;
use crate::providers::http_client::TransportError;
use super::models::ApiErrorBody;

pub(crate) const INCORRECT_JSON: &str = "Json data response is incorrect";

/// Human readable message from a ShipX error body
///
/// Uses `message` (or `error`) and appends flattened `details` leaves as
/// `path: text` entries joined with `; `.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let parsed: ApiErrorBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            let raw = body.trim();
            return if raw.is_empty() {
                format!("HTTP {}", status)
            } else {
                raw.to_string()
            };
        }
    };

    let headline = parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or(parsed.error.filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| format!("HTTP {}", parsed.status.unwrap_or(status)));

    let mut details = Vec::new();
    if let Some(value) = &parsed.details {
        flatten_details("", value, &mut details);
    }

    if details.is_empty() {
        headline
    } else {
        format!("{} {}", headline, details.join("; "))
    }
}

fn flatten_details(path: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let next = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_details(&next, nested, out);
            }
        }
        // Arrays either list messages for `path` or wrap nested objects
        Value::Array(items) => {
            for item in items {
                flatten_details(path, item, out);
            }
        }
        Value::Null => {}
        leaf => {
            let text = match leaf {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if path.is_empty() {
                out.push(text);
            } else {
                out.push(format!("{}: {}", path, text));
            }
        }
    }
}

/// Map a transport failure to the error attached to a result
pub(crate) fn from_transport(err: TransportError) -> CourierError {
    match err {
        TransportError::Status { status, body } => CourierError::Transport {
            status,
            message: extract_error_message(status, &body),
        },
        TransportError::Network { message, code } => CourierError::Unexpected { message, code },
        TransportError::Io(e) => from_io(e),
    }
}

pub(crate) fn from_io(err: std::io::Error) -> CourierError {
    CourierError::Unexpected {
        code: err.raw_os_error().unwrap_or(0),
        message: err.to_string(),
    }
}

pub(crate) fn decode_error() -> CourierError {
    CourierError::Decode(INCORRECT_JSON.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn test_message_only() {
        let body = r#"{"status":404,"error":"resource_not_found","message":"Resource not found"}"#;
        assert_eq!(extract_error_message(404, body), "Resource not found");
    }

    #[test]
    fn test_message_with_details() {
        let body = r#"{
            "status": 400,
            "error": "validation_failed",
            "message": "There are some validation errors.",
            "details": {"receiver": [{"phone": ["invalid"]}], "service": ["required"]}
        }"#;

        assert_eq!(
            extract_error_message(400, body),
            "There are some validation errors. receiver.phone: invalid; service: required"
        );
    }

    #[test]
    fn test_falls_back_to_error_code() {
        let body = r#"{"status":401,"error":"token_invalid"}"#;
        assert_eq!(extract_error_message(401, body), "token_invalid");
    }

    #[test]
    fn test_non_json_body() {
        assert_eq!(extract_error_message(502, "  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(extract_error_message(500, ""), "HTTP 500");
        assert_eq!(extract_error_message(500, "{}"), "HTTP 500");
    }

    #[test]
    fn test_from_transport_kinds() {
        let status = from_transport(TransportError::Status {
            status: 404,
            body: r#"{"message":"Not found"}"#.to_string(),
        });
        assert_eq!(status.kind(), ErrorKind::Transport);
        assert_eq!(status.to_string(), "Not found");

        let network = from_transport(TransportError::Network {
            message: "connection refused".to_string(),
            code: 111,
        });
        assert_eq!(network, CourierError::Unexpected { message: "connection refused".to_string(), code: 111 });
    }
}
