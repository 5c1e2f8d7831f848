//! Error taxonomy for every call the frontend makes to the backend.
//!
//! - `Validation`: caught before any request is sent, shown inline
//! - `Rejected`: the backend answered non-2xx; the message comes from the
//!   response body `detail` field (a string, or a list of field errors)
//! - `Network` / `Decode`: transport failures, shown with a generic prefix

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message shown when the backend rejects a request without a usable body.
pub const MENSAJE_GENERICO: &str = "Ocurrió un error inesperado. Intente de nuevo.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Error de red: {0}")]
    Network(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a `Rejected` error from a non-2xx status and the raw body text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_detail(body).unwrap_or_else(|| match status {
            401 | 403 => "No tiene permisos para realizar esta operación".to_string(),
            404 => "Recurso no encontrado".to_string(),
            _ => format!("{} (HTTP {})", MENSAJE_GENERICO, status),
        });
        ApiError::Rejected { status, message }
    }

    /// Text suitable for an alert or a message bar.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 404, .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
    error: Option<String>,
    message: Option<String>,
}

/// Pull a human readable message out of an error response body.
///
/// `detail` may be a plain string or a list of `{ loc: [...], msg }` entries;
/// the list form is rendered as `campo.ruta: mensaje` joined by `; `, with the
/// leading `body`/`query`/`path` location segment dropped.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    if let Some(detail) = parsed.detail {
        match detail {
            Value::String(s) if !s.trim().is_empty() => return Some(s),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().filter_map(render_field_error).collect();
                if !parts.is_empty() {
                    return Some(parts.join("; "));
                }
            }
            Value::Object(_) => {
                if let Some(msg) = render_field_error(&detail) {
                    return Some(msg);
                }
            }
            _ => {}
        }
    }

    parsed
        .error
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
}

fn render_field_error(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let msg = map.get("msg").and_then(Value::as_str)?;
            let path: Vec<String> = map
                .get("loc")
                .and_then(Value::as_array)
                .map(|loc| {
                    loc.iter()
                        .enumerate()
                        .filter(|(i, seg)| {
                            !(*i == 0
                                && matches!(seg.as_str(), Some("body" | "query" | "path")))
                        })
                        .map(|(_, seg)| match seg {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            if path.is_empty() {
                Some(msg.to_string())
            } else {
                Some(format!("{}: {}", path.join("."), msg))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let body = r#"{"detail": "El documento no está balanceado"}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("El documento no está balanceado")
        );
    }

    #[test]
    fn test_detail_field_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "movimientos", 0, "cuenta_id"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "fecha"], "msg": "invalid date"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("movimientos.0.cuenta_id: field required; fecha: invalid date")
        );
    }

    #[test]
    fn test_fallback_error_field() {
        assert_eq!(
            extract_detail(r#"{"error": "duplicado"}"#).as_deref(),
            Some("duplicado")
        );
        assert_eq!(extract_detail("<html>502</html>"), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn test_from_response_uses_generic_message() {
        let err = ApiError::from_response(500, "Internal Server Error");
        match &err {
            ApiError::Rejected { status, message } => {
                assert_eq!(*status, 500);
                assert!(message.starts_with(MENSAJE_GENERICO));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(ApiError::from_response(404, "").is_not_found());
    }

    #[test]
    fn test_rejected_display_is_detail() {
        let err = ApiError::from_response(422, r#"{"detail": "Tercero inactivo"}"#);
        assert_eq!(err.user_message(), "Tercero inactivo");
    }
}
