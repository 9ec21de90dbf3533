use reqwest::StatusCode;
use thiserror::Error;

/// Message used when PowerDNS answers with an error but no `error` field.
pub const DEFAULT_UPSTREAM_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum PdnsError {
    /// 409 from PowerDNS, e.g. the zone already exists.
    #[error("{0}")]
    Conflict(String),

    /// 404 from PowerDNS.
    #[error("{0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// No response at all: connect failure, timeout, reset.
    #[error("PowerDNS unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server or zone id that cannot stand as one URL path segment.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// Success status but a body we could not decode.
    #[error("unexpected response from PowerDNS: {0}")]
    InvalidResponse(#[source] reqwest::Error),
}

impl PdnsError {
    /// Classify a non-success response by status and upstream message.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string());
        match status {
            StatusCode::NOT_FOUND => PdnsError::NotFound(message),
            StatusCode::CONFLICT => PdnsError::Conflict(message),
            _ => PdnsError::Upstream { status, message },
        }
    }

    /// Status to report downstream for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            PdnsError::Conflict(_) => StatusCode::CONFLICT,
            PdnsError::NotFound(_) => StatusCode::NOT_FOUND,
            PdnsError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            PdnsError::Upstream { status, .. }
                if status.is_client_error() || status.is_server_error() =>
            {
                *status
            }
            PdnsError::Upstream { .. } | PdnsError::Transport(_) | PdnsError::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        let err = PdnsError::from_status(StatusCode::CONFLICT, Some("Domain 'a.' exists".into()));
        assert!(matches!(err, PdnsError::Conflict(ref m) if m == "Domain 'a.' exists"));

        let err = PdnsError::from_status(StatusCode::NOT_FOUND, None);
        assert!(matches!(err, PdnsError::NotFound(ref m) if m == DEFAULT_UPSTREAM_MESSAGE));

        let err = PdnsError::from_status(StatusCode::UNPROCESSABLE_ENTITY, Some("  ".into()));
        assert_eq!(err.to_string(), DEFAULT_UPSTREAM_MESSAGE);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn redirects_map_to_bad_gateway() {
        let err = PdnsError::from_status(StatusCode::MOVED_PERMANENTLY, None);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
