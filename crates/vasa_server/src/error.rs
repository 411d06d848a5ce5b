//! HTTP error mapping.
//!
//! | failure                         | status |
//! |---------------------------------|--------|
//! | unique constraint               | 409    |
//! | other constraint                | 400    |
//! | malformed body / query / path   | 400    |
//! | row not found                   | 404    |
//! | store unreachable               | 503    |
//! | anything else                   | 500    |
//!
//! Body: `{"error": <message>, "kind": <snake_case kind>}`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use vasa_core::{ConstraintKind, RepoError};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        let message = err.to_string();
        match &err {
            RepoError::Constraint(violation) => {
                let status = match violation.kind {
                    ConstraintKind::Unique => StatusCode::CONFLICT,
                    ConstraintKind::NotNull
                    | ConstraintKind::ForeignKey
                    | ConstraintKind::Check => StatusCode::BAD_REQUEST,
                };
                Self::new(status, violation.kind.as_str(), message)
            }
            RepoError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "not_found", message),
            RepoError::Db(_) if err.is_connectivity() => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", message)
            }
            RepoError::Db(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "db_error", message),
            RepoError::InvalidData(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "invalid_data", message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_media_type",
                rejection.body_text(),
            ),
            _ => Self::new(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_query", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_path", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                "event=http_error module=server status=error code={} kind={} error={}",
                self.status.as_u16(),
                self.kind,
                vasa_core::logging::sanitize_message(&self.message, 200)
            );
        } else {
            warn!(
                "event=http_error module=server status=rejected code={} kind={}",
                self.status.as_u16(),
                self.kind
            );
        }
        let body = Json(json!({ "error": self.message, "kind": self.kind }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use vasa_core::{ConstraintKind, ConstraintViolation, DbError, RepoError};

    fn violation(kind: ConstraintKind) -> RepoError {
        RepoError::Constraint(ConstraintViolation {
            kind,
            message: "constraint failed".to_string(),
        })
    }

    #[test]
    fn constraint_kinds_map_to_client_errors() {
        let unique = ApiError::from(violation(ConstraintKind::Unique));
        assert_eq!(unique.status(), StatusCode::CONFLICT);
        assert_eq!(unique.kind(), "unique");

        for kind in [
            ConstraintKind::NotNull,
            ConstraintKind::ForeignKey,
            ConstraintKind::Check,
        ] {
            let err = ApiError::from(violation(kind));
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
            assert_eq!(err.kind(), kind.as_str());
        }
    }

    #[test]
    fn not_found_and_schema_errors_map_to_status() {
        let missing = ApiError::from(RepoError::NotFound {
            entity: "offer",
            id: 3,
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let schema = ApiError::from(RepoError::Db(DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 5,
        }));
        assert_eq!(schema.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
