use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// One failed constraint on one field, as reported to the client.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Every failure an operation can surface, mapped to one status each.
///
/// Infrastructure variants carry the source error for the server-side log;
/// the client body never does.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<Violation>),
    #[error("{0} already exists")]
    DuplicateKey(&'static str),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("store timed out")]
    Timeout,
    #[error("password hashing failed")]
    Hashing(#[source] anyhow::Error),
    #[error("storage failure")]
    Storage(#[source] sqlx::Error),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<&'a [Violation]>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed".to_string()),
            ApiError::DuplicateKey(field) => {
                (StatusCode::CONFLICT, format!("{field} already exists"))
            }
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, (*reason).to_string()),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ApiError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "Store timed out".to_string()),
            ApiError::Hashing(e) => {
                error!(error = %e, "hashing failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            ApiError::Storage(e) => {
                error!(error = %e, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        let violations = match &self {
            ApiError::Validation(v) => Some(v.as_slice()),
            _ => None,
        };

        (
            status,
            Json(ErrorBody {
                message: &message,
                violations,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut => ApiError::Timeout,
            sqlx::Error::Database(db) if db.is_unique_violation() => match db.constraint() {
                Some("users_email_key") => ApiError::DuplicateKey("Email"),
                Some("users_username_key") => ApiError::DuplicateKey("Username"),
                _ => ApiError::DuplicateKey("Resource"),
            },
            // A vanished owner surfaces as the FK violation on page_items.
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ApiError::NotFound("User")
            }
            _ => ApiError::Storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_taxonomy() {
        let cases = [
            (
                ApiError::Validation(vec![Violation {
                    field: "username",
                    message: "username must be 3-20 characters".into(),
                }]),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::DuplicateKey("Email"), StatusCode::CONFLICT),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                ApiError::Unauthorized("Invalid token"),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::NotFound("User"), StatusCode::NOT_FOUND),
            (ApiError::Timeout, StatusCode::GATEWAY_TIMEOUT),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn infrastructure_errors_do_not_leak_details() {
        let err = ApiError::Internal(anyhow::anyhow!("connection refused on 10.0.0.3"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn pool_timeout_maps_to_timeout() {
        let err = ApiError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ApiError::Timeout));
    }

    #[test]
    fn row_not_found_stays_a_storage_error() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Storage(_)));
    }
}
