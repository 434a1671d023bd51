use axum::{
    response::{IntoResponse, Response, Redirect},
    http::StatusCode,
};
use urlencoding;
use crate::errors::{AppError, LedgerError};

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors redirect to login
            AppError::Auth(msg) => redirect_with_error("/", &msg),

            AppError::Ledger(err) => convert_ledger_error(err),

            AppError::Session(e) => {
                tracing::error!("Session error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Session error: {}", e)
                ).into_response()
            }

            AppError::Input(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input: {}", msg)
            ).into_response(),

            AppError::File(e) => {
                tracing::error!("File error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("File error: {}", e)
                ).into_response()
            }

            AppError::Chart(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Chart error: {}", msg)
            ).into_response(),
        }
    }
}

// Ledger failures go back to the page the user acted on, with the message attached.
fn convert_ledger_error(err: LedgerError) -> Response {
    match err {
        LedgerError::AlreadyExists(_) => {
            Redirect::to(&format!("/?error={}&form=register", urlencoding::encode(&err.to_string())))
                .into_response()
        }

        LedgerError::NotAuthenticated | LedgerError::NotFound(_) => {
            redirect_with_error("/", &err.to_string())
        }

        LedgerError::Validation(msg) => redirect_with_error("/budget", &msg),

        // Store and hashing errors are internal server errors
        _ => {
            tracing::error!("Ledger error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.to_string()
            ).into_response()
        }
    }
}

pub fn redirect_with_error(path: &str, msg: &str) -> Response {
    Redirect::to(&format!("{}?error={}", path, urlencoding::encode(msg))).into_response()
}

pub fn redirect_with_message(path: &str, msg: &str) -> Response {
    Redirect::to(&format!("{}?message={}", path, urlencoding::encode(msg))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    fn location(response: &Response) -> &str {
        response.headers().get(LOCATION).unwrap().to_str().unwrap()
    }

    #[test]
    fn test_duplicate_signup_returns_to_register_form() {
        let response = AppError::from(LedgerError::AlreadyExists("alice".into())).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/?error=User%20already%20exists%21&form=register");
    }

    #[test]
    fn test_validation_error_returns_to_budget_page() {
        let err = LedgerError::Validation("Category name cannot be empty.".into());
        let response = AppError::from(err).into_response();
        assert_eq!(location(&response), "/budget?error=Category%20name%20cannot%20be%20empty.");
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = LedgerError::Store(crate::errors::StoreError::InvalidPath("".into()));
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_input_is_bad_request() {
        let response = AppError::Input("Amount must be a non-negative number".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
