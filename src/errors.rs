use actix_web::HttpResponse;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Order not found")]
    NotFound,

    #[error("User is not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::InvalidInput(msg) => AppError::Validation(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |message: &str| {
            serde_json::json!({
                "success": false,
                "message": message
            })
        };
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(body(&self.to_string())),
            AppError::Unauthenticated => {
                HttpResponse::Unauthorized().json(body(&self.to_string()))
            }
            AppError::Validation(_) => HttpResponse::BadRequest().json(body(&self.to_string())),
            AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(body("Internal server error"))
            }
        }
    }
}

/// Flatten `validator` errors into one human-readable sentence, e.g.
/// `"items[0].quantity: must be at least 1"`. Raw field-error structures
/// never cross the HTTP boundary.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut parts = Vec::new();
    collect_messages(errors, "", &mut parts);
    parts.sort();
    parts.join("; ")
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            (*field).to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed {} validation", err.code));
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use validator::Validate;

    use super::*;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthenticated_returns_401() {
        let resp = AppError::Unauthenticated.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn validation_returns_400() {
        let resp = AppError::Validation("quantity: must be at least 1".to_string())
            .error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_display_mentions_not_found() {
        assert_eq!(AppError::NotFound.to_string(), "Order not found");
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound.into();
        assert!(matches!(app_err, AppError::NotFound));
    }

    #[test]
    fn domain_invalid_input_maps_to_validation() {
        let app_err: AppError = DomainError::InvalidInput("bad value".to_string()).into();
        assert!(matches!(app_err, AppError::Validation(ref m) if m == "bad value"));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(min = 1, message = "must be at least 1"))]
        quantity: i32,
    }

    #[test]
    fn validation_errors_become_one_readable_message() {
        let form = Form {
            name: String::new(),
            quantity: 0,
        };
        let errors = form.validate().expect_err("should fail");
        let message = format_validation_errors(&errors);
        assert_eq!(message, "name: must not be empty; quantity: must be at least 1");
    }
}
