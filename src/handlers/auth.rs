use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Header carrying the authenticated user's id, set by the upstream auth
/// proxy after session validation. Requests without it are unauthenticated.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user. Handlers that take this parameter
/// reject unauthenticated requests with 401 before any work happens, so
/// they can never leak partial data.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.headers()
                .get(USER_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| Uuid::parse_str(value).ok())
                .map(AuthenticatedUser)
                .ok_or(AppError::Unauthenticated),
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn extracts_user_id_from_header() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        let user = AuthenticatedUser::extract(&req).await.expect("extract failed");
        assert_eq!(user.0, id);
    }

    #[actix_web::test]
    async fn missing_header_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();
        let err = AuthenticatedUser::extract(&req).await.expect_err("should fail");
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[actix_web::test]
    async fn malformed_header_is_unauthenticated() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();
        let err = AuthenticatedUser::extract(&req).await.expect_err("should fail");
        assert!(matches!(err, AppError::Unauthenticated));
    }
}
