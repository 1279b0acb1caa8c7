//! Failure-to-response translation
//!
//! Every failure becomes a `302 Found` pointing at a static error page.
//! The failure message is logged and never sent to the client.

use crate::http::error::HttpError;
use crate::http::response::Response;

pub const BAD_REQUEST_PAGE: &str = "/400.html";
pub const UNAUTHORIZED_PAGE: &str = "/401.html";
pub const NOT_FOUND_PAGE: &str = "/404.html";
pub const METHOD_NOT_ALLOWED_PAGE: &str = "/405.html";
pub const INTERNAL_SERVER_ERROR_PAGE: &str = "/500.html";

/// Error page a failure redirects to.
pub fn redirect_target(err: &HttpError) -> &'static str {
    match err {
        HttpError::InvalidLoginFormat
        | HttpError::InvalidPassword(_)
        | HttpError::MemberNotFound(_) => UNAUTHORIZED_PAGE,
        HttpError::ResourceNotFound(_) => NOT_FOUND_PAGE,
        HttpError::InvalidRequestFormat(_)
        | HttpError::QueryStringFormat(_)
        | HttpError::InvalidSignUpFormat
        | HttpError::DuplicateAccount(_)
        | HttpError::IllegalArgument(_) => BAD_REQUEST_PAGE,
        HttpError::InvalidHttpMethod(_) | HttpError::MethodNotAllowed(_) => {
            METHOD_NOT_ALLOWED_PAGE
        }
        HttpError::Internal(_) => INTERNAL_SERVER_ERROR_PAGE,
    }
}

/// Logs `err` and returns the redirect response for it.
pub fn translate(err: &HttpError) -> Response {
    let target = redirect_target(err);

    match err {
        HttpError::Internal(e) => {
            tracing::error!(error = ?e, kind = ?err.kind(), location = target, "Unhandled failure");
        }
        _ => {
            tracing::warn!(error = %err, kind = ?err.kind(), location = target, "Request failed");
        }
    }

    Response::found(target)
}
