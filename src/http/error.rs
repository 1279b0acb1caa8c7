//! Failure taxonomy shared by the parser, the router and the account service.
//!
//! Every failure that can reach the processor is a variant of [`HttpError`].
//! The processor never inspects messages; it only asks for the variant (see
//! `app::exception::translate`) or the coarser [`FailureKind`].

use crate::http::parser::ParseError;

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Malformed request line, header or query string
    ParseFormat,
    /// Unknown or disallowed method
    MethodError,
    /// Missing login/sign-up fields
    AuthFormat,
    /// Bad password or unknown account
    AuthCredential,
    /// Account already exists
    AuthConflict,
    /// No matching route or resource
    ResourceMissing,
    /// Anything else
    Unclassified,
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("invalid HTTP request format: {0}")]
    InvalidRequestFormat(String),

    #[error("invalid HTTP method: {0}")]
    InvalidHttpMethod(String),

    #[error("invalid query string format: {0}")]
    QueryStringFormat(String),

    #[error("sign-up form requires account, password and email")]
    InvalidSignUpFormat,

    #[error("account already exists: {0}")]
    DuplicateAccount(String),

    #[error("login form requires account and password")]
    InvalidLoginFormat,

    #[error("invalid password for account: {0}")]
    InvalidPassword(String),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HttpError {
    pub fn kind(&self) -> FailureKind {
        match self {
            HttpError::InvalidRequestFormat(_)
            | HttpError::QueryStringFormat(_)
            | HttpError::IllegalArgument(_) => FailureKind::ParseFormat,
            HttpError::InvalidHttpMethod(_) | HttpError::MethodNotAllowed(_) => {
                FailureKind::MethodError
            }
            HttpError::InvalidSignUpFormat | HttpError::InvalidLoginFormat => {
                FailureKind::AuthFormat
            }
            HttpError::InvalidPassword(_) | HttpError::MemberNotFound(_) => {
                FailureKind::AuthCredential
            }
            HttpError::DuplicateAccount(_) => FailureKind::AuthConflict,
            HttpError::ResourceNotFound(_) => FailureKind::ResourceMissing,
            HttpError::Internal(_) => FailureKind::Unclassified,
        }
    }
}

impl From<ParseError> for HttpError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidMethod(method) => HttpError::InvalidHttpMethod(method),
            ParseError::InvalidQueryString(query) => HttpError::QueryStringFormat(query),
            other => HttpError::InvalidRequestFormat(format!("{:?}", other)),
        }
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::Internal(err.into())
    }
}
