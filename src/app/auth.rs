//! Account sign-up and login
//!
//! The router only sees the [`AccountService`] trait. [`InMemoryAccounts`]
//! is the implementation the binary uses; it keeps accounts for the
//! lifetime of the process.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::http::error::HttpError;
use crate::http::query::QueryParams;

/// Identity stored in the session once a login succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub account: String,
    pub email: String,
    password: String,
}

impl User {
    pub fn new(
        account: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Credential and account operations driven by form bodies.
pub trait AccountService: Send + Sync + 'static {
    /// Creates an account from `account=..&password=..&email=..`.
    fn sign_up(&self, form_body: &str) -> impl Future<Output = Result<(), HttpError>> + Send;

    /// Checks `account=..&password=..` and returns the matching user.
    fn login(&self, form_body: &str) -> impl Future<Output = Result<User, HttpError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_account(&self, account: &str) -> Option<User> {
        self.users.read().await.get(account).cloned()
    }
}

impl AccountService for InMemoryAccounts {
    async fn sign_up(&self, form_body: &str) -> Result<(), HttpError> {
        let form = QueryParams::parse(form_body)?;

        let (Some(account), Some(password), Some(email)) =
            (form.get("account"), form.get("password"), form.get("email"))
        else {
            return Err(HttpError::InvalidSignUpFormat);
        };

        // Uniqueness check and insert share one write lock.
        let mut users = self.users.write().await;
        if users.contains_key(account) {
            return Err(HttpError::DuplicateAccount(account.to_string()));
        }
        users.insert(account.to_string(), User::new(account, password, email));

        tracing::info!(account = %account, "Account registered");
        Ok(())
    }

    async fn login(&self, form_body: &str) -> Result<User, HttpError> {
        let form = QueryParams::parse(form_body)?;

        let (Some(account), Some(password)) = (form.get("account"), form.get("password")) else {
            return Err(HttpError::InvalidLoginFormat);
        };

        let user = self
            .find_by_account(account)
            .await
            .ok_or_else(|| HttpError::MemberNotFound(account.to_string()))?;

        if !user.check_password(password) {
            return Err(HttpError::InvalidPassword(account.to_string()));
        }

        tracing::info!(account = %account, "Login succeeded");
        Ok(user)
    }
}
