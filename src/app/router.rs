use crate::app::auth::{AccountService, User};
use crate::app::resources::ResourceResolver;
use crate::http::cookie::SESSION_COOKIE;
use crate::http::error::HttpError;
use crate::http::mime::{self, ContentType};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::session::{SessionStore, USER_ATTRIBUTE};

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const LOGIN_PAGE_PATH: &str = "/login.html";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PAGE_PATH: &str = "/index.html";

const GREETING: &str = "Hello world!";
const DEFAULT_EXTENSION: &str = ".html";

/// Behaviour selected for a (method, path) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /`
    Greeting,
    /// `POST /login`
    Login,
    /// `POST /register`
    Register,
    /// Any other `GET`, resolved against static resources at this path
    Static(String),
}

/// Picks the route for a request. Exact paths are checked before the
/// static fallback; there is no pattern matching.
pub fn match_route(method: Method, path: &str) -> Result<Route, HttpError> {
    match (method, path) {
        (Method::GET, LANDING_PATH) => Ok(Route::Greeting),
        (Method::GET, _) => Ok(Route::Static(resource_path(path))),
        (Method::POST, LOGIN_PATH) => Ok(Route::Login),
        (Method::POST, REGISTER_PATH) => Ok(Route::Register),
        (Method::POST, _) => Err(HttpError::ResourceNotFound(path.to_string())),
        (other, _) => Err(HttpError::MethodNotAllowed(other.as_str().to_string())),
    }
}

/// Appends `.html` to paths whose last segment has no extension.
///
/// # Example
///
/// ```
/// # use minicat::app::router::resource_path;
/// assert_eq!(resource_path("/login"), "/login.html");
/// assert_eq!(resource_path("/css/styles.css"), "/css/styles.css");
/// ```
pub fn resource_path(path: &str) -> String {
    match mime::extension(path) {
        Some(_) => path.to_string(),
        None => format!("{}{}", path, DEFAULT_EXTENSION),
    }
}

/// Dispatches requests to route behaviour.
///
/// Failures are returned, not handled; the connection turns them into
/// responses.
pub struct Router<A, R> {
    accounts: A,
    resources: R,
    sessions: SessionStore,
}

impl<A, R> Router<A, R>
where
    A: AccountService,
    R: ResourceResolver,
{
    pub fn new(accounts: A, resources: R, sessions: SessionStore) -> Self {
        Self {
            accounts,
            resources,
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn dispatch(&self, request: &Request) -> Result<Response, HttpError> {
        let route = match_route(request.method(), request.path())?;

        tracing::debug!(
            method = ?request.method(),
            path = %request.path(),
            route = ?route,
            "Dispatching request"
        );

        match route {
            Route::Greeting => Ok(Response::ok(ContentType::Html, GREETING)),
            Route::Static(path) => self.serve_static(request, &path).await,
            Route::Login => self.login(request).await,
            Route::Register => {
                self.accounts.sign_up(request.body()).await?;
                Ok(Response::found(HOME_PAGE_PATH))
            }
        }
    }

    async fn serve_static(&self, request: &Request, path: &str) -> Result<Response, HttpError> {
        if path == LOGIN_PAGE_PATH && self.is_logged_in(request).await {
            return Ok(Response::found(HOME_PAGE_PATH));
        }

        let body = self.resources.resolve(path).await?;
        Ok(Response::ok(ContentType::from_path(path), body))
    }

    async fn login(&self, request: &Request) -> Result<Response, HttpError> {
        let user = self.accounts.login(request.body()).await?;
        let mut response = Response::found(HOME_PAGE_PATH);

        let session = match request.session(&self.sessions).await {
            Some(session) => session,
            None => {
                let session = self.sessions.create_and_register().await;
                response = response
                    .with_header("Set-Cookie", format!("{}={}", SESSION_COOKIE, session.id()));
                session
            }
        };

        session.set_attribute(USER_ATTRIBUTE, user).await;
        Ok(response)
    }

    async fn is_logged_in(&self, request: &Request) -> bool {
        match request.session(&self.sessions).await {
            Some(session) => session.get_attribute::<User>(USER_ATTRIBUTE).await.is_some(),
            None => false,
        }
    }
}
