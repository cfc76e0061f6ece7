//! Login, logout, and the current account.
//!
//! A successful login is the only way a token enters the
//! [`Session`](crate::session::Session); logout and any `401` are the only
//! ways it leaves.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config;
use crate::error::{BookingError, Result};
use crate::http::ApiClient;

/// Body of `POST /authenticate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub remember_me: bool,
}

#[derive(Debug, Deserialize)]
struct JwtToken {
    id_token: String,
}

/// The logged-in user as returned by `GET /account`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub id: Option<i64>,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub activated: bool,
    pub lang_key: Option<String>,
    pub authorities: Vec<String>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.authorities.iter().any(|a| a == "ROLE_ADMIN")
    }
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token and store it in the session.
    pub fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(BookingError::InvalidArgument(
                "username and password are required".to_string(),
            ));
        }
        let request = LoginRequest {
            username,
            password,
            remember_me,
        };
        let jwt: JwtToken = self
            .client
            .post(&config::endpoint("authenticate"), &request)?;
        let token = jwt.id_token.trim();
        if token.is_empty() {
            warn!(username, "authentication returned an empty token");
            return Err(BookingError::Unauthorized);
        }
        self.client.session().establish(token)?;
        info!(username, "logged in");
        Ok(())
    }

    /// Drop the token locally. The backend keeps no session to end.
    pub fn logout(&self) {
        self.client.session().clear();
        info!("logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    pub fn account(&self) -> Result<Account> {
        self.client.get(&config::endpoint("account"), &[])
    }

    /// Ask the backend whether the stored token is still accepted.
    ///
    /// A rejected token is cleared and reported as `Ok(false)`; transport
    /// failures are returned as errors and leave the session alone.
    pub fn validate_session(&self) -> Result<bool> {
        if !self.is_authenticated() {
            return Ok(false);
        }
        // The backend answers with the bare login as text, not JSON.
        match self.client.get_text(&config::endpoint("authenticate"), &[]) {
            Ok(login) => {
                debug!(login = login.trim(), "session still valid");
                Ok(true)
            }
            Err(BookingError::Unauthorized) => Ok(false),
            Err(BookingError::Status { status, .. }) => {
                warn!(status, "session validation failed; logging out");
                self.logout();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
