//! Blocking REST client with bearer authorization and the 401 logout policy.
//!
//! Every request goes through [`ApiClient::send`], which attaches the
//! session token, clears the session on `401`, and maps any other
//! non-success status to [`BookingError::Status`]. List responses read
//! their total from the `x-total-count` header.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config;
use crate::error::{BookingError, Result};
use crate::pagination::Page;
use crate::session::Session;

/// Thin wrapper around a `reqwest` client bound to one API base URL and one
/// [`Session`].
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: Arc<Session>,
}

impl ApiClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: &str, timeout: Duration, session: Arc<Session>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Shared handle to the session, for components that outlive a borrow.
    pub fn session_handle(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// Absolute URL for an endpoint path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET` a JSON document.
    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        let resp = self.send(path, self.client.get(self.url(path)).query(query))?;
        Ok(resp.json()?)
    }

    /// `GET` a plain-text body, such as the login name from `/authenticate`.
    pub fn get_text(&self, path: &str, query: &[(String, String)]) -> Result<String> {
        let resp = self.send(path, self.client.get(self.url(path)).query(query))?;
        Ok(resp.text()?)
    }

    /// `GET` a JSON array, taking the total from the `x-total-count` header
    /// when present and from the array length otherwise.
    pub fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Page<T>> {
        let resp = self.send(path, self.client.get(self.url(path)).query(query))?;
        let total = total_count(&resp);
        let items: Vec<T> = resp.json()?;
        Ok(Page::new(items, total))
    }

    /// `POST` a JSON body and decode the JSON response.
    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self.send(path, self.client.post(self.url(path)).json(body))?;
        Ok(resp.json()?)
    }

    /// `PUT` a JSON body and decode the JSON response.
    pub fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self.send(path, self.client.put(self.url(path)).json(body))?;
        Ok(resp.json()?)
    }

    /// `DELETE` a resource; the response body is ignored.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.send(path, self.client.delete(self.url(path)))?;
        Ok(())
    }

    /// Attach authorization, send, and apply the status policy.
    fn send(&self, path: &str, req: RequestBuilder) -> Result<Response> {
        let req = match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        debug!(path, "sending request");
        let resp = req.send()?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "authorization rejected; clearing session");
            self.session.clear();
            return Err(BookingError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(BookingError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let message = resp.text().unwrap_or_default();
            return Err(BookingError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

fn total_count(resp: &Response) -> Option<u64> {
    resp.headers()
        .get(config::TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}
