//! Authenticated HTTP access to the remote API.
//!
//! [`Client`] sends exactly one request per call and checks the status the
//! verb is expected to return: `201` for POST, `204` for DELETE, `200`
//! otherwise. It never retries. The wire is abstracted by [`Transport`] so
//! the remote logic can run against something other than real HTTP.

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::error::{RemoteError, Result};

const USER_AGENT: &str = concat!("envman/", env!("CARGO_PKG_VERSION"));
const ACCEPT_GITHUB: &str = "application/vnd.github+json";
const JSON: &str = "application/json";

/// HTTP verbs used against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// The only status accepted as success for this verb.
    pub fn expected_status(self) -> u16 {
        match self {
            Method::Post => 201,
            Method::Delete => 204,
            Method::Get | Method::Patch => 200,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request authorization.
#[derive(Clone)]
pub enum Auth {
    /// No `Authorization` header.
    None,
    /// `Authorization: token <token>`
    Token(Zeroizing<String>),
    /// HTTP Basic, only used while creating a token.
    Basic {
        user: String,
        password: Zeroizing<String>,
    },
}

impl Auth {
    pub fn token(token: &str) -> Self {
        Auth::Token(Zeroizing::new(token.to_string()))
    }

    pub fn basic(user: &str, password: &str) -> Self {
        Auth::Basic {
            user: user.to_string(),
            password: Zeroizing::new(password.to_string()),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::Token(_) => f.write_str("Token(<redacted>)"),
            Auth::Basic { user, .. } => write!(f, "Basic({user}, <redacted>)"),
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
    pub content_type: Option<&'static str>,
    pub auth: Auth,
}

/// Raw response: status code and body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Carries a request over the wire.
///
/// Implementations perform exactly one exchange and report transport
/// failures as `RemoteError::Network`. Status codes are not interpreted.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response>;
}

/// [`Transport`] over blocking HTTPS.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build the HTTP client. `timeout` bounds each request as a whole.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        // reqwest's blocking client applies a 30s timeout unless told otherwise.
        builder = builder.timeout(timeout);
        let client = builder
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB));

        builder = match &request.auth {
            Auth::None => builder,
            Auth::Token(token) => builder.header(AUTHORIZATION, format!("token {}", token.as_str())),
            Auth::Basic { user, password } => builder.basic_auth(user, Some(password.as_str())),
        };

        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(network_error)?;

        Ok(Response { status, body })
    }
}

fn network_error(e: reqwest::Error) -> crate::error::Error {
    if e.is_timeout() {
        RemoteError::Network(format!("request timed out: {e}")).into()
    } else {
        RemoteError::Network(e.to_string()).into()
    }
}

/// Client for the remote API rooted at `api_url`.
pub struct Client {
    api_url: String,
    transport: Box<dyn Transport>,
}

impl Client {
    /// Client over HTTPS with the given per-request timeout.
    pub fn new(api_url: &str, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self::with_transport(
            api_url,
            Box::new(HttpTransport::new(timeout)?),
        ))
    }

    /// Client over an arbitrary transport.
    pub fn with_transport(api_url: &str, transport: Box<dyn Transport>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Absolute URL of an API path such as `gists` or `/user`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Send one request and return the body if the status matches the verb.
    ///
    /// # Errors
    ///
    /// `RemoteError::Network` on transport failure, `RemoteError::Auth` on
    /// `401`, `RemoteError::Status` on any other unexpected status.
    pub fn request(&self, method: Method, url: &str, body: Option<String>, auth: &Auth) -> Result<String> {
        let request = Request {
            method,
            url: url.to_string(),
            content_type: body.as_ref().map(|_| JSON),
            body,
            auth: auth.clone(),
        };

        debug!(method = %method, url = %url, "remote request");
        let response = self.transport.send(&request)?;
        debug!(method = %method, url = %url, status = response.status, "remote response");

        let expected = method.expected_status();
        if response.status == expected {
            trace!(bytes = response.body.len(), "response body");
            return Ok(response.body);
        }

        let reason = reason_phrase(response.status);
        if response.status == 401 {
            return Err(RemoteError::Auth(format!("{} ({})", response.status, reason)).into());
        }
        Err(RemoteError::Status {
            code: response.status,
            reason,
            expected,
        }
        .into())
    }

    /// GET and decode a JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, auth: &Auth) -> Result<T> {
        let body = self.request(Method::Get, url, None, auth)?;
        decode(&body)
    }

    /// GET a body as text.
    pub fn get_text(&self, url: &str, auth: &Auth) -> Result<String> {
        self.request(Method::Get, url, None, auth)
    }

    /// Send a JSON body with `method` and decode the JSON response.
    pub fn send_json<B, T>(&self, method: Method, url: &str, body: &B, auth: &Auth) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(body)?;
        let response = self.request(method, url, Some(payload), auth)?;
        decode(&response)
    }

    /// DELETE a resource.
    pub fn delete(&self, url: &str, auth: &Auth) -> Result<()> {
        self.request(Method::Delete, url, None, auth)?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()).into())
}

fn reason_phrase(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}
