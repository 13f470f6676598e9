//! The Yoga Studio API's endpoints.

pub mod auth;
pub mod sessions;
pub mod teachers;
pub mod users;

use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use url::Url;

/// Where the API lives and the HTTP client used to talk to it.
#[derive(Debug, Clone)]
pub struct Backend {
    client: Client,
    base_url: Url,
}

impl Backend {
    /// The API's location when running the backend locally.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api/";

    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(crate::DEFAULT_USER_AGENT)
            .build()?;

        Ok(Backend::with_client(client, base_url))
    }

    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        // without a trailing slash, joining would replace the last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Backend { client, base_url }
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    fn url(&self, path: &str) -> Result<Url, EndpointError> {
        self.base_url.join(path).map_err(EndpointError::BadUrl)
    }
}

/// Typical endpoint errors.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// The HTTP client encountered an error.
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    #[error("Unable to build the request URL")]
    BadUrl(#[source] url::ParseError),
    /// The credentials were missing, expired, or wrong.
    #[error("The server rejected our credentials")]
    Unauthorized,
    #[error("The requested resource doesn't exist")]
    NotFound,
    /// A catch-all for any other non-success status code.
    #[error("The request was rejected by the server with {status}")]
    Rejected { status: StatusCode },
    /// Unable to parse the JSON in the response.
    #[error("Unable to parse the response")]
    Decode(#[from] serde_json::Error),
}

async fn send<D>(
    backend: &Backend,
    method: Method,
    path: &str,
    token: Option<&str>,
    data: Option<&D>,
) -> Result<Response, EndpointError>
where
    D: Debug + Serialize,
{
    let url = backend.url(path)?;

    log::debug!("Sending a {} request to {}", method, url);
    let mut request = backend.client.request(method, url);

    if let Some(token) = token.filter(|token| !token.is_empty()) {
        request = request.bearer_auth(token);
    }
    if let Some(data) = data {
        log::trace!("Payload: {:#?}", data);
        request = request.json(data);
    }

    let response = request.send().await?;
    log::trace!("Headers: {:#?}", response.headers());

    check_status(response)
}

fn check_status(response: Response) -> Result<Response, EndpointError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    log::warn!("{} responded with {}", response.url(), status);

    match status {
        StatusCode::UNAUTHORIZED => Err(EndpointError::Unauthorized),
        StatusCode::NOT_FOUND => Err(EndpointError::NotFound),
        _ => Err(EndpointError::Rejected { status }),
    }
}

async fn read_json<T>(response: Response) -> Result<T, EndpointError>
where
    T: DeserializeOwned,
{
    let body = response.text().await?;
    log::trace!("Response: {}", body);

    serde_json::from_str(&body).map_err(EndpointError::from)
}

async fn get<T>(
    backend: &Backend,
    path: &str,
    token: &str,
) -> Result<T, EndpointError>
where
    T: DeserializeOwned,
{
    let response =
        send(backend, Method::GET, path, Some(token), None::<&()>).await?;

    read_json(response).await
}

/// Send a body-less request, ignoring whatever comes back.
async fn fire(
    backend: &Backend,
    method: Method,
    path: &str,
    token: &str,
) -> Result<(), EndpointError> {
    send(backend, method, path, Some(token), None::<&()>).await?;

    Ok(())
}
