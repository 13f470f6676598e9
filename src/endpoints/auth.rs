use super::{Backend, EndpointError};
use crate::{
    models::{LoginRequest, RegisterRequest},
    SessionInformation,
};
use reqwest::Method;

/// Authenticate with the backend, getting back the profile to store in a
/// [`crate::SessionService`].
pub async fn login(
    backend: &Backend,
    request: &LoginRequest,
) -> Result<SessionInformation, EndpointError> {
    let response =
        super::send(backend, Method::POST, "auth/login", None, Some(request))
            .await?;

    let info: SessionInformation = super::read_json(response).await?;
    log::trace!("Parsed response: {:#?}", info);

    Ok(info)
}

/// Create a new (non-admin) account.
pub async fn register(
    backend: &Backend,
    request: &RegisterRequest,
) -> Result<(), EndpointError> {
    super::send(backend, Method::POST, "auth/register", None, Some(request))
        .await?;

    log::info!("Registered {}", request.email);

    Ok(())
}
