use super::{Backend, EndpointError};
use crate::models::Session;
use reqwest::Method;

/// Every yoga session.
pub async fn all(
    backend: &Backend,
    token: &str,
) -> Result<Vec<Session>, EndpointError> {
    super::get(backend, "session", token).await
}

pub async fn detail(
    backend: &Backend,
    token: &str,
    id: u64,
) -> Result<Session, EndpointError> {
    super::get(backend, &format!("session/{}", id), token).await
}

/// Save a new session. Whatever the backend answers with is ignored.
pub async fn create(
    backend: &Backend,
    token: &str,
    session: &Session,
) -> Result<(), EndpointError> {
    super::send(backend, Method::POST, "session", Some(token), Some(session))
        .await?;

    Ok(())
}

/// Overwrite an existing session. Whatever the backend answers with is
/// ignored.
pub async fn update(
    backend: &Backend,
    token: &str,
    id: u64,
    session: &Session,
) -> Result<(), EndpointError> {
    let path = format!("session/{}", id);
    super::send(backend, Method::PUT, &path, Some(token), Some(session))
        .await?;

    Ok(())
}

pub async fn delete(
    backend: &Backend,
    token: &str,
    id: u64,
) -> Result<(), EndpointError> {
    super::fire(backend, Method::DELETE, &format!("session/{}", id), token)
        .await
}

/// Add a user to the session's attendees.
pub async fn participate(
    backend: &Backend,
    token: &str,
    id: u64,
    user_id: u64,
) -> Result<(), EndpointError> {
    let path = format!("session/{}/participate/{}", id, user_id);

    super::fire(backend, Method::POST, &path, token).await
}

/// Remove a user from the session's attendees.
pub async fn unparticipate(
    backend: &Backend,
    token: &str,
    id: u64,
    user_id: u64,
) -> Result<(), EndpointError> {
    let path = format!("session/{}/participate/{}", id, user_id);

    super::fire(backend, Method::DELETE, &path, token).await
}
