use super::{Backend, EndpointError};
use crate::models::User;
use reqwest::Method;

pub async fn detail(
    backend: &Backend,
    token: &str,
    id: u64,
) -> Result<User, EndpointError> {
    super::get(backend, &format!("user/{}", id), token).await
}

/// Permanently delete an account.
pub async fn delete(
    backend: &Backend,
    token: &str,
    id: u64,
) -> Result<(), EndpointError> {
    super::fire(backend, Method::DELETE, &format!("user/{}", id), token).await
}
