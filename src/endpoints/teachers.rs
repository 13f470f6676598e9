use super::{Backend, EndpointError};
use crate::models::Teacher;

pub async fn all(
    backend: &Backend,
    token: &str,
) -> Result<Vec<Teacher>, EndpointError> {
    super::get(backend, "teacher", token).await
}

pub async fn detail(
    backend: &Backend,
    token: &str,
    id: u64,
) -> Result<Teacher, EndpointError> {
    super::get(backend, &format!("teacher/{}", id), token).await
}
