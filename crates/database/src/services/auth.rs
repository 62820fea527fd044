use crate::error::ServiceError;
use identity::IdentityProvider;
use log::debug;
use models::user::AuthenticatedUser;

/// Resolves `token` through the user service and requires the host role
pub async fn authorize_host(
    identity: &dyn IdentityProvider,
    token: &str,
) -> Result<AuthenticatedUser, ServiceError> {
    let user = identity.authorize_host(token).await?;

    if !user.is_host() {
        debug!("User {} is not a host", user.id);
        return Err(ServiceError::Unauthorized("User is not a host".to_string()));
    }

    Ok(user)
}
