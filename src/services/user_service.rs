use validator::Validate;

use crate::database::UserStore;
use crate::models::{AuthenticatedUser, UpdatePasswordRequest, UserProfile};
use crate::services::auth_service::hash_password;
use crate::utils::error::AppError;

pub async fn list_users(users: &dyn UserStore) -> Result<Vec<UserProfile>, AppError> {
    let all = users.list().await?;
    Ok(all.into_iter().map(UserProfile::from).collect())
}

pub async fn find_by_email(users: &dyn UserStore, email: &str) -> Result<UserProfile, AppError> {
    let email = email.trim().to_lowercase();
    users
        .find_by_email(&email)
        .await?
        .map(UserProfile::from)
        .ok_or_else(|| AppError::not_found("User", email))
}

/// Admins may change any password, everyone else only their own.
/// The permission check runs before the lookup so ids of other users are not probed.
pub async fn update_password(
    users: &dyn UserStore,
    target_id: &str,
    request: &UpdatePasswordRequest,
    caller: &AuthenticatedUser,
) -> Result<(), AppError> {
    if !caller.is_admin() && caller.id != target_id {
        return Err(AppError::Forbidden(
            "You can only change your own password".to_string(),
        ));
    }

    request.validate()?;

    let password_hash = hash_password(&request.password)?;
    if !users.update_password(target_id, &password_hash).await? {
        return Err(AppError::not_found("User", target_id));
    }

    log::info!("🔑 Password updated for user {} by {}", target_id, caller.email);
    Ok(())
}

pub async fn delete_user(users: &dyn UserStore, id: &str) -> Result<(), AppError> {
    if !users.delete(id).await? {
        return Err(AppError::not_found("User", id));
    }

    log::info!("🗑️  User {} deleted", id);
    Ok(())
}
