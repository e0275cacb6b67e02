use actix_web::{delete, get, put, web, HttpResponse};

use crate::middleware::{AdminOnly, Authorized, UserOrAbove};
use crate::models::{AuthenticatedUser, MessageResponse, UpdatePasswordRequest, UserProfile};
use crate::services::user_service;
use crate::state::AppState;
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [UserProfile]),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn list_users(
    _auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = user_service::list_users(state.users.as_ref()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User found", body = UserProfile),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[get("/{email}")]
pub async fn get_user_by_email(
    _auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::find_by_email(state.users.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id}/password - admin or the user themself
#[utoipa::path(
    put,
    path = "/users/{id}/password",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Password too short"),
        (status = 403, description = "Not allowed to change this password"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}/password")]
pub async fn update_password(
    _auth: Authorized<UserOrAbove>,
    caller: web::ReqData<AuthenticatedUser>,
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    user_service::update_password(state.users.as_ref(), &path, &request, &caller).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn delete_user(
    _auth: Authorized<AdminOnly>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user_service::delete_user(state.users.as_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
