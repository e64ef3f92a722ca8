use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::user::domain::User;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use super::AppState;
use crate::errors::{ApiError, ErrorBody};

/// Query parameters of the create and update calls. Missing values are
/// passed on as absent and rejected by validation.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserParams {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Public view of a user; the id is not exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub name: String,
    pub email: String,
    /// RFC 3339
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self { name: u.name, email: u.email, created_at: u.created_at.to_rfc3339() }
    }
}

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::bad_request(format!("Invalid id format: {}", raw)))
}

type IdPath = Result<Path<String>, PathRejection>;
type ParamsQuery = Result<Query<UserParams>, QueryRejection>;

/// Extractor rejections are answered with the same `{message}` body as the rest.
fn path_id(path: IdPath) -> Result<i32, ApiError> {
    let Path(raw) = path?;
    parse_id(&raw)
}

#[utoipa::path(get, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "User found", body = UserDto), (status = 400, description = "Invalid id", body = ErrorBody), (status = 404, description = "No such user", body = ErrorBody)))]
pub async fn get_user(State(state): State<AppState>, path: IdPath) -> Result<Json<UserDto>, ApiError> {
    let id = path_id(path)?;
    debug!(user_id = id, "controller: get user");
    let user = state.users.get_by_id(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(post, path = "/users", tag = "users",
    params(UserParams),
    responses((status = 201, description = "User created", body = UserDto), (status = 400, description = "Invalid input", body = ErrorBody)))]
pub async fn create_user(
    State(state): State<AppState>,
    query: ParamsQuery,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let Query(params) = query?;
    debug!(name = ?params.name, email = ?params.email, "controller: create user");
    let user = state.users.create(params.name.as_deref(), params.email.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(post, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id"), UserParams),
    responses((status = 200, description = "User updated"), (status = 400, description = "Invalid input", body = ErrorBody), (status = 404, description = "No such user", body = ErrorBody)))]
pub async fn update_user(
    State(state): State<AppState>,
    path: IdPath,
    query: ParamsQuery,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    let Query(params) = query?;
    debug!(user_id = id, name = ?params.name, email = ?params.email, "controller: update user");
    state.users.update(id, params.name.as_deref(), params.email.as_deref()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(delete, path = "/users/{id}", tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "User deleted"), (status = 400, description = "Invalid id", body = ErrorBody), (status = 404, description = "No such user", body = ErrorBody)))]
pub async fn delete_user(State(state): State<AppState>, path: IdPath) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    debug!(user_id = id, "controller: delete user");
    state.users.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}
