use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::errors::ErrorBody;
use crate::routes::users::UserDto;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(schemas(HealthResponse, UserDto, ErrorBody)),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
