use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::category::{Category, CategoryRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, ErrorBody};
use crate::presentation::extractors::{IdPath, ValidJson};

use super::{CreatedResponseDto, STATUS_OK, StatusResponseDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CategoryBodyDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListCategoriesResponseDto {
    pub(crate) status: String,
    pub(crate) categories: Vec<CategoryDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategoryResponseDto {
    pub(crate) status: String,
    pub(crate) category: CategoryDto,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl From<CategoryBodyDto> for CategoryRequest {
    fn from(dto: CategoryBodyDto) -> Self {
        Self { name: dto.name }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/categories",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All categories, newest first", body = ListCategoriesResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListCategoriesResponseDto>)> {
    let categories = state.category_service.list_categories().await?;

    Ok((
        StatusCode::OK,
        Json(ListCategoriesResponseDto {
            status: STATUS_OK.to_string(),
            categories: categories.into_iter().map(CategoryDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<CategoryResponseDto>)> {
    let category = state.category_service.get_category(id).await?;

    Ok((
        StatusCode::OK,
        Json(CategoryResponseDto {
            status: STATUS_OK.to_string(),
            category: CategoryDto::from(category),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CategoryBodyDto,
    responses(
        (status = 201, description = "Category created", body = CreatedResponseDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn create_category(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<CategoryBodyDto>,
) -> AppResult<(StatusCode, Json<CreatedResponseDto>)> {
    let category = state.category_service.create_category(dto.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponseDto {
            status: STATUS_OK.to_string(),
            message: "category created".to_string(),
            id: category.id,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = CategoryBodyDto,
    responses(
        (status = 200, description = "Category renamed", body = StatusResponseDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub(crate) async fn update_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(dto): ValidJson<CategoryBodyDto>,
) -> AppResult<(StatusCode, Json<StatusResponseDto>)> {
    state
        .category_service
        .update_category(id, dto.into())
        .await?;

    Ok((StatusCode::OK, Json(StatusResponseDto::ok())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    tag = "categories",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted and unlinked from posts", body = StatusResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Category not found", body = ErrorBody)
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<StatusResponseDto>)> {
    state.category_service.delete_category(id).await?;

    Ok((StatusCode::OK, Json(StatusResponseDto::ok())))
}
