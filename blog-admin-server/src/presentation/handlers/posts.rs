use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::category::CategorySummary;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppResult, ErrorBody};
use crate::presentation::extractors::{IdPath, ValidJson};
use crate::presentation::middleware::auth::AuthenticatedUser;

use super::{CreatedResponseDto, STATUS_OK, StatusResponseDto};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CategoryRefDto {
    pub(crate) id: i64,
}

/// Body of both create and update: every field is sent every time.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostBodyDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[serde(default)]
    pub(crate) categories: Vec<CategoryRefDto>,
    #[serde(default, alias = "thumbnailUrl")]
    #[validate(length(max = 1024))]
    pub(crate) thumbnail_image_key: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CategorySummaryDto {
    pub(crate) id: i64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) thumbnail_image_key: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    pub(crate) categories: Vec<CategorySummaryDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) status: String,
    pub(crate) posts: Vec<PostDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostResponseDto {
    pub(crate) status: String,
    pub(crate) post: PostDto,
}

impl From<CategorySummary> for CategorySummaryDto {
    fn from(category: CategorySummary) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            thumbnail_image_key: post.thumbnail_image_key,
            created_at: post.created_at,
            updated_at: post.updated_at,
            categories: post
                .categories
                .into_iter()
                .map(CategorySummaryDto::from)
                .collect(),
        }
    }
}

impl PostBodyDto {
    fn category_ids(&self) -> Vec<i64> {
        self.categories.iter().map(|category| category.id).collect()
    }

    fn into_create_request(self) -> CreatePostRequest {
        CreatePostRequest {
            category_ids: self.category_ids(),
            title: self.title,
            content: self.content,
            thumbnail_image_key: self.thumbnail_image_key,
        }
    }

    fn into_update_request(self) -> UpdatePostRequest {
        UpdatePostRequest {
            category_ids: self.category_ids(),
            title: self.title,
            content: self.content,
            thumbnail_image_key: self.thumbnail_image_key,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All posts, newest first", body = ListPostsResponseDto),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let posts = state.post_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            status: STATUS_OK.to_string(),
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post with its categories", body = PostResponseDto),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<PostResponseDto>)> {
    let post = state.post_service.get_post(id).await?;

    Ok((
        StatusCode::OK,
        Json(PostResponseDto {
            status: STATUS_OK.to_string(),
            post: PostDto::from(post),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = PostBodyDto,
    responses(
        (status = 201, description = "Post created with its categories", body = CreatedResponseDto),
        (status = 400, description = "Validation error or unknown category", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ValidJson(dto): ValidJson<PostBodyDto>,
) -> AppResult<(StatusCode, Json<CreatedResponseDto>)> {
    debug!(actor = %auth.user_id, "create post requested");
    let post = state
        .post_service
        .create_post(dto.into_create_request())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponseDto {
            status: STATUS_OK.to_string(),
            message: "post created".to_string(),
            id: post.id,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = PostBodyDto,
    responses(
        (status = 200, description = "Fields overwritten and categories replaced", body = StatusResponseDto),
        (status = 400, description = "Validation error or unknown category", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    IdPath(id): IdPath,
    ValidJson(dto): ValidJson<PostBodyDto>,
) -> AppResult<(StatusCode, Json<StatusResponseDto>)> {
    debug!(actor = %auth.user_id, post_id = id, "update post requested");
    state
        .post_service
        .update_post(id, dto.into_update_request())
        .await?;

    Ok((StatusCode::OK, Json(StatusResponseDto::ok())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post and its category links deleted", body = StatusResponseDto),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<(StatusCode, Json<StatusResponseDto>)> {
    debug!(actor = %auth.user_id, post_id = id, "delete post requested");
    state.post_service.delete_post(id).await?;

    Ok((StatusCode::OK, Json(StatusResponseDto::ok())))
}
