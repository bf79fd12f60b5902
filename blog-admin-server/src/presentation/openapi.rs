use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::app_error::ErrorBody;
use crate::presentation::handlers::categories::{
    CategoryBodyDto, CategoryDto, CategoryResponseDto, ListCategoriesResponseDto,
};
use crate::presentation::handlers::posts::{
    CategoryRefDto, CategorySummaryDto, ListPostsResponseDto, PostBodyDto, PostDto,
    PostResponseDto,
};
use crate::presentation::handlers::{CreatedResponseDto, StatusResponseDto};
use crate::presentation::http_handlers::HealthDto;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http_handlers::healthz,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::categories::list_categories,
        crate::presentation::handlers::categories::get_category,
        crate::presentation::handlers::categories::create_category,
        crate::presentation::handlers::categories::update_category,
        crate::presentation::handlers::categories::delete_category
    ),
    components(
        schemas(
            PostBodyDto,
            CategoryRefDto,
            CategorySummaryDto,
            PostDto,
            PostResponseDto,
            ListPostsResponseDto,
            CategoryBodyDto,
            CategoryDto,
            CategoryResponseDto,
            ListCategoriesResponseDto,
            CreatedResponseDto,
            StatusResponseDto,
            ErrorBody,
            HealthDto
        )
    ),
    tags(
        (name = "posts", description = "Post management with category links"),
        (name = "categories", description = "Category management"),
        (name = "health", description = "Store reachability")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
