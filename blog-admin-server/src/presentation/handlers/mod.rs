use serde::Serialize;
use utoipa::ToSchema;

pub(crate) mod categories;
pub(crate) mod posts;

pub(crate) const STATUS_OK: &str = "OK";

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CreatedResponseDto {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StatusResponseDto {
    pub(crate) status: String,
}

impl StatusResponseDto {
    pub(crate) fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
        }
    }
}
