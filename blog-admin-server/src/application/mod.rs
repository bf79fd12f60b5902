pub(crate) mod category_service;
pub(crate) mod post_service;
