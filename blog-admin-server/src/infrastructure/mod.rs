pub(crate) mod database;
pub(crate) mod identity;
pub(crate) mod logging;
pub(crate) mod settings;
