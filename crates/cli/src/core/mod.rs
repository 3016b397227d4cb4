pub(crate) mod config;
pub(crate) mod dirs;
pub(crate) mod logging;
