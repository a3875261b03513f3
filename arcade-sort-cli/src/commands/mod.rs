pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod manufacturer;
pub(crate) mod run;
