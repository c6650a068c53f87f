pub(crate) mod dashboard;
pub(crate) mod generate;
pub(crate) mod list;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod validate;
