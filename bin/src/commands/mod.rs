//! CLI command implementations.

pub(crate) mod cores;
pub(crate) mod fetch;
pub(crate) mod info;
pub(crate) mod query;
