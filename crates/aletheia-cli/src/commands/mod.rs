//! CLI command implementations.

pub mod review;
pub mod status;
pub mod validate;
