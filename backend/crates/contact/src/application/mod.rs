//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod guard;
pub mod rate_limit;
pub mod status;
pub mod validate;
