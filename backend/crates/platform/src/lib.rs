//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations for the contact guard:
//! - Key-value storage capability (in-memory and JSON-file backed)
//! - Two-tier rate limiting (burst window + cooldown)
//! - Client metadata capture

pub mod client;
pub mod rate_limit;
pub mod storage;
