//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the contact guard vocabulary:
//! - Failure taxonomy and the unified error type
//! - Submission ids used for log correlation
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
