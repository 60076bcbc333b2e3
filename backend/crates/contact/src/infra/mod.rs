//! Infrastructure Layer
//!
//! Implementations of the domain collaborator traits.

pub mod emailjs;
pub mod record_store;
