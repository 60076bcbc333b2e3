//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (ContactForm, SubmissionAttempt, EmailPayload)
//! - Domain value objects (FormField, FieldErrors, Toast)
//! - Detection patterns (spam, SQL, disposable email)
//! - Domain services (sanitizer, format checks, honeypot)
//! - Collaborator traits (interfaces)

pub mod entities;
pub mod patterns;
pub mod repository;
pub mod services;
pub mod value_objects;
