//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `survey` - Question catalog, judgment scale, session lifecycle and response compilation

pub mod foundation;
pub mod survey;
