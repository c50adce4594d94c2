//! Validation and normalization of form input
//!
//! Forms arrive as raw strings. Every string → number and string → date
//! coercion happens here and turns into an explicit violation on failure,
//! never into a silently bogus value.

pub mod filters;
pub mod schema;
pub mod validators;

pub use schema::FormReader;
