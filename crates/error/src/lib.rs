//! Error types for tysig.
//!
//! This crate provides the validation error types shared by the tysig
//! workspace:
//! - [`FieldPath`] for locating a failure inside nested records
//! - [`ValidationError`] and [`ValidationErrorKind`] for validation failures

#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::style)]
#![warn(clippy::pedantic)]
#![deny(unsafe_code)]

mod error;

mod path;

pub use path::FieldPath;

pub use error::{ValidationError, ValidationErrorKind};
