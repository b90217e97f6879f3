//! # CourseHub Core
//!
//! Core types, errors, and utilities for the CourseHub API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{ success, message, data }` envelope shared by every endpoint
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom deserializers for normalizing request input
//!
//! # Example
//!
//! ```ignore
//! use coursehub_core::{AppError, ApiResponse};
//! use coursehub_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! let hash = hash_password("Secret123")?;
//! let body = ApiResponse::ok(course).with_message("Course created successfully");
//! ```

pub mod errors;
pub mod password;
pub mod response;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, ErrorBody, MessageResponse};
