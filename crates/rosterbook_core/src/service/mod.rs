//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and codec calls into use-case level APIs.
//! - Keep UI layers decoupled from file-format details.

pub mod student_service;
