//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, query and interchange calls into use-case APIs.
//! - Hold presentation state explicitly instead of in globals.

pub mod app_state;
pub mod contact_service;
