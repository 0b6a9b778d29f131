//! Contact query entry points.
//!
//! # Responsibility
//! - Compose the favorites filter with free-text search.
//! - Keep result shaping inside core so every caller filters the same way.

pub mod filter;
