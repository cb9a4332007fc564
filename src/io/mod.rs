//! Input/output operations and ambient concerns
//!
//! This module contains everything outside the selection core:
//! - Command-line interface and run orchestration
//! - Error types
//! - Named policy constants and defaults
//! - Color index cache persistence
//! - Image load/resize/save helpers
//! - Progress reporting

/// Color index cache persistence
pub mod cache;
/// Command-line interface and run orchestration
pub mod cli;
/// Policy constants and runtime configuration defaults
pub mod configuration;
/// Error types for index construction and rendering
pub mod error;
/// Image loading, resampling, and export helpers
pub mod image;
/// Progress bar reporting for index builds and renders
pub mod progress;
