//! Core types, configuration, and the DOM surface abstraction for the
//! horizontal parallax widget.
//!
//! This crate provides the foundational types used across all other parallax crates:
//! - Slide and geometry records shared by layout and the offset engine
//! - Widget configuration with documented defaults
//! - The [`Surface`] trait through which every DOM read and write happens
//! - An in-memory surface for headless use and tests
//! - Error types

pub mod config;
pub mod errors;
pub mod memory;
pub mod surface;
pub mod types;

pub use config::*;
pub use errors::*;
pub use memory::{MemoryNode, MemorySurface};
pub use surface::*;
pub use types::*;
