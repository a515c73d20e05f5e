//! Slide layout for the horizontal parallax widget.
//!
//! This crate reshapes a vertically stacked set of slide elements into a
//! horizontal strip, and sizes the strip from the viewport.
//!
//! # Architecture
//!
//! 1. **Planning**: resolve every slide's image sources without touching the DOM
//! 2. **Bootstrap**: wrap the root into outer/strip containers and each slide into
//!    content and background envelopes (runs once per widget)
//! 3. **Sizing**: compute [`Geometry`](parallax_core::Geometry) from the viewport
//!    and write it back; repeated on every resize
//! 4. **Teardown**: undo the bootstrap so the root can be initialized again
//!
//! # Example
//!
//! ```ignore
//! use parallax_layout::{initialize, recompute_geometry, apply_geometry};
//!
//! let mut layout = initialize(&mut surface, &root, &config)?;
//!
//! // on resize
//! layout.geometry = recompute_geometry(&surface, layout.slides.len());
//! apply_geometry(&mut surface, &layout, &config)?;
//! ```

mod builder;
mod sizing;
mod teardown;

pub use builder::{initialize, plan_slides, Layout, SlidePlan};
pub use sizing::{apply_geometry, offset_in_strip, overlay_left, recompute_geometry};
pub use teardown::restore;
