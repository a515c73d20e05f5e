//! Parallax offset engine.
//!
//! Maps the page's vertical scroll position onto a horizontal translation of
//! the slide strip, plus a damped translation of each visible slide's
//! background layers.
//!
//! The computation in [`offsets`] is pure: it takes a scroll offset, geometry
//! and speed and returns a [`ScrollFrame`]. [`apply`] writes a frame to a
//! [`Surface`](parallax_core::Surface).
//!
//! # Example
//!
//! ```
//! use parallax_core::{Geometry, Viewport};
//! use parallax_engine::on_scroll;
//!
//! let geometry = Geometry::compute(3, Viewport::new(1000.0, 700.0));
//! let frame = on_scroll(500.0, &geometry, 0.3);
//!
//! assert_eq!(frame.strip_offset, -500.0);
//! assert!((frame.offset_for(0).unwrap() - 350.0).abs() < 1e-9);
//! ```

pub mod apply;
pub mod offsets;

pub use apply::{apply_frame, apply_initial_offsets};
pub use offsets::{
    background_offset, initial_offset, initial_offsets, on_scroll, visible_index, visible_pair,
    ScrollFrame,
};
