//! Widget lifecycle, instance registry and method dispatch.
//!
//! A [`Widget`] ties the layout builder and the offset engine to one root
//! element. Widgets live in an [`InstanceRegistry`] keyed by element handle,
//! so constructing twice on the same element is a no-op. Host pages drive
//! widgets through [`dispatch`], which accepts either a configuration
//! (construct) or a named public [`Method`].

mod dispatch;
mod registry;
mod widget;

pub use dispatch::{dispatch, CallOutcome, Invocation, Method, MethodSpec, METHODS};
pub use registry::InstanceRegistry;
pub use widget::Widget;
