//! Named method dispatch.
//!
//! The host page calls a widget through one entry point with either a
//! configuration (construct) or a method name plus arguments. Method names
//! map onto the closed [`Method`] set through the [`METHODS`] table, which
//! also records which methods act as getters.

use std::hash::Hash;

use parallax_core::{ConfigError, DispatchError, ParallaxConfig, ParallaxError, Surface};
use serde_json::Value;

use crate::registry::InstanceRegistry;
use crate::widget::Widget;

/// Dispatch table entry for a public method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: &'static str,
    /// Called without arguments, returns a value instead of chaining.
    pub getter: bool,
    pub max_args: usize,
}

const DESTROY: MethodSpec = MethodSpec { name: "destroy", getter: false, max_args: 0 };
const REFRESH: MethodSpec = MethodSpec { name: "refresh", getter: false, max_args: 0 };
const GEOMETRY: MethodSpec = MethodSpec { name: "geometry", getter: true, max_args: 0 };
const SLIDE_COUNT: MethodSpec = MethodSpec { name: "slideCount", getter: true, max_args: 0 };
const SPEED: MethodSpec = MethodSpec { name: "speed", getter: true, max_args: 1 };

pub const METHODS: &[MethodSpec] = &[DESTROY, REFRESH, GEOMETRY, SLIDE_COUNT, SPEED];

/// Public operations callable by name on an existing instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Undo the layout and drop the instance
    Destroy,
    /// Re-measure the viewport, as on resize
    Refresh,
    Geometry,
    SlideCount,
    /// Read the speed, or set it when an argument is given
    Speed(Option<f64>),
}

impl Method {
    /// Resolve a method name and its arguments.
    ///
    /// `init` and underscore-prefixed names are not callable by name.
    pub fn parse(name: &str, args: &[Value]) -> Result<Self, DispatchError> {
        if name.starts_with('_') || name == "init" {
            return Err(DispatchError::PrivateMethod { name: name.to_string() });
        }
        let spec = METHODS
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| DispatchError::UnknownMethod { name: name.to_string() })?;
        if args.len() > spec.max_args {
            return Err(DispatchError::InvalidArguments {
                method: name.to_string(),
                reason: format!("expected at most {} arguments, got {}", spec.max_args, args.len()),
            });
        }

        let method = match spec.name {
            "destroy" => Method::Destroy,
            "refresh" => Method::Refresh,
            "geometry" => Method::Geometry,
            "slideCount" => Method::SlideCount,
            "speed" => {
                let speed = args
                    .first()
                    .map(|v| {
                        v.as_f64().ok_or_else(|| DispatchError::InvalidArguments {
                            method: name.to_string(),
                            reason: format!("speed must be a number, got {}", v),
                        })
                    })
                    .transpose()?;
                Method::Speed(speed)
            }
            _ => return Err(DispatchError::UnknownMethod { name: name.to_string() }),
        };
        Ok(method)
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn spec(&self) -> &'static MethodSpec {
        match self {
            Method::Destroy => &DESTROY,
            Method::Refresh => &REFRESH,
            Method::Geometry => &GEOMETRY,
            Method::SlideCount => &SLIDE_COUNT,
            Method::Speed(_) => &SPEED,
        }
    }

    fn has_args(&self) -> bool {
        matches!(self, Method::Speed(Some(_)))
    }

    /// Whether this call returns a value instead of preserving chaining.
    pub fn returns_value(&self) -> bool {
        self.spec().getter && !self.has_args()
    }
}

/// What the host page asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Construct(ParallaxConfig),
    Call(Method),
}

/// Result of a dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// Return the selection itself so calls can be chained.
    Chain,
    /// A getter's value.
    Value(Value),
}

/// Run an invocation against every element in `selection`.
///
/// Construction skips elements that already have an instance and stops at
/// the first failure. Getter calls read from the first element only; every
/// other call runs on each initialized element and chains.
pub fn dispatch<S, K>(
    registry: &mut InstanceRegistry<K, Widget<S>>,
    surface: &mut S,
    selection: &[(K, S::Node)],
    invocation: Invocation,
) -> Result<CallOutcome, ParallaxError>
where
    S: Surface,
    K: Hash + Eq + Clone + std::fmt::Debug,
{
    match invocation {
        Invocation::Construct(config) => {
            for (key, node) in selection {
                let created = registry.construct(key.clone(), || {
                    Widget::init(surface, node, config.clone())
                })?;
                if !created {
                    log::debug!("element {:?} already initialized", key);
                }
            }
            Ok(CallOutcome::Chain)
        }
        Invocation::Call(method) if method.returns_value() => {
            let (key, _) = selection.first().ok_or(DispatchError::NotInitialized)?;
            let widget = registry.get_mut(key).ok_or(DispatchError::NotInitialized)?;
            Ok(CallOutcome::Value(invoke(widget, surface, method)?))
        }
        Invocation::Call(Method::Destroy) => {
            for (key, _) in selection {
                if let Some(widget) = registry.delete(key) {
                    widget.destroy(surface)?;
                }
            }
            Ok(CallOutcome::Chain)
        }
        Invocation::Call(method) => {
            for (key, _) in selection {
                match registry.get_mut(key) {
                    Some(widget) => {
                        invoke(widget, surface, method)?;
                    }
                    None => log::warn!("{} called on uninitialized element {:?}", method.name(), key),
                }
            }
            Ok(CallOutcome::Chain)
        }
    }
}

fn invoke<S: Surface>(widget: &mut Widget<S>, surface: &mut S, method: Method) -> Result<Value, ParallaxError> {
    let value = match method {
        Method::Destroy => Value::Null,
        Method::Refresh => {
            widget.handle_resize(surface)?;
            Value::Null
        }
        Method::Geometry => serde_json::to_value(widget.geometry()).map_err(ConfigError::from)?,
        Method::SlideCount => Value::from(widget.slide_count()),
        Method::Speed(None) => Value::from(widget.speed()),
        Method::Speed(Some(speed)) => {
            widget.set_speed(speed);
            Value::Null
        }
    };
    Ok(value)
}
