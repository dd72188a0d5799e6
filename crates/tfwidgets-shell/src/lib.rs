//! Reactive shell for the article widgets.
//!
//! Two pieces sit between the UI controls and the pure simulators in
//! `tfwidgets-sim`:
//!
//! - [`ParamCell`]: owns a widget's parameter values, re-runs the pure
//!   recompute synchronously when they change, and caches the derived
//!   state the renderer draws from.
//! - [`AnimationTimer`]: the one asynchronous element in the widget
//!   family, a cancellable periodic task advancing the routing demo's
//!   highlighted token.
//!
//! Each widget instance owns its own cell and (at most one) timer; no
//! state is shared between instances.

pub mod cell;
pub mod timer;

pub use cell::ParamCell;
pub use timer::{AnimationTimer, DEFAULT_PERIOD};
