//! Parameter cell: owns a widget's current parameters and the derived
//! state computed from them.
//!
//! The simulators are stateless `(config) -> result` functions; the cell
//! is the piece that remembers the last parameters, re-invokes the pure
//! recompute synchronously when they change, and hands the cached result
//! to the rendering layer. Unchanged parameters skip the recompute, which
//! is the only memoization the widgets need.

use tracing::trace;

/// A widget's parameter state plus its memoized derived state.
///
/// `C` is the plain parameter struct a widget's controls produce, `R` the
/// derived data the renderer draws from. The recompute function must be
/// pure; the cell calls it once at construction and once per distinct
/// parameter change.
pub struct ParamCell<C, R, F>
where
    F: Fn(&C) -> R,
{
    params: C,
    compute: F,
    value: R,
    recomputes: u64,
}

impl<C, R, F> ParamCell<C, R, F>
where
    F: Fn(&C) -> R,
{
    /// Build a cell and compute the initial derived state.
    pub fn new(params: C, compute: F) -> Self {
        let value = compute(&params);
        Self {
            params,
            compute,
            value,
            recomputes: 1,
        }
    }

    /// The current parameters.
    pub fn params(&self) -> &C {
        &self.params
    }

    /// The current derived state.
    pub fn value(&self) -> &R {
        &self.value
    }

    /// How many times the recompute has run (including the initial one).
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Force a recompute from the current parameters.
    ///
    /// Only needed when the compute function reads something beyond the
    /// parameters, which the simulators never do; exposed for the shell's
    /// reseed-on-reload path.
    pub fn refresh(&mut self) -> &R {
        self.value = (self.compute)(&self.params);
        self.recomputes += 1;
        &self.value
    }
}

impl<C, R, F> ParamCell<C, R, F>
where
    C: PartialEq,
    F: Fn(&C) -> R,
{
    /// Replace the parameters, recomputing only if they actually changed.
    pub fn set(&mut self, params: C) -> &R {
        if params == self.params {
            trace!("parameters unchanged, keeping cached result");
            return &self.value;
        }
        self.params = params;
        self.value = (self.compute)(&self.params);
        self.recomputes += 1;
        trace!(recomputes = self.recomputes, "recomputed derived state");
        &self.value
    }
}

impl<C, R, F> ParamCell<C, R, F>
where
    C: Clone + PartialEq,
    F: Fn(&C) -> R,
{
    /// Edit the parameters in place (slider drag style) and recompute if
    /// the edit changed anything.
    pub fn update(&mut self, edit: impl FnOnce(&mut C)) -> &R {
        let mut next = self.params.clone();
        edit(&mut next);
        self.set(next)
    }
}
