//! Chart Adapter - Instance Lifecycle State Machine
//!
//! Keeps one chart instance in sync with declarative props.
//!
//! ```text
//!            first render, props set           props changed, same shape
//!   Absent ────────────────────────────► Ready ───────────────────────► Ready (patched)
//!     ▲                                    │
//!     │ disconnect                         │ props changed, shape differs
//!     └────────────────────────────────────┤
//!                                          ▼
//!                                  destroy + create ──► Ready
//! ```
//!
//! The instance is only created once a canvas exists, and destroyed exactly
//! once per creation.

use serde_json::Value;

use super::library::{Canvas, ChartInstance, ChartLibrary, UpdateMode};
use super::shape::{ConfigShape, needs_recreate};

/// Declarative chart props
pub trait ChartSpec: Clone + PartialEq {
    fn shape(&self) -> ConfigShape;

    /// Full configuration for a fresh instance
    fn config(&self) -> Value;

    fn labels(&self) -> Value;

    fn datasets(&self) -> Value;

    /// Option patch applied on in-place updates (colours, axis titles)
    fn options_patch(&self) -> Value;
}

pub enum ChartState<I> {
    Absent,
    Ready { instance: I, shape: ConfigShape },
}

/// What a reconcile pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Props equal to the previous ones
    Unchanged,
    /// No canvas yet; creation waits for the first render
    Deferred,
    Created,
    Recreated,
    Patched,
}

pub struct ChartAdapter<L: ChartLibrary, S: ChartSpec> {
    library: L,
    canvas: Option<Canvas>,
    props: Option<S>,
    state: ChartState<L::Instance>,
}

impl<L: ChartLibrary, S: ChartSpec> ChartAdapter<L, S> {
    pub fn new(library: L) -> Self {
        Self {
            library,
            canvas: None,
            props: None,
            state: ChartState::Absent,
        }
    }

    /// The canvas became available
    pub fn first_render(&mut self, canvas: Canvas) -> Reconcile {
        self.canvas = Some(canvas);
        if self.is_ready() {
            return Reconcile::Unchanged;
        }
        match self.props.clone() {
            Some(props) => self.create(&props),
            None => Reconcile::Unchanged,
        }
    }

    /// Apply new props, creating, rebuilding or patching the instance
    pub fn set_props(&mut self, props: S) -> Reconcile {
        let ready = matches!(self.state, ChartState::Ready { .. });
        if ready && self.props.as_ref() == Some(&props) {
            return Reconcile::Unchanged;
        }
        self.props = Some(props.clone());

        if self.canvas.is_none() {
            return Reconcile::Deferred;
        }

        let next = props.shape();
        let recreate = match &self.state {
            ChartState::Absent => return self.create(&props),
            ChartState::Ready { shape, .. } => needs_recreate(shape, &next),
        };

        if recreate {
            tracing::debug!(?next, "Chart shape changed, recreating");
            self.destroy();
            self.create(&props);
            return Reconcile::Recreated;
        }

        if let ChartState::Ready { instance, .. } = &mut self.state {
            instance.set_data(props.labels(), props.datasets());
            instance.merge_options(props.options_patch());
            instance.update(UpdateMode::Immediate);
        }
        Reconcile::Patched
    }

    /// The host left the screen: release the instance
    pub fn disconnect(&mut self) {
        self.destroy();
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready { .. })
    }

    pub fn instance(&self) -> Option<&L::Instance> {
        match &self.state {
            ChartState::Ready { instance, .. } => Some(instance),
            ChartState::Absent => None,
        }
    }

    pub fn props(&self) -> Option<&S> {
        self.props.as_ref()
    }

    fn create(&mut self, props: &S) -> Reconcile {
        let Some(canvas) = &self.canvas else {
            return Reconcile::Deferred;
        };
        let instance = self.library.create(canvas, props.config());
        self.state = ChartState::Ready {
            instance,
            shape: props.shape(),
        };
        Reconcile::Created
    }

    fn destroy(&mut self) {
        if let ChartState::Ready { mut instance, .. } =
            std::mem::replace(&mut self.state, ChartState::Absent)
        {
            instance.destroy();
        }
    }
}

impl<L: ChartLibrary, S: ChartSpec> Drop for ChartAdapter<L, S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
