//! Simulation observer trait for progress reporting and data collection.

use nursery_agent::ToiletState;
use nursery_core::{AgentId, ClassId, SimTime};

use crate::event::EventState;

/// Callbacks invoked by [`ClassManager::step_with`][crate::ClassManager::step_with]
/// at key points in the tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — event logger
///
/// ```rust,ignore
/// struct EventLog(Vec<(ClassId, EventState)>);
///
/// impl SimObserver for EventLog {
///     fn on_event_transition(&mut self, class: ClassId, _from: EventState, to: EventState) {
///         self.0.push((class, to));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once at the end of each tick.
    fn on_tick_end(&mut self, _now: SimTime) {}

    /// Called when a class's event lifecycle changes state.
    fn on_event_transition(&mut self, _class: ClassId, _from: EventState, _to: EventState) {}

    /// Called when an agent's toilet state changes (outermost transition of
    /// the tick; multi-hop progress within one tick reports the endpoints).
    fn on_toilet_transition(&mut self, _agent: AgentId, _from: ToiletState, _to: ToiletState) {}

    /// Called for each floating staff member on every rotation event.
    fn on_rotation(&mut self, _agent: AgentId, _class: ClassId) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call
/// `step_with` but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
