// src/simulation/clock.rs

use serde::Serialize;

/// Sentinel time meaning "not scheduled".
pub const NOT_SCHEDULED: f64 = f64::INFINITY;

/// The four event types of the inventory model.
///
/// Discriminants follow the classical event numbering. When two events are
/// due at exactly the same time the lower number is dispatched first, so
/// the precedence is order arrival, demand, report, evaluation. This matters
/// in practice: evaluation and report both fall on `t = horizon`, and the
/// report must win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    OrderArrival = 1,
    Demand = 2,
    Report = 3,
    Evaluation = 4,
}

impl EventKind {
    /// All event kinds in tie-break order.
    pub const PRECEDENCE: [EventKind; 4] = [
        EventKind::OrderArrival,
        EventKind::Demand,
        EventKind::Report,
        EventKind::Evaluation,
    ];

    fn slot(self) -> usize {
        self as usize - 1
    }
}

/// Next-event time-advance clock with one slot per event kind.
#[derive(Debug, Clone)]
pub struct EventClock {
    now: f64,
    next_time: [f64; 4],
}

impl Default for EventClock {
    fn default() -> Self {
        Self::new()
    }
}

impl EventClock {
    /// A clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_time: [NOT_SCHEDULED; 4],
        }
    }

    /// Overwrites the scheduled time for `kind`.
    pub fn schedule(&mut self, kind: EventKind, time: f64) {
        self.next_time[kind.slot()] = time;
    }

    pub fn cancel(&mut self, kind: EventKind) {
        self.schedule(kind, NOT_SCHEDULED);
    }

    pub fn scheduled_time(&self, kind: EventKind) -> f64 {
        self.next_time[kind.slot()]
    }

    pub fn is_scheduled(&self, kind: EventKind) -> bool {
        self.scheduled_time(kind) < NOT_SCHEDULED
    }

    /// Selects the earliest event and advances the clock to it.
    ///
    /// Returns `None` only if nothing is scheduled at all.
    pub fn next_event(&mut self) -> Option<(EventKind, f64)> {
        let mut best: Option<(EventKind, f64)> = None;
        for kind in EventKind::PRECEDENCE {
            let time = self.scheduled_time(kind);
            // Strict comparison keeps the earlier entry in PRECEDENCE on ties.
            if time < NOT_SCHEDULED && best.map_or(true, |(_, t)| time < t) {
                best = Some((kind, time));
            }
        }
        if let Some((_, time)) = best {
            self.now = time;
        }
        best
    }

    /// Time of the most recently selected event.
    pub fn current_time(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clock_has_no_event() {
        let mut clock = EventClock::new();
        assert_eq!(clock.next_event(), None);
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn picks_minimum_time() {
        let mut clock = EventClock::new();
        clock.schedule(EventKind::Demand, 0.3);
        clock.schedule(EventKind::Evaluation, 0.0);
        clock.schedule(EventKind::Report, 120.0);

        assert_eq!(clock.next_event(), Some((EventKind::Evaluation, 0.0)));
        clock.schedule(EventKind::Evaluation, 1.0);
        assert_eq!(clock.next_event(), Some((EventKind::Demand, 0.3)));
        assert_eq!(clock.current_time(), 0.3);
    }

    #[test]
    fn ties_follow_event_numbering() {
        let mut clock = EventClock::new();
        for kind in [
            EventKind::Evaluation,
            EventKind::Report,
            EventKind::Demand,
            EventKind::OrderArrival,
        ] {
            clock.schedule(kind, 5.0);
        }

        let mut order = Vec::new();
        while let Some((kind, _)) = clock.next_event() {
            order.push(kind);
            clock.cancel(kind);
        }
        assert_eq!(order, EventKind::PRECEDENCE.to_vec());
    }

    #[test]
    fn report_beats_evaluation_at_horizon() {
        let mut clock = EventClock::new();
        clock.schedule(EventKind::Evaluation, 120.0);
        clock.schedule(EventKind::Report, 120.0);
        assert_eq!(clock.next_event(), Some((EventKind::Report, 120.0)));
    }

    #[test]
    fn cancel_unschedules() {
        let mut clock = EventClock::new();
        clock.schedule(EventKind::OrderArrival, 2.0);
        assert!(clock.is_scheduled(EventKind::OrderArrival));
        clock.cancel(EventKind::OrderArrival);
        assert!(!clock.is_scheduled(EventKind::OrderArrival));
    }
}
