use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::models::Time;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    Arrival { customer: usize },
    Departure { teller: usize },
    Snapshot,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Event {
    pub time: Time,
    pub service_time: Time,
    pub kind: EventKind,
}

impl Event {
    pub fn arrival(time: Time, service_time: Time, customer: usize) -> Self {
        Self {
            time,
            service_time,
            kind: EventKind::Arrival { customer },
        }
    }

    pub fn departure(time: Time, service_time: Time, teller: usize) -> Self {
        Self {
            time,
            service_time,
            kind: EventKind::Departure { teller },
        }
    }

    pub fn snapshot(time: Time) -> Self {
        Self {
            time,
            service_time: 0,
            kind: EventKind::Snapshot,
        }
    }
}

/// An event paired with its insertion sequence. Equal timestamps pop in the
/// order they were scheduled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScheduledEvent {
    pub seq: u64,
    pub event: Event,
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.event
            .time
            .cmp(&other.event.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(ScheduledEvent { seq, event }));
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(scheduled)| scheduled.event)
    }

    pub fn peek_time(&self) -> Option<Time> {
        self.heap.peek().map(|Reverse(scheduled)| scheduled.event.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending events in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.heap.iter().map(|Reverse(scheduled)| &scheduled.event)
    }

    pub fn pending_departures(&self, teller: usize) -> usize {
        self.iter()
            .filter(|event| event.kind == EventKind::Departure { teller })
            .count()
    }

    pub fn pending_snapshots(&self) -> usize {
        self.iter()
            .filter(|event| event.kind == EventKind::Snapshot)
            .count()
    }

    pub fn pending_arrivals(&self) -> usize {
        self.iter()
            .filter(|event| matches!(event.kind, EventKind::Arrival { .. }))
            .count()
    }
}
