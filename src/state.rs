use serde::Serialize;
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::models::{SimConfig, Time};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Customer {
    pub id: usize,
    pub arrival_time: Time,
    pub service_time: Time,
}

#[derive(Clone, Debug)]
pub struct TellerState {
    pub id: usize,
    queue: VecDeque<Customer>,
    idle_time: Time,
    served: u64,
    busy_time: Time,
}

impl TellerState {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
            idle_time: 0,
            served: 0,
            busy_time: 0,
        }
    }

    pub fn enqueue(&mut self, customer: Customer) {
        self.queue.push_back(customer);
    }

    pub fn dequeue_front(&mut self) -> Result<Customer> {
        self.queue.pop_front().ok_or(Error::EmptyQueue(self.id))
    }

    pub fn front(&self) -> Option<&Customer> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn add_idle_time(&mut self, delta: Time) {
        debug_assert!(delta >= 0, "idle time must not decrease");
        self.idle_time += delta;
    }

    pub fn record_service(&mut self, service_time: Time) {
        self.served += 1;
        self.busy_time += service_time;
    }

    pub fn idle_time(&self) -> Time {
        self.idle_time
    }

    pub fn served(&self) -> u64 {
        self.served
    }

    pub fn busy_time(&self) -> Time {
        self.busy_time
    }
}

/// Running counters owned by the scheduler.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub events_processed: u64,
    pub customers_generated: u64,
    pub customers_arrived: u64,
    pub customers_served: u64,
    pub total_inter_arrival_time: Time,
    pub total_service_time: Time,
    pub total_wait_time: Time,
    pub max_wait_time: Time,
    pub max_queue_length: usize,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub time: Time,
    pub pending_events: usize,
    pub queue_lengths: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TellerReport {
    pub id: usize,
    pub served: u64,
    pub idle_time: Time,
    pub idle_pct: f64,
    pub queue_length: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationReport {
    pub clock: Time,
    pub events_processed: u64,
    pub customers_generated: u64,
    pub customers_arrived: u64,
    pub customers_served: u64,
    pub avg_inter_arrival: f64,
    pub avg_service: f64,
    pub avg_wait: f64,
    pub max_wait: Time,
    pub max_queue_length: usize,
    pub customers_waiting: usize,
    pub tellers: Vec<TellerReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationRun {
    pub config: SimConfig,
    pub snapshots: Vec<Snapshot>,
    pub report: SimulationReport,
}
