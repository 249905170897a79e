use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::events::{Event, EventKind, EventQueue};
use crate::models::{SimConfig, Time};
use crate::routing::shortest_queue;
use crate::state::{
    Customer, SimulationReport, SimulationRun, Snapshot, Stats, TellerReport, TellerState,
};

/// What a single call to [`Simulation::advance`] did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Arrival {
        customer: usize,
        teller: usize,
        queue_length: usize,
    },
    Departure {
        customer: usize,
        teller: usize,
        wait_time: Time,
    },
    Snapshot(Snapshot),
}

/// Discrete-event scheduler for N tellers fed by one arrival stream.
///
/// The clock only moves to the timestamp of the event being processed. Each
/// teller has at most one pending departure in the event queue, and exactly
/// one snapshot plus at least one arrival are always pending.
pub struct Simulation<R = StdRng> {
    config: SimConfig,
    clock: Time,
    events: EventQueue,
    tellers: Vec<TellerState>,
    stats: Stats,
    rng: R,
}

impl Simulation<StdRng> {
    /// Seeds from `config.seed`, or from OS entropy when no seed is set.
    pub fn new(config: SimConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let tellers = (0..config.tellers).map(TellerState::new).collect();
        let mut sim = Self {
            config,
            clock: 0,
            events: EventQueue::new(),
            tellers,
            stats: Stats::default(),
            rng,
        };

        let first_arrival = sim.generate_arrival()?;
        sim.schedule(first_arrival);
        sim.schedule(Event::snapshot(sim.config.snapshot_period));

        info!(
            tellers = sim.config.tellers,
            arrival_mean = sim.config.arrival.mean,
            arrival_variance = sim.config.arrival.variance,
            service_mean = sim.config.service.mean,
            service_variance = sim.config.service.variance,
            snapshot_period = sim.config.snapshot_period,
            "simulation initialized"
        );
        Ok(sim)
    }

    pub fn clock(&self) -> Time {
        self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tellers(&self) -> &[TellerState] {
        &self.tellers
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Processes the earliest pending event.
    pub fn advance(&mut self) -> Result<Outcome> {
        let event = self
            .events
            .pop()
            .ok_or(Error::QueueExhausted(self.clock))?;

        // A teller idles for the whole gap only if it was empty when the gap began.
        let elapsed = event.time - self.clock;
        for teller in self.tellers.iter_mut().filter(|teller| teller.is_empty()) {
            teller.add_idle_time(elapsed);
        }
        self.clock = event.time;
        self.stats.events_processed += 1;

        debug!(
            clock = self.clock,
            kind = ?event.kind,
            pending = self.events.len(),
            "dispatching event"
        );

        match event.kind {
            EventKind::Arrival { customer } => self.handle_arrival(Customer {
                id: customer,
                arrival_time: event.time,
                service_time: event.service_time,
            }),
            EventKind::Departure { teller } => self.handle_departure(teller),
            EventKind::Snapshot => Ok(Outcome::Snapshot(self.handle_snapshot()?)),
        }
    }

    /// Advances while `clock() <= time_limit`, handing every snapshot to
    /// `on_snapshot`.
    pub fn run_until<F>(&mut self, time_limit: Time, mut on_snapshot: F) -> Result<()>
    where
        F: FnMut(&Snapshot),
    {
        while self.clock <= time_limit {
            if let Outcome::Snapshot(snapshot) = self.advance()? {
                on_snapshot(&snapshot);
            }
        }

        info!(
            clock = self.clock,
            events_processed = self.stats.events_processed,
            customers_served = self.stats.customers_served,
            "simulation reached time limit"
        );
        Ok(())
    }

    pub fn summary(&self) -> SimulationReport {
        let clock = self.clock;
        let tellers = self
            .tellers
            .iter()
            .map(|teller| TellerReport {
                id: teller.id,
                served: teller.served(),
                idle_time: teller.idle_time(),
                idle_pct: round_to(ratio(teller.idle_time(), clock as f64) * 100.0, 3),
                queue_length: teller.len(),
            })
            .collect();
        let generated = self.stats.customers_generated as f64;
        let served = self.stats.customers_served as f64;

        SimulationReport {
            clock,
            events_processed: self.stats.events_processed,
            customers_generated: self.stats.customers_generated,
            customers_arrived: self.stats.customers_arrived,
            customers_served: self.stats.customers_served,
            avg_inter_arrival: round_to(ratio(self.stats.total_inter_arrival_time, generated), 3),
            avg_service: round_to(ratio(self.stats.total_service_time, generated), 3),
            avg_wait: round_to(ratio(self.stats.total_wait_time, served), 3),
            max_wait: self.stats.max_wait_time,
            max_queue_length: self.stats.max_queue_length,
            customers_waiting: self.tellers.iter().map(TellerState::len).sum(),
            tellers,
        }
    }

    fn handle_arrival(&mut self, customer: Customer) -> Result<Outcome> {
        let teller = shortest_queue(&self.tellers);
        self.tellers[teller].enqueue(customer);
        self.stats.customers_arrived += 1;

        let queue_length = self.tellers[teller].len();
        if queue_length == 1 {
            self.schedule_departure(teller)?;
        }

        let next_arrival = self.generate_arrival()?;
        self.schedule(next_arrival);

        let longest = self.tellers.iter().map(TellerState::len).max().unwrap_or(0);
        self.stats.max_queue_length = self.stats.max_queue_length.max(longest);

        Ok(Outcome::Arrival {
            customer: customer.id,
            teller,
            queue_length,
        })
    }

    fn handle_departure(&mut self, teller: usize) -> Result<Outcome> {
        let customer = self.tellers[teller].dequeue_front()?;
        // The clock is the end of service, so start of service is clock - service_time.
        let wait_time = self.clock - (customer.arrival_time + customer.service_time);
        debug_assert!(wait_time >= 0, "wait time must not be negative");

        self.tellers[teller].record_service(customer.service_time);
        self.stats.customers_served += 1;
        self.stats.total_wait_time = add_time(self.stats.total_wait_time, wait_time)?;
        self.stats.max_wait_time = self.stats.max_wait_time.max(wait_time);

        self.schedule_departure(teller)?;

        Ok(Outcome::Departure {
            customer: customer.id,
            teller,
            wait_time,
        })
    }

    fn handle_snapshot(&mut self) -> Result<Snapshot> {
        let snapshot = Snapshot {
            time: self.clock,
            pending_events: self.events.len(),
            queue_lengths: self.tellers.iter().map(TellerState::len).collect(),
        };
        info!(
            time = snapshot.time,
            pending_events = snapshot.pending_events,
            queue_lengths = ?snapshot.queue_lengths,
            "snapshot"
        );

        let next = add_time(self.clock, self.config.snapshot_period)?;
        self.schedule(Event::snapshot(next));
        Ok(snapshot)
    }

    /// Schedules service completion for the customer at the front of the
    /// teller's queue. Callers only invoke this when no departure is pending
    /// for the teller.
    fn schedule_departure(&mut self, teller: usize) -> Result<()> {
        if let Some(front) = self.tellers[teller].front() {
            let service_time = front.service_time;
            let at = add_time(self.clock, service_time)?;
            self.schedule(Event::departure(at, service_time, teller));
        }
        Ok(())
    }

    fn generate_arrival(&mut self) -> Result<Event> {
        let inter_arrival = self.config.arrival.sample(&mut self.rng);
        let service_time = self.config.service.sample(&mut self.rng);
        let at = add_time(self.clock, inter_arrival)?;
        self.stats.customers_generated += 1;
        self.stats.total_inter_arrival_time =
            add_time(self.stats.total_inter_arrival_time, inter_arrival)?;
        self.stats.total_service_time = add_time(self.stats.total_service_time, service_time)?;

        Ok(Event::arrival(
            at,
            service_time,
            self.stats.customers_generated as usize,
        ))
    }

    fn schedule(&mut self, event: Event) {
        trace!(now = self.clock, at = event.time, kind = ?event.kind, "scheduling event");
        self.events.push(event);
    }
}

pub fn run_simulation(config: &SimConfig) -> Result<SimulationRun> {
    run_simulation_with_options(config, true)
}

/// Runs without retaining snapshots; they are still logged as they fire.
pub fn run_simulation_summary(config: &SimConfig) -> Result<SimulationRun> {
    run_simulation_with_options(config, false)
}

pub fn run_simulation_with_options(
    config: &SimConfig,
    store_snapshots: bool,
) -> Result<SimulationRun> {
    let sim = Simulation::new(config.clone())?;
    run_to_limit(sim, store_snapshots)
}

pub fn run_simulation_with_rng<R: Rng>(
    config: &SimConfig,
    rng: R,
    store_snapshots: bool,
) -> Result<SimulationRun> {
    let sim = Simulation::with_rng(config.clone(), rng)?;
    run_to_limit(sim, store_snapshots)
}

fn run_to_limit<R: Rng>(
    mut sim: Simulation<R>,
    store_snapshots: bool,
) -> Result<SimulationRun> {
    let time_limit = sim.config().time_limit;
    let mut snapshots = Vec::new();
    sim.run_until(time_limit, |snapshot| {
        if store_snapshots {
            snapshots.push(snapshot.clone());
        }
    })?;

    Ok(SimulationRun {
        config: sim.config().clone(),
        snapshots,
        report: sim.summary(),
    })
}

fn add_time(lhs: Time, rhs: Time) -> Result<Time> {
    lhs.checked_add(rhs).ok_or(Error::TimeOverflow(lhs, rhs))
}

fn ratio(total: Time, count: f64) -> f64 {
    if count == 0.0 {
        0.0
    } else {
        total as f64 / count
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
