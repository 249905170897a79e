use std::fmt::{self, Write};

use crate::error::Result;
use crate::models::SimConfig;
use crate::state::{SimulationReport, SimulationRun, Snapshot};

pub trait Formatter {
    fn write(&self, run: &SimulationRun) -> Result<String>;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, run: &SimulationRun) -> Result<String> {
        let mut output = String::new();
        write_metadata(&mut output, run)?;
        if !run.snapshots.is_empty() {
            output.push_str("Snapshots:\n");
            for snapshot in &run.snapshots {
                output.push_str(&format_snapshot(snapshot));
                output.push('\n');
            }
        }
        write_report(&mut output, &run.report)?;
        Ok(output)
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, run: &SimulationRun) -> Result<String> {
        let mut output = String::new();
        write_report(&mut output, &run.report)?;
        Ok(output)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, run: &SimulationRun) -> Result<String> {
        let mut output = serde_json::to_string_pretty(run)?;
        output.push('\n');
        Ok(output)
    }
}

pub fn format_snapshot(snapshot: &Snapshot) -> String {
    format!(
        "t={} pending_events={} queues={:?}",
        snapshot.time, snapshot.pending_events, snapshot.queue_lengths
    )
}

pub fn format_config(config: &SimConfig) -> String {
    format!(
        concat!(
            "Tellers: {}\n",
            "Arrival: mean {}, variance {}\n",
            "Service: mean {}, variance {}\n",
            "Time limit: {}\n",
            "Snapshot period: {}\n",
            "Seed: {}\n",
        ),
        config.tellers,
        config.arrival.mean,
        config.arrival.variance,
        config.service.mean,
        config.service.variance,
        config.time_limit,
        config.snapshot_period,
        config.seed_label(),
    )
}

fn write_metadata(output: &mut String, run: &SimulationRun) -> fmt::Result {
    output.push_str("Metadata:\n");
    writeln!(output, "tellers: {}", run.config.tellers)?;
    writeln!(output, "time_limit: {}", run.config.time_limit)?;
    writeln!(output, "snapshot_period: {}", run.config.snapshot_period)?;
    writeln!(output, "seed: {}", run.config.seed_label())?;
    writeln!(output, "clock: {}", run.report.clock)
}

fn write_report(output: &mut String, report: &SimulationReport) -> fmt::Result {
    output.push_str("Results:\n");
    writeln!(output, "customers_served: {}", report.customers_served)?;
    writeln!(output, "customers_arrived: {}", report.customers_arrived)?;
    writeln!(output, "customers_generated: {}", report.customers_generated)?;
    writeln!(output, "avg_inter_arrival: {:.3}", report.avg_inter_arrival)?;
    writeln!(output, "avg_service: {:.3}", report.avg_service)?;
    writeln!(output, "avg_wait: {:.3}", report.avg_wait)?;
    writeln!(output, "max_wait: {}", report.max_wait)?;
    writeln!(output, "max_queue_length: {}", report.max_queue_length)?;
    writeln!(output, "customers_waiting: {}", report.customers_waiting)?;
    output.push_str("Tellers:\n");
    for teller in &report.tellers {
        writeln!(
            output,
            "teller {}: idle {:.3}% (served: {}, queued: {})",
            teller.id, teller.idle_pct, teller.served, teller.queue_length
        )?;
    }
    Ok(())
}
