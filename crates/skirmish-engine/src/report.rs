//! Text reports and the periodic reporting worker.
//!
//! Reports are plain lines handed to an [`EventSink`]; formatting lives
//! here so the supervisor's final survivor report and the periodic
//! status report share one implementation.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::select;
use skirmish_core::{EntityView, EventSink, MapBounds};
use tracing::info;

use crate::metrics::EngineMetrics;
use crate::registry::EntityRegistry;
use crate::shutdown::StopToken;

/// Forwards every line to `tracing` at `INFO` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, line: &str) {
        info!(target: "skirmish::report", "{line}");
    }
}

/// Status block: map size, alive/dead counts, and the positions of up
/// to `sample` living entities in registry order.
pub fn status_lines(views: &[EntityView], bounds: MapBounds, sample: usize) -> Vec<String> {
    let alive = views.iter().filter(|v| v.state.alive).count();
    let mut lines = vec![
        format!("=== MAP {bounds} ==="),
        format!("Alive: {alive}"),
        format!("Dead: {}", views.len() - alive),
    ];
    lines.extend(
        views
            .iter()
            .filter(|v| v.state.alive)
            .take(sample)
            .map(|v| format!("  {} at {}", v.name, v.state.position)),
    );
    lines.push("---".to_string());
    lines
}

/// Final report: every survivor, numbered from 1.
pub fn survivor_lines(views: &[EntityView]) -> Vec<String> {
    let mut lines = vec!["=== SURVIVORS ===".to_string()];
    let survivors: Vec<_> = views.iter().filter(|v| v.state.alive).collect();
    lines.extend(
        survivors
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{}. {v}", i + 1)),
    );
    if survivors.is_empty() {
        lines.push("No survivors!".to_string());
    } else {
        lines.push(format!("Total survivors: {}", survivors.len()));
    }
    lines
}

pub(crate) fn emit_all(sink: &dyn EventSink, lines: &[String]) {
    for line in lines {
        sink.emit(line);
    }
}

/// State held by the reporting thread.
pub(crate) struct ReporterState {
    pub registry: Arc<EntityRegistry>,
    pub bounds: MapBounds,
    pub sink: Arc<dyn EventSink>,
    pub metrics: Arc<EngineMetrics>,
    pub interval: Duration,
    pub sample: usize,
    pub stop: StopToken,
}

impl ReporterState {
    /// Emit a status block every `interval` until stopped.
    pub fn run(self) {
        let ticker = crossbeam_channel::tick(self.interval);
        loop {
            select! {
                recv(self.stop.receiver()) -> _ => break,
                recv(ticker) -> _ => {}
            }
            if self.stop.is_stopped() {
                break;
            }
            let lines = status_lines(&self.registry.views(), self.bounds, self.sample);
            emit_all(&*self.sink, &lines);
            self.metrics.record_report();
        }
    }
}
