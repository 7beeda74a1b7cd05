//! Per-phase timing.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use asynclift_codegen::pipeline::{GenerationContext, Plugin};
use eyre::Result;

/// Logs how long each pipeline phase took.
#[derive(Debug, Default)]
pub struct PhaseTimer {
    started: Mutex<HashMap<String, Instant>>,
    timings: Mutex<Vec<(String, Duration)>>,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase timings in the order the phases finished.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn timings(&self) -> Vec<(String, Duration)> {
        self.timings
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl Plugin for PhaseTimer {
    fn name(&self) -> &'static str {
        "phase-timer"
    }

    fn on_before_phase(&self, phase: &str, _ctx: &mut GenerationContext<'_>) -> Result<()> {
        if let Ok(mut started) = self.started.lock() {
            started.insert(phase.to_string(), Instant::now());
        }
        Ok(())
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext<'_>) -> Result<()> {
        let start = self
            .started
            .lock()
            .ok()
            .and_then(|mut started| started.remove(phase));
        let Some(start) = start else {
            return Ok(());
        };

        let elapsed = start.elapsed();
        tracing::info!(
            phase,
            elapsed_us = elapsed.as_micros() as u64,
            diagnostics = ctx.diagnostics.len(),
            "phase finished"
        );
        if let Ok(mut timings) = self.timings.lock() {
            timings.push((phase.to_string(), elapsed));
        }
        Ok(())
    }
}
