//! Expands a strategy template into dated phases for one server

use chrono::{Days, NaiveDate};

use super::catalog::{Phase, PhaseTemplate};
use super::types::{PhaseMitigation, PhaseRisk, ScheduledPhase};
use crate::inventory::{Level, ServerRecord, Strategy};

/// Idle days between consecutive phases of one server
pub const PHASE_BUFFER_DAYS: u64 = 1;

impl Level {
    /// Factor applied to template durations
    pub fn duration_multiplier(self) -> f64 {
        match self {
            Level::Low => 1.0,
            Level::Medium => 1.5,
            Level::High => 2.0,
        }
    }
}

/// Template duration scaled by complexity, truncated to whole days
pub fn adjusted_duration(base_days: u32, complexity: Level) -> u32 {
    (f64::from(base_days) * complexity.duration_multiplier()) as u32
}

/// Phases of one server laid out on the calendar
#[derive(Debug, Clone)]
pub struct ServerSchedule {
    pub phases: Vec<ScheduledPhase>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Lay out a server's phases back to back from `start_date`
pub fn schedule_server(server: &ServerRecord, start_date: NaiveDate) -> ServerSchedule {
    let strategy = server.strategy();
    let complexity = server.complexity();

    let mut cursor = start_date;
    let mut end_date = start_date;
    let mut phases = Vec::with_capacity(Phase::ALL.len());

    for (idx, template) in strategy.phase_template().iter().enumerate() {
        if idx > 0 {
            cursor = end_date + Days::new(PHASE_BUFFER_DAYS);
        }
        let phase = schedule_phase(template, strategy, complexity, cursor);
        end_date = phase.end_date;
        phases.push(phase);
    }

    ServerSchedule {
        phases,
        start_date,
        end_date,
    }
}

fn schedule_phase(
    template: &PhaseTemplate,
    strategy: Strategy,
    complexity: Level,
    start_date: NaiveDate,
) -> ScheduledPhase {
    let duration = adjusted_duration(template.base_days, complexity);

    ScheduledPhase {
        name: template.phase,
        start_date,
        end_date: start_date + Days::new(u64::from(duration)),
        duration,
        tasks: template.tasks,
        deliverables: template.deliverables,
        validation: template.validation,
        risks: assess_phase_risks(template.phase, strategy, complexity),
        mitigation: phase_mitigations(template.phase, strategy),
    }
}

/// Baseline and strategy risks for a phase, escalated for high-complexity servers
pub fn assess_phase_risks(phase: Phase, strategy: Strategy, complexity: Level) -> Vec<PhaseRisk> {
    phase
        .baseline_risks()
        .iter()
        .chain(strategy.phase_risks(phase))
        .map(|risk| {
            let mut risk = *risk;
            if complexity == Level::High && risk.severity == Level::Medium {
                risk.severity = Level::High;
            }
            risk
        })
        .collect()
}

pub fn phase_mitigations(phase: Phase, strategy: Strategy) -> Vec<PhaseMitigation> {
    phase
        .baseline_mitigations()
        .iter()
        .chain(strategy.phase_mitigations(phase))
        .copied()
        .collect()
}
