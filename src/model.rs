use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;

/// Algorithm configuration sent to the optimization service.
///
/// Integers are signed so that out-of-range edits (including negatives) are
/// representable; the service is the authority on bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub max_generations: i64,
    pub population_size: i64,
    pub mutation_rate: f64,
    pub tournament_size: i64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_generations: 200,
            population_size: 60,
            mutation_rate: 0.2,
            tournament_size: 3,
        }
    }
}

impl Parameters {
    /// Names of fields outside the bounds the service accepts.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !(1..=5000).contains(&self.max_generations) {
            out.push("max_generations");
        }
        if !(2..=5000).contains(&self.population_size) {
            out.push("population_size");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            out.push("mutation_rate");
        }
        if !(2..=50).contains(&self.tournament_size) {
            out.push("tournament_size");
        }
        out
    }
}

/// Named parameter bundle offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(rename = "G")]
    pub max_generations: i64,
    #[serde(rename = "N")]
    pub population_size: i64,
    #[serde(rename = "p_m")]
    pub mutation_rate: f64,
    #[serde(rename = "k")]
    pub tournament_size: i64,
}

impl Preset {
    pub fn label(&self) -> String {
        format!(
            "G={}, N={}, p_m={}, k={}",
            self.max_generations, self.population_size, self.mutation_rate, self.tournament_size
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentIds {
    pub class_id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub room_id: i64,
    pub slot_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentLabels {
    pub class: String,
    pub course: String,
    pub instructor: String,
    pub room: String,
    pub slot: String,
}

/// One scheduled unit in both identifier and human-readable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub ids: AssignmentIds,
    pub labels: AssignmentLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fitness: f64,
    pub hard_violation_count: u32,
    pub soft_violation_count: u32,
    pub hard_violation_details: Vec<String>,
    pub soft_violation_details: Vec<String>,
}

/// Completeness check reported by the service alongside the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCount {
    pub expected_total: Option<u64>,
    pub generated_total: Option<u64>,
    pub ok: Option<bool>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(with = "time::serde::rfc3339")]
    pub completed_at: OffsetDateTime,
    pub params_used: Parameters,
    pub assignments: Vec<Assignment>,
    pub evaluation: Evaluation,
    pub summary_text: String,
    /// Best-so-far fitness per generation.
    pub fitness_history: Vec<f64>,
    pub explanation_text: String,
    #[serde(default)]
    pub schedule_count: Option<ScheduleCount>,
}

/// Events emitted by the run controller and consumed by presentation layers.
#[derive(Debug, Clone)]
pub enum RunEvent {
    PresetsLoaded {
        presets: Vec<Preset>,
    },
    ServiceHealth {
        reachable: bool,
    },
    RunStarted {
        params: Parameters,
    },
    RunSucceeded {
        // Shared snapshot; the controller is the only writer.
        result: Arc<RunResult>,
    },
    RunFailed {
        message: String,
    },
    Info(String),
}
