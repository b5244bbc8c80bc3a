//! Read-only projections of a successful run.
//!
//! The table projection is shared with the exporters so that every surface
//! shows the same rows in the same order.

use crate::model::{Assignment, RunResult};
use std::sync::Arc;

/// Column header shared by the table view and both export formats.
pub const TABLE_HEADER: [&str; 5] = ["Class", "Course", "Instructor", "Room", "Slot"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub class: String,
    pub course: String,
    pub instructor: String,
    pub room: String,
    pub slot: String,
}

impl ScheduleRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            self.class.as_str(),
            self.course.as_str(),
            self.instructor.as_str(),
            self.room.as_str(),
            self.slot.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Hard,
    Soft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationLine {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryProjection {
    pub fitness: f64,
    pub hard_count: u32,
    pub soft_count: u32,
    /// Hard details followed by soft details, each in service order.
    pub violations: Vec<ViolationLine>,
    pub summary_text: String,
    pub explanation: String,
    pub schedule_check: Option<(bool, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub summary: SummaryProjection,
    pub chart: Vec<(f64, f64)>,
    pub table: Vec<ScheduleRow>,
}

impl ResultView {
    pub fn from_result(result: &RunResult) -> Self {
        Self {
            summary: summary_projection(result),
            chart: chart_series(&result.fitness_history),
            table: table_rows(&result.assignments),
        }
    }
}

pub fn summary_projection(result: &RunResult) -> SummaryProjection {
    let ev = &result.evaluation;
    let violations = ev
        .hard_violation_details
        .iter()
        .map(|text| ViolationLine {
            severity: Severity::Hard,
            text: text.clone(),
        })
        .chain(ev.soft_violation_details.iter().map(|text| ViolationLine {
            severity: Severity::Soft,
            text: text.clone(),
        }))
        .collect();
    let schedule_check = result.schedule_count.as_ref().and_then(|c| {
        let message = c.message.clone().or_else(|| match (c.expected_total, c.generated_total) {
            (Some(e), Some(g)) => Some(format!("Expected {e} scheduled units, generated {g}.")),
            _ => None,
        })?;
        let ok = c
            .ok
            .unwrap_or_else(|| c.expected_total.is_some() && c.expected_total == c.generated_total);
        Some((ok, message))
    });
    SummaryProjection {
        fitness: ev.fitness,
        hard_count: ev.hard_violation_count,
        soft_count: ev.soft_violation_count,
        violations,
        summary_text: result.summary_text.clone(),
        explanation: result.explanation_text.clone(),
        schedule_check,
    }
}

/// `(generation, fitness)` points for the convergence chart.
pub fn chart_series(history: &[f64]) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

/// One row per assignment, in assignment order.
pub fn table_rows(assignments: &[Assignment]) -> Vec<ScheduleRow> {
    assignments
        .iter()
        .map(|a| ScheduleRow {
            class: a.labels.class.clone(),
            course: a.labels.course.clone(),
            instructor: a.labels.instructor.clone(),
            room: a.labels.room.clone(),
            slot: a.labels.slot.clone(),
        })
        .collect()
}

/// Caches the projections of the current result, keyed by snapshot identity.
#[derive(Debug, Default)]
pub struct ResultViewer {
    source: Option<Arc<RunResult>>,
    view: Option<ResultView>,
    revision: u64,
}

impl ResultViewer {
    /// Recompute only when `current` is a different snapshot than last time.
    pub fn sync(&mut self, current: Option<&Arc<RunResult>>) -> Option<&ResultView> {
        match current {
            None => {
                if self.source.take().is_some() {
                    self.revision += 1;
                }
                self.view = None;
            }
            Some(r) => {
                let same = self.source.as_ref().is_some_and(|s| Arc::ptr_eq(s, r));
                if !same {
                    self.view = Some(ResultView::from_result(r));
                    self.source = Some(Arc::clone(r));
                    self.revision += 1;
                }
            }
        }
        self.view.as_ref()
    }

    pub fn view(&self) -> Option<&ResultView> {
        self.view.as_ref()
    }

    /// Bumped whenever the projected snapshot changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{
        AssignmentIds, AssignmentLabels, Evaluation, Parameters, ScheduleCount,
    };
    use time::OffsetDateTime;

    pub(crate) fn assignment(i: i64, class: &str, slot: &str) -> Assignment {
        Assignment {
            ids: AssignmentIds {
                class_id: i,
                course_id: 10 + i,
                instructor_id: 100 + i,
                room_id: 1000 + i,
                slot_id: i,
            },
            labels: AssignmentLabels {
                class: class.to_string(),
                course: format!("Course {i}"),
                instructor: format!("Lecturer {i}"),
                room: format!("Room {i}"),
                slot: slot.to_string(),
            },
        }
    }

    pub(crate) fn sample_result() -> RunResult {
        RunResult {
            completed_at: OffsetDateTime::UNIX_EPOCH,
            params_used: Parameters::default(),
            // Deliberately not sorted by class or slot.
            assignments: vec![
                assignment(3, "TI-2A", "Rabu 13:00-14:40"),
                assignment(1, "TI-1A", "Senin 07:30-09:10"),
                assignment(2, "TI-1B", "Senin 07:30-09:10"),
            ],
            evaluation: Evaluation {
                fitness: 880.0,
                hard_violation_count: 1,
                soft_violation_count: 2,
                hard_violation_details: vec!["C1: room clash".into()],
                soft_violation_details: vec!["S2: preference".into(), "S1: capacity".into()],
            },
            summary_text: "Best fitness 880".into(),
            fitness_history: vec![10.0, 25.0, 25.0, 40.0],
            explanation_text: "Higher is better.".into(),
            schedule_count: Some(ScheduleCount {
                expected_total: Some(3),
                generated_total: Some(3),
                ok: None,
                message: None,
            }),
        }
    }

    #[test]
    fn chart_series_indexes_every_generation() {
        assert_eq!(
            chart_series(&[10.0, 25.0, 25.0, 40.0]),
            vec![(0.0, 10.0), (1.0, 25.0), (2.0, 25.0), (3.0, 40.0)]
        );
        assert!(chart_series(&[]).is_empty());
    }

    #[test]
    fn table_keeps_assignment_order_and_labels() {
        let result = sample_result();
        let rows = table_rows(&result.assignments);
        assert_eq!(rows.len(), result.assignments.len());
        for (row, a) in rows.iter().zip(&result.assignments) {
            assert_eq!(
                row.cells(),
                [
                    a.labels.class.as_str(),
                    a.labels.course.as_str(),
                    a.labels.instructor.as_str(),
                    a.labels.room.as_str(),
                    a.labels.slot.as_str(),
                ]
            );
        }
        assert_eq!(rows[0].class, "TI-2A");
    }

    #[test]
    fn violations_are_hard_then_soft() {
        let s = summary_projection(&sample_result());
        let texts: Vec<_> = s.violations.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts, vec!["C1: room clash", "S2: preference", "S1: capacity"]);
        assert_eq!(s.violations[0].severity, Severity::Hard);
        assert_eq!(s.violations[2].severity, Severity::Soft);
        assert_eq!(s.hard_count as usize, 1);
        assert_eq!(s.soft_count as usize, 2);
    }

    #[test]
    fn schedule_check_falls_back_to_totals() {
        let s = summary_projection(&sample_result());
        let (ok, msg) = s.schedule_check.unwrap();
        assert!(ok);
        assert!(msg.contains("3"));
    }

    #[test]
    fn viewer_recomputes_only_on_new_snapshot() {
        let mut viewer = ResultViewer::default();
        assert!(viewer.sync(None).is_none());
        assert_eq!(viewer.revision(), 0);

        let a = Arc::new(sample_result());
        viewer.sync(Some(&a));
        viewer.sync(Some(&a));
        assert_eq!(viewer.revision(), 1);

        // Equal content, different snapshot.
        let b = Arc::new(sample_result());
        viewer.sync(Some(&b));
        assert_eq!(viewer.revision(), 2);

        assert!(viewer.sync(None).is_none());
        assert_eq!(viewer.revision(), 3);
        assert!(viewer.view().is_none());
    }
}
