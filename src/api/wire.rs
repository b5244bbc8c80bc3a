//! Response schema of the optimization service.
//!
//! Field names follow the service's JSON; conversion into the domain model
//! checks the cross-field invariants the viewer relies on.

use crate::model::{
    Assignment, AssignmentIds, AssignmentLabels, Evaluation, Parameters, RunResult, ScheduleCount,
};
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentOut {
    pub id_kelas: i64,
    pub id_matkul: i64,
    pub id_dosen: i64,
    pub id_ruangan: i64,
    pub id_slot: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentReadableOut {
    pub id_kelas: i64,
    pub kelas: String,
    pub id_matkul: i64,
    pub matkul: String,
    pub id_dosen: i64,
    pub dosen: String,
    pub id_ruangan: i64,
    pub ruangan: String,
    pub id_slot: i64,
    pub slot: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateOut {
    pub fitness: f64,
    pub pelanggaran_keras: u32,
    pub pelanggaran_lunak: u32,
    pub detail_keras: Vec<String>,
    pub detail_lunak: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub params: Parameters,
    pub hasil: Vec<AssignmentOut>,
    pub hasil_readable: Vec<AssignmentReadableOut>,
    pub evaluasi: EvaluateOut,
    pub summary: String,
    pub fitness_history: Vec<f64>,
    pub fitness_explanation: String,
    #[serde(default)]
    pub expected_total: Option<u64>,
    #[serde(default)]
    pub generated_total: Option<u64>,
    #[serde(default)]
    pub schedule_count_ok: Option<bool>,
    #[serde(default)]
    pub schedule_count_message: Option<String>,
}

impl AssignmentReadableOut {
    fn matches(&self, ids: &AssignmentOut) -> bool {
        self.id_kelas == ids.id_kelas
            && self.id_matkul == ids.id_matkul
            && self.id_dosen == ids.id_dosen
            && self.id_ruangan == ids.id_ruangan
            && self.id_slot == ids.id_slot
    }
}

impl GenerateResponse {
    /// Validate and convert into a `RunResult` stamped with `completed_at`.
    pub(crate) fn into_run_result(self, completed_at: OffsetDateTime) -> Result<RunResult, String> {
        if self.hasil.len() != self.hasil_readable.len() {
            return Err(format!(
                "hasil has {} entries but hasil_readable has {}",
                self.hasil.len(),
                self.hasil_readable.len()
            ));
        }
        let ev = self.evaluasi;
        if ev.pelanggaran_keras as usize != ev.detail_keras.len() {
            return Err(format!(
                "inconsistent evaluation: service counted {} hard violations (pelanggaran_keras) but listed {} (detail_keras)",
                ev.pelanggaran_keras,
                ev.detail_keras.len()
            ));
        }
        if ev.pelanggaran_lunak as usize != ev.detail_lunak.len() {
            return Err(format!(
                "inconsistent evaluation: service counted {} soft violations (pelanggaran_lunak) but listed {} (detail_lunak)",
                ev.pelanggaran_lunak,
                ev.detail_lunak.len()
            ));
        }

        let mut assignments = Vec::with_capacity(self.hasil.len());
        for (idx, (ids, readable)) in self.hasil.into_iter().zip(self.hasil_readable).enumerate() {
            if !readable.matches(&ids) {
                return Err(format!(
                    "hasil_readable[{idx}] does not correspond to hasil[{idx}]"
                ));
            }
            assignments.push(Assignment {
                ids: AssignmentIds {
                    class_id: ids.id_kelas,
                    course_id: ids.id_matkul,
                    instructor_id: ids.id_dosen,
                    room_id: ids.id_ruangan,
                    slot_id: ids.id_slot,
                },
                labels: AssignmentLabels {
                    class: readable.kelas,
                    course: readable.matkul,
                    instructor: readable.dosen,
                    room: readable.ruangan,
                    slot: readable.slot,
                },
            });
        }

        let has_count = self.expected_total.is_some()
            || self.generated_total.is_some()
            || self.schedule_count_ok.is_some()
            || self.schedule_count_message.is_some();
        let schedule_count = has_count.then(|| ScheduleCount {
            expected_total: self.expected_total,
            generated_total: self.generated_total,
            ok: self.schedule_count_ok,
            message: self.schedule_count_message,
        });

        Ok(RunResult {
            completed_at,
            params_used: self.params,
            assignments,
            evaluation: Evaluation {
                fitness: ev.fitness,
                hard_violation_count: ev.pelanggaran_keras,
                soft_violation_count: ev.pelanggaran_lunak,
                hard_violation_details: ev.detail_keras,
                soft_violation_details: ev.detail_lunak,
            },
            summary_text: self.summary,
            fitness_history: self.fitness_history,
            explanation_text: self.fitness_explanation,
            schedule_count,
        })
    }
}
