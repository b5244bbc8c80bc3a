//! Application-level orchestration utilities.
//!
//! This module owns the run lifecycle (the single in-flight run and its result
//! slot) and post-run processing such as configured exports. UI/CLI layers call
//! into this module to keep responsibilities separated.

mod controller;
mod post_process;

pub(crate) use controller::{run_controller, RunController, RunState, UiCommand};
pub(crate) use post_process::process_run_completion;
