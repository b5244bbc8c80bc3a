//! Post-run processing utilities.
//!
//! Handles the exports requested on the command line after a run succeeds.

use crate::cli::Cli;
use crate::export::{local_now, ExportEngine, ExportKind, NativeRenderer};
use crate::model::RunResult;
use std::path::PathBuf;

/// Result of post-run processing, ready for presentation layers.
pub(crate) struct ProcessedRun {
    pub export_messages: Vec<String>,
    pub exported: Vec<PathBuf>,
}

/// Run the exports selected by `--export-pdf` / `--export-xlsx`.
/// Failures are reported as messages rather than aborting the run.
pub(crate) fn process_run_completion(args: &Cli, run: &RunResult) -> ProcessedRun {
    let engine = ExportEngine::new(NativeRenderer, args.output_dir.clone());
    let now = local_now();

    let mut export_messages = Vec::new();
    let mut exported = Vec::new();
    let mut record = |kind: ExportKind, outcome: anyhow::Result<Option<PathBuf>>| match outcome {
        Ok(Some(path)) => {
            export_messages.push(format!("Exported {}: {}", kind.label(), path.display()));
            exported.push(path);
        }
        Ok(None) => {}
        Err(e) => export_messages.push(format!("Export {} failed: {e:#}", kind.label())),
    };

    if args.export_pdf {
        record(ExportKind::Document, engine.export_document(Some(run), now));
    }
    if args.export_xlsx {
        record(ExportKind::Spreadsheet, engine.export_spreadsheet(Some(run), now));
    }

    ProcessedRun {
        export_messages,
        exported,
    }
}
