//! Document and spreadsheet export of a run result.
//!
//! The engine builds structured content from the same table projection the
//! viewer uses and hands it to an `ExportRenderer`. Filenames carry the local
//! export time; the file content depends only on the result.

mod pdf;
mod xlsx;

use crate::model::RunResult;
use crate::view::{table_rows, ScheduleRow, TABLE_HEADER};
use anyhow::{Context, Result};
use std::path::PathBuf;
use time::macros::format_description;
use time::OffsetDateTime;

pub const DOCUMENT_TITLE: &str = "Course Schedule";
pub const SHEET_NAME: &str = "Schedule";

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentContent {
    pub title: String,
    pub summary: String,
    pub header: [&'static str; 5],
    pub rows: Vec<ScheduleRow>,
    pub created_at: OffsetDateTime,
}

impl DocumentContent {
    pub fn from_result(result: &RunResult) -> Self {
        Self {
            title: DOCUMENT_TITLE.to_string(),
            summary: result.summary_text.clone(),
            header: TABLE_HEADER,
            rows: table_rows(&result.assignments),
            created_at: result.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub cells: Vec<String>,
    pub bold: bool,
}

impl SheetRow {
    fn plain(cells: Vec<String>) -> Self {
        Self { cells, bold: false }
    }

    fn bold(cells: Vec<String>) -> Self {
        Self { cells, bold: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetContent {
    pub title: String,
    pub sheet_name: String,
    /// Rows top to bottom; an empty `cells` is a blank row.
    pub rows: Vec<SheetRow>,
    pub created_at: OffsetDateTime,
}

impl SpreadsheetContent {
    pub fn from_result(result: &RunResult) -> Self {
        let mut rows = vec![
            SheetRow::bold(vec!["Summary".to_string()]),
            SheetRow::plain(vec![result.summary_text.clone()]),
            SheetRow::plain(Vec::new()),
            SheetRow::bold(TABLE_HEADER.iter().map(|h| h.to_string()).collect()),
        ];
        rows.extend(
            table_rows(&result.assignments)
                .iter()
                .map(|r| SheetRow::plain(r.cells().iter().map(|c| c.to_string()).collect())),
        );
        Self {
            title: DOCUMENT_TITLE.to_string(),
            sheet_name: SHEET_NAME.to_string(),
            rows,
            created_at: result.completed_at,
        }
    }
}

/// Turns structured export content into file bytes.
pub trait ExportRenderer {
    fn render_document(&self, content: &DocumentContent) -> Result<Vec<u8>>;
    fn render_spreadsheet(&self, content: &SpreadsheetContent) -> Result<Vec<u8>>;
}

/// PDF via printpdf, XLSX via rust_xlsxwriter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRenderer;

impl ExportRenderer for NativeRenderer {
    fn render_document(&self, content: &DocumentContent) -> Result<Vec<u8>> {
        pdf::render(content)
    }

    fn render_spreadsheet(&self, content: &SpreadsheetContent) -> Result<Vec<u8>> {
        xlsx::render(content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Document,
    Spreadsheet,
}

impl ExportKind {
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Document => "pdf",
            ExportKind::Spreadsheet => "xlsx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Document => "PDF",
            ExportKind::Spreadsheet => "XLSX",
        }
    }
}

/// `schedule_<YYYYMMDD>_<HHmm>.<ext>`
pub fn export_filename(now: OffsetDateTime, ext: &str) -> Result<String> {
    let stamp = now
        .format(format_description!("[year][month][day]_[hour][minute]"))
        .context("format export timestamp")?;
    Ok(format!("schedule_{stamp}.{ext}"))
}

/// Local wall clock, falling back to UTC when the offset is unknown.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[derive(Debug, Clone)]
pub struct ExportEngine<R = NativeRenderer> {
    renderer: R,
    out_dir: PathBuf,
}

impl<R: ExportRenderer> ExportEngine<R> {
    pub fn new(renderer: R, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            out_dir: out_dir.into(),
        }
    }

    pub fn export_document(
        &self,
        result: Option<&RunResult>,
        now: OffsetDateTime,
    ) -> Result<Option<PathBuf>> {
        self.export(ExportKind::Document, result, now)
    }

    pub fn export_spreadsheet(
        &self,
        result: Option<&RunResult>,
        now: OffsetDateTime,
    ) -> Result<Option<PathBuf>> {
        self.export(ExportKind::Spreadsheet, result, now)
    }

    /// Write one export file. Without a result this does nothing and returns `Ok(None)`.
    pub fn export(
        &self,
        kind: ExportKind,
        result: Option<&RunResult>,
        now: OffsetDateTime,
    ) -> Result<Option<PathBuf>> {
        let Some(result) = result else {
            return Ok(None);
        };
        let bytes = match kind {
            ExportKind::Document => self
                .renderer
                .render_document(&DocumentContent::from_result(result)),
            ExportKind::Spreadsheet => self
                .renderer
                .render_spreadsheet(&SpreadsheetContent::from_result(result)),
        }
        .with_context(|| format!("render {}", kind.label()))?;

        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(export_filename(now, kind.extension())?);
        std::fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        tracing::info!(path = %path.display(), kind = kind.label(), "exported schedule");
        Ok(Some(path))
    }
}
