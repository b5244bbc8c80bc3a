use crate::export::{local_now, ExportEngine, ExportKind, NativeRenderer};
use anyhow::Result;
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

use super::state::UiState;

pub const NOTHING_TO_EXPORT: &str = "No completed run to export yet.";

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Export the current result and report the outcome in `state.info`.
pub fn export_current(state: &mut UiState, kind: ExportKind) {
    let Some(result) = state.result.clone() else {
        state.info = NOTHING_TO_EXPORT.into();
        return;
    };
    let engine = ExportEngine::new(NativeRenderer, state.output_dir.clone());
    match engine.export(kind, Some(&result), local_now()) {
        Ok(Some(path)) => {
            let shown = std::path::absolute(&path).unwrap_or(path);
            state.last_exported_path = Some(shown.to_string_lossy().to_string());
            state.info = format!(
                "Exported {}: {} (press 'y' to copy path)",
                kind.label(),
                shown.display()
            );
        }
        Ok(None) => state.info = NOTHING_TO_EXPORT.into(),
        Err(e) => state.info = format!("{} export failed: {e:#}", kind.label()),
    }
}

/// Copy the last exported path, reporting the outcome in `state.info`.
pub fn copy_exported_path(state: &mut UiState) {
    let Some(path) = state.last_exported_path.clone() else {
        state.info = "No exported file path to copy. Export a file first (d/x)".into();
        return;
    };
    match copy_to_clipboard(&path) {
        Ok(_) => {
            let display_path = if path.chars().count() > 60 {
                let head: String = path.chars().take(57).collect();
                format!("{head}...")
            } else {
                path
            };
            state.info = format!("✓ Copied to clipboard: {}", display_path);
        }
        Err(e) => {
            state.info = format!("Clipboard copy failed: {e:#}");
        }
    }
}

/// Initialize the clipboard manager thread if not already initialized.
/// Operations run sequentially and each clipboard instance is kept alive
/// long enough for clipboard managers to read it.
fn init_clipboard_manager() -> Result<&'static std_mpsc::Sender<String>> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();

        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        tx
    });

    CLIPBOARD_SENDER
        .get()
        .ok_or_else(|| anyhow::anyhow!("Failed to initialize clipboard manager"))
}

/// Queue `text` for the clipboard without blocking the UI thread.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = init_clipboard_manager()?;
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
    Ok(())
}
