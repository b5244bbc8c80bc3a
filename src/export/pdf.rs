use super::DocumentContent;
use anyhow::{Context, Result};
use std::borrow::Cow;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

// A4 landscape, millimetres.
const PAGE_W: f32 = 297.0;
const PAGE_H: f32 = 210.0;
const MARGIN: f32 = 15.0;
const ROW_H: f32 = 6.0;
const COLUMN_X: [f32; 5] = [15.0, 60.0, 125.0, 190.0, 235.0];
// Average Helvetica glyph width at 9pt, in mm.
const CELL_CHAR_W: f32 = 1.75;
const CELL_GAP: f32 = 2.0;
const SUMMARY_WRAP_CHARS: usize = 140;

pub(super) fn render(content: &DocumentContent) -> Result<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new(content.title.as_str(), Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    // Pin metadata to the run so that re-exports carry the same content.
    let doc = doc
        .with_document_id(format!("{:032x}", content.created_at.unix_timestamp_nanos()))
        .with_creation_date(content.created_at)
        .with_mod_date(content.created_at)
        .with_metadata_date(content.created_at);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .context("load Helvetica")?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .context("load Helvetica-Bold")?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_H - MARGIN;

    current.use_text(content.title.as_str(), 16.0, Mm(MARGIN), Mm(y), &bold);
    y -= 10.0;
    for line in wrap(&content.summary, SUMMARY_WRAP_CHARS) {
        current.use_text(line, 10.0, Mm(MARGIN), Mm(y), &regular);
        y -= 5.0;
    }
    y -= 4.0;

    write_row(&current, &content.header, y, &bold);
    y -= ROW_H;
    for row in &content.rows {
        if y < MARGIN {
            let (next_page, next_layer) = doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_H - MARGIN;
            write_row(&current, &content.header, y, &bold);
            y -= ROW_H;
        }
        write_row(&current, &row.cells(), y, &regular);
        y -= ROW_H;
    }

    let mut bytes = doc.save_to_bytes().context("serialize PDF")?;
    let seed = trailer_id_seed(content.created_at.unix_timestamp_nanos());
    pin_trailer_id(&mut bytes, &seed);
    Ok(bytes)
}

fn write_row(layer: &PdfLayerReference, cells: &[&str; 5], y: f32, font: &IndirectFontRef) {
    for (i, (cell, x)) in cells.iter().zip(COLUMN_X).enumerate() {
        let text = fit_cell(cell, column_chars(i));
        layer.use_text(&*text, 9.0, Mm(x), Mm(y), font);
    }
}

/// Characters that fit in column `i` before running into the next one.
fn column_chars(i: usize) -> usize {
    let right = COLUMN_X.get(i + 1).copied().unwrap_or(PAGE_W - MARGIN);
    (((right - COLUMN_X[i] - CELL_GAP) / CELL_CHAR_W).floor() as usize).max(4)
}

/// Truncate to `max` characters, marking the cut with "...".
fn fit_cell(text: &str, max: usize) -> Cow<'_, str> {
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    Cow::Owned(format!("{head}..."))
}

/// 32 letters `A`..`J` spelling the zero-padded timestamp.
fn trailer_id_seed(nanos: i128) -> Vec<u8> {
    format!("{:032}", nanos.unsigned_abs())
        .bytes()
        .map(|d| b'A' + (d - b'0'))
        .collect()
}

/// Overwrite the strings of the last `/ID [...]` entry with `seed`, in place.
/// Lengths are kept so the xref offsets stay valid.
fn pin_trailer_id(bytes: &mut [u8], seed: &[u8]) {
    if seed.is_empty() {
        return;
    }
    let Some(start) = bytes.windows(3).rposition(|w| w == b"/ID") else {
        return;
    };
    let Some(end) = bytes[start..].iter().position(|&b| b == b']') else {
        return;
    };
    let mut inside = false;
    let mut n = 0;
    for b in &mut bytes[start + 3..start + end] {
        match *b {
            b'(' | b'<' if !inside => inside = true,
            b')' | b'>' if inside => inside = false,
            _ if inside => {
                *b = seed[n % seed.len()];
                n += 1;
            }
            _ => {}
        }
    }
}

/// Greedy word wrap by character count.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("", 5), Vec::<String>::new());
        // Overlong words stay intact.
        assert_eq!(wrap("abcdefgh ij", 4), vec!["abcdefgh", "ij"]);
    }

    #[test]
    fn long_cells_are_cut_to_column_width() {
        let name = "Pemrograman Berorientasi Objek Lanjut dan Pola Desain Perangkat Lunak";
        let max = column_chars(1);
        let fitted = fit_cell(name, max);
        assert_eq!(fitted.chars().count(), max);
        assert!(fitted.ends_with("..."));
        assert!(matches!(fit_cell("TI-1A", column_chars(0)), Cow::Borrowed("TI-1A")));
        // The last column is bounded by the right margin.
        assert!(column_chars(4) < column_chars(1));
    }

    #[test]
    fn trailer_id_is_overwritten_in_place() {
        let mut a = b"xref\ntrailer<</ID[(HEIGIDGC)(HAGDGDAH)]>>".to_vec();
        let mut b = b"xref\ntrailer<</ID[(HCJEJEGH)(IFGJFJGD)]>>".to_vec();
        let len = a.len();
        let seed = trailer_id_seed(1_700_000_000_000_000_000);
        pin_trailer_id(&mut a, &seed);
        pin_trailer_id(&mut b, &seed);
        assert_eq!(a, b);
        assert_eq!(a.len(), len);
        assert!(a.ends_with(b")]>>"));
    }
}
