use super::SpreadsheetContent;
use anyhow::{Context, Result};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

const COLUMN_WIDTH: f64 = 28.0;

pub(super) fn render(content: &SpreadsheetContent) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let at = content.created_at;
    let created = ExcelDateTime::from_ymd(at.year() as u16, u8::from(at.month()), at.day())
        .and_then(|d| d.and_hms(at.hour() as u16, at.minute(), at.second()))
        .context("convert creation time")?;
    let properties = DocProperties::new()
        .set_title(content.title.as_str())
        .set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(content.sheet_name.as_str())?;
    for col in 0..5u16 {
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (r, row) in content.rows.iter().enumerate() {
        let r = r as u32;
        for (c, cell) in row.cells.iter().enumerate() {
            let c = c as u16;
            if row.bold {
                worksheet.write_with_format(r, c, cell.as_str(), &bold)?;
            } else {
                worksheet.write(r, c, cell.as_str())?;
            }
        }
    }

    workbook.save_to_buffer().context("serialize XLSX")
}
