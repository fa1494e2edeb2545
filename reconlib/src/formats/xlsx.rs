//! Excel: первый лист, первая строка — заголовок, все ячейки приводятся к строкам.

use crate::{error::Result, frame::RawFrame, traits::ReadFrame};
use calamine::{open_workbook_auto, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::{BufRead, Cursor, Read};
use std::path::Path;

pub struct Excel;

impl Excel {
    /// По расширению файла: xlsx, xlsm, xlsb, xls, ods.
    pub fn read_path(path: &Path) -> Result<RawFrame> {
        let mut wb = open_workbook_auto(path)?;
        match wb.worksheet_range_at(0) {
            Some(range) => frame_from_range(&range?),
            None => Ok(RawFrame::default()),
        }
    }
}

impl ReadFrame for Excel {
    fn read_frame<R: BufRead>(mut r: R) -> Result<RawFrame> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        let mut wb: Xlsx<_> =
            open_workbook_from_rs(Cursor::new(buf)).map_err(calamine::Error::from)?;
        match wb.worksheet_range_at(0) {
            Some(range) => frame_from_range(&range.map_err(calamine::Error::from)?),
            None => Ok(RawFrame::default()),
        }
    }
}

fn frame_from_range(range: &Range<Data>) -> Result<RawFrame> {
    let mut rows = range
        .rows()
        .map(|r| r.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();
    RawFrame::from_records(headers, rows.collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        // серийная дата Excel
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}
