//! Банковская выписка: определение формы таблицы, разбивка «склеенной» колонки,
//! очистка до полей `date, amount, balance, mode, name`.

use super::parse::{parse_date, parse_magnitude, AmountCharset};
use crate::{
    config::DateFormats,
    error::{ReconError, Result},
    frame::RawFrame,
    model::{BankRecord, CanonicalRecord, RecordDate},
    traits::Normalize,
};
use tracing::{debug, warn};

/// Позиционные поля экспорта, где вся строка лежит в одной ячейке.
/// Последние четыре дублируют дату и дальше не используются.
pub const SINGLE_COLUMN_FIELDS: [&str; 10] = [
    "date", "DrCr", "amount", "balance", "mode", "name", "Day", "Month", "Year", "Tday",
];

/// Запятая важнее точки с запятой; смотрим первую непустую ячейку.
pub fn detect_delimiter(frame: &RawFrame) -> Result<char> {
    let sample = frame
        .rows
        .iter()
        .filter_map(|r| r.first())
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .ok_or(ReconError::DelimiterNotDetected)?;

    if sample.contains(',') {
        Ok(',')
    } else if sample.contains(';') {
        Ok(';')
    } else {
        Err(ReconError::DelimiterNotDetected)
    }
}

pub fn split_single_column(frame: &RawFrame, delim: char) -> Result<RawFrame> {
    let mut rows = Vec::with_capacity(frame.len());
    for (i, row) in frame.rows.iter().enumerate() {
        let line = row.first().map(String::as_str).unwrap_or("");
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<String> = line.split(delim).map(|f| f.trim().to_string()).collect();
        if fields.len() != SINGLE_COLUMN_FIELDS.len() {
            return Err(ReconError::FieldCount {
                row: i + 1,
                expected: SINGLE_COLUMN_FIELDS.len(),
                found: fields.len(),
            });
        }
        rows.push(fields);
    }
    let headers = SINGLE_COLUMN_FIELDS.iter().map(|h| h.to_string()).collect();
    Ok(RawFrame::new(headers, rows))
}

/// Несколько колонок — уже разбито, только чистим; одна — ищем разделитель.
pub fn load_bank_frame(frame: RawFrame) -> Result<RawFrame> {
    if frame.width() == 1 {
        let delim = detect_delimiter(&frame)?;
        debug!(%delim, rows = frame.len(), "splitting single-column bank export");
        split_single_column(&frame, delim)
    } else {
        Ok(frame.trimmed())
    }
}

fn require(frame: &RawFrame, name: &str) -> Result<usize> {
    frame
        .column(name)
        .ok_or_else(|| ReconError::MissingColumn(name.to_string()))
}

pub fn clean_bank(frame: &RawFrame, formats: &DateFormats) -> Result<Vec<BankRecord>> {
    let date = require(frame, "date")?;
    let amount = require(frame, "amount")?;
    let balance = require(frame, "balance")?;
    let mode = require(frame, "mode")?;
    let name = require(frame, "name")?;

    let mut out = Vec::with_capacity(frame.len());
    for i in 0..frame.len() {
        let row = i + 1;
        let d = parse_date(frame.cell(i, date), formats);
        if d == RecordDate::Invalid {
            warn!(row, value = frame.cell(i, date), "bank date not recognised");
        }
        out.push(BankRecord {
            record: CanonicalRecord::new(
                d,
                parse_magnitude(frame.cell(i, amount), AmountCharset::Unsigned, "amount", row)?,
                frame.cell(i, mode).trim().to_string(),
                frame.cell(i, name).trim().to_string(),
            ),
            balance: parse_magnitude(frame.cell(i, balance), AmountCharset::Unsigned, "balance", row)?,
        });
    }
    debug!(records = out.len(), "bank statement cleaned");
    Ok(out)
}

#[derive(Debug, Clone, Default)]
pub struct BankNormalizer {
    pub formats: DateFormats,
}

impl BankNormalizer {
    pub fn new(formats: DateFormats) -> Self {
        BankNormalizer { formats }
    }
}

impl Normalize for BankNormalizer {
    type Record = BankRecord;

    fn normalize(&self, frame: RawFrame) -> Result<Vec<BankRecord>> {
        let frame = load_bank_frame(frame)?;
        clean_bank(&frame, &self.formats)
    }
}
