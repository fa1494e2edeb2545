//! Пакетный прогон: файлы → нормализация → сверка → три выгрузки.
//! Частичных результатов нет: при ошибке прогон повторяется целиком.

use crate::{
    config::{OutputConfig, ReconConfig},
    error::{ReconError, Result},
    formats::{csv::Csv, xlsx::Excel},
    frame::RawFrame,
    matcher::Matcher,
    model::{BankRecord, InvoiceRecord, ReconSummary, Reconciliation},
    normalize::{BankNormalizer, InvoiceNormalizer},
    traits::{Normalize, ReadFrame},
};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Выбор загрузчика по расширению: CSV или таблица Excel/ODS.
pub fn read_frame(path: &Path) -> Result<RawFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => Csv::read_frame(BufReader::new(File::open(path)?)),
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Excel::read_path(path),
        _ => Err(ReconError::Unsupported("expected .csv or a spreadsheet")),
    }
}

pub fn clean_bank_file(path: &Path, cfg: &ReconConfig) -> Result<Vec<BankRecord>> {
    let frame = read_frame(path)?;
    info!(path = %path.display(), rows = frame.len(), "loaded bank statement");
    BankNormalizer::new(cfg.dates.clone()).normalize(frame)
}

pub fn clean_invoice_file(path: &Path, cfg: &ReconConfig) -> Result<Vec<InvoiceRecord>> {
    let frame = read_frame(path)?;
    info!(path = %path.display(), rows = frame.len(), "loaded invoices");
    InvoiceNormalizer::new(cfg.dates.clone(), cfg.columns.clone()).normalize(frame)
}

pub fn write_partitions(result: &Reconciliation, out_dir: &Path, names: &OutputConfig) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let path = out_dir.join(&names.matched);
    Csv::write_matches(BufWriter::new(File::create(&path)?), &result.matches)?;
    info!(path = %path.display(), "matches written");

    let path = out_dir.join(&names.unmatched_bank);
    Csv::write_bank(BufWriter::new(File::create(&path)?), &result.unmatched_bank)?;
    info!(path = %path.display(), "unmatched bank records written");

    let path = out_dir.join(&names.unmatched_invoices);
    Csv::write_invoices(BufWriter::new(File::create(&path)?), &result.unmatched_invoices)?;
    info!(path = %path.display(), "unmatched invoices written");
    Ok(())
}

pub fn run(
    bank_path: &Path,
    invoice_path: &Path,
    out_dir: &Path,
    cfg: &ReconConfig,
) -> Result<ReconSummary> {
    let bank = clean_bank_file(bank_path, cfg)?;
    let invoices = clean_invoice_file(invoice_path, cfg)?;

    let result = Matcher::new(cfg.matching.clone()).reconcile(bank, invoices);
    write_partitions(&result, out_dir, &cfg.output)?;
    Ok(result.summary())
}
