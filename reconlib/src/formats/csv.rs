//! CSV: чтение сырой таблицы (первая строка — заголовок, все ячейки строками)
//! и выгрузка очищенных наборов и результатов сверки.
//!
//! Заголовки выгрузок:
//! - выписка: `date,amount,balance,mode,name`
//! - счета: `date,amount,mode,name`
//! - пары: `bank_date,invoice_date,name,amount`

use crate::{
    error::Result,
    frame::RawFrame,
    model::{BankRecord, InvoiceRecord, MatchPair},
    traits::ReadFrame,
};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{BufRead, Write};

pub const BANK_HEADER: [&str; 5] = ["date", "amount", "balance", "mode", "name"];
pub const INVOICE_HEADER: [&str; 4] = ["date", "amount", "mode", "name"];
pub const MATCH_HEADER: [&str; 4] = ["bank_date", "invoice_date", "name", "amount"];

#[derive(serde::Serialize)]
struct BankOutRow<'a> {
    date: String,
    amount: String,
    balance: String,
    mode: &'a str,
    name: &'a str,
}

#[derive(serde::Serialize)]
struct InvoiceOutRow<'a> {
    date: String,
    amount: String,
    mode: &'a str,
    name: &'a str,
}

#[derive(serde::Serialize)]
struct MatchOutRow<'a> {
    bank_date: String,
    invoice_date: String,
    name: &'a str,
    amount: String,
}

pub struct Csv;

impl ReadFrame for Csv {
    fn read_frame<R: BufRead>(r: R) -> Result<RawFrame> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let headers = rdr.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(rec.iter().map(String::from).collect());
        }
        RawFrame::from_records(headers, rows)
    }
}

impl Csv {
    /// Заголовок пишется всегда, даже для пустого набора.
    fn write_rows<W, T, I>(w: W, header: &[&str], rows: I) -> Result<()>
    where
        W: Write,
        T: serde::Serialize,
        I: IntoIterator<Item = T>,
    {
        let mut wrt = WriterBuilder::new().has_headers(false).from_writer(w);
        wrt.write_record(header)?;
        for row in rows {
            wrt.serialize(row)?;
        }
        wrt.flush()?;
        Ok(())
    }

    pub fn write_bank<W: Write>(w: W, records: &[BankRecord]) -> Result<()> {
        let rows = records.iter().map(|b| BankOutRow {
            date: b.record.date.to_string(),
            amount: b.record.amount.to_string(),
            balance: b.balance.to_string(),
            mode: &b.record.mode,
            name: &b.record.name,
        });
        Self::write_rows(w, &BANK_HEADER, rows)
    }

    pub fn write_invoices<W: Write>(w: W, records: &[InvoiceRecord]) -> Result<()> {
        let rows = records.iter().map(|i| InvoiceOutRow {
            date: i.record.date.to_string(),
            amount: i.record.amount.to_string(),
            mode: &i.record.mode,
            name: &i.record.name,
        });
        Self::write_rows(w, &INVOICE_HEADER, rows)
    }

    pub fn write_matches<W: Write>(w: W, matches: &[MatchPair]) -> Result<()> {
        let rows = matches.iter().map(|m| MatchOutRow {
            bank_date: m.bank_date.format("%Y-%m-%d").to_string(),
            invoice_date: m.invoice_date.format("%Y-%m-%d").to_string(),
            name: &m.name,
            amount: m.amount.to_string(),
        });
        Self::write_rows(w, &MATCH_HEADER, rows)
    }
}
