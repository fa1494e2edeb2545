//! Доменные модели — канонический слой, общий для выписки и счетов.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Дата записи. Нераспознанная дата не роняет пакет, но и не сверяется ни с чем.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDate {
    Valid(NaiveDate),
    Invalid,
}

impl RecordDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            RecordDate::Valid(d) => Some(*d),
            RecordDate::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RecordDate::Valid(_))
    }

    /// Разница в днях; `None`, если хотя бы одна дата невалидна.
    pub fn days_between(&self, other: &RecordDate) -> Option<i64> {
        match (self, other) {
            (RecordDate::Valid(a), RecordDate::Valid(b)) => Some((*a - *b).num_days().abs()),
            _ => None,
        }
    }

    /// Окно включительное: `window_days = 3` пропускает D+3 и отсекает D+4.
    pub fn within(&self, other: &RecordDate, window_days: i64) -> bool {
        self.days_between(other)
            .map_or(false, |days| days <= window_days)
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(d: NaiveDate) -> Self {
        RecordDate::Valid(d)
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDate::Valid(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            RecordDate::Invalid => Ok(()),
        }
    }
}

/// Каноническая форма контрагента: обрезка пробелов и верхний регистр.
pub fn canonical_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Общая часть банковой записи и счёта.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub date: RecordDate,
    /// Всегда неотрицательная: знак (дебет/кредит) отбрасывается при нормализации.
    pub amount: Decimal,
    pub mode: String,
    pub name: String,
    pub reconciled: bool,
}

impl CanonicalRecord {
    pub fn new(date: RecordDate, amount: Decimal, mode: String, name: String) -> Self {
        CanonicalRecord {
            date,
            amount: amount.abs(),
            mode,
            name,
            reconciled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    pub record: CanonicalRecord,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRecord {
    pub record: CanonicalRecord,
}

/// Доступ к общей части записи из сверки.
pub trait Canonical {
    fn canonical(&self) -> &CanonicalRecord;
    fn canonical_mut(&mut self) -> &mut CanonicalRecord;

    fn is_reconciled(&self) -> bool {
        self.canonical().reconciled
    }
}

impl Canonical for BankRecord {
    fn canonical(&self) -> &CanonicalRecord {
        &self.record
    }
    fn canonical_mut(&mut self) -> &mut CanonicalRecord {
        &mut self.record
    }
}

impl Canonical for InvoiceRecord {
    fn canonical(&self) -> &CanonicalRecord {
        &self.record
    }
    fn canonical_mut(&mut self) -> &mut CanonicalRecord {
        &mut self.record
    }
}

/// Сопоставленная пара «движение по счёту — счёт».
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPair {
    /// Позиции записей во входных наборах.
    pub bank_index: usize,
    pub invoice_index: usize,
    pub bank_date: NaiveDate,
    pub invoice_date: NaiveDate,
    pub name: String,
    pub amount: Decimal,
}

/// Итог одного прохода сверки: три непересекающиеся части.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub matches: Vec<MatchPair>,
    pub unmatched_bank: Vec<BankRecord>,
    pub unmatched_invoices: Vec<InvoiceRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconSummary {
    pub matched: usize,
    pub unmatched_bank: usize,
    pub unmatched_invoices: usize,
}

impl Reconciliation {
    pub fn summary(&self) -> ReconSummary {
        ReconSummary {
            matched: self.matches.len(),
            unmatched_bank: self.unmatched_bank.len(),
            unmatched_invoices: self.unmatched_invoices.len(),
        }
    }
}
