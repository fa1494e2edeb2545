//! Разбор дат и сумм из строковых ячеек.

use crate::{
    config::DateFormats,
    error::{ReconError, Result},
    model::RecordDate,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

/// Какие символы переживают очистку суммы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountCharset {
    /// Только цифры и точка (выписка).
    Unsigned,
    /// Цифры, точка и минус (счета).
    Signed,
}

impl AmountCharset {
    fn noise(self) -> &'static Regex {
        static UNSIGNED: OnceLock<Regex> = OnceLock::new();
        static SIGNED: OnceLock<Regex> = OnceLock::new();
        match self {
            AmountCharset::Unsigned => {
                UNSIGNED.get_or_init(|| Regex::new(r"[^0-9.]").expect("static pattern"))
            }
            AmountCharset::Signed => {
                SIGNED.get_or_init(|| Regex::new(r"[^0-9.\-]").expect("static pattern"))
            }
        }
    }
}

/// Модуль суммы. Пустой или нечисловой остаток — ошибка, а не ноль:
/// ноль сломал бы сверку по равенству сумм.
pub fn parse_magnitude(
    raw: &str,
    charset: AmountCharset,
    column: &'static str,
    row: usize,
) -> Result<Decimal> {
    let residue = charset.noise().replace_all(raw, "");
    Decimal::from_str(&residue)
        .map(|d| d.abs())
        .map_err(|_| ReconError::AmountParse {
            column,
            row,
            value: raw.to_string(),
        })
}

/// Дата без времени суток; всё нераспознанное превращается в `RecordDate::Invalid`.
pub fn parse_date(raw: &str, formats: &DateFormats) -> RecordDate {
    let s = raw.trim();
    if s.is_empty() {
        return RecordDate::Invalid;
    }
    for f in &formats.datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, f) {
            return dt.date().into();
        }
    }
    for f in &formats.formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, f) {
            return d.into();
        }
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.date_naive().into(),
        Err(_) => RecordDate::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> RecordDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().into()
    }

    #[test]
    fn dates_in_common_layouts() {
        let f = DateFormats::default();
        assert_eq!(parse_date("2024-01-10", &f), ymd(2024, 1, 10));
        assert_eq!(parse_date(" 2024/01/10 ", &f), ymd(2024, 1, 10));
        assert_eq!(parse_date("01/02/2024", &f), ymd(2024, 1, 2));
        assert_eq!(parse_date("10.01.2024", &f), ymd(2024, 1, 10));
        assert_eq!(parse_date("10-Jan-2024", &f), ymd(2024, 1, 10));
    }

    #[test]
    fn time_of_day_is_dropped() {
        let f = DateFormats::default();
        assert_eq!(parse_date("2024-01-10 23:59:59", &f), ymd(2024, 1, 10));
        assert_eq!(parse_date("2024-01-10T08:00:00", &f), ymd(2024, 1, 10));
        assert_eq!(parse_date("2024-01-10T08:00:00+02:00", &f), ymd(2024, 1, 10));
    }

    #[test]
    fn garbage_date_is_invalid_not_error() {
        let f = DateFormats::default();
        assert_eq!(parse_date("", &f), RecordDate::Invalid);
        assert_eq!(parse_date("not a date", &f), RecordDate::Invalid);
        assert_eq!(parse_date("2024-02-30", &f), RecordDate::Invalid);
    }

    #[test]
    fn unsigned_amount_drops_currency_and_sign() {
        let a = parse_magnitude("$1,250.50", AmountCharset::Unsigned, "amount", 1).unwrap();
        assert_eq!(a, Decimal::new(125050, 2));
        let b = parse_magnitude("-150.00 Cr", AmountCharset::Unsigned, "amount", 1).unwrap();
        assert_eq!(b, Decimal::new(15000, 2));
    }

    #[test]
    fn signed_amount_keeps_minus_then_takes_abs() {
        let a = parse_magnitude("-150.00", AmountCharset::Signed, "amount", 1).unwrap();
        assert_eq!(a, Decimal::new(15000, 2));
        assert!(!a.is_sign_negative());
    }

    #[test]
    fn no_numeric_residue_is_an_error() {
        let err = parse_magnitude("n/a", AmountCharset::Unsigned, "balance", 7).unwrap_err();
        match err {
            ReconError::AmountParse { column, row, value } => {
                assert_eq!(column, "balance");
                assert_eq!(row, 7);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_magnitude("1.2.3", AmountCharset::Unsigned, "amount", 1).is_err());
        assert!(parse_magnitude("-", AmountCharset::Signed, "amount", 1).is_err());
    }
}
