//! Настройки прогона. Все поля имеют значения по умолчанию, TOML-файл необязателен.
//!
//! ```toml
//! [matching]
//! date_window_days = 3
//!
//! [dates]
//! formats = ["%Y-%m-%d", "%d/%m/%Y"]
//!
//! [[columns.aliases]]
//! synonym = "customer"
//! canonical = "name"
//!
//! [output]
//! matched = "matched.csv"
//! ```

use crate::{error::Result, frame::RawFrame};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    pub matching: MatchConfig,
    pub dates: DateFormats,
    pub columns: ColumnAliases,
    pub output: OutputConfig,
}

impl ReconConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Допуск по дате в календарных днях, включительно.
    pub date_window_days: i64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig { date_window_days: 3 }
    }
}

/// Форматы chrono, перебираемые по порядку. Время суток отбрасывается.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DateFormats {
    pub formats: Vec<String>,
    pub datetime_formats: Vec<String>,
}

impl Default for DateFormats {
    fn default() -> Self {
        DateFormats {
            formats: ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%d-%b-%Y", "%d %b %Y"]
                .map(String::from)
                .to_vec(),
            datetime_formats: [
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%m/%d/%Y %H:%M",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnAlias {
    pub synonym: String,
    pub canonical: String,
}

impl ColumnAlias {
    pub fn new(synonym: &str, canonical: &str) -> Self {
        ColumnAlias {
            synonym: synonym.to_string(),
            canonical: canonical.to_string(),
        }
    }
}

/// Таблица синонимов колонок счёта. Порядок записей задаёт приоритет:
/// при наличии и `client`, и `supplier` берётся `client`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub aliases: Vec<ColumnAlias>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        ColumnAliases {
            aliases: vec![
                ColumnAlias::new("client", "name"),
                ColumnAlias::new("supplier", "name"),
                ColumnAlias::new("method", "mode"),
            ],
        }
    }
}

impl ColumnAliases {
    /// Индекс колонки для канонического поля: сначала точное имя,
    /// затем первый найденный синоним в порядке таблицы.
    pub fn resolve(&self, frame: &RawFrame, canonical: &str) -> Option<usize> {
        frame.column(canonical).or_else(|| {
            self.aliases
                .iter()
                .filter(|a| a.canonical.eq_ignore_ascii_case(canonical))
                .find_map(|a| frame.column(&a.synonym))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub matched: String,
    pub unmatched_bank: String,
    pub unmatched_invoices: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            matched: "matched.csv".into(),
            unmatched_bank: "bank_unmatched.csv".into(),
            unmatched_invoices: "invoices_unmatched.csv".into(),
        }
    }
}
