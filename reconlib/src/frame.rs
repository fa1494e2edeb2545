//! Сырая строковая таблица — то, что приходит от загрузчиков до нормализации.

use crate::error::{ReconError, Result};

/// Первая строка файла всегда заголовок; все ячейки — строки.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawFrame {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawFrame { headers, rows }
    }

    /// Сборка из записей загрузчика (CSV, Excel).
    ///
    /// При одном заголовке это склеенный экспорт: CSV-ридер мог уже порезать
    /// строку по запятым, поэтому ячейки сшиваются обратно через `,` и
    /// разделитель потом определяется по всей строке. При нескольких заголовках
    /// непустые ячейки правее последнего — ошибка. Хвостовые пустые ячейки отбрасываются.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self> {
        let width = headers.len();
        let mut rows = Vec::with_capacity(records.len());
        for (i, mut cells) in records.into_iter().enumerate() {
            while cells.len() > width.max(1) && cells.last().is_some_and(|c| c.trim().is_empty()) {
                cells.pop();
            }
            if width == 1 && cells.len() > 1 {
                cells = vec![cells.join(",")];
            } else if width > 1 && cells.len() > width {
                return Err(ReconError::FieldCount {
                    row: i + 1,
                    expected: width,
                    found: cells.len(),
                });
            }
            rows.push(cells);
        }
        Ok(RawFrame { headers, rows })
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Поиск колонки без учёта регистра и окружающих пробелов.
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }

    /// Короткая строка добивается пустыми ячейками.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn trimmed(mut self) -> Self {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                let t = cell.trim();
                if t.len() != cell.len() {
                    *cell = t.to_string();
                }
            }
        }
        self
    }
}
