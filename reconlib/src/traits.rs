//! Унифицированные трэйты: чтение сырой таблицы и её нормализация.

use crate::{error::Result, frame::RawFrame};
use std::io::BufRead;

pub trait ReadFrame {
    fn read_frame<R: BufRead>(r: R) -> Result<RawFrame>;
}

/// Превращает сырую таблицу в набор канонических записей одного вида.
pub trait Normalize {
    type Record;

    fn normalize(&self, frame: RawFrame) -> Result<Vec<Self::Record>>;
}
