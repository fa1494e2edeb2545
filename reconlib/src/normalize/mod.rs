//! Нормализация сырых таблиц в канонические записи.

pub mod bank;
pub mod invoice;
pub mod parse;

pub use bank::BankNormalizer;
pub use invoice::InvoiceNormalizer;
