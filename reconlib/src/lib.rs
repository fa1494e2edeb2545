//! reconlib — нормализация банковских выписок и счетов, сверка платежей со счетами.

pub mod config;
pub mod error;
pub mod frame;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod xlsx;
}
