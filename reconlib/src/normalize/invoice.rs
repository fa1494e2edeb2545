//! Счета и поступления: синонимы колонок сводятся к `name`/`mode`,
//! имя контрагента приводится к канонической форме.

use super::parse::{parse_date, parse_magnitude, AmountCharset};
use crate::{
    config::{ColumnAliases, DateFormats},
    error::{ReconError, Result},
    frame::RawFrame,
    model::{canonical_name, CanonicalRecord, InvoiceRecord, RecordDate},
    traits::Normalize,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct InvoiceNormalizer {
    pub formats: DateFormats,
    pub aliases: ColumnAliases,
}

impl InvoiceNormalizer {
    pub fn new(formats: DateFormats, aliases: ColumnAliases) -> Self {
        InvoiceNormalizer { formats, aliases }
    }

    fn require(&self, frame: &RawFrame, canonical: &str) -> Result<usize> {
        self.aliases
            .resolve(frame, canonical)
            .ok_or_else(|| ReconError::MissingColumn(canonical.to_string()))
    }
}

impl Normalize for InvoiceNormalizer {
    type Record = InvoiceRecord;

    fn normalize(&self, frame: RawFrame) -> Result<Vec<InvoiceRecord>> {
        let date = self.require(&frame, "date")?;
        let amount = self.require(&frame, "amount")?;
        let name = self.require(&frame, "name")?;
        let mode = self.aliases.resolve(&frame, "mode");
        if mode.is_none() {
            debug!("invoice input has no payment method column");
        }

        let mut out = Vec::with_capacity(frame.len());
        for i in 0..frame.len() {
            let row = i + 1;
            let d = parse_date(frame.cell(i, date), &self.formats);
            if d == RecordDate::Invalid {
                warn!(row, value = frame.cell(i, date), "invoice date not recognised");
            }
            out.push(InvoiceRecord {
                record: CanonicalRecord::new(
                    d,
                    parse_magnitude(frame.cell(i, amount), AmountCharset::Signed, "amount", row)?,
                    mode.map(|c| frame.cell(i, c).trim().to_string()).unwrap_or_default(),
                    canonical_name(frame.cell(i, name)),
                ),
            });
        }
        debug!(records = out.len(), "invoices cleaned");
        Ok(out)
    }
}
