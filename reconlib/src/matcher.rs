//! Жадная сверка: один проход по выписке в исходном порядке,
//! для каждой записи берётся первый подходящий непогашенный счёт.
//!
//! Условия пары: равные суммы (точно, без допуска), равные канонические имена,
//! даты не дальше `date_window_days` друг от друга. Невалидная дата не проходит никогда.
//! Порядок входа значим: из двух одинаково подходящих счетов забирается более ранний.

use crate::{
    config::MatchConfig,
    model::{
        canonical_name, BankRecord, Canonical, CanonicalRecord, InvoiceRecord, MatchPair,
        Reconciliation,
    },
};
use chrono::NaiveDate;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Matcher { config }
    }

    /// Даты пары `(выписка, счёт)`, если счёт подходит записи выписки.
    fn eligible(
        &self,
        bank: &CanonicalRecord,
        invoice: &CanonicalRecord,
    ) -> Option<(NaiveDate, NaiveDate)> {
        if invoice.reconciled || invoice.amount != bank.amount || invoice.name != bank.name {
            return None;
        }
        let dates = (bank.date.as_date()?, invoice.date.as_date()?);
        bank.date
            .within(&invoice.date, self.config.date_window_days)
            .then_some(dates)
    }

    /// Записи, уже помеченные `reconciled` на входе, в проходе не участвуют
    /// и попадают в несверенные части вместе с непарными.
    pub fn reconcile(
        &self,
        mut bank: Vec<BankRecord>,
        mut invoices: Vec<InvoiceRecord>,
    ) -> Reconciliation {
        // Обе стороны сравниваются и выгружаются с каноническим именем.
        for r in bank.iter_mut().map(|b| &mut b.record) {
            r.name = canonical_name(&r.name);
        }
        for r in invoices.iter_mut().map(|i| &mut i.record) {
            r.name = canonical_name(&r.name);
        }

        let mut bank_claimed = vec![false; bank.len()];
        let mut invoice_claimed = vec![false; invoices.len()];
        let mut matches = Vec::new();
        for (bank_index, b) in bank.iter_mut().enumerate() {
            if b.is_reconciled() {
                continue;
            }
            let Some((invoice_index, (bank_date, invoice_date))) = invoices
                .iter()
                .enumerate()
                .find_map(|(i, inv)| self.eligible(&b.record, &inv.record).map(|d| (i, d)))
            else {
                continue;
            };

            invoices[invoice_index].canonical_mut().reconciled = true;
            b.record.reconciled = true;
            bank_claimed[bank_index] = true;
            invoice_claimed[invoice_index] = true;
            debug!(bank_index, invoice_index, name = %b.record.name, amount = %b.record.amount, "matched");
            matches.push(MatchPair {
                bank_index,
                invoice_index,
                bank_date,
                invoice_date,
                name: b.record.name.clone(),
                amount: b.record.amount,
            });
        }

        let result = Reconciliation {
            matches,
            unmatched_bank: unclaimed(bank, bank_claimed),
            unmatched_invoices: unclaimed(invoices, invoice_claimed),
        };
        let s = result.summary();
        info!(
            matched = s.matched,
            unmatched_bank = s.unmatched_bank,
            unmatched_invoices = s.unmatched_invoices,
            "reconciliation complete"
        );
        result
    }
}

fn unclaimed<T>(records: Vec<T>, claimed: Vec<bool>) -> Vec<T> {
    records
        .into_iter()
        .zip(claimed)
        .filter_map(|(r, c)| (!c).then_some(r))
        .collect()
}
