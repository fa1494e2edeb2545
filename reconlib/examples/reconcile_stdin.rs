use reconlib::{
    formats::csv::Csv,
    matcher::Matcher,
    normalize::{BankNormalizer, InvoiceNormalizer},
    traits::{Normalize, ReadFrame},
};
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: выписка из stdin, счета из файла-аргумента, пары -> stdout
    let invoices_path = std::env::args().nth(1).ok_or("usage: reconcile_stdin <invoices.csv>")?;
    let bank = Csv::read_frame(std::io::BufReader::new(std::io::stdin()))?;
    let invoices = Csv::read_frame(BufReader::new(File::open(invoices_path)?))?;

    let result = Matcher::default().reconcile(
        BankNormalizer::default().normalize(bank)?,
        InvoiceNormalizer::default().normalize(invoices)?,
    );
    Csv::write_matches(std::io::stdout(), &result.matches)?;
    Ok(())
}
