use reconlib::{
    error::ReconError,
    formats::csv::Csv,
    matcher::Matcher,
    normalize::{BankNormalizer, InvoiceNormalizer},
    traits::{Normalize, ReadFrame},
};
use std::io::Cursor;

fn to_string(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn multi_column_csv_is_read_as_strings() {
    let input = "date,amount,balance,mode,name\n2024-01-10, 150.00 ,900.00,TRANSFER, ACME \n";
    let frame = Csv::read_frame(Cursor::new(input)).expect("read csv");
    assert_eq!(frame.width(), 5);
    assert_eq!(frame.len(), 1);
    assert_eq!(frame.cell(0, 1), " 150.00 ");
}

#[test]
fn semicolon_file_arrives_as_one_column() {
    let input = "date;DrCr;amount;balance;mode;name;Day;Month;Year;Tday\n\
                 2024-01-10;D;150.00;900.00;TRANSFER;ACME;10;01;2024;Mon\n";
    let frame = Csv::read_frame(Cursor::new(input)).expect("read csv");
    assert_eq!(frame.width(), 1);

    let recs = BankNormalizer::default().normalize(frame).expect("normalize");
    let mut out = Vec::new();
    Csv::write_bank(&mut out, &recs).expect("write bank");
    assert_eq!(
        to_string(out),
        "date,amount,balance,mode,name\n2024-01-10,150.00,900.00,TRANSFER,ACME\n"
    );
}

#[test]
fn comma_joined_rows_under_single_header() {
    let input = "raw\n2024-01-10,D,150.00,900.00,TRANSFER,ACME,10,01,2024,Mon\n";
    let frame = Csv::read_frame(Cursor::new(input)).expect("read csv");
    assert_eq!(frame.width(), 1);
    assert_eq!(frame.rows[0].len(), 1);
    assert_eq!(
        frame.cell(0, 0),
        "2024-01-10,D,150.00,900.00,TRANSFER,ACME,10,01,2024,Mon"
    );

    let recs = BankNormalizer::default().normalize(frame).expect("normalize");
    let mut out = Vec::new();
    Csv::write_bank(&mut out, &recs).expect("write bank");
    assert_eq!(
        to_string(out),
        "date,amount,balance,mode,name\n2024-01-10,150.00,900.00,TRANSFER,ACME\n"
    );
}

#[test]
fn decimal_commas_in_semicolon_export_are_detected_on_full_row() {
    // запятая в строке есть, значит разделитель — запятая, и строка не даёт десяти полей
    let input = "raw\n2024-01-10;D;150,00;900,00;TRANSFER;ACME;10;01;2024;Mon\n";
    let frame = Csv::read_frame(Cursor::new(input)).expect("read csv");
    assert_eq!(
        frame.cell(0, 0),
        "2024-01-10;D;150,00;900,00;TRANSFER;ACME;10;01;2024;Mon"
    );
    match BankNormalizer::default().normalize(frame) {
        Err(ReconError::FieldCount { row, expected, found }) => {
            assert_eq!((row, expected, found), (1, 10, 3));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn cells_beyond_header_are_rejected() {
    let input = "date,amount,balance,mode,name\n2024-01-10,150.00,900.00,TRANSFER,ACME,extra\n";
    match Csv::read_frame(Cursor::new(input)) {
        Err(ReconError::FieldCount { row, expected, found }) => {
            assert_eq!((row, expected, found), (1, 5, 6));
        }
        other => panic!("unexpected: {other:?}"),
    }

    let trailing = "date,amount,balance,mode,name\n2024-01-10,150.00,900.00,TRANSFER,ACME,,\n";
    let frame = Csv::read_frame(Cursor::new(trailing)).expect("read csv");
    assert_eq!(frame.rows[0].len(), 5);
}

#[test]
fn invalid_date_is_written_as_empty_cell() {
    let input = "Date,Amount,Supplier\nsometime,-12.5,paper co\n";
    let frame = Csv::read_frame(Cursor::new(input)).expect("read csv");
    let recs = InvoiceNormalizer::default().normalize(frame).expect("normalize");
    let mut out = Vec::new();
    Csv::write_invoices(&mut out, &recs).expect("write invoices");
    assert_eq!(to_string(out), "date,amount,mode,name\n,12.5,,PAPER CO\n");
}

#[test]
fn partitions_are_exported_with_headers() {
    let bank = Csv::read_frame(Cursor::new(
        "date,amount,balance,mode,name\n\
         2024-01-10,150.00,900.00,TRANSFER,ACME\n\
         2024-01-10,75.00,825.00,CARD,Globex\n",
    ))
    .expect("read bank");
    let invoices = Csv::read_frame(Cursor::new(
        "date,amount,client,method\n2024-01-12,150.00,acme,wire\n",
    ))
    .expect("read invoices");

    let bank = BankNormalizer::default().normalize(bank).expect("bank");
    let invoices = InvoiceNormalizer::default().normalize(invoices).expect("invoices");
    let r = Matcher::default().reconcile(bank, invoices);

    let mut matched = Vec::new();
    Csv::write_matches(&mut matched, &r.matches).expect("write matches");
    assert_eq!(
        to_string(matched),
        "bank_date,invoice_date,name,amount\n2024-01-10,2024-01-12,ACME,150.00\n"
    );

    let mut unmatched_bank = Vec::new();
    Csv::write_bank(&mut unmatched_bank, &r.unmatched_bank).expect("write bank");
    assert_eq!(
        to_string(unmatched_bank),
        "date,amount,balance,mode,name\n2024-01-10,75.00,825.00,CARD,GLOBEX\n"
    );

    let mut unmatched_invoices = Vec::new();
    Csv::write_invoices(&mut unmatched_invoices, &r.unmatched_invoices).expect("write invoices");
    assert_eq!(to_string(unmatched_invoices), "date,amount,mode,name\n");
}
