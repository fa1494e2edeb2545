use clap::{Parser, Subcommand};
use reconlib::{
    config::ReconConfig,
    error::{ReconError, Result},
    formats::csv::Csv,
    pipeline,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "recon", version, about = "Сверка банковской выписки со счетами")]
struct Cli {
    /// TOML с настройками (по умолчанию встроенные значения)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Очистить выписку до полей date,amount,balance,mode,name
    CleanBank {
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Выходной файл (по умолчанию stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Очистить счета до полей date,amount,mode,name
    CleanInvoices {
        #[arg(short = 'i', long = "input")]
        input: PathBuf,

        /// Выходной файл (по умолчанию stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Нормализовать оба набора, сверить и выгрузить три CSV
    Reconcile {
        #[arg(long = "bank")]
        bank: PathBuf,

        #[arg(long = "invoices")]
        invoices: PathBuf,

        #[arg(long = "out-dir", default_value = "data_processed")]
        out_dir: PathBuf,

        /// Допуск по дате в днях (перекрывает конфиг)
        #[arg(long = "window-days")]
        window_days: Option<i64>,
    },
}

fn output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(File::create(p)?),
        None => Box::new(io::stdout()),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recon=info,reconlib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut cfg = match &cli.config {
        Some(path) => ReconConfig::load(path)?,
        None => ReconConfig::default(),
    };

    match cli.command {
        Command::CleanBank { input, output: out } => {
            let records = pipeline::clean_bank_file(&input, &cfg)?;
            let mut writer = output(out.as_deref())?;
            Csv::write_bank(&mut writer, &records)?;
            writer.flush().map_err(ReconError::from)
        }
        Command::CleanInvoices { input, output: out } => {
            let records = pipeline::clean_invoice_file(&input, &cfg)?;
            let mut writer = output(out.as_deref())?;
            Csv::write_invoices(&mut writer, &records)?;
            writer.flush().map_err(ReconError::from)
        }
        Command::Reconcile {
            bank,
            invoices,
            out_dir,
            window_days,
        } => {
            if let Some(days) = window_days {
                cfg.matching.date_window_days = days;
            }
            let s = pipeline::run(&bank, &invoices, &out_dir, &cfg)?;
            info!(
                matched = s.matched,
                unmatched_bank = s.unmatched_bank,
                unmatched_invoices = s.unmatched_invoices,
                out_dir = %out_dir.display(),
                "done"
            );
            Ok(())
        }
    }
}
