use clap::{Parser, ValueEnum};
use kreditlib::{
    error::{KreditError, Result},
    formats::{offers::OffersCsv, requests::RequestsCsv},
    mail::{DumpMailbox, MailSource, OutboxWriter},
    model::Market,
    pipeline::{calculate, ingest, send_offers, Config},
    traits::{ReadStage, WriteStage},
};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Write};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Stage {
    /// Дамп ящика -> CSV заявок
    Ingest,
    /// CSV заявок -> CSV предложений
    Calc,
    /// CSV предложений -> дамп исходящих
    Send,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MarketArg {
    Fr,
    De,
}

impl From<MarketArg> for Market {
    fn from(m: MarketArg) -> Market {
        match m {
            MarketArg::Fr => Market::Fr,
            MarketArg::De => Market::De,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kredit", version, about = "Обработка кредитных заявок из почты")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Этап конвейера
    #[arg(long = "stage", value_enum)]
    stage: Stage,

    /// Рынок: фильтр темы входящих и язык шаблона
    #[arg(long = "market", value_enum, default_value_t = MarketArg::Fr)]
    market: MarketArg,

    /// Годовая ставка, %
    #[arg(long = "rate", default_value = "2.0")]
    rate: Decimal,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // reader
    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    // writer
    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let market = Market::from(cli.market);
    let config = Config {
        annual_rate: cli.rate,
    };

    match cli.stage {
        Stage::Ingest => {
            let mut mailbox = DumpMailbox::read(br)?;
            let messages = mailbox.fetch(market.subject_filter())?;
            let normalized = ingest(&messages)?;
            for skip in &normalized.report.skipped {
                tracing::warn!(
                    index = skip.index,
                    email = skip.email.as_deref().unwrap_or("-"),
                    "skipped: {}",
                    skip.reason
                );
            }
            tracing::info!(
                kept = normalized.report.kept,
                skipped = normalized.report.skipped.len(),
                "ingest done"
            );
            RequestsCsv::write(&mut writer, &normalized.requests)?;
        }
        Stage::Calc => {
            let rows = RequestsCsv::read(br)?;
            let calculated = calculate(rows, &config);
            for skip in &calculated.report.skipped {
                tracing::warn!(
                    index = skip.index,
                    email = skip.email.as_deref().unwrap_or("-"),
                    "skipped: {}",
                    skip.reason
                );
            }
            tracing::info!(
                kept = calculated.report.kept,
                skipped = calculated.report.skipped.len(),
                "calc done"
            );
            OffersCsv::write(&mut writer, &calculated.offers)?;
        }
        Stage::Send => {
            let offers = OffersCsv::read(br)?;
            let mut outbox = OutboxWriter::new(&mut writer);
            let report = send_offers(&offers, market, &mut outbox);
            for (email, err) in &report.failed {
                tracing::warn!(email = email.as_str(), "send failed: {err}");
            }
            tracing::info!(sent = report.sent, "send done");
        }
    }

    writer.flush().map_err(KreditError::from)
}
