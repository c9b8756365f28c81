use kreditlib::{
    formats::{offers::OffersCsv, requests::RequestsCsv},
    mail::{DumpMailbox, MailSource},
    model::Market,
    pipeline::{calculate, ingest, Config},
    traits::{ReadStage, WriteStage},
};
use std::io::Cursor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: дамп ящика (stdin) -> CSV предложений (stdout), рынок FR
    let mut mailbox = DumpMailbox::read(std::io::BufReader::new(std::io::stdin()))?;
    let messages = mailbox.fetch(Market::Fr.subject_filter())?;
    let normalized = ingest(&messages)?;

    // через промежуточный CSV, как между этапами конвейера
    let mut staged = Vec::new();
    RequestsCsv::write(&mut staged, &normalized.requests)?;
    let rows = RequestsCsv::read(Cursor::new(staged))?;

    let calculated = calculate(rows, &Config::default());
    OffersCsv::write(std::io::stdout(), &calculated.offers)?;
    Ok(())
}
