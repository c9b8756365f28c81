//! CSV-дамп почтового ящика, заголовки: date,subject,body.
//! Дата — в форме заголовка Date: письма (RFC 2822).

use crate::{
    error::{KreditError, Result},
    model::FetchedMessage,
    traits::{ReadStage, WriteStage},
};
use chrono::DateTime;
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct InboxRow {
    date: String,
    subject: String,
    body: String,
}

#[derive(serde::Serialize)]
struct InboxOutRow<'a> {
    date: String,
    subject: &'a str,
    body: &'a str,
}

pub struct InboxCsv;

impl ReadStage for InboxCsv {
    type Row = FetchedMessage;

    fn read<R: BufRead>(r: R) -> Result<Vec<FetchedMessage>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut out = Vec::new();

        for rec in rdr.deserialize::<InboxRow>() {
            let row = rec?;
            let observed_at = DateTime::parse_from_rfc2822(row.date.trim())
                .map_err(|e| KreditError::Parse(format!("date: {e}")))?;
            out.push(FetchedMessage {
                observed_at,
                subject: row.subject,
                body: row.body,
            });
        }
        Ok(out)
    }
}

impl WriteStage for InboxCsv {
    type Row = FetchedMessage;

    fn write<W: Write>(mut w: W, rows: &[FetchedMessage]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        for m in rows {
            wrt.serialize(InboxOutRow {
                date: m.observed_at.to_rfc2822(),
                subject: &m.subject,
                body: &m.body,
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
