//! Границы почтового транспорта: источник входящих и отправитель исходящих.
//! Сами IMAP/SMTP остаются за пределами библиотеки.

use crate::{error::Result, formats::inbox::InboxCsv, model::FetchedMessage, traits::ReadStage};
use std::io::{BufRead, Write};

/// Источник входящих писем; фильтр по теме — как IMAP SEARCH SUBJECT.
pub trait MailSource {
    fn fetch(&mut self, subject_filter: &str) -> Result<Vec<FetchedMessage>>;
}

/// Отправитель писем; html_body уже полностью отрендерен.
pub trait MailSender {
    fn send(&mut self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

/// Ящик, загруженный из CSV-дампа.
pub struct DumpMailbox {
    messages: Vec<FetchedMessage>,
}

impl DumpMailbox {
    pub fn read<R: BufRead>(r: R) -> Result<DumpMailbox> {
        Ok(DumpMailbox {
            messages: InboxCsv::read(r)?,
        })
    }
}

impl MailSource for DumpMailbox {
    fn fetch(&mut self, subject_filter: &str) -> Result<Vec<FetchedMessage>> {
        Ok(self
            .messages
            .iter()
            .filter(|m| m.subject.contains(subject_filter))
            .cloned()
            .collect())
    }
}

/// Пишет каждое письмо блоком To/Subject + HTML-тело в любой Write.
pub struct OutboxWriter<W: Write> {
    w: W,
}

impl<W: Write> OutboxWriter<W> {
    pub fn new(w: W) -> OutboxWriter<W> {
        OutboxWriter { w }
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

impl<W: Write> MailSender for OutboxWriter<W> {
    fn send(&mut self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        writeln!(self.w, "To: {to}")?;
        writeln!(self.w, "Subject: {subject}")?;
        writeln!(self.w, "Content-Type: text/html; charset=utf-8")?;
        writeln!(self.w)?;
        writeln!(self.w, "{html_body}")?;
        writeln!(self.w, "----")?;
        Ok(())
    }
}
