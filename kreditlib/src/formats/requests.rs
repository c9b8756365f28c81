//! CSV этапа заявок, заголовки: Email,Montant,Durée,Période,Date.
//! «Durée» — составное поле «число + единица» (например, «12 Mois»),
//! «Date» — дата выдачи в формате DD/MM/YYYY.

use crate::{
    error::Result,
    model::{DurationUnit, LoanRequest},
    normalize::{SkipReason, START_OFFSET_DAYS},
    traits::{ReadStage, WriteStage},
};
use chrono::{Duration, NaiveDate};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RequestRow {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Montant")]
    pub montant: String,
    #[serde(rename = "Durée")]
    pub duree: String,
    /// Дублирует единицу из «Durée»; при чтении не используется.
    #[serde(rename = "Période")]
    pub periode: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl RequestRow {
    /// Построчная конвертация: ошибка — причина пропуска строки,
    /// а не отказ всего файла.
    pub fn into_request(self) -> std::result::Result<LoanRequest, SkipReason> {
        let amount: Decimal = self
            .montant
            .trim()
            .parse()
            .map_err(|_| SkipReason::BadField(format!("Montant: {}", self.montant)))?;
        if amount <= Decimal::ZERO {
            return Err(SkipReason::NoAmount);
        }

        let mut parts = self.duree.split_whitespace();
        let duration: u32 = parts
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| SkipReason::BadField(format!("Durée: {}", self.duree)))?;
        if duration == 0 {
            return Err(SkipReason::NoDuration);
        }
        let unit = match parts.next() {
            None => return Err(SkipReason::NoUnit),
            Some(token) => {
                DurationUnit::from_label(token).ok_or_else(|| SkipReason::BadUnit(token.into()))?
            }
        };

        let start_date = NaiveDate::parse_from_str(self.date.trim(), "%d/%m/%Y")
            .map_err(|_| SkipReason::BadField(format!("Date: {}", self.date)))?;

        Ok(LoanRequest {
            email: self.email,
            amount,
            duration,
            unit,
            reference_date: start_date - Duration::days(START_OFFSET_DAYS),
            start_date,
        })
    }
}

#[derive(serde::Serialize)]
struct RequestOutRow<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Montant")]
    montant: String,
    #[serde(rename = "Durée")]
    duree: String,
    #[serde(rename = "Période")]
    periode: &'static str,
    #[serde(rename = "Date")]
    date: String,
}

pub struct RequestsCsv;

impl ReadStage for RequestsCsv {
    type Row = RequestRow;

    fn read<R: BufRead>(r: R) -> Result<Vec<RequestRow>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut out = Vec::new();
        for rec in rdr.deserialize::<RequestRow>() {
            out.push(rec?);
        }
        Ok(out)
    }
}

impl WriteStage for RequestsCsv {
    type Row = LoanRequest;

    fn write<W: Write>(mut w: W, rows: &[LoanRequest]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        for rq in rows {
            wrt.serialize(RequestOutRow {
                email: &rq.email,
                montant: rq.amount.to_string(),
                duree: rq.duration_label(),
                periode: rq.unit.label(),
                date: rq.start_date.format("%d/%m/%Y").to_string(),
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
