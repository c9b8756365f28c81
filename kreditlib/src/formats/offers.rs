//! CSV этапа предложений, заголовки:
//! Email,Montant,Durée,Date de début,Taux annuel,Mensualité du crédit,Total des mensualités.

use crate::{
    error::{KreditError, Result},
    model::Offer,
    traits::{ReadStage, WriteStage},
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct OfferInRow {
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Montant")]
    montant: String,
    #[serde(rename = "Durée")]
    duree: String,
    #[serde(rename = "Date de début")]
    date_de_debut: String,
    #[serde(rename = "Taux annuel")]
    taux_annuel: String,
    #[serde(rename = "Mensualité du crédit")]
    mensualite: String,
    #[serde(rename = "Total des mensualités")]
    total: String,
}

#[derive(serde::Serialize)]
struct OfferOutRow<'a> {
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Montant")]
    montant: String,
    #[serde(rename = "Durée")]
    duree: &'a str,
    #[serde(rename = "Date de début")]
    date_de_debut: String,
    #[serde(rename = "Taux annuel")]
    taux_annuel: String,
    #[serde(rename = "Mensualité du crédit")]
    mensualite: String,
    #[serde(rename = "Total des mensualités")]
    total: String,
}

fn parse_dec(name: &str, v: &str) -> Result<Decimal> {
    v.trim()
        .parse()
        .map_err(|e| KreditError::Parse(format!("{name}: {e}")))
}

pub struct OffersCsv;

impl ReadStage for OffersCsv {
    type Row = Offer;

    fn read<R: BufRead>(r: R) -> Result<Vec<Offer>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut out = Vec::new();

        for rec in rdr.deserialize::<OfferInRow>() {
            let row = rec?;
            out.push(Offer {
                email: row.email,
                amount: parse_dec("Montant", &row.montant)?,
                duration_label: row.duree,
                start_date: NaiveDate::parse_from_str(row.date_de_debut.trim(), "%d/%m/%Y")
                    .map_err(|e| KreditError::Parse(format!("Date de début: {e}")))?,
                annual_rate: parse_dec("Taux annuel", &row.taux_annuel)?,
                monthly_payment: parse_dec("Mensualité du crédit", &row.mensualite)?,
                total_payment: parse_dec("Total des mensualités", &row.total)?,
            });
        }
        Ok(out)
    }
}

impl WriteStage for OffersCsv {
    type Row = Offer;

    fn write<W: Write>(mut w: W, rows: &[Offer]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);
        for o in rows {
            wrt.serialize(OfferOutRow {
                email: &o.email,
                montant: o.amount.to_string(),
                duree: &o.duration_label,
                date_de_debut: o.start_date.format("%d/%m/%Y").to_string(),
                taux_annuel: o.annual_rate.to_string(),
                mensualite: o.monthly_payment.to_string(),
                total: o.total_payment.to_string(),
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
