//! Микропарсер тела письма: четыре независимых шаблона «метка: значение».

use crate::{
    error::{KreditError, Result},
    model::{DurationUnit, RawRequest},
};
use regex::Regex;
use rust_decimal::Decimal;

pub struct Extractor {
    re_tags: Regex,
    re_email: Regex,
    re_amount: Regex,
    re_duration: Regex,
    re_unit: Regex,
}

impl Extractor {
    pub fn new() -> Result<Extractor> {
        let compile = |p: &str| Regex::new(p).map_err(|e| KreditError::Parse(e.to_string()));
        Ok(Extractor {
            re_tags: compile("<.*?>")?,
            re_email: compile(r"Email:\s*(\S+)")?,
            re_amount: compile(r"Montant:\s*(\d+(\.\d+)?)")?,
            re_duration: compile(r"Durée:\s*(\d+)")?,
            re_unit: compile(r"periode:\s*(Mois|Année)")?,
        })
    }

    /// Убирает разметку `<...>` одним нежадным проходом.
    fn clean(&self, body: &str) -> String {
        self.re_tags.replace_all(body, "").into_owned()
    }

    /// Каждый шаблон ищется независимо; несовпадение — None только в своём поле.
    pub fn extract(&self, body: &str) -> RawRequest {
        let text = self.clean(body);

        let email = self
            .re_email
            .captures(&text)
            .map(|c| c[1].trim().to_string());
        let amount = self
            .re_amount
            .captures(&text)
            .and_then(|c| c[1].parse::<Decimal>().ok());
        let duration = self
            .re_duration
            .captures(&text)
            .and_then(|c| c[1].parse::<u32>().ok());
        let unit = self
            .re_unit
            .captures(&text)
            .and_then(|c| DurationUnit::from_label(&c[1]));

        RawRequest {
            email,
            amount,
            duration,
            unit,
        }
    }
}
