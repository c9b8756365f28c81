//! Доменные модели — нормализованный слой между этапами конвейера.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DurationUnit {
    Month,
    Year,
}

impl DurationUnit {
    pub fn label(&self) -> &'static str {
        match self {
            DurationUnit::Month => "Mois",
            DurationUnit::Year => "Année",
        }
    }

    pub fn from_label(s: &str) -> Option<DurationUnit> {
        match s {
            "Mois" => Some(DurationUnit::Month),
            "Année" => Some(DurationUnit::Year),
            _ => None,
        }
    }
}

/// Рынок определяет фильтр темы входящих и язык исходящего предложения.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Market {
    Fr,
    De,
}

impl Market {
    /// Ключевое слово темы входящих писем.
    pub fn subject_filter(&self) -> &'static str {
        match self {
            Market::Fr => "Nouvelle demande FR",
            Market::De => "Nouvelle demande DE",
        }
    }

    /// Тема исходящего предложения.
    pub fn offer_subject(&self) -> &'static str {
        match self {
            Market::Fr => "Proposition de prêt",
            Market::De => "Angebot für Ihr Darlehen",
        }
    }
}

/// Результат одной попытки извлечения: любое поле может отсутствовать,
/// отсутствие поля — не ошибка всей записи.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    pub email: Option<String>,
    pub amount: Option<Decimal>,
    pub duration: Option<u32>,
    pub unit: Option<DurationUnit>,
}

/// Одна каноническая заявка на заявителя после дедупликации.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanRequest {
    pub email: String,
    pub amount: Decimal,
    /// Срок в исходных единицах, как в письме.
    pub duration: u32,
    pub unit: DurationUnit,
    pub reference_date: NaiveDate,
    /// reference_date + 90 дней.
    pub start_date: NaiveDate,
}

impl LoanRequest {
    pub fn duration_months(&self) -> u32 {
        match self.unit {
            DurationUnit::Month => self.duration,
            DurationUnit::Year => self.duration * 12,
        }
    }

    /// Подпись срока исходной единицей, например «12 Mois».
    pub fn duration_label(&self) -> String {
        format!("{} {}", self.duration, self.unit.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Amortization {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
}

/// Строка предложения — всё, что подставляется в исходящее письмо.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub email: String,
    pub amount: Decimal,
    pub duration_label: String,
    pub start_date: NaiveDate,
    pub annual_rate: Decimal,
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
}

/// Письмо с границы транспорта: только то, что нужно конвейеру.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedMessage {
    pub observed_at: DateTime<FixedOffset>,
    pub subject: String,
    pub body: String,
}
