//! Дедупликация заявок: одна каноническая запись на e-mail,
//! побеждает строго большая сумма, при равенстве — первая встреченная.

use crate::model::{LoanRequest, RawRequest};
use chrono::{DateTime, Duration, FixedOffset};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// Смещение даты выдачи относительно момента получения заявки, в днях.
pub const START_OFFSET_DAYS: i64 = 90;

/// Причина пропуска одной записи; пакет при этом продолжается.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoEmail,
    NoAmount,
    NoDuration,
    NoUnit,
    BadUnit(String),
    BadField(String),
    Math(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoEmail => write!(f, "no Email field"),
            SkipReason::NoAmount => write!(f, "amount missing or not positive"),
            SkipReason::NoDuration => write!(f, "duration missing or zero"),
            SkipReason::NoUnit => write!(f, "duration unit missing"),
            SkipReason::BadUnit(t) => write!(f, "unknown duration unit: {t}"),
            SkipReason::BadField(t) => write!(f, "bad field value: {t}"),
            SkipReason::Math(t) => write!(f, "amortization failed: {t}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    /// Порядковый номер записи во входе этапа.
    pub index: usize,
    pub email: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub kept: usize,
    pub skipped: Vec<Skip>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Порядок — порядок первого появления e-mail во входе.
    pub requests: Vec<LoanRequest>,
    pub report: BatchReport,
}

fn validate(
    raw: RawRequest,
    observed_at: DateTime<FixedOffset>,
) -> std::result::Result<LoanRequest, SkipReason> {
    let email = match raw.email {
        Some(e) => e,
        None => return Err(SkipReason::NoEmail),
    };
    let amount = match raw.amount {
        Some(a) if a > Decimal::ZERO => a,
        _ => return Err(SkipReason::NoAmount),
    };
    let duration = match raw.duration {
        Some(d) if d > 0 => d,
        _ => return Err(SkipReason::NoDuration),
    };
    let unit = match raw.unit {
        Some(u) => u,
        None => return Err(SkipReason::NoUnit),
    };

    let reference_date = observed_at.date_naive();
    Ok(LoanRequest {
        email,
        amount,
        duration,
        unit,
        reference_date,
        start_date: reference_date + Duration::days(START_OFFSET_DAYS),
    })
}

/// Свёртка всех извлечённых записей в каноническое множество заявок.
///
/// Дата выдачи берётся из observed_at победившей записи, не из агрегата.
pub fn normalize<I>(raws: I) -> Normalized
where
    I: IntoIterator<Item = (RawRequest, DateTime<FixedOffset>)>,
{
    let mut by_email: HashMap<String, usize> = HashMap::new();
    let mut requests: Vec<LoanRequest> = Vec::new();
    let mut skipped: Vec<Skip> = Vec::new();

    for (index, (raw, observed_at)) in raws.into_iter().enumerate() {
        let email = raw.email.clone();
        let candidate = match validate(raw, observed_at) {
            Ok(c) => c,
            Err(reason) => {
                skipped.push(Skip {
                    index,
                    email,
                    reason,
                });
                continue;
            }
        };

        match by_email.get(&candidate.email) {
            Some(&slot) => {
                // строго больше: равная сумма оставляет первую встреченную
                if candidate.amount > requests[slot].amount {
                    requests[slot] = candidate;
                }
            }
            None => {
                by_email.insert(candidate.email.clone(), requests.len());
                requests.push(candidate);
            }
        }
    }

    let kept = requests.len();
    Normalized {
        requests,
        report: BatchReport { kept, skipped },
    }
}
