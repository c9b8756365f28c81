//! Точки входа этапов конвейера: приём, расчёт, рассылка.

use crate::{
    amort::{amortize, DEFAULT_ANNUAL_RATE},
    error::Result,
    extract::Extractor,
    formats::requests::RequestRow,
    mail::MailSender,
    model::{FetchedMessage, Market, Offer},
    normalize::{normalize, BatchReport, Normalized, Skip, SkipReason},
    offer::{build_offer, render, template},
};
use rust_decimal::Decimal;

/// Конфигурация конвейера; ставка одна для всех заявок.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Годовая ставка в процентах.
    pub annual_rate: Decimal,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            annual_rate: DEFAULT_ANNUAL_RATE,
        }
    }
}

/// Извлечение и дедупликация входящих писем.
///
/// Фильтр по теме — обязанность источника (`MailSource::fetch`),
/// сюда письма приходят уже отобранными.
pub fn ingest(messages: &[FetchedMessage]) -> Result<Normalized> {
    let extractor = Extractor::new()?;
    let raws = messages
        .iter()
        .map(|m| (extractor.extract(&m.body), m.observed_at));
    let normalized = normalize(raws);
    tracing::debug!(
        total = messages.len(),
        kept = normalized.report.kept,
        "ingest"
    );
    Ok(normalized)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculated {
    pub offers: Vec<Offer>,
    pub report: BatchReport,
}

/// Расчёт аннуитета по строкам этапа заявок.
/// Плохая строка пропускается с причиной, пакет продолжается.
pub fn calculate(rows: Vec<RequestRow>, config: &Config) -> Calculated {
    let mut offers = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let email = Some(row.email.clone());
        let request = match row.into_request() {
            Ok(rq) => rq,
            Err(reason) => {
                skipped.push(Skip {
                    index,
                    email,
                    reason,
                });
                continue;
            }
        };

        let calc = match amortize(request.amount, request.duration_months(), config.annual_rate) {
            Ok(c) => c,
            Err(e) => {
                skipped.push(Skip {
                    index,
                    email,
                    reason: SkipReason::Math(e.to_string()),
                });
                continue;
            }
        };

        offers.push(build_offer(&request, &calc, config.annual_rate));
    }

    let kept = offers.len();
    tracing::debug!(kept, skipped = skipped.len(), "calculate");
    Calculated {
        offers,
        report: BatchReport { kept, skipped },
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendReport {
    pub sent: usize,
    pub failed: Vec<(String, String)>,
}

/// Рендер шаблона рынка и отправка каждого предложения.
/// Сбой одного адресата не прерывает рассылку.
pub fn send_offers<S: MailSender>(offers: &[Offer], market: Market, sender: &mut S) -> SendReport {
    let tpl = template(market);
    let subject = market.offer_subject();
    let mut report = SendReport::default();

    for offer in offers {
        let body = render(tpl, offer);
        match sender.send(&offer.email, subject, &body) {
            Ok(()) => report.sent += 1,
            Err(e) => report.failed.push((offer.email.clone(), e.to_string())),
        }
    }

    tracing::debug!(sent = report.sent, failed = report.failed.len(), "send");
    report
}
