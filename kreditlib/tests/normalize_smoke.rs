use chrono::{DateTime, FixedOffset, NaiveDate};
use kreditlib::{
    model::{DurationUnit, RawRequest},
    normalize::{normalize, SkipReason},
};
use rust_decimal::Decimal;

fn at(rfc2822: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc2822(rfc2822).expect("rfc2822 date")
}

fn raw(email: &str, amount: i64, duration: u32) -> RawRequest {
    RawRequest {
        email: Some(email.to_string()),
        amount: Some(Decimal::from(amount)),
        duration: Some(duration),
        unit: Some(DurationUnit::Month),
    }
}

#[test]
fn max_amount_wins() {
    let t = at("Fri, 15 Dec 2023 10:00:00 +0000");
    let out = normalize(vec![
        (raw("a@example.com", 500, 6), t),
        (raw("a@example.com", 1500, 12), t),
        (raw("a@example.com", 1000, 24), t),
    ]);

    assert_eq!(out.requests.len(), 1);
    assert_eq!(out.requests[0].amount, Decimal::from(1500));
    assert_eq!(out.requests[0].duration, 12);
    assert!(out.report.skipped.is_empty());
}

#[test]
fn equal_amounts_keep_first_seen() {
    let t = at("Fri, 15 Dec 2023 10:00:00 +0000");
    let out = normalize(vec![
        (raw("a@example.com", 1000, 6), t),
        (raw("a@example.com", 1000, 24), t),
    ]);

    assert_eq!(out.requests.len(), 1);
    assert_eq!(out.requests[0].duration, 6);
}

#[test]
fn permutation_yields_identical_mapping() {
    let t = at("Fri, 15 Dec 2023 10:00:00 +0000");
    let records = vec![
        (raw("a@example.com", 500, 6), t),
        (raw("b@example.com", 900, 12), t),
        (raw("a@example.com", 1500, 12), t),
        (raw("c@example.com", 300, 3), t),
    ];
    let mut reversed = records.clone();
    reversed.reverse();

    let mut out1 = normalize(records).requests;
    let mut out2 = normalize(reversed).requests;
    out1.sort_by(|x, y| x.email.cmp(&y.email));
    out2.sort_by(|x, y| x.email.cmp(&y.email));

    assert_eq!(out1, out2);
}

#[test]
fn normalize_is_idempotent() {
    let t = at("Fri, 15 Dec 2023 10:00:00 +0000");
    let records = vec![
        (raw("a@example.com", 500, 6), t),
        (raw("a@example.com", 1500, 12), t),
    ];
    assert_eq!(normalize(records.clone()), normalize(records));
}

#[test]
fn record_without_email_is_skipped() {
    let t = at("Fri, 15 Dec 2023 10:00:00 +0000");
    let mut nameless = raw("x@example.com", 700, 12);
    nameless.email = None;

    let out = normalize(vec![(nameless, t), (raw("b@example.com", 900, 12), t)]);

    assert_eq!(out.requests.len(), 1);
    assert_eq!(out.requests[0].email, "b@example.com");
    assert_eq!(out.report.skipped.len(), 1);
    assert_eq!(out.report.skipped[0].reason, SkipReason::NoEmail);
}

#[test]
fn record_without_unit_is_discarded() {
    let t = at("Fri, 15 Dec 2023 10:00:00 +0000");
    let mut unitless = raw("a@example.com", 700, 12);
    unitless.unit = None;

    let out = normalize(vec![(unitless, t)]);

    assert!(out.requests.is_empty());
    assert_eq!(out.report.skipped[0].reason, SkipReason::NoUnit);
    assert_eq!(
        out.report.skipped[0].email.as_deref(),
        Some("a@example.com")
    );
}

#[test]
fn start_date_is_observed_plus_90_days_across_year_boundary() {
    let out = normalize(vec![(
        raw("a@example.com", 1000, 12),
        at("Fri, 15 Dec 2023 10:00:00 +0000"),
    )]);

    let rq = &out.requests[0];
    assert_eq!(rq.reference_date, NaiveDate::from_ymd_opt(2023, 12, 15).unwrap());
    assert_eq!(rq.start_date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
}

#[test]
fn winning_record_keeps_its_own_observation_date() {
    let out = normalize(vec![
        (
            raw("a@example.com", 500, 6),
            at("Fri, 1 Dec 2023 10:00:00 +0000"),
        ),
        (
            raw("a@example.com", 1500, 12),
            at("Fri, 15 Dec 2023 10:00:00 +0000"),
        ),
    ]);

    assert_eq!(
        out.requests[0].start_date,
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    );
}
