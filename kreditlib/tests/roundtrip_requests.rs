use chrono::NaiveDate;
use kreditlib::{
    formats::requests::{RequestRow, RequestsCsv},
    model::{DurationUnit, LoanRequest},
    normalize::SkipReason,
    traits::{ReadStage, WriteStage},
};
use rust_decimal_macros::dec;
use std::io::Cursor;

fn request(email: &str, duration: u32, unit: DurationUnit) -> LoanRequest {
    let reference = NaiveDate::from_ymd_opt(2023, 12, 15).unwrap();
    LoanRequest {
        email: email.to_string(),
        amount: dec!(1500.50),
        duration,
        unit,
        reference_date: reference,
        start_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
    }
}

#[test]
fn requests_csv_roundtrip() {
    let original = vec![
        request("jean@example.com", 12, DurationUnit::Month),
        request("anna@example.com", 2, DurationUnit::Year),
    ];

    let mut buf = Vec::new();
    RequestsCsv::write(&mut buf, &original).expect("write requests csv");

    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.starts_with("Email,Montant,Durée,Période,Date"));
    assert!(text.contains("12 Mois"));
    assert!(text.contains("2 Année"));
    assert!(text.contains("14/03/2024"));

    let rows = RequestsCsv::read(Cursor::new(buf)).expect("read requests csv");
    let parsed: Vec<LoanRequest> = rows
        .into_iter()
        .map(|r| r.into_request().expect("row converts"))
        .collect();

    assert_eq!(parsed, original);
}

#[test]
fn year_unit_expands_to_months() {
    let rq = request("anna@example.com", 2, DurationUnit::Year);
    assert_eq!(rq.duration_months(), 24);
    assert_eq!(rq.duration_label(), "2 Année");
}

fn row(duree: &str, periode: &str) -> RequestRow {
    RequestRow {
        email: "x@example.com".into(),
        montant: "1000".into(),
        duree: duree.into(),
        periode: periode.into(),
        date: "14/03/2024".into(),
    }
}

#[test]
fn unknown_unit_token_is_a_row_skip() {
    let err = row("12 Semaine", "Semaine").into_request().unwrap_err();
    assert_eq!(err, SkipReason::BadUnit("Semaine".into()));
}

#[test]
fn missing_unit_is_a_row_skip() {
    let err = row("12", "").into_request().unwrap_err();
    assert_eq!(err, SkipReason::NoUnit);
}

#[test]
fn bad_amount_is_a_row_skip() {
    let mut r = row("12 Mois", "Mois");
    r.montant = "abc".into();
    assert!(matches!(
        r.into_request().unwrap_err(),
        SkipReason::BadField(_)
    ));
}
