use chrono::NaiveDate;
use kreditlib::{
    formats::offers::OffersCsv,
    mail::{MailSender, OutboxWriter},
    model::{Amortization, DurationUnit, LoanRequest, Market, Offer},
    offer::{build_offer, render, template},
    traits::{ReadStage, WriteStage},
};
use rust_decimal_macros::dec;
use std::io::Cursor;

fn sample_offer() -> Offer {
    let request = LoanRequest {
        email: "anna@example.com".into(),
        amount: dec!(10000),
        duration: 2,
        unit: DurationUnit::Year,
        reference_date: NaiveDate::from_ymd_opt(2023, 12, 15).unwrap(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
    };
    let calc = Amortization {
        monthly_payment: dec!(425.40),
        total_payment: dec!(10209.66),
    };
    build_offer(&request, &calc, dec!(2.0))
}

#[test]
fn projection_keeps_original_unit_wording() {
    let offer = sample_offer();
    assert_eq!(offer.duration_label, "2 Année");
    assert_eq!(offer.email, "anna@example.com");
    assert_eq!(offer.annual_rate, dec!(2.0));
    assert_eq!(offer.monthly_payment, dec!(425.40));
}

#[test]
fn rendered_fr_body_contains_substituted_figures() {
    let offer = sample_offer();
    let body = render(template(Market::Fr), &offer);

    assert!(body.contains("10000 EUR"));
    assert!(body.contains("2 Année"));
    assert!(body.contains("2.0%"));
    assert!(body.contains("14/03/2024"));
    assert!(body.contains("425.40 EUR"));
    assert!(body.contains("10209.66 EUR"));
    assert!(!body.contains('{'), "unresolved placeholder: {body}");
}

#[test]
fn rendered_de_body_uses_german_wording() {
    let offer = sample_offer();
    let body = render(template(Market::De), &offer);

    assert!(body.contains("Monatliche Rate"));
    assert!(body.contains("425.40 EUR"));
    assert!(!body.contains('{'));
}

#[test]
fn offers_csv_roundtrip() {
    let original = vec![sample_offer()];

    let mut buf = Vec::new();
    OffersCsv::write(&mut buf, &original).expect("write offers csv");

    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.starts_with(
        "Email,Montant,Durée,Date de début,Taux annuel,Mensualité du crédit,Total des mensualités"
    ));

    let back = OffersCsv::read(Cursor::new(buf)).expect("read offers csv");
    assert_eq!(back, original);
}

#[test]
fn outbox_writer_emits_headers_and_body() {
    let mut outbox = OutboxWriter::new(Vec::new());
    outbox
        .send(
            "anna@example.com",
            Market::Fr.offer_subject(),
            "<html>corps</html>",
        )
        .expect("send");

    let dump = String::from_utf8(outbox.into_inner()).unwrap();
    assert!(dump.contains("To: anna@example.com"));
    assert!(dump.contains("Subject: Proposition de prêt"));
    assert!(dump.contains("<html>corps</html>"));
}
