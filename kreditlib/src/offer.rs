//! Формирование предложения: проекция заявки и расчёта плюс HTML-шаблоны.

use crate::model::{Amortization, LoanRequest, Market, Offer};
use rust_decimal::Decimal;

/// Чистая проекция; срок подписывается исходной единицей, не месяцами.
pub fn build_offer(request: &LoanRequest, calc: &Amortization, annual_rate: Decimal) -> Offer {
    Offer {
        email: request.email.clone(),
        amount: request.amount,
        duration_label: request.duration_label(),
        start_date: request.start_date,
        annual_rate,
        monthly_payment: calc.monthly_payment,
        total_payment: calc.total_payment,
    }
}

pub const TEMPLATE_FR: &str = r#"<html>
<body>
    <p>Bonjour,</p>
    <p>Voici les détails de votre demande :</p>
    <ul>
        <li><strong>Montant:</strong> {Montant} EUR</li>
        <li><strong>Durée:</strong> {Durée}</li>
        <li><strong>Taux annuel:</strong> {Taux_annuel}%</li>
        <li><strong>Date de début:</strong> {Date_de_début}</li>
        <li><strong>Mensualité du crédit:</strong> {Mensualité_du_crédit} EUR</li>
        <li><strong>Total des mensualités:</strong> {Total_des_mensualités} EUR</li>
    </ul>
    <p>Cordialement,</p>
    <p>Votre équipe</p>
</body>
</html>
"#;

pub const TEMPLATE_DE: &str = r#"<html>
<body>
    <p>Sehr geehrte/r Kunde/in,</p>
    <p>Hier sind die Details Ihrer Anfrage:</p>
    <ul>
        <li><strong>Betrag:</strong> {Montant} EUR</li>
        <li><strong>Dauer:</strong> {Durée}</li>
        <li><strong>Jahreszins:</strong> {Taux_annuel}%</li>
        <li><strong>Beginn des Kredits:</strong> {Date_de_début}</li>
        <li><strong>Monatliche Rate:</strong> {Mensualité_du_crédit} EUR</li>
        <li><strong>Gesamtzahl der Raten:</strong> {Total_des_mensualités} EUR</li>
    </ul>
    <p>Mit freundlichen Grüßen,</p>
    <p>Ihr Team</p>
</body>
</html>
"#;

pub fn template(market: Market) -> &'static str {
    match market {
        Market::Fr => TEMPLATE_FR,
        Market::De => TEMPLATE_DE,
    }
}

/// Подстановка плейсхолдеров шаблона значениями предложения.
pub fn render(template: &str, offer: &Offer) -> String {
    template
        .replace("{Montant}", &offer.amount.to_string())
        .replace("{Durée}", &offer.duration_label)
        .replace("{Taux_annuel}", &offer.annual_rate.to_string())
        .replace(
            "{Date_de_début}",
            &offer.start_date.format("%d/%m/%Y").to_string(),
        )
        .replace(
            "{Mensualité_du_crédit}",
            &offer.monthly_payment.to_string(),
        )
        .replace(
            "{Total_des_mensualités}",
            &offer.total_payment.to_string(),
        )
}
