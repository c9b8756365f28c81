//! Расчёт аннуитета: фиксированный ежемесячный платёж и итоговая сумма выплат.

use crate::{
    error::{KreditError, Result},
    model::Amortization,
};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// Годовая ставка по умолчанию, в процентах.
pub const DEFAULT_ANNUAL_RATE: Decimal = dec!(2.0);

/// Стандартная аннуитетная формула; при нулевой ставке — равные доли без процентов.
///
/// `months == 0` — ошибка области определения, а не бесконечность:
/// вызывающая сторона обязана отфильтровать нулевой срок заранее.
pub fn amortize(
    principal: Decimal,
    months: u32,
    annual_rate_percent: Decimal,
) -> Result<Amortization> {
    if months == 0 {
        return Err(KreditError::Validation("duration of 0 months".into()));
    }

    let n = Decimal::from(months);
    let monthly_rate = annual_rate_percent / dec!(12) / dec!(100);

    let monthly = if monthly_rate.is_zero() {
        principal / n
    } else {
        // P·r·(1+r)^n / ((1+r)^n − 1) — та же формула, без отрицательной степени
        let growth = (Decimal::ONE + monthly_rate).powi(months as i64);
        principal * monthly_rate * growth / (growth - Decimal::ONE)
    };
    let total = monthly * n;

    Ok(Amortization {
        monthly_payment: monthly.round_dp(2),
        total_payment: total.round_dp(2),
    })
}
