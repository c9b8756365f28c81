//! kreditlib — библиотека обработки кредитных заявок из почты:
//! извлечение полей из текста письма, дедупликация по заявителю,
//! расчёт аннуитета и формирование персональных предложений.

pub mod error;
pub mod model;
pub mod traits;
pub mod extract;
pub mod normalize;
pub mod amort;
pub mod offer;
pub mod mail;
pub mod pipeline;

pub mod formats {
    pub mod inbox;
    pub mod requests;
    pub mod offers;
}
