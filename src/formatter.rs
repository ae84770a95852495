//! Currency and date rendering for the pt-BR locale.
//!
//! The conventions live behind [`DisplayFormatter`] so presentation code can
//! be handed any strategy; [`LocaleFormatter`] is the configured one.

use crate::config::{DateStyle, FormatConfig, Locale};
use crate::types::DateValue;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Separates the currency symbol from the amount.
const NBSP: char = '\u{a0}';

pub trait DisplayFormatter {
    /// Absent → empty string.
    fn format_currency(&self, value: Option<f64>) -> String;

    /// Absent → empty string. Text already containing `/` is returned as is.
    fn format_date(&self, value: Option<&DateValue>) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct LocaleFormatter {
    config: FormatConfig,
}

impl LocaleFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    fn currency_symbol(&self) -> &str {
        match self.config.currency.as_str() {
            "BRL" => "R$",
            "USD" => "US$",
            "EUR" => "€",
            other => other,
        }
    }

    fn separators(&self) -> (char, char) {
        match self.config.locale {
            Locale::PtBr => ('.', ','),
        }
    }

    fn render_date(&self, date: NaiveDate) -> String {
        let month = MONTHS[date.month0() as usize];
        match self.config.date_style {
            DateStyle::Short => date.format("%d/%m/%Y").to_string(),
            DateStyle::Medium => {
                let abbreviated: String = month.chars().take(3).collect();
                format!("{} de {}. de {}", date.day(), abbreviated, date.year())
            }
            DateStyle::Long => format!("{} de {} de {}", date.day(), month, date.year()),
        }
    }
}

impl DisplayFormatter for LocaleFormatter {
    fn format_currency(&self, value: Option<f64>) -> String {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return String::new();
        };

        // Decimal keeps 1.005 as written, so half-cents round the way they read.
        let Some(amount) = Decimal::from_f64(value) else {
            warn!(value, "amount out of range, not formatting");
            return String::new();
        };
        let rounded = amount
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let (Some(units), Some(cents)) = (
            rounded.trunc().to_u128(),
            (rounded.fract() * Decimal::ONE_HUNDRED).to_u128(),
        ) else {
            warn!(value, "amount out of range, not formatting");
            return String::new();
        };

        let (grouping, decimal) = self.separators();
        let sign = if amount.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{}{}{}{}{}{:02}",
            sign,
            self.currency_symbol(),
            NBSP,
            group_digits(units, grouping),
            decimal,
            cents
        )
    }

    fn format_date(&self, value: Option<&DateValue>) -> String {
        match value {
            None => String::new(),
            Some(DateValue::Date(date)) => self.render_date(*date),
            Some(DateValue::Text(text)) if text.is_empty() || text.contains('/') => text.clone(),
            Some(DateValue::Text(text)) => match parse_calendar_date(text) {
                Some(date) => self.render_date(date),
                None => {
                    warn!(%text, "unparseable date, passing it through");
                    text.clone()
                }
            },
        }
    }
}

fn group_digits(mut value: u128, separator: char) -> String {
    let mut groups = Vec::new();
    while value >= 1000 {
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.push(value.to_string());
    groups.reverse();
    groups.join(&separator.to_string())
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
/// Timestamps keep the calendar date they were written with.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Currency text using the default pt-BR / BRL configuration.
pub fn format_currency(value: Option<f64>) -> String {
    LocaleFormatter::default().format_currency(value)
}

/// Date text using the default pt-BR short style.
pub fn format_date(value: Option<&DateValue>) -> String {
    LocaleFormatter::default().format_date(value)
}
