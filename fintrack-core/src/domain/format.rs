//! Display formatting for monetary amounts
//!
//! Output shape is `"<symbol> <grouped-number>"`, e.g. `"₹ 1,234,567"`.
//! Amounts are printed with every fraction digit they carry after trailing
//! zeros are dropped; nothing is rounded.

use rust_decimal::Decimal;

use super::account::Currency;

/// How integer digits are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGrouping {
    /// Groups of three: 1,234,567
    Thousands,
    /// Last three digits, then groups of two: 12,34,567
    Indian,
}

/// Separators and grouping for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub grouping: DigitGrouping,
    pub group_separator: char,
    pub decimal_separator: char,
}

impl NumberLocale {
    pub const EN_US: NumberLocale = NumberLocale {
        grouping: DigitGrouping::Thousands,
        group_separator: ',',
        decimal_separator: '.',
    };

    pub const EN_IN: NumberLocale = NumberLocale {
        grouping: DigitGrouping::Indian,
        group_separator: ',',
        decimal_separator: '.',
    };

    pub const DE_DE: NumberLocale = NumberLocale {
        grouping: DigitGrouping::Thousands,
        group_separator: '.',
        decimal_separator: ',',
    };

    /// Look up a locale by BCP 47 tag (`en-US`, `en_IN`, ...)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().replace('_', "-").to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Self::EN_US),
            "en-in" | "hi-in" => Some(Self::EN_IN),
            "de" | "de-de" => Some(Self::DE_DE),
            _ => None,
        }
    }

    /// Like `from_tag`, but unknown tags fall back to `en-US`
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_else(|| {
            log::warn!("unknown locale '{}', using en-US number format", tag);
            Self::EN_US
        })
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Formats amounts for one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyFormatter {
    locale: NumberLocale,
}

impl CurrencyFormatter {
    pub fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// `"<symbol> <number>"`; unknown currencies use their code as symbol
    pub fn format(&self, amount: Decimal, currency: &Currency) -> String {
        format!("{} {}", currency.symbol(), self.format_number(amount))
    }

    /// Same as `format`, starting from a raw currency code
    pub fn format_code(&self, amount: Decimal, currency_code: &str) -> String {
        self.format(amount, &Currency::from_code(currency_code))
    }

    /// Grouped number without a symbol
    pub fn format_number(&self, amount: Decimal) -> String {
        let normalized = if amount.is_zero() {
            Decimal::ZERO
        } else {
            amount.normalize()
        };

        let text = normalized.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut out = String::with_capacity(text.len() + text.len() / 2 + 2);
        if normalized.is_sign_negative() {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.locale));
        if let Some(frac) = frac_part {
            out.push(self.locale.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

/// Format with the default (`en-US`) locale
pub fn format_currency(amount: Decimal, currency_code: &str) -> String {
    CurrencyFormatter::default().format_code(amount, currency_code)
}

fn group_digits(digits: &str, locale: NumberLocale) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    // Positions (from the left) after which a separator goes
    let mut breaks = Vec::new();
    let mut remaining = len - 3;
    breaks.push(remaining);
    let step = match locale.grouping {
        DigitGrouping::Thousands => 3,
        DigitGrouping::Indian => 2,
    };
    while remaining > step {
        remaining -= step;
        breaks.push(remaining);
    }
    breaks.reverse();

    let mut out = String::with_capacity(len + breaks.len());
    let mut start = 0;
    for brk in breaks {
        out.push_str(&digits[start..brk]);
        out.push(locale.group_separator);
        start = brk;
    }
    out.push_str(&digits[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_known_symbol_with_grouping() {
        assert_eq!(format_currency(dec("1234567"), "INR"), "₹ 1,234,567");
        assert_eq!(format_currency(dec("14650"), "EUR"), "€ 14,650");
        assert_eq!(format_currency(dec("999"), "USD"), "$ 999");
        assert_eq!(format_currency(dec("1000"), "GBP"), "£ 1,000");
    }

    #[test]
    fn test_unknown_currency_falls_back_to_code() {
        assert_eq!(format_currency(dec("100"), "XYZ"), "XYZ 100");
        assert_eq!(format_currency(dec("2500"), "chf"), "chf 2,500");
    }

    #[test]
    fn test_fraction_digits_are_kept() {
        assert_eq!(format_currency(dec("1234.5"), "USD"), "$ 1,234.5");
        assert_eq!(format_currency(dec("0.125"), "USD"), "$ 0.125");
        assert_eq!(format_currency(dec("1250.50"), "USD"), "$ 1,250.5");
        assert_eq!(format_currency(dec("12763.63"), "EUR"), "€ 12,763.63");
    }

    #[test]
    fn test_negative_and_zero() {
        assert_eq!(format_currency(dec("-2000"), "INR"), "₹ -2,000");
        assert_eq!(format_currency(dec("-0.5"), "INR"), "₹ -0.5");
        assert_eq!(format_currency(Decimal::ZERO, "INR"), "₹ 0");
        assert_eq!(format_currency(dec("0.00"), "INR"), "₹ 0");
        assert_eq!(format_currency(dec("-0"), "INR"), "₹ 0");
    }

    #[test]
    fn test_indian_grouping() {
        let formatter = CurrencyFormatter::new(NumberLocale::EN_IN);
        assert_eq!(formatter.format(dec("1234567"), &Currency::Inr), "₹ 12,34,567");
        assert_eq!(formatter.format(dec("1160330"), &Currency::Inr), "₹ 11,60,330");
        assert_eq!(formatter.format_number(dec("123456789.25")), "12,34,56,789.25");
        assert_eq!(formatter.format_number(dec("1000")), "1,000");
        assert_eq!(formatter.format_number(dec("999")), "999");
    }

    #[test]
    fn test_german_separators() {
        let formatter = CurrencyFormatter::new(NumberLocale::DE_DE);
        assert_eq!(formatter.format(dec("1234567.89"), &Currency::Eur), "€ 1.234.567,89");
    }

    #[test]
    fn test_locale_tags() {
        assert_eq!(NumberLocale::from_tag("en-US"), Some(NumberLocale::EN_US));
        assert_eq!(NumberLocale::from_tag("en_IN"), Some(NumberLocale::EN_IN));
        assert_eq!(NumberLocale::from_tag("DE-de"), Some(NumberLocale::DE_DE));
        assert_eq!(NumberLocale::from_tag("xx-YY"), None);
        assert_eq!(NumberLocale::from_tag_or_default("xx-YY"), NumberLocale::EN_US);
    }

    #[test]
    fn test_group_digits_boundaries() {
        let us = NumberLocale::EN_US;
        assert_eq!(group_digits("1", us), "1");
        assert_eq!(group_digits("1234", us), "1,234");
        assert_eq!(group_digits("123456", us), "123,456");
        assert_eq!(group_digits("1234567890", us), "1,234,567,890");

        let india = NumberLocale::EN_IN;
        assert_eq!(group_digits("12345", india), "12,345");
        assert_eq!(group_digits("123456", india), "1,23,456");
    }
}
