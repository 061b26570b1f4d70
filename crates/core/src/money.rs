use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A Turkish lira amount with kuruş (two decimal place) precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lira(Decimal);

impl Lira {
    pub fn from_kurus(kurus: i64) -> Self {
        Lira(Decimal::from(kurus) / Decimal::from(100))
    }

    pub fn to_kurus(self) -> i64 {
        (self.0 * Decimal::from(100)).to_i64().unwrap()
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Lira(decimal.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Lira(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Lira {
    /// Turkish convention: dot-separated thousands groups, comma decimal
    /// separator, trailing currency code — `1.234,56 TL`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.0.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::new();
        for (i, c) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(*c);
        }
        let sign = if self.0.is_sign_negative() && !self.0.is_zero() { "-" } else { "" };
        write!(f, "{sign}{grouped},{frac_part} TL")
    }
}

impl Add for Lira {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Lira(self.0 + rhs.0)
    }
}

impl Sub for Lira {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Lira(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kurus_roundtrip() {
        assert_eq!(Lira::from_kurus(12550).to_kurus(), 12550);
        assert_eq!(Lira::from_kurus(0).to_kurus(), 0);
        assert_eq!(Lira::from_kurus(-500).to_kurus(), -500);
    }

    #[test]
    fn from_decimal_rounds_to_kurus() {
        let d = Decimal::from_str("10.999").unwrap();
        assert_eq!(Lira::from_decimal(d).to_kurus(), 1100);
    }

    #[test]
    fn display_turkish_grouping() {
        assert_eq!(Lira::from_kurus(123456).to_string(), "1.234,56 TL");
        assert_eq!(Lira::from_kurus(12550).to_string(), "125,50 TL");
        assert_eq!(Lira::from_kurus(123456789).to_string(), "1.234.567,89 TL");
        assert_eq!(Lira::zero().to_string(), "0,00 TL");
    }

    #[test]
    fn display_negative() {
        assert_eq!(Lira::from_kurus(-12550).to_string(), "-125,50 TL");
    }

    #[test]
    fn add_and_sub() {
        let a = Lira::from_kurus(1000);
        let b = Lira::from_kurus(250);
        assert_eq!((a + b).to_kurus(), 1250);
        assert_eq!((a - b).to_kurus(), 750);
    }
}
