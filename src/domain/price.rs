use std::str::FromStr;

use rust_decimal::Decimal;

// Non-negative amount with at most two fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price{
    pub fn parse(input: &str) -> Result<Price, String>{
        let amount = Decimal::from_str(input.trim())
                        .map_err(|_| "Invalid price! Please enter a numeric value.".to_string())?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err("Invalid price! Price cannot be negative.".to_string())
        }

        Ok(Self(amount.round_dp(2)))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
