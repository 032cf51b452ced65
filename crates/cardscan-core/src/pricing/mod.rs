//! Market price lookup

pub mod book;

pub use book::PriceBook;

/// Sentinel shown when no price file exists for a label.
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";

/// Anything that can turn a card label into a display price.
pub trait PriceSource {
    /// Never fails: a missing price yields a sentinel string.
    fn price_for(&self, label: &str) -> String;
}

/// Format a dollar amount as `$1,234.56` (negatives as `-$1,234.56`).
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1.234), "$1.23");
        assert_eq!(format_currency(4.56), "$4.56");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-12.3), "-$12.30");
    }
}
