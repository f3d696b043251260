//! CLI command implementations.

pub mod catalog;
pub mod demo;
pub mod orders;
pub mod search;

/// Format a VND amount with thousands separators and the đồng sign.
pub(crate) fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}₫")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0₫");
        assert_eq!(format_vnd(999), "999₫");
        assert_eq!(format_vnd(1_200_000), "1,200,000₫");
        assert_eq!(format_vnd(52_990_000), "52,990,000₫");
        assert_eq!(format_vnd(-5_000), "-5,000₫");
    }
}
