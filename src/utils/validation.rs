use anyhow::{anyhow, Result};
use chrono::NaiveDate;

/// Input format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a loan amount such as `10000.50`.
pub fn parse_loan_amount(input: &str) -> Result<f64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(anyhow!("Amount cannot be empty"));
    }

    let amount: f64 = input
        .parse()
        .map_err(|_| anyhow!("'{}' is not a number", input))?;

    if !amount.is_finite() {
        return Err(anyhow!("Amount must be a finite number"));
    }

    if amount < 0.0 {
        return Err(anyhow!("Amount cannot be negative"));
    }

    Ok(amount)
}

/// Parses a due date written strictly as `YYYY-MM-DD`.
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    // chrono accepts unpadded fields, the form does not
    let well_shaped = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(anyhow!("Date must look like YYYY-MM-DD"));
    }

    NaiveDate::parse_from_str(input, DUE_DATE_FORMAT)
        .map_err(|e| anyhow!("'{}' is not a calendar date: {}", input, e))
}

/// Parses a 1-based list position. Range checking is left to the caller.
pub fn parse_ordinal(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| anyhow!("'{}' is not a whole number", input.trim()))
}

/// Resolves a 1-based ordinal against `candidates`.
pub fn resolve_ordinal<T: Copy>(ordinal: i64, candidates: &[T]) -> Option<T> {
    let index = usize::try_from(ordinal).ok()?.checked_sub(1)?;
    candidates.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_amounts() {
        assert_eq!(parse_loan_amount("10000.50").unwrap(), 10000.50);
        assert_eq!(parse_loan_amount("0").unwrap(), 0.0);
        assert_eq!(parse_loan_amount(" 42 ").unwrap(), 42.0);
        assert_eq!(parse_loan_amount("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_invalid_amounts() {
        for input in ["", "not-a-number", "10,000.50", "-5", "NaN", "inf", "12abc"] {
            assert!(parse_loan_amount(input).is_err(), "expected '{input}' to be rejected");
        }
    }

    #[test]
    fn test_valid_due_dates() {
        assert_eq!(
            parse_due_date("2024-12-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert_eq!(
            parse_due_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_invalid_due_dates() {
        for input in [
            "2024-1-5",
            "31.12.2024",
            "2024/12/31",
            "2023-02-29",
            "2024-13-01",
            "2024-12-31T00:00",
            "tomorrow",
            "",
        ] {
            assert!(parse_due_date(input).is_err(), "expected '{input}' to be rejected");
        }
    }

    #[test]
    fn test_parse_ordinal() {
        assert_eq!(parse_ordinal("2").unwrap(), 2);
        assert_eq!(parse_ordinal(" 10 ").unwrap(), 10);
        assert_eq!(parse_ordinal("-1").unwrap(), -1);
        assert!(parse_ordinal("two").is_err());
        assert!(parse_ordinal("1.5").is_err());
    }

    #[test]
    fn test_resolve_ordinal_bounds() {
        let ids = [11_i64, 22, 33];
        assert_eq!(resolve_ordinal(1, &ids), Some(11));
        assert_eq!(resolve_ordinal(3, &ids), Some(33));
        assert_eq!(resolve_ordinal(0, &ids), None);
        assert_eq!(resolve_ordinal(4, &ids), None);
        assert_eq!(resolve_ordinal(-1, &ids), None);
        assert_eq!(resolve_ordinal(1, &[] as &[i64]), None);
    }
}
