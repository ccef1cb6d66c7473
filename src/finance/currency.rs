// Currency formatting for rendered documents: two decimal places with
// Indian (lakh/crore) digit grouping and no currency symbol; callers add a
// symbol where their format wants one.

/// Coerces a possibly bad amount to something renderable. Non-finite values
/// become 0 with a logged warning so a single bad row never blocks a
/// document.
pub fn sanitize(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        log::warn!("non-finite amount {amount} coerced to 0 for rendering");
        0.0
    }
}

/// Formats an amount as e.g. `12,34,567.50`: the last three integer digits
/// form one group, every pair after that forms another.
pub fn format_amount(amount: f64) -> String {
    let amount = sanitize(amount);
    let negative = amount < 0.0;
    // work in paise so the fraction can't drift
    let cents = (amount.abs() * 100.0).round() as u128;
    let rupees = cents / 100;
    let paise = cents % 100;

    let digits = rupees.to_string();
    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        grouped.push(ch);
        let remaining = len - i - 1;
        if remaining == 0 {
            continue;
        }
        // separators fall before the last 3 digits, then before every pair
        if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
            grouped.push(',');
        }
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{paise:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_indian_style() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(950.0), "950.00");
        assert_eq!(format_amount(1_000.0), "1,000.00");
        assert_eq!(format_amount(12_345.0), "12,345.00");
        assert_eq!(format_amount(123_456.0), "1,23,456.00");
        assert_eq!(format_amount(1_234_567.5), "12,34,567.50");
        assert_eq!(format_amount(123_456_789.0), "12,34,56,789.00");
    }

    #[test]
    fn keeps_two_decimals_and_sign() {
        assert_eq!(format_amount(-50_000.25), "-50,000.25");
        assert_eq!(format_amount(0.005), "0.01");
    }

    #[test]
    fn non_finite_amounts_render_as_zero() {
        assert_eq!(format_amount(f64::NAN), "0.00");
        assert_eq!(format_amount(f64::INFINITY), "0.00");
    }
}
