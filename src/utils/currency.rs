/// Currency display helpers for reminder messages.
///
/// Codes without a known symbol fall through unchanged and are used as the
/// prefix.

pub fn currency_symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "PKR" => "Rs.",
        "INR" => "₹",
        "JPY" => "¥",
        "CAD" => "CA$",
        "AUD" => "AU$",
        other => other,
    }
}

/// Format an amount with its symbol prefix, e.g. "$9.99".
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency_symbol(currency), amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("GBP"), "£");
        assert_eq!(currency_symbol("PKR"), "Rs.");
        assert_eq!(currency_symbol("INR"), "₹");
        assert_eq!(currency_symbol("JPY"), "¥");
        assert_eq!(currency_symbol("CAD"), "CA$");
        assert_eq!(currency_symbol("AUD"), "AU$");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(currency_symbol("XYZ"), "XYZ");
        assert_eq!(format_amount(120.0, "XYZ"), "XYZ120.00");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(9.99, "USD"), "$9.99");
        assert_eq!(format_amount(1500.0, "PKR"), "Rs.1500.00");
        assert_eq!(format_amount(0.5, "EUR"), "€0.50");
    }
}
