/// Format a price with two decimals
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Render a 0-5 rating as stars, rounding to the nearest whole star
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => {
            let filled = r.round().clamp(0.0, 5.0) as usize;
            format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
        }
        _ => "-".to_string(),
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    value.as_deref().unwrap_or(default).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(65.0), "65.00");
        assert_eq!(format_price(0.5), "0.50");
        assert_eq!(format_price(12.346), "12.35");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(Some(5.0)), "*****");
        assert_eq!(format_rating(Some(3.4)), "***..");
        assert_eq!(format_rating(Some(9.0)), "*****");
        assert_eq!(format_rating(None), "-");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Crème brûlée", 8), "Crème...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Some("Accessories".into()), "-"), "Accessories");
        assert_eq!(format_optional(&None, "-"), "-");
    }
}
