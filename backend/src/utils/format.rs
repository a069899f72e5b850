use url::form_urlencoded;

/// Group the digits of a non-negative whole number with commas.
fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn rounded_parts(value: f64) -> (bool, String) {
    if !value.is_finite() {
        return (false, "0".to_string());
    }
    let rounded = value.round();
    let negative = rounded < 0.0;
    (negative, group_thousands(rounded.abs() as u64))
}

/// US dollars with no decimal places, e.g. `$3,736,125`.
pub fn format_currency(amount: f64) -> String {
    match rounded_parts(amount) {
        (true, digits) => format!("-${}", digits),
        (false, digits) => format!("${}", digits),
    }
}

/// Whole count with thousands separators, e.g. `1,275`.
pub fn format_count(count: f64) -> String {
    match rounded_parts(count) {
        (true, digits) => format!("-{}", digits),
        (false, digits) => digits,
    }
}

/// Contact details carried over to the booking page for personalization.
#[derive(Debug, Default, Clone, Copy)]
pub struct BookingContact<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub company: Option<&'a str>,
}

/// Link to the booking page with the estimated revenue, in whole dollars, in
/// the query string.
pub fn booking_url(base_path: &str, total_revenue: f64, contact: BookingContact<'_>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("revenue", &finite_revenue(total_revenue).round().to_string());
    for (key, value) in [("name", contact.name), ("email", contact.email), ("company", contact.company)] {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            query.append_pair(key, value);
        }
    }
    format!("{}?{}", base_path, query.finish())
}

fn finite_revenue(total_revenue: f64) -> f64 {
    if total_revenue.is_finite() {
        total_revenue
    } else {
        0.0
    }
}
