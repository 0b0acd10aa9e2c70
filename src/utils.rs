use std::collections::HashMap;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::CustomError;

pub fn encrypt(value: &str) -> Result<String, CustomError> {
    hash(value, DEFAULT_COST).map_err(CustomError::HashError)
}

pub fn compare(value: &str, value1: &str) -> bool {
    verify(value, value1).unwrap_or(false)
}

/// Decodes an `application/x-www-form-urlencoded` string. Later duplicates
/// overwrite earlier ones; undecodable pairs are skipped.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

/// Value of a submitted form field, taken as-is. Absent or empty fields are
/// rejected.
pub fn required_field(
    form: &HashMap<String, String>,
    name: &'static str,
) -> Result<String, CustomError> {
    match form.get(name) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(CustomError::MissingField(name)),
    }
}

fn decode_component(value: &str) -> Option<String> {
    urlencoding::decode(&value.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}

pub fn escape_html(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

/// Formats an amount as Naira with thousands separators, e.g. `₦1,234.50`.
pub fn format_naira(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}₦{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form_decodes_plus_and_percent() {
        let form = parse_form("name=Ada+Obi&email=ada%40x.com&finance=Parents%2FGuardian&empty=");
        assert_eq!(form.get("name").map(String::as_str), Some("Ada Obi"));
        assert_eq!(form.get("email").map(String::as_str), Some("ada@x.com"));
        assert_eq!(form.get("finance").map(String::as_str), Some("Parents/Guardian"));
        assert_eq!(form.get("empty").map(String::as_str), Some(""));
    }

    #[test]
    fn format_naira_groups_thousands() {
        assert_eq!(format_naira(0.0), "₦0.00");
        assert_eq!(format_naira(999.999), "₦1,000.00");
        assert_eq!(format_naira(1234567.891), "₦1,234,567.89");
        assert_eq!(format_naira(-45000.5), "-₦45,000.50");
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;&#x2f;script&gt;"
        );
    }

    #[test]
    fn bcrypt_hash_verifies_only_original() {
        let hashed = encrypt("p1").unwrap();
        assert!(compare("p1", &hashed));
        assert!(!compare("p2", &hashed));
        assert!(!compare("p1", "not-a-hash"));
    }
}
