//! Geodesic distance and Brazilian postal code (CEP) helpers
//!
//! Terminal proximity search measures great-circle distance between the
//! search center and each terminal's coordinates. CEP handling backs the
//! tiered geocoding lookup: queries that contain a full CEP take the
//! postcode path, everything else is free-text.

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Digits in a full CEP
const CEP_DIGITS: usize = 8;

/// Great-circle distance between two coordinates, in kilometers.
///
/// Haversine formula; inputs in decimal degrees.
///
/// # Examples
///
/// ```
/// use signcast_common::geo::haversine_km;
///
/// let d = haversine_km(-25.4284, -49.2733, -25.4284, -49.2733);
/// assert!(d.abs() < 1e-9);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Strip everything but digits from a CEP.
pub fn normalize_cep(cep: &str) -> String {
    cep.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a CEP as `XXXXX-XXX` when it has exactly 8 digits.
///
/// Anything else comes back as its bare digits, unformatted.
pub fn format_cep(cep: &str) -> String {
    let digits = normalize_cep(cep);
    if digits.len() == CEP_DIGITS {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

/// Does this query contain a full CEP?
///
/// True when the text contains either 8 consecutive digits or the
/// `XXXXX-XXX` form, and stripping non-digits leaves exactly 8 digits
/// total. Queries with extra digits elsewhere stay free-text.
pub fn is_cep_query(query: &str) -> bool {
    contains_cep_pattern(query) && normalize_cep(query).len() == CEP_DIGITS
}

/// Scan for `\d{5}-?\d{3}` anywhere in the text.
fn contains_cep_pattern(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    for start in 0..chars.len() {
        if matches_cep_at(&chars[start..]) {
            return true;
        }
    }
    false
}

fn matches_cep_at(chars: &[char]) -> bool {
    if chars.len() < CEP_DIGITS {
        return false;
    }
    if !chars[..5].iter().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let rest = &chars[5..];
    if rest[0] == '-' {
        rest.len() > 3 && rest[1..4].iter().all(|c| c.is_ascii_digit())
    } else {
        rest[..3].iter().all(|c| c.is_ascii_digit())
    }
}
