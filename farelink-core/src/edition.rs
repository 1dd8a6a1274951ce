use serde::Serialize;

use crate::{CoreError, CoreResult};

/// A regional storefront of the booking site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edition {
    pub code: &'static str,
    pub name: &'static str,
}

pub const EDITIONS: [Edition; 6] = [
    Edition { code: "BS", name: "Bahamas (USD)" },
    Edition { code: "VG", name: "British Virgin Islands (USD)" },
    Edition { code: "CA", name: "Canada (CAD)" },
    Edition { code: "PR", name: "Puerto Rico (USD)" },
    Edition { code: "GB", name: "United Kingdom (GBP)" },
    Edition { code: "US", name: "United States (USD)" },
];

pub const DEFAULT_EDITION: &str = "US";

/// Pick the edition code to encode: the requested one if present, else `default`.
///
/// Codes are upper-cased. Anything other than ASCII letters is refused since the
/// code lands unescaped in a comma-delimited field.
pub fn resolve_edition_code(requested: Option<&str>, default: &str) -> CoreResult<String> {
    let code = match requested.map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => default.trim(),
    };

    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::InvalidEdition(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}
