//! ISO 3166-1 alpha-2 code to localized country name.
//!
//! The tables live in `locales/<lang>.yml` under the `country.` prefix and are
//! compiled in by `rust-i18n`.

use rust_i18n::t;
use tracing::warn;

/// Languages with a country table. Anything else resolves to English.
pub const SUPPORTED_LOCALES: [&str; 4] = ["en", "fr", "es", "de"];

/// Every ISO 3166-1 alpha-2 code; each one has a name in every supported locale.
pub const COUNTRY_CODES: [&str; 249] = [
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT",
    "AU", "AW", "AX", "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI",
    "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS", "BT", "BV", "BW", "BY",
    "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK",
    "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL",
    "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR",
    "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS",
    "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW",
    "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP",
    "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM",
    "SN", "SO", "SR", "SS", "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF",
    "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR", "TT", "TV", "TW",
    "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Reduce a locale tag (`fr-CA`, `de_DE.UTF-8`, `EN`) to a supported language.
pub fn normalize_locale(locale: &str) -> &'static str {
    let primary = locale
        .split(['-', '_', '.'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| *l == primary)
        .unwrap_or("en")
}

/// Localized name for a country code, or `None` when the code is unknown.
pub fn lookup(code: &str, locale: &str) -> Option<String> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 2 {
        return None;
    }

    let key = format!("country.{code}");
    let name = t!(key.as_str(), locale = normalize_locale(locale));

    // Missing keys come back as the key itself (possibly locale-prefixed).
    if name.ends_with(key.as_str()) {
        None
    } else {
        Some(name.into_owned())
    }
}

/// Name to send to the backend for `code`. Unknown codes pass through as-is.
pub fn display_name(code: &str, locale: &str) -> String {
    match lookup(code, locale) {
        Some(name) => name,
        None => {
            warn!("No country name for code {code:?} in locale {locale:?}, sending it unchanged");
            code.trim().to_string()
        }
    }
}
