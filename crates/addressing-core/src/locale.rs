// crates/addressing-core/src/locale.rs

//! Locale canonicalization, matching and fallback.
//!
//! Locales are plain strings of the shape `language[-Script][-REGION]`.
//! CLDR fallback is not purely hierarchical, so [`parent`] consults a table of
//! irregular parents before it falls back to truncating the last subtag.

use crate::error::{AddressingError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The undetermined locale. Never returned as a parent.
pub const UNDETERMINED: &str = "und";

static ALIASES: &[(&str, &str)] = &[
    ("az-AZ", "az-Latn-AZ"),
    ("bs-BA", "bs-Latn-BA"),
    ("ha-GH", "ha-Latn-GH"),
    ("ha-NE", "ha-Latn-NE"),
    ("ha-NG", "ha-Latn-NG"),
    ("in", "id"),
    ("in-ID", "id-ID"),
    ("iw", "he"),
    ("iw-IL", "he-IL"),
    ("kk-KZ", "kk-Cyrl-KZ"),
    ("ks-IN", "ks-Arab-IN"),
    ("ky-KG", "ky-Cyrl-KG"),
    ("mn-MN", "mn-Cyrl-MN"),
    ("mo", "ro-MD"),
    ("ms-BN", "ms-Latn-BN"),
    ("ms-MY", "ms-Latn-MY"),
    ("ms-SG", "ms-Latn-SG"),
    ("no", "nb"),
    ("no-NO", "nb-NO"),
    ("no-NO-NY", "nn-NO"),
    ("pa-IN", "pa-Guru-IN"),
    ("pa-PK", "pa-Arab-PK"),
    ("sh", "sr-Latn"),
    ("sh-BA", "sr-Latn-BA"),
    ("sh-CS", "sr-Latn-RS"),
    ("sh-YU", "sr-Latn-RS"),
    ("shi-MA", "shi-Tfng-MA"),
    ("sr-BA", "sr-Cyrl-BA"),
    ("sr-ME", "sr-Latn-ME"),
    ("sr-RS", "sr-Cyrl-RS"),
    ("sr-XK", "sr-Cyrl-XK"),
    ("tl", "fil"),
    ("tl-PH", "fil-PH"),
    ("tzm-MA", "tzm-Latn-MA"),
    ("ug-CN", "ug-Arab-CN"),
    ("uz-AF", "uz-Arab-AF"),
    ("uz-UZ", "uz-Latn-UZ"),
    ("vai-LR", "vai-Vaii-LR"),
    ("zh-CN", "zh-Hans-CN"),
    ("zh-HK", "zh-Hant-HK"),
    ("zh-MO", "zh-Hant-MO"),
    ("zh-SG", "zh-Hans-SG"),
    ("zh-TW", "zh-Hant-TW"),
];

/// Regions whose English falls back to `en-001` ("world English").
static EN_001_CHILDREN: &[&str] = &[
    "150", "AG", "AI", "AU", "BB", "BM", "BS", "BW", "BZ", "CC", "CK", "CM", "CX", "CY", "DG",
    "DM", "ER", "FJ", "FK", "FM", "GB", "GD", "GG", "GH", "GI", "GM", "GY", "HK", "IE", "IL",
    "IM", "IN", "IO", "JE", "JM", "KE", "KI", "KN", "KY", "LC", "LR", "LS", "MG", "MO", "MS",
    "MT", "MU", "MW", "MY", "NA", "NF", "NG", "NR", "NU", "NZ", "PG", "PK", "PN", "PW", "RW",
    "SB", "SC", "SD", "SG", "SH", "SL", "SS", "SX", "SZ", "TC", "TK", "TO", "TT", "TV", "TZ",
    "UG", "VC", "VG", "VU", "WS", "ZA", "ZM", "ZW",
];

static EN_150_CHILDREN: &[&str] = &["AT", "BE", "CH", "DE", "DK", "FI", "NL", "SE", "SI"];

static ES_419_CHILDREN: &[&str] = &[
    "AR", "BO", "BR", "BZ", "CL", "CO", "CR", "CU", "DO", "EC", "GT", "HN", "MX", "NI", "PA",
    "PE", "PR", "PY", "SV", "US", "UY", "VE",
];

static PT_PT_CHILDREN: &[&str] = &[
    "AO", "CH", "CV", "FR", "GQ", "GW", "LU", "MO", "MZ", "ST", "TL",
];

/// Script locales that fall back to the root instead of their language.
static ROOT_CHILDREN: &[&str] = &[
    "az-Arab", "az-Cyrl", "bal-Latn", "blt-Latn", "bs-Cyrl", "byn-Latn", "en-Dsrt", "en-Shaw",
    "hi-Latn", "iu-Latn", "kk-Arab", "ks-Deva", "ku-Arab", "ky-Arab", "ky-Latn", "ml-Arab",
    "mn-Mong", "mni-Mtei", "ms-Arab", "pa-Arab", "sat-Deva", "sd-Deva", "sd-Khoj", "sd-Sind",
    "so-Arab", "sr-Latn", "sw-Arab", "tg-Arab", "uz-Arab", "uz-Cyrl", "yue-Hans", "zh-Hant",
];

static ALIAS_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ALIASES.iter().copied().collect());

static PARENT_MAP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for region in EN_001_CHILDREN {
        map.insert(format!("en-{region}"), "en-001");
    }
    for region in EN_150_CHILDREN {
        map.insert(format!("en-{region}"), "en-150");
    }
    for region in ES_419_CHILDREN {
        map.insert(format!("es-{region}"), "es-419");
    }
    for region in PT_PT_CHILDREN {
        map.insert(format!("pt-{region}"), "pt-PT");
    }
    for locale in ROOT_CHILDREN {
        map.insert(locale.to_string(), UNDETERMINED);
    }
    map.insert("nb".into(), "no");
    map.insert("nn".into(), "no");
    map.insert("zh-Hant-MO".into(), "zh-Hant-HK");
    map
});

/// Standardizes separators and capitalization.
///
/// `"sr_rs_latn"` becomes `"sr-RS-Latn"`. Empty input is returned unchanged.
pub fn canonicalize(locale: &str) -> String {
    if locale.is_empty() {
        return String::new();
    }

    locale
        .to_lowercase()
        .replace('_', "-")
        .split('-')
        .enumerate()
        .map(|(index, part)| match (index, part.len()) {
            // The language code stays lowercase.
            (0, _) => part.to_string(),
            // Script code.
            (_, 4) => {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            // Region or variant code.
            _ => part.to_uppercase(),
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Replaces a locale alias with the real locale (`zh-CN` -> `zh-Hans-CN`).
pub fn replace_alias(locale: &str) -> String {
    ALIAS_MAP
        .get(locale)
        .map(|real| real.to_string())
        .unwrap_or_else(|| locale.to_string())
}

/// Gets the parent of the given locale.
///
/// The root locale is reported as `None` so that callers fall through to
/// their own fallback instead.
pub fn parent(locale: &str) -> Option<String> {
    let parent = match PARENT_MAP.get(locale) {
        Some(parent) => parent.to_string(),
        None => {
            let (head, _) = locale.rsplit_once('-')?;
            head.to_string()
        }
    };

    (parent != UNDETERMINED).then_some(parent)
}

/// Gets the locale candidates, from most to least specific.
///
/// `"bs-Cyrl-BA"` yields `["bs-Cyrl-BA", "bs-Cyrl", "bs"]`. The locale is
/// de-aliased first; the fallback chain is appended as is.
pub fn candidates(locale: &str, fallback_locale: Option<&str>) -> Vec<String> {
    let mut out = Vec::new();
    push_chain(&mut out, replace_alias(locale));
    if let Some(fallback) = fallback_locale {
        push_chain(&mut out, fallback.to_string());
    }
    out
}

fn push_chain(out: &mut Vec<String>, start: String) {
    let mut current = Some(start);
    while let Some(locale) = current {
        current = parent(&locale);
        if !out.contains(&locale) {
            out.push(locale);
        }
    }
}

/// Checks whether two locales are the same once canonicalized.
pub fn matches(first_locale: &str, second_locale: &str) -> bool {
    if first_locale.is_empty() || second_locale.is_empty() {
        return false;
    }
    canonicalize(first_locale) == canonicalize(second_locale)
}

/// Checks whether two locales have at least one common candidate.
///
/// `"de"` and `"de-AT"` match because both have `"de"` in common.
pub fn match_candidates(first_locale: &str, second_locale: &str) -> bool {
    if first_locale.is_empty() || second_locale.is_empty() {
        return false;
    }

    let first = candidates(&canonicalize(first_locale), None);
    let second = candidates(&canonicalize(second_locale), None);
    first.iter().any(|candidate| second.contains(candidate))
}

/// Resolves the locale from the available locales.
///
/// Returns the first candidate of `locale` (then of `fallback_locale`) that
/// is available.
pub fn resolve<S: AsRef<str>>(
    available_locales: &[S],
    locale: &str,
    fallback_locale: Option<&str>,
) -> Result<String> {
    let locale = canonicalize(locale);

    candidates(&locale, fallback_locale)
        .into_iter()
        .find(|candidate| {
            available_locales
                .iter()
                .any(|available| available.as_ref() == candidate)
        })
        .ok_or(AddressingError::UnknownLocale(locale))
}
