//! User language resolution and locale-aware string collation.
//!
//! The host reports the user's language as a numeric locale id (LCID). The
//! grid only needs the two-letter language part, which selects the CLDR
//! collation used for column sorting.

use std::cmp::Ordering;
use std::sync::Arc;

use icu_collator::{CollatorOptions, Numeric};
use icu_locid::Locale;
use log::warn;

/// LCID to locale identifier for the languages the host ships with.
const LCIDS: &[(i32, &str)] = &[
    (1025, "ar_SA"),
    (1026, "bg_BG"),
    (1027, "ca_ES"),
    (1028, "zh_TW"),
    (1029, "cs_CZ"),
    (1030, "da_DK"),
    (1031, "de_DE"),
    (1032, "el_GR"),
    (1033, "en_US"),
    (1035, "fi_FI"),
    (1036, "fr_FR"),
    (1037, "he_IL"),
    (1038, "hu_HU"),
    (1040, "it_IT"),
    (1041, "ja_JP"),
    (1042, "ko_KR"),
    (1043, "nl_NL"),
    (1044, "nb_NO"),
    (1045, "pl_PL"),
    (1046, "pt_BR"),
    (1048, "ro_RO"),
    (1049, "ru_RU"),
    (1050, "hr_HR"),
    (1051, "sk_SK"),
    (1053, "sv_SE"),
    (1054, "th_TH"),
    (1055, "tr_TR"),
    (1057, "id_ID"),
    (1058, "uk_UA"),
    (1060, "sl_SI"),
    (1061, "et_EE"),
    (1062, "lv_LV"),
    (1063, "lt_LT"),
    (1066, "vi_VN"),
    (1069, "eu_ES"),
    (1081, "hi_IN"),
    (1086, "ms_MY"),
    (1087, "kk_KZ"),
    (1110, "gl_ES"),
    (2052, "zh_CN"),
    (2055, "de_CH"),
    (2057, "en_GB"),
    (2058, "es_MX"),
    (2060, "fr_BE"),
    (2067, "nl_BE"),
    (2068, "nn_NO"),
    (2070, "pt_PT"),
    (2074, "sr_Latn_RS"),
    (3076, "zh_HK"),
    (3079, "de_AT"),
    (3081, "en_AU"),
    (3082, "es_ES"),
    (3084, "fr_CA"),
    (3098, "sr_Cyrl_RS"),
    (4105, "en_CA"),
    (4108, "fr_CH"),
];

/// Looks up the locale identifier (`ll_RR`) for an LCID.
pub fn locale_from_lcid(lcid: i32) -> Option<&'static str> {
    LCIDS.iter().find(|(id, _)| *id == lcid).map(|(_, tag)| *tag)
}

/// Resolves the two-letter language code of an LCID.
///
/// Unknown ids resolve to `fallback`.
///
/// # Example
///
/// ```
/// use gridtab_lib::locale::language_from_lcid;
///
/// assert_eq!(language_from_lcid(1031, "en"), "de");
/// assert_eq!(language_from_lcid(99999, "en"), "en");
/// ```
pub fn language_from_lcid(lcid: i32, fallback: &str) -> String {
    match locale_from_lcid(lcid) {
        Some(tag) => language_part(tag).to_string(),
        None => {
            warn!("Unknown language id {}, falling back to '{}'", lcid, fallback);
            fallback.to_string()
        }
    }
}

/// Resolves the language code of a textual tag such as `en-US` or `sv_SE`.
pub fn language_from_tag(tag: &str, fallback: &str) -> String {
    let language = language_part(tag.trim());
    if language.len() == 2 && language.chars().all(|c| c.is_ascii_alphabetic()) {
        language.to_ascii_lowercase()
    } else {
        warn!("Unrecognized locale tag '{}', falling back to '{}'", tag, fallback);
        fallback.to_string()
    }
}

fn language_part(tag: &str) -> &str {
    tag.split(['_', '-']).next().unwrap_or(tag)
}

// =============================================================================
// Collation
// =============================================================================

/// Locale-aware string comparison with numeric ordering of digit runs.
///
/// Wraps the CLDR collation of the language, so letters a language treats
/// as separate (Spanish `ñ`, Czech `ch`, Swedish `ö`) sort where its users
/// expect them. Digit runs compare by numeric value.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use gridtab_lib::locale::Collator;
///
/// let collator = Collator::new("en");
/// assert_eq!(collator.compare("2", "10"), Ordering::Less);
/// assert_eq!(collator.compare("apple", "Banana"), Ordering::Less);
/// ```
#[derive(Clone)]
pub struct Collator {
    language: String,
    /// `None` only if no collation data could be loaded; falls back to
    /// code point order.
    inner: Option<Arc<icu_collator::Collator>>,
}

impl Collator {
    /// Creates a collator for a two-letter language code.
    ///
    /// Unparseable codes get the root collation.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        let locale = language.parse::<Locale>().unwrap_or_else(|e| {
            warn!("Invalid collation language '{}': {}", language, e);
            Locale::UND
        });

        let mut options = CollatorOptions::new();
        options.numeric = Some(Numeric::On);

        let inner = match icu_collator::Collator::try_new(&locale.into(), options) {
            Ok(collator) => Some(Arc::new(collator)),
            Err(e) => {
                warn!("No collation data for '{}': {}", language, e);
                None
            }
        };
        Self { language, inner }
    }

    /// The language this collator was built for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Compares two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.inner {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

impl std::fmt::Debug for Collator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collator")
            .field("language", &self.language)
            .field("loaded", &self.inner.is_some())
            .finish()
    }
}

impl PartialEq for Collator {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

impl Eq for Collator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_lcid() {
        assert_eq!(language_from_lcid(1033, "en"), "en");
        assert_eq!(language_from_lcid(1053, "en"), "sv");
        assert_eq!(language_from_lcid(2074, "en"), "sr");
        assert_eq!(language_from_lcid(3098, "en"), "sr");
        assert_eq!(language_from_lcid(-1, "de"), "de");
    }

    #[test]
    fn test_language_from_tag() {
        assert_eq!(language_from_tag("en-US", "de"), "en");
        assert_eq!(language_from_tag("SV_se", "en"), "sv");
        assert_eq!(language_from_tag("fr", "en"), "fr");
        assert_eq!(language_from_tag("", "en"), "en");
        assert_eq!(language_from_tag("english", "en"), "en");
    }

    #[test]
    fn test_numeric_runs() {
        let c = Collator::new("en");
        assert_eq!(c.compare("2", "10"), Ordering::Less);
        assert_eq!(c.compare("item 10", "item 9"), Ordering::Greater);
        assert_eq!(c.compare("a2b", "a10b"), Ordering::Less);
    }

    #[test]
    fn test_levels() {
        let c = Collator::new("en");
        assert_eq!(c.compare("a", "A"), Ordering::Less);
        assert_eq!(c.compare("A", "b"), Ordering::Less);
        assert_eq!(c.compare("resume", "résumé"), Ordering::Less);
        assert_eq!(c.compare("résumé", "resumes"), Ordering::Less);
        assert_eq!(c.compare("", "a"), Ordering::Less);
        assert_eq!(c.compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_classes() {
        let c = Collator::new("en");
        assert_eq!(c.compare(" x", "1"), Ordering::Less);
        assert_eq!(c.compare("9", "a"), Ordering::Less);
        assert_eq!(c.compare("-", "0"), Ordering::Less);
    }

    #[test]
    fn test_nordic_tailoring() {
        let root = Collator::new("de");
        let swedish = Collator::new("sv");
        let danish = Collator::new("da");
        assert_eq!(root.compare("öl", "zebra"), Ordering::Less);
        assert_eq!(swedish.compare("öl", "zebra"), Ordering::Greater);
        assert_eq!(swedish.compare("åsa", "ära"), Ordering::Less);
        assert_eq!(danish.compare("åsa", "ære"), Ordering::Greater);
    }

    #[test]
    fn test_separate_letters() {
        let spanish = Collator::new("es");
        let polish = Collator::new("pl");
        let czech = Collator::new("cs");
        assert_eq!(spanish.compare("ñu", "nz"), Ordering::Greater);
        assert_eq!(polish.compare("ła", "lb"), Ordering::Greater);
        assert_eq!(czech.compare("čaj", "cz"), Ordering::Greater);
        assert_eq!(czech.compare("chata", "hrad"), Ordering::Greater);
        assert_eq!(czech.compare("chata", "ida"), Ordering::Less);

        // Root order keeps them next to their base letter.
        let english = Collator::new("en");
        assert_eq!(english.compare("ñu", "nz"), Ordering::Less);
        assert_eq!(english.compare("chata", "hrad"), Ordering::Less);
    }

    #[test]
    fn test_invalid_language_uses_root_order() {
        let c = Collator::new("not a language");
        assert_eq!(c.language(), "not a language");
        assert_eq!(c.compare("2", "10"), Ordering::Less);
        assert_eq!(c.compare("apple", "Banana"), Ordering::Less);
    }
}
