use unicode_normalization::UnicodeNormalization;

// -----------------------------------------------------------------------------
// NameMatcher

/// Compares property names under a case-sensitivity policy.
///
/// Comparison is culture-insensitive but Unicode-aware:
///
/// - case-sensitive: names are equal if they are canonically equivalent
///   (equal after NFC normalization), so `"Café"` written with a combining
///   accent still matches the precomposed spelling;
/// - case-insensitive: additionally, every character is replaced by its full
///   Unicode lowercase mapping before comparing. This is not an ASCII fold:
///   `"ÄRGER"` matches `"ärger"`.
///
/// ASCII-only names take a byte-wise fast path.
///
/// # Examples
///
/// ```
/// use vc_props::NameMatcher;
///
/// assert!(NameMatcher::new(false).matches("Name", "nAME"));
/// assert!(!NameMatcher::new(true).matches("Name", "nAME"));
/// assert!(NameMatcher::new(true).matches("Cafe\u{301}", "Caf\u{e9}"));
/// assert!(NameMatcher::new(false).matches("ÖL", "öl"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameMatcher {
    case_sensitive: bool,
}

impl NameMatcher {
    /// Matches names exactly, modulo canonical equivalence.
    pub const EXACT: Self = Self::new(true);

    /// Matches names ignoring case.
    pub const IGNORE_CASE: Self = Self::new(false);

    /// Creates a matcher.
    #[inline]
    pub const fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    /// Returns `true` if the matcher compares case-sensitively.
    #[inline]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns `true` if `candidate` and `query` name the same property.
    pub fn matches(&self, candidate: &str, query: &str) -> bool {
        if candidate.is_ascii() && query.is_ascii() {
            return if self.case_sensitive {
                candidate == query
            } else {
                candidate.eq_ignore_ascii_case(query)
            };
        }

        if self.case_sensitive {
            candidate == query || candidate.nfc().eq(query.nfc())
        } else {
            candidate
                .nfc()
                .flat_map(char::to_lowercase)
                .eq(query.nfc().flat_map(char::to_lowercase))
        }
    }
}

/// Shorthand for `NameMatcher::new(case_sensitive).matches(candidate, query)`.
#[inline]
pub fn names_match(candidate: &str, query: &str, case_sensitive: bool) -> bool {
    NameMatcher::new(case_sensitive).matches(candidate, query)
}

// -----------------------------------------------------------------------------
// Tests
