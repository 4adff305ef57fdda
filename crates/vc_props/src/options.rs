use crate::error::AccessError;

// -----------------------------------------------------------------------------
// NotFoundPolicy

/// What an accessor does when no usable property matches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotFoundPolicy {
    /// Report the miss as an [`AccessError`].
    #[default]
    Fail,
    /// Report the miss as an absent value (`Ok(None)`), writes become no-ops.
    Lenient,
}

impl NotFoundPolicy {
    /// Applies the policy to a miss, `error` is only built under [`Fail`](Self::Fail).
    #[inline]
    pub fn miss<T>(self, error: impl FnOnce() -> AccessError) -> Result<Option<T>, AccessError> {
        match self {
            Self::Fail => Err(error()),
            Self::Lenient => Ok(None),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessOptions

/// Per-call configuration of a property access.
///
/// The default is [`AccessOptions::STRICT`]: case-sensitive names, misses fail.
///
/// # Examples
///
/// ```
/// use vc_props::{AccessOptions, NotFoundPolicy};
///
/// let options = AccessOptions::STRICT.ignore_case().lenient();
/// assert!(!options.case_sensitive);
/// assert_eq!(options.not_found, NotFoundPolicy::Lenient);
/// assert_eq!(AccessOptions::default(), AccessOptions::STRICT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessOptions {
    /// Compare names exactly (`true`) or case-insensitively (`false`).
    pub case_sensitive: bool,
    /// Behavior when nothing matches.
    pub not_found: NotFoundPolicy,
}

impl AccessOptions {
    /// Case-sensitive, misses fail.
    pub const STRICT: Self = Self::new(true, NotFoundPolicy::Fail);

    /// Creates options from the two switches.
    #[inline]
    pub const fn new(case_sensitive: bool, not_found: NotFoundPolicy) -> Self {
        Self {
            case_sensitive,
            not_found,
        }
    }

    /// Returns a copy that matches names case-insensitively.
    #[inline]
    pub const fn ignore_case(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Returns a copy that matches names exactly.
    #[inline]
    pub const fn match_case(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Returns a copy with the [`Lenient`](NotFoundPolicy::Lenient) policy.
    #[inline]
    pub const fn lenient(mut self) -> Self {
        self.not_found = NotFoundPolicy::Lenient;
        self
    }

    /// Returns a copy with the [`Fail`](NotFoundPolicy::Fail) policy.
    #[inline]
    pub const fn fail(mut self) -> Self {
        self.not_found = NotFoundPolicy::Fail;
        self
    }

    /// Returns `true` under [`NotFoundPolicy::Lenient`].
    #[inline]
    pub const fn is_lenient(&self) -> bool {
        matches!(self.not_found, NotFoundPolicy::Lenient)
    }
}

impl Default for AccessOptions {
    #[inline]
    fn default() -> Self {
        Self::STRICT
    }
}
