use crate::error::{AccessError, AccessKind};
use crate::options::NotFoundPolicy;

/// The outcome of resolving a property name against a list of candidates.
///
/// Resolution only looks at metadata, never at a live object, so a
/// `Resolved` can be computed once per type and reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolved<T> {
    /// A matching property with the requested accessor.
    Found(T),
    /// Matching properties exist, but none has the requested accessor.
    Inaccessible,
    /// No property has a matching name.
    NotFound,
}

impl<T> Resolved<T> {
    /// Returns the accessor, if one was found.
    #[inline]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Applies `policy` to a miss.
    ///
    /// Under [`NotFoundPolicy::Fail`], a miss becomes
    /// [`AccessError::PropertyNotFound`] or
    /// [`AccessError::InaccessibleProperty`]; under
    /// [`NotFoundPolicy::Lenient`] both become `Ok(None)`.
    pub fn into_access(
        self,
        name: &str,
        type_name: &'static str,
        access: AccessKind,
        policy: NotFoundPolicy,
    ) -> Result<Option<T>, AccessError> {
        match self {
            Self::Found(value) => Ok(Some(value)),
            Self::Inaccessible => {
                policy.miss(|| AccessError::inaccessible(name, type_name, access))
            }
            Self::NotFound => policy.miss(|| AccessError::not_found(name, type_name)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Resolved;
    use crate::{AccessError, AccessKind, NotFoundPolicy};

    #[test]
    fn policy_decides_misses() {
        let fail = Resolved::<u8>::Inaccessible.into_access(
            "Name",
            "T",
            AccessKind::Write,
            NotFoundPolicy::Fail,
        );
        assert!(matches!(
            fail,
            Err(AccessError::InaccessibleProperty {
                access: AccessKind::Write,
                ..
            })
        ));

        let lenient =
            Resolved::<u8>::NotFound.into_access("Name", "T", AccessKind::Read, NotFoundPolicy::Lenient);
        assert!(matches!(lenient, Ok(None)));

        let found = Resolved::Found(3_u8).into_access("Name", "T", AccessKind::Read, NotFoundPolicy::Fail);
        assert!(matches!(found, Ok(Some(3))));
    }
}
