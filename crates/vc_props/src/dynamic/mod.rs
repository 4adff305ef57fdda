//! Objects whose members only exist at runtime.

// -----------------------------------------------------------------------------
// Modules

mod expando;

// -----------------------------------------------------------------------------
// Exports

pub use expando::{Expando, ExpandoIter};

// -----------------------------------------------------------------------------
// DynamicShape

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::AccessError;
use crate::value::Value;

/// An object that resolves its members at runtime.
///
/// The member set may change between calls. Accessors list the names once,
/// pick the canonical spelling and then ask for that exact member; a member
/// that disappeared in between is reported as missing.
pub trait DynamicShape {
    /// Lists the names of the current members.
    fn member_names(&self) -> Vec<Cow<'_, str>>;

    /// Reads the member with exactly this name.
    ///
    /// Returns `Ok(None)` if there is no such member. Failures of the member
    /// itself are reported as errors and are propagated unchanged.
    fn invoke_get(&self, name: &str) -> Result<Option<Value>, AccessError>;
}
