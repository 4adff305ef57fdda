//! Access through runtime members.

use crate::dynamic::DynamicShape;
use crate::error::AccessError;
use crate::matcher::NameMatcher;
use crate::options::AccessOptions;
use crate::value::Value;

pub(crate) fn get(
    shape: &dyn DynamicShape,
    type_name: &'static str,
    name: &str,
    options: AccessOptions,
) -> Result<Option<Value>, AccessError> {
    // A lenient exact lookup asks the object directly first. A miss still
    // scans, since a member may be stored under an equivalent spelling.
    if options.case_sensitive && options.is_lenient() {
        log::debug!("reading `{name}` on `{type_name}` without listing members");
        if let Some(value) = shape.invoke_get(name)? {
            return Ok(Some(value));
        }
    }

    let matcher = NameMatcher::new(options.case_sensitive);
    let members = shape.member_names();
    let Some(canonical) = members.iter().find(|member| matcher.matches(member, name)) else {
        return options.not_found.miss(|| AccessError::not_found(name, type_name));
    };

    match shape.invoke_get(canonical)? {
        Some(value) => Ok(Some(value)),
        None => options.not_found.miss(|| AccessError::not_found(name, type_name)),
    }
}

// -----------------------------------------------------------------------------
// Tests
