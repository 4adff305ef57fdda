use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use vc_utils::hash::{FixedHashState, HashMap};

use crate::dynamic::DynamicShape;
use crate::error::AccessError;
use crate::info::{PropertyTable, TableCell, Typed};
use crate::inspect::Inspect;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Expando

/// An ordered bag of named values that can grow and shrink at runtime.
///
/// `Expando` has the dynamic shape: its static property table is empty and
/// every access goes through its members. Members keep insertion order;
/// inserting an existing name replaces the value in place.
///
/// Names are stored as given, lookups through [`get`](Expando::get) are exact.
/// Case-insensitive access goes through the accessors:
///
/// ```
/// use vc_props::{AccessOptions, Expando, Value, get_property};
///
/// let mut bag = Expando::new();
/// bag.insert("Title", Value::new("Dune"));
/// bag.insert("Year", Value::new(1965_u16));
///
/// assert!(bag.get("title").is_none());
///
/// let year = get_property(&bag, "year", AccessOptions::STRICT.ignore_case())
///     .unwrap()
///     .unwrap();
/// assert_eq!(year.downcast_ref::<u16>(), Some(&1965));
/// ```
#[derive(Clone)]
pub struct Expando {
    members: Vec<(Cow<'static, str>, Value)>,
    indices: HashMap<Cow<'static, str>, usize>,
}

impl Typed for Expando {
    fn property_table() -> &'static PropertyTable {
        static CELL: TableCell = TableCell::new();
        CELL.get_or_init(PropertyTable::empty::<Self>)
    }
}

impl Expando {
    /// Creates an empty `Expando`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
            indices: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates an empty `Expando` with room for `capacity` members.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Inserts a member, returning the value it replaced.
    ///
    /// A new name is appended; an existing name keeps its position.
    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: Value) -> Option<Value> {
        let name: Cow<'static, str> = name.into();
        if let Some(&index) = self.indices.get(&name) {
            return Some(core::mem::replace(&mut self.members[index].1, value));
        }
        self.indices.insert(name.clone(), self.members.len());
        self.members.push((name, value));
        None
    }

    /// Removes a member, returning its value.
    ///
    /// The remaining members keep their relative order.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.indices.remove(name)?;
        let (_, value) = self.members.remove(index);
        for (moved, _) in &self.members[index..] {
            if let Some(slot) = self.indices.get_mut(moved) {
                *slot -= 1;
            }
        }
        Some(value)
    }

    /// Returns the member with exactly this name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.indices.get(name).map(|&index| &self.members[index].1)
    }

    /// Returns `true` if a member has exactly this name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the members in insertion order.
    #[inline]
    pub fn iter(&self) -> ExpandoIter<'_> {
        ExpandoIter {
            inner: self.members.iter(),
        }
    }
}

impl Default for Expando {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Expando {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<N: Into<Cow<'static, str>>> FromIterator<(N, Value)> for Expando {
    fn from_iter<T: IntoIterator<Item = (N, Value)>>(members: T) -> Self {
        let mut expando = Expando::new();
        for (name, value) in members {
            expando.insert(name, value);
        }
        expando
    }
}

impl<'a> IntoIterator for &'a Expando {
    type Item = (&'a str, &'a Value);
    type IntoIter = ExpandoIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the members of an [`Expando`].
pub struct ExpandoIter<'a> {
    inner: core::slice::Iter<'a, (Cow<'static, str>, Value)>,
}

impl<'a> Iterator for ExpandoIter<'a> {
    type Item = (&'a str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (&**name, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ExpandoIter<'_> {}

// -----------------------------------------------------------------------------
// Shape impls

impl Inspect for Expando {
    #[inline]
    fn property_table(&self) -> &'static PropertyTable {
        <Self as Typed>::property_table()
    }

    #[inline]
    fn as_dynamic(&self) -> Option<&dyn DynamicShape> {
        Some(self)
    }
}

impl DynamicShape for Expando {
    fn member_names(&self) -> Vec<Cow<'_, str>> {
        self.members
            .iter()
            .map(|(name, _)| Cow::Borrowed(&**name))
            .collect()
    }

    #[inline]
    fn invoke_get(&self, name: &str) -> Result<Option<Value>, AccessError> {
        Ok(self.get(name).cloned())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Expando;
    use crate::Value;
    use crate::dynamic::DynamicShape;
    use alloc::vec::Vec;

    fn names(bag: &Expando) -> Vec<&str> {
        bag.iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn insert_keeps_position_of_existing_names() {
        let mut bag = Expando::new();
        assert!(bag.insert("a", Value::new(1_i32)).is_none());
        bag.insert("b", Value::new(2_i32));
        let old = bag.insert("a", Value::new(3_i32)).unwrap();

        assert_eq!(old.downcast_ref::<i32>(), Some(&1));
        assert_eq!(names(&bag), ["a", "b"]);
        assert_eq!(bag.get("a").unwrap().downcast_ref::<i32>(), Some(&3));
    }

    #[test]
    fn remove_reindexes_later_members() {
        let mut bag: Expando = [
            ("a", Value::new(1_i32)),
            ("b", Value::new(2_i32)),
            ("c", Value::new(3_i32)),
        ]
        .into_iter()
        .collect();

        let removed = bag.remove("a").unwrap();
        assert_eq!(removed.downcast_ref::<i32>(), Some(&1));
        assert!(bag.remove("a").is_none());
        assert_eq!(names(&bag), ["b", "c"]);
        assert_eq!(bag.get("c").unwrap().downcast_ref::<i32>(), Some(&3));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn dynamic_lookup_is_exact() {
        let mut bag = Expando::new();
        bag.insert("Name", Value::new("x"));

        assert_eq!(bag.member_names(), ["Name"]);
        assert!(bag.invoke_get("Name").unwrap().is_some());
        assert!(bag.invoke_get("name").unwrap().is_none());
    }
}
