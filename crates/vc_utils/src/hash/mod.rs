//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! The containers default to [`FixedHashState`], so hashing results only depend
//! on the input and maps can be created in `const` contexts:
//!
//! ```
//! use vc_utils::hash::{FixedHashState, HashMap};
//!
//! static EMPTY: HashMap<&str, u32> = HashMap::with_hasher(FixedHashState);
//! assert!(EMPTY.is_empty());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

pub use hashbrown::Equivalent;

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
