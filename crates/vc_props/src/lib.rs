#![doc = include_str!("../README.md")]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `vc_props`, both inside this crate and in doc tests.
extern crate self as vc_props;

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod error;
mod impls;
mod inspect;
mod matcher;
mod options;
mod shape;
mod value;

pub mod access;
pub mod dynamic;
pub mod info;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use access::{
    PropertyGetter, PropertyPair, PropertyPairs, Resolved, enumerate_properties, get_property,
    make_getter, set_property,
};
pub use cache::{AccessorCache, CacheStats};
pub use dynamic::{DynamicShape, Expando};
pub use error::{AccessError, AccessKind};
pub use inspect::{Inspect, Target, TargetMut};
pub use matcher::{NameMatcher, names_match};
pub use options::{AccessOptions, NotFoundPolicy};
pub use shape::{ShapeKind, ShapeRef, classify};
pub use value::Value;

pub use vc_props_derive as derive;
