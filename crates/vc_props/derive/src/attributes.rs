//! Parsing of `#[inspect(...)]` attributes.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::INSPECT_ATTRIBUTE_NAME;

/// Extra shapes a type declares, and whether its fields are ignored.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[inspect(opaque)]`
    pub opaque: bool,
    /// `#[inspect(dynamic)]`
    pub dynamic: bool,
    /// `#[inspect(descriptor)]`
    pub descriptor: bool,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(INSPECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("opaque") {
                    this.opaque = true;
                } else if meta.path.is_ident("dynamic") {
                    this.dynamic = true;
                } else if meta.path.is_ident("descriptor") {
                    this.descriptor = true;
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `opaque`, `dynamic` or `descriptor`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}

/// How one field is exposed.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[inspect(skip)]`
    pub skip: bool,
    /// `#[inspect(rename = "...")]`
    pub rename: Option<LitStr>,
    /// `#[inspect(read_only)]`
    pub read_only: bool,
    /// `#[inspect(write_only)]`
    pub write_only: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        let mut span = Span::call_site();
        for attr in attrs {
            if !attr.path().is_ident(INSPECT_ATTRIBUTE_NAME) {
                continue;
            }
            span = attr.span();
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "property names must not be empty"));
                    }
                    this.rename = Some(name);
                } else if meta.path.is_ident("read_only") {
                    this.read_only = true;
                } else if meta.path.is_ident("write_only") {
                    this.write_only = true;
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `skip`, `rename`, `read_only` or `write_only`",
                    ));
                }
                Ok(())
            })?;
        }

        if this.read_only && this.write_only {
            return Err(syn::Error::new(
                span,
                "a property cannot be both `read_only` and `write_only`",
            ));
        }
        if this.skip && (this.rename.is_some() || this.read_only || this.write_only) {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with other field attributes",
            ));
        }
        Ok(this)
    }
}
