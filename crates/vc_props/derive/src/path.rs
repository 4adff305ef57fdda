//! Paths into `vc_props` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `vc_props` crate.
///
/// See [`vc_macro_utils::Manifest`] for the resolution rules. Reading the
/// manifest is relatively expensive, so the path is fetched once per
/// expansion and passed around.
pub(crate) fn vc_props() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_props"))
}

#[inline(always)]
pub(crate) fn info_(vc_props_path: &syn::Path) -> TokenStream {
    quote! { #vc_props_path::info }
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_props_path: &syn::Path) -> TokenStream {
    quote! { #vc_props_path::__macro_exports }
}

#[inline(always)]
pub(crate) fn inspect_(vc_props_path: &syn::Path) -> TokenStream {
    quote! { #vc_props_path::Inspect }
}

#[inline(always)]
pub(crate) fn value_(vc_props_path: &syn::Path) -> TokenStream {
    quote! { #vc_props_path::Value }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn any_() -> TokenStream {
    quote! { ::core::any::Any }
}
