//! Code generation for `#[derive(Inspect)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, LitStr, Type, WherePredicate};

use crate::attributes::{FieldAttributes, TypeAttributes};

/// One generated property.
struct Property<'a> {
    name: LitStr,
    member: &'a syn::Ident,
    ty: &'a Type,
    readable: bool,
    writable: bool,
}

pub(crate) fn expand(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let type_attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    check_generics(&ast.generics)?;

    let properties = if type_attrs.opaque {
        Vec::new()
    } else {
        collect_properties(ast)?
    };

    let vc_props_path = crate::path::vc_props();
    let typed = impl_typed(ast, &properties, &vc_props_path);
    let inspect = impl_inspect(ast, &type_attrs, &properties, &vc_props_path);

    Ok(quote! {
        #typed
        #inspect
    })
}

fn check_generics(generics: &Generics) -> syn::Result<()> {
    match generics.lifetimes().next() {
        Some(lifetime) => Err(syn::Error::new_spanned(
            lifetime,
            "`Inspect` requires `'static` types, lifetime parameters are not supported",
        )),
        None => Ok(()),
    }
}

fn collect_properties(ast: &DeriveInput) -> syn::Result<Vec<Property<'_>>> {
    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "tuple structs have no property names, use `#[inspect(opaque)]`",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "only structs with named fields have properties, use `#[inspect(opaque)]`",
            ));
        }
    };

    let mut properties = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        // Named fields always have an ident.
        let Some(member) = field.ident.as_ref() else {
            continue;
        };
        let name = attrs
            .rename
            .unwrap_or_else(|| LitStr::new(&member.unraw().to_string(), member.span()));
        properties.push(Property {
            name,
            member,
            ty: &field.ty,
            readable: !attrs.write_only,
            writable: !attrs.read_only,
        });
    }
    Ok(properties)
}

/// Adds `'static` to every type parameter and the bounds needed to move
/// field values in and out of a `Value`.
fn where_predicates(generics: &Generics, properties: &[Property<'_>]) -> Vec<WherePredicate> {
    let mut predicates: Vec<WherePredicate> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(param) => {
                let ident = &param.ident;
                let predicate: WherePredicate = syn::parse_quote! { #ident: 'static };
                Some(predicate)
            }
            _ => None,
        })
        .collect();

    if generics.type_params().next().is_some() {
        predicates.extend(properties.iter().map(|property| {
            let ty = property.ty;
            let predicate: WherePredicate = syn::parse_quote! {
                #ty: ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static
            };
            predicate
        }));
    }
    predicates
}

fn impl_typed(ast: &DeriveInput, properties: &[Property<'_>], vc_props_path: &syn::Path) -> TokenStream {
    let info_ = crate::path::info_(vc_props_path);
    let exports_ = crate::path::macro_exports_(vc_props_path);
    let value_ = crate::path::value_(vc_props_path);
    let result_ = crate::path::result_();
    let any_ = crate::path::any_();

    let infos = properties.iter().map(|property| {
        let Property {
            name,
            member,
            ty,
            readable,
            writable,
        } = property;

        let getter = readable.then(|| {
            quote! {
                .with_getter(|item: &dyn #any_| {
                    let this = #exports_::downcast_receiver::<Self>(item)?;
                    #result_::Ok(#value_::new(::core::clone::Clone::clone(&this.#member)))
                })
            }
        });
        let setter = writable.then(|| {
            quote! {
                .with_setter(|item: &mut dyn #any_, value: #value_| {
                    let this = #exports_::downcast_receiver_mut::<Self>(item)?;
                    this.#member = #exports_::take_value::<#ty>(#name, value)?;
                    #result_::Ok(())
                })
            }
        });

        quote! {
            #info_::PropertyInfo::new(#name) #getter #setter
        }
    });

    let table_tokens = if properties.is_empty() {
        quote! { #info_::PropertyTable::empty::<Self>() }
    } else {
        quote! { #info_::PropertyTable::new::<Self>([ #(#infos),* ]) }
    };

    let cell_tokens = if ast.generics.type_params().next().is_some() {
        quote! {
            static CELL: #info_::GenericTableCell = #info_::GenericTableCell::new();
            CELL.get_or_insert::<Self>(|| #table_tokens)
        }
    } else {
        quote! {
            static CELL: #info_::TableCell = #info_::TableCell::new();
            CELL.get_or_init(|| #table_tokens)
        }
    };

    let ident = &ast.ident;
    let mut generics = ast.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .extend(where_predicates(&ast.generics, properties));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #info_::Typed for #ident #ty_generics #where_clause {
            fn property_table() -> &'static #info_::PropertyTable {
                #cell_tokens
            }
        }
    }
}

fn impl_inspect(
    ast: &DeriveInput,
    type_attrs: &TypeAttributes,
    properties: &[Property<'_>],
    vc_props_path: &syn::Path,
) -> TokenStream {
    let info_ = crate::path::info_(vc_props_path);
    let inspect_ = crate::path::inspect_(vc_props_path);
    let option_ = crate::path::option_();

    let as_dynamic = type_attrs.dynamic.then(|| {
        quote! {
            #[inline]
            fn as_dynamic(&self) -> #option_<&dyn #vc_props_path::dynamic::DynamicShape> {
                #option_::Some(self)
            }
        }
    });
    let as_descriptor = type_attrs.descriptor.then(|| {
        quote! {
            #[inline]
            fn as_descriptor(&self) -> #option_<&dyn #info_::DescriptorShape> {
                #option_::Some(self)
            }
        }
    });

    let ident = &ast.ident;
    let mut generics = ast.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .extend(where_predicates(&ast.generics, properties));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #inspect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn property_table(&self) -> &'static #info_::PropertyTable {
                <Self as #info_::Typed>::property_table()
            }

            #as_dynamic
            #as_descriptor
        }
    }
}
