//! `#[derive(Extract)]` for the xtract XPath decoder.
//!
//! Field attributes:
//!
//! - `#[xpath("expr")]` evaluates `expr` relative to the struct's context.
//! - `#[xpath(flatten)]` decodes the field against the struct's context.
//! - `#[xpath(skip)]` leaves the field at whatever value it already holds.
//!
//! Fields without an attribute are untagged. An empty expression counts as
//! no expression.
//!
//! Container attribute `#[xpath(convert)]` makes the type a custom
//! conversion target backed by its `xtract::Convert` impl. It works on any
//! struct or enum. An untagged field holding a struct converter is decoded
//! against the enclosing context, like any other struct field.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, Ident, LitStr};

#[proc_macro_derive(Extract, attributes(xpath))]
pub fn derive_extract(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

enum XpathArg {
    Expr(LitStr),
    Flatten,
    Skip,
    Convert,
}

impl Parse for XpathArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(XpathArg::Expr(input.parse()?));
        }

        let ident: Ident = input.parse()?;
        match ident.to_string().as_str() {
            "flatten" => Ok(XpathArg::Flatten),
            "skip" => Ok(XpathArg::Skip),
            "convert" => Ok(XpathArg::Convert),
            other => Err(syn::Error::new(
                ident.span(),
                format!(
                    "unknown xpath option `{other}`, expected an expression string, `flatten`, `skip` or `convert`"
                ),
            )),
        }
    }
}

fn xpath_arg(attrs: &[Attribute]) -> syn::Result<Option<XpathArg>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("xpath")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[xpath] attribute"));
        }
        found = Some(attr.parse_args::<XpathArg>()?);
    }
    Ok(found)
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    match xpath_arg(&input.attrs)? {
        Some(XpathArg::Convert) => return Ok(expand_convert(&input)),
        Some(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "only #[xpath(convert)] is allowed on a type; a struct's expression belongs on the field holding it",
            ))
        }
        None => {}
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.clone(),
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Extract)] needs named fields; use #[xpath(convert)] for other structs",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Extract)] on enums and unions needs #[xpath(convert)]",
            ))
        }
    };

    let mut descriptors = Vec::new();
    let mut arms = Vec::new();

    for field in &fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let query = match xpath_arg(&field.attrs)? {
            Some(XpathArg::Skip) => continue,
            Some(XpathArg::Expr(expr)) if expr.value().is_empty() => {
                quote!(::xtract::FieldQuery::Untagged)
            }
            Some(XpathArg::Expr(expr)) => quote!(::xtract::FieldQuery::Expr(#expr)),
            Some(XpathArg::Flatten) => quote!(::xtract::FieldQuery::Inherit),
            Some(XpathArg::Convert) => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "`convert` applies to types; implement xtract::Convert for the field's type instead",
                ))
            }
            None => quote!(::xtract::FieldQuery::Untagged),
        };

        let ty = &field.ty;
        let name = ident.unraw().to_string();
        let index = descriptors.len();

        descriptors.push(quote! {
            ::xtract::FieldDescriptor {
                name: #name,
                query: #query,
                shape: <#ty as ::xtract::Extract>::SHAPE,
                struct_kind: <#ty as ::xtract::Extract>::STRUCT_KIND,
            }
        });
        arms.push(quote! {
            #index => ::core::option::Option::Some(::xtract::Extract::target(&mut self.#ident))
        });
    }

    for param in input.generics.type_params_mut() {
        param.bounds.push(parse_quote!(::xtract::Extract));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::xtract::Extract for #name #ty_generics #where_clause {
            const SHAPE: ::xtract::Shape = ::xtract::Shape::Struct;

            fn target(&mut self) -> ::xtract::Target<'_> {
                ::xtract::Target::Struct(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics ::xtract::Record for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<::xtract::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<::xtract::Target<'_>> {
                match index {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn expand_convert(input: &DeriveInput) -> TokenStream2 {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    // Untagged struct converters read the enclosing context; enums and
    // unions are gated like scalars.
    let struct_kind = matches!(input.data, Data::Struct(_));

    quote! {
        #[automatically_derived]
        impl #impl_generics ::xtract::Extract for #name #ty_generics #where_clause {
            const SHAPE: ::xtract::Shape = ::xtract::Shape::Custom;
            const STRUCT_KIND: bool = #struct_kind;

            fn target(&mut self) -> ::xtract::Target<'_> {
                ::xtract::Target::Custom(self)
            }
        }
    }
}
