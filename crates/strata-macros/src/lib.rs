// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for the Strata scene graph.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// A derive macro that implements the `strata_scene::component::Component` trait.
///
/// The struct must carry a `ComponentBase`, either in a field named `base` or
/// in a field marked with `#[component(base)]`. That base holds the weak
/// back-reference to the owning scene object.
///
/// ```ignore
/// #[derive(Debug, Component)]
/// pub struct CmptTag {
///     base: ComponentBase,
///     pub tag: String,
/// }
/// ```
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree.
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let base_field = match find_base_field(&input) {
        Ok(field) => field,
        Err(err) => return err.to_compile_error().into(),
    };

    // `::strata_scene` resolves inside the scene crate too, through its
    // `extern crate self as strata_scene` alias.
    let expanded = quote! {
        impl #impl_generics ::strata_scene::component::Component for #name #ty_generics #where_clause {
            fn base(&self) -> &::strata_scene::component::ComponentBase {
                &self.#base_field
            }
        }
    };

    // Hand the output tokens back to the compiler.
    TokenStream::from(expanded)
}

fn find_base_field(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Component can only be derived for structs",
        ));
    };

    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Component requires a struct with named fields",
        ));
    };

    let mut fallback = None;
    for field in &fields.named {
        let Some(ident) = &field.ident else { continue };
        if has_base_marker(field)? {
            return Ok(quote!(#ident));
        }
        if ident == "base" {
            fallback = Some(quote!(#ident));
        }
    }

    fallback.ok_or_else(|| {
        syn::Error::new_spanned(
            &input.ident,
            "Component requires a `base: ComponentBase` field or a field marked #[component(base)]",
        )
    })
}

fn has_base_marker(field: &syn::Field) -> syn::Result<bool> {
    let mut marked = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("component")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("unsupported component attribute"))
            }
        })?;
    }
    Ok(marked)
}
