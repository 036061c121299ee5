use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{DeriveInput, Ident, LitStr};

pub fn derive_typed_message(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let args = extract_args(input)?;

    let message_name = args
        .name
        .unwrap_or_else(|| to_snake_case(&ident.to_string()));
    let kind = match args.kind {
        Some(kind) => kind_variant(&kind)?,
        None => {
            return Err(syn::Error::new(
                Span::call_site(),
                "TypedMessage derive: missing #[message(kind = \"command\" | \"event\" | \"query\")]",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics sourced_enqueue::TypedMessage for #ident #ty_generics #where_clause {
            const NAME: &'static str = #message_name;
            const KIND: sourced_enqueue::MessageKind = sourced_enqueue::MessageKind::#kind;
        }
    })
}

#[derive(Default)]
struct MessageArgs {
    kind: Option<LitStr>,
    name: Option<String>,
}

/// Reads `#[message(kind = "...", name = "...")]` from the struct attributes.
fn extract_args(input: &DeriveInput) -> syn::Result<MessageArgs> {
    let mut args = MessageArgs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("message") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                args.kind = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                args.name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `kind` or `name`"))
            }
        })?;
    }

    Ok(args)
}

fn kind_variant(kind: &LitStr) -> syn::Result<Ident> {
    let variant = match kind.value().as_str() {
        "command" => "Command",
        "event" => "Event",
        "query" => "Query",
        other => {
            return Err(syn::Error::new(
                kind.span(),
                format!(
                    "unsupported message kind \"{}\", expected \"command\", \"event\" or \"query\"",
                    other
                ),
            ))
        }
    };
    Ok(Ident::new(variant, kind.span()))
}

// CreateTodo -> create_todo
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
