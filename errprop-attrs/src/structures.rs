use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// The arguments that can be passed to the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub help: Option<Expr>,
}

impl ErrorArgs {
    /// Parse the next argument in the input stream and applies it to itself.
    fn parse_arg(&mut self, input: ParseStream) -> Result<()> {
        let ident: Ident = input.parse()?;
        input.parse::<Token![=]>()?;

        let ident_str = ident.to_string();
        match ident_str.as_str() {
            "message" => self.message = Some(input.parse()?),
            "help" => self.help = Some(input.parse()?),
            _ => return Err(syn::Error::new_spanned(ident, format!("unknown tag `{}`", ident_str))),
        }

        Ok(())
    }
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();

        while !input.is_empty() {
            args.parse_arg(input)?;
            if input.parse::<Token![,]>().is_err() {
                break;
            }
        }

        Ok(args)
    }
}

/// Creates a `let` expression that destructures the given `ident` into its named fields. Unit
/// structs need no destructuring, and tuple structs produce a `compile_error!`.
fn destructure_fields(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|field| {
                let field_name = field.ident.as_ref();
                quote! { #field_name }
            });
            quote! { let #ident { #(#fields),* } = self; }
        },
        Fields::Unnamed(_) => quote_spanned! { ident.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs"); },
        Fields::Unit => quote! {},
    }
}

/// The target struct to derive [`ErrorKind`] for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        // parse outer attributes, including documentation and `error` attributes
        let attributes = input.call(Attribute::parse_outer)?;
        let remaining = input.parse::<ItemStruct>()?;

        let name = remaining.ident;
        let fields = remaining.fields;
        let mut error_args = ErrorArgs::default();

        for attr in &attributes {
            if attr.path().is_ident("error") {
                error_args = attr.parse_args::<ErrorArgs>()?;
                break;
            }
        }

        if error_args.message.is_none() {
            return Err(syn::Error::new(name.span(), "missing `message` tag in `error` attribute"));
        }

        Ok(ErrorKindTarget {
            name,
            fields,
            error_args,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let destructure_expr = destructure_fields(&self.name, &self.fields);
        let create_function = |name: &str, body: &Expr, output_type: TokenStream2| {
            let name = Ident::new(name, Span::call_site());
            quote! {
                #[allow(unused_variables)]
                fn #name(&self) -> #output_type {
                    #destructure_expr
                    (#body).to_owned().into()
                }
            }
        };
        let (message, help) = (
            self.error_args.message.as_ref().map(|e| create_function("message", e, quote! { String })),
            self.error_args.help.as_ref().map(|e| create_function("help", e, quote! { Option<String> })),
        );

        tokens.extend(quote! {
            #message
            #help
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_and_help() {
        let target: ErrorKindTarget = syn::parse_str(r#"
            /// Docs are skipped.
            #[error(message = format!("expected {}", self.expected), help = "try again")]
            pub struct ShapeMismatch {
                pub expected: usize,
            }
        "#).unwrap();

        assert_eq!(target.name, "ShapeMismatch");
        assert!(target.error_args.message.is_some());
        assert!(target.error_args.help.is_some());
        assert!(matches!(target.fields, Fields::Named(_)));
    }

    #[test]
    fn reject_unknown_tag() {
        let result = syn::parse_str::<ErrorKindTarget>(r#"
            #[error(message = "oops", label = "here")]
            pub struct Foo;
        "#);
        assert!(result.is_err());
    }

    #[test]
    fn tuple_struct_fields_are_rejected() {
        let target: ErrorKindTarget = syn::parse_str(r#"
            #[error(message = "oops")]
            pub struct Foo(usize);
        "#).unwrap();

        let tokens = destructure_fields(&target.name, &target.fields).to_string();
        assert!(tokens.contains("compile_error"));
    }

    #[test]
    fn unit_struct_needs_no_destructuring() {
        let target: ErrorKindTarget = syn::parse_str(r#"
            #[error(message = "oops")]
            pub struct Foo;
        "#).unwrap();

        assert!(destructure_fields(&target.name, &target.fields).is_empty());
    }

    #[test]
    fn reject_missing_message() {
        let result = syn::parse_str::<ErrorKindTarget>(r#"
            #[error(help = "nothing to say")]
            pub struct Foo;
        "#);
        assert!(result.is_err());
    }
}
