use darling::ast::NestedMeta;
use darling::{Error, FromMeta};
use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Arguments for `#[into_configfile(...)]`
///
#[derive(Debug, FromMeta)]
struct ConfigArgs {
    /// File format version, defaults to 1
    #[darling(default)]
    version: Option<usize>,
    /// Default filename in the configuration directory
    filename: String,
}

/// Turn a struct into a versioned configuration file.
///
/// - add a `pub version: usize` field, to be read from the file
/// - implement `lookup_common::Versioned` with the expected version
/// - add a `FILENAME` associated constant
///
/// Use it *before* `#[derive(Deserialize)]` so that the new field is deserialised:
///
/// ```ignore
/// #[into_configfile(version = 1, filename = "lookupctl.hcl")]
/// #[derive(Debug, Default, Deserialize)]
/// pub struct CtlConfig {
///     pub api_key: Option<String>,
/// }
/// ```
///
#[proc_macro_attribute]
pub fn into_configfile(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = match NestedMeta::parse_meta_list(args.into()) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(Error::from(e).write_errors()),
    };
    let args = match ConfigArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => return TokenStream::from(e.write_errors()),
    };
    let version = args.version.unwrap_or(1);
    let filename = args.filename;

    let mut input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident.clone();

    match input.data {
        Data::Struct(ref mut data_struct) => match &mut data_struct.fields {
            Fields::Named(fields) => {
                let field = match syn::Field::parse_named.parse2(quote! { pub version: usize }) {
                    Ok(f) => f,
                    Err(e) => return e.to_compile_error().into(),
                };
                fields.named.push(field);
            }
            _ => {
                return syn::Error::new_spanned(
                    &input.ident,
                    "#[into_configfile] is only for struct with named fields",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input.ident, "#[into_configfile] is only for struct")
                .to_compile_error()
                .into()
        }
    }

    let output = quote! {
        #input

        impl ::lookup_common::Versioned for #ident {
            const VERSION: usize = #version;

            fn version(&self) -> usize {
                self.version
            }
        }

        impl #ident {
            /// Default configuration filename
            pub const FILENAME: &'static str = #filename;
        }
    };
    output.into()
}
