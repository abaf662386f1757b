use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn};

/// Marks a unit or integration test.
///
/// Sync functions become plain `#[test]`s. Async functions run on a
/// current-thread tokio runtime through `#[tokio::test]`.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);

  let raw_args = proc_macro2::TokenStream::from(attr);
  if !raw_args.is_empty() {
    return TokenStream::from(
      syn::Error::new(
        raw_args.span(),
        "rxflow_macro::test takes no arguments. Use #[rxflow_macro::test] on a sync or async fn.",
      )
      .to_compile_error(),
    );
  }

  if !input.sig.inputs.is_empty() {
    return TokenStream::from(
      syn::Error::new(input.sig.inputs.span(), "test functions cannot take arguments")
        .to_compile_error(),
    );
  }

  let native_attr = if input.sig.asyncness.is_some() {
    quote!(#[tokio::test])
  } else {
    quote!(#[test])
  };

  let expanded = quote! {
      #native_attr
      #input
  };

  TokenStream::from(expanded)
}
