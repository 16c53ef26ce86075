use glob::glob;
use proc_macro::TokenStream;
use quote::quote;
use sort_html_attr_fixture_tests_gen_tests::parse_fixture_file;
use std::fs;
use std::path::Path;
use syn::{parse_macro_input, LitStr};

fn process_fixture_file(fixture_path: &Path) -> proc_macro2::TokenStream {
    // Module name from the file stem
    let file_name = fixture_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .replace('-', "_");

    let content = fs::read_to_string(fixture_path).expect("Failed to read fixture file");
    let cases = parse_fixture_file(&content);

    let file_mod_name = syn::Ident::new(&file_name, proc_macro2::Span::call_site());

    let test_fns = cases.iter().map(|case| {
        let test_name = syn::Ident::new(
            &format!("line{:04}", case.line_number),
            proc_macro2::Span::call_site(),
        );
        let data = &case.data;
        let expected = &case.expected;
        let priority = &case.priority;
        let preserve_white_space = case.preserve_white_space;
        let syntax = &case.syntax;
        let allowed_syntaxes = match &case.allowed_syntaxes {
            Some(allowed) => quote! { Some(vec![#(#allowed.to_string()),*]) },
            None => quote! { None },
        };
        let line_number = case.line_number;

        quote! {
            #[test]
            fn #test_name() {
                let case = FixtureCase {
                    data: #data.to_string(),
                    priority: vec![#(#priority.to_string()),*],
                    preserve_white_space: #preserve_white_space,
                    syntax: #syntax.to_string(),
                    allowed_syntaxes: #allowed_syntaxes,
                    expected: #expected.to_string(),
                    line_number: #line_number,
                };

                let actual = run_fixture(&case);

                pretty_assertions::assert_str_eq!(
                    case.expected,
                    actual,
                    "Error on input:\n{}",
                    case.data,
                );
            }
        }
    });

    quote! {
        pub mod #file_mod_name {
            use sort_html_attr_fixture_tests_gen_tests::{run_fixture, FixtureCase};

            #(#test_fns)*
        }
    }
}

/// Generates one test module per fixture file matching the glob, which is
/// resolved against the calling crate's manifest directory.
#[proc_macro]
pub fn fixture_tests(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let pattern = Path::new(&manifest_dir).join(input.value());
    let pattern = pattern.to_str().expect("Fixture path must be UTF-8");

    let mut all_tests = Vec::new();

    for entry in glob(pattern).expect("Failed to read glob pattern") {
        match entry {
            Ok(path) => all_tests.push(process_fixture_file(&path)),
            Err(e) => panic!("Error processing fixture file: {:?}", e),
        }
    }

    let expanded = quote! {
        pub mod fixture_tests {
            #(#all_tests)*
        }
    };

    expanded.into()
}
