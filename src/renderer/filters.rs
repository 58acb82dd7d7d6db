use log::warn;
use minijinja::Environment;
use regex::Regex;

pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        screaming_snake::to_screaming_snake_case, snake::to_snake_case,
        table::to_table_case, train::to_train_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
};

/// Registers every custom filter on `env`.
pub fn register(env: &mut Environment<'_>) {
    env.add_filter("camel_case", to_camel_case);
    env.add_filter("kebab_case", to_kebab_case);
    env.add_filter("pascal_case", to_pascal_case);
    env.add_filter("screaming_snake_case", to_screaming_snake_case);
    env.add_filter("snake_case", to_snake_case);
    env.add_filter("table_case", to_table_case);
    env.add_filter("train_case", to_train_case);
    env.add_filter("plural", to_plural);
    env.add_filter("singular", to_singular);
    env.add_filter("regex", regex_filter);
    env.add_filter("package_name", package_name);
}

/// Tests whether `val` matches the regular expression `re`.
///
/// An invalid pattern is logged and treated as no match.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

/// Derives a Go package name from a module path or project name.
///
/// Takes the last `/` segment, lowercases it and keeps only ASCII
/// alphanumerics, so `example.com/My-Service.v2` becomes `myservicev2`.
/// Falls back to `app` when nothing usable remains or the result would start
/// with a digit.
pub fn package_name(val: &str) -> String {
    let segment = val.rsplit('/').next().unwrap_or(val);
    let name: String = segment
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => name,
        _ => "app".to_string(),
    }
}
