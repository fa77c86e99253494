// ABOUTME: ${VAR} substitution applied to raw config text before parsing

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("variable pattern is valid");
}

/// Replace every `${NAME}` with `vars[NAME]`, else the process environment
/// value. Unknown names are left as written.
pub fn interpolate(data: &str, vars: &HashMap<String, String>) -> String {
    VAR_PATTERN
        .replace_all(data, |caps: &Captures| {
            let name = &caps[1];
            vars.get(name)
                .cloned()
                .or_else(|| std::env::var(name).ok())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
