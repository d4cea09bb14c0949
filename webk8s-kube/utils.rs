use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use k8s_openapi::serde_json::{Value, to_value};

#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Formats kubernetes timestamp as RFC3339 UTC string, or returns empty string if there is no time.
pub fn format_time(time: Option<&Time>) -> String {
    match time.map(to_value) {
        Some(Ok(Value::String(text))) => text,
        _ => String::new(),
    }
}

/// Returns `true` if `name` can be used as a kubernetes object name.\
/// **Note** that only lowercase alphanumeric characters, `-` and `.` are accepted.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 253
        && name != "."
        && name != ".."
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
}
