use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_BLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```(?:json)?\s*([\s\S]*?)```").unwrap());

/// Outcome of a best-effort parse of model output.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    /// True when the text could not be parsed and `value` is the fallback
    pub fell_back: bool,
}

impl<T> Normalized<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Pulls the JSON object out of raw model text.
///
/// Prefers the first fenced code block, then the span from the first `{` to
/// the last `}`, and finally returns the text unchanged.
pub fn extract_json_object(text: &str) -> &str {
    if let Some(inner) = FENCED_BLOCK_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty())
    {
        return inner;
    }

    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if last > first {
            return &text[first..=last];
        }
    }

    text
}

/// Parses `input` as JSON, returning `fallback` instead of an error.
pub fn safe_json_parse<T: DeserializeOwned>(input: &str, fallback: T) -> Normalized<T> {
    match serde_json::from_str::<T>(input) {
        Ok(value) => Normalized {
            value,
            fell_back: false,
        },
        Err(err) => {
            tracing::debug!("Model output did not parse as JSON: {}", err);
            Normalized {
                value: fallback,
                fell_back: true,
            }
        }
    }
}

/// Extracts and parses the JSON object in raw model text; never fails.
pub fn normalize_model_output<T: DeserializeOwned + Default>(raw: &str) -> Normalized<T> {
    safe_json_parse(extract_json_object(raw), T::default())
}
