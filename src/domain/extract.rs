//! Text extraction from provider payloads
//!
//! Providers answer with whatever shape their model or SDK version produces.
//! [`extract_text`] walks an ordered list of shapes and returns the first
//! non-blank string it finds. Earlier rules win over later ones, so a
//! top-level `text` field beats `choices[0].message.content`.

use serde_json::{Map, Value};

/// Maximum characters kept when sampling a payload for diagnostics
pub const PAYLOAD_SAMPLE_CHARS: usize = 300;

/// Top-level fields that carry the answer directly
const NAMED_TEXT_FIELDS: &[&str] = &[
    "text",
    "outputText",
    "output_text",
    "generatedText",
    "generated_text",
    "response",
    "result",
];

/// Fields looked up on `outputs[0]`
const OUTPUT_ITEM_FIELDS: &[&str] = &[
    "text",
    "generatedText",
    "generated_text",
    "output",
    "response",
    "result",
];

/// Outcome of running the extractor over a completed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    /// Nothing usable was found; carries a bounded sample of the payload
    Unparsable { sample: String },
}

impl Extraction {
    pub fn from_payload(value: &Value) -> Self {
        match extract_text(value) {
            Some(text) => Self::Text(text),
            None => Self::Unparsable {
                sample: sample_payload(value),
            },
        }
    }
}

/// Locate a non-blank text answer inside an arbitrarily shaped JSON value.
///
/// The returned text is trimmed. Returns `None` when no rule matches.
pub fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Object(map) => from_object(map).or_else(|| from_outputs(map)),
        Value::Array(items) => match items.first()? {
            Value::String(text) => non_blank(text),
            Value::Object(map) => from_object(map),
            _ => None,
        },
        _ => None,
    }
}

/// Named fields first, then chat-completion `choices`
fn from_object(map: &Map<String, Value>) -> Option<String> {
    first_named(map, NAMED_TEXT_FIELDS).or_else(|| from_choices(map))
}

fn from_choices(map: &Map<String, Value>) -> Option<String> {
    let Some(Value::Array(choices)) = map.get("choices") else {
        return None;
    };
    let Some(Value::Object(choice)) = choices.first() else {
        return None;
    };

    if let Some(Value::Object(message)) = choice.get("message") {
        if let Some(text) = first_named(message, &["content"]) {
            return Some(text);
        }
    }

    if let Some(text) = first_named(choice, &["text"]) {
        return Some(text);
    }

    match choice.get("tokens") {
        Some(Value::Array(tokens)) => concat_tokens(tokens),
        _ => None,
    }
}

fn from_outputs(map: &Map<String, Value>) -> Option<String> {
    let Some(Value::Array(outputs)) = map.get("outputs") else {
        return None;
    };
    let Some(Value::Object(item)) = outputs.first() else {
        return None;
    };

    first_named(item, OUTPUT_ITEM_FIELDS)
}

/// Joins a token list in order; every element has to be a string
fn concat_tokens(tokens: &[Value]) -> Option<String> {
    let joined = tokens
        .iter()
        .map(Value::as_str)
        .collect::<Option<Vec<&str>>>()?
        .concat();

    non_blank(&joined)
}

fn first_named(map: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match map.get(*field) {
        Some(Value::String(text)) => non_blank(text),
        _ => None,
    })
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Compact rendering of a payload, cut to [`PAYLOAD_SAMPLE_CHARS`]
pub fn sample_payload(value: &Value) -> String {
    let rendered = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    excerpt(&rendered, PAYLOAD_SAMPLE_CHARS)
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `…`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}…", &text[..byte_index]),
        None => text.to_string(),
    }
}
