//! Classifier reply parsing
//!
//! Replies are expected to be a single JSON object, possibly wrapped in a
//! markdown code fence. Every field is validated explicitly so a broken reply
//! surfaces as a [`ParseError`] naming the offending field. Nothing here
//! falls back to a "safe" verdict.

use riskwatch_core::{ClassificationRecord, Confidence, ParseError, SeverityAssessment};
use serde_json::{Map, Value};

const FENCE: &str = "```";

/// Strip a surrounding code fence (with optional language tag) and whitespace
pub fn strip_code_fence(raw: &str) -> &str {
    let mut body = raw.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = &rest[tag_len..];
    }

    if let Some(rest) = body.strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Decode and validate a sensitivity classification reply
pub fn parse_classification(raw: &str) -> Result<ClassificationRecord, ParseError> {
    let fields = decode_object(raw)?;

    let is_sensitive = match fields.get("is_sensitive") {
        None | Some(Value::Null) => return Err(ParseError::MissingField("is_sensitive")),
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(ParseError::InvalidType("is_sensitive")),
    };

    let category = required_str(&fields, "category")?.to_string();
    let confidence = Confidence::from_label(required_str(&fields, "confidence")?)
        .ok_or(ParseError::InvalidType("confidence"))?;
    let safety_score = optional_score(&fields, "safety_score")?;
    let trigger_words = optional_string_list(&fields, "trigger_words")?;
    let explanation = optional_str(&fields, "explanation")?
        .unwrap_or_default()
        .to_string();

    Ok(ClassificationRecord {
        is_sensitive,
        category,
        confidence,
        safety_score,
        trigger_words,
        explanation,
    })
}

/// Decode and validate a severity assessment reply
pub fn parse_assessment(raw: &str) -> Result<SeverityAssessment, ParseError> {
    let fields = decode_object(raw)?;

    Ok(SeverityAssessment {
        severity: required_str(&fields, "severity")?.to_string(),
        reason: optional_str(&fields, "reason")?.unwrap_or_default().to_string(),
        category: optional_str(&fields, "category")?.unwrap_or_default().to_string(),
    })
}

fn decode_object(raw: &str) -> Result<Map<String, Value>, ParseError> {
    let payload = strip_code_fence(raw);
    if payload.is_empty() {
        return Err(ParseError::Malformed("empty reply".to_string()));
    }

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(ParseError::Malformed(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
        Err(e) => Err(ParseError::Malformed(e.to_string())),
    }
}

fn required_str<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, ParseError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(ParseError::MissingField(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ParseError::InvalidType(field)),
    }
}

fn optional_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, ParseError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ParseError::InvalidType(field)),
    }
}

fn optional_score(fields: &Map<String, Value>, field: &'static str) -> Result<Option<u8>, ParseError> {
    let number = match fields.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n,
        Some(_) => return Err(ParseError::InvalidType(field)),
    };

    if !(number.is_i64() || number.is_u64()) {
        return Err(ParseError::InvalidType(field));
    }

    number
        .as_u64()
        .and_then(|value| u8::try_from(value).ok())
        .filter(|score| *score <= 100)
        .map(Some)
        .ok_or_else(|| ParseError::OutOfRange {
            field,
            value: number.to_string(),
        })
}

fn optional_string_list(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ParseError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ParseError::InvalidType(field)),
            })
            .collect(),
        Some(_) => Err(ParseError::InvalidType(field)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
