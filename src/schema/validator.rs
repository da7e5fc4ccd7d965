//! Declarative object validation and filtering
//!
//! [`validate`] walks a schema's properties in definition order, checks
//! presence and type for each, and produces a fresh output [`Document`]
//! whose keys and values have been renamed, filtered, coerced, flattened,
//! or defaulted according to the schema.
//!
//! Validation is synchronous, deterministic, and side-effect free: the
//! input and schema are never mutated, and no partial result is returned
//! on error. Type alternatives are tried with an internal non-throwing
//! path; only the top-level call surfaces errors.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::RegexBuilder;
use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::types::{Coercion, Filter, Property, Schema, TypeSpec};
use super::value::{Document, FieldValue, ObjectId};

/// Validates and filters an input object against a schema.
///
/// # Errors
///
/// Returns [`SchemaError`] when the input is not an object, a required
/// property is missing (before or after filtering), no type alternative
/// matches, an output key collides, a projection value is not literal
/// false, or a coercion rejects its input.
pub fn validate(input: &Value, schema: &Schema) -> SchemaResult<Document> {
    let obj = input.as_object().ok_or(SchemaError::InputNotObject {
        found: json_type_name(input),
    })?;

    let mut out = Document::new();

    for (name, prop) in schema.iter() {
        match obj.get(name) {
            Some(value) => validate_property(name, prop, value, &mut out)?,
            None => {
                if prop.required {
                    return Err(SchemaError::MissingRequired(name.to_string()));
                }
                if let Some(default) = &prop.default {
                    insert_checked(&mut out, name, FieldValue::Json(default.clone()))?;
                }
            }
        }
    }

    Ok(out)
}

/// Validates a single present property and emits its output entry.
fn validate_property(
    name: &str,
    prop: &Property,
    value: &Value,
    out: &mut Document,
) -> SchemaResult<()> {
    let key = resolve_key(name, prop, out)?;

    // Type compatibility. A matched nested-schema alternative carries its
    // validated sub-document forward in place of the raw value.
    let alternative_doc = match &prop.value_type {
        Some(spec) => check_type(name, spec, value)?,
        None => None,
    };

    // Tracks whether a flattened sub-object satisfied the property even
    // though nothing landed under `key` itself.
    let mut flattened = false;

    match &prop.filter {
        Some(Filter::Custom(f)) => {
            if let Some(result) = f(value) {
                insert_checked(out, &key, result)?;
            }
        }
        Some(Filter::Coerce(coercion)) => {
            apply_coercion(*coercion, name, &key, prop, value, out)?;
        }
        None => {
            if let Some(TypeSpec::Object(nested)) = &prop.value_type {
                let doc = validate(value, nested)?;
                flattened = prop.flatten && !doc.is_empty();
                emit_document(name, &key, prop.flatten, doc, out)?;
            } else if let Some(doc) = alternative_doc {
                insert_checked(out, &key, FieldValue::Object(doc))?;
            } else {
                insert_checked(out, &key, FieldValue::Json(value.clone()))?;
            }
        }
    }

    // Post-filter required check: a filter may intentionally omit its value
    if prop.required && !flattened && !out.contains_key(&key) {
        return Err(SchemaError::MissingAfterFilter(name.to_string()));
    }

    Ok(())
}

/// Resolves the output key, honoring a rename target.
fn resolve_key(name: &str, prop: &Property, out: &Document) -> SchemaResult<String> {
    match &prop.rename {
        Some(target) => {
            if out.contains_key(target) {
                return Err(SchemaError::RenameCollision {
                    from: name.to_string(),
                    to: target.clone(),
                });
            }
            Ok(target.clone())
        }
        None => Ok(name.to_string()),
    }
}

/// Checks a value against a declared type.
///
/// Returns the validated sub-document when a nested-schema alternative
/// matched, so the caller can carry it forward instead of the raw value.
fn check_type(
    property: &str,
    spec: &TypeSpec,
    value: &Value,
) -> SchemaResult<Option<Document>> {
    match spec {
        TypeSpec::Primitive(p) => {
            if p.matches(value) {
                Ok(None)
            } else {
                Err(mismatch(property, spec, value))
            }
        }
        TypeSpec::Literals(lits) => {
            if lits.contains(value) {
                Ok(None)
            } else {
                Err(mismatch(property, spec, value))
            }
        }
        // Shape check only; the recursive validation happens at emit time
        TypeSpec::Object(_) => {
            if value.is_object() {
                Ok(None)
            } else {
                Err(mismatch(property, spec, value))
            }
        }
        TypeSpec::OneOf(alternatives) => {
            for alt in alternatives {
                match alt {
                    // A nested-schema alternative matches iff recursive
                    // validation succeeds; failure means "try the next one"
                    TypeSpec::Object(schema) => {
                        if let Ok(doc) = validate(value, schema) {
                            return Ok(Some(doc));
                        }
                    }
                    other => {
                        if let Ok(result) = check_type(property, other, value) {
                            return Ok(result);
                        }
                    }
                }
            }
            Err(mismatch(property, spec, value))
        }
    }
}

/// Applies one of the named coercions and emits the result.
fn apply_coercion(
    coercion: Coercion,
    name: &str,
    key: &str,
    prop: &Property,
    value: &Value,
    out: &mut Document,
) -> SchemaResult<()> {
    match coercion {
        Coercion::Number => {
            let parsed = coerce_number(value);
            insert_checked(out, key, FieldValue::Json(Value::from(parsed)))?;
        }
        Coercion::Stringify => {
            insert_checked(out, key, FieldValue::Json(Value::String(stringify(value))))?;
        }
        Coercion::Trim => {
            if is_falsy(value) {
                return Ok(());
            }
            let Value::String(s) = value else {
                return Err(SchemaError::TypeMismatch {
                    property: name.to_string(),
                    expected: "string".to_string(),
                    found: json_type_name(value),
                });
            };
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                insert_checked(out, key, FieldValue::Json(Value::String(trimmed.to_string())))?;
            }
        }
        Coercion::IdReference => {
            let raw = stringify(value);
            let id = raw
                .parse::<ObjectId>()
                .map_err(|_| SchemaError::InvalidIdReference {
                    property: name.to_string(),
                    input: raw.clone(),
                })?;
            insert_checked(out, key, FieldValue::Id(id))?;
        }
        Coercion::Date => {
            let raw = stringify(value);
            let ts = parse_timestamp(&raw).ok_or_else(|| SchemaError::InvalidTimestamp {
                property: name.to_string(),
                input: raw.clone(),
            })?;
            insert_checked(out, key, FieldValue::Timestamp(ts))?;
        }
        Coercion::Regex => {
            if is_falsy(value) {
                return Ok(());
            }
            let raw = stringify(value);
            let escaped = regex::escape(raw.trim());
            let pattern = RegexBuilder::new(&escaped)
                .case_insensitive(true)
                .build()
                .map_err(|e| SchemaError::MalformedDescriptor {
                    property: name.to_string(),
                    reason: format!("failed to build pattern: {}", e),
                })?;
            insert_checked(out, key, FieldValue::Pattern(pattern))?;
        }
        Coercion::Projection => {
            let Some(TypeSpec::Object(nested)) = &prop.value_type else {
                return Err(SchemaError::MalformedDescriptor {
                    property: name.to_string(),
                    reason: "projection filter requires a nested schema type".to_string(),
                });
            };
            let doc = validate(value, nested)?;
            for (k, v) in doc.iter() {
                if !matches!(v, FieldValue::Json(Value::Bool(false))) {
                    return Err(SchemaError::InvalidProjection {
                        property: name.to_string(),
                        key: k.to_string(),
                    });
                }
            }
            insert_checked(out, key, FieldValue::Object(doc))?;
        }
    }

    Ok(())
}

/// Emits a validated sub-document, either nested or flattened.
fn emit_document(
    name: &str,
    key: &str,
    flatten: bool,
    doc: Document,
    out: &mut Document,
) -> SchemaResult<()> {
    if flatten {
        for (child, value) in doc {
            let flat = format!("{}.{}", name, child);
            if out.contains_key(&flat) {
                return Err(SchemaError::FlattenCollision {
                    parent: name.to_string(),
                    child,
                    key: flat,
                });
            }
            out.insert(flat, value);
        }
    } else {
        insert_checked(out, key, FieldValue::Object(doc))?;
    }
    Ok(())
}

/// Inserts under a key that must not already be populated.
fn insert_checked(out: &mut Document, key: &str, value: FieldValue) -> SchemaResult<()> {
    if out.contains_key(key) {
        return Err(SchemaError::DuplicateKey(key.to_string()));
    }
    out.insert(key, value);
    Ok(())
}

fn mismatch(property: &str, spec: &TypeSpec, value: &Value) -> SchemaError {
    SchemaError::TypeMismatch {
        property: property.to_string(),
        expected: spec.expected(),
        found: json_type_name(value),
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Numeric coercion: numbers pass through, numeric strings parse,
/// everything else yields 0.
fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// String coercion: null yields the empty string, scalars render bare,
/// composites render as JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Falsiness in the sense the trim/regex coercions use for omission.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Parses a timestamp from its string rendering.
///
/// Accepts RFC 3339, then `YYYY-MM-DD HH:MM:SS`, then a bare date (taken
/// as midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }

    None
}
