//! Schema type definitions
//!
//! A [`Schema`] is a static, externally authored description of expected
//! object shape: an ordered mapping from property name to a [`Property`]
//! descriptor. Schemas are trees (no cycles) and are never mutated by
//! validation.
//!
//! Filters are a closed sum over the named [`Coercion`] kinds plus a
//! caller-supplied transform, dispatched by exhaustive match. There is no
//! "unknown filter name" failure mode by construction.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::value::FieldValue;

/// Primitive runtime shapes a value can be matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// UTF-8 string
    String,
    /// Any JSON number
    Number,
    /// Boolean
    Bool,
    /// JSON object
    Object,
    /// JSON array
    Array,
}

impl Primitive {
    /// Returns the type name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Bool => "bool",
            Primitive::Object => "object",
            Primitive::Array => "array",
        }
    }

    /// Checks the runtime shape of a value.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Primitive::String => value.is_string(),
            Primitive::Number => value.is_number(),
            Primitive::Bool => value.is_boolean(),
            Primitive::Object => value.is_object(),
            Primitive::Array => value.is_array(),
        }
    }
}

/// Declared type of a property.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    /// Runtime primitive-type equality
    Primitive(Primitive),
    /// Membership in an enumerated literal set
    Literals(Vec<Value>),
    /// Recursive validation against a nested schema
    Object(Schema),
    /// Ordered alternatives; first match wins
    OneOf(Vec<TypeSpec>),
}

impl TypeSpec {
    /// Human-readable expectation for error messages.
    pub fn expected(&self) -> String {
        match self {
            TypeSpec::Primitive(p) => p.name().to_string(),
            TypeSpec::Literals(lits) => {
                format!("one of {}", Value::Array(lits.clone()))
            }
            TypeSpec::Object(_) => "object".to_string(),
            TypeSpec::OneOf(alts) => {
                let parts: Vec<String> = alts.iter().map(TypeSpec::expected).collect();
                parts.join(" | ")
            }
        }
    }
}

/// Built-in value transforms applied during filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Parse as floating point; non-numeric input yields 0
    Number,
    /// Stringify; nullish input yields the empty string
    Stringify,
    /// Strip bounding whitespace; omit the key if falsy or empty
    Trim,
    /// Convert to a canonical 24-hex-digit identifier reference
    IdReference,
    /// Construct a timestamp from the stringified input
    Date,
    /// Case-insensitive pattern from the escaped input; omit if falsy
    Regex,
    /// Recursively validate and require every value to be literal false
    Projection,
}

/// Transform applied to a present property before it reaches the output.
#[derive(Clone)]
pub enum Filter {
    /// One of the named built-in coercions
    Coerce(Coercion),
    /// Caller-supplied transform; returning `None` drops the property
    Custom(Arc<dyn Fn(&Value) -> Option<FieldValue> + Send + Sync>),
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Coerce(c) => f.debug_tuple("Coerce").field(c).finish(),
            Filter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Descriptor for a single schema property.
#[derive(Debug, Clone, Default)]
pub struct Property {
    /// Absence is fatal when true; otherwise the property is skipped
    pub required: bool,
    /// Declared type; `None` accepts any value
    pub value_type: Option<TypeSpec>,
    /// Output key rename target
    pub rename: Option<String>,
    /// Transform applied before the value reaches the output
    pub filter: Option<Filter>,
    /// Merge nested output keys into the parent as `parent.child`
    pub flatten: bool,
    /// Substituted when an optional property is absent
    pub default: Option<Value>,
}

impl Property {
    /// A property accepting any value.
    pub fn any() -> Self {
        Self::default()
    }

    /// A property with an explicit type.
    pub fn of(spec: TypeSpec) -> Self {
        Self {
            value_type: Some(spec),
            ..Self::default()
        }
    }

    /// A string-typed property.
    pub fn string() -> Self {
        Self::of(TypeSpec::Primitive(Primitive::String))
    }

    /// A number-typed property.
    pub fn number() -> Self {
        Self::of(TypeSpec::Primitive(Primitive::Number))
    }

    /// A boolean-typed property.
    pub fn boolean() -> Self {
        Self::of(TypeSpec::Primitive(Primitive::Bool))
    }

    /// An array-typed property.
    pub fn array() -> Self {
        Self::of(TypeSpec::Primitive(Primitive::Array))
    }

    /// A property validated against a nested schema.
    pub fn object(schema: Schema) -> Self {
        Self::of(TypeSpec::Object(schema))
    }

    /// A property matched against ordered type alternatives.
    pub fn one_of(alternatives: Vec<TypeSpec>) -> Self {
        Self::of(TypeSpec::OneOf(alternatives))
    }

    /// A property restricted to an enumerated literal set.
    pub fn literals(values: Vec<Value>) -> Self {
        Self::of(TypeSpec::Literals(values))
    }

    /// Marks the property as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Renames the output key.
    pub fn renamed(mut self, target: impl Into<String>) -> Self {
        self.rename = Some(target.into());
        self
    }

    /// Applies a named coercion.
    pub fn coerce(mut self, coercion: Coercion) -> Self {
        self.filter = Some(Filter::Coerce(coercion));
        self
    }

    /// Applies a caller-supplied transform.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<FieldValue> + Send + Sync + 'static,
    {
        self.filter = Some(Filter::Custom(Arc::new(f)));
        self
    }

    /// Merges nested output keys into the parent under dotted names.
    pub fn flattened(mut self) -> Self {
        self.flatten = true;
        self
    }

    /// Declares a fallback for an absent optional property.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Static description of expected object shape.
///
/// Properties are kept in definition order; order is significant for
/// collision detection, not for the overall result set.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: Vec<(String, Property)>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a property (builder style).
    pub fn property(mut self, name: impl Into<String>, prop: Property) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = prop,
            None => self.properties.push((name, prop)),
        }
        self
    }

    /// Looks up a property descriptor by name.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
    }

    /// Iterates properties in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.properties.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no properties are declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
