//! In-memory model of a parsed and validated flag manifest.
//!
//! A [`Manifest`] is only ever produced by the [`loader`], so holding one means
//! every invariant has already been checked: keys are non-empty and unique,
//! every type is known and every default matches its type.

use std::fmt;

use serde::Serialize;

pub mod loader;
pub mod schema;

pub use loader::{init_manifest, load, parse, ManifestFormat};

/// Closed set of flag value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    Boolean,
    String,
    Integer,
    Float,
    Object,
}

impl FlagType {
    pub const ALL: [FlagType; 5] = [
        FlagType::Boolean,
        FlagType::String,
        FlagType::Integer,
        FlagType::Float,
        FlagType::Object,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FlagType::Boolean => "boolean",
            FlagType::String => "string",
            FlagType::Integer => "integer",
            FlagType::Float => "float",
            FlagType::Object => "object",
        }
    }

    /// Resolves a manifest `flagType` value. Matching is exact.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A default value; the variant is the flag's type.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagDefault {
    Boolean(bool),
    String(String),
    Integer(i64),
    Float(f64),
    Object(serde_json::Map<String, serde_json::Value>),
}

impl FlagDefault {
    pub fn flag_type(&self) -> FlagType {
        match self {
            FlagDefault::Boolean(_) => FlagType::Boolean,
            FlagDefault::String(_) => FlagType::String,
            FlagDefault::Integer(_) => FlagType::Integer,
            FlagDefault::Float(_) => FlagType::Float,
            FlagDefault::Object(_) => FlagType::Object,
        }
    }

    /// Checks `value` against `flag_type`, returning `None` on a shape mismatch.
    pub fn from_json(flag_type: FlagType, value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match (flag_type, value) {
            (FlagType::Boolean, Value::Bool(b)) => Some(FlagDefault::Boolean(*b)),
            (FlagType::String, Value::String(s)) => Some(FlagDefault::String(s.clone())),
            (FlagType::Integer, Value::Number(n)) => n.as_i64().map(FlagDefault::Integer),
            (FlagType::Float, Value::Number(n)) => {
                n.as_f64().filter(|f| f.is_finite()).map(FlagDefault::Float)
            }
            (FlagType::Object, Value::Object(map)) => Some(FlagDefault::Object(map.clone())),
            _ => None,
        }
    }
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagDefinition {
    key: String,
    default: FlagDefault,
    description: Option<String>,
}

impl FlagDefinition {
    pub(crate) fn new(key: String, default: FlagDefault, description: Option<String>) -> Self {
        Self { key, default, description }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn flag_type(&self) -> FlagType {
        self.default.flag_type()
    }

    pub fn default_value(&self) -> &FlagDefault {
        &self.default
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Ordered, validated collection of flag definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    schema_version: String,
    description: Option<String>,
    flags: Vec<FlagDefinition>,
}

impl Manifest {
    pub(crate) fn new(
        schema_version: String,
        description: Option<String>,
        flags: Vec<FlagDefinition>,
    ) -> Self {
        Self { schema_version, description, flags }
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Flags in source order.
    pub fn flags(&self) -> &[FlagDefinition] {
        &self.flags
    }

    pub fn flag(&self, key: &str) -> Option<&FlagDefinition> {
        self.flags.iter().find(|flag| flag.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flag_type_names() {
        for flag_type in FlagType::ALL {
            assert_eq!(FlagType::parse(flag_type.name()), Some(flag_type));
        }
        assert_eq!(FlagType::parse("Boolean"), None);
        assert_eq!(FlagType::parse("number"), None);
    }

    #[test]
    fn test_default_shapes() {
        assert_eq!(
            FlagDefault::from_json(FlagType::Boolean, &json!(true)),
            Some(FlagDefault::Boolean(true))
        );
        assert_eq!(FlagDefault::from_json(FlagType::Boolean, &json!("yes")), None);
        assert_eq!(FlagDefault::from_json(FlagType::Integer, &json!(1.5)), None);
        assert_eq!(
            FlagDefault::from_json(FlagType::Float, &json!(3)),
            Some(FlagDefault::Float(3.0))
        );
        assert_eq!(FlagDefault::from_json(FlagType::Object, &json!([1, 2])), None);
        assert_eq!(FlagDefault::from_json(FlagType::String, &json!(null)), None);
    }
}
