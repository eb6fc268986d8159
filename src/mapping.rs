//! Per-target type mapping table.
//!
//! Pure functions from (target, flag type) to the native type name, the SDK
//! call that evaluates it, the literal syntax of its default and the casing
//! rule for accessor identifiers.

use cruet::Inflector;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::manifest::{FlagDefault, FlagDefinition, FlagType};
use crate::target::Target;

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_JS_INTEGER: i64 = (1 << 53) - 1;

/// How a flag key becomes an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasingRule {
    /// `new-ui` → `NewUi`
    UpperCamel,
    /// `new-ui` → `newUi`
    LowerCamel,
    /// `new-ui` → `new_ui`
    Snake,
}

impl CasingRule {
    /// Cases `key`, treating every non-alphanumeric ASCII character as a word
    /// separator. Returns `None` when nothing identifier-like is left.
    pub fn apply(self, key: &str) -> Option<String> {
        let words: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect();
        let words = words.split_whitespace().collect::<Vec<_>>().join(" ");
        if words.is_empty() {
            return None;
        }

        let cased = match self {
            CasingRule::UpperCamel => words.to_pascal_case(),
            CasingRule::LowerCamel => words.to_camel_case(),
            CasingRule::Snake => words.to_snake_case(),
        };

        if cased.starts_with(|c: char| c.is_ascii_digit()) {
            let prefix = match self {
                CasingRule::UpperCamel => "Flag",
                CasingRule::LowerCamel => "flag",
                CasingRule::Snake => "flag_",
            };
            Some(format!("{prefix}{cased}"))
        } else {
            Some(cased)
        }
    }
}

pub fn casing(target: Target) -> CasingRule {
    match target {
        Target::Nodejs => CasingRule::LowerCamel,
        Target::Python => CasingRule::Snake,
        Target::Go | Target::React | Target::Nestjs | Target::Csharp | Target::Java => {
            CasingRule::UpperCamel
        }
    }
}

/// Names an accessor may not take: language keywords plus the names the
/// generated file itself declares or imports.
fn reserved(target: Target) -> &'static [&'static str] {
    match target {
        Target::Go => &["Client"],
        Target::Nodejs => &[
            "arguments", "await", "break", "case", "catch", "class", "const", "continue",
            "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends",
            "false", "finally", "for", "function", "if", "implements", "import", "in",
            "instanceof", "interface", "let", "new", "null", "package", "private", "protected",
            "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
            "typeof", "var", "void", "while", "with", "yield", "OpenFeature",
        ],
        Target::Python => &[
            "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
            "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
            "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
            "with", "yield", "api",
        ],
        Target::Nestjs => &["BooleanFeatureFlag", "StringFeatureFlag", "NumberFeatureFlag", "ObjectFeatureFlag"],
        Target::React | Target::Csharp | Target::Java => &[],
    }
}

/// Accessor identifier for `key` under `target`'s casing rule.
///
/// # Errors
/// * `Error::RenderError` if the key has no identifier characters
pub fn identifier(target: Target, key: &str) -> Result<String> {
    let cased = casing(target).apply(key).ok_or_else(|| Error::RenderError {
        target,
        message: format!("flag key '{key}' contains no identifier characters"),
    })?;

    if reserved(target).contains(&cased.as_str()) {
        Ok(format!("{cased}_"))
    } else {
        Ok(cased)
    }
}

/// Result of looking up one flag type for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub target: Target,
    pub flag_type: FlagType,
    /// Type name as written in the target language
    pub native_type: &'static str,
    /// SDK function, method or decorator that evaluates the flag
    pub method: &'static str,
    pub casing: CasingRule,
}

/// Looks up `flag_type` for `target`. `None` means the target cannot
/// represent it.
pub fn lookup(target: Target, flag_type: FlagType) -> Option<TypeMapping> {
    use FlagType::*;

    let (native_type, method) = match (target, flag_type) {
        (Target::Go, Boolean) => ("bool", "BooleanValue"),
        (Target::Go, String) => ("string", "StringValue"),
        (Target::Go, Integer) => ("int64", "IntValue"),
        (Target::Go, Float) => ("float64", "FloatValue"),
        (Target::Go, Object) => ("any", "ObjectValue"),

        (Target::React, Boolean) => ("boolean", "useFlag"),
        (Target::React, String) => ("string", "useFlag"),
        (Target::React, Integer | Float) => ("number", "useFlag"),
        (Target::React, Object) => ("JsonValue", "useFlag"),

        (Target::Nodejs, Boolean) => ("boolean", "getBooleanValue"),
        (Target::Nodejs, String) => ("string", "getStringValue"),
        (Target::Nodejs, Integer | Float) => ("number", "getNumberValue"),
        (Target::Nodejs, Object) => ("JsonValue", "getObjectValue"),

        (Target::Nestjs, Boolean) => ("boolean", "BooleanFeatureFlag"),
        (Target::Nestjs, String) => ("string", "StringFeatureFlag"),
        (Target::Nestjs, Integer | Float) => ("number", "NumberFeatureFlag"),
        (Target::Nestjs, Object) => ("JsonValue", "ObjectFeatureFlag"),

        (Target::Python, Boolean) => ("bool", "get_boolean_value"),
        (Target::Python, String) => ("str", "get_string_value"),
        (Target::Python, Integer) => ("int", "get_integer_value"),
        (Target::Python, Float) => ("float", "get_float_value"),
        (Target::Python, Object) => ("dict", "get_object_value"),

        (Target::Csharp, Boolean) => ("bool", "GetBooleanValueAsync"),
        (Target::Csharp, String) => ("string", "GetStringValueAsync"),
        (Target::Csharp, Integer) => ("int", "GetIntegerValueAsync"),
        (Target::Csharp, Float) => ("double", "GetDoubleValueAsync"),
        (Target::Csharp, Object) => return None,

        (Target::Java, Boolean) => ("Boolean", "getBooleanValue"),
        (Target::Java, String) => ("String", "getStringValue"),
        (Target::Java, Integer) => ("Integer", "getIntegerValue"),
        (Target::Java, Float) => ("Double", "getDoubleValue"),
        (Target::Java, Object) => return None,
    };

    Some(TypeMapping { target, flag_type, native_type, method, casing: casing(target) })
}

/// Mapping for one manifest flag.
///
/// # Errors
/// * `Error::UnsupportedTypeError` naming the target and flag key
pub fn map_type(target: Target, flag: &FlagDefinition) -> Result<TypeMapping> {
    lookup(target, flag.flag_type()).ok_or_else(|| Error::UnsupportedTypeError {
        target,
        key: flag.key().to_string(),
        flag_type: flag.flag_type(),
    })
}

impl TypeMapping {
    /// Renders `default` as a literal of this mapping's native type.
    ///
    /// # Errors
    /// * `Error::RenderError` for integers the target type cannot hold
    pub fn default_literal(&self, key: &str, default: &FlagDefault) -> Result<String> {
        let literal = match default {
            FlagDefault::Boolean(b) => boolean_literal(self.target, *b).to_string(),
            FlagDefault::String(s) => string_literal(s),
            FlagDefault::Integer(i) => {
                self.check_integer_range(key, *i)?;
                i.to_string()
            }
            FlagDefault::Float(f) => float_literal(*f),
            FlagDefault::Object(map) => match self.target {
                Target::Go => go_value(&Value::Object(map.clone())),
                Target::Python => python_value(&Value::Object(map.clone())),
                _ => Value::Object(map.clone()).to_string(),
            },
        };
        Ok(literal)
    }

    fn check_integer_range(&self, key: &str, value: i64) -> Result<()> {
        let fits = match self.target {
            Target::Csharp | Target::Java => i32::try_from(value).is_ok(),
            Target::React | Target::Nodejs | Target::Nestjs => {
                (-MAX_SAFE_JS_INTEGER..=MAX_SAFE_JS_INTEGER).contains(&value)
            }
            Target::Go | Target::Python => true,
        };

        if fits {
            Ok(())
        } else {
            Err(Error::RenderError {
                target: self.target,
                message: format!(
                    "default value {value} of flag '{key}' does not fit in {}",
                    self.native_type
                ),
            })
        }
    }
}

fn boolean_literal(target: Target, value: bool) -> &'static str {
    match (target, value) {
        (Target::Python, true) => "True",
        (Target::Python, false) => "False",
        (_, true) => "true",
        (_, false) => "false",
    }
}

/// Double-quoted string literal. JSON escapes are valid string escapes in
/// every supported target language.
pub fn string_literal(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Always carries a decimal point or an exponent.
fn float_literal(value: f64) -> String {
    format!("{value:?}")
}

fn go_value(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(go_value).collect();
            format!("[]any{{{}}}", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string_literal(k), go_value(v)))
                .collect();
            format!("map[string]any{{{}}}", entries.join(", "))
        }
    }
}

fn python_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(b) => boolean_literal(Target::Python, *b).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(python_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string_literal(k), python_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Splits a description into doc-comment lines, neutralizing whatever would
/// end the comment early in `target`.
pub fn doc_lines(target: Target, text: Option<&str>) -> Vec<String> {
    comment_lines(text)
        .into_iter()
        .map(|line| match target {
            Target::Go => line,
            Target::React | Target::Nodejs | Target::Nestjs | Target::Java => {
                line.replace("*/", "*\\/")
            }
            Target::Csharp => line
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;"),
            Target::Python => line.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\""),
        })
        .collect()
}

/// Splits a description into line-comment lines. A line comment ends at the
/// newline, so the text is kept as written.
pub fn comment_lines(text: Option<&str>) -> Vec<String> {
    let Some(text) = text else {
        return Vec::new();
    };

    let lines: Vec<String> = text.trim().lines().map(|line| line.trim_end().to_string()).collect();
    if lines.iter().all(|line| line.is_empty()) {
        Vec::new()
    } else {
        lines
    }
}
