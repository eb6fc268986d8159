use openfeature_codegen::error::Error;
use openfeature_codegen::manifest::{FlagDefault, FlagType};
use openfeature_codegen::mapping::{casing, identifier, lookup, string_literal, CasingRule};
use openfeature_codegen::target::Target;
use serde_json::json;

fn object(value: serde_json::Value) -> FlagDefault {
    match value {
        serde_json::Value::Object(map) => FlagDefault::Object(map),
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn test_casing_per_target() {
    assert_eq!(casing(Target::Go), CasingRule::UpperCamel);
    assert_eq!(casing(Target::Nodejs), CasingRule::LowerCamel);
    assert_eq!(casing(Target::Python), CasingRule::Snake);

    assert_eq!(identifier(Target::Go, "new-ui").unwrap(), "NewUi");
    assert_eq!(identifier(Target::Nodejs, "new-ui").unwrap(), "newUi");
    assert_eq!(identifier(Target::Python, "new-ui").unwrap(), "new_ui");
    assert_eq!(identifier(Target::Csharp, "new_ui").unwrap(), "NewUi");
}

#[test]
fn test_key_without_identifier_characters() {
    match identifier(Target::Java, "--") {
        Err(Error::RenderError { target, message }) => {
            assert_eq!(target, Target::Java);
            assert!(message.contains("'--'"));
        }
        other => panic!("Expected RenderError, got {other:?}"),
    }
}

#[test]
fn test_native_types() {
    let cases = [
        (Target::Go, FlagType::Integer, "int64", "IntValue"),
        (Target::Go, FlagType::Float, "float64", "FloatValue"),
        (Target::React, FlagType::Boolean, "boolean", "useFlag"),
        (Target::Nodejs, FlagType::Float, "number", "getNumberValue"),
        (Target::Nestjs, FlagType::String, "string", "StringFeatureFlag"),
        (Target::Python, FlagType::Object, "dict", "get_object_value"),
        (Target::Csharp, FlagType::Float, "double", "GetDoubleValueAsync"),
        (Target::Java, FlagType::Integer, "Integer", "getIntegerValue"),
    ];

    for (target, flag_type, native_type, method) in cases {
        let mapping = lookup(target, flag_type).unwrap();
        assert_eq!(mapping.native_type, native_type, "{target} {flag_type}");
        assert_eq!(mapping.method, method, "{target} {flag_type}");
        assert_eq!(mapping.casing, casing(target));
    }
}

#[test]
fn test_every_scalar_type_is_supported_everywhere() {
    for target in Target::ALL {
        for flag_type in [FlagType::Boolean, FlagType::String, FlagType::Integer, FlagType::Float] {
            assert!(lookup(target, flag_type).is_some(), "{target} should map {flag_type}");
        }
    }
}

#[test]
fn test_boolean_literals() {
    let python = lookup(Target::Python, FlagType::Boolean).unwrap();
    assert_eq!(python.default_literal("f", &FlagDefault::Boolean(true)).unwrap(), "True");

    let go = lookup(Target::Go, FlagType::Boolean).unwrap();
    assert_eq!(go.default_literal("f", &FlagDefault::Boolean(false)).unwrap(), "false");
}

#[test]
fn test_string_literals_are_escaped() {
    assert_eq!(string_literal("plain"), "\"plain\"");
    assert_eq!(string_literal("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
}

#[test]
fn test_float_literals_keep_a_decimal_point() {
    let java = lookup(Target::Java, FlagType::Float).unwrap();
    assert_eq!(java.default_literal("f", &FlagDefault::Float(3.0)).unwrap(), "3.0");
    assert_eq!(java.default_literal("f", &FlagDefault::Float(0.15)).unwrap(), "0.15");
}

#[test]
fn test_integer_range_is_checked() {
    let java = lookup(Target::Java, FlagType::Integer).unwrap();
    assert!(matches!(
        java.default_literal("big", &FlagDefault::Integer(3_000_000_000)),
        Err(Error::RenderError { target: Target::Java, .. })
    ));

    let nodejs = lookup(Target::Nodejs, FlagType::Integer).unwrap();
    assert!(nodejs.default_literal("big", &FlagDefault::Integer(i64::MAX)).is_err());
    assert_eq!(nodejs.default_literal("ok", &FlagDefault::Integer(-42)).unwrap(), "-42");

    let go = lookup(Target::Go, FlagType::Integer).unwrap();
    assert_eq!(
        go.default_literal("big", &FlagDefault::Integer(3_000_000_000)).unwrap(),
        "3000000000"
    );
}

#[test]
fn test_object_literals() {
    let default = object(json!({"color": "red", "sizes": [1, true, null]}));

    let go = lookup(Target::Go, FlagType::Object).unwrap();
    assert_eq!(
        go.default_literal("theme", &default).unwrap(),
        r#"map[string]any{"color": "red", "sizes": []any{1, true, nil}}"#
    );

    let python = lookup(Target::Python, FlagType::Object).unwrap();
    assert_eq!(
        python.default_literal("theme", &default).unwrap(),
        r#"{"color": "red", "sizes": [1, True, None]}"#
    );

    let react = lookup(Target::React, FlagType::Object).unwrap();
    assert_eq!(
        react.default_literal("theme", &default).unwrap(),
        r#"{"color":"red","sizes":[1,true,null]}"#
    );
}
