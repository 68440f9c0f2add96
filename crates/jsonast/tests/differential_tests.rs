/// Differential Tests against serde_json
///
/// For valid documents without duplicate names and without integers outside
/// `i64`, the tree built here must agree with serde_json's reading of the same
/// text. Fractional numbers are compared as `f64` with a relative tolerance.
use jsonast::{parse, Number, Value};
use serde_json::Value as Reference;

fn assert_agree(json: &str) {
    let ours = parse(json).unwrap_or_else(|e| panic!("jsonast rejected {json:?}: {e}"));
    let theirs: Reference =
        serde_json::from_str(json).unwrap_or_else(|e| panic!("serde_json rejected {json:?}: {e}"));
    if let Err(path) = compare(&ours, &theirs, "$") {
        panic!("trees differ at {path}\n  input: {json}\n  ours: {ours:?}\n  theirs: {theirs:?}");
    }
}

fn compare(ours: &Value, theirs: &Reference, path: &str) -> Result<(), String> {
    let same = match (ours, theirs) {
        (Value::Null, Reference::Null) => true,
        (Value::Boolean(a), Reference::Bool(b)) => a == b,
        (Value::String(a), Reference::String(b)) => a == b,
        (Value::Number(Number::Integer(a)), Reference::Number(b)) => b.as_i64() == Some(*a),
        (Value::Number(Number::Decimal(a)), Reference::Number(b)) => {
            match (a.to_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y || ((x - y) / y).abs() < 1e-12,
                _ => false,
            }
        }
        (Value::Array(a), Reference::Array(b)) => {
            if a.len() != b.len() {
                return Err(format!("{path} (length)"));
            }
            for (i, (x, y)) in a.iter().zip(b).enumerate() {
                compare(x, y, &format!("{path}[{i}]"))?;
            }
            true
        }
        (Value::Object(a), Reference::Object(b)) => {
            if a.len() != b.len() {
                return Err(format!("{path} (member count)"));
            }
            for member in a {
                let Some(y) = b.get(member.name()) else {
                    return Err(format!("{path}.{} (missing)", member.name()));
                };
                compare(member.value(), y, &format!("{path}.{}", member.name()))?;
            }
            true
        }
        _ => false,
    };
    if same {
        Ok(())
    } else {
        Err(path.to_string())
    }
}

// ============================================================================
// Reading the same text
// ============================================================================

#[test]
fn simple_documents() {
    assert_agree("[]");
    assert_agree("{}");
    assert_agree("[null, true, false]");
    assert_agree(r#"{"a": 1, "b": [2, 3], "c": {"d": "e"}}"#);
}

#[test]
fn numbers() {
    assert_agree("[0, 1, -1, 9223372036854775807, -9223372036854775808]");
    assert_agree("[0.5, -0.25, 3.141592653589793, 1e10, 1E-10, 6.022e+23, -2.5e-3]");
    assert_agree("[123.01, 0.1, 100.0, 1.7976931348623157e308]");
}

#[test]
fn strings_and_escapes() {
    assert_agree(r#"["", "plain", "q\"uote", "back\\slash", "sl\/ash"]"#);
    assert_agree(r#"["\b\f\n\r\t"]"#);
    assert_agree(r#"["\u0041\u00e9\u4E2D", "\ud83d\ude00", "\u2028\u2029"]"#);
    assert_agree("[\"caf\u{e9} \u{4e2d}\u{6587} \u{1f600}\"]");
}

#[test]
fn nested_structures() {
    assert_agree(
        r#"{
            "users": [
                {"id": 1, "name": "Alice", "tags": ["admin"], "score": 9.5},
                {"id": 2, "name": "Bob", "tags": [], "score": null}
            ],
            "meta": {"page": {"size": 20, "next": null}, "ok": true}
        }"#,
    );
    assert_agree("[[[[[[[[[[1]]]]]]]]]]");
}

// ============================================================================
// Reading each other's output
// ============================================================================

#[test]
fn serde_json_reads_our_output() {
    let json = r#"{"name":"caf\u00e9","n":[1,2.50,-3e2],"x":{"y":[true,null]},"e":"\ud83d\ude00"}"#;
    let ours = parse(json).unwrap();
    for pretty in [false, true] {
        let text = ours.stringify(pretty);
        let theirs: Reference = serde_json::from_str(&text).unwrap();
        compare(&ours, &theirs, "$").unwrap();
    }
}

#[test]
fn we_read_serde_json_output() {
    let reference = serde_json::json!({
        "text": "line\nbreak \u{e9} \u{1f600}",
        "list": [1, -2, 0.5, true, null],
        "nested": {"empty": {}, "arr": [[]]}
    });
    for text in [
        serde_json::to_string(&reference).unwrap(),
        serde_json::to_string_pretty(&reference).unwrap(),
    ] {
        let ours = parse(&text).unwrap();
        compare(&ours, &reference, "$").unwrap();
    }
}
