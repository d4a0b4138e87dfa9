//! Round trips between the JSON encoding and the rule tree.

use json_logic::{registry, LogicError, Rule};
use serde_json::{json, Value};

/// One representative rule per built-in tag.
fn fixtures() -> Vec<Value> {
    vec![
        json!({"var": ["a.b", 0]}),
        json!({"missing": ["a", "z"]}),
        json!({"missing_some": [1, ["a", "z"]]}),
        json!({"if": [{"var": "flag"}, "on", "off"]}),
        json!({"?:": [{"var": "flag"}, 1, 2]}),
        json!({"!": {"var": "flag"}}),
        json!({"!!": [{"var": "list"}]}),
        json!({"and": [true, {"var": "flag"}]}),
        json!({"or": [false, {"var": "n"}]}),
        json!({"==": [{"var": "n"}, "4"]}),
        json!({"!=": [{"var": "n"}, 4]}),
        json!({"===": [{"var": "n"}, 4]}),
        json!({"!==": [{"var": "n"}, 4]}),
        json!({"<": [1, {"var": "n"}, 10]}),
        json!({"<=": [{"var": "n"}, 4]}),
        json!({">": [{"var": "n"}, 3]}),
        json!({">=": [{"var": "n"}, 5]}),
        json!({"+": [{"var": "n"}, 1.5]}),
        json!({"-": [{"var": "n"}]}),
        json!({"*": [{"var": "n"}, 2]}),
        json!({"/": [{"var": "n"}, 8]}),
        json!({"%": [{"var": "n"}, 3]}),
        json!({"min": [{"var": "n"}, 2]}),
        json!({"max": [{"var": "list"}, 2]}),
        json!({"in": ["Spring", "Springfield"]}),
        json!({"in": [{"var": "n"}, [1, 4, 9]]}),
        json!({"merge": [{"var": "list"}, [7]]}),
        json!({"map": [{"var": "list"}, {"*": [{"var": ""}, 10]}]}),
        json!({"filter": [{"var": "list"}, {">": [{"var": ""}, 1]}]}),
        json!({"reduce": [{"var": "list"}, {"+": [{"var": "current"}, {"var": "accumulator"}]}, 0]}),
        json!({"all": [{"var": "list"}, {">": [{"var": ""}, 0]}]}),
        json!({"some": [{"var": "list"}, {"==": [{"var": ""}, 2]}]}),
        json!({"none": [{"var": "list"}, {"==": [{"var": ""}, 2]}]}),
        json!({"cat": ["n=", {"var": "n"}]}),
        json!({"substr": ["Springfield", 0, 6]}),
    ]
}

fn inputs() -> Vec<Value> {
    vec![
        json!({"a": {"b": 1}, "flag": true, "n": 4, "list": [1, 2, 3]}),
        json!({"flag": false, "n": "4", "list": []}),
        json!({"n": 0}),
    ]
}

fn outcome(rule: &Rule, data: &Value) -> Result<Value, String> {
    rule.evaluate(data).map_err(|e| e.to_string())
}

#[test]
fn every_builtin_tag_has_a_fixture() {
    let covered: Vec<String> = fixtures()
        .iter()
        .filter_map(|f| f.as_object().and_then(|m| m.keys().next().cloned()))
        .collect();
    for tag in registry().unwrap().tags() {
        assert!(covered.iter().any(|c| c == tag), "no fixture for {}", tag);
    }
}

#[test]
fn write_then_read_evaluates_identically() {
    for fixture in fixtures() {
        let rule = Rule::from_value(&fixture).unwrap();
        let reread = Rule::from_value(&rule.to_value()).unwrap();
        for data in inputs() {
            assert_eq!(
                outcome(&rule, &data),
                outcome(&reread, &data),
                "fixture {} on {}",
                fixture,
                data
            );
        }
    }
}

#[test]
fn read_then_write_preserves_structure() {
    for fixture in fixtures() {
        let written = Rule::from_value(&fixture).unwrap().to_value();
        let (tag, operands) = fixture.as_object().unwrap().iter().next().unwrap();
        let (written_tag, written_operands) = written.as_object().unwrap().iter().next().unwrap();
        assert_eq!(tag, written_tag);

        let count = |v: &Value| v.as_array().map_or(1, Vec::len);
        assert_eq!(count(operands), count(written_operands), "fixture {}", fixture);
    }
}

#[test]
fn constructed_rules_round_trip() {
    let rule = Rule::operation(
        "in",
        vec![
            Rule::operation("var", vec![Rule::literal("season")]).unwrap(),
            Rule::literal(json!(["Spring", "Summer"])),
        ],
    )
    .unwrap();
    let encoded = rule.to_value();
    assert_eq!(encoded, json!({"in": [{"var": "season"}, ["Spring", "Summer"]]}));

    let decoded = Rule::from_value(&encoded).unwrap();
    for season in ["Spring", "Winter"] {
        let data = json!({ "season": season });
        assert_eq!(rule.evaluate(&data).unwrap(), decoded.evaluate(&data).unwrap());
    }
}

#[test]
fn single_array_operand_stays_wrapped() {
    let rule = Rule::operation("merge", vec![Rule::literal(json!([1, 2]))]).unwrap();
    let encoded = rule.to_value();
    assert_eq!(encoded, json!({"merge": [[1, 2]]}));
    let decoded = Rule::from_value(&encoded).unwrap();
    assert_eq!(decoded.evaluate(&json!(null)).unwrap(), json!([1, 2]));
}

#[test]
fn serde_integration() {
    #[derive(serde::Deserialize, serde::Serialize)]
    struct Policy {
        name: String,
        rule: Rule,
    }

    let policy: Policy = serde_json::from_value(json!({
        "name": "spring-only",
        "rule": {"in": [{"var": "season"}, ["Spring"]]}
    }))
    .unwrap();
    assert_eq!(policy.rule.evaluate(&json!({"season": "Spring"})).unwrap(), json!(true));

    let written = serde_json::to_value(&policy).unwrap();
    assert_eq!(written["rule"], json!({"in": [{"var": "season"}, ["Spring"]]}));

    let err = serde_json::from_value::<Policy>(json!({"name": "x", "rule": {"in": [1]}}))
        .err()
        .unwrap();
    assert!(err.to_string().contains("\"in\" operator expects exactly 2 operands."));
}

#[test]
fn malformed_text_is_a_json_error() {
    let err = registry().unwrap().parse_str("{\"in\": [").unwrap_err();
    assert!(matches!(err, LogicError::Json(_)));
}
