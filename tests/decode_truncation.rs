use phpser::decode;
use rstest::rstest;
use serde_json::{json, Value as Json};

#[rstest]
// Cut inside a string's content: the partial leaf stays in the tree.
#[case(r#"a:1:{s:3:"fo"#, json!({}))]
#[case(r#"a:2:{s:3:"foo";s:3:"ba"#, json!({"foo": "ba"}))]
// Cut on the terminator itself: the content is intact.
#[case(r#"a:2:{s:1:"k";s:3:"foo"#, json!({"k": "foo"}))]
#[case(r#"a:2:{s:1:"k";s:3:"foo""#, json!({"k": "foo"}))]
// Cut inside the structure.
#[case(r#"a:1:{"#, json!({}))]
#[case(r#"a:1"#, json!({}))]
#[case(r#"a"#, json!({}))]
#[case(r#"a:2:{s:1:"k";i:42"#, json!({"k": 42}))]
// Cut inside the length field: the leaf seals empty but still pairs.
#[case(r#"a:2:{s:1:"k";s:3"#, json!({"k": ""}))]
fn truncated_input_returns_partial_tree(#[case] input: &str, #[case] expected: Json) {
    let decoded = decode(input).unwrap();
    assert!(decoded.truncated);
    assert_eq!(decoded.value.to_json(), expected);
}

#[rstest]
fn truncation_inside_nested_array() {
    let decoded = decode(r#"a:1:{a:2:{s:1:"x";i:9;"#).unwrap();
    assert!(decoded.truncated);
    assert_eq!(decoded.value.to_json(), json!({"array0": {"x": 9}}));
}

#[rstest]
fn complete_input_is_not_truncated() {
    assert!(!decode(r#"a:1:{s:1:"k";i:1;}"#).unwrap().truncated);
    assert!(!decode("").unwrap().truncated);
}
