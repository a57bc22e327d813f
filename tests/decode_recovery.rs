use phpser::{decode, decode_to_json, decode_with_options, DecodeOptions, Error, Resync, Value};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn forward_resync_keeps_the_extra_characters() {
    // Declared 3, real content 5: the terminator sits 2 past the
    // declared extent, inside the tolerance window.
    let decoded = decode(r#"a:2:{s:1:"k";s:3:"hello";}"#).unwrap();

    assert_eq!(decoded.value.to_json(), json!({"k": "hello"}));
    assert!(!decoded.truncated);
    assert_eq!(decoded.anomaly_count(), 0);
    assert_eq!(decoded.notes.len(), 1);

    let note = &decoded.notes[0];
    assert_eq!(note.resync, Resync::Forward { extra: 2 });
    assert_eq!(note.offset, 13);
    assert_eq!(note.raw.as_deref(), Some(r#"s:3:"hello";"#));
}

#[rstest]
fn consecutive_drifted_strings_each_resync() {
    let decoded = decode(r#"a:4:{s:1:"a";s:2:"xyz";s:1:"b";s:1:"qr";}"#).unwrap();

    assert_eq!(decoded.value.to_json(), json!({"a": "xyz", "b": "qr"}));
    assert_eq!(decoded.notes.len(), 2);
    assert_eq!(decoded.notes[0].resync, Resync::Forward { extra: 1 });
    assert_eq!(decoded.notes[1].resync, Resync::Forward { extra: 1 });
}

#[rstest]
fn backward_resync_salvages_the_following_elements() {
    // Declared 9 overshoots the real terminator by 4 characters, into
    // the next element. The leaf is lost to the placeholder, the cursor
    // rewinds, and the rest of the array still decodes.
    let decoded = decode(r#"a:4:{s:1:"k";s:9:"foo";s:1:"x";i:5;}"#).unwrap();
    let map = decoded.value.as_map().unwrap();

    assert!(map.get("k").unwrap().is_anomaly());
    assert_eq!(map.get("x").and_then(Value::as_i64), Some(5));
    assert!(!decoded.truncated);
    assert_eq!(decoded.anomaly_count(), 1);

    let note = &decoded.notes[0];
    assert_eq!(note.resync, Resync::Backward { overshoot: 4 });
    assert_eq!(note.offset, 13);
}

#[rstest]
fn backward_resync_keeps_the_offending_region() {
    let decoded = decode(r#"a:4:{s:1:"k";s:9:"foo";s:1:"x";i:5;}"#).unwrap();

    match decoded.value.get("k").unwrap() {
        Value::Anomaly(raw) => assert_eq!(raw, r#"foo";s:1:"#),
        other => panic!("expected anomaly, got {other:?}"),
    }
}

#[rstest]
fn unresolved_leaf_becomes_placeholder_without_aborting() {
    // No terminator ahead within the window and none inside the content.
    let decoded = decode(r#"a:2:{s:1:"k";s:5:"abcdeXY}"#).unwrap();
    let map = decoded.value.as_map().unwrap();

    assert!(map.get("k").unwrap().is_anomaly());
    assert!(!decoded.truncated);
    assert_eq!(decoded.notes[0].resync, Resync::Unresolved);
}

#[rstest]
fn integer_overflow_degrades_to_placeholder() {
    let decoded = decode(r#"a:2:{s:1:"k";i:99999999999999999999;}"#).unwrap();

    assert!(decoded.value.get("k").unwrap().is_anomaly());
    assert_eq!(decoded.notes[0].resync, Resync::Unresolved);
    assert_eq!(
        decoded.notes[0].raw.as_deref(),
        Some("i:99999999999999999999;")
    );
}

#[rstest]
fn integer_garbage_degrades_to_placeholder() {
    let decoded = decode(r#"a:2:{s:1:"k";i:4x2;}"#).unwrap();

    match decoded.value.get("k").unwrap() {
        Value::Anomaly(raw) => assert_eq!(raw, "4x2"),
        other => panic!("expected anomaly, got {other:?}"),
    }
}

#[rstest]
fn resync_window_bounds_the_forward_search() {
    // The real terminator sits 12 characters past the declared extent.
    let input = r#"a:2:{s:1:"k";s:3:"abcdefghijklmno";}"#;

    // Out of reach of the default window: the leaf is given up and the
    // cursor lands in the middle of the content, which then reads as an
    // unknown tag. Documented lenient-then-fatal behavior.
    let err = decode(input).unwrap_err();
    assert!(matches!(err, Error::UnknownTag { tag: 'f', .. }));

    // A wider window recovers the full content.
    let options = DecodeOptions::new().with_resync_window(15);
    let decoded = decode_with_options(input, &options).unwrap();
    assert_eq!(decoded.value.to_json(), json!({"k": "abcdefghijklmno"}));
    assert_eq!(decoded.notes[0].resync, Resync::Forward { extra: 12 });
}

#[rstest]
fn keep_raw_off_drops_note_payloads() {
    let options = DecodeOptions::new().with_keep_raw(false);
    let decoded = decode_with_options(r#"a:2:{s:1:"k";s:3:"hello";}"#, &options).unwrap();

    assert_eq!(decoded.notes.len(), 1);
    assert!(decoded.notes[0].raw.is_none());
}

#[rstest]
fn placeholder_serializes_as_its_text() {
    let json = decode_to_json(r#"a:2:{s:1:"k";s:5:"abcdeXY}"#).unwrap();
    assert_eq!(json, json!({"k": "ERROR PARSING"}));
}

#[rstest]
fn clean_decode_reports_clean() {
    let decoded = decode(r#"a:2:{s:1:"k";i:1;}"#).unwrap();
    assert!(decoded.is_clean());
    assert_eq!(decoded.anomaly_count(), 0);
}
