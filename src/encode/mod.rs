use crate::constants::{
    ANOMALY_TEXT, CLOSE_BRACE, FIELD_SEP, OPEN_BRACE, QUOTE, TAG_ARRAY, TAG_INT, TAG_STRING,
    TERMINATOR,
};
use crate::value::{Map, Value};

/// Writes a value back out in the wire grammar.
///
/// Maps become arrays of alternating key and value entries, so the entry
/// count is twice the pair count. String lengths count characters, and
/// content is written raw — the grammar has no escaping, which is exactly
/// why the decoder leans on declared lengths. Anomaly placeholders are
/// written as their placeholder text.
///
/// # Examples
/// ```
/// use phpser::{decode, encode, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("foo".into(), Value::from("bar"));
/// let blob = encode(&Value::from(map));
/// assert_eq!(blob, "a:2:{s:3:\"foo\";s:3:\"bar\";}");
/// let decoded = decode(&blob)?;
/// assert_eq!(decoded.value.get("foo").and_then(|v| v.as_str()), Some("bar"));
/// # Ok::<(), phpser::Error>(())
/// ```
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Int(value) => write_int(out, *value),
        Value::Str(text) => write_str(out, text),
        Value::Anomaly(_) => write_str(out, ANOMALY_TEXT),
        Value::Map(map) => write_map(out, map),
    }
}

fn write_map(out: &mut String, map: &Map) {
    let mut count = itoa::Buffer::new();
    out.push(TAG_ARRAY);
    out.push(FIELD_SEP);
    out.push_str(count.format(map.len() * 2));
    out.push(FIELD_SEP);
    out.push(OPEN_BRACE);
    for (key, value) in map {
        write_str(out, key);
        write_value(out, value);
    }
    out.push(CLOSE_BRACE);
}

fn write_str(out: &mut String, text: &str) {
    let mut length = itoa::Buffer::new();
    out.push(TAG_STRING);
    out.push(FIELD_SEP);
    out.push_str(length.format(text.chars().count()));
    out.push(FIELD_SEP);
    out.push(QUOTE);
    out.push_str(text);
    out.push(QUOTE);
    out.push(TERMINATOR);
}

fn write_int(out: &mut String, value: i64) {
    let mut digits = itoa::Buffer::new();
    out.push(TAG_INT);
    out.push(FIELD_SEP);
    out.push_str(digits.format(value));
    out.push(TERMINATOR);
}
