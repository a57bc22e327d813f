use smol_str::SmolStr;

use crate::constants::ANOMALY_TEXT;
use crate::decode::tree::{Content, Node, NodeId, NodeKind, Tree};
use crate::value::{Map, Value};

/// Folds a finished (or truncated) tree into an ordered map.
///
/// Children pair up positionally, left to right: a scalar met with no key
/// pending becomes the pending key; the next child becomes its value. An
/// array met while a key is pending becomes that key's nested map; an
/// array met with no key pending lands under a synthetic `array0`,
/// `array1`, … key. A trailing key with no value is dropped.
pub(crate) fn flatten(tree: &Tree, root: NodeId) -> Map {
    flatten_array(tree, root)
}

fn flatten_array(tree: &Tree, id: NodeId) -> Map {
    let mut map = Map::new();
    let mut pending: Option<SmolStr> = None;
    let mut array_index = 0usize;
    for &child in &tree.node(id).children {
        let node = tree.node(child);
        match pending.take() {
            Some(key) => {
                let value = match node.kind {
                    NodeKind::Array => Value::Map(flatten_array(tree, child)),
                    _ => leaf_value(node),
                };
                // Re-inserting keeps the first occurrence's position and
                // takes the later value.
                map.insert(key, value);
            }
            None if node.kind == NodeKind::Array => {
                let key = SmolStr::new(format!("array{array_index}"));
                array_index += 1;
                map.insert(key, Value::Map(flatten_array(tree, child)));
            }
            None => pending = Some(key_text(node)),
        }
    }
    map
}

fn leaf_value(node: &Node) -> Value {
    match &node.content {
        Content::Int(value) => Value::Int(*value),
        Content::Text(text) => Value::Str(text.clone()),
        Content::Anomaly(raw) => Value::Anomaly(raw.clone()),
        Content::Pending => Value::Str(String::new()),
    }
}

/// A leaf used in key position is coerced to text.
fn key_text(node: &Node) -> SmolStr {
    match &node.content {
        Content::Int(value) => SmolStr::new(value.to_string()),
        Content::Text(text) => SmolStr::new(text),
        Content::Anomaly(_) => SmolStr::new_static(ANOMALY_TEXT),
        Content::Pending => SmolStr::default(),
    }
}
