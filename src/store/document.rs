// Tree operations over a JSON document, shared by the store backends.
use serde_json::{Map, Value};
use crate::errors::{StoreError, StoreResult};

pub fn get_at<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
        .filter(|node| !node.is_null())
}

/// Overwrites the node at `segments`. Writing `null` or `{}` deletes it.
pub fn set_at(root: &mut Value, segments: &[String], value: Value) -> StoreResult<()> {
    let slot = slot_mut(root, segments)?;
    *slot = value;
    prune(root);
    Ok(())
}

/// Merges `fields` into the object at `segments`, creating it if needed.
pub fn merge_at(root: &mut Value, segments: &[String], fields: Map<String, Value>) -> StoreResult<()> {
    let slot = slot_mut(root, segments)?;
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    let object = slot
        .as_object_mut()
        .ok_or_else(|| StoreError::NotAnObject(segments.join("/")))?;
    object.extend(fields);
    prune(root);
    Ok(())
}

fn slot_mut<'a>(root: &'a mut Value, segments: &[String]) -> StoreResult<&'a mut Value> {
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidPath(segments.join("/")));
    }

    let mut node = root;
    for (depth, segment) in segments.iter().enumerate() {
        if node.is_null() {
            *node = Value::Object(Map::new());
        }
        let object = match node {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject(segments[..depth].join("/"))),
        };
        node = object.entry(segment.clone()).or_insert(Value::Null);
    }
    Ok(node)
}

// Drops null leaves and empty containers. Returns true when `node` itself is empty.
fn prune(node: &mut Value) -> bool {
    match node {
        Value::Object(map) => {
            map.retain(|_, child| !prune(child));
            map.is_empty()
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                prune(item);
            }
            items.is_empty()
        }
        Value::Null => true,
        _ => false,
    }
}
