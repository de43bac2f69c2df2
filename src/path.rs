use serde_json::{Map, Value};

/// Reads the value at a dot-separated path inside a node data document.
///
/// Returns `None` as soon as any intermediate segment is missing or is not
/// an object. Paths are plain dot-separated identifiers; array elements are
/// not addressable (arrays are read and written as whole values).
pub fn get<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Writes `value` at a dot-separated path, mutating `record` in place.
///
/// Every absent (or non-object) intermediate segment is replaced with an
/// empty object before descending. Callers that need immutability must
/// operate on their own copy.
pub fn set(record: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, intermediate)) = segments.split_last() else {
        return;
    };

    let mut current = record;
    for segment in intermediate {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        if let Value::Object(map) = current {
            current = map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }

    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Value::Object(map) = current {
        map.insert((*last).to_string(), value);
    }
}
