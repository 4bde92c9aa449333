use crate::{Error, Result};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct DiffmarkConfig(Value);

impl Default for DiffmarkConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl DiffmarkConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a JSON config document. The root must be an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|err| Error::InvalidConfigJson {
            message: err.to_string(),
        })?;
        if !value.is_object() {
            return Err(Error::InvalidConfigJson {
                message: "config root must be a JSON object".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_u64(&self, dotted_path: &str) -> Option<u64> {
        self.get(dotted_path)?.as_u64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Callers can construct `DiffmarkConfig` from any JSON value via `from_value`. Configs
        // are objects; coerce anything else to an object so this API never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    /// Reads a string value, rejecting present-but-non-string values.
    pub fn require_str(&self, dotted_path: &str) -> Result<Option<&str>> {
        match self.get(dotted_path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(Error::InvalidConfig {
                key: dotted_path.to_string(),
                message: format!("expected a string, got {other}"),
            }),
        }
    }
}

/// Built-in defaults. Site configs are deep-merged on top of this.
pub fn default_site_config() -> DiffmarkConfig {
    DiffmarkConfig(json!({
        "document": {
            "lang": "ja",
            "faviconGlyph": "\u{1F4DD}",
            "containerId": "diff-container",
            "width": "600px",
            "fontFamily": "\"HackGen\"",
            "fontSize": "16px"
        },
        "diff": {
            "algorithm": "myers",
            "cleanup": "semanticLossless",
            "timeoutMs": 0
        }
    }))
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
