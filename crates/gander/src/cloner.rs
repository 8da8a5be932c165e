use gander_types::{Resource, Value, ValueEntry};

/// Limits applied when cloning a resource value.
///
/// Both limits default to zero: no payload data is captured, only structure
/// and original lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClonerOptions {
    /// How many leading bytes of each binary payload are captured.
    pub buffer_length: usize,

    /// How many leading characters of each string are captured.
    pub string_length: usize,
}

/// Produces size-limited deep copies of resource values.
///
/// The clone preserves structure and scalar leaves; binary and textual
/// payloads are truncated to the configured limits at every nesting level,
/// with the original length recorded alongside the captured prefix.
#[derive(Debug, Clone, Copy)]
pub struct Cloner {
    options: ClonerOptions,
}

impl Cloner {
    pub fn new(options: ClonerOptions) -> Self {
        Self { options }
    }

    /// Clones a resource value under the configured limits.
    ///
    /// Never fails: functions are reduced to their declaration-site
    /// metadata, everything else is copied structurally.
    pub fn clone_resource(&self, resource: &Resource) -> Value {
        match resource {
            Resource::Null => Value::Null,
            Resource::Bool(b) => Value::Bool(*b),
            Resource::Int(n) => Value::Int(*n),
            Resource::Float(x) => Value::Float(*x),
            Resource::Text(text) => Value::Text {
                // Character-counted, so the prefix never splits a code point.
                data: text.chars().take(self.options.string_length).collect(),
                len: text.chars().count(),
            },
            Resource::Bytes(bytes) => Value::Bytes {
                data: bytes[..bytes.len().min(self.options.buffer_length)].to_vec(),
                len: bytes.len(),
            },
            Resource::Seq(items) => {
                Value::Seq(items.iter().map(|item| self.clone_resource(item)).collect())
            }
            Resource::Map(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(key, value)| ValueEntry {
                        key: key.clone(),
                        value: self.clone_resource(value),
                    })
                    .collect(),
            ),
            Resource::Function(function) => Value::Function(function.origin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gander_types::{FunctionOrigin, LiveFunction};

    fn cloner(buffer_length: usize, string_length: usize) -> Cloner {
        Cloner::new(ClonerOptions {
            buffer_length,
            string_length,
        })
    }

    #[test]
    fn truncates_bytes_and_records_original_len() {
        let cloned = cloner(10, 0).clone_resource(&Resource::bytes(vec![7u8; 1000]));
        let Value::Bytes { data, len } = cloned else {
            panic!("expected bytes, got {cloned:?}");
        };
        assert_eq!(data.len(), 10);
        assert_eq!(data, vec![7u8; 10]);
        assert_eq!(len, 1000);
    }

    #[test]
    fn truncates_text_and_records_original_len() {
        let cloned = cloner(0, 5).clone_resource(&Resource::text("hello world"));
        assert_eq!(
            cloned,
            Value::Text {
                data: "hello".to_string(),
                len: 11,
            }
        );
    }

    #[test]
    fn text_limit_counts_characters_not_bytes() {
        let cloned = cloner(0, 2).clone_resource(&Resource::text("日本語テキスト"));
        assert_eq!(
            cloned,
            Value::Text {
                data: "日本".to_string(),
                len: 7,
            }
        );
    }

    #[test]
    fn default_limits_capture_no_payload() {
        let cloner = Cloner::new(ClonerOptions::default());
        assert_eq!(
            cloner.clone_resource(&Resource::bytes([1, 2, 3])),
            Value::Bytes {
                data: Vec::new(),
                len: 3,
            }
        );
        assert_eq!(
            cloner.clone_resource(&Resource::text("abc")),
            Value::Text {
                data: String::new(),
                len: 3,
            }
        );
    }

    #[test]
    fn limit_longer_than_payload_captures_all_of_it() {
        let cloned = cloner(64, 64).clone_resource(&Resource::bytes([1, 2]));
        assert_eq!(
            cloned,
            Value::Bytes {
                data: vec![1, 2],
                len: 2,
            }
        );
    }

    #[test]
    fn null_passes_through() {
        assert_eq!(cloner(10, 10).clone_resource(&Resource::Null), Value::Null);
    }

    #[test]
    fn scalars_copy_by_value() {
        let cloner = Cloner::new(ClonerOptions::default());
        assert_eq!(cloner.clone_resource(&Resource::Bool(true)), Value::Bool(true));
        assert_eq!(cloner.clone_resource(&Resource::Int(-3)), Value::Int(-3));
        assert_eq!(cloner.clone_resource(&Resource::Float(1.5)), Value::Float(1.5));
    }

    #[test]
    fn limits_apply_at_every_nesting_level() {
        let resource = Resource::map([
            ("outer", Resource::text("hello world")),
            (
                "nested",
                Resource::Seq(vec![Resource::bytes(vec![9u8; 100]), Resource::text("goodbye")]),
            ),
        ]);

        let cloned = cloner(4, 5).clone_resource(&resource);
        let Value::Map(entries) = cloned else {
            panic!("expected map, got {cloned:?}");
        };
        assert_eq!(
            entries[0].value,
            Value::Text {
                data: "hello".to_string(),
                len: 11,
            }
        );
        let Value::Seq(items) = &entries[1].value else {
            panic!("expected seq");
        };
        assert_eq!(
            items[0],
            Value::Bytes {
                data: vec![9u8; 4],
                len: 100,
            }
        );
        assert_eq!(
            items[1],
            Value::Text {
                data: "goodb".to_string(),
                len: 7,
            }
        );
    }

    #[test]
    fn map_order_is_preserved() {
        let resource = Resource::map([
            ("z", Resource::Int(1)),
            ("a", Resource::Int(2)),
            ("m", Resource::Int(3)),
        ]);
        let Value::Map(entries) = cloner(0, 0).clone_resource(&resource) else {
            panic!("expected map");
        };
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn functions_reduce_to_their_origin() {
        let origin = FunctionOrigin::new("/srv/app/server.rs", 25, 21, "onconnection");
        let resource = Resource::Function(LiveFunction::new(origin.clone()));
        assert_eq!(cloner(0, 0).clone_resource(&resource), Value::Function(origin));
    }
}
