use serde_json::Value;

use crate::constants::PAYLOAD_LIST_KEYS;

/// Classification of a raw treasury payload, decided once before
/// dispatch. Replaces repeated ad hoc type checks with a single tagged
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// An object carrying a list under one of the known keys.
    ListUnderKnownKey(&'static str),
    /// The payload itself is a list.
    BareList,
    /// Anything else: treated as a single record.
    SingleObject,
}

impl PayloadShape {
    /// Classify a payload. The known-key scan runs in fixed priority
    /// order; the first key bound to a list wins even when several are
    /// present. A known key bound to a non-list does not count.
    pub fn classify(payload: &Value) -> Self {
        if let Value::Object(map) = payload {
            for key in PAYLOAD_LIST_KEYS {
                if map.get(*key).map(Value::is_array).unwrap_or(false) {
                    return PayloadShape::ListUnderKnownKey(key);
                }
            }
        }

        if payload.is_array() {
            return PayloadShape::BareList;
        }

        PayloadShape::SingleObject
    }
}
