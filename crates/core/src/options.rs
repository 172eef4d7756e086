//! Serializer configuration.

use serde::{Deserialize, Serialize};

/// Options controlling IR generation. Every field has a default, so a
/// partial table deserializes cleanly. Rendering style is chosen separately
/// when the document is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IrOptions {
    /// Deepest expression/term/task nesting serialized before the subtree is
    /// replaced by an error node.
    pub max_depth: usize,
    /// Drop the leading `!` JSHOP-style primitive task names carry.
    pub strip_task_bang: bool,
}

impl Default for IrOptions {
    fn default() -> Self {
        IrOptions {
            max_depth: 256,
            strip_task_bang: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let options: IrOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(options.max_depth, 8);
        assert!(options.strip_task_bang);
        assert!(serde_json::from_str::<IrOptions>(r#"{"pretty": true}"#).is_err());
    }
}
