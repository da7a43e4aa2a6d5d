//! Decision options offered at an in-match decision point.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One selectable decision option.
///
/// The set is closed: every decision category of the client maps to exactly
/// one variant. Passing is not an operation; it is expressed by selecting
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Discard a tile. Tiles in `forbidden_tiles` may not be discarded (kuikae).
    Dapai {
        #[serde(default)]
        forbidden_tiles: Vec<String>,
    },
    /// Call a sequence. Each combination is `|`-joined hand tiles, e.g. `"4m|6m"`.
    Chi { combinations: Vec<String> },
    /// Call a triplet.
    Peng { combinations: Vec<String> },
    /// Declare a concealed quad.
    Angang { combinations: Vec<String> },
    /// Call an open quad on a discard.
    Daminggang { combinations: Vec<String> },
    /// Extend a called triplet to a quad.
    Jiagang { combinations: Vec<String> },
    /// Declare riichi by discarding one of `candidate_tiles`.
    Liqi { candidate_tiles: Vec<String> },
    /// Win on a self-drawn tile.
    Zimohu,
    /// Win on a discard.
    Rong,
    /// Abort the hand with nine terminal and honor kinds.
    Jiuzhongjiu,
    /// Set aside a north tile (three-player).
    Babei,
}

impl Operation {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Dapai { .. } => "dapai",
            Operation::Chi { .. } => "chi",
            Operation::Peng { .. } => "peng",
            Operation::Angang { .. } => "angang",
            Operation::Daminggang { .. } => "daminggang",
            Operation::Jiagang { .. } => "jiagang",
            Operation::Liqi { .. } => "liqi",
            Operation::Zimohu => "zimohu",
            Operation::Rong => "rong",
            Operation::Jiuzhongjiu => "jiuzhongjiu",
            Operation::Babei => "babei",
        }
    }

    /// Call combinations, for the variants that carry them.
    pub fn combinations(&self) -> &[String] {
        match self {
            Operation::Chi { combinations }
            | Operation::Peng { combinations }
            | Operation::Angang { combinations }
            | Operation::Daminggang { combinations }
            | Operation::Jiagang { combinations } => combinations,
            _ => &[],
        }
    }

    /// Whether the operation is executed by picking a tile from the hand.
    pub fn selects_tile(&self) -> bool {
        matches!(self, Operation::Dapai { .. } | Operation::Liqi { .. })
    }

    /// Whether the operation is executed through an on-screen button.
    pub fn has_button(&self) -> bool {
        !matches!(self, Operation::Dapai { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Dapai { forbidden_tiles } if !forbidden_tiles.is_empty() => {
                write!(f, "dapai (forbidden: {})", forbidden_tiles.join(","))
            }
            Operation::Liqi { candidate_tiles } => {
                write!(f, "liqi ({})", candidate_tiles.join(","))
            }
            op if !op.combinations().is_empty() => {
                write!(f, "{} ({})", op.name(), op.combinations().join(" / "))
            }
            op => f.write_str(op.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged() {
        let op: Operation =
            serde_json::from_str(r#"{"type": "chi", "combinations": ["4m|6m", "6m|7m"]}"#)
                .unwrap();
        assert_eq!(op.combinations().len(), 2);
        assert_eq!(op.name(), "chi");

        let op: Operation = serde_json::from_str(r#"{"type": "dapai"}"#).unwrap();
        assert_eq!(
            op,
            Operation::Dapai {
                forbidden_tiles: vec![]
            }
        );

        let op: Operation = serde_json::from_str(r#"{"type": "rong"}"#).unwrap();
        assert_eq!(op, Operation::Rong);
    }

    #[test]
    fn test_display() {
        let op = Operation::Peng {
            combinations: vec!["5p|0p".to_string()],
        };
        assert_eq!(op.to_string(), "peng (5p|0p)");
        assert_eq!(Operation::Zimohu.to_string(), "zimohu");
    }

    #[test]
    fn test_button_classification() {
        let dapai = Operation::Dapai {
            forbidden_tiles: vec![],
        };
        assert!(dapai.selects_tile());
        assert!(!dapai.has_button());

        let liqi = Operation::Liqi {
            candidate_tiles: vec!["1m".to_string()],
        };
        assert!(liqi.selects_tile());
        assert!(liqi.has_button());
        assert!(Operation::Rong.has_button());
    }
}
