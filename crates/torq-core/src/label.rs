//! User-defined labels.
//!
//! A label tags torrents and may carry a move-destination path: when a
//! labelled torrent finishes its transfer, the payload is relocated there
//! and a symlink is left at the original path so seeding keeps working.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(rename = "moveToPath")]
    pub move_to: Option<String>,
}

impl Label {
    /// Destination directory for completed payloads, if one is configured.
    pub fn move_destination(&self) -> Option<&str> {
        self.move_to.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_move_to_path_key() {
        let label = Label {
            id: "l1".into(),
            name: "linux".into(),
            color: "#aa0000".into(),
            move_to: Some("/srv/iso".into()),
        };
        let json = serde_json::to_string(&label).unwrap();
        assert!(json.contains("\"moveToPath\""));
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }

    #[test]
    fn empty_move_to_is_no_destination() {
        let mut label = Label::default();
        assert!(label.move_destination().is_none());
        label.move_to = Some(String::new());
        assert!(label.move_destination().is_none());
        label.move_to = Some("/data".into());
        assert_eq!(label.move_destination(), Some("/data"));
    }
}
