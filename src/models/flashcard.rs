//! Flashcard content: a front prompt, a back answer and an optional category.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_creation() {
        let card = Flashcard::new("mitochondria", "powerhouse of the cell");

        assert_eq!(card.front, "mitochondria");
        assert_eq!(card.back, "powerhouse of the cell");
        assert!(card.category.is_none());
    }

    #[test]
    fn test_flashcard_category() {
        let card = Flashcard::new("H2O", "water").with_category("chemistry");
        assert_eq!(card.category.as_deref(), Some("chemistry"));
    }

    #[test]
    fn test_category_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&Flashcard::new("a", "b")).unwrap();
        assert_eq!(json, r#"{"front":"a","back":"b"}"#);

        let parsed: Flashcard = serde_json::from_str(r#"{"front":"x","back":"y"}"#).unwrap();
        assert!(parsed.category.is_none());
    }
}
