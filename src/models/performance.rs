//! Per-category study performance aggregated from review histories.
use super::StoredCard;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket for cards without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryPerformance {
    pub cards: usize,
    pub reviews: usize,
    pub passes: usize,
    pub total_quality: u64,
    pub total_time_ms: u64,
}

impl CategoryPerformance {
    pub fn pass_rate(&self) -> f64 {
        if self.reviews == 0 {
            return 0.0;
        }
        self.passes as f64 / self.reviews as f64
    }

    pub fn average_quality(&self) -> f64 {
        if self.reviews == 0 {
            return 0.0;
        }
        self.total_quality as f64 / self.reviews as f64
    }
}

pub fn category_performance<'a, I>(cards: I) -> BTreeMap<String, CategoryPerformance>
where
    I: IntoIterator<Item = &'a StoredCard>,
{
    let mut by_category: BTreeMap<String, CategoryPerformance> = BTreeMap::new();

    for card in cards {
        let key = card
            .flashcard
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        let entry = by_category.entry(key).or_default();
        entry.cards += 1;

        for record in card.scheduling.study_history() {
            entry.reviews += 1;
            if record.quality.is_pass() {
                entry.passes += 1;
            }
            entry.total_quality += u64::from(record.quality.value());
            entry.total_time_ms += record.time_spent_ms;
        }
    }

    by_category
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flashcard, SchedulingState, sm2::compute_next_review};
    use chrono::{TimeZone, Utc};

    fn card(id: i64, category: Option<&str>, qualities: &[u8]) -> StoredCard {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let mut scheduling = SchedulingState::new(start);
        for &q in qualities {
            scheduling = compute_next_review(&scheduling, q, 2_000, start).unwrap();
        }
        let mut flashcard = Flashcard::new(format!("q{id}"), format!("a{id}"));
        flashcard.category = category.map(str::to_string);
        StoredCard {
            id,
            deck_name: "Biology".to_string(),
            flashcard,
            created_at: start,
            scheduling,
            version: qualities.len() as i64,
        }
    }

    #[test]
    fn test_aggregates_per_category() {
        let cards = vec![
            card(1, Some("cells"), &[5, 4]),
            card(2, Some("cells"), &[1]),
            card(3, Some("genetics"), &[3]),
            card(4, None, &[]),
        ];
        let stats = category_performance(&cards);

        let cells = &stats["cells"];
        assert_eq!(cells.cards, 2);
        assert_eq!(cells.reviews, 3);
        assert_eq!(cells.passes, 2);
        assert_eq!(cells.total_time_ms, 6_000);
        assert!((cells.average_quality() - 10.0 / 3.0).abs() < 1e-9);
        assert!((cells.pass_rate() - 2.0 / 3.0).abs() < 1e-9);

        assert_eq!(stats["genetics"].passes, 1);

        let none = &stats[UNCATEGORIZED];
        assert_eq!(none.cards, 1);
        assert_eq!(none.reviews, 0);
        assert_eq!(none.pass_rate(), 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(category_performance(&Vec::<StoredCard>::new()).is_empty());
    }
}
