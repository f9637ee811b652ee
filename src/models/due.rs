//! Selection of cards whose next review date has passed.
use super::SchedulingState;
use chrono::{DateTime, Utc};

/// Anything that carries a next-review timestamp.
pub trait Schedulable {
    fn next_review_date(&self) -> DateTime<Utc>;
}

impl Schedulable for SchedulingState {
    fn next_review_date(&self) -> DateTime<Utc> {
        SchedulingState::next_review_date(self)
    }
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn next_review_date(&self) -> DateTime<Utc> {
        (**self).next_review_date()
    }
}

/// Returns every record with `next_review_date <= now`, in input order.
pub fn select_due<T: Schedulable>(records: &[T], now: DateTime<Utc>) -> Vec<&T> {
    records
        .iter()
        .filter(|record| record.next_review_date() <= now)
        .collect()
}

/// Like [`select_due`], ordered by next review date (oldest first). Ties keep
/// input order.
pub fn select_due_sorted<T: Schedulable>(records: &[T], now: DateTime<Utc>) -> Vec<&T> {
    let mut due = select_due(records, now);
    due.sort_by_key(|record| record.next_review_date());
    due
}
