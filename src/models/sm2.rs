//! SM-2 (SuperMemo 2) spaced repetition scheduler.
//!
//! - Quality 3-5 is a pass: intervals grow 1 day → 6 days → interval × EF
//! - Quality 0-2 is a fail: repetitions reset, the card comes back tomorrow
//!   and the EF drops by 0.2
//! - EF never falls below 1.3
//!
//! The scheduler is a pure function of its inputs. It neither reads the clock
//! (except in [`compute_next_review_now`]) nor touches storage.

use super::quality::IntoQuality;
use super::scheduling::MIN_EASE_FACTOR;
use super::{SchedulingState, StudyRecord};
use crate::error::SchedulerError;
use chrono::{DateTime, Days, Utc};

const FIRST_INTERVAL: u32 = 1;
const SECOND_INTERVAL: u32 = 6;
const FAIL_INTERVAL: u32 = 1;
const FAIL_EASE_PENALTY: f64 = 0.2;

/// EF adjustment for a passing grade.
fn ease_delta(quality: u8) -> f64 {
    let distance = f64::from(5 - quality);
    0.1 - distance * (0.08 + distance * 0.02)
}

/// Computes the scheduling state that follows a review of `quality`.
///
/// Fails with [`SchedulerError::InvalidQuality`] for ratings outside 0..=5 or
/// fractional ratings, and with [`SchedulerError::InvalidState`] when `state`
/// violates its invariants.
pub fn compute_next_review(
    state: &SchedulingState,
    quality: impl IntoQuality,
    time_spent_ms: u64,
    now: DateTime<Utc>,
) -> Result<SchedulingState, SchedulerError> {
    let quality = quality.into_quality()?;
    state.validate()?;

    let (interval, repetitions, ease_factor) = if quality.is_pass() {
        let interval = match state.repetitions() {
            0 => FIRST_INTERVAL,
            1 => SECOND_INTERVAL,
            _ => scaled_interval(state.interval(), state.ease_factor())?,
        };
        let ease = (state.ease_factor() + ease_delta(quality.value())).max(MIN_EASE_FACTOR);
        (interval, state.repetitions() + 1, ease)
    } else {
        let ease = (state.ease_factor() - FAIL_EASE_PENALTY).max(MIN_EASE_FACTOR);
        (FAIL_INTERVAL, 0, ease)
    };

    let next_review_date = now
        .checked_add_days(Days::new(u64::from(interval)))
        .ok_or_else(|| {
            SchedulerError::InvalidState(format!(
                "next review {interval} days after {now} is out of range"
            ))
        })?;

    let record = StudyRecord {
        date: now,
        quality,
        time_spent_ms,
    };

    Ok(SchedulingState::updated(
        state,
        ease_factor,
        interval,
        repetitions,
        next_review_date,
        record,
    ))
}

/// [`compute_next_review`] stamped with the current wall-clock time.
pub fn compute_next_review_now(
    state: &SchedulingState,
    quality: impl IntoQuality,
    time_spent_ms: u64,
) -> Result<SchedulingState, SchedulerError> {
    compute_next_review(state, quality, time_spent_ms, Utc::now())
}

/// `round(interval * ease)`, rounding halves away from zero.
fn scaled_interval(interval: u32, ease_factor: f64) -> Result<u32, SchedulerError> {
    let scaled = (f64::from(interval) * ease_factor).round();
    if scaled > f64::from(u32::MAX) {
        return Err(SchedulerError::InvalidState(format!(
            "interval {interval} × {ease_factor} overflows"
        )));
    }
    Ok(scaled as u32)
}
