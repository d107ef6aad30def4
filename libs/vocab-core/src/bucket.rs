//! Urgency bucketing and due-set selection.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Bucket, Reviewable};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days from `now` until `next`, rounded up: 25 hours ahead counts as
/// 2 days, anything at or before `now` is <= 0.
pub fn days_until(next: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (next - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Classify a single word.
pub fn bucket_of<T: Reviewable>(word: &T, now: DateTime<Utc>) -> Bucket {
    let state = word.review_state();
    if state.mastered {
        return Bucket::Mastered;
    }
    let diff_days = match state.next_review_date {
        Some(next) => days_until(next, now),
        None => 0,
    };
    match diff_days {
        d if d <= 0 => Bucket::OverdueNow,
        1 => Bucket::Tomorrow,
        2..=3 => Bucket::InThreeDays,
        _ => Bucket::InOneWeek,
    }
}

/// Words due for review at `now`: unscheduled words (no due date) first,
/// then by ascending due date.
///
/// Ties keep their input order, so repeated calls on unchanged input return
/// the same sequence.
pub fn due_now<T: Reviewable>(words: &[T], now: DateTime<Utc>) -> Vec<&T> {
    let mut due: Vec<&T> = words
        .iter()
        .filter(|w| w.review_state().is_due(now))
        .collect();
    due.sort_by_key(|w| w.review_state().next_review_date);
    due
}

/// Partition every word into exactly one bucket. Empty buckets are omitted.
pub fn bucketize<T: Reviewable>(words: &[T], now: DateTime<Utc>) -> BTreeMap<Bucket, Vec<&T>> {
    let mut buckets: BTreeMap<Bucket, Vec<&T>> = BTreeMap::new();
    for word in words {
        buckets.entry(bucket_of(word, now)).or_default().push(word);
    }
    buckets
}

/// Overdue words to weave into a practice story or roleplay, most urgent first.
pub fn practice_targets<T: Reviewable>(words: &[T], now: DateTime<Utc>, limit: usize) -> Vec<&T> {
    let mut targets = due_now(words, now);
    targets.truncate(limit);
    targets
}

/// Number of words per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub overdue_now: usize,
    pub tomorrow: usize,
    pub in_three_days: usize,
    pub in_one_week: usize,
    pub mastered: usize,
}

impl BucketCounts {
    pub fn tally<T: Reviewable>(words: &[T], now: DateTime<Utc>) -> Self {
        let mut counts = Self::default();
        for word in words {
            match bucket_of(word, now) {
                Bucket::OverdueNow => counts.overdue_now += 1,
                Bucket::Tomorrow => counts.tomorrow += 1,
                Bucket::InThreeDays => counts.in_three_days += 1,
                Bucket::InOneWeek => counts.in_one_week += 1,
                Bucket::Mastered => counts.mastered += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.overdue_now + self.tomorrow + self.in_three_days + self.in_one_week + self.mastered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReviewState;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[derive(Debug, PartialEq)]
    struct Entry {
        id: u32,
        state: ReviewState,
    }

    impl Reviewable for Entry {
        fn review_state(&self) -> &ReviewState {
            &self.state
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn entry(id: u32, offset: Option<Duration>, mastered: bool) -> Entry {
        Entry {
            id,
            state: ReviewState {
                review_stage: 1,
                next_review_date: offset.map(|d| now() + d),
                mastered,
            },
        }
    }

    fn ids(words: &[&Entry]) -> Vec<u32> {
        words.iter().map(|w| w.id).collect()
    }

    #[test]
    fn days_until_rounds_up() {
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(1), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(25), now()), 2);
        assert_eq!(days_until(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(25), now()), -1);
    }

    #[test]
    fn due_now_filters_and_orders() {
        let words = vec![
            entry(1, Some(Duration::hours(-1)), false),
            entry(2, Some(Duration::days(2)), false),
            entry(3, None, false),
            entry(4, Some(Duration::days(-3)), false),
            entry(5, None, true),
            entry(6, Some(Duration::zero()), false),
        ];
        let due = due_now(&words, now());
        assert_eq!(ids(&due), vec![3, 4, 1, 6]);
    }

    #[test]
    fn due_now_is_repeatable() {
        let words = vec![
            entry(1, None, false),
            entry(2, None, false),
            entry(3, Some(Duration::days(-1)), false),
        ];
        assert_eq!(ids(&due_now(&words, now())), ids(&due_now(&words, now())));
        assert_eq!(ids(&due_now(&words, now())), vec![1, 2, 3]);
    }

    #[test]
    fn bucket_boundaries() {
        let words = vec![
            entry(1, None, false),
            entry(2, Some(Duration::days(-2)), false),
            entry(3, Some(Duration::hours(12)), false),
            entry(4, Some(Duration::days(2)), false),
            entry(5, Some(Duration::days(3)), false),
            entry(6, Some(Duration::days(3) + Duration::minutes(1)), false),
            entry(7, Some(Duration::days(30)), false),
            entry(8, None, true),
        ];
        let buckets = bucketize(&words, now());
        assert_eq!(ids(&buckets[&Bucket::OverdueNow]), vec![1, 2]);
        assert_eq!(ids(&buckets[&Bucket::Tomorrow]), vec![3]);
        assert_eq!(ids(&buckets[&Bucket::InThreeDays]), vec![4, 5]);
        assert_eq!(ids(&buckets[&Bucket::InOneWeek]), vec![6, 7]);
        assert_eq!(ids(&buckets[&Bucket::Mastered]), vec![8]);
    }

    #[test]
    fn two_days_out_lands_in_three_day_bucket() {
        let words = vec![entry(1, Some(Duration::days(2)), false)];
        let buckets = bucketize(&words, now());
        assert_eq!(buckets.len(), 1);
        assert_eq!(ids(&buckets[&Bucket::InThreeDays]), vec![1]);
    }

    #[test]
    fn empty_input() {
        let words: Vec<Entry> = Vec::new();
        assert!(due_now(&words, now()).is_empty());
        assert!(bucketize(&words, now()).is_empty());
        assert_eq!(BucketCounts::tally(&words, now()), BucketCounts::default());
    }

    #[test]
    fn practice_targets_are_capped() {
        let words: Vec<Entry> = (0..8).map(|i| entry(i, None, false)).collect();
        assert_eq!(ids(&practice_targets(&words, now(), 5)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn counts_match_buckets() {
        let words = vec![
            entry(1, None, false),
            entry(2, Some(Duration::days(1)), false),
            entry(3, Some(Duration::days(10)), false),
            entry(4, None, true),
        ];
        let counts = BucketCounts::tally(&words, now());
        assert_eq!(
            counts,
            BucketCounts {
                overdue_now: 1,
                tomorrow: 1,
                in_three_days: 0,
                in_one_week: 1,
                mastered: 1,
            }
        );
        assert_eq!(counts.total(), words.len());
    }

    #[test]
    fn reviewed_word_leaves_the_due_set() {
        use crate::scheduler::{ladder::StageLadder, Scheduler};
        use crate::types::Recall;

        let ladder = StageLadder::default();
        let mut words = vec![entry(1, None, false), entry(2, None, false)];
        words[0].state.review_stage = 0;
        assert_eq!(ids(&due_now(&words, now())), vec![1, 2]);

        let result = ladder.advance(&words[0].state, Recall::Correct, now());
        assert_eq!(result.new_state.review_stage, 1);
        assert_eq!(result.new_state.next_review_date, Some(now() + Duration::days(1)));
        words[0].state = result.new_state;

        assert_eq!(ids(&due_now(&words, now())), vec![2]);
        let buckets = bucketize(&words, now());
        assert_eq!(ids(&buckets[&Bucket::Tomorrow]), vec![1]);
        assert_eq!(ids(&buckets[&Bucket::OverdueNow]), vec![2]);
    }

    proptest! {
        #[test]
        fn buckets_partition_the_input(
            specs in proptest::collection::vec((proptest::option::of(-60i64 * 24..60 * 24), any::<bool>()), 0..40)
        ) {
            let words: Vec<Entry> = specs
                .iter()
                .enumerate()
                .map(|(i, (hours, mastered))| entry(i as u32, hours.map(Duration::hours), *mastered))
                .collect();
            let buckets = bucketize(&words, now());

            let mut seen = HashSet::new();
            for members in buckets.values() {
                prop_assert!(!members.is_empty());
                for w in members {
                    prop_assert!(seen.insert(w.id), "word {} in two buckets", w.id);
                }
            }
            prop_assert_eq!(seen.len(), words.len());

            let due: HashSet<u32> = due_now(&words, now()).iter().map(|w| w.id).collect();
            let overdue: HashSet<u32> = buckets
                .get(&Bucket::OverdueNow)
                .map(|m| m.iter().map(|w| w.id).collect())
                .unwrap_or_default();
            prop_assert!(due.is_subset(&overdue));
        }
    }
}
