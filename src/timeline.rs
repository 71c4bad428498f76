//! Month-resolution employment intervals and their merged timeline.
//!
//! A calendar month is encoded as `year * 12 + (month - 1)` so interval
//! arithmetic needs no calendar support. Intervals are half-open:
//! `Jan 2020 - Dec 2020` covers 11 months.

pub fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + (month as i32 - 1)
}

/// Half-open `[start, end)` span of month indices with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval {
    start: i32,
    end: i32,
}

impl TimeInterval {
    pub fn new(start: i32, end: i32) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn from_months(
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    ) -> Option<Self> {
        let valid = |m: u32| (1..=12).contains(&m);
        if !valid(start_month) || !valid(end_month) {
            return None;
        }
        Self::new(
            month_index(start_year, start_month),
            month_index(end_year, end_month),
        )
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn months(&self) -> i32 {
        self.end - self.start
    }
}

/// Disjoint intervals sorted by start; consecutive spans never touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTimeline {
    spans: Vec<TimeInterval>,
}

impl MergedTimeline {
    /// Sorts the intervals and coalesces every overlapping or touching pair,
    /// so back-to-back and concurrent jobs are only counted once.
    pub fn merge<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = TimeInterval>,
    {
        let mut sorted: Vec<TimeInterval> = intervals.into_iter().collect();
        sorted.sort_unstable();

        let mut spans: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
        for next in sorted {
            match spans.last_mut() {
                Some(current) if next.start <= current.end => {
                    current.end = current.end.max(next.end);
                }
                _ => spans.push(next),
            }
        }

        Self { spans }
    }

    pub fn spans(&self) -> &[TimeInterval] {
        &self.spans
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeInterval> {
        self.spans.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn total_months(&self) -> i32 {
        self.spans.iter().map(TimeInterval::months).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i32, end: i32) -> TimeInterval {
        TimeInterval::new(start, end).unwrap()
    }

    fn assert_disjoint(timeline: &MergedTimeline) {
        for pair in timeline.spans().windows(2) {
            assert!(pair[1].start() > pair[0].end(), "{:?} touches {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn month_index_encodes_year_and_month() {
        assert_eq!(month_index(2020, 1), 24240);
        assert_eq!(month_index(2020, 12), 24251);
        assert_eq!(month_index(2021, 1) - month_index(2020, 12), 1);
    }

    #[test]
    fn rejects_empty_and_inverted_intervals() {
        assert!(TimeInterval::new(5, 5).is_none());
        assert!(TimeInterval::new(6, 5).is_none());
        assert!(TimeInterval::from_months(2020, 13, 2021, 1).is_none());
        assert!(TimeInterval::from_months(2020, 0, 2021, 1).is_none());
        assert_eq!(TimeInterval::from_months(2020, 1, 2020, 12).unwrap().months(), 11);
    }

    #[test]
    fn empty_input_gives_empty_timeline() {
        let merged = MergedTimeline::merge(Vec::new());
        assert!(merged.is_empty());
        assert_eq!(merged.total_months(), 0);
    }

    #[test]
    fn overlapping_pair_collapses_to_hull() {
        let cases = [((0, 10), (5, 20)), ((5, 20), (0, 10)), ((0, 10), (10, 12)), ((0, 30), (4, 8))];
        for ((s1, e1), (s2, e2)) in cases {
            let merged = MergedTimeline::merge([iv(s1, e1), iv(s2, e2)]);
            assert_eq!(merged.spans(), &[iv(s1.min(s2), e1.max(e2))]);
        }
    }

    #[test]
    fn separated_intervals_stay_apart() {
        let merged = MergedTimeline::merge([iv(20, 30), iv(0, 10), iv(11, 15)]);
        assert_eq!(merged.spans(), &[iv(0, 10), iv(11, 15), iv(20, 30)]);
        assert_eq!(merged.total_months(), 24);
        assert_disjoint(&merged);
    }

    #[test]
    fn duplicates_and_chains_merge_once() {
        let merged = MergedTimeline::merge([iv(0, 6), iv(0, 6), iv(6, 12), iv(12, 18), iv(40, 41)]);
        assert_eq!(merged.spans(), &[iv(0, 18), iv(40, 41)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_is_idempotent() {
        let input = vec![iv(3, 9), iv(1, 4), iv(20, 25), iv(9, 10), iv(24, 30), iv(50, 51)];
        let once = MergedTimeline::merge(input);
        let twice = MergedTimeline::merge(once.iter().copied());
        assert_eq!(once, twice);
        assert_disjoint(&once);
    }
}
