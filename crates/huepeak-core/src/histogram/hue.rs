//! The 361-bucket circular hue histogram.

use serde::{Deserialize, Serialize};

use crate::error::{HuepeakError, Result};

/// Number of hue buckets: one per whole degree from 0 through 360 inclusive.
pub const BUCKET_COUNT: usize = 361;

/// How the boundary bucket 360 relates to bucket 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketWrap {
    /// Bucket 360 is a separate slot; the smoothing ring has 361 buckets.
    #[default]
    Duplicate,
    /// Hue 360 is folded into bucket 0; the ring has 360 buckets and bucket
    /// 360 always stays empty.
    Folded,
}

impl BucketWrap {
    /// Number of buckets that take part in circular neighborhoods.
    pub const fn ring_len(self) -> usize {
        match self {
            Self::Duplicate => BUCKET_COUNT,
            Self::Folded => BUCKET_COUNT - 1,
        }
    }

    /// Map a whole-degree hue in `0..=360` to its bucket.
    pub const fn bucket_for(self, degree: usize) -> usize {
        match self {
            Self::Duplicate => degree,
            Self::Folded => degree % 360,
        }
    }
}

/// Occurrence counts per whole-degree hue bucket.
///
/// Always holds exactly [`BUCKET_COUNT`] buckets, zero-initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HueHistogram {
    buckets: Vec<u32>,
    wrap: BucketWrap,
}

impl HueHistogram {
    /// All-zero histogram.
    pub fn new(wrap: BucketWrap) -> Self {
        Self {
            buckets: vec![0; BUCKET_COUNT],
            wrap,
        }
    }

    /// Histogram from explicit counts. Under [`BucketWrap::Folded`] the count
    /// given for bucket 360 is added to bucket 0.
    pub fn from_counts(counts: Vec<u32>, wrap: BucketWrap) -> Result<Self> {
        if counts.len() != BUCKET_COUNT {
            return Err(HuepeakError::InvalidHistogram { len: counts.len() });
        }
        let mut histogram = Self {
            buckets: counts,
            wrap,
        };
        if wrap == BucketWrap::Folded {
            let boundary = std::mem::take(&mut histogram.buckets[360]);
            histogram.buckets[0] = histogram.buckets[0].saturating_add(boundary);
        }
        Ok(histogram)
    }

    pub fn wrap(&self) -> BucketWrap {
        self.wrap
    }

    /// Count for `bucket`, or 0 past the last bucket.
    pub fn count(&self, bucket: usize) -> u32 {
        self.buckets.get(bucket).copied().unwrap_or(0)
    }

    /// All bucket counts, indexed by hue degree.
    pub fn counts(&self) -> &[u32] {
        &self.buckets
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|&c| u64::from(c)).sum()
    }

    /// True when no pixel contributed, e.g. every pixel was filtered out.
    pub fn is_all_zero(&self) -> bool {
        self.buckets.iter().all(|&c| c == 0)
    }

    /// Record one occurrence of a whole-degree hue in `0..=360`.
    pub(crate) fn increment(&mut self, degree: usize) {
        let bucket = self.wrap.bucket_for(degree.min(BUCKET_COUNT - 1));
        self.buckets[bucket] = self.buckets[bucket].saturating_add(1);
    }

    /// Add `other`'s counts into this histogram, bucket by bucket.
    pub fn merge(&mut self, other: &HueHistogram) {
        for (dst, &src) in self.buckets.iter_mut().zip(&other.buckets) {
            *dst = dst.saturating_add(src);
        }
    }

    pub(crate) fn with_counts(&self, buckets: Vec<u32>) -> Self {
        debug_assert_eq!(buckets.len(), BUCKET_COUNT);
        Self {
            buckets,
            wrap: self.wrap,
        }
    }
}

impl Default for HueHistogram {
    fn default() -> Self {
        Self::new(BucketWrap::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_all_buckets_zeroed() {
        let h = HueHistogram::new(BucketWrap::Duplicate);
        assert_eq!(h.counts().len(), BUCKET_COUNT);
        assert!(h.is_all_zero());
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn test_duplicate_keeps_bucket_360_separate() {
        let mut h = HueHistogram::new(BucketWrap::Duplicate);
        h.increment(360);
        h.increment(0);
        assert_eq!(h.count(0), 1);
        assert_eq!(h.count(360), 1);
    }

    #[test]
    fn test_folded_merges_bucket_360_into_zero() {
        let mut h = HueHistogram::new(BucketWrap::Folded);
        h.increment(360);
        h.increment(0);
        assert_eq!(h.count(0), 2);
        assert_eq!(h.count(360), 0);
    }

    #[test]
    fn test_from_counts_validates_length() {
        let err = HueHistogram::from_counts(vec![0; 360], BucketWrap::Duplicate).unwrap_err();
        assert!(matches!(err, HuepeakError::InvalidHistogram { len: 360 }));
    }

    #[test]
    fn test_from_counts_folds_boundary() {
        let mut counts = vec![0; BUCKET_COUNT];
        counts[0] = 3;
        counts[360] = 4;
        let h = HueHistogram::from_counts(counts, BucketWrap::Folded).unwrap();
        assert_eq!(h.count(0), 7);
        assert_eq!(h.count(360), 0);
        assert_eq!(h.total(), 7);
    }

    #[test]
    fn test_merge_sums_bucketwise() {
        let mut a = HueHistogram::default();
        let mut b = HueHistogram::default();
        a.increment(10);
        b.increment(10);
        b.increment(200);
        a.merge(&b);
        assert_eq!(a.count(10), 2);
        assert_eq!(a.count(200), 1);
        assert_eq!(a.total(), 3);
    }

    #[test]
    fn test_count_past_end_is_zero() {
        assert_eq!(HueHistogram::default().count(400), 0);
    }
}
