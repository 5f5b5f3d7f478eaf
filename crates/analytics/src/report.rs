//! Text histograms for occupancy statistics.
//!
//! Renders integer sequences (ratings per user, ratings per item) as
//! fixed-width terminal bar charts. Per-item counts are heavily long-tailed,
//! so those get log10 bucketing; per-user counts stay linear.

/// Widest bar in rendered output, in characters
const BAR_WIDTH: usize = 40;

/// One histogram bucket over the half-open value range [lo, hi).
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// A bucketed view of an integer sequence, renderable as text.
#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: Vec<Bucket>,
    total: usize,
    log_scale: bool,
}

impl Histogram {
    /// Evenly spaced buckets over [min, max].
    pub fn linear(values: &[usize], bins: usize) -> Self {
        Self::build(values, bins, false)
    }

    /// Buckets evenly spaced in log10 of the value; bounds are reported
    /// back in the original units.
    pub fn log10(values: &[usize], bins: usize) -> Self {
        Self::build(values, bins, true)
    }

    fn build(values: &[usize], bins: usize, log_scale: bool) -> Self {
        let bins = bins.max(1);
        if values.is_empty() {
            return Self {
                buckets: Vec::new(),
                total: 0,
                log_scale,
            };
        }

        // Occupancy counts are >= 1 by construction, but clamp anyway so a
        // stray zero cannot produce -inf
        let scale = |v: usize| -> f64 {
            if log_scale {
                (v.max(1) as f64).log10()
            } else {
                v as f64
            }
        };
        let lo = values
            .iter()
            .map(|&v| scale(v))
            .fold(f64::INFINITY, f64::min);
        let hi = values
            .iter()
            .map(|&v| scale(v))
            .fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;
        // All-equal input collapses into the first bucket
        let width = if span > 0.0 { span / bins as f64 } else { 1.0 };

        let mut counts = vec![0usize; bins];
        for &v in values {
            let mut index = ((scale(v) - lo) / width) as usize;
            if index >= bins {
                index = bins - 1;
            }
            counts[index] += 1;
        }

        let unscale = |x: f64| if log_scale { 10f64.powf(x) } else { x };
        let buckets = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bucket {
                lo: unscale(lo + i as f64 * width),
                hi: unscale(lo + (i + 1) as f64 * width),
                count,
            })
            .collect();

        Self {
            buckets,
            total: values.len(),
            log_scale,
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of input values; buckets always account for all of them.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_log_scale(&self) -> bool {
        self.log_scale
    }

    /// One line per bucket: bounds, a bar scaled to the fullest bucket, and
    /// the raw count.
    pub fn render(&self) -> String {
        if self.buckets.is_empty() {
            return "(no data)\n".to_string();
        }

        let peak = self
            .buckets
            .iter()
            .map(|b| b.count)
            .max()
            .unwrap_or(1)
            .max(1);
        let mut out = String::new();
        for bucket in &self.buckets {
            let bar = "#".repeat(bucket.count * BAR_WIDTH / peak);
            let line = if self.log_scale {
                format!(
                    "{:>10.1} .. {:>10.1} | {:<BAR_WIDTH$} {}\n",
                    bucket.lo, bucket.hi, bar, bucket.count
                )
            } else {
                format!(
                    "{:>10.0} .. {:>10.0} | {:<BAR_WIDTH$} {}\n",
                    bucket.lo, bucket.hi, bar, bucket.count
                )
            };
            out.push_str(&line);
        }
        out
    }
}
