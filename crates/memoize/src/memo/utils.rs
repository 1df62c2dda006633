//! Memoizer diagnostics
//!
//! Turns a [`MemoStats`] snapshot into a health classification with tuning
//! recommendations, and logs it through `tracing`.

use std::fmt;

use tracing::{info, warn};

use super::stats::MemoStats;

/// Below this hit rate a wrapper is considered ineffective
const LOW_HIT_RATE: f64 = 0.5;
/// Minimum number of calls before the hit rate is judged
const MIN_CALLS_FOR_HIT_RATE: u64 = 100;
/// Above this eviction rate the bound is considered too small
const HIGH_EVICTION_RATE: f64 = 0.2;

/// Health status of a memoized function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoHealth {
    /// Operating normally
    Healthy,
    /// Most calls miss the cache
    LowHitRate,
    /// Entries are evicted on a large share of calls
    Saturated,
    /// Both low hit rate and saturation
    Critical,
}

impl fmt::Display for MemoHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::LowHitRate => write!(f, "Low Hit Rate"),
            Self::Saturated => write!(f, "Saturated"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Health report with diagnostics
#[derive(Debug, Clone)]
pub struct MemoHealthReport {
    /// Overall health status
    pub health: MemoHealth,
    /// Statistics the report was built from
    pub stats: MemoStats,
    /// Recommendations for tuning
    pub recommendations: Vec<String>,
}

impl MemoHealthReport {
    /// Generate a health report from a statistics snapshot
    ///
    /// # Thresholds
    /// - Low hit rate: < 50% once more than 100 calls were made
    /// - Saturated: evictions on > 20% of calls
    ///
    /// # Example
    /// ```
    /// use tiny_memoize::{MemoHealthReport, Memoized};
    ///
    /// let memo = Memoized::builder(|args: &[u32]| args[0] + 1)
    ///     .max_memoizations(10)
    ///     .track_metrics(true)
    ///     .build();
    /// memo.call(&[1]);
    ///
    /// let report = MemoHealthReport::new(memo.stats());
    /// println!("{}", report);
    /// ```
    pub fn new(stats: MemoStats) -> Self {
        let mut recommendations = Vec::new();

        let low_hit_rate =
            stats.hit_rate() < LOW_HIT_RATE && stats.total_calls() > MIN_CALLS_FOR_HIT_RATE;
        if low_hit_rate {
            recommendations.push(format!(
                "Hit rate is {:.2}%. Arguments rarely repeat; memoization may not pay off.",
                stats.hit_rate() * 100.0
            ));
        }

        let saturated = stats.eviction_rate() > HIGH_EVICTION_RATE;
        if saturated {
            recommendations.push(format!(
                "Evictions on {:.2}% of calls. Consider raising max_memoizations above {}.",
                stats.eviction_rate() * 100.0,
                stats.max_size
            ));
        }

        let health = match (low_hit_rate, saturated) {
            (true, true) => MemoHealth::Critical,
            (true, false) => MemoHealth::LowHitRate,
            (false, true) => MemoHealth::Saturated,
            (false, false) => MemoHealth::Healthy,
        };

        Self { health, stats, recommendations }
    }

    /// Log the health report using tracing
    pub fn log(&self, name: &str) {
        match self.health {
            MemoHealth::Healthy => {
                info!(
                    memo = name,
                    health = %self.health,
                    hit_rate = self.stats.hit_rate(),
                    size = self.stats.size,
                    "Memoizer health check: Healthy"
                );
            }
            MemoHealth::LowHitRate | MemoHealth::Saturated | MemoHealth::Critical => {
                warn!(
                    memo = name,
                    health = %self.health,
                    hit_rate = self.stats.hit_rate(),
                    size = self.stats.size,
                    max_size = self.stats.max_size,
                    "Memoizer health check: Issues detected"
                );
                for rec in &self.recommendations {
                    warn!(memo = name, recommendation = %rec, "Memoizer tuning recommendation");
                }
            }
        }
    }
}

impl fmt::Display for MemoHealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memoizer Health Report")?;
        writeln!(f, "======================")?;
        writeln!(f, "Status: {}", self.health)?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Size: {}/{}", self.stats.size, self.stats.max_size)?;
        writeln!(f, "  Hits: {}", self.stats.hits)?;
        writeln!(f, "  Misses: {}", self.stats.misses)?;
        writeln!(f, "  Hit Rate: {:.2}%", self.stats.hit_rate() * 100.0)?;
        writeln!(f, "  Evictions: {}", self.stats.evictions)?;
        writeln!(f, "  Fill: {:.1}%", self.stats.fill_percentage() * 100.0)?;

        if !self.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recommendations:")?;
            for (i, rec) in self.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec)?;
            }
        }

        Ok(())
    }
}
