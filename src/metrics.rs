//! Pure typing metrics: speed, accuracy and consistency.
//!
//! Every function here is total. Inputs that would otherwise divide by zero
//! resolve to fixed sentinel values instead.

use serde::{Deserialize, Serialize};

/// Standard word length used to turn characters into words
pub const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute for `char_count` characters typed over `elapsed_secs`.
///
/// Returns 0 when no time has elapsed.
pub fn words_per_minute(char_count: usize, elapsed_secs: f64) -> u32 {
    if elapsed_secs <= 0.0 {
        return 0;
    }

    let words = char_count as f64 / CHARS_PER_WORD;
    let minutes = elapsed_secs / 60.0;

    (words / minutes).round() as u32
}

/// Share of typed characters that match the reference at the same position.
///
/// The denominator is the typed length: reference characters not yet typed
/// never count, while characters typed past the end of the reference always
/// count as misses. An empty attempt scores 100.
pub fn accuracy_percent(reference: &str, typed: &str) -> u32 {
    let typed_len = typed.chars().count();
    if typed_len == 0 {
        return 100;
    }

    let matches = reference
        .chars()
        .zip(typed.chars())
        .filter(|(r, t)| r == t)
        .count();

    ((matches as f64 / typed_len as f64) * 100.0).round() as u32
}

/// Inverse coefficient of variation of the WPM samples, as a percentage.
///
/// Fewer than two samples score 100. A zero mean scores 0 rather than
/// producing NaN.
pub fn consistency_percent(wpm_samples: &[f64]) -> u32 {
    if wpm_samples.len() < 2 {
        return 100;
    }

    let (Some(avg), Some(deviation)) = (mean(wpm_samples), std_dev(wpm_samples)) else {
        return 100;
    };
    if avg == 0.0 {
        return 0;
    }

    (100.0 - (deviation / avg) * 100.0).max(0.0).round() as u32
}

pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// One WPM reading taken on a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WpmSample {
    /// Seconds since the session started
    pub t: f64,
    pub wpm: f64,
}

impl WpmSample {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<WpmSample> for (f64, f64) {
    fn from(p: WpmSample) -> Self {
        (p.t, p.wpm)
    }
}

/// Live metrics for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub wpm: u32,
    pub accuracy: u32,
    pub consistency: u32,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            consistency: 100,
        }
    }
}

impl MetricsSnapshot {
    pub fn compute(reference: &str, typed: &str, elapsed_secs: f64, history: &[WpmSample]) -> Self {
        let samples: Vec<f64> = history.iter().map(|s| s.wpm).collect();
        Self {
            wpm: words_per_minute(typed.chars().count(), elapsed_secs),
            accuracy: accuracy_percent(reference, typed),
            consistency: consistency_percent(&samples),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm_zero_elapsed_is_zero() {
        for chars in [0, 1, 5, 250, 10_000] {
            assert_eq!(words_per_minute(chars, 0.0), 0);
        }
    }

    #[test]
    fn test_wpm_zero_chars_is_zero() {
        for secs in [0.5, 1.0, 60.0, 3600.0] {
            assert_eq!(words_per_minute(0, secs), 0);
        }
    }

    #[test]
    fn test_wpm_standard_word_length() {
        assert_eq!(words_per_minute(250, 60.0), 50);
        assert_eq!(words_per_minute(25, 30.0), 10);
        assert_eq!(words_per_minute(5, 1.0), 60);
    }

    #[test]
    fn test_wpm_rounds_to_nearest() {
        // 7 chars in 10s = 1.4 words / (1/6) min = 8.4
        assert_eq!(words_per_minute(7, 10.0), 8);
        assert_eq!(words_per_minute(9, 12.0), 9);
        assert_eq!(words_per_minute(11, 12.0), 11);
        // 8 chars in 10s = 1.6 / (1/6) = 9.6
        assert_eq!(words_per_minute(8, 10.0), 10);
    }

    #[test]
    fn test_accuracy_empty_typed_is_full() {
        assert_eq!(accuracy_percent("anything", ""), 100);
        assert_eq!(accuracy_percent("", ""), 100);
    }

    #[test]
    fn test_accuracy_exact_match() {
        assert_eq!(accuracy_percent("cat", "cat"), 100);
    }

    #[test]
    fn test_accuracy_one_miss_rounds_up() {
        assert_eq!(accuracy_percent("cat", "cap"), 67);
    }

    #[test]
    fn test_accuracy_overtyping_counts_against() {
        assert_eq!(accuracy_percent("cat", "catdog"), 50);
    }

    #[test]
    fn test_accuracy_partial_prefix_is_not_penalized() {
        assert_eq!(accuracy_percent("category", "cat"), 100);
    }

    #[test]
    fn test_accuracy_compares_characters_not_bytes() {
        assert_eq!(accuracy_percent("Übung", "Ubung"), 80);
        assert_eq!(accuracy_percent("Übung", "Üb"), 100);
    }

    #[test]
    fn test_accuracy_against_empty_reference() {
        assert_eq!(accuracy_percent("", "abc"), 0);
    }

    #[test]
    fn test_consistency_insufficient_samples() {
        assert_eq!(consistency_percent(&[]), 100);
        assert_eq!(consistency_percent(&[50.0]), 100);
    }

    #[test]
    fn test_consistency_zero_variance() {
        assert_eq!(consistency_percent(&[50.0, 50.0, 50.0]), 100);
    }

    #[test]
    fn test_consistency_zero_mean() {
        assert_eq!(consistency_percent(&[0.0, 0.0]), 0);
    }

    #[test]
    fn test_consistency_spread() {
        // mean 50, population std dev 10 -> 80
        assert_eq!(consistency_percent(&[40.0, 60.0]), 80);
        // mean 10, std dev 10 -> 0
        assert_eq!(consistency_percent(&[0.0, 20.0]), 0);
    }

    #[test]
    fn test_consistency_floors_at_zero() {
        // mean 25, std dev ~43.3 -> negative before clamping
        assert_eq!(consistency_percent(&[0.0, 0.0, 0.0, 100.0]), 0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(
            std_dev(&[100., 120., 90., 102., 94.]),
            Some(10.322790320451151)
        );
        assert_eq!(std_dev(&[42.0]), Some(0.0));
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn test_snapshot_default_matches_fresh_session() {
        let snapshot = MetricsSnapshot::default();
        assert_eq!(snapshot.wpm, 0);
        assert_eq!(snapshot.accuracy, 100);
        assert_eq!(snapshot.consistency, 100);
    }

    #[test]
    fn test_snapshot_compute() {
        let history = [WpmSample::new(1.0, 40.0), WpmSample::new(2.0, 60.0)];
        let snapshot = MetricsSnapshot::compute("hello world", "hello wor", 6.0, &history);
        // 9 chars over 6s = 1.8 words / 0.1 min = 18
        assert_eq!(snapshot.wpm, 18);
        assert_eq!(snapshot.accuracy, 100);
        assert_eq!(snapshot.consistency, 80);
    }

    #[test]
    fn test_sample_into_tuple() {
        let point: (f64, f64) = WpmSample::new(1.5, 42.0).into();
        assert_eq!(point, (1.5, 42.0));
    }
}
