//! In-memory statistics over finished sessions.
//!
//! Nothing here is persisted; the history lives as long as the process.

use crate::catalog::Mode;
use crate::session::SessionSummary;
use chrono::{Days, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub wpm: u32,
    pub accuracy: u32,
    /// Seconds actually typed
    pub duration: u64,
    pub mode: Mode,
    pub mistakes: usize,
    pub consistency: u32,
}

impl SessionRecord {
    pub fn from_summary(summary: &SessionSummary, date: NaiveDate) -> Self {
        Self {
            date,
            wpm: summary.metrics.wpm,
            accuracy: summary.metrics.accuracy,
            duration: summary.elapsed_seconds.round() as u64,
            mode: summary.text.mode,
            mistakes: summary.mistakes,
            consistency: summary.metrics.consistency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum TimeRange {
    #[default]
    #[strum(serialize = "7d")]
    Week,
    #[strum(serialize = "30d")]
    Month,
    #[strum(serialize = "90d")]
    Quarter,
    #[strum(serialize = "1y")]
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
    ];

    pub fn days(&self) -> u64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "7 Days",
            TimeRange::Month => "30 Days",
            TimeRange::Quarter => "90 Days",
            TimeRange::Year => "1 Year",
        }
    }

    /// First day included when the range ends on `today`
    fn start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.days() - 1))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySummary {
    pub total_tests: usize,
    pub average_wpm: u32,
    pub average_accuracy: u32,
    /// Seconds
    pub total_time: u64,
    pub best_wpm: u32,
    pub best_accuracy: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Achievement {
    #[strum(serialize = "Speed Demon")]
    SpeedDemon,
    #[strum(serialize = "Accuracy Master")]
    AccuracyMaster,
    #[strum(serialize = "Consistent Typer")]
    ConsistentTyper,
    #[strum(serialize = "Code Warrior")]
    CodeWarrior,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::SpeedDemon,
        Achievement::AccuracyMaster,
        Achievement::ConsistentTyper,
        Achievement::CodeWarrior,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::SpeedDemon => "Reach 60+ WPM",
            Achievement::AccuracyMaster => "95%+ accuracy on 5 tests",
            Achievement::ConsistentTyper => "7-day practice streak",
            Achievement::CodeWarrior => "Complete 10 code tests",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    records: Vec<SessionRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    pub fn record(&mut self, summary: &SessionSummary, date: NaiveDate) {
        let record = SessionRecord::from_summary(summary, date);
        log::debug!("recorded session: {} wpm, {}%", record.wpm, record.accuracy);
        self.push(record);
    }

    /// Records dated inside `range` ending on `today`
    pub fn within(&self, range: TimeRange, today: NaiveDate) -> SessionHistory {
        let start = range.start(today);
        SessionHistory {
            records: self
                .records
                .iter()
                .filter(|r| r.date >= start && r.date <= today)
                .cloned()
                .collect(),
        }
    }

    /// Aggregates over all records. An empty history yields zeros.
    pub fn summary(&self, today: NaiveDate) -> HistorySummary {
        let total_tests = self.records.len();
        if total_tests == 0 {
            return HistorySummary::default();
        }

        let average = |total: u64| (total as f64 / total_tests as f64).round() as u32;
        let (current_streak, longest_streak) = self.streaks(today);

        HistorySummary {
            total_tests,
            average_wpm: average(self.records.iter().map(|r| r.wpm as u64).sum()),
            average_accuracy: average(self.records.iter().map(|r| r.accuracy as u64).sum()),
            total_time: self.records.iter().map(|r| r.duration).sum(),
            best_wpm: self.records.iter().map(|r| r.wpm).max().unwrap_or_default(),
            best_accuracy: self.records.iter().map(|r| r.accuracy).max().unwrap_or_default(),
            current_streak,
            longest_streak,
        }
    }

    /// Consecutive practice days as (current, longest). The current streak
    /// is alive while its last day is today or yesterday.
    pub fn streaks(&self, today: NaiveDate) -> (u32, u32) {
        let days: Vec<NaiveDate> = self.records.iter().map(|r| r.date).sorted().dedup().collect();

        let mut runs: Vec<(NaiveDate, u32)> = Vec::new();
        for day in days {
            match runs.last_mut() {
                Some((last, len)) if last.succ_opt() == Some(day) => {
                    *last = day;
                    *len += 1;
                }
                _ => runs.push((day, 1)),
            }
        }

        let longest = runs.iter().map(|(_, len)| *len).max().unwrap_or_default();
        let yesterday = today.pred_opt();
        let current = match runs.last() {
            Some((last, len)) if *last == today || Some(*last) == yesterday => *len,
            _ => 0,
        };
        (current, longest)
    }

    pub fn achievements(&self, today: NaiveDate) -> Vec<AchievementStatus> {
        let (_, longest_streak) = self.streaks(today);
        Achievement::ALL
            .into_iter()
            .map(|achievement| {
                let unlocked = match achievement {
                    Achievement::SpeedDemon => self.records.iter().any(|r| r.wpm >= 60),
                    Achievement::AccuracyMaster => {
                        self.records.iter().filter(|r| r.accuracy >= 95).count() >= 5
                    }
                    Achievement::ConsistentTyper => longest_streak >= 7,
                    Achievement::CodeWarrior => {
                        self.records.iter().filter(|r| r.mode == Mode::Code).count() >= 10
                    }
                };
                AchievementStatus {
                    achievement,
                    unlocked,
                }
            })
            .collect()
    }
}

/// `"Xh Ym"` when at least an hour, otherwise `"Ym"`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
