use crate::catalog::{Difficulty, Language, Mode, PracticeText};
use crate::embedded::{self, EmbeddedError};
use crate::session::SessionSummary;
use crate::store::{SessionConfig, TimerDuration};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChallengeKind {
    Speed,
    Accuracy,
    Endurance,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScore {
    pub username: String,
    pub wpm: u32,
    pub accuracy: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub text: String,
    pub difficulty: Difficulty,
    pub kind: ChallengeKind,
    pub target_wpm: Option<u32>,
    pub target_accuracy: Option<u32>,
    /// Seconds
    pub duration: u64,
    pub participants: u32,
    pub top_score: TopScore,
}

impl Challenge {
    /// The challenge shipped with the binary
    pub fn today() -> Result<Self, EmbeddedError> {
        embedded::read_json("challenge.json")
    }

    pub fn practice_text(&self) -> PracticeText {
        PracticeText::new(self.text.clone(), Language::En, Mode::Words, self.difficulty)
    }

    /// `base` with the challenge's difficulty and, when it is an allowed
    /// session length, its duration
    pub fn session_config(&self, base: SessionConfig) -> SessionConfig {
        let duration = TimerDuration::try_from(self.duration).unwrap_or_else(|e| {
            log::warn!("challenge '{}': {e}, keeping {}s", self.id, base.duration.as_secs());
            base.duration
        });
        SessionConfig {
            difficulty: self.difficulty,
            duration,
            ..base
        }
    }

    pub fn evaluate(&self, summary: &SessionSummary) -> ChallengeOutcome {
        let wpm = summary.metrics.wpm;
        let accuracy = summary.metrics.accuracy;
        ChallengeOutcome {
            challenge_id: self.id.clone(),
            wpm,
            accuracy,
            wpm_target_met: self.target_wpm.map_or(true, |target| wpm >= target),
            accuracy_target_met: self.target_accuracy.map_or(true, |target| accuracy >= target),
            score: score(wpm, accuracy),
        }
    }
}

/// Ranking score used for challenge results
pub fn score(wpm: u32, accuracy: u32) -> u32 {
    wpm * accuracy
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeOutcome {
    pub challenge_id: String,
    pub wpm: u32,
    pub accuracy: u32,
    pub wpm_target_met: bool,
    pub accuracy_target_met: bool,
    pub score: u32,
}

impl ChallengeOutcome {
    pub fn passed(&self) -> bool {
        self.wpm_target_met && self.accuracy_target_met
    }
}

/// Personal challenge record. Only passed attempts count towards completions
/// and the streak; a day counts once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStats {
    pub best_wpm: u32,
    pub best_accuracy: u32,
    pub challenges_completed: u32,
    pub current_streak: u32,
    pub last_completed: Option<NaiveDate>,
}

impl ChallengeStats {
    pub fn record(&mut self, outcome: &ChallengeOutcome, date: NaiveDate) {
        self.best_wpm = self.best_wpm.max(outcome.wpm);
        self.best_accuracy = self.best_accuracy.max(outcome.accuracy);

        if !outcome.passed() || self.last_completed == Some(date) {
            return;
        }

        let yesterday = date.checked_sub_days(Days::new(1));
        self.current_streak = match self.last_completed {
            Some(last) if Some(last) == yesterday => self.current_streak + 1,
            _ => 1,
        };
        self.challenges_completed += 1;
        self.last_completed = Some(date);
    }
}
