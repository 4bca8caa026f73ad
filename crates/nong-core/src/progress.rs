use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::quiz::QuizTally;

/// One finished quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub date: NaiveDateTime,
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
}

/// Learner state persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Dialect forms the learner reported as known, oldest first, no duplicates
    #[serde(default)]
    pub words_learned: Vec<String>,
    #[serde(default)]
    pub quiz_scores: Vec<QuizScore>,
    #[serde(default)]
    pub total_study_sessions: u32,
    #[serde(default)]
    pub last_session: Option<NaiveDateTime>,
}

/// What a finished session contributes to the record
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSummary {
    Quiz(QuizTally),
    /// Flashcard run
    Study,
}

impl ProgressRecord {
    /// Set-union insert. Returns false when the word was already learned.
    pub fn mark_learned(&mut self, shanghainese: &str) -> bool {
        if self.words_learned.iter().any(|w| w == shanghainese) {
            return false;
        }
        self.words_learned.push(shanghainese.to_string());
        true
    }

    /// Quizzes append a score, flashcard runs bump the study counter.
    /// Returns the stamp written to `last_session`.
    pub fn finalize_session(
        &mut self,
        summary: &SessionSummary,
        now: NaiveDateTime,
    ) -> NaiveDateTime {
        let stamp = self.next_stamp(now);

        match summary {
            SessionSummary::Quiz(tally) => self.quiz_scores.push(QuizScore {
                date: stamp,
                score: tally.score,
                total: tally.total,
                percentage: tally.percentage(),
            }),
            SessionSummary::Study => self.total_study_sessions += 1,
        }

        self.last_session = Some(stamp);
        stamp
    }

    /// `finalize_session` with the local wall clock
    pub fn finalize_now(&mut self, summary: &SessionSummary) -> NaiveDateTime {
        self.finalize_session(summary, Local::now().naive_local())
    }

    /// Last `n` quiz scores, oldest first
    pub fn recent_scores(&self, n: usize) -> &[QuizScore] {
        let start = self.quiz_scores.len().saturating_sub(n);
        &self.quiz_scores[start..]
    }

    /// Last `n` learned words, oldest first
    pub fn recent_words(&self, n: usize) -> &[String] {
        let start = self.words_learned.len().saturating_sub(n);
        &self.words_learned[start..]
    }

    // Session stamps never go backwards, even if the clock does
    fn next_stamp(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.last_session {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        }
    }
}

/// JSON file holding one ProgressRecord, rewritten wholesale on save
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a fresh start
    pub fn load(&self) -> Result<ProgressRecord, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No progress file at {}, starting fresh", self.path.display());
                return Ok(ProgressRecord::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, progress: &ProgressRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, json)?;
        tracing::debug!("Saved progress to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn marking_known_is_idempotent() {
        let mut progress = ProgressRecord::default();

        assert!(progress.mark_learned("侬好"));
        assert!(!progress.mark_learned("侬好"));
        assert!(progress.mark_learned("谢谢侬"));

        assert_eq!(progress.words_learned, ["侬好", "谢谢侬"]);
    }

    #[test]
    fn quiz_and_study_update_different_counters() {
        let mut progress = ProgressRecord::default();

        let quiz = SessionSummary::Quiz(QuizTally { score: 3, total: 4 });
        progress.finalize_session(&quiz, at(9, 0, 0));
        assert_eq!(progress.total_study_sessions, 0);
        assert_eq!(progress.quiz_scores.len(), 1);
        assert_eq!(progress.quiz_scores[0].percentage, 75.0);

        progress.finalize_session(&SessionSummary::Study, at(10, 0, 0));
        assert_eq!(progress.total_study_sessions, 1);
        assert_eq!(progress.quiz_scores.len(), 1);
        assert_eq!(progress.last_session, Some(at(10, 0, 0)));
    }

    #[test]
    fn last_session_is_strictly_increasing() {
        let mut progress = ProgressRecord::default();
        let summary = SessionSummary::Study;

        let first = progress.finalize_session(&summary, at(12, 0, 0));
        let same_clock = progress.finalize_session(&summary, at(12, 0, 0));
        let clock_went_back = progress.finalize_session(&summary, at(11, 0, 0));

        assert!(first < same_clock);
        assert!(same_clock < clock_went_back);
        assert_eq!(progress.last_session, Some(clock_went_back));
    }

    #[test]
    fn recent_slices() {
        let mut progress = ProgressRecord::default();
        for w in ["a", "b", "c"] {
            progress.mark_learned(w);
        }
        assert_eq!(progress.recent_words(2), ["b", "c"]);
        assert_eq!(progress.recent_words(10).len(), 3);
        assert!(progress.recent_scores(5).is_empty());
    }

    #[test]
    fn store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::new(dir.path().join("nested").join("progress.json"));

        let mut progress = store.load().unwrap();
        assert_eq!(progress, ProgressRecord::default());

        progress.mark_learned("侬好");
        let first = progress.finalize_now(&SessionSummary::Quiz(QuizTally { score: 2, total: 3 }));
        store.save(&progress).unwrap();

        let mut reloaded = store.load().unwrap();
        assert_eq!(reloaded, progress);

        let second = reloaded.finalize_now(&SessionSummary::Study);
        store.save(&reloaded).unwrap();

        let again = store.load().unwrap();
        assert_eq!(again, reloaded);
        assert!(second > first);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"words_learned\""));
        assert!(raw.contains("侬好"));
    }

    #[test]
    fn reads_files_written_by_older_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_progress.json");
        std::fs::write(
            &path,
            r#"{
  "words_learned": ["侬好"],
  "quiz_scores": [{"date": "2025-03-01T10:15:30.123456", "score": 4, "total": 5, "percentage": 80.0}],
  "total_study_sessions": 2,
  "last_session": null
}"#,
        )
        .unwrap();

        let progress = ProgressStore::new(&path).load().unwrap();
        assert_eq!(progress.total_study_sessions, 2);
        assert_eq!(progress.quiz_scores[0].score, 4);
        assert!(progress.last_session.is_none());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ProgressStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
