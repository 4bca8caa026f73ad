use std::io::{BufRead, Write};

use nong_core::progress::{ProgressRecord, ProgressStore, SessionSummary};
use nong_core::state::AppState;
use rand::rngs::StdRng;

use crate::console::{Console, is_eof};
use crate::menu;

/// One interactive run of the learning loop
pub struct Session<R, W> {
    pub(crate) state: AppState,
    pub(crate) store: ProgressStore,
    pub(crate) progress: ProgressRecord,
    pub(crate) console: Console<R, W>,
    pub(crate) rng: StdRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        state: AppState,
        store: ProgressStore,
        progress: ProgressRecord,
        console: Console<R, W>,
        rng: StdRng,
    ) -> Self {
        Self {
            state,
            store,
            progress,
            console,
            rng,
        }
    }

    /// Main menu loop. Returns when the learner exits or input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.console
            .heading("🏮 SHANGHAINESE LEARNING APP 🏮\nLearn Shanghainese from English & Mandarin")?;

        loop {
            match self.main_menu().await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if is_eof(&e) => {
                    tracing::debug!("Input closed, leaving main menu");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(self.console, "\n👋 再会 (Goodbye)! Happy learning!")?;
        Ok(())
    }

    /// One menu round. `Ok(false)` means exit.
    async fn main_menu(&mut self) -> anyhow::Result<bool> {
        writeln!(self.console, "\n📋 MAIN MENU:")?;
        writeln!(self.console, "  1. 📚 Browse Vocabulary")?;
        writeln!(self.console, "  2. 🎴 Flashcard Mode")?;
        writeln!(self.console, "  3. 🎯 Quiz Mode")?;
        writeln!(self.console, "  4. 🌐 Translator")?;
        writeln!(self.console, "  5. 📈 View Progress")?;
        writeln!(self.console, "  0. ❌ Exit")?;

        match self.console.prompt("\nSelect option (0-5): ")?.as_str() {
            "0" => return Ok(false),
            "1" => menu::browse::browse_vocabulary(self)?,
            "2" => menu::flashcards::flashcard_mode(self).await?,
            "3" => menu::quiz::quiz_mode(self).await?,
            "4" => menu::translate::translator_mode(self).await?,
            "5" => menu::progress::view_progress(self)?,
            _ => writeln!(self.console, "❌ Invalid choice! Please select 0-5.")?,
        }
        Ok(true)
    }

    /// Record a finished session and persist the whole record.
    /// A failed save is reported but does not end the run.
    pub(crate) fn finish_session(&mut self, summary: SessionSummary) -> anyhow::Result<()> {
        self.progress.finalize_now(&summary);

        if let Err(e) = self.store.save(&self.progress) {
            tracing::error!(
                path = %self.store.path().display(),
                error = %e,
                "Failed to save progress"
            );
            writeln!(self.console, "❌ Could not save progress: {e}")?;
        }
        Ok(())
    }

    /// Speak `text` into the audio directory under `file_name`
    pub(crate) async fn pronounce(&mut self, text: &str, file_name: &str) -> anyhow::Result<()> {
        writeln!(self.console, "🔊 Generating authentic Shanghainese speech...")?;

        let path = self.state.config.storage.audio_dir().join(file_name);
        let speed = self.state.config.speech.default_speed;

        match self.state.speech.synthesize_to_file(text, speed, &path).await {
            Some(saved) => writeln!(self.console, "✅ Audio saved as {}", saved.display())?,
            None => writeln!(self.console, "❌ Speech unavailable, please try again later")?,
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    #[cfg(test)]
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
