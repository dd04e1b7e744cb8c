//! Main menu and the state shared by every screen.

use crate::console::Console;
use crate::paths::AppPaths;
use anyhow::Result;
use std::time::Duration;
use tokio::io::AsyncBufRead;
use tracing::warn;
use vocab_core::{CharacterRepository, CharacterStore, Config};

/// How long answer feedback stays on screen before the next word.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

const MAIN_MENU: [&str; 4] = ["New character", "Continue", "Settings", "Quit"];

pub struct App<R> {
    pub(crate) paths: AppPaths,
    pub(crate) config: Config,
    pub(crate) store: CharacterStore,
    pub(crate) console: Console<R>,
    pub(crate) feedback_delay: Duration,
}

impl<R: AsyncBufRead + Unpin> App<R> {
    /// Load (or create) the config under `paths` and open the save directory.
    pub fn new(paths: AppPaths, console: Console<R>) -> Self {
        let config = Config::load_or_create(&paths.config_file);
        let store = CharacterStore::new(&paths.saves_dir);
        Self {
            paths,
            config,
            store,
            console,
            feedback_delay: FEEDBACK_DELAY,
        }
    }

    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run menus until the player quits or input ends.
    ///
    /// Errors inside a screen are reported and lead back here.
    pub async fn main_menu(&mut self) -> Result<()> {
        loop {
            let title = format!(
                "\n=== Vocab Quest ===  ({} saved characters)",
                self.store.count()
            );
            let outcome = match self.console.choose(&title, &MAIN_MENU).await? {
                Some(0) => self.new_character().await,
                Some(1) => self.continue_character().await,
                Some(2) => self.edit_settings().await,
                _ => return Ok(()),
            };

            if let Err(e) = outcome {
                warn!(error = %e, "Screen failed");
                println!("Something went wrong: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use vocab_core::{Difficulty, Direction};

    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("vocab-quest-{}", uuid::Uuid::new_v4()));
            let paths = AppPaths::from_root(&root);
            paths.ensure_dirs().unwrap();
            Self(root)
        }

        fn paths(&self) -> AppPaths {
            AppPaths::from_root(&self.0)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn app(scratch: &Scratch, input: &'static str) -> App<&'static [u8]> {
        App::new(scratch.paths(), Console::new(input.as_bytes())).with_feedback_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn first_start_writes_default_config() {
        let scratch = Scratch::new();
        let mut app = app(&scratch, "4\n");
        app.main_menu().await.unwrap();
        assert!(scratch.paths().config_file.is_file());
        assert_eq!(app.config(), &Config::default());
    }

    #[tokio::test]
    async fn create_and_play_one_level() {
        let scratch = Scratch::new();
        let paths = scratch.paths();
        fs::write(
            paths.vocabulary_dir.join("A1.csv"),
            "German,English\nHaus,house\nBaum,tree\n",
        )
        .unwrap();

        // New character, play, answer both words (one wrong), back to the menu, quit.
        let input = "1\nAnna\n11\n5\n1\n1\ny\nHOUSE\nwrong\n3\n4\n";
        let mut app = app(&scratch, input);
        app.main_menu().await.unwrap();

        let saved = CharacterStore::new(&paths.saves_dir).list_all();
        assert_eq!(saved.len(), 1);
        let stats = saved[0].stats(Difficulty::A1).unwrap();
        assert_eq!(stats.total_words, 2);
        assert_eq!(stats.correct_answers + stats.wrong_answers, 2);

        let config = Config::load_or_create(&paths.config_file);
        assert_eq!(
            config.statistics.total_words_learned,
            u64::from(stats.correct_answers)
        );
    }

    fn one_word_level(scratch: &Scratch) {
        fs::write(
            scratch.paths().vocabulary_dir.join("A1.csv"),
            "German,English\nHaus,house\n",
        )
        .unwrap();
    }

    fn only_character(scratch: &Scratch) -> vocab_core::CharacterRecord {
        let mut saved = CharacterStore::new(&scratch.paths().saves_dir).list_all();
        assert_eq!(saved.len(), 1);
        saved.remove(0)
    }

    #[tokio::test]
    async fn blank_lines_are_not_scored() {
        let scratch = Scratch::new();
        one_word_level(&scratch);

        let input = "1\nAnna\n11\n5\n1\n1\ny\n\n   \nhouse\n3\n4\n";
        app(&scratch, input).main_menu().await.unwrap();

        let record = only_character(&scratch);
        let stats = record.stats(Difficulty::A1).unwrap();
        assert_eq!(stats.total_words, 1);
        assert_eq!(stats.wrong_answers, 0);
        assert_eq!(stats.current_streak, 1);
    }

    #[tokio::test]
    async fn completed_level_can_be_replayed() {
        let scratch = Scratch::new();
        one_word_level(&scratch);

        let input = "1\nAnna\n11\n5\n1\n1\ny\nhouse\n1\nhouse\n3\n4\n";
        let mut app = app(&scratch, input);
        app.main_menu().await.unwrap();

        let record = only_character(&scratch);
        assert_eq!(record.current_difficulty, Difficulty::A1);
        let stats = record.stats(Difficulty::A1).unwrap();
        assert_eq!(stats.correct_answers, 2);
        assert_eq!(stats.best_streak, 2);
        assert_eq!(app.config().game.difficulty_level, Difficulty::A1);
    }

    #[tokio::test]
    async fn completed_level_can_advance() {
        let scratch = Scratch::new();
        one_word_level(&scratch);

        // A2 has no vocabulary, so play returns to the menu right away.
        let input = "1\nAnna\n11\n5\n1\n1\ny\nhouse\n2\n4\n";
        let mut app = app(&scratch, input);
        app.main_menu().await.unwrap();

        assert_eq!(only_character(&scratch).current_difficulty, Difficulty::A2);
        let config = Config::load_or_create(&scratch.paths().config_file);
        assert_eq!(config.game.difficulty_level, Difficulty::A2);
        assert_eq!(app.config(), &config);
    }

    #[tokio::test]
    async fn settings_are_saved() {
        let scratch = Scratch::new();
        // Settings, difficulty -> B1, flip direction, save, quit.
        let mut app = app(&scratch, "3\n1\n3\n2\n4\n4\n");
        app.main_menu().await.unwrap();

        let config = Config::load_or_create(&scratch.paths().config_file);
        assert_eq!(config.game.difficulty_level, Difficulty::B1);
        assert_eq!(config.game.language_direction, Direction::TargetToSource);
    }

    #[tokio::test]
    async fn missing_vocabulary_returns_to_menu() {
        let scratch = Scratch::new();
        let input = "1\nBen\n9\n3\n3\n2\ny\n2\n1\n4\n";
        let mut app = app(&scratch, input);
        app.main_menu().await.unwrap();

        let saved = CharacterStore::new(&scratch.paths().saves_dir).list_all();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].level_stats.is_empty());
    }

    #[tokio::test]
    async fn invalid_character_is_reported_not_fatal() {
        let scratch = Scratch::new();
        // Blank name fails validation; the menu keeps running.
        let mut app = app(&scratch, "1\n\n11\n5\n1\n1\n4\n");
        app.main_menu().await.unwrap();
        assert_eq!(CharacterStore::new(&scratch.paths().saves_dir).count(), 0);
    }
}
