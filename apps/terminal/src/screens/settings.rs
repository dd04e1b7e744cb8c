//! Settings screen.

use crate::app::App;
use anyhow::{Context, Result};
use tokio::io::AsyncBufRead;
use vocab_core::Difficulty;

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

impl<R: AsyncBufRead + Unpin> App<R> {
    pub(crate) async fn edit_settings(&mut self) -> Result<()> {
        loop {
            let options = [
                format!("Difficulty: {}", self.config.game.difficulty_level),
                format!("Direction: {}", self.config.game.language_direction),
                format!(
                    "Shuffle words: {}",
                    on_off(self.config.learning.randomize_word_order)
                ),
                "Save and back".to_string(),
            ];

            match self.console.choose("\n--- Settings ---", &options).await? {
                Some(0) => {
                    let tags = Difficulty::ALL.map(Difficulty::as_str);
                    if let Some(idx) = self.console.choose("Difficulty:", &tags).await? {
                        self.config.game.difficulty_level = Difficulty::ALL[idx];
                    }
                }
                Some(1) => {
                    self.config.game.language_direction =
                        self.config.game.language_direction.flipped();
                }
                Some(2) => {
                    let learning = &mut self.config.learning;
                    learning.randomize_word_order = !learning.randomize_word_order;
                }
                _ => break,
            }
        }

        self.config
            .save(&self.paths.config_file)
            .context("failed to save settings")?;
        println!("Settings saved.");
        Ok(())
    }
}
