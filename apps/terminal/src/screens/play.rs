//! The quiz loop for one character.

use crate::app::App;
use crate::console::Console;
use anyhow::Result;
use std::time::Duration;
use tokio::io::AsyncBufRead;
use tracing::warn;
use vocab_core::{
    CharacterRecord, CharacterRepository, Difficulty, LevelRun, LevelSummary, SessionState,
    VocabularyLoader,
};

/// Typed instead of an answer to leave the level.
const QUIT: &str = ":q";

/// Choices offered once a level is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterLevel {
    Replay,
    Advance(Difficulty),
    Menu,
}

impl AfterLevel {
    fn label(&self) -> String {
        match self {
            Self::Replay => "Practice this level again".to_string(),
            Self::Advance(next) => format!("Move on to level {next}"),
            Self::Menu => "Back to menu".to_string(),
        }
    }
}

fn after_level(next: Option<Difficulty>) -> Vec<AfterLevel> {
    let mut choices = vec![AfterLevel::Replay];
    choices.extend(next.map(AfterLevel::Advance));
    choices.push(AfterLevel::Menu);
    choices
}

/// How a level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ending {
    Completed,
    Left,
}

impl<R: AsyncBufRead + Unpin> App<R> {
    /// Play levels with `record` until the player stops.
    pub(crate) async fn play(&mut self, mut record: CharacterRecord) -> Result<()> {
        record.apply_settings(&self.config);
        println!(
            "\nWelcome, {}! Type the translation, or {QUIT} to leave.",
            record.name
        );

        loop {
            let difficulty = record.current_difficulty;
            let loader = VocabularyLoader::new(&self.paths.vocabulary_dir, &self.config);
            let words = tokio::task::spawn_blocking(move || loader.load(difficulty)).await?;
            if words.is_empty() {
                println!("No vocabulary available for level {difficulty}.");
                return Ok(());
            }

            let mut run = LevelRun::with_words(record, &self.store, words);
            let ending = quiz(&mut self.console, &mut run, self.feedback_delay).await?;

            let summary = run.summary();
            let (finished, saved) = run.finish();
            record = finished;
            if let Err(e) = saved {
                println!("Warning: progress could not be saved ({e}).");
            }

            self.config
                .statistics
                .record_session(summary.correct_this_run, summary.elapsed);
            self.save_config();

            if ending == Ending::Left {
                println!("Left level {difficulty}.");
                return Ok(());
            }

            print_summary(&summary);
            if summary.next_difficulty.is_none() {
                println!("That was the last level. Well done!");
            }
            let choices = after_level(summary.next_difficulty);
            let labels: Vec<String> = choices.iter().map(AfterLevel::label).collect();
            let next = match self.console.choose("What next?", &labels).await? {
                Some(idx) => choices[idx],
                None => AfterLevel::Menu,
            };
            let next = match next {
                AfterLevel::Replay => continue,
                AfterLevel::Advance(next) => next,
                AfterLevel::Menu => return Ok(()),
            };

            record.current_difficulty = next;
            self.config.game.difficulty_level = next;
            self.save_config();
            self.store.save(&record)?;
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save(&self.paths.config_file) {
            warn!(error = %e, "Could not save config");
        }
    }
}

/// Ask words until the level runs out or the player leaves.
async fn quiz<R, S>(
    console: &mut Console<R>,
    run: &mut LevelRun<'_, S>,
    feedback_delay: Duration,
) -> Result<Ending>
where
    R: AsyncBufRead + Unpin,
    S: CharacterRepository,
{
    while run.session().state() == SessionState::AwaitingAnswer {
        let session = run.session();
        if let Some(prompt) = session.prompt() {
            println!(
                "\n[{}/{}] {prompt}",
                session.asked(),
                session.total_words()
            );
        }

        // A blank line is not an answer.
        let answer = loop {
            let Some(line) = console.prompt("> ").await? else {
                return Ok(Ending::Left);
            };
            if !line.is_empty() {
                break line;
            }
        };
        if answer == QUIT {
            return Ok(Ending::Left);
        }

        let feedback = run.submit_answer(&answer)?;
        let outcome = &feedback.outcome;
        if outcome.correct {
            println!("Correct! Streak: {}", outcome.streak);
        } else {
            println!("Wrong. The answer is \"{}\".", outcome.expected);
        }
        if let Some(e) = &feedback.persist_error {
            println!("Warning: progress could not be saved ({e}).");
        }

        tokio::time::sleep(feedback_delay).await;
        run.acknowledge_and_continue()?;
    }
    Ok(Ending::Completed)
}

fn print_summary(summary: &LevelSummary) {
    let secs = summary.elapsed.as_secs();
    println!(
        "\nLevel {} complete: {}/{} correct in {}m {:02}s.",
        summary.difficulty,
        summary.correct_this_run,
        summary.answered_this_run,
        secs / 60,
        secs % 60
    );
    if let Some(stats) = &summary.stats {
        println!(
            "All time: {} correct, {} wrong, best streak {}, accuracy {:.0}%.",
            stats.correct_answers,
            stats.wrong_answers,
            stats.best_streak,
            stats.accuracy()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_level_offers_no_advance() {
        assert_eq!(
            after_level(Some(Difficulty::B2)),
            vec![
                AfterLevel::Replay,
                AfterLevel::Advance(Difficulty::B2),
                AfterLevel::Menu
            ]
        );
        assert_eq!(after_level(None), vec![AfterLevel::Replay, AfterLevel::Menu]);
    }
}
