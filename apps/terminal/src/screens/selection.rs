//! Pick a saved character to continue with.

use crate::app::App;
use anyhow::Result;
use tokio::io::AsyncBufRead;
use vocab_core::date_utils::format_day;
use vocab_core::{CharacterRecord, CharacterRepository};

fn describe(record: &CharacterRecord) -> String {
    format!(
        "{} ({}, age {}, class {}) created {}",
        record.name,
        record.category,
        record.age,
        record.class,
        format_day(record.created_at)
    )
}

impl<R: AsyncBufRead + Unpin> App<R> {
    pub(crate) async fn continue_character(&mut self) -> Result<()> {
        let store = self.store.clone();
        let mut records = tokio::task::spawn_blocking(move || store.list_all()).await?;
        if records.is_empty() {
            println!("No saved characters yet.");
            return Ok(());
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut options: Vec<String> = records.iter().map(describe).collect();
        options.push("Back".to_string());

        match self.console.choose("\nChoose a character:", &options).await? {
            Some(idx) if idx < records.len() => {
                let record = records.swap_remove(idx);
                self.play(record).await
            }
            _ => Ok(()),
        }
    }
}
