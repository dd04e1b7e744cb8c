//! New character screen.

use crate::app::App;
use anyhow::Result;
use chrono::Utc;
use tokio::io::AsyncBufRead;
use vocab_core::character::{AGE_RANGE, CLASS_RANGE};
use vocab_core::{Category, CharacterDraft, CharacterRepository};

/// Portrait keys offered for each category.
fn portraits(category: Category) -> &'static [&'static str] {
    match category {
        Category::Human => &["boy_01", "boy_02", "girl_01", "girl_02", "girl_03"],
        Category::Heroes => &["knight_01", "mage_01", "archer_01", "ranger_01"],
        Category::Monster => &["slime", "goblin", "dragon", "ghost"],
    }
}

impl<R: AsyncBufRead + Unpin> App<R> {
    pub(crate) async fn new_character(&mut self) -> Result<()> {
        println!("\n--- New character ---");
        let mut draft = CharacterDraft::default();

        let Some(name) = self.console.prompt("Name: ").await? else {
            return Ok(());
        };
        draft.name = name;

        let Some(age) = self.console.number("Age (1-99): ", AGE_RANGE).await? else {
            return Ok(());
        };
        draft.age = age;

        let Some(class) = self.console.number("Class (1-13): ", CLASS_RANGE).await? else {
            return Ok(());
        };
        draft.class = class;

        let Some(idx) = self.console.choose("Category:", &Category::ALL.map(Category::as_str)).await? else {
            return Ok(());
        };
        let category = Category::ALL[idx];
        draft.category = Some(category);

        let choices = portraits(category);
        let Some(idx) = self.console.choose("Portrait:", choices).await? else {
            return Ok(());
        };
        draft.portrait = Some(choices[idx].to_string());

        let record = draft.into_record(Utc::now(), &self.config)?;
        let path = self.store.save(&record)?;
        println!("Created {} ({}).", record.name, path.display());

        if self.console.confirm("Start playing now? [y/N] ").await? {
            self.play(record).await?;
        }
        Ok(())
    }
}
