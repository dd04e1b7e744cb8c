//! Line-based prompts.

use anyhow::Result;
use std::fmt::Display;
use std::io::Write;
use std::ops::RangeInclusive;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads answers line by line from any async reader.
///
/// Every read returns `None` once input is closed, which callers treat as
/// "back to the previous menu".
pub struct Console<R> {
    lines: Lines<R>,
}

impl Console<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Console<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Print `label` and read one trimmed line.
    pub async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }

    /// Ask until the answer is a number inside `range`.
    pub async fn number<T>(&mut self, label: &str, range: RangeInclusive<T>) -> Result<Option<T>>
    where
        T: FromStr + PartialOrd + Display,
    {
        loop {
            let Some(line) = self.prompt(label).await? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) if range.contains(&value) => return Ok(Some(value)),
                _ => println!(
                    "Please enter a number from {} to {}.",
                    range.start(),
                    range.end()
                ),
            }
        }
    }

    /// Numbered menu; returns the index of the chosen option.
    pub async fn choose<S: AsRef<str>>(&mut self, title: &str, options: &[S]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        println!("{title}");
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option.as_ref());
        }
        match self.number("> ", 1..=options.len()).await? {
            Some(n) => Ok(Some(n - 1)),
            None => Ok(None),
        }
    }

    /// Yes/no question; anything but an explicit yes is a no.
    pub async fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.prompt(label).await?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }
}
