//! Leaf command bodies.
//!
//! Kept separate from argument parsing so the interesting pieces (tag
//! collection, the numeric sum) stay testable without a terminal.
//! Range checks on numeric arguments live entirely in the clap layer;
//! nothing here re-validates.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Share your name and get a fun fact back.  Prompts when no name was
/// given on the command line.
pub fn what_am_i(name: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter your name, plz")
            .interact_text()?,
    };

    println!("\nWhat, {name}, are you?");
    println!(
        "{} {}{}",
        "Why you are loved".green(),
        name.blue(),
        "!".green()
    );
    Ok(())
}

/// Hidden, confirmation-checked password prompt.  The secret is read
/// and dropped; only the greeting is printed.
pub fn pword(name: &str) -> Result<()> {
    let _secret = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Hidden input string")
        .with_confirmation("Repeat for confirmation", "The entries do not match")
        .interact()?;

    println!(
        "Hello {}. Doing something very secure with password.",
        name.blue()
    );
    Ok(())
}

/// Prompt for tags until the sentinel is entered, then print the lot.
pub fn adding_tags() -> Result<()> {
    let tags = collect_tags(|| {
        Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter a tag, or `q` to quit")
            .interact_text()?)
    })?;
    println!("Tags: {tags:?}");
    Ok(())
}

/// Append entries from `next` until the `q` sentinel shows up.
///
/// No deduplication, no persistence; the order of entry is kept.
pub fn collect_tags<F>(mut next: F) -> Result<Vec<String>>
where
    F: FnMut() -> Result<String>,
{
    let mut tags = Vec::new();
    loop {
        let tag = next()?;
        if tag == "q" {
            break;
        }
        tags.push(tag);
    }
    Ok(tags)
}

/// Two spinners for the unknowably long: Task A spins in place while
/// Task B advances once per elapsed second.  Both clear on completion.
pub fn spin(seconds: u64) {
    let progress = MultiProgress::new();

    let task_a = progress.add(
        ProgressBar::new_spinner()
            .with_style(ProgressStyle::with_template("{spinner:.blue} {msg}").unwrap())
            .with_message("Task A..."),
    );
    let task_b = progress.add(
        ProgressBar::new(seconds)
            .with_style(ProgressStyle::with_template("{spinner:.blue} {msg} {pos}/{len}").unwrap())
            .with_message("Task B..."),
    );
    task_a.enable_steady_tick(Duration::from_millis(120));
    task_b.enable_steady_tick(Duration::from_millis(120));

    for _ in 0..seconds {
        thread::sleep(Duration::from_secs(1));
        task_b.inc(1);
    }

    task_a.finish_and_clear();
    task_b.finish_and_clear();
}

/// Progress bar advancing once per second, styled or plain.
pub fn progbar(seconds: u64, plain_bar: bool) {
    let style = if plain_bar {
        ProgressStyle::with_template("{wide_bar} {pos}/{len}").unwrap()
    } else {
        ProgressStyle::with_template("{msg} {wide_bar:.cyan/blue} {pos}/{len} ({eta})").unwrap()
    };

    let bar = ProgressBar::new(seconds)
        .with_style(style)
        .with_message("Sleeping...");

    let mut total_so_far = 0u64;
    for _ in 0..seconds {
        thread::sleep(Duration::from_secs(1));
        total_so_far += 1;
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "Done sleeping for {} seconds",
        total_so_far.to_string().cyan()
    );
}

/// Add two integers the parser has already range-checked.
pub fn numeric_intake(x: i64, y: i64) -> i64 {
    x + y
}
