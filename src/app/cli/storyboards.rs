//! Saved storyboard commands.

use std::path::Path;

use dialoguer::{Confirm, Select};

use crate::app::api::{self, StudioOptions};
use crate::domain::{AppError, FrameImage, StoryboardSummary};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn run_list(options: &StudioOptions) -> Result<(), AppError> {
    let summaries = api::list(options)?;
    if summaries.is_empty() {
        println!("ℹ️ No storyboards saved yet");
        return Ok(());
    }
    for summary in &summaries {
        println!("{}", summary_line(summary));
    }
    Ok(())
}

pub fn run_show(options: &StudioOptions, id: Option<String>, json: bool) -> Result<(), AppError> {
    let Some(id) = resolve_id(options, id)? else {
        return Ok(());
    };
    let storyboard = api::show(options, &id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&storyboard)?);
        return Ok(());
    }

    println!("{} ({})", storyboard.name, storyboard.id);
    println!(
        "created {}, updated {}",
        storyboard.created_at.format(TIME_FORMAT),
        storyboard.updated_at.format(TIME_FORMAT)
    );
    for frame in &storyboard.frames {
        let status = match &frame.image {
            FrameImage::Rendered { .. } => "rendered".to_string(),
            FrameImage::Failed { reason } => format!("failed: {}", reason),
        };
        println!();
        match &frame.location {
            Some(location) => println!("Scene {}: {} [{}]", frame.scene_number, location, status),
            None => println!("Scene {} [{}]", frame.scene_number, status),
        }
        println!("  {}", frame.prompt.prompt);
    }
    Ok(())
}

pub fn run_delete(options: &StudioOptions, id: Option<String>, yes: bool) -> Result<(), AppError> {
    let Some(id) = resolve_id(options, id)? else {
        return Ok(());
    };
    if !yes && !confirm(&format!("Delete storyboard {}?", id))? {
        println!("ℹ️ Cancelled");
        return Ok(());
    }
    api::delete(options, &id)?;
    println!("✅ Deleted storyboard {}", id);
    Ok(())
}

pub fn run_export(
    options: &StudioOptions,
    id: Option<String>,
    output: Option<&Path>,
) -> Result<(), AppError> {
    let Some(id) = resolve_id(options, id)? else {
        return Ok(());
    };
    let document = api::export(options, &id, output)?;
    match output {
        Some(path) => println!("✅ Wrote shot list to {}", path.display()),
        None => print!("{}", document),
    }
    Ok(())
}

fn summary_line(summary: &StoryboardSummary) -> String {
    let mut line = format!(
        "{}  {}  {} frame(s)  {}",
        summary.id,
        summary.name,
        summary.frame_count,
        summary.created_at.format(TIME_FORMAT)
    );
    if summary.failed_count > 0 {
        line.push_str(&format!("  ({} failed)", summary.failed_count));
    }
    line
}

/// Use the given id, or ask the user to pick a saved storyboard.
fn resolve_id(options: &StudioOptions, id: Option<String>) -> Result<Option<String>, AppError> {
    if id.is_some() {
        return Ok(id);
    }

    let summaries = api::list(options)?;
    if summaries.is_empty() {
        return Err(AppError::config_error("No storyboards saved yet"));
    }
    let items: Vec<String> = summaries.iter().map(summary_line).collect();
    let selection = Select::new()
        .with_prompt("Select storyboard")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|err| AppError::config_error(format!("Failed to select storyboard: {}", err)))?;

    Ok(selection.map(|index| summaries[index].id.clone()))
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_opt()
        .map_err(|err| AppError::config_error(format!("Failed to read confirmation: {}", err)))?;
    Ok(answer.unwrap_or(false))
}
