//! Script pipeline commands: scenes, translate, generate, regenerate, retry.

use serde_json::{Map, Value, json};

use crate::app::api::{self, GenerateOptions, ScenePlan, StudioOptions};
use crate::domain::{AppError, ParameterOverrides, Scene, Storyboard};

pub fn run_scenes(script: &[u8], json: bool) -> Result<(), AppError> {
    let scenes = api::scenes(script)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&scenes)?);
        return Ok(());
    }

    if scenes.is_empty() {
        println!("ℹ️ No scenes found");
        return Ok(());
    }
    for scene in &scenes {
        print_scene_header(scene);
        if !scene.characters.is_empty() {
            println!("  characters: {}", scene.characters.join(", "));
        }
        let cues = scene.visual_cues.entries();
        if cues.is_empty() {
            println!("  cues: (none)");
        } else {
            let cues: Vec<String> =
                cues.iter().map(|(category, value)| format!("{}={}", category, value)).collect();
            println!("  cues: {}", cues.join(", "));
        }
    }
    Ok(())
}

pub fn run_translate(
    options: &StudioOptions,
    script: &[u8],
    overrides: &ParameterOverrides,
    json: bool,
) -> Result<(), AppError> {
    let plans = api::translate(options, script, overrides)?;
    if json {
        let document: Vec<Value> = plans.iter().map(plan_json).collect();
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    for plan in &plans {
        print_scene_header(&plan.scene);
        for (field, provenance) in plan.translation.changed_fields() {
            println!(
                "  {} = {} ({})",
                field,
                plan.translation.params.get(field),
                provenance.as_str()
            );
        }
        println!("  prompt: {}", plan.prompt.prompt);
    }
    Ok(())
}

fn plan_json(plan: &ScenePlan) -> Value {
    let provenance: Map<String, Value> = plan
        .translation
        .changed_fields()
        .into_iter()
        .map(|(field, provenance)| (field.path().to_string(), json!(provenance)))
        .collect();
    json!({
        "scene": plan.scene.number,
        "location": plan.scene.location,
        "cues": plan.scene.visual_cues,
        "params": plan.translation.params,
        "provenance": provenance,
        "prompt": plan.prompt,
    })
}

pub fn run_generate(
    options: &StudioOptions,
    script: &[u8],
    name: Option<String>,
    overrides: ParameterOverrides,
) -> Result<(), AppError> {
    let storyboard = api::generate(options, script, &GenerateOptions { name, overrides })?;

    println!(
        "✅ Created storyboard '{}' ({}) with {} frame(s)",
        storyboard.name,
        storyboard.id,
        storyboard.frames.len()
    );
    report_failures(&storyboard);
    Ok(())
}

pub fn run_regenerate(
    options: &StudioOptions,
    id: &str,
    scene: u32,
    overrides: &ParameterOverrides,
) -> Result<(), AppError> {
    let outcome = api::regenerate(options, id, scene, overrides)?;

    if outcome.frame.image.is_rendered() {
        println!("✅ Regenerated scene {} of {}", scene, id);
    } else {
        println!("⚠️  Scene {} was re-translated but its image failed", scene);
    }
    if outcome.changed.is_empty() {
        println!("  Parameters unchanged");
    } else {
        for field in &outcome.changed {
            println!("  {} = {}", field, outcome.frame.params.get(*field));
        }
    }
    Ok(())
}

pub fn run_retry(options: &StudioOptions, id: &str) -> Result<(), AppError> {
    let outcome = api::retry(options, id)?;

    if outcome.retried.is_empty() {
        println!("ℹ️ No failed frames in {}", id);
        return Ok(());
    }
    let recovered = outcome.recovered();
    if !recovered.is_empty() {
        println!("✅ Recovered {} frame(s): {}", recovered.len(), scene_list(&recovered));
    }
    if !outcome.still_failed.is_empty() {
        println!(
            "⚠️  {} frame(s) still failed: {}",
            outcome.still_failed.len(),
            scene_list(&outcome.still_failed)
        );
    }
    Ok(())
}

fn print_scene_header(scene: &Scene) {
    match &scene.location {
        Some(location) => println!("Scene {}: {}", scene.number, location),
        None => println!("Scene {}", scene.number),
    }
}

fn report_failures(storyboard: &Storyboard) {
    let failed = storyboard.failed_scenes();
    if failed.is_empty() {
        return;
    }
    println!("⚠️  {} frame(s) failed: {}", failed.len(), scene_list(&failed));
    println!("  Run `storyframe retry {}` to try again", storyboard.id);
}

fn scene_list(scenes: &[u32]) -> String {
    scenes.iter().map(|scene| scene.to_string()).collect::<Vec<_>>().join(", ")
}
