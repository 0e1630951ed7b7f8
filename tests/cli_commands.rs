mod common;

use common::{CITY_SCRIPT, TestContext};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

#[test]
fn scenes_lists_headings_and_cues() {
    let ctx = TestContext::new();
    let script = ctx.write_script("city.txt", CITY_SCRIPT);

    ctx.cli()
        .arg("scenes")
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scene 1: CITY STREET - NIGHT"))
        .stdout(predicate::str::contains("camera_movement=push_in"))
        .stdout(predicate::str::contains("characters: MARIA"));
}

#[test]
fn scenes_reads_stdin() {
    let ctx = TestContext::new();

    let output = ctx
        .cli()
        .args(["scenes", "-", "--json"])
        .write_stdin("Just a plain description.")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let scenes: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(scenes.as_array().unwrap().len(), 1);
    assert_eq!(scenes[0]["number"], 1);
    assert!(scenes[0]["location"].is_null());
    assert_eq!(scenes[0]["description"], "Just a plain description.");
}

#[test]
fn scenes_rejects_invalid_utf8() {
    let ctx = TestContext::new();
    let path = ctx.work_dir().join("broken.txt");
    fs::write(&path, [b'I', b'N', b'T', b'.', b' ', 0xff, 0xfe]).unwrap();

    ctx.cli()
        .arg("scenes")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn translate_json_reports_provenance() {
    let ctx = TestContext::new();
    let script = ctx.write_script("city.txt", CITY_SCRIPT);

    let output = ctx
        .cli()
        .args(["translate", "--json", "--set", "color.palette=cool"])
        .arg(&script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plans: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(plans[0]["params"]["camera"]["movement"], "push_in");
    assert_eq!(plans[0]["provenance"]["camera.movement"], "inferred");
    assert_eq!(plans[0]["provenance"]["color.palette"], "overridden");
    assert_eq!(plans[1]["params"]["color"]["palette"], "cool");
    assert!(plans[0]["prompt"]["prompt"].as_str().unwrap().contains("neon signs"));
}

#[test]
fn translate_rejects_unknown_field() {
    let ctx = TestContext::new();
    let script = ctx.write_script("city.txt", CITY_SCRIPT);

    ctx.cli()
        .args(["translate", "--set", "camera.zoom=2"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parameter field 'camera.zoom'"));
}

#[test]
fn translate_reads_overrides_file() {
    let ctx = TestContext::new();
    let script = ctx.write_script("city.txt", CITY_SCRIPT);
    fs::write(ctx.work_dir().join("look.json"), r#"{"lighting": {"style": "low_key"}}"#).unwrap();

    ctx.cli()
        .args(["translate", "--overrides", "look.json"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("lighting.style = low_key (overridden)"));
}

#[test]
fn init_writes_config_once() {
    let ctx = TestContext::new();

    ctx.cli().arg("init").assert().success().stdout(predicate::str::contains("storyframe.toml"));
    assert!(ctx.work_dir().join("storyframe.toml").is_file());

    ctx.cli()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_config_is_reported() {
    let ctx = TestContext::new();
    fs::write(ctx.work_dir().join("storyframe.toml"), "[generation]\nwidth = 0\n").unwrap();
    let script = ctx.write_script("city.txt", CITY_SCRIPT);

    ctx.cli()
        .args(["generate", "--mock"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: "));
}

#[test]
fn generate_without_token_fails() {
    let ctx = TestContext::new();
    let script = ctx.write_script("city.txt", CITY_SCRIPT);

    ctx.cli()
        .arg("generate")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("STORYFRAME_API_TOKEN"));
    assert!(ctx.storyboard_ids().is_empty());
}

#[test]
fn generate_empty_script_fails() {
    let ctx = TestContext::new();
    let script = ctx.write_script("empty.txt", "\n\n   \n");

    ctx.cli()
        .args(["generate", "--mock"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No scenes found"));
}

#[test]
fn mock_generate_then_list_show_export_delete() {
    let ctx = TestContext::new();
    let id = ctx.generate_mock("Night Diner");

    let dir = ctx.storyboards_dir().join(&id);
    assert!(dir.join("storyboard.json").is_file());
    assert!(dir.join("scene_001.png").is_file());
    assert!(dir.join("scene_002.png").is_file());

    ctx.cli()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(&id))
        .stdout(predicate::str::contains("Night Diner"))
        .stdout(predicate::str::contains("2 frame(s)"));

    ctx.cli()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scene 2: DINER - DAY [rendered]"));

    ctx.cli()
        .args(["export", &id, "--output", "shots/night.md"])
        .assert()
        .success();
    let document = fs::read_to_string(ctx.work_dir().join("shots/night.md")).unwrap();
    assert!(document.starts_with("# Night Diner"));
    assert!(document.contains("scene_001.png"));

    ctx.cli().args(["delete", &id, "--yes"]).assert().success();
    assert!(ctx.storyboard_ids().is_empty());

    ctx.cli()
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn regenerate_changes_only_requested_frame() {
    let ctx = TestContext::new();
    let id = ctx.generate_mock("Regen");
    let record = ctx.storyboards_dir().join(&id).join("storyboard.json");
    let before: Value = serde_json::from_str(&fs::read_to_string(&record).unwrap()).unwrap();

    ctx.cli()
        .args(["regenerate", &id, "2", "--mock", "--set", "camera.angle=low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("camera.angle = low"));

    let after: Value = serde_json::from_str(&fs::read_to_string(&record).unwrap()).unwrap();
    assert_eq!(after["frames"][0], before["frames"][0]);
    assert_eq!(after["frames"][1]["params"]["camera"]["angle"], "low");
    assert_eq!(after["frames"][1]["overrides"]["camera"]["angle"], "low");
}

#[test]
fn regenerate_unknown_scene_fails() {
    let ctx = TestContext::new();
    let id = ctx.generate_mock("Regen");

    ctx.cli()
        .args(["regenerate", &id, "7", "--mock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no frame for scene 7"));
}

#[test]
fn retry_with_no_failures_is_a_no_op() {
    let ctx = TestContext::new();
    let id = ctx.generate_mock("Retry");

    ctx.cli()
        .args(["retry", &id, "--mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No failed frames"));
}
