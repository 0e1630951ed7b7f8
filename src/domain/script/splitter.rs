use super::{Scene, Setting};
use crate::domain::AppError;
use crate::domain::cues::extract_from_text;

const BOM: char = '\u{feff}';

/// Slugline prefixes, longest first so combined markers win over their parts.
const HEADING_MARKERS: &[(&str, Setting)] = &[
    ("int./ext.", Setting::InteriorExterior),
    ("ext./int.", Setting::InteriorExterior),
    ("int/ext", Setting::InteriorExterior),
    ("i/e.", Setting::InteriorExterior),
    ("i/e", Setting::InteriorExterior),
    ("int.", Setting::Interior),
    ("ext.", Setting::Exterior),
];

/// A recognised scene heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub location: Option<String>,
    pub setting: Option<Setting>,
}

/// Recognise a scene heading line, returning its location text and setting.
///
/// Accepts `INT.`, `EXT.`, `INT./EXT.`, `EXT./INT.`, `I/E.` and `I/E` prefixes followed by
/// whitespace (case-insensitive), and forced headings of the form `.LOCATION`.
pub fn heading(line: &str) -> Option<Heading> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix('.') {
        if rest.chars().next().is_some_and(char::is_alphanumeric) {
            return Some(Heading { location: non_empty(rest), setting: None });
        }
        return None;
    }

    let lower = line.to_ascii_lowercase();
    for (marker, setting) in HEADING_MARKERS {
        if !lower.starts_with(marker) {
            continue;
        }
        let rest = &line[marker.len()..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return Some(Heading { location: non_empty(rest), setting: Some(*setting) });
        }
    }
    None
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Decode raw bytes as UTF-8 and split them. A leading byte-order mark is ignored.
pub fn split_bytes(bytes: &[u8]) -> Result<Vec<Scene>, AppError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| AppError::MalformedScript { offset: err.valid_up_to() })?;
    Ok(split(text))
}

/// Segment script text into scenes in document order.
///
/// Every heading line opens a scene. Text before the first heading is not part of any scene. A
/// script without headings becomes a single scene with no location; blank input yields no scenes.
pub fn split(text: &str) -> Vec<Scene> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks: Vec<(Option<Heading>, Vec<&str>)> = Vec::new();
    let mut preamble = Vec::new();

    for line in text.lines() {
        if let Some(found) = heading(line) {
            blocks.push((Some(found), Vec::new()));
        } else if let Some((_, body)) = blocks.last_mut() {
            body.push(line);
        } else {
            preamble.push(line);
        }
    }

    if blocks.is_empty() {
        blocks.push((None, preamble));
    }

    blocks
        .into_iter()
        .enumerate()
        .map(|(index, (found, body))| {
            let description = collapse(&body);
            let (location, setting) = match found {
                Some(found) => (found.location, found.setting),
                None => (None, None),
            };
            Scene {
                number: index as u32 + 1,
                location,
                setting,
                characters: characters(&body),
                visual_cues: extract_from_text(&description),
                description,
            }
        })
        .collect()
}

/// Trim every line, drop outer blank lines and collapse inner blank runs to one.
fn collapse(lines: &[&str]) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in lines.iter().map(|line| line.trim()) {
        if line.is_empty() && kept.last().is_none_or(|last| last.is_empty()) {
            continue;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|last| last.is_empty()) {
        kept.pop();
    }
    kept.join("\n")
}

/// Character cue lines: upper-case names, extension such as `(V.O.)` removed, first occurrence kept.
fn characters(lines: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in lines {
        let Some(name) = character_name(line) else {
            continue;
        };
        if !names.iter().any(|existing| *existing == name) {
            names.push(name);
        }
    }
    names
}

fn character_name(line: &str) -> Option<String> {
    let line = line.trim();
    let name = match line.find('(') {
        Some(open) if line.ends_with(')') => line[..open].trim_end(),
        _ => line,
    };

    let mut chars = name.chars();
    let first = chars.next()?;
    if !first.is_uppercase() || name.chars().count() < 2 {
        return None;
    }
    let valid = name
        .chars()
        .all(|c| c.is_uppercase() || c == ' ' || c == '\'' || c == '-' || c == '.');
    valid.then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{CameraMovement, ShotType, TimeOfDay};
    use proptest::prelude::*;

    #[test]
    fn city_street_example() {
        let scenes = split("EXT. CITY STREET - NIGHT\n\nWide shot, neon signs, camera slowly pushes in.");
        assert_eq!(scenes.len(), 1);
        let scene = &scenes[0];
        assert_eq!(scene.number, 1);
        assert_eq!(scene.location.as_deref(), Some("CITY STREET - NIGHT"));
        assert_eq!(scene.setting, Some(Setting::Exterior));
        assert_eq!(scene.description, "Wide shot, neon signs, camera slowly pushes in.");
        assert_eq!(scene.visual_cues.shot_type, Some(ShotType::Wide));
        assert_eq!(scene.visual_cues.lighting_time, Some(TimeOfDay::Night));
        assert_eq!(scene.visual_cues.camera_movement, Some(CameraMovement::PushIn));
    }

    #[test]
    fn plain_text_is_a_single_scene() {
        let scenes = split("Just a plain description.");
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].number, 1);
        assert_eq!(scenes[0].location, None);
        assert_eq!(scenes[0].description, "Just a plain description.");
    }

    #[test]
    fn empty_and_blank_input_yield_no_scenes() {
        assert!(split("").is_empty());
        assert!(split(" \n\t\n").is_empty());
        assert!(split("\u{feff}").is_empty());
    }

    #[test]
    fn consecutive_headings_give_empty_description() {
        let scenes = split("INT. HALLWAY - DAY\nEXT. GARDEN - DAY\nRoses everywhere.");
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].description, "");
        assert_eq!(scenes[1].number, 2);
        assert_eq!(scenes[1].description, "Roses everywhere.");
    }

    #[test]
    fn description_is_trimmed_and_blank_runs_collapse() {
        let scenes = split("INT. ROOM\n\n\n   First line.  \n\n\n\nSecond line.\n\n");
        assert_eq!(scenes[0].description, "First line.\n\nSecond line.");
    }

    #[test]
    fn preamble_before_first_heading_is_dropped() {
        let scenes = split("TITLE PAGE\nby Someone\n\nINT. KITCHEN - MORNING\nCoffee brews.");
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].description, "Coffee brews.");
        assert!(scenes[0].characters.is_empty());
    }

    #[test]
    fn recognises_heading_variants() {
        assert_eq!(heading("int. kitchen").unwrap().setting, Some(Setting::Interior));
        assert_eq!(
            heading("INT./EXT. CAR - MOVING").unwrap().setting,
            Some(Setting::InteriorExterior)
        );
        assert_eq!(heading("I/E BOAT").unwrap().location.as_deref(), Some("BOAT"));
        let forced = heading(".FLASHBACK").unwrap();
        assert_eq!(forced.location.as_deref(), Some("FLASHBACK"));
        assert_eq!(forced.setting, None);

        assert!(heading("INTERIOR DESIGN").is_none());
        assert!(heading("...and then").is_none());
        assert!(heading("EXTRA WIDE").is_none());
        assert!(heading("MARIA").is_none());
    }

    #[test]
    fn collects_characters_once_without_extensions() {
        let script = "INT. DINER - NIGHT\n\nMARIA\nCoffee?\n\nJOE (V.O.)\nBlack.\n\nMARIA\nSure.";
        let scenes = split(script);
        assert_eq!(scenes[0].characters, vec!["MARIA".to_string(), "JOE".to_string()]);
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let err = split_bytes(b"INT. ROOM\n\xff\xfe").unwrap_err();
        assert!(matches!(err, AppError::MalformedScript { offset: 10 }));
    }

    #[test]
    fn bom_is_ignored() {
        let scenes = split_bytes(b"\xef\xbb\xbfEXT. FIELD\nGrass.").unwrap();
        assert_eq!(scenes[0].location.as_deref(), Some("FIELD"));
    }

    fn arb_line() -> impl Strategy<Value = (bool, String)> {
        prop_oneof![
            "[A-Z]{3,10}( - (DAY|NIGHT))?".prop_map(|loc| (true, format!("INT. {}", loc))),
            "[a-z ,]{0,30}".prop_map(|text| (false, text)),
        ]
    }

    proptest! {
        #[test]
        fn scene_count_matches_heading_count(lines in proptest::collection::vec(arb_line(), 0..20)) {
            let headings = lines.iter().filter(|(is_heading, _)| *is_heading).count();
            let text = lines.iter().map(|(_, line)| line.as_str()).collect::<Vec<_>>().join("\n");
            let scenes = split(&text);

            if headings > 0 {
                prop_assert_eq!(scenes.len(), headings);
            } else if text.trim().is_empty() {
                prop_assert!(scenes.is_empty());
            } else {
                prop_assert_eq!(scenes.len(), 1);
            }
            for (index, scene) in scenes.iter().enumerate() {
                prop_assert_eq!(scene.number as usize, index + 1);
            }
        }
    }
}
