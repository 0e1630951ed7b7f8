//! Cue-to-parameter translation with provenance tracking.
//!
//! Translation runs in three passes over a draft that starts at the documented defaults:
//! direct cue writes, manual overrides, then derived rules keyed on the resulting field values.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bounds::{BoundsPolicy, clamp_fov, enforce};
use super::field::{ParamField, ParamValue};
use super::overrides::ParameterOverrides;
use super::schema::ParameterSet;
use super::vocabulary::{
    CameraAngle, CameraMovement, Framing, LightingStyle, Palette, ShotType, TimeOfDay,
};
use crate::domain::AppError;
use crate::domain::cues::CueSet;

/// Field-of-view change applied by push-in (narrower) and pull-out (wider) moves.
pub const MOVEMENT_FOV_DELTA: i64 = 10;

/// Where a field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Default,
    Inferred,
    Derived,
    Overridden,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Default => "default",
            Provenance::Inferred => "inferred",
            Provenance::Derived => "derived",
            Provenance::Overridden => "overridden",
        }
    }
}

/// Result of translation: the public ParameterSet plus per-field provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub params: ParameterSet,
    provenance: BTreeMap<ParamField, Provenance>,
}

impl Translation {
    pub fn provenance(&self, field: ParamField) -> Provenance {
        self.provenance.get(&field).copied().unwrap_or(Provenance::Default)
    }

    /// Fields that no longer hold their default, in schema order.
    pub fn changed_fields(&self) -> Vec<(ParamField, Provenance)> {
        ParamField::ALL
            .iter()
            .map(|field| (*field, self.provenance(*field)))
            .filter(|(_, provenance)| *provenance != Provenance::Default)
            .collect()
    }

    pub fn overridden_fields(&self) -> Vec<ParamField> {
        self.changed_fields()
            .into_iter()
            .filter(|(_, provenance)| *provenance == Provenance::Overridden)
            .map(|(field, _)| field)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Inferred(ParamValue),
    Derived(ParamValue),
    Overridden(ParamValue),
}

impl Slot {
    fn value(&self) -> ParamValue {
        match self {
            Slot::Inferred(v) | Slot::Derived(v) | Slot::Overridden(v) => *v,
        }
    }

    fn provenance(&self) -> Provenance {
        match self {
            Slot::Inferred(_) => Provenance::Inferred,
            Slot::Derived(_) => Provenance::Derived,
            Slot::Overridden(_) => Provenance::Overridden,
        }
    }
}

/// Defaults plus the fields written so far. Absent slots are at their default.
#[derive(Debug, Default)]
struct Draft {
    defaults: ParameterSet,
    slots: BTreeMap<ParamField, Slot>,
}

impl Draft {
    fn value(&self, field: ParamField) -> ParamValue {
        self.slots.get(&field).map(Slot::value).unwrap_or_else(|| self.defaults.get(field))
    }

    fn provenance(&self, field: ParamField) -> Provenance {
        self.slots.get(&field).map(Slot::provenance).unwrap_or(Provenance::Default)
    }

    fn infer(&mut self, field: ParamField, value: ParamValue) {
        self.slots.insert(field, Slot::Inferred(value));
    }

    fn override_with(&mut self, field: ParamField, value: ParamValue) {
        self.slots.insert(field, Slot::Overridden(value));
    }

    /// Derived values only fill fields nothing else has claimed.
    fn derive(&mut self, field: ParamField, value: ParamValue) {
        if matches!(self.provenance(field), Provenance::Default | Provenance::Derived) {
            self.slots.insert(field, Slot::Derived(value));
        }
    }

    /// Adjust an existing value in place. Manual values are never adjusted.
    fn adjust(&mut self, field: ParamField, value: ParamValue) {
        if self.provenance(field) != Provenance::Overridden {
            self.slots.insert(field, Slot::Derived(value));
        }
    }

    fn apply_cues(&mut self, cues: &CueSet) {
        if let Some(shot) = cues.shot_type {
            self.infer(ParamField::CameraFov, ParamValue::Integer(shot_fov(shot)));
        }

        if let Some(angle) = cues.camera_angle {
            self.infer(ParamField::CameraAngle, ParamValue::Angle(angle));
            match angle {
                CameraAngle::High => self.infer(ParamField::CameraElevation, ParamValue::Integer(45)),
                CameraAngle::Low => self.infer(ParamField::CameraElevation, ParamValue::Integer(-30)),
                CameraAngle::Dutch => self.infer(ParamField::CameraRotation, ParamValue::Integer(15)),
                CameraAngle::EyeLevel => {
                    self.infer(ParamField::CameraElevation, ParamValue::Integer(0))
                }
            }
        }

        if let Some(movement) = cues.camera_movement {
            self.infer(ParamField::CameraMovement, ParamValue::Movement(movement));
        }

        if let Some(time) = cues.lighting_time {
            self.infer(ParamField::LightingTimeOfDay, ParamValue::TimeOfDay(time));
        }

        if let Some(style) = cues.lighting_style {
            self.infer(ParamField::LightingStyle, ParamValue::Style(style));
        }

        if let Some(palette) = cues.color_palette {
            self.infer(ParamField::ColorPalette, ParamValue::Palette(palette));
            for (field, value) in palette_writes(palette) {
                self.infer(*field, *value);
            }
        }

        if let Some(depth) = cues.depth_of_field {
            self.infer(ParamField::CompositionDepthOfField, ParamValue::DepthOfField(depth));
        }
    }

    /// Movement adjusts the field of view first so framing follows the final fov.
    fn apply_derived_rules(&mut self) {
        if let (ParamValue::Movement(movement), ParamValue::Integer(fov)) =
            (self.value(ParamField::CameraMovement), self.value(ParamField::CameraFov))
        {
            let adjusted = match movement {
                CameraMovement::PushIn => Some(clamp_fov(fov - MOVEMENT_FOV_DELTA)),
                CameraMovement::PullOut => Some(clamp_fov(fov + MOVEMENT_FOV_DELTA)),
                _ => None,
            };
            if let Some(adjusted) = adjusted {
                self.adjust(ParamField::CameraFov, ParamValue::Integer(adjusted));
            }
        }

        if self.provenance(ParamField::CameraFov) != Provenance::Default {
            if let ParamValue::Integer(fov) = self.value(ParamField::CameraFov) {
                let framing = framing_for_fov(fov);
                self.derive(ParamField::CompositionFraming, ParamValue::Framing(framing));
            }
        }

        if self.provenance(ParamField::LightingTimeOfDay) != Provenance::Default {
            if let ParamValue::TimeOfDay(time) = self.value(ParamField::LightingTimeOfDay) {
                let (kelvin, intensity, style) = time_of_day_lighting(time);
                self.derive(ParamField::LightingColorTemperature, ParamValue::Integer(kelvin));
                self.derive(ParamField::LightingIntensity, ParamValue::Float(intensity));
                self.derive(ParamField::LightingStyle, ParamValue::Style(style));
            }
        }
    }

    fn finish(self) -> Translation {
        let mut params = self.defaults;
        let mut provenance = BTreeMap::new();
        for (field, slot) in self.slots {
            if params.apply(field, slot.value()) {
                provenance.insert(field, slot.provenance());
            }
        }
        Translation { params, provenance }
    }
}

fn shot_fov(shot: ShotType) -> i64 {
    match shot {
        ShotType::Wide => 55,
        ShotType::Medium => 40,
        ShotType::CloseUp => 25,
        ShotType::ExtremeCloseUp => 15,
    }
}

fn framing_for_fov(fov: i64) -> Framing {
    if fov < 30 {
        Framing::Tight
    } else if fov < 50 {
        Framing::Medium
    } else {
        Framing::Wide
    }
}

fn palette_writes(palette: Palette) -> &'static [(ParamField, ParamValue)] {
    match palette {
        Palette::Warm => &[
            (ParamField::ColorSaturation, ParamValue::Float(0.8)),
            (ParamField::LightingColorTemperature, ParamValue::Integer(3200)),
        ],
        Palette::Cool => &[
            (ParamField::ColorSaturation, ParamValue::Float(0.7)),
            (ParamField::LightingColorTemperature, ParamValue::Integer(6500)),
        ],
        Palette::Desaturated => &[
            (ParamField::ColorSaturation, ParamValue::Float(0.4)),
            (ParamField::ColorContrast, ParamValue::Float(0.5)),
        ],
        Palette::Vibrant => &[
            (ParamField::ColorSaturation, ParamValue::Float(0.9)),
            (ParamField::ColorContrast, ParamValue::Float(0.7)),
        ],
        Palette::Neutral => &[],
    }
}

/// Color temperature (K), intensity and style implied by a time of day.
fn time_of_day_lighting(time: TimeOfDay) -> (i64, f64, LightingStyle) {
    match time {
        TimeOfDay::GoldenHour => (3200, 0.8, LightingStyle::Soft),
        TimeOfDay::BlueHour => (6500, 0.6, LightingStyle::Soft),
        TimeOfDay::Day => (5600, 0.8, LightingStyle::Natural),
        TimeOfDay::Midday => (6000, 1.0, LightingStyle::HighKey),
        TimeOfDay::Night => (3000, 0.3, LightingStyle::Dramatic),
    }
}

/// Translate detected cues into a complete ParameterSet. Pure and total.
pub fn translate(cues: &CueSet) -> ParameterSet {
    let mut draft = Draft::default();
    draft.apply_cues(cues);
    draft.apply_derived_rules();
    draft.finish().params
}

/// Translate cues with manual overrides layered on top, then run derived rules over the result.
///
/// Numeric overrides outside their bound are clamped or rejected according to `policy`.
pub fn translate_with_overrides(
    cues: &CueSet,
    overrides: &ParameterOverrides,
    policy: BoundsPolicy,
) -> Result<Translation, AppError> {
    let mut draft = Draft::default();
    draft.apply_cues(cues);

    for (field, value) in overrides.iter() {
        if !ParameterSet::default().apply(field, value) {
            return Err(AppError::invalid_value(field.path(), value.to_string(), field.expected()));
        }
        draft.override_with(field, enforce(field, value, policy)?);
    }

    draft.apply_derived_rules();
    Ok(draft.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::vocabulary::{DepthOfField, Grading};
    use proptest::prelude::*;

    #[test]
    fn empty_cues_yield_exact_defaults() {
        assert_eq!(translate(&CueSet::new()), ParameterSet::default());
        let translation =
            translate_with_overrides(&CueSet::new(), &ParameterOverrides::new(), BoundsPolicy::Clamp)
                .unwrap();
        assert!(translation.changed_fields().is_empty());
    }

    #[test]
    fn wide_push_in_at_night() {
        let cues = CueSet {
            shot_type: Some(ShotType::Wide),
            camera_movement: Some(CameraMovement::PushIn),
            lighting_time: Some(TimeOfDay::Night),
            ..CueSet::default()
        };
        let params = translate(&cues);
        assert_eq!(params.camera.movement, CameraMovement::PushIn);
        assert_eq!(params.camera.fov, 45);
        assert!(params.camera.fov < ParameterSet::default().camera.fov);
        assert_eq!(params.composition.framing, Framing::Medium);
        assert_eq!(params.lighting.time_of_day, TimeOfDay::Night);
        assert_eq!(params.lighting.color_temperature, 3000);
        assert_eq!(params.lighting.intensity, 0.3);
        assert_eq!(params.lighting.style, LightingStyle::Dramatic);
    }

    #[test]
    fn close_up_derives_tight_framing() {
        let cues = CueSet { shot_type: Some(ShotType::CloseUp), ..CueSet::default() };
        let params = translate(&cues);
        assert_eq!(params.camera.fov, 25);
        assert_eq!(params.composition.framing, Framing::Tight);
    }

    #[test]
    fn push_in_clamps_at_minimum_fov() {
        let cues = CueSet {
            shot_type: Some(ShotType::ExtremeCloseUp),
            camera_movement: Some(CameraMovement::PushIn),
            ..CueSet::default()
        };
        assert_eq!(translate(&cues).camera.fov, 15);
    }

    #[test]
    fn pull_out_widens_default_fov_and_framing() {
        let cues = CueSet { camera_movement: Some(CameraMovement::PullOut), ..CueSet::default() };
        let translation =
            translate_with_overrides(&cues, &ParameterOverrides::new(), BoundsPolicy::Clamp).unwrap();
        assert_eq!(translation.params.camera.fov, 60);
        assert_eq!(translation.params.composition.framing, Framing::Wide);
        assert_eq!(translation.provenance(ParamField::CompositionFraming), Provenance::Derived);
    }

    #[test]
    fn pull_out_clamps_at_maximum_fov() {
        let cues = CueSet { camera_movement: Some(CameraMovement::PullOut), ..CueSet::default() };
        let overrides = ParameterOverrides::from_assignments(&["camera.fov=120"]).unwrap();
        let translation = translate_with_overrides(&cues, &overrides, BoundsPolicy::Clamp).unwrap();
        assert_eq!(translation.params.camera.fov, 120);
        assert_eq!(translation.provenance(ParamField::CameraFov), Provenance::Overridden);

        // An inferred fov at the ceiling is pushed past it by the move and comes back to 120.
        let mut draft = Draft::default();
        draft.infer(ParamField::CameraFov, ParamValue::Integer(120));
        draft.infer(ParamField::CameraMovement, ParamValue::Movement(CameraMovement::PullOut));
        draft.apply_derived_rules();
        let translation = draft.finish();
        assert_eq!(translation.params.camera.fov, 120);
        assert_eq!(translation.params.composition.framing, Framing::Wide);
        assert!(translation.params.is_within_bounds());
        assert_eq!(clamp_fov(120 + MOVEMENT_FOV_DELTA), 120);
    }

    #[test]
    fn shallow_depth_cue_sets_depth_of_field() {
        let cues = crate::domain::cues::extract_from_text(
            "Close-up with shallow depth of field on her eyes.",
        );
        let translation =
            translate_with_overrides(&cues, &ParameterOverrides::new(), BoundsPolicy::Clamp).unwrap();
        assert_eq!(translation.params.composition.depth_of_field, DepthOfField::Shallow);
        assert_eq!(
            translation.provenance(ParamField::CompositionDepthOfField),
            Provenance::Inferred
        );
        assert_eq!(translation.params.composition.framing, Framing::Tight);
    }

    #[test]
    fn detected_style_survives_time_of_day_rule() {
        let cues = CueSet {
            lighting_time: Some(TimeOfDay::GoldenHour),
            lighting_style: Some(LightingStyle::LowKey),
            color_palette: Some(Palette::Cool),
            ..CueSet::default()
        };
        let params = translate(&cues);
        assert_eq!(params.lighting.style, LightingStyle::LowKey);
        assert_eq!(params.lighting.color_temperature, 6500);
        assert_eq!(params.lighting.intensity, 0.8);
    }

    #[test]
    fn camera_angles_set_elevation_and_rotation() {
        let high = translate(&CueSet { camera_angle: Some(CameraAngle::High), ..CueSet::default() });
        assert_eq!(high.camera.elevation, 45);
        let dutch =
            translate(&CueSet { camera_angle: Some(CameraAngle::Dutch), ..CueSet::default() });
        assert_eq!(dutch.camera.rotation, 15);
        assert_eq!(dutch.camera.elevation, 0);
    }

    #[test]
    fn overridden_movement_still_drives_derived_fov() {
        let overrides = ParameterOverrides::from_assignments(&["camera.movement=push_in"]).unwrap();
        let translation =
            translate_with_overrides(&CueSet::new(), &overrides, BoundsPolicy::Clamp).unwrap();
        assert_eq!(translation.params.camera.fov, 40);
        assert_eq!(translation.provenance(ParamField::CameraMovement), Provenance::Overridden);
        assert_eq!(translation.provenance(ParamField::CameraFov), Provenance::Derived);
        assert_eq!(translation.overridden_fields(), vec![ParamField::CameraMovement]);
    }

    #[test]
    fn overridden_fov_is_not_adjusted_by_movement() {
        let cues = CueSet { camera_movement: Some(CameraMovement::PushIn), ..CueSet::default() };
        let overrides = ParameterOverrides::from_assignments(&["camera.fov=90"]).unwrap();
        let translation = translate_with_overrides(&cues, &overrides, BoundsPolicy::Clamp).unwrap();
        assert_eq!(translation.params.camera.fov, 90);
        assert_eq!(translation.params.composition.framing, Framing::Wide);
    }

    #[test]
    fn overrides_beat_cues_and_derived_values() {
        let cues = CueSet { lighting_time: Some(TimeOfDay::Night), ..CueSet::default() };
        let overrides = ParameterOverrides::from_assignments(&[
            "lighting.intensity=0.9",
            "color.grading=stylized",
            "composition.depth_of_field=shallow",
        ])
        .unwrap();
        let params = translate_with_overrides(&cues, &overrides, BoundsPolicy::Clamp).unwrap().params;
        assert_eq!(params.lighting.intensity, 0.9);
        assert_eq!(params.lighting.color_temperature, 3000);
        assert_eq!(params.color.grading, Grading::Stylized);
        assert_eq!(params.composition.depth_of_field, DepthOfField::Shallow);
    }

    #[test]
    fn out_of_range_override_follows_policy() {
        let overrides = ParameterOverrides::from_assignments(&["camera.fov=200"]).unwrap();
        let clamped =
            translate_with_overrides(&CueSet::new(), &overrides, BoundsPolicy::Clamp).unwrap();
        assert_eq!(clamped.params.camera.fov, 120);

        let err = translate_with_overrides(&CueSet::new(), &overrides, BoundsPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, AppError::ParameterOutOfRange { .. }));
    }

    #[test]
    fn mistyped_override_value_is_rejected() {
        let mut overrides = ParameterOverrides::new();
        overrides.set(ParamField::CameraFov, ParamValue::Bool(true));
        let err = translate_with_overrides(&CueSet::new(), &overrides, BoundsPolicy::Clamp)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidParameterValue { .. }));
    }

    fn arb_cues() -> impl Strategy<Value = CueSet> {
        (
            proptest::option::of(proptest::sample::select(ShotType::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(CameraAngle::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(CameraMovement::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(TimeOfDay::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(LightingStyle::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(Palette::ALL.to_vec())),
            proptest::option::of(proptest::sample::select(DepthOfField::ALL.to_vec())),
        )
            .prop_map(
                |(
                    shot_type,
                    camera_angle,
                    camera_movement,
                    lighting_time,
                    lighting_style,
                    color_palette,
                    depth_of_field,
                )| {
                    CueSet {
                        shot_type,
                        camera_angle,
                        camera_movement,
                        lighting_time,
                        lighting_style,
                        color_palette,
                        depth_of_field,
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn translation_is_deterministic(cues in arb_cues()) {
            prop_assert_eq!(translate(&cues), translate(&cues));
        }

        #[test]
        fn translation_is_complete_and_bounded(cues in arb_cues()) {
            let params = translate(&cues);
            prop_assert!(params.is_within_bounds());
            let value = serde_json::to_value(&params).unwrap();
            for field in ParamField::ALL {
                let (group, leaf) = field.path().split_once('.').unwrap();
                prop_assert!(!value[group][leaf].is_null(), "missing {}", field);
            }
        }
    }
}
