//! Negative-prompt inversion table.

use crate::domain::params::{
    DepthOfField, LightingStyle, Palette, ParamField, ParamValue, ParameterSet, TimeOfDay,
};

/// When `field` holds `value`, `phrase` is added to the negative prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion {
    pub field: ParamField,
    pub value: ParamValue,
    pub phrase: &'static str,
}

const fn rule(field: ParamField, value: ParamValue, phrase: &'static str) -> Inversion {
    Inversion { field, value, phrase }
}

/// Rules in output order.
pub const INVERSIONS: &[Inversion] = &[
    rule(ParamField::ColorPalette, ParamValue::Palette(Palette::Desaturated), "vibrant colors, saturated"),
    rule(ParamField::ColorPalette, ParamValue::Palette(Palette::Vibrant), "muted colors, desaturated"),
    rule(ParamField::ColorPalette, ParamValue::Palette(Palette::Warm), "cold blue tones"),
    rule(ParamField::ColorPalette, ParamValue::Palette(Palette::Cool), "warm orange tones"),
    rule(ParamField::LightingStyle, ParamValue::Style(LightingStyle::Dramatic), "flat lighting, even lighting"),
    rule(ParamField::LightingStyle, ParamValue::Style(LightingStyle::Soft), "harsh lighting, dramatic shadows"),
    rule(ParamField::LightingStyle, ParamValue::Style(LightingStyle::HighKey), "dark shadows, underexposed"),
    rule(ParamField::LightingStyle, ParamValue::Style(LightingStyle::LowKey), "overexposed, washed out highlights"),
    rule(ParamField::LightingTimeOfDay, ParamValue::TimeOfDay(TimeOfDay::Night), "daylight, bright sky"),
    rule(ParamField::LightingTimeOfDay, ParamValue::TimeOfDay(TimeOfDay::GoldenHour), "overcast, cold light"),
    rule(
        ParamField::CompositionDepthOfField,
        ParamValue::DepthOfField(DepthOfField::Shallow),
        "everything in focus, cluttered background",
    ),
    rule(
        ParamField::CompositionDepthOfField,
        ParamValue::DepthOfField(DepthOfField::Deep),
        "blurry background, bokeh",
    ),
];

/// Phrases of every rule matching `params`, in table order.
pub fn inverted_phrases(params: &ParameterSet) -> Vec<&'static str> {
    INVERSIONS
        .iter()
        .filter(|rule| params.get(rule.field) == rule.value)
        .map(|rule| rule.phrase)
        .collect()
}
