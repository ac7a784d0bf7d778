//! Content-adaptive typography – fits variable-length multilingual text
//! into a fixed page column.
//!
//! Recipe texts vary 3–5× in length across languages and dishes; a fixed
//! font size either overflows the long ones or wastes space on the short
//! ones. The scaler maps a weighted length measure onto a continuous
//! font-size range, so recipes of similar length never show a visible size
//! jump. Line-height follows the font size; it is not independently tunable.

use serde::Serialize;

use crate::recipe::{Lang, Recipe};

/// Control points for the length → size mapping. The numeric defaults are
/// the empirically tuned book values; override per call if needed.
#[derive(Debug, Clone, Copy)]
pub struct ScaleBounds {
    /// Font size used at or below `weight_low`, in em.
    pub font_max_em: f32,
    /// Font size used at or above `weight_high`, in em.
    pub font_min_em: f32,
    /// Weighted length at which shrinking starts.
    pub weight_low: f32,
    /// Weighted length at which the minimum size is reached.
    pub weight_high: f32,
    /// Characters-worth of vertical space each discrete line costs.
    pub line_penalty: f32,
    /// Line-height paired with `font_min_em`.
    pub line_height_min: f32,
    /// Line-height paired with `font_max_em`.
    pub line_height_max: f32,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            font_max_em: 0.85,
            font_min_em: 0.68,
            weight_low: 400.0,
            weight_high: 1000.0,
            line_penalty: 30.0,
            line_height_min: 1.20,
            line_height_max: 1.35,
        }
    }
}

/// The computed size pair for one (recipe, language) column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypographyProfile {
    pub font_size_em: f32,
    pub line_height: f32,
}

/// Weighted length of a column: total characters plus a per-line penalty,
/// since each line consumes vertical space regardless of its length.
pub fn weighted_length<'a, I>(lines: I, bounds: &ScaleBounds) -> f32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut chars = 0usize;
    let mut count = 0usize;
    for line in lines {
        chars += line.chars().count();
        count += 1;
    }
    chars as f32 + bounds.line_penalty * count as f32
}

/// Map a weighted length onto a font-size/line-height pair.
///
/// Linear between the two control points, clamped outside them — never
/// extrapolated. Monotonic: a longer column never gets a larger font.
pub fn profile_for_weight(weight: f32, bounds: &ScaleBounds) -> TypographyProfile {
    let span = bounds.weight_high - bounds.weight_low;
    let t = if span <= 0.0 {
        1.0
    } else {
        ((weight - bounds.weight_low) / span).clamp(0.0, 1.0)
    };
    let font_size_em = bounds.font_max_em + (bounds.font_min_em - bounds.font_max_em) * t;

    // Line-height tracks the font linearly: biggest font, most air.
    let font_span = bounds.font_max_em - bounds.font_min_em;
    let u = if font_span <= 0.0 {
        1.0
    } else {
        (font_size_em - bounds.font_min_em) / font_span
    };
    let line_height =
        bounds.line_height_min + (bounds.line_height_max - bounds.line_height_min) * u;

    TypographyProfile {
        font_size_em,
        line_height,
    }
}

/// Profile for one language column of a recipe: ingredient lines, variant
/// labels, and instruction steps all count.
pub fn profile_for_column(recipe: &Recipe, lang: Lang, bounds: &ScaleBounds) -> TypographyProfile {
    let mut lines: Vec<&str> = Vec::new();
    for ingredient in recipe.ingredients.get(lang) {
        lines.push(ingredient);
    }
    for (label, steps) in recipe.step_groups(lang) {
        if let Some(label) = label {
            lines.push(label);
        }
        for step in steps {
            lines.push(step);
        }
    }
    profile_for_weight(weighted_length(lines, bounds), bounds)
}
