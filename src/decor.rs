//! Seeded decorative layout – deterministic icon placement per recipe.
//!
//! Each recipe's two decorated spread pages must carry identical decoration,
//! and the book is rebuilt from scratch on every run, so placement state is
//! never persisted: it is re-derived from the recipe identifier alone. The
//! PRNG seed is a stable hash of the identifier — never the page variant,
//! candidate order, or the clock — which makes regeneration reproducible
//! across builds, processes, and days.
//!
//! Non-overlap comes from the slot table, not from collision testing: slots
//! are pre-planned, spatially separated page positions, and each shuffled
//! candidate claims exactly one slot. The per-placement rotation, skew, and
//! scale draws only break up the grid feel; their bounds keep every icon
//! inside its slot's clearance.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::assets::IconAsset;

/// Seed for the one-off full-page backdrop. A fixed constant, not a recipe
/// hash: the backdrop is a single unique page.
pub const BACKDROP_SEED: u64 = 0x5EED_B00C;

/// Cells per side of the backdrop grid.
pub const BACKDROP_GRID: usize = 10;

/// A pre-planned slot position in fractional page coordinates (percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub x_pct: f32,
    pub y_pct: f32,
}

/// A named region of the page with its planned slots.
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    pub name: &'static str,
    pub slots: &'static [Slot],
}

/// The decorated margins of a recipe spread. Slots keep clear of the two
/// text columns; the flattened order below is the assignment order.
pub const PAGE_ZONES: &[Zone] = &[
    Zone {
        name: "top",
        slots: &[
            Slot { x_pct: 7.0, y_pct: 5.0 },
            Slot { x_pct: 88.0, y_pct: 4.0 },
        ],
    },
    Zone {
        name: "outer-margin",
        slots: &[
            Slot { x_pct: 4.0, y_pct: 36.0 },
            Slot { x_pct: 91.0, y_pct: 42.0 },
            Slot { x_pct: 5.0, y_pct: 68.0 },
        ],
    },
    Zone {
        name: "bottom",
        slots: &[
            Slot { x_pct: 11.0, y_pct: 90.0 },
            Slot { x_pct: 86.0, y_pct: 88.0 },
        ],
    },
];

/// All page slots in fixed assignment order.
pub fn page_slots() -> Vec<Slot> {
    PAGE_ZONES.iter().flat_map(|z| z.slots.iter().copied()).collect()
}

/// Bounds for the per-placement randomized transform. Values are the
/// empirically chosen book defaults; override per call if needed.
#[derive(Debug, Clone, Copy)]
pub struct TransformBounds {
    /// Rotation drawn from ±this many degrees.
    pub rotation_deg: f32,
    /// Skew on the x axis, ±degrees.
    pub skew_x_deg: f32,
    /// Skew on the y axis, ±degrees.
    pub skew_y_deg: f32,
    /// Multiplicative scale range.
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for TransformBounds {
    fn default() -> Self {
        Self {
            rotation_deg: 20.0,
            skew_x_deg: 6.0,
            skew_y_deg: 4.0,
            scale_min: 0.85,
            scale_max: 1.15,
        }
    }
}

/// One decorative icon instance resolved onto a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Asset path, as given by the icon descriptor.
    pub icon: String,
    /// Ingredient name (used for alt text).
    pub ingredient: String,
    /// Index of the claimed slot; unique within one placement list.
    pub slot: usize,
    pub x_pct: f32,
    pub y_pct: f32,
    pub rotation_deg: f32,
    pub skew_x_deg: f32,
    pub skew_y_deg: f32,
    pub scale: f32,
}

/// Stable 64-bit FNV-1a hash of the recipe identifier.
///
/// `std::hash` is randomly keyed per process and must not be used here.
pub fn seed_for(recipe_id: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in recipe_id.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Place up to `slots.len()` of the candidate icons for one recipe.
///
/// Pure function of its arguments: calling it twice with the same recipe id
/// and candidate list yields an identical placement list, which is what lets
/// the renderer decorate both spread pages of a recipe consistently. The
/// page-variant tag is deliberately not an input.
pub fn generate_placements(
    recipe_id: &str,
    candidates: &[&IconAsset],
    slots: &[Slot],
    bounds: &TransformBounds,
) -> Vec<Placement> {
    if candidates.is_empty() || slots.is_empty() {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed_for(recipe_id));

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.shuffle(&mut rng);

    let count = candidates.len().min(slots.len());
    let mut placements = Vec::with_capacity(count);
    for (slot_index, &candidate_index) in order.iter().take(count).enumerate() {
        let icon = candidates[candidate_index];
        let slot = slots[slot_index];
        // Draw order is part of the contract: rotation, skew-x, skew-y, scale.
        let rotation_deg = rng.random_range(-bounds.rotation_deg..=bounds.rotation_deg);
        let skew_x_deg = rng.random_range(-bounds.skew_x_deg..=bounds.skew_x_deg);
        let skew_y_deg = rng.random_range(-bounds.skew_y_deg..=bounds.skew_y_deg);
        let scale = rng.random_range(bounds.scale_min..=bounds.scale_max);
        placements.push(Placement {
            icon: icon.path.display().to_string(),
            ingredient: icon.ingredient.clone(),
            slot: slot_index,
            x_pct: slot.x_pct,
            y_pct: slot.y_pct,
            rotation_deg,
            skew_x_deg,
            skew_y_deg,
            scale,
        });
    }
    placements
}

/// Full-page backdrop: a [`BACKDROP_GRID`]² field of small icons with
/// per-cell jitter, drawn round-robin from the whole icon library and seeded
/// from [`BACKDROP_SEED`].
pub fn generate_backdrop(icons: &[&IconAsset], bounds: &TransformBounds) -> Vec<Placement> {
    if icons.is_empty() {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(BACKDROP_SEED);
    let cell = 100.0 / BACKDROP_GRID as f32;
    let jitter = cell * 0.3;

    let mut placements = Vec::with_capacity(BACKDROP_GRID * BACKDROP_GRID);
    for row in 0..BACKDROP_GRID {
        for col in 0..BACKDROP_GRID {
            let index = row * BACKDROP_GRID + col;
            let icon = icons[index % icons.len()];
            let center_x = (col as f32 + 0.5) * cell;
            let center_y = (row as f32 + 0.5) * cell;
            let jitter_x = rng.random_range(-jitter..=jitter);
            let jitter_y = rng.random_range(-jitter..=jitter);
            let rotation_deg = rng.random_range(-bounds.rotation_deg..=bounds.rotation_deg);
            let skew_x_deg = rng.random_range(-bounds.skew_x_deg..=bounds.skew_x_deg);
            let skew_y_deg = rng.random_range(-bounds.skew_y_deg..=bounds.skew_y_deg);
            let scale = rng.random_range(bounds.scale_min..=bounds.scale_max);
            placements.push(Placement {
                icon: icon.path.display().to_string(),
                ingredient: icon.ingredient.clone(),
                slot: index,
                x_pct: center_x + jitter_x,
                y_pct: center_y + jitter_y,
                rotation_deg,
                skew_x_deg,
                skew_y_deg,
                scale,
            });
        }
    }
    placements
}
