//! Fuzzy entity matcher – resolves each recipe to its best dish image.
//!
//! Recipe identifiers and asset folder names are hand-created independently
//! (one by canonicalization, one by file creation order) and drift apart, so
//! a pure-equality join fails for most entries. Matching is a fixed chain of
//! strategies, tried in order, first success wins:
//!
//! 1. Manual override table (always accepted)
//! 2. Existing `image` reference in the record (`current_path`, vetoable)
//! 3. Normalized exact equality (score 1.0)
//! 4. Substring containment either direction (score 0.9)
//! 5. Longest-matching-blocks similarity ratio, accepted at ≥ 0.6
//!
//! Candidates are scanned in sorted folder order and only a strictly higher
//! score displaces the current best, so the lexicographically smallest
//! folder wins exact ties.

use std::collections::HashMap;

use serde::Serialize;

use crate::assets::{AssetLibrary, DishAsset, IconAsset};
use crate::overrides;
use crate::recipe::{Lang, Recipe};

/// Minimum similarity ratio the fallback strategy will accept.
pub const DEFAULT_ACCEPT_THRESHOLD: f32 = 0.6;

/// Score reported for a substring (partial) match.
const PARTIAL_SCORE: f32 = 0.9;

/// Name words shorter than this are too ambiguous to compare on their own.
const MIN_WORD_LEN: usize = 4;

/// How a match was found, in chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Manual,
    CurrentPath,
    Normalized,
    Partial,
    Similarity,
}

/// A resolved recipe → dish-image association.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub asset: &'a DishAsset,
    /// Confidence in [0, 1].
    pub score: f32,
    pub method: MatchMethod,
}

/// Matcher tuning: override tables and the acceptance threshold.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Hand-maintained recipe id → asset folder mapping; absolute precedence.
    pub manual_overrides: HashMap<String, String>,
    /// Recipe id → folders vetoed for the `current_path` strategy only.
    pub exclusions: HashMap<String, Vec<String>>,
    pub accept_threshold: f32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            manual_overrides: HashMap::new(),
            exclusions: HashMap::new(),
            accept_threshold: DEFAULT_ACCEPT_THRESHOLD,
        }
    }
}

impl MatcherConfig {
    /// Config carrying the hand-maintained override tables from [`overrides`].
    pub fn with_builtin_overrides() -> Self {
        Self {
            manual_overrides: overrides::MANUAL_MATCHES
                .iter()
                .map(|(id, folder)| (id.to_string(), folder.to_string()))
                .collect(),
            exclusions: overrides::EXCLUDE_MATCHES
                .iter()
                .map(|(id, folders)| {
                    (id.to_string(), folders.iter().map(|f| f.to_string()).collect())
                })
                .collect(),
            ..Self::default()
        }
    }

    fn is_excluded(&self, recipe_id: &str, folder: &str) -> bool {
        self.exclusions
            .get(recipe_id)
            .map(|vetoed| vetoed.iter().any(|f| f == folder))
            .unwrap_or(false)
    }
}

/// Normalize a name for comparison: lowercase, separator runs (`_`, `-`,
/// whitespace) collapsed to single spaces, leading numeric index token
/// stripped.
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut tokens: Vec<&str> = lowered
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.first().map(|t| t.chars().all(|c| c.is_ascii_digit())) == Some(true) {
        tokens.remove(0);
    }
    tokens.join(" ")
}

/// Character-level similarity in [0, 1]: twice the total length of the
/// longest matching blocks over the combined length (Ratcliff–Obershelp).
pub fn similarity(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let matched = matching_block_len(&a, &b);
    2.0 * matched as f32 / (a.len() + b.len()) as f32
}

/// Total length of matching blocks: find the longest common block, then
/// recurse on the pieces to its left and right.
fn matching_block_len(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_block_len(&a[..ai], &b[..bi])
        + matching_block_len(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block, earliest-in-`a` on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0usize, 0usize, 0usize);
    // lengths[j] = longest common suffix of a[..=i] and b[..=j]
    let mut lengths = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        // Walk j backwards so lengths[j - 1] still holds the previous row.
        for j in (0..b.len()).rev() {
            if ca == b[j] {
                lengths[j + 1] = lengths[j] + 1;
                if lengths[j + 1] > best.2 {
                    best = (i + 1 - lengths[j + 1], j + 1 - lengths[j + 1], lengths[j + 1]);
                }
            } else {
                lengths[j + 1] = 0;
            }
        }
    }
    best
}

/// Resolve the best dish asset for one recipe, or `None` when nothing clears
/// the acceptance threshold. Candidates without a usable dish file are never
/// considered.
pub fn match_recipe<'a>(
    recipe: &Recipe,
    library: &'a AssetLibrary,
    config: &MatcherConfig,
) -> Option<MatchResult<'a>> {
    // 1. Manual override — absolute precedence.
    if let Some(folder) = config.manual_overrides.get(&recipe.id) {
        match library.dish_by_folder(folder) {
            Some(asset) if asset.has_dish => {
                return Some(MatchResult {
                    asset,
                    score: 1.0,
                    method: MatchMethod::Manual,
                });
            }
            _ => {
                log::warn!(
                    "Manual override for '{}' points at missing asset '{folder}'; \
                     falling back to automatic matching",
                    recipe.id
                );
            }
        }
    }

    // 2. Existing reference in the record, unless vetoed for this recipe.
    if let Some(image) = &recipe.image {
        if !image.filename.is_empty() {
            for asset in library.usable_dishes() {
                if image.filename.contains(&asset.folder)
                    && !config.is_excluded(&recipe.id, &asset.folder)
                {
                    return Some(MatchResult {
                        asset,
                        score: 1.0,
                        method: MatchMethod::CurrentPath,
                    });
                }
            }
        }
    }

    let id_norm = normalize(&recipe.id);

    // 3. Normalized exact equality.
    for asset in library.usable_dishes() {
        if asset.normalized == id_norm {
            return Some(MatchResult {
                asset,
                score: 1.0,
                method: MatchMethod::Normalized,
            });
        }
    }

    // 4. Substring containment either direction.
    for asset in library.usable_dishes() {
        if !asset.normalized.is_empty()
            && !id_norm.is_empty()
            && (asset.normalized.contains(&id_norm) || id_norm.contains(&asset.normalized))
        {
            return Some(MatchResult {
                asset,
                score: PARTIAL_SCORE,
                method: MatchMethod::Partial,
            });
        }
    }

    // 5. Similarity fallback over the identifier, the display names, and the
    //    long words of the English name.
    let name_en = normalize(recipe.name.get(Lang::En));
    let name_he = recipe.name.get(Lang::He).to_lowercase();
    let mut best: Option<(&DishAsset, f32)> = None;
    for asset in library.usable_dishes() {
        let mut score = similarity(&id_norm, &asset.normalized);
        if !name_en.is_empty() {
            score = score.max(similarity(&name_en, &asset.normalized));
            for word in name_en.split(' ').filter(|w| w.len() >= MIN_WORD_LEN) {
                score = score.max(similarity(word, &asset.normalized));
            }
        }
        if !name_he.is_empty() {
            score = score.max(similarity(&name_he, &asset.normalized));
        }
        if best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((asset, score));
        }
    }

    match best {
        Some((asset, score)) if score >= config.accept_threshold => Some(MatchResult {
            asset,
            score,
            method: MatchMethod::Similarity,
        }),
        _ => None,
    }
}

/// Associate a recipe with the ingredient icons whose names occur in its
/// English ingredient lines. Returned in stable library order, each icon at
/// most once — this list is the layout generator's candidate set.
pub fn icons_for_recipe<'a>(recipe: &Recipe, library: &'a AssetLibrary) -> Vec<&'a IconAsset> {
    let lines: Vec<String> = recipe
        .ingredients
        .get(Lang::En)
        .iter()
        .map(|line| normalize(line))
        .collect();

    library
        .icons
        .iter()
        .filter(|icon| {
            icon.normalized.len() >= MIN_WORD_LEN - 1
                && lines.iter().any(|line| line.contains(&icon.normalized))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Batch matching index
// ---------------------------------------------------------------------------

/// Aggregated result of matching a whole recipe set against the library,
/// serialized to `match_index.json` for operator review.
#[derive(Debug, Clone, Serialize)]
pub struct MatchIndex {
    pub summary: MatchSummary,
    pub matches: Vec<MatchEntry>,
    pub unmatched_recipes: Vec<UnmatchedEntry>,
    pub unused_images: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub total_recipes: usize,
    pub total_images: usize,
    pub matched: usize,
    pub recipes_without_images: usize,
    pub unused_images: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchEntry {
    pub recipe: String,
    pub image: String,
    pub method: MatchMethod,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnmatchedEntry {
    pub recipe: String,
    pub name_en: String,
}

/// Match every recipe, collecting matches, recipes needing new assets, and
/// images no recipe claims.
pub fn build_match_index(
    recipes: &[Recipe],
    library: &AssetLibrary,
    config: &MatcherConfig,
) -> MatchIndex {
    let mut matches = Vec::new();
    let mut unmatched = Vec::new();
    let mut used: Vec<&str> = Vec::new();

    for recipe in recipes {
        match match_recipe(recipe, library, config) {
            Some(result) => {
                used.push(&result.asset.folder);
                matches.push(MatchEntry {
                    recipe: recipe.id.clone(),
                    image: result.asset.folder.clone(),
                    method: result.method,
                    score: result.score,
                });
            }
            None => unmatched.push(UnmatchedEntry {
                recipe: recipe.id.clone(),
                name_en: recipe.name.get(Lang::En).to_string(),
            }),
        }
    }

    matches.sort_by(|a, b| a.recipe.cmp(&b.recipe));
    unmatched.sort_by(|a, b| a.recipe.cmp(&b.recipe));

    let unused_images: Vec<String> = library
        .dishes
        .iter()
        .filter(|d| !used.contains(&d.folder.as_str()))
        .map(|d| d.folder.clone())
        .collect();

    MatchIndex {
        summary: MatchSummary {
            total_recipes: recipes.len(),
            total_images: library.dishes.len(),
            matched: matches.len(),
            recipes_without_images: unmatched.len(),
            unused_images: unused_images.len(),
        },
        matches,
        unmatched_recipes: unmatched,
        unused_images,
    }
}
