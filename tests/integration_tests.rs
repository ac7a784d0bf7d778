//! Integration tests for the cookbook-press pipeline.
//!
//! These tests validate:
//! - The matcher's strategy chain end-to-end against scanned directories
//! - Determinism of the seeded layout generator (golden-hash checked)
//! - Slot exclusivity and transform bounds
//! - Typography clamping, interpolation, and monotonicity
//! - The full build writes the expected files and is idempotent

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use cookbook_press::assets::{AssetLibrary, IconAsset, DISH_FILE};
use cookbook_press::decor::{
    generate_backdrop, generate_placements, page_slots, TransformBounds, BACKDROP_GRID,
};
use cookbook_press::matcher::{
    build_match_index, match_recipe, MatchMethod, MatcherConfig, DEFAULT_ACCEPT_THRESHOLD,
};
use cookbook_press::pipeline::{build_book, BuildConfig};
use cookbook_press::recipe::Recipe;
use cookbook_press::render::{render_single_recipe, BookEntry, DEFAULT_CSS};
use cookbook_press::samples;
use cookbook_press::typography::{profile_for_weight, ScaleBounds};

// =====================================================================
// Helpers
// =====================================================================

// 1×1 transparent PNG; enough for the scanner's header probe.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64,
    0xF8, 0xCF, 0x50, 0x0F, 0x00, 0x03, 0x86, 0x01, 0x80, 0x5A, 0x34, 0x7D, 0x6B, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("cookbook-press-integration")
        .join(format!("{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Create dish-image folders with a decodable `dish.png` in each.
fn write_image_folders(root: &Path, folders: &[&str]) -> PathBuf {
    let images = root.join("images");
    for folder in folders {
        let dir = images.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DISH_FILE), TINY_PNG).unwrap();
    }
    images
}

fn recipe_with_name(id: &str, name_en: &str) -> Recipe {
    let json = format!(r#"{{"id": "{id}", "name": {{"en": "{name_en}"}}}}"#);
    Recipe::from_json(&json).unwrap()
}

fn icon(name: &str) -> IconAsset {
    IconAsset {
        ingredient: name.to_string(),
        normalized: name.replace('_', " "),
        path: PathBuf::from(format!("icons/{name}.png")),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// =====================================================================
// Matcher end-to-end (scanned directories, not hand-built descriptors)
// =====================================================================

#[test]
fn normalized_match_strips_numeric_prefix() {
    let root = scratch("match-normalized");
    let images = write_image_folders(&root, &["001_adafina", "003_apple_crumble"]);
    let library = AssetLibrary::scan(&images, None).unwrap();

    let recipe = recipe_with_name("adafina", "Adafina");
    let result = match_recipe(&recipe, &library, &MatcherConfig::default()).unwrap();
    assert_eq!(result.asset.folder, "001_adafina");
    assert_eq!(result.method, MatchMethod::Normalized);
    assert_eq!(result.score, 1.0);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn manual_override_wins_over_exclusion() {
    let root = scratch("match-override");
    let images = write_image_folders(&root, &["076_assida", "001_adafina"]);
    let library = AssetLibrary::scan(&images, None).unwrap();

    let mut config = MatcherConfig::default();
    config
        .manual_overrides
        .insert("baked_potato_levivot".into(), "076_assida".into());
    config
        .exclusions
        .insert("baked_potato_levivot".into(), vec!["076_assida".into()]);

    let recipe = recipe_with_name("baked_potato_levivot", "Baked Potato Levivot");
    let result = match_recipe(&recipe, &library, &config).unwrap();
    // Exclusions veto only the current_path strategy; overrides are absolute.
    assert_eq!(result.asset.folder, "076_assida");
    assert_eq!(result.method, MatchMethod::Manual);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn no_candidate_above_threshold_reports_unmatched() {
    let root = scratch("match-unmatched");
    let images = write_image_folders(&root, &["060_mocha_java_cake", "068_pancakes"]);
    let library = AssetLibrary::scan(&images, None).unwrap();

    let recipe = recipe_with_name("057_marqa_zeitoun", "Red Stewed Olives");
    assert!(match_recipe(&recipe, &library, &MatcherConfig::default()).is_none());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn similarity_fallback_accepts_close_names() {
    // Neither name contains the other, so only the ratio fallback can fire;
    // its score must clear the threshold and stay below the exact-match 1.0.
    let root = scratch("match-threshold");
    let images = write_image_folders(&root, &["048_kuklot_semolina", "068_pancakes"]);
    let library = AssetLibrary::scan(&images, None).unwrap();

    let recipe = recipe_with_name("kuklot_dumplings", "Kuklot Dumplings");
    let result = match_recipe(&recipe, &library, &MatcherConfig::default()).unwrap();
    assert_eq!(result.method, MatchMethod::Similarity);
    assert_eq!(result.asset.folder, "048_kuklot_semolina");
    assert!(
        result.score >= DEFAULT_ACCEPT_THRESHOLD && result.score < 1.0,
        "unexpected similarity score {}",
        result.score
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn folder_without_dish_file_is_never_matched() {
    let root = scratch("match-no-dish");
    let images = write_image_folders(&root, &["003_apple_crumble"]);
    // A folder listed but not yet generated: no dish.png inside.
    fs::create_dir_all(images.join("001_adafina")).unwrap();
    let library = AssetLibrary::scan(&images, None).unwrap();

    let recipe = recipe_with_name("adafina", "Adafina");
    let result = match_recipe(&recipe, &library, &MatcherConfig::default());
    assert!(
        result.is_none(),
        "matched a folder with no dish file: {:?}",
        result.map(|r| r.asset.folder.clone())
    );

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn match_index_accounts_for_every_recipe_and_image() {
    let root = scratch("match-index");
    let images = write_image_folders(&root, &["001_adafina", "078_sfenj", "099_orphan"]);
    let library = AssetLibrary::scan(&images, None).unwrap();

    let recipes = vec![
        recipe_with_name("adafina", "Adafina"),
        recipe_with_name("sfenj", "Sfenj"),
        recipe_with_name("057_marqa_zeitoun", "Red Stewed Olives"),
    ];
    let index = build_match_index(&recipes, &library, &MatcherConfig::default());

    assert_eq!(index.summary.total_recipes, 3);
    assert_eq!(index.summary.matched, 2);
    assert_eq!(index.summary.recipes_without_images, 1);
    assert_eq!(index.unused_images, vec!["099_orphan".to_string()]);
    // Serializes cleanly for the operator report.
    let json = serde_json::to_string_pretty(&index).unwrap();
    assert!(json.contains("\"method\": \"normalized\""));

    let _ = fs::remove_dir_all(&root);
}

// =====================================================================
// Seeded layout determinism
// =====================================================================

#[test]
fn placements_identical_across_repeated_calls() {
    let icons: Vec<IconAsset> = ["chickpeas", "olive_oil", "cumin", "paprika", "garlic"]
        .iter()
        .map(|n| icon(n))
        .collect();
    let refs: Vec<&IconAsset> = icons.iter().collect();
    let slots = page_slots();
    let bounds = TransformBounds::default();

    let a = generate_placements("057_marqa_zeitoun", &refs, &slots, &bounds);
    let b = generate_placements("057_marqa_zeitoun", &refs, &slots, &bounds);

    // Byte-identical serialized form, golden-hash style.
    let json_a = serde_json::to_vec(&a).unwrap();
    let json_b = serde_json::to_vec(&b).unwrap();
    assert_eq!(sha256_hex(&json_a), sha256_hex(&json_b));
}

#[test]
fn spread_variants_share_identical_decoration() {
    // Same recipe, 5 icons, rendered once; the "hs" and "ae" spreads must
    // carry the same decoration line for line.
    let icons: Vec<IconAsset> = ["chickpeas", "olive_oil", "cumin", "paprika", "garlic"]
        .iter()
        .map(|n| icon(n))
        .collect();
    let refs: Vec<&IconAsset> = icons.iter().collect();
    let recipes = samples::sample_recipes();
    let entry = BookEntry {
        recipe: &recipes[0],
        image_href: None,
        placements: generate_placements(
            &recipes[0].id,
            &refs,
            &page_slots(),
            &TransformBounds::default(),
        ),
    };

    let html = render_single_recipe(&entry, DEFAULT_CSS, &ScaleBounds::default());
    let hs = decor_lines(&html, "decor--hs");
    let ae = decor_lines(&html, "decor--ae");
    assert!(!hs.is_empty());
    assert_eq!(hs, ae);
}

/// Collect the `decor-icon` lines of the decoration block opened by `marker`.
fn decor_lines<'a>(html: &'a str, marker: &str) -> Vec<&'a str> {
    let mut lines = Vec::new();
    let mut inside = false;
    for line in html.lines() {
        if line.contains(marker) {
            inside = true;
            continue;
        }
        if inside {
            if !line.contains("decor-icon") {
                break;
            }
            lines.push(line.trim());
        }
    }
    lines
}

#[test]
fn no_two_placements_share_a_slot() {
    let icons: Vec<IconAsset> = (0..20).map(|i| icon(&format!("icon_{i}"))).collect();
    let refs: Vec<&IconAsset> = icons.iter().collect();
    let slots = page_slots();
    let placements = generate_placements(
        "mahshi_stuffed_vegetables",
        &refs,
        &slots,
        &TransformBounds::default(),
    );

    assert_eq!(placements.len(), slots.len());
    let mut seen: Vec<usize> = placements.iter().map(|p| p.slot).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), placements.len());
}

#[test]
fn backdrop_is_globally_seeded_and_stable() {
    let icons: Vec<IconAsset> = ["wheat", "mint", "lemon", "saffron"]
        .iter()
        .map(|n| icon(n))
        .collect();
    let refs: Vec<&IconAsset> = icons.iter().collect();

    let a = generate_backdrop(&refs, &TransformBounds::default());
    let b = generate_backdrop(&refs, &TransformBounds::default());
    assert_eq!(a.len(), BACKDROP_GRID * BACKDROP_GRID);
    assert_eq!(
        sha256_hex(&serde_json::to_vec(&a).unwrap()),
        sha256_hex(&serde_json::to_vec(&b).unwrap())
    );
}

// =====================================================================
// Typography
// =====================================================================

#[test]
fn typography_control_points() {
    let bounds = ScaleBounds::default();

    // Below the low threshold: the maximum size, exactly.
    let low = profile_for_weight(300.0, &bounds);
    assert!((low.font_size_em - 0.85).abs() < 1e-4);

    // Above the high threshold: the minimum size, exactly.
    let high = profile_for_weight(1500.0, &bounds);
    assert!((high.font_size_em - 0.68).abs() < 1e-4);

    // Midpoint: halfway between.
    let mid = profile_for_weight(700.0, &bounds);
    assert!((mid.font_size_em - (0.85 + 0.68) / 2.0).abs() < 1e-4);
}

#[test]
fn typography_is_monotonic() {
    let bounds = ScaleBounds::default();
    let mut previous = f32::MAX;
    for weight in 0..200 {
        let p = profile_for_weight(weight as f32 * 10.0, &bounds);
        assert!(p.font_size_em <= previous);
        assert!(p.line_height >= bounds.line_height_min - 1e-4);
        assert!(p.line_height <= bounds.line_height_max + 1e-4);
        previous = p.font_size_em;
    }
}

// =====================================================================
// Full pipeline
// =====================================================================

fn pipeline_fixture(root: &Path) -> BuildConfig {
    let recipes_dir = root.join("recipes");
    fs::create_dir_all(&recipes_dir).unwrap();
    for recipe in samples::sample_recipes() {
        fs::write(
            recipes_dir.join(format!("{}.json", recipe.id)),
            recipe.to_json(),
        )
        .unwrap();
    }

    let images_dir = write_image_folders(root, &["001_adafina", "078_sfenj"]);

    let icons_dir = root.join("icons");
    fs::create_dir_all(&icons_dir).unwrap();
    for name in ["chickpeas", "potatoes", "flour", "yeast"] {
        fs::write(icons_dir.join(format!("{name}.png")), TINY_PNG).unwrap();
    }

    BuildConfig {
        recipes_dir,
        images_dir,
        icons_dir: Some(icons_dir),
        output_dir: root.join("output"),
        ..BuildConfig::default()
    }
}

#[test]
fn build_produces_web_print_and_index() {
    let root = scratch("pipeline-build");
    let config = pipeline_fixture(&root);
    let report = build_book(&config).unwrap();

    assert_eq!(report.recipes, 3);
    assert_eq!(report.matched, 2);
    assert_eq!(report.unmatched, vec!["tirshi_pumpkin_salad".to_string()]);

    let web = config.output_dir.join("web");
    assert!(web.join("adafina.html").exists());
    assert!(web.join("sfenj.html").exists());
    assert!(web.join("index.html").exists());
    let print_html =
        fs::read_to_string(config.output_dir.join("print/cookbook.html")).unwrap();
    assert!(print_html.contains("page--endpaper"), "print build opens with the icon field");

    let index_json = fs::read_to_string(config.output_dir.join("match_index.json")).unwrap();
    assert!(index_json.contains("\"matched\": 2"));
    assert!(index_json.contains("tirshi_pumpkin_salad"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn rendered_pages_embed_scaled_typography_and_decor() {
    let root = scratch("pipeline-markup");
    let config = pipeline_fixture(&root);
    build_book(&config).unwrap();

    let html = fs::read_to_string(config.output_dir.join("web/adafina.html")).unwrap();
    assert!(html.contains("font-size:0."), "columns carry inline font-size");
    assert!(html.contains("line-height:1."), "columns carry inline line-height");
    assert!(html.contains("decor-icon"), "spread pages are decorated");
    assert!(html.contains("dir=\"rtl\""), "RTL columns are marked");
    assert_eq!(html.matches("<section class=\"page").count(), 4);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn rebuild_hashes_identically() {
    // Determinism across full builds: the combined print document (which
    // embeds every placement and profile) hashes the same both times.
    let root = scratch("pipeline-determinism");
    let config = pipeline_fixture(&root);

    build_book(&config).unwrap();
    let first = fs::read(config.output_dir.join("print/cookbook.html")).unwrap();
    build_book(&config).unwrap();
    let second = fs::read(config.output_dir.join("print/cookbook.html")).unwrap();

    assert_eq!(sha256_hex(&first), sha256_hex(&second));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn unmatched_recipe_gets_placeholder_hero() {
    let root = scratch("pipeline-placeholder");
    let config = pipeline_fixture(&root);
    build_book(&config).unwrap();

    let html =
        fs::read_to_string(config.output_dir.join("web/tirshi_pumpkin_salad.html")).unwrap();
    assert!(html.contains("hero-missing"));
    assert!(!html.contains("hero-image"));

    let _ = fs::remove_dir_all(&root);
}
