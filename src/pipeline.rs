//! Pipeline – ties together loading, matching, decoration, typography, and
//! rendering into a single build call.
//!
//! The build is single-writer and idempotent: every output is derived from
//! the recipe records and the asset snapshot, so rebuilding from scratch
//! produces the same book (decorative placement included, thanks to the
//! seeded generator).

use std::fs;
use std::path::PathBuf;

use crate::assets::{AssetLibrary, DISH_FILE};
use crate::decor::{generate_backdrop, generate_placements, page_slots, TransformBounds};
use crate::matcher::{build_match_index, icons_for_recipe, match_recipe, MatcherConfig};
use crate::recipe::{load_recipes, save_recipe, Recipe};
use crate::render::{render_book, render_index, render_single_recipe, BookEntry, DEFAULT_CSS};
use crate::typography::ScaleBounds;

/// Configuration for a book build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of recipe JSON records.
    pub recipes_dir: PathBuf,
    /// Directory of dish-image folders (`NNN_name/dish.png`).
    pub images_dir: PathBuf,
    /// Directory of ingredient icons; `None` disables decoration.
    pub icons_dir: Option<PathBuf>,
    /// Output root; `web/` and `print/` are created beneath it.
    pub output_dir: PathBuf,
    /// Stylesheet file; the built-in stylesheet is used when `None`.
    pub css_file: Option<PathBuf>,
    /// Document title for the print build and the index page.
    pub title: String,
    /// Base prefix for dish-image hrefs in web pages (the web output sits
    /// next to the image tree, so hrefs are relative).
    pub web_image_base: String,
    /// Write resolved image paths back into the recipe JSON files.
    pub write_back: bool,
    pub matcher: MatcherConfig,
    pub transform_bounds: TransformBounds,
    pub scale_bounds: ScaleBounds,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            recipes_dir: PathBuf::from("data/recipes"),
            images_dir: PathBuf::from("data/images/current"),
            icons_dir: Some(PathBuf::from("data/images/ingredients/final")),
            output_dir: PathBuf::from("output"),
            css_file: None,
            title: "Four-Language Cookbook".to_string(),
            web_image_base: "../images/".to_string(),
            write_back: false,
            matcher: MatcherConfig::with_builtin_overrides(),
            transform_bounds: TransformBounds::default(),
            scale_bounds: ScaleBounds::default(),
        }
    }
}

/// Summary of one build, reported to the operator.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub recipes: usize,
    pub matched: usize,
    /// Recipe ids still needing an image asset.
    pub unmatched: Vec<String>,
    pub pages_written: usize,
}

/// Run the full build: load → scan → match → decorate → render → write.
pub fn build_book(config: &BuildConfig) -> Result<BuildReport, String> {
    let css = match &config.css_file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Cannot read stylesheet '{}': {e}", path.display()))?,
        None => DEFAULT_CSS.to_string(),
    };

    let mut recipes = load_recipes(&config.recipes_dir)?;
    log::info!("Loaded {} recipe(s)", recipes.len());

    let library = AssetLibrary::scan(&config.images_dir, config.icons_dir.as_deref())?;
    log::info!(
        "Scanned {} dish asset(s), {} icon(s)",
        library.dishes.len(),
        library.icons.len()
    );

    // Resolve images and write the operator-facing match index.
    let index = build_match_index(&recipes, &library, &config.matcher);
    fs::create_dir_all(&config.output_dir)
        .map_err(|e| format!("Cannot create '{}': {e}", config.output_dir.display()))?;
    let index_path = config.output_dir.join("match_index.json");
    let index_json = serde_json::to_string_pretty(&index).map_err(|e| e.to_string())?;
    fs::write(&index_path, index_json)
        .map_err(|e| format!("Cannot write '{}': {e}", index_path.display()))?;

    let mut matched = 0usize;
    let mut unmatched = Vec::new();
    for recipe in &mut recipes {
        match match_recipe(recipe, &library, &config.matcher) {
            Some(result) => {
                matched += 1;
                let filename = result.asset.path.display().to_string();
                let prompt = recipe.image.take().and_then(|i| i.prompt);
                recipe.image = Some(crate::recipe::ImageRef { filename, prompt });
                if config.write_back {
                    save_recipe(&config.recipes_dir, recipe)?;
                }
            }
            None => {
                log::warn!("No image for recipe '{}'", recipe.id);
                // A stale reference must not resurface as a hero image.
                recipe.image = None;
                unmatched.push(recipe.id.clone());
            }
        }
    }

    // Web build: one page per recipe plus the index.
    let web_dir = config.output_dir.join("web");
    fs::create_dir_all(&web_dir)
        .map_err(|e| format!("Cannot create '{}': {e}", web_dir.display()))?;
    let mut pages_written = 0usize;
    for recipe in &recipes {
        let entry = book_entry(recipe, &library, config, true);
        let html = render_single_recipe(&entry, &css, &config.scale_bounds);
        let path = web_dir.join(format!("{}.html", recipe.id));
        fs::write(&path, html).map_err(|e| format!("Cannot write '{}': {e}", path.display()))?;
        pages_written += 4;
    }
    let recipe_refs: Vec<&Recipe> = recipes.iter().collect();
    let index_html = render_index(&recipe_refs, &config.title);
    fs::write(web_dir.join("index.html"), index_html)
        .map_err(|e| format!("Cannot write index: {e}"))?;

    // Print build: endpaper plus one combined document with continuous page
    // numbers. The endpaper field draws from the whole icon library.
    let print_dir = config.output_dir.join("print");
    fs::create_dir_all(&print_dir)
        .map_err(|e| format!("Cannot create '{}': {e}", print_dir.display()))?;
    let all_icons: Vec<&crate::assets::IconAsset> = library.icons.iter().collect();
    let endpaper = generate_backdrop(&all_icons, &config.transform_bounds);
    let entries: Vec<BookEntry> = recipes
        .iter()
        .map(|r| book_entry(r, &library, config, false))
        .collect();
    let book_html = render_book(&entries, &endpaper, &config.title, &css, &config.scale_bounds);
    let book_path = print_dir.join("cookbook.html");
    fs::write(&book_path, book_html)
        .map_err(|e| format!("Cannot write '{}': {e}", book_path.display()))?;

    Ok(BuildReport {
        recipes: recipes.len(),
        matched,
        unmatched,
        pages_written,
    })
}

/// Assemble the renderer's input for one recipe. Placement candidates come
/// from the recipe's associated ingredient icons; the placement list itself
/// depends only on the recipe id and that candidate list, so web and print
/// variants decorate identically.
fn book_entry<'a>(
    recipe: &'a Recipe,
    library: &AssetLibrary,
    config: &BuildConfig,
    web: bool,
) -> BookEntry<'a> {
    let image_href = recipe.image.as_ref().map(|image| {
        if web {
            // Re-anchor to the web output directory.
            let folder = library
                .dishes
                .iter()
                .find(|d| image.filename.contains(&d.folder))
                .map(|d| d.folder.as_str())
                .unwrap_or_default();
            format!("{}{}/{}", config.web_image_base, folder, DISH_FILE)
        } else {
            image.filename.clone()
        }
    });

    let icons = icons_for_recipe(recipe, library);
    if icons.is_empty() {
        log::debug!("No ingredient icons for '{}'", recipe.id);
    }
    let placements =
        generate_placements(&recipe.id, &icons, &page_slots(), &config.transform_bounds);

    BookEntry {
        recipe,
        image_href,
        placements,
    }
}

/// Match everything and summarise, without writing any book output. Used by
/// the CLI's report mode.
pub fn match_report(config: &BuildConfig) -> Result<String, String> {
    let recipes = load_recipes(&config.recipes_dir)?;
    let library = AssetLibrary::scan(&config.images_dir, config.icons_dir.as_deref())?;
    let index = build_match_index(&recipes, &library, &config.matcher);
    let mut out = format!(
        "{} recipes, {} images: {} matched, {} unmatched, {} unused\n",
        index.summary.total_recipes,
        index.summary.total_images,
        index.summary.matched,
        index.summary.recipes_without_images,
        index.summary.unused_images
    );
    for entry in &index.unmatched_recipes {
        out.push_str(&format!(
            "  needs image: {} ({})\n",
            entry.recipe, entry.name_en
        ));
    }
    Ok(out)
}
