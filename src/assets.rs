//! Asset library – an immutable snapshot of the on-disk image assets.
//!
//! Two asset classes exist:
//! - **Dish images**: one directory per dish, named `NNN_name` (zero-padded
//!   index + snake_case name), containing `dish.png`. At most one per recipe.
//! - **Ingredient icons**: flat `<ingredient>.png` files shared across
//!   recipes, produced by the icon-generation collaborator.
//!
//! The library is scanned once per run and passed explicitly to the matcher
//! and layout generator; nothing in this crate mutates it afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use crate::matcher::normalize;

/// Filename of the dish photo inside each asset directory.
pub const DISH_FILE: &str = "dish.png";

/// One dish-image candidate.
#[derive(Debug, Clone)]
pub struct DishAsset {
    /// Raw directory name, e.g. `001_adafina`.
    pub folder: String,
    /// Numeric prefix parsed from the folder name (0 when absent).
    pub index: u32,
    /// Folder name with the index stripped, e.g. `adafina`.
    pub name: String,
    /// Normalized form of `name` used for matching.
    pub normalized: String,
    /// Path to `dish.png` inside the folder.
    pub path: PathBuf,
    /// Whether `dish.png` exists and decodes; candidates without a usable
    /// dish file are filtered before scoring.
    pub has_dish: bool,
    /// Pixel dimensions from the image header, when the file decodes.
    pub dimensions: Option<(u32, u32)>,
}

/// One ingredient icon.
#[derive(Debug, Clone)]
pub struct IconAsset {
    /// Ingredient name derived from the file stem, e.g. `olive_oil`.
    pub ingredient: String,
    /// Normalized form used when associating icons with recipe ingredients.
    pub normalized: String,
    pub path: PathBuf,
}

/// Immutable snapshot of all scanned assets.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    /// Dish assets sorted by folder name.
    pub dishes: Vec<DishAsset>,
    /// Ingredient icons sorted by file name.
    pub icons: Vec<IconAsset>,
}

impl AssetLibrary {
    /// Scan the dish-image directory and (optionally) the icon directory.
    pub fn scan(images_dir: &Path, icons_dir: Option<&Path>) -> Result<Self, String> {
        let dishes = scan_dishes(images_dir)?;
        let icons = match icons_dir {
            Some(dir) => scan_icons(dir)?,
            None => Vec::new(),
        };
        Ok(Self { dishes, icons })
    }

    /// Dish candidates usable for matching (dish file present and decodable).
    pub fn usable_dishes(&self) -> impl Iterator<Item = &DishAsset> {
        self.dishes.iter().filter(|d| d.has_dish)
    }

    /// Look up a dish asset by its raw folder name.
    pub fn dish_by_folder(&self, folder: &str) -> Option<&DishAsset> {
        self.dishes.iter().find(|d| d.folder == folder)
    }
}

fn scan_dishes(images_dir: &Path) -> Result<Vec<DishAsset>, String> {
    let entries = fs::read_dir(images_dir)
        .map_err(|e| format!("Cannot read image directory '{}': {e}", images_dir.display()))?;

    let mut dishes = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let folder = match dir.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        let (index, name) = split_index(&folder);
        let path = dir.join(DISH_FILE);
        let (has_dish, dimensions) = probe_image(&path);

        dishes.push(DishAsset {
            normalized: normalize(&name),
            folder,
            index,
            name,
            path,
            has_dish,
            dimensions,
        });
    }

    dishes.sort_by(|a, b| a.folder.cmp(&b.folder));
    Ok(dishes)
}

fn scan_icons(icons_dir: &Path) -> Result<Vec<IconAsset>, String> {
    let entries = fs::read_dir(icons_dir)
        .map_err(|e| format!("Cannot read icon directory '{}': {e}", icons_dir.display()))?;

    let mut icons = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().map(|e| e != "png").unwrap_or(true) {
            continue;
        }
        let ingredient = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => continue,
        };
        icons.push(IconAsset {
            normalized: normalize(&ingredient),
            ingredient,
            path,
        });
    }

    icons.sort_by(|a, b| a.ingredient.cmp(&b.ingredient));
    Ok(icons)
}

/// Split a `NNN_name` folder into its numeric index and bare name.
fn split_index(folder: &str) -> (u32, String) {
    if let Some((prefix, rest)) = folder.split_once('_') {
        if let Ok(index) = prefix.parse::<u32>() {
            return (index, rest.to_string());
        }
    }
    (0, folder.to_string())
}

/// Check that an image file exists and its header decodes; a listed but
/// unreadable file is treated the same as an absent one.
fn probe_image(path: &Path) -> (bool, Option<(u32, u32)>) {
    if !path.exists() {
        return (false, None);
    }
    match image::image_dimensions(path) {
        Ok(dims) => (true, Some(dims)),
        Err(e) => {
            log::warn!("Unusable asset '{}': {e}", path.display());
            (false, None)
        }
    }
}
