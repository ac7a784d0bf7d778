//! Recipe records – the multilingual recipe data model and JSON loading.
//!
//! A recipe is keyed by a stable string identifier and carries its name,
//! description, ingredients, and instructions in all four book languages
//! (Hebrew, Spanish, Arabic, English). Records are produced by the content
//! pipeline; this crate reads them, resolves their dish image, and renders
//! them. The identifier doubles as the deterministic seed for decorative
//! placement, so it must stay stable across pipeline runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The four book languages, in fixed book order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    He,
    Es,
    Ar,
    En,
}

impl Lang {
    pub const ALL: [Lang; 4] = [Lang::He, Lang::Es, Lang::Ar, Lang::En];

    /// Language code as used in JSON keys and CSS classes.
    pub fn code(self) -> &'static str {
        match self {
            Lang::He => "he",
            Lang::Es => "es",
            Lang::Ar => "ar",
            Lang::En => "en",
        }
    }

    /// Right-to-left scripts need `dir="rtl"` on their columns.
    pub fn is_rtl(self) -> bool {
        matches!(self, Lang::He | Lang::Ar)
    }

    /// Section heading for the ingredient list.
    pub fn ingredients_label(self) -> &'static str {
        match self {
            Lang::He => "מצרכים",
            Lang::Es => "Ingredientes",
            Lang::Ar => "المكونات",
            Lang::En => "Ingredients",
        }
    }

    /// Section heading for the instruction steps.
    pub fn instructions_label(self) -> &'static str {
        match self {
            Lang::He => "הוראות הכנה",
            Lang::Es => "Instrucciones",
            Lang::Ar => "طريقة التحضير",
            Lang::En => "Instructions",
        }
    }
}

/// One string per book language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub he: String,
    #[serde(default)]
    pub es: String,
    #[serde(default)]
    pub ar: String,
    #[serde(default)]
    pub en: String,
}

impl Localized {
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::He => &self.he,
            Lang::Es => &self.es,
            Lang::Ar => &self.ar,
            Lang::En => &self.en,
        }
    }
}

/// One list of strings per book language (ingredients, steps).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalizedList {
    #[serde(default)]
    pub he: Vec<String>,
    #[serde(default)]
    pub es: Vec<String>,
    #[serde(default)]
    pub ar: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

impl LocalizedList {
    pub fn get(&self, lang: Lang) -> &[String] {
        match lang {
            Lang::He => &self.he,
            Lang::Es => &self.es,
            Lang::Ar => &self.ar,
            Lang::En => &self.en,
        }
    }
}

/// Free-form metadata shown in the title-page footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeMeta {
    #[serde(default)]
    pub servings: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub difficulty: String,
}

/// One cooking-method variant (e.g. stovetop vs. oven) with its own steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeVariant {
    pub name: Localized,
    pub steps: LocalizedList,
}

/// Reference to the resolved dish image, written back by the pipeline after
/// matching. `prompt` is owned by the image-generation collaborator and is
/// preserved untouched on write-back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// A complete recipe record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub meta: RecipeMeta,
    #[serde(default)]
    pub ingredients: LocalizedList,
    /// Simple single-method steps. Mutually exclusive with `variants` in
    /// practice; when both are present, `variants` wins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<LocalizedList>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<RecipeVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl Recipe {
    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Serialise to pretty JSON (write-back format).
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Instruction steps for one language, flattened across variants.
    ///
    /// Step numbering is continuous: a second variant's steps continue where
    /// the first variant's stopped. Returns `(variant label, steps)` pairs;
    /// the label is `None` for simple un-varianted recipes.
    pub fn step_groups(&self, lang: Lang) -> Vec<(Option<&str>, &[String])> {
        if !self.variants.is_empty() {
            self.variants
                .iter()
                .map(|v| (Some(v.name.get(lang)), v.steps.get(lang)))
                .collect()
        } else if let Some(steps) = &self.steps {
            vec![(None, steps.get(lang))]
        } else {
            Vec::new()
        }
    }
}

/// Load every `*.json` recipe from `dir`, sorted by filename.
pub fn load_recipes(dir: &Path) -> Result<Vec<Recipe>, String> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| format!("Cannot read recipe directory '{}': {e}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    paths.sort();

    let mut recipes = Vec::with_capacity(paths.len());
    for path in paths {
        let json = fs::read_to_string(&path)
            .map_err(|e| format!("Cannot read '{}': {e}", path.display()))?;
        let mut recipe = Recipe::from_json(&json)
            .map_err(|e| format!("Malformed recipe '{}': {e}", path.display()))?;
        // Older records omit `id`; fall back to the filename stem.
        if recipe.id.is_empty() {
            recipe.id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
        }
        recipes.push(recipe);
    }
    Ok(recipes)
}

/// Write a recipe back to `dir/<id>.json` (image write-back).
pub fn save_recipe(dir: &Path, recipe: &Recipe) -> Result<(), String> {
    let path = dir.join(format!("{}.json", recipe.id));
    fs::write(&path, recipe.to_json())
        .map_err(|e| format!("Cannot write '{}': {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_round_trip() {
        let json = r#"{
            "id": "adafina",
            "name": {"he": "חמין", "es": "Adafina", "ar": "الدفينة", "en": "Adafina"},
            "description": {"he": "", "es": "", "ar": "", "en": "Slow-cooked Sabbath stew"},
            "meta": {"servings": "8", "prep_time": "30 min", "cook_time": "8 h", "difficulty": "Medium"},
            "ingredients": {"he": [], "es": [], "ar": [], "en": ["2 cups chickpeas", "1 kg potatoes"]}
        }"#;
        let recipe = Recipe::from_json(json).unwrap();
        assert_eq!(recipe.id, "adafina");
        assert_eq!(recipe.name.get(Lang::En), "Adafina");
        assert_eq!(recipe.ingredients.get(Lang::En).len(), 2);

        let back = Recipe::from_json(&recipe.to_json()).unwrap();
        assert_eq!(back.meta.cook_time, "8 h");
    }

    #[test]
    fn step_groups_continuous_numbering_shape() {
        let json = r#"{
            "id": "sfenj",
            "name": {"en": "Sfenj"},
            "variants": [
                {"name": {"en": "Fried"}, "steps": {"en": ["Mix", "Rest", "Fry"]}},
                {"name": {"en": "Baked"}, "steps": {"en": ["Mix", "Bake"]}}
            ]
        }"#;
        let recipe = Recipe::from_json(json).unwrap();
        let groups = recipe.step_groups(Lang::En);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Some("Fried"));
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn simple_steps_have_no_label() {
        let json = r#"{
            "id": "x",
            "name": {"en": "X"},
            "steps": {"en": ["Only step"]}
        }"#;
        let recipe = Recipe::from_json(json).unwrap();
        let groups = recipe.step_groups(Lang::En);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].0.is_none());
    }

    #[test]
    fn rtl_flags() {
        assert!(Lang::He.is_rtl());
        assert!(Lang::Ar.is_rtl());
        assert!(!Lang::Es.is_rtl());
        assert!(!Lang::En.is_rtl());
    }
}
