//! HTML renderer – emits the four-page-per-recipe book markup.
//!
//! Page plan per recipe:
//! 1. Title page – four language titles, descriptions, meta footer
//! 2. Hero page – full-bleed dish image (placeholder when unmatched)
//! 3. Spread `hs` – Spanish column + Hebrew column
//! 4. Spread `ae` – English column + Arabic column
//!
//! Both spread pages of one recipe carry identical decorative placements;
//! the variant tag only selects CSS classes and never feeds the placement
//! seed. Columns are styled inline with the typography scaler's output so
//! the stylesheet stays static.

use std::fmt::Write as _;

use crate::decor::Placement;
use crate::recipe::{Lang, Recipe};
use crate::typography::{profile_for_column, ScaleBounds, TypographyProfile};

/// The two decorated spread pages of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    /// Spanish + Hebrew.
    Hs,
    /// English + Arabic.
    Ae,
}

impl Spread {
    /// Variant tag used in CSS classes and element ids.
    pub fn tag(self) -> &'static str {
        match self {
            Spread::Hs => "hs",
            Spread::Ae => "ae",
        }
    }

    /// Left and right column languages.
    pub fn langs(self) -> (Lang, Lang) {
        match self {
            Spread::Hs => (Lang::Es, Lang::He),
            Spread::Ae => (Lang::En, Lang::Ar),
        }
    }
}

/// Everything the renderer needs for one recipe: the record plus the
/// pipeline-resolved image reference and decorative placements.
#[derive(Debug, Clone)]
pub struct BookEntry<'a> {
    pub recipe: &'a Recipe,
    /// Href of the matched dish image, already relative to the output page.
    pub image_href: Option<String>,
    /// Decoration shared by both spread pages.
    pub placements: Vec<Placement>,
}

/// HTML-escape text content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render all four pages of one recipe, starting at `start_page`.
pub fn render_recipe(entry: &BookEntry, start_page: usize, scale: &ScaleBounds) -> String {
    let mut out = String::new();
    out.push_str(&render_title_page(entry.recipe, start_page));
    out.push_str(&render_hero_page(entry, start_page + 1));
    out.push_str(&render_spread(entry, Spread::Hs, start_page + 2, scale));
    out.push_str(&render_spread(entry, Spread::Ae, start_page + 3, scale));
    out
}

/// Page 1: four-language title row, description grid, meta footer.
fn render_title_page(recipe: &Recipe, page_num: usize) -> String {
    let mut out = String::new();
    out.push_str("<section class=\"page page--title\">\n  <div class=\"page-inner\">\n");

    out.push_str("    <div class=\"title-row\">\n");
    for lang in [Lang::Es, Lang::He, Lang::En, Lang::Ar] {
        let _ = writeln!(
            out,
            "      <div class=\"title-word lang-{}\"><span>{}</span></div>",
            lang.code(),
            escape(recipe.name.get(lang))
        );
    }
    out.push_str("    </div>\n");

    out.push_str("    <div class=\"info-grid\">\n");
    for lang in Lang::ALL {
        let _ = writeln!(
            out,
            "      <div class=\"info-item lang-{}\"{}><p>{}</p></div>",
            lang.code(),
            dir_attr(lang),
            escape(recipe.description.get(lang))
        );
    }
    out.push_str("    </div>\n");

    let meta = &recipe.meta;
    let items = [
        ("Servings", &meta.servings),
        ("Prep time", &meta.prep_time),
        ("Cook time", &meta.cook_time),
        ("Difficulty", &meta.difficulty),
    ];
    out.push_str("    <div class=\"meta-row\">\n");
    for (label, value) in items {
        let _ = writeln!(
            out,
            "      <div class=\"meta-item\"><span class=\"meta-label\">{label}</span><span class=\"meta-value\">{}</span></div>",
            escape(value)
        );
    }
    out.push_str("    </div>\n");

    let _ = writeln!(out, "    <div class=\"page-num\">{page_num}</div>");
    out.push_str("  </div>\n</section>\n");
    out
}

/// Page 2: full-bleed dish image, or a labelled placeholder when the recipe
/// is unmatched so the gap stays visible in review builds.
fn render_hero_page(entry: &BookEntry, page_num: usize) -> String {
    let recipe = entry.recipe;
    let mut out = String::new();
    out.push_str("<section class=\"page page--image\">\n  <div class=\"page-inner\">\n");
    match &entry.image_href {
        Some(href) => {
            let _ = writeln!(
                out,
                "    <img class=\"hero-image\" src=\"{}\" alt=\"{} dish\">",
                escape(href),
                escape(recipe.name.get(Lang::En))
            );
        }
        None => {
            let _ = writeln!(
                out,
                "    <div class=\"hero-missing\">No image yet: {}</div>",
                escape(recipe.name.get(Lang::En))
            );
        }
    }
    let _ = writeln!(out, "    <div class=\"page-num\">{page_num}</div>");
    out.push_str("  </div>\n</section>\n");
    out
}

/// Pages 3 and 4: a two-column language spread with shared decoration.
fn render_spread(entry: &BookEntry, spread: Spread, page_num: usize, scale: &ScaleBounds) -> String {
    let (left, right) = spread.langs();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<section class=\"page page--spread page--{}\">\n  <div class=\"page-inner\">",
        spread.tag()
    );
    out.push_str(&render_decor(&entry.placements, spread.tag()));
    out.push_str("    <div class=\"two-col\">\n");
    out.push_str(&render_column(entry.recipe, left, scale));
    out.push_str(&render_column(entry.recipe, right, scale));
    out.push_str("    </div>\n");
    let _ = writeln!(out, "    <div class=\"page-num\">{page_num}</div>");
    out.push_str("  </div>\n</section>\n");
    out
}

/// Decorative icon layer. Identical markup on both spreads apart from the
/// variant class, since the placements themselves are variant-independent.
fn render_decor(placements: &[Placement], tag: &str) -> String {
    if placements.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    let _ = writeln!(out, "    <div class=\"decor decor--{tag}\">");
    for p in placements {
        let _ = writeln!(
            out,
            "      <img class=\"decor-icon\" src=\"{}\" alt=\"{}\" style=\"left:{:.2}%;top:{:.2}%;transform:rotate({:.2}deg) skew({:.2}deg,{:.2}deg) scale({:.3})\">",
            escape(&p.icon),
            escape(&p.ingredient),
            p.x_pct,
            p.y_pct,
            p.rotation_deg,
            p.skew_x_deg,
            p.skew_y_deg,
            p.scale
        );
    }
    out.push_str("    </div>\n");
    out
}

/// One language column: ingredients then instruction steps, numbered
/// continuously across variants, styled with the scaler's profile.
fn render_column(recipe: &Recipe, lang: Lang, scale: &ScaleBounds) -> String {
    let profile = profile_for_column(recipe, lang, scale);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "      <div class=\"column lang-{}\"{} style=\"{}\">",
        lang.code(),
        dir_attr(lang),
        profile_style(profile)
    );

    let _ = writeln!(
        out,
        "        <div class=\"section-label\">{}</div>",
        escape(lang.ingredients_label())
    );
    out.push_str("        <ul class=\"ingredients-list\">\n");
    for ingredient in recipe.ingredients.get(lang) {
        let _ = writeln!(out, "          <li>{}</li>", escape(ingredient));
    }
    out.push_str("        </ul>\n");

    let _ = writeln!(
        out,
        "        <div class=\"section-label\">{}</div>",
        escape(lang.instructions_label())
    );
    let mut step_num = 1usize;
    for (label, steps) in recipe.step_groups(lang) {
        if let Some(label) = label {
            let _ = writeln!(
                out,
                "        <div class=\"variant-label\">{}</div>",
                escape(label)
            );
        }
        out.push_str("        <ul class=\"steps-list\">\n");
        for step in steps {
            let _ = writeln!(
                out,
                "          <li class=\"step\"><span class=\"step-num\">{step_num}.</span>{}</li>",
                escape(step)
            );
            step_num += 1;
        }
        out.push_str("        </ul>\n");
    }

    out.push_str("      </div>\n");
    out
}

fn dir_attr(lang: Lang) -> &'static str {
    if lang.is_rtl() {
        " dir=\"rtl\""
    } else {
        ""
    }
}

fn profile_style(profile: TypographyProfile) -> String {
    format!(
        "font-size:{:.3}em;line-height:{:.3}",
        profile.font_size_em, profile.line_height
    )
}

/// Wrap body markup in a complete standalone document.
fn render_document(title: &str, css: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>\n{css}\n</style>\n</head>\n<body>\n\n<div class=\"book\">\n{body}\n</div>\n\n</body>\n</html>\n",
        escape(title)
    )
}

/// Front endpaper: the one-off full-page icon field, unnumbered. Empty
/// placement list renders nothing.
pub fn render_endpaper(placements: &[Placement]) -> String {
    if placements.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    out.push_str("<section class=\"page page--endpaper\">\n  <div class=\"page-inner\">\n");
    out.push_str(&render_decor(placements, "endpaper"));
    out.push_str("  </div>\n</section>\n");
    out
}

/// Complete print document: optional endpaper, then every recipe with
/// continuous page numbers.
pub fn render_book(
    entries: &[BookEntry],
    endpaper: &[Placement],
    title: &str,
    css: &str,
    scale: &ScaleBounds,
) -> String {
    let mut body = String::new();
    body.push_str(&render_endpaper(endpaper));
    let mut page_num = 1usize;
    for entry in entries {
        body.push_str(&render_recipe(entry, page_num, scale));
        page_num += 4;
    }
    render_document(title, css, &body)
}

/// Standalone page for one recipe (web build).
pub fn render_single_recipe(entry: &BookEntry, css: &str, scale: &ScaleBounds) -> String {
    let title = format!("{} – Four-Language Recipe", entry.recipe.name.get(Lang::En));
    let body = render_recipe(entry, 1, scale);
    render_document(&title, css, &body)
}

/// Table-of-contents page linking each recipe's web page.
pub fn render_index(recipes: &[&Recipe], title: &str) -> String {
    let mut items = String::new();
    for recipe in recipes {
        let _ = writeln!(
            items,
            "      <li><a href=\"{}.html\">{}</a></li>",
            escape(&recipe.id),
            escape(recipe.name.get(Lang::En))
        );
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n<style>\n{INDEX_CSS}\n</style>\n</head>\n<body>\n<div class=\"container\">\n  <h1>{}</h1>\n  <ul>\n{items}  </ul>\n</div>\n</body>\n</html>\n",
        escape(title),
        escape(title)
    )
}

/// Stylesheet used when the operator supplies no CSS file.
pub const DEFAULT_CSS: &str = r#":root {
  --bg-page: #faf6f1;
  --bg-body: #e0dfda;
  --ink: #222222;
  --accent: #d9925b;
  --divider: #d8cfc2;
}

body {
  margin: 0;
  background: var(--bg-body);
  color: var(--ink);
  font-family: "Inter", system-ui, sans-serif;
}

.page {
  position: relative;
  width: 210mm;
  height: 297mm;
  margin: 0 auto;
  background: var(--bg-page);
  overflow: hidden;
  page-break-after: always;
}

.page-inner {
  position: relative;
  height: 100%;
  box-sizing: border-box;
  padding: 14mm;
}

.lang-he { font-family: "Heebo", sans-serif; }
.lang-ar { font-family: "Noto Naskh Arabic", serif; }
.lang-en, .lang-es { font-family: "Bona Nova", serif; }

.title-row { text-align: center; margin-bottom: 8mm; }
.title-word { font-size: 1.6em; font-weight: 700; }

.info-grid {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 4mm 8mm;
}

.meta-row {
  position: absolute;
  bottom: 12mm;
  left: 14mm;
  right: 14mm;
  display: flex;
  justify-content: space-between;
  border-top: 1px solid var(--divider);
  padding-top: 3mm;
}

.meta-label {
  display: block;
  font-size: 0.65em;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  color: var(--accent);
}

.page--image .hero-image {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.hero-missing {
  display: flex;
  align-items: center;
  justify-content: center;
  height: 100%;
  font-style: italic;
  color: var(--accent);
  border: 1px dashed var(--accent);
}

.two-col {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 8mm;
  height: 100%;
}

.section-label {
  font-size: 0.7em;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--accent);
  border-bottom: 1px solid var(--accent);
  display: inline-block;
  margin: 3mm 0 2mm;
}

.ingredients-list, .steps-list {
  list-style: none;
  margin: 0;
  padding: 0;
}

.steps-list .step { margin-bottom: 0.4em; }
.step-num { color: var(--accent); font-weight: 600; margin-inline-end: 0.4em; }
.variant-label { font-weight: 700; margin-top: 2mm; }

.decor { position: absolute; inset: 0; pointer-events: none; }
.decor-icon {
  position: absolute;
  width: 14mm;
  opacity: 0.55;
  transform-origin: center;
}
.decor--endpaper .decor-icon { width: 10mm; opacity: 0.35; }

.page-num {
  position: absolute;
  bottom: 5mm;
  left: 0;
  right: 0;
  text-align: center;
  font-size: 0.7em;
  color: var(--accent);
}
"#;

const INDEX_CSS: &str = r#"body {
  margin: 0;
  padding: 2rem;
  background: #e0dfda;
  font-family: "Inter", system-ui, sans-serif;
  color: #222222;
}
.container {
  max-width: 600px;
  margin: 0 auto;
  background: #faf6f1;
  padding: 2rem;
  border-radius: 8px;
}
h1 { font-size: 2.5rem; margin: 0 0 1.5rem; text-align: center; }
ul { list-style: none; padding: 0; margin: 0; }
li { margin: 0.5rem 0; }
a { color: #d9925b; text-decoration: none; font-size: 1.1rem; }
a:hover { text-decoration: underline; }
"#;
