//! Sample recipe records for testing and demonstration.
//!
//! Each sample exercises a different record shape: simple steps, cooking
//! variants, and a minimal record with gaps.

use crate::recipe::Recipe;

/// Slow-cooked stew with simple steps in all four languages.
pub fn adafina_json() -> &'static str {
    r#"{
  "id": "adafina",
  "name": {
    "he": "חמין",
    "es": "Adafina",
    "ar": "الدفينة",
    "en": "Adafina"
  },
  "description": {
    "he": "תבשיל שבת מסורתי המתבשל כל הלילה.",
    "es": "Guiso tradicional de Shabat cocinado toda la noche.",
    "ar": "يخنة السبت التقليدية تطهى طوال الليل.",
    "en": "Traditional Sabbath stew, slow-cooked overnight."
  },
  "meta": {
    "servings": "8",
    "prep_time": "30 min",
    "cook_time": "8 h",
    "difficulty": "Medium"
  },
  "ingredients": {
    "he": ["2 כוסות חומוס", "1 ק\"ג תפוחי אדמה", "8 ביצים"],
    "es": ["2 tazas de garbanzos", "1 kg de patatas", "8 huevos"],
    "ar": ["كوبان من الحمص", "1 كغ بطاطا", "8 بيضات"],
    "en": ["2 cups chickpeas", "1 kg potatoes", "8 eggs", "2 tbsp olive oil"]
  },
  "steps": {
    "he": ["להשרות את החומוס ללילה", "לבשל 8 שעות על אש נמוכה"],
    "es": ["Remojar los garbanzos durante la noche", "Cocinar 8 horas a fuego lento"],
    "ar": ["انقع الحمص طوال الليل", "اطبخ 8 ساعات على نار هادئة"],
    "en": ["Soak the chickpeas overnight", "Simmer for 8 hours on low heat"]
  }
}"#
}

/// Fried doughnuts with two cooking-method variants.
pub fn sfenj_json() -> &'static str {
    r#"{
  "id": "sfenj",
  "name": {
    "he": "ספינג'",
    "es": "Sfenj",
    "ar": "سفنج",
    "en": "Sfenj"
  },
  "description": {
    "he": "סופגניות מרוקאיות אווריריות.",
    "es": "Buñuelos marroquíes ligeros.",
    "ar": "عجينة مقلية مغربية خفيفة.",
    "en": "Airy Maghrebi doughnuts, eaten hot with sugar."
  },
  "meta": {
    "servings": "12",
    "prep_time": "20 min",
    "cook_time": "30 min",
    "difficulty": "Easy"
  },
  "ingredients": {
    "he": ["4 כוסות קמח", "שמרים", "שמן לטיגון"],
    "es": ["4 tazas de harina", "levadura", "aceite para freír"],
    "ar": ["4 أكواب دقيق", "خميرة", "زيت للقلي"],
    "en": ["4 cups flour", "1 tbsp yeast", "oil for frying", "pinch of sugar"]
  },
  "variants": [
    {
      "name": {"he": "מטוגן", "es": "Frito", "ar": "مقلي", "en": "Fried"},
      "steps": {
        "he": ["ללוש בצק רך", "להתפיח שעתיים", "לטגן בשמן עמוק"],
        "es": ["Amasar una masa blanda", "Dejar leudar dos horas", "Freír en aceite"],
        "ar": ["اعجن عجينة طرية", "اتركها تختمر ساعتين", "اقلها في زيت غزير"],
        "en": ["Knead a soft dough", "Let rise for two hours", "Deep-fry until golden"]
      }
    },
    {
      "name": {"he": "אפוי", "es": "Horneado", "ar": "مخبوز", "en": "Baked"},
      "steps": {
        "he": ["לאפות בתנור חם"],
        "es": ["Hornear en horno caliente"],
        "ar": ["اخبز في فرن ساخن"],
        "en": ["Bake in a hot oven instead of frying"]
      }
    }
  ]
}"#
}

/// Minimal record: no description, no steps, sparse languages.
pub fn minimal_json() -> &'static str {
    r#"{
  "id": "tirshi_pumpkin_salad",
  "name": {"en": "Tirshi"},
  "ingredients": {"en": ["1 pumpkin", "2 cloves garlic"]}
}"#
}

/// All samples, parsed.
pub fn sample_recipes() -> Vec<Recipe> {
    [adafina_json(), sfenj_json(), minimal_json()]
        .iter()
        .map(|json| Recipe::from_json(json).expect("sample recipe parses"))
        .collect()
}
