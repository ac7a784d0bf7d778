//! Hand-maintained match overrides.
//!
//! These tables exist because fuzzy matching cannot resolve every pairing:
//! some dishes were renamed during canonicalization, some folders were
//! truncated at creation time, and a few recipes deliberately share one
//! image. Edit by hand; entries here take absolute precedence in the
//! matcher. Keep both lists sorted by recipe id.

/// Recipe id → asset folder. Always wins, regardless of computed score.
pub const MANUAL_MATCHES: &[(&str, &str)] = &[
    ("adafina_wheat_side_dish", "092_wheat_berries"),
    ("adamshusha", "002_admeshushah"),
    ("baked_potato_levivot", "076_assida"), // might need adjustment
    ("binas_thick_sour_spicy_soup", "046_hsou"),
    ("bkaila_tunisian_stew", "010_bkaila"),
    ("bread", "041_khobz_dar"),
    ("brikot", "011_brik"),
    ("bshisha_bsisa", "008_beshisha"),
    ("chicken_fricassee_stew", "033_fricassee_stew"),
    ("chraime_spicy_fish_stew", "045_hraime"),
    ("dabikh_hagim", "087_tbikha_chagim"),
    ("fricassee_rolls", "034_fricasse"),
    ("green_beans_tomato_sauce", "050_loubia_khadra"),
    ("homemade_couscous", "026_couscous"),
    ("hot_fudge_pudding_cake", "044_hot_fudge_cake"),
    ("kataa_soup", "047_ktaa"),
    ("kouklot_semolina_dumplings", "048_kuklot"),
    ("marmuma", "055_marmouma"), // duplicate recipe
    ("msiyar", "062_msiyer"),
    ("nougat_and_peanut_cake_mor_abergil", "065_nougat_peanut_cake"),
    ("original_toll_house_chocolate_chip_cookies", "022_chocolate_chip_cookies"),
    ("red_stewed_olives", "057_marqa_zeitoun"),
    ("sfingh", "078_sfenj"), // duplicate recipe
    ("shakshuka_caramelized_onion_sausage", "066_ojja_merguez"),
    ("shepherd_pie_north_african", "081_shepherds_pie"),
    ("shlomit_perl_dressing", "074_salad_dressing"),
    ("sour_dough_bread_soly", "085_sourdough_bread"),
    ("soy_shawarma", "080_shawarma"),
    ("tbikha_tomatem", "088_tbikhat_tmatem"),
    ("vegan_fish_chraime", "045_hraime"), // same image works
    ("vegetable_soup_for_couscous", "027_couscous_soup"),
    ("yellow_meat", "049_lham_sfar"),
];

/// Recipe id → folders that must never be reused via the `current_path`
/// strategy (known-bad historical matches). Manual overrides are unaffected.
pub const EXCLUDE_MATCHES: &[(&str, &[&str])] = &[
    ("baked_potato_levivot", &["076_assida"]), // levivot != assida
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_matches_sorted_and_unique() {
        for pair in MANUAL_MATCHES.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "override table out of order at '{}'",
                pair[1].0
            );
        }
    }

    #[test]
    fn override_targets_look_like_asset_folders() {
        for (_, folder) in MANUAL_MATCHES {
            let prefix = folder.split('_').next().unwrap_or_default();
            assert!(
                prefix.chars().all(|c| c.is_ascii_digit()),
                "override target '{folder}' lacks a numeric index prefix"
            );
        }
    }
}
