//! # cookbook-press – deterministic layout & matching engine for a
//! multilingual illustrated cookbook
//!
//! This crate turns a directory of recipe JSON records and a tree of
//! generated image assets into a four-language book. The pipeline stages
//! are:
//!
//! 1. **Load** – recipe JSON records → [`recipe::Recipe`] ([`recipe`])
//! 2. **Scan** – image directories → immutable [`assets::AssetLibrary`]
//! 3. **Match** – recipe ↔ dish image via a layered fuzzy chain ([`matcher`])
//! 4. **Decorate** – seeded, reproducible icon placement ([`decor`])
//! 5. **Scale** – content-adaptive column typography ([`typography`])
//! 6. **Render** – four-page-per-recipe HTML, web + print ([`render`])
//!
//! The `press` binary drives the whole build; see [`pipeline`].
//!
//! Everything in stages 3–5 is pure and deterministic: reruns (and the two
//! decorated spread pages of one recipe) produce identical output, so the
//! book can be rebuilt from scratch on every pipeline run without persisting
//! any layout state.

pub mod assets;
pub mod decor;
pub mod matcher;
pub mod overrides;
pub mod pipeline;
pub mod recipe;
pub mod render;
pub mod samples;
pub mod typography;

// Re-exports for convenience
pub use pipeline::{build_book, BuildConfig, BuildReport};
