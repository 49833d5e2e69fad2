//! Data layer and configuration for the California housing explorer.
//!
//! The desktop window lives in the `housing-explorer` binary; everything it
//! needs to load, filter and summarise the dataset is exposed from here so the
//! `generate_sample` helper can share the synthetic generator.

pub mod config;
pub mod data;
