//! Console front end for Chirp.
//!
//! A numbered-menu shell over [`chirp_data::Feed`] plus the plain-text
//! renderers it shares with the one-shot `stats` and `recent` views.

pub mod app;
pub mod render;
