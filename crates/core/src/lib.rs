//! Core library for toanki
//!
//! This crate implements the **Functional Core** of the toanki importer,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`toanki_core`** (this crate): Pure transformation functions with zero I/O
//! - **`toanki`**: File discovery, configuration, the AnkiConnect HTTP client,
//!   and import orchestration (the Imperative Shell)
//!
//! # Pipeline
//!
//! ```text
//! OPML text -> parse_opml -> select_root -> classify -> note_from_card -> AnkiConnect
//! ```
//!
//! # Module Organization
//!
//! - [`outline`]: Outline tree model and OPML parsing
//! - [`root`]: Choosing the traversal root and deck-path prefix
//! - [`classify`]: Breadth-first classification into decks and cards
//! - [`text`]: Label and annotation joining
//! - [`media`]: Image reference decoding
//! - [`anki`]: AnkiConnect request bodies
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use toanki_core::{classify::classify_selection, outline::parse_opml, root::select_root};
//!
//! let document = parse_opml(&xml)?;
//! let selection = select_root(document, "")?;
//! let output = classify_selection(&selection, "https://api2.mubu.com/v3/");
//!
//! for deck in &output.decks {
//!     println!("{deck}");
//! }
//! ```

pub mod anki;
pub mod classify;
pub mod media;
pub mod outline;
pub mod root;
pub mod text;
