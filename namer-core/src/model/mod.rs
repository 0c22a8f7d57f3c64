//! Top-level module for the name generation system.
//!
//! This module provides:
//! - The in-memory fragment tables loaded per tag (`tables`)
//! - Fragment selection and composition rules (`compose`)
//! - The generation engine with its tag fallback (`Engine`)
//! - The shared `NameChooser` interface and tag-bound `ScopedView`

/// Generation engine: loading, tag resolution and name composition.
pub mod engine;

/// Fragment tables and the configuration that locates them.
///
/// All tables are immutable once handed to an `Engine`.
pub mod tables;

/// Pure selection and composition rules (random pick, town collisions,
/// neutral override).
pub mod compose;

/// `NameChooser` interface, its result types and the tag-bound view.
pub mod chooser;
