//! Procedural name generation from tagged fragment tables.
//!
//! This crate synthesizes names for characters, towns, rivers and places by
//! combining randomly selected fragments:
//! - Fragment tables grouped by tag (a culture or theme, e.g. `fantasy-elf01`)
//! - Pluggable data providers (embedded, directory, in-memory)
//! - Tag-scoped views for repeated generation within one tag
//! - Compiled table snapshots for faster startup
//!
//! Loading is the only fallible step: once an `Engine` is built, every
//! query returns a name, falling back to a random tag when needed.
//!
//! # Example
//!
//! ```
//! use namer_core::{Engine, NameChooser};
//!
//! let engine = Engine::new().expect("embedded data loads").with_seed(7);
//!
//! let town = engine.town();
//! let elf = engine.tag("fantasy-elf01").female();
//! assert!(!town.is_empty());
//! assert!(!elf.surname.is_empty());
//! ```

/// Core tables, composition rules and generation engine.
pub mod model;

/// Data providers feeding the engine at construction.
pub mod provider;

/// Error types (construction only).
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{FetchError, LoadError, SnapshotError, TableError, TableKind};
pub use model::chooser::{CharacterName, Gender, NameChooser, RiverName, ScopedView};
pub use model::engine::{CONFIG_PATH, Engine};
pub use model::tables::{NameTable, PlaceList, RiverTable, TagTables, Tables, TownTable};
pub use provider::{DirectoryProvider, EmbeddedProvider, MemoryProvider, Provider};
