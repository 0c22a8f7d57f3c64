use std::fmt;

use serde::Serialize;

use super::engine::Engine;

/// Gender hint of a character name request.
///
/// Only a hint: the neutral override may still hand out a neutral name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
	Male,
	Female,
}

/// A character first name and surname.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterName {
	pub name: String,
	pub surname: String,
}

impl fmt::Display for CharacterName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.name, self.surname)
	}
}

/// A river name and its descriptor.
///
/// `kind` is a word like "brook" or "creek"; it describes the river and
/// is not part of `name`.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RiverName {
	pub name: String,
	pub kind: String,
}

impl fmt::Display for RiverName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.name, self.kind)
	}
}

/// Something that chooses or randomly generates names.
///
/// Implemented by `Engine`, which picks a random tag for every call, and by
/// `ScopedView`, which always uses the tag it was created for.
pub trait NameChooser {
	/// Generates a town name.
	fn town(&self) -> String;

	/// Generates a male character name.
	fn male(&self) -> CharacterName;

	/// Generates a female character name.
	fn female(&self) -> CharacterName;

	/// Chooses a place name.
	fn place(&self) -> String;

	/// Generates a river name and descriptor.
	fn river(&self) -> RiverName;
}

/// A handle bound to a single tag.
///
/// Holds no table data of its own; every call is forwarded to the engine.
/// An unknown tag falls back to a random one on every call, exactly like
/// the engine's tag-qualified functions.
#[derive(Debug, Clone)]
pub struct ScopedView<'a> {
	engine: &'a Engine,
	tag: String,
}

impl<'a> ScopedView<'a> {
	pub(crate) fn new(engine: &'a Engine, tag: &str) -> Self {
		Self { engine, tag: tag.to_owned() }
	}

	/// The bound tag.
	pub fn tag(&self) -> &str {
		&self.tag
	}
}

impl NameChooser for ScopedView<'_> {
	fn town(&self) -> String {
		self.engine.town_for(&self.tag)
	}

	fn male(&self) -> CharacterName {
		self.engine.male_for(&self.tag)
	}

	fn female(&self) -> CharacterName {
		self.engine.female_for(&self.tag)
	}

	fn place(&self) -> String {
		self.engine.place_for(&self.tag)
	}

	fn river(&self) -> RiverName {
		self.engine.river_for(&self.tag)
	}
}
