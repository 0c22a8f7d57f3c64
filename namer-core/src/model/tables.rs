use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// First-name and surname fragments of one tag.
///
/// Any list missing from the source data decodes as empty; empty lists
/// produce empty names at query time rather than load errors.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NameTable {
	#[serde(default)]
	pub male: Vec<String>,
	#[serde(default)]
	pub female: Vec<String>,
	/// Names handed out by the neutral override, whatever the requested gender.
	#[serde(default)]
	pub neutral: Vec<String>,
	#[serde(default)]
	pub surname: Vec<String>,
}

/// Town fragments, concatenated as prefix + middle + suffix.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TownTable {
	#[serde(default)]
	pub prefix: Vec<String>,
	#[serde(default)]
	pub middle: Vec<String>,
	#[serde(default)]
	pub suffix: Vec<String>,
}

/// River fragments plus the descriptors ("brook", "creek") returned next to the name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RiverTable {
	#[serde(default, rename = "type")]
	pub kind: Vec<String>,
	#[serde(default)]
	pub prefix: Vec<String>,
	#[serde(default)]
	pub suffix: Vec<String>,
}

/// Whole, pre-authored place names.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaceList {
	#[serde(default, rename = "name")]
	pub names: Vec<String>,
}

/// Where the four tables of one tag live, as listed in the configuration.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagSources {
	pub name: String,
	pub town: String,
	pub river: String,
	pub place: String,
}

/// Top-level configuration: tag → table locations, in declaration order.
pub type TagConfig = IndexMap<String, TagSources>;

/// Everything loaded for a single tag.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TagTables {
	pub names: NameTable,
	pub towns: TownTable,
	pub rivers: RiverTable,
	pub places: PlaceList,
}

/// All loaded tables, keyed by tag.
///
/// The key order is the tag registry order. Tables are never modified
/// once handed to an `Engine`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tables {
	tags: IndexMap<String, TagTables>,
}

impl Tables {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds (or replaces) the tables of `tag`, keeping its original position.
	pub fn insert(&mut self, tag: impl Into<String>, tables: TagTables) {
		self.tags.insert(tag.into(), tables);
	}

	/// Tables of a registered tag.
	///
	/// The empty tag is never a valid key, even if it was registered.
	pub fn get(&self, tag: &str) -> Option<&TagTables> {
		if tag.is_empty() {
			return None;
		}
		self.tags.get(tag)
	}

	/// Tables at a registry position.
	pub fn get_index(&self, index: usize) -> Option<(&str, &TagTables)> {
		self.tags.get_index(index).map(|(tag, tables)| (tag.as_str(), tables))
	}

	/// Registered tags in registry order.
	pub fn tags(&self) -> impl Iterator<Item = &str> {
		self.tags.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}
}

impl FromIterator<(String, TagTables)> for Tables {
	fn from_iter<I: IntoIterator<Item = (String, TagTables)>>(iter: I) -> Self {
		Self { tags: iter.into_iter().collect() }
	}
}
