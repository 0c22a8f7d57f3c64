use std::fs;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;

use crate::error::{LoadError, SnapshotError, TableError, TableKind};
use crate::io;
use crate::provider::{DirectoryProvider, EmbeddedProvider, Provider};

use super::chooser::{CharacterName, Gender, NameChooser, RiverName, ScopedView};
use super::compose::{choose_one, compose_town, is_neutral_override, neutral_draw};
use super::tables::{NameTable, PlaceList, RiverTable, TagConfig, TagSources, TagTables, Tables, TownTable};

/// Resource path of the top-level tag configuration.
pub const CONFIG_PATH: &str = "config.json";

/// Tag-scoped name generator over immutable fragment tables.
///
/// # Responsibilities
/// - Load every tag's tables once, through a `Provider`
/// - Compose town, river, place and character names from random fragments
/// - Fall back to a random registered tag when a tag is empty or unknown
///
/// # Invariants
/// - Tables are never modified after construction
/// - The random source is the only shared mutable state; it sits behind a
///   mutex, so an `Engine` can be shared across threads
#[derive(Debug)]
pub struct Engine {
	tables: Tables,
	rng: Mutex<ChaCha8Rng>,
}

impl Engine {
	/// Creates an engine over the built-in data set.
	///
	/// # Errors
	/// Returns an error if the embedded data is malformed.
	pub fn new() -> Result<Self, LoadError> {
		Self::build(&EmbeddedProvider)
	}

	/// Loads the configuration and every tag's tables from `provider`.
	///
	/// Tags are loaded in parallel; the returned error is the one of the first
	/// failing tag in configuration order. The random source is seeded from
	/// the current time, use `with_seed` for reproducible output.
	///
	/// # Errors
	/// Returns `LoadError::Config` if the configuration cannot be read or
	/// decoded, and `LoadError::Table` naming the tag and table kind of the
	/// first table that cannot be read or decoded.
	pub fn build<P: Provider + ?Sized>(provider: &P) -> Result<Self, LoadError> {
		let config: TagConfig = read(provider, CONFIG_PATH).map_err(|source| LoadError::Config {
			path: CONFIG_PATH.to_owned(),
			source,
		})?;

		let tables = load_all(provider, &config)?;
		debug!("loaded name tables for {} tag(s)", tables.len());
		Ok(Self::from_tables(tables))
	}

	/// Creates an engine over already loaded tables.
	pub fn from_tables(tables: Tables) -> Self {
		Self {
			tables,
			rng: Mutex::new(ChaCha8Rng::seed_from_u64(time_seed())),
		}
	}

	/// Replaces the random source with one seeded from `seed`.
	///
	/// Two engines over the same tables and seed produce the same names for
	/// the same sequence of calls.
	pub fn with_seed(self, seed: u64) -> Self {
		self.reseed(seed);
		self
	}

	/// Reseeds the shared random source in place.
	pub fn reseed(&self, seed: u64) {
		*self.rng.lock().unwrap_or_else(PoisonError::into_inner) = ChaCha8Rng::seed_from_u64(seed);
	}

	/// Builds from a directory, going through a compiled snapshot when possible.
	///
	/// - If `config.bin` exists next to `config.json`, it is decoded directly.
	/// - If it is missing or cannot be decoded (e.g. left truncated by an
	///   interrupted write), the tables are loaded from the directory and the
	///   snapshot is rewritten for the next start.
	///
	/// The snapshot is written to a temporary file and renamed into place, so
	/// readers never see a partial `config.bin`. It is not invalidated when
	/// the source files change; delete it to pick up new data.
	///
	/// # Errors
	/// Returns an error if loading fails or the snapshot cannot be read or
	/// written.
	pub fn load_cached<P: AsRef<Path>>(dir: P) -> Result<Self, SnapshotError> {
		let provider = DirectoryProvider::new(dir);
		let config_path = provider.root().join(CONFIG_PATH);
		let snapshot_path = io::build_output_path(&config_path, "bin")
			.map_err(|source| SnapshotError::Io { path: config_path.clone(), source })?;

		if snapshot_path.exists() {
			debug!("loading name tables from snapshot {}", snapshot_path.display());
			let bytes = fs::read(&snapshot_path)
				.map_err(|source| SnapshotError::Io { path: snapshot_path.clone(), source })?;
			match Self::from_snapshot(&bytes) {
				Ok(engine) => return Ok(engine),
				Err(err) => warn!("ignoring snapshot {}: {err}, rebuilding from sources", snapshot_path.display()),
			}
		}

		let engine = Self::build(&provider)?;
		let bytes = engine.snapshot()?;
		io::write_atomic(&snapshot_path, &bytes).map_err(|source| SnapshotError::Io { path: snapshot_path, source })?;
		Ok(engine)
	}

	/// Serializes the loaded tables with `postcard`.
	///
	/// # Errors
	/// Returns `SnapshotError::Encode` if serialization fails.
	pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
		postcard::to_stdvec(&self.tables).map_err(SnapshotError::Encode)
	}

	/// Creates an engine from bytes produced by `snapshot`.
	///
	/// # Errors
	/// Returns `SnapshotError::Decode` if the bytes are not a valid snapshot.
	pub fn from_snapshot(bytes: &[u8]) -> Result<Self, SnapshotError> {
		let tables: Tables = postcard::from_bytes(bytes).map_err(SnapshotError::Decode)?;
		Ok(Self::from_tables(tables))
	}

	/// Read-only access to the loaded tables.
	pub fn tables(&self) -> &Tables {
		&self.tables
	}

	/// Returns the registered tags, in configuration order.
	pub fn tags(&self) -> Vec<String> {
		self.tables.tags().map(str::to_owned).collect()
	}

	/// Returns a view that generates names for `tag` only.
	pub fn tag(&self, tag: &str) -> ScopedView<'_> {
		ScopedView::new(self, tag)
	}

	/// Generates a town name for `tag`.
	pub fn town_for(&self, tag: &str) -> String {
		self.with_rng(|rng| {
			let Some(tables) = self.resolve(rng, tag) else {
				return String::new();
			};
			let TownTable { prefix, middle, suffix } = &tables.towns;

			let prefix = choose_one(rng, prefix);
			let middle = choose_one(rng, middle);
			let suffix = choose_one(rng, suffix);
			compose_town(&prefix, &middle, &suffix)
		})
	}

	/// Generates a river name and descriptor for `tag`.
	pub fn river_for(&self, tag: &str) -> RiverName {
		self.with_rng(|rng| {
			let Some(tables) = self.resolve(rng, tag) else {
				return RiverName::default();
			};
			let RiverTable { kind, prefix, suffix } = &tables.rivers;

			let mut name = choose_one(rng, prefix);
			name.push_str(&choose_one(rng, suffix));
			RiverName { name, kind: choose_one(rng, kind) }
		})
	}

	/// Chooses a place name for `tag`.
	pub fn place_for(&self, tag: &str) -> String {
		self.with_rng(|rng| {
			let Some(tables) = self.resolve(rng, tag) else {
				return String::new();
			};
			let PlaceList { names } = &tables.places;
			choose_one(rng, names)
		})
	}

	/// Generates a male character name for `tag`.
	pub fn male_for(&self, tag: &str) -> CharacterName {
		self.character_for(tag, Gender::Male)
	}

	/// Generates a female character name for `tag`.
	pub fn female_for(&self, tag: &str) -> CharacterName {
		self.character_for(tag, Gender::Female)
	}

	/// Generates a character name for `tag`.
	///
	/// The surname is always drawn first. The neutral override is then
	/// checked before the gender hint: with a draw above `NEUTRAL_THRESHOLD`
	/// the first name comes from the neutral list, whatever `gender` says.
	pub fn character_for(&self, tag: &str, gender: Gender) -> CharacterName {
		self.with_rng(|rng| {
			let Some(tables) = self.resolve(rng, tag) else {
				return CharacterName::default();
			};
			let NameTable { male, female, neutral, surname } = &tables.names;

			let surname = choose_one(rng, surname);
			let first_names = if is_neutral_override(neutral_draw(rng)) {
				neutral
			} else {
				match gender {
					Gender::Male => male,
					Gender::Female => female,
				}
			};

			CharacterName { name: choose_one(rng, first_names), surname }
		})
	}

	/// Runs `f` with exclusive access to the random source.
	///
	/// A poisoned lock is recovered: the generator state stays valid even if
	/// another caller panicked mid-draw.
	fn with_rng<R>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> R) -> R {
		let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
		f(&mut rng)
	}

	/// Finds the tables of `tag`, falling back to a random registered tag.
	///
	/// Returns `None` only when the registry is empty.
	fn resolve<'a>(&'a self, rng: &mut ChaCha8Rng, tag: &str) -> Option<&'a TagTables> {
		if let Some(tables) = self.tables.get(tag) {
			return Some(tables);
		}

		if self.tables.is_empty() {
			warn!("no tag registered, returning an empty name");
			return None;
		}

		let (fallback, tables) = self.tables.get_index(rng.random_range(0..self.tables.len()))?;
		debug!("tag '{tag}' not registered, falling back to '{fallback}'");
		Some(tables)
	}
}

impl NameChooser for Engine {
	fn town(&self) -> String {
		self.town_for("")
	}

	fn male(&self) -> CharacterName {
		self.male_for("")
	}

	fn female(&self) -> CharacterName {
		self.female_for("")
	}

	fn place(&self) -> String {
		self.place_for("")
	}

	fn river(&self) -> RiverName {
		self.river_for("")
	}
}

/// Reads and decodes the JSON resource at `path`.
fn read<P, T>(provider: &P, path: &str) -> Result<T, TableError>
where
	P: Provider + ?Sized,
	T: DeserializeOwned,
{
	let bytes = provider.fetch(path)?;
	Ok(serde_json::from_slice(&bytes)?)
}

/// Loads the four tables of one tag, stopping at the first failure.
fn load_tag<P: Provider + ?Sized>(provider: &P, tag: &str, sources: &TagSources) -> Result<TagTables, LoadError> {
	let table_error = move |kind: TableKind| {
		move |source: TableError| LoadError::Table { tag: tag.to_owned(), kind, source }
	};

	Ok(TagTables {
		names: read(provider, &sources.name).map_err(table_error(TableKind::Name))?,
		towns: read(provider, &sources.town).map_err(table_error(TableKind::Town))?,
		rivers: read(provider, &sources.river).map_err(table_error(TableKind::River))?,
		places: read(provider, &sources.place).map_err(table_error(TableKind::Place))?,
	})
}

/// Loads every configured tag on scoped threads.
///
/// - Splits the tags into chunks (based on CPU cores).
/// - Each thread loads its chunk in order and stops at its first failure.
/// - Chunks are joined in order, so the first error returned is the one of
///   the first failing tag in configuration order.
fn load_all<P: Provider + ?Sized>(provider: &P, config: &TagConfig) -> Result<Tables, LoadError> {
	let entries: Vec<(&String, &TagSources)> = config.iter().collect();
	let chunk_size = entries.len().div_ceil(num_cpus::get()).max(1);

	let chunks: Vec<Result<Vec<(String, TagTables)>, LoadError>> = thread::scope(|scope| {
		let handles: Vec<_> = entries
			.chunks(chunk_size)
			.map(|chunk| {
				let handle = scope.spawn(move || {
					chunk
						.iter()
						.map(|(tag, sources)| load_tag(provider, tag, sources).map(|tables| ((*tag).clone(), tables)))
						.collect::<Result<Vec<_>, _>>()
				});
				(chunk[0].0, handle)
			})
			.collect();

		handles
			.into_iter()
			.map(|(first_tag, handle)| {
				handle
					.join()
					.unwrap_or_else(|_| Err(LoadError::LoaderPanicked { tag: first_tag.clone() }))
			})
			.collect()
	});

	let mut tables = Tables::new();
	for chunk in chunks {
		for (tag, tag_tables) in chunk? {
			tables.insert(tag, tag_tables);
		}
	}
	Ok(tables)
}

/// Seed derived from the current time.
fn time_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.ok()
		.and_then(|elapsed| u64::try_from(elapsed.as_nanos()).ok())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use rstest::rstest;

	use super::*;
	use crate::error::FetchError;
	use crate::provider::MemoryProvider;

	fn strings(values: &[&str]) -> Vec<String> {
		values.iter().map(|v| (*v).to_owned()).collect()
	}

	fn tag_tables(places: &[&str]) -> TagTables {
		TagTables {
			names: NameTable {
				male: strings(&["Bram", "Osric"]),
				female: strings(&["Edith", "Maud"]),
				neutral: strings(&["Wren", "Rowan"]),
				surname: strings(&["Marsh", "Weaver"]),
			},
			towns: TownTable {
				prefix: strings(&["Ash", "Oak"]),
				middle: strings(&["en", "ley"]),
				suffix: strings(&["ford", "ton"]),
			},
			rivers: RiverTable {
				kind: strings(&["brook", "creek"]),
				prefix: strings(&["Dun", "Lea"]),
				suffix: strings(&["well", "mere"]),
			},
			places: PlaceList { names: strings(places) },
		}
	}

	fn two_tag_tables() -> Tables {
		[
			("elf".to_owned(), tag_tables(&["Silver Glade", "Moon Hollow"])),
			("human".to_owned(), tag_tables(&["Old Mill", "Stone Bridge"])),
		]
		.into_iter()
		.collect()
	}

	/// Provider with a complete `elf` tag and a `human` tag whose tables
	/// can be individually left out or corrupted.
	fn provider_with(human_river: Option<&str>) -> MemoryProvider {
		let mut provider = MemoryProvider::new();
		provider
			.insert(
				CONFIG_PATH,
				r#"{
					"elf": {"name": "/elf/name.json", "town": "/elf/town.json", "river": "/elf/river.json", "place": "/elf/place.json"},
					"human": {"name": "/human/name.json", "town": "/human/town.json", "river": "/human/river.json", "place": "/human/place.json"}
				}"#,
			)
			.insert("/elf/name.json", r#"{"male":["Aelar"],"female":["Lia"],"neutral":["Rael"],"surname":["Liadon"]}"#)
			.insert("/elf/town.json", r#"{"prefix":["Ael"],"middle":["en"],"suffix":["dor"]}"#)
			.insert("/elf/river.json", r#"{"type":["rill"],"prefix":["Nim"],"suffix":["rien"]}"#)
			.insert("/elf/place.json", r#"{"name":["The Silver Glade"]}"#)
			.insert("/human/name.json", r#"{"male":["Bram"],"female":["Edith"],"neutral":["Wren"],"surname":["Marsh"]}"#)
			.insert("/human/town.json", r#"{"prefix":["Oak"],"middle":["Oak"],"suffix":["ville"]}"#)
			.insert("/human/place.json", r#"{"name":["The Old Mill"]}"#);
		if let Some(river) = human_river {
			provider.insert("/human/river.json", river);
		}
		provider
	}

	#[test]
	fn build_registers_tags_in_configuration_order() {
		let engine = Engine::build(&provider_with(Some(r#"{"type":["beck"],"prefix":["Ash"],"suffix":["well"]}"#))).unwrap();

		assert_eq!(engine.tags(), vec!["elf", "human"]);
		assert_eq!(engine.tables().get("elf").unwrap().places.names, vec!["The Silver Glade"]);
	}

	#[test]
	fn missing_configuration_fails() {
		let err = Engine::build(&MemoryProvider::new()).unwrap_err();
		assert!(matches!(
			err,
			LoadError::Config { ref path, source: TableError::Fetch(FetchError::NotFound { .. }) } if path == CONFIG_PATH
		));
	}

	#[test]
	fn missing_table_names_tag_and_kind() {
		let err = Engine::build(&provider_with(None)).unwrap_err();
		assert!(matches!(
			err,
			LoadError::Table { ref tag, kind: TableKind::River, source: TableError::Fetch(_) } if tag == "human"
		));
	}

	#[test]
	fn malformed_table_is_a_decode_error() {
		let err = Engine::build(&provider_with(Some("{\"type\": [1, 2]}"))).unwrap_err();
		assert!(matches!(
			err,
			LoadError::Table { ref tag, kind: TableKind::River, source: TableError::Decode(_) } if tag == "human"
		));
	}

	#[test]
	fn first_failing_tag_is_reported() {
		let mut provider = MemoryProvider::new();
		provider.insert(
			CONFIG_PATH,
			r#"{
				"first": {"name": "/none", "town": "/none", "river": "/none", "place": "/none"},
				"second": {"name": "/none", "town": "/none", "river": "/none", "place": "/none"}
			}"#,
		);

		let err = Engine::build(&provider).unwrap_err();
		assert!(matches!(err, LoadError::Table { ref tag, kind: TableKind::Name, .. } if tag == "first"));
	}

	#[test]
	fn single_entry_tables_are_deterministic() {
		let engine = Engine::build(&provider_with(Some(r#"{"type":["beck"],"prefix":["Ash"],"suffix":["well"]}"#))).unwrap();
		let human = engine.tag("human");

		for _ in 0..100 {
			assert_eq!(human.town(), "Oakville");
			assert_eq!(human.place(), "The Old Mill");
			assert_eq!(human.river(), RiverName { name: "Ashwell".to_owned(), kind: "beck".to_owned() });

			let male = human.male();
			assert_eq!(male.surname, "Marsh");
			assert!(male.name == "Bram" || male.name == "Wren");
		}
	}

	#[test]
	fn empty_registry_returns_empty_names() {
		let mut provider = MemoryProvider::new();
		provider.insert(CONFIG_PATH, "{}");
		let engine = Engine::build(&provider).unwrap();

		assert!(engine.tags().is_empty());
		assert_eq!(engine.town(), "");
		assert_eq!(engine.place(), "");
		assert_eq!(engine.male(), CharacterName::default());
		assert_eq!(engine.female(), CharacterName::default());
		assert_eq!(engine.river(), RiverName::default());
		assert_eq!(engine.tag("elf").town(), "");
	}

	#[rstest]
	#[case::empty("")]
	#[case::unknown("fantasy-dwarf01")]
	fn unknown_tag_falls_back_to_a_registered_tag(#[case] tag: &str) {
		let engine = Engine::from_tables(two_tag_tables()).with_seed(11);
		let elf: HashSet<&str> = ["Silver Glade", "Moon Hollow"].into();
		let human: HashSet<&str> = ["Old Mill", "Stone Bridge"].into();

		let (mut saw_elf, mut saw_human) = (false, false);
		for _ in 0..200 {
			let place = engine.place_for(tag);
			saw_elf |= elf.contains(place.as_str());
			saw_human |= human.contains(place.as_str());
			assert!(elf.contains(place.as_str()) || human.contains(place.as_str()));
		}
		assert!(saw_elf && saw_human);
	}

	#[test]
	fn scoped_view_matches_tag_qualified_calls() {
		let direct = Engine::from_tables(two_tag_tables()).with_seed(5);
		let scoped_engine = Engine::from_tables(two_tag_tables()).with_seed(5);
		let scoped = scoped_engine.tag("human");
		assert_eq!(scoped.tag(), "human");

		for _ in 0..50 {
			assert_eq!(scoped.town(), direct.town_for("human"));
			assert_eq!(scoped.male(), direct.male_for("human"));
			assert_eq!(scoped.female(), direct.female_for("human"));
			assert_eq!(scoped.place(), direct.place_for("human"));
			assert_eq!(scoped.river(), direct.river_for("human"));
		}
	}

	#[test]
	fn reseeding_replays_the_same_names() {
		let engine = Engine::from_tables(two_tag_tables()).with_seed(99);
		let first: Vec<String> = (0..20).map(|_| engine.town()).collect();

		engine.reseed(99);
		let second: Vec<String> = (0..20).map(|_| engine.town()).collect();
		assert_eq!(first, second);
	}

	#[test]
	fn neutral_override_ignores_gender_hint() {
		let engine = Engine::from_tables(two_tag_tables()).with_seed(21);
		let neutral: HashSet<&str> = ["Wren", "Rowan"].into();
		let male: HashSet<&str> = ["Bram", "Osric"].into();

		let names: Vec<String> = (0..2_000).map(|_| engine.male_for("elf").name).collect();
		let neutral_count = names.iter().filter(|n| neutral.contains(n.as_str())).count();

		assert!(names.iter().all(|n| neutral.contains(n.as_str()) || male.contains(n.as_str())));
		// 4% expected: 80 out of 2000
		assert!(neutral_count > 20, "neutral override too rare: {neutral_count}");
		assert!(neutral_count < 200, "neutral override too frequent: {neutral_count}");
	}

	#[test]
	fn town_output_follows_collision_rule() {
		let fragments = strings(&["A", "B", "x"]);
		let mut tables = Tables::new();
		tables.insert(
			"t",
			TagTables {
				towns: TownTable { prefix: fragments.clone(), middle: fragments.clone(), suffix: fragments.clone() },
				..TagTables::default()
			},
		);
		let engine = Engine::from_tables(tables).with_seed(3);

		let mut allowed = HashSet::new();
		for p in &fragments {
			for m in &fragments {
				for s in &fragments {
					allowed.insert(compose_town(p, m, s));
				}
			}
		}

		for _ in 0..500 {
			let town = engine.town_for("t");
			assert!(allowed.contains(&town), "unexpected town {town}");
			assert_ne!(town, "AAA");
			assert!(!town.starts_with("AA"));
		}
	}

	#[test]
	fn engine_is_shared_across_threads() {
		let engine = Engine::from_tables(two_tag_tables());

		thread::scope(|scope| {
			for tag in ["elf", "human", "", "unknown"] {
				let engine = &engine;
				scope.spawn(move || {
					for _ in 0..100 {
						assert!(!engine.town_for(tag).is_empty());
						assert!(!engine.female_for(tag).surname.is_empty());
					}
				});
			}
		});
	}

	#[test]
	fn snapshot_restores_the_same_tables() {
		let engine = Engine::from_tables(two_tag_tables());
		let restored = Engine::from_snapshot(&engine.snapshot().unwrap()).unwrap();

		assert_eq!(restored.tables(), engine.tables());
	}

	#[test]
	fn garbage_snapshot_is_rejected() {
		let err = Engine::from_snapshot(&[0xff, 0xff, 0xff]).unwrap_err();
		assert!(matches!(err, SnapshotError::Decode(_)));
	}

	#[test]
	fn load_cached_writes_then_reuses_snapshot() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("elf")).unwrap();
		fs::write(
			dir.path().join(CONFIG_PATH),
			r#"{"elf": {"name": "/elf/name.json", "town": "/elf/town.json", "river": "/elf/river.json", "place": "/elf/place.json"}}"#,
		)
		.unwrap();
		fs::write(dir.path().join("elf/name.json"), r#"{"male":["Aelar"],"surname":["Liadon"]}"#).unwrap();
		fs::write(dir.path().join("elf/town.json"), r#"{"prefix":["Ael"]}"#).unwrap();
		fs::write(dir.path().join("elf/river.json"), r#"{"type":["rill"]}"#).unwrap();
		fs::write(dir.path().join("elf/place.json"), r#"{"name":["Glade"]}"#).unwrap();

		let built = Engine::load_cached(dir.path()).unwrap();
		assert!(dir.path().join("config.bin").exists());

		// The snapshot alone is enough from now on.
		fs::remove_dir_all(dir.path().join("elf")).unwrap();
		let cached = Engine::load_cached(dir.path()).unwrap();

		assert_eq!(cached.tables(), built.tables());
		assert_eq!(cached.tag("elf").place(), "Glade");
	}

	#[test]
	fn load_cached_rebuilds_from_truncated_snapshot() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("elf")).unwrap();
		fs::write(
			dir.path().join(CONFIG_PATH),
			r#"{"elf": {"name": "/elf/name.json", "town": "/elf/town.json", "river": "/elf/river.json", "place": "/elf/place.json"}}"#,
		)
		.unwrap();
		fs::write(dir.path().join("elf/name.json"), r#"{"male":["Aelar"],"surname":["Liadon"]}"#).unwrap();
		fs::write(dir.path().join("elf/town.json"), r#"{"prefix":["Ael"]}"#).unwrap();
		fs::write(dir.path().join("elf/river.json"), r#"{"type":["rill"]}"#).unwrap();
		fs::write(dir.path().join("elf/place.json"), r#"{"name":["Glade"]}"#).unwrap();

		let built = Engine::load_cached(dir.path()).unwrap();
		let snapshot_path = dir.path().join("config.bin");
		let bytes = fs::read(&snapshot_path).unwrap();
		fs::write(&snapshot_path, &bytes[..bytes.len() / 2]).unwrap();
		assert!(Engine::from_snapshot(&fs::read(&snapshot_path).unwrap()).is_err());

		let reloaded = Engine::load_cached(dir.path()).unwrap();
		assert_eq!(reloaded.tables(), built.tables());
		assert_eq!(reloaded.tag("elf").place(), "Glade");

		// The rebuilt snapshot is complete again.
		let restored = Engine::from_snapshot(&fs::read(&snapshot_path).unwrap()).unwrap();
		assert_eq!(restored.tables(), built.tables());
	}
}
