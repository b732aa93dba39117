//! Heading anchors for in-document links.
//!
//! Anchors are assigned in one pass over the outline, in exactly the order the writer
//! later emits headings, so that each anchor matches the slug a Markdown renderer
//! derives from the heading text.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::entity::Entity;
use super::names::{signature_key, title, xml_key};
use super::outline::Outline;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Turn a heading into its slug: lowercase, whitespace runs become one hyphen, and
/// everything outside `[a-z0-9.-]` is dropped.
pub fn slugify(title: &str) -> String {
	let lowered = title.to_lowercase();
	let hyphenated = WHITESPACE.replace_all(lowered.trim(), "-");
	hyphenated
		.chars()
		.filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-')
		.collect()
}

/// Hands out unique slugs in first-seen order.
#[derive(Debug, Default)]
pub struct Slugger {
	occurrences: HashMap<String, usize>,
	taken: HashSet<String>,
}

impl Slugger {
	/// Create an empty slugger.
	pub fn new() -> Self {
		Self::default()
	}

	/// Slug for the next heading with this title; repeats get `-1`, `-2`, ...
	pub fn slug(&mut self, title: &str) -> String {
		let base = slugify(title);
		let mut slug = base.clone();
		let count = self.occurrences.entry(base.clone()).or_insert(0);
		while self.taken.contains(&slug) {
			*count += 1;
			slug = format!("{base}-{count}");
		}
		self.taken.insert(slug.clone());
		slug
	}
}

/// Lookup key → anchor. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
	anchors: HashMap<String, String>,
}

impl AnchorMap {
	/// Anchor registered for a signature key or documentation ID.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.anchors.get(key).map(String::as_str)
	}

	/// Anchor of an entity, by its signature key.
	pub fn anchor_of(&self, entity: Entity<'_>) -> Option<&str> {
		self.get(&signature_key(entity))
	}

	/// Number of registered keys.
	pub fn len(&self) -> usize {
		self.anchors.len()
	}

	/// Whether no key is registered.
	pub fn is_empty(&self) -> bool {
		self.anchors.is_empty()
	}
}

/// Builds an [`AnchorMap`] while walking entities in heading order.
#[derive(Debug, Default)]
pub struct IdentityAssigner {
	slugger: Slugger,
	map: AnchorMap,
}

impl IdentityAssigner {
	/// Create an empty assigner.
	pub fn new() -> Self {
		Self::default()
	}

	/// Claim a slug for a heading that has no entity behind it, such as the assembly title.
	pub fn reserve(&mut self, title: &str) -> String {
		self.slugger.slug(title)
	}

	/// Assign the next anchor to an entity and register both of its keys.
	pub fn assign(&mut self, entity: Entity<'_>) -> String {
		let anchor = self.slugger.slug(&title(entity));
		self.map.anchors.insert(signature_key(entity), anchor.clone());
		self.map
			.anchors
			.entry(xml_key(entity))
			.or_insert_with(|| anchor.clone());
		anchor
	}

	/// Finish and hand out the immutable map.
	pub fn finish(self) -> AnchorMap {
		self.map
	}
}

/// Assign anchors to every entity of an outline, after reserving `reserved` headings.
pub fn assign(outline: &Outline<'_>, reserved: &[&str]) -> AnchorMap {
	let mut assigner = IdentityAssigner::new();
	for heading in reserved {
		assigner.reserve(heading);
	}
	for entity in outline.entities() {
		assigner.assign(entity);
	}
	assigner.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn anchor_charset_ok(anchor: &str) -> bool {
		!anchor.is_empty()
			&& anchor
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
	}

	#[test]
	fn slugify_basics() {
		assert_eq!(slugify("Foo property"), "foo-property");
		assert_eq!(slugify("Run(int, string) method"), "runint-string-method");
		assert_eq!(slugify("Box<T> class"), "boxt-class");
		assert_eq!(slugify("Demo.Core   namespace"), "demo.core-namespace");
		assert_eq!(slugify("operator ==(Demo.Money, Demo.Money) method"), "operator-demo.money-demo.money-method");
	}

	#[test]
	fn duplicates_get_running_suffixes() {
		let mut slugger = Slugger::new();
		let anchors: Vec<String> = ["Foo property", "Foo property", "Bar method", "Foo property"]
			.iter()
			.map(|title| slugger.slug(title))
			.collect();
		assert_eq!(anchors, ["foo-property", "foo-property-1", "bar-method", "foo-property-2"]);
	}

	#[test]
	fn suffixes_never_collide_with_literal_titles() {
		let mut slugger = Slugger::new();
		let first = slugger.slug("a-1");
		let second = slugger.slug("a");
		let third = slugger.slug("a");
		assert_eq!([first.as_str(), second.as_str(), third.as_str()], ["a-1", "a", "a-2"]);
	}

	#[test]
	fn colliding_titles_stay_unique_and_deterministic() {
		let titles: Vec<String> = (0..50)
			.map(|i| match i % 4 {
				0 => "Value property".to_string(),
				1 => "Value  Property".to_string(),
				2 => format!("value-property-{}", i % 3),
				_ => "Value!property".to_string(),
			})
			.collect();

		let run = || {
			let mut slugger = Slugger::new();
			titles.iter().map(|title| slugger.slug(title)).collect::<Vec<_>>()
		};
		let first = run();
		assert_eq!(first, run());

		let unique: HashSet<&String> = first.iter().collect();
		assert_eq!(unique.len(), titles.len());
		assert!(first.iter().all(|anchor| anchor_charset_ok(anchor)));
	}
}
