//! Prefix and base-IRI resolution state.

use std::collections::HashMap;

use iref::Iri;

/// Key under which the base IRI is stored in the prefix table.
const BASE: &str = "";

/// Returns `true` if `value` starts with an absolute URI scheme,
/// `scheme := ALPHA *(ALPHA | DIGIT | "+" | "-" | ".") ":"`.
pub fn starts_with_scheme(value: &str) -> bool {
	let mut chars = value.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() => (),
		_ => return false,
	}

	for c in chars {
		match c {
			':' => return true,
			c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => (),
			_ => return false,
		}
	}

	false
}

/// Returns `true` if a directive value is kept as-is: either it carries a
/// scheme or it is protocol-relative.
fn is_absolute(value: &str) -> bool { value.starts_with("//") || starts_with_scheme(value) }

/// Prefix table and base path of a document.
///
/// The base IRI is a regular entry stored under the empty prefix label, so
/// `@base` and an empty `@prefix :` share a slot. Directives mutate the
/// table eagerly while parsing; the evaluator only reads it.
#[derive(Debug, Clone, Default)]
pub struct Scope {
	entries: HashMap<String, String>,
}

impl Scope {
	pub fn new(base: Option<Iri>) -> Self {
		let mut entries = HashMap::new();
		if let Some(base) = base {
			entries.insert(BASE.to_owned(), base.to_string());
		}

		Self { entries }
	}

	/// Applies a `@prefix`/`PREFIX` directive (or `@base`/`BASE` with the
	/// empty label).
	///
	/// An absolute value replaces the binding. A relative value ending in
	/// `/` concatenates onto the existing binding when one exists; this
	/// also extends the base, a quirk kept on purpose. Any other value is
	/// stored verbatim.
	pub fn define(&mut self, prefix: &str, value: &str) {
		if !is_absolute(value) && value.ends_with('/') {
			if let Some(existing) = self.entries.get_mut(prefix) {
				existing.push_str(value);
				return;
			}
		}

		self.entries.insert(prefix.to_owned(), value.to_owned());
	}

	/// Looks up a prefix binding. The base is `prefix("")`.
	pub fn prefix(&self, prefix: &str) -> Option<&str> {
		self.entries.get(prefix).map(String::as_str)
	}

	pub fn base(&self) -> Option<&str> { self.prefix(BASE) }

	/// Expands an IRI reference against the current base.
	pub fn expand_iri_ref(&self, value: &str) -> String {
		if is_absolute(value) {
			return value.to_owned();
		}

		let mut iri = self.base().unwrap_or_default().to_owned();
		iri.push_str(value);
		iri
	}

	/// Expands a prefixed name. An undefined prefix expands with the
	/// empty IRI; the parser has already warned about it.
	pub fn expand_prefixed(&self, prefix: &str, local: &str) -> String {
		let mut iri = self.prefix(prefix).unwrap_or_default().to_owned();
		iri.push_str(local);
		iri
	}
}
