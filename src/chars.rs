//! Character classes of the Turtle grammar.

/// `PN_CHARS_BASE` (shared with SPARQL).
pub fn is_pn_chars_base(c: char) -> bool {
	matches!(c, 'A'..='Z' | 'a'..='z' | '\u{00c0}'..='\u{00d6}' | '\u{00d8}'..='\u{00f6}' | '\u{00f8}'..='\u{02ff}' | '\u{0370}'..='\u{037d}' | '\u{037f}'..='\u{1fff}' | '\u{200c}'..='\u{200d}' | '\u{2070}'..='\u{218f}' | '\u{2c00}'..='\u{2fef}' | '\u{3001}'..='\u{d7ff}' | '\u{f900}'..='\u{fdcf}' | '\u{fdf0}'..='\u{fffd}' | '\u{10000}'..='\u{effff}')
}

/// `PN_CHARS_U`.
pub fn is_pn_chars_u(c: char) -> bool { is_pn_chars_base(c) || c == '_' }

/// `PN_CHARS`.
pub fn is_pn_chars(c: char) -> bool {
	is_pn_chars_u(c)
		|| matches!(c, '-' | '0'..='9' | '\u{00b7}' | '\u{0300}'..='\u{036f}' | '\u{203f}'..='\u{2040}')
}

/// Characters allowed unescaped between `<` and `>` in an IRIREF.
///
/// The excluded set also decides which code points must be masked as
/// `\uXXXX` when an IRI is re-emitted.
pub fn is_iri_char(c: char) -> bool {
	!matches!(c, '\u{00}'..='\u{20}' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

/// Characters reachable through a `PN_LOCAL_ESC` backslash escape.
pub fn is_local_escape(c: char) -> bool {
	matches!(
		c,
		'_' | '~' | '.' | '-' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
			| '/' | '?' | '#' | '@' | '%'
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pn_chars_base_ranges() {
		assert!(is_pn_chars_base('a'));
		assert!(is_pn_chars_base('Z'));
		assert!(is_pn_chars_base('é'));
		assert!(is_pn_chars_base('\u{10000}'));
		assert!(!is_pn_chars_base('0'));
		assert!(!is_pn_chars_base('_'));
		assert!(!is_pn_chars_base('-'));
	}

	#[test]
	fn pn_chars_continuation() {
		assert!(is_pn_chars('-'));
		assert!(is_pn_chars('7'));
		assert!(is_pn_chars('\u{00b7}'));
		assert!(!is_pn_chars('.'));
		assert!(!is_pn_chars(':'));
	}

	#[test]
	fn iri_char_exclusions() {
		assert!(is_iri_char('h'));
		assert!(is_iri_char('/'));
		assert!(!is_iri_char(' '));
		assert!(!is_iri_char('"'));
		assert!(!is_iri_char('\\'));
		assert!(!is_iri_char('\u{0}'));
	}
}
