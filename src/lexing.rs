//! Lexical layer shared by the four dialect parsers.
//!
//! Each recogniser consumes characters from the current cursor and yields a
//! token with its byte span, or an error at the offending position. Tokens
//! carry the unescaped payloads; re-escaping happens at emission time.

use std::collections::VecDeque;
use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use iref::IriRefBuf;
use langtag::LanguageTagBuf;
use locspan::{Meta, Span};

use crate::chars::{is_iri_char, is_local_escape, is_pn_chars, is_pn_chars_base, is_pn_chars_u};

/// Lexing error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid language tag")]
	InvalidLangTag,

	#[error("invalid character code point {0:#x}")]
	InvalidCodepoint(u32),

	#[error("character code point {0:#x} is not allowed in an IRI reference")]
	ForbiddenIriCodepoint(u32),

	#[error("invalid IRI reference <{1}>: {0}")]
	InvalidIriRef(iref::Error, String),

	#[error("invalid numeric literal `{0}`")]
	InvalidNumeric(String),

	#[error("`{0}` is not a keyword")]
	UnknownKeyword(String),

	#[error("unexpected character `{0}`")]
	Unexpected(char),

	#[error("unexpected end of file")]
	UnexpectedEof,
}

/// Token.
#[derive(Debug)]
pub enum Token {
	Keyword(Keyword),
	Begin(Delimiter),
	End(Delimiter),
	LangTag(LanguageTagBuf),
	IriRef(IriRefBuf),
	String(StringLiteral),
	BlankNodeLabel(String),
	PrefixedName(PrefixedName),
	Numeric(Numeric),
	Punct(Punct),
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Keyword(kw) => write!(f, "keyword `{}`", kw),
			Self::Begin(d) => write!(f, "opening `{}`", d.begin()),
			Self::End(d) => write!(f, "closing `{}`", d.end()),
			Self::LangTag(tag) => write!(f, "language tag `@{}`", tag),
			Self::IriRef(iri_ref) => write!(f, "IRI reference <{}>", iri_ref),
			Self::String(_) => write!(f, "string literal"),
			Self::BlankNodeLabel(label) => write!(f, "blank node label `_:{}`", label),
			Self::PrefixedName(name) => write!(f, "prefixed name `{}:{}`", name.prefix, name.local),
			Self::Numeric(n) => write!(f, "numeric literal `{}`", n),
			Self::Punct(p) => p.fmt(f),
		}
	}
}

/// A `PNAME_NS` (empty local part) or `PNAME_LN` token.
#[derive(Debug)]
pub struct PrefixedName {
	pub prefix: String,
	pub local: String,
}

/// Quote style of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
	Double,
	Single,
	LongDouble,
	LongSingle,
}

impl Quote {
	fn short(delimiter: char) -> Self {
		if delimiter == '"' {
			Self::Double
		} else {
			Self::Single
		}
	}

	fn long(delimiter: char) -> Self {
		if delimiter == '"' {
			Self::LongDouble
		} else {
			Self::LongSingle
		}
	}
}

/// String literal body together with its lexical quote style.
#[derive(Debug)]
pub struct StringLiteral {
	pub text: String,
	pub quote: Quote,
}

/// Numeric literal, keeping the lexical form verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Numeric {
	Integer(String),
	Decimal(String),
	Double(String),
}

impl Numeric {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Integer(s) | Self::Decimal(s) | Self::Double(s) => s,
		}
	}
}

impl fmt::Display for Numeric {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { self.as_str().fmt(f) }
}

#[derive(Debug, Clone, Copy)]
pub enum Keyword {
	A,
	Prefix,
	Base,
	SparqlBase,
	SparqlPrefix,
	Graph,
	True,
	False,
}

pub struct NotAKeyword;

impl FromStr for Keyword {
	type Err = NotAKeyword;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "a" {
			Ok(Self::A)
		} else if s == "true" {
			Ok(Self::True)
		} else if s == "false" {
			Ok(Self::False)
		} else if s == unicase::Ascii::new("BASE") {
			Ok(Self::SparqlBase)
		} else if s == unicase::Ascii::new("PREFIX") {
			Ok(Self::SparqlPrefix)
		} else if s == unicase::Ascii::new("GRAPH") {
			Ok(Self::Graph)
		} else {
			Err(NotAKeyword)
		}
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::A => write!(f, "a"),
			Self::Prefix => write!(f, "@prefix"),
			Self::Base => write!(f, "@base"),
			Self::SparqlBase => write!(f, "BASE"),
			Self::SparqlPrefix => write!(f, "PREFIX"),
			Self::Graph => write!(f, "GRAPH"),
			Self::True => write!(f, "true"),
			Self::False => write!(f, "false"),
		}
	}
}

#[derive(Debug, Clone, Copy)]
pub enum Delimiter {
	Parenthesis,
	Bracket,
	Brace,
}

impl Delimiter {
	pub fn begin(&self) -> char {
		match self {
			Self::Parenthesis => '(',
			Self::Bracket => '[',
			Self::Brace => '{',
		}
	}

	pub fn end(&self) -> char {
		match self {
			Self::Parenthesis => ')',
			Self::Bracket => ']',
			Self::Brace => '}',
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
	Dot,
	Semicolon,
	Comma,
	Carets,
}

impl fmt::Display for Punct {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Dot => write!(f, "dot `.`"),
			Self::Semicolon => write!(f, "semicolon `;`"),
			Self::Comma => write!(f, "comma `,`"),
			Self::Carets => write!(f, "carets `^^`"),
		}
	}
}

/// Comment or blank line captured between tokens.
///
/// Trivia is not whitespace at the statement level: the parser turns
/// pending trivia into standalone statement nodes before each statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trivia {
	Comment(String),
	BlankLine,
}

enum LanguageTagOrKeyword {
	Keyword(Keyword),
	LanguageTag(LanguageTagBuf),
}

/// Lexer.
///
/// Changes the input characters into a `Token` stream with one token of
/// lookahead.
pub struct Lexer<'a> {
	chars: Peekable<Chars<'a>>,
	span: Span,
	last: Span,
	lookahead: Option<Meta<Token, Span>>,
	trivia: VecDeque<Meta<Trivia, Span>>,
	line_is_blank: bool,
}

impl<'a> Lexer<'a> {
	pub fn new(input: &'a str) -> Self {
		Self {
			chars: input.chars().peekable(),
			span: Span::default(),
			last: Span::default(),
			lookahead: None,
			trivia: VecDeque::new(),
			line_is_blank: true,
		}
	}

	/// Takes the oldest pending comment or blank line, if any.
	pub fn take_trivia(&mut self) -> Option<Meta<Trivia, Span>> { self.trivia.pop_front() }

	pub fn has_trivia(&self) -> bool { !self.trivia.is_empty() }

	fn peek_char(&mut self) -> Option<char> { self.chars.peek().copied() }

	/// Peeks the character after the next one.
	fn peek_char2(&self) -> Option<char> {
		let mut chars = self.chars.clone();
		chars.next();
		chars.next()
	}

	/// Looks past a run of `.` characters; returns the run length and the
	/// first character after it.
	fn peek_past_dots(&self) -> (usize, Option<char>) {
		let mut chars = self.chars.clone();
		let mut count = 0;

		loop {
			match chars.next() {
				Some('.') => count += 1,
				c => break (count, c),
			}
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let c = self.chars.next()?;
		self.span.push(c.len_utf8());
		self.last.clear();
		self.last.push(c.len_utf8());
		Some(c)
	}

	fn expect_char(&mut self) -> Result<char, Meta<Error, Span>> {
		self.next_char().ok_or(Meta(Error::UnexpectedEof, self.end()))
	}

	fn end(&self) -> Span { self.span.end().into() }

	fn error<T>(&self, e: Error) -> Result<T, Meta<Error, Span>> { Err(Meta(e, self.last)) }

	/// Absorbs whitespace and trivia. The first newline after content only
	/// ends the line; every further newline before the next token is a
	/// blank line.
	fn skip_whitespace(&mut self) {
		while let Some(c) = self.peek_char() {
			match c {
				'\n' => {
					self.next_char();
					if self.line_is_blank {
						self.trivia.push_back(Meta(Trivia::BlankLine, self.last));
					}
					self.line_is_blank = true;
				}
				'#' => {
					self.span.clear();
					self.next_char();
					self.next_comment();
				}
				c if c.is_whitespace() => {
					self.next_char();
				}
				_ => break,
			}
		}

		self.span.clear();
	}

	/// Captures the rest of a comment, after the `#` marker, up to the end
	/// of line or end of file.
	fn next_comment(&mut self) {
		let mut text = String::new();

		while let Some(c) = self.peek_char() {
			if c == '\n' {
				break;
			}

			text.push(c);
			self.next_char();
		}

		self.trivia.push_back(Meta(Trivia::Comment(text), self.span));
		self.line_is_blank = false;
	}

	/// Parses the rest of a language tag or an `@`-keyword, after the
	/// first `@` character.
	fn next_langtag_or_keyword(&mut self) -> Result<LanguageTagOrKeyword, Meta<Error, Span>> {
		let mut tag = String::new();

		while let Some(c) = self.peek_char() {
			if c.is_ascii_alphabetic() {
				tag.push(self.expect_char()?);
			} else {
				break;
			}
		}

		if tag.is_empty() {
			return Err(Meta(Error::InvalidLangTag, self.span));
		}

		match tag.as_str() {
			"prefix" => return Ok(LanguageTagOrKeyword::Keyword(Keyword::Prefix)),
			"base" => return Ok(LanguageTagOrKeyword::Keyword(Keyword::Base)),
			_ => (),
		}

		while self.peek_char() == Some('-') {
			tag.push(self.expect_char()?);
			let mut empty = true;
			while let Some(c) = self.peek_char() {
				if c.is_ascii_alphanumeric() {
					tag.push(self.expect_char()?);
					empty = false;
				} else {
					break;
				}
			}

			if empty {
				return Err(Meta(Error::InvalidLangTag, self.span));
			}
		}

		match LanguageTagBuf::new(tag.into_bytes()) {
			Ok(tag) => Ok(LanguageTagOrKeyword::LanguageTag(tag)),
			Err(_) => Err(Meta(Error::InvalidLangTag, self.span)),
		}
	}

	fn next_hex(&mut self, len: u8) -> Result<u32, Meta<Error, Span>> {
		let mut codepoint = 0;

		for _ in 0..len {
			let c = self.expect_char()?;
			match c.to_digit(16) {
				Some(d) => codepoint = codepoint << 4 | d,
				None => return self.error(Error::Unexpected(c)),
			}
		}

		Ok(codepoint)
	}

	/// Decodes a `\uXXXX` or `\UXXXXXXXX` escape, after the `u`/`U`.
	///
	/// A high surrogate must be completed by an immediately following
	/// `\uXXXX` low surrogate; the pair combines into one scalar value.
	/// U+0000 is dropped, signalled by `None`.
	fn next_uchar(&mut self, len: u8) -> Result<Option<char>, Meta<Error, Span>> {
		let mut codepoint = self.next_hex(len)?;

		if len == 4 && (0xd800..0xdc00).contains(&codepoint) {
			if self.next_char() != Some('\\') || self.next_char() != Some('u') {
				return self.error(Error::InvalidCodepoint(codepoint));
			}

			let low = self.next_hex(4)?;
			if !(0xdc00..0xe000).contains(&low) {
				return self.error(Error::InvalidCodepoint(low));
			}

			codepoint = 0x10000 + ((codepoint - 0xd800) << 10) + (low - 0xdc00);
		}

		if codepoint == 0 {
			return Ok(None);
		}

		match char::try_from(codepoint) {
			Ok(c) => Ok(Some(c)),
			Err(_) => self.error(Error::InvalidCodepoint(codepoint)),
		}
	}

	/// Parses an IRI reference, starting after the opening `<` until the
	/// closing `>`. A UCHAR whose value falls in the forbidden IRIREF set
	/// is rejected at the escape's position.
	fn next_iriref(&mut self) -> Result<IriRefBuf, Meta<Error, Span>> {
		let mut iriref = String::new();

		loop {
			match self.next_char() {
				Some('>') => break,
				Some('\\') => {
					let c = match self.next_char() {
						Some('u') => self.next_uchar(4)?,
						Some('U') => self.next_uchar(8)?,
						Some(c) => return self.error(Error::Unexpected(c)),
						None => return Err(Meta(Error::UnexpectedEof, self.end())),
					};

					match c {
						Some(c) if is_iri_char(c) => iriref.push(c),
						Some(c) => return self.error(Error::ForbiddenIriCodepoint(c as u32)),
						None => return self.error(Error::ForbiddenIriCodepoint(0)),
					}
				}
				Some(c) if is_iri_char(c) => iriref.push(c),
				Some(c) => return self.error(Error::Unexpected(c)),
				None => return Err(Meta(Error::UnexpectedEof, self.end())),
			}
		}

		match IriRefBuf::from_string(iriref) {
			Ok(iriref) => Ok(iriref),
			Err((e, string)) => Err(Meta(Error::InvalidIriRef(e, string), self.span)),
		}
	}

	/// Parses a string literal, starting after the first quote character.
	/// The long forms are recognised before the short forms by looking at
	/// the two following characters.
	fn next_string(&mut self, delimiter: char) -> Result<StringLiteral, Meta<Error, Span>> {
		let long = if self.peek_char() == Some(delimiter) {
			if self.peek_char2() == Some(delimiter) {
				self.next_char();
				self.next_char();
				true
			} else {
				// empty short string
				self.next_char();
				return Ok(StringLiteral {
					text: String::new(),
					quote: Quote::short(delimiter),
				});
			}
		} else {
			false
		};

		let mut text = String::new();

		loop {
			match self.next_char() {
				Some(c) if c == delimiter => {
					if !long {
						break;
					}

					if self.peek_char() == Some(delimiter) {
						self.next_char();
						if self.peek_char() == Some(delimiter) {
							self.next_char();
							break;
						}

						text.push(delimiter);
						text.push(delimiter);
					} else {
						text.push(delimiter);
					}
				}
				Some('\\') => {
					if let Some(c) = self.next_string_escape()? {
						text.push(c);
					}
				}
				Some(c) if matches!(c, '\n' | '\r') && !long => {
					return self.error(Error::Unexpected(c))
				}
				Some(c) => text.push(c),
				None => return Err(Meta(Error::UnexpectedEof, self.end())),
			}
		}

		Ok(StringLiteral {
			text,
			quote: if long {
				Quote::long(delimiter)
			} else {
				Quote::short(delimiter)
			},
		})
	}

	/// Decodes an ECHAR or UCHAR escape inside a string literal, after the
	/// backslash. `None` means the escape decoded to the dropped U+0000.
	fn next_string_escape(&mut self) -> Result<Option<char>, Meta<Error, Span>> {
		match self.next_char() {
			Some('u') => self.next_uchar(4),
			Some('U') => self.next_uchar(8),
			Some('t') => Ok(Some('\t')),
			Some('b') => Ok(Some('\u{08}')),
			Some('n') => Ok(Some('\n')),
			Some('r') => Ok(Some('\r')),
			Some('f') => Ok(Some('\u{0c}')),
			Some('\'') => Ok(Some('\'')),
			Some('"') => Ok(Some('"')),
			Some('\\') => Ok(Some('\\')),
			Some(c) => self.error(Error::Unexpected(c)),
			None => Err(Meta(Error::UnexpectedEof, self.end())),
		}
	}

	/// Parses a numeric literal from its first character (a digit, a sign
	/// or the leading dot of a fraction). DOUBLE is discriminated before
	/// DECIMAL before INTEGER: an exponent wins, otherwise a consumed
	/// fraction dot.
	fn next_numeric(&mut self, first: char) -> Result<Numeric, Meta<Error, Span>> {
		let mut buffer = String::new();
		buffer.push(first);

		let mut digits = first.is_ascii_digit();
		let mut fraction = first == '.';

		if !fraction {
			while let Some(c) = self.peek_char() {
				if c.is_ascii_digit() {
					buffer.push(self.expect_char()?);
					digits = true;
				} else {
					break;
				}
			}

			// The dot is consumed only while it still belongs to the
			// number: fraction digits follow, or a complete exponent
			// (`1.e0`). Otherwise it is left for the statement
			// terminator, as in `<s> <p> 1.`.
			if self.peek_char() == Some('.') {
				let mut chars = self.chars.clone();
				chars.next();
				let mut fraction_digits = false;
				while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
					chars.next();
					fraction_digits = true;
				}

				if fraction_digits || (digits && Self::exponent_at(chars)) {
					buffer.push(self.expect_char()?);
					fraction = true;
				}
			}
		}

		if fraction {
			while let Some(c) = self.peek_char() {
				if c.is_ascii_digit() {
					buffer.push(self.expect_char()?);
					digits = true;
				} else {
					break;
				}
			}
		}

		if !digits {
			return Err(Meta(Error::InvalidNumeric(buffer), self.span));
		}

		// `1ex:b` is an integer followed by a prefixed name: the exponent
		// is only consumed when it is complete.
		let mut exponent = false;
		if Self::exponent_at(self.chars.clone()) {
			buffer.push(self.expect_char()?);
			if matches!(self.peek_char(), Some('+' | '-')) {
				buffer.push(self.expect_char()?);
			}

			while let Some(c) = self.peek_char() {
				if c.is_ascii_digit() {
					buffer.push(self.expect_char()?);
				} else {
					break;
				}
			}

			exponent = true;
		}

		if exponent {
			Ok(Numeric::Double(buffer))
		} else if fraction {
			Ok(Numeric::Decimal(buffer))
		} else {
			Ok(Numeric::Integer(buffer))
		}
	}

	/// Returns `true` if a complete `EXPONENT` (`[eE] [+-]? [0-9]+`)
	/// starts the character stream.
	fn exponent_at(mut chars: Peekable<Chars<'a>>) -> bool {
		match chars.next() {
			Some('e' | 'E') => (),
			_ => return false,
		}

		match chars.next() {
			Some(c) if c.is_ascii_digit() => true,
			Some('+' | '-') => matches!(chars.next(), Some(c) if c.is_ascii_digit()),
			_ => false,
		}
	}

	/// Parses a blank node label, starting after the `_`.
	fn next_blank_node_label(&mut self) -> Result<String, Meta<Error, Span>> {
		match self.next_char() {
			Some(':') => (),
			Some(c) => return self.error(Error::Unexpected(c)),
			None => return Err(Meta(Error::UnexpectedEof, self.end())),
		}

		let mut label = String::new();
		match self.next_char() {
			Some(c) if is_pn_chars_u(c) || c.is_ascii_digit() => label.push(c),
			Some(c) => return self.error(Error::Unexpected(c)),
			None => return Err(Meta(Error::UnexpectedEof, self.end())),
		}

		loop {
			match self.peek_char() {
				Some(c) if is_pn_chars(c) => {
					label.push(self.expect_char()?);
				}
				Some('.') => {
					if !self.consume_dot_run(&mut label, is_pn_chars)? {
						break;
					}
				}
				_ => break,
			}
		}

		Ok(label)
	}

	/// Consumes a run of dots inside a name when a continuation character
	/// follows it, so that a name never ends with `.`.
	fn consume_dot_run(
		&mut self,
		name: &mut String,
		keep: impl Fn(char) -> bool,
	) -> Result<bool, Meta<Error, Span>> {
		let (count, next) = self.peek_past_dots();
		match next {
			Some(c) if keep(c) => {
				for _ in 0..count {
					name.push(self.expect_char()?);
				}

				Ok(true)
			}
			_ => Ok(false),
		}
	}

	/// Decodes a `PN_LOCAL_ESC` escape, after the backslash.
	fn next_local_escape(&mut self) -> Result<char, Meta<Error, Span>> {
		match self.next_char() {
			Some(c) if is_local_escape(c) => Ok(c),
			Some(c) => self.error(Error::Unexpected(c)),
			None => Err(Meta(Error::UnexpectedEof, self.end())),
		}
	}

	/// Parses a `PN_LOCAL`, starting at its first character. Percent
	/// escapes stay verbatim in the name, local escapes decode to the bare
	/// character.
	fn next_local(&mut self) -> Result<String, Meta<Error, Span>> {
		let mut local = String::new();

		loop {
			match self.peek_char() {
				Some(c) if is_pn_chars(c) || c == ':' => {
					local.push(self.expect_char()?);
				}
				Some('%') => {
					local.push(self.expect_char()?);
					for _ in 0..2 {
						let c = self.expect_char()?;
						if !c.is_ascii_hexdigit() {
							return self.error(Error::Unexpected(c));
						}

						local.push(c);
					}
				}
				Some('\\') => {
					self.next_char();
					local.push(self.next_local_escape()?);
				}
				Some('.') if !local.is_empty() => {
					let keep = |c: char| is_pn_chars(c) || matches!(c, ':' | '%' | '\\');
					if !self.consume_dot_run(&mut local, keep)? {
						break;
					}
				}
				_ => break,
			}
		}

		Ok(local)
	}

	/// Returns `true` if the next character can start a `PN_LOCAL`.
	fn at_local_start(&mut self) -> bool {
		matches!(
			self.peek_char(),
			Some(c) if is_pn_chars_u(c) || c.is_ascii_digit() || matches!(c, ':' | '%' | '\\')
		)
	}

	/// Parses a prefixed name or a bare keyword, from its first character.
	fn next_name_or_keyword(&mut self, c: char) -> Result<Token, Meta<Error, Span>> {
		let prefix = match c {
			':' => String::new(),
			c if is_pn_chars_base(c) => {
				let mut name = String::new();
				name.push(c);

				loop {
					match self.peek_char() {
						Some(c) if is_pn_chars(c) => {
							name.push(self.expect_char()?);
						}
						Some('.') => {
							if !self.consume_dot_run(&mut name, is_pn_chars)? {
								break;
							}
						}
						_ => break,
					}
				}

				if self.peek_char() == Some(':') {
					self.next_char();
					name
				} else {
					return match Keyword::from_str(&name) {
						Ok(kw) => Ok(Token::Keyword(kw)),
						Err(NotAKeyword) => Err(Meta(Error::UnknownKeyword(name), self.span)),
					};
				}
			}
			c => return self.error(Error::Unexpected(c)),
		};

		let local = if self.at_local_start() {
			self.next_local()?
		} else {
			String::new()
		};

		Ok(Token::PrefixedName(PrefixedName { prefix, local }))
	}

	fn consume(&mut self) -> Result<Meta<Option<Token>, Span>, Meta<Error, Span>> {
		self.skip_whitespace();

		let token = match self.next_char() {
			Some('@') => match self.next_langtag_or_keyword()? {
				LanguageTagOrKeyword::LanguageTag(tag) => Token::LangTag(tag),
				LanguageTagOrKeyword::Keyword(kw) => Token::Keyword(kw),
			},
			Some('<') => Token::IriRef(self.next_iriref()?),
			Some('"') => Token::String(self.next_string('"')?),
			Some('\'') => Token::String(self.next_string('\'')?),
			Some('_') => Token::BlankNodeLabel(self.next_blank_node_label()?),
			Some(',') => Token::Punct(Punct::Comma),
			Some(';') => Token::Punct(Punct::Semicolon),
			Some('^') => match self.next_char() {
				Some('^') => Token::Punct(Punct::Carets),
				Some(c) => return self.error(Error::Unexpected(c)),
				None => return Err(Meta(Error::UnexpectedEof, self.end())),
			},
			Some('(') => Token::Begin(Delimiter::Parenthesis),
			Some('[') => Token::Begin(Delimiter::Bracket),
			Some('{') => Token::Begin(Delimiter::Brace),
			Some(')') => Token::End(Delimiter::Parenthesis),
			Some(']') => Token::End(Delimiter::Bracket),
			Some('}') => Token::End(Delimiter::Brace),
			Some(c @ ('+' | '-' | '0'..='9')) => Token::Numeric(self.next_numeric(c)?),
			Some('.') => match self.peek_char() {
				Some(c) if c.is_ascii_digit() => Token::Numeric(self.next_numeric('.')?),
				_ => Token::Punct(Punct::Dot),
			},
			Some(c) => self.next_name_or_keyword(c)?,
			None => return Ok(Meta(None, self.end())),
		};

		self.line_is_blank = false;
		Ok(Meta(Some(token), self.span))
	}

	pub fn peek(&mut self) -> Result<Meta<Option<&Token>, Span>, Meta<Error, Span>> {
		if self.lookahead.is_none() {
			if let Meta(Some(token), span) = self.consume()? {
				self.lookahead = Some(Meta(token, span));
			}
		}

		match &self.lookahead {
			Some(Meta(token, span)) => Ok(Meta(Some(token), *span)),
			None => Ok(Meta(None, self.end())),
		}
	}

	#[allow(clippy::should_implement_trait)]
	pub fn next(&mut self) -> Result<Meta<Option<Token>, Span>, Meta<Error, Span>> {
		match self.lookahead.take() {
			Some(Meta(token, span)) => Ok(Meta(Some(token), span)),
			None => self.consume(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(input: &str) -> Vec<Token> {
		let mut lexer = Lexer::new(input);
		let mut tokens = Vec::new();
		while let Meta(Some(token), _) = lexer.next().expect("lexing failed") {
			tokens.push(token);
		}

		tokens
	}

	fn single_numeric(input: &str) -> Numeric {
		match tokens(input).into_iter().next() {
			Some(Token::Numeric(n)) => n,
			other => panic!("expected a numeric literal, got {:?}", other),
		}
	}

	#[test]
	fn numeric_discrimination() {
		assert_eq!(single_numeric("1"), Numeric::Integer("1".into()));
		assert_eq!(single_numeric("-05"), Numeric::Integer("-05".into()));
		assert_eq!(single_numeric("1.0"), Numeric::Decimal("1.0".into()));
		assert_eq!(single_numeric("+.5"), Numeric::Decimal("+.5".into()));
		assert_eq!(single_numeric("1e0"), Numeric::Double("1e0".into()));
		assert_eq!(single_numeric("1.0e0"), Numeric::Double("1.0e0".into()));
		assert_eq!(single_numeric("1.E2"), Numeric::Double("1.E2".into()));
	}

	#[test]
	fn integer_then_statement_dot() {
		let tokens = tokens("1.");
		assert!(matches!(tokens[0], Token::Numeric(Numeric::Integer(ref s)) if s == "1"));
		assert!(matches!(tokens[1], Token::Punct(Punct::Dot)));
	}

	#[test]
	fn number_token_boundaries() {
		let tokens = tokens("1.ex:a");
		assert!(matches!(tokens[0], Token::Numeric(Numeric::Integer(ref s)) if s == "1"));
		assert!(matches!(tokens[1], Token::Punct(Punct::Dot)));
		assert!(matches!(tokens[2], Token::PrefixedName(_)));

		let tokens = self::tokens("1ex:a");
		assert!(matches!(tokens[0], Token::Numeric(Numeric::Integer(ref s)) if s == "1"));
		assert!(matches!(tokens[1], Token::PrefixedName(_)));
	}

	#[test]
	fn name_dots_are_not_last() {
		let tokens = tokens("_:a.b. ");
		assert!(matches!(tokens[0], Token::BlankNodeLabel(ref l) if l == "a.b"));
		assert!(matches!(tokens[1], Token::Punct(Punct::Dot)));

		let tokens = self::tokens("ex.a:b.c. ");
		match &tokens[0] {
			Token::PrefixedName(name) => {
				assert_eq!(name.prefix, "ex.a");
				assert_eq!(name.local, "b.c");
			}
			other => panic!("expected a prefixed name, got {:?}", other),
		}
		assert!(matches!(tokens[1], Token::Punct(Punct::Dot)));
	}

	#[test]
	fn local_escapes() {
		let tokens = tokens(r"ex:a\,b ex:x%41y");
		match &tokens[0] {
			Token::PrefixedName(name) => assert_eq!(name.local, "a,b"),
			other => panic!("expected a prefixed name, got {:?}", other),
		}
		// percent escapes stay verbatim
		match &tokens[1] {
			Token::PrefixedName(name) => assert_eq!(name.local, "x%41y"),
			other => panic!("expected a prefixed name, got {:?}", other),
		}
	}

	#[test]
	fn long_strings_before_short() {
		let tokens = tokens(r#""""a""b""" '' "x""#);
		match &tokens[0] {
			Token::String(s) => {
				assert_eq!(s.text, "a\"\"b");
				assert_eq!(s.quote, Quote::LongDouble);
			}
			other => panic!("expected a string, got {:?}", other),
		}
		match &tokens[1] {
			Token::String(s) => {
				assert_eq!(s.text, "");
				assert_eq!(s.quote, Quote::Single);
			}
			other => panic!("expected a string, got {:?}", other),
		}
		match &tokens[2] {
			Token::String(s) => {
				assert_eq!(s.text, "x");
				assert_eq!(s.quote, Quote::Double);
			}
			other => panic!("expected a string, got {:?}", other),
		}
	}

	#[test]
	fn string_escapes() {
		let tokens = tokens(r#""a\tb\U0001F600" "nul gone""#);
		match &tokens[0] {
			Token::String(s) => assert_eq!(s.text, "a\tb\u{1f600}"),
			other => panic!("expected a string, got {:?}", other),
		}
		match &tokens[1] {
			Token::String(s) => assert_eq!(s.text, "nulgone"),
			other => panic!("expected a string, got {:?}", other),
		}
	}

	#[test]
	fn surrogate_pair_escape_combines() {
		let tokens = tokens(r#""\uD83D\uDE00""#);
		match &tokens[0] {
			Token::String(s) => assert_eq!(s.text, "\u{1f600}"),
			other => panic!("expected a string, got {:?}", other),
		}
	}

	#[test]
	fn lone_surrogate_escape_is_an_error() {
		let mut lexer = Lexer::new(r#""\uD83D x""#);
		assert!(lexer.next().is_err());
	}

	#[test]
	fn forbidden_uchar_in_iriref() {
		let mut lexer = Lexer::new(r"<http://ex/\u0022>");
		match lexer.next() {
			Err(Meta(Error::ForbiddenIriCodepoint(0x22), _)) => (),
			other => panic!("expected a forbidden code point error, got {:?}", other),
		}
	}

	#[test]
	fn uchar_in_iriref() {
		let tokens = tokens(r"<http://ex/\u00E9>");
		assert!(matches!(&tokens[0], Token::IriRef(iri) if iri.to_string() == "http://ex/é"));
	}

	#[test]
	fn comments_and_blank_lines_are_trivia() {
		let mut lexer = Lexer::new("# hello\n\n<a>");
		let Meta(token, _) = lexer.next().expect("lexing failed");
		assert!(matches!(token, Some(Token::IriRef(_))));
		assert_eq!(
			lexer.take_trivia().map(|Meta(t, _)| t),
			Some(Trivia::Comment(" hello".into()))
		);
		assert_eq!(lexer.take_trivia().map(|Meta(t, _)| t), Some(Trivia::BlankLine));
		assert!(lexer.take_trivia().is_none());
	}

	#[test]
	fn keywords() {
		assert!(matches!(tokens("a")[0], Token::Keyword(Keyword::A)));
		assert!(matches!(tokens("true")[0], Token::Keyword(Keyword::True)));
		assert!(matches!(tokens("Prefix")[0], Token::Keyword(Keyword::SparqlPrefix)));
		assert!(matches!(tokens("graph")[0], Token::Keyword(Keyword::Graph)));
	}
}
