//! Grammar layer: recursive descent with ordered alternatives over the
//! token stream.
//!
//! Directives are applied to the scope eagerly, before the statement node
//! is returned, so that later statements resolve against them. Prefixed
//! names with no binding raise a warning and keep parsing.

use std::fmt;
use std::sync::Arc;

use iref::{Iri, IriRefBuf};
use locspan::{Meta, Span};

use crate::ast;
use crate::error::Warning;
use crate::lexing::{self, Delimiter, Keyword, Lexer, Punct, Quote, Token, Trivia};
use crate::scope::Scope;

const SUBJECT_EXPECTED: &[&str] =
	&["IRI reference", "prefixed name", "blank node label", "collection"];
const VERB_EXPECTED: &[&str] = &["IRI reference", "prefixed name", "keyword `a`"];
const OBJECT_EXPECTED: &[&str] = &[
	"IRI reference",
	"prefixed name",
	"blank node",
	"collection",
	"literal",
];
const IRI_EXPECTED: &[&str] = &["IRI reference", "prefixed name"];
const LABEL_EXPECTED: &[&str] = &["IRI reference", "prefixed name", "blank node"];

/// Dialect gate over the shared lexical core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
	Turtle,
	TriG,
	NTriples,
	NQuads,
}

impl Dialect {
	/// Directives and shorthands are available.
	fn terse(&self) -> bool { matches!(self, Self::Turtle | Self::TriG) }

	/// Graph blocks are available.
	fn graphs(&self) -> bool { matches!(self, Self::TriG) }
}

/// Grammar error: a position where no alternative matches.
#[derive(Debug)]
pub enum SyntaxError {
	Lexing(lexing::Error),
	Unexpected(Option<Token>, &'static [&'static str]),
}

impl SyntaxError {
	/// The alternatives open at the failure position.
	pub fn expected(&self) -> &'static [&'static str] {
		match self {
			Self::Lexing(_) => &[],
			Self::Unexpected(_, expected) => expected,
		}
	}
}

impl fmt::Display for SyntaxError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Lexing(e) => e.fmt(f),
			Self::Unexpected(None, _) => write!(f, "unexpected end of file"),
			Self::Unexpected(Some(token), _) => write!(f, "unexpected {}", token),
		}
	}
}

impl std::error::Error for SyntaxError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Lexing(e) => Some(e),
			_ => None,
		}
	}
}

type ParseResult<T> = Result<T, Meta<SyntaxError, Span>>;

/// Statement parser over one in-memory document.
pub struct Parser<'t> {
	lexer: Lexer<'t>,
	dialect: Dialect,
	scope: Arc<Scope>,
	warnings: Vec<Meta<Warning, Span>>,
}

impl<'t> Parser<'t> {
	pub fn new(input: &'t str, dialect: Dialect, base: Option<Iri>) -> Self {
		Self {
			lexer: Lexer::new(input),
			dialect,
			scope: Arc::new(Scope::new(base)),
			warnings: Vec::new(),
		}
	}

	pub fn warnings(&self) -> &[Meta<Warning, Span>] { &self.warnings }

	pub fn into_warnings(self) -> Vec<Meta<Warning, Span>> { self.warnings }

	/// Parses the next statement, returned together with the resolution
	/// scope in effect for it. Pending comments and blank lines surface
	/// as their own statements first. `None` at end of input.
	#[allow(clippy::type_complexity)]
	pub fn next_statement(
		&mut self,
	) -> ParseResult<Option<(Arc<Scope>, Meta<ast::Statement, Span>)>> {
		if !self.lexer.has_trivia() {
			// forces lexing up to the next token, queueing its trivia
			self.peek()?;
		}

		if let Some(Meta(trivia, span)) = self.lexer.take_trivia() {
			let statement = match trivia {
				Trivia::Comment(text) => ast::Statement::Comment(text),
				Trivia::BlankLine => ast::Statement::BlankLine,
			};

			return Ok(Some((self.scope.clone(), Meta(statement, span))));
		}

		match self.next_token()? {
			Meta(None, _) => Ok(None),
			Meta(Some(token), span) => {
				let statement = if self.dialect.terse() {
					self.parse_statement(token, span)?
				} else {
					self.parse_line_statement(token, span)?
				};

				Ok(Some((self.scope.clone(), statement)))
			}
		}
	}

	/// Parses the remaining statements into one document node.
	pub fn document(&mut self) -> ParseResult<ast::Document> {
		let mut document = ast::Document::new();
		while let Some((_, statement)) = self.next_statement()? {
			document.insert(statement);
		}

		Ok(document)
	}

	fn next_token(&mut self) -> ParseResult<Meta<Option<Token>, Span>> {
		self.lexer
			.next()
			.map_err(|Meta(e, span)| Meta(SyntaxError::Lexing(e), span))
	}

	fn peek(&mut self) -> ParseResult<Meta<Option<&Token>, Span>> {
		self.lexer
			.peek()
			.map_err(|Meta(e, span)| Meta(SyntaxError::Lexing(e), span))
	}

	fn expect_token(&mut self, expected: &'static [&'static str]) -> ParseResult<Meta<Token, Span>> {
		match self.next_token()? {
			Meta(Some(token), span) => Ok(Meta(token, span)),
			Meta(None, span) => Err(Meta(SyntaxError::Unexpected(None, expected), span)),
		}
	}

	fn unexpected<T>(
		token: Option<Token>,
		span: Span,
		expected: &'static [&'static str],
	) -> ParseResult<T> {
		Err(Meta(SyntaxError::Unexpected(token, expected), span))
	}

	fn expect_dot(&mut self) -> ParseResult<Span> {
		match self.next_token()? {
			Meta(Some(Token::Punct(Punct::Dot)), span) => Ok(span),
			Meta(token, span) => Self::unexpected(token, span, &["dot `.`"]),
		}
	}

	fn expect_iriref(&mut self) -> ParseResult<Meta<IriRefBuf, Span>> {
		match self.next_token()? {
			Meta(Some(Token::IriRef(iri_ref)), span) => Ok(Meta(iri_ref, span)),
			Meta(token, span) => Self::unexpected(token, span, &["IRI reference"]),
		}
	}

	/// Expects a `PNAME_NS` token: a prefixed name with an empty local
	/// part.
	fn expect_namespace(&mut self) -> ParseResult<Meta<String, Span>> {
		match self.next_token()? {
			Meta(Some(Token::PrefixedName(name)), span) if name.local.is_empty() => {
				Ok(Meta(name.prefix, span))
			}
			Meta(token, span) => Self::unexpected(token, span, &["namespace"]),
		}
	}

	/// Registers a prefixed name occurrence, warning when its namespace
	/// has no binding.
	fn prefixed(&mut self, name: lexing::PrefixedName, span: Span) -> ast::Iri {
		if self.scope.prefix(&name.prefix).is_none() {
			log::warn!("undefined prefix `{}:`", name.prefix);
			self.warnings
				.push(Meta(Warning::UndefinedPrefix(name.prefix.clone()), span));
		}

		ast::Iri::Prefixed {
			prefix: name.prefix,
			local: name.local,
		}
	}

	/// Applies a directive to the scope. Eager: the binding is visible to
	/// every following token of the document.
	fn define(&mut self, prefix: &str, iri_ref: &IriRefBuf) {
		let value = iri_ref.to_string();
		Arc::make_mut(&mut self.scope).define(prefix, &value);
	}

	fn parse_statement(
		&mut self,
		token: Token,
		span: Span,
	) -> ParseResult<Meta<ast::Statement, Span>> {
		match token {
			Token::Keyword(Keyword::Prefix) => {
				let prefix = self.expect_namespace()?;
				let iri_ref = self.expect_iriref()?;
				let mut span = span;
				span.append(self.expect_dot()?);
				self.define(prefix.value(), iri_ref.value());
				Ok(Meta(
					ast::Statement::Directive(ast::Directive::Prefix(prefix, iri_ref)),
					span,
				))
			}
			Token::Keyword(Keyword::Base) => {
				let iri_ref = self.expect_iriref()?;
				let mut span = span;
				span.append(self.expect_dot()?);
				self.define("", iri_ref.value());
				Ok(Meta(
					ast::Statement::Directive(ast::Directive::Base(iri_ref)),
					span,
				))
			}
			Token::Keyword(Keyword::SparqlPrefix) => {
				let prefix = self.expect_namespace()?;
				let iri_ref = self.expect_iriref()?;
				let mut span = span;
				span.append(*iri_ref.metadata());
				self.define(prefix.value(), iri_ref.value());
				Ok(Meta(
					ast::Statement::Directive(ast::Directive::SparqlPrefix(prefix, iri_ref)),
					span,
				))
			}
			Token::Keyword(Keyword::SparqlBase) => {
				let iri_ref = self.expect_iriref()?;
				let mut span = span;
				span.append(*iri_ref.metadata());
				self.define("", iri_ref.value());
				Ok(Meta(
					ast::Statement::Directive(ast::Directive::SparqlBase(iri_ref)),
					span,
				))
			}
			Token::Keyword(Keyword::Graph) if self.dialect.graphs() => {
				let label = self.parse_graph_label()?;
				match self.next_token()? {
					Meta(Some(Token::Begin(Delimiter::Brace)), _) => (),
					Meta(token, span) => {
						return Self::unexpected(token, span, &["opening `{`"])
					}
				}

				self.parse_graph_body(Some(label), span)
			}
			Token::Begin(Delimiter::Brace) if self.dialect.graphs() => {
				self.parse_graph_body(None, span)
			}
			Token::Begin(Delimiter::Bracket) => {
				let Meta(list, list_span) = self.parse_property_list_body(span)?;
				let mut span = list_span;

				if list.is_empty() {
					// ANON: either a TriG graph label or a plain subject
					if self.dialect.graphs()
						&& matches!(self.peek()?, Meta(Some(Token::Begin(Delimiter::Brace)), _))
					{
						self.next_token()?;
						let label =
							Meta(ast::GraphLabel::BlankNode(ast::BlankNode::Anonymous), list_span);
						return self.parse_graph_body(Some(label), span);
					}

					let subject =
						Meta(ast::Subject::BlankNode(ast::BlankNode::Anonymous), list_span);
					let Meta(po, po_span) = self.parse_predicate_objects_list()?;
					span.append(po_span);
					span.append(self.expect_dot()?);
					Ok(Meta(
						ast::Statement::Triples(ast::Triples::Subject(subject, po)),
						span,
					))
				} else {
					let po = if matches!(self.peek()?, Meta(Some(Token::Punct(Punct::Dot)), _)) {
						None
					} else {
						let Meta(po, po_span) = self.parse_predicate_objects_list()?;
						span.append(po_span);
						Some(po)
					};

					span.append(self.expect_dot()?);
					Ok(Meta(
						ast::Statement::Triples(ast::Triples::Blank(Meta(list, list_span), po)),
						span,
					))
				}
			}
			token => {
				let mut subject = self.parse_subject(token, span)?;
				let mut span = *subject.metadata();

				if self.dialect.graphs()
					&& matches!(self.peek()?, Meta(Some(Token::Begin(Delimiter::Brace)), _))
				{
					match as_graph_label(subject) {
						Ok(label) => {
							self.next_token()?;
							return self.parse_graph_body(Some(label), span);
						}
						Err(s) => subject = s,
					}
				}

				let Meta(po, po_span) = self.parse_predicate_objects_list()?;
				span.append(po_span);
				span.append(self.expect_dot()?);
				Ok(Meta(
					ast::Statement::Triples(ast::Triples::Subject(subject, po)),
					span,
				))
			}
		}
	}

	/// Parses an N-Triples or N-Quads statement: one plain triple with an
	/// optional graph label, no directives or shorthands.
	fn parse_line_statement(
		&mut self,
		token: Token,
		span: Span,
	) -> ParseResult<Meta<ast::Statement, Span>> {
		let mut span = span;

		let subject = match token {
			Token::IriRef(iri_ref) => {
				Meta(ast::Subject::Iri(ast::Iri::IriRef(iri_ref)), span)
			}
			Token::BlankNodeLabel(label) => {
				Meta(ast::Subject::BlankNode(ast::BlankNode::Label(label)), span)
			}
			token => {
				return Self::unexpected(
					Some(token),
					span,
					&["IRI reference", "blank node label"],
				)
			}
		};

		let verb = match self.next_token()? {
			Meta(Some(Token::IriRef(iri_ref)), p_span) => {
				Meta(ast::Verb::Predicate(ast::Iri::IriRef(iri_ref)), p_span)
			}
			Meta(token, span) => return Self::unexpected(token, span, &["IRI reference"]),
		};

		let object = match self.next_token()? {
			Meta(Some(Token::IriRef(iri_ref)), o_span) => {
				Meta(ast::Object::Iri(ast::Iri::IriRef(iri_ref)), o_span)
			}
			Meta(Some(Token::BlankNodeLabel(label)), o_span) => {
				Meta(ast::Object::BlankNode(ast::BlankNode::Label(label)), o_span)
			}
			Meta(Some(Token::String(s)), o_span) if s.quote == Quote::Double => {
				let mut lit_span = o_span;
				let suffix = if matches!(self.peek()?, Meta(Some(Token::LangTag(_)), _)) {
					match self.next_token()? {
						Meta(Some(Token::LangTag(tag)), tag_span) => {
							lit_span.append(tag_span);
							Some(ast::LiteralSuffix::LangTag(Meta(tag, tag_span)))
						}
						Meta(token, span) => {
							return Self::unexpected(token, span, &["language tag"])
						}
					}
				} else if matches!(self.peek()?, Meta(Some(Token::Punct(Punct::Carets)), _)) {
					self.next_token()?;
					let Meta(iri_ref, dt_span) = self.expect_iriref()?;
					lit_span.append(dt_span);
					Some(ast::LiteralSuffix::Datatype(Meta(
						ast::Iri::IriRef(iri_ref),
						dt_span,
					)))
				} else {
					None
				};

				Meta(
					ast::Object::Literal(ast::Literal::Rdf(ast::RdfLiteral {
						value: Meta(s, o_span),
						suffix,
					})),
					lit_span,
				)
			}
			Meta(token, span) => {
				return Self::unexpected(
					token,
					span,
					&["IRI reference", "blank node label", "string literal"],
				)
			}
		};

		let graph = if self.dialect == Dialect::NQuads {
			match self.peek()? {
				Meta(Some(Token::IriRef(_)), _) | Meta(Some(Token::BlankNodeLabel(_)), _) => {
					match self.next_token()? {
						Meta(Some(Token::IriRef(iri_ref)), g_span) => {
							Some(Meta(ast::GraphLabel::Iri(ast::Iri::IriRef(iri_ref)), g_span))
						}
						Meta(Some(Token::BlankNodeLabel(label)), g_span) => Some(Meta(
							ast::GraphLabel::BlankNode(ast::BlankNode::Label(label)),
							g_span,
						)),
						Meta(token, span) => {
							return Self::unexpected(token, span, LABEL_EXPECTED)
						}
					}
				}
				_ => None,
			}
		} else {
			None
		};

		span.append(self.expect_dot()?);

		let o_span = *object.metadata();
		let verb_span = *verb.metadata();
		let mut po_span = verb_span;
		po_span.append(o_span);
		let po = vec![Meta(
			ast::PredicateObjects {
				verb,
				objects: Meta(ast::Objects(vec![object]), o_span),
			},
			po_span,
		)];

		let mut triples_span = *subject.metadata();
		triples_span.append(po_span);
		let triples = Meta(ast::Triples::Subject(subject, po), triples_span);

		let statement = match graph {
			Some(label) => ast::Statement::Graph(ast::GraphBlock {
				label: Some(label),
				body: vec![triples],
			}),
			None => {
				let Meta(triples, _) = triples;
				ast::Statement::Triples(triples)
			}
		};

		Ok(Meta(statement, span))
	}

	/// Parses the body of a graph block, after the opening `{`. The dot
	/// between triples clauses is optional before the closing `}`.
	fn parse_graph_body(
		&mut self,
		label: Option<Meta<ast::GraphLabel, Span>>,
		mut span: Span,
	) -> ParseResult<Meta<ast::Statement, Span>> {
		let mut body = Vec::new();

		loop {
			match self.next_token()? {
				Meta(Some(Token::End(Delimiter::Brace)), end) => {
					span.append(end);
					break;
				}
				Meta(Some(token), token_span) => {
					body.push(self.parse_triples_clause(token, token_span)?);

					match self.peek()? {
						Meta(Some(Token::Punct(Punct::Dot)), _) => {
							self.next_token()?;
						}
						Meta(Some(Token::End(Delimiter::Brace)), _) => (),
						_ => {
							let Meta(token, span) = self.next_token()?;
							return Self::unexpected(token, span, &["dot `.`", "closing `}`"]);
						}
					}
				}
				Meta(None, end) => {
					return Self::unexpected(None, end, &["closing `}`"]);
				}
			}
		}

		Ok(Meta(
			ast::Statement::Graph(ast::GraphBlock { label, body }),
			span,
		))
	}

	/// Parses one triples clause (no terminating dot).
	fn parse_triples_clause(
		&mut self,
		token: Token,
		span: Span,
	) -> ParseResult<Meta<ast::Triples, Span>> {
		match token {
			Token::Begin(Delimiter::Bracket) => {
				let Meta(list, list_span) = self.parse_property_list_body(span)?;
				let mut span = list_span;

				if list.is_empty() {
					let subject =
						Meta(ast::Subject::BlankNode(ast::BlankNode::Anonymous), list_span);
					let Meta(po, po_span) = self.parse_predicate_objects_list()?;
					span.append(po_span);
					Ok(Meta(ast::Triples::Subject(subject, po), span))
				} else {
					let po = if self.at_verb_start()? {
						let Meta(po, po_span) = self.parse_predicate_objects_list()?;
						span.append(po_span);
						Some(po)
					} else {
						None
					};

					Ok(Meta(ast::Triples::Blank(Meta(list, list_span), po), span))
				}
			}
			token => {
				let subject = self.parse_subject(token, span)?;
				let mut span = *subject.metadata();
				let Meta(po, po_span) = self.parse_predicate_objects_list()?;
				span.append(po_span);
				Ok(Meta(ast::Triples::Subject(subject, po), span))
			}
		}
	}

	fn parse_graph_label(&mut self) -> ParseResult<Meta<ast::GraphLabel, Span>> {
		match self.next_token()? {
			Meta(Some(Token::IriRef(iri_ref)), span) => {
				Ok(Meta(ast::GraphLabel::Iri(ast::Iri::IriRef(iri_ref)), span))
			}
			Meta(Some(Token::PrefixedName(name)), span) => {
				let iri = self.prefixed(name, span);
				Ok(Meta(ast::GraphLabel::Iri(iri), span))
			}
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(
				ast::GraphLabel::BlankNode(ast::BlankNode::Label(label)),
				span,
			)),
			Meta(Some(Token::Begin(Delimiter::Bracket)), mut span) => match self.next_token()? {
				Meta(Some(Token::End(Delimiter::Bracket)), end) => {
					span.append(end);
					Ok(Meta(
						ast::GraphLabel::BlankNode(ast::BlankNode::Anonymous),
						span,
					))
				}
				Meta(token, span) => Self::unexpected(token, span, &["closing `]`"]),
			},
			Meta(token, span) => Self::unexpected(token, span, LABEL_EXPECTED),
		}
	}

	fn parse_subject(&mut self, token: Token, span: Span) -> ParseResult<Meta<ast::Subject, Span>> {
		match token {
			Token::IriRef(iri_ref) => {
				Ok(Meta(ast::Subject::Iri(ast::Iri::IriRef(iri_ref)), span))
			}
			Token::PrefixedName(name) => {
				let iri = self.prefixed(name, span);
				Ok(Meta(ast::Subject::Iri(iri), span))
			}
			Token::BlankNodeLabel(label) => Ok(Meta(
				ast::Subject::BlankNode(ast::BlankNode::Label(label)),
				span,
			)),
			Token::Begin(Delimiter::Parenthesis) => {
				let Meta(collection, span) = self.parse_collection(span)?;
				Ok(Meta(ast::Subject::Collection(collection), span))
			}
			token => Self::unexpected(Some(token), span, SUBJECT_EXPECTED),
		}
	}

	fn parse_object(&mut self, token: Token, span: Span) -> ParseResult<Meta<ast::Object, Span>> {
		match token {
			Token::IriRef(iri_ref) => Ok(Meta(ast::Object::Iri(ast::Iri::IriRef(iri_ref)), span)),
			Token::PrefixedName(name) => {
				let iri = self.prefixed(name, span);
				Ok(Meta(ast::Object::Iri(iri), span))
			}
			Token::BlankNodeLabel(label) => Ok(Meta(
				ast::Object::BlankNode(ast::BlankNode::Label(label)),
				span,
			)),
			Token::Begin(Delimiter::Parenthesis) => {
				let Meta(collection, span) = self.parse_collection(span)?;
				Ok(Meta(ast::Object::Collection(collection), span))
			}
			Token::Begin(Delimiter::Bracket) => {
				let Meta(list, list_span) = self.parse_property_list_body(span)?;
				if list.is_empty() {
					Ok(Meta(
						ast::Object::BlankNode(ast::BlankNode::Anonymous),
						list_span,
					))
				} else {
					Ok(Meta(
						ast::Object::BlankNodePropertyList(Meta(list, list_span)),
						list_span,
					))
				}
			}
			token => {
				let Meta(literal, span) = self.parse_literal(token, span)?;
				Ok(Meta(ast::Object::Literal(literal), span))
			}
		}
	}

	fn parse_literal(&mut self, token: Token, span: Span) -> ParseResult<Meta<ast::Literal, Span>> {
		match token {
			Token::String(s) => {
				let mut lit_span = span;
				let suffix = if matches!(self.peek()?, Meta(Some(Token::LangTag(_)), _)) {
					match self.next_token()? {
						Meta(Some(Token::LangTag(tag)), tag_span) => {
							lit_span.append(tag_span);
							Some(ast::LiteralSuffix::LangTag(Meta(tag, tag_span)))
						}
						Meta(token, span) => {
							return Self::unexpected(token, span, &["language tag"])
						}
					}
				} else if matches!(self.peek()?, Meta(Some(Token::Punct(Punct::Carets)), _)) {
					self.next_token()?;
					let Meta(token, dt_span) = self.expect_token(IRI_EXPECTED)?;
					let iri = self.parse_iri(token, dt_span)?;
					lit_span.append(dt_span);
					Some(ast::LiteralSuffix::Datatype(Meta(iri, dt_span)))
				} else {
					None
				};

				Ok(Meta(
					ast::Literal::Rdf(ast::RdfLiteral {
						value: Meta(s, span),
						suffix,
					}),
					lit_span,
				))
			}
			Token::Numeric(n) => Ok(Meta(ast::Literal::Numeric(n), span)),
			Token::Keyword(Keyword::True) => Ok(Meta(ast::Literal::Boolean(true), span)),
			Token::Keyword(Keyword::False) => Ok(Meta(ast::Literal::Boolean(false), span)),
			token => Self::unexpected(Some(token), span, OBJECT_EXPECTED),
		}
	}

	fn parse_iri(&mut self, token: Token, span: Span) -> ParseResult<ast::Iri> {
		match token {
			Token::IriRef(iri_ref) => Ok(ast::Iri::IriRef(iri_ref)),
			Token::PrefixedName(name) => Ok(self.prefixed(name, span)),
			token => Self::unexpected(Some(token), span, IRI_EXPECTED),
		}
	}

	fn parse_verb(&mut self, token: Token, span: Span) -> ParseResult<Meta<ast::Verb, Span>> {
		match token {
			Token::Keyword(Keyword::A) => Ok(Meta(ast::Verb::A, span)),
			token => {
				let iri = self.parse_iri(token, span)?;
				Ok(Meta(ast::Verb::Predicate(iri), span))
			}
		}
	}

	fn at_verb_start(&mut self) -> ParseResult<bool> {
		Ok(matches!(
			self.peek()?,
			Meta(
				Some(Token::IriRef(_) | Token::PrefixedName(_) | Token::Keyword(Keyword::A)),
				_
			)
		))
	}

	/// Parses a `verb objectList (';' (verb objectList)?)*` list. The part
	/// after a semicolon is optional, so `;;` and a trailing `;` are
	/// accepted.
	#[allow(clippy::type_complexity)]
	fn parse_predicate_objects_list(
		&mut self,
	) -> ParseResult<Meta<ast::PredicateObjectsList, Span>> {
		let first = self.parse_predicate_objects()?;
		let mut span = *first.metadata();
		let mut list = vec![first];

		while matches!(self.peek()?, Meta(Some(Token::Punct(Punct::Semicolon)), _)) {
			self.next_token()?;
			if self.at_verb_start()? {
				let po = self.parse_predicate_objects()?;
				span.append(*po.metadata());
				list.push(po);
			}
		}

		Ok(Meta(list, span))
	}

	fn parse_predicate_objects(&mut self) -> ParseResult<Meta<ast::PredicateObjects, Span>> {
		let Meta(token, token_span) = self.expect_token(VERB_EXPECTED)?;
		let verb = self.parse_verb(token, token_span)?;
		let objects = self.parse_objects()?;

		let mut span = *verb.metadata();
		span.append(*objects.metadata());
		Ok(Meta(ast::PredicateObjects { verb, objects }, span))
	}

	/// Parses a non empty comma separated list of objects.
	fn parse_objects(&mut self) -> ParseResult<Meta<ast::Objects, Span>> {
		let Meta(token, token_span) = self.expect_token(OBJECT_EXPECTED)?;
		let object = self.parse_object(token, token_span)?;
		let mut span = *object.metadata();
		let mut objects = vec![object];

		while matches!(self.peek()?, Meta(Some(Token::Punct(Punct::Comma)), _)) {
			self.next_token()?;
			let Meta(token, token_span) = self.expect_token(OBJECT_EXPECTED)?;
			let object = self.parse_object(token, token_span)?;
			span.append(*object.metadata());
			objects.push(object);
		}

		Ok(Meta(ast::Objects(objects), span))
	}

	/// Parses the inside of a `[ … ]`, after the opening bracket. An empty
	/// list is the `ANON` token.
	#[allow(clippy::type_complexity)]
	fn parse_property_list_body(
		&mut self,
		mut span: Span,
	) -> ParseResult<Meta<ast::PredicateObjectsList, Span>> {
		if matches!(self.peek()?, Meta(Some(Token::End(Delimiter::Bracket)), _)) {
			let Meta(_, end) = self.next_token()?;
			span.append(end);
			return Ok(Meta(Vec::new(), span));
		}

		let Meta(list, _) = self.parse_predicate_objects_list()?;
		match self.next_token()? {
			Meta(Some(Token::End(Delimiter::Bracket)), end) => {
				span.append(end);
				Ok(Meta(list, span))
			}
			Meta(token, span) => Self::unexpected(token, span, &["closing `]`"]),
		}
	}

	/// Parses a collection, after the opening parenthesis.
	fn parse_collection(&mut self, mut span: Span) -> ParseResult<Meta<ast::Collection, Span>> {
		let mut objects = Vec::new();

		loop {
			match self.next_token()? {
				Meta(Some(Token::End(Delimiter::Parenthesis)), end) => {
					span.append(end);
					break;
				}
				Meta(Some(token), token_span) => {
					objects.push(self.parse_object(token, token_span)?);
				}
				Meta(None, end) => {
					return Self::unexpected(None, end, &["object", "closing `)`"]);
				}
			}
		}

		Ok(Meta(ast::Collection(objects), span))
	}
}

/// A subject that can also stand as a TriG graph label.
fn as_graph_label(
	subject: Meta<ast::Subject, Span>,
) -> Result<Meta<ast::GraphLabel, Span>, Meta<ast::Subject, Span>> {
	match subject {
		Meta(ast::Subject::Iri(iri), span) => Ok(Meta(ast::GraphLabel::Iri(iri), span)),
		Meta(ast::Subject::BlankNode(b), span) => {
			Ok(Meta(ast::GraphLabel::BlankNode(b), span))
		}
		other => Err(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn statements(input: &str, dialect: Dialect) -> Vec<ast::Statement> {
		let mut parser = Parser::new(input, dialect, None);
		let mut statements = Vec::new();
		while let Some((_, Meta(statement, _))) = parser.next_statement().expect("parse error") {
			statements.push(statement);
		}

		statements
	}

	#[test]
	fn directives_are_eager() {
		let mut parser = Parser::new("@prefix ex: <http://ex/> . ex:a ex:b ex:c .", Dialect::Turtle, None);
		let (_, first) = parser.next_statement().expect("parse error").expect("eof");
		assert!(matches!(first.value(), ast::Statement::Directive(_)));
		let (scope, second) = parser.next_statement().expect("parse error").expect("eof");
		assert_eq!(scope.prefix("ex"), Some("http://ex/"));
		assert!(matches!(second.value(), ast::Statement::Triples(_)));
		assert!(parser.warnings().is_empty());
	}

	#[test]
	fn undefined_prefix_warns_and_continues() {
		let mut parser = Parser::new(":a :b :c .", Dialect::Turtle, None);
		while parser.next_statement().expect("parse error").is_some() {}
		assert_eq!(parser.warnings().len(), 3);
	}

	#[test]
	fn trailing_semicolon_is_accepted() {
		let statements = statements("<s> <p> <o> ; .", Dialect::Turtle);
		assert_eq!(statements.len(), 1);
	}

	#[test]
	fn directives_are_rejected_in_ntriples() {
		let mut parser = Parser::new("@prefix ex: <http://ex/> .", Dialect::NTriples, None);
		assert!(parser.next_statement().is_err());
	}

	#[test]
	fn single_quotes_are_rejected_in_ntriples() {
		let mut parser = Parser::new("<s> <p> 'x' .", Dialect::NTriples, None);
		assert!(parser.next_statement().is_err());
	}

	#[test]
	fn graph_blocks_are_rejected_in_turtle() {
		let mut parser = Parser::new("<g> { <s> <p> <o> . }", Dialect::Turtle, None);
		assert!(parser.next_statement().is_err());
	}

	#[test]
	fn trig_graph_shapes() {
		let statements = statements(
			"<g> { <s> <p> <o> } GRAPH <h> { <s> <p> <o> . } { <s> <p> <o> . }",
			Dialect::TriG,
		);
		assert_eq!(statements.len(), 3);
		assert!(matches!(&statements[0], ast::Statement::Graph(g) if g.label.is_some()));
		assert!(matches!(&statements[1], ast::Statement::Graph(g) if g.label.is_some()));
		assert!(matches!(&statements[2], ast::Statement::Graph(g) if g.label.is_none()));
	}

	#[test]
	fn nquads_graph_label() {
		let statements = statements("<s> <p> <o> <g> .\n<s> <p> <o> .", Dialect::NQuads);
		assert_eq!(statements.len(), 2);
		assert!(matches!(&statements[0], ast::Statement::Graph(_)));
		assert!(matches!(&statements[1], ast::Statement::Triples(_)));
	}

	#[test]
	fn comment_statements_surface() {
		let statements = statements("# note\n<s> <p> <o> .", Dialect::Turtle);
		assert!(matches!(&statements[0], ast::Statement::Comment(text) if text == " note"));
		assert!(matches!(&statements[1], ast::Statement::Triples(_)));
	}

	#[test]
	fn document_collects_statements() {
		let mut parser = Parser::new(
			"@prefix ex: <http://ex/> .\nex:a ex:b ex:c .",
			Dialect::Turtle,
			None,
		);
		let document = parser.document().expect("parse error");
		assert_eq!(document.statements.len(), 2);
	}
}
