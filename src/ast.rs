//! Syntax elements of the Turtle family.
//!
//! One variant per grammar production; the tree is a flat sum type walked
//! by the emitter.

use iref::IriRefBuf;
use langtag::LanguageTagBuf;
use locspan::{Meta, Span};

pub use crate::lexing::{Numeric as NumericLiteral, Quote, StringLiteral};

/// A parsed document.
#[derive(Debug, Default)]
pub struct Document {
	pub statements: Vec<Meta<Statement, Span>>,
}

impl Document {
	pub fn new() -> Self { Self::default() }

	pub fn insert(&mut self, statement: Meta<Statement, Span>) {
		self.statements.push(statement)
	}
}

/// A statement: directive, triples declaration, graph block or trivia.
#[derive(Debug)]
pub enum Statement {
	/// Directive.
	Directive(Directive),

	/// Triples declaration.
	Triples(Triples),

	/// TriG graph block (also carries N-Quads graph labels).
	Graph(GraphBlock),

	/// Standalone comment.
	Comment(String),

	/// Blank source line.
	BlankLine,
}

/// A directive.
#[derive(Debug)]
pub enum Directive {
	/// `@prefix` directive.
	Prefix(Meta<String, Span>, Meta<IriRefBuf, Span>),

	/// `@base` directive.
	Base(Meta<IriRefBuf, Span>),

	/// SPARQL `PREFIX` directive.
	SparqlPrefix(Meta<String, Span>, Meta<IriRefBuf, Span>),

	/// SPARQL `BASE` directive.
	SparqlBase(Meta<IriRefBuf, Span>),
}

/// A triples declaration: either a subject with its predicate-object list,
/// or a blank node property list whose own list is optional.
#[derive(Debug)]
pub enum Triples {
	Subject(Meta<Subject, Span>, PredicateObjectsList),
	Blank(Meta<PredicateObjectsList, Span>, Option<PredicateObjectsList>),
}

/// A `label? { … }` graph block.
#[derive(Debug)]
pub struct GraphBlock {
	pub label: Option<Meta<GraphLabel, Span>>,
	pub body: Vec<Meta<Triples, Span>>,
}

#[derive(Debug)]
pub enum GraphLabel {
	Iri(Iri),
	BlankNode(BlankNode),
}

pub type PredicateObjectsList = Vec<Meta<PredicateObjects, Span>>;

#[derive(Debug)]
pub struct PredicateObjects {
	pub verb: Meta<Verb, Span>,
	pub objects: Meta<Objects, Span>,
}

/// Non empty list of objects.
#[derive(Debug)]
pub struct Objects(pub Vec<Meta<Object, Span>>);

/// Verb (either `a` or a predicate).
#[derive(Debug)]
pub enum Verb {
	/// `a` keyword.
	A,

	/// Predicate.
	Predicate(Iri),
}

/// Subject of a triples declaration.
#[derive(Debug)]
pub enum Subject {
	Iri(Iri),
	BlankNode(BlankNode),
	Collection(Collection),
}

/// Object of a triples declaration.
#[derive(Debug)]
pub enum Object {
	Iri(Iri),
	BlankNode(BlankNode),
	Collection(Collection),
	BlankNodePropertyList(Meta<PredicateObjectsList, Span>),
	Literal(Literal),
}

/// An IRI reference or a prefixed name.
#[derive(Debug)]
pub enum Iri {
	IriRef(IriRefBuf),
	Prefixed { prefix: String, local: String },
}

/// A labelled blank node or `ANON`.
#[derive(Debug)]
pub enum BlankNode {
	Label(String),
	Anonymous,
}

/// Collection of objects.
#[derive(Debug)]
pub struct Collection(pub Vec<Meta<Object, Span>>);

/// Literal value.
#[derive(Debug)]
pub enum Literal {
	/// RDF literal.
	Rdf(RdfLiteral),

	/// Numeric literal.
	Numeric(NumericLiteral),

	/// Boolean literal.
	Boolean(bool),
}

/// A string literal with an optional language tag or datatype.
#[derive(Debug)]
pub struct RdfLiteral {
	pub value: Meta<StringLiteral, Span>,
	pub suffix: Option<LiteralSuffix>,
}

#[derive(Debug)]
pub enum LiteralSuffix {
	LangTag(Meta<LanguageTagBuf, Span>),
	Datatype(Meta<Iri, Span>),
}
