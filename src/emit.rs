//! AST evaluation: shorthand expansion and canonical line emission.
//!
//! The emitter walks one statement at a time, expands predicate-object
//! lists, object lists, collections and blank node property lists into
//! plain triples, renames blank nodes to the canonical `_:bN` scheme and
//! writes one N-Triples (or N-Quads, with a graph label) line per triple.

use std::collections::HashMap;
use std::fmt;
use std::io;

use iref::Iri;
use locspan::Meta;
use static_iref::iri;

use crate::ast;
use crate::scope::Scope;

const RDF_TYPE: Iri<'static> = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
const RDF_NIL: Iri<'static> = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#nil");
const RDF_FIRST: Iri<'static> = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#first");
const RDF_REST: Iri<'static> = iri!("http://www.w3.org/1999/02/22-rdf-syntax-ns#rest");
const XSD_BOOLEAN: Iri<'static> = iri!("http://www.w3.org/2001/XMLSchema#boolean");
const XSD_INTEGER: Iri<'static> = iri!("http://www.w3.org/2001/XMLSchema#integer");
const XSD_DECIMAL: Iri<'static> = iri!("http://www.w3.org/2001/XMLSchema#decimal");
const XSD_DOUBLE: Iri<'static> = iri!("http://www.w3.org/2001/XMLSchema#double");

/// Statement evaluator writing canonical lines to a sink.
///
/// The blank node counter and relabelling map span the whole document, so
/// a label renames identically everywhere and two distinct anonymous
/// nodes never collide.
pub struct Emitter<W> {
	sink: W,
	blanks: HashMap<String, u64>,
	next_blank: u64,
	triples: u64,
}

impl<W: io::Write> Emitter<W> {
	pub fn new(sink: W) -> Self {
		Self {
			sink,
			blanks: HashMap::new(),
			next_blank: 0,
			triples: 0,
		}
	}

	/// Number of triples written so far.
	pub fn triple_count(&self) -> u64 { self.triples }

	/// Evaluates one statement against the scope that was current when it
	/// was parsed. Directives and trivia emit nothing.
	pub fn statement(&mut self, scope: &Scope, statement: &ast::Statement) -> io::Result<()> {
		match statement {
			ast::Statement::Triples(t) => self.triples_clause(scope, None, t),
			ast::Statement::Graph(g) => self.graph(scope, g),
			ast::Statement::Directive(_)
			| ast::Statement::Comment(_)
			| ast::Statement::BlankLine => Ok(()),
		}
	}

	fn graph(&mut self, scope: &Scope, graph: &ast::GraphBlock) -> io::Result<()> {
		let label = match &graph.label {
			Some(Meta(label, _)) => Some(self.graph_label(scope, label)),
			None => None,
		};

		for Meta(t, _) in &graph.body {
			self.triples_clause(scope, label.as_deref(), t)?;
		}

		Ok(())
	}

	fn graph_label(&mut self, scope: &Scope, label: &ast::GraphLabel) -> String {
		match label {
			ast::GraphLabel::Iri(iri) => iri_term(scope, iri),
			ast::GraphLabel::BlankNode(b) => self.blank_term(b),
		}
	}

	fn triples_clause(
		&mut self,
		scope: &Scope,
		graph: Option<&str>,
		triples: &ast::Triples,
	) -> io::Result<()> {
		match triples {
			ast::Triples::Subject(subject, po_list) => {
				let subject = self.subject_term(scope, graph, subject.value())?;
				self.predicate_objects(scope, graph, &subject, po_list)
			}
			ast::Triples::Blank(Meta(list, _), po_list) => {
				let subject = self.fresh_blank();
				self.predicate_objects(scope, graph, &subject, list)?;
				match po_list {
					Some(po_list) => self.predicate_objects(scope, graph, &subject, po_list),
					None => Ok(()),
				}
			}
		}
	}

	/// Expands a predicate-object list: one triple per object per verb, in
	/// source order.
	fn predicate_objects(
		&mut self,
		scope: &Scope,
		graph: Option<&str>,
		subject: &str,
		list: &ast::PredicateObjectsList,
	) -> io::Result<()> {
		for Meta(po, _) in list {
			let predicate = verb_term(scope, po.verb.value());
			for Meta(object, _) in &po.objects.value().0 {
				let object = self.object_term(scope, graph, object)?;
				self.quad(subject, &predicate, &object, graph)?;
			}
		}

		Ok(())
	}

	fn subject_term(
		&mut self,
		scope: &Scope,
		graph: Option<&str>,
		subject: &ast::Subject,
	) -> io::Result<String> {
		match subject {
			ast::Subject::Iri(iri) => Ok(iri_term(scope, iri)),
			ast::Subject::BlankNode(b) => Ok(self.blank_term(b)),
			ast::Subject::Collection(c) => self.collection_term(scope, graph, c),
		}
	}

	fn object_term(
		&mut self,
		scope: &Scope,
		graph: Option<&str>,
		object: &ast::Object,
	) -> io::Result<String> {
		match object {
			ast::Object::Iri(iri) => Ok(iri_term(scope, iri)),
			ast::Object::BlankNode(b) => Ok(self.blank_term(b)),
			ast::Object::Collection(c) => self.collection_term(scope, graph, c),
			ast::Object::BlankNodePropertyList(Meta(list, _)) => {
				let subject = self.fresh_blank();
				self.predicate_objects(scope, graph, &subject, list)?;
				Ok(subject)
			}
			ast::Object::Literal(l) => Ok(self.literal_term(scope, l)),
		}
	}

	/// Expands `(o₁ … oₙ)` into an `rdf:first`/`rdf:rest` chain and
	/// returns the head term. The empty collection is `rdf:nil`.
	fn collection_term(
		&mut self,
		scope: &Scope,
		graph: Option<&str>,
		collection: &ast::Collection,
	) -> io::Result<String> {
		if collection.0.is_empty() {
			return Ok(format!("<{}>", RDF_NIL));
		}

		let nodes: Vec<String> = collection.0.iter().map(|_| self.fresh_blank()).collect();
		let first = format!("<{}>", RDF_FIRST);
		let rest = format!("<{}>", RDF_REST);

		for (i, Meta(object, _)) in collection.0.iter().enumerate() {
			let item = self.object_term(scope, graph, object)?;
			self.quad(&nodes[i], &first, &item, graph)?;

			let tail = match nodes.get(i + 1) {
				Some(node) => node.clone(),
				None => format!("<{}>", RDF_NIL),
			};
			self.quad(&nodes[i], &rest, &tail, graph)?;
		}

		Ok(nodes[0].clone())
	}

	fn literal_term(&mut self, scope: &Scope, literal: &ast::Literal) -> String {
		match literal {
			ast::Literal::Rdf(literal) => {
				let mut term = format!("\"{}\"", StringBody(&literal.value.value().text));
				match &literal.suffix {
					None => (),
					Some(ast::LiteralSuffix::LangTag(Meta(tag, _))) => {
						term.push('@');
						term.push_str(&tag.to_string());
					}
					Some(ast::LiteralSuffix::Datatype(Meta(iri, _))) => {
						term.push_str("^^");
						term.push_str(&iri_term(scope, iri));
					}
				}

				term
			}
			ast::Literal::Numeric(n) => {
				let datatype = match n {
					ast::NumericLiteral::Integer(_) => XSD_INTEGER,
					ast::NumericLiteral::Decimal(_) => XSD_DECIMAL,
					ast::NumericLiteral::Double(_) => XSD_DOUBLE,
				};

				format!("\"{}\"^^<{}>", StringBody(n.as_str()), datatype)
			}
			ast::Literal::Boolean(b) => {
				let value = if *b { "true" } else { "false" };
				format!("\"{}\"^^<{}>", value, XSD_BOOLEAN)
			}
		}
	}

	/// Canonical label for an explicit blank node label. The same source
	/// label always maps to the same `_:bN`.
	fn blank_term(&mut self, blank: &ast::BlankNode) -> String {
		match blank {
			ast::BlankNode::Label(label) => match self.blanks.get(label) {
				Some(n) => format!("_:b{}", n),
				None => {
					let n = self.next_blank;
					self.next_blank += 1;
					self.blanks.insert(label.clone(), n);
					format!("_:b{}", n)
				}
			},
			ast::BlankNode::Anonymous => self.fresh_blank(),
		}
	}

	/// Allocates a fresh blank node label.
	fn fresh_blank(&mut self) -> String {
		let n = self.next_blank;
		self.next_blank += 1;
		format!("_:b{}", n)
	}

	/// Writes one canonical line.
	fn quad(&mut self, s: &str, p: &str, o: &str, graph: Option<&str>) -> io::Result<()> {
		let mut line = String::with_capacity(s.len() + p.len() + o.len() + 8);
		line.push_str(s);
		line.push(' ');
		line.push_str(p);
		line.push(' ');
		line.push_str(o);
		if let Some(graph) = graph {
			line.push(' ');
			line.push_str(graph);
		}
		line.push_str(" .\n");

		self.sink.write_all(line.as_bytes())?;
		self.triples += 1;
		Ok(())
	}
}

fn iri_term(scope: &Scope, iri: &ast::Iri) -> String {
	let expanded = match iri {
		ast::Iri::IriRef(iri_ref) => scope.expand_iri_ref(&iri_ref.to_string()),
		ast::Iri::Prefixed { prefix, local } => scope.expand_prefixed(prefix, local),
	};

	format!("<{}>", IriBody(&expanded))
}

fn verb_term(scope: &Scope, verb: &ast::Verb) -> String {
	match verb {
		ast::Verb::A => format!("<{}>", RDF_TYPE),
		ast::Verb::Predicate(iri) => iri_term(scope, iri),
	}
}

/// Displays a string literal body with canonical escapes: the double
/// quote is re-emitted as `\"`.
struct StringBody<'a>(&'a str);

impl<'a> fmt::Display for StringBody<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for c in self.0.chars() {
			match c {
				'"' => write!(f, "\\\"")?,
				'\\' => write!(f, "\\\\")?,
				'\n' => write!(f, "\\n")?,
				'\r' => write!(f, "\\r")?,
				'\t' => write!(f, "\\t")?,
				'\u{08}' => write!(f, "\\b")?,
				'\u{0c}' => write!(f, "\\f")?,
				c => c.fmt(f)?,
			}
		}

		Ok(())
	}
}

/// Displays an IRI body, masking the characters forbidden in an IRIREF as
/// `\uXXXX`; in this context the double quote becomes `\u0022`.
struct IriBody<'a>(&'a str);

impl<'a> fmt::Display for IriBody<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for c in self.0.chars() {
			if crate::chars::is_iri_char(c) {
				c.fmt(f)?
			} else {
				write!(f, "\\u{:04X}", c as u32)?
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn string_body_escapes() {
		assert_eq!(StringBody("a\"\"b").to_string(), "a\\\"\\\"b");
		assert_eq!(StringBody("line\nbreak\ttab\\").to_string(), "line\\nbreak\\ttab\\\\");
		assert_eq!(StringBody("plain 'quotes'").to_string(), "plain 'quotes'");
	}

	#[test]
	fn iri_body_masks_forbidden_characters() {
		assert_eq!(IriBody("http://ex/a").to_string(), "http://ex/a");
		assert_eq!(IriBody("http://ex/a\"b c").to_string(), "http://ex/a\\u0022b\\u0020c");
	}

	#[test]
	fn quote_duality() {
		// the same code point masks differently in the two contexts
		assert_eq!(StringBody("\"").to_string(), "\\\"");
		assert_eq!(IriBody("\"").to_string(), "\\u0022");
	}
}
