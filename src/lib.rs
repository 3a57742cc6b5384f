//! Turtle is a textual syntax for RDF that allows an RDF graph to be
//! completely written in a compact and natural text form, with
//! abbreviations for common usage patterns and datatypes. This library
//! parses the Turtle family of syntaxes — Turtle, TriG, N-Triples and
//! N-Quads — and renders the statements in the canonical line-oriented
//! N-Triples/N-Quads form, one statement per line, or validates the input
//! without emitting anything.
//!
//! Each dialect has its own entry point over the shared lexical core. In
//! emission mode a worker thread overlaps statement evaluation with
//! parsing while keeping the output in source order; pass
//! `worker: false` for trivial inputs where the queueing overhead is not
//! worth it.
//!
//! ```rust
//! use turtle_canon::{parse_turtle, ParseOptions};
//!
//! let turtle = "@prefix ex: <http://example.org/> . ex:a ex:b ex:c .";
//! let mut out = Vec::new();
//! let stats = parse_turtle(turtle, &mut out, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(stats.triples, 1);
//! assert_eq!(
//! 	String::from_utf8(out).unwrap(),
//! 	"<http://example.org/a> <http://example.org/b> <http://example.org/c> .\n"
//! );
//! ```
//!
//! Parse errors and warnings carry byte spans; the [`report`] module
//! turns them into [`codespan_reporting`] diagnostics:
//!
//! ```text
//! error: unexpected end of file
//!   ┌─ examples/syntax_error.ttl:5:34
//!   │
//! 5 │ <http://www.w3.org/TR/rdf-syntax-
//!   │                                  ^
//! ```

use std::io;
use std::thread;

use iref::IriBuf;
use locspan::{Meta, Span};

mod ast;
pub mod chars;
pub mod emit;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod scope;

pub use ast::*;
pub use emit::Emitter;
pub use error::{ParseError, Warning};
pub use parsing::{Dialect, Parser, SyntaxError};
pub use scope::Scope;

use pipeline::StatementQueue;

/// Options shared by the four entry points.
#[derive(Debug)]
pub struct ParseOptions {
	/// Only check recognition; nothing is written to the sink.
	pub validate: bool,

	/// Initial base IRI used to expand relative references.
	pub base: Option<IriBuf>,

	/// Evaluate statements on a worker thread. Defaults to on; inline
	/// evaluation is faster for short documents.
	pub worker: bool,
}

impl ParseOptions {
	pub fn new() -> Self {
		Self {
			validate: false,
			base: None,
			worker: true,
		}
	}
}

impl Default for ParseOptions {
	fn default() -> Self { Self::new() }
}

/// Outcome of a successful parse.
#[derive(Debug)]
pub struct ParseStats {
	/// Recognised statements (directives, triples clauses and graph
	/// blocks; trivia is not counted).
	pub statements: u64,

	/// Emitted triples. Zero in validation mode.
	pub triples: u64,

	/// Structured warnings, in source order.
	pub warnings: Vec<Meta<Warning, Span>>,
}

/// Parses a Turtle document, writing canonical N-Triples lines.
pub fn parse_turtle<W: io::Write + Send>(
	input: &str,
	sink: &mut W,
	options: &ParseOptions,
) -> Result<ParseStats, ParseError> {
	run(Dialect::Turtle, input, sink, options)
}

/// Parses a TriG document, writing canonical N-Quads lines.
pub fn parse_trig<W: io::Write + Send>(
	input: &str,
	sink: &mut W,
	options: &ParseOptions,
) -> Result<ParseStats, ParseError> {
	run(Dialect::TriG, input, sink, options)
}

/// Parses an N-Triples document, writing canonical N-Triples lines.
pub fn parse_ntriples<W: io::Write + Send>(
	input: &str,
	sink: &mut W,
	options: &ParseOptions,
) -> Result<ParseStats, ParseError> {
	run(Dialect::NTriples, input, sink, options)
}

/// Parses an N-Quads document, writing canonical N-Quads lines.
pub fn parse_nquads<W: io::Write + Send>(
	input: &str,
	sink: &mut W,
	options: &ParseOptions,
) -> Result<ParseStats, ParseError> {
	run(Dialect::NQuads, input, sink, options)
}

/// Counted by the statement statistics.
fn is_counted(statement: &Statement) -> bool {
	!matches!(statement, Statement::Comment(_) | Statement::BlankLine)
}

/// Can produce triples, so it goes through the evaluator.
fn emits(statement: &Statement) -> bool {
	matches!(statement, Statement::Triples(_) | Statement::Graph(_))
}

fn run<W: io::Write + Send>(
	dialect: Dialect,
	input: &str,
	sink: &mut W,
	options: &ParseOptions,
) -> Result<ParseStats, ParseError> {
	let mut parser = Parser::new(input, dialect, options.base.as_ref().map(|b| b.as_iri()));

	if options.validate {
		let mut statements = 0;
		while let Some((_, statement)) = parser.next_statement().map_err(ParseError::from)? {
			if is_counted(statement.value()) {
				statements += 1;
			}
		}

		return Ok(ParseStats {
			statements,
			triples: 0,
			warnings: parser.into_warnings(),
		});
	}

	if options.worker {
		run_pipelined(parser, sink)
	} else {
		run_inline(parser, sink)
	}
}

fn run_inline<W: io::Write>(
	mut parser: Parser,
	sink: &mut W,
) -> Result<ParseStats, ParseError> {
	let mut emitter = Emitter::new(sink);
	let mut statements = 0;

	while let Some((scope, statement)) = parser.next_statement().map_err(ParseError::from)? {
		if is_counted(statement.value()) {
			statements += 1;
		}

		emitter.statement(&scope, statement.value())?;
	}

	Ok(ParseStats {
		statements,
		triples: emitter.triple_count(),
		warnings: parser.into_warnings(),
	})
}

/// Emission through the statement pipeline. On end of input or on a parse
/// error the queue is shut down, the worker joined, and the tail drained
/// here so the output order matches single-threaded evaluation.
fn run_pipelined<W: io::Write + Send>(
	mut parser: Parser,
	sink: &mut W,
) -> Result<ParseStats, ParseError> {
	let queue = StatementQueue::new();
	let emitter = Emitter::new(sink);

	thread::scope(|s| {
		let queue = &queue;
		let handle = s.spawn(move || {
			let mut emitter = emitter;
			queue
				.work(|(scope, statement)| emitter.statement(scope, statement.value()))
				.map(|()| emitter)
		});

		let mut statements = 0;
		let outcome = loop {
			match parser.next_statement() {
				Ok(None) => break Ok(()),
				Ok(Some((scope, statement))) => {
					if is_counted(statement.value()) {
						statements += 1;
					}

					// the worker died on an I/O error; its failure
					// surfaces at join below
					if emits(statement.value()) && !queue.push((scope, statement)) {
						break Ok(());
					}
				}
				Err(e) => break Err(e),
			}
		};

		queue.shutdown();
		let mut emitter = match handle.join() {
			Ok(Ok(emitter)) => emitter,
			Ok(Err(e)) => return Err(ParseError::Io(e)),
			Err(_) => {
				return Err(ParseError::Io(io::Error::new(
					io::ErrorKind::Other,
					"evaluator thread panicked",
				)))
			}
		};

		for (scope, statement) in queue.drain() {
			emitter.statement(&scope, statement.value())?;
		}

		outcome.map_err(ParseError::from)?;

		Ok(ParseStats {
			statements,
			triples: emitter.triple_count(),
			warnings: parser.into_warnings(),
		})
	})
}
