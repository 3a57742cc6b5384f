use std::fmt;
use std::io;

use locspan::{Meta, Span};

use crate::parsing::SyntaxError;

/// Failure of a whole parse run.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	/// Recognition failure; carries the position it happened at.
	#[error("{}", .0.value())]
	Syntax(Meta<SyntaxError, Span>),

	/// I/O failure of the output sink.
	#[error(transparent)]
	Io(#[from] io::Error),
}

impl ParseError {
	/// Span of the failure, when it has one.
	pub fn span(&self) -> Option<Span> {
		match self {
			Self::Syntax(Meta(_, span)) => Some(*span),
			Self::Io(_) => None,
		}
	}
}

impl From<Meta<SyntaxError, Span>> for ParseError {
	fn from(e: Meta<SyntaxError, Span>) -> Self { Self::Syntax(e) }
}

/// Warning reported on the side channel; never halts parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
	/// A prefixed name used a namespace with no binding; it expands with
	/// the empty IRI.
	UndefinedPrefix(String),
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::UndefinedPrefix(prefix) => {
				write!(f, "undefined prefix `{}:`, expanding with the empty IRI", prefix)
			}
		}
	}
}
