//! Diagnostic rendering for parse errors and warnings.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use locspan::{Meta, Span};

use crate::error::{ParseError, Warning};

fn range(span: Span) -> std::ops::Range<usize> { span.into() }

/// Renders a parse failure as a diagnostic: cursor position, marker and
/// the set of alternatives that were open at that point.
pub fn error_diagnostic(file_id: usize, error: &ParseError) -> Diagnostic<usize> {
	let diagnostic = Diagnostic::error().with_message(error.to_string());

	match error {
		ParseError::Syntax(Meta(e, span)) => {
			let mut diagnostic =
				diagnostic.with_labels(vec![Label::primary(file_id, range(*span))]);
			let expected = e.expected();
			if !expected.is_empty() {
				diagnostic =
					diagnostic.with_notes(vec![format!("expected {}", expected.join(", "))]);
			}

			diagnostic
		}
		ParseError::Io(_) => diagnostic,
	}
}

/// Renders a warning with the same context format as errors; warnings go
/// to a side channel and never halt parsing.
pub fn warning_diagnostic(file_id: usize, warning: &Meta<Warning, Span>) -> Diagnostic<usize> {
	let Meta(warning, span) = warning;
	Diagnostic::warning()
		.with_message(warning.to_string())
		.with_labels(vec![Label::primary(file_id, range(*span))])
}
