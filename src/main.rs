use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use turtle_canon::{
	parse_nquads, parse_ntriples, parse_trig, parse_turtle, report, Dialect, ParseOptions,
};

/// Parses a Turtle, TriG, N-Triples or N-Quads file and prints it as
/// canonical N-Triples/N-Quads lines.
#[derive(Parser)]
#[command(name = "ttlcanon", disable_version_flag = true)]
struct Args {
	/// Only validate the input; nothing is printed.
	#[arg(short = 'v', long)]
	validate: bool,

	/// Output format: `N3` for canonical lines, `raw` to echo the
	/// validated input unchanged.
	#[arg(long, default_value = "N3")]
	out: String,

	/// Log statistics to stderr.
	#[arg(long)]
	verbose: bool,

	/// Print the version and exit.
	#[arg(long)]
	version: bool,

	/// Input file; the dialect follows its extension
	/// (`.ttl`, `.trig`, `.nt`, `.nq`).
	file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Output {
	Canonical,
	Raw,
}

fn dialect_of(path: &Path) -> Dialect {
	match path.extension().and_then(|e| e.to_str()) {
		Some("trig") => Dialect::TriG,
		Some("nt") => Dialect::NTriples,
		Some("nq") | Some("nquads") => Dialect::NQuads,
		_ => Dialect::Turtle,
	}
}

fn main() {
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) => {
			let _ = e.print();
			if e.kind() == clap::error::ErrorKind::DisplayHelp {
				process::exit(0);
			}

			process::exit(1);
		}
	};

	if args.version {
		println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
		process::exit(2);
	}

	stderrlog::new()
		.verbosity(if args.verbose { 2 } else { 0 })
		.init()
		.ok();

	let output = if args.out.eq_ignore_ascii_case("n3") {
		Output::Canonical
	} else if args.out.eq_ignore_ascii_case("raw") {
		Output::Raw
	} else {
		eprintln!("unknown output format `{}`", args.out);
		process::exit(1);
	};

	let Some(file) = args.file else {
		eprintln!("missing input file");
		process::exit(1);
	};

	let input = match fs::read_to_string(&file) {
		Ok(input) => input,
		Err(e) => {
			eprintln!("unable to read `{}`: {}", file.display(), e);
			process::exit(1);
		}
	};

	let mut files = SimpleFiles::new();
	let file_id = files.add(file.display().to_string(), input.clone());

	let options = ParseOptions {
		// raw output only needs recognition; the canonical evaluator is
		// bypassed
		validate: args.validate || output == Output::Raw,
		base: None,
		worker: !args.validate,
	};

	let mut sink = BufWriter::new(io::stdout());

	let result = match dialect_of(&file) {
		Dialect::Turtle => parse_turtle(&input, &mut sink, &options),
		Dialect::TriG => parse_trig(&input, &mut sink, &options),
		Dialect::NTriples => parse_ntriples(&input, &mut sink, &options),
		Dialect::NQuads => parse_nquads(&input, &mut sink, &options),
	};

	let writer = StandardStream::stderr(ColorChoice::Auto);
	let config = term::Config::default();

	match result {
		Ok(stats) => {
			for warning in &stats.warnings {
				let diagnostic = report::warning_diagnostic(file_id, warning);
				let _ = term::emit(&mut writer.lock(), &config, &files, &diagnostic);
			}

			if output == Output::Raw && !args.validate {
				if let Err(e) = sink.write_all(input.as_bytes()) {
					eprintln!("unable to write output: {}", e);
					process::exit(1);
				}
			}

			if let Err(e) = sink.flush() {
				eprintln!("unable to write output: {}", e);
				process::exit(1);
			}

			log::info!(
				"{}: {} statements, {} triples",
				file.display(),
				stats.statements,
				stats.triples
			);
		}
		Err(e) => {
			let diagnostic = report::error_diagnostic(file_id, &e);
			let _ = term::emit(&mut writer.lock(), &config, &files, &diagnostic);
			process::exit(1);
		}
	}
}
