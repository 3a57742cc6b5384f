use std::path::Path;
use turtle_canon::{parse_turtle, ParseOptions};

fn parse<P: AsRef<Path>>(path: P) {
	stderrlog::new().init().ok();
	match std::fs::read_to_string(&path) {
		Ok(buffer) => {
			let mut out = Vec::new();
			match parse_turtle(&buffer, &mut out, &ParseOptions::default()) {
				Ok(_) => (), // success!
				Err(e) => {
					log::error!("parse error: {}", e);
					panic!("parse error: {:?}", e)
				}
			}
		}
		Err(e) => {
			log::error!("unable to read file `{}`: {}", path.as_ref().display(), e);
			panic!("IO error: {:?}", e)
		}
	}
}

#[test]
fn p01() {
	parse("tests/positive/01.ttl")
}

#[test]
fn p02() {
	parse("tests/positive/02.ttl")
}

#[test]
fn p03() {
	parse("tests/positive/03.ttl")
}

#[test]
fn p04() {
	parse("tests/positive/04.ttl")
}

#[test]
fn p05() {
	parse("tests/positive/05.ttl")
}

#[test]
fn p06() {
	parse("tests/positive/06.ttl")
}
