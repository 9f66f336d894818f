//! Generates the fixture constant modules into `OUT_DIR`.

use rhizome_constgen_codegen::{RustEmitter, generate};
use rhizome_constgen_schema::Schema;
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

const FIXTURES: &[&str] = &["scenarios", "dwarf"];

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    for name in FIXTURES {
        let path = PathBuf::from("fixtures").join(format!("{name}.json"));
        println!("cargo:rerun-if-changed={}", path.display());

        let schema = Schema::from_file(&path)?;
        let code = generate(&schema, &RustEmitter)?;
        fs::write(out_dir.join(format!("{name}.rs")), code)?;
    }

    Ok(())
}
