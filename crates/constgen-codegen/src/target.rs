//! Output language selection.

use crate::cpp::CppEmitter;
use crate::emitter::Emitter;
use crate::rust::RustEmitter;
use std::fmt;
use std::str::FromStr;

/// Languages the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// C++17 header
    #[default]
    Cpp,
    /// Rust module
    Rust,
}

impl Target {
    pub const ALL: &'static [Target] = &[Target::Cpp, Target::Rust];

    /// Returns the emitter for this target.
    pub fn emitter(self) -> Box<dyn Emitter> {
        match self {
            Target::Cpp => Box::new(CppEmitter),
            Target::Rust => Box::new(RustEmitter),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Cpp => "cpp",
            Target::Rust => "rust",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .iter()
            .copied()
            .find(|target| target.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown target: {s}"))
    }
}
