//! Constant sets generated by constgen at build time.
//!
//! `build.rs` runs the Rust emitter over `fixtures/*.json`; the resulting
//! modules are compiled here so tests can exercise the generated constants,
//! static lists and lookups directly.

/// Scenario constants: a lookup group, plain groups and a reordered layout.
pub mod scenarios {
    include!(concat!(env!("OUT_DIR"), "/scenarios.rs"));
}

/// DWARF tag, children, attribute and form codes.
pub mod dwarf {
    pub use crate::DwarfType;

    include!(concat!(env!("OUT_DIR"), "/dwarf.rs"));
}

/// How an attribute value encoded with a given DWARF form is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwarfType {
    Zero,
    One,
    Two,
    Four,
    Eight,
    /// Address size of the current section
    DwarfAddr,
    /// Address size of the object file
    MachineAddr,
    String,
    StringPtr,
    Leb128,
    Uleb128,
    Indirect,
    Exprloc,
}

impl DwarfType {
    /// Returns the encoded size in bytes, if it does not depend on context.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            DwarfType::Zero => Some(0),
            DwarfType::One => Some(1),
            DwarfType::Two => Some(2),
            DwarfType::Four => Some(4),
            DwarfType::Eight => Some(8),
            _ => None,
        }
    }
}
