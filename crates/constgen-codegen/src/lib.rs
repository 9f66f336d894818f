//! Code generation from constant-group schemas.
//!
//! The schema walk lives in [`generate`]; target syntax is isolated behind the
//! [`Emitter`] trait. Two emitters are provided:
//!
//! - [`CppEmitter`]: `struct` + `constexpr` constants, `std::array` static
//!   lists and `constexpr` lookup functions that assert on a miss.
//! - [`RustEmitter`]: `pub struct` + `pub const` items, with `try_get_*`
//!   returning a generated `LookupMiss` error and panicking `get_*`.

mod cpp;
mod emitter;
mod generate;
mod rust;
mod target;

pub use cpp::CppEmitter;
pub use emitter::Emitter;
pub use generate::{CodegenError, generate, generate_group};
pub use rust::RustEmitter;
pub use target::Target;
