//! Loading of executable containers.
//!
//! A [Binary] is selected by the magic number at the start of the file and validated completely
//! when it is loaded. Once loaded it describes the memory the program expects to be mapped
//! ([MemoryMap]) and the initial state of its threads ([ThreadDescriptor]).
//!
//! Supported formats are ELF and the DECREE (CGC) variant of ELF.

mod binary;
mod error;
mod map;

pub use binary::*;
pub use error::*;
pub use map::*;

#[cfg(test)]
mod tests;
