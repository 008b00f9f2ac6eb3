//! Machine state for symbolic execution.
//!
//! ### Registers
//!
//! A [Register] is a fixed-width cell holding a [smt_ops::Value]. Writes are normalized so that the
//! stored value always fits the register: concrete integers are truncated to the register width and
//! single bit registers (flags) always hold a boolean. A [RegisterFile] is the set of named
//! registers owned by one execution state. Cloning a register file forks the state; formula nodes
//! are shared between the clones but the cells are not.
//!
//! ### Architectures and calling conventions
//!
//! [Architecture] provides the static register layout of each supported machine. [CpuFactory]
//! builds a [Cpu] for a machine name and resolves the [FunctionAbi] and [SyscallAbi] of an
//! (operating system, machine) pair.

mod abi;
mod arch;
mod cpu;
mod error;
mod regfile;
mod register;

pub use abi::*;
pub use arch::*;
pub use cpu::*;
pub use error::*;
pub use regfile::*;
pub use register::*;
