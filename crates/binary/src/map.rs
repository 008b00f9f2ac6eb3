use std::collections::BTreeMap;

use elf::abi::{PF_R, PF_W, PF_X};

/// Access permissions of a mapped segment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl Permissions {
    /// Permissions of an ELF program header with the given `p_flags`.
    pub fn from_segment_flags(flags: u32) -> Self {
        Self {
            read: flags & PF_R != 0,
            write: flags & PF_W != 0,
            execute: flags & PF_X != 0,
        }
    }
}

/// Renders as three characters, for example `"r x"` for a readable and executable segment.
impl std::fmt::Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { ' ' };
        write!(
            f,
            "{}{}{}",
            flag(self.read, 'r'),
            flag(self.write, 'w'),
            flag(self.execute, 'x')
        )
    }
}

/// A region of memory backed by a range of the binary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap {
    pub virtual_address: u64,

    /// Size of the region in memory. Bytes past `file_size` are zero filled.
    pub size: u64,
    pub permissions: Permissions,

    /// Name of the file backing the region.
    pub file: String,
    pub file_offset: u64,
    pub file_size: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ThreadState {
    Running,
}

impl std::fmt::Display for ThreadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("Running"),
        }
    }
}

/// Initial state of a thread when the binary is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDescriptor {
    pub state: ThreadState,
    pub registers: BTreeMap<&'static str, u64>,
}
