use std::str::FromStr;

use crate::error::Error;

/// Static description of the registers of a machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisterLayout {
    /// Register names and widths in bits. Flags have a width of `1`.
    pub registers: &'static [(&'static str, usize)],
    pub program_counter: &'static str,
    pub stack_pointer: &'static str,
}

impl RegisterLayout {
    pub fn width(&self, name: &str) -> Option<usize> {
        self.registers
            .iter()
            .find(|(register, _)| *register == name)
            .map(|(_, width)| *width)
    }
}

static I386: RegisterLayout = RegisterLayout {
    registers: &[
        ("EAX", 32),
        ("EBX", 32),
        ("ECX", 32),
        ("EDX", 32),
        ("ESI", 32),
        ("EDI", 32),
        ("EBP", 32),
        ("ESP", 32),
        ("EIP", 32),
        ("CS", 16),
        ("DS", 16),
        ("ES", 16),
        ("FS", 16),
        ("GS", 16),
        ("SS", 16),
        ("CF", 1),
        ("PF", 1),
        ("AF", 1),
        ("ZF", 1),
        ("SF", 1),
        ("DF", 1),
        ("OF", 1),
    ],
    program_counter: "EIP",
    stack_pointer: "ESP",
};

static AMD64: RegisterLayout = RegisterLayout {
    registers: &[
        ("RAX", 64),
        ("RBX", 64),
        ("RCX", 64),
        ("RDX", 64),
        ("RSI", 64),
        ("RDI", 64),
        ("RBP", 64),
        ("RSP", 64),
        ("R8", 64),
        ("R9", 64),
        ("R10", 64),
        ("R11", 64),
        ("R12", 64),
        ("R13", 64),
        ("R14", 64),
        ("R15", 64),
        ("RIP", 64),
        ("FS_BASE", 64),
        ("GS_BASE", 64),
        ("CF", 1),
        ("PF", 1),
        ("AF", 1),
        ("ZF", 1),
        ("SF", 1),
        ("DF", 1),
        ("OF", 1),
    ],
    program_counter: "RIP",
    stack_pointer: "RSP",
};

static ARMV7: RegisterLayout = RegisterLayout {
    registers: &[
        ("R0", 32),
        ("R1", 32),
        ("R2", 32),
        ("R3", 32),
        ("R4", 32),
        ("R5", 32),
        ("R6", 32),
        ("R7", 32),
        ("R8", 32),
        ("R9", 32),
        ("R10", 32),
        ("R11", 32),
        ("R12", 32),
        ("SP", 32),
        ("LR", 32),
        ("PC", 32),
        ("APSR_N", 1),
        ("APSR_Z", 1),
        ("APSR_C", 1),
        ("APSR_V", 1),
    ],
    program_counter: "PC",
    stack_pointer: "SP",
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Architecture {
    I386,
    Amd64,
    Armv7,
}

impl Architecture {
    pub const ALL: [Self; 3] = [Self::I386, Self::Amd64, Self::Armv7];

    /// Machine name as reported by binary loaders.
    pub fn name(&self) -> &'static str {
        match self {
            Self::I386 => "i386",
            Self::Amd64 => "amd64",
            Self::Armv7 => "armv7",
        }
    }

    pub fn layout(&self) -> &'static RegisterLayout {
        match self {
            Self::I386 => &I386,
            Self::Amd64 => &AMD64,
            Self::Armv7 => &ARMV7,
        }
    }

    /// Size of a machine word in bytes.
    pub fn word_size(&self) -> u64 {
        match self {
            Self::I386 | Self::Armv7 => 4,
            Self::Amd64 => 8,
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(machine: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.name() == machine)
            .ok_or_else(|| Error::UnsupportedMachine {
                machine: machine.to_owned(),
            })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    Linux,
}

impl OperatingSystem {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
        }
    }
}

impl std::fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatingSystem {
    type Err = Error;

    fn from_str(os: &str) -> Result<Self, Self::Err> {
        match os {
            "linux" => Ok(Self::Linux),
            _ => Err(Error::UnsupportedOperatingSystem { os: os.to_owned() }),
        }
    }
}
