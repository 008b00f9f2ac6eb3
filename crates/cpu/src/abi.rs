use smt_ops::Value;

use crate::arch::{Architecture, OperatingSystem};
use crate::cpu::Cpu;
use crate::error::{Error, Result};

/// Where a function argument is passed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArgumentLocation {
    Register(&'static str),

    /// Offset in bytes from the stack pointer at function entry.
    Stack { offset: u64 },
}

/// Calling convention of ordinary function calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FunctionAbi {
    name: &'static str,
    argument_registers: &'static [&'static str],
    return_register: &'static str,
    stack_pointer: &'static str,

    /// Offset of the first stack argument from the stack pointer at function entry.
    stack_base: u64,
    word_size: u64,
}

impl FunctionAbi {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn argument_location(&self, index: usize) -> ArgumentLocation {
        if let Some(register) = self.argument_registers.get(index) {
            return ArgumentLocation::Register(*register);
        }

        let stack_index = (index - self.argument_registers.len()) as u64;
        ArgumentLocation::Stack {
            offset: self.stack_base + stack_index * self.word_size,
        }
    }

    /// Locations of the first `count` arguments.
    pub fn argument_locations(&self, count: usize) -> impl Iterator<Item = ArgumentLocation> + '_ {
        (0..count).map(|index| self.argument_location(index))
    }

    pub fn return_register(&self) -> &'static str {
        self.return_register
    }

    pub fn stack_pointer(&self) -> &'static str {
        self.stack_pointer
    }
}

/// Register assignment of the system call interface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SyscallAbi {
    number_register: &'static str,
    argument_registers: &'static [&'static str],
    result_register: &'static str,
}

impl SyscallAbi {
    pub fn number_register(&self) -> &'static str {
        self.number_register
    }

    pub fn argument_registers(&self) -> &'static [&'static str] {
        self.argument_registers
    }

    pub fn result_register(&self) -> &'static str {
        self.result_register
    }

    pub fn syscall_number<'a, M>(&self, cpu: &'a Cpu<M>) -> Result<&'a Value> {
        cpu.read_register(self.number_register)
    }

    /// Values of the first `count` system call arguments.
    pub fn arguments<'a, M>(&self, cpu: &'a Cpu<M>, count: usize) -> Result<Vec<&'a Value>> {
        let registers = self
            .argument_registers
            .get(..count)
            .ok_or(Error::TooManyArguments {
                requested: count,
                available: self.argument_registers.len(),
            })?;

        registers
            .iter()
            .map(|register| cpu.read_register(register))
            .collect()
    }

    pub fn set_result<M>(&self, cpu: &mut Cpu<M>, value: impl Into<Value>) -> Result<()> {
        cpu.write_register(self.result_register, value)
    }
}

static FUNCTION_ABIS: &[(OperatingSystem, Architecture, FunctionAbi)] = &[
    (
        OperatingSystem::Linux,
        Architecture::I386,
        FunctionAbi {
            name: "cdecl",
            argument_registers: &[],
            return_register: "EAX",
            stack_pointer: "ESP",
            stack_base: 4,
            word_size: 4,
        },
    ),
    (
        OperatingSystem::Linux,
        Architecture::Amd64,
        FunctionAbi {
            name: "sysv",
            argument_registers: &["RDI", "RSI", "RDX", "RCX", "R8", "R9"],
            return_register: "RAX",
            stack_pointer: "RSP",
            stack_base: 8,
            word_size: 8,
        },
    ),
    (
        OperatingSystem::Linux,
        Architecture::Armv7,
        FunctionAbi {
            name: "aapcs",
            argument_registers: &["R0", "R1", "R2", "R3"],
            return_register: "R0",
            stack_pointer: "SP",
            stack_base: 0,
            word_size: 4,
        },
    ),
];

// https://man7.org/linux/man-pages/man2/syscall.2.html
static SYSCALL_ABIS: &[(OperatingSystem, Architecture, SyscallAbi)] = &[
    (
        OperatingSystem::Linux,
        Architecture::I386,
        SyscallAbi {
            number_register: "EAX",
            argument_registers: &["EBX", "ECX", "EDX", "ESI", "EDI", "EBP"],
            result_register: "EAX",
        },
    ),
    (
        OperatingSystem::Linux,
        Architecture::Amd64,
        SyscallAbi {
            number_register: "RAX",
            argument_registers: &["RDI", "RSI", "RDX", "R10", "R8", "R9"],
            result_register: "RAX",
        },
    ),
    (
        OperatingSystem::Linux,
        Architecture::Armv7,
        SyscallAbi {
            number_register: "R7",
            argument_registers: &["R0", "R1", "R2", "R3", "R4", "R5", "R6"],
            result_register: "R0",
        },
    ),
];

/// Builds cpus and resolves calling conventions by machine and operating system name.
#[derive(Debug, Copy, Clone, Default)]
pub struct CpuFactory;

impl CpuFactory {
    /// Creates a cpu for the named machine operating on `memory`.
    pub fn cpu<M>(memory: M, machine: &str) -> Result<Cpu<M>> {
        let architecture: Architecture = machine.parse()?;
        tracing::debug!(%architecture, "creating cpu");
        Ok(Cpu::new(architecture, memory))
    }

    pub fn function_abi(os: &str, machine: &str) -> Result<FunctionAbi> {
        lookup(FUNCTION_ABIS, os, machine)
    }

    pub fn syscall_abi(os: &str, machine: &str) -> Result<SyscallAbi> {
        lookup(SYSCALL_ABIS, os, machine)
    }
}

fn lookup<T: Copy>(
    table: &[(OperatingSystem, Architecture, T)],
    os: &str,
    machine: &str,
) -> Result<T> {
    let unsupported = || Error::UnsupportedConfiguration {
        os: os.to_owned(),
        machine: machine.to_owned(),
    };

    let (Ok(os_key), Ok(machine_key)) = (
        os.parse::<OperatingSystem>(),
        machine.parse::<Architecture>(),
    ) else {
        return Err(unsupported());
    };

    table
        .iter()
        .find(|(entry_os, entry_machine, _)| *entry_os == os_key && *entry_machine == machine_key)
        .map(|(_, _, abi)| *abi)
        .ok_or_else(unsupported)
}
