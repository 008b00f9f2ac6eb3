use smt_ops::Value;

use crate::arch::Architecture;
use crate::error::Result;
use crate::regfile::RegisterFile;

/// Machine state of a single execution path: the registers of an architecture together with an
/// opaque memory object.
#[derive(Debug, Clone)]
pub struct Cpu<M> {
    architecture: Architecture,
    registers: RegisterFile,
    memory: M,
}

impl<M> Cpu<M> {
    /// Creates a cpu whose registers are all zero.
    pub fn new(architecture: Architecture, memory: M) -> Self {
        Self {
            architecture,
            registers: RegisterFile::with_layout(architecture.layout()),
            memory,
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn read_register(&self, name: impl AsRef<str>) -> Result<&Value> {
        self.registers.read(name)
    }

    pub fn write_register(&mut self, name: impl AsRef<str>, value: impl Into<Value>) -> Result<()> {
        self.registers.write(name, value)
    }

    pub fn program_counter(&self) -> Result<&Value> {
        self.read_register(self.architecture.layout().program_counter)
    }

    pub fn set_program_counter(&mut self, value: impl Into<Value>) -> Result<()> {
        self.write_register(self.architecture.layout().program_counter, value)
    }

    pub fn stack_pointer(&self) -> Result<&Value> {
        self.read_register(self.architecture.layout().stack_pointer)
    }

    pub fn set_stack_pointer(&mut self, value: impl Into<Value>) -> Result<()> {
        self.write_register(self.architecture.layout().stack_pointer, value)
    }
}
