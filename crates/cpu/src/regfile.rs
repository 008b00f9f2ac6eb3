use std::collections::BTreeMap;

use smt_ops::Value;

use crate::arch::RegisterLayout;
use crate::error::{Error, Result};
use crate::register::Register;

/// Named registers of a single execution state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    registers: BTreeMap<String, Register>,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a register file holding every register of `layout`, each set to zero.
    pub fn with_layout(layout: &RegisterLayout) -> Self {
        layout.registers.iter().copied().collect()
    }

    /// Adds a zeroed register of `width` bits, replacing any existing register with the same name.
    pub fn insert(&mut self, name: impl Into<String>, width: usize) {
        self.registers.insert(name.into(), Register::new(width));
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.registers.contains_key(name.as_ref())
    }

    /// Register names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn register(&self, name: impl AsRef<str>) -> Result<&Register> {
        let name = name.as_ref();
        self.registers
            .get(name)
            .ok_or_else(|| Error::UnknownRegister(name.to_owned()))
    }

    pub fn width(&self, name: impl AsRef<str>) -> Result<usize> {
        Ok(self.register(name)?.width())
    }

    pub fn read(&self, name: impl AsRef<str>) -> Result<&Value> {
        Ok(self.register(name)?.read())
    }

    pub fn write(&mut self, name: impl AsRef<str>, value: impl Into<Value>) -> Result<()> {
        let name = name.as_ref();
        let register = self
            .registers
            .get_mut(name)
            .ok_or_else(|| Error::UnknownRegister(name.to_owned()))?;
        register.write(value)?;
        tracing::trace!(register = name, value = %register.read(), "register written");
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for RegisterFile {
    fn from_iter<T: IntoIterator<Item = (S, usize)>>(iter: T) -> Self {
        Self {
            registers: iter
                .into_iter()
                .map(|(name, width)| (name.into(), Register::new(width)))
                .collect(),
        }
    }
}
