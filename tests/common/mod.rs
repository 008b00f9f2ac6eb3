use std::collections::BTreeMap;

use binary_loader::{Binary, MemoryMap};

/// Little endian 32-bit executable with a single readable and executable segment mapped at
/// `0x1000` that covers the headers followed by `code`. The entry point is the first byte of
/// `code`.
pub fn executable_image(machine: u16, code: &[u8]) -> Vec<u8> {
    const HEADERS_SIZE: u32 = 52 + 32;
    let file_size = HEADERS_SIZE + code.len() as u32;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"\x7fELF\x01\x01\x01\0\0\0\0\0\0\0\0\0");
    bytes.extend_from_slice(&elf::abi::ET_EXEC.to_le_bytes());
    bytes.extend_from_slice(&machine.to_le_bytes());
    for field in [1, 0x1000 + HEADERS_SIZE, 52, 0, 0] {
        bytes.extend_from_slice(&u32::to_le_bytes(field));
    }
    for field in [52, 32, 1, 40, 0, 0] {
        bytes.extend_from_slice(&u16::to_le_bytes(field));
    }

    let flags = elf::abi::PF_R | elf::abi::PF_X;
    for field in [
        elf::abi::PT_LOAD,
        0,
        0x1000,
        0x1000,
        file_size,
        0x1000,
        flags,
        0x1000,
    ] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }

    bytes.extend_from_slice(code);
    bytes
}

/// Byte addressable memory populated from the maps of a binary.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    bytes: BTreeMap<u64, u8>,
}

impl Memory {
    pub fn map(&mut self, map: &MemoryMap, file: &[u8]) {
        let start = map.file_offset as usize;
        let end = start + map.file_size as usize;
        let data = file[start..end]
            .iter()
            .copied()
            .chain(std::iter::repeat(0))
            .take(map.size as usize);

        for (address, byte) in (map.virtual_address..).zip(data) {
            self.bytes.insert(address, byte);
        }
    }

    pub fn read(&self, address: u64) -> Option<u8> {
        self.bytes.get(&address).copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

pub fn load_memory(binary: &Binary, file: &[u8]) -> Memory {
    let mut memory = Memory::default();
    for map in binary.maps() {
        memory.map(map, file);
    }
    memory
}
