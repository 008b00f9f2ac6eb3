use elf::abi::{EM_386, ET_EXEC, PF_R, PF_X, PT_LOAD};

mod interpreter;
mod load;

const EHDR_SIZE: u32 = 52;
const PHDR_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy)]
struct Segment {
    p_type: u32,
    offset: u32,
    vaddr: u32,
    filesz: u32,
    memsz: u32,
    flags: u32,
}

impl Segment {
    /// Readable and executable segment at `0x1000` backed by the first `filesz` bytes of the file.
    fn load(filesz: u32) -> Self {
        Self {
            p_type: PT_LOAD,
            offset: 0,
            vaddr: 0x1000,
            filesz,
            memsz: 0x1000,
            flags: PF_R | PF_X,
        }
    }

    fn with_type(p_type: u32) -> Self {
        Self {
            p_type,
            offset: 0,
            vaddr: 0,
            filesz: 0,
            memsz: 0,
            flags: 0,
        }
    }
}

/// Little endian 32-bit ELF image with program headers immediately after the file header, followed
/// by `data`.
#[derive(Debug, Clone)]
struct Image {
    magic: [u8; 4],
    e_type: u16,
    machine: u16,
    entry: u32,
    segments: Vec<Segment>,
    data: Vec<u8>,
}

impl Image {
    fn executable() -> Self {
        Self {
            magic: *b"\x7fELF",
            e_type: ET_EXEC,
            machine: EM_386,
            entry: 0x1000,
            segments: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Executable with one loadable segment covering the headers.
    fn single_segment() -> Self {
        let mut image = Self::executable();
        image.segments.push(Segment::load(EHDR_SIZE + PHDR_SIZE));
        image
    }

    /// File offset of `data`.
    fn data_offset(&self) -> u32 {
        EHDR_SIZE + PHDR_SIZE * self.segments.len() as u32
    }

    fn build(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.magic);
        // 32-bit, little endian, current version, System V ABI
        bytes.extend_from_slice(&[1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        bytes.extend_from_slice(&self.e_type.to_le_bytes());
        bytes.extend_from_slice(&self.machine.to_le_bytes());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&self.entry.to_le_bytes());
        bytes.extend_from_slice(&EHDR_SIZE.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
        bytes.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
        bytes.extend_from_slice(&(self.segments.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&40u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert_eq!(bytes.len(), EHDR_SIZE as usize);

        for segment in &self.segments {
            for field in [
                segment.p_type,
                segment.offset,
                segment.vaddr,
                segment.vaddr,
                segment.filesz,
                segment.memsz,
                segment.flags,
                0x1000,
            ] {
                bytes.extend_from_slice(&field.to_le_bytes());
            }
        }

        bytes.extend_from_slice(&self.data);
        bytes
    }
}
