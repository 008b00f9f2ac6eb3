use std::path::Path;

use elf::ElfBytes;
use elf::abi::{
    EM_386, EM_ARM, EM_X86_64, ET_CORE, ET_DYN, ET_EXEC, PT_INTERP, PT_LOAD, PT_NULL, PT_PHDR,
};
use elf::endian::AnyEndian;

use crate::error::{Error, Result};
use crate::map::{MemoryMap, Permissions, ThreadDescriptor, ThreadState};

/// Segment type of CGC proof of vulnerability data.
pub const PT_CGCPOV2: u32 = 0x6ccccc02;

const ELF_MAGIC: &[u8; 4] = b"\x7fELF";
const CGC_MAGIC: &[u8; 4] = b"\x7fCGC";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Format {
    Elf,
    Cgc,
}

static FORMATS: &[(&[u8; 4], Format)] = &[(CGC_MAGIC, Format::Cgc), (ELF_MAGIC, Format::Elf)];

impl Format {
    /// Selects the format whose magic number starts `bytes`.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        let magic = bytes.get(..4).unwrap_or(bytes);
        FORMATS
            .iter()
            .find(|(format_magic, _)| magic == format_magic.as_slice())
            .map(|(_, format)| *format)
            .ok_or_else(|| Error::UnknownFormat {
                magic: magic.to_vec(),
            })
    }

    pub fn magic(&self) -> &'static [u8; 4] {
        match self {
            Self::Elf => ELF_MAGIC,
            Self::Cgc => CGC_MAGIC,
        }
    }
}

/// Object file type from the ELF header.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FileType {
    Executable,
    SharedObject,
    Core,
}

impl FileType {
    fn from_elf(e_type: u16) -> Result<Self> {
        match e_type {
            ET_EXEC => Ok(Self::Executable),
            ET_DYN => Ok(Self::SharedObject),
            ET_CORE => Ok(Self::Core),
            file_type => Err(Error::UnsupportedFileType { file_type }),
        }
    }

    fn to_elf(self) -> u16 {
        match self {
            Self::Executable => ET_EXEC,
            Self::SharedObject => ET_DYN,
            Self::Core => ET_CORE,
        }
    }
}

/// Whether a binary is loaded as the program or as the interpreter of another binary. An
/// interpreter may not name an interpreter of its own.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Role {
    Program,
    Interpreter,
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

/// Supported machines: ELF machine, machine name and program counter register.
static MACHINES: &[(u16, &str, &str)] = &[
    (EM_386, "i386", "EIP"),
    (EM_X86_64, "amd64", "RIP"),
    (EM_ARM, "armv7", "PC"),
];

/// A loaded executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    path: String,
    format: Format,
    arch: &'static str,
    program_counter: &'static str,
    file_type: FileType,
    entry_point: u64,
    maps: Vec<MemoryMap>,
    interpreter: Option<Box<Binary>>,
}

impl Binary {
    /// Reads and validates the binary at `path`. An ELF interpreter named by the binary is loaded
    /// as well.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::from_bytes(path.to_string_lossy(), read_file(path)?)
    }

    /// Validates an in-memory image. The `name` is reported as the backing file of each map.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_image(name.into(), bytes.into(), Role::Program)
    }

    fn from_image(name: String, mut bytes: Vec<u8>, role: Role) -> Result<Self> {
        let format = Format::detect(&bytes)?;

        if format == Format::Cgc {
            // The remainder of the header is ordinary ELF
            bytes[..4].copy_from_slice(ELF_MAGIC);
        }

        let binary = Self::parse(name, format, &bytes, role)?;
        tracing::debug!(
            path = %binary.path,
            format = ?binary.format,
            arch = binary.arch,
            maps = binary.maps.len(),
            "loaded binary"
        );

        Ok(binary)
    }

    fn parse(path: String, format: Format, bytes: &[u8], role: Role) -> Result<Self> {
        let file = ElfBytes::<AnyEndian>::minimal_parse(bytes)?;
        let (_, arch, program_counter) = MACHINES
            .iter()
            .find(|(machine, _, _)| *machine == file.ehdr.e_machine)
            .copied()
            .ok_or(Error::UnsupportedMachine {
                machine: file.ehdr.e_machine,
            })?;
        let file_type = FileType::from_elf(file.ehdr.e_type)?;

        if format == Format::Cgc {
            if file.ehdr.e_machine != EM_386 {
                return Err(Error::UnsupportedMachine {
                    machine: file.ehdr.e_machine,
                });
            }

            if file_type != FileType::Executable {
                return Err(Error::UnsupportedFileType {
                    file_type: file.ehdr.e_type,
                });
            }
        }

        let mut maps = Vec::new();
        let mut interpreter_path = None;
        for segment in file.segments().into_iter().flatten() {
            if format == Format::Cgc
                && ![PT_LOAD, PT_NULL, PT_PHDR, PT_CGCPOV2].contains(&segment.p_type)
            {
                return Err(Error::UnsupportedSegment {
                    segment_type: segment.p_type,
                });
            }

            if format == Format::Elf && segment.p_type == PT_INTERP && interpreter_path.is_none() {
                if role == Role::Interpreter {
                    return Err(Error::NestedInterpreter { path });
                }

                let data = file.segment_data(&segment)?;
                let data = data.strip_suffix(b"\0").unwrap_or(data);
                interpreter_path = Some(String::from_utf8_lossy(data).into_owned());
                continue;
            }

            if segment.p_type != PT_LOAD {
                continue;
            }

            if segment.p_memsz == 0 {
                tracing::warn!(
                    virtual_address = segment.p_vaddr,
                    "skipping loadable segment without memory"
                );
                continue;
            }

            let permissions = Permissions::from_segment_flags(segment.p_flags);
            if !permissions.read {
                return Err(Error::UnreadableSegment {
                    virtual_address: segment.p_vaddr,
                });
            }

            // Checks that the file range of the segment lies within the image
            file.segment_data(&segment)?;

            let map = MemoryMap {
                virtual_address: segment.p_vaddr,
                size: segment.p_memsz,
                permissions,
                file: path.clone(),
                file_offset: segment.p_offset,
                file_size: segment.p_filesz,
            };
            tracing::debug!(
                virtual_address = map.virtual_address,
                size = map.size,
                permissions = %map.permissions,
                "mapped segment"
            );
            maps.push(map);
        }

        let interpreter = interpreter_path
            .map(|interpreter_path| Self::load_interpreter(&interpreter_path, arch))
            .transpose()?
            .map(Box::new);

        Ok(Self {
            path,
            format,
            arch,
            program_counter,
            file_type,
            entry_point: file.ehdr.e_entry,
            maps,
            interpreter,
        })
    }

    fn load_interpreter(path: &str, arch: &'static str) -> Result<Self> {
        let interpreter = Self::from_image(
            path.to_owned(),
            read_file(Path::new(path))?,
            Role::Interpreter,
        )?;
        if interpreter.arch != arch {
            return Err(Error::InterpreterMismatch {
                path: path.to_owned(),
                expected: arch,
                found: interpreter.arch,
            });
        }

        if interpreter.format != Format::Elf || interpreter.file_type == FileType::Core {
            return Err(Error::UnsupportedFileType {
                file_type: interpreter.file_type.to_elf(),
            });
        }

        Ok(interpreter)
    }

    /// Name of the file this binary was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Machine name: `"i386"`, `"amd64"` or `"armv7"`.
    pub fn arch(&self) -> &'static str {
        self.arch
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn entry_point(&self) -> u64 {
        self.entry_point
    }

    /// Memory the binary expects to be mapped. Each call starts over from the first map.
    pub fn maps(&self) -> impl Iterator<Item = &MemoryMap> {
        self.maps.iter()
    }

    /// Threads at load time. A binary has a single running thread starting at its entry point.
    pub fn threads(&self) -> impl Iterator<Item = ThreadDescriptor> + '_ {
        std::iter::once(ThreadDescriptor {
            state: ThreadState::Running,
            registers: [(self.program_counter, self.entry_point)].into_iter().collect(),
        })
    }

    /// The dynamic linker named by the binary, if any.
    pub fn interpreter(&self) -> Option<&Binary> {
        self.interpreter.as_deref()
    }
}
