use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] elf::ParseError),

    #[error("unknown binary format with magic {magic:02x?}")]
    UnknownFormat { magic: Vec<u8> },

    #[error("unsupported machine {machine}")]
    UnsupportedMachine { machine: u16 },

    #[error("unsupported file type {file_type}")]
    UnsupportedFileType { file_type: u16 },

    #[error("unsupported segment type {segment_type:#x}")]
    UnsupportedSegment { segment_type: u32 },

    #[error("loadable segment at {virtual_address:#x} is not readable")]
    UnreadableSegment { virtual_address: u64 },

    #[error("interpreter {path} names an interpreter of its own")]
    NestedInterpreter { path: String },

    #[error("interpreter {path} is {found} but the binary is {expected}")]
    InterpreterMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
