#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error occurred while normalizing a value written to a register
    #[error(transparent)]
    Operation(#[from] smt_ops::Error),

    #[error("unknown register {0}")]
    UnknownRegister(String),

    #[error("cannot store a {actual}-bit value in a {expected}-bit register")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("unsupported machine {machine}")]
    UnsupportedMachine { machine: String },

    #[error("unsupported operating system {os}")]
    UnsupportedOperatingSystem { os: String },

    #[error("no calling convention for {machine} on {os}")]
    UnsupportedConfiguration { os: String, machine: String },

    #[error("requested {requested} arguments but only {available} are passed in registers")]
    TooManyArguments { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
