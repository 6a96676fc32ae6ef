use std::{fmt, io};

/// Artifact region a load error was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Symbols,
    Literals,
    TopLevel,
    Functions,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "header",
            Section::Symbols => "symbols",
            Section::Literals => "literals",
            Section::TopLevel => "top-level",
            Section::Functions => "functions",
        };
        f.write_str(name)
    }
}

/// Failure to decode a compiled artifact. No partial unit survives one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    BadMagic { found: u16 },
    UnexpectedEof { section: Section },
    UnknownLiteralTag { tag: u8 },
    UnknownOpcode { section: Section, byte: u8 },
    InvalidUtf8 { section: Section },
    Io(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::BadMagic { found } => {
                write!(f, "not a kulac file (magic 0x{:04X})", found)
            }
            LoadError::UnexpectedEof { section } => {
                write!(f, "unexpected end of file in {} section", section)
            }
            LoadError::UnknownLiteralTag { tag } => {
                write!(f, "undefined literal type 0x{:02X}", tag)
            }
            LoadError::UnknownOpcode { section, byte } => {
                write!(f, "unknown opcode 0x{:02X} in {} section", byte, section)
            }
            LoadError::InvalidUtf8 { section } => {
                write!(f, "invalid UTF-8 text in {} section", section)
            }
            LoadError::Io(msg) => write!(f, "io error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err.to_string())
    }
}
