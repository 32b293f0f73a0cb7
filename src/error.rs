use crate::source::SourceLine;

/// What went wrong on a single source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unrecognized instruction syntax")]
    Syntax,
    #[error("unknown computation `{0}`")]
    UnknownComputation(String),
    #[error("unknown destination `{0}`")]
    UnknownDestination(String),
    #[error("unknown jump `{0}`")]
    UnknownJump(String),
    #[error("address {0} does not fit in 15 bits")]
    AddressRange(u64),
    #[error("malformed label `{0}`")]
    MalformedLabel(String),
    #[error("label `{name}` already defined at address {previous}")]
    LabelRedefined { name: String, previous: u16 },
    #[error("`{0}` is a predefined symbol and cannot be used as a label")]
    ReservedSymbol(String),
}

/// An [`ErrorKind`] tied to the line that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}: `{text}`")]
pub struct AsmError {
    pub line: usize,
    pub text: String,
    pub kind: ErrorKind,
}

impl AsmError {
    pub fn at(src: &SourceLine, kind: ErrorKind) -> Self {
        Self {
            line: src.number,
            text: src.text.clone(),
            kind,
        }
    }
}
