pub mod assembler;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod labels;
pub mod parser;
pub mod source;
pub mod symbols;

pub use assembler::{assemble_lines, AsmConfig, Assembled, Assembler, Emitted};
pub use error::{AsmError, ErrorKind};
pub use instructions::{Dest, Instruction, Jump, Word};
pub use source::SourceLine;
pub use symbols::SymbolTable;
