use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::encoder::encode;
use crate::error::AsmError;
use crate::instructions::Word;
use crate::labels::resolve_labels;
use crate::source::{clean_source, SourceLine};
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Let a repeated `(LABEL)` rebind to the newer address instead of failing.
    pub allow_label_redefinition: bool,
}

/// One instruction as it lands in ROM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emitted {
    pub addr: u16,
    pub line: usize,
    pub source: String,
    pub word: Word,
}

#[derive(Debug, Clone)]
pub struct Assembled {
    pub program: Vec<Emitted>,
    pub symbols: SymbolTable,
}

impl Assembled {
    pub fn words(&self) -> Vec<Word> {
        self.program.iter().map(|e| e.word).collect()
    }

    pub fn binary_lines(&self) -> Vec<String> {
        self.program.iter().map(|e| e.word.to_string()).collect()
    }

    /// `.hack` file contents, one newline-terminated word per line.
    pub fn to_hack(&self) -> String {
        let mut s = String::with_capacity(self.program.len() * 17);
        for e in &self.program {
            s.push_str(&e.word.to_string());
            s.push('\n');
        }
        s
    }

    pub fn listing(&self) -> String {
        use std::fmt::Write as _;
        let mut buf = String::new();
        for e in &self.program {
            let _ = writeln!(buf, "{:05}  {}  {:>5}: {}", e.addr, e.word, e.line, e.source);
        }
        buf
    }
}

/// Per-run assembler state. Each run starts from a fresh symbol table.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    pub cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    /// Two-pass assembly of cleaned lines. Fails on the first bad line.
    pub fn assemble(&self, lines: &[SourceLine]) -> Result<Assembled, AsmError> {
        let mut symbols = SymbolTable::new();
        let located = resolve_labels(lines, &mut symbols, self.cfg.allow_label_redefinition)?;

        let mut program = Vec::with_capacity(located.len());
        for l in located {
            let word = encode(&l.instr, &mut symbols).map_err(|kind| AsmError::at(&l.src, kind))?;
            trace!(addr = l.addr, %word, instr = %l.instr, "encoded");
            program.push(Emitted {
                addr: l.addr,
                line: l.src.number,
                source: l.src.text,
                word,
            });
        }
        debug!(
            words = program.len(),
            variables = symbols.next_variable() - crate::symbols::VARIABLE_BASE,
            "pass 2 complete"
        );
        Ok(Assembled { program, symbols })
    }

    /// Clean raw program text, then assemble it.
    pub fn assemble_str(&self, text: &str) -> Result<Assembled, AsmError> {
        self.assemble(&clean_source(text))
    }
}

/// Assemble pre-cleaned lines with the default configuration.
pub fn assemble_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, AsmError> {
    Assembler::default()
        .assemble(&SourceLine::numbered(lines))
        .map(|a| a.binary_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn adds_two_and_three() {
        let out = assemble_lines(&["@2", "D=A", "@3", "D=D+A", "@0", "M=D"]).unwrap();
        assert_eq!(
            out,
            vec![
                "0000000000000010",
                "1110110000010000",
                "0000000000000011",
                "1110000010010000",
                "0000000000000000",
                "1110001100001000",
            ]
        );
    }

    #[test]
    fn error_carries_original_line_number() {
        let err = Assembler::default()
            .assemble_str("// c\n@1\n\nX=Y // bad\n")
            .unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.text, "X=Y");
        assert_eq!(err.kind, ErrorKind::UnknownComputation("Y".into()));
        assert_eq!(err.to_string(), "line 4: unknown computation `Y`: `X=Y`");
    }

    #[test]
    fn listing_and_hack_text() {
        let a = Assembler::default().assemble_str("(L)\n@L\n0;JMP\n").unwrap();
        assert_eq!(a.to_hack(), "0000000000000000\n1110101010000111\n");
        assert_eq!(
            a.listing(),
            "00000  0000000000000000      2: @L\n00001  1110101010000111      3: 0;JMP\n"
        );
    }
}
