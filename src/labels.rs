//! Pass 1: bind every `(LABEL)` to the address of the instruction after it
//! and drop the declarations from the stream.

use tracing::{debug, trace};

use crate::error::{AsmError, ErrorKind};
use crate::instructions::Instruction;
use crate::parser::{parse_line, Line};
use crate::source::SourceLine;
use crate::symbols::{SymbolTable, MAX_ADDRESS};

/// A real instruction with its ROM address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub addr: u16,
    pub src: SourceLine,
    pub instr: Instruction,
}

pub fn resolve_labels(
    lines: &[SourceLine],
    symbols: &mut SymbolTable,
    allow_redefinition: bool,
) -> Result<Vec<Located>, AsmError> {
    let mut pc: u32 = 0;
    let mut out = Vec::with_capacity(lines.len());
    for src in lines {
        let parsed = parse_line(&src.text).map_err(|kind| AsmError::at(src, kind))?;
        match parsed {
            Line::Label(name) => {
                let addr = rom_address(pc).map_err(|kind| AsmError::at(src, kind))?;
                symbols
                    .define_label(&name, addr, allow_redefinition)
                    .map_err(|kind| AsmError::at(src, kind))?;
                trace!(label = %name, addr, "bound label");
            }
            Line::Instr(instr) => {
                let addr = rom_address(pc).map_err(|kind| AsmError::at(src, kind))?;
                out.push(Located {
                    addr,
                    src: src.clone(),
                    instr,
                });
                pc += 1;
            }
        }
    }
    debug!(instructions = out.len(), symbols = symbols.len(), "pass 1 complete");
    Ok(out)
}

fn rom_address(pc: u32) -> Result<u16, ErrorKind> {
    if pc > MAX_ADDRESS as u32 {
        return Err(ErrorKind::AddressRange(pc as u64));
    }
    Ok(pc as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<SourceLine> {
        SourceLine::numbered(src)
    }

    #[test]
    fn labels_are_stripped_and_bound() {
        let mut t = SymbolTable::new();
        let out = resolve_labels(
            &lines(&["(START)", "@1", "D=A", "(MID)", "(ALIAS)", "@2", "(END)"]),
            &mut t,
            false,
        )
        .unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().map(|l| l.addr).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(out[2].src.number, 6);
        assert_eq!(t.lookup("START"), Some(0));
        assert_eq!(t.lookup("MID"), Some(2));
        assert_eq!(t.lookup("ALIAS"), Some(2));
        assert_eq!(t.lookup("END"), Some(3));
    }

    #[test]
    fn duplicate_label_reports_second_declaration() {
        let mut t = SymbolTable::new();
        let err = resolve_labels(&lines(&["(A1)", "@0", "(A1)", "@1"]), &mut t, false).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(
            err.kind,
            ErrorKind::LabelRedefined { name: "A1".into(), previous: 0 }
        );
    }

    #[test]
    fn duplicate_label_last_wins_when_allowed() {
        let mut t = SymbolTable::new();
        resolve_labels(&lines(&["(A1)", "@0", "(A1)", "@1"]), &mut t, true).unwrap();
        assert_eq!(t.lookup("A1"), Some(1));
    }

    #[test]
    fn syntax_errors_surface_in_pass_one() {
        let mut t = SymbolTable::new();
        let err = resolve_labels(&lines(&["@1", "(BAD"]), &mut t, false).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ErrorKind::Syntax);
    }
}
