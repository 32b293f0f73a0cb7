//! Pass 2: resolve address operands and encode instructions.

use crate::error::ErrorKind;
use crate::instructions::{comp_bits, Instruction, Reference, Word};
use crate::symbols::{SymbolTable, MAX_ADDRESS};

const C_PREFIX: u16 = 0b111 << 13;

/// Numeric address for a reference, allocating a variable for unseen symbols.
pub fn resolve_reference(reference: &Reference, symbols: &mut SymbolTable) -> Result<u16, ErrorKind> {
    match reference {
        Reference::Literal(n) if *n > MAX_ADDRESS as u64 => Err(ErrorKind::AddressRange(*n)),
        Reference::Literal(n) => Ok(*n as u16),
        Reference::Symbol(name) => symbols.resolve_or_allocate(name),
    }
}

pub fn encode_address(addr: u16) -> Result<Word, ErrorKind> {
    if addr > MAX_ADDRESS {
        return Err(ErrorKind::AddressRange(addr as u64));
    }
    Ok(Word(addr))
}

pub fn encode(instr: &Instruction, symbols: &mut SymbolTable) -> Result<Word, ErrorKind> {
    match instr {
        Instruction::Address(reference) => {
            let addr = resolve_reference(reference, symbols)?;
            encode_address(addr)
        }
        Instruction::Compute { dest, comp, jump } => {
            let c = comp_bits(comp).ok_or_else(|| ErrorKind::UnknownComputation(comp.to_string()))?;
            let d = dest.bits();
            let j = jump.map(|j| j.bits()).unwrap_or(0);
            Ok(Word(C_PREFIX | c << 6 | d << 3 | j))
        }
    }
}
