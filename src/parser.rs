use crate::error::ErrorKind;
use crate::instructions::{Dest, Instruction, Jump, Reference, COMP_TABLE};

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Label(String),
    Instr(Instruction),
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

/// Symbol grammar: `[A-Za-z_.$:][A-Za-z0-9_.$:]*`
pub fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_symbol_char(c) && !c.is_ascii_digit() => chars.all(is_symbol_char),
        _ => false,
    }
}

fn is_compute_char(c: char) -> bool {
    c.is_ascii_uppercase() || matches!(c, '0' | '1' | '+' | '-' | '!' | '&' | '|' | '=' | ';')
}

/// Parse one cleaned, non-empty line.
pub fn parse_line(line: &str) -> Result<Line, ErrorKind> {
    if let Some(rest) = line.strip_prefix('(') {
        let name = rest.strip_suffix(')').ok_or(ErrorKind::Syntax)?;
        if !is_symbol(name) {
            return Err(ErrorKind::MalformedLabel(name.to_string()));
        }
        return Ok(Line::Label(name.to_string()));
    }
    if let Some(reference) = line.strip_prefix('@') {
        return parse_reference(reference).map(|r| Line::Instr(Instruction::Address(r)));
    }
    parse_compute(line).map(Line::Instr)
}

fn parse_reference(s: &str) -> Result<Reference, ErrorKind> {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        // anything too long for u64 is out of range anyway
        let n = s.parse::<u64>().unwrap_or(u64::MAX);
        return Ok(Reference::Literal(n));
    }
    if is_symbol(s) {
        return Ok(Reference::Symbol(s.to_string()));
    }
    Err(ErrorKind::Syntax)
}

fn parse_compute(line: &str) -> Result<Instruction, ErrorKind> {
    if !line.chars().all(is_compute_char) {
        return Err(ErrorKind::Syntax);
    }
    let (dest_s, rest) = match line.split_once('=') {
        Some((d, r)) => (Some(d), r),
        None => (None, line),
    };
    let (comp_s, jump_s) = match rest.split_once(';') {
        Some((c, j)) => (c, Some(j)),
        None => (rest, None),
    };
    if comp_s.is_empty() || dest_s == Some("") || jump_s == Some("") {
        return Err(ErrorKind::Syntax);
    }

    let comp = COMP_TABLE
        .iter()
        .find(|c| c.mnemonic == comp_s)
        .map(|c| c.mnemonic)
        .ok_or_else(|| ErrorKind::UnknownComputation(comp_s.to_string()))?;

    let dest = match dest_s {
        Some(d) => Dest::parse(d).ok_or_else(|| ErrorKind::UnknownDestination(d.to_string()))?,
        None => Dest::empty(),
    };
    let jump = match jump_s {
        Some(j) => Some(Jump::parse(j).ok_or_else(|| ErrorKind::UnknownJump(j.to_string()))?),
        None => None,
    };
    Ok(Instruction::Compute { dest, comp, jump })
}
