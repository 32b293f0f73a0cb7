use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dest: u16 {
const M = 0b001;
const D = 0b010;
const A = 0b100;
}
}

impl Dest {
    /// Parse a destination field. Letter order is free, repeats are not.
    pub fn parse(s: &str) -> Option<Dest> {
        let mut dest = Dest::empty();
        for c in s.chars() {
            let bit = match c {
                'A' => Dest::A,
                'D' => Dest::D,
                'M' => Dest::M,
                _ => return None,
            };
            if dest.contains(bit) {
                return None;
            }
            dest |= bit;
        }
        Some(dest)
    }

    /// Canonical mnemonic from [`DEST_TABLE`].
    pub fn mnemonic(self) -> &'static str {
        DEST_TABLE
            .iter()
            .find(|d| d.dest == self)
            .map(|d| d.mnemonic)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jump {
    Jgt = 0b001,
    Jeq = 0b010,
    Jge = 0b011,
    Jlt = 0b100,
    Jne = 0b101,
    Jle = 0b110,
    Jmp = 0b111,
}

impl Jump {
    pub fn parse(s: &str) -> Option<Jump> {
        JUMP_TABLE
            .iter()
            .find(|j| j.mnemonic == s)
            .and_then(|j| j.jump)
    }

    pub fn bits(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CompDesc {
    pub mnemonic: &'static str,
    /// `a c1 c2 c3 c4 c5 c6`
    pub bits: u16,
}

#[derive(Debug, Clone, Copy)]
pub struct DestDesc {
    pub mnemonic: &'static str,
    pub dest: Dest,
}

#[derive(Debug, Clone, Copy)]
pub struct JumpDesc {
    pub mnemonic: &'static str,
    pub jump: Option<Jump>,
}

pub const COMP_TABLE: &[CompDesc] = &[
    CompDesc { mnemonic: "0", bits: 0b0101010 },
    CompDesc { mnemonic: "1", bits: 0b0111111 },
    CompDesc { mnemonic: "-1", bits: 0b0111010 },
    CompDesc { mnemonic: "D", bits: 0b0001100 },
    CompDesc { mnemonic: "A", bits: 0b0110000 },
    CompDesc { mnemonic: "!D", bits: 0b0001101 },
    CompDesc { mnemonic: "!A", bits: 0b0110001 },
    CompDesc { mnemonic: "-D", bits: 0b0001111 },
    CompDesc { mnemonic: "-A", bits: 0b0110011 },
    CompDesc { mnemonic: "D+1", bits: 0b0011111 },
    CompDesc { mnemonic: "A+1", bits: 0b0110111 },
    CompDesc { mnemonic: "D-1", bits: 0b0001110 },
    CompDesc { mnemonic: "A-1", bits: 0b0110010 },
    CompDesc { mnemonic: "D+A", bits: 0b0000010 },
    CompDesc { mnemonic: "D-A", bits: 0b0010011 },
    CompDesc { mnemonic: "A-D", bits: 0b0000111 },
    CompDesc { mnemonic: "D&A", bits: 0b0000000 },
    CompDesc { mnemonic: "D|A", bits: 0b0010101 },
    // a = 1: M replaces A
    CompDesc { mnemonic: "M", bits: 0b1110000 },
    CompDesc { mnemonic: "!M", bits: 0b1110001 },
    CompDesc { mnemonic: "-M", bits: 0b1110011 },
    CompDesc { mnemonic: "M+1", bits: 0b1110111 },
    CompDesc { mnemonic: "M-1", bits: 0b1110010 },
    CompDesc { mnemonic: "D+M", bits: 0b1000010 },
    CompDesc { mnemonic: "D-M", bits: 0b1010011 },
    CompDesc { mnemonic: "M-D", bits: 0b1000111 },
    CompDesc { mnemonic: "D&M", bits: 0b1000000 },
    CompDesc { mnemonic: "D|M", bits: 0b1010101 },
];

pub const DEST_TABLE: &[DestDesc] = &[
    DestDesc { mnemonic: "", dest: Dest::empty() },
    DestDesc { mnemonic: "M", dest: Dest::M },
    DestDesc { mnemonic: "D", dest: Dest::D },
    DestDesc { mnemonic: "MD", dest: Dest::M.union(Dest::D) },
    DestDesc { mnemonic: "A", dest: Dest::A },
    DestDesc { mnemonic: "AM", dest: Dest::A.union(Dest::M) },
    DestDesc { mnemonic: "AD", dest: Dest::A.union(Dest::D) },
    DestDesc { mnemonic: "AMD", dest: Dest::all() },
];

pub const JUMP_TABLE: &[JumpDesc] = &[
    JumpDesc { mnemonic: "", jump: None },
    JumpDesc { mnemonic: "JGT", jump: Some(Jump::Jgt) },
    JumpDesc { mnemonic: "JEQ", jump: Some(Jump::Jeq) },
    JumpDesc { mnemonic: "JGE", jump: Some(Jump::Jge) },
    JumpDesc { mnemonic: "JLT", jump: Some(Jump::Jlt) },
    JumpDesc { mnemonic: "JNE", jump: Some(Jump::Jne) },
    JumpDesc { mnemonic: "JLE", jump: Some(Jump::Jle) },
    JumpDesc { mnemonic: "JMP", jump: Some(Jump::Jmp) },
];

pub fn comp_bits(mnemonic: &str) -> Option<u16> {
    COMP_TABLE
        .iter()
        .find(|c| c.mnemonic == mnemonic)
        .map(|c| c.bits)
}

/// Reference operand of an address instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Literal(u64),
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Address(Reference),
    Compute {
        dest: Dest,
        /// Already validated against [`COMP_TABLE`].
        comp: &'static str,
        jump: Option<Jump>,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Address(Reference::Literal(n)) => write!(f, "@{n}"),
            Instruction::Address(Reference::Symbol(s)) => write!(f, "@{s}"),
            Instruction::Compute { dest, comp, jump } => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest.mnemonic())?;
                }
                f.write_str(comp)?;
                if let Some(j) = jump {
                    let name = JUMP_TABLE
                        .iter()
                        .find(|d| d.jump == Some(*j))
                        .map(|d| d.mnemonic)
                        .unwrap_or("");
                    write!(f, ";{name}")?;
                }
                Ok(())
            }
        }
    }
}

/// One encoded 16-bit machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(pub u16);

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}
