use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ErrorKind;

/// Highest address an A-instruction can carry.
pub const MAX_ADDRESS: u16 = 0x7FFF;
/// First RAM cell handed out to variables, right after R0..R15.
pub const VARIABLE_BASE: u16 = 16;

pub const BUILTINS: &[(&str, u16)] = &[
    ("SP", 0),
    ("LCL", 1),
    ("ARG", 2),
    ("THIS", 3),
    ("THAT", 4),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
    ("SCREEN", 16384),
    ("KBD", 24576),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Builtin,
    Label,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    pub addr: u16,
    pub kind: SymbolKind,
}

/// Name to address mapping for a single assembly run.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    map: HashMap<String, (u16, SymbolKind)>,
    next_var: u16,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let map = BUILTINS
            .iter()
            .map(|&(name, addr)| (name.to_string(), (addr, SymbolKind::Builtin)))
            .collect();
        Self {
            map,
            next_var: VARIABLE_BASE,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.map.get(name).map(|&(addr, _)| addr)
    }

    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        self.map.get(name).map(|&(_, kind)| kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Address the next new variable will get.
    pub fn next_variable(&self) -> u16 {
        self.next_var
    }

    /// Insert or overwrite a user symbol. Builtins are never replaced.
    pub fn define(&mut self, name: &str, addr: u16, kind: SymbolKind) -> Result<(), ErrorKind> {
        if self.kind(name) == Some(SymbolKind::Builtin) {
            return Err(ErrorKind::ReservedSymbol(name.to_string()));
        }
        self.map.insert(name.to_string(), (addr, kind));
        Ok(())
    }

    /// Bind a label. With `allow_redefinition` a repeated label takes the
    /// newest address, otherwise it is an error.
    pub fn define_label(
        &mut self,
        name: &str,
        addr: u16,
        allow_redefinition: bool,
    ) -> Result<(), ErrorKind> {
        if let Some((previous, SymbolKind::Label)) = self.map.get(name).copied() {
            if !allow_redefinition {
                return Err(ErrorKind::LabelRedefined {
                    name: name.to_string(),
                    previous,
                });
            }
            tracing::debug!(label = name, previous, addr, "label redefined");
        }
        self.define(name, addr, SymbolKind::Label)
    }

    /// Address of `name`, allocating the next variable cell on first use.
    pub fn resolve_or_allocate(&mut self, name: &str) -> Result<u16, ErrorKind> {
        if let Some(addr) = self.lookup(name) {
            return Ok(addr);
        }
        self.allocate_variable(name)
    }

    fn allocate_variable(&mut self, name: &str) -> Result<u16, ErrorKind> {
        let addr = self.next_var;
        if addr > MAX_ADDRESS {
            return Err(ErrorKind::AddressRange(addr as u64));
        }
        self.define(name, addr, SymbolKind::Variable)?;
        self.next_var += 1;
        tracing::trace!(variable = name, addr, "allocated variable");
        Ok(addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16, SymbolKind)> {
        self.map
            .iter()
            .map(|(name, &(addr, kind))| (name.as_str(), addr, kind))
    }

    /// Snapshot ordered by address, then name.
    pub fn entries(&self) -> Vec<SymbolEntry> {
        let mut out: Vec<SymbolEntry> = self
            .iter()
            .map(|(name, addr, kind)| SymbolEntry {
                name: name.to_string(),
                addr,
                kind,
            })
            .collect();
        out.sort_by(|a, b| a.addr.cmp(&b.addr).then_with(|| a.name.cmp(&b.name)));
        out
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
