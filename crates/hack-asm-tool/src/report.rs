use hack_asm::symbols::{SymbolEntry, SymbolKind};
use hack_asm::{Assembled, Emitted};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub words: usize,
    pub variables: usize,
    pub labels: usize,
    pub program: Vec<Emitted>,
    pub symbols: Vec<SymbolEntry>,
}

impl Report {
    /// Build a report; builtins are left out unless asked for.
    pub fn new(a: &Assembled, with_builtins: bool) -> Self {
        let symbols: Vec<SymbolEntry> = a
            .symbols
            .entries()
            .into_iter()
            .filter(|e| with_builtins || e.kind != SymbolKind::Builtin)
            .collect();
        let count = |k: SymbolKind| a.symbols.iter().filter(|&(_, _, kind)| kind == k).count();
        Self {
            words: a.program.len(),
            variables: count(SymbolKind::Variable),
            labels: count(SymbolKind::Label),
            program: a.program.clone(),
            symbols,
        }
    }
}

pub fn symbols_text(symbols: &[SymbolEntry]) -> String {
    use std::fmt::Write as _;
    let mut buf = String::new();
    let _ = writeln!(buf, "{:<24} {:>6} {:<8}", "name", "addr", "kind");
    for e in symbols {
        let kind = match e.kind {
            SymbolKind::Builtin => "builtin",
            SymbolKind::Label => "label",
            SymbolKind::Variable => "variable",
        };
        let _ = writeln!(buf, "{:<24} {:>6} {:<8}", e.name, e.addr, kind);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use hack_asm::Assembler;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_counts_user_symbols() {
        let a = Assembler::default()
            .assemble_str("@i\nM=1\n(LOOP)\n@LOOP\n0;JMP\n")
            .unwrap();
        let r = Report::new(&a, false);
        assert_eq!(r.words, 4);
        assert_eq!(r.labels, 1);
        assert_eq!(r.variables, 1);
        assert_eq!(
            r.symbols.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["LOOP", "i"]
        );
    }

    #[test]
    fn symbols_table_text() {
        let a = Assembler::default().assemble_str("@n\nD=M\n").unwrap();
        let r = Report::new(&a, false);
        let text = symbols_text(&r.symbols);
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("name"));
        assert_eq!(lines.next().unwrap().split_whitespace().collect::<Vec<_>>(), vec!["n", "16", "variable"]);
        assert!(lines.next().is_none());
    }
}
