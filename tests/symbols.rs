use hack_asm::symbols::{SymbolKind, BUILTINS};
use hack_asm::{assemble_lines, Assembler, SymbolTable};

#[test]
fn builtins_resolve_to_documented_addresses() {
    let t = SymbolTable::new();
    let expect = [
        ("SP", 0u16),
        ("LCL", 1),
        ("ARG", 2),
        ("THIS", 3),
        ("THAT", 4),
        ("SCREEN", 16384),
        ("KBD", 24576),
    ];
    for (name, addr) in expect {
        assert_eq!(t.lookup(name), Some(addr), "{name}");
    }
    for i in 0..16u16 {
        assert_eq!(t.lookup(&format!("R{i}")), Some(i));
    }
    for (name, _) in BUILTINS {
        assert_eq!(t.kind(name), Some(SymbolKind::Builtin));
    }
}

#[test]
fn builtins_in_address_instructions() {
    let out = assemble_lines(&["@SP", "@THAT", "@R15", "@SCREEN", "@KBD"]).unwrap();
    assert_eq!(
        out,
        vec![
            "0000000000000000",
            "0000000000000100",
            "0000000000001111",
            "0100000000000000",
            "0110000000000000",
        ]
    );
}

#[test]
fn variables_start_at_sixteen_and_are_stable() {
    let out = assemble_lines(&["@first", "@second", "@first", "@second"]).unwrap();
    assert_eq!(
        out,
        vec![
            "0000000000010000",
            "0000000000010001",
            "0000000000010000",
            "0000000000010001",
        ]
    );
}

#[test]
fn label_before_fifth_instruction_is_four() {
    let forward = ["@LOOP", "D=A", "@1", "D=D+A", "(LOOP)", "0;JMP"];
    let backward = ["@1", "D=A", "@1", "D=D+A", "(LOOP)", "@LOOP", "0;JMP"];
    for src in [&forward[..], &backward[..]] {
        let a = Assembler::default()
            .assemble(&hack_asm::SourceLine::numbered(src))
            .unwrap();
        assert_eq!(a.symbols.lookup("LOOP"), Some(4));
        assert_eq!(a.symbols.kind("LOOP"), Some(SymbolKind::Label));
        assert!(a.binary_lines().contains(&"0000000000000100".to_string()));
    }
}

#[test]
fn labels_are_not_allocated_as_variables() {
    let a = Assembler::default()
        .assemble_str("@END\n@x\n(END)\n@END\n")
        .unwrap();
    assert_eq!(a.symbols.lookup("x"), Some(16));
    assert_eq!(a.symbols.next_variable(), 17);
    assert_eq!(a.binary_lines()[0], "0000000000000010");
}

#[test]
fn symbol_export_serializes() {
    let a = Assembler::default().assemble_str("@n\n(L)\n@L\n").unwrap();
    let json = serde_json::to_value(a.symbols.entries()).unwrap();
    let user: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["kind"] != "builtin")
        .cloned()
        .collect();
    assert_eq!(
        user,
        vec![
            serde_json::json!({ "name": "L", "addr": 1, "kind": "label" }),
            serde_json::json!({ "name": "n", "addr": 16, "kind": "variable" }),
        ]
    );
}
