//! Integration tests for octa-core

use octa_core::prelude::*;
use octa_core::CircularBuffer;
use std::io::{Cursor, empty};

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

fn run_tape(source: &str, input: &[u8]) -> Vec<u8> {
    let program = compile_tape(source).unwrap();
    run_program(&program, VmConfig::default(), Cursor::new(input.to_vec())).unwrap()
}

/// Pairs every BIZ with its BNZ by nesting
fn bracket_pairs(program: &Program) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut pairs = Vec::new();
    for (idx, instr) in program.iter().enumerate() {
        match instr.operator {
            Operator::BranchIfZero => open.push(idx),
            Operator::BranchIfNonZero => pairs.push((open.pop().unwrap(), idx)),
            _ => {}
        }
    }
    assert!(open.is_empty());
    pairs
}

// ═══════════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_hello_world() {
    let output = run_tape(HELLO_WORLD, b"");
    assert_eq!(&output[..12], b"Hello World!");
    assert_eq!(render_text(&output), b"Hello World!\n");
}

#[test]
fn test_add_and_output() {
    let output = compile_and_run(Language::Tape, "+++.", VmConfig::default(), empty()).unwrap();
    assert_eq!(output[0], 3);
}

#[test]
fn test_assembly_add_out_hlt() {
    let program = assemble("add 5\nout\nhlt").unwrap();
    assert_eq!(
        program.instructions(),
        &[
            Instruction::new(Operator::Add, 5),
            Instruction::new(Operator::Output, 0),
            Instruction::new(Operator::Halt, 0),
        ]
    );

    let output = run_program(&program, VmConfig::default(), empty()).unwrap();
    assert_eq!(output[0], 5);
}

#[test]
fn test_assembly_numeric_countdown() {
    let program = assemble("add 3\nbiz 2\nsub 1\nbnz 2\nout\nhlt").unwrap();
    let mut vm = Vm::new(program, VmConfig::default().with_trace(true)).unwrap();
    let output = vm.run().unwrap();

    assert_eq!(output[0], 0);
    assert_eq!(vm.output().cursor(), 1);
    // three SUBs: 3 -> 2 -> 1 -> 0
    let subs = vm
        .trace()
        .iter()
        .filter(|i| i.operator == Operator::Subtract)
        .count();
    assert_eq!(subs, 3);
}

#[test]
fn test_missing_operand_emits_nothing() {
    let result = assemble("add\nhlt");
    assert!(matches!(result, Err(CompileError::MissingOperand { ref mnemonic, .. }) if mnemonic == "add"));
}

#[test]
fn test_unbalanced_brackets_rejected() {
    assert_eq!(
        compile_tape("[++"),
        Err(CompileError::UnbalancedBrackets { open: 1, close: 0 })
    );
    // The count check runs before any symbol is looked at
    assert!(matches!(
        compile_tape("]]["),
        Err(CompileError::UnbalancedBrackets { .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_byte_roundtrip_for_short_offsets() {
    for source in ["+[-]>,.", "++>+<[->+<]>.", "", ",[.,]", "+-><"] {
        let program = compile_tape(source).unwrap();
        let bytes = program.to_bytes().unwrap();
        assert_eq!(bytes.len(), program.len());
        assert_eq!(Program::from_bytes(&bytes).unwrap(), program, "source {source:?}");
    }
}

#[test]
fn test_wide_offsets_do_not_encode() {
    let program = compile_tape(HELLO_WORLD).unwrap();
    assert!(matches!(
        program.to_bytes(),
        Err(IsaError::OperandOverflow { .. })
    ));
}

#[test]
fn test_matched_pair_offsets() {
    for source in [HELLO_WORLD, "[[][[]]]", "+[>+[-]<-]"] {
        let program = compile_tape(source).unwrap();
        let pairs = bracket_pairs(&program);
        assert_eq!(pairs.len(), source.matches('[').count());

        for (biz, bnz) in pairs {
            let span = (bnz - biz) as u32;
            assert_eq!(program[biz].operand, span);
            assert_eq!(program[bnz].operand, span);
        }
    }
}

#[test]
fn test_cells_wrap_both_ways() {
    let down = run_tape(&format!("{}.", "-".repeat(300)), b"");
    assert_eq!(down[0], (256 * 2 - 300) as u8);

    let up = run_tape(&format!("{}.", "+".repeat(513)), b"");
    assert_eq!(up[0], 1);
}

#[test]
fn test_circular_buffer_overwrite() {
    let n = 5;
    let k = 2;
    let mut buf = CircularBuffer::new(n).unwrap();
    for i in 0..(n + k) {
        buf.write(100 + i as u8);
    }
    assert_eq!(buf.cursor(), k % n);
    assert_eq!(&buf.as_bytes()[..k], &[105u8, 106]);

    buf.rewind();
    assert_eq!(buf.read(), 105);
}

#[test]
fn test_empty_program_output_is_zero() {
    let output = run_tape("", b"");
    assert_eq!(output.len(), 256);
    assert!(output.iter().all(|&b| b == 0));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Input and output
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_cat_until_zero() {
    let output = run_tape(",[.,]", b"octa");
    assert_eq!(render_text(&output), b"octa");
}

#[test]
fn test_hex_mode_pipeline() {
    let config = VmConfig::default().with_input_encoding(InputEncoding::Hex);
    let program = compile_tape(",.>,.>,.").unwrap();
    let output = run_program(&program, config, Cursor::new(b"de00ad".to_vec())).unwrap();
    assert_eq!(render_hex(&output), "de00ad");
}

#[test]
fn test_tape_and_assembly_agree() {
    let tape = compile_tape("+++[>++<-]>.").unwrap();
    let asm = assemble(
        "
        ; same program, counted by hand
        add 3
        loop:
            biz loop
            adp 1
            add 2
            sdp 1
            sub 1
            bnz loop
        adp 1
        out
        hlt
        ",
    )
    .unwrap();

    let expected = run_program(&tape, VmConfig::default(), empty()).unwrap();
    let actual = run_program(&asm, VmConfig::default(), empty()).unwrap();
    assert_eq!(expected[0], 6);
    assert_eq!(actual, expected);
}

#[test]
fn test_program_json() {
    let program = assemble("add 1 hlt").unwrap();
    let json = serde_json::to_string(&program).unwrap();
    assert_eq!(
        json,
        r#"[{"operator":"Add","operand":1},{"operator":"Halt","operand":0}]"#
    );
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}

#[test]
fn test_umbrella_error() {
    let err = compile_and_run(Language::Tape, "<.", VmConfig::default(), empty()).unwrap_err();
    assert!(matches!(err, Error::Exec(ExecError::IndexOutOfRange { ip: 1, .. })));

    let err = compile_and_run(Language::Assembly, "jmp 1", VmConfig::default(), empty()).unwrap_err();
    assert!(matches!(err, Error::Compile(CompileError::UnrecognizedSymbol { .. })));
}
