use hack_vmc::{Unit, translate_unit, translate_units};

fn lines(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| s.to_string()).collect()
}

#[test]
fn simple_add_pushes_two_constants_and_adds() {
    let src = lines(&["push constant 7", "push constant 8", "add"]);
    let asm = translate_unit("SimpleAdd", &src).unwrap();
    assert!(asm.contains("@7"));
    assert!(asm.contains("@8"));
    assert!(asm.contains("D+M"));
}

#[test]
fn stack_test_exercises_every_arithmetic_op() {
    let src = lines(&[
        "push constant 17", "push constant 17", "eq", "push constant 17", "push constant 16",
        "eq", "push constant 5", "push constant 3", "lt", "push constant 3", "push constant 5",
        "gt", "push constant 91", "push constant 2", "and", "push constant 91", "push constant 1",
        "or", "push constant 91", "not", "push constant 91", "neg",
    ]);
    let asm = translate_unit("StackTest", &src).unwrap();
    for needle in ["JEQ", "JLT", "JGT", "D&M", "D|M", "D=!D", "D=A-D"] {
        assert!(asm.contains(needle), "missing {needle}");
    }
}

#[test]
fn basic_test_exercises_every_segment() {
    let src = lines(&[
        "push constant 10", "pop local 0", "push constant 21", "push constant 22", "pop argument 2",
        "pop argument 1", "push constant 36", "pop this 6", "push constant 42", "push constant 45",
        "pop that 5", "pop that 2", "push constant 510", "pop temp 6", "push local 0",
        "push that 5", "add", "push argument 1", "sub", "push this 6", "push pointer 0",
        "pop pointer 1", "push that 5", "add",
    ]);
    let asm = translate_unit("BasicTest", &src).unwrap();
    assert!(asm.contains("@LCL"));
    assert!(asm.contains("@ARG"));
    assert!(asm.contains("@THIS"));
    assert!(asm.contains("@THAT"));
    assert!(asm.contains("@11\nD=A")); // temp 6 -> RAM[11]
}

#[test]
fn pointer_test_writes_this_and_that_directly() {
    let src = lines(&["push constant 3040", "pop pointer 0", "push constant 3041", "pop pointer 1"]);
    let asm = translate_unit("PointerTest", &src).unwrap();
    assert!(asm.contains("@THIS\nM=D"));
    assert!(asm.contains("@THAT\nM=D"));
}

#[test]
fn static_test_scopes_by_file_basename() {
    let src = lines(&["push constant 111", "pop static 0", "push static 0"]);
    let asm = translate_unit("StaticTest", &src).unwrap();
    assert!(asm.contains("@StaticTest.0"));
}

#[test]
fn fibonacci_element_calls_across_two_functions() {
    let main_unit = lines(&[
        "push constant 4",
        "call Main.fibonacci 1",
        "label WHILE",
        "goto WHILE",
    ]);
    let fib_unit = lines(&[
        "function Main.fibonacci 0",
        "push argument 0",
        "push constant 2",
        "lt",
        "if-goto N_LT_2",
        "push argument 0",
        "push constant 2",
        "sub",
        "call Main.fibonacci 1",
        "push argument 0",
        "push constant 1",
        "sub",
        "call Main.fibonacci 1",
        "add",
        "return",
        "label N_LT_2",
        "push argument 0",
        "return",
    ]);
    let units = vec![
        Unit {
            name: "Main",
            lines: &main_unit,
        },
        Unit {
            name: "Fibonacci",
            lines: &fib_unit,
        },
    ];
    let asm = translate_units("Fibonacci", &units).unwrap();
    assert!(asm.contains("(Main.fibonacci)"));
    // Recursive calls from within the same function get distinct return labels.
    assert!(asm.contains("(Main.fibonacci$ret.1)"));
    assert!(asm.contains("(Main.fibonacci$ret.2)"));
    // A label outside any function scopes to the unit name.
    assert!(asm.contains("(Main$WHILE)"));
}

#[test]
fn nested_call_restores_caller_segments_via_return() {
    let src = lines(&[
        "function Sys.init 0",
        "call Sys.main 0",
        "return",
        "function Sys.main 0",
        "push constant 1",
        "return",
    ]);
    let asm = translate_unit("Sys", &src).unwrap();
    assert!(asm.contains("(Sys.init)"));
    assert!(asm.contains("(Sys.main)"));
    // return restores THAT/THIS/ARG/LCL from the saved frame before jumping back.
    assert!(asm.contains("@THAT\nM=D"));
    assert!(asm.contains("@THIS\nM=D"));
}

#[test]
fn every_unit_is_prefixed_with_the_bootstrap_sequence() {
    let src = lines(&["push constant 0"]);
    let asm = translate_unit("Solo", &src).unwrap();
    assert!(asm.starts_with("@256\nD=A\n@SP\nM=D\n@Solo$ret.1\nD=A\n"));
    assert!(asm.contains("@Sys.init\n0;JMP\n"));
}

#[test]
fn invalid_segment_reports_line_number() {
    let src = lines(&["push constant 1", "push nonsense 0"]);
    assert!(hack_vmc::translate_unit("Bad", &src).is_err());
}
