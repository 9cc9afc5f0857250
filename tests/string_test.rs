mod common;
use c42::mach::{Program, Runtime};
use common::*;

fn start(src: &str) -> Runtime {
    let mut r = Runtime::new(Program::parse(src));
    r.start(None).unwrap();
    r
}

#[test]
fn test_input_string() {
    let mut r = start("#1 main\n41 -1 1\n03 -1\n24 -1 !\n02 -1\n#0\n");
    assert_eq!(exec_with_input(&mut r, &["hi"]), "hi!");
}

#[test]
fn test_input_numbers() {
    let mut r = start("#1 main\n41 -1 0\n03 -1\n09 -1\n02 -1\n41 -2 2\n03 -2\n02 -2\n#0\n");
    assert_eq!(exec_with_input(&mut r, &["41", "2.5"]), "422.5");
}

#[test]
fn test_input_wrong_type() {
    let mut r = start("#1 main\n41 -1 2\n03 -1\n#0\n");
    assert_eq!(
        exec_with_input(&mut r, &["abc"]),
        "[3] CFTE9 : Invalid value for type `float`\n"
    );
}

#[test]
fn test_float_arithmetic() {
    let src = "#1 main\n41 -1 2\n04 -1 1.5\n41 -2 2\n04 -2 2\n07 -1 -2\n02 -1\n#0\n";
    assert_eq!(run(src), "3.0");
}

#[test]
fn test_integer_division_and_modulo() {
    let src = r#"
#1 main
41 -9 1
04 -9 " "
41 -1 0
41 -2 0
04 -1 7
04 -2 -2
08 -1 -2
02 -1
02 -9
04 -1 7
11 -1 -2
02 -1
#0
"#;
    assert_eq!(run(src), "-3 -1");
}

#[test]
fn test_integer_cell_truncates_float_text() {
    assert_eq!(run("#1 main\n41 -1 0\n04 -1 2.9\n02 -1\n#0\n"), "2");
}

#[test]
fn test_overflow() {
    let src = "#1 main\n41 -1 0\n04 -1 9223372036854775807\n09 -1\n#0\n";
    assert_eq!(run(src), "[4] CFTE13 : Overflow\n");
}

#[test]
fn test_invert_reverses_text() {
    let src = "#1 main\n41 -1 1\n04 -1 abc\n22 -1\n02 -1\n41 -2 0\n04 -2 5\n22 -2\n02 -2\n#0\n";
    assert_eq!(run(src), "cba-5");
}

#[test]
fn test_max_min() {
    let src = "#1 main\n41 -1 0\n41 -2 0\n04 -1 3\n04 -2 8\n37 -1 -2\n02 -1\n04 -2 -1\n38 -1 -2\n02 -1\n#0\n";
    assert_eq!(run(src), "8-1");
    let src = "#1 main\n41 -1 1\n41 -2 1\n37 -1 -2\n#0\n";
    assert_eq!(
        run(src),
        "[4] CFTE6 : A `string` cell can't be used in this command\n"
    );
}

#[test]
fn test_string_building() {
    let src = r#"
#1 main
41 -1 1
04 -1 Hello
41 -2 1
04 -2 ", "
41 -3 1
04 -3 world
05 -1 -2
#0
"#;
    assert_eq!(
        run(src),
        "[9] CFTE6 : A `string` cell can't be used in this command\n"
    );
    let src = "#1 main\n41 -1 1\n04 -1 Hello\n24 -1 \", world\"\n19 -1\n02 -1\n#0\n";
    assert_eq!(run(src), "HELLO, WORLD");
}

#[test]
fn test_length_and_delete() {
    let src = r#"
#1 main
41 -1 1
04 -1 abcd
41 -2 0
21 -2 -1
10 -2
27 -1 -2
02 -1
#0
"#;
    assert_eq!(run(src), "abc");
}

#[test]
fn test_recreate_changes_type() {
    let src = "#1 main\n41 -1 1\n04 -1 text\n41 -1 2\n02 -1\n#0\n";
    assert_eq!(run(src), "0.0");
}

#[test]
fn test_bitwise() {
    let src = r#"
#1 main
41 -9 1
04 -9 " "
41 -1 0
41 -2 0
04 -1 12
04 -2 10
30 -1 -2
02 -1
02 -9
04 -1 12
31 -1 -2
02 -1
02 -9
04 -1 12
32 -1 -2
02 -1
02 -9
33 -1
02 -1
#0
"#;
    assert_eq!(run(src), "8 14 6 -7");
}
