// End to end tests of the deq language, run against an in-memory output buffer.

use deq::lang::program::Program;
use deq::runtime::data_structures::deq::Deq;
use deq::runtime::error::{ErrorKind, Result};
use deq::runtime::interpreter::deq_interpreter::DeqInterpreter;
use deq::runtime::interpreter::{Config, InterpreterDeq, Outcome};
use test_case::test_case;

/// Everything a run leaves behind.
struct Run {
    result: Result<Outcome>,
    deq: Deq,
    output: String,
    steps: u64,
}

fn run_with(source: &str, config: Config) -> Run {
    let (program, diagnostics) = Program::from_source("<test>", source).unwrap();
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);

    let mut interpreter = DeqInterpreter::new(program, config, Vec::<u8>::new());
    let result = interpreter.run();
    let deq = interpreter.deq().clone();
    let steps = interpreter.steps();
    let output = String::from_utf8(interpreter.into_output()).unwrap();

    Run { result, deq, output, steps }
}

fn run(source: &str) -> Run {
    run_with(source, Config::default())
}

/// Run a program that must complete, returning its output.
fn output_of(source: &str) -> String {
    let run = run(source);
    assert_eq!(run.result.unwrap(), Outcome::Completed);
    run.output
}

/// Run a program that must fail, checking the kind and message of the failure.
fn expect_failure(source: &str, kind: ErrorKind, message: &str) {
    let error = run(source).result.unwrap_err();

    assert_eq!(error.kind(), kind, "{}", error);
    assert_eq!(error.error(), message);
}

#[test]
fn unmarked_literals_push_right() {
    let run = run("1 2 add! println!");

    assert_eq!(run.result.unwrap(), Outcome::Completed);
    assert_eq!(run.output, "3\n");
    assert!(run.deq.is_empty());
}

#[test]
fn swap_exchanges_the_end_values() {
    assert_eq!(output_of("\"ab\"! \"cd\"! swap! print! print!"), "abcd");
    assert_eq!(output_of("\"ab\"! \"cd\"! print! print!"), "cdab");
}

#[test]
fn unequal_integers_compare_false() {
    assert_eq!(output_of("0! 1! eq! println!"), "0\n");
}

#[test]
fn endless_loop_hits_the_step_limit() {
    let config = Config { debug: false, step_limit: Some(50) };
    let run = run_with("loop: 1! println! loop! jmp!", config);
    let error = run.result.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::StepLimit);
    assert_eq!(error.error(), "step limit of 50 exceeded");
    assert_eq!(run.output, "1\n".repeat(10));
}

#[test]
fn integer_division_by_zero_is_fatal() {
    let run = run("5! 0! div!");
    let error = run.result.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Arithmetic);
    assert_eq!(error.error(), "division by zero");
    assert_eq!(error.location().as_ref().unwrap().to_string(), "<test>:1:7");
    assert!(run.deq.is_empty());
}

#[test_case("1! 64! shl!", "shift amount out of range"; "shift left too far")]
#[test_case("1! -1! shr!", "shift amount out of range"; "negative shift")]
#[test_case("-9223372036854775808! -1! div!", "integer overflow in division"; "div overflow")]
#[test_case("-9223372036854775808! -1! mod!", "integer overflow in division"; "mod overflow")]
#[test_case("5! 0! mod!", "division by zero"; "mod by zero")]
fn integer_faults_are_fatal(source: &str, message: &str) {
    expect_failure(source, ErrorKind::Arithmetic, message);
}

#[test]
fn return_without_call_is_fatal() {
    expect_failure("ret!", ErrorKind::CallStack, "call stack is empty");
    expect_failure("1! println! ret", ErrorKind::CallStack, "call stack is empty");
}

#[test_case(5, 3; "small")]
#[test_case(-17, 42; "negative")]
#[test_case(i64::MAX, 1; "overflowing add")]
#[test_case(i64::MIN, -1; "overflowing sub")]
#[test_case(0, 0; "zero")]
fn add_then_sub_restores(a: i64, b: i64) {
    let source = format!("{}! {}! add! {}! sub! println!", a, b, b);

    assert_eq!(output_of(&source), format!("{}\n", a));
}

#[test_case("1! 2.5f! \"x\"!"; "mixed types")]
#[test_case("!7 8! !9"; "both ends")]
fn dup_then_drop_is_identity(prefix: &str) {
    let plain = run(&format!("{} trace", prefix));
    let changed = run(&format!("{} dup! drop! !dup !drop trace", prefix));

    assert_eq!(plain.output, changed.output);
    assert_eq!(plain.deq.len(), changed.deq.len());
}

#[test_case("1! 2! !3 trace", "1! 2! 1! setinverted! 3! trace"; "left push")]
#[test_case("1! 2! 3! trace", "1! 2! 1! setinverted! !3 trace"; "right push")]
#[test_case("1! 2! 3! !drop trace", "1! 2! 3! 1! setinverted! drop! trace"; "left pop")]
#[test_case("4! 6! sub! println!", "4! 6! 1! setinverted! !sub !println"; "arithmetic")]
fn inversion_flips_the_marker(marked: &str, inverted: &str) {
    assert_eq!(output_of(marked), output_of(inverted));
}

#[test]
fn label_addresses_are_token_positions() {
    let output = output_of("a: 1! b: a! a! b! trace");

    assert_eq!(output, "1(an integer) 0(an integer) 0(an integer) 2(an integer) \n");
}

#[test_case("1! 2! 3! move! trace", "3(an integer) 1(an integer) 2(an integer) \n"; "move right to left")]
#[test_case("1! 2! 3! !move trace", "2(an integer) 3(an integer) 1(an integer) \n"; "move left to right")]
#[test_case("1! 2! 3! rot! trace", "1(an integer) 3(an integer) 2(an integer) \n"; "rot")]
#[test_case("1! 2! over! trace", "1(an integer) 2(an integer) 1(an integer) \n"; "over")]
#[test_case("1! 2! 3! !swap trace", "2(an integer) 1(an integer) 3(an integer) \n"; "swap on the left")]
#[test_case("trace", "\n"; "empty")]
#[test_case("\"hi\"! 2.5f! trace", "hi(a string) 2.5(a real) \n"; "types")]
fn deq_words(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

#[test_case("!10 !3 !sub !println", "7\n"; "sub on the left")]
#[test_case("7! 2! div! println!", "3\n"; "integer div")]
#[test_case("-7! 2! mod! println!", "-1\n"; "mod")]
#[test_case("6! 7! mul! println!", "42\n"; "mul")]
#[test_case("1f! 3f! div! println!", "0.333333\n"; "real div")]
#[test_case("0.1f! 0.2f! add! println!", "0.3\n"; "real add")]
#[test_case("1e20f! println!", "1e+20\n"; "large real")]
#[test_case("6! 3! band! println!", "2\n"; "band")]
#[test_case("6! 3! bor! println!", "7\n"; "bor")]
#[test_case("1! 4! shl! println!", "16\n"; "shl")]
#[test_case("-16! 2! shr! println!", "-4\n"; "shr")]
#[test_case("0! bnot! println!", "-1\n"; "bnot")]
fn arithmetic(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

#[test_case("1! 2! lt!", 1; "lt")]
#[test_case("2! 2! lteq!", 1; "lteq")]
#[test_case("1! 2! gt!", 0; "gt")]
#[test_case("3! 2! gteq!", 1; "gteq")]
#[test_case("\"a\"! \"a\"! eq!", 1; "equal strings")]
#[test_case("1.5f! 1.5f! neq!", 0; "equal reals")]
#[test_case("1! 2! neq!", 1; "different integers")]
#[test_case("1! 0! and!", 0; "and")]
#[test_case("1! 0! or!", 1; "or")]
#[test_case("0! not!", 1; "not")]
#[test_case("-3! not!", 0; "not of non-zero")]
fn predicates(source: &str, expected: i64) {
    assert_eq!(output_of(&format!("{} println!", source)), format!("{}\n", expected));
}

#[test_case("\"42\"! >integer! println!", "42\n"; "string to integer")]
#[test_case("\" 2.5 \"! >real! println!", "2.5\n"; "string to real")]
#[test_case("7! >real! println!", "7\n"; "integer to real")]
#[test_case("2.75f! >integer! println!", "2\n"; "real to integer")]
#[test_case("-2.75f! >integer! println!", "-2\n"; "negative real to integer")]
#[test_case("1.5f! >string! \"!\"! swap! print! println!", "1.5!\n"; "real to string")]
#[test_case("12! >string! \"3\"! swap! print! println!", "123\n"; "integer to string")]
fn conversions(source: &str, expected: &str) {
    assert_eq!(output_of(source), expected);
}

#[test_case("\"abc\"! >integer!", "could not convert 'abc' to an integer"; "bad integer")]
#[test_case("\"1.2.3\"! >real!", "could not convert '1.2.3' to a real"; "bad real")]
fn failed_conversions(source: &str, message: &str) {
    expect_failure(source, ErrorKind::Conversion, message);
}

#[test]
fn type_errors_point_at_the_value_and_the_operation() {
    let error = run("1! \"x\"! add!").result.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(error.error(), "expected to be an integer but got a string");
    assert_eq!(error.location().as_ref().unwrap().to_string(), "<test>:1:4");

    assert_eq!(error.notes().len(), 1);
    assert_eq!(error.notes()[0].to_string(), "<test>:1:9: [NOTE] for this operation");
}

#[test_case("1! 2f! add!", "expected to be an integer but got a real"; "integer and real")]
#[test_case("\"a\"! \"b\"! add!", "expected two integers or two reals"; "two strings")]
#[test_case("1! \"1\"! eq!", "expected to be an integer but got a string"; "eq across types")]
#[test_case("1.5f! 1! band!", "expected to be an integer but got a real"; "bitwise on a real")]
#[test_case("7! >integer!", "expected to be a real or a string but got an integer"; "integer to integer")]
#[test_case("\"x\"! jmp!", "expected to be an integer but got a string"; "jump to a string")]
fn type_errors(source: &str, message: &str) {
    expect_failure(source, ErrorKind::Type, message);
}

#[test_case("1! add!", "expected to have at least 2 elements on the deq"; "add")]
#[test_case("drop!", "expected to have at least 1 elements on the deq"; "drop")]
#[test_case("1! 2! rot!", "expected to have at least 3 elements on the deq"; "rot")]
fn underflow(source: &str, message: &str) {
    expect_failure(source, ErrorKind::StackUnderflow, message);
}

#[test]
fn malformed_programs() {
    expect_failure("foo!", ErrorKind::UnknownOperation, "unexpected token");
    expect_failure("add", ErrorKind::Structural, "not a label and no direction specified!");
    expect_failure("1! 1! x", ErrorKind::Structural, "token of size less than 2 is impossible!");
    expect_failure("1x!", ErrorKind::Structural, "invalid integer literal");

    let error = Program::from_source("<test>", "a: 1! a:").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Structural);
}

#[test]
fn call_and_return() {
    let source = "main: greet! call! \"after\"! println! exit greet: \"in\"! println! ret";
    let run = run(source);

    assert_eq!(run.result.unwrap(), Outcome::Exited);
    assert_eq!(run.output, "in\nafter\n");
}

#[test]
fn call_direction_is_recorded() {
    let run = run("f! !call exit f: calldir! println! ret");

    assert_eq!(run.result.unwrap(), Outcome::Exited);
    assert_eq!(run.output, "1\n");

    expect_failure("calldir!", ErrorKind::CallStack, "call stack is empty");
}

#[test]
fn invertdir_pushes_then_flips() {
    assert_eq!(output_of("!invertdir 5! trace"), "5(an integer) 1(an integer) \n");
    assert_eq!(output_of("invertdir! invertdir! 5! trace"), "0(an integer) 0(an integer) 5(an integer) \n");
}

#[test]
fn conditional_loop() {
    let run = run("3! loop: dup! println! 1! sub! dup! loop! jnz! drop!");

    assert_eq!(run.result.unwrap(), Outcome::Completed);
    assert_eq!(run.output, "3\n2\n1\n");
    assert!(run.deq.is_empty());
}

#[test]
fn jump_if_zero() {
    assert_eq!(output_of("0! skip! jz! \"no\"! println! skip: \"yes\"! println!"), "yes\n");
    assert_eq!(output_of("1! skip! jz! \"no\"! println! skip: \"yes\"! println!"), "no\nyes\n");
}

#[test_case("100! jmp! 1! println!"; "past the end")]
#[test_case("-1! jmp! 1! println!"; "negative")]
fn jumps_out_of_the_program_complete(source: &str) {
    assert_eq!(output_of(source), "");
}

#[test]
fn exit_stops_the_run() {
    let run = run("1! println! exit 2! println!");

    assert_eq!(run.result.unwrap(), Outcome::Exited);
    assert_eq!(run.output, "1\n");
    assert_eq!(run.steps, 3);
}

#[test]
fn characters_and_escapes() {
    assert_eq!(output_of("72! putc! 105! putc!"), "Hi");
    assert_eq!(output_of("\"a\\tb\"! println!"), "a\tb\n");
    assert_eq!(output_of("\"say \\\"hi\\\"\"! println!"), "say \"hi\"\n");
}

#[test]
fn debug_mode_dumps_state_after_each_instruction() {
    let config = Config { debug: true, step_limit: None };
    let run = run_with("start: 1! 2!", config);

    assert_eq!(
        run.output,
        "DEQUE STATE:\n1(an integer) \nCALL STACK: \n\
         DEQUE STATE:\n1(an integer) 2(an integer) \nCALL STACK: \n"
    );
}

#[test]
fn debug_mode_skips_the_dump_after_a_bare_trace() {
    let config = Config { debug: true, step_limit: None };
    let run = run_with("1! trace", config);

    assert_eq!(run.output, "DEQUE STATE:\n1(an integer) \nCALL STACK: \n1(an integer) \n");
}
