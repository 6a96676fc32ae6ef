#[path = "../common/kulac_program.rs"]
mod kulac_program;

use insta::assert_snapshot;
use kula::bytecode::op_code::OpCode::*;
use kulac_program::{ProgramBuilder, op, opn, run_err, run_ok, run_program};

#[test]
fn prints_a_text_literal() {
    let mut p = ProgramBuilder::new();
    let hi = p.text("hi");
    p.emit([opn(OpLoadConst, hi), opn(OpPrint, 1)]);

    assert_eq!(run_ok(&p.build()), "hi\n");
}

#[test]
fn empty_program_prints_nothing() {
    assert_eq!(run_ok(&ProgramBuilder::new().build()), "");
}

#[test]
fn print_joins_values_with_spaces() {
    let mut p = ProgramBuilder::new();
    let a = p.number(1.5);
    let b = p.number(2.0);
    let x = p.text("x");
    p.emit([
        opn(OpLoadConst, a),
        opn(OpLoadConst, b),
        op(OpMul),
        opn(OpLoadConst, x),
        opn(OpLoadConst, 2),
        opn(OpLoadConst, 1),
        opn(OpPrint, 4),
    ]);

    assert_eq!(run_ok(&p.build()), "3 x null true\n");
}

#[test]
fn numbers_print_with_trimmed_fraction() {
    let mut p = ProgramBuilder::new();
    let zero = p.number(0.0);
    let one = p.number(1.0);
    let three = p.number(3.0);
    let minus_one = p.number(-1.0);
    let half = p.number(2.5);
    let hundred = p.number(100.0);
    let divide = |l, r| [opn(OpLoadConst, l), opn(OpLoadConst, r), op(OpDiv), opn(OpPrint, 1)];
    p.emit(divide(one, three))
        .emit(divide(one, zero))
        .emit(divide(minus_one, zero))
        .emit(divide(zero, zero))
        .emit([opn(OpLoadConst, half), opn(OpPrint, 1)])
        .emit([opn(OpLoadConst, hundred), opn(OpPrint, 1)]);

    assert_snapshot!(run_ok(&p.build()), @r"
    0.33333333
    +Inf
    -Inf
    NaN
    2.5
    100
    ");
}

#[test]
fn modulo_truncates_both_operands() {
    let mut p = ProgramBuilder::new();
    let a = p.number(7.9);
    let b = p.number(3.0);
    let c = p.number(-7.0);
    let d = p.number(2.9);
    p.emit([
        opn(OpLoadConst, a),
        opn(OpLoadConst, b),
        op(OpMod),
        opn(OpLoadConst, c),
        opn(OpLoadConst, d),
        op(OpMod),
        opn(OpPrint, 2),
    ]);

    assert_eq!(run_ok(&p.build()), "1 -1\n");
}

#[test]
fn modulo_by_fraction_below_one_fails() {
    let mut p = ProgramBuilder::new();
    let a = p.number(5.0);
    let b = p.number(0.5);
    p.emit([opn(OpLoadConst, a), opn(OpLoadConst, b), op(OpMod)]);

    assert_snapshot!(run_err(&p.build()), @r"
    error[E1007]: modulo by zero

    Stack trace:
      at <top-level> (ip 2)
    ");
}

#[test]
fn while_loop_sums_a_range() {
    let mut p = ProgramBuilder::new();
    let i = p.symbol("i");
    let sum = p.symbol("sum");
    let zero = p.number(0.0);
    let one = p.number(1.0);
    let ten = p.number(10.0);
    p.emit([
        opn(OpLoadConst, zero),
        opn(OpDeclare, sum),
        op(OpPop),
        opn(OpLoadConst, one),
        opn(OpDeclare, i),
        op(OpPop),
        // 6: while i <= 10
        opn(OpLoad, i),
        opn(OpLoadConst, ten),
        op(OpLessThanOrEqual),
        opn(OpJumpFalsy, 21),
        opn(OpLoad, sum),
        opn(OpLoad, i),
        op(OpAdd),
        opn(OpAssign, sum),
        op(OpPop),
        opn(OpLoad, i),
        opn(OpLoadConst, one),
        op(OpAdd),
        opn(OpAssign, i),
        op(OpPop),
        opn(OpJump, 6),
        // 21
        opn(OpLoad, sum),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "55\n");
}

#[test]
fn short_circuit_jumps_keep_or_skip() {
    // print(none || "fallback")
    let mut p = ProgramBuilder::new();
    let fallback = p.text("fallback");
    p.emit([
        opn(OpLoadConst, 2),
        op(OpDup),
        opn(OpJumpTruthy, 5),
        op(OpPop),
        opn(OpLoadConst, fallback),
        // 5
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "fallback\n");
}

#[test]
fn text_concatenation_and_comparison() {
    let mut p = ProgramBuilder::new();
    let foo = p.text("foo");
    let bar = p.text("bar");
    let foobar = p.text("foobar");
    let one = p.number(1.0);
    let two = p.number(2.0);
    p.emit([
        opn(OpLoadConst, foo),
        opn(OpLoadConst, bar),
        op(OpAdd),
        op(OpDup),
        opn(OpLoadConst, foobar),
        op(OpEqual),
        opn(OpLoadConst, one),
        opn(OpLoadConst, two),
        op(OpLessThan),
        opn(OpLoadConst, one),
        opn(OpLoadConst, foo),
        op(OpNotEqual),
        opn(OpPrint, 4),
    ]);

    assert_eq!(run_ok(&p.build()), "foobar true true true\n");
}

#[test]
fn only_none_and_false_are_falsy() {
    let mut p = ProgramBuilder::new();
    let zero = p.number(0.0);
    let empty = p.text("");
    let five = p.number(5.0);
    p.emit([
        opn(OpLoadConst, zero),
        op(OpNot),
        opn(OpLoadConst, empty),
        op(OpNot),
        opn(OpLoadConst, five),
        op(OpNeg),
        opn(OpLoadConst, 2),
        op(OpNot),
        opn(OpPrint, 4),
    ]);

    assert_eq!(run_ok(&p.build()), "false false false true\n");
}

#[test]
fn block_scopes_shadow_and_restore() {
    let mut p = ProgramBuilder::new();
    let x = p.symbol("x");
    let outer = p.text("outer");
    let inner = p.text("inner");
    p.emit([
        opn(OpLoadConst, outer),
        opn(OpDeclare, x),
        op(OpPop),
        op(OpEnvStart),
        opn(OpLoadConst, inner),
        opn(OpDeclare, x),
        op(OpPop),
        opn(OpLoad, x),
        opn(OpPrint, 1),
        op(OpEnvEnd),
        opn(OpLoad, x),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "inner\nouter\n");
}

#[test]
fn assignment_reaches_the_declaring_scope() {
    let mut p = ProgramBuilder::new();
    let x = p.symbol("x");
    let one = p.number(1.0);
    let two = p.number(2.0);
    p.emit([
        opn(OpLoadConst, one),
        opn(OpDeclare, x),
        op(OpPop),
        op(OpEnvStart),
        opn(OpLoadConst, two),
        opn(OpAssign, x),
        op(OpPop),
        op(OpEnvEnd),
        opn(OpLoad, x),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "2\n");
}

#[test]
fn undefined_variable_reports_the_top_level() {
    let mut p = ProgramBuilder::new();
    let ghost = p.symbol("ghost");
    p.emit([opn(OpLoad, ghost)]);

    assert_snapshot!(run_err(&p.build()), @r"
    error[E1001]: undefined variable `ghost`

    Stack trace:
      at <top-level> (ip 0)
    ");
}

#[test]
fn assigning_an_undeclared_name_fails() {
    let mut p = ProgramBuilder::new();
    let ghost = p.symbol("ghost");
    p.emit([opn(OpLoadConst, 1), opn(OpAssign, ghost)]);

    assert!(run_err(&p.build()).starts_with("error[E1001]: undefined variable `ghost`"));
}

#[test]
fn mixed_arithmetic_is_a_type_mismatch() {
    let mut p = ProgramBuilder::new();
    let one = p.number(1.0);
    let a = p.text("a");
    p.emit([opn(OpLoadConst, one), opn(OpLoadConst, a), op(OpSub)]);

    assert_snapshot!(run_err(&p.build()), @r"
    error[E1002]: unsupported operand types for SUB: Number and String

    Stack trace:
      at <top-level> (ip 2)
    ");
}

#[test]
fn output_before_an_error_is_kept() {
    let mut p = ProgramBuilder::new();
    let before = p.text("before");
    p.emit([opn(OpLoadConst, before), opn(OpPrint, 1), op(OpEnvEnd)]);

    let run = run_program(&p.build());
    assert_eq!(run.output, "before\n");
    assert_eq!(run.result.unwrap_err().code(), "E1009");
}

#[test]
fn typeof_uses_argument_or_call_site() {
    let mut p = ProgramBuilder::new();
    let type_of = p.symbol("typeof");
    let five = p.number(5.0);
    let s = p.text("s");
    p.emit([
        opn(OpLoad, type_of),
        opn(OpLoadConst, five),
        opn(OpCall, 1),
        opn(OpLoadConst, s),
        opn(OpLoad, type_of),
        opn(OpCallWith, 0),
        opn(OpLoad, type_of),
        opn(OpCall, 0),
        opn(OpPrint, 3),
    ]);

    assert_eq!(run_ok(&p.build()), "Number String None\n");
}

#[test]
fn global_conversions() {
    let mut p = ProgramBuilder::new();
    let string = p.symbol("String");
    let boolean = p.symbol("Bool");
    let as_array = p.symbol("asArray");
    let zero = p.number(0.0);
    let seven = p.number(7.0);
    let word = p.text("w");
    p.emit([
        opn(OpLoad, as_array),
        opn(OpLoadConst, seven),
        opn(OpLoadConst, word),
        opn(OpLoadConst, 2),
        opn(OpCall, 3),
        op(OpDup),
        opn(OpPrint, 1),
        opn(OpLoad, string),
        opn(OpLoadConst, seven),
        opn(OpCall, 1),
        opn(OpLoad, boolean),
        opn(OpLoadConst, zero),
        opn(OpCall, 1),
        opn(OpPrint, 3),
    ]);

    assert_eq!(run_ok(&p.build()), "[7,\"w\",null]\n[7,\"w\",null] 7 true\n");
}

#[test]
fn native_errors_render_their_message() {
    let mut p = ProgramBuilder::new();
    let as_object = p.symbol("asObject");
    let key = p.text("k");
    p.emit([
        opn(OpLoad, as_object),
        opn(OpLoadConst, key),
        opn(OpCall, 1),
    ]);

    assert_snapshot!(run_err(&p.build()), @r"
    error[E1006]: asObject expected key/value pairs, got 1 arguments

    Stack trace:
      at <top-level> (ip 2)
    ");
}

#[test]
fn native_arity_mismatch_is_reported() {
    let mut p = ProgramBuilder::new();
    let clock = p.symbol("clock");
    p.emit([opn(OpLoad, clock), opn(OpLoadConst, 1), opn(OpCall, 1)]);

    assert!(
        run_err(&p.build())
            .starts_with("error[E1012]: wrong number of arguments to clock: want=0, got=1")
    );
}

#[test]
fn calling_a_number_fails() {
    let mut p = ProgramBuilder::new();
    let one = p.number(1.0);
    p.emit([opn(OpLoadConst, one), opn(OpCall, 0)]);

    assert!(run_err(&p.build()).starts_with("error[E1005]: value of type Number is not callable"));
}

#[test]
fn clock_returns_elapsed_seconds() {
    let mut p = ProgramBuilder::new();
    let clock = p.symbol("clock");
    let type_of = p.symbol("typeof");
    let zero = p.number(0.0);
    p.emit([
        opn(OpLoad, type_of),
        opn(OpLoad, clock),
        opn(OpCall, 0),
        opn(OpCall, 1),
        opn(OpLoad, clock),
        opn(OpCall, 0),
        opn(OpLoadConst, zero),
        op(OpGreaterThanOrEqual),
        opn(OpPrint, 2),
    ]);

    assert_eq!(run_ok(&p.build()), "Number true\n");
}
