#[path = "../common/kulac_program.rs"]
mod kulac_program;

use insta::assert_snapshot;
use kula::bytecode::op_code::OpCode::*;
use kulac_program::{ProgramBuilder, op, opn, run_err, run_ok};

#[test]
fn call_binds_parameters_in_order() {
    let mut p = ProgramBuilder::new();
    let a = p.symbol("a");
    let b = p.symbol("b");
    let sub = p.function(
        &["a", "b"],
        vec![opn(OpLoad, a), opn(OpLoad, b), op(OpSub), op(OpReturnValue)],
    );
    let ten = p.number(10.0);
    let three = p.number(3.0);
    p.emit([
        opn(OpFunction, sub),
        opn(OpLoadConst, ten),
        opn(OpLoadConst, three),
        opn(OpCall, 2),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "7\n");
}

#[test]
fn missing_argument_is_unbound() {
    let mut p = ProgramBuilder::new();
    let b = p.symbol("b");
    let second = p.function(&["a", "b"], vec![opn(OpLoad, b), op(OpReturnValue)]);
    p.emit([
        opn(OpFunction, second),
        opn(OpLoadConst, 1),
        opn(OpCall, 1),
    ]);

    assert!(run_err(&p.build()).starts_with("error[E1001]: undefined variable `b`"));
}

#[test]
fn function_without_return_yields_none() {
    let mut p = ProgramBuilder::new();
    let noop = p.function(&[], vec![]);
    p.emit([opn(OpFunction, noop), opn(OpCall, 0), opn(OpPrint, 1)]);

    assert_eq!(run_ok(&p.build()), "null\n");
}

#[test]
fn closures_capture_variables_by_reference() {
    let mut p = ProgramBuilder::new();
    let x = p.symbol("x");
    let f = p.symbol("f");
    let read_x = p.function(&[], vec![opn(OpLoad, x), op(OpReturnValue)]);
    let one = p.number(1.0);
    let two = p.number(2.0);
    p.emit([
        opn(OpLoadConst, one),
        opn(OpDeclare, x),
        op(OpPop),
        opn(OpFunction, read_x),
        opn(OpDeclare, f),
        op(OpPop),
        opn(OpLoadConst, two),
        opn(OpAssign, x),
        op(OpPop),
        opn(OpLoad, f),
        opn(OpCall, 0),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "2\n");
}

#[test]
fn counters_keep_independent_state() {
    let mut p = ProgramBuilder::new();
    let n = p.symbol("n");
    let make = p.symbol("makeCounter");
    let counter = p.symbol("counter");
    let zero = p.number(0.0);
    let one = p.number(1.0);
    let increment = p.function(
        &[],
        vec![
            opn(OpLoad, n),
            opn(OpLoadConst, one),
            op(OpAdd),
            opn(OpAssign, n),
            op(OpReturnValue),
        ],
    );
    let make_counter = p.function(
        &[],
        vec![
            opn(OpLoadConst, zero),
            opn(OpDeclare, n),
            op(OpPop),
            opn(OpFunction, increment),
            op(OpReturnValue),
        ],
    );
    p.emit([
        opn(OpFunction, make_counter),
        opn(OpDeclare, make),
        op(OpPop),
        opn(OpLoad, make),
        opn(OpCall, 0),
        opn(OpDeclare, counter),
        op(OpPop),
    ]);
    for _ in 0..3 {
        p.emit([opn(OpLoad, counter), opn(OpCall, 0)]);
    }
    p.emit([
        opn(OpLoad, make),
        opn(OpCall, 0),
        opn(OpCall, 0),
        opn(OpPrint, 4),
    ]);

    assert_eq!(run_ok(&p.build()), "1 2 3 1\n");
}

#[test]
fn self_recursion_computes_factorial() {
    let mut p = ProgramBuilder::new();
    let n = p.symbol("n");
    let me = p.symbol("self");
    let one = p.number(1.0);
    let five = p.number(5.0);
    let factorial = p.function(
        &["n"],
        vec![
            opn(OpLoad, n),
            opn(OpLoadConst, one),
            op(OpLessThanOrEqual),
            opn(OpJumpFalsy, 6),
            opn(OpLoadConst, one),
            op(OpReturnValue),
            // 6
            opn(OpLoad, n),
            opn(OpLoad, me),
            opn(OpLoad, n),
            opn(OpLoadConst, one),
            op(OpSub),
            opn(OpCall, 1),
            op(OpMul),
            op(OpReturnValue),
        ],
    );
    p.emit([
        opn(OpFunction, factorial),
        opn(OpLoadConst, five),
        opn(OpCall, 1),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "120\n");
}

#[test]
fn recursion_through_a_global_name() {
    let mut p = ProgramBuilder::new();
    let n = p.symbol("n");
    let fib = p.symbol("fib");
    let one = p.number(1.0);
    let two = p.number(2.0);
    let fifteen = p.number(15.0);
    let body = p.function(
        &["n"],
        vec![
            opn(OpLoad, n),
            opn(OpLoadConst, two),
            op(OpLessThan),
            opn(OpJumpFalsy, 6),
            opn(OpLoad, n),
            op(OpReturnValue),
            // 6
            opn(OpLoad, fib),
            opn(OpLoad, n),
            opn(OpLoadConst, one),
            op(OpSub),
            opn(OpCall, 1),
            opn(OpLoad, fib),
            opn(OpLoad, n),
            opn(OpLoadConst, two),
            op(OpSub),
            opn(OpCall, 1),
            op(OpAdd),
            op(OpReturnValue),
        ],
    );
    p.emit([
        opn(OpFunction, body),
        opn(OpDeclare, fib),
        op(OpPop),
        opn(OpLoad, fib),
        opn(OpLoadConst, fifteen),
        opn(OpCall, 1),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "610\n");
}

#[test]
fn methods_see_their_receiver_as_this() {
    let mut p = ProgramBuilder::new();
    let this = p.symbol("this");
    let as_object = p.symbol("asObject");
    let obj = p.symbol("obj");
    let name_key = p.text("name");
    let name = p.text("kula");
    let greet_key = p.text("greet");
    let greet = p.function(
        &[],
        vec![
            opn(OpLoad, this),
            opn(OpLoadConst, name_key),
            op(OpGet),
            op(OpReturnValue),
        ],
    );
    p.emit([
        opn(OpLoad, as_object),
        opn(OpLoadConst, name_key),
        opn(OpLoadConst, name),
        opn(OpLoadConst, greet_key),
        opn(OpFunction, greet),
        opn(OpCall, 4),
        opn(OpDeclare, obj),
        op(OpPop),
        opn(OpLoad, obj),
    ]);
    let call = p.method_call("greet", vec![]);
    p.emit(call).emit([opn(OpPrint, 1)]);

    assert_eq!(run_ok(&p.build()), "kula\n");
}

#[test]
fn object_with_func_entry_can_be_called() {
    let mut p = ProgramBuilder::new();
    let as_object = p.symbol("asObject");
    let func_key = p.text("__func__");
    let called = p.text("called");
    let body = p.function(&[], vec![opn(OpLoadConst, called), op(OpReturnValue)]);
    p.emit([
        opn(OpLoad, as_object),
        opn(OpLoadConst, func_key),
        opn(OpFunction, body),
        opn(OpCall, 2),
        opn(OpCall, 0),
        opn(OpPrint, 1),
    ]);

    assert_eq!(run_ok(&p.build()), "called\n");
}

#[test]
fn errors_in_nested_calls_list_every_frame() {
    let mut p = ProgramBuilder::new();
    let inner = p.symbol("inner");
    let ghost = p.symbol("ghost");
    let outer_fn = p.function(&[], vec![opn(OpLoad, inner), opn(OpCall, 0), op(OpReturnValue)]);
    let inner_fn = p.function(&[], vec![opn(OpLoad, ghost)]);
    p.emit([
        opn(OpFunction, inner_fn),
        opn(OpDeclare, inner),
        op(OpPop),
        opn(OpFunction, outer_fn),
        opn(OpCall, 0),
    ]);

    assert_snapshot!(run_err(&p.build()), @r"
    error[E1001]: undefined variable `ghost`

    Stack trace:
      at function #1 (ip 0)
      at function #0 (ip 1)
      at <top-level> (ip 4)
    ");
}

#[test]
fn unbounded_recursion_is_stopped() {
    let mut p = ProgramBuilder::new();
    let me = p.symbol("self");
    let forever = p.function(&[], vec![opn(OpLoad, me), opn(OpCall, 0), op(OpReturnValue)]);
    p.emit([opn(OpFunction, forever), opn(OpCall, 0)]);

    assert!(
        run_err(&p.build()).starts_with("error[E1011]: maximum call depth of 4096 exceeded")
    );
}
