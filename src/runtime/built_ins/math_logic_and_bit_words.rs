use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{Data, Value, ValueType},
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::{Interpreter, integer_of, real_of, typecheck},
    },
};

/// Integer half of an arithmetic word.  The error is reported as an arithmetic fault.
type IntegerOp = fn(i64, i64) -> Result<i64, &'static str>;

/// Pop the two values nearest the operation's end, returned as `(below, top)`.
fn pop_operands(interpreter: &mut dyn Interpreter) -> error::Result<(Value, Value)> {
    interpreter.expect(2)?;
    let top = interpreter.pop()?;
    let below = interpreter.pop()?;

    Ok((below, top))
}

/// Pop two integers, returned as `(below, top)`.  The lower value is type checked first.
fn pop_integers(interpreter: &mut dyn Interpreter) -> error::Result<(i64, i64)> {
    let (below, top) = pop_operands(interpreter)?;

    Ok((integer_of(interpreter, &below)?, integer_of(interpreter, &top)?))
}

/// Helper function to handle the arithmetic words.  If either operand is an integer both must be,
/// otherwise if either is a real both must be.  Integers are never promoted to reals.  The result
/// is `below op top`.
fn math_op(interpreter: &mut dyn Interpreter, iop: IntegerOp, fop: fn(f64, f64) -> f64) -> error::Result<()> {
    let (below, top) = pop_operands(interpreter)?;

    let result = if Value::either_is_integer(&below, &top) {
        let a = integer_of(interpreter, &below)?;
        let b = integer_of(interpreter, &top)?;

        match iop(a, b) {
            Ok(result) => Data::Integer(result),
            Err(message) => return script_error_str(interpreter, ErrorKind::Arithmetic, message),
        }
    } else if Value::either_is_real(&below, &top) {
        let a = real_of(interpreter, &below)?;
        let b = real_of(interpreter, &top)?;

        Data::Real(fop(a, b))
    } else {
        return script_error(
            interpreter,
            ErrorKind::Type,
            format!(
                "expected two {} or two {}",
                ValueType::Integer.human(true),
                ValueType::Real.human(true)
            ),
        );
    };

    interpreter.push(result);

    Ok(())
}

/// Helper function for the words that only work on integers.
fn integer_op(interpreter: &mut dyn Interpreter, iop: IntegerOp) -> error::Result<()> {
    let (a, b) = pop_integers(interpreter)?;

    match iop(a, b) {
        Ok(result) => {
            interpreter.push(Data::Integer(result));
            Ok(())
        }

        Err(message) => script_error_str(interpreter, ErrorKind::Arithmetic, message),
    }
}

/// Helper function for the comparison and logic words, pushing 1 for true and 0 for false.
fn predicate_op(interpreter: &mut dyn Interpreter, test: fn(i64, i64) -> bool) -> error::Result<()> {
    let (a, b) = pop_integers(interpreter)?;

    interpreter.push(Data::from(test(a, b)));

    Ok(())
}

/// Helper for `eq` and `neq`.  Both values must be of the same type, the first operand that
/// breaks that is reported as a type error.
fn equality_op(interpreter: &mut dyn Interpreter, equal_result: bool) -> error::Result<()> {
    interpreter.expect(2)?;
    let first = interpreter.pop()?;
    let second = interpreter.pop()?;

    let expected = if Value::either_is_integer(&first, &second) {
        ValueType::Integer
    } else if Value::either_is_real(&first, &second) {
        ValueType::Real
    } else {
        ValueType::String
    };

    typecheck(interpreter, &[&first, &second], expected)?;

    let equal = first.data() == second.data();
    interpreter.push(Data::from(equal == equal_result));

    Ok(())
}

fn divide(a: i64, b: i64) -> Result<i64, &'static str> {
    if b == 0 {
        return Err("division by zero");
    }

    a.checked_div(b).ok_or("integer overflow in division")
}

fn remainder(a: i64, b: i64) -> Result<i64, &'static str> {
    if b == 0 {
        return Err("division by zero");
    }

    a.checked_rem(b).ok_or("integer overflow in division")
}

fn shift_amount(b: i64) -> Result<u32, &'static str> {
    u32::try_from(b)
        .ok()
        .filter(|amount| *amount < i64::BITS)
        .ok_or("shift amount out of range")
}

/// Add two integers or two reals.  Integers wrap on overflow.
///
/// Signature: `a b -- a+b`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| Ok(a.wrapping_add(b)), |a, b| a + b)
}

/// Multiply two integers or two reals.
///
/// Signature: `a b -- a*b`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| Ok(a.wrapping_mul(b)), |a, b| a * b)
}

/// Subtract the value nearest the end from the one below it.
///
/// Signature: `a b -- a-b`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, |a, b| Ok(a.wrapping_sub(b)), |a, b| a - b)
}

/// Divide the value below by the value nearest the end.  Integer division by zero is an error.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, divide, |a, b| a / b)
}

/// Signature: `a b -- a%b`
fn word_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, remainder)
}

/// Arithmetic shift right.
///
/// Signature: `a b -- a>>b`
fn word_shift_right(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a >> shift_amount(b)?))
}

/// Signature: `a b -- a<<b`
fn word_shift_left(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a << shift_amount(b)?))
}

/// Signature: `a b -- a&b`
fn word_bit_and(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a & b))
}

/// Signature: `a b -- a|b`
fn word_bit_or(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a | b))
}

/// Signature: `a -- ~a`
fn word_bit_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop_as_int()?;

    interpreter.push(Data::Integer(!value));

    Ok(())
}

fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    equality_op(interpreter, true)
}

fn word_not_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    equality_op(interpreter, false)
}

fn word_less(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    predicate_op(interpreter, |a, b| a < b)
}

fn word_less_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    predicate_op(interpreter, |a, b| a <= b)
}

fn word_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    predicate_op(interpreter, |a, b| a > b)
}

fn word_greater_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    predicate_op(interpreter, |a, b| a >= b)
}

/// Logical and, any non-zero integer is true.
///
/// Signature: `a b -- 0|1`
fn word_and(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    predicate_op(interpreter, |a, b| a != 0 && b != 0)
}

/// Signature: `a b -- 0|1`
fn word_or(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    predicate_op(interpreter, |a, b| a != 0 || b != 0)
}

/// Signature: `a -- 0|1`
fn word_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop_as_int()?;

    interpreter.push(Data::from(value == 0));

    Ok(())
}

/// Register the math, logic and bit words.
pub fn register_math_logic_and_bit_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "add", word_add,
        "Add two integers or two reals.",
        "a b -- result");

    add_native_word!(interpreter, "mul", word_multiply,
        "Multiply two integers or two reals.",
        "a b -- result");

    add_native_word!(interpreter, "sub", word_subtract,
        "Subtract b from a, two integers or two reals.",
        "a b -- result");

    add_native_word!(interpreter, "div", word_divide,
        "Divide a by b, two integers or two reals.",
        "a b -- result");

    add_native_word!(interpreter, "mod", word_mod,
        "Remainder of dividing integer a by integer b.",
        "a b -- result");

    add_native_word!(interpreter, "shr", word_shift_right,
        "Arithmetic shift of a right by b bits.",
        "a b -- result");

    add_native_word!(interpreter, "shl", word_shift_left,
        "Shift a left by b bits.",
        "a b -- result");

    add_native_word!(interpreter, "band", word_bit_and,
        "Bitwise and of two integers.",
        "a b -- result");

    add_native_word!(interpreter, "bor", word_bit_or,
        "Bitwise or of two integers.",
        "a b -- result");

    add_native_word!(interpreter, "bnot", word_bit_not,
        "Bitwise complement of an integer.",
        "a -- result");

    add_native_word!(interpreter, "eq", word_equal,
        "Are two values of the same type equal?",
        "a b -- bool");

    add_native_word!(interpreter, "neq", word_not_equal,
        "Are two values of the same type different?",
        "a b -- bool");

    add_native_word!(interpreter, "lt", word_less,
        "Is integer a less than b?",
        "a b -- bool");

    add_native_word!(interpreter, "lteq", word_less_equal,
        "Is integer a less than or equal to b?",
        "a b -- bool");

    add_native_word!(interpreter, "gt", word_greater,
        "Is integer a greater than b?",
        "a b -- bool");

    add_native_word!(interpreter, "gteq", word_greater_equal,
        "Is integer a greater than or equal to b?",
        "a b -- bool");

    add_native_word!(interpreter, "and", word_and,
        "Logical and of two integers.",
        "a b -- bool");

    add_native_word!(interpreter, "or", word_or,
        "Logical or of two integers.",
        "a b -- bool");

    add_native_word!(interpreter, "not", word_not,
        "Logical not of an integer.",
        "a -- bool");
}
