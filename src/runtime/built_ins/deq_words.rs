use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

// Signatures are written as seen from the end the operation works on, the rightmost item is the
// value nearest that end.

/// Drop the value at the operation's end.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let _ = interpreter.pop()?;

    Ok(())
}

/// Duplicate the value at the operation's end.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;

    interpreter.push_value(value.clone());
    interpreter.push_value(value);

    Ok(())
}

/// Swap the two values nearest the operation's end.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(2)?;
    let top = interpreter.pop()?;
    let below = interpreter.pop()?;

    interpreter.push_value(top);
    interpreter.push_value(below);

    Ok(())
}

/// Take the value from the operation's end and put it on the other end of the deq.
///
/// Signature: `value -- `
fn word_move(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;
    let other_end = interpreter.direction().opposite();

    interpreter.push_value_to(other_end, value);

    Ok(())
}

/// Rotate the three values nearest the operation's end.
///
/// Signature: `a b c -- a c b`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(3)?;
    let top = interpreter.pop()?;
    let below = interpreter.pop()?;
    let under = interpreter.pop()?;

    interpreter.push_value(under);
    interpreter.push_value(top);
    interpreter.push_value(below);

    Ok(())
}

/// Copy the second value over the first.
///
/// Signature: `a b -- a b a`
fn word_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(2)?;
    let top = interpreter.pop()?;
    let below = interpreter.pop()?;

    interpreter.push_value(below.clone());
    interpreter.push_value(top);
    interpreter.push_value(below);

    Ok(())
}

/// Register the deq manipulation words.
pub fn register_deq_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Drop the value at the operation's end.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the value at the operation's end.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the two values nearest the operation's end.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "move",
        word_move,
        "Move the value at the operation's end to the other end.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "rot",
        word_rot,
        "Rotate the three values nearest the operation's end.",
        "a b c -- a c b"
    );

    add_native_word!(
        interpreter,
        "over",
        word_over,
        "Copy the second value over the first.",
        "a b -- a b a"
    );
}
