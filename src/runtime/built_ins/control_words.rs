use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{Data, ValueType},
        error::{self, ErrorKind, script_error_str},
        interpreter::{Interpreter, typecheck},
    },
};

/// Continue execution at a token index, usually the address of a label.
///
/// Signature: `address -- `
fn word_jump(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let target = interpreter.pop_as_int()?;

    interpreter.jump(target);

    Ok(())
}

/// Shared body of `jz` and `jnz`.  The address is nearest the operation's end.
fn jump_if(interpreter: &mut dyn Interpreter, when_zero: bool) -> error::Result<()> {
    interpreter.expect(2)?;
    let address = interpreter.pop()?;
    let value = interpreter.pop()?;

    typecheck(interpreter, &[&value, &address], ValueType::Integer)?;

    if let (Data::Integer(value), Data::Integer(address)) = (value.data(), address.data())
        && (*value == 0) == when_zero
    {
        interpreter.jump(*address);
    }

    Ok(())
}

/// Signature: `value address -- `
fn word_jump_if_zero(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    jump_if(interpreter, true)
}

/// Signature: `value address -- `
fn word_jump_if_not_zero(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    jump_if(interpreter, false)
}

/// Call the code at an address.  The call site and its direction marker are remembered on the
/// call stack.
///
/// Signature: `address -- `
fn word_call(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let target = interpreter.pop_as_int()?;

    interpreter.call(target);

    Ok(())
}

/// Return to just after the most recent call.
fn word_return(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.ret()
}

/// Push the direction marker of the most recent call, 1 for left and 0 for right.
///
/// Signature: ` -- direction`
fn word_call_direction(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let direction = match interpreter.call_stack().last() {
        Some(frame) => frame.direction(),
        None => return script_error_str(interpreter, ErrorKind::CallStack, "call stack is empty"),
    };

    interpreter.push(Data::Integer(direction.as_int()));

    Ok(())
}

/// Push this instruction's own direction marker, then flip the inversion flag.
///
/// Signature: ` -- direction`
fn word_invert_direction(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let direction = interpreter.literal_direction();

    interpreter.push(Data::Integer(direction.as_int()));

    let inverted = interpreter.is_inverted();
    interpreter.set_inverted(!inverted);

    Ok(())
}

/// Set the inversion flag, any non-zero integer turns it on.
///
/// Signature: `flag -- `
fn word_set_inverted(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let flag = interpreter.pop_as_int()?;

    interpreter.set_inverted(flag != 0);

    Ok(())
}

fn word_exit(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.exit();
    Ok(())
}

/// Register the control flow words.
pub fn register_control_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "jmp", word_jump,
        "Jump to an address.",
        "address -- ");

    add_native_word!(interpreter, "jz", word_jump_if_zero,
        "Jump to an address if the value is zero.",
        "value address -- ");

    add_native_word!(interpreter, "jnz", word_jump_if_not_zero,
        "Jump to an address if the value is not zero.",
        "value address -- ");

    add_native_word!(interpreter, "call", word_call,
        "Call the code at an address.",
        "address -- ");

    add_native_word!(interpreter, "ret", word_return,
        "Return to just after the most recent call.",
        " -- ");

    add_native_word!(interpreter, "calldir", word_call_direction,
        "Direction of the most recent call, 1 for left.",
        " -- direction");

    add_native_word!(interpreter, "invertdir", word_invert_direction,
        "Push this instruction's direction and flip the inversion flag.",
        " -- direction");

    add_native_word!(interpreter, "setinverted", word_set_inverted,
        "Set the inversion flag.",
        "flag -- ");

    add_native_word!(interpreter, "exit", word_exit,
        "Stop the program.",
        " -- ");
}
