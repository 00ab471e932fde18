use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Write a value without a trailing new line.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;

    write!(interpreter.output(), "{}", value)?;

    Ok(())
}

/// Write a value followed by a new line.
///
/// Signature: `value -- `
fn word_print_line(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;

    writeln!(interpreter.output(), "{}", value)?;

    Ok(())
}

/// Write the low byte of an integer as a single character.
///
/// Signature: `character -- `
fn word_put_character(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let character = interpreter.pop_as_int()?;

    interpreter.output().write_all(&[character as u8])?;

    Ok(())
}

/// Write every value on the deq, left to right, each with its type.  Nothing is popped.
fn word_trace(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let rendering = interpreter.deq().to_string();

    writeln!(interpreter.output(), "{}", rendering)?;

    Ok(())
}

/// Register the output words.
pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "print", word_print,
        "Write a value.",
        "value -- ");

    add_native_word!(interpreter, "println", word_print_line,
        "Write a value and a new line.",
        "value -- ");

    add_native_word!(interpreter, "putc", word_put_character,
        "Write an integer as a single character.",
        "character -- ");

    add_native_word!(interpreter, "trace", word_trace,
        "Write the contents of the deq.",
        " -- ");
}
