use crate::{
    add_native_word,
    runtime::{
        data_structures::value::{Data, format_real},
        error::{self, ErrorKind, script_error},
        interpreter::{Interpreter, type_error},
    },
};

/// Convert an integer or a string to a real.  A string must hold nothing but decimal text,
/// surrounding whitespace aside.
///
/// Signature: `value -- real`
fn word_to_real(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;

    let real = match value.data() {
        Data::Integer(number) => *number as f64,
        Data::String(text) => match text.trim().parse::<f64>() {
            Ok(number) => number,
            Err(_) => {
                return script_error(
                    interpreter,
                    ErrorKind::Conversion,
                    format!("could not convert '{}' to a real", text),
                );
            }
        },
        Data::Real(_) => return type_error(interpreter, &value, "an integer or a string"),
    };

    interpreter.push(Data::Real(real));

    Ok(())
}

/// Convert a real or a string to an integer.  Reals are truncated toward zero, saturating at the
/// integer range.
///
/// Signature: `value -- integer`
fn word_to_integer(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;

    let integer = match value.data() {
        Data::Real(number) => *number as i64,
        Data::String(text) => match text.trim().parse::<i64>() {
            Ok(number) => number,
            Err(_) => {
                return script_error(
                    interpreter,
                    ErrorKind::Conversion,
                    format!("could not convert '{}' to an integer", text),
                );
            }
        },
        Data::Integer(_) => return type_error(interpreter, &value, "a real or a string"),
    };

    interpreter.push(Data::Integer(integer));

    Ok(())
}

/// Render an integer or a real as a string, exactly as `print` would.
///
/// Signature: `value -- string`
fn word_to_string(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.expect(1)?;
    let value = interpreter.pop()?;

    let text = match value.data() {
        Data::Integer(number) => number.to_string(),
        Data::Real(number) => format_real(*number),
        Data::String(_) => return type_error(interpreter, &value, "an integer or a real"),
    };

    interpreter.push(Data::String(text));

    Ok(())
}

/// Register the type conversion words.
pub fn register_value_type_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ">real",
        word_to_real,
        "Convert an integer or a string to a real.",
        "value -- real"
    );

    add_native_word!(
        interpreter,
        ">integer",
        word_to_integer,
        "Convert a real or a string to an integer.",
        "value -- integer"
    );

    add_native_word!(
        interpreter,
        ">string",
        word_to_string,
        "Convert an integer or a real to a string.",
        "value -- string"
    );
}
