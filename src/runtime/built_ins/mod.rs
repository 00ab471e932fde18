/// Words that rearrange values on the deq.
mod deq_words;

/// Words that work with math, logic, bit manipulation and value equality.
mod math_logic_and_bit_words;

/// Words that convert values between types.
mod value_type_words;

/// Jumps, calls and the inversion flag.
mod control_words;

/// Words that write to the program's output.
mod io_words;

use crate::runtime::{
    built_ins::{
        control_words::register_control_words, deq_words::register_deq_words,
        io_words::register_io_words, math_logic_and_bit_words::register_math_logic_and_bit_words,
        value_type_words::register_value_type_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the operation words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_deq_words(interpreter);
    register_math_logic_and_bit_words(interpreter);
    register_value_type_words(interpreter);
    register_control_words(interpreter);
    register_io_words(interpreter);
}
