use crate::{
    lang::{program::Program, source_buffer::SourceLocation},
    runtime::{
        data_structures::{
            deq::{Deq, Direction},
            dictionary::Dictionary,
            value::{Data, Value, ValueType},
        },
        error::{self, ErrorKind, ScriptError},
    },
};
use std::{
    fmt::{self, Display, Formatter},
    io::Write,
    rc::Rc,
};

pub mod deq_interpreter;

/// A call stack frame records where a `call` happened and the direction marker it was written
/// with.  Frames are read-only and the fields are accessed by member functions.
#[derive(Clone, Debug, PartialEq)]
pub struct CallFrame {
    return_index: usize,
    direction: Direction,
    location: SourceLocation,
}

impl CallFrame {
    pub fn new(return_index: usize, direction: Direction, location: SourceLocation) -> CallFrame {
        CallFrame {
            return_index,
            direction,
            location,
        }
    }

    /// Index of the calling token.  Execution resumes just after it.
    pub fn return_index(&self) -> usize {
        self.return_index
    }

    /// The literal direction of the call instruction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// Make sure that a frame can be nicely displayed to the user in event of an error.
impl Display for CallFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: call, returns to {}", self.location, self.return_index + 1)
    }
}

/// The stack of active calls.  Used for `ret` and `calldir` and to give errors a stack trace.
pub type CallStack = Vec<CallFrame>;

/// Settings for a single run of the interpreter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Print the deq and call stack after every executed instruction.
    pub debug: bool,

    /// Stop with an error once this many instructions have been dispatched.
    pub step_limit: Option<u64>,
}

/// How a run that did not fail came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The instruction pointer moved past the last token.
    Completed,

    /// The `exit` operation was executed.
    Exited,
}

/// Trait for managing the interpreter's deq.  Every push and pop works on the effective end of
/// the instruction being executed, that is its direction marker adjusted by the inversion flag.
pub trait InterpreterDeq {
    /// Use to examine the full deq when required, for example by `trace`.
    fn deq(&self) -> &Deq;

    /// The end of the deq the current instruction works on.
    fn direction(&self) -> Direction;

    /// Push new data, attributed to the current instruction's token.
    fn push(&mut self, data: Data);

    /// Push an existing value, keeping the token it was attributed to.
    fn push_value(&mut self, value: Value);

    /// Push an existing value onto a specific end of the deq.
    fn push_value_to(&mut self, direction: Direction, value: Value);

    /// Pop a value from the current end.  If the deq is empty a stack underflow error is
    /// returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Pop a value and require it to be an integer.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Fail with a stack underflow error unless the deq holds at least `count` values.
    fn expect(&self, count: usize) -> error::Result<()>;
}

/// Trait for the control flow state: the instruction pointer, the call stack and the inversion
/// flag.  Changes to the instruction pointer take effect once the current instruction finishes.
pub trait FlowControl {
    /// Index of the token being executed.
    fn current_index(&self) -> usize;

    /// The direction the current instruction's marker selected, before inversion.
    fn literal_direction(&self) -> Direction;

    /// Continue at the given token index.  Targets past the end of the program end the run.
    fn jump(&mut self, target: i64);

    /// Record a call frame for the current instruction, then jump.
    fn call(&mut self, target: i64);

    /// Pop the newest call frame and continue just after its call.
    fn ret(&mut self) -> error::Result<()>;

    /// The current script execution call stack.
    fn call_stack(&self) -> &CallStack;

    fn is_inverted(&self) -> bool;

    fn set_inverted(&mut self, inverted: bool);

    /// Stop the run once the current instruction finishes.
    fn exit(&mut self);
}

/// Definition of a word handler function.  This is the function that is called when an operation
/// is to be executed.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's deq signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $interpreter.add_word(
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Trait for managing the words known to the interpreter.
pub trait WordManagement {
    /// Add a new word to the interpreter's dictionary.
    fn add_word(
        &mut self,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;
}

/// Core interpreter trait.
///
/// Brings together managing the deq, the control flow state and the word dictionary, along with
/// access to the running program and the output the script writes to.
pub trait Interpreter: InterpreterDeq + FlowControl + WordManagement {
    /// The program being executed.
    fn program(&self) -> &Program;

    /// If known, the location of the token being executed.
    fn current_location(&self) -> Option<SourceLocation>;

    /// Where `print`, `putc` and `trace` write to.
    fn output(&mut self) -> &mut dyn Write;
}

/// Build a type error for a value.  The error points at the token that produced the value and a
/// note points at the operation that rejected it.
pub fn type_error<T>(interpreter: &dyn Interpreter, value: &Value, expected: &str) -> error::Result<T> {
    let origin = interpreter
        .program()
        .token(value.origin())
        .map(|token| token.location().clone());

    let error = ScriptError::new(
        ErrorKind::Type,
        origin,
        format!(
            "expected to be {} but got {}",
            expected,
            value.value_type()
        ),
        Some(interpreter.call_stack().clone()),
    );

    Err(error.with_note(interpreter.current_location(), "for this operation"))
}

/// Check values against a required type, in order, failing on the first mismatch.
pub fn typecheck(
    interpreter: &dyn Interpreter,
    values: &[&Value],
    expected: ValueType,
) -> error::Result<()> {
    for value in values {
        if value.value_type() != expected {
            return type_error(interpreter, value, expected.human(false));
        }
    }

    Ok(())
}

/// The integer held by a value, or a type error.
pub fn integer_of(interpreter: &dyn Interpreter, value: &Value) -> error::Result<i64> {
    match value.data() {
        Data::Integer(number) => Ok(*number),
        _ => type_error(interpreter, value, ValueType::Integer.human(false)),
    }
}

/// The real held by a value, or a type error.
pub fn real_of(interpreter: &dyn Interpreter, value: &Value) -> error::Result<f64> {
    match value.data() {
        Data::Real(number) => Ok(*number),
        _ => type_error(interpreter, value, ValueType::Real.human(false)),
    }
}
