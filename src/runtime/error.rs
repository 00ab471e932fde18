use std::{ error::Error,
           process::Termination,
           fmt::{ self, Debug, Display, Formatter }, process::ExitCode };
use crate::{ runtime::interpreter::CallStack,
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// How serious a diagnostic is.  Rendered as the bracketed tag of the console protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity
{
    Error,
    Warning,
    Note
}


impl Display for Severity
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Severity::Error   => write!(f, "[ERR]"),
            Severity::Warning => write!(f, "[WRN]"),
            Severity::Note    => write!(f, "[NOTE]")
        }
    }
}



/// A single human readable line for the error stream.  Lex-time problems are reported as
/// diagnostics without stopping the run, and notes hang off of script errors.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic
{
    severity: Severity,
    location: Option<SourceLocation>,
    message: String
}


pub type DiagnosticList = Vec<Diagnostic>;


impl Display for Diagnostic
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {} {}", location, self.severity, self.message),
            None => write!(f, "{} {}", self.severity, self.message)
        }
    }
}


impl Diagnostic
{
    pub fn new(severity: Severity, location: Option<SourceLocation>, message: String) -> Diagnostic
    {
        Diagnostic { severity, location, message }
    }

    pub fn error(location: Option<SourceLocation>, message: String) -> Diagnostic
    {
        Diagnostic::new(Severity::Error, location, message)
    }

    pub fn warning(location: Option<SourceLocation>, message: String) -> Diagnostic
    {
        Diagnostic::new(Severity::Warning, location, message)
    }

    pub fn note(location: Option<SourceLocation>, message: String) -> Diagnostic
    {
        Diagnostic::new(Severity::Note, location, message)
    }

    pub fn severity(&self) -> Severity
    {
        self.severity
    }
}



/// The category of a fatal error.  Every one of these stops the script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind
{
    /// The source file could not be read, or output could not be written.
    Io,

    /// A malformed token: missing direction, direction on a label, duplicate label, bad literal.
    Structural,

    /// An operand had the wrong type for the operation.
    Type,

    /// The deq held fewer values than the operation needed.
    StackUnderflow,

    /// A word matched neither the operation vocabulary nor a label.
    UnknownOperation,

    /// A return, or a call direction query, with an empty call stack.
    CallStack,

    /// Division by zero, overflowing division, or an out of range shift.
    Arithmetic,

    /// A string could not be converted to a number.
    Conversion,

    /// The configured step limit was exceeded.
    StepLimit
}



/// Any error that stops the execution of a deq script.
#[derive(Clone)]
pub struct ScriptError
{
    /// What sort of failure this is.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// Extra context printed after the error line.
    notes: DiagnosticList,

    /// The script's call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    /// Because this type represents an error, the exit code is always FAILURE.
    fn report(self) -> ExitCode
    {
        eprintln!("{}", self);
        ExitCode::FAILURE
    }
}


/// Print the error line, any notes, then the call stack if there is one.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", Diagnostic::error(self.location.clone(), self.error.clone()))?;

        for note in &self.notes
        {
            write!(f, "\n{}", note)?;
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind,
               location: Option<SourceLocation>,
               error: String,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error,
                notes: DiagnosticList::new(),
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error, call_stack))
    }

    /// Attach a note, printed after the error line.
    pub fn with_note(mut self, location: Option<SourceLocation>, message: &str) -> ScriptError
    {
        self.notes.push(Diagnostic::note(location, message.to_string()));
        self
    }

    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    pub fn notes(&self) -> &DiagnosticList
    {
        &self.notes
    }

    /// If available, the script's call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(kind, location, message, Some(call_stack))
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
