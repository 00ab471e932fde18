/// Module contains the Value type and the data it wraps.  Values are the only thing a deq script
/// can manipulate.
pub mod value;

/// The double-ended store of values and the directions it can be worked from.
pub mod deq;

/// The dictionary of operation words known to the interpreter.
pub mod dictionary;
