/// All of the core data structures used by the deq interpreter.
pub mod data_structures;

/// Module for defining the built-in native operations available to deq scripts.
pub mod built_ins;

/// Module for defining the error reporting of the deq interpreter.
pub mod error;

/// Module for defining the core functionality of the deq interpreter.  This includes the dispatch
/// loop and tools for examining the interpreter's state.
pub mod interpreter;
