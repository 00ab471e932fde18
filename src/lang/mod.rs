/// Module for managing the original source code and locations within it.
pub mod source_buffer;

/// Module for turning the source code into a list of tokens for further processing.
pub mod tokenizing;

/// Module for resolving label definitions ahead of execution.
pub mod labels;

/// Module for classifying tokens as labels, keywords, literals and operations.
pub mod code;

/// A tokenized program with its labels, ready to be executed.
pub mod program;
