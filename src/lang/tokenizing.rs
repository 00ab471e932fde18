use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::error::{self, Diagnostic, DiagnosticList, ErrorKind, ScriptError},
};
use std::{
    fmt::{self, Debug, Display, Formatter},
    fs::read_to_string,
};

/// A token is a run of source text and the location in the original source where it started.
///
/// The tokenizer does not interpret the text.  Direction markers, labels and literals are all
/// recognized by the interpreter at dispatch time.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// The token arena.  Values refer back to the tokens that produced them by index into this list.
pub type TokenList = Vec<Token>;

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

impl Token {
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The raw text of the token, direction markers and quotes included.
    pub fn text(&self) -> &String {
        &self.text
    }

    /// Does this token define a label?
    pub fn is_label_definition(&self) -> bool {
        self.text.ends_with(':')
    }
}

/// Check if the given character is considered whitespace.
fn is_whitespace(next: &char) -> bool {
    matches!(*next, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c')
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Skip a `#` comment up to, but not including, the end of the line.
fn skip_comment(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if next == '\n' {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Does the buffer sit at the start of a string literal, either `"` or `!"`?
fn at_string_start(buffer: &mut SourceBuffer) -> bool {
    match buffer.peek_next() {
        Some('"') => true,
        Some('!') => buffer.peek_second() == Some('"'),
        _ => false,
    }
}

/// Capture a string literal verbatim, including the quotes and any direction markers.  A `\`
/// keeps the following character from closing the literal.  Hitting the end of the source is
/// reported but the text gathered so far is still returned.
fn process_string(
    buffer: &mut SourceBuffer,
    diagnostics: &mut DiagnosticList,
) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    if buffer.peek_next() == Some('!') {
        text.extend(buffer.next_char());
    }

    // The opening quote.
    text.extend(buffer.next_char());

    let mut closed = false;

    while let Some(next) = buffer.next_char() {
        text.push(next);

        match next {
            '\\' => text.extend(buffer.next_char()),
            '"' => {
                closed = true;
                break;
            }
            _ => {}
        }
    }

    if !closed {
        diagnostics.push(Diagnostic::error(
            Some(location.clone()),
            "Unclosed string!".to_string(),
        ));
    } else if buffer.peek_next() == Some('!') {
        text.extend(buffer.next_char());
    }

    (location, text)
}

/// Pull text out of the buffer until we hit a whitespace character.  Words can contain any
/// character except whitespace.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            break;
        }

        text.extend(buffer.next_char());
    }

    (location, text)
}

/// Tokenize the source code from a string.  Never fails, problems found along the way are
/// returned as diagnostics next to the tokens.
pub fn tokenize_from_source(path: &str, source: &str) -> (TokenList, DiagnosticList) {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();
    let mut diagnostics = DiagnosticList::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            skip_whitespace(&mut buffer);
            continue;
        }

        if next == '#' {
            skip_comment(&mut buffer);
            continue;
        }

        let (location, text) = if at_string_start(&mut buffer) {
            process_string(&mut buffer, &mut diagnostics)
        } else {
            process_until_whitespace(&mut buffer)
        };

        token_list.push(Token::new(location, text));
    }

    (token_list, diagnostics)
}

/// Load the code from a file and then tokenize it.
pub fn tokenize_from_file(path: &str) -> error::Result<(TokenList, DiagnosticList)> {
    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            return ScriptError::new_as_result(
                ErrorKind::Io,
                None,
                format!("Failed to open file '{}': {}", path, error),
                None,
            );
        }
    };

    let (tokens, mut diagnostics) = tokenize_from_source(path, &source);

    if source.is_empty() {
        diagnostics.insert(
            0,
            Diagnostic::warning(None, format!("File '{}' is empty", path)),
        );
    }

    Ok((tokens, diagnostics))
}
