use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the source code where a token was found.  Used throughout the interpreter to
/// attribute diagnostics to the text that caused them.
///
/// Rows and columns are stored zero based and printed one based.  This is a read-only structure,
/// use the field accessor methods to get the values.
#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source code, for example "<test>".
    path: String,

    /// The zero based column of the token.
    column: usize,

    /// The zero based row of the token.
    row: usize
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


/// Printed as `path:row:col`, both one based.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{}:{}:{}", self.path, self.row + 1, self.column + 1)
    }
}


impl SourceLocation
{
    /// Crate a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), column: 0, row: 0 }
    }

    /// Create a new SourceLocation at the very start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), column: 0, row: 0 }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, column: usize, row: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), column, row }
    }

    /// The path to the source code or a meaningful description of the source code.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The zero based column in the source code.
    pub fn column(&self) -> usize
    {
        self.column
    }

    /// The zero based row in the source code.
    pub fn row(&self) -> usize
    {
        self.row
    }
}



/// A forward only cursor over source text.  As characters are consumed the location of the next
/// character is maintained, letting the tokenizer tag every token with where it started.
///
/// The buffer only borrows the source code, it is expected to outlive the SourceBuffer.
pub struct SourceBuffer<'a>
{
    /// Iterator over the remaining characters, past any peeked character.
    chars: Chars<'a>,

    /// The location of the next character to be consumed.
    location: SourceLocation,

    /// A character that has been peeked but not yet consumed.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new SourceBuffer with the path to, or meaningful tag for the source code and the
    /// source code itself.
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    /// The location of the next character in the source code.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character in the source code without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        match self.current
        {
            Some(_) => self.current,
            None =>
                {
                    let next = self.chars.next();

                    self.current = next;
                    next
                }
        }
    }

    /// Peek at the character following the next one, without consuming either.
    pub fn peek_second(&mut self) -> Option<char>
    {
        self.peek_next()?;
        self.chars.clone().next()
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None => self.chars.next()
            };

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  New lines move to the start of the next row.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.row += 1;
            self.location.column = 0;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
