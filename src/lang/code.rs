use crate::runtime::data_structures::{deq::Direction, value::Data};

/// Words that may appear without a direction marker.
const BARE_KEYWORDS: [&str; 3] = ["trace", "ret", "exit"];

/// How the interpreter should treat a token, decided purely from its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// A `name:` label definition.  Skipped at run time.
    Label,

    /// One of the bare keywords, executed with the default direction.
    Keyword(&'a str),

    /// A literal, operation or label reference with the direction its marker selected.  The word
    /// has the marker stripped.
    Operation { direction: Direction, word: &'a str },
}

/// Could this text be a literal?  Literals may leave off the direction marker, in which case they
/// push to the right.
fn is_literal_shaped(text: &str) -> bool {
    matches!(text.chars().next(), Some(first) if first == '-' || first == '"' || first.is_ascii_digit())
}

/// Classify a token.  The error is the message for a malformed token.
pub fn decode(text: &str) -> Result<Instruction<'_>, &'static str> {
    if BARE_KEYWORDS.contains(&text) {
        return Ok(Instruction::Keyword(text));
    }

    if text.chars().count() < 2 && !is_literal_shaped(text) {
        return Err("token of size less than 2 is impossible!");
    }

    if text.ends_with(':') {
        if text.starts_with('!') {
            return Err(
                "label cannot contain direction specifier! Consider removing '!', if it is a label.",
            );
        }

        return Ok(Instruction::Label);
    }

    let (direction, word) = if let Some(word) = text.strip_prefix('!') {
        (Direction::Left, word)
    } else if let Some(word) = text.strip_suffix('!') {
        (Direction::Right, word)
    } else if is_literal_shaped(text) {
        (Direction::Right, text)
    } else {
        return Err("not a label and no direction specified!");
    };

    if word.is_empty() {
        return Err("token of size less than 2 is impossible!");
    }

    Ok(Instruction::Operation { direction, word })
}

/// Translate the escape sequences of a string literal's body.  Unknown escapes pass the escaped
/// character through.
fn unescape(body: &str) -> String {
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(next) = chars.next() {
        if next != '\\' {
            text.push(next);
            continue;
        }

        match chars.next() {
            Some('n') => text.push('\n'),
            Some('r') => text.push('\r'),
            Some('t') => text.push('\t'),
            Some(other) => text.push(other),
            None => text.push('\\'),
        }
    }

    text
}

/// Try the word as a literal.  `None` means it is not literal shaped at all and should be looked
/// up as an operation or label.
pub fn parse_literal(word: &str) -> Option<Result<Data, &'static str>> {
    let first = word.chars().next()?;

    if first == '-' || first.is_ascii_digit() {
        if let Some(real) = word.strip_suffix('f') {
            return Some(real.parse().map(Data::Real).map_err(|_| "invalid real literal"));
        }

        return Some(word.parse().map(Data::Integer).map_err(|_| "invalid integer literal"));
    }

    if word.len() >= 2 && word.starts_with('"') && word.ends_with('"') {
        return Some(Ok(Data::String(unescape(&word[1..word.len() - 1]))));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("add!", Direction::Right, "add"; "trailing marker")]
    #[test_case("!add", Direction::Left, "add"; "leading marker")]
    #[test_case("!add!", Direction::Left, "add!"; "leading marker wins")]
    #[test_case("12", Direction::Right, "12"; "bare integer")]
    #[test_case("-3", Direction::Right, "-3"; "bare negative")]
    #[test_case("\"hi\"", Direction::Right, "\"hi\""; "bare string")]
    #[test_case("!\"hi\"", Direction::Left, "\"hi\""; "left string")]
    fn operations(text: &str, direction: Direction, word: &str) {
        assert_eq!(decode(text), Ok(Instruction::Operation { direction, word }));
    }

    #[test]
    fn labels_and_keywords() {
        assert_eq!(decode("loop:"), Ok(Instruction::Label));
        assert_eq!(decode("trace"), Ok(Instruction::Keyword("trace")));
        assert_eq!(decode("ret"), Ok(Instruction::Keyword("ret")));
        assert_eq!(decode("exit"), Ok(Instruction::Keyword("exit")));
    }

    #[test_case("!"; "lone marker")]
    #[test_case(":"; "lone colon")]
    #[test_case("x"; "single character")]
    #[test_case("!loop:"; "marked label")]
    #[test_case("add"; "unmarked word")]
    fn malformed(text: &str) {
        assert!(decode(text).is_err());
    }

    #[test]
    fn literals() {
        assert_eq!(parse_literal("42"), Some(Ok(Data::Integer(42))));
        assert_eq!(parse_literal("-7"), Some(Ok(Data::Integer(-7))));
        assert_eq!(parse_literal("2.5f"), Some(Ok(Data::Real(2.5))));
        assert_eq!(parse_literal("-1f"), Some(Ok(Data::Real(-1.0))));
        assert_eq!(parse_literal("\"a\\tb\\\"\""), Some(Ok(Data::String("a\tb\"".to_string()))));
        assert_eq!(parse_literal("\"\""), Some(Ok(Data::String(String::new()))));
        assert_eq!(parse_literal("12x"), Some(Err("invalid integer literal")));
        assert_eq!(parse_literal("-f"), Some(Err("invalid real literal")));
        assert_eq!(parse_literal("add"), None);
        assert_eq!(parse_literal("\"open"), None);
    }
}
