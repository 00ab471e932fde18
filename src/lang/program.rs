use crate::{
    lang::{
        labels::LabelTable,
        tokenizing::{Token, TokenList, tokenize_from_file, tokenize_from_source},
    },
    runtime::error::{self, DiagnosticList},
};

/// A loaded program: the token arena and its resolved labels.  Built once and never changed while
/// the program runs.
#[derive(Clone, Debug)]
pub struct Program {
    tokens: TokenList,
    labels: LabelTable,
}

impl Program {
    /// Resolve the labels of an already tokenized program.
    pub fn new(tokens: TokenList) -> error::Result<Program> {
        let labels = LabelTable::resolve(&tokens)?;

        Ok(Program { tokens, labels })
    }

    /// Tokenize and resolve in-memory source.  The path is only used to tag locations.
    pub fn from_source(path: &str, source: &str) -> error::Result<(Program, DiagnosticList)> {
        let (tokens, diagnostics) = tokenize_from_source(path, source);

        Ok((Program::new(tokens)?, diagnostics))
    }

    /// Read, tokenize and resolve a source file.
    pub fn from_file(path: &str) -> error::Result<(Program, DiagnosticList)> {
        let (tokens, diagnostics) = tokenize_from_file(path)?;

        Ok((Program::new(tokens)?, diagnostics))
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
