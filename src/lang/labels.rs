use crate::{
    lang::tokenizing::TokenList,
    runtime::error::{self, ErrorKind, ScriptError},
};
use log::debug;
use std::collections::HashMap;

/// Label names, without the trailing `:`, mapped to the index of the token that defines them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, usize>,
}

impl LabelTable {
    /// Scan the tokens once, in order, recording every label definition.  Defining the same name
    /// twice is an error that points at both definitions.
    pub fn resolve(tokens: &TokenList) -> error::Result<LabelTable> {
        let mut labels: HashMap<String, usize> = HashMap::new();

        for (index, token) in tokens.iter().enumerate() {
            let Some(name) = token.text().strip_suffix(':') else {
                continue;
            };

            if let Some(&first) = labels.get(name) {
                let first_location = tokens[first].location().clone();

                return Err(ScriptError::new(
                    ErrorKind::Structural,
                    Some(token.location().clone()),
                    format!("label '{}' is already defined!", name),
                    None,
                )
                .with_note(Some(first_location), "first defined here"));
            }

            debug!("label '{}' resolved to token {}", name, index);
            labels.insert(name.to_string(), index);
        }

        Ok(LabelTable { labels })
    }

    /// The token index a label was defined at.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::tokenizing::tokenize_from_source;

    fn resolve(source: &str) -> error::Result<LabelTable> {
        let (tokens, _) = tokenize_from_source("<test>", source);
        LabelTable::resolve(&tokens)
    }

    #[test]
    fn labels_map_to_their_token_index() {
        let labels = resolve("start: 1! loop: 2! loop! jmp!").unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels.find("start"), Some(0));
        assert_eq!(labels.find("loop"), Some(2));
        assert_eq!(labels.find("loop:"), None);
        assert_eq!(labels.find("missing"), None);
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let error = resolve("a: 1! a:").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Structural);
        assert_eq!(error.error(), "label 'a' is already defined!");
        assert_eq!(error.location().as_ref().map(|l| l.column()), Some(6));
        assert_eq!(error.notes().len(), 1);
    }
}
