use crate::runtime::interpreter::WordHandler;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// The information stored in the dictionary for each operation word.
#[derive(Clone)]
pub struct WordInfo {
    /// The name of the word, without direction markers.
    pub name: String,

    /// A simple description of the word.
    pub description: String,

    /// The word's deq signature, written from the end the operation acts on.
    pub signature: String,

    /// The native function that executes the word.
    pub handler: Rc<WordHandler>,
}

impl WordInfo {
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }
}

/// The operation vocabulary known to an interpreter, keyed by word.
#[derive(Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary::default()
    }

    /// Add a word, replacing any previous word of the same name.
    pub fn insert(&mut self, info: WordInfo) {
        self.words.insert(info.name.clone(), info);
    }

    pub fn find(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// List the words alphabetically with their signatures and descriptions.
impl Display for Dictionary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut words: Vec<&WordInfo> = self.words.values().collect();
        words.sort_by(|a, b| a.name.cmp(&b.name));

        let width = words.iter().map(|info| info.name.len()).max().unwrap_or(0);

        for info in words {
            writeln!(
                f,
                "{:width$}  {:<16}  {}",
                info.name,
                info.signature,
                info.description,
                width = width
            )?;
        }

        Ok(())
    }
}
