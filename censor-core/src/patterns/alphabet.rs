//! Confusable-character folding.
//!
//! Each `similar` group of the alphabet table folds onto the first character
//! of `latin` that the group contains. Folding is one character for one
//! character, so character positions in folded text line up with the source.

use std::collections::HashMap;

use log::debug;

use crate::config::AlphabetTable;

#[derive(Debug, Clone, Default)]
pub struct ConfusableFold {
    map: HashMap<char, char>,
}

impl ConfusableFold {
    pub fn new(table: &AlphabetTable) -> Self {
        let mut map = HashMap::new();
        for group in &table.similar {
            let Some(canonical) = table.latin.chars().find(|c| group.contains(*c)) else {
                debug!("Confusable group '{}' has no canonical character; skipped.", group);
                continue;
            };
            for c in group.chars() {
                map.insert(c, canonical);
            }
        }
        debug!("Built confusable fold map with {} entries.", map.len());
        Self { map }
    }

    pub fn fold_char(&self, c: char) -> char {
        self.map.get(&c).copied().unwrap_or(c)
    }

    /// Maps every character to its canonical form.
    pub fn to_latin(&self, text: &str) -> String {
        text.chars().map(|c| self.fold_char(c)).collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
