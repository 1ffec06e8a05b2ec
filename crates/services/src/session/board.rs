use rand::RngCore;
use rand::seq::SliceRandom;

use telugu_core::model::MatchPair;

/// Shuffled right column of a text-matching session.
///
/// Built once when the items arrive and fixed afterwards: the option list is
/// always a permutation of the fetched right-column values, never duplicated
/// and never dropped. The randomness source is injected so tests can assert
/// permutation properties deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBoard {
    options: Vec<String>,
}

impl MatchBoard {
    pub(crate) fn shuffled(pairs: &[&MatchPair], rng: &mut dyn RngCore) -> Self {
        let mut options: Vec<String> = pairs.iter().map(|pair| pair.right().to_owned()).collect();
        options.shuffle(rng);
        Self { options }
    }

    /// The right-column values in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option == value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
