//! Narrow filters, sent as nested JSON arrays such as
//! `[["stream", "general"], ["topic", "lunch"]]`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An ordered list of filter terms, each `[operator, operand, ...]`.
///
/// The default is a single empty term (`[[]]`), which matches everything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Narrow(Vec<Vec<String>>);

impl Default for Narrow {
    fn default() -> Self {
        Self(vec![Vec::new()])
    }
}

impl Narrow {
    /// A narrow with no terms at all (`[]`).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Appends an `[operator, operand]` term.
    pub fn term(mut self, operator: impl Into<String>, operand: impl Into<String>) -> Self {
        // Drop the match-all placeholder once a real term is added.
        if self.0.len() == 1 && self.0[0].is_empty() {
            self.0.clear();
        }
        self.0.push(vec![operator.into(), operand.into()]);
        self
    }

    /// Messages in the named stream.
    pub fn stream(self, name: impl Into<String>) -> Self {
        self.term("stream", name)
    }

    /// Messages with this topic; pair with [`Narrow::stream`].
    pub fn topic(self, name: impl Into<String>) -> Self {
        self.term("topic", name)
    }

    /// Messages sent by the user with this email.
    pub fn sender(self, email: impl Into<String>) -> Self {
        self.term("sender", email)
    }

    /// Messages with a flag or property, e.g. `private`, `starred`, `mentioned`.
    pub fn is(self, operand: impl Into<String>) -> Self {
        self.term("is", operand)
    }

    /// Full-text search.
    pub fn search(self, text: impl Into<String>) -> Self {
        self.term("search", text)
    }

    pub fn terms(&self) -> &[Vec<String>] {
        &self.0
    }

    /// The JSON text sent to the server. Terms are passed through as given.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.0).map_err(|e| Error::InvalidNarrow(e.to_string()))
    }
}

impl From<Vec<Vec<String>>> for Narrow {
    fn from(terms: Vec<Vec<String>>) -> Self {
        Self(terms)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Narrow {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .fold(Narrow::empty(), |narrow, (operator, operand)| narrow.term(operator, operand))
    }
}
