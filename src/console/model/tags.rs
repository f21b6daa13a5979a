use serde::{Deserialize, Serialize};

/// Ordered list of tag labels, kept free of duplicates by [`Tags::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Tags(Vec<String>);

impl Tags {
    /// Append a trimmed tag. Empty input and exact (case-sensitive) duplicates are rejected.
    pub fn add(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.0.iter().any(|t| t == tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Remove by position, out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.0.len() {
            return Some(self.0.remove(index));
        }
        None
    }

    /// Replace every tag from comma separated input, each piece trimmed.
    pub fn replace_from_csv(&mut self, csv: &str) {
        self.0 = csv.split(',').map(|t| t.trim().to_string()).collect();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<&str>> for Tags {
    fn from(tags: Vec<&str>) -> Self {
        Self(tags.into_iter().map(String::from).collect())
    }
}
