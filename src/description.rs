//! Human-readable annotations for channel name segments.
//!
//! Every component of a channel name can be annotated through the Channel
//! Information System web interface. A [`Description`] extends a bare name
//! segment (`"PSL"`) with the explanation recorded there
//! (`"Pre-Stabilized Laser"`). Not every segment of the ~100,000-channel
//! corpus is annotated; an unannotated segment is simply absent from the
//! service, which is an expected outcome and never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An annotated channel name segment.
///
/// Constructed from a successful CIS lookup (see
/// [`CisClient::description`](crate::CisClient::description)) or via
/// [`Description::new`]; immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    /// The name segment being described, e.g. `PSL`. Never empty.
    pub segment: String,
    /// Short human-readable explanation. Empty when the service record
    /// carries no annotation text.
    pub text: String,
    /// Extended explanation, when an editor has written one.
    pub details: Option<String>,
    /// CIS unique identifier of the record.
    pub id: Option<u64>,
    /// CIS API URL of the record.
    pub url: Option<String>,
    /// Identity of the author of the last edit.
    pub editor: Option<String>,
    /// Creation time of the record.
    pub created: Option<DateTime<Utc>>,
    /// Last modification time of the record.
    pub modified: Option<DateTime<Utc>>,
}

impl Description {
    /// Create a description for `segment` with the given explanation text.
    pub fn new(segment: &str, text: &str) -> Self {
        Self {
            segment: segment.to_string(),
            text: text.to_string(),
            details: None,
            id: None,
            url: None,
            editor: None,
            created: None,
            modified: None,
        }
    }

    /// Attach an extended explanation.
    pub fn with_details(mut self, details: impl ToString) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// Attach the CIS record identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.segment)
        } else {
            write!(f, "{}: {}", self.segment, self.text)
        }
    }
}

/// An ordered collection of descriptions keyed by name segment.
///
/// Preserves insertion order, which for a channel's description set is the
/// order the segments appear in the channel name. Lookup is linear; the sets
/// involved are a handful of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptionDict(Vec<Description>);

impl DescriptionDict {
    /// An empty description set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a description, replacing any existing entry for the same
    /// segment in place.
    pub fn insert(&mut self, description: Description) {
        match self.0.iter_mut().find(|d| d.segment == description.segment) {
            Some(existing) => *existing = description,
            None => self.0.push(description),
        }
    }

    /// Look up the description for a segment.
    pub fn get(&self, segment: &str) -> Option<&Description> {
        self.0.iter().find(|d| d.segment == segment)
    }

    /// Whether a description exists for the given segment.
    pub fn contains(&self, segment: &str) -> bool {
        self.get(segment).is_some()
    }

    /// Number of descriptions in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the descriptions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Description> {
        self.0.iter()
    }
}

impl FromIterator<Description> for DescriptionDict {
    fn from_iter<I: IntoIterator<Item = Description>>(iter: I) -> Self {
        let mut dict = Self::new();
        for description in iter {
            dict.insert(description);
        }
        dict
    }
}

impl<'a> IntoIterator for &'a DescriptionDict {
    type Item = &'a Description;
    type IntoIter = std::slice::Iter<'a, Description>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DescriptionDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, description) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{description}")?;
        }
        Ok(())
    }
}
