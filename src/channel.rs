//! Channel metadata and channel collections.
//!
//! A [`Channel`] is one time-series signal recorded by a LIGO instrument:
//! an error or control signal, or an environmental sensor reading. The CIS
//! records its name, sample rate, physical unit and provenance, plus a
//! per-segment description set (see [`crate::description`]).
//!
//! A [`ChannelList`] is the result of a pattern query: channels in service
//! order, sorted by name, with `find`/`sieve` utilities for narrowing the
//! result set locally.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::description::{Description, DescriptionDict};
use crate::error::CisError;
use crate::name::{segment_name, NameParts};

/// One LIGO data channel and its CIS metadata.
///
/// Channels are produced by the query operations on
/// [`CisClient`](crate::CisClient) and are not modified afterwards.
///
/// The `descriptions` sequence is aligned with the segments of `name`:
/// entry `i` describes segment `i`, and is `None` when the CIS carries no
/// annotation for that segment. `descriptions.len()` always equals the
/// segment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel name, following the `IFO:SYSTEM-SUBSYSTEM_SIGNAL` convention.
    pub name: String,
    /// Samples per second, in Hertz. Non-negative.
    pub sample_rate: f64,
    /// Physical unit of the data. Empty when the CIS records none.
    pub unit: String,
    /// Per-segment descriptions, one entry per segment of `name`.
    pub descriptions: Vec<Option<Description>>,
    /// Front-end model that produces this channel, lowercased.
    pub model: Option<String>,
    /// CIS browser URL for this channel.
    pub display_url: Option<String>,
    /// CIS REST API URL for this channel.
    pub api_url: Option<String>,
    /// CIS unique identifier.
    pub cis_id: Option<u64>,
    /// Creation time of the CIS record.
    pub created: Option<DateTime<Utc>>,
}

impl Channel {
    /// Create a channel with no resolved descriptions.
    ///
    /// The description sequence is initialized to one `None` per name
    /// segment, so the alignment invariant holds from construction.
    pub fn new(name: &str, sample_rate: f64, unit: &str) -> Self {
        let segments = segment_name(name).len();
        Self {
            name: name.to_string(),
            sample_rate,
            unit: unit.to_string(),
            descriptions: vec![None; segments],
            model: None,
            display_url: None,
            api_url: None,
            cis_id: None,
            created: None,
        }
    }

    /// The ordered, non-empty segments of this channel's name.
    pub fn segments(&self) -> Vec<&str> {
        segment_name(&self.name)
    }

    /// The conventional components of this channel's name.
    pub fn parts(&self) -> NameParts<'_> {
        NameParts::parse(&self.name)
    }

    /// Interferometer prefix, e.g. `H1`.
    pub fn ifo(&self) -> Option<&str> {
        self.parts().ifo
    }

    /// Instrumental system, e.g. `PSL`.
    pub fn system(&self) -> Option<&str> {
        self.parts().system
    }

    /// Instrumental sub-system, e.g. `ISS`.
    pub fn subsystem(&self) -> Option<&str> {
        self.parts().subsystem
    }

    /// Signal name relative to system and sub-system, e.g. `PDB_OUT_DQ`.
    pub fn signal(&self) -> Option<&str> {
        self.parts().signal
    }

    /// Align a description set against this channel's name segments.
    ///
    /// Each segment takes its entry from `dict` when one exists, `None`
    /// otherwise. Descriptions for segments not present in the name are
    /// dropped.
    pub fn with_descriptions(mut self, dict: &DescriptionDict) -> Self {
        self.descriptions = self
            .segments()
            .iter()
            .map(|segment| dict.get(segment).cloned())
            .collect();
        self
    }

    /// Pairs of `(segment, description)` in name order.
    pub fn annotated_segments(&self) -> impl Iterator<Item = (&str, Option<&Description>)> {
        self.segments()
            .into_iter()
            .zip(self.descriptions.iter().map(Option::as_ref))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Local filtering criteria for [`ChannelList::sieve`].
///
/// Built incrementally:
///
/// ```
/// use cis_client::channel::Sieve;
///
/// let criteria = Sieve::new().name("PSL").sample_rate(16384.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sieve {
    name: Option<String>,
    exact_match: bool,
    sample_rate: Option<f64>,
    sample_range: Option<(f64, f64)>,
}

impl Sieve {
    /// Criteria matching every channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match channel names against this regular expression (or, with
    /// [`exact_match`](Self::exact_match), the same pattern anchored at
    /// both ends; regex metacharacters still apply).
    pub fn name(mut self, pattern: &str) -> Self {
        self.name = Some(pattern.to_string());
        self
    }

    /// Require the name pattern to match the whole channel name.
    pub fn exact_match(mut self, exact: bool) -> Self {
        self.exact_match = exact;
        self
    }

    /// Keep only channels with exactly this sample rate.
    pub fn sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    /// Keep only channels whose sample rate lies in `[low, high]`.
    pub fn sample_range(mut self, low: f64, high: f64) -> Self {
        self.sample_range = Some((low, high));
        self
    }

    fn name_regex(&self) -> Result<Option<Regex>, CisError> {
        let Some(pattern) = &self.name else {
            return Ok(None);
        };
        let anchored;
        let pattern = if self.exact_match {
            anchored = format!(r"\A(?:{pattern})\z");
            &anchored
        } else {
            pattern
        };
        Regex::new(pattern)
            .map(Some)
            .map_err(|e| CisError::Validation(format!("invalid sieve pattern: {e}")))
    }
}

/// A list of channels, with find/sieve utilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelList(Vec<Channel>);

impl ChannelList {
    /// An empty channel list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel to the list.
    pub fn push(&mut self, channel: Channel) {
        self.0.push(channel);
    }

    /// Number of channels in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the channels in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.0.iter()
    }

    /// Position of the first channel with exactly the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c.name == name)
    }

    /// Sort the list by channel name.
    pub fn sort_by_name(&mut self) {
        self.0.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// All channels matching the given criteria, as a new list.
    ///
    /// Fails with [`CisError::Validation`] when the name criterion is not a
    /// valid regular expression.
    pub fn sieve(&self, criteria: &Sieve) -> Result<ChannelList, CisError> {
        let regex = criteria.name_regex()?;
        let matches = self
            .0
            .iter()
            .filter(|c| match &regex {
                Some(re) => re.is_match(&c.name),
                None => true,
            })
            .filter(|c| match criteria.sample_rate {
                Some(rate) => c.sample_rate == rate,
                None => true,
            })
            .filter(|c| match criteria.sample_range {
                Some((low, high)) => low <= c.sample_rate && c.sample_rate <= high,
                None => true,
            })
            .cloned()
            .collect();
        Ok(ChannelList(matches))
    }

    /// The set of interferometer prefixes present in this list.
    pub fn ifos(&self) -> BTreeSet<&str> {
        self.0.iter().filter_map(|c| c.ifo()).collect()
    }
}

impl std::ops::Deref for ChannelList {
    type Target = [Channel];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Channel> for ChannelList {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        ChannelList(iter.into_iter().collect())
    }
}

impl IntoIterator for ChannelList {
    type Item = Channel;
    type IntoIter = std::vec::IntoIter<Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChannelList {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> ChannelList {
        [
            Channel::new("H1:PSL-ISS_PDB_OUT_DQ", 16384.0, "V"),
            Channel::new("L1:PSL-ISS_PDB_OUT_DQ", 16384.0, "V"),
            Channel::new("H1:HPI-BS_ODC_CHANNEL_OUT_DQ", 256.0, ""),
            Channel::new("H1:PEM-EY_SEIS_Z", 2048.0, "m/s"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn descriptions_start_aligned_with_segments() {
        let channel = Channel::new("H1:HPI-BS_ODC_CHANNEL_OUT_DQ", 256.0, "");
        assert_eq!(channel.segments().len(), 7);
        assert_eq!(channel.descriptions.len(), 7);
        assert!(channel.descriptions.iter().all(Option::is_none));
    }

    #[test]
    fn with_descriptions_keeps_segment_order() {
        let mut dict = DescriptionDict::new();
        dict.insert(Description::new("ISS", "Intensity Stabilisation Servo"));
        dict.insert(Description::new("PSL", "Pre-Stabilized Laser"));

        let channel = Channel::new("H1:PSL-ISS_PDB_OUT_DQ", 16384.0, "V").with_descriptions(&dict);

        assert_eq!(channel.descriptions.len(), 6);
        assert!(channel.descriptions[0].is_none()); // H1 unannotated
        assert_eq!(channel.descriptions[1].as_ref().unwrap().segment, "PSL");
        assert_eq!(channel.descriptions[2].as_ref().unwrap().segment, "ISS");
        assert!(channel.descriptions[3].is_none());
    }

    #[test]
    fn name_part_accessors() {
        let channel = Channel::new("H1:PSL-ISS_PDB_OUT_DQ", 16384.0, "V");
        assert_eq!(channel.ifo(), Some("H1"));
        assert_eq!(channel.system(), Some("PSL"));
        assert_eq!(channel.subsystem(), Some("ISS"));
        assert_eq!(channel.signal(), Some("PDB_OUT_DQ"));
    }

    #[test]
    fn find_locates_exact_name() {
        let list = sample_list();
        assert_eq!(list.find("L1:PSL-ISS_PDB_OUT_DQ"), Some(1));
        assert_eq!(list.find("L1:PSL"), None);
    }

    #[test]
    fn sieve_by_name_regex() {
        let list = sample_list();
        let psl = list.sieve(&Sieve::new().name("PSL")).unwrap();
        assert_eq!(psl.len(), 2);

        let exact = list
            .sieve(&Sieve::new().name("H1:PEM-EY_SEIS_Z").exact_match(true))
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].name, "H1:PEM-EY_SEIS_Z");
    }

    #[test]
    fn sieve_by_rate_and_range() {
        let list = sample_list();
        let fast = list.sieve(&Sieve::new().sample_rate(16384.0)).unwrap();
        assert_eq!(fast.len(), 2);

        let mid = list.sieve(&Sieve::new().sample_range(256.0, 4096.0)).unwrap();
        assert_eq!(mid.len(), 2);
    }

    #[test]
    fn sieve_rejects_bad_regex() {
        let err = sample_list().sieve(&Sieve::new().name("(")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn ifos_collects_prefixes() {
        let list = sample_list();
        let ifos = list.ifos();
        assert_eq!(ifos.into_iter().collect::<Vec<_>>(), vec!["H1", "L1"]);
    }

    #[test]
    fn empty_pattern_result_is_empty_list() {
        let list = ChannelList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
