//! Wire schema for the CIS REST API.
//!
//! The service speaks JSON; this module pins down the shapes the client
//! depends on as explicit serde structs, plus the strict mapping from wire
//! records into the domain types of [`crate::channel`] and
//! [`crate::description`]. A record that parses as JSON but violates the
//! schema (missing name, negative data rate, unparseable timestamp) is a
//! [`CisError::Payload`] — never a half-populated domain object.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::channel::Channel;
use crate::description::Description;
use crate::error::CisError;

/// One page of a paginated CIS reply.
///
/// The service returns `{"results": [...], "next": <url or null>}`; `next`
/// links the following page, and is `null` on the last one.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Records on this page. Missing from the reply means no results.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// URL of the next page, `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

/// A channel record as served by `GET /channel/?q=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelRecord {
    /// Channel name. Required; its absence is a schema violation.
    pub name: Option<String>,
    /// Sample rate in Hz. Required, non-negative.
    pub datarate: Option<f64>,
    /// Physical unit of the data.
    pub units: Option<String>,
    /// Front-end model that produces the channel.
    pub source: Option<String>,
    /// CIS browser URL.
    pub displayurl: Option<String>,
    /// CIS REST API URL.
    pub url: Option<String>,
    /// CIS unique identifier.
    pub id: Option<u64>,
    /// Creation timestamp, RFC 3339.
    pub created: Option<String>,
}

impl ChannelRecord {
    /// Map this record into a [`Channel`], or fail with
    /// [`CisError::Payload`] on schema mismatch.
    pub fn into_channel(self) -> Result<Channel, CisError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(CisError::Payload("channel record missing name".into())),
        };
        let sample_rate = self
            .datarate
            .ok_or_else(|| CisError::Payload(format!("channel '{name}' missing datarate")))?;
        if !sample_rate.is_finite() || sample_rate < 0.0 {
            return Err(CisError::Payload(format!(
                "channel '{name}' has invalid datarate {sample_rate}"
            )));
        }

        let mut channel = Channel::new(&name, sample_rate, self.units.as_deref().unwrap_or(""));
        channel.model = self.source.map(|s| s.to_lowercase());
        channel.display_url = self.displayurl;
        channel.api_url = self.url;
        channel.cis_id = self.id;
        channel.created = parse_timestamp(self.created.as_deref(), &name)?;
        Ok(channel)
    }
}

/// A description record, as served by the per-channel `descriptions`
/// endpoint and by `GET /description/?q=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionRecord {
    /// Name segment being described. Required.
    pub name: Option<String>,
    /// Short explanation text.
    pub desc: Option<String>,
    /// Extended explanation text.
    pub text: Option<String>,
    /// Author of the last edit.
    pub editor: Option<String>,
    /// CIS unique identifier.
    pub id: Option<u64>,
    /// CIS REST API URL.
    pub url: Option<String>,
    /// Creation timestamp, RFC 3339.
    pub created: Option<String>,
    /// Last-modified timestamp, RFC 3339.
    pub modified: Option<String>,
}

impl DescriptionRecord {
    /// Map this record into a [`Description`], or fail with
    /// [`CisError::Payload`] on schema mismatch.
    pub fn into_description(self) -> Result<Description, CisError> {
        let segment = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(CisError::Payload("description record missing name".into())),
        };
        let mut description = Description::new(&segment, self.desc.as_deref().unwrap_or(""));
        description.details = self.text;
        description.editor = self.editor;
        description.id = self.id;
        description.url = self.url;
        description.created = parse_timestamp(self.created.as_deref(), &segment)?;
        description.modified = parse_timestamp(self.modified.as_deref(), &segment)?;
        Ok(description)
    }
}

fn parse_timestamp(value: Option<&str>, record: &str) -> Result<Option<DateTime<Utc>>, CisError> {
    let Some(value) = value else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(value)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|e| {
            CisError::Payload(format!(
                "record '{record}' has unparseable timestamp '{value}': {e}"
            ))
        })
}
