//! # cis-client - LIGO Channel Information System client
//!
//! The Channel Information System (CIS) documents and archives information
//! about the data signals ("channels") used and recorded by the Laser
//! Interferometer Gravitational-wave Observatory instruments: instrumental
//! error and control signals, and environmental sensor readings. The CIS
//! records naming, data rate, physical unit and source within the
//! instrument, and lets operators annotate each component of a channel name
//! with a human-readable description.
//!
//! This crate is a typed client for the CIS REST API:
//!
//! - look one channel up by exact name, or search by name pattern;
//! - decompose channel names like `H1:PSL-ISS_PDB_OUT_DQ` into their
//!   semantic segments;
//! - resolve the per-segment descriptions recorded in the CIS, aligned
//!   with the name segments.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cis_client::CisClient;
//!
//! let client = CisClient::new()?;
//!
//! // One channel, fully populated.
//! let channel = client.channel("H1:PSL-ISS_PDB_OUT_DQ")?;
//! println!("{} @ {} Hz [{}]", channel.name, channel.sample_rate, channel.unit);
//! for (segment, description) in channel.annotated_segments() {
//!     match description {
//!         Some(d) => println!("  {segment}: {}", d.text),
//!         None => println!("  {segment}: (unannotated)"),
//!     }
//! }
//!
//! // Every channel matching a pattern.
//! let suspensions = client.channels("H1:SUS-ETMX*")?;
//! println!("{} matching channels", suspensions.len());
//! # Ok::<(), cis_client::CisError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`client`]: blocking HTTP client, pagination, description resolution
//! - [`channel`]: [`Channel`] and [`ChannelList`] domain types
//! - [`description`]: [`Description`] annotations and ordered description sets
//! - [`name`]: pure channel-name segmentation, no I/O
//! - [`schema`]: serde structs for the CIS wire format and strict mapping
//! - [`error`]: the [`CisError`] taxonomy
//!
//! ## Error model
//!
//! Callers need to distinguish three situations to implement their own
//! retry policy: the channel does not exist ([`CisError::NotFound`]), the
//! request was malformed ([`CisError::Validation`]), and the service itself
//! failed ([`CisError::is_service`]). An unannotated name segment is none
//! of these — it is a `None` entry in [`Channel::descriptions`].
//!
//! Queries are read-only and idempotent; transient failures are surfaced,
//! never retried internally.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod client;
pub mod description;
pub mod error;
pub mod name;
pub mod schema;

pub use channel::{Channel, ChannelList, Sieve};
pub use client::{CisClient, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use description::{Description, DescriptionDict};
pub use error::CisError;
pub use name::{segment_name, NameParts};
