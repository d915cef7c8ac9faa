//! Channel name decomposition.
//!
//! LIGO channel names follow the convention `IFO:SYSTEM-SUBSYSTEM_SIGNAL`,
//! e.g. `H1:PSL-ISS_PDB_OUT_DQ`. Two views of a name are useful:
//!
//! - [`segment_name`] splits on every delimiter and returns the flat ordered
//!   token list (`["H1", "PSL", "ISS", "PDB", "OUT", "DQ"]`). Channel
//!   descriptions are aligned one-per-token against this view.
//! - [`NameParts`] keeps the conventional structure: the interferometer
//!   prefix, the system, the subsystem, and the remaining signal name with
//!   its internal underscores intact.
//!
//! Everything here is pure string handling; no network access.

/// Delimiters separating the components of a channel name.
pub const NAME_DELIMITERS: [char; 3] = [':', '-', '_'];

/// Split a channel name into its ordered, non-empty segments.
///
/// Splits on every occurrence of `:`, `-` and `_`. Empty tokens produced by
/// leading, trailing or doubled delimiters are discarded, so the result never
/// contains an empty string. A name without delimiters yields a single
/// segment equal to the whole name; an empty name yields no segments.
///
/// ```
/// use cis_client::name::segment_name;
///
/// assert_eq!(
///     segment_name("H1:HPI-BS_ODC_CHANNEL_OUT_DQ"),
///     vec!["H1", "HPI", "BS", "ODC", "CHANNEL", "OUT", "DQ"],
/// );
/// ```
pub fn segment_name(name: &str) -> Vec<&str> {
    name.split(&NAME_DELIMITERS[..])
        .filter(|token| !token.is_empty())
        .collect()
}

/// The conventional components of a channel name.
///
/// Parsed by [`NameParts::parse`]. Components that are absent from the name
/// (a channel without an interferometer prefix, a bare `SYSTEM` name) are
/// `None`; an empty component produced by a doubled delimiter is also `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    /// Interferometer prefix, e.g. `H1`. Recognized only when the name
    /// starts with an uppercase letter, a digit and a colon.
    pub ifo: Option<&'a str>,
    /// Instrumental system, e.g. `PSL` (pre-stabilized laser).
    pub system: Option<&'a str>,
    /// Instrumental sub-system, e.g. `ISS` (intensity stabilisation servo).
    pub subsystem: Option<&'a str>,
    /// Remaining signal name relative to system and sub-system, with its
    /// internal underscores preserved, e.g. `PDB_OUT_DQ`.
    pub signal: Option<&'a str>,
}

impl<'a> NameParts<'a> {
    /// Decompose a channel name into its conventional components.
    pub fn parse(name: &'a str) -> Self {
        let (ifo, rest) = match split_ifo(name) {
            Some((ifo, rest)) => (Some(ifo), rest),
            None => (None, name),
        };
        // The signal keeps any further delimiters, so split at most twice.
        let mut tags = rest.splitn(3, &['-', '_'][..]);
        let system = tags.next().filter(|t| !t.is_empty());
        let subsystem = tags.next().filter(|t| !t.is_empty());
        let signal = tags.next().filter(|t| !t.is_empty());
        NameParts {
            ifo,
            system,
            subsystem,
            signal,
        }
    }
}

/// Split off a leading `[A-Z]<digit>:` interferometer prefix, if present.
fn split_ifo(name: &str) -> Option<(&str, &str)> {
    let bytes = name.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_uppercase()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
    {
        Some((&name[..2], &name[3..]))
    } else {
        None
    }
}
