//! Domain records for the petition API.
//!
//! # Design
//! The API names things with numeric ids and titles. Richer records carry the
//! fields of their simpler counterparts directly instead of nesting them, and
//! the `Identified` / `Titled` traits give generic access to the shared fields.
//!
//! `Petition` is decoded through a private wire shape: the poll dates arrive
//! nested under `date.poll` as Unix seconds and the decisions arrive as
//! `[{"text": ...}]`. Both are projected into flat fields once, at decode time.
//!
//! The upstream omits fields and sends `null` freely, so every field falls
//! back to its default when absent or null.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A record addressed by a numeric id.
pub trait Identified {
    fn id(&self) -> u64;
}

/// A record with an id and a human-readable title.
pub trait Titled: Identified {
    fn title(&self) -> &str;
}

/// Bare id reference, as used by list views for level and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdEntity {
    pub id: u64,
}

/// Lookup-table row: statuses, levels, categories, results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdTitle {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
}

/// Petition summary returned by the list endpoints.
///
/// Unlike [`Petition`], `level` and `status` only carry an id here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPetition {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: IdEntity,
    #[serde(deserialize_with = "null_as_default")]
    pub status: IdEntity,
}

/// Vote tally of a petition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vote {
    /// Share of the threshold reached, in percent. Decoded as the nearest
    /// `f64`, so values with many decimal places are not kept exactly.
    pub progress: f64,
    pub threshold: u64,
    pub affirmative: u64,
    pub negative: u64,
}

/// A document attached to a petition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Full petition record returned by the single-petition lookup.
///
/// `result.id == 0` means no result has been reached yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WirePetition", into = "WirePetition")]
pub struct Petition {
    pub id: u64,
    pub title: String,
    pub code: String,
    pub url: String,
    pub description: String,
    pub prospective: String,
    pub level: IdTitle,
    pub status: IdTitle,
    pub result: IdTitle,
    pub category: Vec<IdTitle>,
    pub vote: Vote,
    /// Attachment groups keyed by group name.
    pub attachment: BTreeMap<String, Vec<Attachment>>,
    /// Decision texts, in wire order.
    pub decision: Vec<String>,
    /// Start of the poll.
    pub begin: Option<OffsetDateTime>,
    /// End of the poll.
    pub end: Option<OffsetDateTime>,
}

impl Identified for IdEntity {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for IdTitle {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Titled for IdTitle {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Identified for ListPetition {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Titled for ListPetition {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Identified for Petition {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Titled for Petition {
    fn title(&self) -> &str {
        &self.title
    }
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct WirePetition {
    id: u64,
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    code: String,
    #[serde(deserialize_with = "null_as_default")]
    url: String,
    #[serde(deserialize_with = "null_as_default")]
    description: String,
    #[serde(deserialize_with = "null_as_default")]
    prospective: String,
    #[serde(deserialize_with = "null_as_default")]
    level: IdTitle,
    #[serde(deserialize_with = "null_as_default")]
    status: IdTitle,
    #[serde(deserialize_with = "null_as_default")]
    result: IdTitle,
    #[serde(deserialize_with = "null_as_default")]
    category: Vec<IdTitle>,
    #[serde(deserialize_with = "null_as_default")]
    vote: Vote,
    #[serde(deserialize_with = "null_as_default")]
    attachment: BTreeMap<String, Vec<Attachment>>,
    #[serde(deserialize_with = "null_as_default")]
    decision: Vec<WireDecision>,
    #[serde(deserialize_with = "null_as_default")]
    date: WireDates,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct WireDecision {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct WireDates {
    #[serde(deserialize_with = "null_as_default")]
    poll: WirePoll,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct WirePoll {
    #[serde(with = "time::serde::timestamp::option")]
    begin: Option<OffsetDateTime>,
    #[serde(with = "time::serde::timestamp::option")]
    end: Option<OffsetDateTime>,
}

impl From<WirePetition> for Petition {
    fn from(wire: WirePetition) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            code: wire.code,
            url: wire.url,
            description: wire.description,
            prospective: wire.prospective,
            level: wire.level,
            status: wire.status,
            result: wire.result,
            category: wire.category,
            vote: wire.vote,
            attachment: wire.attachment,
            decision: wire.decision.into_iter().map(|d| d.text).collect(),
            begin: wire.date.poll.begin,
            end: wire.date.poll.end,
        }
    }
}

impl From<Petition> for WirePetition {
    fn from(petition: Petition) -> Self {
        Self {
            id: petition.id,
            title: petition.title,
            code: petition.code,
            url: petition.url,
            description: petition.description,
            prospective: petition.prospective,
            level: petition.level,
            status: petition.status,
            result: petition.result,
            category: petition.category,
            vote: petition.vote,
            attachment: petition.attachment,
            decision: petition
                .decision
                .into_iter()
                .map(|text| WireDecision { text })
                .collect(),
            date: WireDates {
                poll: WirePoll {
                    begin: petition.begin,
                    end: petition.end,
                },
            },
        }
    }
}

/// Treat an explicit `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
