//! Memory items and tiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a memory item.
///
/// Tiers are ordered: an item only ever moves forward
/// (`Working → Episodic → LongTerm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryTier {
    /// Transient per-step notes. Never searched by recall.
    #[default]
    Working,
    /// Compressed summaries of past working sets.
    Episodic,
    /// Durable consolidated knowledge.
    LongTerm,
}

impl MemoryTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryTier::Working => "working",
            MemoryTier::Episodic => "episodic",
            MemoryTier::LongTerm => "long_term",
        }
    }

    /// The next tier, or `None` for `LongTerm`.
    pub fn next(&self) -> Option<MemoryTier> {
        match self {
            MemoryTier::Working => Some(MemoryTier::Episodic),
            MemoryTier::Episodic => Some(MemoryTier::LongTerm),
            MemoryTier::LongTerm => None,
        }
    }
}

impl fmt::Display for MemoryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemoryTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "working" => Ok(MemoryTier::Working),
            "episodic" => Ok(MemoryTier::Episodic),
            "long_term" | "long-term" | "longterm" => Ok(MemoryTier::LongTerm),
            other => Err(format!("unknown memory tier: {}", other)),
        }
    }
}

/// A unit of recorded knowledge.
///
/// # Example
///
/// ```
/// use research_domain::memory::{MemoryItem, MemoryTier};
///
/// let item = MemoryItem::new("Processed 5 results.", MemoryTier::Working);
/// assert_eq!(item.access_count, 0);
/// assert!(item.embedding.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    /// Unique stable identifier (UUID v4 unless supplied)
    pub id: String,
    /// Text payload
    pub content: String,
    /// Current tier
    pub tier: MemoryTier,
    /// Optional vector used by embedding-based rankers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Number of recall calls that returned this item
    #[serde(default)]
    pub access_count: u32,
}

impl MemoryItem {
    pub fn new(content: impl Into<String>, tier: MemoryTier) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            tier,
            embedding: None,
            timestamp: Utc::now(),
            access_count: 0,
        }
    }

    /// Shorthand for a working-tier item.
    pub fn working(content: impl Into<String>) -> Self {
        Self::new(content, MemoryTier::Working)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}
