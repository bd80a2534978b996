//! Tiered memory store with a bounded working set.
//!
//! [`MemoryStore`] holds research findings in three ordered tiers. The working
//! tier is kept under a configured capacity: when an `add` pushes it over the
//! limit, every working item is handed to the [`Summarizer`] and replaced by a
//! single episodic summary.
//!
//! # Tiers
//!
//! ```text
//!  add ──▶ working ──compress──▶ episodic ──consolidate──▶ long_term
//!            │                      │                         │
//!            └── never recalled     └────────── recall ───────┘
//! ```
//!
//! Items only move forward. `promote` moves a single item one tier ahead;
//! `compress` and `consolidate` replace a group of items by new summary items
//! in the next tier.

use super::config::MemoryConfig;
use super::entities::{MemoryItem, MemoryTier};
use super::ports::{RecallRanker, Summarizer};
use crate::core::error::DomainError;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Hierarchical memory for one research run.
pub struct MemoryStore {
    config: MemoryConfig,
    summarizer: Arc<dyn Summarizer>,
    ranker: Arc<dyn RecallRanker>,
    working: Vec<MemoryItem>,
    episodic: Vec<MemoryItem>,
    long_term: Vec<MemoryItem>,
}

impl MemoryStore {
    /// Create an empty store.
    ///
    /// Rejects configs that fail [`MemoryConfig::validate`], such as a
    /// branching factor below 2.
    pub fn new(
        config: MemoryConfig,
        summarizer: Arc<dyn Summarizer>,
        ranker: Arc<dyn RecallRanker>,
    ) -> Result<Self, DomainError> {
        let issues = config.validate();
        if !issues.is_empty() {
            return Err(DomainError::InvalidConfig(issues.join("; ")));
        }
        Ok(Self::unchecked(config, summarizer, ranker))
    }

    fn unchecked(
        config: MemoryConfig,
        summarizer: Arc<dyn Summarizer>,
        ranker: Arc<dyn RecallRanker>,
    ) -> Self {
        Self {
            config,
            summarizer,
            ranker,
            working: Vec::new(),
            episodic: Vec::new(),
            long_term: Vec::new(),
        }
    }

    /// An empty store sharing this store's config and collaborators.
    ///
    /// Used to give each concurrently running subtask a private working view.
    pub fn empty_like(&self) -> Self {
        Self::unchecked(
            self.config.clone(),
            Arc::clone(&self.summarizer),
            Arc::clone(&self.ranker),
        )
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    // ==================== Writes ====================

    /// Append `item` to the working tier.
    pub async fn add_working(&mut self, item: MemoryItem) -> Result<Option<MemoryItem>, DomainError> {
        self.add(item, MemoryTier::Working).await
    }

    /// Append `item` to `tier` (most recent last).
    ///
    /// If the working tier then exceeds its capacity it is compressed before
    /// returning; the new episodic summary is returned in that case.
    pub async fn add(
        &mut self,
        mut item: MemoryItem,
        tier: MemoryTier,
    ) -> Result<Option<MemoryItem>, DomainError> {
        item.tier = tier;
        self.tier_mut(tier).push(item);

        if self.working_size() > self.config.capacity() {
            return self.compress().await;
        }
        Ok(None)
    }

    /// Summarize every working item into one new episodic item and clear the
    /// working tier.
    ///
    /// No-op (returns `None`) when the working tier is empty. On summarizer
    /// failure the working tier is left untouched.
    pub async fn compress(&mut self) -> Result<Option<MemoryItem>, DomainError> {
        if self.working.is_empty() {
            return Ok(None);
        }

        let contents: Vec<String> = self.working.iter().map(|i| i.content.clone()).collect();
        let summary = self.summarizer.summarize(&contents).await?;

        let item = MemoryItem::new(summary, MemoryTier::Episodic);
        self.episodic.push(item.clone());
        self.working.clear();
        Ok(Some(item))
    }

    /// Fold the episodic tier into long-term memory as a bounded tree of
    /// summaries.
    ///
    /// Each pass summarizes consecutive groups of `branching_factor` contents;
    /// passes repeat until one summary remains or `max_depth` passes ran.
    /// The remaining summaries become long-term items and the consumed
    /// episodic items are removed. Returns the number of long-term items
    /// created; nothing changes if any summarizer call fails.
    pub async fn consolidate(&mut self) -> Result<usize, DomainError> {
        if self.episodic.is_empty() {
            return Ok(0);
        }

        let branching = self.config.branching_factor();
        let max_depth = self.config.max_depth();

        let mut level: Vec<String> = self.episodic.iter().map(|i| i.content.clone()).collect();
        let mut depth = 0;
        while depth == 0 || (depth < max_depth && level.len() > 1) {
            let mut next = Vec::with_capacity(level.len().div_ceil(branching));
            for group in level.chunks(branching) {
                next.push(self.summarizer.summarize(group).await?);
            }
            level = next;
            depth += 1;
        }

        let created = level.len();
        self.episodic.clear();
        self.long_term.extend(
            level
                .into_iter()
                .map(|content| MemoryItem::new(content, MemoryTier::LongTerm)),
        );
        Ok(created)
    }

    /// Move one item forward by one tier. Returns the tier it landed in.
    pub fn promote(&mut self, id: &str) -> Result<MemoryTier, DomainError> {
        if self.long_term.iter().any(|i| i.id == id) {
            return Err(DomainError::AlreadyLongTerm(id.to_string()));
        }

        for tier in [MemoryTier::Working, MemoryTier::Episodic] {
            let items = self.tier_mut(tier);
            if let Some(pos) = items.iter().position(|i| i.id == id) {
                let mut item = items.remove(pos);
                // next() is Some for every tier but LongTerm
                let target = tier.next().unwrap_or(MemoryTier::LongTerm);
                item.tier = target;
                self.tier_mut(target).push(item);
                return Ok(target);
            }
        }

        Err(DomainError::ItemNotFound(id.to_string()))
    }

    /// Remove the given ids from the working tier only.
    ///
    /// Ids not present in the working tier are ignored. Returns how many
    /// items were removed.
    pub fn page_out<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let ids: HashSet<&str> = ids.iter().map(|s| s.as_ref()).collect();
        let before = self.working.len();
        self.working.retain(|i| !ids.contains(i.id.as_str()));
        before - self.working.len()
    }

    /// Remove and return every item of `tier`.
    pub fn drain_tier(&mut self, tier: MemoryTier) -> Vec<MemoryItem> {
        std::mem::take(self.tier_mut(tier))
    }

    /// Append items to the tiers they are tagged with.
    ///
    /// Does not trigger compression; used to merge a private view back.
    pub fn absorb(&mut self, items: impl IntoIterator<Item = MemoryItem>) {
        for item in items {
            let tier = item.tier;
            self.tier_mut(tier).push(item);
        }
    }

    // ==================== Reads ====================

    /// Items relevant to `query` from the episodic and long-term tiers.
    ///
    /// Every returned item has its `access_count` incremented exactly once
    /// for this call. The returned [`Recall`] can be iterated, cloned and
    /// restarted without touching the store again.
    pub fn recall(&mut self, query: &str) -> Recall {
        self.recall_limited(query, usize::MAX)
    }

    /// Like [`recall`](Self::recall), keeping only the `limit` best items.
    ///
    /// Items ranked below the cut are not returned and their `access_count`
    /// is left unchanged.
    pub fn recall_limited(&mut self, query: &str, limit: usize) -> Recall {
        let candidates: Vec<MemoryItem> = self
            .episodic
            .iter()
            .chain(self.long_term.iter())
            .cloned()
            .collect();
        if candidates.is_empty() || limit == 0 {
            return Recall::new(Vec::new());
        }

        let ranked = self.ranker.rank(query, candidates);

        let mut seen = HashSet::new();
        let mut recalled = Vec::with_capacity(ranked.len().min(limit));
        for candidate in ranked {
            if recalled.len() == limit {
                break;
            }
            if !seen.insert(candidate.id.clone()) {
                continue;
            }
            let stored = self
                .episodic
                .iter_mut()
                .chain(self.long_term.iter_mut())
                .find(|i| i.id == candidate.id);
            if let Some(stored) = stored {
                stored.access_count += 1;
                recalled.push(stored.clone());
            }
        }
        Recall::new(recalled)
    }

    /// Look an item up by id: working tier first, then episodic, then long-term.
    pub fn find_by_id(&self, id: &str) -> Option<&MemoryItem> {
        self.working
            .iter()
            .chain(self.episodic.iter())
            .chain(self.long_term.iter())
            .find(|i| i.id == id)
    }

    pub fn items(&self, tier: MemoryTier) -> &[MemoryItem] {
        match tier {
            MemoryTier::Working => &self.working,
            MemoryTier::Episodic => &self.episodic,
            MemoryTier::LongTerm => &self.long_term,
        }
    }

    pub fn len(&self, tier: MemoryTier) -> usize {
        self.items(tier).len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty() && self.episodic.is_empty() && self.long_term.is_empty()
    }

    /// Working tier size in the configured capacity unit.
    pub fn working_size(&self) -> usize {
        let unit = self.config.unit();
        self.working.iter().map(|i| unit.measure(&i.content)).sum()
    }

    // ==================== Internal ====================

    fn tier_mut(&mut self, tier: MemoryTier) -> &mut Vec<MemoryItem> {
        match tier {
            MemoryTier::Working => &mut self.working,
            MemoryTier::Episodic => &mut self.episodic,
            MemoryTier::LongTerm => &mut self.long_term,
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("config", &self.config)
            .field("working", &self.working.len())
            .field("episodic", &self.episodic.len())
            .field("long_term", &self.long_term.len())
            .finish()
    }
}

/// Result of [`MemoryStore::recall`]: a finite, restartable sequence.
#[derive(Debug, Clone)]
pub struct Recall {
    items: Arc<[MemoryItem]>,
    cursor: usize,
}

impl Recall {
    fn new(items: Vec<MemoryItem>) -> Self {
        Self {
            items: items.into(),
            cursor: 0,
        }
    }

    /// Start again from the first item.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All recalled items in rank order, regardless of the cursor.
    pub fn as_slice(&self) -> &[MemoryItem] {
        &self.items
    }
}

impl Iterator for Recall {
    type Item = MemoryItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.cursor).cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Recall {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ports::SummarizeError;
    use crate::memory::{CapacityUnit, LexicalRanker};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // === Mock implementations ===

    /// Joins contents with " | " and records every call.
    #[derive(Default)]
    struct RecordingSummarizer {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingSummarizer {
        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Summarizer for RecordingSummarizer {
        async fn summarize(&self, contents: &[String]) -> Result<String, SummarizeError> {
            self.calls.lock().unwrap().push(contents.to_vec());
            Ok(contents.join(" | "))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _contents: &[String]) -> Result<String, SummarizeError> {
            Err(SummarizeError("model unavailable".to_string()))
        }
    }

    fn store_with(capacity: usize, summarizer: Arc<dyn Summarizer>) -> MemoryStore {
        MemoryStore::new(
            MemoryConfig::items(capacity),
            summarizer,
            Arc::new(LexicalRanker),
        )
        .unwrap()
    }

    fn store(capacity: usize) -> (MemoryStore, Arc<RecordingSummarizer>) {
        let summarizer = Arc::new(RecordingSummarizer::default());
        (store_with(capacity, summarizer.clone()), summarizer)
    }

    // ==================== add / compress ====================

    #[tokio::test]
    async fn test_add_keeps_insertion_order() {
        let (mut store, _) = store(10);
        store.add_working(MemoryItem::working("first")).await.unwrap();
        store.add_working(MemoryItem::working("second")).await.unwrap();

        let contents: Vec<_> = store
            .items(MemoryTier::Working)
            .iter()
            .map(|i| i.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_add_over_capacity_compresses_every_working_item() {
        let (mut store, summarizer) = store(2);
        store.add_working(MemoryItem::working("a")).await.unwrap();
        store.add_working(MemoryItem::working("b")).await.unwrap();
        assert_eq!(store.len(MemoryTier::Working), 2);

        let summary = store.add_working(MemoryItem::working("c")).await.unwrap();

        let summary = summary.expect("third item exceeds capacity");
        assert_eq!(summary.tier, MemoryTier::Episodic);
        assert_eq!(summary.content, "a | b | c");
        assert_eq!(store.len(MemoryTier::Working), 0);
        assert_eq!(store.len(MemoryTier::Episodic), 1);
        assert_eq!(summarizer.calls(), vec![vec!["a", "b", "c"]]);
    }

    #[tokio::test]
    async fn test_add_measures_tokens() {
        let config = MemoryConfig::try_new(3, CapacityUnit::Tokens, 4, 3).unwrap();
        let mut store = MemoryStore::new(
            config,
            Arc::new(RecordingSummarizer::default()),
            Arc::new(LexicalRanker),
        )
        .unwrap();
        // 8 chars -> 2 tokens, under the limit
        assert!(store.add_working(MemoryItem::working("abcdefgh")).await.unwrap().is_none());
        // another 2 tokens -> 4 > 3
        assert!(store.add_working(MemoryItem::working("ijklmnop")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_add_retags_item_tier() {
        let (mut store, _) = store(10);
        store
            .add(MemoryItem::working("fact").with_id("m-1"), MemoryTier::LongTerm)
            .await
            .unwrap();
        assert_eq!(store.find_by_id("m-1").unwrap().tier, MemoryTier::LongTerm);
    }

    #[tokio::test]
    async fn test_compress_empty_working_is_noop() {
        let (mut store, summarizer) = store(2);
        assert!(store.compress().await.unwrap().is_none());
        assert_eq!(store.len(MemoryTier::Episodic), 0);
        assert!(summarizer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_compress_failure_keeps_working_items() {
        let mut store = store_with(10, Arc::new(FailingSummarizer));
        store.add_working(MemoryItem::working("a")).await.unwrap();

        let err = store.compress().await.unwrap_err();
        assert!(matches!(err, DomainError::Summarizer(_)));
        assert_eq!(store.len(MemoryTier::Working), 1);
        assert_eq!(store.len(MemoryTier::Episodic), 0);
    }

    // ==================== recall ====================

    #[tokio::test]
    async fn test_recall_never_returns_working_items() {
        let (mut store, _) = store(10);
        store.add_working(MemoryItem::working("robot supply chain").with_id("w")).await.unwrap();
        store
            .add(MemoryItem::working("robot market").with_id("e"), MemoryTier::Episodic)
            .await
            .unwrap();
        store
            .add(MemoryItem::working("robot valuation").with_id("l"), MemoryTier::LongTerm)
            .await
            .unwrap();

        let ids: Vec<_> = store.recall("robot").map(|i| i.id).collect();
        assert_eq!(ids, vec!["e", "l"]);
        assert_eq!(store.find_by_id("w").unwrap().access_count, 0);
    }

    #[tokio::test]
    async fn test_recall_increments_access_count_once_per_call() {
        let (mut store, _) = store(10);
        store
            .add(MemoryItem::working("robot market").with_id("e"), MemoryTier::Episodic)
            .await
            .unwrap();

        let mut recall = store.recall("robot");
        assert_eq!(recall.next().unwrap().access_count, 1);
        recall.restart();
        assert_eq!(recall.next().unwrap().access_count, 1);
        assert_eq!(store.find_by_id("e").unwrap().access_count, 1);

        let second: Vec<_> = store.recall("market").collect();
        assert_eq!(second[0].access_count, 2);
    }

    #[tokio::test]
    async fn test_recall_limited_only_counts_returned_items() {
        let (mut store, _) = store(10);
        for (id, content) in [("a", "robot robot market"), ("b", "robot market"), ("c", "market")] {
            store
                .add(MemoryItem::working(content).with_id(id), MemoryTier::Episodic)
                .await
                .unwrap();
        }

        let ids: Vec<_> = store.recall_limited("robot", 1).map(|i| i.id).collect();

        assert_eq!(ids.len(), 1);
        let counted: usize = ["a", "b", "c"]
            .iter()
            .map(|id| store.find_by_id(id).unwrap().access_count as usize)
            .sum();
        assert_eq!(counted, 1);
        assert_eq!(store.find_by_id(&ids[0]).unwrap().access_count, 1);
    }

    #[tokio::test]
    async fn test_recall_limited_zero_touches_nothing() {
        let (mut store, _) = store(10);
        store
            .add(MemoryItem::working("robot market").with_id("e"), MemoryTier::Episodic)
            .await
            .unwrap();

        assert!(store.recall_limited("robot", 0).is_empty());
        assert_eq!(store.find_by_id("e").unwrap().access_count, 0);
    }

    #[tokio::test]
    async fn test_recall_on_empty_store_is_empty() {
        let (mut store, _) = store(10);
        assert!(store.recall("anything").is_empty());
    }

    // ==================== page_out / find_by_id / promote ====================

    #[tokio::test]
    async fn test_page_out_only_touches_working_tier() {
        let (mut store, _) = store(10);
        store.add_working(MemoryItem::working("a").with_id("w1")).await.unwrap();
        store.add_working(MemoryItem::working("b").with_id("w2")).await.unwrap();
        store
            .add(MemoryItem::working("c").with_id("e1"), MemoryTier::Episodic)
            .await
            .unwrap();

        let removed = store.page_out(&["w1", "e1", "missing"]);

        assert_eq!(removed, 1);
        assert!(store.find_by_id("w1").is_none());
        assert!(store.find_by_id("w2").is_some());
        assert!(store.find_by_id("e1").is_some());
    }

    #[tokio::test]
    async fn test_find_by_id_prefers_working_tier() {
        let (mut store, _) = store(10);
        store
            .add(MemoryItem::working("episodic copy").with_id("dup"), MemoryTier::Episodic)
            .await
            .unwrap();
        store.add_working(MemoryItem::working("working copy").with_id("dup")).await.unwrap();

        assert_eq!(store.find_by_id("dup").unwrap().content, "working copy");
        assert!(store.find_by_id("nope").is_none());
    }

    #[tokio::test]
    async fn test_promote_moves_forward_only() {
        let (mut store, _) = store(10);
        store.add_working(MemoryItem::working("a").with_id("m")).await.unwrap();

        assert_eq!(store.promote("m").unwrap(), MemoryTier::Episodic);
        assert_eq!(store.promote("m").unwrap(), MemoryTier::LongTerm);
        assert!(matches!(store.promote("m"), Err(DomainError::AlreadyLongTerm(_))));
        assert!(matches!(store.promote("x"), Err(DomainError::ItemNotFound(_))));
        assert_eq!(store.find_by_id("m").unwrap().tier, MemoryTier::LongTerm);
    }

    // ==================== construction ====================

    #[test]
    fn test_new_rejects_branching_factor_below_two() {
        let config = MemoryConfig::items(10).with_branching_factor(0);
        let result = MemoryStore::new(
            config,
            Arc::new(RecordingSummarizer::default()),
            Arc::new(LexicalRanker),
        );
        match result {
            Err(DomainError::InvalidConfig(msg)) => assert!(msg.contains("branching_factor")),
            _ => panic!("expected InvalidConfig"),
        }
    }

    #[test]
    fn test_new_rejects_zero_max_depth() {
        let config = MemoryConfig::items(10).with_max_depth(0);
        let result = MemoryStore::new(
            config,
            Arc::new(RecordingSummarizer::default()),
            Arc::new(LexicalRanker),
        );
        assert!(matches!(result, Err(DomainError::InvalidConfig(_))));
    }

    // ==================== consolidate ====================

    #[tokio::test]
    async fn test_consolidate_builds_bounded_summary_tree() {
        let summarizer = Arc::new(RecordingSummarizer::default());
        let config = MemoryConfig::items(100).with_branching_factor(2).with_max_depth(2);
        let mut store =
            MemoryStore::new(config, summarizer.clone(), Arc::new(LexicalRanker)).unwrap();
        for content in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            store.add(MemoryItem::working(content), MemoryTier::Episodic).await.unwrap();
        }

        let created = store.consolidate().await.unwrap();

        // 8 -> 4 -> 2, stopped by max_depth
        assert_eq!(created, 2);
        assert_eq!(store.len(MemoryTier::Episodic), 0);
        let roots: Vec<_> = store
            .items(MemoryTier::LongTerm)
            .iter()
            .map(|i| i.content.as_str())
            .collect();
        assert_eq!(roots, vec!["a | b | c | d", "e | f | g | h"]);
        assert_eq!(summarizer.calls().len(), 6);
    }

    #[tokio::test]
    async fn test_consolidate_single_item_still_summarized() {
        let (mut store, summarizer) = store(10);
        store.add(MemoryItem::working("only"), MemoryTier::Episodic).await.unwrap();

        assert_eq!(store.consolidate().await.unwrap(), 1);
        assert_eq!(summarizer.calls(), vec![vec!["only"]]);
        assert_eq!(store.len(MemoryTier::LongTerm), 1);
    }

    #[tokio::test]
    async fn test_consolidate_failure_changes_nothing() {
        let mut store = store_with(10, Arc::new(FailingSummarizer));
        store.add(MemoryItem::working("a"), MemoryTier::Episodic).await.unwrap();

        assert!(store.consolidate().await.is_err());
        assert_eq!(store.len(MemoryTier::Episodic), 1);
        assert_eq!(store.len(MemoryTier::LongTerm), 0);
    }

    // ==================== merging ====================

    #[tokio::test]
    async fn test_drain_and_absorb_merge_private_view() {
        let (mut shared, _) = store(10);
        let mut private = shared.empty_like();
        private
            .add(MemoryItem::working("finding").with_id("p"), MemoryTier::Episodic)
            .await
            .unwrap();

        shared.absorb(private.drain_tier(MemoryTier::Episodic));

        assert!(private.is_empty());
        assert_eq!(shared.find_by_id("p").unwrap().tier, MemoryTier::Episodic);
    }
}
