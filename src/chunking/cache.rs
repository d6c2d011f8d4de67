//! Caller-owned memo of boundary scans.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::debug;

use crate::config::ScoringProfile;
use crate::types::{ContentType, ScanMode};

use super::{scan_with, BoundarySet};

const DEFAULT_CAPACITY: usize = 16;

type CacheKey = (String, ScanMode, ContentType);

/// Caller-owned memo of scan results keyed by `(text, mode, content type)`,
/// so that changing only the shot count re-runs assembly alone.
#[derive(Debug)]
pub struct ScanCache {
    profile: ScoringProfile,
    capacity: usize,
    entries: HashMap<CacheKey, Arc<BoundarySet>>,
    order: VecDeque<CacheKey>,
}

impl ScanCache {
    pub fn new(profile: ScoringProfile) -> Self {
        Self::with_capacity(profile, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(profile: ScoringProfile, capacity: usize) -> Self {
        Self {
            profile,
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_or_scan(
        &mut self,
        text: &str,
        mode: ScanMode,
        content_type: ContentType,
    ) -> Arc<BoundarySet> {
        let key = (text.to_string(), mode, content_type);
        if let Some(hit) = self.entries.get(&key) {
            debug!(mode = %mode, content_type = %content_type, "scan cache hit");
            return Arc::clone(hit);
        }
        let boundaries = Arc::new(scan_with(text, mode, self.profile.weights(content_type)));
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&boundaries));
        boundaries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for ScanCache {
    fn default() -> Self {
        Self::new(ScoringProfile::default())
    }
}
