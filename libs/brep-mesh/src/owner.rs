//! # Hypothesis Owner
//!
//! Owns every hypothesis and algorithm a session creates and hands out the
//! ids the engine resolves them by. Ids start at 0, grow by one per created
//! object and are never reused, so they stay unique for the lifetime of the
//! session. Objects are never removed: a control that fails halfway leaves
//! what it already created in place.

use std::collections::BTreeMap;

use mesh_engine::{Algorithm, Catalog, ConfigRef, Hypothesis, HypothesisId};
use tracing::trace;

/// What an owned object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    SizingHypothesis,
    Algorithm,
}

/// Read-only descriptor of one owned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypothesisRecord {
    pub id: HypothesisId,
    pub kind: RecordKind,
    pub dimension: u8,
}

/// Registry of owned configuration objects, keyed by id.
#[derive(Debug, Default)]
pub struct HypothesisOwner {
    next_id: u32,
    hypotheses: BTreeMap<HypothesisId, Hypothesis>,
    algorithms: BTreeMap<HypothesisId, Algorithm>,
}

impl HypothesisOwner {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> HypothesisId {
        let id = HypothesisId::new(self.next_id);
        self.next_id += 1;
        trace!(%id, "id allocated");
        id
    }

    /// Allocates an id, stores the hypothesis built from it and returns it
    /// for further configuration.
    pub fn own_hypothesis(&mut self, make: impl FnOnce(HypothesisId) -> Hypothesis) -> &mut Hypothesis {
        let id = self.allocate();
        self.hypotheses.entry(id).or_insert_with(|| make(id))
    }

    /// Allocates an id and stores the algorithm built from it.
    pub fn own_algorithm(&mut self, make: impl FnOnce(HypothesisId) -> Algorithm) -> &Algorithm {
        let id = self.allocate();
        self.algorithms.entry(id).or_insert_with(|| make(id))
    }

    pub fn hypothesis(&self, id: HypothesisId) -> Option<&Hypothesis> {
        self.hypotheses.get(&id)
    }

    pub fn algorithm(&self, id: HypothesisId) -> Option<&Algorithm> {
        self.algorithms.get(&id)
    }

    /// Id the next created object will receive.
    pub fn next_id(&self) -> HypothesisId {
        HypothesisId::new(self.next_id)
    }

    /// Number of owned objects.
    pub fn len(&self) -> usize {
        self.hypotheses.len() + self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptors of all owned objects in creation order.
    pub fn records(&self) -> Vec<HypothesisRecord> {
        let hypotheses = self.hypotheses.values().map(|h| HypothesisRecord {
            id: h.id(),
            kind: RecordKind::SizingHypothesis,
            dimension: h.dimension(),
        });
        let algorithms = self.algorithms.values().map(|a| HypothesisRecord {
            id: a.id(),
            kind: RecordKind::Algorithm,
            dimension: a.dimension(),
        });
        let mut records: Vec<_> = hypotheses.chain(algorithms).collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

impl Catalog for HypothesisOwner {
    fn lookup(&self, id: HypothesisId) -> Option<ConfigRef<'_>> {
        self.hypotheses
            .get(&id)
            .map(ConfigRef::Hypothesis)
            .or_else(|| self.algorithms.get(&id).map(ConfigRef::Algorithm))
    }
}
