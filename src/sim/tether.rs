//! Inter-blob tethers
//!
//! A tether is a one-sided band between two blob centers: it pushes the
//! centers apart once they come closer than a minimum distance and never
//! pulls them together. Tethers are directional. The owner relaxes its
//! tethers as part of its own relaxation passes and rescales them when it
//! is scaled, so a mutual link is two tethers, one per owner.
//!
//! Keeping them in a registry keyed by blob ids, instead of inside each
//! blob, lets a join drop every tether that references the removed blob.

use serde::Serialize;

use super::constraint::DistanceBand;
use super::point::PointMass;
use crate::consts::TETHER_SPACING;

/// Stable blob identifier (its slot index in the population)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BlobId(pub usize);

/// Center-to-center repulsion owned by one blob
#[derive(Debug, Clone, PartialEq)]
pub struct Tether {
    pub owner: BlobId,
    pub other: BlobId,
    pub band: DistanceBand,
}

impl Tether {
    /// Minimum separation of `TETHER_SPACING` times the combined radius
    pub fn new(owner: BlobId, other: BlobId, owner_radius: f64, other_radius: f64) -> Self {
        let mut band = DistanceBand::new(0.0, 0.0);
        band.set_dist(TETHER_SPACING * (owner_radius + other_radius), 0.0);
        Self { owner, other, band }
    }

    pub fn satisfy(&self, owner_center: &mut PointMass, other_center: &mut PointMass) {
        self.band.apply(owner_center, other_center);
    }
}

/// Tethers indexed by owner, at most one per (owner, other) pair
///
/// Each owner's tethers keep their insertion order, which is the order the
/// owner relaxes them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TetherRegistry {
    by_owner: Vec<Vec<Tether>>,
    len: usize,
}

impl TetherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every tether, grouped by owner id
    pub fn iter(&self) -> impl Iterator<Item = &Tether> {
        self.by_owner.iter().flatten()
    }

    pub fn get(&self, owner: BlobId, other: BlobId) -> Option<&Tether> {
        self.owned_by(owner).find(|t| t.other == other)
    }

    /// Insert or replace the tether for `(owner, other)`
    pub fn insert(&mut self, tether: Tether) {
        let index = tether.owner.0;
        if index >= self.by_owner.len() {
            self.by_owner.resize_with(index + 1, Vec::new);
        }
        let list = &mut self.by_owner[index];
        match list.iter_mut().find(|t| t.other == tether.other) {
            Some(existing) => *existing = tether,
            None => {
                list.push(tether);
                self.len += 1;
            }
        }
    }

    /// Tethers relaxed by `owner`, in insertion order
    pub fn owned_by(&self, owner: BlobId) -> impl Iterator<Item = &Tether> {
        self.by_owner.get(owner.0).into_iter().flatten()
    }

    pub fn scale_owned_by(&mut self, owner: BlobId, factor: f64) {
        if let Some(list) = self.by_owner.get_mut(owner.0) {
            for tether in list {
                tether.band.scale(factor);
            }
        }
    }

    /// Drop every tether touching `id`; returns how many were removed
    pub fn remove_involving(&mut self, id: BlobId) -> usize {
        let mut removed = self.by_owner.get_mut(id.0).map_or(0, |list| {
            let n = list.len();
            list.clear();
            n
        });
        for list in &mut self.by_owner {
            let before = list.len();
            list.retain(|t| t.other != id);
            removed += before - list.len();
        }
        self.len -= removed;
        removed
    }

    /// Number of blob pairs linked in both directions
    pub fn mutual_pairs(&self) -> usize {
        self.iter()
            .filter(|t| t.owner < t.other && self.get(t.other, t.owner).is_some())
            .count()
    }
}
