//! The blob population: split, join, selection, force distribution
//!
//! Blobs live in slots. A slot index is the blob's identity for as long
//! as the blob lives; a join empties the victim's slot and the next split
//! reuses the first empty slot before appending.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::blob::Blob;
use super::boundary::Boundary;
use super::tether::{BlobId, Tether, TetherRegistry};
use crate::Vector2;
use crate::consts::*;
use crate::error::SimError;

/// Owner of all live blobs and the tethers between them
#[derive(Debug, Clone)]
pub struct Population {
    slots: Vec<Option<Blob>>,
    capacity: usize,
    selected: Option<BlobId>,
    tethers: TetherRegistry,
    rng: Pcg32,
}

impl Population {
    /// Start with a single blob
    pub fn new(first: Blob, capacity: usize, seed: u64) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![Some(first)],
            capacity,
            selected: None,
            tethers: TetherRegistry::new(),
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Blob>] {
        &self.slots
    }

    /// Live blobs in slot order
    pub fn active(&self) -> impl Iterator<Item = (BlobId, &Blob)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|b| (BlobId(i), b)))
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, id: BlobId) -> Option<&Blob> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: BlobId) -> Option<&mut Blob> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn selected(&self) -> Option<BlobId> {
        self.selected
    }

    pub fn tethers(&self) -> &TetherRegistry {
        &self.tethers
    }

    /// Scale a blob together with the tethers it owns
    fn scale_blob(&mut self, id: BlobId, factor: f64) {
        if let Some(blob) = self.get_mut(id) {
            blob.scale(factor);
            self.tethers.scale_owned_by(id, factor);
        }
    }

    /// Bud a child off the largest blob
    ///
    /// Returns false when the population is already at capacity.
    pub fn split(&mut self) -> bool {
        if self.active_count() >= self.capacity {
            return false;
        }

        // First largest in slot order
        let parent_id = self
            .active()
            .fold(None, |best: Option<(BlobId, f64)>, (id, b)| match best {
                Some((_, r)) if b.radius() <= r => best,
                _ => Some((id, b.radius())),
            })
            .map(|(id, _)| id);
        let Some(parent_id) = parent_id else {
            return false;
        };

        self.scale_blob(parent_id, SPLIT_SHRINK);

        let Some(parent) = self.get(parent_id) else {
            return false;
        };
        let child = Blob::build(parent.center_position(), parent.radius(), parent.ring_count());
        let child_radius = child.radius();

        let child_id = match self.slots.iter().position(Option::is_none) {
            Some(i) => BlobId(i),
            None => BlobId(self.slots.len()),
        };

        let existing: Vec<(BlobId, f64)> = self.active().map(|(id, b)| (id, b.radius())).collect();
        for (id, radius) in existing {
            self.tethers.insert(Tether::new(id, child_id, radius, child_radius));
            self.tethers.insert(Tether::new(child_id, id, child_radius, radius));
        }

        if child_id.0 == self.slots.len() {
            self.slots.push(Some(child));
        } else {
            self.slots[child_id.0] = Some(child);
        }

        log::debug!(
            "split blob {} -> new blob {} (radius {:.4}, {} active)",
            parent_id.0,
            child_id.0,
            child_radius,
            self.active_count()
        );
        true
    }

    /// Merge the smallest blob into its nearest neighbour
    ///
    /// Returns false when fewer than two blobs are alive.
    pub fn join(&mut self) -> bool {
        if self.active_count() <= 1 {
            return false;
        }

        // First smallest in slot order
        let Some((victim_id, victim_radius, victim_center)) = self
            .active()
            .fold(None, |best: Option<(BlobId, f64, Vector2)>, (id, b)| match best {
                Some((_, r, _)) if b.radius() >= r => best,
                _ => Some((id, b.radius(), b.center_position())),
            })
        else {
            return false;
        };

        // First nearest in slot order
        let Some((absorber_id, absorber_radius)) = self
            .active()
            .filter(|(id, _)| *id != victim_id)
            .fold(None, |best: Option<(BlobId, f64, f64)>, (id, b)| {
                let d = b.center_position().distance_squared(victim_center);
                match best {
                    Some((_, _, bd)) if d >= bd => best,
                    _ => Some((id, b.radius(), d)),
                }
            })
            .map(|(id, r, _)| (id, r))
        else {
            return false;
        };

        let merged_radius = (victim_radius * victim_radius + absorber_radius * absorber_radius).sqrt();
        self.scale_blob(absorber_id, JOIN_GROWTH * merged_radius / absorber_radius);

        self.slots[victim_id.0] = None;
        let dropped = self.tethers.remove_involving(victim_id);
        if self.selected == Some(victim_id) {
            self.selected = None;
        }

        log::debug!(
            "joined blob {} into blob {} (radius {:.4}, {} tethers dropped, {} active)",
            victim_id.0,
            absorber_id.0,
            self.get(absorber_id).map_or(0.0, Blob::radius),
            dropped,
            self.active_count()
        );
        true
    }

    /// Grab the first blob whose center is within half its radius of `point`
    ///
    /// Scan order wins over proximity. Returns the grab offset
    /// `point - center`, or `None` if nothing was hit or a blob is already held.
    pub fn select_blob(&mut self, point: Vector2) -> Option<Vector2> {
        if self.selected.is_some() {
            return None;
        }

        let (id, offset) = self.active().find_map(|(id, b)| {
            let offset = point - b.center_position();
            let reach = SELECT_RADIUS_FRACTION * b.radius();
            (offset.length_squared() < reach * reach).then_some((id, offset))
        })?;

        self.selected = Some(id);
        if let Some(blob) = self.get_mut(id) {
            blob.set_selected(true);
        }
        log::debug!("selected blob {}", id.0);
        Some(offset)
    }

    pub fn unselect_blob(&mut self) {
        if let Some(id) = self.selected.take() {
            if let Some(blob) = self.get_mut(id) {
                blob.set_selected(false);
            }
            log::debug!("released blob {}", id.0);
        }
    }

    /// Teleport the held blob so its center lands on `target`
    pub fn move_selected_to(&mut self, target: Vector2) {
        if let Some(id) = self.selected {
            if let Some(blob) = self.get_mut(id) {
                blob.move_to(target);
            }
        }
    }

    /// Nudge every blob except the held one, jittered per blob and axis
    ///
    /// The jittered force is applied on top of the base force in the next
    /// `update`.
    pub fn add_force(&mut self, force: Vector2) {
        let selected = self.selected;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(blob) = slot else { continue };
            if selected == Some(BlobId(i)) {
                continue;
            }
            let jitter = Vector2::new(
                self.rng.random_range(JITTER_MIN..JITTER_MAX),
                self.rng.random_range(JITTER_MIN..JITTER_MAX),
            );
            blob.queue_force(force * jitter);
        }
    }

    /// Advance every blob by one timestep
    ///
    /// `drag_to` teleports the held blob first. The held blob gets no force;
    /// the rest get `gravity` plus any queued nudge. Each blob integrates and
    /// relaxes in slot order, tethers included.
    pub fn update(&mut self, dt: f64, boundary: &Boundary, gravity: Vector2, drag_to: Option<Vector2>) {
        if let Some(target) = drag_to {
            self.move_selected_to(target);
        }

        for index in 0..self.slots.len() {
            let Some(mut blob) = self.slots[index].take() else {
                continue;
            };
            let id = BlobId(index);

            let nudge = blob.take_pending_force();
            if blob.is_selected() {
                blob.set_force(Vector2::ZERO);
            } else {
                blob.set_force(gravity);
                if nudge != Vector2::ZERO {
                    blob.add_force(nudge);
                }
            }
            blob.integrate(dt);

            let slots = &mut self.slots;
            let tethers = &self.tethers;
            blob.satisfy_constraints_with(boundary, |center| {
                for tether in tethers.owned_by(id) {
                    if let Some(other) = slots.get_mut(tether.other.0).and_then(Option::as_mut) {
                        tether.satisfy(center, other.center_mut());
                    }
                }
            });

            self.slots[index] = Some(blob);
        }
    }
}
