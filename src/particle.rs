// Fixed-capacity particle pool.
//
// Slots are tagged (`Option<Particle>`) and a separate stack of free indices
// drives O(1) spawn/release. A slot index lives in exactly one place at any
// instant: either on the free stack or occupying its slot. Keeping the free
// links out of the particle itself means live data can never be mistaken for
// a list pointer.

use crate::color::DoubleColor;

/// One falling flake. Visual: a small translucent square drifting down the
/// frame until its lifetime runs out.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Half the square's side, fixed at spawn.
    pub radius: f64,
    pub color: DoubleColor,
    /// Remaining ticks; the slot is released when this reaches 0.
    pub lifetime: u32,
}

pub struct ParticlePool {
    slots: Vec<Option<Particle>>,
    free: Vec<usize>,
}

impl ParticlePool {
    /// Create a pool with every slot free. Free indices pop in slot order
    /// (0, 1, 2, ...).
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Place a fully initialized particle into a free slot. Returns the slot
    /// index, or `None` when the pool is exhausted (the particle is dropped).
    pub fn spawn(&mut self, particle: Particle) -> Option<usize> {
        let index = self.free.pop()?;
        self.slots[index] = Some(particle);
        Some(index)
    }

    /// Return a slot to the free stack. Releasing an already-free slot is a
    /// no-op.
    pub fn release(&mut self, index: usize) {
        if self.slots[index].take().is_some() {
            self.free.push(index);
        }
    }

    /// Mutable access to one slot's particle, `None` while the slot is free.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.slots[index].as_mut()
    }

    /// Iterate every occupied slot with its index.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Particle)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|p| (i, p)))
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.slots[index].as_ref()
    }
}
