// Per-frame simulation: clear, spawn, animate, draw.
//
// The host calls `State::update_and_render` exactly once per frame with a
// writable framebuffer view and the elapsed seconds since the previous frame.
// Everything the simulation needs across frames (pool, RNG, tick counter)
// lives in `State`, built once up front; there is no lazy-init branch and no
// process-global seed.

use crate::color::{Color, DoubleColor};
use crate::particle::{Particle, ParticlePool};
use crate::raster::FrameBuffer;

/// Downward drift in pixels per second.
const FALL_SPEED: f64 = 160.0;
/// Half-side of the square a particle is drawn as, fixed at spawn.
const PARTICLE_RADIUS: f64 = 2.5;
/// Ticks a fresh particle lives before its slot is released.
const PARTICLE_LIFETIME: u32 = 200;
/// One spawn attempt every this many ticks.
const SPAWN_INTERVAL: u64 = 2;

/// Dark blue sky behind the flakes; fully opaque so the clear takes the
/// overwrite path.
const BACKGROUND: DoubleColor = DoubleColor { a: 1.0, r: 0.01, g: 0.02, b: 0.05 };

/// Default seed pair for the particle random stream.
pub const DEFAULT_SEED: (u64, u64) = (0x0bdb_1dd3_52d7_ddd4, 0x009b_18cd_16d1_df52);

// ----------------------------- tiny RNG (no external crate) -----------------------------

/// Deterministic xorshift128+ stream. Seeding with the same pair reproduces
/// the exact same spawn positions and alphas run after run.
#[derive(Clone)]
struct Rng {
    s0: u64,
    s1: u64,
}

impl Rng {
    fn from_seed(s0: u64, s1: u64) -> Self {
        // The all-zero state is a fixed point of xorshift.
        if s0 == 0 && s1 == 0 {
            Self { s0: DEFAULT_SEED.0, s1: DEFAULT_SEED.1 }
        } else {
            Self { s0, s1 }
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.s0;
        let y = self.s1;
        self.s0 = y;
        x ^= x << 23;
        self.s1 = x ^ y ^ (x >> 17) ^ (y >> 26);
        self.s1.wrapping_add(y)
    }

    /// Uniform [0, 1) with 53 bits of precision.
    #[inline]
    fn next_fraction(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ----------------------------- session state ------------------------------------------

/// Session-wide simulation state. Construct once, then feed it frames.
pub struct State {
    pool: ParticlePool,
    rng: Rng,
    ticks: u64,
}

impl State {
    /// State with the default seed pair.
    pub fn new(capacity: usize) -> Self {
        Self::with_seed(capacity, DEFAULT_SEED.0, DEFAULT_SEED.1)
    }

    /// State with an explicit seed pair, for reproducible runs.
    pub fn with_seed(capacity: usize, s0: u64, s1: u64) -> Self {
        Self {
            pool: ParticlePool::new(capacity),
            rng: Rng::from_seed(s0, s1),
            ticks: 0,
        }
    }

    /// Frames processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Currently active particles.
    pub fn live(&self) -> usize {
        self.pool.live()
    }

    #[cfg(test)]
    pub(crate) fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    /// Advance the simulation one tick and redraw the whole frame.
    ///
    /// Clears the buffer to the background, attempts one spawn on even
    /// ticks, then animates, draws, and (on expiry) releases every live
    /// particle. `seconds_elapsed` is the wall time since the previous call.
    pub fn update_and_render(&mut self, fb: &mut FrameBuffer<'_>, seconds_elapsed: f64) {
        fb.fill_rect(
            0.0,
            0.0,
            fb.width() as f64,
            fb.height() as f64,
            Color::from_normalized(BACKGROUND),
        );

        // Particle spawning
        if self.ticks % SPAWN_INTERVAL == 0 {
            let flake = self.make_flake(fb.width());
            if self.pool.spawn(flake).is_none() {
                log::debug!("pool exhausted at tick {}, spawn dropped", self.ticks);
            }
        }

        // Simulate and draw
        for index in 0..self.pool.capacity() {
            let Some(p) = self.pool.slot_mut(index) else { continue };
            p.y += FALL_SPEED * seconds_elapsed;
            p.lifetime -= 1;

            let (x, y, r) = (p.x, p.y, p.radius);
            let color = Color::from_normalized(p.color);
            let expired = p.lifetime == 0;

            fb.fill_rect(x - r, y - r, x + r, y + r, color);
            if expired {
                self.pool.release(index);
            }
        }

        self.ticks += 1;
    }

    /// Fresh particle just above the top edge: random column, randomized
    /// translucency, fixed pale-blue tint. Draw order (column first, then
    /// alpha) is part of the deterministic stream.
    fn make_flake(&mut self, width: usize) -> Particle {
        let column = self.rng.next_u64() % width.max(1) as u64;
        let alpha = 0.25 + 0.75 * self.rng.next_fraction();
        Particle {
            x: column as f64,
            y: -2.0 * PARTICLE_RADIUS,
            radius: PARTICLE_RADIUS,
            color: DoubleColor { a: alpha, r: 0.55, g: 0.9, b: 1.0 },
            lifetime: PARTICLE_LIFETIME,
        }
    }
}
