//! Seeded 2D gradient noise.
//!
//! `NoiseField` is a classic Perlin construction over a 256-entry
//! permutation table shuffled by a 31-bit linear congruential generator.
//! Output is remapped into `[0, 1]`, and the fractal composition keeps that
//! range by normalizing with the sum of octave amplitudes.

/// LCG multiplier used by the permutation shuffle.
const LCG_MULTIPLIER: u32 = 1_103_515_245;
/// LCG increment used by the permutation shuffle.
const LCG_INCREMENT: u32 = 12_345;
/// LCG output mask (31 bits).
const LCG_MASK: u32 = 0x7fff_ffff;

/// Deterministic 2D gradient noise generator.
///
/// Immutable after construction apart from [`NoiseField::set_seed`], which
/// rebuilds the whole table. Two fields built from the same seed return
/// bit-identical values for every query.
#[derive(Debug, Clone)]
pub struct NoiseField {
    /// Seed the permutation was built from.
    seed: u32,
    /// Permutation table, 256 shuffled entries duplicated for wrapping.
    perm: [u8; 512],
}

impl NoiseField {
    /// Creates a new noise field with the given seed.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perm: build_permutation(seed),
        }
    }

    /// Returns the seed of the current permutation table.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Reseeds the field, rebuilding the permutation table.
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
        self.perm = build_permutation(seed);
    }

    /// Computes 2D gradient noise at the given coordinates.
    ///
    /// Returns a value in the range [0, 1]. Integer lattice points always
    /// return exactly 0.5.
    #[must_use]
    pub fn noise_2d(&self, x: f32, y: f32) -> f32 {
        let x_floor = x.floor();
        let y_floor = y.floor();

        // Floor before masking so negative inputs wrap without a seam at zero
        let xi = (x_floor as i32 & 255) as usize;
        let yi = (y_floor as i32 & 255) as usize;

        let x = x - x_floor;
        let y = y - y_floor;

        let u = fade(x);
        let v = fade(y);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;

        let aa = p[a];
        let ab = p[a + 1];
        let ba = p[b];
        let bb = p[b + 1];

        let result = lerp(
            v,
            lerp(u, grad(aa, x, y), grad(ba, x - 1.0, y)),
            lerp(u, grad(ab, x, y - 1.0), grad(bb, x - 1.0, y - 1.0)),
        );

        ((result + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Generates octaved noise (fractal Brownian motion).
    ///
    /// Frequency doubles and amplitude is multiplied by `persistence` on each
    /// octave; the sum is divided by the total amplitude so the result stays
    /// in [0, 1]. Zero octaves yields the neutral midpoint 0.5.
    ///
    /// # Arguments
    /// * `x`, `y` - Coordinates
    /// * `octaves` - Number of octaves
    /// * `persistence` - Amplitude falloff per octave
    #[must_use]
    pub fn fractal_noise_2d(&self, x: f32, y: f32, octaves: u32, persistence: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            total += self.noise_2d(x * frequency, y * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        if max_value <= 0.0 {
            return 0.5;
        }
        (total / max_value).clamp(0.0, 1.0)
    }

    /// Samples [`NoiseField::noise_2d`] and maps it linearly into `[min, max]`.
    #[must_use]
    pub fn noise_range(&self, x: f32, y: f32, min: f32, max: f32) -> f32 {
        min + self.noise_2d(x, y) * (max - min)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Builds the duplicated permutation table for a seed.
fn build_permutation(seed: u32) -> [u8; 512] {
    let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);

    // Fisher-Yates shuffle driven by the LCG
    let mut rng = seed;
    for i in (1..256usize).rev() {
        rng = LCG_MULTIPLIER.wrapping_mul(rng).wrapping_add(LCG_INCREMENT) & LCG_MASK;
        let j = rng as usize % (i + 1);
        p.swap(i, j);
    }

    let mut perm = [0u8; 512];
    perm[..256].copy_from_slice(&p);
    perm[256..].copy_from_slice(&p);
    perm
}

/// Quintic smoothing curve `6t^5 - 15t^4 + 10t^3`.
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product with one of the gradient directions picked by the low 4 hash bits.
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_permutation_is_shuffled_bijection() {
        let perm = build_permutation(42);
        let mut seen = [false; 256];
        for &value in &perm[..256] {
            assert!(!seen[value as usize], "duplicate entry {value}");
            seen[value as usize] = true;
        }
        assert_eq!(&perm[..256], &perm[256..]);

        let identity: Vec<u8> = (0..=255).collect();
        assert_ne!(&perm[..256], identity.as_slice());
    }

    #[test]
    fn test_noise_deterministic() {
        let noise1 = NoiseField::new(123);
        let noise2 = NoiseField::new(123);

        for x in 0..20 {
            for y in 0..20 {
                let fx = x as f32 * 0.37;
                let fy = y as f32 * 0.53;
                assert_eq!(
                    noise1.noise_2d(fx, fy).to_bits(),
                    noise2.noise_2d(fx, fy).to_bits()
                );
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let noise1 = NoiseField::new(1);
        let noise2 = NoiseField::new(2);

        let differs = (0..50).any(|i| {
            let p = i as f32 * 0.41 + 0.13;
            (noise1.noise_2d(p, p * 0.7) - noise2.noise_2d(p, p * 0.7)).abs() > f32::EPSILON
        });
        assert!(differs);
    }

    #[test]
    fn test_lattice_points_are_midpoint() {
        let noise = NoiseField::new(7);
        for x in -5..5 {
            for y in -5..5 {
                let n = noise.noise_2d(x as f32, y as f32);
                assert!((n - 0.5).abs() < f32::EPSILON, "({x}, {y}) -> {n}");
            }
        }
    }

    #[test]
    fn test_continuous_across_zero() {
        let noise = NoiseField::new(99);
        let left = noise.noise_2d(-0.0001, 0.3);
        let right = noise.noise_2d(0.0001, 0.3);
        assert!((left - right).abs() < 0.01, "seam at zero: {left} vs {right}");
    }

    #[test]
    fn test_set_seed_rebuilds_table() {
        let mut noise = NoiseField::new(5);
        noise.set_seed(77);
        let fresh = NoiseField::new(77);
        assert_eq!(noise.seed(), 77);
        assert_eq!(
            noise.noise_2d(3.3, 4.4).to_bits(),
            fresh.noise_2d(3.3, 4.4).to_bits()
        );
    }

    #[test]
    fn test_fractal_zero_octaves() {
        let noise = NoiseField::new(1);
        assert!((noise.fractal_noise_2d(1.5, 2.5, 0, 0.5) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fractal_single_octave_matches_base() {
        let noise = NoiseField::new(3);
        let base = noise.noise_2d(4.2, 1.7);
        let fractal = noise.fractal_noise_2d(4.2, 1.7, 1, 0.5);
        assert!((base - fractal).abs() < f32::EPSILON);
    }

    #[test]
    fn test_noise_range_maps_interval() {
        let noise = NoiseField::new(11);
        let n = noise.noise_2d(2.25, 8.75);
        let ranged = noise.noise_range(2.25, 8.75, 10.0, 20.0);
        assert!((ranged - (10.0 + n * 10.0)).abs() < 1e-4);
        assert!((10.0..=20.0).contains(&ranged));
    }

    proptest! {
        #[test]
        fn prop_noise_in_unit_range(seed in any::<u32>(), x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let noise = NoiseField::new(seed);
            let n = noise.noise_2d(x, y);
            prop_assert!((0.0..=1.0).contains(&n));
        }

        #[test]
        fn prop_fractal_in_unit_range(
            seed in any::<u32>(),
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            octaves in 1u32..8,
            persistence in 0.01f32..=1.0,
        ) {
            let noise = NoiseField::new(seed);
            let n = noise.fractal_noise_2d(x, y, octaves, persistence);
            prop_assert!((0.0..=1.0).contains(&n));
        }
    }
}
