use noise::NoiseFn;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const PERMUTATION_SIZE: usize = 256;

/// Seeded 2D gradient noise.
///
/// The permutation table is shuffled once at construction and duplicated to
/// 512 entries, so lattice lookups at `X + 1` never wrap. Sampling is pure:
/// two fields built from the same RNG state return identical values.
#[derive(Debug, Clone)]
pub struct NoiseField {
    permutation: [u8; PERMUTATION_SIZE * 2],
}

impl NoiseField {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut perm: Vec<u8> = (0..=255u8).collect();
        perm.shuffle(rng);

        let mut permutation = [0u8; PERMUTATION_SIZE * 2];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = perm[i % PERMUTATION_SIZE];
        }

        Self { permutation }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut Pcg64::seed_from_u64(seed))
    }

    /// Sample the field; values land roughly in [-1, 1] and are exactly 0 on lattice points.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let x = x - x.floor();
        let y = y - y.floor();

        let u = fade(x);
        let v = fade(y);

        let p = &self.permutation;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize;
        let ab = p[a + 1] as usize;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize;
        let bb = p[b + 1] as usize;

        lerp(
            v,
            lerp(u, grad(p[aa], x, y), grad(p[ba], x - 1.0, y)),
            lerp(u, grad(p[ab], x, y - 1.0), grad(p[bb], x - 1.0, y - 1.0)),
        )
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of the offset with one of 16 hashed directions
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let grad_x = 1 + (h & 7) as i32;
    let grad_y = if grad_x & 1 == 1 { grad_x } else { -grad_x };
    (grad_x as f64 * x + grad_y as f64 * y) * 0.5
}
