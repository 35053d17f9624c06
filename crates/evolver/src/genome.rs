//! Random genome generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fills a fresh genome of `len` bytes from `rng`.
pub fn random_genome(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    let mut genome = vec![0; len];
    rng.fill(genome.as_mut_slice());
    genome
}

/// Finite stream of random genomes drawn from one seeded generator.
#[derive(Debug, Clone)]
pub struct GenomeBatch {
    rng: StdRng,
    genome_len: usize,
    remaining: usize,
}

impl GenomeBatch {
    /// Stream of `runs` genomes; `seed` of `None` draws one from entropy.
    #[must_use]
    pub fn new(seed: Option<u64>, runs: usize, genome_len: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            rng,
            genome_len,
            remaining: runs,
        }
    }
}

impl Iterator for GenomeBatch {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(random_genome(&mut self.rng, self.genome_len))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GenomeBatch {}
