use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// Mutates a boolean genome in place.
pub trait MutationOperator: Debug + Send + Sync {
    /// Mutates `genome` and returns the number of genes that changed.
    fn mutate(&self, genome: &mut [bool], rate: f64, rng: &mut RandomNumberGenerator) -> usize;
}

/// Flips each gene independently with probability `rate`.
///
/// # Examples
///
/// ```
/// use featsel::breeding::{BitwiseMutation, MutationOperator};
/// use featsel::rng::RandomNumberGenerator;
///
/// let mut genome = vec![false; 6];
/// let mut rng = RandomNumberGenerator::from_seed(4);
///
/// assert_eq!(BitwiseMutation.mutate(&mut genome, 1.0, &mut rng), 6);
/// assert!(genome.iter().all(|&g| g));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BitwiseMutation;

impl MutationOperator for BitwiseMutation {
    fn mutate(&self, genome: &mut [bool], rate: f64, rng: &mut RandomNumberGenerator) -> usize {
        let mut flipped = 0;
        for gene in genome.iter_mut() {
            if rng.chance(rate) {
                *gene = !*gene;
                flipped += 1;
            }
        }
        flipped
    }
}
