//! Velocity and position update rules.

use crate::candidate::{FeatureMask, GlobalBest, Particle};
use crate::relevance::sigmoid;
use crate::rng::RandomNumberGenerator;

use super::PsoConfig;

/// `v = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)`, clamped to the velocity
/// bounds. `r1` and `r2` are drawn per dimension.
pub fn update_velocity(
    particle: &mut Particle,
    global_best: &GlobalBest,
    config: &PsoConfig,
    rng: &mut RandomNumberGenerator,
) {
    let personal_best = &particle.best.position;
    for j in 0..particle.velocity.len() {
        let r1 = rng.uniform();
        let r2 = rng.uniform();
        let x = particle.position[j];

        let velocity = config.inertia() * particle.velocity[j]
            + config.cognitive() * r1 * (personal_best[j] - x)
            + config.social() * r2 * (global_best.position[j] - x);

        particle.velocity[j] = velocity.clamp(config.min_velocity(), config.max_velocity());
    }
}

/// Binary position rule: gene `j` is set when `rand < sigmoid(v_j)`. The position
/// mirrors the new mask.
pub fn binary_position(particle: &mut Particle, rng: &mut RandomNumberGenerator) {
    for j in 0..particle.velocity.len() {
        let selected = rng.uniform() < sigmoid(particle.velocity[j]);
        particle.mask.set(j, selected);
        particle.position[j] = if selected { 1.0 } else { 0.0 };
    }
}

/// Continuous position rule: `x += v`, clamped to the position bounds, and gene
/// `j` is set when `x_j > θ`.
pub fn continuous_position(particle: &mut Particle, config: &PsoConfig) {
    for j in 0..particle.position.len() {
        let x = (particle.position[j] + particle.velocity[j])
            .clamp(config.min_position(), config.max_position());
        particle.position[j] = x;
        particle.mask.set(j, x > config.threshold());
    }
}

/// Continuous positions that threshold into exactly `mask`.
///
/// Selected features land in `(θ, max]`, the others in `[min, θ)`.
pub fn positions_for_mask(mask: &FeatureMask, config: &PsoConfig, rng: &mut RandomNumberGenerator) -> Vec<f64> {
    let (min, max, threshold) = (config.min_position(), config.max_position(), config.threshold());
    mask.genes()
        .iter()
        .map(|&selected| {
            let u = rng.uniform();
            if selected {
                threshold + (max - threshold) * (1.0 - u)
            } else {
                min + (threshold - min) * u
            }
        })
        .collect()
}
