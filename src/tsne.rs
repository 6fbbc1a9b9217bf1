use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::VizError;

const N_ITER: usize = 1000;
const EXAGGERATION_ITERS: usize = 250;
const EARLY_EXAGGERATION: f64 = 12.0;
const LEARNING_RATE: f64 = 200.0;
const INITIAL_MOMENTUM: f64 = 0.5;
const FINAL_MOMENTUM: f64 = 0.8;
const PROB_FLOOR: f64 = 1e-12;

/// Project high-dimensional vectors into 2-D with exact t-SNE over cosine
/// distances. The output has the same length and order as the input, and
/// identical vectors with an identical seed reproduce the layout exactly:
/// the only randomness is the seeded initial placement.
///
/// The exact quadratic formulation is used: the pipeline deals in tens of
/// points, where it is both fast and fully deterministic.
pub fn project(vectors: &[Vec<f32>], seed: u64) -> Result<Vec<(f64, f64)>, VizError> {
    let n = vectors.len();
    if n < 2 {
        return Err(VizError::InsufficientPoints(n));
    }

    let distances = cosine_distance_matrix(vectors);
    let perplexity = ((n - 1) as f64 / 3.0).clamp(1.0, 30.0);
    let p = joint_probabilities(&distances, perplexity);

    // Small gaussian initial layout, seeded for reproducibility
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout: Vec<(f64, f64)> = (0..n)
        .map(|_| {
            (
                sample_gaussian(&mut rng) * 1e-4,
                sample_gaussian(&mut rng) * 1e-4,
            )
        })
        .collect();
    let mut velocity = vec![(0.0, 0.0); n];

    for iter in 0..N_ITER {
        let exaggeration = if iter < EXAGGERATION_ITERS {
            EARLY_EXAGGERATION
        } else {
            1.0
        };
        let momentum = if iter < EXAGGERATION_ITERS {
            INITIAL_MOMENTUM
        } else {
            FINAL_MOMENTUM
        };

        // Student-t kernel numerators between every layout pair
        let mut num = vec![vec![0.0; n]; n];
        let mut num_sum = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = layout[i].0 - layout[j].0;
                let dy = layout[i].1 - layout[j].1;
                let value = 1.0 / (1.0 + dx * dx + dy * dy);
                num[i][j] = value;
                num[j][i] = value;
                num_sum += 2.0 * value;
            }
        }

        // KL gradient, then momentum update
        for i in 0..n {
            let mut grad_x = 0.0;
            let mut grad_y = 0.0;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let q = (num[i][j] / num_sum).max(PROB_FLOOR);
                let mult = (exaggeration * p[i][j] - q) * num[i][j];
                grad_x += 4.0 * mult * (layout[i].0 - layout[j].0);
                grad_y += 4.0 * mult * (layout[i].1 - layout[j].1);
            }
            velocity[i].0 = momentum * velocity[i].0 - LEARNING_RATE * grad_x;
            velocity[i].1 = momentum * velocity[i].1 - LEARNING_RATE * grad_y;
        }
        for i in 0..n {
            layout[i].0 += velocity[i].0;
            layout[i].1 += velocity[i].1;
        }
        recenter(&mut layout);

        if (iter + 1) % 250 == 0 {
            debug!(
                iter = iter + 1,
                cost = kl_divergence(&p, &num, num_sum),
                "t-SNE progress"
            );
        }
    }

    Ok(layout)
}

/// Pairwise cosine distances, `1 - cos(a, b)`, clamped at 0.
fn cosine_distance_matrix(vectors: &[Vec<f32>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let norms: Vec<f64> = vectors
        .iter()
        .map(|v| v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt())
        .collect();

    let mut distances = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let similarity = if norms[i] == 0.0 || norms[j] == 0.0 {
                0.0
            } else {
                let dot: f64 = vectors[i]
                    .iter()
                    .zip(&vectors[j])
                    .map(|(a, b)| (*a as f64) * (*b as f64))
                    .sum();
                dot / (norms[i] * norms[j])
            };
            let distance = (1.0 - similarity).max(0.0);
            distances[i][j] = distance;
            distances[j][i] = distance;
        }
    }
    distances
}

/// Symmetrized joint probabilities from the distance matrix, with each
/// row's precision found by binary search to hit the target perplexity.
fn joint_probabilities(distances: &[Vec<f64>], perplexity: f64) -> Vec<Vec<f64>> {
    let n = distances.len();
    let target_entropy = perplexity.ln();

    let conditional: Vec<Vec<f64>> = (0..n)
        .map(|i| conditional_probabilities(&distances[i], i, target_entropy))
        .collect();

    let mut joint = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            joint[i][j] =
                ((conditional[i][j] + conditional[j][i]) / (2.0 * n as f64)).max(PROB_FLOOR);
        }
    }
    joint
}

/// Row of conditional probabilities p_{j|i} for one point, with the
/// gaussian precision beta tuned so the row entropy matches the target.
fn conditional_probabilities(dist_row: &[f64], i: usize, target_entropy: f64) -> Vec<f64> {
    let n = dist_row.len();
    let mut beta = 1.0;
    let mut beta_min = f64::NEG_INFINITY;
    let mut beta_max = f64::INFINITY;
    let mut row = vec![0.0; n];

    for _ in 0..50 {
        let mut sum = 0.0;
        for j in 0..n {
            row[j] = if j == i { 0.0 } else { (-dist_row[j] * beta).exp() };
            sum += row[j];
        }
        if sum == 0.0 {
            // every other point is numerically infinitely far; fall back
            // to a uniform row
            let uniform = 1.0 / (n - 1) as f64;
            for (j, value) in row.iter_mut().enumerate() {
                *value = if j == i { 0.0 } else { uniform };
            }
            break;
        }

        let weighted_distance: f64 = dist_row
            .iter()
            .zip(row.iter())
            .map(|(d, p)| d * p)
            .sum();
        let entropy = sum.ln() + beta * weighted_distance / sum;
        for value in row.iter_mut() {
            *value /= sum;
        }

        let diff = entropy - target_entropy;
        if diff.abs() < 1e-5 {
            break;
        }
        if diff > 0.0 {
            beta_min = beta;
            beta = if beta_max.is_finite() {
                (beta + beta_max) / 2.0
            } else {
                beta * 2.0
            };
        } else {
            beta_max = beta;
            beta = if beta_min.is_finite() {
                (beta + beta_min) / 2.0
            } else {
                beta / 2.0
            };
        }
    }
    row
}

fn kl_divergence(p: &[Vec<f64>], num: &[Vec<f64>], num_sum: f64) -> f64 {
    let n = p.len();
    let mut cost = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let q = (num[i][j] / num_sum).max(PROB_FLOOR);
            cost += p[i][j] * (p[i][j] / q).ln();
        }
    }
    cost
}

fn recenter(layout: &mut [(f64, f64)]) {
    let n = layout.len() as f64;
    let mean_x: f64 = layout.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y: f64 = layout.iter().map(|(_, y)| y).sum::<f64>() / n;
    for point in layout.iter_mut() {
        point.0 -= mean_x;
        point.1 -= mean_y;
    }
}

/// Box-Muller transform over the seeded generator.
fn sample_gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
