//! Numerical helpers shared by the smoothing models

use crate::config::OptimizerConfig;
use std::cmp::Ordering;

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Outcome of a Nelder-Mead search
#[derive(Debug, Clone)]
pub struct Minimum {
    /// Best point found
    pub point: Vec<f64>,
    /// Objective value at `point`
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimise `objective` with the Nelder-Mead simplex method.
///
/// Every trial point is clamped into `bounds`, one `(min, max)` pair per
/// dimension. Non-finite objective values are treated as worse than any
/// finite value.
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    config: &OptimizerConfig,
) -> Minimum
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    let eval = |x: &[f64]| {
        let v = objective(x);
        if v.is_finite() {
            v
        } else {
            f64::INFINITY
        }
    };

    let start = clamp(initial, bounds);
    if n == 0 {
        let value = eval(&start[..]);
        return Minimum {
            point: start,
            value,
            iterations: 0,
            converged: true,
        };
    }

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(start.clone());
    for i in 0..n {
        let mut vertex = start.clone();
        // Step away from the nearest bound so the vertex stays distinct
        let (lo, hi) = bounds
            .get(i)
            .copied()
            .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        if vertex[i] + config.initial_step <= hi {
            vertex[i] += config.initial_step;
        } else {
            vertex[i] = (vertex[i] - config.initial_step).max(lo);
        }
        simplex.push(vertex);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| eval(&v[..])).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if (values[worst] - values[best]).abs() < config.tolerance {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex, worst);
        let max_dist = simplex
            .iter()
            .map(|v| distance(v, &centroid))
            .fold(0.0, f64::max);
        if max_dist < config.tolerance {
            converged = true;
            break;
        }

        let reflected = clamp(&towards(&centroid, &simplex[worst], -REFLECTION), bounds);
        let reflected_value = eval(&reflected[..]);

        if reflected_value < values[best] {
            let expanded = clamp(&towards(&centroid, &reflected, EXPANSION), bounds);
            let expanded_value = eval(&expanded[..]);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        let (contracted, contracted_value) = if reflected_value < values[worst] {
            let c = clamp(&towards(&centroid, &reflected, CONTRACTION), bounds);
            let v = eval(&c[..]);
            (c, v)
        } else {
            let c = clamp(&towards(&centroid, &simplex[worst], CONTRACTION), bounds);
            let v = eval(&c[..]);
            (c, v)
        };
        if contracted_value < values[worst].min(reflected_value) {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        let anchor = simplex[best].clone();
        for i in 0..=n {
            if i != best {
                let shrunk: Vec<f64> = anchor
                    .iter()
                    .zip(&simplex[i])
                    .map(|(a, x)| a + SHRINK * (x - a))
                    .collect();
                simplex[i] = clamp(&shrunk, bounds);
                values[i] = eval(&simplex[i][..]);
            }
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Minimum {
        point: simplex[best].clone(),
        value: values[best],
        iterations,
        converged,
    }
}

/// Centroid of all vertices except `exclude`
fn centroid(simplex: &[Vec<f64>], exclude: usize) -> Vec<f64> {
    let dims = simplex[0].len();
    let count = (simplex.len() - 1) as f64;
    let mut c = vec![0.0; dims];

    for (i, vertex) in simplex.iter().enumerate() {
        if i != exclude {
            for (acc, x) in c.iter_mut().zip(vertex) {
                *acc += x;
            }
        }
    }
    for acc in &mut c {
        *acc /= count;
    }

    c
}

/// `centroid + coef * (point - centroid)`
fn towards(centroid: &[f64], point: &[f64], coef: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(point)
        .map(|(c, p)| c + coef * (p - c))
        .collect()
}

fn clamp(point: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    point
        .iter()
        .enumerate()
        .map(|(i, &x)| match bounds.get(i) {
            Some(&(lo, hi)) => x.clamp(lo, hi),
            None => x,
        })
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
