//! Randomized eigensolver for symmetric positive semi-definite matrices.
//!
//! Halko, Martinsson & Tropp style range finder:
//! 1. Draw a Gaussian test matrix Ω (n × l, l = rank + oversampling).
//! 2. Q = orth(A Ω), followed by `power_iterations` rounds of Q = orth(A Q).
//! 3. Project B = Qᵀ A Q (l × l) and decompose it exactly.
//! 4. Lift the leading eigenvectors back: U = Q V.
//!
//! Orthonormalisation is modified Gram-Schmidt with a second pass. Columns
//! that collapse (A has lower numerical rank than l) are replaced by fresh
//! random directions so Q always stays orthonormal.
//!
//! The test matrix is drawn from a generator seeded with
//! `RandomizedOptions::seed` on every call, so `decompose` is deterministic.
//!
//! # References
//! - Halko, Martinsson, Tropp (2011). Finding structure with randomness. SIAM Review 53(2).

use crate::config::RandomizedOptions;
use crate::eigen::exact::symmetric_eigen;
use crate::eigen::{EigenPairs, Eigensolver, check_input, leading_pairs};
use crate::error::NystromError;
use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Columns whose norm drops below this fraction after projection are degenerate.
const DEGENERATE_TOL: f64 = 1e-10;
/// Random restarts tried per degenerate column before giving up.
const MAX_RESTARTS: usize = 8;

/// Randomized range-finder eigensolver.
#[derive(Clone, Debug, Default)]
pub struct RandomizedEigensolver {
    pub options: RandomizedOptions,
}

impl RandomizedEigensolver {
    pub fn new(options: RandomizedOptions) -> Self {
        Self { options }
    }

    /// Solver with default options and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(RandomizedOptions::default().with_seed(seed))
    }
}

impl Eigensolver for RandomizedEigensolver {
    fn decompose(&self, a: &Mat<f64>, rank: usize) -> Result<EigenPairs, NystromError> {
        let n = check_input(a, rank)?;
        let l = (rank + self.options.oversampling).min(n);
        if l == 0 {
            return Ok(EigenPairs {
                vectors: Mat::<f64>::zeros(n, 0),
                values: Vec::new(),
            });
        }

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let data: Vec<f64> = (0..n * l).map(|_| rng.sample(StandardNormal)).collect();
        let omega = Mat::from_fn(n, l, |i, j| data[j * n + i]);

        let mut q = orthonormalize(&(a * &omega), &mut rng)?;
        for _ in 0..self.options.power_iterations {
            q = orthonormalize(&(a * &q), &mut rng)?;
        }

        let q_t = q.transpose();
        let aq = a * &q;
        let mut b = &q_t * &aq;
        for i in 0..l {
            for j in (i + 1)..l {
                let avg = 0.5 * (b[(i, j)] + b[(j, i)]);
                b[(i, j)] = avg;
                b[(j, i)] = avg;
            }
        }

        let (values, v) = symmetric_eigen(&b)?;
        let small = leading_pairs(&values, v.as_ref(), rank);
        let vectors = &q * &small.vectors;
        log::debug!(
            "randomized eigensolver: n = {n}, rank = {rank}, sketch = {l}, power iterations = {}",
            self.options.power_iterations
        );
        Ok(EigenPairs {
            vectors,
            values: small.values,
        })
    }
}

/// Orthonormal basis for the column space of `y`, with the same column count.
fn orthonormalize(y: &Mat<f64>, rng: &mut StdRng) -> Result<Mat<f64>, NystromError> {
    let (n, l) = (y.nrows(), y.ncols());
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(l);
    for j in 0..l {
        let mut w: Vec<f64> = (0..n).map(|i| y[(i, j)]).collect();
        let mut restarts = 0;
        loop {
            let reference = norm(&w);
            // Modified Gram-Schmidt, second pass for numerical orthogonality
            for _ in 0..2 {
                for v in &basis {
                    let h = dot(&w, v);
                    for (wk, vk) in w.iter_mut().zip(v) {
                        *wk -= h * vk;
                    }
                }
            }
            let nrm = norm(&w);
            if reference > 0.0 && nrm > DEGENERATE_TOL * reference {
                w.iter_mut().for_each(|wk| *wk /= nrm);
                basis.push(w);
                break;
            }
            if restarts == MAX_RESTARTS {
                return Err(NystromError::Decomposition(format!(
                    "could not complete an orthonormal basis at column {j}"
                )));
            }
            restarts += 1;
            log::debug!("replacing degenerate sketch column {j} with a random direction");
            w = (0..n).map(|_| rng.sample(StandardNormal)).collect();
        }
    }
    Ok(Mat::from_fn(n, l, |i, j| basis[j][i]))
}

fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

fn norm(x: &[f64]) -> f64 {
    dot(x, x).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eigen::ExactEigensolver;
    use approx::assert_abs_diff_eq;

    fn gaussian_gram(n: usize) -> Mat<f64> {
        let xs: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
        Mat::from_fn(n, n, |i, j| (-(xs[i] - xs[j]).powi(2) / 0.1).exp())
    }

    #[test]
    fn orthonormalize_produces_orthonormal_columns() {
        let mut rng = StdRng::seed_from_u64(5);
        // rank-deficient input: third column repeats the first
        let y = Mat::from_fn(5, 3, |i, j| match j {
            0 | 2 => 1.0 + i as f64,
            _ => (i as f64).sin(),
        });
        let q = orthonormalize(&y, &mut rng).unwrap();
        for a in 0..3 {
            for b in 0..3 {
                let d: f64 = (0..5).map(|i| q[(i, a)] * q[(i, b)]).sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(d, expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn agrees_with_exact_solver_on_gaussian_gram() {
        let a = gaussian_gram(40);
        let exact = ExactEigensolver.decompose(&a, 4).unwrap();
        let approx = RandomizedEigensolver::with_seed(1).decompose(&a, 4).unwrap();
        approx.validate(40, 4).unwrap();
        for c in 0..4 {
            assert_abs_diff_eq!(approx.values[c], exact.values[c], epsilon = 1e-8);
            // eigenvectors agree up to sign
            let d: f64 = (0..40)
                .map(|i| approx.vectors[(i, c)] * exact.vectors[(i, c)])
                .sum();
            assert_abs_diff_eq!(d.abs(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let a = gaussian_gram(25);
        let s = RandomizedEigensolver::with_seed(42);
        let p1 = s.decompose(&a, 3).unwrap();
        let p2 = s.decompose(&a, 3).unwrap();
        assert_eq!(p1.values, p2.values);
        assert_eq!(p1.vectors, p2.vectors);
    }

    #[test]
    fn identity_has_unit_eigenvalues() {
        let a = Mat::<f64>::identity(20, 20);
        let pairs = RandomizedEigensolver::default().decompose(&a, 3).unwrap();
        assert_eq!(pairs.rank(), 3);
        for v in &pairs.values {
            assert_abs_diff_eq!(*v, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn low_rank_input_yields_zero_tail() {
        let n = 12;
        let a = Mat::from_fn(n, n, |_, _| 1.0);
        let pairs = RandomizedEigensolver::default().decompose(&a, 3).unwrap();
        pairs.validate(n, 3).unwrap();
        assert_abs_diff_eq!(pairs.values[0], n as f64, epsilon = 1e-9);
        assert!(pairs.values[1] < 1e-9);
        assert!(pairs.values[2] < 1e-9);
    }
}
