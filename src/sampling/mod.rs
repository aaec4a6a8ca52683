//! Landmark subsampling of a domain.
//!
//! Landmarks are drawn uniformly without replacement by shuffling the full
//! point list and keeping a prefix. The random source is owned by the
//! caller, so a seeded generator reproduces the same landmark set.

use crate::core::traits::Domain;
use crate::error::NystromError;
use rand::Rng;
use rand::seq::SliceRandom;

/// Draw `min(requested, domain.num_points())` distinct domain points.
///
/// The returned order is the shuffle order and is fixed from here on: block
/// row/column `j` of the gram matrix corresponds to landmark `j`.
pub fn sample_landmarks<D, R>(
    domain: &D,
    requested: usize,
    rng: &mut R,
) -> Result<Vec<D::Point>, NystromError>
where
    D: Domain + ?Sized,
    R: Rng + ?Sized,
{
    let expected = domain.num_points();
    let mut points = domain.points();
    if points.len() != expected {
        return Err(NystromError::DomainMismatch {
            expected,
            actual: points.len(),
        });
    }
    let count = requested.min(expected);
    points.shuffle(rng);
    points.truncate(count);
    Ok(points)
}
