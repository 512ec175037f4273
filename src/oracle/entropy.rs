//! Entropy helpers
//!
//! Uncertainty of a uniform candidate set, and the Shannon entropy of the
//! answer distribution a question induces over it.

/// Shannon entropy (in bits) of a uniform distribution over `count` objects
///
/// Zero for empty and singleton sets.
///
/// # Examples
/// ```
/// use kary_oracle::oracle::entropy_uniform;
///
/// assert_eq!(entropy_uniform(0), 0.0);
/// assert_eq!(entropy_uniform(1), 0.0);
/// assert!((entropy_uniform(8) - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn entropy_uniform(count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    (count as f64).log2()
}

/// Shannon entropy of a distribution given by branch sizes
///
/// H = -Σ p * log₂(p), with p = size / total. This is the expected
/// information gain of a question whose answers split the candidates into
/// branches of the given sizes.
///
/// # Properties
/// - Returns 0.0 when a single branch holds everything
/// - Maximized when branches are equal, at log₂(branches)
///
/// # Examples
/// ```
/// use kary_oracle::oracle::branch_entropy;
///
/// let entropy = branch_entropy(&[25, 25, 25, 25]);
/// assert!((entropy - 2.0).abs() < 0.001);
/// ```
#[must_use]
pub fn branch_entropy(sizes: &[usize]) -> f64 {
    let total = sizes.iter().sum::<usize>() as f64;

    if total == 0.0 {
        return 0.0;
    }

    sizes
        .iter()
        .filter(|&&size| size > 0)
        .map(|&size| {
            let p = size as f64 / total;
            -p * p.log2()
        })
        .sum()
}
