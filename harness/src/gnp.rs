//! Gilbert G(n, p) random graphs.

use matchbound_kernel::graph::{GraphError, NodeId, ProblemGraphV1};
use rand::{Rng, SeedableRng};
use rand_distr::Geometric;
use rand_pcg::Pcg64Mcg;

/// Typed failure for random graph generation.
#[derive(Debug, Clone, PartialEq)]
pub enum GnpError {
    /// `p` is NaN or outside `[0, 1]`.
    InvalidProbability { p: f64 },
    /// `n * n` candidate pairs do not fit the sampling range.
    TooManyNodes { n: NodeId },
    /// The sampled edge list was rejected (cannot occur for sampled pairs).
    Graph(GraphError),
}

impl std::fmt::Display for GnpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProbability { p } => {
                write!(f, "edge probability {p} is not in [0, 1]")
            }
            Self::TooManyNodes { n } => write!(f, "{n} nodes is too many to sample"),
            Self::Graph(e) => write!(f, "generated graph rejected: {e}"),
        }
    }
}

impl std::error::Error for GnpError {}

/// Iterates `begin..end`, keeping each element i.i.d. with probability `p`.
///
/// Draws geometric skips instead of one coin per element.
pub struct BernoulliSamplingRange<'a, R: Rng> {
    current: i64,
    end: i64,
    distr: Geometric,
    rng: &'a mut R,
}

impl<'a, R: Rng> BernoulliSamplingRange<'a, R> {
    /// # Errors
    ///
    /// Returns [`GnpError::InvalidProbability`] unless `0 <= p <= 1`.
    pub fn new(rng: &'a mut R, begin: i64, end: i64, p: f64) -> Result<Self, GnpError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(GnpError::InvalidProbability { p });
        }
        let distr = Geometric::new(p).map_err(|_| GnpError::InvalidProbability { p })?;
        Ok(Self {
            current: begin - 1,
            end: end.max(begin),
            distr,
            rng,
        })
    }

    fn try_advance(&mut self) {
        if self.current >= self.end {
            return;
        }
        let skip = self.rng.sample(self.distr);
        self.current = i64::try_from(skip)
            .ok()
            .and_then(|s| self.current.checked_add(1)?.checked_add(s))
            .unwrap_or(self.end);
    }
}

impl<R: Rng> Iterator for BernoulliSamplingRange<'_, R> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_advance();
        if self.current >= self.end {
            None
        } else {
            Some(self.current)
        }
    }
}

/// Sample a simple undirected G(n, p): each of the `n(n-1)/2` node pairs is
/// an edge independently with probability `p`.
///
/// Edges come out ordered by `(u, v)` with `u < v`, so a seeded generator
/// reproduces the same graph and the same branching order.
///
/// # Errors
///
/// Returns [`GnpError::InvalidProbability`] unless `0 <= p <= 1`, and
/// [`GnpError::TooManyNodes`] when `n * n` overflows `i64`.
pub fn generate_gnp<R: Rng>(rng: &mut R, n: NodeId, p: f64) -> Result<ProblemGraphV1, GnpError> {
    let n64 = i64::from(n);
    let pairs = n64.checked_mul(n64).ok_or(GnpError::TooManyNodes { n })?;
    let mut edges = Vec::new();
    for x in BernoulliSamplingRange::new(rng, 0, pairs, p)? {
        let (u, v) = (x / n64, x % n64);
        if u < v {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            edges.push((u as NodeId, v as NodeId));
        }
    }
    ProblemGraphV1::new(n, &edges).map_err(GnpError::Graph)
}

/// A PCG generator seeded from `seed`, or from OS entropy when `None`.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> Pcg64Mcg {
    match seed {
        Some(s) => Pcg64Mcg::seed_from_u64(s),
        None => Pcg64Mcg::from_entropy(),
    }
}
