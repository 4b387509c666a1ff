use crate::{AllocationSummary, utils::CONSERVATION_TOL};

impl AllocationSummary {
    /// Checks the conservation identity: used plus remaining equals
    /// the initial capacity, up to floating-point tolerance.
    pub fn is_conserved(&self) -> bool {
        let recomposed = self.capacity_used + self.capacity_remaining;
        (recomposed - self.capacity_initial).abs() <= CONSERVATION_TOL
    }

    /// Number of requests whose full demand was granted.
    pub fn fulfilled_count(&self) -> usize {
        self.grants
            .iter()
            .filter(|(_, res)| res.fulfilled)
            .count()
    }

    /// Number of requests granted something, but less than they
    /// asked for. At most one per run: once the pool runs dry,
    /// everything after gets nothing.
    pub fn partial_count(&self) -> usize {
        self.grants
            .iter()
            .filter(|(_, res)| !res.fulfilled && res.allocated > 0.0)
            .count()
    }
}
