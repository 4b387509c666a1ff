use crate::{Density, Request, ScoredRequest};

impl Request {
    /// Computes the greedy ranking key for this request.
    ///
    /// The zero-demand conventions: positive priority at zero cost is
    /// the best possible deal ([`Density::Unconstrained`]), while zero
    /// priority at zero cost is worth exactly nothing and must never
    /// crowd out a real request.
    pub fn density(&self) -> Density {
        if self.demand > 0.0 {
            Density::Finite(self.priority / self.demand)
        } else if self.priority > 0.0 {
            Density::Unconstrained
        } else {
            Density::Finite(0.0)
        }
    }

    /// Attaches the density and the original input position,
    /// producing the form the ranking and allocation stages consume.
    pub fn score(self, index: usize) -> ScoredRequest {
        let density = self.density();
        ScoredRequest {
            name:       self.name,
            demand:     self.demand,
            priority:   self.priority,
            density,
            index,
        }
    }
}

impl ScoredRequest {
    /// Returns `true` if the request costs nothing to satisfy.
    pub fn is_free(&self) -> bool {
        self.demand == 0.0
    }
}

//-----ORDERING OF DENSITIES (START)---------------------
/*
    The allocation order is induced entirely by Density, so we give
    it a total order: Unconstrained beats every finite value, and
    finite values compare by f64::total_cmp. total_cmp is what makes
    the order total; inits reject non-finite ratios, so the NaN arm
    of total_cmp is never exercised in practice.
 */
impl Ord for Density {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Density::Unconstrained, Density::Unconstrained) => {
                std::cmp::Ordering::Equal
            },
            (Density::Unconstrained, Density::Finite(_)) => {
                std::cmp::Ordering::Greater
            },
            (Density::Finite(_), Density::Unconstrained) => {
                std::cmp::Ordering::Less
            },
            (Density::Finite(a), Density::Finite(b)) => {
                a.total_cmp(b)
            },
        }
    }
}

impl PartialOrd for Density {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Density {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Density {}
//-----ORDERING OF DENSITIES (END)---------------------

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Density::Finite(v)      => { write!(f, "{:.2}", v) },
            Density::Unconstrained  => { write!(f, "inf") },
        }
    }
}
