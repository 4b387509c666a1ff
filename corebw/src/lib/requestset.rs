use crate::utils::*;

/// Initializes a RequestSet with a given set of requests.
/// A successfully returned RequestSet is guaranteed to be
/// compliant with all of `corebw`'s assumptions. These are:
/// - all demands are finite and non-negative
/// - all priorities are finite and non-negative
/// - no finite density is non-finite (possible when a huge
///   priority meets a subnormal demand)
///
/// This function is the gatekeeper to the rest of the library.
/// The allocation pass itself has no failure modes; everything
/// that can be rejected is rejected here, naming the first
/// offending request by its input position.
pub fn init(in_elts: Vec<Request>) -> Result<RequestSet, AllocError> {
    let mut res = Vec::with_capacity(in_elts.len());
    for (idx, r) in in_elts.into_iter().enumerate() {
        if !r.demand.is_finite() {
            return Err(AllocError::InvalidRequest {
                message: String::from("Request with non-finite demand found!"),
                index: idx,
                culprit: r,
            });
        } else if r.demand < 0.0 {
            return Err(AllocError::InvalidRequest {
                message: String::from("Request with negative demand found!"),
                index: idx,
                culprit: r,
            });
        } else if !r.priority.is_finite() {
            return Err(AllocError::InvalidRequest {
                message: String::from("Request with non-finite priority found!"),
                index: idx,
                culprit: r,
            });
        } else if r.priority < 0.0 {
            return Err(AllocError::InvalidRequest {
                message: String::from("Request with negative priority found!"),
                index: idx,
                culprit: r,
            });
        }
        let scored = r.score(idx);
        if let Density::Finite(d) = scored.density {
            if !d.is_finite() {
                return Err(AllocError::InvalidRequest {
                    message: String::from("Request with non-finite density found!"),
                    index: idx,
                    culprit: Request {
                        name:       scored.name,
                        demand:     scored.demand,
                        priority:   scored.priority,
                    },
                });
            }
        }
        res.push(scored);
    }

    Ok(res)
}

/// Produces the greedy processing order: density descending, ties
/// broken by original input position ascending.
///
/// The tie-break is what makes runs reproducible. Two requests with
/// the same density always come out in the order they went in, so
/// identical input yields identical grants, down to the last bit.
pub fn rank(set: RequestSet) -> RequestSet {
    set.into_iter()
        .sorted_by(|a, b| {
            b.density
                .cmp(&a.density)
                .then(a.index.cmp(&b.index))
        })
        .collect()
}
