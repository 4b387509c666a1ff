use crate::utils::*;

/// Distributes `capacity` units of bandwidth over `requests`,
/// maximizing the total priority value earned.
///
/// The pipeline is score → rank → allocate → summarize, each stage a
/// pure function of the previous one's output, run exactly once.
/// Requests are served in order of decreasing density; when the pool
/// runs dry mid-request, that request gets whatever is left and earns
/// the matching fraction of its priority. Requests with zero demand
/// are always fulfilled at zero cost, wherever they land in the order
/// and however much bandwidth remains.
///
/// Fails fast on a non-finite or negative capacity, and on any
/// request violating the preconditions listed at
/// [`requestset::init`](crate::requestset::init). An empty request
/// list is fine: the summary just reports the untouched pool.
pub fn allocate(
    capacity:   Bandwidth,
    requests:   Vec<Request>,
) -> Result<AllocationSummary, AllocError> {
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(AllocError::InvalidCapacity { got: capacity });
    }
    let ranked = rank(init(requests)?);

    Ok(run_pass(capacity, ranked))
}

/// The fractional-knapsack walk. Infallible: every input has been
/// through the gatekeeper by now.
fn run_pass(capacity: Bandwidth, ranked: RequestSet) -> AllocationSummary {
    let mut remaining = capacity;
    let mut total_value = 0.0;
    let mut grants = Vec::with_capacity(ranked.len());

    for req in ranked {
        let result = if req.is_free() {
            // Granting zero bandwidth never competes for capacity,
            // so a free request is fulfilled even after the pool
            // has run dry.
            total_value += req.priority;
            AllocationResult {
                allocated:      0.0,
                fulfilled:      true,
                value_earned:   req.priority,
                share:          0.0,
            }
        } else if remaining <= 0.0 {
            AllocationResult {
                allocated:      0.0,
                fulfilled:      false,
                value_earned:   0.0,
                share:          0.0,
            }
        } else if req.demand <= remaining {
            remaining -= req.demand;
            total_value += req.priority;
            AllocationResult {
                allocated:      req.demand,
                fulfilled:      true,
                value_earned:   req.priority,
                share:          guarded_share(req.demand, capacity),
            }
        } else {
            let allocated = remaining;
            let fraction = allocated / req.demand;
            let value_earned = fraction * req.priority;
            remaining = 0.0;
            total_value += value_earned;
            AllocationResult {
                allocated,
                fulfilled:      false,
                value_earned,
                share:          guarded_share(allocated, capacity),
            }
        };
        grants.push((req, result));
    }

    AllocationSummary {
        capacity_initial:   capacity,
        capacity_used:      capacity - remaining,
        capacity_remaining: remaining,
        total_value,
        grants,
    }
}

// A zero initial capacity would otherwise produce 0.0 / 0.0.
fn guarded_share(allocated: Bandwidth, capacity: Bandwidth) -> f64 {
    if capacity > 0.0 {
        allocated / capacity
    } else {
        0.0
    }
}
