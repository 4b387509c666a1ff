pub use std::path::PathBuf;
pub use std::io::{BufWriter, Write};
pub use std::fs::File;

use corebw::AllocationSummary;
use rand::prelude::*;
use serde::Serialize;

/// A serialization-friendly mirror of [`AllocationSummary`]. The core
/// crate stays serde-free; whoever wants JSON goes through this.
#[derive(Serialize, Debug)]
pub struct SummaryReport {
    pub capacity_initial:   f64,
    pub capacity_used:      f64,
    pub capacity_remaining: f64,
    pub total_value:        f64,
    pub fulfilled:          usize,
    pub partial:            usize,
    pub grants:             Vec<GrantReport>,
}

#[derive(Serialize, Debug)]
pub struct GrantReport {
    pub name:           String,
    pub input_index:    usize,
    pub demand:         f64,
    pub priority:       f64,
    pub density:        String,
    pub allocated:      f64,
    pub fulfilled:      bool,
    pub value_earned:   f64,
    pub share:          f64,
}

impl From<&AllocationSummary> for SummaryReport {
    fn from(s: &AllocationSummary) -> Self {
        Self {
            capacity_initial:   s.capacity_initial,
            capacity_used:      s.capacity_used,
            capacity_remaining: s.capacity_remaining,
            total_value:        s.total_value,
            fulfilled:          s.fulfilled_count(),
            partial:            s.partial_count(),
            grants:             s.grants
                .iter()
                .map(|(req, res)| GrantReport {
                    name:           req.name.clone(),
                    input_index:    req.index,
                    demand:         req.demand,
                    priority:       req.priority,
                    density:        req.density.to_string(),
                    allocated:      res.allocated,
                    fulfilled:      res.fulfilled,
                    value_earned:   res.value_earned,
                    share:          res.share,
                })
                .collect(),
        }
    }
}

/// Spawns `num` random requests with demands in [0.1, `max_demand`]
/// and priorities in [1, `max_priority`]. A fixed seed makes the
/// workload reproducible across runs. The demand floor keeps the
/// densities finite, so the engine never rejects a synthetic set.
pub fn synth_requests(
    num:            usize,
    max_demand:     f64,
    max_priority:   f64,
    seed:           u64,
) -> Vec<corebw::Request> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num)
        .map(|i| corebw::Request {
            name:       format!("task-{i}"),
            demand:     rng.gen_range(0.1..=max_demand),
            priority:   rng.gen_range(1.0..=max_priority),
        })
        .collect()
}

/// Writes requests in the `name,demand,priority` CSV format that
/// [`corebw::utils::TaskCsvParser`] reads back.
pub fn write_csv(path: PathBuf, requests: &[corebw::Request]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "name,demand,priority")?;
    for r in requests {
        writeln!(w, "{},{},{}", r.name, r.demand, r.priority)?;
    }

    Ok(())
}
