pub use std::{
    io::{BufRead, BufReader},
    path::PathBuf,
};
pub use thiserror::Error;
pub use itertools::Itertools;

pub use crate::{Request, ScoredRequest, Density,
    AllocationResult, AllocationSummary,
    requestset::*,
};

/// The unit for measuring bandwidth. `corebw` does not care about
/// semantics: Mbps, GB/s, channel counts all work, as long as demands
/// and the capacity are expressed in the same unit.
pub type Bandwidth = f64;

/// A group of scored requests, ready for ranking.
pub type RequestSet = Vec<ScoredRequest>;

/// Absolute tolerance for the conservation identity
/// `capacity_used + capacity_remaining == capacity_initial`.
pub const CONSERVATION_TOL: f64 = 1e-9;

/// Defines the interface for reading requests.
///
/// We ship one type that implements [RequestGen] and reads a
/// `name,demand,priority` CSV. The interactive prompt in the `bwalloc`
/// binary is another source, living outside the library.
///
/// The user can implement their own types as needed.
pub trait RequestGen<T> {
    /// Either a set of requests is successfully returned, or some
    /// arbitrary type that implements [std::error::Error].
    fn read_requests(&self) -> Result<Vec<Request>, Box<dyn std::error::Error>>;
    /// Uses some available data to spawn one [Request]. We do not put
    /// any limitations on what that data may look like.
    fn gen_single(&self, d: T) -> Request;
}

/// What can go wrong before the allocation pass runs. The pass itself
/// has no failure modes; every error here is a precondition violation
/// caught by [`crate::requestset::init`] or [`crate::algo::allocate`].
#[derive(Error, Debug)]
pub enum AllocError {
    /// Capacity must be finite and non-negative. We fail fast instead
    /// of clamping, so that a negative capacity upstream does not get
    /// masked as "everything starved".
    #[error("invalid capacity: {got}")]
    InvalidCapacity { got: f64 },
    /// Appears while constructing the [RequestSet] of requests
    /// to be dealt with.
    #[error("request #{index}: {message}\n{:?}", culprit)]
    InvalidRequest {
        message: String,
        index: usize,
        culprit: Request,
    },
}

//---START EXTERNAL INTERFACES
// The types listed below implement interfaces to several
// data sources for `corebw`.
//
// To write your own interface, simply make sure that it
// satisfies the `RequestGen` trait.

/// Reads a `name,demand,priority` CSV, one request per line,
/// first line being the header.
pub struct TaskCsvParser {
    pub path: PathBuf,
}

impl TaskCsvParser {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
        }
    }
}

impl RequestGen<(String, f64, f64)> for TaskCsvParser {
    fn read_requests(&self) -> Result<Vec<Request>, Box<dyn std::error::Error>> {
        let mut res = vec![];

        let path = self.path
            .as_path();

        let fd = std::fs::File::open(path)?;
        let reader = BufReader::new(fd);
        for line in reader.lines()
            // First line is the header!
            .skip(1) {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let mut fields = line.splitn(3, ',');
            let name = fields.next()
                .ok_or("Missing name column.")?
                .trim()
                .to_string();
            let demand: f64 = fields.next()
                .ok_or("Missing demand column.")?
                .trim()
                .parse()?;
            let priority: f64 = fields.next()
                .ok_or("Missing priority column.")?
                .trim()
                .parse()?;
            res.push(self.gen_single((name, demand, priority)));
        }

        Ok(res)
    }

    fn gen_single(&self, d: (String, f64, f64)) -> Request {
        Request {
            name:       d.0,
            demand:     d.1,
            priority:   d.2,
        }
    }
}

//---END EXTERNAL INTERFACES
