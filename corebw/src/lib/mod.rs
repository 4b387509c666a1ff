//! Welcome to `corebw`!
//!
//! `corebw` distributes a finite amount of bandwidth among competing
//! requests so that the total priority value earned is maximal. The
//! problem is the classic fractional knapsack: capacity is the sack,
//! demands are weights, priorities are values, and since bandwidth is
//! divisible a request may be granted only part of what it asked for.

pub mod request;
pub mod requestset;
pub mod algo;
mod summary;
pub mod utils;

/// Imports, type aliases, traits ... in general
/// useful stuff that shall be needed in many places.
use crate::utils::*;

/// Our fundamental unit of interest. A [`Request`] is a named claim
/// on the shared bandwidth pool:
///
/// 1. [`demand`](Request::demand) units of bandwidth were asked for.
/// 2. Fully granting them is worth [`priority`](Request::priority).
///
/// The [`name`](Request::name) is opaque to the algorithm. It does not
/// have to be unique; it exists purely so that whoever reads the
/// results can tell the grants apart. Demands and priorities must be
/// finite and non-negative, which [`requestset::init`] enforces before
/// anything else runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub name:       String,
    pub demand:     Bandwidth,
    pub priority:   f64,
}

/// The greedy ranking key: priority earned per unit of demand.
///
/// A request with zero demand and positive priority would need an
/// "infinite" ratio. Instead of a large float constant (which stops
/// ordering correctly once real densities grow past it) we tag the
/// case explicitly: [`Density::Unconstrained`] compares greater than
/// every finite density, full stop.
#[derive(Debug, Clone, Copy)]
pub enum Density {
    Finite(f64),
    Unconstrained,
}

/// A [`Request`] that has been through scoring: it carries its
/// [`Density`] and its position in the original input. The position is
/// the tie-break key which keeps equal-density orderings stable, and
/// with them the whole allocation deterministic.
#[derive(Debug, Clone)]
pub struct ScoredRequest {
    pub name:       String,
    pub demand:     Bandwidth,
    pub priority:   f64,
    pub density:    Density,
    pub index:      usize,
}

/// What a single request ended up with.
///
/// `0 <= allocated <= demand` always holds. `fulfilled` means the full
/// demand was granted; a zero-demand request is trivially fulfilled no
/// matter how much bandwidth was left, since granting nothing costs
/// nothing. `value_earned` scales linearly with the granted fraction.
/// `share` is the grant as a fraction of the *initial* capacity, 0 if
/// there was no capacity to begin with.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    pub allocated:      Bandwidth,
    pub fulfilled:      bool,
    pub value_earned:   f64,
    pub share:          f64,
}

/// The outcome of one allocation run.
///
/// `grants` lists every request in the order it was processed, i.e.
/// density descending with ties in original input order. Capacity is
/// conserved: `capacity_used + capacity_remaining` equals
/// `capacity_initial` up to floating-point tolerance.
#[derive(Debug, Clone)]
pub struct AllocationSummary {
    pub capacity_initial:   Bandwidth,
    pub capacity_used:      Bandwidth,
    pub capacity_remaining: Bandwidth,
    pub total_value:        f64,
    pub grants:             Vec<(ScoredRequest, AllocationResult)>,
}
