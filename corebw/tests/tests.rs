use corebw::*;
use corebw::utils::*;

use rand::prelude::*;

const TOL: f64 = 1e-9;

fn get_crate_root() -> Result<PathBuf, std::env::VarError> {
    Ok(PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?))
}

fn read_from_path(p: &str) -> Result<Vec<Request>, Box<dyn std::error::Error>> {
    let mut csv_path = get_crate_root()?;
    csv_path.push(p);
    let parser = TaskCsvParser::new(csv_path);
    let requests = parser.read_requests()?;
    assert!(requests.len() > 0);

    Ok(requests)
}

fn req(name: &str, demand: f64, priority: f64) -> Request {
    Request {
        name: name.to_string(),
        demand,
        priority,
    }
}

#[test]
fn scenario_pinned() {
    // Densities: A = 0.8, B = 1.5, C = 0.5. Order: B, A, C.
    let summary = algo::allocate(
        100.0,
        vec![req("A", 50.0, 40.0), req("B", 60.0, 90.0), req("C", 30.0, 15.0)],
    )
    .unwrap();

    let names: Vec<&str> = summary.grants
        .iter()
        .map(|(r, _)| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "A", "C"]);

    let (_, b) = &summary.grants[0];
    assert_eq!(b.allocated, 60.0);
    assert!(b.fulfilled);
    assert_eq!(b.value_earned, 90.0);

    let (_, a) = &summary.grants[1];
    assert_eq!(a.allocated, 40.0);
    assert!(!a.fulfilled);
    assert!((a.value_earned - 32.0).abs() < TOL);

    let (_, c) = &summary.grants[2];
    assert_eq!(c.allocated, 0.0);
    assert!(!c.fulfilled);
    assert_eq!(c.value_earned, 0.0);

    assert!((summary.total_value - 122.0).abs() < TOL);
    assert_eq!(summary.capacity_used, 100.0);
    assert_eq!(summary.capacity_remaining, 0.0);
}

#[test]
fn scenario_zero_capacity() {
    let summary = algo::allocate(
        0.0,
        vec![req("x", 10.0, 3.0), req("free", 0.0, 7.0), req("y", 1.0, 1.0)],
    )
    .unwrap();

    for (r, res) in &summary.grants {
        assert_eq!(res.allocated, 0.0);
        assert_eq!(res.share, 0.0);
        if r.demand == 0.0 {
            assert!(res.fulfilled);
        } else {
            assert!(!res.fulfilled);
        }
    }
    // Only the zero-demand request earns anything.
    assert!((summary.total_value - 7.0).abs() < TOL);
    assert_eq!(summary.capacity_used, 0.0);
}

#[test]
fn zero_demand_is_served_after_exhaustion() {
    // "last" has zero density, so it is processed after the pool has
    // run dry. Being free, it must still come out fulfilled with its
    // full priority.
    let summary = algo::allocate(
        10.0,
        vec![req("hog", 100.0, 50.0), req("last", 0.0, 0.0), req("free", 0.0, 5.0)],
    )
    .unwrap();

    let last = summary.grants
        .iter()
        .find(|(r, _)| r.name == "last")
        .map(|(_, res)| res)
        .unwrap();
    assert_eq!(last.allocated, 0.0);
    assert!(last.fulfilled);
    assert_eq!(last.value_earned, 0.0);

    let free = summary.grants
        .iter()
        .find(|(r, _)| r.name == "free")
        .map(|(_, res)| res)
        .unwrap();
    assert!(free.fulfilled);
    assert_eq!(free.value_earned, 5.0);
    assert!(summary.is_conserved());
}

#[test]
fn unconstrained_beats_huge_finite_density() {
    // The original sentinel approach (a 1e9 float) would order the
    // 1e12-density request first. The tagged key must not.
    let summary = algo::allocate(
        1.0,
        vec![req("dense", 1e-6, 1e6), req("free", 0.0, 0.1)],
    )
    .unwrap();

    assert_eq!(summary.grants[0].0.name, "free");
    assert!(matches!(summary.grants[0].0.density, Density::Unconstrained));
}

#[test]
fn empty_input() {
    let summary = algo::allocate(42.0, vec![]).unwrap();
    assert_eq!(summary.total_value, 0.0);
    assert_eq!(summary.capacity_used, 0.0);
    assert_eq!(summary.capacity_remaining, 42.0);
    assert!(summary.grants.is_empty());
    assert!(summary.is_conserved());
}

#[test]
fn full_capacity_no_waste() {
    let requests = vec![req("a", 10.0, 1.0), req("b", 20.0, 5.0), req("c", 30.0, 2.0)];
    let total_demand: f64 = requests.iter().map(|r| r.demand).sum();
    let summary = algo::allocate(100.0, requests).unwrap();

    assert_eq!(summary.fulfilled_count(), 3);
    assert_eq!(summary.partial_count(), 0);
    assert!((summary.capacity_remaining - (100.0 - total_demand)).abs() < TOL);
}

#[test]
fn ties_retain_input_order() {
    // All three share density 2.0.
    let summary = algo::allocate(
        100.0,
        vec![req("X", 10.0, 20.0), req("Y", 5.0, 10.0), req("Z", 20.0, 40.0)],
    )
    .unwrap();

    let names: Vec<&str> = summary.grants
        .iter()
        .map(|(r, _)| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["X", "Y", "Z"]);
    let indices: Vec<usize> = summary.grants
        .iter()
        .map(|(r, _)| r.index)
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn deterministic_across_runs() {
    let mk = || {
        vec![
            req("a", 10.0, 20.0),
            req("b", 5.0, 10.0),
            req("c", 7.0, 14.0),
            req("d", 0.0, 1.0),
            req("e", 3.0, 9.0),
        ]
    };
    let s1 = algo::allocate(12.0, mk()).unwrap();
    let s2 = algo::allocate(12.0, mk()).unwrap();

    assert_eq!(s1.total_value, s2.total_value);
    assert_eq!(s1.capacity_used, s2.capacity_used);
    for ((r1, g1), (r2, g2)) in s1.grants.iter().zip(s2.grants.iter()) {
        assert_eq!(r1.index, r2.index);
        assert_eq!(g1, g2);
    }
}

#[test]
fn at_most_one_partial_grant() {
    let summary = algo::allocate(
        25.0,
        vec![
            req("a", 10.0, 30.0),
            req("b", 10.0, 20.0),
            req("c", 10.0, 10.0),
            req("d", 10.0, 5.0),
        ],
    )
    .unwrap();

    assert_eq!(summary.partial_count(), 1);
    assert_eq!(summary.fulfilled_count(), 2);
    // Everything after the partial grant gets nothing.
    let mut seen_partial = false;
    for (_, res) in &summary.grants {
        if seen_partial {
            assert_eq!(res.allocated, 0.0);
        }
        if !res.fulfilled && res.allocated > 0.0 {
            seen_partial = true;
        }
    }
}

#[test]
fn conservation_and_bounds_randomized() {
    let mut rng = StdRng::seed_from_u64(0xba5eba11);
    for _ in 0..200 {
        let n = rng.gen_range(0..30);
        let capacity = rng.gen_range(0.0..500.0);
        let requests: Vec<Request> = (0..n)
            .map(|i| {
                let demand = if rng.gen_bool(0.1) {
                    0.0
                } else {
                    rng.gen_range(0.1..100.0)
                };
                Request {
                    name:       format!("r{i}"),
                    demand,
                    priority:   rng.gen_range(0.0..100.0),
                }
            })
            .collect();
        let total_demand: f64 = requests.iter().map(|r| r.demand).sum();

        let summary = algo::allocate(capacity, requests).unwrap();
        assert!(summary.is_conserved());
        assert!(summary.capacity_remaining >= 0.0);

        let mut granted = 0.0;
        for (r, res) in &summary.grants {
            assert!(res.allocated >= 0.0 && res.allocated <= r.demand);
            granted += res.allocated;
        }
        assert!(granted <= capacity + TOL);
        assert!(granted <= total_demand + TOL);
    }
}

// Grid-searches fractional allocations in steps of a quarter demand.
// Feasible grid points can never beat the greedy optimum.
fn best_grid_value(capacity: f64, requests: &[Request]) -> f64 {
    let steps = 4u32;
    let combos = (steps + 1).pow(requests.len() as u32);
    let mut best = 0.0f64;
    for combo in 0..combos {
        let mut rest = combo;
        let mut used = 0.0;
        let mut value = 0.0;
        for r in requests {
            let frac = (rest % (steps + 1)) as f64 / steps as f64;
            rest /= steps + 1;
            used += frac * r.demand;
            value += frac * r.priority;
        }
        if used <= capacity + TOL && value > best {
            best = value;
        }
    }

    best
}

#[test]
fn greedy_beats_exhaustive_grid() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let n = rng.gen_range(1..=5);
        let capacity = rng.gen_range(0.0..50.0);
        let requests: Vec<Request> = (0..n)
            .map(|i| Request {
                name:       format!("g{i}"),
                demand:     rng.gen_range(0.1..20.0),
                priority:   rng.gen_range(0.0..40.0),
            })
            .collect();

        let summary = algo::allocate(capacity, requests.clone()).unwrap();
        let grid_best = best_grid_value(capacity, &requests);
        assert!(
            summary.total_value >= grid_best - 1e-6,
            "greedy {} < grid {}",
            summary.total_value,
            grid_best
        );
    }
}

#[test]
fn rejects_bad_requests() {
    let cases = vec![
        (req("neg-demand", -1.0, 5.0), "negative demand"),
        (req("neg-priority", 10.0, -5.0), "negative priority"),
        (req("nan-demand", f64::NAN, 5.0), "non-finite demand"),
        (req("inf-priority", 10.0, f64::INFINITY), "non-finite priority"),
    ];
    for (bad, what) in cases {
        let out = algo::allocate(10.0, vec![req("ok", 1.0, 1.0), bad]);
        match out {
            Err(AllocError::InvalidRequest { index, .. }) => {
                assert_eq!(index, 1, "wrong culprit for {what}");
            },
            other => { panic!("expected InvalidRequest for {what}, got {other:?}"); },
        }
    }
}

#[test]
fn rejects_overflowing_density() {
    // Finite inputs whose ratio overflows to infinity must be
    // rejected, not ranked as if they were zero-demand.
    let out = algo::allocate(10.0, vec![req("boom", f64::MIN_POSITIVE, f64::MAX)]);
    assert!(matches!(out, Err(AllocError::InvalidRequest { index: 0, .. })));
}

#[test]
fn rejects_bad_capacity() {
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let out = algo::allocate(bad, vec![req("a", 1.0, 1.0)]);
        assert!(matches!(out, Err(AllocError::InvalidCapacity { .. })));
    }
}

#[test]
fn run_scenario_csv() {
    let requests = read_from_path("tests/data/scenario.csv").unwrap();
    assert_eq!(requests.len(), 3);
    let summary = algo::allocate(100.0, requests).unwrap();
    assert!((summary.total_value - 122.0).abs() < TOL);
}

#[test]
fn run_mixed_csv() {
    let requests = read_from_path("tests/data/mixed.csv").unwrap();
    assert_eq!(requests.len(), 7);
    let summary = algo::allocate(100.0, requests).unwrap();

    // heartbeat (free), voip, web, then stream partially.
    let names: Vec<&str> = summary.grants
        .iter()
        .map(|(r, _)| r.name.as_str())
        .collect();
    assert_eq!(names[0], "heartbeat");
    assert_eq!(names[1], "voip");
    assert_eq!(names[2], "web");
    assert_eq!(names[3], "stream");

    assert!((summary.total_value - 141.25).abs() < TOL);
    assert_eq!(summary.capacity_used, 100.0);
    assert_eq!(summary.fulfilled_count(), 4);
    assert_eq!(summary.partial_count(), 1);
    assert!(summary.is_conserved());

    // Shares sum to at most 1.
    let share_sum: f64 = summary.grants
        .iter()
        .map(|(_, res)| res.share)
        .sum();
    assert!(share_sum <= 1.0 + TOL);
}
