//! Structural invariants of grid plans, checked over a deterministic sweep of
//! item counts, column limits, paddings and sizes.
//!
//! Each case is checked against the row/column formulas directly, so a
//! failure names the exact case and invariant rather than a pixel.

use zensprite::*;

/// Small LCG so the sweep is reproducible without an RNG dependency.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    /// Uniform in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() % u64::from(hi - lo + 1)) as u32
    }
}

#[derive(Debug)]
struct Case {
    sizes: Vec<(u32, u32)>,
    columns: Option<u32>,
    padding: u32,
    override_size: Option<u32>,
}

impl Case {
    fn random(rng: &mut Lcg) -> Self {
        let count = rng.range(1, 40) as usize;
        let sizes = (0..count)
            .map(|_| (rng.range(1, 64), rng.range(1, 64)))
            .collect();
        let columns = (rng.range(0, 3) > 0).then(|| rng.range(1, 12));
        let padding = if rng.range(0, 2) == 0 { 0 } else { rng.range(1, 8) };
        let override_size = (rng.range(0, 3) == 0).then(|| rng.range(1, 32));
        Self {
            sizes,
            columns,
            padding,
            override_size,
        }
    }

    fn catalog(&self) -> Catalog {
        let sources = self
            .sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| Source::new(format!("icons/Sprite {i}.png"), w, h));
        Catalog::build(sources, self.override_size).unwrap()
    }

    fn config(&self) -> GridConfig {
        GridConfig {
            columns: self.columns,
            padding: self.padding,
        }
    }
}

/// Every invariant a plan must satisfy for `case`. Returns one message per
/// violation.
fn check(case: &Case, catalog: &Catalog, plan: &LayoutPlan) -> Vec<String> {
    let mut failures = Vec::new();
    let mut fail = |msg: String| failures.push(format!("{case:?}: {msg}"));

    let items = catalog.items();
    let placements = plan.placements();
    let n = items.len();
    let per_row = case.columns.map_or(n, |c| c as usize);
    let pad = case.padding;

    // Order and count.
    if placements.len() != n {
        fail(format!("{} placements for {n} items", placements.len()));
        return failures;
    }
    for (item, placement) in items.iter().zip(placements) {
        if item.id() != placement.id {
            fail(format!("id {:?} placed as {:?}", item.id(), placement.id));
        }
        if placement.rect.size() != item.size() {
            fail(format!("{} drawn at {} not {}", item.id(), placement.rect.size(), item.size()));
        }
        if let Some(side) = case.override_size {
            if placement.rect.size() != Size::square(side) {
                fail(format!("{} not a {side}px square under override", item.id()));
            }
        }
    }

    // Row partitioning.
    let expected_rows = n.div_ceil(per_row);
    if plan.rows().len() != expected_rows {
        fail(format!("{} rows, expected {expected_rows}", plan.rows().len()));
    }

    let mut next_start = 0;
    let mut next_y = 0u64;
    let mut widest = 0u64;
    for (r, row) in plan.rows().iter().enumerate() {
        if row.start != next_start || row.len != per_row.min(n - row.start) {
            fail(format!("row {r} covers {:?}", row.range()));
            continue;
        }
        next_start += row.len;

        if u64::from(row.y) != next_y {
            fail(format!("row {r} at y={} expected {next_y}", row.y));
        }

        let mut x = 0u64;
        let mut tallest = 0;
        for (col, placement) in plan.row_placements(row).iter().enumerate() {
            if col > 0 {
                x += u64::from(pad);
            }
            if placement.rect.y != row.y {
                fail(format!("{} at y={} in row at y={}", placement.id, placement.rect.y, row.y));
            }
            if u64::from(placement.rect.x) != x {
                fail(format!("{} at x={} expected {x}", placement.id, placement.rect.x));
            }
            x = placement.rect.right();
            tallest = tallest.max(placement.rect.height);
        }
        if u64::from(row.width) != x {
            fail(format!("row {r} width {} expected {x}", row.width));
        }
        if row.height != tallest {
            fail(format!("row {r} height {} expected {tallest}", row.height));
        }

        widest = widest.max(x);
        next_y = u64::from(row.y) + u64::from(row.height) + u64::from(pad);
    }

    // Canvas.
    let canvas = plan.canvas();
    let expected_height = next_y.saturating_sub(u64::from(pad));
    if u64::from(canvas.width) != widest || u64::from(canvas.height) != expected_height {
        fail(format!("canvas {canvas} expected {widest}×{expected_height}"));
    }

    // Containment and disjointness.
    for (i, a) in placements.iter().enumerate() {
        if !a.rect.fits_within(canvas) {
            fail(format!("{} at {:?} leaves the {canvas} canvas", a.id, a.rect));
        }
        for b in &placements[i + 1..] {
            if a.rect.intersects(&b.rect) {
                fail(format!("{} {:?} overlaps {} {:?}", a.id, a.rect, b.id, b.rect));
            }
        }
    }

    failures
}

#[test]
fn random_sweep_holds_every_invariant() {
    let mut rng = Lcg(0x5EED_5A17);
    let mut failures = Vec::new();

    for _ in 0..600 {
        let case = Case::random(&mut rng);
        let catalog = case.catalog();
        let plan = case.config().plan(catalog.items()).unwrap();
        failures.extend(check(&case, &catalog, &plan));

        let again = case.config().plan(catalog.items()).unwrap();
        if again != plan {
            failures.push(format!("{case:?}: planning twice gave different plans"));
        }
    }

    assert!(
        failures.is_empty(),
        "{} invariant violations:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn every_column_limit_for_a_fixed_set() {
    let sizes: Vec<(u32, u32)> = (1..=13).map(|i| (i * 3, 40 - i * 2)).collect();
    let mut failures = Vec::new();

    for columns in 1..=15 {
        for padding in [0, 1, 7] {
            let case = Case {
                sizes: sizes.clone(),
                columns: Some(columns),
                padding,
                override_size: None,
            };
            let catalog = case.catalog();
            let plan = case.config().plan(catalog.items()).unwrap();
            failures.extend(check(&case, &catalog, &plan));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn column_limit_at_or_above_count_is_a_single_row() {
    let catalog = Catalog::build((0..5).map(|i| Source::new(format!("{i}"), 2, 2)), None).unwrap();
    let unlimited = GridConfig::new().padding(3).plan(catalog.items()).unwrap();
    for columns in [5, 6, 1000] {
        let limited = GridConfig::new()
            .columns(columns)
            .padding(3)
            .plan(catalog.items())
            .unwrap();
        assert_eq!(limited, unlimited, "columns={columns}");
    }
    assert_eq!(unlimited.rows().len(), 1);
}

#[test]
fn same_inputs_through_free_functions_agree() {
    let sources = || (0..7).map(|i| Source::new(format!("s{i}.png"), 1 + i, 9 - i));
    let catalog = build(sources(), None).unwrap();
    let config = GridConfig::new().columns(3).padding(2);
    assert_eq!(
        plan(catalog.items(), &config).unwrap(),
        config.plan(Catalog::build(sources(), None).unwrap().items()).unwrap()
    );
}
