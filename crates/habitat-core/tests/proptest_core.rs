//! Property-based tests for the resource simulation core.
//!
//! Uses proptest to generate random deferred-delta sequences, recipe
//! chains, and container layouts, then verifies the structural
//! invariants: commutativity of deferred accumulation, bounds after
//! sync, conservation under recipe execution, and order-independence
//! of chain resolution.

use habitat_core::cache::VesselResources;
use habitat_core::recipe::Recipe;
use habitat_core::storage::{Part, PartStorage, Storage};
use habitat_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// A signed deferred request: positive produces, negative consumes.
fn arb_deltas(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-50.0..50.0f64, 1..=max_len)
}

/// Random container layout for one resource: (amount, capacity) pairs.
fn arb_containers(max_parts: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec(
        (0.0..100.0f64).prop_flat_map(|cap| (0.0..=cap, Just(cap))),
        1..=max_parts,
    )
}

fn storage_from_containers(containers: &[(f64, f64)]) -> PartStorage {
    let mut storage = PartStorage::new();
    for (i, (amount, capacity)) in containers.iter().enumerate() {
        storage.push_part(Part::new(&format!("part-{i}")).with_container(EC, *amount, *capacity));
    }
    storage
}

/// A chain of conversions over resources "R0".."Rn": quantities for
/// each link's input and output.
fn arb_chain(max_links: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    proptest::collection::vec((0.1..20.0f64, 0.1..20.0f64), 1..=max_links)
}

fn chain_recipes(links: &[(f64, f64)]) -> Vec<Recipe> {
    links
        .iter()
        .enumerate()
        .map(|(i, (input, output))| {
            Recipe::new(false)
                .with_input(&format!("R{i}"), *input)
                .with_output(&format!("R{}", i + 1), *output)
        })
        .collect()
}

fn chain_storage(links: usize, initial: f64) -> PartStorage {
    let mut storage = PartStorage::new();
    storage.push_part(Part::new("feed").with_container("R0", initial, 10_000.0));
    for i in 1..=links {
        storage.push_part(
            Part::new(&format!("tank-{i}")).with_container(&format!("R{i}"), 0.0, 10_000.0),
        );
    }
    storage
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Any permutation of a tick's produce/consume calls yields the same
    /// deferred total and the same post-sync amount.
    #[test]
    fn deferred_accumulation_commutes(
        (original, shuffled) in arb_deltas(12)
            .prop_flat_map(|d| (Just(d.clone()), Just(d).prop_shuffle()))
    ) {
        let apply = |deltas: &[f64]| {
            let mut storage = storage_with(&[(EC, 500.0, 1_000.0)]);
            let mut cache = VesselResources::new();
            for delta in deltas {
                if *delta >= 0.0 {
                    cache.produce(&storage, EC, *delta);
                } else {
                    cache.consume(&storage, EC, -*delta);
                }
            }
            let deferred = cache.info(&storage, EC).deferred();
            cache.sync(&mut storage, 1.0);
            (deferred, cache.ledger(EC).unwrap().amount())
        };

        let (deferred_a, amount_a) = apply(&original);
        let (deferred_b, amount_b) = apply(&shuffled);
        prop_assert!((deferred_a - deferred_b).abs() < 1e-9);
        prop_assert!((amount_a - amount_b).abs() < 1e-9);
    }

    #[test]
    fn sync_respects_ledger_bounds(
        containers in arb_containers(4),
        deltas in arb_deltas(8),
    ) {
        let mut storage = storage_from_containers(&containers);
        let mut cache = VesselResources::new();
        for delta in &deltas {
            if *delta >= 0.0 {
                cache.produce(&storage, EC, *delta);
            } else {
                cache.consume(&storage, EC, -*delta);
            }
        }
        cache.sync(&mut storage, 1.0);

        let ledger = cache.ledger(EC).unwrap();
        prop_assert!(ledger.deferred() == 0.0);
        prop_assert!(ledger.amount() >= 0.0);
        prop_assert!(ledger.amount() <= ledger.capacity() + 1e-9);

        // Every container individually within its own bounds.
        for part in &storage.parts {
            for c in &part.containers {
                prop_assert!(c.amount >= 0.0);
                prop_assert!(c.amount <= c.max_amount + 1e-9);
            }
        }
    }

    /// Applying a delta to storage moves exactly `delta - remainder`.
    #[test]
    fn storage_apply_conserves(
        containers in arb_containers(4),
        delta in -200.0..200.0f64,
    ) {
        let mut storage = storage_from_containers(&containers);
        let (before, _) = storage.scan(EC);
        let remainder = storage.apply(EC, delta);
        let (after, _) = storage.scan(EC);
        prop_assert!((after - before - (delta - remainder)).abs() < 1e-6);
    }

    /// A single execution pass consumes and produces in exact proportion
    /// to the executed fraction.
    #[test]
    fn recipe_execution_conserves(
        input_qty in 0.1..50.0f64,
        output_qty in 0.1..50.0f64,
        available in 0.0..100.0f64,
    ) {
        let storage = storage_with(&[(EC, available, 100.0), (OXYGEN, 0.0, 1_000.0)]);
        let mut resources = VesselResources::new();
        let mut recipe = Recipe::new(false)
            .with_input(EC, input_qty)
            .with_output(OXYGEN, output_qty);

        recipe.execute(&storage, &mut resources);
        let fraction = 1.0 - recipe.left();

        prop_assert!((0.0..=1.0).contains(&fraction));
        let consumed = -resources.info(&storage, EC).deferred();
        let produced = resources.info(&storage, OXYGEN).deferred();
        prop_assert!((consumed - input_qty * fraction).abs() < 1e-9);
        prop_assert!((produced - output_qty * fraction).abs() < 1e-9);

        // The fraction matches availability exactly when supply binds.
        let expected = (available / input_qty).min(1.0);
        prop_assert!((fraction - expected).abs() < 1e-9);
    }

    /// A conversion chain resolves to the same final state no matter the
    /// order its recipes were queued in.
    #[test]
    fn chain_resolution_is_order_independent(
        links in arb_chain(5),
        initial in 0.0..100.0f64,
        reverse in proptest::bool::ANY,
    ) {
        let run = |reversed: bool| {
            let mut storage = chain_storage(links.len(), initial);
            let mut cache = VesselResources::new();
            let mut recipes = chain_recipes(&links);
            if reversed {
                recipes.reverse();
            }
            for recipe in recipes {
                cache.transform(recipe);
            }
            cache.sync(&mut storage, 1.0);
            (0..=links.len())
                .map(|i| cache.ledger(&format!("R{i}")).map_or(0.0, |l| l.amount()))
                .collect::<Vec<f64>>()
        };

        let forward = run(false);
        let other = run(reverse);
        for (a, b) in forward.iter().zip(other.iter()) {
            prop_assert!((a - b).abs() < 1e-6, "forward {forward:?} vs other {other:?}");
        }
    }

    /// An empty tick changes nothing and reports a zero rate.
    #[test]
    fn empty_tick_is_idempotent(containers in arb_containers(4)) {
        let mut storage = storage_from_containers(&containers);
        let mut cache = VesselResources::new();
        let before = cache.info(&storage, EC).amount();
        cache.sync(&mut storage, 1.0);

        // Amounts below the sync epsilon snap to zero, so the tolerance
        // here is the epsilon itself rather than exact equality.
        let ledger = cache.ledger(EC).unwrap();
        prop_assert!((ledger.amount() - before).abs() <= 1e-7);
        prop_assert!(ledger.rate().abs() <= 1e-7);
    }
}
