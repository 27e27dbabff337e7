#[cfg(test)]
mod tests {
    use std::time::Duration;

    use itertools::Itertools;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use cutpacker::bounds::{ffd_bound, l1_bound};
    use cutpacker::engine::MicrolpEngine;
    use cutpacker::entities::PackingInstance;
    use cutpacker::error::PackingError;
    use cutpacker::io;
    use cutpacker::pipeline::{Packer, PackingSolution};
    use cutpacker::util::assertions::assignment_is_feasible;
    use cutpacker::util::{BinLimit, SolverConfig};

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    fn build_instance(capacity: f64, items: &[(&str, usize, f64)]) -> PackingInstance {
        let mut instance = PackingInstance::new(capacity).unwrap();
        for (name, qty, weight) in items {
            instance.add_items(name, *qty, *weight).unwrap();
        }
        instance
    }

    fn solve(instance: &PackingInstance) -> Result<PackingSolution, PackingError> {
        Packer::default().solve(instance, &mut MicrolpEngine::new())
    }

    fn check_properties(instance: &PackingInstance, solution: &PackingSolution) {
        assert!(assignment_is_feasible(instance, &solution.assignment));
        assert_eq!(solution.assignment.n_items(), instance.n_items());
        assert!(solution.assignment.item_ids().eq(0..instance.n_items()));
        assert_eq!(solution.objective, solution.assignment.n_bins());
        assert!(solution.objective >= l1_bound(instance));
        assert!(solution.objective <= instance.max_bins());
        assert!(solution.objective <= ffd_bound(instance));
        for bin in &solution.assignment.bins {
            assert!(bin.load <= instance.bin_capacity() + 1e-9);
        }
    }

    #[test]
    fn single_full_bin() {
        init_logger();
        let instance = build_instance(6000.0, &[("1S", 1, 6000.0)]);
        let solution = solve(&instance).unwrap();

        assert_eq!(solution.objective, 1);
        assert_eq!(solution.assignment.bins[0].load, 6000.0);
        check_properties(&instance, &solution);
    }

    #[test]
    fn indivisible_items_exceed_l1_bound() {
        init_logger();
        let instance = build_instance(10.0, &[("A", 3, 6.0)]);
        assert_eq!(l1_bound(&instance), 2);

        let solution = solve(&instance).unwrap();
        assert_eq!(solution.lower_bound, 2);
        assert_eq!(solution.objective, 3);
        check_properties(&instance, &solution);
    }

    #[test]
    fn empty_instance() {
        init_logger();
        let instance = PackingInstance::new(10.0).unwrap();
        assert_eq!(l1_bound(&instance), 0);

        let solution = solve(&instance).unwrap();
        assert_eq!(solution.objective, 0);
        assert!(solution.assignment.is_empty());
    }

    #[test]
    fn oversized_item_is_infeasible() {
        init_logger();
        let instance = build_instance(5.0, &[("big", 1, 7.0)]);
        assert_eq!(solve(&instance).unwrap_err(), PackingError::Infeasible);
    }

    #[test]
    fn copies_share_one_bin() {
        init_logger();
        let instance = build_instance(1000.0, &[("X", 3, 50.0)]);
        let names = instance.items().iter().map(|i| i.name.clone()).collect_vec();
        assert_eq!(names, vec!["X_1", "X_2", "X_3"]);

        let solution = solve(&instance).unwrap();
        assert_eq!(solution.objective, 1);
        assert_eq!(solution.assignment.bins[0].item_ids, vec![0, 1, 2]);
        assert_eq!(solution.assignment.bins[0].load, 150.0);
    }

    #[test_case(10.0, &[("A", 2, 6.0), ("B", 2, 4.0)], 2; "complementary pairs")]
    #[test_case(10.0, &[("A", 4, 5.0)], 2; "halves")]
    #[test_case(12.0, &[("A", 3, 4.0), ("B", 1, 7.0), ("C", 1, 5.0)], 2; "mixed")]
    #[test_case(100.0, &[("A", 2, 60.0), ("B", 2, 30.0)], 2; "loose")]
    fn known_optimum(capacity: f64, items: &[(&str, usize, f64)], expected: usize) {
        init_logger();
        let instance = build_instance(capacity, items);
        let solution = solve(&instance).unwrap();
        assert_eq!(solution.objective, expected);
        check_properties(&instance, &solution);
    }

    #[test]
    fn random_instances_respect_bounds() {
        init_logger();
        let mut rng = SmallRng::seed_from_u64(0);
        let packer = Packer::new(SolverConfig {
            bin_limit: BinLimit::FirstFitDecreasing,
            symmetry_breaking: true,
            ..SolverConfig::default()
        })
        .unwrap();

        for _ in 0..10 {
            let mut instance = PackingInstance::new(10.0).unwrap();
            let n_types = rng.random_range(1..=3);
            for t in 0..n_types {
                let qty = rng.random_range(1..=2);
                let weight = rng.random_range(1..=10) as f64;
                instance.add_items(&format!("T{t}"), qty, weight).unwrap();
            }
            let solution = packer.solve(&instance, &mut MicrolpEngine::new()).unwrap();
            check_properties(&instance, &solution);
        }
    }

    #[test]
    fn batch_preserves_order_and_outcomes() {
        init_logger();
        let instances = vec![
            build_instance(10.0, &[("A", 3, 6.0)]),
            build_instance(5.0, &[("big", 1, 7.0)]),
            build_instance(1000.0, &[("X", 3, 50.0)]),
        ];
        let results = Packer::default().solve_batch(&instances, MicrolpEngine::new);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().objective, 3);
        assert_eq!(results[1].as_ref().unwrap_err(), &PackingError::Infeasible);
        assert_eq!(results[2].as_ref().unwrap().objective, 1);
    }

    #[test]
    fn exhausted_budget_is_unsolved() {
        init_logger();
        let instance = build_instance(120.0, &[("A", 12, 10.0)]);
        let packer = Packer::new(SolverConfig {
            time_limit_sec: Some(0.0),
            ..SolverConfig::default()
        })
        .unwrap();
        let res = packer.solve(&instance, &mut MicrolpEngine::new());
        assert_eq!(
            res.unwrap_err(),
            PackingError::Unsolved {
                time_limit: Some(Duration::ZERO)
            }
        );
    }

    #[test]
    fn import_solve_export() {
        init_logger();
        let config = io::parse_config(r#"{"bin_capacity": 6000}"#).unwrap();
        let items = io::parse_items("1S;1;6000\n6S;2;900\n\n7S;1;1700\n").unwrap();
        let instance = io::import(&config, &items).unwrap();
        assert_eq!(instance.n_items(), 4);

        let solution = solve(&instance).unwrap();
        let ext = io::export(&instance, &solution);

        assert_eq!(ext.bins_used, 2);
        assert_eq!(ext.lower_bound, 2);
        assert_eq!(ext.bins.len(), 2);
        assert_eq!(ext.total_weight, 9500.0);
        let names = ext
            .bins
            .iter()
            .flat_map(|b| b.items.iter().map(|i| i.name.as_str()))
            .sorted()
            .collect_vec();
        assert_eq!(names, vec!["1S_1", "6S_1", "6S_2", "7S_1"]);

        let json = serde_json::to_string(&ext).unwrap();
        assert!(json.contains("\"bins_used\":2"));
    }
}
