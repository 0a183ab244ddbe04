//! Integration tests for the topomap engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use topomap::{SomConfig, SomTrainer};

const CLUSTER_SIZE: usize = 50;

/// Three well-separated clusters of 4-D samples, 50 each, in cluster order.
fn clustered_samples(rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
    let centers = [[0.1; 4], [0.5; 4], [0.9; 4]];

    let mut samples = Vec::with_capacity(3 * CLUSTER_SIZE);
    for center in &centers {
        for _ in 0..CLUSTER_SIZE {
            let sample: Vec<f64> = center
                .iter()
                .map(|&c| c + rng.gen_range(-0.05..=0.05))
                .collect();
            samples.push(sample);
        }
    }
    samples
}

/// Trains a 3x3 map on the clustered samples with a fixed seed.
fn trained_on_clusters(seed: u64) -> SomTrainer {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut trainer = SomTrainer::new(3, 3, 4).unwrap();
    trainer.initialize_weights(0.0, 1.0, &mut rng).unwrap();
    for sample in clustered_samples(&mut rng) {
        trainer.push_sample(sample).unwrap();
    }
    trainer.train(1000, 0.1, &mut rng).unwrap();
    trainer
}

#[test]
fn test_end_to_end_cluster_concentration() {
    let trainer = trained_on_clusters(42);

    // Each cluster's assignments should concentrate on a small subregion:
    // the most-hit nodes covering a majority of the cluster's recorded
    // indices must number at most 3 of the 9 nodes.
    for cluster in 0..3 {
        let lo = cluster * CLUSTER_SIZE;
        let hi = lo + CLUSTER_SIZE;

        let mut per_node: Vec<usize> = trainer
            .assignments()
            .cells()
            .map(|(_, set)| set.iter().filter(|&&idx| idx >= lo && idx < hi).count())
            .collect();

        let total: usize = per_node.iter().sum();
        assert!(total > 0, "cluster {cluster} was never drawn");

        per_node.sort_unstable_by(|a, b| b.cmp(a));
        let mut covered = 0;
        let mut nodes_needed = 0;
        for count in per_node {
            covered += count;
            nodes_needed += 1;
            if covered * 2 >= total {
                break;
            }
        }
        assert!(
            nodes_needed <= 3,
            "cluster {cluster} spread its majority over {nodes_needed} nodes"
        );
    }
}

#[test]
fn test_seeded_runs_are_bit_identical() {
    let a = trained_on_clusters(7);
    let b = trained_on_clusters(7);

    assert_eq!(a.lattice().as_slice(), b.lattice().as_slice());

    for ((coords_a, set_a), (coords_b, set_b)) in a.assignments().cells().zip(b.assignments().cells()) {
        assert_eq!(coords_a, coords_b);
        assert_eq!(set_a, set_b);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = trained_on_clusters(7);
    let b = trained_on_clusters(8);
    assert_ne!(a.lattice().as_slice(), b.lattice().as_slice());
}

#[test]
fn test_config_driven_run_stays_in_unit_cube() {
    let config = SomConfig {
        height: 5,
        width: 4,
        dimension: 3,
        epochs: 500,
        initial_learning_rate: 0.3,
        weight_low: 0.0,
        weight_high: 1.0,
    };

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut trainer = SomTrainer::from_config(&config).unwrap();
    for _ in 0..20 {
        let sample: Vec<f64> = (0..config.dimension).map(|_| rng.gen_range(0.0..=1.0)).collect();
        trainer.push_sample(sample).unwrap();
    }

    let summary = trainer.run(&config, &mut rng).unwrap();
    assert_eq!(summary.epochs_completed, config.epochs);

    // Every update is a convex step toward a sample in [0, 1]^d, so the
    // trained weights must stay inside the unit cube.
    assert!(trainer
        .lattice()
        .as_slice()
        .iter()
        .all(|&w| (0.0..=1.0).contains(&w)));
}
