use genpool::{
    error::GeneticError,
    evolution::{
        EvolutionLauncher, EvolutionOptions, FallibleEvaluator, LogLevel, RunState,
    },
    gene_space::GeneSpace,
};

fn closeness_to_five(genome: &[i64]) -> i64 {
    genome.iter().map(|gene| 10 - (5 - gene).abs()).sum()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[test]
fn test_reaches_target_on_most_seeds() {
    let trials = 10;
    let mut successes = 0;

    for seed in 0..trials {
        let space = GeneSpace::uniform(4, 0, 10).unwrap();
        let options = EvolutionOptions::builder()
            .max_population(2_000)
            .threads(4)
            .seed(seed)
            .build();
        let outcome = EvolutionLauncher::new(space, closeness_to_five)
            .with_options(options)
            .run(38.0, 500)
            .unwrap();

        if outcome.success {
            assert_eq!(outcome.state, RunState::Converged);
            assert!(outcome.best[0].score() >= 38);
            assert!(outcome.steps <= 500);
            successes += 1;
        }
    }

    assert!(successes >= 8, "only {} of {} runs converged", successes, trials);
}

#[test]
fn test_run_with_default_options() {
    let space = GeneSpace::uniform(4, 0, 10).unwrap();
    let outcome = genpool::run(space, closeness_to_five, 38.0, 500).unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.best.len(), 5);
    assert!(outcome
        .best
        .windows(2)
        .all(|pair| pair[0].score() >= pair[1].score()));
}

#[test]
fn test_best_score_never_drops() {
    init_tracing();

    let space = GeneSpace::uniform(12, 0, 10).unwrap();
    let seed_genome = vec![5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 4];
    let seed_score = closeness_to_five(&seed_genome);
    let options = EvolutionOptions::builder()
        .max_population(1_000)
        .threads(4)
        .elite_bound(20)
        .log_level(LogLevel::Verbose)
        .report_interval(10)
        .seed(17)
        .build();

    let mut best_scores = Vec::new();
    let outcome = EvolutionLauncher::new(space, closeness_to_five)
        .with_options(options)
        .with_seed_genomes(vec![seed_genome])
        .run_with_observer(f64::INFINITY, 40, |report| best_scores.push(report.best_score))
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.state, RunState::Exhausted);
    assert_eq!(best_scores.len(), 40);
    assert!(best_scores.iter().all(|score| *score >= seed_score));
    assert!(best_scores.windows(2).all(|pair| pair[1] >= pair[0]));
}

#[test]
fn test_genes_may_leave_bounds() {
    // Crossover offsets are not clamped, so an evaluator rewarding large genes
    // drives the population past the declared maximum.
    let space = GeneSpace::uniform(3, 0, 10).unwrap();
    let options = EvolutionOptions::builder()
        .max_population(1_000)
        .threads(2)
        .seed(23)
        .build();

    let outcome = EvolutionLauncher::new(space, |genome: &[i64]| genome.iter().sum::<i64>())
        .with_options(options)
        .run(60.0, 300)
        .unwrap();

    assert!(outcome.success);
    assert!(outcome.best[0].genome().iter().any(|gene| *gene > 10));
}

#[test]
fn test_evaluator_failure_aborts() {
    let space = GeneSpace::uniform(4, 0, 10).unwrap();
    let evaluator = FallibleEvaluator::new(|genome: &[i64]| {
        if genome[0] > 5 {
            Err(GeneticError::FitnessCalculation(format!(
                "cannot score gene {}",
                genome[0]
            )))
        } else {
            Ok(closeness_to_five(genome))
        }
    });
    let options = EvolutionOptions::builder()
        .max_population(500)
        .threads(3)
        .seed(29)
        .build();

    let result = EvolutionLauncher::new(space, evaluator)
        .with_options(options)
        .run(1_000.0, 200);

    match result {
        Err(GeneticError::FitnessCalculation(msg)) => assert!(msg.starts_with("cannot score gene")),
        other => panic!("Expected FitnessCalculation error, got {:?}", other.map(|o| o.steps)),
    }
}

#[test]
fn test_invalid_gene_space() {
    let result = GeneSpace::from_bounds(&[0, 5], &[10, 1]);
    assert!(matches!(result, Err(GeneticError::Configuration(_))));
}

#[test]
fn test_invalid_options() {
    let space = GeneSpace::uniform(4, 0, 10).unwrap();
    let options = EvolutionOptions::new(0, 4, 50, LogLevel::None);

    match EvolutionLauncher::new(space, closeness_to_five)
        .with_options(options)
        .run(38.0, 10)
    {
        Err(GeneticError::Configuration(msg)) => {
            assert!(msg.contains("Population size cannot be zero"))
        }
        _ => panic!("Expected Configuration error"),
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_options_and_space_serialize() {
    let options = EvolutionOptions::builder().threads(3).seed(5).build();
    let json = serde_json::to_string(&options).unwrap();
    let restored: EvolutionOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, options);

    let space = GeneSpace::uniform(2, -1, 1).unwrap();
    let json = serde_json::to_string(&space).unwrap();
    let restored: GeneSpace = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, space);
}
