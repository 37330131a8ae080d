//! (μ + λ) NSGA-II evolution loop.
//!
//! # Algorithm
//!
//! 1. Create μ random orderings and evaluate them.
//! 2. Each generation: produce λ offspring (see [`Variation`]), evaluate
//!    the ones without a cached fitness, offer them to the archive, and
//!    select μ survivors from parents ∪ offspring with NSGA-II.
//! 3. Record per-generation statistics of the surviving population.
//!
//! Evaluation runs on the rayon thread pool when enabled. Results are
//! written back by position, so a seeded run produces the same archive
//! whether or not evaluation is parallel.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::chromosome::LessonChromosome;
use super::operators::Variation;
use super::pareto::{select_nsga2, ParetoArchive};
use super::problem::TimetableProblem;
use crate::config::EvolutionConfig;
use crate::error::TimetableError;
use crate::models::{Objectives, OBJECTIVE_COUNT};

/// Population statistics of one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number; 0 is the initial population.
    pub generation: usize,
    /// Fitness evaluations performed in this generation.
    pub evaluations: usize,
    /// Per-objective mean over the population.
    pub mean: Objectives,
    /// Per-objective minimum over the population.
    pub min: Objectives,
    /// Archive size after this generation.
    pub archive_size: usize,
}

impl GenerationStats {
    /// Computes statistics over the evaluated members of `population`.
    pub fn from_population(
        generation: usize,
        evaluations: usize,
        archive_size: usize,
        population: &[LessonChromosome],
    ) -> Self {
        let mut sum = [0.0; OBJECTIVE_COUNT];
        let mut min = [f64::INFINITY; OBJECTIVE_COUNT];
        let mut count = 0usize;
        for objectives in population.iter().filter_map(LessonChromosome::objectives) {
            for (k, v) in objectives.as_array().into_iter().enumerate() {
                sum[k] += v;
                min[k] = min[k].min(v);
            }
            count += 1;
        }
        let (mean, min) = if count == 0 {
            (Objectives::default(), Objectives::default())
        } else {
            (
                Objectives::from_array(sum.map(|s| s / count as f64)),
                Objectives::from_array(min),
            )
        };
        Self {
            generation,
            evaluations,
            mean,
            min,
            archive_size,
        }
    }
}

/// Outcome of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Final population (μ individuals, all evaluated).
    pub population: Vec<LessonChromosome>,
    /// Non-dominated individuals seen during the run.
    pub archive: ParetoArchive,
    /// Statistics for generation 0 and every later generation.
    pub history: Vec<GenerationStats>,
    /// Generations completed.
    pub generations: usize,
    /// Total fitness evaluations.
    pub evaluations: usize,
}

/// Runs NSGA-II over lesson orderings.
///
/// # Example
/// ```no_run
/// use u_timetable::config::EvolutionConfig;
/// use u_timetable::ga::{Nsga2Runner, TimetableProblem};
/// # fn problem() -> TimetableProblem { unimplemented!() }
///
/// let problem = problem();
/// let config = EvolutionConfig::default().with_generations(30).with_seed(7);
/// let result = Nsga2Runner::run(&problem, &config).unwrap();
/// if let Some(best) = result.archive.compromise() {
///     let timetable = problem.decode(&best.genes).unwrap();
///     println!("unplaced: {}", timetable.unplaced_count());
/// }
/// ```
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs the evolution described by `config` on `problem`.
    ///
    /// # Errors
    /// `InvalidConfig` for unusable parameters; decoding errors are
    /// propagated from evaluation.
    pub fn run(
        problem: &TimetableProblem,
        config: &EvolutionConfig,
    ) -> Result<EvolutionResult, TimetableError> {
        config.validate()?;
        let mu = config.population_size;
        let lambda = config.offspring_count();
        let variation = Variation::from_config(config);
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        info!(
            "NSGA-II start: {} lessons, mu={}, lambda={}, generations={}, parallel={}",
            problem.universe().len(),
            mu,
            lambda,
            config.generations,
            config.parallel
        );

        let mut population: Vec<LessonChromosome> =
            (0..mu).map(|_| problem.create_individual(&mut rng)).collect();
        let initial = evaluate_pending(problem, &mut population, config.parallel)?;
        let mut evaluations = initial;

        let mut archive = ParetoArchive::new();
        archive.update(&population);

        let mut history = Vec::with_capacity(config.generations + 1);
        history.push(GenerationStats::from_population(
            0,
            initial,
            archive.len(),
            &population,
        ));
        log_generation(&history[0]);

        for generation in 1..=config.generations {
            let mut offspring = variation.offspring(&population, lambda, &mut rng);
            let evaluated = evaluate_pending(problem, &mut offspring, config.parallel)?;
            evaluations += evaluated;
            archive.update(&offspring);

            let mut pool = population;
            pool.extend(offspring);
            population = select_nsga2(pool, mu);

            let stats =
                GenerationStats::from_population(generation, evaluated, archive.len(), &population);
            log_generation(&stats);
            history.push(stats);
        }

        info!(
            "NSGA-II done: {} evaluations, archive size {}",
            evaluations,
            archive.len()
        );

        Ok(EvolutionResult {
            population,
            archive,
            history,
            generations: config.generations,
            evaluations,
        })
    }
}

/// Evaluates every individual without a cached fitness; returns how many.
fn evaluate_pending(
    problem: &TimetableProblem,
    batch: &mut [LessonChromosome],
    parallel: bool,
) -> Result<usize, TimetableError> {
    let pending: Vec<usize> = (0..batch.len())
        .filter(|&i| !batch[i].is_evaluated())
        .collect();

    let results = {
        let view: &[LessonChromosome] = batch;
        if parallel {
            pending
                .par_iter()
                .map(|&i| problem.evaluate(&view[i].genes))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            pending
                .iter()
                .map(|&i| problem.evaluate(&view[i].genes))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    for (&i, evaluation) in pending.iter().zip(results) {
        batch[i].fitness = Some(evaluation);
    }
    Ok(pending.len())
}

fn log_generation(stats: &GenerationStats) {
    info!(
        "gen {:>4} nevals {:>4} | mean [{:.1}, {:.1}, {:.1}] | min [{:.1}, {:.1}, {:.1}]",
        stats.generation,
        stats.evaluations,
        stats.mean.student_hardship,
        stats.mean.didactic_quality,
        stats.mean.teacher_comfort,
        stats.min.student_hardship,
        stats.min.didactic_quality,
        stats.min.teacher_comfort
    );
    debug!("gen {} archive size {}", stats.generation, stats.archive_size);
}
