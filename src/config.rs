//! Run configuration: penalty weights and evolutionary hyperparameters.
//!
//! Both structs deserialize with `#[serde(default)]`, so a partial config
//! document overrides only the fields it names.

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// Weights of every scoring term of the placement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// f1: lesson that fits nowhere.
    pub unplaced_lesson: f64,
    /// f1: lesson placed in an UNWANTED slot.
    pub unwanted_slot: f64,
    /// f2: on-site-priority subject placed in a non-OFFLINE slot.
    pub subject_mismatch: f64,
    /// f3: each remote-from-school lesson over the teacher's threshold.
    pub excess_online_from_school: f64,
    /// f1: per idle window in a class day.
    pub student_gap: f64,
    /// f3: per idle window in a teacher day (if the teacher dislikes them).
    pub teacher_gap: f64,
    /// f2: hard subject at a day edge; doubled for unbalanced week edges.
    pub difficulty_distribution: f64,
    /// f2: per lesson over a subject's daily maximum.
    pub max_lessons_per_day: f64,
    /// f2: per lesson over a subject's maximum stack.
    pub stack_violation: f64,
    /// f2: flat, for a stack whose length differs from the preferred one.
    pub stack_non_preferred: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            unplaced_lesson: 1000.0,
            unwanted_slot: 50.0,
            subject_mismatch: 20.0,
            excess_online_from_school: 30.0,
            student_gap: 40.0,
            teacher_gap: 15.0,
            difficulty_distribution: 10.0,
            max_lessons_per_day: 25.0,
            stack_violation: 30.0,
            stack_non_preferred: 5.0,
        }
    }
}

impl PenaltyWeights {
    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<(), TimetableError> {
        let named = [
            ("unplaced_lesson", self.unplaced_lesson),
            ("unwanted_slot", self.unwanted_slot),
            ("subject_mismatch", self.subject_mismatch),
            ("excess_online_from_school", self.excess_online_from_school),
            ("student_gap", self.student_gap),
            ("teacher_gap", self.teacher_gap),
            ("difficulty_distribution", self.difficulty_distribution),
            ("max_lessons_per_day", self.max_lessons_per_day),
            ("stack_violation", self.stack_violation),
            ("stack_non_preferred", self.stack_non_preferred),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(TimetableError::InvalidConfig(format!(
                    "penalty weight {name} must be finite and >= 0 (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// NSGA-II (μ+λ) hyperparameters.
///
/// # Example
///
/// ```
/// use u_timetable::config::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(20)
///     .with_generations(10)
///     .with_seed(42)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.offspring_count(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Survivors per generation (μ).
    pub population_size: usize,
    /// Offspring per generation (λ). `None` = same as μ.
    pub offspring_size: Option<usize>,
    /// Number of generations to run.
    pub generations: usize,
    /// Probability that an offspring is produced by crossover.
    pub crossover_probability: f64,
    /// Probability that an offspring is produced by mutation.
    pub mutation_probability: f64,
    /// Per-gene swap probability inside a mutation.
    pub gene_mutation_probability: f64,
    /// RNG seed. `None` = seeded from OS entropy.
    pub seed: Option<u64>,
    /// Evaluate fitness on the rayon thread pool.
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            offspring_size: None,
            generations: 50,
            crossover_probability: 0.7,
            mutation_probability: 0.2,
            gene_mutation_probability: 0.05,
            seed: None,
            parallel: true,
        }
    }
}

impl EvolutionConfig {
    /// Sets μ.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets λ.
    pub fn with_offspring_size(mut self, size: usize) -> Self {
        self.offspring_size = Some(size);
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets crossover and mutation probabilities.
    pub fn with_variation(mut self, crossover: f64, mutation: f64) -> Self {
        self.crossover_probability = crossover;
        self.mutation_probability = mutation;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_gene_mutation_probability(mut self, p: f64) -> Self {
        self.gene_mutation_probability = p;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Effective λ.
    pub fn offspring_count(&self) -> usize {
        self.offspring_size.unwrap_or(self.population_size)
    }

    /// Checks the configuration before a run.
    ///
    /// # Errors
    /// `InvalidConfig` for zero μ, λ or generations, probabilities outside
    /// [0, 1], or crossover + mutation probability above 1.
    pub fn validate(&self) -> Result<(), TimetableError> {
        if self.population_size == 0 {
            return Err(TimetableError::InvalidConfig(
                "population_size must be > 0".into(),
            ));
        }
        if self.offspring_count() == 0 {
            return Err(TimetableError::InvalidConfig(
                "offspring_size must be > 0".into(),
            ));
        }
        if self.generations == 0 {
            return Err(TimetableError::InvalidConfig(
                "generations must be > 0".into(),
            ));
        }
        for (name, p) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
            ("gene_mutation_probability", self.gene_mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TimetableError::InvalidConfig(format!(
                    "{name} must be within [0, 1] (got {p})"
                )));
            }
        }
        if self.crossover_probability + self.mutation_probability > 1.0 {
            return Err(TimetableError::InvalidConfig(
                "crossover_probability + mutation_probability must be <= 1".into(),
            ));
        }
        Ok(())
    }
}
