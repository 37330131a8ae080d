//! Pareto ranking, NSGA-II survivor selection and the elite archive.
//!
//! # Algorithm
//!
//! 1. **Non-dominated sort**: partitions a pool into fronts F1, F2, ...
//!    where F1 holds the individuals no one dominates, F2 those dominated
//!    only by F1, and so on (O(M·N²)).
//! 2. **Crowding distance**: within a front, the normalized perimeter of
//!    the cuboid spanned by each individual's neighbours; boundary
//!    individuals get infinity.
//! 3. **Selection**: fills μ survivors front by front; the first front
//!    that does not fit is truncated by descending crowding distance.
//!
//! # Reference
//! Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//! Algorithm: NSGA-II"

use serde::{Deserialize, Serialize};

use super::chromosome::LessonChromosome;
use crate::models::{Objective, Objectives, OBJECTIVE_COUNT};

/// Fitness used for ranking; unevaluated individuals rank last.
fn ranking_objectives(chromosome: &LessonChromosome) -> Objectives {
    chromosome
        .objectives()
        .unwrap_or_else(|| Objectives::from_array([f64::INFINITY; OBJECTIVE_COUNT]))
}

// ======================== Ranking ========================

/// Fast non-dominated sort.
///
/// Returns fronts of indices into `objectives`, best front first. Indices
/// inside a front are ascending.
pub fn non_dominated_sort(objectives: &[Objectives]) -> Vec<Vec<usize>> {
    let n = objectives.len();
    let mut dominated_count = vec![0usize; n];
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];

    for p in 0..n {
        for q in (p + 1)..n {
            if objectives[p].dominates(&objectives[q]) {
                dominates[p].push(q);
                dominated_count[q] += 1;
            } else if objectives[q].dominates(&objectives[p]) {
                dominates[q].push(p);
                dominated_count[p] += 1;
            }
        }
    }

    let mut fronts = Vec::new();
    let mut current: Vec<usize> = (0..n).filter(|&i| dominated_count[i] == 0).collect();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &p in &current {
            for &q in &dominates[p] {
                dominated_count[q] -= 1;
                if dominated_count[q] == 0 {
                    next.push(q);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }
    fronts
}

/// Crowding distance of each member of `front`, aligned with `front`.
pub fn crowding_distance(objectives: &[Objectives], front: &[usize]) -> Vec<f64> {
    let m = front.len();
    if m <= 2 {
        return vec![f64::INFINITY; m];
    }
    let mut distance = vec![0.0; m];

    for objective in Objective::ALL {
        let value = |k: usize| objectives[front[k]].get(objective);
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        distance[order[0]] = f64::INFINITY;
        distance[order[m - 1]] = f64::INFINITY;

        let range = value(order[m - 1]) - value(order[0]);
        if !range.is_finite() || range <= 0.0 {
            continue;
        }
        for w in 1..(m - 1) {
            distance[order[w]] += (value(order[w + 1]) - value(order[w - 1])) / range;
        }
    }
    distance
}

// ======================== Selection ========================

/// NSGA-II environmental selection of `mu` survivors from `pool`.
///
/// Whole fronts are taken while they fit; the first overflowing front is
/// truncated by descending crowding distance (ties keep pool order).
pub fn select_nsga2(pool: Vec<LessonChromosome>, mu: usize) -> Vec<LessonChromosome> {
    if pool.len() <= mu {
        return pool;
    }
    let objectives: Vec<Objectives> = pool.iter().map(ranking_objectives).collect();
    let fronts = non_dominated_sort(&objectives);

    let mut chosen: Vec<usize> = Vec::with_capacity(mu);
    for front in fronts {
        if chosen.len() + front.len() <= mu {
            chosen.extend(front);
        } else {
            let remaining = mu - chosen.len();
            let distance = crowding_distance(&objectives, &front);
            let mut ranked: Vec<usize> = (0..front.len()).collect();
            ranked.sort_by(|&a, &b| distance[b].total_cmp(&distance[a]));
            chosen.extend(ranked.into_iter().take(remaining).map(|k| front[k]));
        }
        if chosen.len() >= mu {
            break;
        }
    }

    let mut slots: Vec<Option<LessonChromosome>> = pool.into_iter().map(Some).collect();
    chosen.into_iter().filter_map(|i| slots[i].take()).collect()
}

// ======================== Archive ========================

/// Running set of mutually non-dominated individuals seen during a run.
///
/// Never holds two members with identical genes, and never holds a member
/// dominated by another member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParetoArchive {
    members: Vec<LessonChromosome>,
}

impl ParetoArchive {
    /// Creates an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers evaluated candidates to the archive.
    ///
    /// A candidate is rejected when unevaluated, dominated by a member, or
    /// gene-identical to a member. An accepted candidate evicts every
    /// member it dominates.
    pub fn update(&mut self, candidates: &[LessonChromosome]) {
        for candidate in candidates {
            let Some(objectives) = candidate.objectives() else {
                continue;
            };
            let rejected = self.members.iter().any(|m| {
                m.genes == candidate.genes
                    || m.objectives().is_some_and(|o| o.dominates(&objectives))
            });
            if rejected {
                continue;
            }
            self.members
                .retain(|m| !m.objectives().is_some_and(|o| objectives.dominates(&o)));
            self.members.push(candidate.clone());
        }
    }

    /// Current members.
    pub fn members(&self) -> &[LessonChromosome] {
        &self.members
    }

    /// Consumes the archive, returning its members.
    pub fn into_members(self) -> Vec<LessonChromosome> {
        self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the archive is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member with the lowest value of `objective` (first on ties).
    pub fn best_by(&self, objective: Objective) -> Option<&LessonChromosome> {
        self.best_by_key(|o| o.get(objective))
    }

    /// Member with the lowest objective sum (first on ties).
    pub fn compromise(&self) -> Option<&LessonChromosome> {
        self.best_by_key(|o| o.sum())
    }

    fn best_by_key(&self, key: impl Fn(&Objectives) -> f64) -> Option<&LessonChromosome> {
        let mut best: Option<(&LessonChromosome, f64)> = None;
        for member in &self.members {
            let Some(objectives) = member.objectives() else {
                continue;
            };
            let value = key(&objectives);
            if best.map_or(true, |(_, b)| value < b) {
                best = Some((member, value));
            }
        }
        best.map(|(m, _)| m)
    }
}
