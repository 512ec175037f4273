//! Simulated question-asking trajectories

use super::entropy::entropy_uniform;
use super::partition::restrict;
use crate::core::{AttributeIndex, CandidateSet, ItemIndex, ItemTable, OracleError};

/// One question asked during a simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryStep {
    pub attribute: String,
    pub answer: String,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

impl TrajectoryStep {
    /// Bits gained by this answer
    #[must_use]
    pub fn information_gained(&self) -> f64 {
        entropy_uniform(self.candidates_before) - entropy_uniform(self.candidates_after)
    }
}

/// Result of following a policy for one hidden target
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub target: String,
    pub initial_candidates: usize,
    pub steps: Vec<TrajectoryStep>,
    /// IDs still consistent with every answer when the walk stopped
    pub final_candidates: Vec<String>,
}

impl Trajectory {
    /// Posterior entropy before any question and after each one
    ///
    /// Entry 0 is the prior entropy; the length is `steps.len() + 1`.
    #[must_use]
    pub fn entropies(&self) -> Vec<f64> {
        std::iter::once(self.initial_candidates)
            .chain(self.steps.iter().map(|step| step.candidates_after))
            .map(entropy_uniform)
            .collect()
    }

    /// Attributes asked, in order
    #[must_use]
    pub fn asked_attributes(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.attribute.clone()).collect()
    }

    #[must_use]
    pub fn num_questions(&self) -> usize {
        self.steps.len()
    }

    /// Entropy left when the walk stopped
    #[must_use]
    pub fn final_entropy(&self) -> f64 {
        entropy_uniform(self.final_candidates.len())
    }

    /// True when the target was isolated rather than left in an equivalence class
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.final_candidates.len() <= 1
    }

    /// `(entropies, asked_attributes)` pair consumed by plotting tools
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<String>) {
        let entropies = self.entropies();
        let asked = self.steps.into_iter().map(|step| step.attribute).collect();
        (entropies, asked)
    }
}

/// Walk from `root` toward `target`, asking whatever `next_attribute` picks
///
/// Stops once a single candidate is left or when `next_attribute` returns
/// `None` (nothing splits the current set any further).
pub(crate) fn walk<F>(
    items: &ItemTable,
    root: &CandidateSet,
    target: ItemIndex,
    mut next_attribute: F,
) -> Result<Trajectory, OracleError>
where
    F: FnMut(&CandidateSet) -> Result<Option<AttributeIndex>, OracleError>,
{
    let mut current = root.clone();
    let mut steps = Vec::new();

    while current.len() > 1 {
        let Some(attribute) = next_attribute(&current)? else {
            break;
        };

        let answer = items.value_code(target, attribute);
        let narrowed = restrict(items, &current, attribute, answer);

        steps.push(TrajectoryStep {
            attribute: items.attribute_name(attribute).to_string(),
            answer: items.value_name(attribute, answer).to_string(),
            candidates_before: current.len(),
            candidates_after: narrowed.len(),
        });

        current = narrowed;
    }

    Ok(Trajectory {
        target: items.id(target).to_string(),
        initial_candidates: root.len(),
        steps,
        final_candidates: current.iter().map(|i| items.id(i).to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trajectory() -> Trajectory {
        Trajectory {
            target: "a".into(),
            initial_candidates: 8,
            steps: vec![
                TrajectoryStep {
                    attribute: "color".into(),
                    answer: "red".into(),
                    candidates_before: 8,
                    candidates_after: 2,
                },
                TrajectoryStep {
                    attribute: "size".into(),
                    answer: "S".into(),
                    candidates_before: 2,
                    candidates_after: 1,
                },
            ],
            final_candidates: vec!["a".into()],
        }
    }

    #[test]
    fn entropies_start_with_prior() {
        let entropies = trajectory().entropies();
        assert_eq!(entropies.len(), 3);
        assert!((entropies[0] - 3.0).abs() < 1e-12);
        assert!((entropies[1] - 1.0).abs() < 1e-12);
        assert!(entropies[2].abs() < 1e-12);
    }

    #[test]
    fn into_parts_matches_accessors() {
        let t = trajectory();
        let expected_entropies = t.entropies();
        let (entropies, asked) = t.into_parts();

        assert_eq!(entropies, expected_entropies);
        assert_eq!(asked, vec!["color", "size"]);
    }

    #[test]
    fn information_gained_per_step() {
        let t = trajectory();
        assert!((t.steps[0].information_gained() - 2.0).abs() < 1e-12);
        assert!((t.steps[1].information_gained() - 1.0).abs() < 1e-12);
        assert!(t.is_resolved());
    }

    #[test]
    fn walk_stops_when_policy_gives_up() {
        let items = ItemTable::from_records([
            ("x", vec![("color", "red")]),
            ("y", vec![("color", "red")]),
        ])
        .unwrap();

        let result = walk(&items, &items.all_candidates(), 0, |_| Ok(None)).unwrap();
        assert_eq!(result.num_questions(), 0);
        assert_eq!(result.final_candidates, vec!["x", "y"]);
        assert!(!result.is_resolved());
        assert!((result.final_entropy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn walk_records_answers() {
        let items = ItemTable::from_records([
            ("x", vec![("color", "red")]),
            ("y", vec![("color", "blue")]),
        ])
        .unwrap();

        let result = walk(&items, &items.all_candidates(), 1, |_| Ok(Some(0))).unwrap();
        assert_eq!(result.target, "y");
        assert_eq!(result.steps[0].answer, "blue");
        assert_eq!(result.final_candidates, vec!["y"]);
    }
}
