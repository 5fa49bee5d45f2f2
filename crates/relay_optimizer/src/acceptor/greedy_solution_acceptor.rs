use rand::Rng;

use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

pub struct GreedySolutionAcceptor;

impl AcceptSolution for GreedySolutionAcceptor {
    fn accept<R>(&self, incumbent: &Score, candidate: &Score, _: AcceptSolutionContext<R>) -> bool
    where
        R: Rng,
    {
        candidate < incumbent
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::MockRng;

    use super::*;

    fn accept(incumbent: Score, candidate: Score) -> bool {
        GreedySolutionAcceptor.accept(
            &incumbent,
            &candidate,
            AcceptSolutionContext {
                iteration: 0,
                rng: &mut MockRng::new(vec![0]),
            },
        )
    }

    #[test]
    fn test_fewer_unassigned_is_accepted_even_if_more_expensive() {
        assert!(accept(Score::new(1, 100.0), Score::new(0, 500.0)));
        assert!(!accept(Score::new(0, 500.0), Score::new(1, 100.0)));
    }

    #[test]
    fn test_equal_unassigned_needs_strictly_lower_cost() {
        assert!(accept(Score::new(0, 100.0), Score::new(0, 99.5)));
        assert!(!accept(Score::new(0, 100.0), Score::new(0, 100.0)));
        assert!(!accept(Score::new(0, 100.0), Score::new(0, 100.5)));
    }
}
