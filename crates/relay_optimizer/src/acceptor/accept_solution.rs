use rand::Rng;

use crate::solver::score::Score;

pub struct AcceptSolutionContext<'a, R>
where
    R: Rng,
{
    pub iteration: usize,
    pub rng: &'a mut R,
}

pub trait AcceptSolution {
    /// Whether `candidate` replaces `incumbent` as the solution the next
    /// iterations start from.
    fn accept<R>(
        &self,
        incumbent: &Score,
        candidate: &Score,
        context: AcceptSolutionContext<R>,
    ) -> bool
    where
        R: Rng;
}
