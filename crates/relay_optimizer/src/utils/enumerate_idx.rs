use std::marker::PhantomData;

/// `enumerate()` that yields typed indices instead of raw `usize`.
pub trait EnumerateIdx<Idx>: Iterator + Sized {
    fn enumerate_idx(self) -> EnumerateIdxIter<Self, Idx> {
        EnumerateIdxIter {
            inner: self.enumerate(),
            marker: PhantomData,
        }
    }
}

impl<I: Iterator, Idx> EnumerateIdx<Idx> for I {}

pub struct EnumerateIdxIter<I, Idx> {
    inner: std::iter::Enumerate<I>,
    marker: PhantomData<Idx>,
}

impl<I: Iterator, Idx: From<usize>> Iterator for EnumerateIdxIter<I, Idx> {
    type Item = (Idx, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, item) = self.inner.next()?;
        Some((Idx::from(index), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: ExactSizeIterator, Idx: From<usize>> ExactSizeIterator for EnumerateIdxIter<I, Idx> {}
