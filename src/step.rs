/// Outcome of one resumption: either the producer yielded a value, or it ran to completion.
///
/// `Step` is what a hand-written producer body returns from each call, and what
/// [`FrameHandle::resume`](crate::FrameHandle::resume) reports to its caller.
///
/// # Examples
///
/// ```rust
/// use lazyseq::Step;
///
/// let yielded: Step<i32, ()> = Step::Yielded(42);
/// let complete: Step<i32, ()> = Step::Complete(());
///
/// assert_eq!(yielded.map_yielded(|x| x * 2), Step::Yielded(84));
/// assert!(complete.is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<Y, D> {
    /// The producer suspended after handing out a value
    Yielded(Y),
    /// The producer finished
    Complete(D),
}

impl<Y, D> Step<Y, D> {
    /// Returns `true` if the step is `Yielded`.
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    /// Returns `true` if the step is `Complete`.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// Converts from `Step<Y, D>` to `Option<Y>`, discarding the complete value.
    ///
    /// ```rust
    /// use lazyseq::Step;
    ///
    /// let x: Step<i32, ()> = Step::Yielded(7);
    /// assert_eq!(x.yielded_value(), Some(7));
    /// ```
    #[inline]
    pub fn yielded_value(self) -> Option<Y> {
        match self {
            Step::Yielded(y) => Some(y),
            Step::Complete(_) => None,
        }
    }

    /// Maps a `Step<Y, D>` to `Step<Y2, D>` by applying a function to the yielded value.
    #[inline]
    pub fn map_yielded<Y2, F>(self, f: F) -> Step<Y2, D>
    where
        F: FnOnce(Y) -> Y2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(f(y)),
            Step::Complete(d) => Step::Complete(d),
        }
    }

    /// Drops both payloads, keeping only which way the step went.
    #[inline]
    pub fn discard(self) -> Step<(), ()> {
        match self {
            Step::Yielded(_) => Step::Yielded(()),
            Step::Complete(_) => Step::Complete(()),
        }
    }

    /// Returns the yielded value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Complete`.
    #[inline]
    #[track_caller]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
        }
    }

    /// Returns the complete value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Yielded`.
    #[inline]
    #[track_caller]
    pub fn unwrap_complete(self) -> D {
        match self {
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Complete(d) => d,
        }
    }
}

impl<Y> From<Option<Y>> for Step<Y, ()> {
    fn from(value: Option<Y>) -> Self {
        match value {
            Some(y) => Step::Yielded(y),
            None => Step::Complete(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let y: Step<i32, ()> = Step::Yielded(1);
        let c: Step<i32, ()> = Step::Complete(());
        assert!(y.is_yielded() && !y.is_complete());
        assert!(c.is_complete() && !c.is_yielded());
    }

    #[test]
    fn test_discard_keeps_direction() {
        assert_eq!(Step::<_, ()>::Yielded("x").discard(), Step::Yielded(()));
        assert_eq!(Step::<i32, _>::Complete(5).discard(), Step::Complete(()));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Step::from(Some(3)), Step::Yielded(3));
        assert_eq!(Step::<u8, ()>::from(None), Step::Complete(()));
    }

    #[test]
    #[should_panic(expected = "unwrap_yielded")]
    fn test_unwrap_yielded_panics_on_complete() {
        Step::<i32, ()>::Complete(()).unwrap_yielded();
    }

    #[test]
    fn test_unwrap_complete() {
        assert_eq!(Step::<(), _>::Complete("done").unwrap_complete(), "done");
    }
}
