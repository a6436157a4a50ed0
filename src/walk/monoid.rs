/// A type with an identity value and an associative way to combine two values.
///
/// Implementations must satisfy, for all `a`, `b` and `c`:
///
/// - `Self::empty().combine(a) == a` and `a.combine(Self::empty()) == a`
/// - `a.combine(b).combine(c) == a.combine(b.combine(c))`
///
/// [`BlockAlgebra::collecting`](crate::walk::BlockAlgebra::collecting) uses this to build a fold that concatenates
/// everything it finds.
pub trait Monoid: Sized {
    fn empty() -> Self;

    fn combine(self, other: Self) -> Self;

    /// Combines all the values, left to right. An empty input gives [`Monoid::empty`].
    fn concat<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        values.into_iter().fold(Self::empty(), Self::combine)
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}
