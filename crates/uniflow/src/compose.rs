//! Right-to-left function composition
//!
//! General-purpose combinator used to fold the ordered middleware stage
//! list into one dispatch wrapper. Kept generic so it is testable in
//! isolation from the store.

/// A boxed `T -> T` function suitable for composition.
pub type Composable<T> = Box<dyn Fn(T) -> T + Send>;

/// Compose `funcs` right to left: `compose(vec![f, g, h])` applies
/// `f(g(h(x)))`. An empty list yields the identity function; a single
/// element behaves as that function alone.
pub fn compose<T: 'static>(funcs: Vec<Composable<T>>) -> Composable<T> {
    funcs.into_iter().rev().fold(
        Box::new(|value: T| value) as Composable<T>,
        |inner, outer| Box::new(move |value| outer(inner(value))),
    )
}
