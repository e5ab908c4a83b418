/// Names the carrier type for a list of alternatives.
///
/// # Examples
///
/// ```rust
/// use sumpipe::Sum;
///
/// type Parsed = Sum![u16, String];
/// let port: Parsed = Sum::new(8080u16);
/// assert_eq!(port.get::<u16, _>(), Some(&8080));
/// ```
#[macro_export]
macro_rules! Sum {
    [$($t:ty),* $(,)?] => [$crate::Sum::<$crate::T![$($t,)*]>];
}

/// Names the type list `(A, (B, (C, ())))` for `T![A, B, C]`.
///
/// The value version of the macro is [`t`].
///
/// # Examples
///
/// ```rust
/// use sumpipe::T;
///
/// type Alternatives = T![i32, u32, f64];
/// let _: Option<Alternatives> = None::<(i32, (u32, (f64, ())))>;
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}

/// Builds a type list value; mostly useful for naming position maps.
///
/// The type version of the macro is [`T`].
///
/// # Examples
///
/// ```rust
/// use sumpipe::t;
///
/// let list: (i32, (u32, ())) = t![1i32, 2u32];
/// assert_eq!((list.1).0, 2);
/// ```
#[macro_export]
macro_rules! t {
    [] => [()];
    [$head:expr $(, $t:expr)* $(,)?] => [($head, $crate::t!($($t,)*))];
}
