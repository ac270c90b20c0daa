use std::fmt::{Debug, Display};
use std::num::ParseFloatError;
use std::str::FromStr;

use num_traits::Float;

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Both implementations
/// render through [`Display`], which produces the shortest decimal text that parses back to the
/// bit-identical value, so persisted trees reload without precision loss.
pub trait Coordinate:
    private::Sealed
    + Float
    + FromStr<Err = ParseFloatError>
    + Display
    + Debug
    + Default
    + Send
    + Sync
{
    /// Human-readable name of the scalar type, used in log events.
    const TYPE_NAME: &'static str;
}

impl Coordinate for f32 {
    const TYPE_NAME: &'static str = "f32";
}

impl Coordinate for f64 {
    const TYPE_NAME: &'static str = "f64";
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
