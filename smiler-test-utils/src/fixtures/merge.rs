//! Recursive override merging.
//!
//! Every fixture has a matching overrides type with the same shape where each field is an
//! `Option`. Leaf fields are replaced when the override is present; nested structures have
//! nested overrides types and merge recursively, so siblings the override does not mention
//! keep their generated values.

use chrono::NaiveDateTime;

/// Apply a partial override onto a value in place.
pub trait Merge {
    type Overrides;

    fn merge(&mut self, overrides: Self::Overrides);
}

macro_rules! replace_on_merge {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Merge for $ty {
                type Overrides = $ty;

                fn merge(&mut self, overrides: Self::Overrides) {
                    *self = overrides;
                }
            }
        )*
    };
}

replace_on_merge!(String, bool, i32, i64, u32, u64, f64, NaiveDateTime);

/// Merge `overrides` into `target` if present, otherwise leave `target` untouched.
pub fn merge_field<T: Merge>(target: &mut T, overrides: Option<T::Overrides>) {
    if let Some(overrides) = overrides {
        target.merge(overrides);
    }
}
