pub trait Monoid {
    fn empty() -> Self;
    fn append(&self, right: &Self) -> Self;
}

macro_rules! impl_sum_monoid {
    ($($t:ty),*) => {
        $(
            impl Monoid for $t {
                fn empty() -> Self {
                    0
                }

                fn append(&self, right: &Self) -> Self {
                    *self + *right
                }
            }
        )*
    };
}

impl_sum_monoid!(i32, i64, i128, u32, u64, usize);

/// Range minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Min(pub i64);

impl Monoid for Min {
    fn empty() -> Self {
        Min(i64::MAX)
    }

    fn append(&self, right: &Self) -> Self {
        Min(self.0.min(right.0))
    }
}

/// Range maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Max(pub i64);

impl Monoid for Max {
    fn empty() -> Self {
        Max(i64::MIN)
    }

    fn append(&self, right: &Self) -> Self {
        Max(self.0.max(right.0))
    }
}
