//! Modular exponentiation and integer utilities.

/// `a^b mod m` by repeated squaring.
pub fn power(a: u64, mut b: u64, m: u64) -> u64 {
    let mul = |x: u64, y: u64| (x as u128 * y as u128 % m as u128) as u64;
    let mut a = a % m;
    let mut res = 1 % m;
    while b > 0 {
        if b & 1 == 1 {
            res = mul(res, a);
        }
        a = mul(a, a);
        b >>= 1;
    }
    res
}

pub trait Integer:
    Copy
    + PartialEq
    + std::ops::Rem<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Mul<Output = Self>
{
    fn zero() -> Self;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Integer for $t {
                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

impl_integer!(i32, i64, i128, isize, u32, u64, u128, usize);

/// Euclid's algorithm. The sign of the result follows `%` for negative input.
pub fn gcd<T: Integer>(a: T, b: T) -> T {
    if b == T::zero() {
        a
    } else {
        gcd(b, a % b)
    }
}

pub fn lcm<T: Integer>(a: T, b: T) -> T {
    if a == T::zero() || b == T::zero() {
        return T::zero();
    }
    a / gcd(a, b) * b
}

/// Returns `(g, x, y)` such that `a * x + b * y == g == gcd(a, b)`.
pub fn ext_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = ext_gcd(b, a % b);
        (g, y, x - a / b * y)
    }
}

/// Inverse of `a` modulo `m`, if `a` and `m` are coprime.
pub fn inv_mod(a: i64, m: i64) -> Option<i64> {
    let (g, x, _) = ext_gcd(a.rem_euclid(m), m);
    if g != 1 {
        return None;
    }
    Some(x.rem_euclid(m))
}
