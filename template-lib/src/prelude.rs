//! Common aliases and constants.

pub type Pii = (i32, i32);
pub type Pll = (i64, i64);
pub type Vi = Vec<i32>;
pub type Vll = Vec<i64>;

pub const MOD: u64 = 1_000_000_007;
pub const MOD998: u64 = 998_244_353;

/// Large enough to add two of them without overflow.
pub const INF: i32 = 0x3f3f_3f3f;
pub const LLINF: i64 = 0x3f3f_3f3f_3f3f_3f3f;

pub const PI: f64 = std::f64::consts::PI;
pub const EPS: f64 = 1e-9;
