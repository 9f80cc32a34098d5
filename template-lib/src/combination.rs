use crate::prelude::MOD;

/// Factorials and inverse factorials modulo `MOD`.
pub struct Combination {
    fac: Vec<u64>,
    inv: Vec<u64>,
    finv: Vec<u64>,
}

impl Combination {
    /// Precomputes tables for `0..=n`.
    pub fn new(n: usize) -> Self {
        let size = n.max(1) + 1;
        let mut fac = vec![1; size];
        let mut inv = vec![1; size];
        let mut finv = vec![1; size];
        for i in 2..size {
            let k = i as u64;
            fac[i] = fac[i - 1] * k % MOD;
            inv[i] = MOD - MOD / k * inv[(MOD % k) as usize] % MOD;
            finv[i] = finv[i - 1] * inv[i] % MOD;
        }
        Combination { fac, inv, finv }
    }

    fn check(&self, n: usize) {
        assert!(
            n < self.fac.len(),
            "{} exceeds combination table of size {}",
            n,
            self.fac.len() - 1
        );
    }

    pub fn fact(&self, n: usize) -> u64 {
        self.check(n);
        self.fac[n]
    }

    pub fn inv_fact(&self, n: usize) -> u64 {
        self.check(n);
        self.finv[n]
    }

    /// Modular inverse of `n` (`1 <= n`).
    pub fn inv(&self, n: usize) -> u64 {
        self.check(n);
        self.inv[n]
    }

    /// n choose k.
    pub fn c(&self, n: usize, k: usize) -> u64 {
        if n < k {
            return 0;
        }
        self.check(n);
        self.fac[n] * self.finv[k] % MOD * self.finv[n - k] % MOD
    }

    /// Ordered selections of `k` out of `n`.
    pub fn p(&self, n: usize, k: usize) -> u64 {
        if n < k {
            return 0;
        }
        self.check(n);
        self.fac[n] * self.finv[n - k] % MOD
    }

    /// Multisets of size `k` drawn from `n` kinds.
    pub fn h(&self, n: usize, k: usize) -> u64 {
        if n == 0 {
            return if k == 0 { 1 } else { 0 };
        }
        self.c(n + k - 1, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        let comb = Combination::new(10);
        assert_eq!(comb.c(5, 2), 10);
        assert_eq!(comb.c(10, 0), 1);
        assert_eq!(comb.c(10, 10), 1);
        assert_eq!(comb.c(3, 4), 0);
        assert_eq!(comb.p(5, 2), 20);
        assert_eq!(comb.h(3, 2), 6);
        assert_eq!(comb.h(0, 0), 1);
        assert_eq!(comb.fact(10), 3_628_800);
    }

    #[test]
    fn test_inverses() {
        let comb = Combination::new(1000);
        for i in 1..=1000 {
            assert_eq!(comb.inv(i) * i as u64 % MOD, 1);
            assert_eq!(comb.fact(i) * comb.inv_fact(i) % MOD, 1);
        }
    }

    #[test]
    fn test_pascal() {
        let comb = Combination::new(200);
        for n in 1..=200 {
            for k in 1..n {
                assert_eq!(comb.c(n, k), (comb.c(n - 1, k - 1) + comb.c(n - 1, k)) % MOD);
            }
        }
    }

    #[test]
    fn test_empty_table() {
        let comb = Combination::new(0);
        assert_eq!(comb.c(0, 0), 1);
        assert_eq!(comb.fact(0), 1);
    }

    #[test]
    #[should_panic(expected = "exceeds combination table")]
    fn test_out_of_table() {
        Combination::new(4).c(5, 1);
    }
}
