use crate::monoid::Monoid;

/// Binary indexed tree (Fenwick tree) over a commutative monoid.
pub struct BIT<T> {
    buf: Vec<T>,
}

impl<T: Monoid + Clone> BIT<T> {
    pub fn new(len: usize) -> Self {
        BIT {
            buf: vec![T::empty(); len + 1],
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add(&mut self, index: usize, value: &T) {
        assert!(index < self.len(), "index {} out of {}", index, self.len());
        let mut j = index + 1;
        while j <= self.len() {
            self.buf[j] = self.buf[j].append(value);
            j += rightmost_bit(j);
        }
    }

    /// Folds the first `right` elements.
    pub fn acc(&self, right: usize) -> T {
        let mut acc = T::empty();
        let mut j = right.min(self.len());
        while 0 < j {
            acc = acc.append(&self.buf[j]);
            j -= rightmost_bit(j);
        }
        acc
    }
}

impl<T: Monoid + Clone + std::ops::Sub<Output = T>> BIT<T> {
    /// Sum over `left..right`.
    pub fn sum(&self, left: usize, right: usize) -> T {
        if right <= left {
            return T::empty();
        }
        self.acc(right) - self.acc(left)
    }
}

fn rightmost_bit(n: usize) -> usize {
    n & n.wrapping_neg()
}
