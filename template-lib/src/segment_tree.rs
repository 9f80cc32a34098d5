use crate::monoid::Monoid;

/// Point update, range fold. Node `k` has children `2k+1` and `2k+2`.
pub struct SegmentTree<T> {
    data: Vec<T>,
    n: usize,
}

impl<T: Monoid + Clone> SegmentTree<T> {
    pub fn new(len: usize) -> Self {
        let mut n = 1;
        while n < len {
            n *= 2;
        }
        SegmentTree {
            data: vec![T::empty(); 2 * n - 1],
            n,
        }
    }

    pub fn from_vec(values: Vec<T>) -> Self {
        let mut tree = SegmentTree::new(values.len());
        let n = tree.n;
        for (i, value) in values.into_iter().enumerate() {
            tree.data[i + n - 1] = value;
        }
        for k in (0..n - 1).rev() {
            tree.data[k] = tree.data[2 * k + 1].append(&tree.data[2 * k + 2]);
        }
        tree
    }

    /// Number of leaves, a power of two.
    pub fn capacity(&self) -> usize {
        self.n
    }

    pub fn get(&self, k: usize) -> &T {
        assert!(k < self.n);
        &self.data[k + self.n - 1]
    }

    pub fn update(&mut self, k: usize, value: T) {
        assert!(k < self.n, "index {} out of {}", k, self.n);
        let mut k = k + self.n - 1;
        self.data[k] = value;
        while k > 0 {
            k = (k - 1) / 2;
            self.data[k] = self.data[k * 2 + 1].append(&self.data[k * 2 + 2]);
        }
    }

    /// Folds `a..b`.
    pub fn query(&self, a: usize, b: usize) -> T {
        self.query_node(a, b, 0, 0, self.n)
    }

    fn query_node(&self, a: usize, b: usize, k: usize, l: usize, r: usize) -> T {
        if r <= a || b <= l {
            return T::empty();
        }
        if a <= l && r <= b {
            return self.data[k].clone();
        }
        let m = (l + r) / 2;
        let vl = self.query_node(a, b, k * 2 + 1, l, m);
        let vr = self.query_node(a, b, k * 2 + 2, m, r);
        vl.append(&vr)
    }
}
