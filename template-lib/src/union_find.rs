//! Disjoint-set union with path compression and union by size.

/// Roots hold `-size`, other nodes hold their parent.
pub struct UnionFind {
    d: Vec<isize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind { d: vec![-1; n] }
    }

    pub fn len(&self) -> usize {
        self.d.len()
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.d[root] >= 0 {
            root = self.d[root] as usize;
        }

        let mut x = x;
        while x != root {
            let parent = self.d[x] as usize;
            self.d[x] = root as isize;
            x = parent;
        }
        root
    }

    /// Merges the sets of `x` and `y`. Returns `false` if already merged.
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let (mut x, mut y) = (self.find(x), self.find(y));
        if x == y {
            return false;
        }
        if self.d[x] > self.d[y] {
            std::mem::swap(&mut x, &mut y);
        }
        self.d[x] += self.d[y];
        self.d[y] = x as isize;
        true
    }

    pub fn same(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    pub fn size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        (-self.d[root]) as usize
    }

    /// Members of every set, in order of their smallest element.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut index = vec![usize::MAX; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for x in 0..n {
            let root = self.find(x);
            if index[root] == usize::MAX {
                index[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[index[root]].push(x);
        }
        groups
    }
}
