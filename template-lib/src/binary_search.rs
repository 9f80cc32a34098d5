/// First index whose element is not less than `x`.
pub fn lower_bound<T: Ord>(a: &[T], x: &T) -> usize {
    a.partition_point(|v| v < x)
}

/// First index whose element is greater than `x`.
pub fn upper_bound<T: Ord>(a: &[T], x: &T) -> usize {
    a.partition_point(|v| v <= x)
}
