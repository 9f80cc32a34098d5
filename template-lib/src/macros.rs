//! Debug printing and min/max assignment.

/// Prints `expr = value` to stderr. Silent in release builds.
#[macro_export]
macro_rules! debug {
    ($($x:expr),+ $(,)?) => {
        if cfg!(debug_assertions) {
            $(eprintln!("{} = {:?}", stringify!($x), $x);)+
        }
    };
}

/// Assigns `b` to `a` if `b < a`. Returns whether it did.
#[macro_export]
macro_rules! chmin {
    ($a:expr, $b:expr) => {{
        let b = $b;
        if b < $a {
            $a = b;
            true
        } else {
            false
        }
    }};
}

/// Assigns `b` to `a` if `b > a`. Returns whether it did.
#[macro_export]
macro_rules! chmax {
    ($a:expr, $b:expr) => {{
        let b = $b;
        if b > $a {
            $a = b;
            true
        } else {
            false
        }
    }};
}
