//! Buffered output helpers.

pub fn stdout_writer() -> std::io::BufWriter<std::io::StdoutLock<'static>> {
    std::io::BufWriter::new(std::io::stdout().lock())
}

/// Writes an integer without going through `fmt`.
pub fn write_int<W: std::io::Write>(out: &mut W, x: i64) -> std::io::Result<()> {
    let mut digits = [0u8; 20];
    let mut i = digits.len();
    let mut n = x.unsigned_abs();
    loop {
        i -= 1;
        digits[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if x < 0 {
        i -= 1;
        digits[i] = b'-';
    }
    out.write_all(&digits[i..])
}

pub struct Joined<'a, T> {
    items: &'a [T],
    sep: &'a str,
}

/// Displays `items` separated by `sep`, e.g. `writeln!(out, "{}", join(&v, " "))`.
pub fn join<'a, T>(items: &'a [T], sep: &'a str) -> Joined<'a, T> {
    Joined { items, sep }
}

impl<'a, T: std::fmt::Display> std::fmt::Display for Joined<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(self.sep)?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
