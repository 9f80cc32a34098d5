//! Whitespace separated token reader.

pub struct Scanner {
    buf: Vec<u8>,
    pos: usize,
}

impl Scanner {
    /// Reads the whole input at once.
    pub fn new<R: std::io::Read>(mut reader: R) -> Self {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).unwrap();
        Scanner { buf, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    pub fn token(&mut self) -> Option<&str> {
        self.skip_whitespace();
        if self.pos == self.buf.len() {
            return None;
        }

        let start = self.pos;
        while self.pos < self.buf.len() && !self.buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let bytes = &self.buf[start..self.pos];
        match std::str::from_utf8(bytes) {
            Ok(token) => Some(token),
            Err(_) => panic!("invalid UTF-8 token {:?}", bytes),
        }
    }

    /// Parses the next token. Panics at end of input or on a malformed token.
    pub fn read<T: std::str::FromStr>(&mut self) -> T {
        let token = self.token().expect("unexpected end of input");
        match token.parse() {
            Ok(value) => value,
            Err(_) => panic!("failed to parse {:?}", token),
        }
    }

    pub fn vec<T: std::str::FromStr>(&mut self, n: usize) -> Vec<T> {
        (0..n).map(|_| self.read()).collect()
    }

    pub fn chars(&mut self) -> Vec<char> {
        self.read::<String>().chars().collect()
    }

    pub fn bytes(&mut self) -> Vec<u8> {
        self.read::<String>().into_bytes()
    }

    /// Reads an integer digit by digit, skipping anything before it.
    /// A `-` right before the first digit makes it negative.
    pub fn int(&mut self) -> i64 {
        let mut neg = false;
        while self.pos < self.buf.len() && !self.buf[self.pos].is_ascii_digit() {
            neg = self.buf[self.pos] == b'-';
            self.pos += 1;
        }
        assert!(self.pos < self.buf.len(), "unexpected end of input");

        let mut x: i64 = 0;
        while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_digit() {
            x = x * 10 + (self.buf[self.pos] - b'0') as i64;
            self.pos += 1;
        }
        if neg {
            -x
        } else {
            x
        }
    }
}
