//! Run-length folding of repeated consecutive words.
//!
//! A run of `n >= MIN_RUN_LENGTH` identical words is written as two tokens,
//! the decimal count followed by the word. Shorter runs are written out
//! literally since the count token would not pay for itself.

/// Shortest run that is folded into a `count word` pair.
pub const MIN_RUN_LENGTH: usize = 4;

/// Accumulates words and emits the folded token stream.
#[derive(Debug)]
pub(crate) struct RunLengthEncoder<'a> {
    tokens: Vec<String>,
    last: Option<&'a str>,
    count: usize,
}

impl<'a> RunLengthEncoder<'a> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
            last: None,
            count: 0,
        }
    }

    pub(crate) fn push(&mut self, word: &'a str) {
        if self.last == Some(word) {
            self.count += 1;
            return;
        }

        self.flush();
        self.last = Some(word);
        self.count = 1;
    }

    fn flush(&mut self) {
        let Some(word) = self.last else {
            return;
        };

        if self.count >= MIN_RUN_LENGTH {
            self.tokens.push(self.count.to_string());
            self.tokens.push(word.to_string());
        } else {
            self.tokens
                .extend(std::iter::repeat_n(word, self.count).map(str::to_string));
        }
    }

    pub(crate) fn finish(mut self) -> Vec<String> {
        self.flush();
        self.tokens
    }
}

/// A token of an encoded stream, resolved against a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Run<'a> {
    /// `count` repetitions of `word`
    Repeat { count: u64, word: &'a str },
    /// One literal word
    Single(&'a str),
}

/// Groups whitespace-separated tokens into runs.
///
/// A token that parses as a non-negative integer and is immediately followed
/// by a token satisfying `is_word` becomes a repeat count; every other token
/// stands for itself. Yields `(token_position, run)` pairs.
pub(crate) fn runs<'a, F>(tokens: &[&'a str], is_word: F) -> Vec<(usize, Run<'a>)>
where
    F: Fn(&str) -> bool,
{
    let mut runs = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        if let (Ok(count), Some(&next)) = (token.parse::<u64>(), tokens.get(i + 1))
            && is_word(next)
        {
            runs.push((i, Run::Repeat { count, word: next }));
            i += 2;
            continue;
        }

        runs.push((i, Run::Single(token)));
        i += 1;
    }

    runs
}
