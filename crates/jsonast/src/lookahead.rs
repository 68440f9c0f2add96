//! Token lookahead buffer.
//!
//! The parser decides which production to apply by peeking at upcoming tokens
//! before consuming any of them. [`Lookahead`] keeps the tokens it has already
//! pulled from its [`TokenSource`] in a FIFO queue and pulls more on demand, so
//! a peek of any distance costs at most that many scanner calls.

use std::collections::VecDeque;

use crate::error::Result;
use crate::token::Token;

/// Anything that yields tokens one at a time, ending with a
/// [`TokenKind::End`](crate::token::TokenKind::End) token.
pub trait TokenSource {
    /// The next token, or the terminator once the source is exhausted.
    fn next_token(&mut self) -> Result<Token>;
}

/// Prepared tokens replayed in order.
///
/// Once they run out the terminator sits at the last token's position.
#[derive(Debug)]
pub struct TokenList {
    tokens: std::vec::IntoIter<Token>,
    last_position: usize,
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            last_position: 0,
        }
    }
}

impl TokenSource for TokenList {
    fn next_token(&mut self) -> Result<Token> {
        match self.tokens.next() {
            Some(token) => {
                self.last_position = token.position;
                Ok(token)
            }
            None => Ok(Token::end(self.last_position)),
        }
    }
}

/// FIFO buffer of tokens pulled ahead of the parser.
pub struct Lookahead<T> {
    source: T,
    queue: VecDeque<Token>,
    exhausted: bool,
    /// The source's terminator once `exhausted` is set.
    end: Token,
}

impl<T: TokenSource> Lookahead<T> {
    /// An empty buffer over `source`.
    pub fn new(source: T) -> Self {
        Self {
            source,
            queue: VecDeque::new(),
            exhausted: false,
            end: Token::end(0),
        }
    }

    /// The token `count` positions ahead of the cursor, without consuming it.
    ///
    /// Returns the terminator once the source is exhausted.
    ///
    /// # Panics
    ///
    /// Panics when `count` is zero.
    pub fn peek(&mut self, count: usize) -> Result<&Token> {
        assert!(count >= 1, "peek distance must be at least 1");
        self.fill(count)?;
        if count <= self.queue.len() {
            return Ok(&self.queue[count - 1]);
        }
        Ok(&self.end)
    }

    /// Consume `count` tokens and return the last one consumed.
    ///
    /// Consuming zero tokens, or consuming past the end, yields the terminator.
    pub fn take(&mut self, count: usize) -> Result<Token> {
        self.fill(count)?;
        let mut last = None;
        for _ in 0..count {
            match self.queue.pop_front() {
                Some(token) => last = Some(token),
                None => return Ok(self.end.clone()),
            }
        }
        Ok(last.unwrap_or_else(|| self.end.clone()))
    }

    /// Consume `count` tokens, discarding them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(drop)
    }

    /// Pull from the source until `count` tokens are queued or it runs dry.
    fn fill(&mut self, count: usize) -> Result<()> {
        while self.queue.len() < count && !self.exhausted {
            let token = self.source.next_token()?;
            if token.is_end() {
                self.exhausted = true;
                self.end = token;
            } else {
                self.queue.push_back(token);
            }
        }
        Ok(())
    }
}
