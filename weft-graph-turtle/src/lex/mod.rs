//! Turtle-family lexer module.
//!
//! Tokenizes Turtle, TriG, N-Triples and N-Quads input using winnow. The
//! four syntaxes share one token alphabet, so a single lexer covers all of
//! them.

pub mod chars;
pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
