use crate::error::DeclError;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    LParen,
    RParen,
    Comma,
    Eof,
}

/// A token together with its 1-based starting column.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPos {
    pub token: Token,
    pub col: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

/// Tokenizer for single-line builtin declarations:
/// `vec3 cross(vec3, vec3)`.
pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    col: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, col: 1 }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithPos>, DeclError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let col = self.col;
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(TokenWithPos { token, col });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        self.col += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn next_token(&mut self) -> Result<Token, DeclError> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        match ch {
            '(' => { self.advance(); Ok(Token::LParen) }
            ')' => { self.advance(); Ok(Token::RParen) }
            ',' => { self.advance(); Ok(Token::Comma) }
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_ident()),
            other => Err(DeclError::new(format!("unexpected character {:?}", other), self.col)),
        }
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(self.src[start..self.pos].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn declaration_tokens() {
        assert_eq!(
            kinds("float dot(vec3, vec3)"),
            vec![
                Token::Ident("float".into()),
                Token::Ident("dot".into()),
                Token::LParen,
                Token::Ident("vec3".into()),
                Token::Comma,
                Token::Ident("vec3".into()),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn columns_are_one_based() {
        let toks = Lexer::new("  vec4 f()").tokenize().unwrap();
        assert_eq!(toks[0].col, 3);
        assert_eq!(toks[1].col, 8);
        assert_eq!(toks[2].col, 9);
    }

    #[test]
    fn rejects_stray_punctuation() {
        let err = Lexer::new("float f(float;)").tokenize().unwrap_err();
        assert_eq!(err.col, 14);
    }
}
