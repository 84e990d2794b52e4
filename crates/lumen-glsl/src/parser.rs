use crate::error::DeclError;
use crate::lexer::{Lexer, Token, TokenWithPos};
use crate::signature::{Declaration, Family, TypePattern};
use crate::types::ShaderType;

// ── Parser ────────────────────────────────────────────────────────────────

pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current_col(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.col)
            .unwrap_or(1)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens.get(self.pos)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, msg: impl Into<String>) -> DeclError {
        DeclError::new(msg, self.current_col())
    }

    fn expect_ident(&mut self) -> Result<String, DeclError> {
        let col = self.current_col();
        match self.advance() {
            Token::Ident(s) => Ok(s),
            tok => Err(DeclError::new(format!("expected identifier, got {:?}", tok), col)),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<(), DeclError> {
        let col = self.current_col();
        let got = self.advance();
        if &got == expected {
            Ok(())
        } else {
            Err(DeclError::new(format!("expected {:?}, got {:?}", expected, got), col))
        }
    }

    // ── Declaration ───────────────────────────────────────────────────────

    /// `type name ( [type {, type}] )`
    pub fn parse_declaration(&mut self) -> Result<Declaration, DeclError> {
        let ret = self.parse_type()?;
        let name = self.expect_ident()?;
        self.expect_token(&Token::LParen)?;

        let mut params = Vec::new();
        if self.peek() != &Token::RParen {
            loop {
                let param = self.parse_type()?;
                if param == TypePattern::Concrete(ShaderType::Void) {
                    return Err(self.err("parameters cannot be void"));
                }
                params.push(param);
                match self.peek() {
                    Token::Comma => { self.advance(); }
                    _ => break,
                }
            }
        }

        self.expect_token(&Token::RParen)?;
        if self.peek() != &Token::Eof {
            return Err(self.err(format!("trailing {:?} after declaration", self.peek())));
        }

        Ok(Declaration { ret, name, params })
    }

    // ── Type ──────────────────────────────────────────────────────────────

    fn parse_type(&mut self) -> Result<TypePattern, DeclError> {
        let col = self.current_col();
        let word = self.expect_ident()?;
        if let Some(family) = Family::parse(&word) {
            return Ok(TypePattern::Generic(family));
        }
        ShaderType::parse(&word)
            .map(TypePattern::Concrete)
            .ok_or_else(|| DeclError::new(format!("unknown type {:?}", word), col))
    }
}

// ── Public parse entry point ──────────────────────────────────────────────

/// Parse one builtin declaration such as `"genType mix(genType, genType, float)"`.
pub fn parse_declaration(src: &str) -> Result<Declaration, DeclError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_declaration()
}
