//! Byte-level scanner producing token occurrences with original-buffer spans.

use macroveil_core::token::{SourceSpan, TokenKind, TokenOccurrence};
use macroveil_utils::errors::LocateError;
use tracing::debug;

/// Keywords that put the scanner into declaration context: the next plain
/// identifier is a declared name.
const TYPE_KEYWORDS: &[&str] = &[
    "int", "char", "bool", "short", "long", "float", "double", "void", "signed", "unsigned",
    "auto", "wchar_t",
];

/// Qualifiers that may appear inside a declarator without ending declaration
/// context.
const QUALIFIER_KEYWORDS: &[&str] = &[
    "const", "volatile", "static", "extern", "inline", "constexpr", "register", "mutable",
    "virtual", "friend",
];

/// Keywords introducing a user-defined type name; the name itself is a type,
/// not a variable or function, and is never aliased.
const TYPE_INTRO_KEYWORDS: &[&str] = &["struct", "class", "union", "enum"];

/// Remaining reserved words (plus `NULL`, which the preprocessor owns). None
/// of these are nameable.
const OTHER_KEYWORDS: &[&str] = &[
    "if", "else", "while", "do", "for", "switch", "case", "default", "break", "continue",
    "return", "goto", "sizeof", "new", "delete", "this", "namespace", "using", "typedef",
    "template", "typename", "public", "private", "protected", "true", "false", "nullptr", "try",
    "catch", "throw", "static_cast", "dynamic_cast", "const_cast", "reinterpret_cast", "NULL",
];

/// Characters an `operator` name may continue with.
const OPERATOR_SYMBOL_BYTES: &[u8] = b"+-*/%^&|~!<>=";

/// Scans one translation unit and returns every candidate token occurrence,
/// in source order.
///
/// All occurrences are yielded, primary or not; eligibility filtering is the
/// classifier's job. Fails without partial output when the unit cannot be
/// tokenized.
pub fn scan(source: &str) -> Result<Vec<TokenOccurrence>, LocateError> {
    let mut scanner = Scanner::new(source);
    scanner.run()?;
    debug!(
        bytes = source.len(),
        occurrences = scanner.out.len(),
        "scan complete"
    );
    Ok(scanner.out)
}

struct Scanner<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    /// Current file is the translation unit's own file.
    primary: bool,
    /// File named by the first linemarker, if any.
    primary_file: Option<String>,
    /// A type name was just seen; the next plain identifier declares something.
    decl_ctx: bool,
    /// The previous token was `.` or `->`; the next identifier is a member
    /// name, not a free reference.
    member_access: bool,
    /// The previous token was `struct`/`class`/`union`/`enum`.
    type_intro: bool,
    /// At the beginning of a line (modulo whitespace); directives are only
    /// recognized here.
    bol: bool,
    out: Vec<TokenOccurrence>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            text: source,
            pos: 0,
            primary: true,
            primary_file: None,
            decl_ctx: false,
            member_access: false,
            type_intro: false,
            bol: true,
            out: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), LocateError> {
        while self.pos < self.src.len() {
            let b = self.src[self.pos];
            match b {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.bol = true;
                }
                b'/' if self.peek(1) == Some(b'/') => self.skip_line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.skip_block_comment()?,
                b'#' if self.bol => self.directive()?,
                b'"' => self.string_literal()?,
                b'\'' => self.char_literal()?,
                b'0'..=b'9' => self.number()?,
                _ if is_ident_start(b) => self.identifier()?,
                b'.' => {
                    self.pos += 1;
                    self.bol = false;
                    self.decl_ctx = false;
                    self.member_access = true;
                }
                b'-' if self.peek(1) == Some(b'>') => {
                    self.pos += 2;
                    self.bol = false;
                    self.decl_ctx = false;
                    self.member_access = true;
                }
                b':' if self.peek(1) == Some(b':') => {
                    // Qualifier separator; the qualified name that follows is
                    // still a reference-site.
                    self.pos += 2;
                    self.bol = false;
                    self.member_access = false;
                }
                b'*' | b'&' => {
                    // Pointer/reference declarators sit between a type and the
                    // declared name; declaration context survives them.
                    self.pos += 1;
                    self.bol = false;
                    self.member_access = false;
                }
                _ => {
                    self.pos += 1;
                    self.bol = false;
                    self.decl_ctx = false;
                    self.member_access = false;
                }
            }
        }
        Ok(())
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.pos + ahead).copied()
    }

    fn skip_line_comment(&mut self) {
        while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LocateError> {
        let start = self.pos;
        self.pos += 2;
        while self.pos < self.src.len() {
            if self.src[self.pos] == b'*' && self.peek(1) == Some(b'/') {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(LocateError::UnterminatedComment(start))
    }

    /// Handles a preprocessor line. Linemarkers (`# <line> "<file>" ...`)
    /// switch the current-file state; every other directive is skipped
    /// outright, honoring backslash continuations.
    fn directive(&mut self) -> Result<(), LocateError> {
        let hash = self.pos;
        self.pos += 1;
        while matches!(self.peek(0), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
        if self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
            while self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
            while matches!(self.peek(0), Some(b' ') | Some(b'\t')) {
                self.pos += 1;
            }
            if self.peek(0) == Some(b'"') {
                self.pos += 1;
                let name_start = self.pos;
                loop {
                    match self.peek(0) {
                        None | Some(b'\n') => {
                            return Err(LocateError::MalformedLinemarker(hash));
                        }
                        Some(b'"') => break,
                        _ => self.pos += 1,
                    }
                }
                let name = self.text[name_start..self.pos].to_string();
                self.pos += 1;
                match &self.primary_file {
                    None => {
                        self.primary_file = Some(name);
                        self.primary = true;
                    }
                    Some(primary) => self.primary = *primary == name,
                }
            }
        }
        self.skip_directive_tail();
        Ok(())
    }

    fn skip_directive_tail(&mut self) {
        loop {
            match self.peek(0) {
                None => return,
                Some(b'\n') => {
                    // A backslash immediately before the newline continues the
                    // directive onto the next line.
                    if self.pos > 0 && self.src[self.pos - 1] == b'\\' {
                        self.pos += 1;
                    } else {
                        self.pos += 1;
                        self.bol = true;
                        return;
                    }
                }
                _ => self.pos += 1,
            }
        }
    }

    fn string_literal(&mut self) -> Result<(), LocateError> {
        let start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        loop {
            match self.peek(0) {
                None | Some(b'\n') => return Err(LocateError::UnterminatedString(start)),
                Some(b'\\') => {
                    if self.peek(1).is_none() {
                        return Err(LocateError::UnterminatedString(start));
                    }
                    self.pos += 2;
                }
                Some(b'"') => break,
                _ => self.pos += 1,
            }
        }
        // Content is kept raw (escapes uncooked) so the rewritten buffer
        // round-trips byte-for-byte.
        let content = self.text[content_start..self.pos].to_string();
        self.pos += 1;
        self.out.push(TokenOccurrence {
            kind: TokenKind::Str,
            lexeme: content,
            span: SourceSpan::new(start, self.pos - start),
            primary: self.primary,
        });
        self.bol = false;
        self.decl_ctx = false;
        self.member_access = false;
        Ok(())
    }

    /// Character literals are lexed so their content cannot be mistaken for
    /// other tokens, but they are not nameable and yield nothing.
    fn char_literal(&mut self) -> Result<(), LocateError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some(b'\n') => return Err(LocateError::UnterminatedChar(start)),
                Some(b'\\') => {
                    if self.peek(1).is_none() {
                        return Err(LocateError::UnterminatedChar(start));
                    }
                    self.pos += 2;
                }
                Some(b'\'') => {
                    self.pos += 1;
                    break;
                }
                _ => self.pos += 1,
            }
        }
        self.bol = false;
        self.decl_ctx = false;
        self.member_access = false;
        Ok(())
    }

    /// Lexes a pp-number. Integer literals are yielded with their full token
    /// span (radix prefix and suffix included); floating-point literals are
    /// consumed and dropped, since only integers are nameable.
    fn number(&mut self) -> Result<(), LocateError> {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' {
                // Exponent signs belong to the number: 1e+5, 0x1p-3. In hex
                // literals `e` is a digit, so only `p` starts an exponent.
                self.pos += 1;
                let hex = self.text[start..self.pos].starts_with("0x")
                    || self.text[start..self.pos].starts_with("0X");
                let exponent = if hex {
                    matches!(b, b'p' | b'P')
                } else {
                    matches!(b, b'e' | b'E')
                };
                if exponent && matches!(self.peek(0), Some(b'+') | Some(b'-')) {
                    self.pos += 1;
                }
            } else if b == b'\'' && self.peek(1).is_some_and(|n| n.is_ascii_alphanumeric()) {
                // C++14 digit separator.
                self.pos += 2;
            } else {
                break;
            }
        }
        let raw = &self.text[start..self.pos];
        self.bol = false;
        self.decl_ctx = false;
        self.member_access = false;

        if is_float_literal(raw) {
            return Ok(());
        }
        if !is_valid_integer(raw) {
            return Err(LocateError::MalformedInteger {
                offset: start,
                raw: raw.to_string(),
            });
        }
        self.out.push(TokenOccurrence {
            kind: TokenKind::Integer,
            lexeme: raw.to_string(),
            span: SourceSpan::new(start, self.pos - start),
            primary: self.primary,
        });
        Ok(())
    }

    fn identifier(&mut self) -> Result<(), LocateError> {
        let start = self.pos;
        while self.peek(0).is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let lexeme = &self.text[start..self.pos];
        self.bol = false;

        if self.member_access {
            // Member names mirror the original front end, which never yields
            // member expressions as reference-sites.
            self.member_access = false;
            self.decl_ctx = false;
            return Ok(());
        }

        if self.type_intro {
            // The name after struct/class/union/enum is a type; whatever
            // follows it may be a declared variable.
            self.type_intro = false;
            self.decl_ctx = true;
            return Ok(());
        }

        if lexeme == "operator" {
            if let Some(op) = self.operator_suffix() {
                return Ok(self.push_operator(start, op));
            }
            // `operator new` and friends: the keyword after it is skipped on
            // its own.
            self.decl_ctx = false;
            return Ok(());
        }

        if TYPE_KEYWORDS.contains(&lexeme) {
            self.decl_ctx = true;
            return Ok(());
        }
        if QUALIFIER_KEYWORDS.contains(&lexeme) {
            return Ok(());
        }
        if TYPE_INTRO_KEYWORDS.contains(&lexeme) {
            self.type_intro = true;
            self.decl_ctx = false;
            return Ok(());
        }
        if OTHER_KEYWORDS.contains(&lexeme) {
            self.decl_ctx = false;
            return Ok(());
        }

        let next = self.next_significant(self.pos);
        // `name::` is a namespace or class qualifier, not a reference-site.
        if next.is_some_and(|at| self.src[at] == b':' && self.src.get(at + 1) == Some(&b':')) {
            self.decl_ctx = false;
            return Ok(());
        }
        // An identifier directly followed by another identifier sits in type
        // position: `MyClass obj` declares obj, and MyClass itself is not
        // nameable.
        if !self.decl_ctx && next.is_some_and(|at| is_ident_start(self.src[at])) {
            self.decl_ctx = true;
            return Ok(());
        }

        let kind = if self.decl_ctx {
            TokenKind::Declaration
        } else {
            TokenKind::Reference
        };
        self.out.push(TokenOccurrence {
            kind,
            lexeme: lexeme.to_string(),
            span: SourceSpan::new(start, self.pos - start),
            primary: self.primary,
        });
        self.decl_ctx = false;
        Ok(())
    }

    /// Consumes the symbol part of an `operator` name immediately following
    /// the keyword: `()`, `[]`, or a run of operator characters.
    fn operator_suffix(&mut self) -> Option<SourceSpan> {
        let sym_start = self.pos;
        match self.peek(0) {
            Some(b'(') if self.peek(1) == Some(b')') => self.pos += 2,
            Some(b'[') if self.peek(1) == Some(b']') => self.pos += 2,
            Some(b) if OPERATOR_SYMBOL_BYTES.contains(&b) => {
                while self.peek(0).is_some_and(|b| OPERATOR_SYMBOL_BYTES.contains(&b)) {
                    self.pos += 1;
                }
            }
            _ => return None,
        }
        Some(SourceSpan::new(sym_start, self.pos - sym_start))
    }

    fn push_operator(&mut self, name_start: usize, symbol: SourceSpan) {
        let lexeme = self.text[name_start..symbol.end()].to_string();
        let kind = if self.decl_ctx {
            TokenKind::Declaration
        } else {
            TokenKind::Reference
        };
        // A declaration's span covers the whole name, matching its verbatim
        // key. A reference files under the bare symbol, so only the symbol
        // bytes are rewritten and the `operator` prefix text survives.
        let span = match kind {
            TokenKind::Declaration => SourceSpan::new(name_start, symbol.end() - name_start),
            _ => symbol,
        };
        self.out.push(TokenOccurrence {
            kind,
            lexeme,
            span,
            primary: self.primary,
        });
        self.decl_ctx = false;
    }

    /// Position of the next significant byte at or after `at`, looking
    /// through whitespace and comments without consuming anything.
    fn next_significant(&self, mut at: usize) -> Option<usize> {
        while at < self.src.len() {
            match self.src[at] {
                b' ' | b'\t' | b'\r' | b'\n' => at += 1,
                b'/' if self.src.get(at + 1) == Some(&b'/') => {
                    while at < self.src.len() && self.src[at] != b'\n' {
                        at += 1;
                    }
                }
                b'/' if self.src.get(at + 1) == Some(&b'*') => {
                    at += 2;
                    loop {
                        if at >= self.src.len() {
                            return None;
                        }
                        if self.src[at] == b'*' && self.src.get(at + 1) == Some(&b'/') {
                            at += 2;
                            break;
                        }
                        at += 1;
                    }
                }
                _ => return Some(at),
            }
        }
        None
    }
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

const fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_float_literal(raw: &str) -> bool {
    if raw.contains('.') {
        return true;
    }
    let hex = raw.starts_with("0x") || raw.starts_with("0X");
    if hex {
        raw.contains('p') || raw.contains('P')
    } else {
        raw.contains('e') || raw.contains('E')
    }
}

fn is_valid_integer(raw: &str) -> bool {
    let cleaned: String = raw.chars().filter(|&c| c != '\'').collect();
    let trimmed = cleaned.trim_end_matches(['u', 'U', 'l', 'L', 'z', 'Z']);
    let (radix, digits) = if let Some(rest) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        (16u32, rest)
    } else if let Some(rest) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
        (2, rest)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        (8, &trimmed[1..])
    } else {
        (10, trimmed)
    };
    !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix))
}
