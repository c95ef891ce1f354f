//! Source lexer.
//!
//! Single left-to-right scan with two states, normal and comment. Commas
//! and newlines are significant (operand and instruction separators) and
//! are emitted as standalone tokens; spaces only flush the pending word;
//! `#` swallows everything up to the next newline. Every other character
//! accumulates into the current word, numbers included: numeric
//! recognition happens in the parser.

/// Lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Atomic lexeme.
    Word(String),
    /// Operand separator.
    Comma,
    /// Instruction terminator.
    Newline,
}

/// Tokenize source text.
///
/// # Arguments
///
/// * `source` - Source text.
///
/// # Returns
///
/// * Token sequence.
///
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_comment = false;

    for character in source.chars() {
        if in_comment && character != '\n' {
            continue;
        }
        in_comment = false;

        match character {
            ',' => {
                flush(&mut tokens, &mut current);
                tokens.push(Token::Comma);
            }
            '\n' => {
                flush(&mut tokens, &mut current);
                tokens.push(Token::Newline);
            }
            ' ' => {
                flush(&mut tokens, &mut current);
            }
            '#' => {
                flush(&mut tokens, &mut current);
                in_comment = true;
            }
            _ => current.push(character),
        }
    }

    // A last word without a trailing newline still counts.
    flush(&mut tokens, &mut current);

    tokens
}

fn flush(tokens: &mut Vec<Token>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(Token::Word(std::mem::take(current)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: &str) -> Token {
        Token::Word(value.to_string())
    }

    #[test]
    fn test_tokenize_instruction() {
        assert_eq!(
            tokenize("DRW v0, v1, 5\n"),
            vec![
                word("DRW"),
                word("v0"),
                Token::Comma,
                word("v1"),
                Token::Comma,
                word("5"),
                Token::Newline,
            ]
        );
    }

    #[test]
    fn test_tokenize_comments() {
        assert_eq!(
            tokenize("JP 512 # jump to start\nCLS\n"),
            vec![
                word("JP"),
                word("512"),
                Token::Newline,
                word("CLS"),
                Token::Newline,
            ]
        );

        // A full-line comment only leaves its newline.
        assert_eq!(tokenize("# nothing here\n"), vec![Token::Newline]);
    }

    #[test]
    fn test_tokenize_flushes_last_word() {
        assert_eq!(tokenize("RET"), vec![word("RET")]);
    }

    #[test]
    fn test_tokenize_squeezes_spaces() {
        assert_eq!(
            tokenize("SE  v0 ,  7\n"),
            vec![
                word("SE"),
                word("v0"),
                Token::Comma,
                word("7"),
                Token::Newline,
            ]
        );
    }
}
