//! Edge case tests for rulex-lex

#[cfg(test)]
mod tests {
    use crate::{Rule, Scanner, Token, TokenId};
    use rulex_util::Position;

    fn scan_all(source: &str) -> Vec<Token> {
        Scanner::new(source.as_bytes())
            .map(|t| t.unwrap())
            .collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_single_char() {
        let t = scan_all("x");
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].position, Position::START);
    }

    #[test]
    fn test_edge_unterminated_string() {
        let t = scan_all("\"open");
        assert_eq!(t[0].id, TokenId::OTHER);
        assert_eq!(t[0].literal, "\"");
        assert_eq!(t[1].literal, "open");
    }

    #[test]
    fn test_edge_empty_string_literal() {
        let t = scan_all("\"\"");
        assert_eq!(t[0].id, TokenId::STRING);
        assert_eq!(t[0].capture(0), Some(""));
    }

    #[test]
    fn test_edge_multiline_string() {
        let t = scan_all("\"a\nb\" c");
        assert_eq!(t[0].id, TokenId::STRING);
        assert_eq!(t[0].end_position(), Position::new(1, 2));
        assert_eq!(t[1].position, Position::new(1, 3));
    }

    #[test]
    fn test_edge_crlf_line_endings() {
        let t = scan_all("a\r\nb\r\n");
        assert_eq!(t.len(), 2);
        assert_eq!(t[1].position, Position::new(1, 0));
    }

    #[test]
    fn test_edge_unicode_columns_count_chars() {
        let t = scan_all("é日 x");
        assert_eq!(t[0].literal, "é");
        assert_eq!(t[1].literal, "日");
        assert_eq!(t[2].position, Position::new(0, 3));
    }

    #[test]
    fn test_edge_invalid_utf8_becomes_replacement() {
        let bytes: &[u8] = &[b'a', b' ', 0xC3, b' ', b'b'];
        let t: Vec<Token> = Scanner::new(bytes).map(|t| t.unwrap()).collect();
        assert_eq!(t[1].literal, "\u{FFFD}");
        assert_eq!(t[2].position, Position::new(0, 4));
    }

    #[test]
    fn test_edge_digits_then_ident() {
        let t = scan_all("123abc");
        assert_eq!(t[0].id, TokenId::NUMBER);
        assert_eq!(t[1].id, TokenId::IDENT);
        assert_eq!(t[1].position, Position::new(0, 3));
    }

    #[test]
    fn test_edge_no_rules() {
        let mut scanner = Scanner::new("abc".as_bytes()).with_rules(Vec::new());
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.literal(), Some("abc"));
    }

    #[test]
    fn test_edge_no_rules_whitespace_only() {
        let mut scanner = Scanner::new("   ".as_bytes()).with_rules(Vec::new());
        assert!(scanner.next_token().unwrap().is_none());
    }

    #[test]
    fn test_edge_catch_all_first_shadows_rest() {
        let rules = vec![
            Rule::new(TokenId(1), "(?s).").unwrap(),
            Rule::new(TokenId(2), "[0-9]+").unwrap(),
        ];
        let ids: Vec<_> = Scanner::new("42".as_bytes())
            .with_rules(rules)
            .map(|t| t.unwrap().id)
            .collect();
        assert_eq!(ids, vec![TokenId(1), TokenId(1)]);
    }

    #[test]
    fn test_edge_unknown_token_stops_at_whitespace() {
        let rules = vec![Rule::new(TokenId(1), "[a-z]+").unwrap()];
        let mut scanner = Scanner::new("#$% abc".as_bytes()).with_rules(rules);
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.literal(), Some("#$%"));
    }

    #[test]
    fn test_edge_unknown_multibyte() {
        let rules = vec![Rule::new(TokenId(1), "[a-z]+").unwrap()];
        let mut scanner = Scanner::new("ab日本cd".as_bytes()).with_rules(rules);
        scanner.next_token().unwrap();
        let err = scanner.next_token().unwrap_err();
        assert_eq!(err.literal(), Some("日本"));
        assert_eq!(err.position(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_edge_last_line_before_any_scan() {
        let mut scanner = Scanner::new("one\ntwo".as_bytes());
        assert_eq!(scanner.last_line(), "");
        scanner.peek().unwrap();
        assert_eq!(scanner.last_line(), "one");
    }

    #[test]
    fn test_edge_last_line_at_end() {
        let mut scanner = Scanner::new("one\ntwo\n".as_bytes());
        while scanner.next_token().unwrap().is_some() {}
        assert_eq!(scanner.last_line(), "");
        assert_eq!(scanner.position(), Position::new(1, 0));
    }

    #[test]
    fn test_edge_long_token_stream() {
        let source = "a1 ".repeat(2000);
        let t = scan_all(&source);
        assert_eq!(t.len(), 2000);
        assert_eq!(t[1999].position, Position::new(0, 5997));
    }
}
