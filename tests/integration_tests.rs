//! Integration tests for the front end.
//!
//! These tests drive the public API end to end: source text through the
//! lexer and parser, canonical rendering, and error diagnostics.

use arkham::{
    format_error, lexer::lexer::tokenize, parse, Expr, Lexer, Node, Parser, Program, Stmt,
    TokenKind,
};

fn parse_clean(source: &str) -> Program {
    let (program, errors) = parse(source, None);
    assert!(errors.is_empty(), "errors for {:?}: {:?}", source, errors);
    program
}

fn expressions(program: &Program) -> Vec<&Expr> {
    program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(stmt) => &stmt.expression,
            Stmt::Let(stmt) => &stmt.value,
            Stmt::Return(stmt) => &stmt.return_value,
            Stmt::Block(_) => panic!("blocks do not appear at the top level"),
        })
        .collect()
}

#[test]
fn test_let_statement_end_to_end() {
    let mut parser = Parser::new(Lexer::new("let x = 5;"));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.len(), 1);

    match &program.statements[0] {
        Stmt::Let(stmt) => {
            assert_eq!(stmt.name.value, "x");
            assert!(matches!(&stmt.value, Expr::Integer(int) if int.value == 5));
        }
        other => panic!("expected let statement, got {:?}", other),
    }
}

#[test]
fn test_whole_program() {
    let source = "
        let five = 5;
        let ten = 10;
        let add = fn(x, y) {
            x + y;
        };
        let result = add(five, ten);
        if (result > 10) {
            return true;
        } else {
            return false;
        }
    ";

    let program = parse_clean(source);

    assert_eq!(program.len(), 5);
    assert_eq!(
        program.to_string(),
        "let five = 5;let ten = 10;let add = fn(x, y) { (x + y); };\
         let result = add(five, ten);\
         if ((result > 10)) { return true; } else { return false; }"
    );
    assert_eq!(program.token_literal(), "let");
}

#[test]
fn test_precedence_rendering() {
    let cases = [
        ("a + b * c", "(a + (b * c))"),
        ("-a * b", "((-a) * b)"),
        ("a + b + c", "((a + b) + c)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_clean(source).to_string(), expected);
    }
}

#[test]
fn test_canonical_rendering_round_trips() {
    let sources = [
        "a + b * c + d / e - f",
        "-a * b",
        "!-a",
        "a - -b",
        "!(true == false)",
        "5 > 4 == 3 < 4",
        "(5 + 5) * 2",
        "add(1, 2 * 3, 4 + 5)",
        "a + add(b * c) + d",
        "make()(1)(2, 3)",
        "fn(x, y) { x + y; }",
        "fn() { }",
        "fn(x) { let y = x * 2; return y; }(3)",
        "fn(a) { a; b; c }",
        "if (x) { y }",
        "if (x < y) { x } else { y }",
        "if (a) { if (b) { c } else { d } }",
        "let compose = fn(f, g) { fn(x) { g(f(x)) } }",
        "return -(-5)",
    ];

    for source in sources {
        let first = parse_clean(source);

        for expr in expressions(&first) {
            let rendered = expr.to_string();
            let second = parse_clean(&rendered);
            let reparsed = expressions(&second);

            assert_eq!(reparsed.len(), 1, "{:?} rendered as {:?}", source, rendered);
            assert_eq!(reparsed[0].to_string(), rendered, "{:?}", source);
        }
    }
}

#[test]
fn test_errors_do_not_abort_parsing() {
    let (program, errors) = parse("let x 5; let y = 10; let = 3; y", None);

    assert!(!errors.is_empty());
    assert!(program.statements.iter().any(|stmt| stmt.to_string() == "let y = 10;"));
    assert_eq!(program.statements.last().map(|s| s.to_string()), Some("y".to_string()));
}

#[test]
fn test_format_error_for_parse_failure() {
    let source = "let a = 1;\n  let x 5;";
    let (_, errors) = parse(source, Some("main.ark".to_string()));

    assert_eq!(errors.len(), 1);
    let rendered = format_error(&errors[0], source);

    assert_eq!(
        rendered,
        "Error: UnexpectedToken (expected next token to be Assignment, got Int instead)\n\
         -> main.ark\n  \
         |\n\
         2 | let x 5;\n  \
         | ------^"
    );
}

#[test]
fn test_format_error_for_illegal_character() {
    let source = "let x = $;";
    let (_, errors) = parse(source, None);

    assert_eq!(errors.len(), 1);
    let rendered = format_error(&errors[0], source);

    assert!(rendered.starts_with("Error: UnrecognisedToken\n-> shell\n"));
    assert!(rendered.ends_with("1 | let x = $;\n  | --------^"));
}

#[test]
fn test_tokenize_matches_next_token() {
    let source = "let add = fn(a, b) { a + b }; add(1, 2) != 3";
    let tokens = tokenize(source, None);

    let mut lexer = Lexer::new(source);
    for token in &tokens {
        let next = lexer.next_token();
        assert_eq!(next.kind, token.kind);
        assert_eq!(next.value, token.value);
    }

    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);

    // Every token's value is the exact source text it spans
    for token in &tokens {
        let start = token.span.start.0 as usize;
        let end = token.span.end.0 as usize;
        assert_eq!(&source[start..end], token.value);
    }
}
