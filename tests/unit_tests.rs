//! Integration tests for the Reef front end using the `reef` facade.
//!
//! Complete programs under `test_scripts/` must parse without diagnostics;
//! the remaining tests pin down precedence and error recovery on small
//! inputs.

use reef::ast::{Expr, LangProgram, Visibility};
use reef::{parse, parse_expression, parse_strict, significant, tokenize, Bump, ParseErrors, ParserErrorKind, TokenKind};
use std::path::PathBuf;

/// Load a test script from the test_scripts directory.
fn load_script(filename: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_scripts")
        .join(filename);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Parse a script and require a clean result.
fn parse_script<'ast>(filename: &str, arena: &'ast Bump) -> LangProgram<'ast> {
    let source = load_script(filename);
    match parse_strict(&source, arena) {
        Ok(program) => program,
        Err(errors) => {
            let rendered: Vec<String> = errors.iter().map(|e| e.display_with_source(&source)).collect();
            panic!("{} failed to parse:\n{}", filename, rendered.join("\n"));
        }
    }
}

fn kinds(errors: &ParseErrors<'_>) -> Vec<ParserErrorKind> {
    errors.iter().map(|e| e.kind).collect()
}

fn render(source: &str) -> String {
    let arena = Bump::new();
    let (expr, errors) = parse_expression(source, &arena);
    assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, kinds(&errors));
    expr.map(|e| e.to_string()).unwrap_or_default()
}

// =============================================================================
// Scripts
// =============================================================================

#[test]
fn test_hello_world() {
    let arena = Bump::new();
    let program = parse_script("hello_world.reef", &arena);
    let main = program.function("Main").expect("Main is declared");
    assert_eq!(main.visibility, Visibility::Public);
    assert_eq!(main.body.expressions.len(), 2);
    assert_eq!(program.expressions.len(), 1);
}

#[test]
fn test_expressions() {
    let arena = Bump::new();
    let program = parse_script("expressions.reef", &arena);
    assert_eq!(program.functions.len(), 4);

    let generics = program.function("Generics").expect("Generics is declared");
    let tail = generics.body.expressions.last().map(|e| e.to_string());
    assert_eq!(tail.as_deref(), Some("todo!"));
}

#[test]
fn test_control_flow() {
    let arena = Bump::new();
    let program = parse_script("control_flow.reef", &arena);
    assert_eq!(program.functions.len(), 3);
    assert_eq!(program.expressions.len(), 1);

    let nested = program.function("Nested").expect("Nested is declared");
    assert_eq!(nested.body.functions.len(), 1);
    assert_eq!(nested.body.functions[0].name(), "Helper");

    let looping = program.function("Loop").expect("Loop is declared");
    assert!(looping.body.expressions.iter().any(|e| matches!(e, Expr::While(_))));
}

#[test]
fn test_classes() {
    let arena = Bump::new();
    let program = parse_script("classes.reef", &arena);
    assert_eq!(program.classes.len(), 2);

    let counter = program.class("Counter").expect("Counter is declared");
    assert_eq!(counter.type_parameters.len(), 1);
    assert_eq!(counter.fields.len(), 3);
    assert_eq!(counter.functions.len(), 3);
    assert!(counter.fields[0].is_mutable);
    assert!(counter.fields[2].is_static);

    let pair = program.class("Pair").expect("Pair is declared");
    assert_eq!(pair.type_parameters.len(), 2);

    let apply = program.function("Apply").expect("Apply is declared");
    assert_eq!(apply.parameters.len(), 2);
    assert!(apply.parameters[1].is_mutable);
    assert_eq!(apply.return_type.map(|t| t.to_string()).as_deref(), Some("(int, bool)"));
}

#[test]
fn test_unions() {
    let arena = Bump::new();
    let program = parse_script("unions.reef", &arena);
    assert_eq!(program.unions.len(), 2);

    let option = program.union("Option").expect("Option is declared");
    assert_eq!(option.variants.len(), 2);
    assert_eq!(option.functions.len(), 1);

    let shape = program.union("Shape").expect("Shape is declared");
    let names: Vec<_> = shape.variants.iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["Circle", "Rectangle", "Empty"]);

    assert_eq!(program.expressions.len(), 2);
}

#[test]
fn test_declaration_ids_are_unique() {
    let arena = Bump::new();
    let program = parse_script("classes.reef", &arena);

    let mut ids = Vec::new();
    for class in program.classes {
        ids.push(class.id);
        ids.extend(class.functions.iter().map(|f| f.id));
    }
    ids.extend(program.functions.iter().map(|f| f.id));

    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn test_parse_is_deterministic() {
    let source = load_script("unions.reef");
    let first_arena = Bump::new();
    let second_arena = Bump::new();

    let (first, first_errors) = parse(&source, &first_arena);
    let (second, second_errors) = parse(&source, &second_arena);

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(kinds(&first_errors), kinds(&second_errors));
}

#[test]
fn test_truncated_scripts_never_panic() {
    for filename in ["classes.reef", "unions.reef", "control_flow.reef"] {
        let source = load_script(filename);
        for (end, _) in source.char_indices().step_by(7) {
            let arena = Bump::new();
            let _ = parse(&source[..end], &arena);
        }
    }
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(render("a + b * c"), "(+ a (* b c))");
    assert_eq!(render("a - b - c"), "(- (- a b) c)");
    assert_eq!(render("-a * b"), "(* (- a) b)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(render("a = b = c"), "(= a (= b c))");
}

#[test]
fn test_logical_precedence() {
    assert_eq!(render("a || b && c"), "(|| a (&& b c))");
    assert_eq!(render("a == b && c < d"), "(&& (== a b) (< c d))");
}

#[test]
fn test_postfix_binds_tightest() {
    assert_eq!(render("!a.b"), "(! (. a b))");
    assert_eq!(render("a.b(c)"), "(call (. a b) c)");
    assert_eq!(render("a??"), "(? (? a))");
}

#[test]
fn test_matches_inside_logic() {
    assert_eq!(render("a matches B && c matches D"), "(&& (matches a B) (matches c D))");
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn test_missing_semicolon_between_statements() {
    let arena = Bump::new();
    let (program, errors) = parse("a b", &arena);

    assert_eq!(program.expressions.len(), 2);
    assert_eq!(kinds(&errors), vec![ParserErrorKind::ExpectedToken]);
    assert_eq!(errors.errors()[0].expected, vec![TokenKind::Semicolon]);
    assert_eq!(errors.errors()[0].found.map(|t| t.lexeme), Some("b"));
}

#[test]
fn test_block_tail_needs_no_semicolon() {
    let arena = Bump::new();
    let (program, errors) = parse("{var a = 1}", &arena);

    assert!(errors.is_empty());
    let Some(Expr::Block(block)) = program.expressions.first() else {
        panic!("expected a block");
    };
    assert_eq!(block.expressions.len(), 1);
}

#[test]
fn test_trailing_type_parameter_comma() {
    let arena = Bump::new();
    let (program, errors) = parse("union A<T1, T2,> { B(T1), C(T2) }", &arena);

    assert!(errors.is_empty());
    assert_eq!(program.unions[0].type_parameters.len(), 2);
}

#[test]
fn test_doubled_type_parameter_comma() {
    let arena = Bump::new();
    let (program, errors) = parse("union A<T,,T2> {}", &arena);

    assert_eq!(kinds(&errors), vec![ParserErrorKind::ExpectedToken]);
    assert_eq!(errors.errors()[0].found.map(|t| t.kind), Some(TokenKind::Comma));
    assert_eq!(program.unions[0].type_parameters.len(), 2);
}

#[test]
fn test_operator_without_right_operand() {
    let arena = Bump::new();
    let (_, errors) = parse_expression("a * var", &arena);
    assert_eq!(
        kinds(&errors),
        vec![ParserErrorKind::ExpectedExpression, ParserErrorKind::ExpectedToken]
    );
    assert_eq!(errors.errors()[0].found.map(|t| t.lexeme), Some("var"));
    assert!(errors.errors()[1].at_end_of_input());
}

#[test]
fn test_invalid_token_is_reported() {
    let arena = Bump::new();
    let (_, errors) = parse("a $ b", &arena);
    assert_eq!(errors.errors()[0].kind, ParserErrorKind::InvalidToken);
}

#[test]
fn test_modifier_recovery() {
    let arena = Bump::new();

    let (program, errors) = parse("mut fn A() {}", &arena);
    assert_eq!(kinds(&errors), vec![ParserErrorKind::UnexpectedModifier]);
    assert_eq!(errors.errors()[0].expected, vec![TokenKind::Pub, TokenKind::Static]);
    assert_eq!(program.functions.len(), 1);

    let (_, errors) = parse("pub pub fn A() {}", &arena);
    assert_eq!(kinds(&errors), vec![ParserErrorKind::DuplicateModifier]);

    let (program, errors) = parse("static class A {}", &arena);
    assert_eq!(kinds(&errors), vec![ParserErrorKind::UnexpectedModifier]);
    assert_eq!(program.classes.len(), 1);

    let (program, errors) = parse("pub a;", &arena);
    assert_eq!(kinds(&errors), vec![ParserErrorKind::UnexpectedModifier]);
    assert_eq!(program.expressions.len(), 1);
}

#[test]
fn test_dangling_modifiers_at_end_of_input() {
    let arena = Bump::new();
    let (_, errors) = parse("pub static", &arena);

    assert_eq!(kinds(&errors), vec![ParserErrorKind::ExpectedToken]);
    assert!(errors.errors()[0].at_end_of_input());
    assert_eq!(
        errors.errors()[0].expected,
        vec![TokenKind::Fn, TokenKind::Class, TokenKind::Union]
    );
}

#[test]
fn test_recovery_table() {
    use ParserErrorKind::*;
    use TokenKind::*;

    type Expected = &'static [(ParserErrorKind, Option<&'static str>, &'static [TokenKind])];

    let cases: &[(&str, Expected)] = &[
        // Scope
        ("var ", &[(ExpectedToken, None, &[Identifier, Mut])]),
        ("var ;", &[(ExpectedToken, Some(";"), &[Identifier])]),
        ("var a = ", &[(ExpectedExpression, None, &[])]),
        ("var a = ;", &[(ExpectedExpression, Some(";"), &[])]),
        ("var a: = 2;", &[(ExpectedType, Some("="), &[])]),
        ("{", &[(ExpectedTokenOrExpression, None, &[Pub, Static, Fn, RightBrace])]),
        (",", &[(ExpectedTokenOrExpression, Some(","), &[Pub, Static, Fn, Class, Union])]),
        ("a;,b", &[(ExpectedTokenOrExpression, Some(","), &[Pub, Static, Fn, Class, Union])]),
        ("{a", &[(ExpectedToken, None, &[RightBrace, Semicolon])]),
        ("var a = 2;pub", &[(ExpectedToken, None, &[Static, Fn, Class, Union])]),
        ("mut static fn MyFn() {}", &[(UnexpectedModifier, Some("mut"), &[Pub, Static])]),
        (
            "mut static class MyClass {}",
            &[(UnexpectedModifier, Some("mut"), &[Pub]), (UnexpectedModifier, Some("static"), &[Pub])],
        ),
        // Tails
        ("a b; c; d e", &[(ExpectedToken, Some("b"), &[Semicolon]), (ExpectedToken, Some("e"), &[Semicolon])]),
        ("return 1 b", &[(ExpectedToken, Some("b"), &[Semicolon])]),
        ("{return 1 b}", &[(ExpectedToken, Some("b"), &[Semicolon])]),
        ("if (a) {} b", &[]),
        // Operators
        ("*", &[(ExpectedExpression, Some("*"), &[])]),
        ("a *", &[(ExpectedExpression, None, &[])]),
        ("a * var b = 2", &[]),
        ("a * ;var b = 2", &[(ExpectedExpression, Some(";"), &[])]),
        ("a * var", &[(ExpectedExpression, Some("var"), &[]), (ExpectedToken, None, &[Identifier, Mut])]),
        ("!", &[(ExpectedExpression, None, &[])]),
        ("a;!", &[(ExpectedExpression, None, &[])]),
        ("!;var a = 2;", &[(ExpectedExpression, Some(";"), &[])]),
        ("?", &[(ExpectedExpression, Some("?"), &[])]),
        ("? a;", &[(ExpectedExpression, Some("?"), &[]), (ExpectedToken, Some("a"), &[Semicolon])]),
        // Member and static access
        ("a.", &[(ExpectedToken, None, &[Identifier])]),
        ("::", &[(ExpectedExpression, Some("::"), &[])]),
        ("int::", &[(ExpectedToken, None, &[Identifier])]),
        // Type arguments
        ("A::<", &[(ExpectedTypeOrToken, None, &[Greater])]),
        ("A::<int", &[(ExpectedToken, None, &[Comma, Greater])]),
        ("A::<>", &[]),
        ("::<", &[(ExpectedTokenOrExpression, Some("::<"), &[Pub, Static, Fn, Class, Union])]),
        ("1::<", &[(ExpectedTokenOrExpression, Some("::<"), &[Pub, Static, Fn, Class, Union])]),
        ("(1)::<", &[(ExpectedTokenOrExpression, Some("::<"), &[Pub, Static, Fn, Class, Union])]),
        // Declarations
        ("fn", &[(ExpectedToken, None, &[Identifier])]),
        ("fn MyFn", &[(ExpectedToken, None, &[LeftParen, Less])]),
        ("fn MyFn(a: int)", &[(ExpectedToken, None, &[LeftBrace, Colon])]),
        ("fn MyFn(a: int):", &[(ExpectedType, None, &[])]),
        ("class ;", &[(ExpectedToken, Some(";"), &[Identifier])]),
        ("union MyUnion", &[(ExpectedToken, None, &[LeftBrace, Less])]),
        ("union MyUnion<T>", &[(ExpectedToken, None, &[LeftBrace])]),
        ("class MyClass<,> {}", &[(ExpectedToken, Some(","), &[Identifier, Greater])]),
        ("union MyUnion<T,,T2> {}", &[(ExpectedToken, Some(","), &[Identifier, Greater])]),
        // Member lists
        ("class MyClass { field}", &[(ExpectedToken, Some("}"), &[Identifier])]),
        ("class MyClass { field MyField}", &[(ExpectedToken, Some("}"), &[Colon])]),
        ("class MyClass { field MyField:}", &[(ExpectedType, Some("}"), &[])]),
        ("class MyClass { field, field MyField: int }", &[(ExpectedToken, Some(","), &[Identifier])]),
        ("class A { pub } fn B() {}", &[(ExpectedToken, Some("}"), &[Fn, Field])]),
        // Patterns
        ("matches", &[(ExpectedExpression, Some("matches"), &[])]),
        ("a matches", &[(ExpectedPattern, None, &[])]),
        ("a matches;", &[(ExpectedPattern, Some(";"), &[])]),
        ("a matches A::", &[(ExpectedToken, None, &[Identifier])]),
        ("a matches A {_, _}", &[(ExpectedToken, Some(","), &[RightBrace])]),
    ];

    for (source, expected) in cases {
        let arena = Bump::new();
        let (_, errors) = parse(source, &arena);
        let actual: Vec<_> = errors
            .iter()
            .map(|e| (e.kind, e.found.map(|t| t.lexeme.to_string()), e.expected.clone()))
            .collect();
        let expected: Vec<_> = expected
            .iter()
            .map(|(kind, found, kinds)| (*kind, found.map(str::to_string), kinds.to_vec()))
            .collect();
        assert_eq!(actual, expected, "errors for {:?}", source);
    }
}

// =============================================================================
// Lexer
// =============================================================================

#[test]
fn test_tokenize_keeps_comments() {
    let arena = Bump::new();
    let tokens: Vec<_> = tokenize("var a = 1; // one", &arena).map(|t| t.kind).collect();
    assert_eq!(
        tokens,
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Equal,
            TokenKind::IntLiteral,
            TokenKind::Semicolon,
            TokenKind::LineComment,
        ]
    );
}

#[test]
fn test_tokenize_positions() {
    let arena = Bump::new();
    let tokens: Vec<_> = significant(tokenize("a\n  /* c */ b", &arena)).collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!((tokens[1].span.line, tokens[1].span.col), (2, 11));
}
