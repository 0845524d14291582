use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use salsa::{DatabaseImpl, Setter};
use sharpen_errors::ErrorCode;
use sharpen_inputs::File;
use sharpen_syntax::SyntaxKind::{self, *};
use sharpen_syntax::{ParseOptions, RemoveOptions, SyntaxNode, TokenFilter};
use text_size::TextRange;

use crate::{
    FileParse, parse_argument_list, parse_compilation_unit, parse_expression,
    parse_leading_trivia, parse_member_declaration, parse_parameter_list, parse_statement,
    parse_syntax_tree, parse_token, parse_tokens, parse_trailing_trivia, parse_type_name,
};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "cs" {
                    let expected = path.with_extension("errors");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn parse() {
    let options = ParseOptions::default();

    for case in TestCase::list() {
        let tree = parse_syntax_tree(&case.text, &options, "test.cs");
        assert_eq!(tree.root().to_full_string(), case.text, "{}", case.input.display());

        let actual = tree.diagnostics().iter().map(|d| format!("{d}\n")).collect::<String>();
        expect_file![&case.expected].assert_eq(&actual);
    }
}

#[test]
fn parse_through_database() {
    let db = DatabaseImpl::new();
    let file = File::from_text(&db, "Program.cs", "class C { void M() { } }");
    let tree = file.parse(&db);

    assert_eq!(tree.path().as_str(), "Program.cs");
    assert!(tree.diagnostics().is_empty());
    let class = tree.root().children().next().unwrap();
    assert_eq!(class.kind(), CLASS_DECLARATION);
}

#[test]
fn renamed_file_reparses_with_new_path() {
    let mut db = DatabaseImpl::new();
    let file = File::from_text(&db, "Old.cs", "class C { }");
    assert_eq!(file.parse(&db).path().as_str(), "Old.cs");

    file.set_path(&mut db).to("New.cs".into());
    let tree = file.parse(&db);
    assert_eq!(tree.path().as_str(), "New.cs");
    assert_eq!(tree.line_span(TextRange::empty(0.into())).path, "New.cs");
    assert_eq!(tree.text(), "class C { }");
}

fn options() -> ParseOptions {
    ParseOptions::default()
}

fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.ancestors().map(|ancestor| ancestor.kind()).collect()
}

#[test]
fn nested_parentheses_ancestors() {
    let root = parse_expression("a + (b - (c * (d / e)))", &options());
    let e = root.descendant_tokens().find(|token| token.text() == "e").unwrap();
    let name = e.parent().unwrap().clone();
    assert_eq!(name.kind(), IDENTIFIER_NAME);

    assert_eq!(
        kinds(&name),
        [
            DIVIDE_EXPRESSION,
            PARENTHESIZED_EXPRESSION,
            MULTIPLY_EXPRESSION,
            PARENTHESIZED_EXPRESSION,
            SUBTRACT_EXPRESSION,
            PARENTHESIZED_EXPRESSION,
            ADD_EXPRESSION,
        ]
    );
}

#[test]
fn multiplication_binds_tighter() {
    let root = parse_expression("a + b * c", &options());
    assert_eq!(root.kind(), ADD_EXPRESSION);
    let rhs = root.children().nth(1).unwrap();
    assert_eq!(rhs.kind(), MULTIPLY_EXPRESSION);
    assert_eq!(rhs.to_string(), "b * c");
}

#[test]
fn lowercase_ell_is_only_reported_in_a_tree() {
    let token = parse_token("1l", &options());
    assert_eq!(token.kind(), NUMERIC_LITERAL);
    assert!(token.diagnostics().is_empty());

    let expression = parse_expression("1l", &options());
    let diagnostics = expression.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code(), ErrorCode::LowercaseEllSuffix);
    assert_eq!(diagnostics[0].range(), TextRange::new(0.into(), 2.into()));
}

#[test]
fn find_token_inside_directive_trivia() {
    let root = parse_compilation_unit("class\n #if XX\n#endif\n foo { }", &options());
    let position = 9.into();

    let outside = root.find_token(position, false).unwrap();
    assert_eq!(outside.kind(), IDENTIFIER);
    assert_eq!(outside.text(), "foo");

    let inside = root.find_token(position, true).unwrap();
    assert_eq!(inside.kind(), IF_KW);
    assert!(inside.is_part_of_structured_trivia());
}

#[test]
fn remove_argument_keeping_exterior_trivia() {
    let root = parse_expression("m(a, b, /* trivia */ c)", &options());
    let b = root
        .descendant_nodes()
        .find(|node| node.kind() == ARGUMENT && node.to_string() == "b")
        .unwrap();
    let removed = root
        .remove_node(&b, RemoveOptions::KEEP_EXTERIOR_TRIVIA)
        .unwrap()
        .unwrap();
    assert_eq!(removed.to_full_string(), "m(a , /* trivia */ c)");
}

#[test]
fn missing_semicolon_is_inserted() {
    let root = parse_statement("x = 1", &options());
    assert_eq!(root.kind(), EXPRESSION_STATEMENT);
    assert_eq!(root.to_full_string(), "x = 1");

    let semicolon = root.last_token_with(TokenFilter::DEFAULT.with_zero_width()).unwrap();
    assert_eq!(semicolon.kind(), SEMICOLON);
    assert!(semicolon.is_missing());

    let diagnostics = root.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].to_string(), "error CS1002: ; expected at 5..5");
}

#[test]
fn empty_expression_is_a_missing_name() {
    let root = parse_expression("", &options());
    assert_eq!(root.kind(), IDENTIFIER_NAME);
    assert!(root.is_missing());
    assert_eq!(root.diagnostics().len(), 1);
}

#[test]
fn leftover_fragment_text_becomes_trivia() {
    let root = parse_expression("a b", &options());
    assert_eq!(root.kind(), IDENTIFIER_NAME);
    assert_eq!(root.to_full_string(), "a b");
    assert!(root.contains_skipped_text());
    assert_eq!(root.diagnostics()[0].code(), ErrorCode::SyntaxError);
}

#[test]
fn statements() {
    let cases = [
        ("{ }", BLOCK),
        (";", EMPTY_STATEMENT),
        ("int x = 1;", LOCAL_DECLARATION_STATEMENT),
        ("if (a) b(); else c();", IF_STATEMENT),
        ("while (true) { }", WHILE_STATEMENT),
        ("for (int i = 0; i < 10; i++) { }", FOR_STATEMENT),
        ("foreach (var item in items) { }", FOREACH_STATEMENT),
        ("return;", RETURN_STATEMENT),
        ("throw e;", THROW_STATEMENT),
        ("break;", BREAK_STATEMENT),
        ("try { } finally { }", TRY_STATEMENT),
        ("f(x);", EXPRESSION_STATEMENT),
    ];
    for (text, kind) in cases {
        let root = parse_statement(text, &options());
        assert_eq!(root.kind(), kind, "{text}");
        assert_eq!(root.to_full_string(), text);
        assert!(root.diagnostics().is_empty(), "{text}: {:?}", root.diagnostics());
    }
}

#[test]
fn member_declarations() {
    let cases = [
        ("int x;", FIELD_DECLARATION),
        ("public void M() { }", METHOD_DECLARATION),
        ("public int P { get; set; }", PROPERTY_DECLARATION),
        ("public int this[int i] => i;", INDEXER_DECLARATION),
        ("C() { }", CONSTRUCTOR_DECLARATION),
        ("class C { }", CLASS_DECLARATION),
        ("enum E { A, B = 2 }", ENUM_DECLARATION),
        ("delegate void D(int x);", DELEGATE_DECLARATION),
        ("event Action E;", EVENT_FIELD_DECLARATION),
    ];
    for (text, kind) in cases {
        let root = parse_member_declaration(text, &options()).unwrap();
        assert_eq!(root.kind(), kind, "{text}");
        assert_eq!(root.to_full_string(), text);
        assert!(root.diagnostics().is_empty(), "{text}: {:?}", root.diagnostics());
    }

    assert!(parse_member_declaration("+", &options()).is_none());
}

#[test]
fn property_without_body_gets_missing_accessors() {
    let root = parse_member_declaration("int P;", &options()).unwrap();
    assert_eq!(root.kind(), FIELD_DECLARATION);

    let root = parse_member_declaration("int I.P", &options()).unwrap();
    assert_eq!(root.kind(), PROPERTY_DECLARATION);
    let accessors = root.children().find(|child| child.kind() == ACCESSOR_LIST).unwrap();
    assert!(accessors.is_missing());
    assert_eq!(root.diagnostics()[0].code(), ErrorCode::LbraceExpected);
}

#[test]
fn types_and_lists() {
    let ty = parse_type_name("Dictionary<string, List<int>>", &options());
    assert_eq!(ty.kind(), GENERIC_NAME);
    assert!(ty.diagnostics().is_empty());

    let nullable = parse_type_name("int?[]", &options());
    assert_eq!(nullable.kind(), ARRAY_TYPE);

    let arguments = parse_argument_list("(a, ref b, name: c)", &options());
    assert_eq!(arguments.kind(), ARGUMENT_LIST);
    assert_eq!(arguments.children().filter(|node| node.kind() == ARGUMENT).count(), 3);

    let parameters = parse_parameter_list("(int a, string b = \"\")", &options());
    assert_eq!(parameters.kind(), PARAMETER_LIST);
    assert_eq!(parameters.children().filter(|node| node.kind() == PARAMETER).count(), 2);
}

#[test]
fn generic_call_versus_comparison() {
    let call = parse_expression("F<int>(x)", &options());
    assert_eq!(call.kind(), INVOCATION_EXPRESSION);
    assert_eq!(call.children().next().unwrap().kind(), GENERIC_NAME);

    let comparison = parse_expression("a < b", &options());
    assert_eq!(comparison.kind(), LESS_THAN_EXPRESSION);
}

#[test]
fn tokens_and_trivia() {
    let tokens = parse_tokens("a+ b", &options());
    let kinds = tokens.iter().map(|token| token.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [IDENTIFIER, PLUS, IDENTIFIER, END_OF_FILE]);

    let leading = parse_leading_trivia("  // note\nx", &options());
    let kinds = leading.iter().map(|trivia| trivia.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [WHITESPACE, SINGLE_LINE_COMMENT, END_OF_LINE]);

    let trailing = parse_trailing_trivia(" /* c */\n  x", &options());
    let text = trailing.iter().map(|trivia| trivia.to_full_string()).collect::<String>();
    assert_eq!(text, " /* c */\n");
}
