use std::fs;
use std::path::Path;

use expect_test::{Expect, expect};
use sharpen_parse::{parse_compilation_unit, parse_expression, parse_statement};
use sharpen_syntax::SyntaxKind::ARGUMENT_LIST;
use sharpen_syntax::{ParseOptions, SyntaxNode};

use crate::{NormalizeOptions, normalize_whitespace};

fn unix() -> NormalizeOptions {
    NormalizeOptions::default().with_end_of_line("\n")
}

fn normalize(root: &SyntaxNode, options: &NormalizeOptions) -> String {
    normalize_whitespace(root, options).unwrap().to_full_string()
}

/// Normalizes a whole file and checks that doing it again changes nothing.
fn check(text: &str, expect: Expect) {
    check_with(parse_compilation_unit, text, expect);
}

fn check_statement(text: &str, expect: Expect) {
    check_with(parse_statement, text, expect);
}

fn check_with(parse: fn(&str, &ParseOptions) -> SyntaxNode, text: &str, expect: Expect) {
    let options = ParseOptions::default();
    let actual = normalize(&parse(text, &options), &unix());
    expect.assert_eq(&format!("{actual}\n"));

    let again = normalize(&parse(&actual, &options), &unix());
    assert_eq!(again, actual, "normalizing twice changed the text");
}

fn expression(text: &str) -> String {
    normalize(&parse_expression(text, &ParseOptions::default()), &unix())
}

#[test]
fn block_with_custom_indentation() {
    let root = parse_statement("{a;}", &ParseOptions::default());
    let options = NormalizeOptions::default().with_indentation("  ").with_end_of_line("\n");
    assert_eq!(normalize(&root, &options), "{\n  a;\n}");
}

#[test]
fn braces_of_types_and_methods_expand() {
    let root = parse_compilation_unit("class C{void M(){}}", &ParseOptions::default());
    assert_eq!(normalize(&root, &unix()), "class C\n{\n    void M()\n    {\n    }\n}");
}

#[test]
fn default_line_ending_is_crlf() {
    let root = parse_statement("{a;}", &ParseOptions::default());
    assert_eq!(normalize(&root, &NormalizeOptions::default()), "{\r\n    a;\r\n}");
}

#[test]
fn original_node_is_untouched() {
    let root = parse_statement("if(a)b();", &ParseOptions::default());
    let normalized = normalize_whitespace(&root, &unix()).unwrap();
    assert_eq!(root.to_full_string(), "if(a)b();");
    assert_eq!(normalized.to_full_string(), "if (a)\n    b();");
}

#[test]
fn declarations() {
    check(
        "using System;using System.IO;\nnamespace Demo{class Point{int x;int y;public Point(int x,int y){this.x=x;this.y=y;}public int X{get{return x;}}public int Y{get;set;}}}",
        expect![[r#"
            using System;
            using System.IO;

            namespace Demo
            {
                class Point
                {
                    int x;
                    int y;

                    public Point(int x, int y)
                    {
                        this.x = x;
                        this.y = y;
                    }

                    public int X
                    {
                        get
                        {
                            return x;
                        }
                    }

                    public int Y { get; set; }
                }
            }
        "#]],
    );
}

#[test]
fn statements() {
    check(
        "class C{void M(){if(a)b();else if(c){d();}else e();for(int i=0;i<n;i++){}switch(x){case 1:f();break;default:break;}do{x++;}while(x<3);}}",
        expect![[r#"
            class C
            {
                void M()
                {
                    if (a)
                        b();
                    else if (c)
                    {
                        d();
                    }
                    else
                        e();
                    for (int i = 0; i < n; i++)
                    {
                    }
                    switch (x)
                    {
                        case 1:
                            f();
                            break;
                        default:
                            break;
                    }
                    do
                    {
                        x++;
                    } while (x < 3);
                }
            }
        "#]],
    );
}

#[test]
fn comments_and_directives_are_kept() {
    check(
        "class C {\n#region Fields\nint x;   // trailing\n#endregion\n}",
        expect![[r#"
            class C
            {
            #region Fields
                int x; // trailing
            #endregion
            }
        "#]],
    );
    check(
        "class C\n{\n/// <summary>Doc</summary>\nvoid M(){ /* empty */ }}",
        expect![[r#"
            class C
            {
                /// <summary>Doc</summary>
                void M()
                { /* empty */
                }
            }
        "#]],
    );
}

#[test]
fn object_initializers() {
    let root = parse_statement("var p=new Point{X=1,Y=2};", &ParseOptions::default());
    assert_eq!(normalize(&root, &unix()), "var p = new Point\n{\n    X = 1,\n    Y = 2\n};");

    let root = parse_statement("f(new Point{X=1});", &ParseOptions::default());
    let options = unix().with_single_line_context(ARGUMENT_LIST);
    assert_eq!(normalize(&root, &options), "f(new Point { X = 1 });");
}

#[test]
fn nested_statements_and_local_functions() {
    check_statement(
        "{int? x=a?b:c;int* p=&x;Func<int,int,int> add=(a,b)=>a+b;int Add(int a,int b)=>a+b;using(a)using(b)fixed(int* q=c)f();}",
        expect![[r#"
            {
                int? x = a ? b : c;
                int *p = &x;
                Func<int, int, int> add = (a, b) => a + b;
                int Add(int a, int b) => a + b;
                using (a)
                using (b)
                fixed (int *q = c)
                    f();
            }
        "#]],
    );
}

#[test]
fn blank_lines_around_multiline_members() {
    check(
        "class C{int A{get;set;}int B{get;set;}int P{get{return p;}}int Q;List<int> R=new List<int>{1,2};int S;}",
        expect![[r#"
            class C
            {
                int A { get; set; }
                int B { get; set; }

                int P
                {
                    get
                    {
                        return p;
                    }
                }

                int Q;

                List<int> R = new List<int>
                {
                    1,
                    2
                };

                int S;
            }
        "#]],
    );
}

#[test]
fn initializers_in_single_line_contexts() {
    check(
        "class C{[A(new[]{1,2})]void M(){}public C():base(new P{X=1}){}}",
        expect![[r#"
            class C
            {
                [A(new[] { 1, 2 })]
                void M()
                {
                }

                public C() : base(new P { X = 1 })
                {
                }
            }
        "#]],
    );
    check_statement(
        "var s=$\"{new P{X=1}}\";",
        expect![[r#"
            var s = $"{new P { X = 1 }}";
        "#]],
    );
}

#[test]
fn spacing_inside_lines() {
    let cases = [
        ("a+b*c", "a + b * c"),
        ("f( x,y )", "f(x, y)"),
        ("a?.b[ 1 ]", "a?.b[1]"),
        ("(int)-x", "(int)-x"),
        ("x- -y", "x - -y"),
        ("!done&&i++<n", "!done && i++ < n"),
        ("typeof( int )", "typeof(int)"),
        ("new int[ 3 ]", "new int[3]"),
        ("F<int>( x )", "F<int>(x)"),
        ("a..b", "a..b"),
        ("x=>x+1", "x => x + 1"),
        ("$\"a{ b }c\"", "$\"a{b}c\""),
        ("$\"{item,4:D2}\"", "$\"{item,4:D2}\""),
        ("a>>>b", "a >>> b"),
        ("x>>=1", "x >>= 1"),
        ("x>>>=n>>2", "x >>>= n >> 2"),
        ("F<List<int>>(x)", "F<List<int>>(x)"),
        ("a- -b+ +c", "a - -b + +c"),
    ];
    for (input, expected) in cases {
        assert_eq!(expression(input), expected, "{input}");
    }
}

#[test]
fn fixtures_are_stable() {
    let test_data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../sharpen-parse/test_data");
    let options = ParseOptions::default();

    let directives = fs::read_to_string(test_data.join("directives.cs")).unwrap();
    let root = parse_compilation_unit(&directives, &options);
    assert_eq!(normalize(&root, &unix()), directives);

    let members = fs::read_to_string(test_data.join("class_members.cs")).unwrap();
    let root = parse_compilation_unit(&members, &options);
    let expected = members.trim_end().replace(
        "new List<int> { 1, 2, 3 };",
        "new List<int>\n            {\n                1,\n                2,\n                3\n            };",
    );
    assert_eq!(normalize(&root, &unix()), expected);
}
