use quantmerge::{
    Error,
    ast::{Ast, AstNode, NodeId, parse_pattern},
    lexer::Token,
};

fn parse_ok(pattern: &str) -> Ast {
    parse_pattern(pattern).unwrap_or_else(|err| panic!("Parser failed for pattern {pattern}: {err}"))
}

/// Renders a subtree as an s-expression.
fn sexp(ast: &Ast, id: NodeId) -> String {
    let list = |name: String, children: &[NodeId]| {
        let mut out = format!("({name}");
        for &child in children {
            out.push(' ');
            out.push_str(&sexp(ast, child));
        }
        out.push(')');
        out
    };

    match ast.get(id).expect("live node") {
        AstNode::Char(c) => format!("{c:?}"),
        AstNode::Any => "any".into(),
        AstNode::Class(class) => format!("\\{}", class.to_char()),
        AstNode::Set { negated, items } => {
            format!("set{}{items:?}", if *negated { "^" } else { "" })
        }
        AstNode::Anchor(anchor) => format!("{anchor:?}"),
        AstNode::Backreference(n) => format!("ref{n}"),
        AstNode::Group { capturing, body } => list(
            format!("group{}", if *capturing { "" } else { "?:" }),
            &[*body],
        ),
        AstNode::Lookaround {
            kind,
            negative,
            body,
        } => list(format!("{kind:?}{}", if *negative { "!" } else { "" }), &[*body]),
        AstNode::Disjunction(branches) => list("or".into(), &branches[..]),
        AstNode::Alternative(terms) => list("seq".into(), &terms[..]),
        AstNode::Repetition { body, quantifier } => list(format!("rep{quantifier}"), &[*body]),
    }
}

#[track_caller]
fn assert_tree(pattern: &str, expected: &str) {
    let ast = parse_ok(pattern);
    let root = ast.root().expect("parsed tree has a root");
    assert_eq!(sexp(&ast, root), expected, "tree of {pattern}");
}

#[test]
fn test_simple_sequence_parser() {
    assert_tree("abc", "(seq 'a' 'b' 'c')");
    assert_tree("a.c", "(seq 'a' any 'c')");
    assert_tree(r"a\dc", "(seq 'a' \\d 'c')");
    assert_tree("", "(seq)");
}

#[test]
fn test_disjunction_parser() {
    assert_tree("a|bc", "(or (seq 'a') (seq 'b' 'c'))");
    assert_tree("a||b", "(or (seq 'a') (seq) (seq 'b'))");
    assert_tree("(a|b)c", "(seq (group (or (seq 'a') (seq 'b'))) 'c')");
}

#[test]
fn test_quantifiers_parser() {
    assert_tree("a*", "(seq (rep* 'a'))");
    assert_tree("a+?", "(seq (rep+? 'a'))");
    assert_tree("a??", "(seq (rep?? 'a'))");
    assert_tree("a{2}b{3,}c{1,4}?", "(seq (rep{2} 'a') (rep{3,} 'b') (rep{1,4}? 'c'))");
    assert_tree("(?:ab){2}", "(seq (rep{2} (group?: (seq 'a' 'b'))))");
}

#[test]
fn test_groups_parser() {
    assert_tree(
        r"(a)(?:b)\1",
        "(seq (group (seq 'a')) (group?: (seq 'b')) ref1)",
    );
    assert_tree(
        "(?<=a+)(?!b)",
        "(seq (Lookbehind (seq (rep+ 'a'))) (Lookahead! (seq 'b')))",
    );
    assert_tree("(?<!(?=x))", "(seq (Lookbehind! (seq (Lookahead (seq 'x')))))");
}

#[test]
fn test_anchors_parser() {
    assert_tree(
        r"^\b\B$",
        "(seq Start WordBoundary NonWordBoundary End)",
    );
}

#[test]
fn test_sets_parser() {
    assert_tree(
        r"[^a-c\d-]",
        "(seq set^[Range('a', 'c'), Class(Digit), Char('-')])",
    );
    assert_tree("[a-]", "(seq set[Char('a'), Char('-')])");
    assert_tree("[]", "(seq set[])");
    assert_tree("[a^]", "(seq set[Char('a'), Char('^')])");
}

#[test]
fn test_literal_braces_parser() {
    assert_tree("a{", "(seq 'a' '{')");
    assert_tree("x{y}", "(seq 'x' '{' 'y' '}')");
    assert_tree("]", "(seq ']')");
}

#[test]
fn test_parent_links_parser() {
    let ast = parse_ok("a(b)");
    let root = ast.root().unwrap();
    assert_eq!(ast.parent(root), None);
    for id in ast.preorder(root) {
        for &child in ast.get(id).unwrap().children() {
            assert_eq!(ast.parent(child), Some(id));
        }
    }
    assert_eq!(ast.preorder(root).len(), ast.node_count());
}

#[test]
fn test_errors_parser() {
    assert_eq!(
        parse_pattern("*a").err(),
        Some(Error::NothingToRepeat { pos: 0 })
    );
    assert_eq!(
        parse_pattern("a**").err(),
        Some(Error::NothingToRepeat { pos: 2 })
    );
    assert_eq!(
        parse_pattern("a*??").err(),
        Some(Error::NothingToRepeat { pos: 3 })
    );
    assert_eq!(
        parse_pattern("^*").err(),
        Some(Error::NothingToRepeat { pos: 1 })
    );
    assert_eq!(
        parse_pattern("(?=a)+").err(),
        Some(Error::NothingToRepeat { pos: 5 })
    );
    assert_eq!(
        parse_pattern("a|*").err(),
        Some(Error::NothingToRepeat { pos: 2 })
    );
    assert_eq!(
        parse_pattern("(a").err(),
        Some(Error::ExpectedToken {
            pos: 2,
            expected: Token::RParen,
            actual: None
        })
    );
    assert_eq!(
        parse_pattern("[ab").err(),
        Some(Error::ExpectedToken {
            pos: 3,
            expected: Token::RBracket,
            actual: None
        })
    );
    assert_eq!(
        parse_pattern("a)").err(),
        Some(Error::UnexpectedToken { pos: 1, ch: ')' })
    );
    assert_eq!(
        parse_pattern("[z-a]").err(),
        Some(Error::SetRange {
            pos: 1,
            start: 'z',
            end: 'a'
        })
    );
    assert_eq!(
        parse_pattern("a{3,2}").err(),
        Some(Error::QuantifierRange { from: 3, to: 2 })
    );
}
