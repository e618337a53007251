use quantmerge::{
    Ast, NodeId, Optimizer, Result, Stats, Transform,
    ast::{AstNode, Tag, parse_pattern},
    generate, optimize,
};

fn run(pattern: &str, optimizer: &mut Optimizer) -> Result<(String, Stats)> {
    let mut ast = parse_pattern(pattern)?;
    let stats = optimizer.run(&mut ast)?;
    Ok((generate(&ast), stats))
}

#[test]
fn test_optimize() -> Result<()> {
    assert_eq!(optimize("a{2}a{3}")?, "a{5}");
    assert_eq!(optimize("a{2}a+")?, "a{3,}");
    assert_eq!(optimize("a{1,2}a{0,3}")?, "a{1,5}");
    assert_eq!(optimize("(?<=a{1,2}a{3})")?, "(?<=a{4,5})");
    assert_eq!(optimize("abc")?, "abc");
    assert_eq!(optimize("")?, "");
    Ok(())
}

#[test]
fn test_optimize_reports_parse_errors() {
    assert!(optimize("a{2}(").is_err());
}

#[test]
fn test_fixed_point_needs_second_sweep() -> Result<()> {
    let (output, stats) = run(
        "(?:a{2}a{2}){2}(?:a{2}a{2}){2}",
        &mut Optimizer::default(),
    )?;
    assert_eq!(output, "(?:a{4}){4}");
    assert_eq!(
        stats,
        Stats {
            sweeps: 3,
            changes: 3,
            converged: true,
        }
    );
    Ok(())
}

#[test]
fn test_sweep_bound() -> Result<()> {
    for pattern in [
        "a{1}a{1}a{1}a{1}a{1}",
        "(?:b{2}b{2}){1}(?:b{2}b{2}){1}(?:b{4}){1}",
        "a*a*b+b?a{2}a{2}",
        "(?<=x{1}x{2}x{0,1})y",
    ] {
        let ast = parse_pattern(pattern)?;
        let root = ast.root().unwrap();
        let siblings = ast
            .preorder(root)
            .into_iter()
            .filter_map(|id| match ast.get(id) {
                Some(AstNode::Alternative(terms)) => Some(terms.len()),
                _ => None,
            })
            .sum::<usize>();

        let (output, stats) = run(pattern, &mut Optimizer::default())?;
        assert!(stats.converged);
        // the last sweep only confirms the fixed point
        assert!(stats.sweeps - 1 <= siblings.saturating_sub(1), "{pattern}");

        // nothing is left to merge
        let (again, rerun) = run(&output, &mut Optimizer::default())?;
        assert_eq!(again, output);
        assert_eq!(rerun.changes, 0);
        assert_eq!(rerun.sweeps, 1);
    }
    Ok(())
}

#[test]
fn test_max_sweeps() -> Result<()> {
    let pattern = "(?:a{2}a{2}){2}(?:a{2}a{2}){2}";

    let (output, stats) = run(pattern, &mut Optimizer::default().with_max_sweeps(1))?;
    assert_eq!(output, "(?:a{4}){2}(?:a{4}){2}");
    assert_eq!(
        stats,
        Stats {
            sweeps: 1,
            changes: 2,
            converged: false,
        }
    );

    let (output, stats) = run(pattern, &mut Optimizer::default().with_max_sweeps(0))?;
    assert_eq!(output, pattern);
    assert!(!stats.converged);
    Ok(())
}

#[test]
fn test_empty_optimizer() -> Result<()> {
    let (output, stats) = run("a{2}a{3}", &mut Optimizer::new())?;
    assert_eq!(output, "a{2}a{3}");
    assert_eq!(
        stats,
        Stats {
            sweeps: 1,
            changes: 0,
            converged: true,
        }
    );
    Ok(())
}

/// Drops `.` nodes out of sequences.
struct RemoveAny;

impl Transform for RemoveAny {
    fn name(&self) -> &'static str {
        "remove-any"
    }

    fn tag(&self) -> Tag {
        Tag::Any
    }

    fn visit(&mut self, ast: &mut Ast, id: NodeId) -> Result<bool> {
        ast.remove(id)?;
        Ok(true)
    }
}

#[test]
fn test_transforms_expose_new_merges() -> Result<()> {
    let mut optimizer = Optimizer::default().with_transform(RemoveAny);
    let (output, stats) = run("a{2}.a{3}.a+", &mut optimizer)?;
    assert_eq!(output, "a{6,}");
    assert!(stats.converged);
    assert_eq!(stats.sweeps, 3);
    Ok(())
}
