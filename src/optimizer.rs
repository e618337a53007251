use super::{
    Result,
    ast::{Ast, parse_pattern},
    generator::generate,
    merge::QuantifiersMerge,
    traverse::{Transform, sweep},
};

/// Summary of an [`Optimizer::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Number of full sweeps, including the final one that changed nothing.
    pub sweeps: usize,
    /// Total number of rewrites over all sweeps.
    pub changes: usize,
    /// `false` if the sweep limit stopped the run before a fixed point.
    pub converged: bool,
}

/// A registry of transforms driven to a fixed point.
pub struct Optimizer {
    transforms: Vec<Box<dyn Transform>>,
    max_sweeps: Option<usize>,
}

impl Default for Optimizer {
    /// An optimizer with every transform of this crate installed.
    fn default() -> Self {
        Self::new().with_transform(QuantifiersMerge)
    }
}

impl Optimizer {
    /// Creates an optimizer without any transforms.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
            max_sweeps: None,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Stops after `max_sweeps` sweeps even if the tree is still changing.
    #[must_use]
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = Some(max_sweeps);
        self
    }

    /// Sweeps every transform over `ast` until one full sweep changes
    /// nothing.
    ///
    /// Every transform must shrink the tree or otherwise make progress when it
    /// reports a change, or this loops forever without a sweep limit.
    ///
    /// # Errors
    ///
    /// Errors raised by a transform are returned as is; the tree keeps the
    /// rewrites done so far.
    pub fn run(&mut self, ast: &mut Ast) -> Result<Stats> {
        let mut stats = Stats::default();

        loop {
            if self.max_sweeps.is_some_and(|max| stats.sweeps >= max) {
                log::warn!(
                    "optimizer stopped after {} sweeps before reaching a fixed point",
                    stats.sweeps
                );
                return Ok(stats);
            }

            stats.sweeps += 1;
            let mut changes = 0;
            for transform in &mut self.transforms {
                let n = sweep(ast, transform.as_mut())?;
                if n > 0 {
                    log::trace!("{} rewrote {n} nodes", transform.name());
                }
                changes += n;
            }
            log::debug!("sweep {}: {changes} changes", stats.sweeps);

            if changes == 0 {
                stats.converged = true;
                return Ok(stats);
            }
            stats.changes += changes;
        }
    }
}

/// Parses `pattern`, optimizes it with the default transforms and prints the
/// result.
///
/// # Errors
///
/// If the pattern string cannot be parsed, an [`Error`](crate::Error) is
/// returned.
pub fn optimize(pattern: &str) -> Result<String> {
    let mut ast = parse_pattern(pattern)?;
    Optimizer::default().run(&mut ast)?;
    Ok(generate(&ast))
}
