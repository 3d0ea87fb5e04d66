//! `AnalysisPass`: AST → facts, forward-only. Passes declare their
//! dependencies by name; the engine topologically sorts and runs them in
//! that order via a plain Kahn's algorithm, since built-in passes form a
//! small, acyclic, statically named graph rather than mutually-recursive
//! user definitions.

use std::collections::VecDeque;

use indexmap::IndexMap;
use stratum_syntax::SyntaxNode;

use crate::store::FactStore;

/// Read-only context handed to every pass: the syntax tree to analyze
/// and the source text backing it (spans index into this text).
pub struct PassContext<'a> {
    pub root: &'a SyntaxNode,
    pub source: &'a str,
}

/// One analysis stage. `depends_on` names passes that must run first —
/// a dependency cycle is a programmer error, reported rather than
/// silently ignored.
pub trait AnalysisPass {
    fn name(&self) -> &'static str;

    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    fn run(&self, ctx: &PassContext<'_>, store: &mut FactStore);
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("analysis pass dependency cycle detected among: {0:?}")]
    DependencyCycle(Vec<&'static str>),
    #[error("analysis pass {0:?} depends on unknown pass {1:?}")]
    UnknownDependency(&'static str, &'static str),
}

/// Topologically sorts `passes` by their declared dependencies and runs
/// each in order against `store`. Returns an error instead of running
/// anything if the dependency graph doesn't resolve.
pub fn run_passes(
    passes: &[Box<dyn AnalysisPass>],
    ctx: &PassContext<'_>,
    store: &mut FactStore,
) -> Result<(), PipelineError> {
    let order = topo_sort(passes)?;
    for index in order {
        passes[index].run(ctx, store);
    }
    Ok(())
}

fn topo_sort(passes: &[Box<dyn AnalysisPass>]) -> Result<Vec<usize>, PipelineError> {
    let index_by_name: IndexMap<&'static str, usize> =
        passes.iter().enumerate().map(|(i, p)| (p.name(), i)).collect();

    let mut in_degree = vec![0usize; passes.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); passes.len()];

    for (i, pass) in passes.iter().enumerate() {
        for dep_name in pass.depends_on() {
            let Some(&dep_index) = index_by_name.get(dep_name) else {
                return Err(PipelineError::UnknownDependency(pass.name(), dep_name));
            };
            dependents[dep_index].push(i);
            in_degree[i] += 1;
        }
    }

    let mut queue: VecDeque<usize> =
        (0..passes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(passes.len());

    while let Some(i) = queue.pop_front() {
        order.push(i);
        for &dependent in &dependents[i] {
            in_degree[dependent] -= 1;
            if in_degree[dependent] == 0 {
                queue.push_back(dependent);
            }
        }
    }

    if order.len() != passes.len() {
        let remaining: Vec<&'static str> = (0..passes.len())
            .filter(|i| !order.contains(i))
            .map(|i| passes[i].name())
            .collect();
        return Err(PipelineError::DependencyCycle(remaining));
    }

    Ok(order)
}
