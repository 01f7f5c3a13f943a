use indexmap::IndexMap;

use crate::{ast::Opt, tree::Variables};

/// The runtime arrays a command's conditions and guards read.
///
/// Scoped to one command: every routine starts with an empty tracer.
#[derive(Debug)]
pub(crate) struct VariableTracer<'v> {
    variables: &'v Variables<'v>,
    captured: IndexMap<*const Opt, String>,
}

impl<'v> VariableTracer<'v> {
    pub(crate) fn new(variables: &'v Variables<'v>) -> VariableTracer<'v> {
        VariableTracer { variables, captured: IndexMap::new() }
    }

    pub(crate) fn variable(&mut self, option: &Opt) -> String {
        let variables = self.variables;
        self.captured.entry(option as *const Opt).or_insert_with(|| variables.of(option)).clone()
    }

    pub(crate) fn captured(&self) -> impl Iterator<Item = &str> {
        self.captured.values().map(String::as_str)
    }
}
