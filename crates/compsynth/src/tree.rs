//! Flattened view of the command tree used during generation.

use std::collections::HashSet;

use crate::{
    ast::{CommandLine, Opt},
    shell, Config,
};

pub(crate) struct Tree<'a> {
    nodes: Vec<Node<'a>>,
    pub(crate) variables: Variables<'a>,
}

pub(crate) struct Node<'a> {
    pub(crate) cmd: &'a CommandLine,
    /// Preorder index, also the parser state of this command.
    pub(crate) id: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) path: Vec<&'a str>,
    /// Positionals consumed by ancestors, their subcommand names included.
    pub(crate) offset: usize,
    /// Subcommands accept this command's options.
    pub(crate) inherit: bool,
    pub(crate) abbreviate: bool,
}

impl<'a> Tree<'a> {
    pub(crate) fn new(root: &'a CommandLine, config: &Config) -> Tree<'a> {
        let mut res = Tree { nodes: Vec::new(), variables: Variables::default() };
        res.push_rec(root, None, Vec::new(), 0, config);
        let options = res.nodes.iter().map(|it| it.cmd).flat_map(|cmd| &cmd.options);
        res.variables = Variables::new(options);
        res
    }

    fn push_rec(
        &mut self,
        cmd: &'a CommandLine,
        parent: Option<usize>,
        mut path: Vec<&'a str>,
        offset: usize,
        config: &Config,
    ) {
        let id = self.nodes.len();
        path.push(cmd.prog.as_str());
        self.nodes.push(Node {
            cmd,
            id,
            parent,
            path: path.clone(),
            offset,
            inherit: cmd.inherit_options.unwrap_or(config.inherit_options),
            abbreviate: cmd.abbreviate_options.unwrap_or(config.abbreviate_options),
        });
        if let Some(slot) = cmd.subcommand_slot() {
            for sub in &cmd.subcommands {
                self.push_rec(sub, Some(id), path.clone(), offset + slot, config);
            }
        }
    }

    pub(crate) fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub(crate) fn root(&self) -> &Node<'a> {
        &self.nodes[0]
    }

    pub(crate) fn parent(&self, node: &Node<'a>) -> Option<&Node<'a>> {
        node.parent.map(|it| &self.nodes[it])
    }

    pub(crate) fn children(&self, node: &Node<'a>) -> impl Iterator<Item = &Node<'a>> + '_ {
        let id = node.id;
        self.nodes.iter().filter(move |it| it.parent == Some(id))
    }

    /// Own options first, then those inherited from ancestors.
    pub(crate) fn visible_options(&self, node: &Node<'a>) -> Vec<&'a Opt> {
        let mut res = node.cmd.options.iter().collect::<Vec<_>>();
        if let Some(parent) = self.parent(node) {
            if parent.inherit {
                res.extend(self.visible_options(parent));
            }
        }
        res
    }
}

/// Names of the runtime arrays, one per option of the whole tree.
///
/// Spellings that differ only in dashes or punctuation get numbered suffixes.
#[derive(Debug, Default)]
pub(crate) struct Variables<'a> {
    names: Vec<(&'a Opt, String)>,
}

impl<'a> Variables<'a> {
    pub(crate) fn new(options: impl IntoIterator<Item = &'a Opt>) -> Variables<'a> {
        let mut taken = HashSet::new();
        let mut names = Vec::new();
        for option in options {
            let base = shell::option_variable(option.primary_string());
            let mut name = base.clone();
            let mut n = 1;
            while taken.contains(&name) {
                n += 1;
                name = format!("{base}_{n}");
            }
            taken.insert(name.clone());
            names.push((option, name));
        }
        Variables { names }
    }

    pub(crate) fn of(&self, option: &Opt) -> String {
        match self.names.iter().find(|(it, _)| std::ptr::eq(*it, option)) {
            Some((_, name)) => name.clone(),
            None => shell::option_variable(option.primary_string()),
        }
    }
}
