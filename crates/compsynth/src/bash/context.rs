use indexmap::IndexMap;
use tracing::trace;

use crate::{shell, Config};

/// State shared by every node of one generation run.
pub(crate) struct GenerationContext<'a> {
    pub(crate) config: &'a Config,
    pub(crate) helpers: HelperRegistry,
}

impl<'a> GenerationContext<'a> {
    pub(crate) fn new(config: &'a Config, prog: &str) -> GenerationContext<'a> {
        GenerationContext { config, helpers: HelperRegistry::new(prog) }
    }
}

/// Shell functions from the library every script can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Helper {
    CompgenWReplacement,
    PrefixCompreply,
}

impl Helper {
    fn name(self) -> &'static str {
        match self {
            Helper::CompgenWReplacement => "compgen_w_replacement",
            Helper::PrefixCompreply => "prefix_compreply",
        }
    }

    fn body(self) -> &'static str {
        match self {
            Helper::CompgenWReplacement => COMPGEN_W_REPLACEMENT,
            Helper::PrefixCompreply => PREFIX_COMPREPLY,
        }
    }
}

const COMPGEN_W_REPLACEMENT: &str = r#"local append=0 cur item
if [[ "$1" == -a ]]; then
  append=1
  shift
fi
[[ "$1" == -- ]] && shift
cur="$1"
shift
(( append )) || COMPREPLY=()
for item; do
  [[ "$item" == "$cur"* ]] && COMPREPLY+=("$item")
done
return 0"#;

const PREFIX_COMPREPLY: &str = r#"local i
for ((i=0; i < ${#COMPREPLY[@]}; ++i)); do
  COMPREPLY[i]="$1${COMPREPLY[i]}"
done"#;

/// Helper functions keyed by name, kept in the order they were first requested.
pub(crate) struct HelperRegistry {
    prefix: String,
    functions: IndexMap<String, String>,
}

impl HelperRegistry {
    pub(crate) fn new(prog: &str) -> HelperRegistry {
        HelperRegistry { prefix: format!("__{}_", shell::identifier(prog)), functions: IndexMap::new() }
    }

    pub(crate) fn qualified(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Returns the name to call `helper` by.
    pub(crate) fn use_function(&mut self, helper: Helper) -> String {
        self.add_function(helper.name(), helper.body())
    }

    /// Registering a name twice keeps the first body.
    pub(crate) fn add_function(&mut self, name: &str, body: &str) -> String {
        let name = self.qualified(name);
        if !self.functions.contains_key(&name) {
            trace!(helper = %name, "registering helper");
            self.functions.insert(name.clone(), body.to_string());
        }
        name
    }

    pub(crate) fn used_functions_code(&self) -> Vec<String> {
        self.functions
            .iter()
            .map(|(name, body)| format!("{name}() {{\n{}\n}}", super::indent(body, 2)))
            .collect()
    }
}
