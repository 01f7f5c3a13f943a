//! The runtime command line parser shared by all routines of a script.
//!
//! Every command gets a numeric state (its preorder index). The parser walks
//! the words before the cursor, switching state when a subcommand name shows
//! up at its slot, and records option values in the `OPT_*` arrays.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::{
    abbrev::{Abbreviations, NoAbbreviations, PrefixAbbreviations},
    ast::ArgPolicy,
    shell,
    tree::Tree,
};

use super::{context::HelperRegistry, indent};

pub(crate) const PARSE_COMMANDLINE: &str = "parse_commandline";
const OPTION_INFO: &str = "option_info";

pub(crate) fn register(tree: &Tree<'_>, helpers: &mut HelperRegistry) {
    let option_info = helpers.qualified(OPTION_INFO);
    helpers.add_function(OPTION_INFO, &emit_option_info(tree));
    helpers.add_function(PARSE_COMMANDLINE, &emit_parse_commandline(tree, &option_info));
}

/// `option_info STATE OPTION` sets `kind` and `var`, or fails for unknown options.
fn emit_option_info(tree: &Tree<'_>) -> String {
    let mut by_action = IndexMap::<String, Vec<String>>::new();
    for node in tree.nodes() {
        let visible = tree.visible_options(node);
        let abbreviations: Box<dyn Abbreviations> = if node.abbreviate {
            Box::new(PrefixAbbreviations::new(
                visible.iter().flat_map(|it| it.option_strings.iter().map(String::as_str)),
            ))
        } else {
            Box::new(NoAbbreviations)
        };

        for option in visible {
            let kind = match option.arg_policy() {
                ArgPolicy::None => "flag",
                ArgPolicy::Required => "required",
                ArgPolicy::Optional => "optional",
            };
            let action = format!("kind={kind} var={}", tree.variables.of(option));
            let patterns = by_action.entry(action).or_default();
            for option_string in &option.option_strings {
                for it in abbreviations.abbreviations(option_string) {
                    let pattern = format!("{}:{}", node.id, shell::escape(&it));
                    if !patterns.contains(&pattern) {
                        patterns.push(pattern);
                    }
                }
            }
        }
    }

    let mut buf = String::new();
    w!(buf, "case \"$1:$2\" in\n");
    for (action, patterns) in &by_action {
        w!(buf, "  {}) {action};;\n", patterns.join("|"));
    }
    w!(buf, "  *) return 1;;\n");
    w!(buf, "esac");
    buf
}

fn emit_parse_commandline(tree: &Tree<'_>, option_info: &str) -> String {
    let mut switch = String::new();
    for node in tree.nodes() {
        let slot = match node.cmd.subcommand_slot() {
            Some(it) => node.offset + it,
            None => continue,
        };
        for child in tree.children(node) {
            let patterns = child
                .cmd
                .all_names()
                .map(|name| format!("{}:{slot}:{}", node.id, shell::escape(name)))
                .collect::<Vec<_>>();
            w!(switch, "  {}) cmd={};;\n", patterns.join("|"), child.id);
        }
    }

    let mut buf = String::new();
    w!(buf, "local i cmd=0 arg opt value kind var j\n");
    w!(buf, "POSITIONALS=()\n");
    w!(buf, "END_OF_OPTIONS=0\n");
    w!(buf, "\n");
    w!(buf, "for ((i=1; i < cword; ++i)); do\n");
    w!(buf, "  arg=\"${{words[i]}}\"\n");
    w!(buf, "\n");
    w!(buf, "  if (( END_OF_OPTIONS )) || [[ \"$arg\" != -?* ]]; then\n");
    w!(buf, "    POSITIONALS+=(\"$arg\")\n");
    if !switch.is_empty() {
        w!(buf, "    case \"$cmd:${{#POSITIONALS[@]}}:$arg\" in\n");
        w!(buf, "{}", indent(&switch, 4));
        w!(buf, "    esac\n");
    }
    w!(buf, "    continue\n");
    w!(buf, "  fi\n");
    w!(buf, "\n");
    w!(buf, "  if [[ \"$arg\" == -- ]]; then\n");
    w!(buf, "    END_OF_OPTIONS=1\n");
    w!(buf, "    continue\n");
    w!(buf, "  fi\n");
    w!(buf, "\n");
    w!(buf, "  if [[ \"$arg\" == -*=* ]]; then\n");
    w!(buf, "    opt=\"${{arg%%=*}}\" value=\"${{arg#*=}}\"\n");
    w!(buf, "    if {option_info} \"$cmd\" \"$opt\" && [[ \"$kind\" != flag ]]; then\n");
    w!(buf, "      eval \"$var+=(\\\"\\$value\\\")\"\n");
    w!(buf, "    fi\n");
    w!(buf, "    continue\n");
    w!(buf, "  fi\n");
    w!(buf, "\n");
    w!(buf, "  if {option_info} \"$cmd\" \"$arg\"; then\n");
    w!(buf, "    value=\n");
    w!(buf, "    if [[ \"$kind\" == required ]]; then\n");
    w!(buf, "      value=\"${{words[i+1]}}\"\n");
    w!(buf, "      (( ++i ))\n");
    w!(buf, "    fi\n");
    w!(buf, "    eval \"$var+=(\\\"\\$value\\\")\"\n");
    w!(buf, "    continue\n");
    w!(buf, "  fi\n");
    w!(buf, "\n");
    w!(buf, "  [[ \"$arg\" == --* ]] && continue\n");
    w!(buf, "\n");
    w!(buf, "  for ((j=1; j < ${{#arg}}; ++j)); do\n");
    w!(buf, "    {option_info} \"$cmd\" \"-${{arg:j:1}}\" || continue\n");
    w!(buf, "    value=\n");
    w!(buf, "    case \"$kind\" in\n");
    w!(buf, "      optional)\n");
    w!(buf, "        value=\"${{arg:j+1}}\"\n");
    w!(buf, "        j=${{#arg}};;\n");
    w!(buf, "      required)\n");
    w!(buf, "        if (( j + 1 < ${{#arg}} )); then\n");
    w!(buf, "          value=\"${{arg:j+1}}\"\n");
    w!(buf, "        else\n");
    w!(buf, "          value=\"${{words[i+1]}}\"\n");
    w!(buf, "          (( ++i ))\n");
    w!(buf, "        fi\n");
    w!(buf, "        j=${{#arg}};;\n");
    w!(buf, "    esac\n");
    w!(buf, "    eval \"$var+=(\\\"\\$value\\\")\"\n");
    w!(buf, "  done\n");
    w!(buf, "done\n");
    w!(buf, "\n");
    w!(buf, "POSITIONAL_NUM=$(( ${{#POSITIONALS[@]}} + 1 ))");
    buf
}
