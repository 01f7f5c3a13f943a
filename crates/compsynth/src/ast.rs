use crate::when::Condition;

#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    pub prog: String,
    pub aliases: Vec<String>,
    pub options: Vec<Opt>,
    pub positionals: Vec<Positional>,
    pub subcommands: Vec<CommandLine>,
    /// `None` defers to [`Config::inherit_options`](crate::Config).
    pub inherit_options: Option<bool>,
    /// `None` defers to [`Config::abbreviate_options`](crate::Config).
    pub abbreviate_options: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct Opt {
    pub option_strings: Vec<String>,
    /// Present iff the option takes an argument.
    pub arg: Option<Arg>,
    pub repeatable: bool,
    pub is_final: bool,
    pub conflicts: Vec<String>,
    pub when: Option<Condition>,
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub optional: bool,
    pub metavar: String,
    pub complete: Complete,
}

#[derive(Debug, Clone)]
pub struct Positional {
    /// 1-based, counted among the positionals of one command.
    pub number: usize,
    pub metavar: String,
    pub repeatable: bool,
    pub when: Option<Condition>,
    pub complete: Complete,
}

/// How to produce candidate values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Complete {
    None,
    Choices(Vec<String>),
    File,
    Directory,
    Command,
    User,
    Group,
    Hostname,
    Signal,
    Exec(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPolicy {
    None,
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spelling {
    /// `--name`
    Long,
    /// `-name`, argument glued on or after `=`
    OldStyle,
    /// `-n`
    Short,
}

impl Spelling {
    pub fn of(option_string: &str) -> Spelling {
        if option_string.starts_with("--") {
            Spelling::Long
        } else if option_string.chars().count() == 2 {
            Spelling::Short
        } else {
            Spelling::OldStyle
        }
    }
}

impl CommandLine {
    pub fn new(prog: impl Into<String>) -> CommandLine {
        CommandLine { prog: prog.into(), ..CommandLine::default() }
    }

    /// The ordinal the subcommand name occupies among this command's positionals.
    pub fn subcommand_slot(&self) -> Option<usize> {
        if self.subcommands.is_empty() {
            None
        } else {
            Some(self.positionals.len() + 1)
        }
    }

    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.prog.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn final_options(&self) -> impl Iterator<Item = &Opt> {
        self.options.iter().filter(|it| it.is_final)
    }

    pub(crate) fn is_worth_a_function(&self) -> bool {
        !self.options.is_empty() || !self.positionals.is_empty() || !self.subcommands.is_empty()
    }
}

impl Opt {
    pub fn new<I, S>(option_strings: I) -> Opt
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Opt { option_strings: option_strings.into_iter().map(Into::into).collect(), ..Opt::default() }
    }

    pub fn with_arg(mut self, metavar: &str, complete: Complete) -> Opt {
        self.arg = Some(Arg { optional: false, metavar: metavar.to_string(), complete });
        self
    }

    pub fn with_optional_arg(mut self, metavar: &str, complete: Complete) -> Opt {
        self.arg = Some(Arg { optional: true, metavar: metavar.to_string(), complete });
        self
    }

    pub fn arg_policy(&self) -> ArgPolicy {
        match &self.arg {
            None => ArgPolicy::None,
            Some(arg) if arg.optional => ArgPolicy::Optional,
            Some(_) => ArgPolicy::Required,
        }
    }

    pub fn is_completable(&self) -> bool {
        self.arg.is_some()
    }

    pub fn complete(&self) -> Option<&Complete> {
        self.arg.as_ref().map(|it| &it.complete)
    }

    pub fn strings_of(&self, spelling: Spelling) -> impl Iterator<Item = &str> {
        self.option_strings.iter().map(String::as_str).filter(move |it| Spelling::of(it) == spelling)
    }

    pub fn has_spelling(&self, spelling: Spelling) -> bool {
        self.strings_of(spelling).next().is_some()
    }

    /// Longest spelling, used to derive identifiers.
    pub fn primary_string(&self) -> &str {
        self.option_strings.iter().max_by_key(|it| it.len()).map(String::as_str).unwrap_or("")
    }
}

impl Positional {
    pub fn new(number: usize, metavar: &str, complete: Complete) -> Positional {
        Positional { number, metavar: metavar.to_string(), repeatable: false, when: None, complete }
    }
}
