use std::mem;

use proc_macro2::{Delimiter, TokenStream, TokenTree};

use crate::{
    ast::{Arg, CommandLine, Complete, Opt, Positional},
    when::Condition,
    Error, Result,
};

macro_rules! format_err {
    ($($tt:tt)*) => {
        Error::Syntax { msg: format!($($tt)*) }
    };
}

macro_rules! bail {
    ($($tt:tt)*) => {
        return Err(format_err!($($tt)*))
    };
}

/// Parses a command line description:
///
/// ```text
/// cmd git inherit {
///     option -C <DIR>: directory
///     option -v, --verbose repeatable
///     cmd commit, ci {
///         option -m, --message <MSG>: none
///         positional PATHSPEC: file repeatable
///     }
/// }
/// ```
pub fn parse(text: &str) -> Result<CommandLine> {
    let ts = text.parse::<TokenStream>().map_err(|err| format_err!("{err}"))?;
    let p = &mut Parser::new(ts);
    let res = cmd(p)?;
    if !p.end() {
        bail!("unexpected input after the top-level command")
    }
    Ok(res)
}

fn cmd(p: &mut Parser) -> Result<CommandLine> {
    p.expect_keyword("cmd")?;
    let mut res = CommandLine::new(cmd_name(p)?);
    while p.eat_punct(',') {
        res.aliases.push(cmd_name(p)?);
    }

    loop {
        if p.eat_keyword("inherit") {
            res.inherit_options = Some(true);
        } else if p.eat_keyword("no_inherit") {
            res.inherit_options = Some(false);
        } else if p.eat_keyword("abbreviate") {
            res.abbreviate_options = Some(true);
        } else if p.eat_keyword("no_abbreviate") {
            res.abbreviate_options = Some(false);
        } else {
            break;
        }
    }

    p.enter_delim(Delimiter::Brace)?;
    while !p.end() {
        if p.at_keyword("cmd") {
            let sub = cmd(p)?;
            res.subcommands.push(sub);
        } else if p.eat_keyword("option") {
            let option = option(p)?;
            res.options.push(option);
        } else if p.eat_keyword("positional") {
            let number = res.positionals.len() + 1;
            let positional = positional(p, number)?;
            if res.positionals.last().map_or(false, |it| it.repeatable) {
                bail!("positional `{}` follows a repeatable positional", positional.metavar)
            }
            res.positionals.push(positional);
        } else {
            let next = p.ts.last().map(|it| it.to_string()).unwrap_or_default();
            bail!("expected `cmd`, `option` or `positional`, got `{next}`")
        }
    }
    p.exit_delim()?;

    if let Some(positional) = res.positionals.last().filter(|it| it.repeatable) {
        if !res.subcommands.is_empty() {
            bail!(
                "repeatable positional `{}` leaves no slot for subcommands of `{}`",
                positional.metavar,
                res.prog
            )
        }
    }
    Ok(res)
}

fn option(p: &mut Parser) -> Result<Opt> {
    let mut res = Opt::new([flag_name(p)?]);
    while p.eat_punct(',') {
        res.option_strings.push(flag_name(p)?);
    }

    if p.eat_punct('<') {
        let metavar = p.expect_name()?;
        p.expect_punct('>')?;
        let complete = opt_complete(p)?;
        res.arg = Some(Arg { optional: false, metavar, complete });
    } else if p.at_delim(Delimiter::Bracket) {
        p.enter_delim(Delimiter::Bracket)?;
        let metavar = p.expect_name()?;
        p.exit_delim()?;
        let complete = opt_complete(p)?;
        res.arg = Some(Arg { optional: true, metavar, complete });
    }

    loop {
        if p.eat_keyword("repeatable") {
            res.repeatable = true;
        } else if p.eat_keyword("final") {
            res.is_final = true;
        } else if p.eat_keyword("when") {
            res.when = Some(condition(p)?);
        } else if p.eat_keyword("conflicts") {
            p.enter_delim(Delimiter::Parenthesis)?;
            while !p.end() {
                res.conflicts.push(flag_name(p)?);
                p.eat_punct(',');
            }
            p.exit_delim()?;
        } else {
            break;
        }
    }
    Ok(res)
}

fn positional(p: &mut Parser, number: usize) -> Result<Positional> {
    let metavar = p.expect_name()?;
    if metavar.starts_with('-') {
        bail!("positional name can't begin with `-`: `{metavar}`");
    }
    let complete = opt_complete(p)?;
    let mut res = Positional::new(number, &metavar, complete);
    loop {
        if p.eat_keyword("repeatable") {
            res.repeatable = true;
        } else if p.eat_keyword("when") {
            res.when = Some(condition(p)?);
        } else {
            break;
        }
    }
    Ok(res)
}

fn condition(p: &mut Parser) -> Result<Condition> {
    let text = p.expect_string()?;
    text.parse()
}

fn opt_complete(p: &mut Parser) -> Result<Complete> {
    if !p.eat_punct(':') {
        return Ok(Complete::None);
    }
    let name = p.expect_name()?;
    let res = match name.as_str() {
        "none" => Complete::None,
        "file" => Complete::File,
        "directory" => Complete::Directory,
        "command" => Complete::Command,
        "user" => Complete::User,
        "group" => Complete::Group,
        "hostname" => Complete::Hostname,
        "signal" => Complete::Signal,
        "choices" => {
            p.enter_delim(Delimiter::Parenthesis)?;
            let mut values = Vec::new();
            while !p.end() {
                values.push(p.expect_value()?);
                p.eat_punct(',');
            }
            p.exit_delim()?;
            Complete::Choices(values)
        }
        "exec" => {
            p.enter_delim(Delimiter::Parenthesis)?;
            let command = p.expect_string()?;
            p.exit_delim()?;
            Complete::Exec(command)
        }
        _ => bail!("unknown completion `{name}`"),
    };
    Ok(res)
}

fn cmd_name(p: &mut Parser) -> Result<String> {
    let name = p.expect_name()?;
    if name.starts_with('-') {
        bail!("command name can't begin with `-`: `{name}`");
    }
    Ok(name)
}

fn flag_name(p: &mut Parser) -> Result<String> {
    let name = p.expect_name()?;
    if !name.starts_with('-') || name.trim_start_matches('-').is_empty() {
        bail!("option name should begin with `-`: `{name}`");
    }
    Ok(name)
}

struct Parser {
    stack: Vec<Vec<TokenTree>>,
    ts: Vec<TokenTree>,
}

impl Parser {
    fn new(ts: TokenStream) -> Self {
        let mut ts = ts.into_iter().collect::<Vec<_>>();
        ts.reverse();
        Self { stack: Vec::new(), ts }
    }

    fn at_delim(&self, delimiter: Delimiter) -> bool {
        matches!(self.ts.last(), Some(TokenTree::Group(g)) if g.delimiter() == delimiter)
    }
    fn enter_delim(&mut self, delimiter: Delimiter) -> Result<()> {
        match self.ts.pop() {
            Some(TokenTree::Group(g)) if g.delimiter() == delimiter => {
                let mut ts = g.stream().into_iter().collect::<Vec<_>>();
                ts.reverse();
                let ts = mem::replace(&mut self.ts, ts);
                self.stack.push(ts);
            }
            _ => bail!("expected {}", open_delim(delimiter)),
        }
        Ok(())
    }
    fn exit_delim(&mut self) -> Result<()> {
        if !self.end() {
            let next = self.ts.last().map(|it| it.to_string()).unwrap_or_default();
            bail!("unexpected `{next}`")
        }
        match self.stack.pop() {
            Some(ts) => self.ts = ts,
            None => bail!("unbalanced delimiters"),
        }
        Ok(())
    }
    fn end(&self) -> bool {
        self.ts.last().is_none()
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<()> {
        if !self.eat_keyword(kw) {
            bail!("expected `{kw}`")
        }
        Ok(())
    }
    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.at_keyword(kw) {
            self.ts.pop();
            true
        } else {
            false
        }
    }
    fn at_keyword(&self, kw: &str) -> bool {
        match self.ts.last() {
            Some(TokenTree::Ident(ident)) => ident.to_string() == kw,
            _ => false,
        }
    }

    fn expect_name(&mut self) -> Result<String> {
        self.eat_name().ok_or_else(|| {
            let next = self.ts.pop().map(|it| it.to_string()).unwrap_or_default();
            format_err!("expected a name, got: `{next}`")
        })
    }
    /// `foo`, `--foo-bar`, `-f`.
    fn eat_name(&mut self) -> Option<String> {
        let mut buf = String::new();
        let mut prev_ident = false;
        loop {
            match self.ts.last() {
                Some(TokenTree::Punct(p)) if p.as_char() == '-' => {
                    prev_ident = false;
                    buf.push('-');
                }
                Some(TokenTree::Ident(ident)) if !prev_ident => {
                    prev_ident = true;
                    buf.push_str(&ident.to_string());
                }
                _ => break,
            }
            self.ts.pop();
        }
        if buf.is_empty() {
            None
        } else {
            Some(buf)
        }
    }

    /// A name, a string or a number.
    fn expect_value(&mut self) -> Result<String> {
        if let Some(TokenTree::Literal(lit)) = self.ts.last() {
            let lit = lit.to_string();
            self.ts.pop();
            return Ok(if lit.starts_with('"') { str_lit_value(lit) } else { lit });
        }
        self.expect_name()
    }

    fn expect_punct(&mut self, punct: char) -> Result<()> {
        if !self.eat_punct(punct) {
            bail!("expected `{punct}`")
        }
        Ok(())
    }
    fn eat_punct(&mut self, punct: char) -> bool {
        match self.ts.last() {
            Some(TokenTree::Punct(p)) if p.as_char() == punct => {
                self.ts.pop();
                true
            }
            _ => false,
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.ts.pop() {
            Some(TokenTree::Literal(lit)) if lit.to_string().starts_with('"') => {
                Ok(str_lit_value(lit.to_string()))
            }
            _ => bail!("expected a string"),
        }
    }
}

fn open_delim(delimiter: Delimiter) -> &'static str {
    match delimiter {
        Delimiter::Brace => "`{`",
        Delimiter::Bracket => "`[`",
        Delimiter::Parenthesis => "`(`",
        Delimiter::None => "a group",
    }
}

/// Value of a plain string literal; raw strings aren't supported.
fn str_lit_value(lit: String) -> String {
    let inner = &lit[1..lit.len() - 1];
    let mut res = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            res.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => res.push('\n'),
            Some('t') => res.push('\t'),
            Some(other) => res.push(other),
            None => res.push('\\'),
        }
    }
    res
}
