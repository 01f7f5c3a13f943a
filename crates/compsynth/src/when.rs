//! Conditions deciding whether an option or positional is offered.

use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Any of the options was given at least once.
    HasOption(Vec<String>),
    /// The last value given to any of the options is one of `values`.
    OptionIs { options: Vec<String>, values: Vec<String> },
}

impl FromStr for Condition {
    type Err = Error;

    fn from_str(text: &str) -> Result<Condition, Error> {
        let err = |msg: &str| Error::InvalidCondition { text: text.to_string(), msg: msg.to_string() };

        let mut words = text.split_whitespace();
        let keyword = words.next().ok_or_else(|| err("empty condition"))?;
        match keyword {
            "has_option" => {
                let options = words.map(String::from).collect::<Vec<_>>();
                if options.is_empty() {
                    return Err(err("expected at least one option"));
                }
                Ok(Condition::HasOption(options))
            }
            "option_is" => {
                let mut options = Vec::new();
                let mut saw_separator = false;
                for word in words.by_ref() {
                    if word == "--" {
                        saw_separator = true;
                        break;
                    }
                    options.push(word.to_string());
                }
                if options.is_empty() {
                    return Err(err("expected at least one option"));
                }
                if !saw_separator {
                    return Err(err("expected `--` between options and values"));
                }
                let values = words.map(String::from).collect::<Vec<_>>();
                if values.is_empty() {
                    return Err(err("expected at least one value"));
                }
                Ok(Condition::OptionIs { options, values })
            }
            _ => Err(err("expected `has_option` or `option_is`")),
        }
    }
}

impl Condition {
    pub fn options(&self) -> &[String] {
        match self {
            Condition::HasOption(options) => options,
            Condition::OptionIs { options, .. } => options,
        }
    }
}
