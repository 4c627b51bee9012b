//! Interactive prompting
//!
//! Commands never talk to the terminal directly. They ask a [`Prompter`],
//! which is either the real terminal ([`InquirePrompter`]) or a queue of
//! prepared answers ([`ScriptedPrompter`]).

use std::collections::VecDeque;

use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::Validation;
use inquire::{
    set_global_render_config, Confirm, CustomUserError, Password, PasswordDisplayMode, Select,
    Text,
};

use crate::config::Choice;
use crate::error::{Error, Result};

/// Checks a text answer, returning the message to show when it is rejected
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// A free text question
#[derive(Debug, Clone)]
pub struct Input {
    pub message: String,
    /// Returned when the user submits an empty answer
    pub default: Option<String>,
    pub required: bool,
    pub validator: Option<Validator>,
}

impl Input {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: None,
            required: false,
            validator: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Use `default` only when it is non-empty
    pub fn with_optional_default(self, default: &str) -> Self {
        if default.is_empty() {
            self
        } else {
            self.with_default(default)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Apply the default, the required check and the validator to a raw answer
    fn resolve(&self, raw: &str) -> std::result::Result<String, String> {
        let answer = match (raw.is_empty(), self.default.as_deref()) {
            (true, Some(default)) => default.to_string(),
            _ => raw.to_string(),
        };

        if self.required && answer.trim().is_empty() {
            return Err("A value is required".into());
        }
        if let Some(validate) = self.validator {
            if !answer.is_empty() {
                validate(&answer)?;
            }
        }
        Ok(answer)
    }
}

/// Capability to ask the user questions
pub trait Prompter {
    /// Ask for a line of text
    fn input(&mut self, input: &Input) -> Result<String>;

    /// Pick one of `choices`
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Choice>;

    /// Yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;

    /// Ask for a secret, masking the typed characters
    fn password(&mut self, message: &str) -> Result<String>;
}

/// Terminal prompts backed by `inquire`
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl InquirePrompter {
    pub fn new() -> Self {
        init_render_config();
        Self
    }
}

impl Prompter for InquirePrompter {
    fn input(&mut self, input: &Input) -> Result<String> {
        let mut text = Text::new(&input.message);
        if let Some(default) = input.default.as_deref() {
            text = text.with_default(default);
        }

        let rules = input.clone();
        text.with_validator(
            move |value: &str| -> std::result::Result<Validation, CustomUserError> {
                match rules.resolve(value) {
                    Ok(_) => Ok(Validation::Valid),
                    Err(message) => Ok(Validation::Invalid(message.into())),
                }
            },
        )
        .prompt()
        .map_err(map_inquire_error)
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Choice> {
        if choices.is_empty() {
            return Err(Error::InvalidInput(format!("Nothing to choose for: {message}")));
        }

        Select::new(message, choices.to_vec())
            .prompt()
            .map_err(map_inquire_error)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(map_inquire_error)
    }

    fn password(&mut self, message: &str) -> Result<String> {
        Password::new(message)
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .map_err(map_inquire_error)
    }
}

/// Initialize the global render configuration for inquire prompts
pub fn init_render_config() {
    let mut style = RenderConfig::default_colored();
    style.prompt_prefix = Styled::new(">").with_fg(Color::LightGreen);
    set_global_render_config(style);
}

/// Map inquire errors to our error type
fn map_inquire_error(err: InquireError) -> Error {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Error::Cancelled,
        _ => Error::Prompt(err.to_string()),
    }
}

/// A prepared answer for [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Typed text; an empty string falls back to the default
    Text(String),
    /// Select the choice with this name
    Select(String),
    Confirm(bool),
    Password(String),
    /// Accept whatever the prompt offers: its default, or the first choice
    Default,
}

/// Which kind of prompt was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Input,
    Select,
    Confirm,
    Password,
}

/// Record of a prompt shown by [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asked {
    pub kind: PromptKind,
    pub message: String,
    pub default: Option<String>,
    pub required: bool,
    /// Names of the offered choices, for select prompts
    pub choices: Vec<String>,
}

/// Answers prompts from a fixed script and records what was asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<Asked>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Every prompt shown so far, in order
    pub fn asked(&self) -> &[Asked] {
        &self.asked
    }

    /// The first prompt whose message matches exactly
    pub fn find(&self, message: &str) -> Option<&Asked> {
        self.asked.iter().find(|asked| asked.message == message)
    }

    /// Answers that were never consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, asked: Asked) -> Result<Answer> {
        let message = asked.message.clone();
        self.asked.push(asked);
        self.answers
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("no scripted answer for {message:?}")))
    }
}

fn unexpected(message: &str, answer: &Answer) -> Error {
    Error::Prompt(format!("unexpected answer {answer:?} for {message:?}"))
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, input: &Input) -> Result<String> {
        let answer = self.next(Asked {
            kind: PromptKind::Input,
            message: input.message.clone(),
            default: input.default.clone(),
            required: input.required,
            choices: vec![],
        })?;

        let raw = match answer {
            Answer::Text(text) => text,
            Answer::Default => String::new(),
            other => return Err(unexpected(&input.message, &other)),
        };
        input.resolve(&raw).map_err(Error::InvalidInput)
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Choice> {
        let answer = self.next(Asked {
            kind: PromptKind::Select,
            message: message.to_string(),
            default: None,
            required: true,
            choices: choices.iter().map(|c| c.name.clone()).collect(),
        })?;

        match answer {
            Answer::Select(name) => choices
                .iter()
                .find(|choice| choice.name == name)
                .cloned()
                .ok_or_else(|| Error::InvalidInput(format!("{name} is not one of the choices"))),
            Answer::Default => choices
                .first()
                .cloned()
                .ok_or_else(|| Error::InvalidInput(format!("Nothing to choose for: {message}"))),
            other => Err(unexpected(message, &other)),
        }
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        let answer = self.next(Asked {
            kind: PromptKind::Confirm,
            message: message.to_string(),
            default: Some(default.to_string()),
            required: false,
            choices: vec![],
        })?;

        match answer {
            Answer::Confirm(value) => Ok(value),
            Answer::Default => Ok(default),
            other => Err(unexpected(message, &other)),
        }
    }

    fn password(&mut self, message: &str) -> Result<String> {
        let answer = self.next(Asked {
            kind: PromptKind::Password,
            message: message.to_string(),
            default: None,
            required: false,
            choices: vec![],
        })?;

        match answer {
            Answer::Password(secret) => Ok(secret),
            other => Err(unexpected(message, &other)),
        }
    }
}
