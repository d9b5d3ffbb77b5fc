//! Static command catalog.
//!
//! The registry is populated once at bootstrap from a declaration list and is
//! read-only afterwards. It is consumed by the completion engine (names,
//! descriptions, subcommands, options) and by the dispatcher (exact lookup).

use thiserror::Error;

/// Errors raised while building or querying the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No command with this name is registered.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command with this name was already registered.
    #[error("Command '{0}' is registered more than once")]
    DuplicateCommand(String),

    /// The name is empty, contains whitespace, or starts with a non-alphanumeric marker.
    #[error("Invalid command name '{0}'")]
    InvalidName(String),
}

/// A named option accepted by a command or subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Long form including the leading dashes, e.g. `--file`.
    pub long_form: String,
    /// Short form including the leading dash, e.g. `-f`. Never offered by completion.
    pub short_form: Option<String>,
    /// Whether the option consumes the following token as its value.
    pub takes_value: bool,
    /// Help text shown next to the option in completion menus and `/help`.
    pub description: String,
}

impl OptionDescriptor {
    /// An option that consumes a value (`--file <path>`).
    pub fn value(long: &str) -> Self {
        Self {
            long_form: format!("--{}", long.trim_start_matches('-')),
            short_form: None,
            takes_value: true,
            description: String::new(),
        }
    }

    /// A boolean switch (`--force`).
    pub fn flag(long: &str) -> Self {
        Self {
            takes_value: false,
            ..Self::value(long)
        }
    }

    #[must_use]
    pub fn short(mut self, short: char) -> Self {
        self.short_form = Some(format!("-{short}"));
        self
    }

    #[must_use]
    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Whether `token` names this option, in either form (`--file`, `-f`, `--file=x`).
    pub fn matches_token(&self, token: &str) -> bool {
        let name = token.split_once('=').map_or(token, |(lhs, _)| lhs);
        name == self.long_form || self.short_form.as_deref() == Some(name)
    }
}

/// A subcommand nested under a top-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandDescriptor {
    pub name: String,
    pub description: String,
    pub options: Vec<OptionDescriptor>,
}

impl SubcommandDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }
}

/// A top-level command with its subcommands and options, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: String,
    pub description: String,
    pub subcommands: Vec<SubcommandDescriptor>,
    pub options: Vec<OptionDescriptor>,
}

impl CommandDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            subcommands: Vec::new(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn subcommand(mut self, subcommand: SubcommandDescriptor) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    #[must_use]
    pub fn option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    /// Case-insensitive subcommand lookup; the first declared match wins.
    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandDescriptor> {
        let needle = name.to_lowercase();
        self.subcommands
            .iter()
            .find(|sub| sub.name.to_lowercase() == needle)
    }
}

/// Immutable-at-runtime mapping from command name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::default()
    }

    /// All registered commands in declaration order.
    pub fn list_commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Exact-match lookup.
    pub fn resolve(&self, name: &str) -> Result<&CommandDescriptor, RegistryError> {
        self.commands
            .iter()
            .find(|cmd| cmd.name == name)
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_string()))
    }

    /// Case-insensitive lookup used while the user is still typing.
    pub fn lookup_ignore_case(&self, name: &str) -> Option<&CommandDescriptor> {
        let needle = name.to_lowercase();
        self.commands
            .iter()
            .find(|cmd| cmd.name.to_lowercase() == needle)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Bootstrap-only registration. Once `build` is called the catalog is frozen.
#[derive(Debug, Default)]
pub struct CommandRegistryBuilder {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistryBuilder {
    pub fn register(mut self, descriptor: CommandDescriptor) -> Result<Self, RegistryError> {
        validate_name(&descriptor.name)?;
        for sub in &descriptor.subcommands {
            validate_name(&sub.name)?;
        }
        if self.commands.iter().any(|cmd| cmd.name == descriptor.name) {
            return Err(RegistryError::DuplicateCommand(descriptor.name));
        }
        self.commands.push(descriptor);
        Ok(self)
    }

    pub fn build(self) -> CommandRegistry {
        CommandRegistry {
            commands: self.commands,
        }
    }
}

// Names are stored without the marker, so they must start alphanumerically.
fn validate_name(name: &str) -> Result<(), RegistryError> {
    let starts_ok = name.chars().next().is_some_and(char::is_alphanumeric);
    if !starts_ok || name.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(())
}
