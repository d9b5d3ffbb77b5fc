//! The built-in slash-command catalog.
//!
//! Completion and dispatch consult this registry; clap parses the arguments.
//! Names, descriptions, subcommands and long options must match the clap
//! definitions in [`crate::commands`].

use replkit_core::{
    CommandDescriptor, CommandRegistry, OptionDescriptor, RegistryError, SubcommandDescriptor,
};

/// Build the registry of every command the REPL understands.
pub fn build_registry() -> Result<CommandRegistry, RegistryError> {
    let config = CommandDescriptor::new("config", "Configuration management commands")
        .subcommand(SubcommandDescriptor::new(
            "show",
            "Display current configuration",
        ))
        .subcommand(
            SubcommandDescriptor::new("load", "Load configuration from a YAML file")
                .option(
                    OptionDescriptor::value("file")
                        .short('f')
                        .describe("Path to config file"),
                ),
        )
        .subcommand(
            SubcommandDescriptor::new("save", "Save current configuration to a YAML file").option(
                OptionDescriptor::value("file")
                    .short('f')
                    .describe("Path to save config file (defaults to the active config file)"),
            ),
        )
        .subcommand(
            SubcommandDescriptor::new("get", "Get a configuration value").option(
                OptionDescriptor::value("key")
                    .short('k')
                    .describe("Config key (dot notation, e.g., logging.level)"),
            ),
        )
        .subcommand(
            SubcommandDescriptor::new("set", "Set a configuration value")
                .option(
                    OptionDescriptor::value("key")
                        .short('k')
                        .describe("Config key (dot notation, e.g., logging.level)"),
                )
                .option(
                    OptionDescriptor::value("value")
                        .short('v')
                        .describe("Config value"),
                ),
        );

    let process = CommandDescriptor::new("process", "Process an input file (example business logic)")
        .option(
            OptionDescriptor::value("input")
                .short('i')
                .describe("Path to input file"),
        )
        .option(
            OptionDescriptor::value("output-dir")
                .short('o')
                .describe("Output directory (defaults to paths.output_dir)"),
        );

    Ok(CommandRegistry::builder()
        .register(CommandDescriptor::new("help", "Show available commands"))?
        .register(CommandDescriptor::new("quit", "Exit the REPL"))?
        .register(CommandDescriptor::new("exit", "Exit the REPL"))?
        .register(config)?
        .register(process)?
        .build())
}
