//! Shell state and command dispatch.

use std::io::{self, IsTerminal};

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    calendar::SystemClock,
    config::{Config, ConfigManager},
    errors::TrackerError,
    source::JsonSource,
    tracker::TrackerManager,
    utils::build_info,
    view::{self, RenderOptions},
};

use super::{
    navigation::{self, BrowseAction, RawMode},
    output,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No tracker open. Use `open <code>` first.")]
    NoTrackerOpen,
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub(crate) struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub(crate) const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "clients",
        usage: "clients",
        summary: "Reload and list tracked clients",
    },
    CommandSpec {
        name: "open",
        usage: "open <code>",
        summary: "Open the budget tracker for a client",
    },
    CommandSpec {
        name: "show",
        usage: "show",
        summary: "Render the open tracker",
    },
    CommandSpec {
        name: "select",
        usage: "select <1-3>",
        summary: "Jump to a month of the quarter",
    },
    CommandSpec {
        name: "swipe",
        usage: "swipe <delta-x>",
        summary: "Apply a horizontal gesture (positive advances)",
    },
    CommandSpec {
        name: "next",
        usage: "next",
        summary: "Advance one month",
    },
    CommandSpec {
        name: "prev",
        usage: "prev",
        summary: "Go back one month",
    },
    CommandSpec {
        name: "browse",
        usage: "browse",
        summary: "Page months with the arrow keys (Esc to leave)",
    },
    CommandSpec {
        name: "close",
        usage: "close",
        summary: "Close the open tracker",
    },
    CommandSpec {
        name: "config",
        usage: "config [show|set <key> <value>]",
        summary: "Show or change saved preferences",
    },
    CommandSpec {
        name: "version",
        usage: "version",
        summary: "Show build information",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "List commands",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
];

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    manager: TrackerManager,
    render: RenderOptions,
    config: Config,
    config_store: Option<ConfigManager>,
}

/// Keys accepted by `config set`.
const CONFIG_KEYS: &str = "swipe_threshold, color, currency_symbol, grouping_separator";

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load().unwrap_or_else(|err| {
            output::warning(format!("Ignoring unreadable configuration: {err}"));
            Config::default()
        });
        let data_dir = config_manager.data_dir(&config);
        tracing::debug!(data_dir = %data_dir.display(), "using tracker data directory");

        let color = config.color
            && mode == CliMode::Interactive
            && io::stdout().is_terminal()
            && std::env::var_os("NO_COLOR").is_none();
        output::set_color(color);

        let manager = TrackerManager::new(
            Box::new(JsonSource::new(data_dir)),
            Box::new(SystemClock),
            config.swipe_threshold,
        );
        let render = RenderOptions {
            color,
            currency: config.currency.clone(),
        };
        Ok(Self::with_manager(mode, manager, render).with_config_store(config_manager, config))
    }

    pub(crate) fn with_manager(mode: CliMode, manager: TrackerManager, render: RenderOptions) -> Self {
        Self {
            mode,
            running: true,
            manager,
            render,
            config: Config::default(),
            config_store: None,
        }
    }

    pub(crate) fn with_config_store(mut self, store: ConfigManager, config: Config) -> Self {
        self.config = config;
        self.config_store = Some(store);
        self
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = COMMANDS.iter().map(|spec| spec.name).collect();
        names.push("quit");
        names
    }

    pub(crate) fn prompt(&self) -> String {
        match self.manager.session() {
            Some(session) => format!(
                "tracker[{} {}]> ",
                session.client().code,
                session.active_month().short_name()
            ),
            None => "tracker> ".to_string(),
        }
    }

    pub(crate) fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        let result = match command {
            "clients" => self.cmd_clients(),
            "open" => self.cmd_open(args),
            "show" => self.cmd_show(),
            "select" => self.cmd_select(args),
            "swipe" => self.cmd_swipe(args),
            "next" => self.cmd_step(1.0),
            "prev" => self.cmd_step(-1.0),
            "browse" => self.cmd_browse(),
            "close" => self.cmd_close(),
            "config" => self.cmd_config(args),
            "version" => self.cmd_version(),
            "help" => self.cmd_help(),
            "exit" | "quit" => Err(CommandError::ExitRequested),
            _ => {
                output::warning(format!("Unknown command `{raw}`. Type `help` for a list."));
                Ok(())
            }
        };
        match result {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help` for usage details.");
            }
            other => output::error(other),
        }
        Ok(())
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    fn cmd_clients(&mut self) -> CommandResult {
        if let Err(err) = self.manager.refresh_clients() {
            output::warning(format!("Could not refresh clients ({err}); showing cached list."));
        }
        output::info(view::render_client_list(
            self.manager.directory().iter(),
            &self.render,
        ));
        Ok(())
    }

    fn cmd_open(&mut self, args: &[&str]) -> CommandResult {
        let code = args
            .first()
            .ok_or_else(|| CommandError::InvalidArguments("usage: open <code>".into()))?;
        let opened = self.manager.open_client(code).map(|_| ());
        match opened {
            Ok(()) => self.cmd_show(),
            Err(TrackerError::ClientNotFound(_)) => {
                output::info(view::render_missing());
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn cmd_show(&mut self) -> CommandResult {
        let snapshot = self.manager.snapshot().ok_or(CommandError::NoTrackerOpen)?;
        output::info(view::render_tracker(&snapshot, &self.render));
        Ok(())
    }

    fn cmd_select(&mut self, args: &[&str]) -> CommandResult {
        self.require_session()?;
        let position: usize = args
            .first()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| CommandError::InvalidArguments("usage: select <1-3>".into()))?;
        // Positions outside the quarter are ignored, like an off-screen dot.
        let moved = position
            .checked_sub(1)
            .and_then(|index| self.manager.select_index(index));
        if moved.is_some() {
            self.cmd_show()?;
        }
        Ok(())
    }

    fn cmd_swipe(&mut self, args: &[&str]) -> CommandResult {
        self.require_session()?;
        let delta_x: f64 = args
            .first()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| CommandError::InvalidArguments("usage: swipe <delta-x>".into()))?;
        if self.manager.swipe(delta_x).is_some() {
            self.cmd_show()?;
        }
        Ok(())
    }

    /// Keyboard stand-in for a full-length gesture.
    fn cmd_step(&mut self, sign: f64) -> CommandResult {
        self.require_session()?;
        let delta_x = sign * self.manager.swipe_threshold().max(1.0);
        if self.manager.swipe(delta_x).is_some() {
            self.cmd_show()?;
        }
        Ok(())
    }

    fn cmd_browse(&mut self) -> CommandResult {
        self.require_session()?;
        if self.mode != CliMode::Interactive || !io::stdin().is_terminal() {
            return Err(CommandError::InvalidArguments(
                "browse needs an interactive terminal".into(),
            ));
        }
        let step = self.manager.swipe_threshold().max(1.0);
        let _raw = RawMode::enable()?;
        loop {
            let Some(snapshot) = self.manager.snapshot() else {
                break;
            };
            let mut screen = view::render_tracker(&snapshot, &self.render);
            screen.push_str("\n\n←/→ change month · 1-3 jump · Esc back");
            navigation::redraw(&screen)?;
            match navigation::browse_action(navigation::read_nav_key()?) {
                BrowseAction::Swipe(direction) => {
                    self.manager.swipe(f64::from(direction) * step);
                }
                BrowseAction::Select(index) => {
                    self.manager.select_index(index);
                }
                BrowseAction::Quit => break,
                BrowseAction::Ignore => {}
            }
        }
        Ok(())
    }

    fn cmd_close(&mut self) -> CommandResult {
        self.require_session()?;
        self.manager.close();
        output::success("Tracker closed.");
        Ok(())
    }

    fn cmd_config(&mut self, args: &[&str]) -> CommandResult {
        match args {
            [] | ["show"] => self.show_config(),
            ["set", key, value @ ..] if !value.is_empty() => {
                self.set_config_value(key, &value.join(" "))
            }
            _ => Err(CommandError::InvalidArguments(
                "usage: config [show|set <key> <value>]".into(),
            )),
        }
    }

    fn show_config(&self) -> CommandResult {
        if let Some(store) = &self.config_store {
            output::info(format!("Configuration file: {}", store.path().display()));
        }
        let config = &self.config;
        output::info(format!("  swipe_threshold     {}", config.swipe_threshold));
        output::info(format!("  color               {}", config.color));
        output::info(format!("  currency_symbol     {}", config.currency.symbol));
        output::info(format!(
            "  grouping_separator  '{}'",
            config.currency.grouping_separator
        ));
        Ok(())
    }

    fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        match key.to_ascii_lowercase().as_str() {
            "swipe_threshold" => {
                updated.swipe_threshold = value.parse().map_err(|_| {
                    CommandError::InvalidArguments(format!("`{value}` is not a number"))
                })?;
            }
            "color" => {
                updated.color = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => {
                        return Err(CommandError::InvalidArguments(
                            "color expects on or off".into(),
                        ))
                    }
                };
            }
            "currency_symbol" => updated.currency.symbol = value.to_string(),
            "grouping_separator" => {
                let mut chars = value.chars();
                updated.currency.grouping_separator = match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch,
                    _ => {
                        return Err(CommandError::InvalidArguments(
                            "grouping_separator expects a single character".into(),
                        ))
                    }
                };
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown config key `{other}` (expected one of: {CONFIG_KEYS})"
                )))
            }
        }

        let store = self.config_store.as_ref().ok_or_else(|| {
            CommandError::Tracker(TrackerError::Config("no configuration file in use".into()))
        })?;
        store.save(&updated)?;
        tracing::info!(key, "configuration updated");

        self.manager.set_swipe_threshold(updated.swipe_threshold);
        self.render.currency = updated.currency.clone();
        self.render.color = self.render.color && updated.color;
        output::set_color(self.render.color);
        self.config = updated;
        output::success(format!("Saved {key}."));
        Ok(())
    }

    fn cmd_version(&mut self) -> CommandResult {
        output::info(build_info::current().summary());
        Ok(())
    }

    fn cmd_help(&mut self) -> CommandResult {
        output::info("Available commands:");
        for spec in COMMANDS {
            output::info(format!("  {:<18}{}", spec.usage, spec.summary));
        }
        Ok(())
    }

    fn require_session(&self) -> CommandResult {
        self.manager
            .session()
            .map(|_| ())
            .ok_or(CommandError::NoTrackerOpen)
    }

    #[cfg(test)]
    pub(crate) fn manager(&self) -> &TrackerManager {
        &self.manager
    }
}
