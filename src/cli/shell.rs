use std::io::{self, BufRead, Lines, StdinLock};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};

use super::context::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use super::output;

const SCRIPT_ENV: &str = "TRACKER_CORE_CLI_SCRIPT";

/// Starts the shell. Setting `TRACKER_CORE_CLI_SCRIPT` switches to reading
/// plain commands from stdin with no prompt or line editing.
pub fn run_cli() -> Result<(), CliError> {
    let mode = match std::env::var_os(SCRIPT_ENV) {
        Some(_) => CliMode::Script,
        None => CliMode::Interactive,
    };
    let mut context = ShellContext::new(mode)?;
    let mut input = match mode {
        CliMode::Interactive => {
            output::info("Type `help` for commands, `clients` to list budgets.");
            Input::editor(&context)?
        }
        CliMode::Script => Input::Piped(io::stdin().lock().lines()),
    };
    drive(&mut context, &mut input)
}

/// Where command lines come from.
enum Input {
    Editor(Box<Editor<CommandHelper, DefaultHistory>>),
    Piped(Lines<StdinLock<'static>>),
}

impl Input {
    fn editor(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(context.command_names())));
        Ok(Input::Editor(Box::new(editor)))
    }

    /// Next line, or `None` once input is exhausted or interrupted.
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self {
            Input::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.trim()).ok();
                    }
                    Ok(Some(line))
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    output::info("Exiting shell.");
                    Ok(None)
                }
                Err(err) => Err(err.into()),
            },
            Input::Piped(lines) => Ok(lines.next().transpose()?),
        }
    }
}

fn drive(context: &mut ShellContext, input: &mut Input) -> Result<(), CliError> {
    while context.running {
        let Some(line) = input.next_line(&context.prompt())? else {
            break;
        };
        match execute_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => context.running = false,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn execute_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let words = match tokenize(line) {
        Ok(words) => words,
        Err(err) => {
            context.print_warning(&format!("Could not parse input: {err}"));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((head, rest)) = words.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    let command = head.to_ascii_lowercase();
    tracing::debug!(command = %command, args = args.len(), "running shell command");
    context.dispatch(&command, head, &args)
}

/// Splits a command line with shell quoting rules.
pub(crate) fn tokenize(line: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(line.trim())
}

/// Tab-completes the command word. Arguments are left alone.
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(mut commands: Vec<&'static str>) -> Self {
        commands.sort_unstable();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, word: &str) -> Vec<Pair> {
        let word = word.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(|name| name.starts_with(word.as_str()))
            .map(|name| Pair {
                display: (*name).to_string(),
                replacement: (*name).to_string(),
            })
            .collect()
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let start = before.len() - before.trim_start().len();
        if before[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((start, self.candidates(&before[start..])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}
