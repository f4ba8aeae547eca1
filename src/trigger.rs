//! Unit-of-work termination events that drive automatic runs.
//!
//! The host (an HTTP server, a command runner) builds one of these after each
//! request or command finishes and passes it to
//! [`Indexer::run_automatic`](crate::Indexer::run_automatic). Events carry no
//! state between invocations.

use std::path::Path;

/// Unit-of-work name of the explicit indexing command. Automatic runs
/// triggered by it are skipped.
pub const INDEX_UNIT_NAME: &str = "logdex:index";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// An HTTP response was sent.
    ResponseCompleted { route: String, status: u16 },
    /// A console command exited.
    CommandCompleted { name: String, exit_code: Option<i32> },
}

impl TriggerEvent {
    pub fn response(route: impl Into<String>, status: u16) -> Self {
        TriggerEvent::ResponseCompleted {
            route: route.into(),
            status,
        }
    }

    pub fn command(name: impl Into<String>, exit_code: Option<i32>) -> Self {
        TriggerEvent::CommandCompleted {
            name: name.into(),
            exit_code,
        }
    }

    /// Build a command event from an argv. `logdex [global options] index ...`
    /// maps to [`INDEX_UNIT_NAME`]; anything else is named by its joined argv.
    pub fn from_argv(argv: &[String], exit_code: Option<i32>) -> Self {
        let name = if is_index_invocation(argv) {
            INDEX_UNIT_NAME.to_string()
        } else {
            argv.join(" ")
        };
        Self::command(name, exit_code)
    }

    /// Name of the unit of work that just completed.
    pub fn unit_name(&self) -> &str {
        match self {
            TriggerEvent::ResponseCompleted { route, .. } => route,
            TriggerEvent::CommandCompleted { name, .. } => name,
        }
    }

    /// True when the completed unit of work was an indexing run itself.
    pub fn is_indexing_run(&self) -> bool {
        self.unit_name() == INDEX_UNIT_NAME
    }
}

/// True for `logdex index ...`, with any of the global options
/// (`--debug`, `--config FILE`, `--config=FILE`) before the subcommand.
fn is_index_invocation(argv: &[String]) -> bool {
    let Some((program, rest)) = argv.split_first() else {
        return false;
    };
    if !Path::new(program).file_stem().is_some_and(|s| s == "logdex") {
        return false;
    }

    let mut args = rest.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" => {}
            "--config" => {
                args.next();
            }
            a if a.starts_with("--config=") => {}
            subcommand => return subcommand == "index",
        }
    }
    false
}
