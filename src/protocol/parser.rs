//! DUI command parser.
//!
//! Parses incoming DUI protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use crate::board::province::Power;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoParams {
    pub movetime: Option<u64>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub infinite: bool,
}

impl Default for GoParams {
    fn default() -> Self {
        Self {
            movetime: None,
            depth: None,
            nodes: None,
            infinite: false,
        }
    }
}

/// A parsed server-to-engine DUI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the DUI protocol handshake.
    Dui,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset engine state for a new game.
    NewGame,

    /// Set the board position from a DFEN string.
    Position { dfen: String },

    /// Set the active power for the current position.
    SetPower { power: Power },

    /// Begin calculating orders with optional search constraints.
    Go(GoParams),

    /// Interrupt the current search immediately.
    Stop,

    /// Deliver a diplomatic press message (structured intent).
    Press { raw: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "dui" => Some(Command::Dui),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "stop" => Some(Command::Stop),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "setpower" => parse_setpower(&tokens),
        "go" => parse_go(&tokens),
        "press" => parse_press(&tokens, trimmed),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    // Find the "value" keyword to split name from value.
    // The name can be multi-word in theory (UCI allows it), but we keep it simple.
    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => {
            let name = tokens[2..].join(" ");
            (name, None)
        }
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <dfen>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <dfen>'");
        return None;
    }
    // DFEN is a single token (no spaces) following "position"
    let dfen = tokens[1].to_string();
    Some(Command::Position { dfen })
}

/// Parses `setpower <power>`.
fn parse_setpower(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed setpower: expected 'setpower <power>'");
        return None;
    }
    match Power::from_name(tokens[1]) {
        Some(power) => Some(Command::SetPower { power }),
        None => {
            eprintln!("unknown power: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `go [movetime <ms>] [depth <n>] [nodes <n>] [infinite]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "movetime" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u64>() {
                        Ok(v) => params.movetime = Some(v),
                        Err(_) => {
                            eprintln!("invalid movetime value: '{}'", tokens[i]);
                        }
                    }
                }
            }
            "depth" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => {
                            eprintln!("invalid depth value: '{}'", tokens[i]);
                        }
                    }
                }
            }
            "nodes" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u64>() {
                        Ok(v) => params.nodes = Some(v),
                        Err(_) => {
                            eprintln!("invalid nodes value: '{}'", tokens[i]);
                        }
                    }
                }
            }
            "infinite" => {
                params.infinite = true;
            }
            other => {
                eprintln!("unknown go parameter: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}

/// Parses `press <structured_intent>` -- captures everything after "press" as raw text.
fn parse_press(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed press: expected 'press <structured_intent>'");
        return None;
    }
    // Capture everything after "press "
    let raw = full_line
        .trim()
        .strip_prefix("press")
        .unwrap_or("")
        .trim()
        .to_string();
    Some(Command::Press { raw })
}
