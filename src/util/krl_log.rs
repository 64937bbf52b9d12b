use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, log_enabled, warn, Level};

// Defines the type of logs
// https://stackoverflow.com/questions/69015213/how-can-i-display-an-enum-in-lowercase
#[derive (Debug, Clone, Copy, PartialEq, strum::Display)]
#[strum (serialize_all = "UPPERCASE")]
pub enum LogTypes {
    Info,
    Warning,
    Error,
    Debug
}

// Defines where the logs can come from
#[derive (Debug, Clone, Copy, PartialEq, strum::Display)]
#[strum (serialize_all = "UPPERCASE")]
pub enum LogSources {
    Lexer,
    Parser,
    SemanticAnalyzer
}

// Whether debug logs from a source are shown or dropped
#[derive (Debug, Clone, Copy, PartialEq)]
pub enum LogMode {
    Verbose,
    Simple
}

// One verbose flag per log source, all sources start out verbose
static VERBOSE_MODES: [AtomicBool; 3] = [
    AtomicBool::new(true),
    AtomicBool::new(true),
    AtomicBool::new(true)
];

// Function that logs a message with the given type and source
pub fn log(log_type: LogTypes, src: LogSources, msg: String) {
    let target: &str = log_target(&src);

    match log_type {
        LogTypes::Debug => {
            // Only log if in verbose mode
            if is_verbose_mode(&src) {
                debug!(target: target, "[{} - {}]: {}", log_type, src, msg);
            }
        },
        LogTypes::Error => error!(target: target, "[{} - {}]: {}", log_type, src, msg),
        LogTypes::Warning => warn!(target: target, "[{} - {}]: {}", log_type, src, msg),
        LogTypes::Info => info!(target: target, "[{} - {}]: {}", log_type, src, msg)
    }
}

// Logs a rendered tree one line at a time so the indentation survives
pub fn print_tree(src: LogSources, tree: String) {
    for line in tree.lines() {
        log(LogTypes::Debug, src, String::from(line));
    }
}

// Switches a source between verbose and simple logging
pub fn set_log_mode(src: LogSources, mode: LogMode) {
    VERBOSE_MODES[source_index(&src)].store(mode == LogMode::Verbose, Ordering::Relaxed);
}

pub fn is_verbose_mode(src: &LogSources) -> bool {
    return VERBOSE_MODES[source_index(src)].load(Ordering::Relaxed);
}

// Whether a debug entry from the source would reach the installed logger
pub fn is_debug_enabled(src: &LogSources) -> bool {
    return is_verbose_mode(src) && log_enabled!(target: log_target(src), Level::Debug);
}

fn source_index(src: &LogSources) -> usize {
    return match src {
        LogSources::Lexer => 0,
        LogSources::Parser => 1,
        LogSources::SemanticAnalyzer => 2
    };
}

// The log target lets hosts filter by pipeline stage
fn log_target(src: &LogSources) -> &'static str {
    return match src {
        LogSources::Lexer => "krl::lexer",
        LogSources::Parser => "krl::parser",
        LogSources::SemanticAnalyzer => "krl::semantic_analyzer"
    };
}
