//! Loading a workload from files, standard input or command-line pairs.
//!
//! Two formats are understood. JSON files (by `.json` extension):
//!
//! ```json
//! { "processes": [{ "arrival": 0, "burst": 5 }], "quantum": 4 }
//! ```
//!
//! Anything else is read as a whitespace separated token stream: the process
//! count, then an `arrival burst` pair per process, then an optional quantum.

use crate::scheduler::{SchedulerError, Workload};
use log::debug;
use serde::Deserialize;
use std::{
    fs,
    io::{self, Read},
    path::Path,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// A workload as written by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawWorkload {
    pub processes: Vec<RawProcess>,
    #[serde(default)]
    pub quantum: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RawProcess {
    pub arrival: i64,
    pub burst: i64,
}

impl RawWorkload {
    /// Validates the workload. `quantum`, when given, replaces the one read
    /// from the input.
    pub fn into_workload(self, quantum: Option<i64>) -> Result<Workload, ConfigError> {
        let entries: Vec<_> = self
            .processes
            .iter()
            .map(|process| (process.arrival, process.burst))
            .collect();
        Ok(Workload::from_raw(&entries, quantum.or(self.quantum))?)
    }
}

pub fn parse_tokens(text: &str) -> Result<RawWorkload, ConfigError> {
    let mut tokens = text.split_whitespace().map(|token| {
        token
            .parse::<i64>()
            .map_err(|_| ConfigError::Parse(format!("'{token}' is not an integer")))
    });
    let mut next = |what: String| {
        tokens
            .next()
            .unwrap_or_else(|| Err(ConfigError::Parse(format!("missing {what}"))))
    };

    let count = next("process count".to_owned())?;
    if count <= 0 {
        return Err(SchedulerError::InvalidInput(format!(
            "process count must be positive, got {count}"
        ))
        .into());
    }

    let mut processes = Vec::new();
    for id in 1..=count {
        let arrival = next(format!("arrival time of P{id}"))?;
        let burst = next(format!("burst time of P{id}"))?;
        processes.push(RawProcess { arrival, burst });
    }

    let quantum = match tokens.next() {
        Some(quantum) => Some(quantum?),
        None => None,
    };
    if tokens.next().is_some() {
        return Err(ConfigError::Parse(
            "unexpected tokens after the time quantum".to_owned(),
        ));
    }

    Ok(RawWorkload { processes, quantum })
}

pub fn parse_json(text: &str) -> Result<RawWorkload, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_file(path: &Path) -> Result<RawWorkload, ConfigError> {
    let text = fs::read_to_string(path)?;
    debug!("loaded workload from {}", path.display());
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_json(&text),
        _ => parse_tokens(&text),
    }
}

pub fn read_tokens(mut reader: impl Read) -> Result<RawWorkload, ConfigError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_tokens(&text)
}

/// Parses an `ARRIVAL:BURST` pair given on the command line.
pub fn parse_process_arg(value: &str) -> Result<RawProcess, String> {
    let (arrival, burst) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ARRIVAL:BURST, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|_| format!("'{part}' is not an integer"))
    };
    Ok(RawProcess {
        arrival: parse(arrival)?,
        burst: parse(burst)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_stream_in_prompt_order() {
        let raw = parse_tokens("3\n0 24\n0 3\n0 3\n4\n").unwrap();
        assert_eq!(raw.processes.len(), 3);
        assert_eq!(raw.processes[0], RawProcess { arrival: 0, burst: 24 });
        assert_eq!(raw.quantum, Some(4));
    }

    #[test]
    fn quantum_is_optional() {
        let raw = parse_tokens("1 0 5").unwrap();
        assert_eq!(raw.quantum, None);
        let workload = raw.into_workload(Some(2)).unwrap();
        assert_eq!(workload.quantum(), Some(2));
    }

    #[test]
    fn truncated_or_garbled_input() {
        assert!(matches!(parse_tokens("2 0 5 1"), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_tokens("1 0 five"), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_tokens("1 0 5 2 9"), Err(ConfigError::Parse(_))));
        assert!(matches!(parse_tokens(""), Err(ConfigError::Parse(_))));
        assert!(matches!(
            parse_tokens("0"),
            Err(ConfigError::Scheduler(SchedulerError::InvalidInput(_)))
        ));
    }

    #[test]
    fn json_workload() {
        let raw =
            parse_json(r#"{"processes":[{"arrival":0,"burst":5},{"arrival":1,"burst":3}]}"#)
                .unwrap();
        assert_eq!(raw.processes.len(), 2);
        assert_eq!(raw.quantum, None);
        assert!(parse_json(r#"{"processes":[{"arrival":0}]}"#).is_err());
    }

    #[test]
    fn invalid_values_surface_as_scheduler_errors() {
        let raw = parse_tokens("1 0 0 2").unwrap();
        assert!(matches!(
            raw.into_workload(None),
            Err(ConfigError::Scheduler(SchedulerError::InvalidInput(_)))
        ));
    }

    #[test]
    fn process_arg_pairs() {
        assert_eq!(
            parse_process_arg("2:7"),
            Ok(RawProcess { arrival: 2, burst: 7 })
        );
        assert!(parse_process_arg("2-7").is_err());
        assert!(parse_process_arg("a:7").is_err());
    }
}
