mod aggregate;
mod display;
mod error;
mod fcfs;
mod process;
pub mod report;
mod round_robin;
mod runner;
mod sjf;
mod srtf;
mod workload;

use serde::Serialize;
use std::{fmt, str::FromStr};

pub use aggregate::{compare, AlgorithmResult, Comparison, Rating, Summary};
pub use error::{SchedulerError, SchedulerResult};
pub use fcfs::FcfsScheduler;
pub use process::{isolate, Pid, Process, Time};
pub use round_robin::RoundRobinScheduler;
pub use runner::ResultViewer;
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;
pub use workload::Workload;

pub trait Scheduler {
    const NAME: &'static str;

    /// Simulates the discipline on a private copy of `processes` and returns
    /// the completed copies in ascending id order.
    fn schedule(&self, processes: &[Process]) -> SchedulerResult<Vec<Process>>;
}

/// The four disciplines, in the fixed order they are compared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => FcfsScheduler::NAME,
            Algorithm::Sjf => SjfScheduler::NAME,
            Algorithm::Srtf => SrtfScheduler::NAME,
            Algorithm::RoundRobin => RoundRobinScheduler::NAME,
        }
    }

    pub fn run(self, workload: &Workload) -> SchedulerResult<AlgorithmResult> {
        let processes = workload.processes();
        let processes = match self {
            Algorithm::Fcfs => FcfsScheduler::new().schedule(processes)?,
            Algorithm::Sjf => SjfScheduler::new().schedule(processes)?,
            Algorithm::Srtf => SrtfScheduler::new().schedule(processes)?,
            Algorithm::RoundRobin => {
                RoundRobinScheduler::new(workload.quantum_for_rr()?)?.schedule(processes)?
            }
        };
        AlgorithmResult::new(self, processes)
    }
}

impl From<Algorithm> for &'static str {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.name()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fcfs" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "srtf" => Ok(Algorithm::Srtf),
            "rr" | "round-robin" => Ok(Algorithm::RoundRobin),
            other => Err(SchedulerError::InvalidInput(format!(
                "unknown algorithm '{other}', expected fcfs, sjf, srtf or rr"
            ))),
        }
    }
}
