use super::{
    process::{Pid, Process, Time},
    SchedulerError, SchedulerResult,
};

/// The canonical, validated input of a comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
    quantum: Option<i64>,
}

impl Workload {
    /// Builds a workload from `(arrival, burst)` pairs in input order. Ids are
    /// assigned from 1 by position. The quantum is only checked once Round
    /// Robin asks for it.
    pub fn from_raw(entries: &[(i64, i64)], quantum: Option<i64>) -> SchedulerResult<Self> {
        if entries.is_empty() {
            return Err(SchedulerError::InvalidInput(
                "at least one process is required".to_owned(),
            ));
        }

        let processes = entries
            .iter()
            .enumerate()
            .map(|(index, &(arrival, burst))| {
                let id = Pid::try_from(index + 1).map_err(|_| {
                    SchedulerError::InvalidInput("too many processes".to_owned())
                })?;
                if arrival < 0 {
                    return Err(SchedulerError::InvalidInput(format!(
                        "P{id} has negative arrival time {arrival}"
                    )));
                }
                if burst <= 0 {
                    return Err(SchedulerError::InvalidInput(format!(
                        "P{id} has non-positive burst time {burst}"
                    )));
                }
                Ok(Process::new(id, arrival as Time, burst as Time))
            })
            .collect::<SchedulerResult<Vec<_>>>()?;
        check_horizon(&processes)?;

        Ok(Self { processes, quantum })
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// The quantum, if one was given and it is usable.
    pub fn quantum(&self) -> Option<Time> {
        self.quantum.and_then(|quantum| validate_quantum(quantum).ok())
    }

    /// The quantum Round Robin must run with; missing or non-positive is an
    /// input error.
    pub fn quantum_for_rr(&self) -> SchedulerResult<Time> {
        let quantum = self.quantum.ok_or_else(|| {
            SchedulerError::InvalidInput("Round Robin requires a time quantum".to_owned())
        })?;
        validate_quantum(quantum)
    }
}

fn validate_quantum(quantum: i64) -> SchedulerResult<Time> {
    if quantum <= 0 {
        return Err(SchedulerError::InvalidInput(format!(
            "time quantum must be positive, got {quantum}"
        )));
    }
    Ok(quantum as Time)
}

/// Every clock value a discipline can reach is at most the latest arrival
/// plus the total work, so that sum has to fit in `Time`.
fn check_horizon(processes: &[Process]) -> SchedulerResult<()> {
    let latest = processes.iter().map(Process::arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest, |horizon, process| horizon.checked_add(process.burst()))
        .map(|_| ())
        .ok_or_else(|| {
            SchedulerError::InvalidInput(
                "latest arrival plus total burst time overflows the clock".to_owned(),
            )
        })
}

/// Checks a process list handed straight to a scheduler.
pub(crate) fn validate(processes: &[Process]) -> SchedulerResult<()> {
    if processes.is_empty() {
        return Err(SchedulerError::InvalidInput(
            "at least one process is required".to_owned(),
        ));
    }
    if let Some(process) = processes.iter().find(|process| process.burst() == 0) {
        return Err(SchedulerError::InvalidInput(format!(
            "P{} has non-positive burst time 0",
            process.id()
        )));
    }
    check_horizon(processes)
}
