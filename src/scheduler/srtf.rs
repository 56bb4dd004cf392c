use super::{
    process::{isolate, sort_by_arrival, sort_by_id, Process, Time},
    workload::validate,
    Scheduler, SchedulerResult,
};
use log::{debug, trace};

/// Shortest remaining time first. The decision is retaken every time unit,
/// so a newly arrived shorter job preempts the running one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtfScheduler;

impl SrtfScheduler {
    pub fn new() -> Self {
        Self
    }

    /// Index of the arrived, unfinished process with the least remaining time.
    /// Ties go to the earliest position in the list.
    fn shortest_remaining(processes: &[Process], now: Time) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.has_arrived(now) && !process.is_finished())
            .min_by_key(|(_, process)| process.remaining())
            .map(|(index, _)| index)
    }
}

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "SJF (Preemptive/SRTF)";

    fn schedule(&self, processes: &[Process]) -> SchedulerResult<Vec<Process>> {
        validate(processes)?;
        let mut processes = isolate(processes);
        sort_by_arrival(&mut processes);
        debug!("{}: scheduling {} processes", Self::NAME, processes.len());

        let mut current_time: Time = 0;
        let mut completed = 0;
        let mut running: Option<usize> = None;

        while completed < processes.len() {
            let Some(index) = Self::shortest_remaining(&processes, current_time) else {
                // Nothing is ready, jump to the next arrival
                current_time = processes
                    .iter()
                    .filter(|process| !process.is_finished())
                    .map(Process::arrival)
                    .min()
                    .unwrap_or(current_time + 1)
                    .max(current_time + 1);
                running = None;
                continue;
            };

            if let Some(previous) = running.filter(|&previous| previous != index) {
                if !processes[previous].is_finished() {
                    trace!(
                        "{}: P{} preempted by P{} at {}",
                        Self::NAME,
                        processes[previous].id(),
                        processes[index].id(),
                        current_time
                    );
                }
            }
            running = Some(index);

            let process = &mut processes[index];
            current_time += process.run_for(1);
            if process.is_finished() {
                process.complete_at(current_time);
                completed += 1;
                trace!("{}: P{} done at {}", Self::NAME, process.id(), current_time);
            }
        }

        sort_by_id(&mut processes);
        Ok(processes)
    }
}
