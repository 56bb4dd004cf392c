use super::{
    process::{isolate, sort_by_arrival, sort_by_id, Process, Time},
    workload::validate,
    Scheduler, SchedulerResult,
};
use log::{debug, trace};
use std::collections::VecDeque;

/// Shortest job first, non-preemptive. Among arrived jobs the shortest burst
/// runs to completion; equal bursts go in order of arrival into the pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct SjfScheduler;

impl SjfScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "SJF (Non-Preemptive)";

    fn schedule(&self, processes: &[Process]) -> SchedulerResult<Vec<Process>> {
        validate(processes)?;
        let mut pending = isolate(processes);
        sort_by_arrival(&mut pending);
        debug!("{}: scheduling {} processes", Self::NAME, pending.len());

        let mut pending = VecDeque::from(pending);
        let mut arrived: Vec<Process> = Vec::new();
        let mut completed = Vec::with_capacity(pending.len());
        let mut current_time: Time = 0;

        while !pending.is_empty() || !arrived.is_empty() {
            while let Some(process) = pending.front() {
                if !process.has_arrived(current_time) {
                    break;
                }
                arrived.extend(pending.pop_front());
            }

            // Find the shortest job in the pool, the first one wins ties
            let Some(shortest) = arrived
                .iter()
                .enumerate()
                .min_by_key(|(_, process)| process.burst())
                .map(|(index, _)| index)
            else {
                if let Some(next) = pending.front() {
                    trace!("{}: idle from {} to {}", Self::NAME, current_time, next.arrival());
                    current_time = next.arrival();
                }
                continue;
            };

            let mut process = arrived.remove(shortest);
            current_time += process.run_for(process.burst());
            process.complete_at(current_time);
            trace!("{}: P{} done at {}", Self::NAME, process.id(), current_time);
            completed.push(process);
        }

        sort_by_id(&mut completed);
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(result: &[Process]) -> Vec<Time> {
        result.iter().map(Process::completion).collect()
    }

    #[test]
    fn picks_shortest_arrived_job() {
        let processes = vec![
            Process::new(1, 0, 7),
            Process::new(2, 2, 4),
            Process::new(3, 4, 1),
            Process::new(4, 5, 4),
        ];
        let result = SjfScheduler::new().schedule(&processes).unwrap();
        assert_eq!(completions(&result), vec![7, 12, 8, 16]);
        let waiting: Vec<_> = result.iter().map(Process::waiting).collect();
        assert_eq!(waiting, vec![0, 6, 3, 7]);
    }

    #[test]
    fn does_not_preempt_for_shorter_arrival() {
        let processes = vec![Process::new(1, 0, 10), Process::new(2, 1, 1)];
        let result = SjfScheduler::new().schedule(&processes).unwrap();
        assert_eq!(completions(&result), vec![10, 11]);
    }

    #[test]
    fn equal_bursts_keep_arrival_order() {
        let processes = vec![
            Process::new(1, 1, 3),
            Process::new(2, 0, 3),
            Process::new(3, 0, 3),
        ];
        let result = SjfScheduler::new().schedule(&processes).unwrap();
        // P2 and P3 arrive first, P1 only joins once P2 is running
        assert_eq!(completions(&result), vec![9, 3, 6]);
    }

    #[test]
    fn skips_idle_gaps() {
        let processes = vec![Process::new(1, 5, 2), Process::new(2, 20, 1)];
        let result = SjfScheduler::new().schedule(&processes).unwrap();
        assert_eq!(completions(&result), vec![7, 21]);
        assert!(result.iter().all(|p| p.waiting() == 0));
    }
}
