use super::{
    process::{isolate, sort_by_arrival, sort_by_id, Process, Time},
    workload::validate,
    Scheduler, SchedulerError, SchedulerResult,
};
use log::{debug, trace};
use std::collections::VecDeque;

/// Fixed-quantum time slicing over a FIFO ready queue.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinScheduler {
    quantum: Time,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Time) -> SchedulerResult<Self> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidInput(
                "time quantum must be positive, got 0".to_owned(),
            ));
        }
        Ok(Self { quantum })
    }
}

struct ReadyQueue {
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl ReadyQueue {
    fn new(len: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(len),
            queued: vec![false; len],
        }
    }

    fn push(&mut self, index: usize) {
        if !self.queued[index] {
            self.queued[index] = true;
            self.queue.push_back(index);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.queued[index] = false;
        Some(index)
    }

    /// Enqueues, in list order, every unfinished process that is not already
    /// queued or running and whose arrival satisfies `arrived`.
    fn admit(
        &mut self,
        processes: &[Process],
        running: Option<usize>,
        arrived: impl Fn(&Process) -> bool,
    ) {
        for (index, process) in processes.iter().enumerate() {
            if arrived(process) && !process.is_finished() && Some(index) != running {
                self.push(index);
            }
        }
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin";

    fn schedule(&self, processes: &[Process]) -> SchedulerResult<Vec<Process>> {
        validate(processes)?;
        let mut processes = isolate(processes);
        sort_by_arrival(&mut processes);
        debug!(
            "{}: scheduling {} processes, quantum {}",
            Self::NAME,
            processes.len(),
            self.quantum
        );

        let mut ready = ReadyQueue::new(processes.len());
        let mut current_time: Time = 0;
        let mut completed = 0;
        let mut running: Option<usize> = None;

        while completed < processes.len() {
            let now = current_time;
            ready.admit(&processes, running, |process| process.has_arrived(now));

            // A process whose quantum expired goes behind the new arrivals
            if let Some(index) = running {
                if !processes[index].is_finished() {
                    ready.push(index);
                }
            }

            running = ready.pop();
            let Some(index) = running else {
                current_time = processes
                    .iter()
                    .filter(|process| !process.is_finished())
                    .map(Process::arrival)
                    .min()
                    .unwrap_or(current_time + 1)
                    .max(current_time + 1);
                continue;
            };

            let process = &mut processes[index];
            let slice_start = current_time;
            current_time += process.run_for(self.quantum);

            if process.is_finished() {
                process.complete_at(current_time);
                completed += 1;
                running = None;
                trace!("{}: P{} done at {}", Self::NAME, process.id(), current_time);
            } else {
                trace!(
                    "{}: P{} preempted at {} with {} left",
                    Self::NAME,
                    process.id(),
                    current_time,
                    process.remaining()
                );
            }

            let now = current_time;
            ready.admit(&processes, running, |process| {
                process.arrival() > slice_start && process.has_arrived(now)
            });
        }

        sort_by_id(&mut processes);
        Ok(processes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings(result: &[Process]) -> Vec<(Time, Time, Time)> {
        result
            .iter()
            .map(|p| (p.completion(), p.waiting(), p.turnaround()))
            .collect()
    }

    #[test]
    fn classic_quantum_four() {
        let processes = vec![
            Process::new(1, 0, 24),
            Process::new(2, 0, 3),
            Process::new(3, 0, 3),
        ];
        let result = RoundRobinScheduler::new(4)
            .unwrap()
            .schedule(&processes)
            .unwrap();
        assert_eq!(timings(&result), vec![(30, 6, 30), (7, 4, 7), (10, 7, 10)]);
    }

    #[test]
    fn preempted_process_queues_behind_mid_slice_arrival() {
        // P2 arrives during P1's first slice and must run before P1 resumes
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 1, 2)];
        let result = RoundRobinScheduler::new(2)
            .unwrap()
            .schedule(&processes)
            .unwrap();
        assert_eq!(timings(&result), vec![(7, 2, 7), (4, 1, 3)]);
    }

    #[test]
    fn arrival_at_slice_boundary_precedes_requeue() {
        let processes = vec![
            Process::new(1, 0, 4),
            Process::new(2, 2, 2),
            Process::new(3, 2, 2),
        ];
        let result = RoundRobinScheduler::new(2)
            .unwrap()
            .schedule(&processes)
            .unwrap();
        // P1 runs 0..2, then P2 2..4, P3 4..6, P1 6..8
        assert_eq!(timings(&result), vec![(8, 4, 8), (4, 0, 2), (6, 2, 4)]);
    }

    #[test]
    fn idles_between_arrivals() {
        let processes = vec![Process::new(1, 0, 1), Process::new(2, 6, 3)];
        let result = RoundRobinScheduler::new(2)
            .unwrap()
            .schedule(&processes)
            .unwrap();
        assert_eq!(timings(&result), vec![(1, 0, 1), (9, 0, 3)]);
    }

    #[test]
    fn zero_quantum_is_rejected() {
        assert!(matches!(
            RoundRobinScheduler::new(0),
            Err(SchedulerError::InvalidInput(_))
        ));
    }
}
