use super::{
    process::{isolate, sort_by_arrival, sort_by_id, Process, Time},
    workload::validate,
    Scheduler, SchedulerResult,
};
use log::{debug, trace};

/// First-come, first-served: arrival order, no preemption.
#[derive(Debug, Default, Clone, Copy)]
pub struct FcfsScheduler;

impl FcfsScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    fn schedule(&self, processes: &[Process]) -> SchedulerResult<Vec<Process>> {
        validate(processes)?;
        let mut processes = isolate(processes);
        sort_by_arrival(&mut processes);
        debug!("{}: scheduling {} processes", Self::NAME, processes.len());

        let mut current_time: Time = 0;
        for process in processes.iter_mut() {
            current_time = current_time.max(process.arrival());
            current_time += process.run_for(process.burst());
            process.complete_at(current_time);
            trace!("{}: P{} done at {}", Self::NAME, process.id(), current_time);
        }

        sort_by_id(&mut processes);
        Ok(processes)
    }
}
