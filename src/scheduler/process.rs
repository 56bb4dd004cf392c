use serde::Serialize;

pub type Pid = u32;
pub type Time = u64;

/// One schedulable unit together with the timing fields a scheduler fills in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    id: Pid,
    arrival: Time,
    burst: Time,
    #[serde(skip)]
    remaining: Time,
    completion: Time,
    waiting: Time,
    turnaround: Time,
}

impl Process {
    pub fn new(id: Pid, arrival: Time, burst: Time) -> Self {
        Self {
            id,
            arrival,
            burst,
            remaining: burst,
            completion: 0,
            waiting: 0,
            turnaround: 0,
        }
    }

    pub fn id(&self) -> Pid {
        self.id
    }

    pub fn arrival(&self) -> Time {
        self.arrival
    }

    pub fn burst(&self) -> Time {
        self.burst
    }

    pub fn remaining(&self) -> Time {
        self.remaining
    }

    pub fn completion(&self) -> Time {
        self.completion
    }

    pub fn waiting(&self) -> Time {
        self.waiting
    }

    pub fn turnaround(&self) -> Time {
        self.turnaround
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn has_arrived(&self, now: Time) -> bool {
        self.arrival <= now
    }

    /// A copy sharing only identity, with `remaining` back at `burst` and
    /// every timing field zeroed.
    pub fn fresh_copy(&self) -> Self {
        Process::new(self.id, self.arrival, self.burst)
    }

    /// Runs the process for up to `slice` time units and returns how long it
    /// actually ran.
    pub fn run_for(&mut self, slice: Time) -> Time {
        let ran = slice.min(self.remaining);
        self.remaining -= ran;
        ran
    }

    /// Records completion at `now`. Waiting time is derived from the
    /// turnaround, so the timing identities always hold.
    pub fn complete_at(&mut self, now: Time) {
        debug_assert!(now >= self.arrival + self.burst);
        self.remaining = 0;
        self.completion = now;
        self.turnaround = now - self.arrival;
        self.waiting = self.turnaround - self.burst;
    }
}

/// Produces a value-isolated working copy of `processes`, in the same order.
pub fn isolate(processes: &[Process]) -> Vec<Process> {
    processes.iter().map(Process::fresh_copy).collect()
}

/// Sorts by arrival time; the sort is stable so equal arrivals keep id order.
pub(crate) fn sort_by_arrival(processes: &mut [Process]) {
    processes.sort_by_key(Process::arrival);
}

pub(crate) fn sort_by_id(processes: &mut [Process]) {
    processes.sort_by_key(Process::id);
}
