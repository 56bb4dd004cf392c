use super::{Algorithm, Process, SchedulerError, SchedulerResult, Workload};
use log::{debug, info};
use serde::Serialize;
use std::{panic, thread};

const GOOD_WAITING_FACTOR: f64 = 1.5;
const UTILIZATION_FLOOR: f64 = 70.0;
const UTILIZATION_CEILING: f64 = 99.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
}

impl Summary {
    pub fn of(processes: &[Process]) -> SchedulerResult<Self> {
        if processes.is_empty() {
            return Err(SchedulerError::EmptyResult);
        }
        let count = processes.len() as f64;
        let total_waiting: f64 = processes.iter().map(|p| p.waiting() as f64).sum();
        let total_turnaround: f64 = processes.iter().map(|p| p.turnaround() as f64).sum();
        Ok(Self {
            avg_waiting: total_waiting / count,
            avg_turnaround: total_turnaround / count,
        })
    }
}

/// The completed processes of one discipline and their averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmResult {
    algorithm: Algorithm,
    processes: Vec<Process>,
    summary: Summary,
}

impl AlgorithmResult {
    pub fn new(algorithm: Algorithm, processes: Vec<Process>) -> SchedulerResult<Self> {
        let summary = Summary::of(&processes)?;
        Ok(Self {
            algorithm,
            processes,
            summary,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    Best,
    Good,
    Fair,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::Best => "BEST",
            Rating::Good => "GOOD",
            Rating::Fair => "FAIR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    results: [AlgorithmResult; 4],
    ratings: [Rating; 4],
    utilization: [f64; 4],
    best_waiting: Algorithm,
    best_turnaround: Algorithm,
}

impl Comparison {
    /// `results` are expected in the order of `Algorithm::ALL`; the first one
    /// is the baseline of the utilization estimate.
    pub fn new(results: [AlgorithmResult; 4]) -> Self {
        let waiting = results.each_ref().map(|r| r.summary.avg_waiting);
        let turnaround = results.each_ref().map(|r| r.summary.avg_turnaround);

        let best_waiting = index_of_min(&waiting);
        let best_turnaround = index_of_min(&turnaround);

        let ratings = std::array::from_fn(|index| {
            if index == best_waiting {
                Rating::Best
            } else if waiting[index] <= GOOD_WAITING_FACTOR * waiting[best_waiting] {
                Rating::Good
            } else {
                Rating::Fair
            }
        });

        let baseline = turnaround[0];
        let utilization = turnaround.map(|avg| {
            (100.0 - (avg / (baseline * 2.0) * 10.0)).clamp(UTILIZATION_FLOOR, UTILIZATION_CEILING)
        });

        Self {
            best_waiting: results[best_waiting].algorithm,
            best_turnaround: results[best_turnaround].algorithm,
            results,
            ratings,
            utilization,
        }
    }

    pub fn results(&self) -> &[AlgorithmResult; 4] {
        &self.results
    }

    pub fn best_waiting(&self) -> &AlgorithmResult {
        self.result_for(self.best_waiting)
    }

    pub fn best_turnaround(&self) -> &AlgorithmResult {
        self.result_for(self.best_turnaround)
    }

    /// Rating and heuristic CPU utilization (percent) of each discipline.
    pub fn ratings(&self) -> impl Iterator<Item = (&AlgorithmResult, Rating, f64)> + '_ {
        self.results
            .iter()
            .zip(self.ratings)
            .zip(self.utilization)
            .map(|((result, rating), utilization)| (result, rating, utilization))
    }

    fn result_for(&self, algorithm: Algorithm) -> &AlgorithmResult {
        self.results
            .iter()
            .find(|result| result.algorithm == algorithm)
            .unwrap_or(&self.results[0])
    }
}

/// First index holding the minimum, so earlier entries win ties.
fn index_of_min(values: &[f64; 4]) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value < values[best] {
            best = index;
        }
    }
    best
}

/// Runs all four disciplines against `workload` and compares them. With
/// `parallel` each discipline runs on its own thread.
pub fn compare(workload: &Workload, parallel: bool) -> SchedulerResult<Comparison> {
    // Fail before spawning anything if Round Robin cannot run
    workload.quantum_for_rr()?;

    info!(
        "comparing {} disciplines over {} processes",
        Algorithm::ALL.len(),
        workload.processes().len()
    );
    let results = if parallel {
        run_parallel(workload)?
    } else {
        let [fcfs, sjf, srtf, rr] = Algorithm::ALL;
        [
            fcfs.run(workload)?,
            sjf.run(workload)?,
            srtf.run(workload)?,
            rr.run(workload)?,
        ]
    };

    let comparison = Comparison::new(results);
    debug!(
        "best waiting: {}, best turnaround: {}",
        comparison.best_waiting, comparison.best_turnaround
    );
    Ok(comparison)
}

fn run_parallel(workload: &Workload) -> SchedulerResult<[AlgorithmResult; 4]> {
    thread::scope(|scope| {
        let handles = Algorithm::ALL.map(|algorithm| scope.spawn(move || algorithm.run(workload)));
        let [fcfs, sjf, srtf, rr] = handles.map(|handle| {
            handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload))
        });
        Ok([fcfs?, sjf?, srtf?, rr?])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(id: u32, arrival: u64, burst: u64, completion: u64) -> Process {
        let mut process = Process::new(id, arrival, burst);
        process.run_for(burst);
        process.complete_at(completion);
        process
    }

    fn result_with(algorithm: Algorithm, waiting: u64, turnaround: u64) -> AlgorithmResult {
        // one process whose burst makes the two averages come out as asked
        let burst = turnaround - waiting;
        AlgorithmResult::new(algorithm, vec![finished(1, 0, burst, turnaround)]).unwrap()
    }

    #[test]
    fn summary_averages() {
        let summary = Summary::of(&[finished(1, 0, 2, 2), finished(2, 0, 3, 5)]).unwrap();
        assert_eq!(summary.avg_waiting, 1.0);
        assert_eq!(summary.avg_turnaround, 3.5);
    }

    #[test]
    fn empty_summary_is_an_error() {
        assert_eq!(Summary::of(&[]), Err(SchedulerError::EmptyResult));
        assert_eq!(
            AlgorithmResult::new(Algorithm::Fcfs, Vec::new()),
            Err(SchedulerError::EmptyResult)
        );
    }

    #[test]
    fn ratings_and_winners() {
        let comparison = Comparison::new([
            result_with(Algorithm::Fcfs, 10, 20),
            result_with(Algorithm::Sjf, 4, 14),
            result_with(Algorithm::Srtf, 6, 12),
            result_with(Algorithm::RoundRobin, 7, 17),
        ]);
        assert_eq!(comparison.best_waiting().algorithm(), Algorithm::Sjf);
        assert_eq!(comparison.best_turnaround().algorithm(), Algorithm::Srtf);

        let ratings: Vec<_> = comparison.ratings().map(|(_, rating, _)| rating).collect();
        assert_eq!(
            ratings,
            vec![Rating::Fair, Rating::Best, Rating::Good, Rating::Fair]
        );
    }

    #[test]
    fn first_algorithm_wins_ties() {
        let comparison = Comparison::new([
            result_with(Algorithm::Fcfs, 3, 8),
            result_with(Algorithm::Sjf, 3, 8),
            result_with(Algorithm::Srtf, 3, 8),
            result_with(Algorithm::RoundRobin, 3, 8),
        ]);
        assert_eq!(comparison.best_waiting().algorithm(), Algorithm::Fcfs);
        assert_eq!(comparison.best_turnaround().algorithm(), Algorithm::Fcfs);
        let good = comparison
            .ratings()
            .filter(|(_, rating, _)| *rating == Rating::Good)
            .count();
        assert_eq!(good, 3);
    }

    #[test]
    fn utilization_is_clamped() {
        let comparison = Comparison::new([
            result_with(Algorithm::Fcfs, 0, 10),
            result_with(Algorithm::Sjf, 0, 1),
            result_with(Algorithm::Srtf, 0, 20),
            result_with(Algorithm::RoundRobin, 0, 100),
        ]);
        let utilization: Vec<_> = comparison.ratings().map(|(_, _, u)| u).collect();
        // 100 - 10/20*10 = 95, 100 - 1/20*10 = 99.5 -> 99, 100 - 20/20*10 = 90,
        // 100 - 100/20*10 = 50 -> 70
        assert_eq!(utilization, vec![95.0, 99.0, 90.0, 70.0]);
    }

    #[test]
    fn compare_requires_quantum() {
        let workload = Workload::from_raw(&[(0, 2)], None).unwrap();
        assert!(matches!(
            compare(&workload, false),
            Err(SchedulerError::InvalidInput(_))
        ));
    }

    #[test]
    fn parallel_matches_sequential() {
        let workload =
            Workload::from_raw(&[(0, 8), (1, 4), (2, 9), (3, 5)], Some(3)).unwrap();
        let sequential = compare(&workload, false).unwrap();
        let parallel = compare(&workload, true).unwrap();
        assert_eq!(sequential, parallel);
    }
}
