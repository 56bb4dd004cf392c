use super::{Algorithm, AlgorithmResult, Comparison};
use std::fmt::{self, Write};

const PROCESS_RULE: &str =
    "---------------------------------------------------------------------------------";
const COMPARISON_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Heading printed above an algorithm's result table.
pub fn heading(result: &AlgorithmResult, quantum: Option<u64>) -> String {
    match (result.algorithm(), quantum) {
        (Algorithm::Fcfs, _) => "First-Come, First-Served (FCFS) Scheduling:".to_owned(),
        (Algorithm::Sjf, _) => "Shortest Job First (SJF) Non-Preemptive Scheduling:".to_owned(),
        (Algorithm::Srtf, _) => {
            "Shortest Job First (SJF) Preemptive Scheduling (SRTF):".to_owned()
        }
        (Algorithm::RoundRobin, Some(quantum)) => {
            format!("Round Robin (RR) Scheduling with Time Quantum = {quantum}:")
        }
        (Algorithm::RoundRobin, None) => "Round Robin (RR) Scheduling:".to_owned(),
    }
}

/// Per-process table followed by the two averages.
pub fn result_table(out: &mut impl Write, result: &AlgorithmResult) -> fmt::Result {
    writeln!(
        out,
        "{:<10} {:<15} {:<15} {:<15} {:<15} {:<15}",
        "Process", "Arrival Time", "Burst Time", "Completion Time", "Waiting Time", "Turnaround Time"
    )?;
    writeln!(out, "{PROCESS_RULE}")?;
    for process in result.processes() {
        writeln!(
            out,
            "{:<10} {:<15} {:<15} {:<15} {:<15} {:<15}",
            format!("P{}", process.id()),
            process.arrival(),
            process.burst(),
            process.completion(),
            process.waiting(),
            process.turnaround()
        )?;
    }
    let summary = result.summary();
    writeln!(out, "{PROCESS_RULE}")?;
    writeln!(out, "Average Waiting Time: {:.2}", summary.avg_waiting)?;
    writeln!(out, "Average Turnaround Time: {:.2}", summary.avg_turnaround)
}

/// The efficiency comparison across all four disciplines.
pub fn comparison_report(out: &mut impl Write, comparison: &Comparison) -> fmt::Result {
    writeln!(out, "============== EFFICIENCY COMPARISON ==============")?;
    writeln!(
        out,
        "{:<25} {:<25} {:<25}",
        "Algorithm", "Avg Waiting Time", "Avg Turnaround Time"
    )?;
    writeln!(out, "{COMPARISON_RULE}")?;
    for result in comparison.results() {
        let summary = result.summary();
        writeln!(
            out,
            "{:<25} {:<25.2} {:<25.2}",
            result.algorithm().name(),
            summary.avg_waiting,
            summary.avg_turnaround
        )?;
    }

    let best = comparison.best_waiting();
    writeln!(out)?;
    writeln!(out, "EFFICIENCY ANALYSIS:")?;
    writeln!(out, "1. Most Efficient Algorithm: {}", best.algorithm())?;
    writeln!(
        out,
        "   - Lowest Average Waiting Time: {:.2}",
        best.summary().avg_waiting
    )?;
    writeln!(
        out,
        "   - Average Turnaround Time: {:.2}",
        best.summary().avg_turnaround
    )?;

    writeln!(out)?;
    writeln!(out, "2. Algorithm Efficiency Analysis:")?;
    for (result, rating, _) in comparison.ratings() {
        writeln!(out, "   - {}: {}", result.algorithm(), rating.label())?;
    }

    writeln!(out)?;
    writeln!(out, "3. Recommendations:")?;
    writeln!(out, "   - For minimizing waiting time: {}", best.algorithm())?;
    writeln!(
        out,
        "   - For minimizing turnaround time: {}",
        comparison.best_turnaround().algorithm()
    )?;

    writeln!(out)?;
    writeln!(out, "4. Contextual Usage:")?;
    writeln!(out, "   - FCFS: Simple implementation, fair for similar burst times")?;
    writeln!(out, "   - SJF: Best when burst times are known and vary significantly")?;
    writeln!(out, "   - SRTF: Optimal for minimizing average waiting time, but has overhead")?;
    writeln!(out, "   - Round Robin: Fair CPU sharing, good for interactive systems")?;

    writeln!(out)?;
    writeln!(out, "5. Additional Performance Metrics:")?;
    for (result, _, utilization) in comparison.ratings() {
        writeln!(
            out,
            "   - {} estimated CPU utilization: {:.1}%",
            result.algorithm(),
            utilization
        )?;
    }
    Ok(())
}

/// Full text output: every result table, then the comparison when all four
/// disciplines ran.
pub fn full_report(
    results: &[AlgorithmResult],
    comparison: Option<&Comparison>,
    quantum: Option<u64>,
) -> Result<String, fmt::Error> {
    let mut out = String::from("==== SIMULATION RESULTS ====\n");
    for result in results {
        writeln!(out)?;
        writeln!(out, "{}", heading(result, quantum))?;
        result_table(&mut out, result)?;
    }
    if let Some(comparison) = comparison {
        writeln!(out)?;
        comparison_report(&mut out, comparison)?;
    }
    Ok(out)
}

/// The comparison (or the lone results) as pretty-printed JSON.
pub fn json_report(
    results: &[AlgorithmResult],
    comparison: Option<&Comparison>,
) -> serde_json::Result<String> {
    match comparison {
        Some(comparison) => serde_json::to_string_pretty(comparison),
        None => serde_json::to_string_pretty(results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{compare, Workload};

    fn comparison() -> Comparison {
        let workload = Workload::from_raw(&[(0, 24), (0, 3), (0, 3)], Some(4)).unwrap();
        compare(&workload, false).unwrap()
    }

    #[test]
    fn result_table_rows_and_averages() {
        let comparison = comparison();
        let mut table = String::new();
        result_table(&mut table, &comparison.results()[3]).unwrap();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[2].starts_with("P1         0               24              30"));
        assert_eq!(lines[6], "Average Waiting Time: 5.67");
        assert_eq!(lines[7], "Average Turnaround Time: 15.67");
    }

    #[test]
    fn comparison_names_the_winner() {
        let mut report = String::new();
        comparison_report(&mut report, &comparison()).unwrap();
        assert!(report.contains("1. Most Efficient Algorithm: SJF (Non-Preemptive)"));
        assert!(report.contains("   - SJF (Non-Preemptive): BEST"));
        assert!(report.contains("   - FCFS: FAIR"));
        assert!(report.contains("   - FCFS estimated CPU utilization: 95.0%"));
    }

    #[test]
    fn full_report_lists_every_table_then_the_comparison() {
        let comparison = comparison();
        let report = full_report(comparison.results(), Some(&comparison), Some(4)).unwrap();
        assert!(report.starts_with("==== SIMULATION RESULTS ====\n"));
        assert_eq!(report.matches("Average Waiting Time:").count(), 4);
        assert!(report.contains("============== EFFICIENCY COMPARISON =============="));
    }

    #[test]
    fn round_robin_heading_shows_quantum() {
        let comparison = comparison();
        assert_eq!(
            heading(&comparison.results()[3], Some(4)),
            "Round Robin (RR) Scheduling with Time Quantum = 4:"
        );
    }

    #[test]
    fn json_carries_names_and_ratings() {
        let comparison = comparison();
        let json = json_report(comparison.results(), Some(&comparison)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["best_waiting"], "SJF (Non-Preemptive)");
        assert_eq!(value["ratings"][1], "BEST");
        assert_eq!(value["results"][0]["processes"][0]["completion"], 24);
    }
}
