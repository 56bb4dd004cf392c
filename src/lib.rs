//! CPU scheduling comparison.
//!
//! Simulates FCFS, non-preemptive SJF, SRTF and Round Robin over a fixed set
//! of CPU-bound processes and compares their waiting and turnaround times.

pub mod config;
pub mod scheduler;
