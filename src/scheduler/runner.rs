use super::{display::DisplayTerminal, AlgorithmResult, Comparison};
use std::io;

pub enum ViewerEvent {
    Quit,
    Next,
    Previous,
    None,
}

/// Browses computed results in the terminal UI, one algorithm at a time.
pub struct ResultViewer {
    terminal: DisplayTerminal,
    results: Vec<AlgorithmResult>,
    comparison: Option<Comparison>,
    selected: usize,
}

impl ResultViewer {
    pub fn new(
        results: Vec<AlgorithmResult>,
        comparison: Option<Comparison>,
    ) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;

        Ok(Self {
            terminal,
            results,
            comparison,
            selected: 0,
        })
    }

    fn step(&mut self, forward: bool) {
        let count = self.results.len();
        if count == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
    }

    // Returns false if the viewer should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.terminal
            .draw(&self.results, self.comparison.as_ref(), self.selected)?;

        match self.terminal.get_input()? {
            ViewerEvent::Quit => return Ok(false),
            ViewerEvent::Next => self.step(true),
            ViewerEvent::Previous => self.step(false),
            ViewerEvent::None => {}
        }
        Ok(true)
    }
}
