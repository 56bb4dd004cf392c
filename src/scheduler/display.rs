use super::{runner::ViewerEvent, AlgorithmResult, Comparison, Rating};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, Clear, ClearType},
};
use log::warn;
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), Clear(ClearType::All))?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                        Ok(_) => {}
                        Err(err) => {
                            warn!("failed to read terminal events: {err}");
                            return;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        warn!("failed to poll terminal events: {err}");
                        return;
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(
        &mut self,
        results: &[AlgorithmResult],
        comparison: Option<&Comparison>,
        selected: usize,
    ) -> Result<(), io::Error> {
        let Some(current) = results.get(selected) else {
            return Ok(());
        };
        let rating = comparison.and_then(|comparison| {
            comparison
                .ratings()
                .find(|(result, _, _)| result.algorithm() == current.algorithm())
                .map(|(_, rating, utilization)| (rating, utilization))
        });

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(5),
                    Constraint::Length(6),
                ])
                .split(f.size());

            let summary = current.summary();
            let header = Paragraph::new(format!(
                "{}/{} | {} | Avg waiting {:.2} | Avg turnaround {:.2}{}",
                selected + 1,
                results.len(),
                current.algorithm(),
                summary.avg_waiting,
                summary.avg_turnaround,
                match rating {
                    Some((rating, utilization)) => {
                        format!(" | {} | ~{:.1}% CPU", rating.label(), utilization)
                    }
                    None => String::new(),
                }
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Algorithm (n: next, p: previous, q: quit)")
                    .border_type(BorderType::Rounded),
            );

            f.render_widget(header, chunks[0]);

            let rows = current.processes().iter().map(|process| {
                Row::new(vec![
                    Cell::from(format!("P{}", process.id()))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(process.arrival().to_string()),
                    Cell::from(process.burst().to_string()),
                    Cell::from(process.completion().to_string()),
                    Cell::from(process.waiting().to_string()),
                    Cell::from(process.turnaround().to_string()),
                ])
            });

            let table = Table::new(rows)
                .header(
                    Row::new(vec![
                        "Process",
                        "Arrival",
                        "Burst",
                        "Completion",
                        "Waiting",
                        "Turnaround",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(8),
                    Constraint::Length(10),
                    Constraint::Length(10),
                    Constraint::Length(12),
                    Constraint::Length(10),
                    Constraint::Length(12),
                ])
                .block(
                    Block::default()
                        .title(current.algorithm().name())
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[1]);

            if let Some(comparison) = comparison {
                let rows = comparison.ratings().map(|(result, rating, _)| {
                    let summary = result.summary();
                    let style = match rating {
                        Rating::Best => Style::default().fg(Color::LightGreen),
                        Rating::Good => Style::default().fg(Color::LightYellow),
                        Rating::Fair => Style::default().fg(Color::Gray),
                    };
                    Row::new(vec![
                        Cell::from(result.algorithm().name()),
                        Cell::from(format!("{:.2}", summary.avg_waiting)),
                        Cell::from(format!("{:.2}", summary.avg_turnaround)),
                        Cell::from(rating.label()),
                    ])
                    .style(style)
                });

                let table = Table::new(rows)
                    .widths(&[
                        Constraint::Length(24),
                        Constraint::Length(10),
                        Constraint::Length(10),
                        Constraint::Length(6),
                    ])
                    .block(
                        Block::default()
                            .title("Comparison")
                            .borders(Borders::ALL),
                    )
                    .column_spacing(1);

                f.render_widget(table, chunks[2]);
            }
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> Result<ViewerEvent, io::Error> {
        // Get the user's input and return a matching event
        let event = self.input_rx.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "terminal input thread stopped")
        })?;
        if let DisplayEvent::Input(key) = event {
            if key.modifiers.is_empty() {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(ViewerEvent::Quit),
                    KeyCode::Char('n') | KeyCode::Right => return Ok(ViewerEvent::Next),
                    KeyCode::Char('p') | KeyCode::Left => return Ok(ViewerEvent::Previous),
                    _ => {}
                }
            }
        }
        Ok(ViewerEvent::None)
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), Clear(ClearType::All));
    }
}
