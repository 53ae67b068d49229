//! The terminal front end.
//!
//! One board cell is drawn as two character cells, so the board looks
//! roughly square. Row 0 is reserved for the generation counter.

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{self, Color as TermColor},
    terminal,
};
use rautomata_lib::{Automaton, Clock, Color, Engine, Surface};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

/// How long to wait for input when no frame is armed.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A [`Surface`] that queues crossterm commands into a buffer.
///
/// Queueing into a `Vec` cannot fail; the buffer is written to the
/// real terminal once per frame by [`flush_to`](TermSurface::flush_to).
#[derive(Default)]
struct TermSurface {
    buf: Vec<u8>,
}

impl TermSurface {
    fn flush_to(&mut self, stdout: &mut Stdout) -> io::Result<()> {
        stdout.write_all(&self.buf)?;
        stdout.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl Surface for TermSurface {
    fn draw_cell(&mut self, x: i32, y: i32, _size_px: u32, color: Option<Color>) {
        if x < 0 || y < 0 {
            return;
        }
        let bg = match color {
            Some(c) => TermColor::Rgb {
                r: c.r,
                g: c.g,
                b: c.b,
            },
            None => TermColor::Reset,
        };
        let _ = queue!(
            self.buf,
            cursor::MoveTo(x as u16 * 2, y as u16 + 1),
            style::SetBackgroundColor(bg),
            style::Print("  "),
            style::SetBackgroundColor(TermColor::Reset),
        );
    }

    fn draw_line(&mut self, _from: (i32, i32), _to: (i32, i32), _color: Color) {
        // Character cells have no sub-cell pixels to draw grid lines in.
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _color: Color) {
        let _ = queue!(
            self.buf,
            cursor::MoveTo(x.max(0) as u16, y.max(0) as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(text),
        );
    }

    fn clear(&mut self) {
        let _ = queue!(self.buf, terminal::Clear(terminal::ClearType::All));
    }
}

/// A [`Clock`] backed by the input poll timeout.
#[derive(Default)]
struct TermClock {
    deadline: Option<Instant>,
}

impl Clock for TermClock {
    fn request(&mut self) {
        self.deadline = Some(Instant::now());
    }

    fn request_after(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }
}

/// Runs the interactive loop until the user quits.
pub(crate) fn run<E: Engine>(mut automaton: Automaton<E>) -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;
    let result = event_loop(&mut automaton, &mut stdout);
    execute!(
        stdout,
        cursor::Show,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn event_loop<E: Engine>(automaton: &mut Automaton<E>, stdout: &mut Stdout) -> io::Result<()> {
    let mut surface = TermSurface::default();
    let mut clock = TermClock::default();

    automaton.repaint(&mut surface);
    surface.flush_to(stdout)?;

    loop {
        let timeout = match clock.deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => IDLE_POLL,
        };

        if event::poll(timeout)? {
            match event::read()? {
                TermEvent::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => {
                        if automaton.is_running() {
                            automaton.pause();
                            clock.deadline = None;
                            automaton.repaint(&mut surface);
                        } else {
                            automaton.start(&mut clock);
                        }
                    }
                    KeyCode::Char('n') => {
                        if automaton.step() {
                            automaton.repaint(&mut surface);
                        }
                    }
                    KeyCode::Char('c') => {
                        automaton.clear();
                        automaton.invalidate();
                        automaton.repaint(&mut surface);
                    }
                    _ => (),
                },
                TermEvent::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let coord = (mouse.column as i32 / 2, mouse.row as i32 - 1);
                        if automaton.geometry().contains(coord) {
                            // In bounds for both engines, so this cannot fail.
                            let _ = automaton.toggle(coord);
                            automaton.repaint(&mut surface);
                        }
                    }
                }
                TermEvent::Resize(_, _) => {
                    automaton.invalidate();
                    automaton.repaint(&mut surface);
                }
                _ => (),
            }
            surface.flush_to(stdout)?;
        } else if let Some(deadline) = clock.deadline {
            if Instant::now() >= deadline {
                clock.deadline = None;
                automaton.frame(&mut clock, &mut surface);
                surface.flush_to(stdout)?;
            }
        }
    }
    Ok(())
}
