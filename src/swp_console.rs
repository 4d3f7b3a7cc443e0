// Plain-text frontend: reads line commands, prints the board after each one
// Translates user input into session commands and drives the one-second tick

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::swp_board::Pos;
use crate::swp_config::{BoardConfig, Difficulty};
use crate::swp_session::{GameSession, Status};
use crate::swp_settings::Settings;

const HELP: &str = "\
commands:
  r ROW COL                      reveal a cell
  f ROW COL                      flag or unflag a cell
  n [beginner|intermediate|expert|custom COLS ROWS MINES]
                                 new game (same difficulty if omitted)
  b                              best times
  h                              this help
  q                              quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reveal(Pos),
    Flag(Pos),
    New(Option<Difficulty>),
    Best,
    Help,
    Quit,
}

/// Parse one input line. Rows and columns are zero-based.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let args: Vec<&str> = words.collect();
    let numbers = |n: usize| -> Result<Vec<usize>, String> {
        if args.len() != n {
            return Err(format!("'{}' takes {} numbers", head, n));
        }
        args.iter()
            .map(|a| a.parse::<usize>().map_err(|_| format!("'{}' is not a number", a)))
            .collect()
    };

    match head.to_ascii_lowercase().as_str() {
        "r" | "reveal" => numbers(2).map(|v| Command::Reveal(Pos::new(v[0], v[1]))),
        "f" | "flag" => numbers(2).map(|v| Command::Flag(Pos::new(v[0], v[1]))),
        "n" | "new" => match args.as_slice() {
            [] => Ok(Command::New(None)),
            [name] => match Difficulty::from_name(name) {
                Some(d) if d.is_preset() => Ok(Command::New(Some(d))),
                Some(_) => Err("custom needs COLS ROWS MINES".to_string()),
                None => Err(format!("unknown difficulty '{}'", name)),
            },
            [name, c, r, m] if name.eq_ignore_ascii_case("custom") => {
                let parse = |s: &str| {
                    s.parse::<usize>()
                        .map_err(|_| format!("'{}' is not a number", s))
                };
                Ok(Command::New(Some(Difficulty::Custom {
                    columns: parse(*c)?,
                    rows: parse(*r)?,
                    mines: parse(*m)?,
                })))
            }
            _ => Err("usage: n [beginner|intermediate|expert|custom COLS ROWS MINES]".to_string()),
        },
        "b" | "best" => Ok(Command::Best),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}'", other)),
    }
}

/// Draw the board as text, with a status line on top
pub fn render(session: &GameSession) -> String {
    let board = session.board();
    let (columns, rows) = board.dimensions();
    let lost = session.status() == Status::Lost;
    let mut out = String::new();

    let status = match session.status() {
        Status::NotStarted => "ready",
        Status::Active => "playing",
        Status::Won => "won",
        Status::Lost => "lost",
    };
    out.push_str(&format!(
        "{}  mines: {:>3}  time: {:>3}  [{}]\n",
        session.config().difficulty().name(),
        session.mines_remaining(),
        session.elapsed_seconds(),
        status
    ));

    out.push_str("    ");
    for col in 0..columns {
        out.push_str(&format!("{:>2}", col % 100));
    }
    out.push('\n');

    for row in 0..rows {
        out.push_str(&format!("{:>3} ", row));
        for col in 0..columns {
            let pos = Pos::new(row, col);
            let Some(cell) = board.cell(pos) else {
                continue;
            };
            let glyph = if lost && session.misflagged().contains(&pos) {
                'X'
            } else if cell.flagged {
                'F'
            } else if cell.covered {
                '#'
            } else if cell.has_mine {
                '*'
            } else {
                match cell.adjacent_mines {
                    Some(n) => char::from(b'0' + n),
                    None => '.',
                }
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn render_best(settings: &Settings) -> String {
    let mut out = String::from("best times:\n");
    for d in Difficulty::PRESETS {
        match settings.best.get(&d) {
            Some(rec) => out.push_str(&format!("  {:<13}{:>5}s  {}\n", d.name(), rec.secs, rec.date)),
            None => out.push_str(&format!("  {:<13}    -\n", d.name())),
        }
    }
    out
}

pub struct Console<R, W> {
    session: GameSession,
    settings: Settings,
    input: R,
    out: W,
    clock: Instant,
    store: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(session: GameSession, settings: Settings, input: R, out: W) -> Self {
        Console {
            session,
            settings,
            input,
            out,
            clock: Instant::now(),
            store: None,
        }
    }

    /// Write settings (difficulty changes, new records) back to `path`
    pub fn persist_to(mut self, path: PathBuf) -> Self {
        self.store = Some(path);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Main loop; returns when the input ends or the player quits
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", HELP)?;
        write!(self.out, "{}", render(&self.session))?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            self.advance_clock();
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.handle(cmd)?,
                Err(msg) => writeln!(self.out, "{}", msg)?,
            }
        }
        Ok(())
    }

    fn handle(&mut self, cmd: Command) -> io::Result<()> {
        let was = self.session.status();
        match cmd {
            Command::Reveal(pos) => {
                self.session.reveal(pos);
            }
            Command::Flag(pos) => {
                self.session.toggle_flag(pos);
            }
            Command::New(choice) => self.new_game(choice)?,
            Command::Best => {
                write!(self.out, "{}", render_best(&self.settings))?;
                return Ok(());
            }
            Command::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        }

        let now = self.session.status();
        if was == Status::NotStarted && now != Status::NotStarted {
            self.clock = Instant::now();
        }
        write!(self.out, "{}", render(&self.session))?;
        if !was.is_terminal() && now.is_terminal() {
            self.game_over()?;
        }
        Ok(())
    }

    fn new_game(&mut self, choice: Option<Difficulty>) -> io::Result<()> {
        let config = match choice {
            None => *self.session.config(),
            Some(d) => {
                let (c, r, m) = d.params();
                match BoardConfig::validate(c, r, m) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        // custom input is adjusted to fit rather than refused
                        let (cfg, adjustments) = BoardConfig::clamp(c, r, m);
                        writeln!(self.out, "{}", e)?;
                        for a in adjustments {
                            writeln!(self.out, "{}", a)?;
                        }
                        cfg
                    }
                }
            }
        };
        self.session.new_game(config);
        self.settings.select(&config);
        self.save_settings();
        Ok(())
    }

    fn game_over(&mut self) -> io::Result<()> {
        if let Some(report) = self.session.win_report() {
            writeln!(self.out, "you won in {}s", report.elapsed_seconds)?;
            if self.settings.best.submit_report(&report) {
                writeln!(self.out, "new best time for {}!", report.difficulty.name())?;
                self.save_settings();
            }
        } else {
            writeln!(self.out, "boom. 'n' starts a new game")?;
        }
        Ok(())
    }

    // Deliver whole elapsed seconds to the session since the last delivery.
    fn advance_clock(&mut self) {
        if self.session.status() != Status::Active {
            self.clock = Instant::now();
            return;
        }
        let secs = self.clock.elapsed().as_secs();
        for _ in 0..secs {
            self.session.tick();
        }
        self.clock += Duration::from_secs(secs);
    }

    fn save_settings(&self) {
        let Some(path) = &self.store else {
            return;
        };
        match self.settings.save_to(path) {
            Ok(()) => info!(path = %path.display(), "settings saved"),
            Err(e) => warn!("could not save settings: {}", e),
        }
    }
}
