//! Presentation binding: turns a session into something drawable.
//!
//! The session holds no rendering concerns. A front end subscribes to
//! `SessionEvent`s and rebuilds a `BoardView` on each one; `render_text` is
//! the terminal rendition used by tests and simple hosts.

use serde::{Deserialize, Serialize};

use crate::deck::SymbolPool;
use crate::session::{GameSession, Scheduler, TileFace};

const HIDDEN_LABEL: &str = "?";

/// Win screen contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    /// Attempts captured when the last pair matched.
    pub attempts: u32,
}

impl WinSummary {
    /// Text for the win screen.
    #[must_use]
    pub fn render(&self) -> String {
        format!("You won!\nAttempts: {}", self.attempts)
    }
}

/// One frame of the board, laid out as a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// `rows[r][c]` is the tile at position `r * columns + c`.
    pub rows: Vec<Vec<TileFace>>,
    pub attempts: u32,
    pub matched_count: usize,
    pub tiles: usize,
    pub win: Option<WinSummary>,
}

impl BoardView {
    /// Build a view from the session's current state.
    pub fn from_session<S: Scheduler>(session: &GameSession<S>) -> Self {
        let snapshot = session.snapshot();
        let columns = session.config().columns.max(1);

        let rows = snapshot
            .faces
            .chunks(columns)
            .map(<[TileFace]>::to_vec)
            .collect();

        Self {
            rows,
            attempts: snapshot.attempts,
            matched_count: snapshot.matched_count,
            tiles: snapshot.faces.len(),
            win: snapshot.final_attempts.map(|attempts| WinSummary { attempts }),
        }
    }

    /// Is the win screen showing?
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.win.is_some()
    }

    /// Draw the board (or the win screen) as text.
    ///
    /// Hidden tiles show `?`, selected tiles their symbol name, matched
    /// tiles their name in brackets.
    #[must_use]
    pub fn render_text(&self, pool: &SymbolPool) -> String {
        if let Some(win) = &self.win {
            return win.render();
        }

        let label = |face: &TileFace| -> String {
            match face {
                TileFace::Hidden => HIDDEN_LABEL.to_string(),
                TileFace::Revealed(s) => pool.name(*s).unwrap_or(HIDDEN_LABEL).to_string(),
                TileFace::Matched(s) => format!("[{}]", pool.name(*s).unwrap_or(HIDDEN_LABEL)),
            }
        };

        let width = self
            .rows
            .iter()
            .flatten()
            .map(|f| label(f).len())
            .max()
            .unwrap_or(1);

        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|f| format!("{:^width$}", label(f)))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();

        lines.push(format!(
            "Matched: {}/{}  Attempts: {}",
            self.matched_count, self.tiles, self.attempts
        ));
        lines.join("\n")
    }
}
