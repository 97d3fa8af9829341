pub mod parser;

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

pub use parser::{load_brackets, parse_brackets};

// ---------------------------------------------------------------------------
// Domain types: flat bracket lists and the rounds derived from them
// ---------------------------------------------------------------------------

/// Round labels used when a bracket works out to exactly six rounds.
pub const NCAA_ROUND_NAMES: [&str; 6] = [
    "First Round",
    "Second Round",
    "Sweet 16",
    "Elite 8",
    "Final Four",
    "Championship",
];

/// Cell width assumed for an entry that cannot be displayed.
pub const INVALID_TEAM_WIDTH: usize = 20;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid brackets found in the input file.")]
    NoBrackets,
}

/// One tournament's picks, every round concatenated in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bracket {
    teams: Vec<String>,
}

impl Bracket {
    pub fn new(teams: Vec<String>) -> Self {
        Self { teams }
    }

    /// Tokens exactly as they appeared in the source file.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Rounds implied by this bracket's length.
    pub fn rounds(&self) -> Vec<Round> {
        rounds_for(self.teams.len())
    }

    /// Display entry for a flat slot index. `None` past the end of a short bracket.
    pub fn entry(&self, slot: usize) -> Option<TeamEntry> {
        self.teams.get(slot).map(|raw| TeamEntry::from_token(raw))
    }

    /// How the flat list lines up with the slots its rounds expect.
    pub fn fit(&self) -> BracketFit {
        let expected: usize = round_sizes(self.teams.len()).iter().sum();
        let actual = self.teams.len();
        match actual.cmp(&expected) {
            std::cmp::Ordering::Equal => BracketFit::Exact,
            std::cmp::Ordering::Greater => BracketFit::Excess { expected, actual },
            std::cmp::Ordering::Less => BracketFit::Short { expected, actual },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketFit {
    Exact,
    /// Entries past `expected` are never read.
    Excess { expected: usize, actual: usize },
    /// Trailing slots have no entry to show.
    Short { expected: usize, actual: usize },
}

impl BracketFit {
    pub fn is_short(&self) -> bool {
        matches!(self, BracketFit::Short { .. })
    }
}

/// One elimination stage, derived from the bracket length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub index: usize,
    /// Number of slots (teams) in this round.
    pub size: usize,
    pub name: String,
    /// Index of this round's first slot in the flat team list.
    pub offset: usize,
}

impl Round {
    pub fn slots(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size
    }

    /// Sizes strictly decrease to 1, so only the final round has one slot.
    pub fn is_champion(&self) -> bool {
        self.size == 1
    }
}

/// A single slot ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamEntry {
    Team(String),
    /// The raw token holds characters a terminal can't paint.
    Invalid,
}

impl TeamEntry {
    pub fn from_token(raw: &str) -> Self {
        if raw.chars().any(char::is_control) {
            TeamEntry::Invalid
        } else {
            TeamEntry::Team(display_name(raw))
        }
    }

    /// Width in terminal cells of the formatted name.
    pub fn width(&self) -> usize {
        match self {
            TeamEntry::Team(name) => name.width(),
            TeamEntry::Invalid => INVALID_TEAM_WIDTH,
        }
    }
}

// ---------------------------------------------------------------------------
// Round calculator
// ---------------------------------------------------------------------------

/// Slots per round for a flat list of `team_count` entries.
///
/// The first round holds `team_count / 2 + 1` slots and each later round
/// halves it, ending with the single champion slot.
pub fn round_sizes(team_count: usize) -> Vec<usize> {
    let mut remaining = team_count / 2 + 1;
    let mut sizes = Vec::new();
    while remaining > 1 {
        sizes.push(remaining);
        remaining /= 2;
    }
    sizes.push(1);
    sizes
}

pub fn round_names(sizes: &[usize]) -> Vec<String> {
    if sizes.len() == NCAA_ROUND_NAMES.len() {
        return NCAA_ROUND_NAMES.iter().map(ToString::to_string).collect();
    }
    (1..=sizes.len()).map(|i| format!("Round {i}")).collect()
}

pub fn rounds_for(team_count: usize) -> Vec<Round> {
    let sizes = round_sizes(team_count);
    let names = round_names(&sizes);
    let mut offset = 0;
    sizes
        .into_iter()
        .zip(names)
        .enumerate()
        .map(|(index, (size, name))| {
            let round = Round { index, size, name, offset };
            offset += size;
            round
        })
        .collect()
}

/// Hyphens become spaces, then each alphabetic run is capitalised.
pub fn display_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_cased = false;
    for ch in raw.chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}
