use crate::{Bracket, ModelError, ModelResult};
use std::io::ErrorKind;
use std::path::Path;

/// Characters stripped from both ends of every team token.
fn is_token_padding(c: char) -> bool {
    c.is_whitespace() || c == '\'' || c == '"'
}

/// Scan `content` for `[ ... ]` sections and split each on commas.
///
/// Empty sections are kept so bracket numbering matches the file; callers
/// skip them at display time. A `[` with no closing `]` ends the scan.
pub fn parse_brackets(content: &str) -> Vec<Bracket> {
    let mut brackets = Vec::new();
    let mut cursor = 0;

    while let Some(found) = content[cursor..].find('[') {
        let start = cursor + found;
        let Some(len) = content[start..].find(']') else {
            break;
        };
        let end = start + len;

        let teams = content[start + 1..end]
            .split(',')
            .map(|token| token.trim_matches(is_token_padding))
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .collect();
        brackets.push(Bracket::new(teams));

        cursor = end + 1;
    }

    brackets
}

/// Read and parse a bracket file.
///
/// Fails when the file can't be read or when it holds no bracket with at
/// least one team.
pub fn load_brackets(path: impl AsRef<Path>) -> ModelResult<Vec<Bracket>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ModelError::FileNotFound(path.display().to_string()),
        _ => ModelError::Read {
            path: path.display().to_string(),
            source,
        },
    })?;

    let brackets = parse_brackets(&content);
    if brackets.iter().all(Bracket::is_empty) {
        return Err(ModelError::NoBrackets);
    }
    Ok(brackets)
}
