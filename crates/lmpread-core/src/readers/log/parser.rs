/// First maximal run of `[0-9.-]` characters on the line that parses as a
/// decimal number. Mirrors the solver-log convention where the value follows
/// free-form prose on the same line.
pub(super) fn first_decimal_token(line: &str) -> Option<f64> {
    let mut run = String::new();
    for character in line.chars() {
        if character.is_ascii_digit() || character == '.' || character == '-' {
            run.push(character);
        } else if !run.is_empty() {
            if let Ok(value) = run.parse::<f64>() {
                return Some(value);
            }
            run.clear();
        }
    }
    if run.is_empty() { None } else { run.parse().ok() }
}

pub(super) const MOLECULE_COUNT_LABEL: &str = "Number of molecules for ";

/// Matches one `Number of molecules for <name>: <count>` occurrence on the
/// line. The name is a maximal word-character run directly followed by `: `
/// and at least one digit; a line that carries the label without completing
/// the pattern is simply not a match.
pub(super) fn match_molecule_count(line: &str) -> Option<(String, u64)> {
    line.match_indices(MOLECULE_COUNT_LABEL)
        .find_map(|(start, _)| match_name_count(&line[start + MOLECULE_COUNT_LABEL.len()..]))
}

fn match_name_count(rest: &str) -> Option<(String, u64)> {
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        return None;
    }

    let tail = rest.strip_prefix(name.as_str())?.strip_prefix(": ")?;
    let digits: String = tail.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok().map(|count| (name, count))
}
