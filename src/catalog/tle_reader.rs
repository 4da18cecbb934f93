//! Reader for three-line TLE blocks (name line, then lines starting with `1 ` and `2 `).
//!
//! Lines are trimmed and blank lines dropped. A window of three lines whose second and
//! third lines carry the `1 `/`2 ` prefixes is consumed as one block; otherwise the reader
//! advances by a single line and tries again, so a stray or truncated line never hides the
//! blocks that follow it.
use crate::orbit_model::two_line::TwoLineElement;

/// Parse every well-formed TLE block of `text`.
///
/// Return
/// ----------
/// * The parsed records and the number of lines or blocks that were skipped.
pub(crate) fn read_tle_blocks(text: &str) -> (Vec<TwoLineElement>, usize) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut out = Vec::new();
    let mut skipped = 0;
    let mut i = 0;

    while i + 2 < lines.len() {
        let (name, l1, l2) = (lines[i], lines[i + 1], lines[i + 2]);
        if l1.starts_with("1 ") && l2.starts_with("2 ") {
            match TwoLineElement::parse(name, l1, l2) {
                Ok(tle) => out.push(tle),
                Err(err) => {
                    log::warn!("skipping TLE block '{name}': {err}");
                    skipped += 1;
                }
            }
            i += 3;
        } else {
            skipped += 1;
            i += 1;
        }
    }

    (out, skipped)
}
