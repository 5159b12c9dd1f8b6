//! Plain-text rendering of steps and summaries.
//!
//! Each element is drawn as its value wrapped in a marker for its resolved
//! visual state: `<v>` swapping, `[v]` comparing, `(v)` highlighted, `v.`
//! sorted, bare `v` otherwise.

use std::io::{self, Write};

use algoviz_core::{AlgorithmKind, AlgorithmStep, ArrayElement, VisualState};
use algoviz_runtime::{PlaybackSession, RunSummary};

#[must_use]
pub fn cell(element: &ArrayElement) -> String {
    let v = element.value;
    match element.visual_state() {
        VisualState::Swapping => format!("<{v}>"),
        VisualState::Comparing => format!("[{v}]"),
        VisualState::Highlighted => format!("({v})"),
        VisualState::Sorted => format!("{v}."),
        VisualState::Default => v.to_string(),
    }
}

#[must_use]
pub fn row(elements: &[ArrayElement]) -> String {
    elements.iter().map(cell).collect::<Vec<_>>().join(" ")
}

/// One line per step: index, array, description and the active
/// pseudocode line if any.
pub fn write_step(
    out: &mut dyn Write,
    index: usize,
    step: &AlgorithmStep,
    pseudocode: &[&str],
) -> io::Result<()> {
    write!(out, "{index:>5}  {}  {}", row(&step.array_state), step.description)?;
    if let Some(text) = step.line.and_then(|line| pseudocode.get(line)) {
        write!(out, "  | {}", text.trim())?;
    }
    writeln!(out)
}

/// The session's current step, if there is one.
pub fn write_current(out: &mut dyn Write, session: &PlaybackSession) -> io::Result<()> {
    match session.current() {
        Some(step) => write_step(out, session.current_step(), step, session.pseudocode()),
        None => Ok(()),
    }
}

pub fn write_header(out: &mut dyn Write, session: &PlaybackSession) -> io::Result<()> {
    writeln!(
        out,
        "{} on {} elements (speed {}, {} interval)",
        session.algorithm().label(),
        session.elements().len(),
        session.speed(),
        format_interval(session.controller().interval().as_millis()),
    )
}

pub fn write_summary(out: &mut dyn Write, summary: &RunSummary) -> io::Result<()> {
    writeln!(
        out,
        "done: {} sorted {} elements in {} steps ({} comparisons, {} swaps, {} writes)",
        summary.algorithm.label(),
        summary.element_count,
        summary.steps,
        summary.stats.comparisons,
        summary.stats.swaps,
        summary.stats.writes,
    )
}

/// Algorithm name, label and numbered pseudocode.
pub fn write_algorithm(out: &mut dyn Write, kind: AlgorithmKind) -> io::Result<()> {
    writeln!(out, "{} ({})", kind.name(), kind.label())?;
    for (number, line) in kind.algorithm().pseudocode().iter().enumerate() {
        writeln!(out, "  {number:>2}  {line}")?;
    }
    Ok(())
}

fn format_interval(ms: u128) -> String {
    if ms == 0 {
        "no".to_string()
    } else {
        format!("{ms}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{ElementId, VisualFlags, record};

    fn element(value: i64, flags: VisualFlags) -> ArrayElement {
        let mut e = ArrayElement::new(ElementId::new(0), value, 0);
        e.flags = flags;
        e
    }

    #[test]
    fn cells_follow_state_priority() {
        assert_eq!(cell(&element(4, VisualFlags::empty())), "4");
        assert_eq!(cell(&element(4, VisualFlags::SORTED)), "4.");
        assert_eq!(cell(&element(4, VisualFlags::HIGHLIGHTED)), "(4)");
        assert_eq!(
            cell(&element(4, VisualFlags::COMPARING | VisualFlags::SORTED)),
            "[4]"
        );
        assert_eq!(
            cell(&element(-4, VisualFlags::SWAPPING | VisualFlags::COMPARING)),
            "<-4>"
        );
    }

    #[test]
    fn step_line_includes_pseudocode() {
        let log = record(AlgorithmKind::Bubble, &[2, 1]);
        let step = log.get(1).unwrap();
        let mut out = Vec::new();
        write_step(&mut out, 1, step, AlgorithmKind::Bubble.algorithm().pseudocode()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("    1  [2] [1]  Compare 2 and 1"), "{text}");
        assert!(text.contains("  | "));
    }

    #[test]
    fn algorithm_listing_numbers_lines() {
        let mut out = Vec::new();
        write_algorithm(&mut out, AlgorithmKind::Heap).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("heap (Heap Sort)\n"));
        assert!(text.contains("   0  "));
    }
}
