//! Header-anchored column slicing for the earnings table.
//!
//! The five column captions give away where each column starts on the
//! page. Every body line is sliced at those offsets and each non-empty
//! cell lands in its column's block — empty cells contribute no line,
//! which is exactly the ragged shape the reconciler corrects from the
//! article catalog.

use payslip_stats_payslip_models::RawColumns;

/// The five column captions, in table order.
const CAPTIONS: [&str; 5] = ["Art", "Specifikation", "Antal", "Sats", "Beløb"];

/// Locates the earnings table in extracted page text and slices it into
/// the five raw column blocks.
///
/// Returns `None` when no line carries all five captions in order, or
/// when no body rows follow the header.
#[must_use]
pub fn slice_columns(text: &str) -> Option<RawColumns> {
    let lines: Vec<&str> = text.lines().collect();

    let (header_index, starts) = lines
        .iter()
        .enumerate()
        .find_map(|(index, line)| caption_offsets(line).map(|starts| (index, starts)))?;

    let mut blocks: [Vec<&str>; 5] = [const { Vec::new() }; 5];
    let mut saw_row = false;

    for line in &lines[header_index + 1..] {
        if line.trim().is_empty() {
            if saw_row {
                // End of the table body.
                break;
            }
            // Padding between header and body.
            continue;
        }
        saw_row = true;
        for (column, cell) in slice_at(line, &starts).into_iter().enumerate() {
            if !cell.is_empty() {
                blocks[column].push(cell);
            }
        }
    }

    if !saw_row {
        return None;
    }

    let [code, description, quantity, rate, amount] = blocks.map(|block| block.join("\n"));
    Some(RawColumns {
        code,
        description,
        quantity,
        rate,
        amount,
    })
}

/// Byte offsets of the five captions within a candidate header line, or
/// `None` if any caption is missing or out of order.
fn caption_offsets(line: &str) -> Option<[usize; 5]> {
    let mut starts = [0usize; 5];
    let mut from = 0;
    for (index, caption) in CAPTIONS.iter().enumerate() {
        let at = line[from..].find(caption)? + from;
        starts[index] = at;
        from = at + caption.len();
    }
    Some(starts)
}

/// Slices a body line at the column start offsets, trimming each cell.
fn slice_at<'a>(line: &'a str, starts: &[usize; 5]) -> [&'a str; 5] {
    let mut cells = [""; 5];
    for (index, cell) in cells.iter_mut().enumerate() {
        let start = boundary_at(line, starts[index]);
        let end = starts
            .get(index + 1)
            .map_or(line.len(), |&next| boundary_at(line, next));
        if start < line.len() && start < end {
            *cell = line[start..end].trim();
        }
    }
    cells
}

/// Largest char boundary at or below `at`, so multi-byte Danish letters
/// never split a slice mid-character.
fn boundary_at(line: &str, at: usize) -> usize {
    if at >= line.len() {
        return line.len();
    }
    let mut at = at;
    while !line.is_char_boundary(at) {
        at -= 1;
    }
    at
}
