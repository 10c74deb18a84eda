/// One fully composed screen: text rows, then the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<String>,
    /// Terminal cell for the cursor as (column, row).
    pub cursor: (u16, u16),
}

impl Frame {
    /// Lays out the visible part of `doc` for `viewport`.
    ///
    /// `win` is the cursor cell [`layout::viewport::Viewport::follow`]
    /// returned for the same viewport.
    pub fn compose(
        doc: &editor_state::document::Document,
        viewport: &layout::viewport::Viewport,
        win: layout::viewport::WinPosition,
    ) -> Self {
        let text_rows = viewport.text_rows();
        let mut rows = Vec::with_capacity(text_rows + layout::STATUS_ROWS);
        let mut line = viewport.first_visible_line;

        while rows.len() < text_rows {
            let Some(bytes) = doc.text_buffer.line_bytes(line) else {
                break;
            };

            for (i, chunk) in wrapped_chunks(&bytes, viewport).enumerate() {
                if rows.len() == text_rows {
                    break;
                }

                let gutter = if i == 0 {
                    line_number(line, viewport.gutter_width)
                } else {
                    " ".repeat(viewport.gutter_width)
                };

                rows.push(fit(gutter + &printable(chunk), viewport.cols));
            }

            line += 1;
        }

        rows.resize(text_rows, String::new());
        rows.push(status_line(doc, viewport.cols));

        let col = (viewport.gutter_width + win.win_col).min(viewport.cols.saturating_sub(1));
        let row = win.win_row.min(text_rows - 1);

        Self {
            rows,
            cursor: (to_cell(col), to_cell(row)),
        }
    }
}

/// Splits a line into the pieces shown on each of its wrapped rows.
///
/// A line filling its last row exactly gets a trailing empty chunk, where
/// the cursor sits when it is at the end of that line.
fn wrapped_chunks<'a>(
    bytes: &'a [u8],
    viewport: &layout::viewport::Viewport,
) -> impl Iterator<Item = &'a [u8]> {
    let width = viewport.text_width();

    (0..viewport.wrapped_rows(bytes.len())).map(move |k| {
        let start = (k * width).min(bytes.len());
        let end = (start + width).min(bytes.len());

        &bytes[start..end]
    })
}

fn line_number(line: usize, gutter_width: usize) -> String {
    let digits = gutter_width.saturating_sub(2);

    format!("{:>digits$}  ", line + 1)
}

fn printable(chunk: &[u8]) -> String {
    chunk
        .iter()
        .map(|&b| match b {
            b'\t' | b' ' => ' ',
            b if b.is_ascii_graphic() => char::from(b),
            _ => '?',
        })
        .collect()
}

fn status_line(doc: &editor_state::document::Document, cols: usize) -> String {
    let mode = format!("-- {} --", doc.mode().label());
    let cursor = doc.cursor();
    let position = format!("{}:{}", cursor.row + 1, cursor.col + 1);
    let gap = cols.saturating_sub(mode.len() + position.len()).max(1);

    fit(format!("{mode}{}{position}", " ".repeat(gap)), cols)
}

fn fit(mut row: String, cols: usize) -> String {
    // Rows are ASCII, so byte and column counts agree.
    row.truncate(cols);
    row
}

fn to_cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
