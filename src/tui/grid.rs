/// Grid placement for the settings list
///
/// Rows flow left to right across `columns` columns. A full-span row breaks
/// the current line and takes a whole line to itself.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub line: usize,
    pub column: u16,
    pub span: u16,
}

pub fn place(full_span: &[bool], columns: u16) -> Vec<Placement> {
    let columns = columns.max(1);
    let mut placements = Vec::with_capacity(full_span.len());
    let mut line = 0;
    let mut column = 0;

    for (index, &full) in full_span.iter().enumerate() {
        if full {
            if column > 0 {
                line += 1;
                column = 0;
            }
            placements.push(Placement {
                index,
                line,
                column: 0,
                span: columns,
            });
            line += 1;
            continue;
        }

        placements.push(Placement {
            index,
            line,
            column,
            span: 1,
        });
        column += 1;
        if column == columns {
            column = 0;
            line += 1;
        }
    }

    placements
}

/// Cell rectangles in content coordinates (top line at y = 0)
///
/// Each line is as tall as its tallest row. The last column absorbs the
/// remainder of the width.
pub fn cell_rects(placements: &[Placement], heights: &[u16], columns: u16, width: u16) -> Vec<Rect> {
    let columns = columns.max(1);
    let line_count = placements.iter().map(|p| p.line + 1).max().unwrap_or(0);

    let mut line_heights = vec![0u16; line_count];
    for p in placements {
        let height = heights.get(p.index).copied().unwrap_or(1);
        line_heights[p.line] = line_heights[p.line].max(height);
    }

    let mut line_tops = Vec::with_capacity(line_count);
    let mut y = 0u16;
    for height in &line_heights {
        line_tops.push(y);
        y = y.saturating_add(*height);
    }

    let column_width = width / columns;
    placements
        .iter()
        .map(|p| {
            let x = p.column * column_width;
            let w = if p.column + p.span >= columns {
                width.saturating_sub(x)
            } else {
                column_width * p.span
            };
            Rect::new(x, line_tops[p.line], w, line_heights[p.line])
        })
        .collect()
}

/// Smallest scroll change that brings `rect` fully into a viewport of `height`
pub fn scroll_to_show(rect: Rect, scroll: u16, height: u16) -> u16 {
    if rect.y < scroll {
        rect.y
    } else if rect.bottom() > scroll.saturating_add(height) {
        rect.bottom().saturating_sub(height)
    } else {
        scroll
    }
}

/// Map a content rect onto the screen; None if it starts outside the viewport
pub fn to_screen(rect: Rect, viewport: Rect, scroll: u16) -> Option<Rect> {
    if rect.y < scroll || rect.y - scroll >= viewport.height {
        return None;
    }
    let y = viewport.y + (rect.y - scroll);
    let height = rect.height.min(viewport.bottom() - y);
    Some(Rect::new(viewport.x + rect.x, y, rect.width, height))
}

/// Index of the rect containing the point
pub fn hit(rects: &[Option<Rect>], x: u16, y: u16) -> Option<usize> {
    rects.iter().position(|rect| {
        rect.is_some_and(|r| x >= r.x && x < r.right() && y >= r.y && y < r.bottom())
    })
}
