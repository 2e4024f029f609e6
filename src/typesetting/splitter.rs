//! Breaks an overlong horizontal box into a stack of lines.
//!
//! Breaks are only legal at gaps explicitly marked on a horizontal box,
//! either at the top level or inside a nested horizontal box that itself
//! carries break positions; tightly grouped material is never split. A line
//! that cannot be brought under the target width is emitted overfull and
//! reported, never treated as an error.

use log::debug;

use super::environment::Environment;
use super::math_box::{BoxContent, HorizontalBox, MathBox};

/// Outcome of splitting a box into lines.
///
/// `overfull_lines` holds the indices (line numbers, counted without the
/// interline struts) of lines wider than the requested width.
#[derive(Debug)]
pub struct SplitResult {
    pub content: MathBox,
    pub overfull_lines: Vec<usize>,
}

impl SplitResult {
    fn single_line(content: MathBox) -> SplitResult {
        SplitResult {
            content,
            overfull_lines: Vec::new(),
        }
    }

    pub fn is_overfull(&self) -> bool {
        !self.overfull_lines.is_empty()
    }
}

/// Splits `content` into lines no wider than `width` where possible and
/// stacks them with `line_space` points between consecutive lines.
///
/// A non-horizontal box is a single unbreakable line. An infinite width
/// short-circuits the search and returns the input as the one line. An
/// empty horizontal box becomes a vertical box with no lines and no size.
pub fn split(content: MathBox, width: f32, line_space: f32) -> SplitResult {
    if width == f32::INFINITY {
        return SplitResult::single_line(content);
    }
    match &content.content {
        BoxContent::Horizontal(hbox) => {
            if hbox.is_empty() {
                return SplitResult::single_line(MathBox::vertical(Vec::new()));
            }
        }
        _ => {
            let overfull_lines = if content.width > width { vec![0] } else { Vec::new() };
            return SplitResult {
                content,
                overfull_lines,
            };
        }
    }
    if content.width <= width {
        return SplitResult::single_line(content);
    }

    let hbox = match content.content {
        BoxContent::Horizontal(hbox) => hbox,
        _ => unreachable!(),
    };
    split_lines(hbox, width, line_space)
}

/// Splits using the environment's text width and interline space.
pub fn split_for(content: MathBox, env: &Environment) -> SplitResult {
    split(content, env.text_width(), env.interline())
}

fn split_lines(hbox: HorizontalBox, width: f32, line_space: f32) -> SplitResult {
    let mut lines: Vec<MathBox> = Vec::new();
    let mut overfull_lines = Vec::new();
    let mut rest = hbox;
    loop {
        if rest.is_empty() {
            break;
        }
        if rest.natural_width() <= width {
            lines.push(MathBox::from_horizontal(rest));
            break;
        }
        match find_break(&rest, width) {
            Some(path) => {
                let (line, remainder) = split_at(rest, &path);
                let line = MathBox::from_horizontal(line);
                if line.width > width {
                    debug!(
                        "overfull line {}: {:.2}pt exceeds {:.2}pt",
                        lines.len(),
                        line.width,
                        width
                    );
                    overfull_lines.push(lines.len());
                }
                lines.push(line);
                rest = remainder;
            }
            None => {
                debug!("no valid break point, emitting an overfull line");
                overfull_lines.push(lines.len());
                lines.push(MathBox::from_horizontal(rest));
                break;
            }
        }
    }

    if lines.len() == 1 {
        let only = lines.remove(0);
        return SplitResult {
            content: only,
            overfull_lines,
        };
    }
    let mut stacked = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 && line_space > 0.0 {
            stacked.push(MathBox::strut(0.0, line_space, 0.0));
        }
        stacked.push(line);
    }
    SplitResult {
        content: MathBox::vertical(stacked),
        overfull_lines,
    }
}

// One frame of the search: a horizontal box along the path from the root to
// the current position, and the next child to visit in it.
struct Frame<'a> {
    hbox: &'a HorizontalBox,
    next: usize,
}

/// Finds the gap to break the next line at, as a path of child indices from
/// the outermost box down to the breakable child. Returns `None` when no
/// valid break point exists.
///
/// Among the valid breaks at or before the target width the rightmost wins,
/// so each line carries as much material as fits. When every valid break
/// lies beyond the target the leftmost of those is taken and the line is
/// left overfull. A gap before any material is never valid: it would
/// produce an empty line.
fn find_break(root: &HorizontalBox, target: f32) -> Option<Vec<usize>> {
    let mut stack = vec![Frame {
        hbox: root,
        next: 0,
    }];
    let mut consumed = 0.0f32;
    let mut best: Option<Vec<usize>> = None;

    while let Some(top) = stack.last_mut() {
        if top.next >= top.hbox.children.len() {
            stack.pop();
            continue;
        }
        let hbox = top.hbox;
        let index = top.next;
        top.next += 1;

        if hbox.break_positions().contains(&index) && consumed > 0.0 {
            let path: Vec<usize> = stack.iter().map(|frame| frame.next - 1).collect();
            if consumed <= target {
                best = Some(path);
            } else {
                return best.or(Some(path));
            }
        }
        let child = &hbox.children[index];
        if let BoxContent::Horizontal(inner) = &child.content {
            if has_breaks(inner) {
                stack.push(Frame {
                    hbox: inner,
                    next: 0,
                });
                continue;
            }
        }
        consumed += child.width;
        if consumed > target && best.is_some() {
            return best;
        }
    }
    best
}

fn has_breaks(root: &HorizontalBox) -> bool {
    let mut stack = vec![root];
    while let Some(hbox) = stack.pop() {
        if !hbox.break_positions().is_empty() {
            return true;
        }
        for child in &hbox.children {
            if let BoxContent::Horizontal(inner) = &child.content {
                stack.push(inner);
            }
        }
    }
    false
}

// Material removed from one nesting level while splitting.
struct Level {
    before: Vec<MathBox>,
    after: Vec<MathBox>,
    breaks: Vec<usize>,
    index: usize,
}

/// Splits the box at the gap identified by `path`. The breakable child at
/// the end of the path (the glue the line breaks at) is discarded; on every
/// level above it the children before the split join the line and the
/// children after it re-form the remainder, which keeps its remaining break
/// positions for further splitting.
fn split_at(hbox: HorizontalBox, path: &[usize]) -> (HorizontalBox, HorizontalBox) {
    let (&glue_index, ancestors) = path.split_last().expect("empty break path");

    let mut levels: Vec<Level> = Vec::with_capacity(ancestors.len());
    let mut current = hbox;
    for &index in ancestors {
        let (mut children, breaks) = current.into_parts();
        let after = children.split_off(index + 1);
        let nested = children.pop().expect("break path out of range");
        levels.push(Level {
            before: children,
            after,
            breaks,
            index,
        });
        current = match nested.content {
            BoxContent::Horizontal(inner) => inner,
            _ => unreachable!("break path descends into a non-horizontal box"),
        };
    }

    let (mut children, breaks) = current.into_parts();
    let after = children.split_off(glue_index + 1);
    children.pop(); // the glue the line breaks at
    let mut left = HorizontalBox::with_parts(children, breaks_before(&breaks, glue_index));
    let mut right = HorizontalBox::with_parts(after, breaks_after(&breaks, glue_index, 0));

    for level in levels.into_iter().rev() {
        let Level {
            mut before,
            after,
            breaks,
            index,
        } = level;
        let left_breaks = breaks_before(&breaks, index);
        if !left.is_empty() {
            before.push(left.into_box());
        }
        let mut rest_children = Vec::with_capacity(after.len() + 1);
        let mut prepended = 0;
        if !right.is_empty() {
            rest_children.push(right.into_box());
            prepended = 1;
        }
        rest_children.extend(after);
        let right_breaks = breaks_after(&breaks, index, prepended);
        left = HorizontalBox::with_parts(before, left_breaks);
        right = HorizontalBox::with_parts(rest_children, right_breaks);
    }
    (left, right)
}

fn breaks_before(breaks: &[usize], index: usize) -> Vec<usize> {
    breaks.iter().copied().filter(|&p| p < index).collect()
}

fn breaks_after(breaks: &[usize], index: usize, prepended: usize) -> Vec<usize> {
    breaks
        .iter()
        .copied()
        .filter(|&p| p > index)
        .map(|p| p - index - 1 + prepended)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(width: f32) -> MathBox {
        MathBox::glyph(width, 7.0, 2.0, 1, 120)
    }

    fn breakable_glue(width: f32) -> MathBox {
        MathBox::glue(width, 1.0, 1.0)
    }

    fn three_symbol_row() -> MathBox {
        let mut hbox = HorizontalBox::new();
        hbox.push(sym(10.0));
        hbox.push_breakable(breakable_glue(5.0));
        hbox.push(sym(10.0));
        hbox.push_breakable(breakable_glue(5.0));
        hbox.push(sym(10.0));
        hbox.into_box()
    }

    #[test]
    fn infinite_width_keeps_the_box_intact() {
        let row = three_symbol_row();
        let (width, height, depth) = (row.width, row.height, row.depth);
        let result = split(row, f32::INFINITY, 2.0);
        assert!(!result.is_overfull());
        assert!(result.content.is_horizontal());
        assert_eq!(result.content.width, width);
        assert_eq!(result.content.height, height);
        assert_eq!(result.content.depth, depth);
    }

    #[test]
    fn exact_fit_does_not_break() {
        let row = three_symbol_row();
        let result = split(row, 40.0, 2.0);
        assert!(!result.is_overfull());
        assert!(result.content.is_horizontal());
        assert_eq!(result.content.width, 40.0);
    }

    #[test]
    fn breaks_at_the_rightmost_gap_that_fits() {
        let result = split(three_symbol_row(), 27.0, 2.0);
        assert!(!result.is_overfull());
        let lines: Vec<&MathBox> = result
            .content
            .lines()
            .iter()
            .filter(|b| b.is_horizontal())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].width, 25.0);
        assert_eq!(lines[1].width, 10.0);
    }

    #[test]
    fn interline_struts_sit_between_lines_only() {
        let result = split(three_symbol_row(), 27.0, 3.0);
        let children = result.content.lines();
        assert_eq!(children.len(), 3);
        assert!(children[0].is_horizontal());
        assert!(!children[1].is_horizontal());
        assert_eq!(children[1].height, 3.0);
        assert!(children[2].is_horizontal());
        // baseline on line one, everything else goes into the depth
        assert_eq!(result.content.height, 7.0);
        assert!((result.content.depth - (2.0 + 3.0 + 9.0)).abs() < 1e-6);
    }

    #[test]
    fn unbreakable_wide_box_is_one_overfull_line() {
        let result = split(sym(50.0), 20.0, 2.0);
        assert_eq!(result.overfull_lines, vec![0]);
        assert_eq!(result.content.width, 50.0);
    }

    #[test]
    fn empty_box_yields_no_lines() {
        let result = split(MathBox::horizontal(Vec::new()), 10.0, 2.0);
        assert!(!result.is_overfull());
        assert_eq!(result.content.lines().len(), 0);
        assert_eq!(result.content.width, 0.0);
        assert_eq!(result.content.total_height(), 0.0);
    }

    #[test]
    fn grouped_material_is_never_split() {
        let mut hbox = HorizontalBox::new();
        hbox.push(sym(10.0));
        hbox.push_breakable(breakable_glue(5.0));
        hbox.push(MathBox::horizontal(vec![sym(10.0), sym(10.0)]));
        let result = split(hbox.into_box(), 12.0, 0.0);
        let lines = result.content.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].width, 10.0);
        assert_eq!(lines[1].width, 20.0);
        assert_eq!(result.overfull_lines, vec![1]);
    }

    #[test]
    fn breaks_inside_a_nested_box_with_gaps() {
        let mut inner = HorizontalBox::new();
        inner.push(sym(10.0));
        inner.push_breakable(breakable_glue(5.0));
        inner.push(sym(10.0));

        let mut outer = HorizontalBox::new();
        outer.push(sym(10.0));
        outer.push(inner.into_box());
        outer.push(sym(10.0));

        let result = split(outer.into_box(), 22.0, 0.0);
        assert!(!result.is_overfull());
        let lines = result.content.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].width, 20.0);
        assert_eq!(lines[1].width, 20.0);
    }

    #[test]
    fn first_gap_past_the_target_is_used_as_a_last_resort() {
        let mut hbox = HorizontalBox::new();
        hbox.push(sym(30.0));
        hbox.push_breakable(breakable_glue(5.0));
        hbox.push(sym(10.0));
        let result = split(hbox.into_box(), 20.0, 0.0);
        let lines = result.content.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].width, 30.0);
        assert_eq!(lines[1].width, 10.0);
        assert_eq!(result.overfull_lines, vec![0]);
    }

    #[test]
    fn trailing_gap_does_not_produce_an_empty_line() {
        let mut hbox = HorizontalBox::new();
        hbox.push(sym(30.0));
        hbox.push_breakable(breakable_glue(5.0));
        let result = split(hbox.into_box(), 20.0, 0.0);
        assert_eq!(result.content.lines().len(), 0);
        assert!(result.content.is_horizontal());
        assert_eq!(result.content.width, 30.0);
        assert_eq!(result.overfull_lines, vec![0]);
    }
}
