use super::font::FontId;

/// A sized, positioned layout primitive.
///
/// `width` is the horizontal advance. `height` and `depth` measure the
/// extent above and below the baseline. `shift` moves the box down relative
/// to the baseline of the surrounding horizontal list and is what sub- and
/// superscript placement uses. A renderer walks the tree drawing each child
/// at the accumulated offset plus its shift.
#[derive(Debug, Clone, Default)]
pub struct MathBox {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub shift: f32,
    pub content: BoxContent,
}

/// What a box contains, as far as layout decisions care.
#[derive(Debug, Clone)]
pub enum BoxContent {
    /// Invisible spacing of fixed size.
    Strut,
    /// Spacing that a justification pass may stretch or shrink.
    Glue { stretch: f32, shrink: f32 },
    /// A single glyph; the renderer resolves the pair to an outline.
    Glyph { font: FontId, glyph: u32 },
    /// A filled rectangle, e.g. a fraction bar.
    Rule,
    /// Children laid out left to right along a common baseline.
    Horizontal(HorizontalBox),
    /// Children stacked downwards, baseline taken from the first child.
    Vertical(VerticalBox),
}

impl Default for BoxContent {
    fn default() -> BoxContent {
        BoxContent::Strut
    }
}

/// An ordered run of boxes together with the gaps where a line break is
/// permitted.
#[derive(Debug, Clone, Default)]
pub struct HorizontalBox {
    pub children: Vec<MathBox>,
    break_positions: Vec<usize>,
}

impl HorizontalBox {
    pub fn new() -> HorizontalBox {
        HorizontalBox::default()
    }

    pub(crate) fn with_parts(children: Vec<MathBox>, break_positions: Vec<usize>) -> HorizontalBox {
        HorizontalBox {
            children,
            break_positions,
        }
    }

    /// Appends a box.
    pub fn push(&mut self, child: MathBox) {
        self.children.push(child);
    }

    /// Appends a box at whose position a line may later be broken.
    /// Typically this is inter-atom glue; the box is discarded if a break
    /// happens there.
    pub fn push_breakable(&mut self, child: MathBox) {
        self.break_positions.push(self.children.len());
        self.children.push(child);
    }

    /// Child indices where a line break is permitted, in increasing order.
    pub fn break_positions(&self) -> &[usize] {
        &self.break_positions
    }

    pub(crate) fn into_parts(self) -> (Vec<MathBox>, Vec<usize>) {
        (self.children, self.break_positions)
    }

    /// The natural width of the run, the sum of the children's widths.
    pub fn natural_width(&self) -> f32 {
        self.children.iter().map(|child| child.width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn into_box(self) -> MathBox {
        MathBox::from_horizontal(self)
    }
}

impl MathBox {
    /// An invisible box of the given size.
    pub fn strut(width: f32, height: f32, depth: f32) -> MathBox {
        MathBox {
            width,
            height,
            depth,
            shift: 0.0,
            content: BoxContent::Strut,
        }
    }

    /// A spacing box with stretch and shrink recorded for justification.
    pub fn glue(width: f32, stretch: f32, shrink: f32) -> MathBox {
        MathBox {
            width,
            height: 0.0,
            depth: 0.0,
            shift: 0.0,
            content: BoxContent::Glue { stretch, shrink },
        }
    }

    /// A glyph leaf with the given metrics.
    pub fn glyph(width: f32, height: f32, depth: f32, font: FontId, glyph: u32) -> MathBox {
        MathBox {
            width,
            height,
            depth,
            shift: 0.0,
            content: BoxContent::Glyph { font, glyph },
        }
    }

    /// A filled rectangle.
    pub fn rule(width: f32, height: f32, depth: f32) -> MathBox {
        MathBox {
            width,
            height,
            depth,
            shift: 0.0,
            content: BoxContent::Rule,
        }
    }

    /// A horizontal list without break positions.
    pub fn horizontal(children: Vec<MathBox>) -> MathBox {
        MathBox::from_horizontal(HorizontalBox::with_parts(children, Vec::new()))
    }

    /// Seals a horizontal list into a box, computing its metrics from the
    /// children: the width is the sum of the child widths (kerns may be
    /// negative), height and depth are the maxima over the shifted children
    /// and never negative.
    pub fn from_horizontal(hbox: HorizontalBox) -> MathBox {
        let width = hbox.natural_width();
        let height = hbox
            .children
            .iter()
            .map(|child| child.height - child.shift)
            .fold(0.0, f32::max);
        let depth = hbox
            .children
            .iter()
            .map(|child| child.depth + child.shift)
            .fold(0.0, f32::max);
        MathBox {
            width,
            height,
            depth,
            shift: 0.0,
            content: BoxContent::Horizontal(hbox),
        }
    }

    /// Stacks boxes into a vertical list. The baseline is the first
    /// child's; every further child extends the depth.
    pub fn vertical(children: Vec<MathBox>) -> MathBox {
        let width = children
            .iter()
            .map(|child| child.width)
            .fold(0.0, f32::max);
        let height = children.first().map_or(0.0, |child| child.height);
        let depth = match children.split_first() {
            None => 0.0,
            Some((first, rest)) => {
                first.depth
                    + rest
                        .iter()
                        .map(|child| child.height + child.depth)
                        .sum::<f32>()
            }
        };
        MathBox {
            width,
            height,
            depth,
            shift: 0.0,
            content: BoxContent::Vertical(VerticalBox { children }),
        }
    }

    /// The lines of a vertical box, or an empty slice for any other box.
    pub fn lines(&self) -> &[MathBox] {
        match &self.content {
            BoxContent::Vertical(vbox) => &vbox.children,
            _ => &[],
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self.content, BoxContent::Horizontal(_))
    }

    /// Total vertical extent.
    pub fn total_height(&self) -> f32 {
        self.height + self.depth
    }
}

/// Children stacked downwards; the box's baseline is the first child's.
#[derive(Debug, Clone, Default)]
pub struct VerticalBox {
    pub children: Vec<MathBox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_metrics() {
        let mut hbox = HorizontalBox::new();
        hbox.push(MathBox::glyph(10.0, 7.0, 2.0, 1, 40));
        hbox.push(MathBox::strut(-1.5, 0.0, 0.0)); // kern
        let mut shifted = MathBox::glyph(8.0, 7.0, 2.0, 1, 41);
        shifted.shift = 3.0;
        hbox.push(shifted);

        let sealed = hbox.into_box();
        assert!((sealed.width - 16.5).abs() < 1e-6);
        assert!((sealed.height - 7.0).abs() < 1e-6);
        assert!((sealed.depth - 5.0).abs() < 1e-6);
    }

    #[test]
    fn empty_horizontal_is_zero_sized() {
        let sealed = MathBox::horizontal(Vec::new());
        assert_eq!(sealed.width, 0.0);
        assert_eq!(sealed.height, 0.0);
        assert_eq!(sealed.depth, 0.0);
    }

    #[test]
    fn vertical_baseline_is_first_line() {
        let lines = vec![
            MathBox::strut(20.0, 7.0, 2.0),
            MathBox::strut(0.0, 4.0, 0.0),
            MathBox::strut(10.0, 7.0, 2.0),
        ];
        let vbox = MathBox::vertical(lines);
        assert_eq!(vbox.width, 20.0);
        assert_eq!(vbox.height, 7.0);
        assert!((vbox.depth - (2.0 + 4.0 + 9.0)).abs() < 1e-6);
    }

    #[test]
    fn break_positions_follow_pushes() {
        let mut hbox = HorizontalBox::new();
        hbox.push(MathBox::strut(10.0, 0.0, 0.0));
        hbox.push_breakable(MathBox::glue(5.0, 1.0, 1.0));
        hbox.push(MathBox::strut(10.0, 0.0, 0.0));
        assert_eq!(hbox.break_positions(), &[1]);
    }
}
