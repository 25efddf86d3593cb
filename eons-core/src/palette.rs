use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// jgraph takes color channels as fractions in `[0, 1]`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb(r, g, b) = *self;
        write!(
            f,
            "{} {} {}",
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0
        )
    }
}

// Colorblind-safe qualitative palette.
pub const PALETTE: [Rgb; 8] = [
    Rgb(51, 34, 136),
    Rgb(17, 119, 51),
    Rgb(68, 170, 153),
    Rgb(136, 204, 238),
    Rgb(221, 204, 119),
    Rgb(204, 102, 119),
    Rgb(170, 68, 153),
    Rgb(136, 34, 85),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkType {
    Box,
    Circle,
    Diamond,
    Triangle,
    X,
    Cross,
    Ellipse,
}

impl MarkType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
            Self::X => "x",
            Self::Cross => "cross",
            Self::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const MARK_TYPES: [MarkType; 7] = [
    MarkType::Box,
    MarkType::Circle,
    MarkType::Diamond,
    MarkType::Triangle,
    MarkType::X,
    MarkType::Cross,
    MarkType::Ellipse,
];

/// Cursor over a fixed list that wraps at the end.
#[derive(Clone, Debug)]
pub struct Cycle<T: 'static> {
    items: &'static [T],
    cursor: usize,
}

impl<T: Copy + 'static> Cycle<T> {
    /// `items` must be non-empty.
    pub const fn new(items: &'static [T]) -> Self {
        Self { items, cursor: 0 }
    }

    pub fn advance(&mut self) -> T {
        let item = self.items[self.cursor];
        self.cursor = (self.cursor + 1) % self.items.len();
        item
    }
}

/// Color and marker cursors shared by every series in one script.
#[derive(Clone, Debug)]
pub struct SeriesStyle {
    pub colors: Cycle<Rgb>,
    pub marks: Cycle<MarkType>,
}

impl SeriesStyle {
    pub fn next_color(&mut self) -> Rgb {
        self.colors.advance()
    }

    pub fn next_mark(&mut self) -> MarkType {
        self.marks.advance()
    }
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            colors: Cycle::new(&PALETTE),
            marks: Cycle::new(&MARK_TYPES),
        }
    }
}
