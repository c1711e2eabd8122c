//! Configuration for accent line placement

/// Reference canvas width the relative defaults were tuned on
const REFERENCE_CANVAS_SIDE: f64 = 3543.0;

/// How `padding_between_line_and_text` and `line_length` are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineUnits {
    /// Document units
    Absolute,
    /// Fractions of the canvas's shorter side, read from the root `width`/`height`
    CanvasRelative,
}

/// Configuration options for the lines flanking a label
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Cap height as a fraction of font size
    pub font_cap_height_ratio: f64,

    /// Gap between the text's bounding box and the inner end of each line
    pub padding_between_line_and_text: f64,

    /// Length of each line
    pub line_length: f64,

    pub units: LineUnits,

    pub left_line_id: String,

    pub right_line_id: String,

    /// Attributes copied onto both lines
    pub svg_attributes: Vec<(String, String)>,

    /// Draw the measured text bounding box as a red rectangle
    pub debug_lines: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            font_cap_height_ratio: 0.8,
            padding_between_line_and_text: 150.0 / REFERENCE_CANVAS_SIDE,
            line_length: 280.0 / REFERENCE_CANVAS_SIDE,
            units: LineUnits::CanvasRelative,
            left_line_id: "small-header-left-line".to_string(),
            right_line_id: "small-header-right-line".to_string(),
            svg_attributes: vec![
                ("stroke".to_string(), "#000000".to_string()),
                ("stroke-width".to_string(), "6px".to_string()),
                ("stroke-linecap".to_string(), "square".to_string()),
            ],
            debug_lines: false,
        }
    }
}

impl LineConfig {
    /// Create a new configuration with canvas-relative defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults expressed in document units
    pub fn absolute() -> Self {
        Self {
            padding_between_line_and_text: 130.0,
            line_length: 280.0,
            units: LineUnits::Absolute,
            ..Self::default()
        }
    }

    pub fn with_font_cap_height_ratio(mut self, ratio: f64) -> Self {
        self.font_cap_height_ratio = ratio;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_between_line_and_text = padding;
        self
    }

    pub fn with_line_length(mut self, length: f64) -> Self {
        self.line_length = length;
        self
    }

    pub fn with_units(mut self, units: LineUnits) -> Self {
        self.units = units;
        self
    }

    /// Set the ids of the left and right line elements
    pub fn with_line_ids(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_line_id = left.into();
        self.right_line_id = right.into();
        self
    }

    /// Add or replace an attribute set on both lines
    pub fn with_svg_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.svg_attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.svg_attributes.push((name, value)),
        }
        self
    }

    pub fn with_debug_lines(mut self, debug: bool) -> Self {
        self.debug_lines = debug;
        self
    }
}
