/// Tunables for the panel widget.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Width restored by `reset.x`, and the starting width.
    pub default_width: i32,
    /// Height restored by `reset.y`, and the starting height.
    pub default_height: i32,
    /// When set, the panel collapses while either dimension is below this
    /// many cells. `None` keeps it expanded.
    pub collapse_threshold: Option<i32>,
    /// Smallest share of the viewport the expanded panel covers on each axis.
    pub min_viewport_fraction: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_width: 40,
            default_height: 12,
            collapse_threshold: None,
            min_viewport_fraction: 0.2,
        }
    }
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_size(mut self, width: i32, height: i32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    pub fn collapse_threshold(mut self, threshold: i32) -> Self {
        self.collapse_threshold = Some(threshold);
        self
    }

    pub fn min_viewport_fraction(mut self, fraction: f32) -> Self {
        self.min_viewport_fraction = fraction.clamp(0.0, 1.0);
        self
    }
}
