pub const CUSTOM_ASPECT_RATIO: &str = "custom";

pub static FIXED_ASPECT_RATIOS: [&str; 11] = [
    "1:1", "16:9", "21:9", "3:2", "2:3", "4:5", "5:4", "3:4", "4:3", "9:16", "9:21",
];

const BASE_EDGE: u32 = 1024;

pub const DIMENSION_MIN: u32 = 256;
pub const DIMENSION_MAX: u32 = 1440;
pub const DIMENSION_STEP: u32 = 16;
pub const DIMENSION_DEFAULT: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomDimensions {
    width: u32,
    height: u32,
}

impl CustomDimensions {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width: snap_dimension(width),
            height: snap_dimension(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

fn snap_dimension(value: i64) -> u32 {
    let step = DIMENSION_STEP as i64;
    let clamped = value.clamp(DIMENSION_MIN as i64, DIMENSION_MAX as i64);
    let snapped = ((clamped + step / 2) / step) * step;
    snapped.clamp(DIMENSION_MIN as i64, DIMENSION_MAX as i64) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Fixed { width: u32, height: u32 },
    Custom(CustomDimensions),
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Fixed {
            width: 1,
            height: 1,
        }
    }
}

impl AspectRatio {
    pub fn parse_fixed(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !FIXED_ASPECT_RATIOS.contains(&raw) {
            return None;
        }

        let (width, height) = raw.split_once(':')?;
        Some(Self::Fixed {
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        })
    }

    pub fn value(&self) -> String {
        match self {
            Self::Fixed { width, height } => format!("{}:{}", width, height),
            Self::Custom(_) => CUSTOM_ASPECT_RATIO.to_string(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    pub fn custom_dimensions(&self) -> Option<CustomDimensions> {
        match self {
            Self::Custom(dimensions) => Some(*dimensions),
            Self::Fixed { .. } => None,
        }
    }

    pub fn render_dimensions(&self) -> (u32, u32) {
        match self {
            Self::Fixed { width, height } => {
                let scaled = (BASE_EDGE as f64 * (*height as f64 / *width as f64)).round();
                (BASE_EDGE, scaled as u32)
            }
            Self::Custom(dimensions) => (dimensions.width(), dimensions.height()),
        }
    }
}
