#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Megapixels {
    #[default]
    One,
    Quarter,
}

impl Megapixels {
    pub fn value(&self) -> &'static str {
        match *self {
            Self::One => "1",
            Self::Quarter => "0.25",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::One),
            "0.25" => Some(Self::Quarter),
            _ => None,
        }
    }
}
