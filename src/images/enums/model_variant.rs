#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelVariant {
    #[default]
    Dev,
    Schnell,
}

impl ModelVariant {
    pub fn value(&self) -> &'static str {
        match *self {
            Self::Dev => "dev",
            Self::Schnell => "schnell",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "dev" => Some(Self::Dev),
            "schnell" => Some(Self::Schnell),
            _ => None,
        }
    }

    pub fn default_inference_steps(&self) -> u32 {
        match *self {
            Self::Dev => 28,
            Self::Schnell => 4,
        }
    }

    pub fn max_inference_steps(&self) -> u32 {
        match *self {
            Self::Dev => 50,
            Self::Schnell => 4,
        }
    }
}
