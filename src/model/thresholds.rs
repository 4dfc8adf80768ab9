use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdVariant {
    Strict,
    Lenient,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdProfile {
    pub label: String,
    pub falling_short_below: f64,
}

impl ThresholdProfile {
    pub fn strict_v1() -> Self {
        Self {
            label: "strict".to_string(),
            falling_short_below: 10.0,
        }
    }

    pub fn lenient_v1() -> Self {
        Self {
            label: "lenient".to_string(),
            falling_short_below: 5.0,
        }
    }

    pub fn from_variant(variant: ThresholdVariant) -> Self {
        match variant {
            ThresholdVariant::Strict => Self::strict_v1(),
            ThresholdVariant::Lenient => Self::lenient_v1(),
        }
    }

    /// An explicit cut-off replaces the variant value and is labelled `custom`.
    pub fn resolve(variant: ThresholdVariant, explicit: Option<f64>) -> Self {
        match explicit {
            Some(v) => Self {
                label: "custom".to_string(),
                falling_short_below: v,
            },
            None => Self::from_variant(variant),
        }
    }
}

impl Default for ThresholdProfile {
    fn default() -> Self {
        Self::strict_v1()
    }
}
