//! Readiness tiers and their static result content

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete readiness classification derived from a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    High,
    Ready,
    Emerging,
    NotReady,
}

impl Tier {
    /// Classify a percentage; the highest qualifying threshold wins
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Tier::High,
            60..=79 => Tier::Ready,
            40..=59 => Tier::Emerging,
            _ => Tier::NotReady,
        }
    }

    /// Stable identifier (`high`, `ready`, `emerging`, `not-ready`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Ready => "ready",
            Tier::Emerging => "emerging",
            Tier::NotReady => "not-ready",
        }
    }

    /// Result content shown for this tier
    pub fn content(&self) -> &'static TierContent {
        match self {
            Tier::High => &HIGH,
            Tier::Ready => &READY,
            Tier::Emerging => &EMERGING,
            Tier::NotReady => &NOT_READY,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single business-impact figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactMetric {
    /// Headline value, e.g. "15-25%"
    pub value: &'static str,
    /// What the value means
    pub label: &'static str,
}

/// Static copy attached to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierContent {
    /// Human-readable tier name
    pub label: &'static str,
    /// Recommendations, in display order
    pub recommendations: &'static [&'static str],
    /// Revenue impact
    pub revenue: ImpactMetric,
    /// Support-ticket impact
    pub tickets: ImpactMetric,
}

const AI_REVENUE: &str = "Potential incremental revenue from AI channels";
const WISMO_REDUCTION: &str = "Estimated WISMO ticket reduction";

static HIGH: TierContent = TierContent {
    label: "Highly Ready",
    recommendations: &[
        "This merchant is an ideal UCP early adopter",
        "Position as competitive differentiator",
        "Focus on first-mover advantage messaging",
        "Suggest pilot program with Google Shopping agent",
    ],
    revenue: ImpactMetric { value: "15-25%", label: AI_REVENUE },
    tickets: ImpactMetric { value: "40-60%", label: WISMO_REDUCTION },
};

static READY: TierContent = TierContent {
    label: "Ready",
    recommendations: &[
        "Good fit for UCP adoption",
        "Address any specific gaps identified",
        "Emphasize low implementation effort",
        "Start with post-purchase (Order) capability value",
    ],
    revenue: ImpactMetric { value: "10-15%", label: AI_REVENUE },
    tickets: ImpactMetric { value: "30-40%", label: WISMO_REDUCTION },
};

static EMERGING: TierContent = TierContent {
    label: "Emerging",
    recommendations: &[
        "Consider a phased approach",
        "Focus on building AI/innovation appetite",
        "Start education on agentic commerce trends",
        "Revisit in 3-6 months for reassessment",
    ],
    revenue: ImpactMetric { value: "5-10%", label: "Potential future opportunity" },
    tickets: ImpactMetric {
        value: "20-30%",
        label: "Possible ticket reduction with Order capability",
    },
};

static NOT_READY: TierContent = TierContent {
    label: "Not Ready",
    recommendations: &[
        "UCP may not be the priority right now",
        "Focus on foundational commerce improvements",
        "Build case for innovation investment",
        "Monitor competitor moves in AI commerce",
    ],
    revenue: ImpactMetric { value: "—", label: "Focus on foundations first" },
    tickets: ImpactMetric { value: "—", label: "Address core operations" },
};
