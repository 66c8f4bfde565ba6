//! Tunable constants for every effect, grouped per component.
//!
//! Defaults reproduce the stock page. A host may override any subset with
//! `configure(json)`; missing sections and fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::error::{FxError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FxConfig {
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub showcase: ShowcaseConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub sparkles: SparkleConfig,
    #[serde(default)]
    pub flow: FlowConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Height of the fixed navbar; scroll targets land this far above the section.
    pub header_offset: f64,
    /// Scroll offset past which the navbar switches to its frosted style.
    pub frosted_threshold: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            header_offset: 70.0,
            frosted_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    /// Elements count as visible once they are this far above the viewport bottom.
    pub bottom_margin: f64,
    /// Initial downward offset of hidden elements.
    pub offset: f64,
    pub transition_ms: u32,
    /// Number of frame increments a dashboard counter takes to reach its target.
    pub counter_steps: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 50.0,
            offset: 30.0,
            transition_ms: 600,
            counter_steps: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub cycle_ms: u32,
    pub pulse_ms: u32,
    /// Start the automatic cycle at boot.
    pub autoplay: bool,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            cycle_ms: 8000,
            pulse_ms: 150,
            autoplay: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Hero translation per unit of page scroll.
    pub parallax_rate: f64,
    pub progress_height_px: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            parallax_rate: -0.5,
            progress_height_px: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub steps: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { steps: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    pub count: u32,
    pub min_radius: f64,
    pub max_radius: f64,
    pub lifetime_ms: u32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: 8,
            min_radius: 50.0,
            max_radius: 80.0,
            lifetime_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub card_threshold: f64,
    pub step_stagger_ms: u32,
    pub step_ms: u32,
    pub arrow_delay_ms: u32,
    pub arrow_ms: u32,
    pub spec_threshold: f64,
    pub spec_stagger_ms: u32,
    pub spec_ms: u32,
    pub data_sparkle_delay_ms: u32,
    pub data_sparkle_count: u32,
    pub data_sparkle_lifetime_ms: u32,
    pub icon_threshold: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            card_threshold: 0.3,
            step_stagger_ms: 400,
            step_ms: 600,
            arrow_delay_ms: 300,
            arrow_ms: 400,
            spec_threshold: 0.3,
            spec_stagger_ms: 200,
            spec_ms: 800,
            data_sparkle_delay_ms: 400,
            data_sparkle_count: 5,
            data_sparkle_lifetime_ms: 2000,
            icon_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub fade_delay_ms: u32,
    pub fade_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            fade_delay_ms: 100,
            fade_ms: 500,
        }
    }
}

impl FxConfig {
    /// Parse and validate a JSON override.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FxConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_fraction("reveal.threshold", self.reveal.threshold)?;
        check_fraction("flow.card_threshold", self.flow.card_threshold)?;
        check_fraction("flow.spec_threshold", self.flow.spec_threshold)?;
        check_fraction("flow.icon_threshold", self.flow.icon_threshold)?;

        check_finite("nav.header_offset", self.nav.header_offset)?;
        check_finite("nav.frosted_threshold", self.nav.frosted_threshold)?;
        check_non_negative("reveal.bottom_margin", self.reveal.bottom_margin)?;
        check_finite("reveal.offset", self.reveal.offset)?;
        check_finite("scroll.parallax_rate", self.scroll.parallax_rate)?;

        check_positive("reveal.counter_steps", self.reveal.counter_steps)?;
        check_positive("stats.steps", self.stats.steps)?;
        check_positive("showcase.cycle_ms", self.showcase.cycle_ms)?;
        check_positive("sparkles.count", self.sparkles.count)?;
        check_positive("sparkles.lifetime_ms", self.sparkles.lifetime_ms)?;
        check_positive("flow.data_sparkle_count", self.flow.data_sparkle_count)?;
        check_positive(
            "flow.data_sparkle_lifetime_ms",
            self.flow.data_sparkle_lifetime_ms,
        )?;

        let s = &self.sparkles;
        if !(s.min_radius.is_finite() && s.max_radius.is_finite()) || s.min_radius < 0.0 {
            return Err(FxError::config(
                "sparkles.min_radius",
                "must be a finite, non-negative distance",
            ));
        }
        if s.min_radius > s.max_radius {
            return Err(FxError::config(
                "sparkles.max_radius",
                format!("must be >= min_radius ({})", s.min_radius),
            ));
        }
        Ok(())
    }
}

fn check_fraction(field: &'static str, v: f64) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(FxError::config(field, format!("must be within [0, 1], got {}", v)))
    }
}

fn check_finite(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(FxError::config(field, "must be finite"))
    }
}

fn check_non_negative(field: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(FxError::config(field, format!("must be a finite, non-negative length, got {}", v)))
    }
}

fn check_positive(field: &'static str, v: u32) -> Result<()> {
    if v > 0 {
        Ok(())
    } else {
        Err(FxError::config(field, "must be greater than zero"))
    }
}
