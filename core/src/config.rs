use serde::Deserialize;

pub const DEFAULT_THEME_KEY: &str = "theme";
pub const MAX_COLLAGE_VARIANTS: u32 = 16;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be within 0..=1, got {value}")]
    Ratio { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge { field: &'static str, value: u32, max: u32 },
    #[error("theme storage key must not be empty")]
    EmptyThemeKey,
}

/// Every tunable used by the page effects. Missing fields keep their defaults,
/// so a page only needs to spell out what it overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FxConfig {
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_pct: f64,
    pub parallax_default_speed: f64,
    pub parallax_factor: f64,
    pub tilt_x_deg: f64,
    pub tilt_y_deg: f64,
    pub tilt_lift_px: f64,
    pub nav_clearance_px: f64,
    pub nav_observer_margin_px: f64,
    pub nav_bottom_margin_pct: f64,
    pub nav_thresholds: Vec<f64>,
    pub nav_click_settle_ms: f64,
    pub collage_variants: u32,
    pub collage_stagger_base_s: f64,
    pub collage_stagger_step_s: f64,
    pub theme_key: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_bottom_margin_pct: 10.0,
            parallax_default_speed: 0.15,
            parallax_factor: -0.2,
            tilt_x_deg: -4.0,
            tilt_y_deg: 6.0,
            tilt_lift_px: 2.0,
            nav_clearance_px: 8.0,
            nav_observer_margin_px: 20.0,
            nav_bottom_margin_pct: 55.0,
            nav_thresholds: vec![0.1, 0.25, 0.5, 0.75],
            nav_click_settle_ms: 800.0,
            collage_variants: 4,
            collage_stagger_base_s: 0.08,
            collage_stagger_step_s: 0.06,
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl FxConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: FxConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ratio("revealThreshold", self.reveal_threshold)?;
        for value in &self.nav_thresholds {
            ratio("navThresholds", *value)?;
        }
        non_negative("revealBottomMarginPct", self.reveal_bottom_margin_pct)?;
        non_negative("parallaxDefaultSpeed", self.parallax_default_speed)?;
        non_negative("tiltLiftPx", self.tilt_lift_px)?;
        non_negative("navClearancePx", self.nav_clearance_px)?;
        non_negative("navObserverMarginPx", self.nav_observer_margin_px)?;
        non_negative("navBottomMarginPct", self.nav_bottom_margin_pct)?;
        non_negative("navClickSettleMs", self.nav_click_settle_ms)?;
        non_negative("collageStaggerBaseS", self.collage_stagger_base_s)?;
        non_negative("collageStaggerStepS", self.collage_stagger_step_s)?;
        if !self.parallax_factor.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "parallaxFactor",
                value: self.parallax_factor,
            });
        }
        if self.collage_variants > MAX_COLLAGE_VARIANTS {
            return Err(ConfigError::TooLarge {
                field: "collageVariants",
                value: self.collage_variants,
                max: MAX_COLLAGE_VARIANTS,
            });
        }
        if self.theme_key.trim().is_empty() {
            return Err(ConfigError::EmptyThemeKey);
        }
        Ok(())
    }

    /// Root margin for the reveal observer: look ahead by shrinking the
    /// bottom edge of the viewport.
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px -{}% 0px", self.reveal_bottom_margin_pct)
    }

    /// Root margin for the section observer. Sections only count once they
    /// reach the area just below the fixed nav bar.
    pub fn nav_root_margin(&self, nav_height: f64) -> String {
        format!(
            "-{}px 0px -{}% 0px",
            nav_height + self.nav_observer_margin_px,
            self.nav_bottom_margin_pct
        )
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Ratio { field, value })
    }
}
