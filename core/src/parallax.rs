use crate::config::FxConfig;

pub const PARALLAX_SPEED_ATTR: &str = "data-parallax-speed";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    pub default_speed: f64,
    pub factor: f64,
}

impl Default for Parallax {
    fn default() -> Self {
        Self::from_config(&FxConfig::default())
    }
}

impl Parallax {
    pub fn from_config(config: &FxConfig) -> Self {
        Self {
            default_speed: config.parallax_default_speed,
            factor: config.parallax_factor,
        }
    }

    /// Speed from the element's attribute. Missing, blank or unparsable
    /// values use the default.
    pub fn speed(&self, attr: Option<&str>) -> f64 {
        attr.map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|speed| speed.is_finite())
            .unwrap_or(self.default_speed)
    }

    pub fn offset(&self, scroll_y: f64, speed: f64) -> f64 {
        scroll_y * speed * self.factor
    }

    pub fn transform(&self, scroll_y: f64, speed: f64) -> String {
        translate_y_css(self.offset(scroll_y, speed))
    }
}

pub fn translate_y_css(offset: f64) -> String {
    // -0.0 would print as "-0px"
    let offset = if offset == 0.0 { 0.0 } else { offset };
    format!("translate3d(0, {offset}px, 0)")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn offset_matches_formula() {
        let parallax = Parallax::default();
        for speed in [0.15, 0.3] {
            assert!(close(parallax.offset(0.0, speed), 0.0));
            assert!(close(parallax.offset(500.0, speed), 500.0 * speed * -0.2));
        }
        assert!(close(parallax.offset(500.0, 0.15), -15.0));
        assert!(close(parallax.offset(500.0, 0.3), -30.0));
    }

    #[test]
    fn speed_attribute_parsing() {
        let parallax = Parallax::default();
        assert_eq!(parallax.speed(None), 0.15);
        assert_eq!(parallax.speed(Some("")), 0.15);
        assert_eq!(parallax.speed(Some("fast")), 0.15);
        assert_eq!(parallax.speed(Some(" 0.3 ")), 0.3);
    }

    #[test]
    fn transform_at_rest() {
        assert_eq!(Parallax::default().transform(0.0, 0.15), "translate3d(0, 0px, 0)");
        assert_eq!(translate_y_css(-30.0), "translate3d(0, -30px, 0)");
    }
}
