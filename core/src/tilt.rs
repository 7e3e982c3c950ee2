use crate::config::FxConfig;

pub const TILT_CLASS: &str = "tilt";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x_deg: f64,
    pub y_deg: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub x_deg_per_unit: f64,
    pub y_deg_per_unit: f64,
    pub lift_px: f64,
}

impl Default for Tilt {
    fn default() -> Self {
        Self::from_config(&FxConfig::default())
    }
}

impl Tilt {
    pub fn from_config(config: &FxConfig) -> Self {
        Self {
            x_deg_per_unit: config.tilt_x_deg,
            y_deg_per_unit: config.tilt_y_deg,
            lift_px: config.tilt_lift_px,
        }
    }

    /// Pointer offset from the box center, normalized to -0.5..=0.5 on both
    /// axes. Degenerate boxes report the center.
    pub fn normalized(rect: Rect, client_x: f64, client_y: f64) -> (f64, f64) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return (0.0, 0.0);
        }
        let nx = (client_x - rect.left) / rect.width - 0.5;
        let ny = (client_y - rect.top) / rect.height - 0.5;
        (nx.clamp(-0.5, 0.5), ny.clamp(-0.5, 0.5))
    }

    pub fn rotation(&self, rect: Rect, client_x: f64, client_y: f64) -> Rotation {
        let (nx, ny) = Self::normalized(rect, client_x, client_y);
        Rotation {
            x_deg: zero_sign(ny * self.x_deg_per_unit),
            y_deg: zero_sign(nx * self.y_deg_per_unit),
        }
    }

    pub fn transform(&self, rotation: Rotation) -> String {
        format!(
            "rotateX({}deg) rotateY({}deg) translateY({}px)",
            rotation.x_deg,
            rotation.y_deg,
            zero_sign(-self.lift_px)
        )
    }
}

/// Transform applied when the pointer leaves: no inline transform at all.
pub const NEUTRAL_TRANSFORM: &str = "";

fn zero_sign(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
