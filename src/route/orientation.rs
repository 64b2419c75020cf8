/// Display rotation for a directional marker.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Orientation {
    /// Rotation to draw the marker with, in `[-90, 90]` degrees.
    pub display_angle: f64,
    /// The heading was turned by 180° to keep the marker upright; mirror front/back decoration.
    pub flipped: bool,
}

/// Keep a marker upright: headings pointing left are turned by 180° and reported as flipped.
///
/// Finite inputs outside `[-180, 180]` are wrapped first; non-finite input is treated as `0`.
pub fn normalize(angle_deg: f64) -> Orientation {
    if !angle_deg.is_finite() {
        return Orientation {
            display_angle: 0.0,
            flipped: false,
        };
    }

    let mut a = angle_deg;
    if !(-180.0..=180.0).contains(&a) {
        a = (a + 180.0).rem_euclid(360.0) - 180.0;
    }

    if a > 90.0 {
        Orientation {
            display_angle: a - 180.0,
            flipped: true,
        }
    } else if a < -90.0 {
        Orientation {
            display_angle: a + 180.0,
            flipped: true,
        }
    } else {
        Orientation {
            display_angle: a,
            flipped: false,
        }
    }
}
