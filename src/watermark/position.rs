//! Placement math for the date watermark.
//!
//! Maps (image dimensions, text dimensions, anchor, padding) to the top-left
//! coordinate at which the text is drawn. Nine anchors cover the corners,
//! edge centers and the image center. No clamping is performed: text larger
//! than the image yields negative coordinates and the renderer clips.

use clap::ValueEnum;

/// The nine named watermark placement zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Anchor {
    #[value(name = "top-left")]
    TopLeft,
    #[value(name = "top-center")]
    TopCenter,
    #[value(name = "top-right")]
    TopRight,
    #[value(name = "center-left")]
    CenterLeft,
    #[value(name = "center")]
    Center,
    #[value(name = "center-right")]
    CenterRight,
    #[value(name = "bottom-left")]
    BottomLeft,
    #[value(name = "bottom-center")]
    BottomCenter,
    #[value(name = "bottom-right")]
    BottomRight,
}

impl Anchor {
    /// Lenient name lookup used by the config-file path.
    ///
    /// Unknown names fall back to `BottomRight` silently; this is the
    /// documented soft default, not an error. The CLI path is stricter and
    /// rejects unknown names at parse time.
    pub fn from_name(name: &str) -> Anchor {
        match name {
            "top-left" => Anchor::TopLeft,
            "top-center" => Anchor::TopCenter,
            "top-right" => Anchor::TopRight,
            "center-left" => Anchor::CenterLeft,
            "center" => Anchor::Center,
            "center-right" => Anchor::CenterRight,
            "bottom-left" => Anchor::BottomLeft,
            "bottom-center" => Anchor::BottomCenter,
            _ => Anchor::BottomRight,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::CenterLeft => "center-left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

/// Calculate the top-left draw coordinate for the watermark text.
///
/// Each axis is independently set to `padding` (near edge), the floor of
/// `(dimension - text_dimension) / 2` (centered), or
/// `dimension - text_dimension - padding` (far edge).
///
/// Centering uses floor division (`div_euclid`), not Rust's truncating `/`:
/// the two differ when the text is larger than the image and the difference
/// goes negative, and exact pixel placement is part of the contract.
pub fn calculate_position(
    anchor: Anchor,
    img_width: u32,
    img_height: u32,
    text_width: u32,
    text_height: u32,
    padding: u32,
) -> (i32, i32) {
    let img_w = img_width as i32;
    let img_h = img_height as i32;
    let text_w = text_width as i32;
    let text_h = text_height as i32;
    let pad = padding as i32;

    let near = pad;
    let center_x = (img_w - text_w).div_euclid(2);
    let center_y = (img_h - text_h).div_euclid(2);
    let far_x = img_w - text_w - pad;
    let far_y = img_h - text_h - pad;

    match anchor {
        Anchor::TopLeft => (near, near),
        Anchor::TopCenter => (center_x, near),
        Anchor::TopRight => (far_x, near),
        Anchor::CenterLeft => (near, center_y),
        Anchor::Center => (center_x, center_y),
        Anchor::CenterRight => (far_x, center_y),
        Anchor::BottomLeft => (near, far_y),
        Anchor::BottomCenter => (center_x, far_y),
        Anchor::BottomRight => (far_x, far_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHORS: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    #[test]
    fn test_top_left() {
        assert_eq!(
            calculate_position(Anchor::TopLeft, 800, 600, 100, 50, 10),
            (10, 10)
        );
    }

    #[test]
    fn test_top_center() {
        // (800 - 100) / 2 = 350
        assert_eq!(
            calculate_position(Anchor::TopCenter, 800, 600, 100, 50, 10),
            (350, 10)
        );
    }

    #[test]
    fn test_top_right() {
        // 800 - 100 - 10 = 690
        assert_eq!(
            calculate_position(Anchor::TopRight, 800, 600, 100, 50, 10),
            (690, 10)
        );
    }

    #[test]
    fn test_center_left() {
        // (600 - 50) / 2 = 275
        assert_eq!(
            calculate_position(Anchor::CenterLeft, 800, 600, 100, 50, 10),
            (10, 275)
        );
    }

    #[test]
    fn test_center() {
        assert_eq!(
            calculate_position(Anchor::Center, 800, 600, 100, 50, 10),
            (350, 275)
        );
    }

    #[test]
    fn test_center_right() {
        assert_eq!(
            calculate_position(Anchor::CenterRight, 800, 600, 100, 50, 10),
            (690, 275)
        );
    }

    #[test]
    fn test_bottom_left() {
        // 600 - 50 - 10 = 540
        assert_eq!(
            calculate_position(Anchor::BottomLeft, 800, 600, 100, 50, 10),
            (10, 540)
        );
    }

    #[test]
    fn test_bottom_center() {
        assert_eq!(
            calculate_position(Anchor::BottomCenter, 800, 600, 100, 50, 10),
            (350, 540)
        );
    }

    #[test]
    fn test_bottom_right() {
        assert_eq!(
            calculate_position(Anchor::BottomRight, 800, 600, 100, 50, 10),
            (690, 540)
        );
    }

    #[test]
    fn test_zero_padding_text_fills_image() {
        // With zero padding and text the size of the image, every axis is 0
        // regardless of whether it is near-edge, centered or far-edge.
        for anchor in ANCHORS {
            assert_eq!(
                calculate_position(anchor, 200, 200, 200, 200, 0),
                (0, 0),
                "anchor {:?}",
                anchor
            );
        }
    }

    #[test]
    fn test_centering_uses_floor_division() {
        // (101 - 50) / 2 = 25 (floor of 25.5)
        let (x, _) = calculate_position(Anchor::TopCenter, 101, 100, 50, 10, 0);
        assert_eq!(x, 25);

        // Oversized text: (101 - 150) / 2 must floor to -25, not truncate
        // toward zero to -24.
        let (x, _) = calculate_position(Anchor::TopCenter, 101, 100, 150, 10, 0);
        assert_eq!(x, -25);
    }

    #[test]
    fn test_oversized_text_not_clamped() {
        let (x, y) = calculate_position(Anchor::BottomRight, 100, 100, 150, 120, 20);
        assert_eq!((x, y), (-70, -40));
    }

    #[test]
    fn test_from_name_known_values() {
        for anchor in ANCHORS {
            assert_eq!(Anchor::from_name(anchor.name()), anchor);
        }
    }

    #[test]
    fn test_from_name_unknown_falls_back_to_bottom_right() {
        for garbage in ["", "bottom", "TOP-LEFT", "middle", "lower-right"] {
            let anchor = Anchor::from_name(garbage);
            assert_eq!(anchor, Anchor::BottomRight);
            assert_eq!(
                calculate_position(anchor, 800, 600, 100, 50, 20),
                calculate_position(Anchor::BottomRight, 800, 600, 100, 50, 20)
            );
        }
    }

    #[test]
    fn test_asymmetric_dimensions() {
        // 1920 - 200 - 20 = 1700, 1080 - 50 - 20 = 1010
        assert_eq!(
            calculate_position(Anchor::BottomRight, 1920, 1080, 200, 50, 20),
            (1700, 1010)
        );
    }
}
