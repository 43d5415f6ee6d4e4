//! The elastic band between the anchor and the badge's hole.

use crate::config::{ColorStop, LanyardStyle};
use crate::float::Float;
use crate::vec::Vec2;

/// Everything a renderer needs to draw the band for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lanyard<F: Float> {
    pub anchor: Vec2<F>,
    pub hole: Vec2<F>,
    /// `|dx| + |dy|` from anchor to badge.
    pub tension: F,
    pub width: F,
    pub rgb: [u8; 3],
}

impl<F: Float> Lanyard<F> {
    pub fn new(anchor: Vec2<F>, badge: Vec2<F>, hole_offset_y: f64, style: &LanyardStyle) -> Self {
        let hole = badge - Vec2::new(F::zero(), F::from_f64(hole_offset_y));
        let tension = (badge - anchor).manhattan();
        let t = tension.to_f64();
        Lanyard {
            anchor,
            hole,
            tension,
            width: F::from_f64(band_width(t, style)),
            rgb: band_color(t, &style.color_stops),
        }
    }

    /// `#rrggbb` form of the band colour.
    pub fn css_color(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// Width interpolated from slack to taut, clamped at both ends.
pub fn band_width(tension: f64, style: &LanyardStyle) -> f64 {
    if !(style.width_taut_tension > 0.0) {
        return style.width_slack;
    }
    let t = (tension / style.width_taut_tension).clamp(0.0, 1.0);
    style.width_slack + (style.width_taut - style.width_slack) * t
}

/// Piecewise-linear colour over the stops, clamped outside them.
pub fn band_color(tension: f64, stops: &[ColorStop]) -> [u8; 3] {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return [0, 0, 0],
    };
    if tension <= first.tension {
        return first.rgb;
    }
    if tension >= last.tension {
        return last.rgb;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if tension <= b.tension {
            let span = b.tension - a.tension;
            let t = if span > 0.0 { (tension - a.tension) / span } else { 1.0 };
            let mut rgb = [0u8; 3];
            for (i, channel) in rgb.iter_mut().enumerate() {
                let v = f64::from(a.rgb[i]) + (f64::from(b.rgb[i]) - f64::from(a.rgb[i])) * t;
                *channel = v.round().clamp(0.0, 255.0) as u8;
            }
            return rgb;
        }
    }
    last.rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_hits_stops_and_midpoints() {
        let style = LanyardStyle::default();
        assert_eq!(band_color(0.0, &style.color_stops), [0xff, 0x6b, 0x6b]);
        assert_eq!(band_color(300.0, &style.color_stops), [0xff, 0x00, 0x00]);
        assert_eq!(band_color(9000.0, &style.color_stops), [0x99, 0x00, 0x00]);
        assert_eq!(band_color(450.0, &style.color_stops), [0xcc, 0x00, 0x00]);
    }

    #[test]
    fn width_clamps() {
        let style = LanyardStyle::default();
        assert_eq!(band_width(-50.0, &style), 9.0);
        assert_eq!(band_width(300.0, &style), 8.5);
        assert_eq!(band_width(1200.0, &style), 8.0);
    }

    #[test]
    fn hole_sits_above_badge() {
        let l = Lanyard::new(
            Vec2::new(100.0f32, -100.0),
            Vec2::new(130.0, 200.0),
            40.0,
            &LanyardStyle::default(),
        );
        assert_eq!(l.hole, Vec2::new(130.0, 160.0));
        assert_eq!(l.tension, 330.0);
        assert_eq!(l.css_color().len(), 7);
    }
}
