// src/rendering/level_glyph.rs

use crate::config::SchemeStyle;
use crate::model::HalfLife;
use crate::rendering::scene::Shape;

/// Marks for one level plus the vertical range they occupy.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGlyph {
    pub shapes: Vec<Shape>,
    pub extent: (f64, f64),
}

/// Horizontal line at `energy_mev` across `slot ± xstep`. A level with a
/// measured decay width also gets a translucent box of height Γ.
pub fn draw_level(
    energy_mev: f64,
    half_life: &HalfLife,
    slot: usize,
    xstep: f64,
    style: &SchemeStyle,
) -> LevelGlyph {
    let x = slot as f64;
    let (x0, x1) = (x - xstep, x + xstep);

    // Unknown half-life: grey line, nothing else
    if !half_life.is_known() {
        return LevelGlyph {
            shapes: vec![Shape::Line {
                x0,
                x1,
                y: energy_mev,
                color: style.uncertain_level_color,
            }],
            extent: (energy_mev, energy_mev),
        };
    }

    let mut shapes = vec![Shape::Line {
        x0,
        x1,
        y: energy_mev,
        color: style.level_color,
    }];

    let extent = match half_life.width_mev() {
        Some(gamma) => {
            let (y0, y1) = (energy_mev - gamma / 2.0, energy_mev + gamma / 2.0);
            shapes.push(Shape::Rect {
                x0,
                x1,
                y0,
                y1,
                fill: style.width_color,
                opacity: style.width_opacity,
            });
            (y0, y1)
        }
        None => (energy_mev, energy_mev),
    };

    LevelGlyph { shapes, extent }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WidthUnit;

    #[test]
    fn test_unknown_half_life_is_grey_point() {
        let style = SchemeStyle::default();
        let glyph = draw_level(2.0, &HalfLife::Unknown, 1, 0.25, &style);
        assert_eq!(glyph.extent, (2.0, 2.0));
        assert_eq!(
            glyph.shapes,
            vec![Shape::Line { x0: 0.75, x1: 1.25, y: 2.0, color: style.uncertain_level_color }]
        );
    }

    #[test]
    fn test_time_half_life_has_no_band() {
        let style = SchemeStyle::default();
        let hl = HalfLife::Time { value: Some(3.2), unit: "ps".into() };
        let glyph = draw_level(1.5, &hl, 0, 0.25, &style);
        assert_eq!(glyph.extent, (1.5, 1.5));
        assert_eq!(glyph.shapes.len(), 1);
        assert!(matches!(glyph.shapes[0], Shape::Line { color, .. } if color == style.level_color));
    }

    #[test]
    fn test_width_band_extent() {
        let style = SchemeStyle::default();
        let hl = HalfLife::Width { value: Some(50.0), unit: WidthUnit::Kev };
        let glyph = draw_level(1.0, &hl, 2, 0.25, &style);

        let (lo, hi) = glyph.extent;
        assert!((lo - 0.975).abs() < 1e-12);
        assert!((hi - 1.025).abs() < 1e-12);
        assert_eq!(glyph.shapes.len(), 2);
        match &glyph.shapes[1] {
            Shape::Rect { x0, x1, y0, y1, opacity, .. } => {
                assert_eq!((*x0, *x1), (1.75, 2.25));
                assert_eq!((*y0, *y1), glyph.extent);
                assert_eq!(*opacity, 0.25);
            }
            other => panic!("expected width rectangle, got {:?}", other),
        }
    }
}
