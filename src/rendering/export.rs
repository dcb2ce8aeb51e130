// src/rendering/export.rs

use crate::config::ExportSettings;
use crate::error::{NviewError, Result};
use crate::rendering::scene::{Rgb, Scene, SeparationLine, Shape, Trace};
use std::fs;
use std::path::Path;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;

/// Number of dash/gap pairs across a separation line.
const DASHES: usize = 40;

/// Horizontal axis whose key points are exactly the spin-parity slots.
struct SlotAxis {
    range: RangedCoordf64,
    slots: Vec<f64>,
}

impl Ranged for SlotAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.range.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.slots.iter().copied().take(hint.max_num_points()).collect()
    }

    fn range(&self) -> Range<f64> {
        self.range.range()
    }
}

// --- Helper Function: Draws the scene to ANY Backend ---
fn draw_level_scheme<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    // Terminal scenes are just a message
    if let Some(note) = &scene.annotation {
        let (w, h) = root.dim_in_pixel();
        let style = TextStyle::from(("sans-serif", 20).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let at = (
            (note.x * w as f64) as i32,
            ((1.0 - note.y) * h as f64) as i32,
        );
        root.draw_text(&note.text, &style, at)?;
        return Ok(());
    }

    let (x0, x1) = scene.x_axis.range;
    let (y0, y1) = scene.y_axis.range;
    let x_axis = SlotAxis {
        range: (x0..x1).into(),
        slots: scene.x_axis.ticks.iter().map(|t| t.value).collect(),
    };

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_axis, y0..y1)?;

    let tick_label = |x: &f64| {
        scene
            .x_axis
            .ticks
            .iter()
            .find(|t| (t.value - x).abs() < 1e-9)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(scene.x_axis.ticks.len().max(1))
        .x_label_formatter(&tick_label)
        .x_desc(scene.x_axis.title.as_str())
        .y_desc(scene.y_axis.title.as_str())
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    // 1. Excitation bands
    chart.draw_series(scene.bands.iter().map(|b| {
        Rectangle::new(
            [(b.x_range.0, b.lower), (b.x_range.1, b.upper)],
            color(b.fill).mix(b.opacity).filled(),
        )
    }))?;

    // 2. Traces (hover markers are invisible and not drawn)
    let mut has_legend = false;
    for trace in &scene.traces {
        if let Trace::Separation(line) = trace {
            let stroke = color(line.color).stroke_width(2);
            let legend_color = color(line.color);
            chart
                .draw_series(separation_segments(line).into_iter().map(|pts| PathElement::new(pts, stroke)))?
                .label(line.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], legend_color));
            has_legend = true;
        }
    }

    // 3. Level lines and width boxes
    for shape in &scene.shapes {
        match shape {
            Shape::Line { x0, x1, y, color: c } => {
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(*x0, *y), (*x1, *y)],
                    color(*c).stroke_width(2),
                )))?;
            }
            Shape::Rect { x0, x1, y0, y1, fill, opacity } => {
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(*x0, *y0), (*x1, *y1)],
                    color(*fill).mix(*opacity).filled(),
                )))?;
            }
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

fn color(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn separation_segments(line: &SeparationLine) -> Vec<Vec<(f64, f64)>> {
    let (start, end) = line.x_range;
    if !line.dashed {
        return vec![vec![(start, line.energy_mev), (end, line.energy_mev)]];
    }
    let period = (end - start) / DASHES as f64;
    (0..DASHES)
        .map(|i| {
            let a = start + i as f64 * period;
            vec![(a, line.energy_mev), (a + period * 0.6, line.energy_mev)]
        })
        .collect()
}

/// Renders a scene to an SVG document.
pub fn render_svg(scene: &Scene, settings: &ExportSettings) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (settings.width, settings.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(|e| NviewError::Export(e.to_string()))?;
        draw_level_scheme(&root, scene).map_err(|e| NviewError::Export(e.to_string()))?;
        root.present().map_err(|e| NviewError::Export(e.to_string()))?;
    }
    Ok(buffer)
}

pub fn export_svg(scene: &Scene, path: &Path, settings: &ExportSettings) -> Result<()> {
    let svg = render_svg(scene, settings)?;
    fs::write(path, svg)?;
    log::info!("Level scheme exported to {:?}", path);
    Ok(())
}
