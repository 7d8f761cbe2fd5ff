//! Two-slice proportion chart
//!
//! Renders the Plagiarized / Unique split as an SVG doughnut. One instance
//! represents one rendered chart; the renderer disposes the previous
//! instance before building a new one.

const PLAGIARIZED_COLOR: &str = "#ef4444";
const UNIQUE_COLOR: &str = "#10b981";

/// Radius chosen so the circle circumference is 100 units; slice sizes can
/// then be written directly as percentages in stroke-dasharray.
const RADIUS: f64 = 15.915_494_309_189_535;

/// One rendered doughnut chart.
#[derive(Debug)]
pub struct DonutChart {
    plagiarized: f64,
    unique: f64,
    svg: String,
}

impl DonutChart {
    /// Build the chart for the given percentages. Inputs are clamped to
    /// 0-100; the engine's values are trusted to sum to 100.
    pub fn new(plagiarized: f64, unique: f64) -> Self {
        let plagiarized = plagiarized.clamp(0.0, 100.0);
        let unique = unique.clamp(0.0, 100.0);
        let remainder = 100.0 - plagiarized;

        let svg = format!(
            concat!(
                "<svg viewBox=\"0 0 42 48\" class=\"donut\" role=\"img\" ",
                "aria-label=\"Plagiarized {p}%, Unique {u}%\">\n",
                "  <circle cx=\"21\" cy=\"21\" r=\"{r}\" fill=\"transparent\" ",
                "stroke=\"{unique_color}\" stroke-width=\"6\"/>\n",
                "  <circle cx=\"21\" cy=\"21\" r=\"{r}\" fill=\"transparent\" ",
                "stroke=\"{plag_color}\" stroke-width=\"6\" ",
                "stroke-dasharray=\"{p} {rest}\" stroke-dashoffset=\"25\"/>\n",
                "  <text x=\"21\" y=\"22.5\" text-anchor=\"middle\" class=\"donut-value\" ",
                "font-size=\"6\">{p}%</text>\n",
                "  <text x=\"21\" y=\"46\" text-anchor=\"middle\" class=\"donut-legend\" ",
                "font-size=\"3.5\">Plagiarized {p}% / Unique {u}%</text>\n",
                "</svg>"
            ),
            p = plagiarized,
            u = unique,
            rest = remainder,
            r = RADIUS,
            plag_color = PLAGIARIZED_COLOR,
            unique_color = UNIQUE_COLOR,
        );

        Self {
            plagiarized,
            unique,
            svg,
        }
    }

    /// The rendered SVG document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn plagiarized(&self) -> f64 {
        self.plagiarized
    }

    pub fn unique(&self) -> f64 {
        self.unique
    }
}
