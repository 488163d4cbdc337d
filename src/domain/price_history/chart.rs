//! Line-chart configuration handed to the chart collaborator.
//!
//! Serializes to the shape Chart.js expects for `new Chart(canvas, config)`.
//! The y-axis tick formatter is a function and cannot travel as JSON; the
//! browser binding attaches it using [`Y_TICK_SUFFIX`].

use super::PriceSeries;
use serde::Serialize;

pub const LINE_COLOR: &str = "#e4002b";
pub const FILL_COLOR: &str = "rgba(0, 150, 136, 0.15)";
pub const TICK_COLOR: &str = "#666";
pub const DATASET_LABEL: &str = "Price (€)";
pub const Y_TICK_SUFFIX: &str = "€";
pub const X_MAX_TICKS: u32 = 6;

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: &'static str,
    pub data: Vec<u64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub point_background_color: &'static str,
    pub point_border_color: &'static str,
    pub point_radius: u32,
    pub point_hover_radius: u32,
    pub border_width: u32,
    pub tension: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub maintain_aspect_ratio: bool,
    pub responsive: bool,
    pub plugins: serde_json::Value,
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub ticks: Ticks,
    pub grid: Grid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_skip_padding: Option<u32>,
    pub color: &'static str,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    pub color: &'static str,
}

impl ChartConfig {
    /// Fixed styling around the projected series.
    pub fn line(series: &PriceSeries) -> Self {
        Self {
            kind: "line",
            data: ChartData {
                labels: series.labels.clone(),
                datasets: vec![LineDataset {
                    label: DATASET_LABEL,
                    data: series.values.clone(),
                    border_color: LINE_COLOR,
                    background_color: FILL_COLOR,
                    point_background_color: LINE_COLOR,
                    point_border_color: "#fff",
                    point_radius: 3,
                    point_hover_radius: 5,
                    border_width: 2,
                    tension: 0.25,
                }],
            },
            options: ChartOptions {
                maintain_aspect_ratio: false,
                responsive: true,
                plugins: serde_json::json!({
                    "legend": { "display": false },
                    "tooltip": {
                        "backgroundColor": "#333",
                        "titleColor": "#fff",
                        "bodyColor": "#eee",
                        "padding": 8,
                        "cornerRadius": 4
                    }
                }),
                scales: Scales {
                    x: Axis {
                        begin_at_zero: None,
                        ticks: Ticks {
                            max_ticks_limit: Some(X_MAX_TICKS),
                            auto_skip_padding: Some(12),
                            color: TICK_COLOR,
                            font: Font { size: 12 },
                        },
                        grid: Grid {
                            color: "rgba(0,0,0,0.03)",
                        },
                    },
                    y: Axis {
                        begin_at_zero: Some(false),
                        ticks: Ticks {
                            max_ticks_limit: None,
                            auto_skip_padding: None,
                            color: TICK_COLOR,
                            font: Font { size: 12 },
                        },
                        grid: Grid {
                            color: "rgba(0,0,0,0.05)",
                        },
                    },
                },
            },
        }
    }

    pub fn point_count(&self) -> usize {
        self.data.labels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> PriceSeries {
        PriceSeries {
            labels: vec!["01/01/2024".into(), "01/02/2024".into()],
            values: vec![450_000, 440_000],
        }
    }

    #[test]
    fn test_line_config_json_shape() {
        let json = serde_json::to_value(ChartConfig::line(&series())).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["data"]["labels"][1], "01/02/2024");
        assert_eq!(json["data"]["datasets"][0]["data"][0], 450000);
        assert_eq!(json["data"]["datasets"][0]["borderColor"], LINE_COLOR);
        assert_eq!(json["options"]["maintainAspectRatio"], false);
        assert_eq!(json["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(json["options"]["scales"]["x"]["ticks"]["maxTicksLimit"], 6);
        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], false);
        assert!(json["options"]["scales"]["x"].get("beginAtZero").is_none());
    }

    #[test]
    fn test_point_count_matches_series() {
        assert_eq!(ChartConfig::line(&series()).point_count(), 2);
    }
}
