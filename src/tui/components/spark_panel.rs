// Spark panel
//
// Draws the history trail on a braille line chart. The points already live
// in the 520x92 logical canvas with y growing downward, so the chart uses
// the canvas as its bounds and flips y back.

use crate::gas::derive::{SPARK_HEIGHT, SPARK_WIDTH};
use crate::gas::history::HISTORY_CAPACITY;
use crate::gas::Dashboard;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

pub struct SparkPanel;

impl SparkPanel {
    pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Last {} samples ", HISTORY_CAPACITY));

        if dash.spark.is_empty() {
            let placeholder = Paragraph::new(" No data yet")
                .style(Style::default().fg(theme.muted))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let points = chart_points(&dash.spark);
        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.tone(dash.mood.tone())))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(Axis::default().bounds([0.0, SPARK_WIDTH]))
            .y_axis(Axis::default().bounds([0.0, SPARK_HEIGHT]));

        frame.render_widget(chart, area);
    }
}

/// Canvas points (y down) to chart points (y up)
fn chart_points(spark: &[(f64, f64)]) -> Vec<(f64, f64)> {
    spark.iter().map(|&(x, y)| (x, SPARK_HEIGHT - y)).collect()
}
