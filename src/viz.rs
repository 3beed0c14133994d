//! Chart rendering with Plotters: cluster scatter, pairwise grid, pie chart

use crate::model::KMeansModel;
use crate::pipeline::PipelineOutput;
use crate::summary::ClusterSummary;
use ndarray::Array2;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Color per cluster id, Set2-style. Supports the full k range of [2, 10].
const CLUSTER_COLORS: [RGBColor; 10] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
];

fn cluster_color(cluster: usize) -> RGBColor {
    CLUSTER_COLORS[cluster % CLUSTER_COLORS.len()]
}

/// Axis range for one feature column, padded so boundary points stay visible.
fn padded_range(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

/// Render the two-feature scatter: one point per record colored by cluster,
/// centroids drawn as squares.
pub fn create_scatter_plot(
    matrix: &Array2<f64>,
    model: &KMeansModel,
    feature_names: &[String],
    output_path: &str,
) -> crate::Result<()> {
    let x_values: Vec<f64> = matrix.column(0).to_vec();
    let y_values: Vec<f64> = matrix.column(1).to_vec();

    let (x_min, x_max) = padded_range(x_values.iter().copied());
    let (y_min, y_max) = padded_range(y_values.iter().copied());

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption = format!(
        "Customer Segments: {} vs {}",
        feature_names[0], feature_names[1]
    );
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(feature_names[0].as_str())
        .y_desc(feature_names[1].as_str())
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for cluster in model.present_clusters() {
        let color = cluster_color(cluster);
        let points = x_values
            .iter()
            .zip(y_values.iter())
            .zip(model.labels.iter())
            .filter(|(_, &label)| label == cluster)
            .map(|((&x, &y), _)| Circle::new((x, y), 4, color.filled()));

        chart
            .draw_series(points)?
            .label(format!("Cụm {}", cluster))
            .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
    }

    // Centroids as slightly larger hollow squares on top of the points
    for (cluster, centroid) in model.centroids.outer_iter().enumerate() {
        let color = cluster_color(cluster);
        let (cx, cy) = (centroid[0], centroid[1]);
        let dx = (x_max - x_min) * 0.012;
        let dy = (y_max - y_min) * 0.012;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(cx - dx, cy - dy), (cx + dx, cy + dy)],
            color.stroke_width(3),
        )))?;
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render the pairwise grid for three or more features: one scatter per
/// ordered feature pair, feature names on the diagonal.
pub fn create_pair_grid(
    matrix: &Array2<f64>,
    model: &KMeansModel,
    feature_names: &[String],
    output_path: &str,
) -> crate::Result<()> {
    let m = feature_names.len();
    let cell_px = 280u32;
    let root = BitMapBackend::new(output_path, (cell_px * m as u32, cell_px * m as u32))
        .into_drawing_area();
    root.fill(&WHITE)?;

    let cells = root.split_evenly((m, m));

    for row in 0..m {
        for col in 0..m {
            let cell = &cells[row * m + col];

            if row == col {
                let (w, h) = cell.dim_in_pixel();
                let style = TextStyle::from(("sans-serif", 20).into_font())
                    .pos(Pos::new(HPos::Center, VPos::Center));
                cell.draw(&Text::new(
                    feature_names[row].clone(),
                    ((w / 2) as i32, (h / 2) as i32),
                    style,
                ))?;
                continue;
            }

            // Seaborn convention: column selects x, row selects y
            let x_values: Vec<f64> = matrix.column(col).to_vec();
            let y_values: Vec<f64> = matrix.column(row).to_vec();
            let (x_min, x_max) = padded_range(x_values.iter().copied());
            let (y_min, y_max) = padded_range(y_values.iter().copied());

            let mut chart = ChartBuilder::on(cell)
                .margin(8)
                .x_label_area_size(25)
                .y_label_area_size(35)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(4)
                .y_labels(4)
                .label_style(("sans-serif", 10))
                .draw()?;

            for cluster in model.present_clusters() {
                let color = cluster_color(cluster);
                let points = x_values
                    .iter()
                    .zip(y_values.iter())
                    .zip(model.labels.iter())
                    .filter(|(_, &label)| label == cluster)
                    .map(|((&x, &y), _)| Circle::new((x, y), 2, color.filled()));
                chart.draw_series(points)?;
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Render the cluster-size pie chart: one slice per cluster id present,
/// labeled `Cụm {id}` with its percentage, ascending by id.
pub fn create_pie_chart(summaries: &[ClusterSummary], output_path: &str) -> crate::Result<()> {
    let root = BitMapBackend::new(output_path, (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Cluster Distribution", ("sans-serif", 28))?;

    let sizes: Vec<f64> = summaries.iter().map(|s| s.count as f64).collect();
    let colors: Vec<RGBColor> = summaries.iter().map(|s| cluster_color(s.cluster)).collect();
    let labels: Vec<String> = summaries
        .iter()
        .map(|s| format!("Cụm {}", s.cluster))
        .collect();

    let center = (320, 320);
    let radius = 220.0;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 20).into_font());
    pie.percentages(("sans-serif", 16).into_font().color(&BLACK));

    root.draw(&pie)?;
    root.present()?;
    Ok(())
}

/// Render every chart for one pipeline run.
///
/// Two selected features produce a single scatter at `chart_path`; more
/// produce the pairwise grid there instead. The pie chart lands next to it
/// with a `_pie` suffix.
pub fn render_charts(
    output: &PipelineOutput,
    feature_names: &[String],
    chart_path: &str,
) -> crate::Result<String> {
    if feature_names.len() == 2 {
        create_scatter_plot(&output.matrix, &output.model, feature_names, chart_path)?;
    } else {
        create_pair_grid(&output.matrix, &output.model, feature_names, chart_path)?;
    }

    let pie_path = pie_chart_path(chart_path);
    create_pie_chart(&output.summaries, &pie_path)?;
    Ok(pie_path)
}

/// Derive the pie chart path from the main chart path.
pub fn pie_chart_path(chart_path: &str) -> String {
    if chart_path.ends_with(".png") {
        chart_path.replace(".png", "_pie.png")
    } else {
        format!("{chart_path}_pie.png")
    }
}
