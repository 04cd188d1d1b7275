//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `plotbot_core` linkage.
//! - Render one demo chart so local sanity checks cover the full path.

use plotbot_core::{
    render_chart, AxisBounds, Chart, ChartShape, Coordinate, Creator, RenderOptions,
};

fn main() {
    println!("plotbot_core ping={}", plotbot_core::ping());
    println!("plotbot_core version={}", plotbot_core::core_version());

    let mut chart = Chart::new(
        ChartShape::Axis {
            x_left: Some("introvert".to_string()),
            x_right: Some("extrovert".to_string()),
            y_bottom: Some("chaotic".to_string()),
            y_top: Some("orderly".to_string()),
            bounds: AxisBounds::closed(-10.0, 10.0, -10.0, 10.0),
        },
        Creator {
            username: "demo".to_string(),
            user_id: 0,
        },
    );
    chart.set_title(Some("demo chart".to_string()));

    for (label, x, y) in [("alice", -3.0, 4.0), ("bob", 5.0, -2.0), ("carol", 1.0, 7.5)] {
        if let Err(err) = chart.plot_point(label, Coordinate::planar(x, y)) {
            eprintln!("plot failed: {err}");
            std::process::exit(1);
        }
    }

    match render_chart(&chart, &RenderOptions::default()) {
        Ok(buffer) => {
            let path = std::env::temp_dir().join("plotbot_demo.png");
            match std::fs::write(&path, &buffer) {
                Ok(()) => println!("demo render: {} ({} bytes)", path.display(), buffer.len()),
                Err(err) => {
                    eprintln!("demo write failed: {err}");
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            eprintln!("demo render failed: {err}");
            std::process::exit(1);
        }
    }
}
