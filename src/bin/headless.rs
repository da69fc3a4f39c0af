//! 无窗口运行模拟，逐帧统计剖分结果
//!
//! 用法: `headless [key=value ...] [--validate]`，例如
//! `headless dimensions=3 frames=500 seed=42 --validate`

use bubbles::delaunay::Triangulate;
use bubbles::simulation::{Frame, FrameSink};
use bubbles::{AnySimulation, SimulationConfig, SimulationError};

/// 每隔多少帧输出一次进度
const REPORT_EVERY: usize = 100;

#[derive(Default)]
struct StatsSink {
    validate: bool,
    frames: usize,
    skipped: usize,
    simplices: usize,
    min_simplices: Option<usize>,
    max_simplices: usize,
    non_delaunay: usize,
    negative_sizes: usize,
}

impl<P: Triangulate> FrameSink<P> for StatsSink {
    fn present(&mut self, frame: &Frame<P>) {
        self.frames += 1;

        let count = frame.simplex_count();
        if frame.simplices.is_none() {
            self.skipped += 1;
        } else {
            self.simplices += count;
            self.min_simplices = Some(self.min_simplices.map_or(count, |m| m.min(count)));
            self.max_simplices = self.max_simplices.max(count);
            if self.validate && !frame.is_delaunay() {
                log::warn!("frame {} failed the empty-circumsphere check", frame.index);
                self.non_delaunay += 1;
            }
        }

        let negative = frame.sizes.iter().filter(|s| **s < 0.0).count();
        if negative > 0 && self.negative_sizes == 0 {
            log::info!("frame {}: first bubble with negative size", frame.index);
        }
        self.negative_sizes = self.negative_sizes.max(negative);

        if frame.index % REPORT_EVERY == 0 {
            log::info!("frame {}: {} simplices", frame.index, count);
        }
    }
}

fn parse_args() -> Result<(SimulationConfig, bool), SimulationError> {
    let mut config = SimulationConfig::default();
    let mut validate = false;
    for arg in std::env::args().skip(1) {
        if arg == "--validate" {
            validate = true;
            continue;
        }
        let Some((key, value)) = arg.split_once('=') else {
            return Err(SimulationError::InvalidConfig(format!(
                "expected key=value, got {}",
                arg
            )));
        };
        config.apply_override(key, value)?;
    }
    Ok((config, validate))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, validate) = match parse_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    let mut sink = StatsSink {
        validate,
        ..Default::default()
    };
    let result = AnySimulation::new(config).and_then(|mut sim| sim.run(&mut sink));

    println!("Run stats:");
    println!("  Frames: {}", sink.frames);
    println!("  Skipped (degenerate): {}", sink.skipped);
    let drawn = sink.frames - sink.skipped;
    if drawn > 0 {
        println!(
            "  Simplices per frame: min {} / avg {:.1} / max {}",
            sink.min_simplices.unwrap_or(0),
            sink.simplices as f64 / drawn as f64,
            sink.max_simplices
        );
    }
    if validate {
        println!("  Non-Delaunay frames: {}", sink.non_delaunay);
    }
    println!("  Most bubbles with negative size: {}", sink.negative_sizes);

    if let Err(err) = result {
        eprintln!("run aborted: {}", err);
        std::process::exit(1);
    }
}
