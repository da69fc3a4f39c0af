use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bubble::{self, Bubble};
use crate::config::{DegeneratePolicy, SimulationConfig};
use crate::delaunay::Triangulate;
use crate::error::SimulationError;

/// Scene description handed to the renderer after every tick.
///
/// Each frame is built from scratch; nothing in it refers to a previous
/// frame, so a renderer either redraws everything or diffs on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<P: Triangulate> {
    /// 0 for the initial state, then one more per tick.
    pub index: usize,
    pub positions: Vec<P>,
    pub sizes: Vec<f64>,
    /// `None` when the point set was degenerate and the frame was kept anyway.
    pub simplices: Option<Vec<P::Simplex>>,
}

pub type PlanarFrame = Frame<[f64; 2]>;
pub type SpatialFrame = Frame<[f64; 3]>;

impl<P: Triangulate> Frame<P> {
    /// Positions dropped onto the display plane (first two coordinates).
    pub fn projected_xy(&self) -> Vec<[f64; 2]> {
        self.positions
            .iter()
            .map(|p| {
                let c = p.as_ref();
                [c[0], c[1]]
            })
            .collect()
    }

    /// Scatter marker areas, `size²` per bubble.
    pub fn marker_areas(&self) -> Vec<f64> {
        self.sizes.iter().map(|s| s * s).collect()
    }

    /// Unique undirected edges of all simplices, smaller index first.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        let mut edges = BTreeSet::new();
        for simplex in self.simplices.iter().flatten() {
            let corners = simplex.as_ref();
            for (a, &i) in corners.iter().enumerate() {
                for &j in &corners[a + 1..] {
                    edges.insert([i.min(j), i.max(j)]);
                }
            }
        }
        edges.into_iter().collect()
    }

    pub fn simplex_count(&self) -> usize {
        self.simplices.as_ref().map_or(0, Vec::len)
    }

    pub fn is_delaunay(&self) -> bool {
        match &self.simplices {
            Some(simplices) => P::is_delaunay(&self.positions, simplices),
            None => false,
        }
    }
}

/// Receives every frame a run produces.
pub trait FrameSink<P: Triangulate> {
    fn present(&mut self, frame: &Frame<P>);
}

/// Keeps every presented frame, for assertions.
#[derive(Debug)]
pub struct RecordingSink<P: Triangulate> {
    pub frames: Vec<Frame<P>>,
}

impl<P: Triangulate> Default for RecordingSink<P> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<P: Triangulate> FrameSink<P> for RecordingSink<P> {
    fn present(&mut self, frame: &Frame<P>) {
        self.frames.push(frame.clone());
    }
}

/// Owns the bubbles and the random source for one run.
#[derive(Debug, Clone)]
pub struct Simulation<const D: usize> {
    config: SimulationConfig,
    bubbles: Vec<Bubble<D>>,
    rng: ChaCha8Rng,
    frame_index: usize,
}

impl<const D: usize> Simulation<D>
where
    [f64; D]: Triangulate,
{
    /// Seeds from `config.seed`, or from OS entropy when it is unset.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("starting {}D run with {} bubbles, seed {}", D, config.count, seed);
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SimulationConfig, mut rng: ChaCha8Rng) -> Result<Self, SimulationError> {
        let bubbles = bubble::initialize(&config, &mut rng)?;
        Ok(Self {
            config,
            bubbles,
            rng,
            frame_index: 0,
        })
    }

    /// Starts from caller-provided bubbles instead of random ones.
    /// `config.count` is taken from `bubbles.len()`.
    pub fn from_bubbles(
        mut config: SimulationConfig,
        bubbles: Vec<Bubble<D>>,
        rng: ChaCha8Rng,
    ) -> Result<Self, SimulationError> {
        config.count = bubbles.len();
        config.validate_for(D)?;
        Ok(Self {
            config,
            bubbles,
            rng,
            frame_index: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn bubbles(&self) -> &[Bubble<D>] {
        &self.bubbles
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Whether `config.frames` ticks have run.
    pub fn is_finished(&self) -> bool {
        self.frame_index >= self.config.frames
    }

    /// Frame for the current state without moving anything.
    pub fn snapshot(&self) -> Result<Frame<[f64; D]>, SimulationError> {
        let positions: Vec<[f64; D]> = self.bubbles.iter().map(|b| b.position).collect();
        let sizes = self.bubbles.iter().map(|b| b.size).collect();

        let simplices = match <[f64; D]>::triangulate(&positions) {
            Ok(simplices) => Some(simplices),
            Err(err) => match self.config.on_degenerate {
                DegeneratePolicy::Abort => return Err(err.into()),
                DegeneratePolicy::SkipFrame => {
                    log::warn!("frame {}: {}, drawing without simplices", self.frame_index, err);
                    None
                }
            },
        };

        Ok(Frame {
            index: self.frame_index,
            positions,
            sizes,
            simplices,
        })
    }

    /// Advances every bubble once, in order, then triangulates the new
    /// positions.
    ///
    /// The bubbles move and the frame index advances before triangulating,
    /// so an `Err` under [`DegeneratePolicy::Abort`] leaves the simulation
    /// one tick ahead with no frame produced for that tick.
    pub fn tick(&mut self) -> Result<Frame<[f64; D]>, SimulationError> {
        let dt = self.config.dt;
        for bubble in &mut self.bubbles {
            bubble.advance(dt, &mut self.rng);
        }
        self.frame_index += 1;

        let frame = self.snapshot()?;
        log::debug!(
            "frame {}: {} simplices",
            frame.index,
            frame.simplex_count()
        );
        Ok(frame)
    }

    /// Presents the initial state, then ticks until `config.frames` frames
    /// have run. Stops at the first error. Returns the number of frames
    /// presented.
    pub fn run<S: FrameSink<[f64; D]> + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<usize, SimulationError> {
        let mut presented = 0;
        if self.frame_index == 0 {
            sink.present(&self.snapshot()?);
            presented += 1;
        }
        while !self.is_finished() {
            sink.present(&self.tick()?);
            presented += 1;
        }
        log::info!("run finished after {} frames", self.frame_index);
        Ok(presented)
    }
}

/// A run whose dimensionality is picked from the configuration at runtime.
#[derive(Debug, Clone)]
pub enum AnySimulation {
    Planar(Simulation<2>),
    Spatial(Simulation<3>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnyFrame {
    Planar(PlanarFrame),
    Spatial(SpatialFrame),
}

impl AnySimulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        match config.dimensions {
            2 => Ok(Self::Planar(Simulation::new(config)?)),
            3 => Ok(Self::Spatial(Simulation::new(config)?)),
            other => Err(SimulationError::InvalidConfig(format!(
                "only 2 or 3 dimensions are supported, got {}",
                other
            ))),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        match self {
            Self::Planar(sim) => sim.config(),
            Self::Spatial(sim) => sim.config(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Self::Planar(sim) => sim.is_finished(),
            Self::Spatial(sim) => sim.is_finished(),
        }
    }

    pub fn snapshot(&self) -> Result<AnyFrame, SimulationError> {
        Ok(match self {
            Self::Planar(sim) => AnyFrame::Planar(sim.snapshot()?),
            Self::Spatial(sim) => AnyFrame::Spatial(sim.snapshot()?),
        })
    }

    pub fn tick(&mut self) -> Result<AnyFrame, SimulationError> {
        Ok(match self {
            Self::Planar(sim) => AnyFrame::Planar(sim.tick()?),
            Self::Spatial(sim) => AnyFrame::Spatial(sim.tick()?),
        })
    }

    pub fn run<S>(&mut self, sink: &mut S) -> Result<usize, SimulationError>
    where
        S: FrameSink<[f64; 2]> + FrameSink<[f64; 3]>,
    {
        match self {
            Self::Planar(sim) => sim.run(sink),
            Self::Spatial(sim) => sim.run(sink),
        }
    }
}

impl AnyFrame {
    pub fn index(&self) -> usize {
        match self {
            Self::Planar(frame) => frame.index,
            Self::Spatial(frame) => frame.index,
        }
    }

    pub fn sizes(&self) -> &[f64] {
        match self {
            Self::Planar(frame) => &frame.sizes,
            Self::Spatial(frame) => &frame.sizes,
        }
    }

    pub fn edges(&self) -> Vec<[usize; 2]> {
        match self {
            Self::Planar(frame) => frame.edges(),
            Self::Spatial(frame) => frame.edges(),
        }
    }

    pub fn simplex_count(&self) -> usize {
        match self {
            Self::Planar(frame) => frame.simplex_count(),
            Self::Spatial(frame) => frame.simplex_count(),
        }
    }
}
