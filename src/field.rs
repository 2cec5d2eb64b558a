//! The drifting node graph behind the hero section.
//!
//! Nodes drift, bounce off the surface edges and are pushed away by the
//! pointer. Any two nodes closer than the proximity threshold are joined by a
//! gradient line for that frame. Scroll progress fades the whole thing out;
//! once fully faded the field keeps moving but draws nothing.

use crate::{
    advance::advance_single_node,
    bounds::Dimensions,
    forces::Repulsion,
    node::{self, Edge, Node},
    pointer::PointerState,
    render::{Canvas, RenderSurface, Rgb},
    simulation::{Frame, Simulation},
    world_gen::init_nodes,
};
use rand::Rng;
use rand_pcg::Pcg64;
use std::ops::Range;

pub const CYAN: Rgb = Rgb::new(0, 245, 255);
pub const VIOLET: Rgb = Rgb::new(124, 58, 237);

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Surface area, in square pixels, per node.
    pub density: f64,
    pub max_nodes: usize,
    /// Initial velocity components are drawn from `±drift_speed`.
    pub drift_speed: f64,
    pub radius: Range<f64>,
    pub opacity: Range<f64>,
    pub influence_radius: f64,
    pub repulsion_strength: f64,
    pub max_speed: f64,
    pub damping: f64,
    /// Components slower than this get a random nudge of up to
    /// `±drift_nudge`.
    pub drift_epsilon: f64,
    pub drift_nudge: f64,
    pub proximity_threshold: f64,
    pub edge_opacity: f64,
    pub edge_width: f64,
    pub edge_gradient: (Rgb, Rgb),
    pub node_color: Rgb,
    pub glow_scale: f64,
    pub glow_opacity: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            density: 12000.,
            max_nodes: 90,
            drift_speed: 0.2,
            radius: 1.0..3.0,
            opacity: 0.3..0.8,
            influence_radius: 120.,
            repulsion_strength: 0.3,
            max_speed: 2.,
            damping: 0.995,
            drift_epsilon: 0.1,
            drift_nudge: 0.025,
            proximity_threshold: 140.,
            edge_opacity: 0.4,
            edge_width: 0.8,
            edge_gradient: (CYAN, VIOLET),
            node_color: CYAN,
            glow_scale: 2.5,
            glow_opacity: 0.08,
        }
    }
}

impl FieldConfig {
    pub fn repulsion(&self) -> Repulsion {
        Repulsion {
            influence_radius: self.influence_radius,
            strength: self.repulsion_strength,
        }
    }
}

pub struct NodeField<R = Pcg64> {
    config: FieldConfig,
    nodes: Vec<Node>,
    pointer: PointerState,
    scroll_progress: f64,
    rng: R,
}

impl<R: Rng> NodeField<R> {
    /// Spawns a node set sized for `dimensions`. The count is fixed from here
    /// on, whatever later resizes do.
    pub fn new(
        dimensions: Dimensions,
        config: FieldConfig,
        pointer: PointerState,
        mut rng: R,
    ) -> NodeField<R> {
        let nodes = init_nodes(dimensions, &config, &mut rng);
        NodeField::from_nodes(nodes, config, pointer, rng)
    }

    pub fn from_nodes(
        nodes: Vec<Node>,
        config: FieldConfig,
        pointer: PointerState,
        rng: R,
    ) -> NodeField<R> {
        NodeField {
            config,
            nodes,
            pointer,
            scroll_progress: 0.,
            rng,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    pub fn set_scroll_progress(&mut self, progress: f64) {
        self.scroll_progress = if progress.is_nan() {
            0.
        } else {
            progress.clamp(0., 1.)
        };
    }

    /// Opacity multiplier for every primitive the field draws.
    pub fn fade(&self) -> f64 {
        (1. - self.scroll_progress * 2.).max(0.)
    }

    /// Opacity of the field's layer as a whole when composited.
    pub fn layer_opacity(&self) -> f64 {
        (1. - self.scroll_progress * 2.5).max(0.)
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        node::edges(&self.nodes, self.config.proximity_threshold)
    }
}

impl<R: Rng> Simulation for NodeField<R> {
    fn step(&mut self, frame: &Frame) {
        let pointer = self.pointer.position();
        for node in self.nodes.iter_mut() {
            advance_single_node(node, frame.dimensions, pointer, &self.config, &mut self.rng);
        }
    }

    fn render<C: Canvas>(&self, surface: &mut RenderSurface<C>) {
        let fade = self.fade();
        if fade <= 0. {
            return;
        }
        let config = &self.config;
        for edge in self.edges() {
            let closeness = 1. - edge.distance / config.proximity_threshold;
            let alpha = closeness * config.edge_opacity * fade;
            surface.draw_line(
                self.nodes[edge.a].position,
                self.nodes[edge.b].position,
                config.edge_gradient,
                config.edge_width,
                alpha,
            );
        }
        for node in &self.nodes {
            surface.fill_circle(node.position, node.radius, config.node_color, node.opacity * fade);
            surface.fill_circle(
                node.position,
                node.radius * config.glow_scale,
                config.node_color,
                node.opacity * config.glow_opacity * fade,
            );
        }
    }

    fn is_active(&self) -> bool {
        true
    }
}
