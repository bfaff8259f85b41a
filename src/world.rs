use std::time::Instant;

use crate::{
    collision::{detection::detect, response::resolve, ContactOutcome},
    config::{SimulationConfig, FRAME_BUDGET_MS},
    core::{
        block::Block,
        template::{parse_templates, templates_to_json, BlockTemplate},
    },
    dynamics::{boundary::constrain_to_bounds, contact_graph, integrator::Integrator},
    error::{EngineError, EngineResult},
    utils::{
        allocator::{BlockId, BlockIdAllocator},
        logging::{check_step_budget, Stage, StageTimer},
    },
};
use glam::Vec2;

pub mod drag;
pub mod shared;

pub use drag::DragState;
pub use shared::SharedWorld;

/// Counters gathered during the most recent step.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepMetrics {
    pub contacts_resolved: usize,
    pub normal_impulse_sum: f32,
    pub friction_delta_sum: f32,
    pub boundary_contacts: usize,
}

impl StepMetrics {
    pub fn record_contact(&mut self, outcome: &ContactOutcome) {
        if !outcome.resolved {
            return;
        }
        self.contacts_resolved += 1;
        self.normal_impulse_sum += outcome.normal_impulse.abs();
        self.friction_delta_sum += outcome.friction_delta;
    }
}

/// Simulation container: blocks, selection, drag, pause state, and templates.
///
/// Insertion order is the z-order: later blocks are drawn and picked on top,
/// and pairs are resolved in that order.
pub struct World {
    config: SimulationConfig,
    blocks: Vec<Block>,
    selected: Option<BlockId>,
    drag: Option<DragState>,
    paused: bool,
    templates: Vec<BlockTemplate>,
    ids: BlockIdAllocator,
    integrator: Integrator,
    metrics: StepMetrics,
}

impl Default for World {
    fn default() -> Self {
        Self::with_config(SimulationConfig::default())
    }
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(SimulationConfig::with_bounds(width, height))
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config,
            blocks: Vec::new(),
            selected: None,
            drag: None,
            paused: false,
            templates: Vec::new(),
            ids: BlockIdAllocator::new(),
            integrator: Integrator::new(),
            metrics: StepMetrics::default(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.integrator.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.integrator.parallel()
    }

    pub fn last_step_metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    // --- blocks ---

    /// Validates `block`, assigns it a fresh id, and places it on top of the z-order.
    pub fn add_block(&mut self, mut block: Block) -> EngineResult<BlockId> {
        block.validate()?;
        block.id = self.ids.allocate();
        block.is_dragging = false;
        if block.is_static {
            block.velocity = Vec2::ZERO;
        }
        block.begin_frame();
        log::debug!("added {} at {:?}", block.id, block.position);
        let id = block.id;
        self.blocks.push(block);
        Ok(id)
    }

    /// Removes a block, dropping any selection or drag that referenced it.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let index = self.index_of(id)?;
        let removed = self.blocks.remove(index);

        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.drag.as_ref().is_some_and(|drag| drag.block_id == id) {
            self.drag = None;
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.stack.retain(|member| *member != id);
        }
        log::debug!("removed {id}");
        Some(removed)
    }

    pub fn clear_blocks(&mut self) {
        self.blocks.clear();
        self.selected = None;
        self.drag = None;
        log::debug!("cleared all blocks");
    }

    /// Restarts id numbering. Only allowed while the world holds no blocks,
    /// so no live id can be handed out twice.
    pub fn reset_id_allocator(&mut self) -> bool {
        if !self.blocks.is_empty() {
            return false;
        }
        self.ids.reset();
        true
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| block.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Topmost block whose bounds contain the point; later insertions win.
    pub fn block_at(&self, x: f32, y: f32) -> Option<BlockId> {
        let point = Vec2::new(x, y);
        self.blocks
            .iter()
            .rev()
            .find(|block| block.contains_point(point))
            .map(|block| block.id)
    }

    /// Blocks resting directly or transitively on `id`.
    pub fn stack_above(&self, id: BlockId) -> Vec<BlockId> {
        contact_graph::stack_above(&self.blocks, id, self.config.rest_tolerance)
    }

    pub(crate) fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    // --- selection and pause ---

    /// Selects a live block, or clears the selection with `None`. Selecting a
    /// missing id clears the selection and returns `false`.
    pub fn select_block(&mut self, id: Option<BlockId>) -> bool {
        match id {
            None => {
                self.selected = None;
                true
            }
            Some(id) if self.index_of(id).is_some() => {
                self.selected = Some(id);
                true
            }
            Some(_) => {
                self.selected = None;
                false
            }
        }
    }

    pub fn selected_block_id(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    // --- templates ---

    pub fn templates(&self) -> &[BlockTemplate] {
        &self.templates
    }

    pub fn add_template(&mut self, template: BlockTemplate) -> EngineResult<usize> {
        template.validate().map_err(|reason| EngineError::InvalidTemplate {
            index: self.templates.len(),
            reason,
        })?;
        self.templates.push(template);
        Ok(self.templates.len() - 1)
    }

    /// Stores the configurable properties of a live block as a new template.
    pub fn save_template(&mut self, id: BlockId) -> Option<usize> {
        let template = BlockTemplate::from_block(self.block(id)?);
        self.templates.push(template);
        Some(self.templates.len() - 1)
    }

    pub fn spawn_template(&mut self, index: usize, x: f32, y: f32) -> EngineResult<BlockId> {
        let block = self
            .templates
            .get(index)
            .ok_or(EngineError::UnknownTemplate(index))?
            .instantiate(x, y);
        self.add_block(block)
    }

    pub fn export_templates(&self) -> EngineResult<String> {
        templates_to_json(&self.templates)
    }

    /// Replaces the template list with the parsed payload. On any failure the
    /// existing templates are left untouched.
    pub fn import_templates(&mut self, json: &str) -> EngineResult<usize> {
        match parse_templates(json) {
            Ok(templates) => {
                log::debug!("imported {} templates", templates.len());
                self.templates = templates;
                Ok(self.templates.len())
            }
            Err(err) => {
                log::warn!("template import rejected: {err}");
                Err(err)
            }
        }
    }

    // --- simulation ---

    /// Advances the simulation by one frame. No-op while paused.
    pub fn step(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        if !(dt.is_finite() && dt > 0.0) {
            log::warn!("ignoring step with invalid dt {dt}");
            return;
        }

        let started = Instant::now();
        self.metrics = StepMetrics::default();
        let config = self.config.for_step(dt);

        {
            let _timer = StageTimer::start(Stage::Gravity);
            self.integrator
                .apply_gravity(&mut self.blocks, config.gravity, dt);
        }
        {
            let _timer = StageTimer::start(Stage::Integrate);
            self.integrator.integrate_positions(&mut self.blocks, dt);
        }
        {
            let _timer = StageTimer::start(Stage::Collisions);
            self.solve_contacts(&config);
        }
        {
            let _timer = StageTimer::start(Stage::Bounds);
            for block in &mut self.blocks {
                if constrain_to_bounds(block, &config) {
                    self.metrics.boundary_contacts += 1;
                }
            }
        }
        {
            let _timer = StageTimer::start(Stage::Damping);
            self.integrator.apply_damping(&mut self.blocks, &config);
        }

        for block in &mut self.blocks {
            block.begin_frame();
        }

        check_step_budget(started.elapsed(), FRAME_BUDGET_MS, self.blocks.len());
    }

    /// Runs the configured number of passes over every unordered pair.
    fn solve_contacts(&mut self, config: &SimulationConfig) {
        let count = self.blocks.len();

        for _ in 0..config.collision_iterations {
            for j in 1..count {
                let (left, right) = self.blocks.split_at_mut(j);
                let body_b = &mut right[0];
                for body_a in left.iter_mut() {
                    if body_a.is_static && body_b.is_static {
                        continue;
                    }
                    if let Some(contact) = detect(body_a, body_b) {
                        let outcome = resolve(body_a, body_b, &contact, config);
                        self.metrics.record_contact(&outcome);
                    }
                }
            }
        }
    }
}
