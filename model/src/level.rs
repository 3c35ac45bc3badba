use std::fmt;

use crate::CreatureType;

/// Quota and live count for one creature type within a level.
#[derive(Clone, Debug, PartialEq)]
pub struct PopulationNode {
    pub creature_type: CreatureType,
    /// How many of this type the level wants alive.
    pub population: u32,
    /// How many are alive (or already promised to the aquarium).
    pub current_population: u32,
}

impl PopulationNode {
    pub fn new(creature_type: CreatureType, population: u32) -> Self {
        PopulationNode {
            creature_type,
            population,
            current_population: 0,
        }
    }

    /// The shortfall between the quota and the live count.
    pub fn delta(&self) -> u32 {
        self.population.saturating_sub(self.current_population)
    }
}

/// Per-level repopulation policy. Every level currently refills its quotas the same way, the
/// trait is where a level with its own pacing would plug in.
pub trait LevelStrategy: fmt::Debug {
    /// Works out which creatures have to be spawned and reserves them on the nodes.
    fn repopulate(&self, nodes: &mut [PopulationNode]) -> Vec<CreatureType> {
        refill_quotas(nodes)
    }
}

/// Tops every node back up to its quota.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuotaRefill;

impl LevelStrategy for QuotaRefill {}

/// Returns one entry per missing creature, in node order, and credits the nodes as if the
/// spawns had already happened.
pub fn refill_quotas(nodes: &mut [PopulationNode]) -> Vec<CreatureType> {
    let mut to_spawn = Vec::new();

    for node in nodes.iter_mut() {
        let delta = node.delta();
        log::trace!("to repopulate {}: {}", node.creature_type, delta);
        if delta > 0 {
            to_spawn.extend(std::iter::repeat(node.creature_type).take(delta as usize));
            node.current_population += delta;
        }
    }

    to_spawn
}

#[derive(Debug)]
pub struct AquariumLevel {
    number: usize,
    nodes: Vec<PopulationNode>,
    score: u32,
    target_score: u32,
    strategy: Box<dyn LevelStrategy>,
}

impl AquariumLevel {
    pub fn new(number: usize, target_score: u32) -> Self {
        Self::with_strategy(number, target_score, Box::new(QuotaRefill))
    }

    pub fn with_strategy(
        number: usize,
        target_score: u32,
        strategy: Box<dyn LevelStrategy>,
    ) -> Self {
        AquariumLevel {
            number,
            nodes: Vec::new(),
            score: 0,
            target_score,
            strategy,
        }
    }

    /// Adds a quota for `creature_type`. Each type should appear at most once per level,
    /// consumption only ever looks at the first matching node.
    pub fn add_population(&mut self, creature_type: CreatureType, population: u32) {
        if self.node(creature_type).is_some() {
            log::warn!(
                "Level {} already has a {} quota, the new one will never be consumed",
                self.number,
                creature_type
            );
        }
        self.nodes.push(PopulationNode::new(creature_type, population));
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn nodes(&self) -> &[PopulationNode] {
        &self.nodes
    }

    pub fn node(&self, creature_type: CreatureType) -> Option<&PopulationNode> {
        self.nodes.iter().find(|n| n.creature_type == creature_type)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn repopulate(&mut self) -> Vec<CreatureType> {
        self.strategy.repopulate(&mut self.nodes)
    }

    /// Records that a creature of `creature_type` was eaten, crediting `power` to the level
    /// score. Does nothing when the matching node has no live creatures left.
    pub fn consume_population(&mut self, creature_type: CreatureType, power: u32) {
        let node = match self
            .nodes
            .iter_mut()
            .find(|n| n.creature_type == creature_type)
        {
            Some(node) => node,
            None => {
                log::debug!(
                    "Level {} has no {} population to consume from",
                    self.number,
                    creature_type
                );
                return;
            }
        };

        if node.current_population == 0 {
            return;
        }

        node.current_population -= 1;
        self.score += power;
        log::trace!(
            "consumed {}, current population {}, level score {}",
            creature_type,
            node.current_population,
            self.score
        );
    }

    pub fn is_completed(&self) -> bool {
        self.score >= self.target_score
    }

    /// Empties the level so it starts from scratch the next time it comes around. Quotas and the
    /// target are kept.
    pub fn level_reset(&mut self) {
        for node in self.nodes.iter_mut() {
            node.current_population = 0;
        }
        self.score = 0;
    }
}
