use crate::{Aquarium, Entity, GameEvent, PlayerCreature};

/// Finds the first creature, in tank order, touching the player. Predators are tested segment by
/// segment, everything else by collision radius. At most one collision is reported per call.
pub fn detect_collision(aquarium: &Aquarium, player: &PlayerCreature) -> Option<GameEvent> {
    let player_pos = player.position();

    aquarium
        .creatures()
        .iter()
        .find(|creature| match creature.segments() {
            Some(chain) => chain.segments().iter().enumerate().any(|(i, segment)| {
                let radius = chain.segment_radius(i);
                segment.position.distance_squared(player_pos) < radius * radius
            }),
            None => player.collides_with(*creature),
        })
        .map(|creature| GameEvent::Collision {
            creature: creature.id(),
        })
}
