use glam::Vec2;

use crate::{RenderSink, SpriteHandle};

/// Below this distance two points are treated as coincident.
const EPSILON: f32 = 0.0001;

const HEAD_RADIUS: f32 = 20.0;
const TAIL_RADIUS: f32 = 15.0;
const BODY_RADIUS: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub position: Vec2,
}

/// The head, body and tail of a predator. The head is steered, every other segment is dragged
/// along behind its predecessor at `rest_length`.
#[derive(Clone, Debug)]
pub struct SegmentChain {
    segments: Vec<Segment>,
    rest_length: f32,
    body_sprite: Option<SpriteHandle>,
    tail_sprite: Option<SpriteHandle>,
}

impl SegmentChain {
    /// Lays the chain out horizontally to the left of `head`. There are always
    /// `body_count + 2` segments (head and tail included).
    pub fn new(
        head: Vec2,
        body_count: usize,
        rest_length: f32,
        body_sprite: Option<SpriteHandle>,
        tail_sprite: Option<SpriteHandle>,
    ) -> Self {
        let segments = (0..body_count + 2)
            .map(|i| Segment {
                position: Vec2::new(head.x - i as f32 * rest_length, head.y),
            })
            .collect();

        SegmentChain {
            segments,
            rest_length,
            body_sprite,
            tail_sprite,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    pub fn head(&self) -> Vec2 {
        self.segments[0].position
    }

    pub fn set_head(&mut self, position: Vec2) {
        self.segments[0].position = position;
    }

    /// Collision radius of the segment at `index`: the head is the largest, then the tail, then
    /// the body pieces.
    pub fn segment_radius(&self, index: usize) -> f32 {
        if index == 0 {
            HEAD_RADIUS
        } else if index == self.segments.len() - 1 {
            TAIL_RADIUS
        } else {
            BODY_RADIUS
        }
    }

    /// Moves the head towards `target` with a sinusoidal wobble. Returns the heading actually
    /// used by the head. The rest of the chain only catches up on `follow`.
    pub fn steer(&mut self, target: Vec2, elapsed: f32, head_speed: f32) -> Vec2 {
        let to_target = target - self.head();
        let dir = if to_target.length() > EPSILON {
            to_target.normalize()
        } else {
            to_target
        };

        let wobble = (elapsed * 4.0).sin() * 0.5;
        let heading = Vec2::from_angle(wobble).rotate(dir);

        self.segments[0].position += heading * head_speed.max(0.0);

        heading
    }

    /// Pulls every trailing segment towards its predecessor by the amount the gap differs from
    /// the rest length.
    pub fn follow(&mut self) {
        for i in 1..self.segments.len() {
            let delta = self.segments[i - 1].position - self.segments[i].position;
            let dist = delta.length();
            if dist > EPSILON {
                self.segments[i].position += delta / dist * (dist - self.rest_length);
            }
        }
    }

    /// Draws every segment rotated along the chain. Nothing is drawn unless all three sprites
    /// are present.
    pub fn draw(&self, head_sprite: Option<&SpriteHandle>, sink: &mut dyn RenderSink) {
        let (head_sprite, body_sprite, tail_sprite) =
            match (head_sprite, &self.body_sprite, &self.tail_sprite) {
                (Some(h), Some(b), Some(t)) => (h, b, t),
                _ => return,
            };

        let last = self.segments.len() - 1;
        let angle_between = |from: usize, to: usize| {
            let d = self.segments[to].position - self.segments[from].position;
            d.y.atan2(d.x).to_degrees()
        };

        sink.draw_rotated(
            head_sprite,
            self.segments[0].position,
            angle_between(0, 1) - 90.0,
        );

        for i in 1..last {
            sink.draw_rotated(
                body_sprite,
                self.segments[i].position,
                angle_between(i, i + 1) - 90.0,
            );
        }

        sink.draw_rotated(
            tail_sprite,
            self.segments[last].position,
            angle_between(last, last - 1) + 90.0,
        );
    }
}
