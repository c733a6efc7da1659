//! Directional entrance animation planning.
//!
//! A pure function of travel direction and a delay budget. Incoming content
//! starts offset toward the side *opposite* travel and animates to rest, so
//! it always appears to emerge from the trailing side; exits reverse the
//! offset with faster, non-staggered timing. Tag chips stagger in with a
//! vertical-plus-scale entrance independent of direction.

use snapdeck_protocol::Direction;
use snapdeck_protocol::motion::{
    Ease, ElementPhase, EntrancePlan, GroupPhase, Keyframe, Stagger, Timing,
};

/// Default stagger budget between a card's children, in seconds.
pub const DEFAULT_BASE_DELAY: f32 = 0.15;

/// Horizontal entrance offset, as a fraction of the viewport width.
const ENTRANCE_OFFSET: f32 = 0.15;

/// The shared entrance curve.
const ENTRANCE_EASE: Ease = Ease::Bezier(0.25, 0.1, 0.25, 1.0);

/// Build the staggered entrance/exit plan for one card's sub-elements.
pub fn entrance_plan(direction: Direction, base_delay: f32) -> EntrancePlan {
    // Travel forward => content slides in from the left (negative x).
    let x_hidden = match direction {
        Direction::Forward => -ENTRANCE_OFFSET,
        Direction::Backward => ENTRANCE_OFFSET,
    };
    let x_exit = -x_hidden;

    let slide_exit = Timing {
        delay: 0.0,
        duration: 0.3,
        ease: Ease::EaseIn,
    };

    EntrancePlan {
        container: GroupPhase {
            visible_opacity: 1.0,
            enter_delay: 0.0,
            enter: Stagger {
                interval: base_delay,
                children_delay: base_delay * 0.5,
                reversed: false,
            },
            leave: Stagger {
                interval: base_delay / 2.0,
                children_delay: 0.0,
                reversed: true,
            },
        },
        title: ElementPhase {
            hidden: Keyframe {
                opacity: 0.0,
                x: x_hidden,
                y: 0.0,
                scale: 1.0,
            },
            visible: Keyframe::REST,
            exit: Keyframe {
                opacity: 0.0,
                x: x_exit,
                y: 0.0,
                scale: 1.0,
            },
            enter: Timing {
                delay: 0.2,
                duration: 0.8,
                ease: ENTRANCE_EASE,
            },
            leave: slide_exit,
        },
        metric: ElementPhase {
            hidden: Keyframe {
                opacity: 0.0,
                x: x_hidden,
                y: 0.0,
                scale: 1.0,
            },
            visible: Keyframe {
                opacity: 0.9,
                ..Keyframe::REST
            },
            exit: Keyframe {
                opacity: 0.0,
                x: x_exit,
                y: 0.0,
                scale: 1.0,
            },
            enter: Timing {
                delay: 0.35,
                duration: 0.65,
                ease: ENTRANCE_EASE,
            },
            leave: slide_exit,
        },
        tag_group: GroupPhase {
            visible_opacity: 1.0,
            enter_delay: 0.8,
            enter: Stagger {
                interval: 0.25,
                children_delay: 0.3,
                reversed: false,
            },
            leave: Stagger {
                interval: 0.05,
                children_delay: 0.0,
                reversed: true,
            },
        },
        tag_item: ElementPhase {
            hidden: Keyframe {
                opacity: 0.0,
                x: 0.0,
                y: 20.0,
                scale: 0.8,
            },
            visible: Keyframe::REST,
            exit: Keyframe {
                opacity: 0.0,
                x: 0.0,
                y: -10.0,
                scale: 0.8,
            },
            enter: Timing {
                delay: 0.0,
                duration: 0.8,
                ease: ENTRANCE_EASE,
            },
            leave: Timing {
                delay: 0.0,
                duration: 0.2,
                ease: Ease::EaseIn,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_travel_enters_from_the_left() {
        let plan = entrance_plan(Direction::Forward, DEFAULT_BASE_DELAY);
        assert!(plan.title.hidden.x < 0.0);
        assert!(plan.title.exit.x > 0.0);
        assert_eq!(plan.title.hidden.x, plan.metric.hidden.x);
    }

    #[test]
    fn backward_travel_mirrors_the_offsets() {
        let fwd = entrance_plan(Direction::Forward, DEFAULT_BASE_DELAY);
        let bwd = entrance_plan(Direction::Backward, DEFAULT_BASE_DELAY);
        assert_eq!(bwd.title.hidden.x, -fwd.title.hidden.x);
        assert_eq!(bwd.title.exit.x, -fwd.title.exit.x);
    }

    #[test]
    fn tag_entrance_ignores_direction() {
        let fwd = entrance_plan(Direction::Forward, DEFAULT_BASE_DELAY);
        let bwd = entrance_plan(Direction::Backward, DEFAULT_BASE_DELAY);
        assert_eq!(fwd.tag_item, bwd.tag_item);
        assert_eq!(fwd.tag_item.hidden.x, 0.0);
        assert!(fwd.tag_item.hidden.y > 0.0);
        assert!(fwd.tag_item.hidden.scale < 1.0);
    }

    #[test]
    fn exits_are_faster_and_reverse_staggered() {
        let plan = entrance_plan(Direction::Forward, DEFAULT_BASE_DELAY);
        assert!(plan.title.leave.duration < plan.title.enter.duration);
        assert!(plan.container.leave.reversed);
        assert!(plan.tag_group.leave.reversed);
        assert_eq!(plan.container.leave.interval, DEFAULT_BASE_DELAY / 2.0);
    }

    #[test]
    fn delay_budget_scales_the_container_stagger() {
        let plan = entrance_plan(Direction::Forward, 0.4);
        assert_eq!(plan.container.enter.interval, 0.4);
        assert_eq!(plan.container.enter.children_delay, 0.2);
    }

    #[test]
    fn metric_rests_slightly_translucent() {
        let plan = entrance_plan(Direction::Forward, DEFAULT_BASE_DELAY);
        assert_eq!(plan.metric.visible.opacity, 0.9);
        assert_eq!(plan.title.visible.opacity, 1.0);
    }
}
