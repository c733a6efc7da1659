//! Sampling of entrance-plan phases over time.
//!
//! The core publishes declarative phase descriptors; this module turns
//! `(phase, elapsed seconds)` into a concrete pose each frame.

use snapdeck_protocol::motion::{Ease, ElementPhase, Keyframe, Stagger};

/// Evaluate an easing curve at normalized time `t` in `[0, 1]`.
pub fn ease_value(ease: Ease, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match ease {
        Ease::Linear => t,
        Ease::EaseIn => t * t,
        Ease::Bezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
    }
}

/// CSS-style cubic bezier with implicit endpoints (0,0) and (1,1):
/// solve x(u) = x for u, then return y(u).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    fn axis(c1: f32, c2: f32, u: f32) -> f32 {
        let v = 1.0 - u;
        3.0 * v * v * u * c1 + 3.0 * v * u * u * c2 + u * u * u
    }

    // Newton iterations with a bisection fallback for flat derivatives.
    let mut u = x;
    for _ in 0..8 {
        let err = axis(x1, x2, u) - x;
        if err.abs() < 1e-5 {
            return axis(y1, y2, u);
        }
        let v = 1.0 - u;
        let d = 3.0 * v * v * x1 + 6.0 * v * u * (x2 - x1) + 3.0 * u * u * (1.0 - x2);
        if d.abs() < 1e-6 {
            break;
        }
        u -= err / d;
        u = u.clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..24 {
        let mid = (lo + hi) / 2.0;
        if axis(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    axis(y1, y2, (lo + hi) / 2.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_keyframe(from: Keyframe, to: Keyframe, t: f32) -> Keyframe {
    Keyframe {
        opacity: lerp(from.opacity, to.opacity, t),
        x: lerp(from.x, to.x, t),
        y: lerp(from.y, to.y, t),
        scale: lerp(from.scale, to.scale, t),
    }
}

/// Pose of an entering element `elapsed` seconds after its card became
/// visible. `extra_delay` carries the parent group's stagger contribution.
pub fn sample_enter(phase: &ElementPhase, elapsed: f32, extra_delay: f32) -> Keyframe {
    let local = elapsed - extra_delay - phase.enter.delay;
    if local <= 0.0 {
        return phase.hidden;
    }
    if phase.enter.duration <= 0.0 || local >= phase.enter.duration {
        return phase.visible;
    }
    let t = ease_value(phase.enter.ease, local / phase.enter.duration);
    lerp_keyframe(phase.hidden, phase.visible, t)
}

/// Pose of an exiting element `elapsed` seconds after its card left.
pub fn sample_exit(phase: &ElementPhase, elapsed: f32, extra_delay: f32) -> Keyframe {
    let local = elapsed - extra_delay - phase.leave.delay;
    if local <= 0.0 {
        return phase.visible;
    }
    if phase.leave.duration <= 0.0 || local >= phase.leave.duration {
        return phase.exit;
    }
    let t = ease_value(phase.leave.ease, local / phase.leave.duration);
    lerp_keyframe(phase.visible, phase.exit, t)
}

/// Delay contributed by a group's stagger for child `index` of `count`.
pub fn stagger_delay(stagger: Stagger, index: usize, count: usize) -> f32 {
    let position = if stagger.reversed {
        count.saturating_sub(1).saturating_sub(index)
    } else {
        index
    };
    stagger.children_delay + stagger.interval * position as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapdeck_protocol::motion::Timing;

    fn slide_phase() -> ElementPhase {
        ElementPhase {
            hidden: Keyframe {
                opacity: 0.0,
                x: -0.15,
                y: 0.0,
                scale: 1.0,
            },
            visible: Keyframe::REST,
            exit: Keyframe {
                opacity: 0.0,
                x: 0.15,
                y: 0.0,
                scale: 1.0,
            },
            enter: Timing {
                delay: 0.2,
                duration: 0.8,
                ease: Ease::Linear,
            },
            leave: Timing {
                delay: 0.0,
                duration: 0.3,
                ease: Ease::EaseIn,
            },
        }
    }

    #[test]
    fn bezier_endpoints_are_exact() {
        assert!(ease_value(Ease::Bezier(0.25, 0.1, 0.25, 1.0), 0.0).abs() < 1e-4);
        assert!((ease_value(Ease::Bezier(0.25, 0.1, 0.25, 1.0), 1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn bezier_is_monotonic_for_the_entrance_curve() {
        let mut prev = 0.0;
        for i in 0..=20 {
            let y = ease_value(Ease::Bezier(0.25, 0.1, 0.25, 1.0), i as f32 / 20.0);
            assert!(y >= prev - 1e-4);
            prev = y;
        }
    }

    #[test]
    fn enter_holds_hidden_through_the_delay() {
        let phase = slide_phase();
        assert_eq!(sample_enter(&phase, 0.1, 0.0), phase.hidden);
        assert_eq!(sample_enter(&phase, 0.0, 0.5), phase.hidden);
    }

    #[test]
    fn enter_reaches_rest_after_the_duration() {
        let phase = slide_phase();
        assert_eq!(sample_enter(&phase, 2.0, 0.0), phase.visible);
    }

    #[test]
    fn enter_interpolates_midway() {
        let phase = slide_phase();
        // Linear ease, halfway through: x should be half returned.
        let pose = sample_enter(&phase, 0.2 + 0.4, 0.0);
        assert!((pose.x - -0.075).abs() < 1e-4);
        assert!((pose.opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn exit_lands_on_the_exit_keyframe() {
        let phase = slide_phase();
        assert_eq!(sample_exit(&phase, 1.0, 0.0), phase.exit);
        assert_eq!(sample_exit(&phase, 0.0, 0.0), phase.visible);
    }

    #[test]
    fn stagger_runs_forward_and_reversed() {
        let s = Stagger {
            interval: 0.25,
            children_delay: 0.3,
            reversed: false,
        };
        assert_eq!(stagger_delay(s, 0, 3), 0.3);
        assert_eq!(stagger_delay(s, 2, 3), 0.8);

        let r = Stagger { reversed: true, ..s };
        assert_eq!(stagger_delay(r, 2, 3), 0.3);
        assert_eq!(stagger_delay(r, 0, 3), 0.8);
    }
}
