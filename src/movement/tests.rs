//! Movement domain: tests for behavior resolution, transitions and pose keys.

use bevy::prelude::{Entity, Rect, Vec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::behaviors::{
    build_behavior, ActionContext, ActiveSet, Climb, EvalContext, Frame, MovementBehavior,
};
use super::coordinator::{BehaviorCoordinator, Transition, TransitionPhase};
use super::pose::{PoseResolver, FROZEN_POSE_KEY};
use super::{
    ActionHint, AmmoGauge, Avatar, BehaviorEngine, BehaviorKind, BodySense, Button, ChargeLevel,
    Facing, InputSnapshot, LadderContact, Loadout, MotionEffect, MovementTuning, Orientation,
    PoseBase, SensorSnapshot, SoundCue, SpawnKind,
};
use crate::core::WorldFlags;

const DT: f32 = 1.0 / 60.0;

/// Engine plus everything it reads, driven tick by tick without an app.
struct Rig {
    avatar: Avatar,
    engine: BehaviorEngine,
    tuning: MovementTuning,
    input: InputSnapshot,
    sensors: SensorSnapshot,
    world: WorldFlags,
    effects: Vec<MotionEffect>,
}

impl Rig {
    fn new() -> Self {
        let tuning = MovementTuning::default();
        Self {
            avatar: Avatar::default(),
            engine: BehaviorEngine::new(&tuning),
            tuning,
            input: InputSnapshot::default(),
            sensors: SensorSnapshot::default(),
            world: WorldFlags::default(),
            effects: Vec::new(),
        }
    }

    fn grounded() -> Self {
        let mut rig = Self::new();
        rig.sensors.set(BodySense::FeetOnGround, true);
        rig
    }

    fn u(&self, value: f32) -> f32 {
        self.tuning.units(value)
    }

    /// Advance every button: the listed ones are held this tick, the rest are not.
    fn hold(&mut self, buttons: &[Button]) {
        for button in Button::ALL {
            self.input.advance(button, buttons.contains(&button));
        }
    }

    fn tick_dt(&mut self, buttons: &[Button], dt: f32) {
        self.hold(buttons);
        let frame = Frame {
            input: &self.input,
            sensors: &self.sensors,
            world: &self.world,
        };
        self.engine
            .update(dt, &mut self.avatar, frame, &self.tuning, &mut self.effects);
    }

    fn tick(&mut self, buttons: &[Button]) {
        self.tick_dt(buttons, DT);
    }

    fn active(&self, kind: BehaviorKind) -> bool {
        self.engine.is_behavior_active(kind)
    }

    fn phases_of(&self, kind: BehaviorKind) -> Vec<TransitionPhase> {
        self.engine
            .transitions()
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.phase)
            .collect()
    }
}

const EXCLUSIVE: [BehaviorKind; 5] = [
    BehaviorKind::WallSlide,
    BehaviorKind::Climb,
    BehaviorKind::RideCart,
    BehaviorKind::Jetpack,
    BehaviorKind::AirDash,
];

// -----------------------------------------------------------------------------
// Coordinator tests
// -----------------------------------------------------------------------------

#[test]
fn test_priority_order() {
    assert_eq!(
        BehaviorKind::ALL,
        [
            BehaviorKind::WallSlide,
            BehaviorKind::Swim,
            BehaviorKind::Jump,
            BehaviorKind::AirDash,
            BehaviorKind::GroundSlide,
            BehaviorKind::Climb,
            BehaviorKind::RideCart,
            BehaviorKind::Jetpack,
        ]
    );
}

#[test]
fn test_engine_registers_every_kind() {
    let tuning = MovementTuning::default();
    let mut coordinator = BehaviorCoordinator::default();
    for kind in BehaviorKind::ALL {
        assert!(!coordinator.is_registered(kind));
        coordinator.register(kind, build_behavior(kind, &tuning));
        assert!(coordinator.is_registered(kind));
    }
}

#[test]
#[should_panic(expected = "registered twice")]
fn test_double_registration_panics() {
    let tuning = MovementTuning::default();
    let mut coordinator = BehaviorCoordinator::default();
    coordinator.register(
        BehaviorKind::Jump,
        build_behavior(BehaviorKind::Jump, &tuning),
    );
    coordinator.register(
        BehaviorKind::Jump,
        build_behavior(BehaviorKind::Jump, &tuning),
    );
}

#[test]
#[should_panic(expected = "wrong kind")]
fn test_mismatched_registration_panics() {
    let tuning = MovementTuning::default();
    let mut coordinator = BehaviorCoordinator::default();
    coordinator.register(
        BehaviorKind::Swim,
        build_behavior(BehaviorKind::Jump, &tuning),
    );
}

#[test]
fn test_idle_tick_has_no_transitions() {
    let mut rig = Rig::grounded();
    rig.tick(&[]);
    assert!(rig.engine.transitions().is_empty());
    assert!(rig.engine.active().iter().next().is_none());
}

#[test]
fn test_lifecycle_counts_over_jetpack_burst() {
    let mut rig = Rig::new();
    rig.avatar.flags.loadout = Loadout::Jetpack;

    rig.tick(&[Button::Action, Button::Up]);
    assert_eq!(
        rig.engine.transitions(),
        &[Transition {
            kind: BehaviorKind::Jetpack,
            phase: TransitionPhase::Enter,
        }]
    );

    let mut phases = rig.phases_of(BehaviorKind::Jetpack);
    for _ in 0..3 {
        rig.tick(&[Button::Action, Button::Up]);
        phases.extend(rig.phases_of(BehaviorKind::Jetpack));
    }
    rig.tick(&[]);
    phases.extend(rig.phases_of(BehaviorKind::Jetpack));
    rig.tick(&[]);
    phases.extend(rig.phases_of(BehaviorKind::Jetpack));

    let count = |p: TransitionPhase| phases.iter().filter(|x| **x == p).count();
    assert_eq!(count(TransitionPhase::Enter), 1);
    assert_eq!(count(TransitionPhase::Active), 3);
    assert_eq!(count(TransitionPhase::Exit), 1);
    assert_eq!(
        rig.effects,
        vec![
            MotionEffect::PlaySound {
                cue: SoundCue::Jetpack,
                looping: true,
            },
            MotionEffect::StopSound {
                cue: SoundCue::Jetpack,
            },
        ]
    );
}

#[test]
fn test_mutual_exclusion_over_random_ticks() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);
    let mut rig = Rig::new();
    let orientations = [
        Orientation::Up,
        Orientation::Down,
        Orientation::Left,
        Orientation::Right,
    ];
    let hints = [ActionHint::Jump, ActionHint::Swim, ActionHint::AirDash];
    let senses = [
        BodySense::FeetOnGround,
        BodySense::FeetOnIce,
        BodySense::FeetOnSand,
        BodySense::HeadTouchingBlock,
        BodySense::SideTouchingBlockLeft,
        BodySense::SideTouchingBlockRight,
        BodySense::HeadTouchingLadder,
        BodySense::FeetTouchingLadder,
        BodySense::InWater,
    ];

    for _ in 0..4000 {
        for sense in senses {
            rig.sensors.set(sense, rng.random_bool(0.3));
        }
        rig.sensors.ladder = rng.random_bool(0.4).then(|| LadderContact {
            bounds: Rect::from_center_size(Vec2::ZERO, Vec2::new(24.0, 400.0)),
        });
        rig.sensors.cart = rng.random_bool(0.3).then_some(Entity::PLACEHOLDER);
        rig.sensors
            .set(BodySense::TouchingCart, rig.sensors.cart.is_some());

        if rng.random_bool(0.05) {
            rig.avatar.flags.orientation = orientations[rng.random_range(0..4)];
        }
        if rng.random_bool(0.1) {
            rig.avatar.action_hint = hints[rng.random_range(0..3)];
        }
        rig.avatar.flags.loadout = if rng.random_bool(0.5) {
            Loadout::Jetpack
        } else {
            Loadout::Blaster
        };
        rig.avatar.flags.facing = if rng.random_bool(0.5) {
            Facing::Left
        } else {
            Facing::Right
        };
        rig.avatar.flags.damaged = rng.random_bool(0.05);
        rig.avatar.body.center = Vec2::new(
            rng.random_range(-20.0..20.0),
            rng.random_range(-250.0..250.0),
        );
        rig.avatar.body.velocity = Vec2::new(
            rng.random_range(-300.0..300.0),
            rng.random_range(-300.0..300.0),
        );

        let held: Vec<Button> = Button::ALL
            .into_iter()
            .filter(|_| rng.random_bool(0.5))
            .collect();
        rig.tick(&held);

        let active = EXCLUSIVE.iter().filter(|k| rig.active(**k)).count();
        assert!(
            active <= 1,
            "exclusive behaviors overlapped: {:?}",
            rig.engine.active().iter().collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_death_short_circuits_everything() {
    let mut rig = Rig::new();
    rig.avatar.flags.loadout = Loadout::Jetpack;
    rig.tick(&[Button::Action, Button::Up]);
    assert!(rig.active(BehaviorKind::Jetpack));

    rig.avatar.flags.dead = true;
    rig.tick(&[Button::Action, Button::Up]);
    assert!(!rig.active(BehaviorKind::Jetpack));
    assert!(rig.avatar.body.gravity_on);

    rig.sensors.set(BodySense::FeetOnGround, true);
    for _ in 0..5 {
        rig.tick(&[Button::Action]);
        rig.tick(&[]);
        assert!(rig.engine.active().iter().next().is_none());
    }
}

#[test]
fn test_death_drops_cart_without_hop() {
    let mut rig = cart_rig();
    rig.tick(&[]);
    rig.tick_dt(&[Button::Right], 0.0625);
    let carried = rig.avatar.body.velocity.x;
    rig.effects.clear();

    rig.avatar.flags.dead = true;
    rig.tick(&[]);
    assert_eq!(
        rig.engine.transitions(),
        &[Transition {
            kind: BehaviorKind::RideCart,
            phase: TransitionPhase::Exit,
        }]
    );
    assert_eq!(rig.avatar.body.velocity, Vec2::new(carried, 0.0));
    assert!(rig.avatar.body.hazard_contacts_on);
    assert_eq!(
        rig.effects,
        vec![MotionEffect::DismountCart {
            cart: Entity::PLACEHOLDER,
            position: rig.avatar.body.center,
            velocity: Vec2::new(carried, 0.0),
        }]
    );
}

#[test]
fn test_death_lets_go_of_ladder() {
    let mut rig = ladder_rig();
    rig.tick(&[Button::Up]);
    rig.tick(&[Button::Up]);
    assert!(rig.active(BehaviorKind::Climb));

    rig.avatar.flags.dead = true;
    rig.tick(&[Button::Up]);
    assert_eq!(rig.phases_of(BehaviorKind::Climb), vec![TransitionPhase::Exit]);
    assert!(!rig.active(BehaviorKind::Climb));
    assert!(rig.avatar.body.gravity_on);
    assert_eq!(rig.avatar.body.velocity, Vec2::ZERO);
}

#[test]
fn test_death_ends_air_dash() {
    let mut rig = dash_rig();
    rig.tick(&[Button::Action]);
    assert!(rig.active(BehaviorKind::AirDash));
    rig.effects.clear();

    rig.avatar.flags.dead = true;
    rig.tick(&[Button::Action]);
    assert_eq!(
        rig.engine.transitions(),
        &[Transition {
            kind: BehaviorKind::AirDash,
            phase: TransitionPhase::Exit,
        }]
    );
    assert!(rig.avatar.body.gravity_on);
    assert_eq!(
        rig.effects,
        vec![MotionEffect::StopSound {
            cue: SoundCue::AirDash,
        }]
    );
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_impulse_points_along_up() {
    let mut rig = Rig::grounded();
    rig.avatar.body.velocity = Vec2::new(50.0, 0.0);
    rig.tick(&[Button::Action]);

    assert!(rig.active(BehaviorKind::Jump));
    assert_eq!(rig.avatar.body.velocity, Vec2::new(50.0, rig.u(18.0)));
    assert!(rig.effects.contains(&MotionEffect::PlaySound {
        cue: SoundCue::Jump,
        looping: false,
    }));
}

#[test]
fn test_jump_impulse_follows_upside_down_orientation() {
    let mut rig = Rig::grounded();
    rig.avatar.flags.orientation = Orientation::Down;
    rig.tick(&[Button::Action]);

    assert!(rig.active(BehaviorKind::Jump));
    assert_eq!(rig.avatar.body.velocity.y, -rig.u(18.0));
    assert!(rig.avatar.body.velocity_along(Orientation::Down.up()) > 0.0);
}

#[test]
fn test_jump_needs_fresh_press_and_no_down() {
    let mut rig = Rig::grounded();
    rig.tick(&[Button::Action, Button::Down]);
    assert!(!rig.active(BehaviorKind::Jump));

    // Still held, no longer fresh.
    rig.tick(&[Button::Action]);
    assert!(!rig.active(BehaviorKind::Jump));
}

#[test]
fn test_jump_ends_on_release_and_zeroes_rise() {
    let mut rig = Rig::grounded();
    rig.tick(&[Button::Action]);
    rig.sensors.set(BodySense::FeetOnGround, false);
    rig.tick(&[Button::Action]);
    assert!(rig.active(BehaviorKind::Jump));

    rig.tick(&[]);
    assert!(!rig.active(BehaviorKind::Jump));
    assert_eq!(rig.avatar.body.velocity.y, 0.0);
}

// -----------------------------------------------------------------------------
// WallSlide tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_faces_away_and_adds_friction() {
    let mut rig = Rig::new();
    rig.sensors.set(BodySense::SideTouchingBlockRight, true);

    rig.tick(&[Button::Right]);
    assert!(rig.active(BehaviorKind::WallSlide));
    assert_eq!(rig.avatar.flags.facing, Facing::Left);
    assert_eq!(rig.avatar.action_hint, ActionHint::Jump);

    rig.tick(&[Button::Right]);
    assert_eq!(rig.avatar.body.friction_on_self, Vec2::new(1.0, 1.25));
}

#[test]
fn test_wall_slide_blocked_on_ground_and_sand() {
    let mut rig = Rig::grounded();
    rig.sensors.set(BodySense::SideTouchingBlockLeft, true);
    rig.tick(&[Button::Left]);
    assert!(!rig.active(BehaviorKind::WallSlide));

    let mut rig = Rig::new();
    rig.sensors.set(BodySense::SideTouchingBlockLeft, true);
    rig.sensors.set(BodySense::FeetOnSand, true);
    rig.tick(&[Button::Left]);
    assert!(!rig.active(BehaviorKind::WallSlide));
}

#[test]
fn test_wall_jump_launches_away_and_locks_out_reattach() {
    let mut rig = Rig::new();
    rig.sensors.set(BodySense::SideTouchingBlockRight, true);
    let dt = 0.0625;

    rig.tick_dt(&[Button::Right], dt);
    rig.tick_dt(&[Button::Right, Button::Action], dt);
    assert!(rig.active(BehaviorKind::Jump));
    assert_eq!(
        rig.avatar.body.velocity,
        Vec2::new(-rig.u(10.0), rig.u(20.0))
    );

    // Jump now holds; the slide lets go and arms the lockout.
    rig.tick_dt(&[Button::Right, Button::Action], dt);
    assert!(!rig.active(BehaviorKind::WallSlide));
    assert_eq!(rig.avatar.action_hint, ActionHint::AirDash);

    rig.tick_dt(&[Button::Right], dt);
    assert!(!rig.active(BehaviorKind::Jump));
    assert!(!rig.active(BehaviorKind::WallSlide));

    rig.tick_dt(&[Button::Right], dt);
    assert!(rig.active(BehaviorKind::WallSlide));
}

// -----------------------------------------------------------------------------
// AirDash tests
// -----------------------------------------------------------------------------

fn dash_rig() -> Rig {
    let mut rig = Rig::new();
    rig.avatar.action_hint = ActionHint::AirDash;
    rig
}

#[test]
fn test_air_dash_holds_then_bumps_on_exit() {
    let mut rig = dash_rig();
    rig.tick(&[Button::Action]);
    assert!(rig.active(BehaviorKind::AirDash));
    assert!(!rig.avatar.body.gravity_on);
    assert_eq!(rig.avatar.action_hint, ActionHint::Jump);

    rig.tick(&[Button::Action]);
    assert_eq!(rig.avatar.body.velocity, Vec2::new(rig.u(12.0), 0.0));

    rig.tick(&[]);
    assert!(!rig.active(BehaviorKind::AirDash));
    assert!(rig.avatar.body.gravity_on);
    assert_eq!(rig.avatar.body.velocity, Vec2::new(rig.u(15.0), 0.0));
}

#[test]
fn test_air_dash_exit_during_camera_rotation_keeps_gravity_off() {
    let mut rig = dash_rig();
    rig.tick(&[Button::Action]);
    rig.tick(&[Button::Action]);
    rig.world.camera_rotating = true;
    rig.tick(&[]);

    assert!(!rig.active(BehaviorKind::AirDash));
    assert!(!rig.avatar.body.gravity_on);
    assert_eq!(rig.avatar.body.velocity, Vec2::new(rig.u(12.0), 0.0));
}

#[test]
fn test_air_dash_whoosh_loops_until_exit() {
    let mut rig = dash_rig();
    rig.tick(&[Button::Action]);
    rig.tick(&[Button::Action]);
    assert_eq!(
        rig.effects,
        vec![MotionEffect::PlaySound {
            cue: SoundCue::AirDash,
            looping: true,
        }]
    );

    rig.effects.clear();
    rig.world.camera_rotating = true;
    rig.tick(&[]);
    assert_eq!(
        rig.effects,
        vec![MotionEffect::StopSound {
            cue: SoundCue::AirDash,
        }]
    );
}

#[test]
fn test_air_dash_flips_with_facing_and_halts_at_wall() {
    let mut rig = dash_rig();
    rig.tick(&[Button::Action]);

    rig.avatar.flags.facing = Facing::Left;
    rig.tick(&[Button::Action]);
    assert_eq!(rig.avatar.body.velocity, Vec2::new(-rig.u(12.0), 0.0));

    rig.sensors.set(BodySense::SideTouchingBlockLeft, true);
    rig.avatar.body.velocity = Vec2::new(0.0, -5.0);
    rig.tick(&[Button::Action]);
    assert!(rig.active(BehaviorKind::AirDash));
    assert_eq!(rig.avatar.body.velocity, Vec2::new(0.0, -5.0));
}

#[test]
fn test_air_dash_runs_out_after_max_time() {
    let mut rig = dash_rig();
    rig.tick_dt(&[Button::Action], 0.125);
    rig.tick_dt(&[Button::Action], 0.125);
    rig.tick_dt(&[Button::Action], 0.125);
    assert!(rig.active(BehaviorKind::AirDash));

    rig.tick_dt(&[Button::Action], 0.125);
    assert!(!rig.active(BehaviorKind::AirDash));
}

#[test]
fn test_air_dash_needs_ability() {
    let mut rig = dash_rig();
    rig.avatar.flags.abilities.air_dash = false;
    rig.tick(&[Button::Action]);
    assert!(!rig.active(BehaviorKind::AirDash));
}

// -----------------------------------------------------------------------------
// GroundSlide tests
// -----------------------------------------------------------------------------

#[test]
fn test_ground_slide_spawns_dust_and_slides() {
    let mut rig = Rig::grounded();
    rig.tick(&[Button::Down, Button::Action]);
    assert!(rig.active(BehaviorKind::GroundSlide));
    assert!(!rig.active(BehaviorKind::Jump));
    assert!(matches!(
        rig.effects.as_slice(),
        [MotionEffect::Spawn(request)] if request.kind == SpawnKind::DustPuff
    ));

    rig.tick(&[Button::Down, Button::Action]);
    assert_eq!(rig.avatar.body.velocity, Vec2::new(rig.u(12.0), 0.0));

    rig.tick(&[Button::Down]);
    assert!(!rig.active(BehaviorKind::GroundSlide));
    assert_eq!(rig.avatar.body.velocity, Vec2::new(rig.u(17.0), 0.0));
}

#[test]
fn test_ground_slide_orientation_change_uses_entry_axis() {
    let mut rig = Rig::grounded();
    rig.tick(&[Button::Down, Button::Action]);
    assert!(rig.active(BehaviorKind::GroundSlide));

    rig.avatar.body.velocity = Vec2::new(-40.0, 90.0);
    rig.avatar.flags.orientation = Orientation::Down;
    rig.tick(&[Button::Down, Button::Action]);

    assert!(!rig.active(BehaviorKind::GroundSlide));
    assert_eq!(rig.avatar.body.velocity, Vec2::new(rig.u(5.0), 0.0));
}

#[test]
fn test_ground_slide_held_under_ceiling() {
    let mut rig = Rig::grounded();
    rig.tick(&[Button::Down, Button::Action]);
    rig.sensors.set(BodySense::HeadTouchingBlock, true);

    rig.tick(&[]);
    assert!(rig.active(BehaviorKind::GroundSlide));
}

// -----------------------------------------------------------------------------
// Swim tests
// -----------------------------------------------------------------------------

#[test]
fn test_swim_stroke_lasts_while_rising() {
    let mut rig = Rig::new();
    rig.sensors.set(BodySense::InWater, true);
    rig.avatar.action_hint = ActionHint::Swim;

    rig.tick(&[Button::Action]);
    assert!(rig.active(BehaviorKind::Swim));
    assert!(!rig.active(BehaviorKind::Jump));
    assert_eq!(rig.avatar.body.velocity.y, rig.u(10.0));

    rig.tick(&[]);
    assert!(rig.active(BehaviorKind::Swim));

    rig.avatar.body.velocity.y = -1.0;
    rig.tick(&[]);
    assert!(!rig.active(BehaviorKind::Swim));
}

// -----------------------------------------------------------------------------
// Jetpack tests
// -----------------------------------------------------------------------------

fn jetpack_rig(ammo: u32) -> Rig {
    let mut rig = Rig::new();
    rig.avatar.flags.loadout = Loadout::Jetpack;
    rig.avatar.jetpack_ammo = AmmoGauge {
        current: ammo,
        max: 30,
    };
    rig
}

#[test]
fn test_jetpack_drains_one_unit_per_interval() {
    let mut rig = jetpack_rig(5);
    let dt = 0.0625;

    rig.tick_dt(&[Button::Action, Button::Up], dt);
    for _ in 0..12 {
        rig.tick_dt(&[Button::Action, Button::Up], dt);
    }
    assert!(rig.active(BehaviorKind::Jetpack));
    assert_eq!(rig.avatar.jetpack_ammo.current, 2);
    assert_eq!(rig.avatar.body.velocity.y, rig.u(8.0));
    assert!(!rig.avatar.body.gravity_on);
}

#[test]
fn test_jetpack_cuts_out_when_empty() {
    let mut rig = jetpack_rig(3);
    let dt = 0.0625;

    rig.tick_dt(&[Button::Action, Button::Up], dt);
    for _ in 0..12 {
        rig.tick_dt(&[Button::Action, Button::Up], dt);
    }
    assert_eq!(rig.avatar.jetpack_ammo.current, 0);

    rig.tick_dt(&[Button::Action, Button::Up], dt);
    assert!(!rig.active(BehaviorKind::Jetpack));
    assert!(rig.avatar.body.gravity_on);
    assert_eq!(
        rig.effects.last(),
        Some(&MotionEffect::StopSound {
            cue: SoundCue::Jetpack,
        })
    );
}

#[test]
fn test_jetpack_needs_jetpack_loadout() {
    let mut rig = Rig::new();
    rig.tick(&[Button::Action, Button::Up]);
    assert!(!rig.active(BehaviorKind::Jetpack));
}

// -----------------------------------------------------------------------------
// Climb tests
// -----------------------------------------------------------------------------

fn ladder_rig() -> Rig {
    let mut rig = Rig::new();
    rig.avatar.body.center = Vec2::new(5.0, -90.0);
    rig.sensors.ladder = Some(LadderContact {
        bounds: Rect::from_center_size(Vec2::ZERO, Vec2::new(24.0, 200.0)),
    });
    rig.sensors.set(BodySense::HeadTouchingLadder, true);
    rig.sensors.set(BodySense::FeetTouchingLadder, true);
    rig
}

#[test]
fn test_climb_grabs_and_snaps_to_centerline() {
    let mut rig = ladder_rig();
    rig.avatar.body.velocity = Vec2::new(30.0, -80.0);

    rig.tick(&[Button::Up]);
    assert!(rig.active(BehaviorKind::Climb));
    assert_eq!(rig.avatar.body.center, Vec2::new(0.0, -90.0));
    assert_eq!(rig.avatar.body.velocity, Vec2::ZERO);
    assert!(!rig.avatar.body.gravity_on);
    assert_eq!(rig.avatar.action_hint, ActionHint::AirDash);

    rig.tick(&[Button::Up]);
    assert_eq!(rig.avatar.body.velocity, Vec2::new(0.0, rig.u(5.0)));

    rig.avatar.flags.shooting = true;
    rig.tick(&[Button::Up]);
    assert_eq!(rig.avatar.body.velocity, Vec2::ZERO);
}

#[test]
fn test_climb_releases_on_fresh_action() {
    let mut rig = ladder_rig();
    rig.tick(&[Button::Up]);
    rig.tick(&[Button::Action]);

    assert!(!rig.active(BehaviorKind::Climb));
    assert!(!rig.active(BehaviorKind::AirDash));
    assert!(rig.avatar.body.gravity_on);
}

#[test]
fn test_climb_lets_go_past_top() {
    let mut rig = ladder_rig();
    rig.tick(&[Button::Up]);

    rig.sensors.set(BodySense::HeadTouchingLadder, false);
    rig.avatar.body.center.y = 110.0;
    rig.tick(&[Button::Up]);
    assert!(rig.active(BehaviorKind::Climb));

    rig.avatar.body.center.y = 130.0;
    rig.tick(&[Button::Up]);
    assert!(!rig.active(BehaviorKind::Climb));
}

#[test]
fn test_climb_grab_leaves_overlapping_body_in_place() {
    let mut rig = ladder_rig();
    rig.avatar.body.center = Vec2::new(0.0, -110.0);
    rig.tick(&[Button::Up]);

    assert!(rig.active(BehaviorKind::Climb));
    assert_eq!(rig.avatar.body.center, Vec2::new(0.0, -110.0));
}

#[test]
fn test_climb_grab_from_below_lifts_body_onto_ladder() {
    let mut rig = ladder_rig();
    rig.avatar.body.center = Vec2::new(0.0, -117.0);
    rig.tick(&[Button::Up]);

    assert!(rig.active(BehaviorKind::Climb));
    assert_eq!(rig.avatar.body.min_y(), -100.0);
    assert_eq!(rig.avatar.body.center, Vec2::new(0.0, -84.0));
}

/// Whether an already-active climb holds on this pass, on a 200x200 ladder
/// centred at the origin.
fn climb_holds(orientation: Orientation, center: Vec2, head: bool, feet: bool) -> bool {
    let tuning = MovementTuning::default();
    let mut avatar = Avatar::default();
    avatar.flags.orientation = orientation;
    avatar.body.center = center;
    let input = InputSnapshot::default();
    let mut sensors = SensorSnapshot::default();
    sensors.ladder = Some(LadderContact {
        bounds: Rect::from_center_size(Vec2::ZERO, Vec2::new(200.0, 200.0)),
    });
    sensors.set(BodySense::HeadTouchingLadder, head);
    sensors.set(BodySense::FeetTouchingLadder, feet);
    let world = WorldFlags::default();
    let mut active = ActiveSet::default();
    active.set(BehaviorKind::Climb, true);

    let ctx = EvalContext {
        avatar: &avatar,
        frame: Frame {
            input: &input,
            sensors: &sensors,
            world: &world,
        },
        active: &active,
        tuning: &tuning,
    };
    Climb::default().evaluate(DT, &ctx)
}

#[test]
fn test_climb_extent_up_checks_one_end_each() {
    // Head lost: only the top end counts.
    assert!(climb_holds(Orientation::Up, Vec2::new(0.0, -120.0), false, true));
    assert!(!climb_holds(Orientation::Up, Vec2::new(0.0, 120.0), false, true));
    // Feet lost: only the bottom end counts.
    assert!(climb_holds(Orientation::Up, Vec2::new(0.0, 120.0), true, false));
    assert!(!climb_holds(Orientation::Up, Vec2::new(0.0, -120.0), true, false));
}

#[test]
fn test_climb_extent_down_checks_both_ends() {
    assert!(!climb_holds(Orientation::Down, Vec2::new(0.0, -120.0), false, true));
    assert!(!climb_holds(Orientation::Down, Vec2::new(0.0, 120.0), false, true));
    assert!(!climb_holds(Orientation::Down, Vec2::new(0.0, 120.0), true, false));
    assert!(!climb_holds(Orientation::Down, Vec2::new(0.0, -120.0), true, false));
    assert!(climb_holds(Orientation::Down, Vec2::new(0.0, 80.0), false, false));
}

#[test]
fn test_climb_extent_left_checks_both_ends() {
    // 90 + 16 runs past the right end, -90 - 16 past the left one.
    assert!(!climb_holds(Orientation::Left, Vec2::new(90.0, 0.0), true, false));
    assert!(!climb_holds(Orientation::Left, Vec2::new(-90.0, 0.0), true, false));
    assert!(climb_holds(Orientation::Left, Vec2::new(80.0, 0.0), true, false));

    assert!(!climb_holds(Orientation::Left, Vec2::new(-120.0, 0.0), false, true));
    assert!(!climb_holds(Orientation::Left, Vec2::new(120.0, 0.0), false, true));
    assert!(climb_holds(Orientation::Left, Vec2::new(-90.0, 0.0), false, true));
}

#[test]
fn test_climb_extent_right_checks_one_end_each() {
    assert!(!climb_holds(Orientation::Right, Vec2::new(-90.0, 0.0), true, false));
    assert!(climb_holds(Orientation::Right, Vec2::new(90.0, 0.0), true, false));

    assert!(!climb_holds(Orientation::Right, Vec2::new(120.0, 0.0), false, true));
    assert!(climb_holds(Orientation::Right, Vec2::new(-120.0, 0.0), false, true));
}

#[test]
#[should_panic(expected = "without a ladder")]
fn test_climb_enter_without_ladder_panics() {
    let tuning = MovementTuning::default();
    let mut avatar = Avatar::default();
    let input = InputSnapshot::default();
    let sensors = SensorSnapshot::default();
    let world = WorldFlags::default();
    let active = ActiveSet::default();
    let mut effects: Vec<MotionEffect> = Vec::new();

    let mut ctx = ActionContext {
        avatar: &mut avatar,
        frame: Frame {
            input: &input,
            sensors: &sensors,
            world: &world,
        },
        active: &active,
        tuning: &tuning,
        effects: &mut effects,
    };
    Climb::default().on_enter(&mut ctx);
}

// -----------------------------------------------------------------------------
// RideCart tests
// -----------------------------------------------------------------------------

fn cart_rig() -> Rig {
    let mut rig = Rig::grounded();
    rig.sensors.cart = Some(Entity::PLACEHOLDER);
    rig.sensors.set(BodySense::TouchingCart, true);
    rig
}

#[test]
fn test_cart_mount_accelerate_and_clamp() {
    let mut rig = cart_rig();
    rig.avatar.body.velocity = Vec2::new(100.0, -20.0);
    rig.tick(&[]);

    assert!(rig.active(BehaviorKind::RideCart));
    assert_eq!(rig.avatar.body.velocity, Vec2::ZERO);
    assert!(!rig.avatar.body.hazard_contacts_on);
    assert_eq!(
        rig.effects,
        vec![MotionEffect::MountCart {
            cart: Entity::PLACEHOLDER,
        }]
    );

    rig.tick_dt(&[Button::Right], 0.0625);
    assert_eq!(rig.avatar.body.velocity.x, rig.u(15.0) * 0.0625);

    for _ in 0..100 {
        rig.tick_dt(&[Button::Right], 0.0625);
    }
    assert_eq!(rig.avatar.body.velocity.x, rig.u(12.0));

    rig.sensors.set(BodySense::SideTouchingBlockRight, true);
    rig.tick_dt(&[Button::Right], 0.0625);
    assert_eq!(rig.avatar.body.velocity.x, 0.0);
}

#[test]
fn test_cart_dismount_hands_over_velocity() {
    let mut rig = cart_rig();
    rig.tick(&[]);
    rig.tick_dt(&[Button::Right], 0.0625);
    let carried = rig.avatar.body.velocity.x;
    rig.effects.clear();

    rig.tick(&[Button::Up, Button::Action]);
    assert!(!rig.active(BehaviorKind::RideCart));
    assert!(rig.avatar.body.hazard_contacts_on);
    assert_eq!(rig.avatar.body.velocity.y, rig.u(22.0));
    assert!(rig.effects.contains(&MotionEffect::DismountCart {
        cart: Entity::PLACEHOLDER,
        position: rig.avatar.body.center,
        velocity: Vec2::new(carried, 0.0),
    }));
}

#[test]
fn test_cart_lost_under_feet_dismounts() {
    let mut rig = cart_rig();
    rig.tick(&[]);
    assert!(rig.active(BehaviorKind::RideCart));
    rig.effects.clear();

    rig.sensors.cart = None;
    rig.sensors.set(BodySense::TouchingCart, false);
    rig.tick(&[]);
    assert_eq!(rig.phases_of(BehaviorKind::RideCart), vec![TransitionPhase::Exit]);
    assert!(!rig.active(BehaviorKind::RideCart));
    assert!(rig.avatar.body.hazard_contacts_on);
    assert_eq!(rig.avatar.body.velocity.y, rig.u(22.0));
    assert!(rig.effects.contains(&MotionEffect::DismountCart {
        cart: Entity::PLACEHOLDER,
        position: rig.avatar.body.center,
        velocity: Vec2::ZERO,
    }));
}

#[test]
fn test_cart_sensor_alone_keeps_the_mounted_cart() {
    let mut rig = cart_rig();
    rig.tick(&[]);
    rig.sensors.cart = None;
    rig.tick(&[]);
    assert!(rig.active(BehaviorKind::RideCart));
}

// -----------------------------------------------------------------------------
// Pose tests
// -----------------------------------------------------------------------------

struct PoseScene {
    avatar: Avatar,
    active: ActiveSet,
    input: InputSnapshot,
    sensors: SensorSnapshot,
    world: WorldFlags,
    tuning: MovementTuning,
}

impl PoseScene {
    fn grounded() -> Self {
        Self {
            avatar: Avatar::default(),
            active: ActiveSet::default(),
            input: InputSnapshot::default(),
            sensors: SensorSnapshot::default().with(BodySense::FeetOnGround),
            world: WorldFlags::default(),
            tuning: MovementTuning::default(),
        }
    }

    fn resolve(&self, resolver: &mut PoseResolver) -> String {
        let frame = Frame {
            input: &self.input,
            sensors: &self.sensors,
            world: &self.world,
        };
        resolver.resolve(&self.avatar, &self.active, frame, &self.tuning);
        resolver.pose_key().to_string()
    }

    fn key(&self) -> String {
        self.resolve(&mut PoseResolver::default())
    }
}

#[test]
fn test_pose_idle_and_suffixes() {
    let mut scene = PoseScene::grounded();
    assert_eq!(scene.key(), "Stand_Blaster");

    scene.avatar.flags.facing = Facing::Left;
    scene.avatar.flags.loadout = Loadout::Jetpack;
    assert_eq!(scene.key(), "Stand_Left_Jetpack");
}

#[test]
fn test_pose_is_idempotent() {
    let mut scene = PoseScene::grounded();
    scene.avatar.flags.charge = ChargeLevel::Half;
    scene.active.set(BehaviorKind::WallSlide, true);

    let mut resolver = PoseResolver::default();
    let first = scene.resolve(&mut resolver);
    let second = scene.resolve(&mut resolver);
    assert_eq!(first, "WallSlideHalfCharged_Blaster");
    assert_eq!(first, second);
}

#[test]
fn test_pose_modifier_precedence() {
    let mut scene = PoseScene::grounded();
    scene.sensors.set(BodySense::FeetOnGround, false);

    scene.avatar.flags.charge = ChargeLevel::Full;
    scene.avatar.flags.shooting = true;
    assert_eq!(scene.key(), "JumpShoot_Blaster");

    scene.avatar.flags.shooting = false;
    assert_eq!(scene.key(), "JumpCharged_Blaster");

    scene.avatar.flags.charge = ChargeLevel::Half;
    assert_eq!(scene.key(), "JumpHalfCharged_Blaster");
}

#[test]
fn test_pose_behavior_priority() {
    let mut scene = PoseScene::grounded();
    scene.active.set(BehaviorKind::Swim, true);
    scene.active.set(BehaviorKind::GroundSlide, true);
    assert_eq!(scene.key(), "GroundSlide_Blaster");

    scene.avatar.flags.damaged = true;
    assert_eq!(scene.key(), "Damaged_Blaster");

    scene.active.set(BehaviorKind::RideCart, true);
    assert_eq!(scene.key(), "CartDamaged_Blaster");

    scene.active.set(BehaviorKind::Jetpack, true);
    assert_eq!(scene.key(), "Jetpack_Blaster");
}

#[test]
fn test_pose_cart_variants() {
    let mut scene = PoseScene::grounded();
    scene.active.set(BehaviorKind::RideCart, true);
    assert_eq!(scene.key(), "Cart_Blaster");

    scene.avatar.flags.charge = ChargeLevel::Half;
    assert_eq!(scene.key(), "CartHalfCharged_Blaster");

    scene.sensors.set(BodySense::FeetOnGround, false);
    scene.avatar.flags.charge = ChargeLevel::Full;
    assert_eq!(scene.key(), "CartJumpCharged_Blaster");

    scene.sensors.set(BodySense::FeetOnGround, true);
    scene.active.set(BehaviorKind::Jump, true);
    scene.avatar.flags.shooting = true;
    assert_eq!(scene.key(), "CartJumpShoot_Blaster");
}

#[test]
fn test_pose_climb_variants() {
    let mut scene = PoseScene::grounded();
    scene.active.set(BehaviorKind::Climb, true);
    scene.sensors.set(BodySense::HeadTouchingLadder, true);
    assert_eq!(scene.key(), "StillClimb_Blaster");

    scene.avatar.flags.charge = ChargeLevel::Full;
    assert_eq!(scene.key(), "StillClimbCharged_Blaster");

    scene.avatar.body.velocity = Vec2::new(0.0, -160.0);
    scene.avatar.flags.charge = ChargeLevel::Half;
    assert_eq!(scene.key(), "ClimbHalfCharged_Blaster");

    scene.avatar.flags.charge = ChargeLevel::None;
    assert_eq!(scene.key(), "Climb_Blaster");

    scene.sensors.set(BodySense::HeadTouchingLadder, false);
    assert_eq!(scene.key(), "FinishClimb_Blaster");

    scene.avatar.flags.charge = ChargeLevel::Full;
    assert_eq!(scene.key(), "FinishClimbCharged_Blaster");

    // Shooting shares one frame and outranks the charge.
    scene.avatar.flags.shooting = true;
    assert_eq!(scene.key(), "ClimbShoot_Blaster");
}

#[test]
fn test_pose_air_dash_ignores_shooting() {
    let mut scene = PoseScene::grounded();
    scene.active.set(BehaviorKind::AirDash, true);
    scene.avatar.flags.shooting = true;
    assert_eq!(scene.key(), "AirDash_Blaster");

    scene.avatar.flags.shooting = false;
    scene.avatar.flags.charge = ChargeLevel::Full;
    assert_eq!(scene.key(), "AirDashCharged_Blaster");
}

#[test]
fn test_pose_run_and_slip_slide() {
    let mut scene = PoseScene::grounded();
    scene.avatar.flags.running = true;
    assert_eq!(scene.key(), "Run_Blaster");

    scene.avatar.flags.running = false;
    scene.avatar.body.velocity = Vec2::new(3.0, 0.0);
    assert_eq!(scene.key(), "SlipSlide_Blaster");

    scene.avatar.body.velocity = Vec2::new(1.0, 0.0);
    assert_eq!(scene.key(), "Stand_Blaster");
}

#[test]
fn test_pose_not_ready_and_camera_rotation() {
    let mut scene = PoseScene::grounded();
    scene.sensors.set(BodySense::FeetOnGround, false);
    scene.avatar.flags.ready = false;
    assert_eq!(scene.key(), "Stand_Blaster");

    scene.avatar.flags.ready = true;
    scene.sensors.set(BodySense::FeetOnGround, true);
    scene.world.camera_rotating = true;
    scene.avatar.flags.shooting = true;
    assert_eq!(scene.key(), "JumpShoot_Blaster");
}

#[test]
fn test_pose_frozen_during_paused_transition() {
    let mut scene = PoseScene::grounded();
    scene.sensors.set(BodySense::FeetOnGround, false);
    let mut resolver = PoseResolver::default();
    scene.resolve(&mut resolver);
    assert_eq!(resolver.raw_pose_key().base, PoseBase::Jump);

    scene.world.room_transition_paused = true;
    assert_eq!(scene.resolve(&mut resolver), FROZEN_POSE_KEY);
    assert!(resolver.is_frozen());
    assert_eq!(resolver.raw_pose_key().base, PoseBase::Jump);
}

#[test]
fn test_pose_room_transition_keeps_previous_and_runs() {
    let mut scene = PoseScene::grounded();
    let mut resolver = PoseResolver::default();
    assert_eq!(scene.resolve(&mut resolver), "Stand_Blaster");

    scene.world.room_transition = true;
    scene.sensors.set(BodySense::FeetOnGround, false);
    assert_eq!(scene.resolve(&mut resolver), "Run_Blaster");
    assert_eq!(scene.resolve(&mut resolver), "Run_Blaster");
}

#[test]
fn test_engine_pose_key_after_jump() {
    let mut rig = Rig::grounded();
    rig.tick(&[Button::Action]);
    assert_eq!(rig.engine.pose_key(), "Jump_Blaster");
    assert_eq!(rig.engine.raw_pose_key().base, PoseBase::Jump);
    assert!(!rig.engine.is_pose_frozen());
}
