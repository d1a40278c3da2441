//! Startup scene: a floor to play on, a steep ramp to slide down, a goal,
//! a rack of balls, the player and the camera rig chosen in settings.
use avian3d::prelude::*;
use bevy::prelude::*;
use pitchside::ball::{Ball, BallAttachment, BallHandler};
use pitchside::camera::{MouseLook, OrbitCamera, PlayerCamera};
use pitchside::goal::Goal;
use pitchside::player::{Player, PLAYER_RADIUS};
use pitchside::settings::{CameraMode, Settings};

const BALL_RADIUS: f32 = 0.25;
const FLOOR_SIZE: f32 = 60.0;
const RAMP_TILT_DEG: f32 = 50.0;
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.0, 6.0);

/// Ball spawn points, in a row in front of the player.
const BALL_SPAWNS: [Vec3; 4] = [
    Vec3::new(-1.5, 0.5, 2.0),
    Vec3::new(-0.5, 0.5, 2.0),
    Vec3::new(0.5, 0.5, 2.0),
    Vec3::new(1.5, 0.5, 2.0),
];

/// Build the scene and spawn the player with the configured camera rig.
///
/// # Arguments
/// - `commands`: Commands used to spawn entities and insert resources.
/// - `meshes`: Asset storage for the primitive meshes.
/// - `materials`: Asset storage for standard materials.
/// - `settings`: Goal values and the camera mode.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                shadows_enabled: true,
                illuminance: 8000.0,
                ..default()
            },
            transform: Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        Name::new("Sun"),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    // floor, top face at y = 0
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(FLOOR_SIZE, 1.0, FLOOR_SIZE)),
            material: materials.add(Color::srgb(0.32, 0.55, 0.3)),
            transform: Transform::from_xyz(0.0, -0.5, 0.0),
            ..default()
        },
        RigidBody::Static,
        Collider::cuboid(FLOOR_SIZE, 1.0, FLOOR_SIZE),
        Name::new("Floor"),
    ));

    // steeper than the default slope limit, so holding slide carries the player down
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(6.0, 0.5, 12.0)),
            material: materials.add(Color::srgb(0.55, 0.5, 0.45)),
            transform: Transform::from_xyz(10.0, 4.0, 0.0)
                .with_rotation(Quat::from_rotation_x(RAMP_TILT_DEG.to_radians())),
            ..default()
        },
        RigidBody::Static,
        Collider::cuboid(6.0, 0.5, 12.0),
        Name::new("Ramp"),
    ));

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Cuboid::new(4.0, 2.5, 1.0)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgba(0.95, 0.85, 0.2, 0.35),
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            transform: Transform::from_xyz(0.0, 1.25, -14.0),
            ..default()
        },
        RigidBody::Static,
        Collider::cuboid(4.0, 2.5, 1.0),
        Sensor,
        Goal::from_settings(&settings.goal),
        Name::new("Goal"),
    ));

    let ball_mesh = meshes.add(Sphere::new(BALL_RADIUS));
    let ball_material = materials.add(Color::srgb(0.9, 0.3, 0.2));
    for (i, spawn) in BALL_SPAWNS.into_iter().enumerate() {
        let transform = Transform::from_translation(spawn);
        commands.spawn((
            PbrBundle {
                mesh: ball_mesh.clone(),
                material: ball_material.clone(),
                transform,
                ..default()
            },
            RigidBody::Dynamic,
            Collider::sphere(BALL_RADIUS),
            Restitution::new(0.5),
            Ball::at(&transform),
            BallAttachment::default(),
            Name::new(format!("Ball {i}")),
        ));
    }

    let player = commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(PLAYER_RADIUS)),
                material: materials.add(Color::srgb(0.25, 0.4, 0.85)),
                transform: Transform::from_translation(PLAYER_SPAWN),
                ..default()
            },
            RigidBody::Kinematic,
            Collider::sphere(PLAYER_RADIUS),
            Player::default(),
            BallHandler::default(),
            Name::new("Player"),
        ))
        .id();

    match settings.camera.mode {
        CameraMode::FirstPerson => {
            let eye = Vec3::Y * settings.camera.mouse_look.eye_height;
            commands.entity(player).with_children(|body| {
                body.spawn((
                    Camera3dBundle {
                        transform: Transform::from_translation(eye),
                        ..default()
                    },
                    MouseLook::new(player),
                    PlayerCamera,
                ));
            });
        }
        CameraMode::Orbit => {
            let orbit = &settings.camera.orbit;
            let anchor = PLAYER_SPAWN + orbit.target_offset();
            commands.spawn((
                Camera3dBundle {
                    transform: Transform::from_translation(anchor + Vec3::new(0.0, 1.0, orbit.distance))
                        .looking_at(anchor, Vec3::Y),
                    ..default()
                },
                OrbitCamera::new(Some(player)),
                PlayerCamera,
            ));
        }
    }
}
