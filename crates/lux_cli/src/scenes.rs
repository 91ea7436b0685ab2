//! Example scenes, one builder per scene number.

use anyhow::{bail, Context, Result};
use lux_math::{Color, Point3, Vec3};
use lux_renderer::{
    gen_f32, gen_range_f32, make_box, Background, BvhNode, Camera, CheckerTexture, Dielectric,
    DiffuseLight, Hittable, HittableList, ImageTexture, Lambertian, Material, Metal,
    NoiseTexture, Quad, Rotation, Sphere, TerrainTexture, Translate, Triangle,
};
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;

/// Texture file looked up in the textures directory by scene 3.
pub const IMAGE_TEXTURE: &str = "earthmap.jpg";

/// Highest valid scene number.
pub const SCENE_COUNT: u8 = 7;

/// A world together with the camera that frames it.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    pub camera: Camera,
}

/// Build scene `number`, loading image textures from `textures`.
pub fn build(number: u8, textures: &Path, rng: &mut dyn RngCore) -> Result<Scene> {
    let scene = match number {
        1 => random_spheres(rng),
        2 => two_spheres(rng),
        3 => image_sphere(textures)?,
        4 => perlin_spheres(),
        5 => terrain(),
        6 => quads(),
        7 => turntable(),
        _ => bail!("unknown scene {number}, expected 1-{SCENE_COUNT}"),
    };
    Ok(scene)
}

/// Camera position after orbiting `position` around `target` by `angle`
/// radians about the vertical axis.
pub fn orbit_position(position: Point3, target: Point3, angle: f32) -> Point3 {
    let offset = position - target;
    let (sin, cos) = angle.sin_cos();
    target + Vec3::new(offset.x * cos + offset.z * sin, offset.y, -offset.x * sin + offset.z * cos)
}

/// Render settings shared by the example scenes.
fn production_settings(camera: &mut Camera) {
    camera.set_sample_count(100);
    camera.set_shutter_speed(1.0 / 24.0);
    camera.set_render_depth(50);
    camera.set_chunk_dimension(64);
}

fn lambertian(color: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(color))
}

fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

fn random_color_in(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    Color::new(
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
        gen_range_f32(rng, min, max),
    )
}

fn random_spheres(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let checker = CheckerTexture::from_colors(0.5, Color::splat(0.1), Color::splat(0.9));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, -1.0),
        1000.0,
        Arc::new(Lambertian::with_texture(Arc::new(checker))),
    )));

    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.965, 0.671, 0.729), 0.4)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::tinted(1.5, Color::splat(0.8))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.357, 0.816, 0.98)),
    )));

    let clearing = Point3::new(0.0, 1.0, 0.0);
    for i in (-11..=11).step_by(2) {
        for j in (-11..=11).step_by(2) {
            let center = Point3::new(
                i as f32 + gen_range_f32(rng, -1.0, 1.0),
                0.2,
                j as f32 + gen_range_f32(rng, -1.0, 1.0),
            );
            if (center - clearing).length() <= 0.9 {
                continue;
            }

            let sphere = match (3.0 * gen_f32(rng)) as u32 {
                0 => {
                    let albedo = random_color(rng) * random_color(rng);
                    let end = center + Vec3::new(0.0, gen_range_f32(rng, 0.0, 0.5), 0.0);
                    Sphere::moving(center, end, 0.2, lambertian(albedo))
                }
                1 => {
                    let albedo = random_color_in(rng, 0.5, 1.0);
                    let fuzz = gen_range_f32(rng, 0.2, 0.5);
                    Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))
                }
                _ => {
                    let ior = gen_range_f32(rng, 1.0, 2.0);
                    let tint = random_color_in(rng, 0.7, 1.0);
                    Sphere::new(center, 0.2, Arc::new(Dielectric::tinted(ior, tint)))
                }
            };
            world.add(Arc::new(sphere));
        }
    }

    let mut camera = Camera::new(
        1920,
        16.0 / 9.0,
        30.0,
        Point3::ZERO,
        Point3::new(-13.0, 2.0, 3.0),
        0.6,
    );
    production_settings(&mut camera);

    Scene {
        world: Arc::new(BvhNode::from_list(&world, rng)),
        camera,
    }
}

fn two_spheres(rng: &mut dyn RngCore) -> Scene {
    let checker: Arc<dyn Material> = Arc::new(Lambertian::with_texture(Arc::new(
        CheckerTexture::from_colors(2.0, Color::new(0.2, 0.3, 0.1), Color::splat(0.9)),
    )));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -20.0, -30.0), 20.0, checker.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 20.0, -30.0), 20.0, checker)));

    let mut camera = Camera::new(
        400,
        16.0 / 9.0,
        30.0,
        Point3::new(0.0, 0.0, -30.0),
        Point3::ZERO,
        0.6,
    );
    production_settings(&mut camera);

    Scene {
        world: Arc::new(BvhNode::from_list(&world, rng)),
        camera,
    }
}

fn image_sphere(textures: &Path) -> Result<Scene> {
    let texture = ImageTexture::open(IMAGE_TEXTURE, textures)
        .with_context(|| format!("scene 3 needs {} in {}", IMAGE_TEXTURE, textures.display()))?;

    let world = HittableList::from_object(Arc::new(Sphere::new(
        Point3::new(0.0, 0.0, -30.0),
        10.0,
        Arc::new(Lambertian::with_texture(Arc::new(texture))),
    )));

    let mut camera = Camera::new(
        1920,
        16.0 / 9.0,
        45.0,
        Point3::new(0.0, 0.0, -30.0),
        Point3::new(30.0, 0.0, -30.0),
        0.1,
    );
    production_settings(&mut camera);

    Ok(Scene {
        world: Arc::new(world),
        camera,
    })
}

fn perlin_spheres() -> Scene {
    let noise: Arc<dyn Material> = Arc::new(Lambertian::with_texture(Arc::new(
        NoiseTexture::new(1.0, 10, 0.5),
    )));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, noise.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, noise)));

    let mut camera = Camera::new(
        1920,
        16.0 / 9.0,
        20.0,
        Point3::ZERO,
        Point3::new(13.0, 2.0, 3.0),
        0.0,
    );
    production_settings(&mut camera);

    Scene {
        world: Arc::new(world),
        camera,
    }
}

fn terrain() -> Scene {
    let world = HittableList::from_object(Arc::new(Sphere::new(
        Point3::ZERO,
        10.0,
        Arc::new(Lambertian::with_texture(Arc::new(TerrainTexture::new(0.5, 10, 0.5)))),
    )));

    let mut camera = Camera::new(
        100,
        16.0 / 9.0,
        20.0,
        Point3::ZERO,
        Point3::new(0.0, 0.0, -50.0),
        0.0,
    );
    production_settings(&mut camera);
    camera.set_sample_count(10);
    camera.set_render_depth(4);

    Scene {
        world: Arc::new(world),
        camera,
    }
}

/// An open room lit from above, holding a rotated box, a triangle and a
/// glass sphere.
fn quad_room() -> HittableList {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));
    let white = lambertian(Color::splat(0.73));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    let mut world = HittableList::new();
    // Walls, floor and ceiling of a 10-unit room open towards +z
    world.add(Arc::new(Quad::new(
        Point3::new(5.0, 0.0, -10.0),
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-5.0, 0.0, -10.0),
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        red,
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-5.0, 0.0, -10.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-5.0, 10.0, -10.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 10.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-5.0, 0.0, -10.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 10.0, 0.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Point3::new(-1.5, 9.99, -6.5),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 3.0),
        light,
    )));

    let tall_box: Arc<dyn Hittable> = Arc::new(make_box(
        Point3::ZERO,
        Point3::new(3.0, 6.0, 3.0),
        white.clone(),
    ));
    let turned = Arc::new(Rotation::new(tall_box, 0.0, 15.0, 0.0, Point3::new(1.5, 0.0, 1.5)));
    world.add(Arc::new(Translate::new(turned, Vec3::new(-3.5, 0.0, -8.0))));

    world.add(Arc::new(Triangle::from_vertices(
        Point3::new(0.5, 0.0, -7.0),
        Point3::new(4.0, 0.0, -7.0),
        Point3::new(2.25, 4.0, -8.0),
        Arc::new(Metal::new(Color::new(0.8, 0.85, 0.88), 0.05)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(1.5, 1.5, -4.0),
        1.5,
        Arc::new(Dielectric::new(1.5)),
    )));

    world
}

fn quads() -> Scene {
    let mut camera = Camera::new(
        600,
        1.0,
        40.0,
        Point3::new(0.0, 5.0, -5.0),
        Point3::new(0.0, 5.0, 14.0),
        0.0,
    );
    production_settings(&mut camera);
    camera.set_sample_count(200);
    camera.set_background(Background::Solid(Color::ZERO));

    Scene {
        world: Arc::new(quad_room()),
        camera,
    }
}

/// Spheres and a turned box on a checker floor, open on every side.
fn turntable() -> Scene {
    let checker = CheckerTexture::from_colors(1.0, Color::splat(0.1), Color::splat(0.9));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::with_texture(Arc::new(checker))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(-2.5, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.965, 0.671, 0.729), 0.1)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(2.5, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));

    let cube: Arc<dyn Hittable> = Arc::new(make_box(
        Point3::splat(-0.75),
        Point3::splat(0.75),
        lambertian(Color::new(0.357, 0.816, 0.98)),
    ));
    let turned = Arc::new(Rotation::new(cube, 0.0, 45.0, 30.0, Point3::ZERO));
    world.add(Arc::new(Translate::new(turned, Vec3::new(0.0, 1.25, 0.0))));

    let mut camera = Camera::new(
        320,
        16.0 / 9.0,
        35.0,
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 3.0, 12.0),
        0.0,
    );
    production_settings(&mut camera);
    camera.set_sample_count(50);

    Scene {
        world: Arc::new(world),
        camera,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::{Interval, Ray};
    use lux_renderer::HitRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unknown_scene_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(build(0, Path::new("."), &mut rng).is_err());
        assert!(build(SCENE_COUNT + 1, Path::new("."), &mut rng).is_err());
    }

    #[test]
    fn test_missing_image_texture_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let dir = std::env::temp_dir().join(format!("lux-no-textures-{}", std::process::id()));
        assert!(build(3, &dir, &mut rng).is_err());
    }

    #[test]
    fn test_scenes_frame_their_subject() {
        let mut rng = StdRng::seed_from_u64(5);
        for number in [1, 4, 5, 6, 7] {
            let scene = build(number, Path::new("."), &mut rng).unwrap();
            let camera = &scene.camera;
            let center = Ray::new(
                camera.position(),
                camera.target() - camera.position(),
                0.0,
            );

            let mut rec = HitRecord::default();
            assert!(
                scene.world.hit(&center, Interval::new(0.001, f32::INFINITY), &mut rec),
                "scene {number} looks at nothing"
            );
        }
    }

    #[test]
    fn test_random_spheres_is_reproducible() {
        let a = random_spheres(&mut StdRng::seed_from_u64(42));
        let b = random_spheres(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.world.bounding_box(), b.world.bounding_box());
    }

    #[test]
    fn test_orbit_keeps_distance_and_height() {
        let target = Point3::new(0.0, 5.0, 4.0);
        let position = Point3::new(0.0, 3.0, -7.0);

        let quarter = orbit_position(position, target, std::f32::consts::FRAC_PI_2);
        assert!((quarter.distance(target) - position.distance(target)).abs() < 1e-4);
        assert!((quarter.y - position.y).abs() < 1e-6);
        assert!((quarter - Point3::new(-11.0, 3.0, 4.0)).length() < 1e-4);

        let full = orbit_position(position, target, std::f32::consts::TAU);
        assert!((full - position).length() < 1e-4);
    }
}
