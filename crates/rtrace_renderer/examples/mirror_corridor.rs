//! Mirror corridor example.
//!
//! Builds a small scene in code: a matte floor between two facing mirrors,
//! lit by a single point light, and saves it to PPM format.

use rtrace_core::{Camera, Material, Mesh, NearPlane, PointLight, Scene, VertexArena};
use rtrace_renderer::{render, save_image, Color, RenderConfig, Vec3};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!(
        "Scene built in {:?}: {} meshes, {} triangles",
        start.elapsed(),
        scene.mesh_count(),
        scene.triangle_count()
    );

    let config = RenderConfig::default().with_max_depth(8);
    let image = render(&scene, &config).expect("Failed to render");

    let filename = "mirror_corridor.ppm";
    save_image(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let camera = Camera::new(
        Vec3::new(0.0, 1.0, 6.0),
        Vec3::new(0.0, -0.1, -1.0),
        Vec3::Y,
        NearPlane::new(-0.8, 0.8, -0.45, 0.45),
        1.0,
        640,
        360,
    );

    #[rustfmt::skip]
    let vertices = VertexArena::new(vec![
        // Floor
        Vec3::new(-3.0, 0.0, 10.0), Vec3::new(3.0, 0.0, 10.0),
        Vec3::new(3.0, 0.0, -10.0), Vec3::new(-3.0, 0.0, -10.0),
        // Left mirror, facing +x
        Vec3::new(-3.0, 0.0, 10.0), Vec3::new(-3.0, 0.0, -10.0),
        Vec3::new(-3.0, 4.0, -10.0), Vec3::new(-3.0, 4.0, 10.0),
        // Right mirror, facing -x
        Vec3::new(3.0, 0.0, -10.0), Vec3::new(3.0, 0.0, 10.0),
        Vec3::new(3.0, 4.0, 10.0), Vec3::new(3.0, 4.0, -10.0),
        // Block in the middle of the corridor
        Vec3::new(-0.5, 0.0, -2.0), Vec3::new(0.5, 0.0, -2.0),
        Vec3::new(0.0, 1.5, -2.0),
    ]);

    let meshes: [(&str, &str, Vec<usize>); 4] = [
        ("floor", "matte", vec![1, 2, 3, 1, 3, 4]),
        ("left", "mirror", vec![5, 6, 7, 5, 7, 8]),
        ("right", "mirror", vec![9, 10, 11, 9, 11, 12]),
        ("block", "red", vec![13, 14, 15]),
    ];

    let mut scene = Scene::new(camera, vertices.clone());
    scene.background = Color::new(10.0, 10.0, 30.0);
    scene.ambient_light = Color::splat(25.0);

    scene.add_material(
        Material::new("matte")
            .with_ambient(Color::splat(0.5))
            .with_diffuse(Color::splat(0.6)),
    );
    scene.add_material(
        Material::new("mirror")
            .with_ambient(Color::splat(0.1))
            .with_diffuse(Color::splat(0.1))
            .with_specular(Color::ONE, 100.0)
            .with_mirror(Color::splat(0.8)),
    );
    scene.add_material(
        Material::new("red")
            .with_ambient(Color::new(0.8, 0.1, 0.1))
            .with_diffuse(Color::new(0.9, 0.1, 0.1))
            .with_specular(Color::splat(0.5), 32.0),
    );

    scene.add_light(PointLight::new(Vec3::new(0.0, 3.5, 2.0), Color::splat(8000.0)));

    for (name, material, faces) in meshes {
        let mesh = Mesh::new(&vertices, &faces, material)
            .unwrap_or_else(|e| panic!("Bad mesh '{}': {}", name, e));
        scene.add_object(Box::new(mesh));
    }

    scene
}
