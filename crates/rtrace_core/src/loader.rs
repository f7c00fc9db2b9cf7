//! Scene file loading.
//!
//! Scene files are XML documents with one `<scene>` root:
//!
//! - `<background>`, `<camera>` (position, gaze, up, nearplane, neardistance,
//!   imageresolution), `<lights>` (ambientlight and `<pointlight>` entries),
//!   `<materials>`, `<vertexdata>` and `<objects>` holding `<mesh>` entries
//! - optional `<maxraytracedepth>`
//!
//! Vectors and index lists are whitespace-separated numbers. Mesh faces use
//! 1-based indices into `<vertexdata>`.

use std::path::Path;
use std::str::FromStr;

use roxmltree::{Document, Node};
use rtrace_math::Vec3;
use thiserror::Error;

use crate::camera::{Camera, NearPlane};
use crate::mesh::{Mesh, MeshError, VertexArena};
use crate::scene::{Material, PointLight, Scene};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Root element is <{0}>, expected <scene>")]
    UnexpectedRoot(String),

    #[error("Required element {0} not found")]
    MissingElement(String),

    #[error("Invalid number '{value}' in {field}")]
    InvalidNumber { field: String, value: String },

    #[error("{field} has {found} components, expected {expected}")]
    WrongComponentCount {
        field: String,
        expected: String,
        found: usize,
    },

    #[error("Invalid mesh {id}: {source}")]
    InvalidMesh {
        id: String,
        #[source]
        source: MeshError,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene from {}", path.display());

    let content = std::fs::read_to_string(path)?;
    load_scene_from_str(&content)
}

/// Load a scene from XML text.
pub fn load_scene_from_str(content: &str) -> LoadResult<Scene> {
    let doc = Document::parse(content)?;
    let root = doc.root_element();
    if !root.has_tag_name("scene") {
        return Err(LoadError::UnexpectedRoot(root.tag_name().name().to_string()));
    }

    let camera = parse_camera(required_child(root, "camera", "scene")?)?;
    let (_, _, w) = camera.basis();
    log::debug!(
        "Camera at {} looking along {}, near plane {:?} at distance {}",
        camera.position(),
        -w,
        camera.near_plane(),
        camera.near_distance()
    );

    // Vertex data is complete before the first mesh borrows it
    let vertices = VertexArena::new(parse_vertices(required_text(root, "vertexdata", "scene")?)?);

    let mut scene = Scene::new(camera, vertices);
    scene.background = parse_vec3(required_text(root, "background", "scene")?, "scene.background")?;

    if let Some(text) = child(root, "maxraytracedepth").and_then(|n| n.text()) {
        let depth = parse_scalar(text, "scene.maxraytracedepth")?;
        scene.max_recursion_depth = Some(depth);
    }

    let lights = required_child(root, "lights", "scene")?;
    scene.ambient_light = parse_vec3(
        required_text(lights, "ambientlight", "lights")?,
        "lights.ambientlight",
    )?;
    for node in children(lights, "pointlight") {
        scene.add_light(parse_point_light(node)?);
    }

    // Materials go in first so that mesh material ids can be checked on insert
    if let Some(materials) = child(root, "materials") {
        for node in children(materials, "material") {
            scene.add_material(parse_material(node)?);
        }
    }

    if let Some(objects) = child(root, "objects") {
        for node in children(objects, "mesh") {
            let mesh = parse_mesh(node, scene.vertices())?;
            scene.add_object(Box::new(mesh));
        }
    }

    log::info!(
        "Loaded scene: {}x{}, {} lights, {} materials, {} meshes ({} triangles)",
        scene.camera.image_width,
        scene.camera.image_height,
        scene.lights.len(),
        scene.materials.len(),
        scene.mesh_count(),
        scene.triangle_count()
    );

    Ok(scene)
}

fn parse_camera(node: Node) -> LoadResult<Camera> {
    let position = parse_vec3(required_text(node, "position", "camera")?, "camera.position")?;
    let gaze = parse_vec3(required_text(node, "gaze", "camera")?, "camera.gaze")?;
    let up = parse_vec3(required_text(node, "up", "camera")?, "camera.up")?;

    let [left, right, bottom, top] =
        parse_array::<f64, 4>(required_text(node, "nearplane", "camera")?, "camera.nearplane")?;
    let near_distance = parse_scalar(
        required_text(node, "neardistance", "camera")?,
        "camera.neardistance",
    )?;
    let [nx, ny] = parse_array::<u32, 2>(
        required_text(node, "imageresolution", "camera")?,
        "camera.imageresolution",
    )?;

    Ok(Camera::new(
        position,
        gaze,
        up,
        NearPlane::new(left, right, bottom, top),
        near_distance,
        nx,
        ny,
    ))
}

fn parse_point_light(node: Node) -> LoadResult<PointLight> {
    let path = element_path("pointlight", node);
    let position = parse_vec3(
        required_text(node, "position", &path)?,
        &format!("{path}.position"),
    )?;
    let intensity = parse_vec3(
        required_text(node, "intensity", &path)?,
        &format!("{path}.intensity"),
    )?;
    Ok(PointLight::new(position, intensity))
}

fn parse_material(node: Node) -> LoadResult<Material> {
    let path = element_path("material", node);
    let color = |name: &str| -> LoadResult<Vec3> {
        parse_vec3(required_text(node, name, &path)?, &format!("{path}.{name}"))
    };

    Ok(Material {
        id: node.attribute("id").unwrap_or_default().to_string(),
        ambient: color("ambient")?,
        diffuse: color("diffuse")?,
        specular: color("specular")?,
        mirror_reflectance: color("mirrorreflectance")?,
        phong_exponent: parse_scalar(
            required_text(node, "phongexponent", &path)?,
            &format!("{path}.phongexponent"),
        )?,
    })
}

fn parse_mesh(node: Node, vertices: &VertexArena) -> LoadResult<Mesh> {
    let path = element_path("mesh", node);
    let material_id = required_text(node, "materialid", &path)?.trim();
    let faces = parse_numbers::<usize>(
        required_text(node, "faces", &path)?,
        &format!("{path}.faces"),
    )?;

    Mesh::new(vertices, &faces, material_id).map_err(|source| LoadError::InvalidMesh {
        id: node.attribute("id").unwrap_or_default().to_string(),
        source,
    })
}

fn parse_vertices(text: &str) -> LoadResult<Vec<Vec3>> {
    let values = parse_numbers::<f64>(text, "scene.vertexdata")?;
    if values.len() % 3 != 0 {
        return Err(LoadError::WrongComponentCount {
            field: "scene.vertexdata".to_string(),
            expected: "a multiple of 3".to_string(),
            found: values.len(),
        });
    }
    Ok(values
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

/// `name[id]`, used to point error messages at a specific entry.
fn element_path(name: &str, node: Node) -> String {
    format!("{}[{}]", name, node.attribute("id").unwrap_or("?"))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name(name))
}

fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
    parent: &str,
) -> LoadResult<Node<'a, 'input>> {
    child(node, name).ok_or_else(|| LoadError::MissingElement(format!("{parent}.{name}")))
}

/// Text of a required child element. Empty or whitespace-only text counts as missing.
fn required_text<'a>(node: Node<'a, '_>, name: &str, parent: &str) -> LoadResult<&'a str> {
    required_child(node, name, parent)?
        .text()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| LoadError::MissingElement(format!("{parent}.{name}")))
}

fn parse_numbers<T: FromStr>(text: &str, field: &str) -> LoadResult<Vec<T>> {
    text.split_whitespace()
        .map(|token| {
            token.parse::<T>().map_err(|_| LoadError::InvalidNumber {
                field: field.to_string(),
                value: token.to_string(),
            })
        })
        .collect()
}

fn parse_array<T: FromStr + Copy + Default, const N: usize>(
    text: &str,
    field: &str,
) -> LoadResult<[T; N]> {
    let values = parse_numbers::<T>(text, field)?;
    if values.len() != N {
        return Err(LoadError::WrongComponentCount {
            field: field.to_string(),
            expected: N.to_string(),
            found: values.len(),
        });
    }
    let mut array = [T::default(); N];
    array.copy_from_slice(&values);
    Ok(array)
}

fn parse_scalar<T: FromStr + Copy + Default>(text: &str, field: &str) -> LoadResult<T> {
    let [value] = parse_array::<T, 1>(text, field)?;
    Ok(value)
}

fn parse_vec3(text: &str, field: &str) -> LoadResult<Vec3> {
    parse_array::<f64, 3>(text, field).map(Vec3::from_array)
}
