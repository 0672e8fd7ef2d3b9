//! Utilities for loading [Wavefront OBJ](https://en.wikipedia.org/wiki/Wavefront_.obj_file) files
//! (and their MTL material libraries) as a [Scene].
//!
//! # Notes
//!
//! * Each OBJ model becomes one [Object]; the first one is made active.
//! * Faces are kept as polygons; triangulation is left to a [Triangulator](crate::Triangulate).
//! * Vertex identity is the OBJ position index. Texture coordinates are read per face corner, so
//!   UV seams survive loading.
//! * OBJ normals are per corner; each vertex gets the normalized sum of the normals of its
//!   corners. Vertices without any get normals computed from the faces around them.
//! * A model's material becomes its single material slot. Texture maps become texture slots in
//!   the order ambient, diffuse, specular, normal, shininess, dissolve; unset maps leave the slot
//!   empty.
//! * Paths are relative to the OBJ file's directory, which becomes the scene's base directory.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use nalgebra::{Point2, Point3, Vector3};

use crate::{Image, Loop, Material, Mesh, MeshBuilder, MeshError, Object, Scene, Texture, TextureSlot};

/// Errors related to loading OBJ scenes.
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error(transparent)]
    Load(#[from] tobj::LoadError),
    #[error("OBJ file contains no models")]
    NoModels,
    #[error("model {model:?}: {attribute} index {index} out of range")]
    IndexOutOfRange {
        model: String,
        attribute: &'static str,
        index: u32,
    },
    #[error("model {model:?}: face arities don't add up to the index count")]
    Arity { model: String },
    #[error("model {model:?}: {source}")]
    Mesh {
        model: String,
        #[source]
        source: MeshError,
    },
}

/// Options handed to tobj: keep polygons and separate position/texcoord/normal indices.
pub fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file and its material libraries.
#[tracing::instrument]
pub fn load(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Scene, ObjError> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(path, &load_options())?;
    let materials = materials.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "couldn't load materials; continuing without them");
        Vec::new()
    });
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(PathBuf::new);
    from_models(base_dir, &models, &materials)
}

/// Build a [Scene] from already-loaded tobj data.
pub fn from_models(
    base_dir: impl Into<PathBuf>,
    models: &[tobj::Model],
    materials: &[tobj::Material],
) -> Result<Scene, ObjError> {
    if models.is_empty() {
        return Err(ObjError::NoModels);
    }
    let materials: Vec<Arc<Material>> = materials
        .iter()
        .map(|m| Arc::new(convert_material(m)))
        .collect();

    let mut scene = Scene::new(base_dir);
    for model in models {
        let mesh = convert_mesh(model)?;
        tracing::debug!(
            model = model.name.as_str(),
            vertices = mesh.vertices().len(),
            faces = mesh.faces().len(),
            "loaded OBJ model"
        );
        let material = model.mesh.material_id.and_then(|id| {
            let mat = materials.get(id).cloned();
            if mat.is_none() {
                tracing::warn!(model = model.name.as_str(), id, "model references unknown material");
            }
            mat
        });
        let id = scene.add_object(Object::new(model.name.clone(), mesh).with_material(material));
        if scene.active().is_none() {
            scene.set_active(Some(id));
        }
    }
    Ok(scene)
}

fn convert_material(mat: &tobj::Material) -> Material {
    let maps = [
        ("ambient", &mat.ambient_texture),
        ("diffuse", &mat.diffuse_texture),
        ("specular", &mat.specular_texture),
        ("normal", &mat.normal_texture),
        ("shininess", &mat.shininess_texture),
        ("dissolve", &mat.dissolve_texture),
    ];
    Material {
        name: mat.name.clone(),
        texture_slots: maps
            .into_iter()
            .map(|(kind, file)| {
                (!file.is_empty()).then(|| {
                    TextureSlot::new(Arc::new(Texture {
                        name: format!("{}.{kind}", mat.name),
                        image: Some(Image {
                            name: file.clone(),
                            path: PathBuf::from(file),
                        }),
                    }))
                })
            })
            .collect(),
    }
}

fn convert_mesh(model: &tobj::Model) -> Result<Mesh, ObjError> {
    let src = &model.mesh;
    let out_of_range = |attribute: &'static str, index: u32| ObjError::IndexOutOfRange {
        model: model.name.clone(),
        attribute,
        index,
    };
    let mesh_err = |source: MeshError| ObjError::Mesh {
        model: model.name.clone(),
        source,
    };

    let vertex_count = src.positions.len() / 3;
    let face_count = match src.face_arities.len() {
        0 => src.indices.len() / 3,
        n => n,
    };
    let mut builder = MeshBuilder::with_capacity(vertex_count, src.indices.len(), face_count);
    let mut vertices = Vec::with_capacity(vertex_count);
    for p in src.positions.chunks_exact(3) {
        vertices.push(
            builder
                .add_vertex(Point3::new(p[0], p[1], p[2]), Vector3::zeros())
                .map_err(mesh_err)?,
        );
    }

    let texcoord = |corner: usize| -> Result<Point2<f32>, ObjError> {
        match src.texcoord_indices.get(corner) {
            None => Ok(Point2::origin()),
            Some(&i) => src
                .texcoords
                .get(i as usize * 2..i as usize * 2 + 2)
                .map(|t| Point2::new(t[0], t[1]))
                .ok_or_else(|| out_of_range("texcoord", i)),
        }
    };

    let mut normal_sums = vec![Vector3::<f32>::zeros(); vertex_count];
    let arities: Vec<usize> = if src.face_arities.is_empty() {
        vec![3; src.indices.len() / 3]
    } else {
        src.face_arities.iter().map(|&a| a as usize).collect()
    };
    if arities.iter().sum::<usize>() != src.indices.len() {
        return Err(ObjError::Arity {
            model: model.name.clone(),
        });
    }

    let mut corner = 0;
    for arity in arities {
        let mut loops = Vec::with_capacity(arity);
        for c in corner..corner + arity {
            let pos = src.indices[c];
            let vertex = *vertices
                .get(pos as usize)
                .ok_or_else(|| out_of_range("position", pos))?;
            if let Some(&n) = src.normal_indices.get(c) {
                let normal = src
                    .normals
                    .get(n as usize * 3..n as usize * 3 + 3)
                    .ok_or_else(|| out_of_range("normal", n))?;
                normal_sums[pos as usize] += Vector3::new(normal[0], normal[1], normal[2]);
            }
            loops.push(Loop::new(vertex, texcoord(c)?));
        }
        corner += arity;
        builder.add_face(loops).map_err(mesh_err)?;
    }

    for (vertex, sum) in vertices.into_iter().zip(normal_sums) {
        if let Some(n) = sum.try_normalize(f32::EPSILON) {
            builder.set_normal(vertex, n).map_err(mesh_err)?;
        }
    }
    let mut mesh = builder.build();
    mesh.fill_missing_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_model() -> tobj::Model {
        tobj::Model::new(
            tobj::Mesh {
                positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
                texcoords: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
                indices: vec![0, 1, 2, 3],
                texcoord_indices: vec![0, 1, 2, 3],
                face_arities: vec![4],
                material_id: Some(0),
                ..Default::default()
            },
            "quad".to_owned(),
        )
    }

    #[test]
    fn quad() {
        let mat = tobj::Material {
            name: "stone".to_owned(),
            diffuse_texture: "stone.png".to_owned(),
            ..Default::default()
        };
        let scene = from_models("/models", &[quad_model()], &[mat]).unwrap();
        let obj = scene.active_object().unwrap();
        assert_eq!(obj.name, "quad");
        assert_eq!(obj.mesh.faces().len(), 1);
        assert_eq!(obj.mesh.faces()[0].len(), 4);
        // no OBJ normals; computed from the face
        assert!(obj.mesh.vertices().iter().all(|v| v.normal == Vector3::z()));

        let mat = obj.material_slots[0].material.as_ref().unwrap();
        assert_eq!(mat.texture_slots.len(), 6);
        assert!(mat.texture_slots[0].is_none());
        let diffuse = mat.texture_slots[1].as_ref().unwrap();
        assert_eq!(
            diffuse.texture.image.as_ref().unwrap().path,
            PathBuf::from("stone.png")
        );
    }

    #[test]
    fn bad_texcoord() {
        let mut model = quad_model();
        model.mesh.texcoord_indices[2] = 40;
        assert!(matches!(
            from_models("/", &[model], &[]),
            Err(ObjError::IndexOutOfRange {
                attribute: "texcoord",
                index: 40,
                ..
            })
        ));
    }

    #[test]
    fn no_models() {
        assert!(matches!(from_models("/", &[], &[]), Err(ObjError::NoModels)));
    }
}
