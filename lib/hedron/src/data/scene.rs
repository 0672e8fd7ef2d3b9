mod path;
pub use path::*;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::Mesh;

/// Index of an [Object] within its [Scene].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// A set of objects, one of which may be active.
///
/// Relative file paths referenced by the scene (ex. [image paths](Image::path)) are relative to
/// [base_dir](Scene::base_dir).
#[derive(Debug, Clone, Default)]
pub struct Scene {
    base_dir: PathBuf,
    objects: Vec<Object>,
    active: Option<ObjectId>,
}

impl Scene {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[inline]
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Add an object. The scene's active object is left unchanged.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    #[inline]
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    /// Find the first object with the given name.
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .map(ObjectId)
    }

    /// Set (or, given `None`, clear) the active object. Ids not belonging to this scene clear it.
    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id.filter(|id| id.0 < self.objects.len());
    }

    #[inline]
    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn active_object(&self) -> Option<&Object> {
        self.active.and_then(|id| self.object(id))
    }

    /// Resolve a path referenced by this scene to an absolute one.
    ///
    /// # See Also
    ///
    /// * [resolve_path]
    pub fn absolute_path(&self, path: &Path) -> PathBuf {
        resolve_path(&self.base_dir, path)
    }
}

/// A named mesh with materials.
#[derive(Debug, Clone, Default)]
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub material_slots: Vec<MaterialSlot>,
}

impl Object {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            material_slots: Vec::new(),
        }
    }

    pub fn with_material(mut self, material: Option<Arc<Material>>) -> Self {
        self.material_slots.push(MaterialSlot { material });
        self
    }
}

/// A slot which may hold a [Material]. Materials are shared between the objects using them.
#[derive(Debug, Clone, Default)]
pub struct MaterialSlot {
    pub material: Option<Arc<Material>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub name: String,
    /// `None` entries are empty slots.
    pub texture_slots: Vec<Option<TextureSlot>>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture_slots: Vec::new(),
        }
    }

    pub fn with_texture(mut self, slot: Option<TextureSlot>) -> Self {
        self.texture_slots.push(slot);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureSlot {
    pub texture: Arc<Texture>,
}

impl TextureSlot {
    pub fn new(texture: Arc<Texture>) -> Self {
        Self { texture }
    }
}

/// A texture; image-backed or procedural.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    pub name: String,
    /// Procedural textures have no image.
    pub image: Option<Image>,
}

impl Texture {
    pub fn image(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            image: Some(Image {
                name: name.clone(),
                path: path.into(),
            }),
            name,
        }
    }

    pub fn procedural(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }
}

/// An image file; the path may be relative to the [scene's base directory](Scene::base_dir).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub path: PathBuf,
}

static_assertions::assert_impl_all!(Scene: Send, Sync, Clone);
