//! Collecting the image files used by an object's materials.

use std::path::PathBuf;

use hedron::{Object, Scene};

/// Absolute paths of the images of every image-backed texture of `object`.
///
/// Material slots are walked in order, then the texture slots of each slot's material in order.
/// Empty slots and textures without an image are skipped. Repeated images are reported every time
/// they're referenced.
pub fn texture_refs<'s>(
    scene: &'s Scene,
    object: &'s Object,
) -> impl Iterator<Item = PathBuf> + 's {
    object
        .material_slots
        .iter()
        .filter_map(|slot| slot.material.as_deref())
        .flat_map(|mat| mat.texture_slots.iter().flatten())
        .filter_map(|slot| slot.texture.image.as_ref())
        .map(|image| scene.absolute_path(&image.path))
}
