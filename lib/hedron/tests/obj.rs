//! Ensure that OBJ files on disk load into scenes with the right objects, materials, and paths.
#![cfg(feature = "de_obj")]

use std::path::{Path, PathBuf};

use hedron::de::obj;

/// A scratch directory removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("hedron-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.0.join(file);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

const CUBE_SIDES: &str = "\
mtllib sides.mtl
o Floor
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
usemtl stone
f 1/1 2/2 3/3 4/4
o Wall
v 0 0 0
v 0 0 1
v 1 0 1
vn 0 -1 0
f 5//1 6//1 7//1
";

const SIDES_MTL: &str = "\
newmtl stone
map_Kd tex/stone.png
map_Bump /abs/stone_normal.png
";

#[test]
fn objects_and_materials() {
    let dir = Scratch::new("objects_and_materials");
    dir.write("sides.mtl", SIDES_MTL);
    let path = dir.write("sides.obj", CUBE_SIDES);
    let scene = obj::load(&path).unwrap();

    assert_eq!(scene.base_dir(), dir.0.as_path());
    let names: Vec<_> = scene.objects().iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["Floor", "Wall"]);
    assert_eq!(scene.active_object().unwrap().name, "Floor");

    let floor = &scene.objects()[0];
    assert_eq!(floor.mesh.faces().len(), 1);
    assert_eq!(floor.mesh.faces()[0].len(), 4);
    let uvs: Vec<_> = floor.mesh.loops().iter().map(|l| [l.uv.x, l.uv.y]).collect();
    assert_eq!(uvs, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

    let stone = floor.material_slots[0].material.as_ref().unwrap();
    assert_eq!(stone.name, "stone");
    let images: Vec<_> = stone
        .texture_slots
        .iter()
        .flatten()
        .filter_map(|s| s.texture.image.as_ref())
        .map(|i| scene.absolute_path(&i.path))
        .collect();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0], dir.0.join("tex/stone.png"));
    #[cfg(unix)]
    assert_eq!(images[1], Path::new("/abs/stone_normal.png"));

    // normals come from the file when given
    let wall = &scene.objects()[1];
    assert_eq!(wall.material_slots.len(), 1);
    for v in wall.mesh.vertices() {
        assert!((v.normal - nalgebra::Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-6);
    }
}

#[test]
fn missing_material_library() {
    let dir = Scratch::new("missing_mtl");
    let path = dir.write("sides.obj", CUBE_SIDES);
    let scene = obj::load(&path).unwrap();
    assert_eq!(scene.objects().len(), 2);
    assert!(scene.objects()[0].material_slots[0].material.is_none());
}

#[test]
fn missing_file() {
    let dir = Scratch::new("missing_file");
    assert!(matches!(
        obj::load(dir.0.join("nothing.obj")),
        Err(obj::ObjError::Load(_))
    ));
}
