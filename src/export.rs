use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use hedron::{EarClip, Object, Scene, Triangulate};

use crate::{
    convention::AxisConvention,
    error::Error,
    flatten::{flatten, FlatMesh},
    ser::{AhhWriter, DEFAULT_PRECISION},
    textures::texture_refs,
};

/// Settings for writing `.ahh` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportOptions {
    /// Digits written after the decimal point of every real number.
    pub precision: usize,
    pub convention: AxisConvention,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            convention: AxisConvention::default(),
        }
    }
}

/// What an export wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExportSummary {
    pub texture_refs: usize,
    pub triangles: usize,
    pub vertices: usize,
}

/// Everything needed to write an object, computed before any output is touched.
struct Prepared {
    textures: Vec<PathBuf>,
    mesh: FlatMesh<u32>,
}

impl Prepared {
    fn new<T: Triangulate + ?Sized>(scene: &Scene, triangulator: &T) -> Result<Self, Error> {
        let object: &Object = scene.active_object().ok_or(Error::NoActiveObject)?;
        if object.mesh.is_empty() {
            return Err(Error::EmptyMesh {
                object: object.name.clone(),
            });
        }
        let textures: Vec<PathBuf> = texture_refs(scene, object).collect();
        tracing::debug!(
            object = object.name.as_str(),
            count = textures.len(),
            "collected texture references"
        );
        let mesh = flatten(&object.mesh, triangulator)?;
        Ok(Self { textures, mesh })
    }

    fn write<W: Write>(&self, out: W, options: &ExportOptions) -> io::Result<W> {
        let mut w = AhhWriter::new(out)
            .with_precision(options.precision)
            .with_convention(options.convention);
        for path in &self.textures {
            w.texture_file(path)?;
        }
        w.mesh(&self.mesh)?;
        w.finish()
    }

    fn summary(&self) -> ExportSummary {
        ExportSummary {
            texture_refs: self.textures.len(),
            triangles: self.mesh.triangles().len(),
            vertices: self.mesh.vertices().len(),
        }
    }
}

/// Write the active object of `scene` to `out` as `.ahh` geometry.
///
/// Nothing is written unless the object can be exported in full; only I/O errors can leave `out`
/// partially written.
pub fn write_scene<W, T>(
    scene: &Scene,
    out: W,
    triangulator: &T,
    options: &ExportOptions,
) -> Result<ExportSummary, Error>
where
    W: Write,
    T: Triangulate + ?Sized,
{
    let prepared = Prepared::new(scene, triangulator)?;
    prepared.write(out, options).map_err(Error::Write)?;
    Ok(prepared.summary())
}

/// Export the active object of `scene` to the file at `path`, triangulating with [EarClip].
pub fn export(
    scene: &Scene,
    path: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportSummary, Error> {
    export_with(scene, path, &EarClip, options)
}

/// Export the active object of `scene` to the file at `path`.
///
/// The file is only created once the geometry is ready, so a scene that can't be exported leaves
/// the file system untouched. If writing fails partway, the partial file is removed.
#[tracing::instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn export_with<T: Triangulate + ?Sized>(
    scene: &Scene,
    path: impl AsRef<Path>,
    triangulator: &T,
    options: &ExportOptions,
) -> Result<ExportSummary, Error> {
    let path = path.as_ref();
    let prepared = Prepared::new(scene, triangulator)?;

    let file = File::create(path).map_err(Error::io(path))?;
    let written = prepared
        .write(BufWriter::new(file), options)
        .and_then(|buf| buf.into_inner().map_err(io::IntoInnerError::into_error))
        .and_then(|file| file.sync_all());
    if let Err(e) = written {
        if let Err(rm) = std::fs::remove_file(path) {
            if rm.kind() != io::ErrorKind::NotFound {
                tracing::warn!(error = %rm, "couldn't remove partially written file");
            }
        }
        return Err(Error::io(path)(e));
    }

    let summary = prepared.summary();
    tracing::info!(
        textures = summary.texture_refs,
        triangles = summary.triangles,
        vertices = summary.vertices,
        "exported"
    );
    Ok(summary)
}
