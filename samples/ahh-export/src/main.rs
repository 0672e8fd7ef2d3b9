use std::{path::PathBuf, process::ExitCode};

use ahh::ErrorCategory;
use clap::Parser;
use hedron::{de::obj, EarClip, Fan};

mod cli;
use cli::*;

#[derive(Debug, thiserror::Error)]
enum ExportError {
    #[error("couldn't load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: obj::ObjError,
    },
    #[error(transparent)]
    Export(#[from] ahh::Error),
}

impl ExportError {
    fn exit_code(&self) -> u8 {
        match self {
            ExportError::Load { .. } => 1,
            ExportError::Export(e) => match e.category() {
                ErrorCategory::NoActiveObject => 2,
                ErrorCategory::Io => 3,
                ErrorCategory::Geometry => 4,
            },
        }
    }
}

fn run(cli: &Cli) -> Result<ahh::ExportSummary, ExportError> {
    let mut scene = obj::load(&cli.input).map_err(|source| ExportError::Load {
        path: cli.input.clone(),
        source,
    })?;
    if let Some(name) = &cli.object {
        let id = scene.find_object(name);
        if id.is_none() {
            tracing::warn!(object = name.as_str(), "no such object");
        }
        scene.set_active(id);
    }

    let output = cli.output_path();
    let options = cli.export_options();
    tracing::debug!(?output, ?options, triangulator = %cli.triangulator, "exporting");
    let summary = match cli.triangulator {
        Triangulator::EarClip => ahh::export_with(&scene, &output, &EarClip, &options),
        Triangulator::Fan => ahh::export_with(&scene, &output, &Fan, &options),
    }?;
    Ok(summary)
}

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_filter, cli.log_format);

    match run(&cli) {
        Ok(summary) => {
            tracing::info!(
                textures = summary.texture_refs,
                triangles = summary.triangles,
                vertices = summary.vertices,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "export failed");
            ExitCode::from(e.exit_code())
        }
    }
}
