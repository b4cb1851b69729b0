//! Source-project archive: a Vite/React skeleton plus the project data.
//!
//! Entries are written in a fixed order with a fixed timestamp, so the
//! archive bytes only change when the project does.

use crate::error::ExportResult;
use dnamatrix_blocks::ProjectState;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PROJECT_DATA: &str = "project-data.json";

/// Skeleton files in archive order. `project-data.json` and the copy
/// instructions follow them.
pub const SKELETON: &[(&str, &str)] = &[
    ("package.json", include_str!("../assets/archive/package.json")),
    ("tsconfig.json", include_str!("../assets/archive/tsconfig.json")),
    ("vite.config.ts", include_str!("../assets/archive/vite.config.ts")),
    ("vercel.json", include_str!("../assets/archive/vercel.json")),
    (".gitignore", include_str!("../assets/archive/gitignore")),
    ("README.md", include_str!("../assets/archive/README.md")),
    ("index.html", include_str!("../assets/archive/index.html")),
    ("index.tsx", include_str!("../assets/archive/index.tsx")),
    ("index.css", include_str!("../assets/archive/index.css")),
    ("vite-env.d.ts", include_str!("../assets/archive/vite-env.d.ts")),
];

const COPY_INSTRUCTIONS: (&str, &str) = (
    "COPY_FILES_INSTRUCTION.md",
    include_str!("../assets/archive/COPY_FILES_INSTRUCTION.md"),
);

/// Build the archive in memory.
pub fn export_archive(state: &ProjectState) -> ExportResult<Vec<u8>> {
    let project_data = state.to_json()?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut entries: Vec<(&str, &str)> = SKELETON.to_vec();
    entries.push((PROJECT_DATA, &project_data));
    entries.push(COPY_INSTRUCTIONS);
    for (name, contents) in &entries {
        zip.start_file(*name, options)?;
        zip.write_all(contents.as_bytes())?;
    }

    let bytes = zip.finish()?.into_inner();
    log::info!(
        "exported project archive: {} entries, {} bytes",
        entries.len(),
        bytes.len()
    );
    Ok(bytes)
}
