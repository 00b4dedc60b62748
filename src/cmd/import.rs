//! Import handler.
//!
//! Pipeline crate: crates/es-sink/
//! CLI command: `import --host ... --file ... --index ... --type ...`

use crate::connect::connect;
use crate::ImportArgs;
use es_archive_file::ArchiveSource;
use es_archive_sink::{
    import_source, DocumentHooks, IdFieldHooks, ImportOptions, IndexTarget, NoopHooks,
};

pub async fn run(args: ImportArgs) -> anyhow::Result<()> {
    anyhow::ensure!(!args.index.is_empty(), "Index name is required");
    anyhow::ensure!(!args.doc_type.is_empty(), "Type is required");
    anyhow::ensure!(!args.file.is_empty(), "File is required");
    anyhow::ensure!(args.batch_size > 0, "Batch size must be greater than zero");

    let store = connect(&args.store).await?;

    let source = ArchiveSource::parse(&args.file);
    let target = IndexTarget::new(args.index, args.doc_type);
    let opts = ImportOptions {
        batch_size: args.batch_size,
        max_line_bytes: args.max_line_bytes,
    };
    let hooks: Box<dyn DocumentHooks> = match args.id_field {
        Some(field) => Box::new(IdFieldHooks::new(field)),
        None => Box::new(NoopHooks),
    };

    let summary = import_source(&store, &source, &target, hooks.as_ref(), &opts).await?;

    if summary.failed_batches > 0 {
        tracing::warn!(
            "{} of {} bulk requests failed; their documents were not imported",
            summary.failed_batches,
            summary.batches
        );
    }
    if let Some(error) = &summary.read_error {
        tracing::warn!("Archive was not read to the end: {error}");
    }

    if args.strict && !summary.is_clean() {
        anyhow::bail!(
            "Import finished with errors: {} failed batches, {} failed items, read error: {}",
            summary.failed_batches,
            summary.failed_items,
            summary.read_error.as_deref().unwrap_or("none")
        );
    }
    Ok(())
}
