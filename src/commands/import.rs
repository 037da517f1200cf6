//! Import command handler.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use deckport::config::DeckportConfig;
use deckport::io::formats::apkg::{ApkgSource, collection_limit};
use deckport::io::formats::strip_bom;
use deckport::io::{Format, SourceRegistry};
use deckport::storage::{MemoryStudySetStore, SqliteStudySetStore, StudySetStore};
use deckport::{Error, ImportOptions, ImportRequest, ImportService, Result, UserId};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments of the import command.
pub struct ImportArgs {
    /// File to import.
    pub file: PathBuf,
    /// Owner of the created set.
    pub owner: String,
    /// Description override.
    pub description: Option<String>,
    /// Validate only.
    pub dry_run: bool,
    /// JSON output.
    pub json: bool,
}

/// Executes the import command.
pub async fn cmd_import(config: &DeckportConfig, args: ImportArgs) -> Result<()> {
    let request = read_import_file(&args.file, config.max_file_size)?;

    let description = args
        .description
        .unwrap_or_else(|| config.default_description.clone());
    let options = ImportOptions::default().with_description(description);

    if args.dry_run {
        // Nothing is written, so no database is opened
        let store: Arc<dyn StudySetStore> = Arc::new(MemoryStudySetStore::new());
        let service = ImportService::new(store)
            .with_registry(source_registry(config))
            .with_options(options);
        let file_name = request.file_name.clone();
        let parsed = service.preview(request).await?;

        if args.json {
            let value = serde_json::json!({
                "file_name": file_name,
                "count": parsed.len(),
                "skipped": parsed.skipped,
                "records": parsed.records,
            });
            println!("{}", to_json(&value)?);
        } else {
            println!("Dry run completed (no changes made):");
            println!("  File:     {file_name}");
            println!("  Cards:    {}", parsed.len());
            println!("  Skipped:  {}", parsed.skipped);
        }
        return Ok(());
    }

    let store: Arc<dyn StudySetStore> = Arc::new(SqliteStudySetStore::new(config.database_path())?);
    let service = ImportService::new(store)
        .with_registry(source_registry(config))
        .with_options(options);
    let result = service
        .import_from_file(&UserId::new(args.owner), request)
        .await?;

    if args.json {
        println!("{}", to_json(&result)?);
    } else {
        println!("Import completed:");
        println!("  Study set: {}", result.created_set_id);
        println!("  Title:     {}", result.title);
        println!("  Cards:     {}", result.count);
        if result.skipped > 0 {
            println!("  Skipped:   {}", result.skipped);
        }
    }

    Ok(())
}

/// Builds the default registry, capping extracted Anki collections relative to
/// the configured file size limit.
pub fn source_registry(config: &DeckportConfig) -> SourceRegistry {
    let max_collection_size = collection_limit(config.max_file_size);
    SourceRegistry::with_defaults().register(Format::Apkg, move || {
        Arc::new(ApkgSource::new().with_max_collection_size(max_collection_size))
    })
}

/// Reads a file into an import request.
///
/// The size limit applies to the bytes on disk. Binary formats are
/// base64-encoded; text formats must be UTF-8 and lose a leading byte-order
/// mark.
pub fn read_import_file(path: &Path, max_file_size: u64) -> Result<ImportRequest> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidInput(format!("'{}' is not a file", path.display())))?;
    let format = Format::from_file_name(&file_name)?;

    let metadata = std::fs::metadata(path).map_err(|e| Error::OperationFailed {
        operation: "stat_import_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;
    if metadata.len() > max_file_size {
        return Err(Error::InvalidInput(format!(
            "'{file_name}' is {} bytes; the limit is {max_file_size} bytes",
            metadata.len()
        )));
    }

    let bytes = std::fs::read(path).map_err(|e| Error::OperationFailed {
        operation: "read_import_file".to_string(),
        cause: format!("{}: {e}", path.display()),
    })?;

    let content = if format.is_binary() {
        STANDARD.encode(bytes)
    } else {
        let text = String::from_utf8(bytes)
            .map_err(|_| Error::MalformedInput(format!("'{file_name}' is not valid UTF-8")))?;
        strip_bom(&text).to_owned()
    };

    Ok(ImportRequest::new(file_name, content))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::operation("serialize_output", e))
}
