//! Box command handlers.

use ccro_core::{ActivityKind, Archive, ArchiveBox, BoxDraft, CoreError};
use tabled::Tabled;

use crate::cli::{BoxesArgs, BoxesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BoxRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&ArchiveBox> for BoxRow {
    fn from(b: &ArchiveBox) -> Self {
        Self {
            id: b.id.to_string(),
            code: b.code.clone(),
            description: b.description.clone().unwrap_or_default(),
            location: b
                .location_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

fn detail(b: &ArchiveBox) -> String {
    output::detail_lines(&[
        ("ID", b.id.to_string()),
        ("Code", b.code.clone()),
        ("Description", b.description.clone().unwrap_or_default()),
        (
            "Location",
            b.location_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ),
    ])
}

fn not_found(err: impl Into<CliError>, id: &str) -> CliError {
    err.into().or_not_found("box", id, "boxes list")
}

async fn fetch(archive: &Archive, id: &str) -> Result<ArchiveBox, CliError> {
    archive
        .api()
        .get_box(&util::parse_id(id))
        .await
        .map_err(|e| not_found(CoreError::from(e), id))
}

fn print_one(b: &ArchiveBox, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, b, detail, |b| b.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_many(boxes: &[ArchiveBox], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.output,
        boxes,
        |b| BoxRow::from(b),
        |b| b.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    archive: &Archive,
    args: BoxesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BoxesCommand::List => {
            archive.boxes().load().await;
            print_many(&archive.boxes().snapshot(), global)
        }

        BoxesCommand::Get { id } => {
            let found = fetch(archive, &id).await?;
            print_one(&found, global)
        }

        BoxesCommand::Add {
            code,
            description,
            location,
        } => {
            let draft = BoxDraft {
                description,
                location_id: location.as_deref().map(util::parse_id),
                ..BoxDraft::new(code)
            };
            let created = archive.boxes().add(&draft).await?;
            archive
                .record(
                    ActivityKind::BoxCreated,
                    &format!("created box {}", created.code),
                    None,
                )
                .await;
            print_one(&created, global)
        }

        BoxesCommand::Update {
            id,
            code,
            description,
            location,
        } => {
            if code.is_none() && description.is_none() && location.is_none() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass --code, --description or --location".into(),
                });
            }

            // Start from the server's copy so fields not modelled here survive.
            let mut updated = fetch(archive, &id).await?;
            if let Some(code) = code {
                updated.code = code;
            }
            if description.is_some() {
                updated.description = description;
            }
            if let Some(ref location) = location {
                updated.location_id = Some(util::parse_id(location));
            }

            let saved = archive
                .boxes()
                .update(&updated)
                .await
                .map_err(|e| not_found(e, &id))?;
            archive
                .record(
                    ActivityKind::BoxUpdated,
                    &format!("updated box {}", saved.code),
                    None,
                )
                .await;
            print_one(&saved, global)
        }

        BoxesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete box '{id}'?"), "boxes delete", global.yes)? {
                return Ok(());
            }
            archive
                .boxes()
                .delete(&util::parse_id(&id))
                .await
                .map_err(|e| not_found(e, &id))?;
            archive
                .record(ActivityKind::BoxDeleted, &format!("deleted box {id}"), None)
                .await;
            if !global.quiet {
                eprintln!("Box {id} deleted");
            }
            Ok(())
        }

        BoxesCommand::Search { code } => {
            archive.boxes().load().await;
            let found = archive.search_boxes(&code).await;
            if found.is_empty() && !global.quiet {
                eprintln!("No box matches '{code}'");
            }
            print_many(&found, global)
        }
    }
}
