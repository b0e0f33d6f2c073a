//! Location profile command handlers.

use ccro_core::{ActivityKind, Archive, CoreError, LocationProfile, LocationProfileDraft};
use tabled::Tabled;

use crate::cli::{GlobalOpts, LocationsArgs, LocationsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "")]
    active: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl LocationRow {
    fn new(p: &LocationProfile, color: bool) -> Self {
        Self {
            active: output::active_marker(p.is_active, color),
            id: p.id.to_string(),
            name: p.name.clone(),
            description: p.description.clone().unwrap_or_default(),
        }
    }
}

fn detail(p: &LocationProfile) -> String {
    let mut pairs = vec![
        ("ID", p.id.to_string()),
        ("Name", p.name.clone()),
        ("Description", p.description.clone().unwrap_or_default()),
        ("Active", if p.is_active { "yes" } else { "no" }.to_owned()),
    ];
    pairs.extend(
        p.settings
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string())),
    );
    output::detail_lines(&pairs)
}

fn not_found(err: impl Into<CliError>, id: &str) -> CliError {
    err.into()
        .or_not_found("location profile", id, "locations list")
}

fn print_one(p: &LocationProfile, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, p, detail, |p| p.id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    archive: &Archive,
    args: LocationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let store = archive.locations();

    match args.command {
        LocationsCommand::List => {
            store.load().await;
            let snap = store.snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |p| LocationRow::new(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LocationsCommand::Active => match store.load_active().await {
            Some(active) => print_one(&active, global),
            None => {
                if !global.quiet {
                    eprintln!("No active location profile");
                }
                Ok(())
            }
        },

        LocationsCommand::Get { id } => {
            let profile = archive
                .api()
                .get_location_profile(&util::parse_id(&id))
                .await
                .map_err(|e| not_found(CoreError::from(e), &id))?;
            print_one(&profile, global)
        }

        LocationsCommand::Save {
            id,
            name,
            description,
        } => {
            // Updates start from the server's copy so extra settings survive.
            // An unknown id is still upserted under that identity.
            let mut draft = match id {
                Some(ref id) => {
                    let id = util::parse_id(id);
                    match archive.api().get_location_profile(&id).await {
                        Ok(existing) => LocationProfileDraft::from(&existing),
                        Err(e) if e.is_not_found() => LocationProfileDraft {
                            id: Some(id),
                            ..LocationProfileDraft::default()
                        },
                        Err(e) => return Err(CoreError::from(e).into()),
                    }
                }
                None => LocationProfileDraft::default(),
            };
            draft.name = name;
            if description.is_some() {
                draft.description = description;
            }

            let saved = store.save(&draft).await?;
            archive
                .record(
                    ActivityKind::ProfileSaved,
                    &format!("saved location profile {}", saved.name),
                    None,
                )
                .await;
            print_one(&saved, global)
        }

        LocationsCommand::Activate { id } => {
            store.load().await;
            let active = store
                .activate(&util::parse_id(&id))
                .await
                .map_err(|e| not_found(e, &id))?;
            let name = active.as_ref().map_or_else(|| id.clone(), |p| p.name.clone());
            archive
                .record(
                    ActivityKind::ProfileActivated,
                    &format!("activated location profile {name}"),
                    None,
                )
                .await;
            match active {
                Some(ref profile) => print_one(profile, global),
                None => {
                    if !global.quiet {
                        eprintln!("Location profile {id} activated");
                    }
                    Ok(())
                }
            }
        }

        LocationsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete location profile '{id}'?"),
                "locations delete",
                global.yes,
            )? {
                return Ok(());
            }
            store
                .delete(&util::parse_id(&id))
                .await
                .map_err(|e| not_found(e, &id))?;
            archive
                .record(
                    ActivityKind::ProfileDeleted,
                    &format!("deleted location profile {id}"),
                    None,
                )
                .await;
            if !global.quiet {
                eprintln!("Location profile {id} deleted");
            }
            Ok(())
        }
    }
}
