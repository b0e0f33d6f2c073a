//! Activity log command handlers.

use ccro_core::{ActivityLog, Archive, is_local_id};
use tabled::Tabled;

use crate::cli::{GlobalOpts, LogsArgs, LogsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Code")]
    search_code: String,
}

impl LogRow {
    fn new(log: &ActivityLog, color: bool) -> Self {
        let id = log.id.to_string();
        Self {
            id: if is_local_id(&log.id) {
                output::local_id(&id, color)
            } else {
                id
            },
            time: log.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            kind: log.kind.clone(),
            user: log.username.clone().unwrap_or_default(),
            details: log.details.clone(),
            search_code: log.search_code.clone().unwrap_or_default(),
        }
    }
}

fn detail(log: &ActivityLog) -> String {
    output::detail_lines(&[
        ("ID", log.id.to_string()),
        ("Time", log.timestamp.to_rfc3339()),
        ("Type", log.kind.clone()),
        ("User", log.username.clone().unwrap_or_default()),
        ("Details", log.details.clone()),
        ("Code", log.search_code.clone().unwrap_or_default()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    archive: &Archive,
    args: LogsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let store = archive.activity();

    match args.command {
        // `--limit` was already applied when the archive was built.
        LogsCommand::List { limit: _ } => {
            store.load().await;
            let color = output::should_color(&global.color);
            let snap = store.snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |l| LogRow::new(l, color),
                |l| l.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LogsCommand::Add {
            kind,
            details,
            search_code,
        } => {
            let user = archive.current_user();
            let entry = store
                .add_log(user.as_ref(), &kind, &details, search_code.as_deref())
                .await;
            if is_local_id(&entry.id) && !global.quiet {
                eprintln!("Server unavailable: entry kept locally only");
            }
            let out = output::render_single(&global.output, &entry, detail, |l| l.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LogsCommand::Clear => {
            if !util::confirm(
                "Delete the entire activity history?",
                "logs clear",
                global.yes,
            )? {
                return Ok(());
            }
            if !store.clear_history().await {
                return Err(CliError::HistoryNotCleared);
            }
            if !global.quiet {
                eprintln!("Activity history cleared");
            }
            Ok(())
        }
    }
}
