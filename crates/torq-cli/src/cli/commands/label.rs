//! `torq label …` – manage labels.

use anyhow::Result;
use clap::Subcommand;
use torq_core::api::{self, Command};
use torq_core::events::Events;
use torq_core::store::Store;

use super::try_daemon;

#[derive(Debug, Subcommand)]
pub enum LabelAction {
    /// List all labels.
    List,

    /// Create a label, or update one by id.
    Update {
        /// Label name.
        name: String,
        /// Existing label id to update (omit to create).
        #[arg(long)]
        id: Option<String>,
        /// Display color, e.g. "#cc0000".
        #[arg(long)]
        color: Option<String>,
        /// Move completed payloads of labelled torrents to this directory.
        #[arg(long, value_name = "DIR")]
        move_to: Option<String>,
    },

    /// Delete a label; torrents keep running, their label is cleared.
    Delete {
        /// Label id.
        id: String,
    },

    /// Assign a label to a torrent, or clear it.
    Set {
        /// Torrent info-hash.
        hash: String,
        /// Label id; omit to clear the torrent's label.
        #[arg(long)]
        label: Option<String>,
    },
}

pub async fn run_label(store: &Store, action: LabelAction) -> Result<()> {
    // With no daemon the operations run against the store directly; the
    // throwaway event stream has no subscribers.
    let events = Events::new(1);

    match action {
        LabelAction::List => {
            let labels = store.all_labels().await?;
            if labels.is_empty() {
                println!("No labels.");
                return Ok(());
            }
            println!("{:<34} {:<16} {:<9} MOVE-TO", "ID", "NAME", "COLOR");
            for l in labels {
                println!(
                    "{:<34} {:<16} {:<9} {}",
                    l.id,
                    l.name,
                    if l.color.is_empty() { "-" } else { &l.color },
                    l.move_destination().unwrap_or("-")
                );
            }
        }

        LabelAction::Update {
            name,
            id,
            color,
            move_to,
        } => {
            let command = Command::UpdateLabel {
                id: id.clone(),
                name: name.clone(),
                color: color.clone(),
                move_to: move_to.clone(),
            };
            if try_daemon(&command).await? {
                println!("Label saved");
                return Ok(());
            }
            let label = api::update_label(store, &events, id, &name, color, move_to).await?;
            println!("Label {} saved", label.id);
        }

        LabelAction::Delete { id } => {
            if try_daemon(&Command::DeleteLabel { id: id.clone() }).await? {
                println!("Label {id} deleted");
                return Ok(());
            }
            api::delete_label(store, &events, &id).await?;
            println!("Label {id} deleted");
        }

        LabelAction::Set { hash, label } => {
            let command = Command::SetLabel {
                hash: hash.clone(),
                label_id: label.clone(),
            };
            if try_daemon(&command).await? {
                println!("Label updated for {hash}");
                return Ok(());
            }
            api::set_label(store, &events, &hash, label).await?;
            println!("Label updated for {hash}");
        }
    }
    Ok(())
}
