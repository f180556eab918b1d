//! Recursive item selection
//!
//! The user multi-selects entries of a directory. Files become items directly;
//! for each selected directory the user either takes it whole or browses into
//! it, in which case the nested picks are flattened into the result.

use anyhow::Result;

use crate::listing::{ListingProvider, Side};
use crate::prompt::Prompter;
use crate::transfer::TransferItem;

pub const COPY_WHOLE: &str = "Copy entire directory";
pub const BROWSE_INSIDE: &str = "Select files inside";

pub struct ItemSelector<'a> {
    prompter: &'a mut dyn Prompter,
    listing: &'a dyn ListingProvider,
    side: Side,
}

impl<'a> ItemSelector<'a> {
    pub fn new(
        prompter: &'a mut dyn Prompter,
        listing: &'a dyn ListingProvider,
        side: Side,
    ) -> Self {
        Self {
            prompter,
            listing,
            side,
        }
    }

    /// Items chosen under `path`, or `None` when nothing was chosen or the
    /// selection prompt was cancelled.
    pub fn select_items(&mut self, path: &str) -> Result<Option<Vec<TransferItem>>> {
        let entries = match self.listing.list(path) {
            Ok(entries) => entries,
            Err(e) => {
                self.prompter.warn(&e.to_string());
                return Ok(None);
            }
        };
        if entries.is_empty() {
            self.prompter.info("No items found in this directory.");
            return Ok(None);
        }

        let labels: Vec<String> = entries.iter().map(|e| e.label()).collect();
        let picked = match self.prompter.multiselect("Select items to transfer:", &labels)? {
            Some(p) => p,
            None => return Ok(None),
        };

        let mut items = Vec::new();
        for entry in picked.into_iter().filter_map(|i| entries.get(i)) {
            let source_path = self.side.join(path, &entry.name);
            if !entry.is_directory {
                items.push(TransferItem {
                    source_path,
                    name: entry.name.clone(),
                    is_directory: false,
                });
                continue;
            }

            let message = format!(
                "\"{}\" is a directory. What would you like to do?",
                entry.name
            );
            let choices = [COPY_WHOLE.to_string(), BROWSE_INSIDE.to_string()];
            match self.prompter.select(&message, &choices)? {
                None => continue,
                Some(0) => items.push(TransferItem {
                    source_path,
                    name: entry.name.clone(),
                    is_directory: true,
                }),
                Some(_) => {
                    if let Some(nested) = self.select_items(&source_path)? {
                        items.extend(nested);
                    }
                }
            }
        }

        Ok(if items.is_empty() { None } else { Some(items) })
    }
}
