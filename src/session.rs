//! One interactive run: direction → source → items → destination → transfer.

use anyhow::Result;

use crate::bridge::Bridge;
use crate::listing::provider_for;
use crate::prompt::Prompter;
use crate::resolve::PathResolver;
use crate::select::ItemSelector;
use crate::store::PathStore;
use crate::transfer::{Executor, TransferDirection, TransferReport};

#[derive(Debug)]
pub enum RunOutcome {
    Cancelled,
    NothingSelected,
    Completed(TransferReport),
}

pub struct Session<'a> {
    prompter: &'a mut dyn Prompter,
    bridge: &'a dyn Bridge,
    store: &'a PathStore,
    executor: &'a Executor<'a>,
}

impl<'a> Session<'a> {
    pub fn new(
        prompter: &'a mut dyn Prompter,
        bridge: &'a dyn Bridge,
        store: &'a PathStore,
        executor: &'a Executor<'a>,
    ) -> Self {
        Self {
            prompter,
            bridge,
            store,
            executor,
        }
    }

    /// Ask for the transfer direction.
    pub fn choose_direction(&mut self) -> Result<Option<TransferDirection>> {
        let options = [
            "Copy from PC to Phone".to_string(),
            "Copy from Phone to PC".to_string(),
        ];
        Ok(self
            .prompter
            .select("Select transfer direction:", &options)?
            .map(|i| {
                if i == 0 {
                    TransferDirection::PcToPhone
                } else {
                    TransferDirection::PhoneToPc
                }
            }))
    }

    /// Run the whole flow. `direction` skips the direction menu when given.
    pub fn run(&mut self, direction: Option<TransferDirection>) -> Result<RunOutcome> {
        let direction = match direction {
            Some(d) => d,
            None => match self.choose_direction()? {
                Some(d) => d,
                None => return Ok(RunOutcome::Cancelled),
            },
        };
        let source_side = direction.source_side();
        let destination_side = direction.destination_side();

        let source = match PathResolver::new(&mut *self.prompter, self.bridge, self.store)
            .resolve(source_side)?
        {
            Some(p) => p,
            None => return Ok(RunOutcome::Cancelled),
        };

        let listing = provider_for(source_side, self.bridge);
        let items = match ItemSelector::new(&mut *self.prompter, listing.as_ref(), source_side)
            .select_items(&source)?
        {
            Some(items) if !items.is_empty() => items,
            _ => return Ok(RunOutcome::NothingSelected),
        };

        let destination = match PathResolver::new(&mut *self.prompter, self.bridge, self.store)
            .resolve(destination_side)?
        {
            Some(p) => p,
            None => return Ok(RunOutcome::Cancelled),
        };

        log::debug!(
            "transferring {} item(s) {} into {}",
            items.len(),
            direction.as_str(),
            destination
        );
        let report = self.executor.transfer(&items, &destination, direction);
        Ok(RunOutcome::Completed(report))
    }
}
