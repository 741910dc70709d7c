use crate::{Entity, Table};

/// The currently loaded tables, at most one per table entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub clients: Option<Table>,
    pub workers: Option<Table>,
    pub tasks: Option<Table>,
}

/// Borrowed view of a complete dataset triple.
#[derive(Debug, Clone, Copy)]
pub struct CompleteDatasets<'a> {
    pub clients: &'a Table,
    pub workers: &'a Table,
    pub tasks: &'a Table,
}

impl Datasets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: Entity) -> Option<&Table> {
        match entity {
            Entity::Clients => self.clients.as_ref(),
            Entity::Workers => self.workers.as_ref(),
            Entity::Tasks => self.tasks.as_ref(),
            Entity::Rules => None,
        }
    }

    /// Replaces the table for the table's own entity, returning the previous
    /// one. Tables tagged as [`Entity::Rules`] are ignored and returned as-is.
    pub fn replace(&mut self, table: Table) -> Option<Table> {
        let slot = match table.entity {
            Entity::Clients => &mut self.clients,
            Entity::Workers => &mut self.workers,
            Entity::Tasks => &mut self.tasks,
            Entity::Rules => return Some(table),
        };
        slot.replace(table)
    }

    /// All three tables, or `None` while any is missing.
    pub fn complete(&self) -> Option<CompleteDatasets<'_>> {
        Some(CompleteDatasets {
            clients: self.clients.as_ref()?,
            workers: self.workers.as_ref()?,
            tasks: self.tasks.as_ref()?,
        })
    }

    /// Loaded table entities in display order.
    pub fn loaded(&self) -> Vec<Entity> {
        Entity::TABLES
            .into_iter()
            .filter(|entity| self.get(*entity).is_some())
            .collect()
    }
}
