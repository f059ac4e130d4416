use chrono::NaiveDate;
use tracing::{info, warn};

use crate::project::{DueFlag, Project, Status};
use crate::storage::{LoadOutcome, Storage, StorageError};

/// Whether a delete/move found its target. `NotFound` is a no-op, not an
/// error, matching the board's fail-open behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
}

/// A project paired with its render-time due flag.
#[derive(Debug)]
pub struct Card<'a> {
    pub project: &'a Project,
    pub flag: DueFlag,
}

/// The three lanes as rendered. Cards whose status matches no lane appear
/// nowhere here, though they stay in the stored collection.
#[derive(Debug, Default)]
pub struct Lanes<'a> {
    pub todo: Vec<Card<'a>>,
    pub in_progress: Vec<Card<'a>>,
    pub done: Vec<Card<'a>>,
}

impl<'a> Lanes<'a> {
    pub fn lane(&self, status: &Status) -> &[Card<'a>] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
            Status::Other(_) => &[],
        }
    }
}

/// Mediates every mutation of the project collection and persists the whole
/// collection after each one, so stored and rendered state always agree. A
/// mutation whose save fails is rolled back before the error propagates.
pub struct Board<S: Storage> {
    storage: S,
    projects: Vec<Project>,
}

impl<S: Storage> Board<S> {
    /// Loads the stored collection, failing open to an empty board when the
    /// blob is missing or unreadable.
    pub fn open(storage: S) -> Self {
        let projects = match storage.load() {
            LoadOutcome::Loaded(projects) => {
                info!(count = projects.len(), "board loaded");
                projects
            }
            LoadOutcome::Missing => {
                info!("no board file yet, starting empty");
                Vec::new()
            }
            LoadOutcome::Corrupt(err) => {
                warn!(%err, "board file unreadable, starting empty");
                Vec::new()
            }
        };
        Self { storage, projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Appends a new to-do project and persists. Name and type are required
    /// by the input form; nothing is validated here.
    pub fn create_project(
        &mut self,
        name: String,
        kind: String,
        due_date: String,
    ) -> Result<Project, StorageError> {
        let project = Project::new(name, kind, due_date);
        self.projects.push(project.clone());
        if let Err(err) = self.storage.save(&self.projects) {
            self.projects.pop();
            return Err(err);
        }
        info!(id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    /// Removes the project with the given id. Unknown ids are a no-op.
    pub fn delete_project(&mut self, id: &str) -> Result<Mutation, StorageError> {
        let Some(pos) = self.projects.iter().position(|p| p.id == id) else {
            warn!(%id, "delete: no such project");
            return Ok(Mutation::NotFound);
        };
        let removed = self.projects.remove(pos);
        if let Err(err) = self.storage.save(&self.projects) {
            self.projects.insert(pos, removed);
            return Err(err);
        }
        info!(%id, "project deleted");
        Ok(Mutation::Applied)
    }

    /// Sets the project's status to the destination lane. Any lane is
    /// reachable from any other; there is no transition graph.
    pub fn move_project(&mut self, id: &str, status: Status) -> Result<Mutation, StorageError> {
        let Some(pos) = self.projects.iter().position(|p| p.id == id) else {
            warn!(%id, "move: no such project");
            return Ok(Mutation::NotFound);
        };
        let previous = std::mem::replace(&mut self.projects[pos].status, status);
        if let Err(err) = self.storage.save(&self.projects) {
            self.projects[pos].status = previous;
            return Err(err);
        }
        info!(%id, to = self.projects[pos].status.title(), "project moved");
        Ok(Mutation::Applied)
    }

    /// Partitions the collection into the three lanes, computing due flags
    /// against the given date so rendering is deterministic under test.
    pub fn lanes(&self, today: NaiveDate) -> Lanes<'_> {
        let mut lanes = Lanes::default();
        for project in &self.projects {
            let card = Card {
                project,
                flag: project.due_flag(today),
            };
            match project.status {
                Status::Todo => lanes.todo.push(card),
                Status::InProgress => lanes.in_progress.push(card),
                Status::Done => lanes.done.push(card),
                Status::Other(_) => {}
            }
        }
        lanes
    }
}
