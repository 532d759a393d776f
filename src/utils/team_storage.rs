// src/utils/team_storage.rs
use crate::models::{Team, UpdateTeamRequest};
use crate::utils::document_store::{
    from_document, from_documents, to_document, DeleteResult, DocumentStore, Filter, StoreError,
    Update, UpdateResult,
};
use log::info;

const COLLECTION: &str = Team::COLLECTION;

pub fn save_team(store: &dyn DocumentStore, team: &Team) -> Result<(), StoreError> {
    store.insert_one(COLLECTION, to_document(COLLECTION, team)?)?;
    info!("✅ Saved team: {}", team.id);
    Ok(())
}

pub fn find_team_by_id(store: &dyn DocumentStore, team_id: &str) -> Result<Option<Team>, StoreError> {
    store
        .find_by_id(COLLECTION, team_id)?
        .map(|doc| from_document(COLLECTION, doc))
        .transpose()
}

// Oldest first
pub fn list_teams(store: &dyn DocumentStore) -> Result<Vec<Team>, StoreError> {
    let docs = store.find(COLLECTION, &Filter::new())?;
    let mut teams: Vec<Team> = from_documents(COLLECTION, docs);
    teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(teams)
}

pub fn update_team(
    store: &dyn DocumentStore,
    team_id: &str,
    changes: &UpdateTeamRequest,
) -> Result<UpdateResult, StoreError> {
    let mut update = Update::new();
    if let Some(name) = &changes.name {
        update = update.set("name", name.trim());
    }
    if let Some(project) = &changes.project {
        update = update.set("project", project.as_str());
    }

    store.update_one(COLLECTION, &Filter::by_id(team_id), &update)
}

// Idempotent: a user already in `members` is left alone
pub fn add_team_member(
    store: &dyn DocumentStore,
    team_id: &str,
    user_id: &str,
) -> Result<UpdateResult, StoreError> {
    store.update_one(
        COLLECTION,
        &Filter::by_id(team_id),
        &Update::new().add_to_set("members", user_id),
    )
}

pub fn delete_team(store: &dyn DocumentStore, team_id: &str) -> Result<DeleteResult, StoreError> {
    store.delete_one(COLLECTION, &Filter::by_id(team_id))
}
