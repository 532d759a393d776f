// src/utils/message_storage.rs
use crate::models::Message;
use crate::utils::document_store::{
    from_document, from_documents, timestamp, to_document, DeleteResult, DocumentStore, Filter,
    StoreError, Update, UpdateResult,
};
use chrono::{DateTime, Utc};
use log::debug;

const COLLECTION: &str = Message::COLLECTION;

pub fn save_message(store: &dyn DocumentStore, message: &Message) -> Result<(), StoreError> {
    store.insert_one(COLLECTION, to_document(COLLECTION, message)?)?;
    debug!("Saved message {} in team {}", message.id, message.team_id);
    Ok(())
}

pub fn find_message_by_id(store: &dyn DocumentStore, message_id: &str) -> Result<Option<Message>, StoreError> {
    store
        .find_by_id(COLLECTION, message_id)?
        .map(|doc| from_document(COLLECTION, doc))
        .transpose()
}

// Oldest first, the order a chat renders in
pub fn get_team_messages(store: &dyn DocumentStore, team_id: &str) -> Result<Vec<Message>, StoreError> {
    let docs = store.find(COLLECTION, &Filter::new().eq("teamId", team_id))?;
    let mut messages: Vec<Message> = from_documents(COLLECTION, docs);
    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(messages)
}

pub fn edit_message(
    store: &dyn DocumentStore,
    message_id: &str,
    new_text: &str,
    edited_at: DateTime<Utc>,
) -> Result<UpdateResult, StoreError> {
    store.update_one(
        COLLECTION,
        &Filter::by_id(message_id),
        &Update::new()
            .set("message", new_text)
            .set("edited", true)
            .set("editedAt", timestamp(edited_at)),
    )
}

pub fn delete_message(store: &dyn DocumentStore, message_id: &str) -> Result<DeleteResult, StoreError> {
    store.delete_one(COLLECTION, &Filter::by_id(message_id))
}

pub fn delete_team_messages(store: &dyn DocumentStore, team_id: &str) -> Result<DeleteResult, StoreError> {
    store.delete_many(COLLECTION, &Filter::new().eq("teamId", team_id))
}
