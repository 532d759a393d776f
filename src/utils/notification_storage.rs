// src/utils/notification_storage.rs
use crate::models::Notification;
use crate::utils::document_store::{
    from_documents, to_document, DocumentStore, Filter, StoreError, Update, UpdateResult,
};
use log::debug;

const COLLECTION: &str = Notification::COLLECTION;

pub fn save_notification(store: &dyn DocumentStore, notification: &Notification) -> Result<(), StoreError> {
    store.insert_one(COLLECTION, to_document(COLLECTION, notification)?)?;
    debug!(
        "Saved notification {} for {}",
        notification.id, notification.recipient_id
    );
    Ok(())
}

// Newest first
pub fn get_notifications_for_user(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<Notification>, StoreError> {
    let docs = store.find(COLLECTION, &Filter::new().eq("recipientId", user_id))?;
    let mut notifications: Vec<Notification> = from_documents(COLLECTION, docs);
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(notifications)
}

pub fn mark_read(store: &dyn DocumentStore, notification_id: &str) -> Result<UpdateResult, StoreError> {
    store.update_one(
        COLLECTION,
        &Filter::by_id(notification_id),
        &Update::new().set("read", true),
    )
}

pub fn mark_all_read(store: &dyn DocumentStore, user_id: &str) -> Result<UpdateResult, StoreError> {
    store.update_many(
        COLLECTION,
        &Filter::new().eq("recipientId", user_id).eq("read", false),
        &Update::new().set("read", true),
    )
}
