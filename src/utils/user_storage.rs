// src/utils/user_storage.rs
use crate::models::{normalize_email, User, UserRole};
use crate::utils::document_store::{
    from_document, from_documents, to_document, DocumentStore, Filter, StoreError, Update,
    UpdateResult,
};
use log::info;

const COLLECTION: &str = User::COLLECTION;

pub fn list_users(store: &dyn DocumentStore) -> Result<Vec<User>, StoreError> {
    Ok(from_documents(COLLECTION, store.find(COLLECTION, &Filter::new())?))
}

pub fn find_user_by_id(store: &dyn DocumentStore, user_id: &str) -> Result<Option<User>, StoreError> {
    store
        .find_by_id(COLLECTION, user_id)?
        .map(|doc| from_document(COLLECTION, doc))
        .transpose()
}

pub fn find_user_by_email(store: &dyn DocumentStore, email: &str) -> Result<Option<User>, StoreError> {
    store
        .find(COLLECTION, &Filter::new().eq("email", normalize_email(email)))?
        .into_iter()
        .next()
        .map(|doc| from_document(COLLECTION, doc))
        .transpose()
}

/// Inserts the user unless one with the same email exists.
/// Returns `None` when the insert was skipped.
pub fn insert_user_if_absent(store: &dyn DocumentStore, user: &User) -> Result<Option<String>, StoreError> {
    let by_email = Filter::new().eq("email", normalize_email(&user.email));
    match store.insert_if_none(COLLECTION, &by_email, to_document(COLLECTION, user)?)? {
        Some(result) => {
            info!("✅ Registered user: {}", user.id);
            Ok(result.inserted_id)
        }
        None => Ok(None),
    }
}

pub fn set_role_by_id(
    store: &dyn DocumentStore,
    user_id: &str,
    role: UserRole,
) -> Result<UpdateResult, StoreError> {
    store.update_one(
        COLLECTION,
        &Filter::by_id(user_id),
        &Update::new().set("role", role.as_str()),
    )
}

pub fn set_role_by_email(
    store: &dyn DocumentStore,
    email: &str,
    role: UserRole,
) -> Result<UpdateResult, StoreError> {
    store.update_one(
        COLLECTION,
        &Filter::new().eq("email", normalize_email(email)),
        &Update::new().set("role", role.as_str()),
    )
}
